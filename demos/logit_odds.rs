//! Logit-Odds Encoding Example
//!
//! Encodes the high-cardinality Agent and Company columns:
//! - each category gets the smoothed log-odds of cancellation in training
//! - a prevalence flag marks categories above the minimum frequency
//! - unseen categories fall back to the global log-odds with flag 0

use staysense_core::{Category, Column, Frame};
use staysense_features::{LogitOddsConfig, LogitOddsEncoder, Transformer};

fn main() -> anyhow::Result<()> {
    staysense_examples::init_tracing();

    println!("=== Logit-Odds Encoding Example ===\n");

    let training = Frame::from_columns(vec![
        Column::new("Agent", vec![9i64, 9, 9, 9, 240, 240, 14, 9]),
        Column::new("Company", vec![40i64, 40, 40, 40, 40, 40, 40, 223]),
    ])?;
    let labels = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];

    let config = LogitOddsConfig::default().with_min_frequency(0.2);
    let mut encoder = LogitOddsEncoder::new(config)?;
    encoder.fit(&training, Some(&labels))?;

    println!("Global log-odds: {:.4}", encoder.global_logit_odds()?);
    for (column, table) in encoder.logit_odds_table()? {
        println!("\n{}:", column);
        for (category, odds) in table.iter() {
            println!(
                "  {:>4}  log-odds {:>8.4}  prevalent {}",
                category,
                odds,
                encoder.prevalence(column, category)?
            );
        }
    }

    let scoring = Frame::from_columns(vec![
        Column::new("Agent", vec![9i64, 240, 999]),
        Column::new("Company", vec![40i64, 223, 40]),
    ])?;
    let encoded = encoder.transform(&scoring)?;

    println!("\nEncoded scoring batch:");
    for row in 0..encoded.n_rows() {
        let record = encoded.row(row).unwrap_or_default();
        let mut names: Vec<_> = record.keys().collect();
        names.sort();
        let cells: Vec<String> = names
            .iter()
            .map(|n| format!("{}={:?}", n, record[n.as_str()]))
            .collect();
        println!("  {}", cells.join("  "));
    }

    println!(
        "\nAgent 999 was never seen: log-odds {:.4}, prevalent {}",
        encoder.logit_odds("Agent", &Category::Code(999))?,
        encoder.prevalence("Agent", &Category::Code(999))?
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
