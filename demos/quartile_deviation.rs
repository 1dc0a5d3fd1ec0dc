//! Quartile Deviation Example
//!
//! Shows how a booking's average daily rate is compared against the 75th
//! percentile of its peer group (channel, room type, year, week):
//! - fit learns one percentile per group seen in training
//! - transform divides each rate by its group percentile
//! - bookings from a group never seen in training get 0

use staysense_core::{Column, Frame};
use staysense_features::{QuartileDeviationTransform, Transformer};

fn bookings(rates: Vec<f64>, channels: Vec<&str>, weeks: Vec<i64>) -> anyhow::Result<Frame> {
    let n = rates.len();
    Ok(Frame::from_columns(vec![
        Column::new("ADR", rates),
        Column::new("DistributionChannel", channels),
        Column::new("ReservedRoomType", vec!["A"; n]),
        Column::new("ArrivalDateYear", vec![2017i64; n]),
        Column::new("ArrivalDateWeekNumber", weeks),
        Column::new("ArrivalDateMonth", vec![1i64; n]),
        Column::new("ArrivalDateDayOfMonth", vec![4i64; n]),
    ])?)
}

fn main() -> anyhow::Result<()> {
    staysense_examples::init_tracing();

    println!("=== Quartile Deviation Example ===\n");

    let training = bookings(
        vec![80.0, 120.0, 60.0, 75.0, 90.0, 200.0],
        vec!["TA/TO", "TA/TO", "Direct", "Direct", "Direct", "Corporate"],
        vec![1, 1, 1, 1, 1, 2],
    )?;

    let mut transform = QuartileDeviationTransform::default();
    transform.fit(&training, None)?;

    println!("Learned percentiles:");
    for (key, percentile) in transform.table()?.iter() {
        println!("  {} -> {:.2}", key, percentile);
    }

    let scoring = bookings(
        vec![110.0, 90.0, 150.0],
        vec!["TA/TO", "Direct", "GDS"],
        vec![1, 1, 1],
    )?;
    let enriched = transform.transform(&scoring)?;

    println!("\nDeviations:");
    let rates = enriched.column("ADR")?.numbers()?;
    let channels = enriched.column("DistributionChannel")?.categories()?;
    let deviations = enriched
        .column(&transform.config().output_column)?
        .numbers()?;
    for ((rate, channel), deviation) in rates.iter().zip(&channels).zip(&deviations) {
        println!(
            "  {:<8} ADR {:>6.1} -> {:.3}",
            channel.as_ref().map(|c| c.to_string()).unwrap_or_default(),
            rate.unwrap_or_default(),
            deviation.unwrap_or_default()
        );
    }

    println!("\nColumns after transform: {:?}", enriched.column_names());
    println!("(arrival month and day are consumed by the transform)");

    println!("\n=== Example Complete ===");
    Ok(())
}
