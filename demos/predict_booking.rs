//! Booking Cancellation Example
//!
//! End to end: fit the preprocessor on a handful of labeled bookings,
//! attach a linear classifier and score new booking requests.

use staysense_sdk::{
    BookingRequest, CancellationPredictor, LinearClassifier, PreprocessorBuilder, Transformer,
};

fn booking(deposit_type: &str, agent: i64, adr: f64, lead_time: f64) -> BookingRequest {
    BookingRequest {
        deposit_type: deposit_type.to_string(),
        agent,
        adr,
        lead_time,
        ..Default::default()
    }
}

const MODEL: &str = r#"
intercept: -2.5
weights:
  LeadTime: 0.9
  DepositType_Non Refund: 3.0
  Agent_logit_odds: 0.4
"#;

fn main() -> anyhow::Result<()> {
    staysense_examples::init_tracing();

    println!("=== Booking Cancellation Example ===\n");

    let training = BookingRequest::to_frame(&[
        booking("No Deposit", 9, 80.0, 12.0),
        booking("No Deposit", 9, 120.0, 30.0),
        booking("Non Refund", 240, 95.0, 210.0),
        booking("No Deposit", 240, 101.0, 2.0),
        booking("Non Refund", 240, 150.0, 160.0),
        booking("No Deposit", 14, 60.0, 45.0),
    ])?;
    let labels = [0.0, 0.0, 1.0, 0.0, 1.0, 0.0];

    let mut preprocessor = PreprocessorBuilder::new().with_min_frequency(0.1).build()?;
    preprocessor.fit(&training, Some(&labels))?;
    println!("Features ({}):", preprocessor.feature_names()?.len());
    for name in preprocessor.feature_names()? {
        println!("  {}", name);
    }

    let model = LinearClassifier::from_yaml_str(MODEL)?;
    let predictor = CancellationPredictor::new(preprocessor, model)?;

    println!("\nPredictions:");
    let requests = [
        ("default form", BookingRequest::default()),
        ("non-refundable, long lead", booking("Non Refund", 240, 130.0, 300.0)),
        ("unknown agent", booking("No Deposit", 77, 90.0, 20.0)),
    ];
    for (label, request) in &requests {
        println!("  {:<28} {}", label, predictor.predict_booking(request)?);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
