//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use staysense_sdk::{BookingRequest, Frame};

/// A booking varied from the form defaults
pub fn booking(
    hotel: &str,
    deposit_type: &str,
    agent: i64,
    adr: f64,
    lead_time: f64,
) -> BookingRequest {
    BookingRequest {
        hotel: hotel.to_string(),
        deposit_type: deposit_type.to_string(),
        agent,
        adr,
        lead_time,
        ..Default::default()
    }
}

/// Eight training bookings; non-refundable deposits are the cancellations
pub fn training_requests() -> Vec<BookingRequest> {
    vec![
        booking("H1", "No Deposit", 9, 80.0, 10.0),
        booking("H1", "No Deposit", 9, 120.0, 35.0),
        booking("H2", "Non Refund", 9, 95.0, 210.0),
        booking("H1", "No Deposit", 9, 101.0, 3.0),
        booking("H2", "Non Refund", 240, 150.0, 180.0),
        booking("H1", "No Deposit", 240, 60.0, 48.0),
        booking("H2", "Non Refund", 14, 110.0, 120.0),
        BookingRequest {
            meal: "HB".to_string(),
            arrival_date_week_number: 2,
            ..booking("H1", "No Deposit", 9, 130.0, 0.0)
        },
    ]
}

/// Cancellation labels aligned with [`training_requests`]
pub fn training_labels() -> Vec<f64> {
    vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]
}

pub fn training_frame() -> Frame {
    BookingRequest::to_frame(&training_requests()).expect("training fixture is valid")
}

/// Three bookings in the categories seen during training
pub fn scoring_frame() -> Frame {
    BookingRequest::to_frame(&[
        booking("H2", "Non Refund", 240, 140.0, 200.0),
        booking("H1", "No Deposit", 9, 90.0, 5.0),
        booking("H1", "No Deposit", 14, 100.0, 30.0),
    ])
    .expect("scoring fixture is valid")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
