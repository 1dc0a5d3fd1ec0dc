//! Unit tests for the logit-odds encoder
//!
//! Covers the prevalence split, smoothing clip, the unseen-category
//! fallback and label validation.

use staysense_core::{Category, Column, Frame};
use staysense_features::{FeatureError, LogitOddsConfig, LogitOddsEncoder, Transformer};

const SMOOTHING: f64 = 1e-6;

fn agent_frame(agents: Vec<&str>) -> Frame {
    Frame::from_columns(vec![Column::new("Agent", agents)]).unwrap()
}

/// A x3 with label 0, B x1 with label 1
fn scenario() -> (Frame, Vec<f64>) {
    (agent_frame(vec!["A", "A", "A", "B"]), vec![0.0, 0.0, 0.0, 1.0])
}

fn fitted_scenario() -> LogitOddsEncoder {
    let config = LogitOddsConfig::new(["Agent"]).with_min_frequency(0.5);
    let mut encoder = LogitOddsEncoder::new(config).unwrap();
    let (frame, labels) = scenario();
    encoder.fit(&frame, Some(&labels)).unwrap();
    encoder
}

fn values(frame: &Frame, column: &str) -> Vec<f64> {
    frame
        .column(column)
        .unwrap()
        .numbers()
        .unwrap()
        .into_iter()
        .map(|v| v.expect("encoded cells are never missing"))
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_prevalence_split() {
    let encoder = fitted_scenario();
    assert_eq!(encoder.prevalence("Agent", &Category::from("A")).unwrap(), 1);
    assert_eq!(encoder.prevalence("Agent", &Category::from("B")).unwrap(), 0);
}

#[test]
fn test_clipped_log_odds() {
    let encoder = fitted_scenario();
    let low = (SMOOTHING / (1.0 - SMOOTHING)).ln();
    let high = ((1.0 - SMOOTHING) / SMOOTHING).ln();

    let a = encoder.logit_odds("Agent", &Category::from("A")).unwrap();
    let b = encoder.logit_odds("Agent", &Category::from("B")).unwrap();
    assert!((a - low).abs() < 1e-9);
    assert!((b - high).abs() < 1e-9);
    assert!(a < -13.0 && b > 13.0);
}

#[test]
fn test_unseen_category_fallback() {
    let encoder = fitted_scenario();
    let global = encoder.global_logit_odds().unwrap();
    // mean label 0.25
    assert!((global - (0.25f64 / 0.75).ln()).abs() < 1e-12);

    let out = encoder.transform(&agent_frame(vec!["Z"])).unwrap();
    assert_eq!(values(&out, "Agent_logit_odds"), vec![global]);
    assert_eq!(values(&out, "Agent_prevalence"), vec![0.0]);
}

// =============================================================================
// Output shape
// =============================================================================

#[test]
fn test_two_columns_per_configured_column() {
    let frame = Frame::from_columns(vec![
        Column::new("Agent", vec![9i64, 9, 240, 14]),
        Column::new("Company", vec![Some(40i64), None, Some(40), Some(67)]),
        Column::new("Meal", vec!["BB", "HB", "BB", "SC"]),
    ])
    .unwrap();
    let labels = [1.0, 0.0, 0.0, 1.0];

    let mut encoder = LogitOddsEncoder::default();
    let out = encoder.fit_transform(&frame, Some(&labels)).unwrap();

    assert_eq!(
        out.column_names(),
        vec![
            "Agent_logit_odds",
            "Agent_prevalence",
            "Company_logit_odds",
            "Company_prevalence"
        ]
    );
    assert_eq!(out.n_rows(), 4);
    for column in out.columns() {
        assert_eq!(column.data.null_count(), 0, "{} has missing cells", column.name);
    }
    // missing Company cell is treated as unseen
    assert_eq!(values(&out, "Company_prevalence")[1], 0.0);
    assert_eq!(
        values(&out, "Company_logit_odds")[1],
        encoder.global_logit_odds().unwrap()
    );
}

#[test]
fn test_transform_is_idempotent() {
    let encoder = fitted_scenario();
    let query = agent_frame(vec!["A", "B", "Z"]);
    assert_eq!(
        encoder.transform(&query).unwrap(),
        encoder.transform(&query).unwrap()
    );
}

#[test]
fn test_fit_is_deterministic() {
    let a = fitted_scenario();
    let b = fitted_scenario();
    assert_eq!(a.logit_odds_table().unwrap(), b.logit_odds_table().unwrap());
    assert_eq!(a.prevalence_table().unwrap(), b.prevalence_table().unwrap());
}

#[test]
fn test_instances_own_their_tables() {
    let first = fitted_scenario();

    let mut second = LogitOddsEncoder::new(LogitOddsConfig::new(["Agent"])).unwrap();
    second
        .fit(&agent_frame(vec!["A", "C"]), Some(&[1.0, 0.0]))
        .unwrap();

    assert_eq!(first.prevalence_table().unwrap()["Agent"].len(), 2);
    assert!(first
        .logit_odds_table()
        .unwrap()["Agent"]
        .get(&Category::from("C"))
        .is_none());
    assert!(second.logit_odds("Agent", &Category::from("A")).unwrap() > 13.0);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_transform_before_fit() {
    let encoder = LogitOddsEncoder::default();
    assert_eq!(
        encoder.transform(&agent_frame(vec!["A"])).unwrap_err(),
        FeatureError::NotFitted("LogitOddsEncoder".to_string())
    );
}

#[test]
fn test_fit_without_labels() {
    let mut encoder = LogitOddsEncoder::new(LogitOddsConfig::new(["Agent"])).unwrap();
    let (frame, _) = scenario();
    assert!(matches!(
        encoder.fit(&frame, None),
        Err(FeatureError::InvalidLabel(_))
    ));
}

#[test]
fn test_non_binary_labels() {
    let mut encoder = LogitOddsEncoder::new(LogitOddsConfig::new(["Agent"])).unwrap();
    let (frame, _) = scenario();
    assert!(matches!(
        encoder.fit(&frame, Some(&[0.0, 1.0, 2.0, 0.0])),
        Err(FeatureError::InvalidLabel(_))
    ));
}

#[test]
fn test_misaligned_labels() {
    let mut encoder = LogitOddsEncoder::new(LogitOddsConfig::new(["Agent"])).unwrap();
    let (frame, _) = scenario();
    assert!(matches!(
        encoder.fit(&frame, Some(&[0.0, 1.0])),
        Err(FeatureError::InvalidLabel(_))
    ));
}

#[test]
fn test_degenerate_labels_fail_fast() {
    let mut encoder = LogitOddsEncoder::new(LogitOddsConfig::new(["Agent"])).unwrap();
    let (frame, _) = scenario();
    assert!(matches!(
        encoder.fit(&frame, Some(&[1.0; 4])),
        Err(FeatureError::InvalidLabel(_))
    ));
    assert!(matches!(
        encoder.fit(&frame, Some(&[0.0; 4])),
        Err(FeatureError::InvalidLabel(_))
    ));
    assert!(!encoder.is_fitted());
}

#[test]
fn test_configured_column_absent_at_fit() {
    let mut encoder = LogitOddsEncoder::default();
    let (frame, labels) = scenario();
    assert_eq!(
        encoder.fit(&frame, Some(&labels)).unwrap_err(),
        FeatureError::Configuration(
            "column 'Company' is not present in the training batch".to_string()
        )
    );
}

#[test]
fn test_configured_column_absent_at_transform() {
    let encoder = fitted_scenario();
    let frame = Frame::from_columns(vec![Column::new("Company", vec![40i64])]).unwrap();
    assert_eq!(
        encoder.transform(&frame).unwrap_err(),
        FeatureError::MissingColumn("Agent".to_string())
    );
}

#[test]
fn test_invalid_parameters() {
    assert!(matches!(
        LogitOddsEncoder::new(LogitOddsConfig::new(["Agent"]).with_smoothing(-1.0)),
        Err(FeatureError::Configuration(_))
    ));
    assert!(matches!(
        LogitOddsEncoder::new(LogitOddsConfig::new(["Agent"]).with_min_frequency(-0.1)),
        Err(FeatureError::Configuration(_))
    ));
}
