//! Logit-odds target encoding for high-cardinality categoricals
//!
//! For every configured column the encoder emits two features:
//! `<col>_logit_odds`, the smoothed log-odds of the positive label among
//! training rows of the same category, and `<col>_prevalence`, a 0/1 flag
//! telling whether the category was frequent enough in training.
//! Categories unseen at fit time fall back to the log-odds of the global
//! label rate and are flagged rare.

use crate::error::{FeatureError, Result};
use crate::table::LookupTable;
use crate::transformer::{require_column, Transformer};
use serde::{Deserialize, Serialize};
use staysense_core::{Category, Column, Frame};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Smoothed log-odds per (column, category)
pub type LogitOddsTable = BTreeMap<String, LookupTable<Category, f64>>;

/// Prevalence flag per (column, category); 1 = frequent, 0 = rare
pub type PrevalenceTable = BTreeMap<String, LookupTable<Category, u8>>;

/// Logit-odds encoder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogitOddsConfig {
    /// Columns to encode, in output order
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,

    /// Relative frequency below which a category is rare
    #[serde(default = "default_min_frequency")]
    pub min_frequency: f64,

    /// Clip bound keeping log-odds finite
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
}

fn default_columns() -> Vec<String> {
    vec!["Agent".to_string(), "Company".to_string()]
}

fn default_min_frequency() -> f64 {
    0.02
}

fn default_smoothing() -> f64 {
    1e-6
}

impl LogitOddsConfig {
    /// Create a configuration with default frequency and smoothing
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            min_frequency: default_min_frequency(),
            smoothing: default_smoothing(),
        }
    }

    pub fn with_min_frequency(mut self, min_frequency: f64) -> Self {
        self.min_frequency = min_frequency;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(FeatureError::Configuration(
                "at least one column must be configured for logit-odds encoding".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_frequency) {
            return Err(FeatureError::Configuration(format!(
                "min_frequency must be within [0, 1], got {}",
                self.min_frequency
            )));
        }
        // The clip interval [s, 1 - s] is empty from 0.5 upwards
        if !(self.smoothing > 0.0 && self.smoothing < 0.5) {
            return Err(FeatureError::Configuration(format!(
                "smoothing must be within (0, 0.5), got {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}

impl Default for LogitOddsConfig {
    fn default() -> Self {
        Self::new(default_columns())
    }
}

/// Tables learned by `fit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FittedTables {
    logit_odds: LogitOddsTable,
    prevalence: PrevalenceTable,
    global_logit_odds: f64,
}

/// Per-category running totals
#[derive(Default)]
struct CategoryStats {
    count: usize,
    positives: f64,
}

/// `ln(p / (1 - p))`
pub fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Logit-odds and prevalence encoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogitOddsEncoder {
    config: LogitOddsConfig,
    fitted: Option<FittedTables>,
}

impl LogitOddsEncoder {
    /// Create an unfitted encoder
    pub fn new(config: LogitOddsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fitted: None,
        })
    }

    pub fn config(&self) -> &LogitOddsConfig {
        &self.config
    }

    fn fitted(&self) -> Result<&FittedTables> {
        self.fitted
            .as_ref()
            .ok_or_else(|| FeatureError::NotFitted("LogitOddsEncoder".to_string()))
    }

    /// Log-odds of the global label rate, used for unseen categories
    pub fn global_logit_odds(&self) -> Result<f64> {
        Ok(self.fitted()?.global_logit_odds)
    }

    pub fn logit_odds_table(&self) -> Result<&LogitOddsTable> {
        Ok(&self.fitted()?.logit_odds)
    }

    pub fn prevalence_table(&self) -> Result<&PrevalenceTable> {
        Ok(&self.fitted()?.prevalence)
    }

    /// Encoded log-odds of one category, with the unseen fallback applied
    pub fn logit_odds(&self, column: &str, category: &Category) -> Result<f64> {
        let fitted = self.fitted()?;
        let table = fitted
            .logit_odds
            .get(column)
            .ok_or_else(|| FeatureError::MissingColumn(column.to_string()))?;
        Ok(table
            .get(category)
            .copied()
            .unwrap_or(fitted.global_logit_odds))
    }

    /// Prevalence flag of one category; unseen categories are rare
    pub fn prevalence(&self, column: &str, category: &Category) -> Result<u8> {
        let table = self
            .fitted()?
            .prevalence
            .get(column)
            .ok_or_else(|| FeatureError::MissingColumn(column.to_string()))?;
        Ok(table.get(category).copied().unwrap_or(0))
    }

    /// Check labels and return their mean
    fn label_mean(&self, labels: Option<&[f64]>, n_rows: usize) -> Result<f64> {
        let labels = labels.ok_or_else(|| {
            FeatureError::InvalidLabel("logit-odds encoding requires labels".to_string())
        })?;
        if labels.len() != n_rows {
            return Err(FeatureError::InvalidLabel(format!(
                "expected {} labels, got {}",
                n_rows,
                labels.len()
            )));
        }
        if labels.is_empty() {
            return Err(FeatureError::InvalidLabel(
                "cannot fit on an empty label vector".to_string(),
            ));
        }
        if let Some((row, label)) = labels
            .iter()
            .enumerate()
            .find(|(_, l)| **l != 0.0 && **l != 1.0)
        {
            return Err(FeatureError::InvalidLabel(format!(
                "label {} at row {} is not binary",
                label, row
            )));
        }

        let mean = labels.iter().sum::<f64>() / labels.len() as f64;
        if mean == 0.0 || mean == 1.0 {
            return Err(FeatureError::InvalidLabel(format!(
                "all labels are {}; global log-odds would be infinite",
                mean
            )));
        }
        Ok(mean)
    }

    /// Frequency flags and clipped log-odds for one column
    fn fit_column(
        &self,
        categories: &[Option<Category>],
        labels: &[f64],
    ) -> (LookupTable<Category, f64>, LookupTable<Category, u8>) {
        let mut stats: BTreeMap<Category, CategoryStats> = BTreeMap::new();
        for (category, label) in categories.iter().zip(labels) {
            if let Some(category) = category {
                let entry = stats.entry(category.clone()).or_default();
                entry.count += 1;
                entry.positives += label;
            }
        }

        let observed: usize = stats.values().map(|s| s.count).sum();
        let s = self.config.smoothing;

        let prevalence = stats
            .iter()
            .map(|(category, st)| {
                let frequency = st.count as f64 / observed as f64;
                let flag = u8::from(frequency >= self.config.min_frequency);
                (category.clone(), flag)
            })
            .collect();

        let logit_odds = stats
            .iter()
            .map(|(category, st)| {
                let mean = st.positives / st.count as f64;
                (category.clone(), logit(mean.clamp(s, 1.0 - s)))
            })
            .collect();

        (logit_odds, prevalence)
    }
}

impl Default for LogitOddsEncoder {
    fn default() -> Self {
        Self {
            config: LogitOddsConfig::default(),
            fitted: None,
        }
    }
}

impl Transformer for LogitOddsEncoder {
    fn fit(&mut self, frame: &Frame, labels: Option<&[f64]>) -> Result<()> {
        self.config.validate()?;
        if let Some(absent) = self.config.columns.iter().find(|c| !frame.has_column(c)) {
            return Err(FeatureError::Configuration(format!(
                "column '{}' is not present in the training batch",
                absent
            )));
        }

        let mean = self.label_mean(labels, frame.n_rows())?;
        let labels = labels.unwrap_or_default();
        let global_logit_odds = logit(mean);

        let mut logit_odds = LogitOddsTable::new();
        let mut prevalence = PrevalenceTable::new();
        for name in &self.config.columns {
            let categories = require_column(frame, name)?.categories()?;
            let (odds, flags) = self.fit_column(&categories, labels);
            debug!(
                column = %name,
                categories = odds.len(),
                prevalent = flags.iter().filter(|(_, f)| **f == 1).count(),
                "Fitted logit-odds column"
            );
            logit_odds.insert(name.clone(), odds);
            prevalence.insert(name.clone(), flags);
        }

        info!(
            rows = frame.n_rows(),
            columns = self.config.columns.len(),
            global_logit_odds,
            "Fitted logit-odds encoder"
        );
        self.fitted = Some(FittedTables {
            logit_odds,
            prevalence,
            global_logit_odds,
        });
        Ok(())
    }

    fn transform(&self, frame: &Frame) -> Result<Frame> {
        let fitted = self.fitted()?;
        let mut out = Frame::new();

        for name in &self.config.columns {
            let categories = require_column(frame, name)?.categories()?;
            let not_fitted = || FeatureError::NotFitted(format!("LogitOddsEncoder column '{}'", name));
            let odds_table = fitted.logit_odds.get(name).ok_or_else(not_fitted)?;
            let flag_table = fitted.prevalence.get(name).ok_or_else(not_fitted)?;

            let mut odds = Vec::with_capacity(categories.len());
            let mut flags = Vec::with_capacity(categories.len());
            for category in &categories {
                let seen_odds = category.as_ref().and_then(|c| odds_table.get(c)).copied();
                let seen_flag = category.as_ref().and_then(|c| flag_table.get(c)).copied();
                odds.push(seen_odds.unwrap_or(fitted.global_logit_odds));
                flags.push(i64::from(seen_flag.unwrap_or(0)));
            }

            out.push_column(Column::new(format!("{}_logit_odds", name), odds))?;
            out.push_column(Column::new(format!("{}_prevalence", name), flags))?;
        }

        Ok(out)
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    fn feature_names_out(&self, _input_features: &[String]) -> Result<Vec<String>> {
        Ok(self
            .config
            .columns
            .iter()
            .flat_map(|c| [format!("{}_logit_odds", c), format!("{}_prevalence", c)])
            .collect())
    }
}
