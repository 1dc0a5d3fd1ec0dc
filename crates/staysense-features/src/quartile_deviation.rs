//! Quartile-deviation feature
//!
//! Learns the 75th percentile of the nightly rate for every
//! (distribution channel, room type, arrival year, arrival week) group of
//! the training batch, then replaces the rate and the arrival-date and
//! room-type columns of any batch with a single ratio: the record's rate
//! over its group's percentile. The distribution channel stays in the
//! output for downstream encoders.

use crate::error::{FeatureError, Result};
use crate::quantile::{deviation, quantile};
use crate::table::LookupTable;
use crate::transformer::{require_column, Transformer};
use serde::{Deserialize, Serialize};
use staysense_core::{Category, Column, Frame};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Composite grouping key, one category per configured group column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<Category>);

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Learned percentile per group
pub type QuartileTable = LookupTable<GroupKey, f64>;

/// Quartile-deviation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuartileDeviationConfig {
    /// Monetary rate column
    #[serde(default = "default_rate_column")]
    pub rate_column: String,

    /// Columns forming the group key, in key order
    #[serde(default = "default_group_columns")]
    pub group_columns: Vec<String>,

    /// Group columns passed through to the output instead of being dropped
    #[serde(default = "default_retained_columns")]
    pub retained_columns: Vec<String>,

    /// Extra arrival-date columns dropped from the output when present
    #[serde(default = "default_consumed_columns")]
    pub consumed_columns: Vec<String>,

    /// Name of the derived column
    #[serde(default = "default_output_column")]
    pub output_column: String,

    /// Quantile learned per group
    #[serde(default = "default_quantile")]
    pub quantile: f64,
}

fn default_rate_column() -> String {
    "ADR".to_string()
}

fn default_group_columns() -> Vec<String> {
    vec![
        "DistributionChannel".to_string(),
        "ReservedRoomType".to_string(),
        "ArrivalDateYear".to_string(),
        "ArrivalDateWeekNumber".to_string(),
    ]
}

fn default_retained_columns() -> Vec<String> {
    vec!["DistributionChannel".to_string()]
}

fn default_consumed_columns() -> Vec<String> {
    vec![
        "ArrivalDateMonth".to_string(),
        "ArrivalDateDayOfMonth".to_string(),
    ]
}

fn default_output_column() -> String {
    "RateThirdQuartileDeviation".to_string()
}

fn default_quantile() -> f64 {
    0.75
}

impl Default for QuartileDeviationConfig {
    fn default() -> Self {
        Self {
            rate_column: default_rate_column(),
            group_columns: default_group_columns(),
            retained_columns: default_retained_columns(),
            consumed_columns: default_consumed_columns(),
            output_column: default_output_column(),
            quantile: default_quantile(),
        }
    }
}

impl QuartileDeviationConfig {
    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.quantile) {
            return Err(FeatureError::Configuration(format!(
                "quantile must be within [0, 1], got {}",
                self.quantile
            )));
        }
        if self.rate_column.is_empty() || self.output_column.is_empty() {
            return Err(FeatureError::Configuration(
                "rate_column and output_column must be non-empty".to_string(),
            ));
        }
        if self.group_columns.contains(&self.rate_column) {
            return Err(FeatureError::Configuration(format!(
                "rate column '{}' cannot also be a group column",
                self.rate_column
            )));
        }
        if let Some(name) = self
            .retained_columns
            .iter()
            .find(|c| !self.group_columns.contains(c))
        {
            return Err(FeatureError::Configuration(format!(
                "retained column '{}' is not a group column",
                name
            )));
        }
        Ok(())
    }

    /// Every column removed from the transform output
    pub fn dropped_columns(&self) -> Vec<&str> {
        let dropped_groups = self
            .group_columns
            .iter()
            .filter(|c| !self.retained_columns.contains(c))
            .map(String::as_str);
        std::iter::once(self.rate_column.as_str())
            .chain(dropped_groups)
            .chain(self.consumed_columns.iter().map(String::as_str))
            .collect()
    }
}

/// Rate deviation from the group-wise upper quartile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuartileDeviationTransform {
    config: QuartileDeviationConfig,
    table: Option<QuartileTable>,
}

impl QuartileDeviationTransform {
    /// Create an unfitted transform
    pub fn new(config: QuartileDeviationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            table: None,
        })
    }

    pub fn config(&self) -> &QuartileDeviationConfig {
        &self.config
    }

    /// Fitted percentile table
    pub fn table(&self) -> Result<&QuartileTable> {
        self.table
            .as_ref()
            .ok_or_else(|| FeatureError::NotFitted("QuartileDeviationTransform".to_string()))
    }

    /// Fitted percentile of one group
    pub fn percentile(&self, key: &GroupKey) -> Result<Option<f64>> {
        Ok(self.table()?.get(key).copied())
    }

    /// Group key of every row; `None` when any key component is missing
    fn group_keys(&self, frame: &Frame) -> Result<Vec<Option<GroupKey>>> {
        let components = self
            .config
            .group_columns
            .iter()
            .map(|name| Ok(require_column(frame, name)?.categories()?))
            .collect::<Result<Vec<_>>>()?;

        Ok((0..frame.n_rows())
            .map(|row| {
                components
                    .iter()
                    .map(|column| column[row].clone())
                    .collect::<Option<Vec<_>>>()
                    .map(GroupKey)
            })
            .collect())
    }
}

impl Default for QuartileDeviationTransform {
    fn default() -> Self {
        Self {
            config: QuartileDeviationConfig::default(),
            table: None,
        }
    }
}

impl Transformer for QuartileDeviationTransform {
    fn fit(&mut self, frame: &Frame, _labels: Option<&[f64]>) -> Result<()> {
        let rates = require_column(frame, &self.config.rate_column)?.numbers()?;
        let keys = self.group_keys(frame)?;
        if frame.is_empty() {
            return Err(FeatureError::InvalidInput(
                "cannot fit quartile deviation on an empty batch".to_string(),
            ));
        }

        let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
        for (row, (rate, key)) in rates.into_iter().zip(keys).enumerate() {
            let (Some(rate), Some(key)) = (rate, key) else {
                continue;
            };
            if rate.is_nan() {
                continue;
            }
            if rate < 0.0 {
                return Err(FeatureError::InvalidInput(format!(
                    "negative {} {} at row {}",
                    self.config.rate_column, rate, row
                )));
            }
            groups.entry(key).or_default().push(rate);
        }

        let q = self.config.quantile;
        let table: QuartileTable = groups
            .into_iter()
            .filter_map(|(key, rates)| quantile(&rates, q).map(|p| (key, p)))
            .collect();

        info!(
            rows = frame.n_rows(),
            groups = table.len(),
            "Fitted quartile deviation on '{}'",
            self.config.rate_column
        );
        self.table = Some(table);
        Ok(())
    }

    fn transform(&self, frame: &Frame) -> Result<Frame> {
        let table = self.table()?;
        let rates = require_column(frame, &self.config.rate_column)?.numbers()?;
        let keys = self.group_keys(frame)?;

        let mut unmatched = 0usize;
        let deviations: Vec<f64> = rates
            .into_iter()
            .zip(keys)
            .map(|(rate, key)| {
                let percentile = key.as_ref().and_then(|k| table.get(k)).copied();
                if percentile.is_none() {
                    unmatched += 1;
                }
                deviation(rate, percentile)
            })
            .collect();

        if unmatched > 0 {
            debug!(unmatched, "Rows without a fitted group percentile");
        }

        let dropped = self.config.dropped_columns();
        let mut out = frame.drop_columns(&dropped[..]);
        out.push_column(Column::new(self.config.output_column.clone(), deviations))?;
        Ok(out)
    }

    fn is_fitted(&self) -> bool {
        self.table.is_some()
    }

    fn feature_names_out(&self, input_features: &[String]) -> Result<Vec<String>> {
        let dropped = self.config.dropped_columns();
        let mut names: Vec<String> = input_features
            .iter()
            .filter(|name| !dropped.contains(&name.as_str()))
            .cloned()
            .collect();
        names.push(self.config.output_column.clone());
        Ok(names)
    }
}
