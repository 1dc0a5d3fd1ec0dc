//! StaySense Features - fit/transform feature engineering for booking records
//!
//! This crate provides the transforms that turn raw booking batches into
//! numeric features:
//! - [`QuartileDeviationTransform`] - rate relative to a group-wise 75th percentile
//! - [`LogitOddsEncoder`] - smoothed log-odds and prevalence flag per category
//! - [`StandardScaler`] and [`OneHotEncoder`] for the plain column groups
//!
//! Every transform is fitted once (`&mut self`) and then applied any number
//! of times through `&self`.

pub mod error;
pub mod logit_odds;
pub mod one_hot;
pub mod quantile;
pub mod quartile_deviation;
pub mod scaler;
pub mod table;
pub mod transformer;

// Re-export main types
pub use error::{FeatureError, Result};
pub use logit_odds::{LogitOddsConfig, LogitOddsEncoder, LogitOddsTable, PrevalenceTable};
pub use one_hot::{HandleUnknown, OneHotEncoder};
pub use quartile_deviation::{
    GroupKey, QuartileDeviationConfig, QuartileDeviationTransform, QuartileTable,
};
pub use scaler::StandardScaler;
pub use table::LookupTable;
pub use transformer::Transformer;
