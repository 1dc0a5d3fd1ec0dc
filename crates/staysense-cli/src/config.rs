//! CLI configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file base name, resolved against the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config/staysense";

/// Runner configuration
///
/// Read from `config/staysense.{yaml,toml,json}` and `STAYSENSE_*`
/// environment variables, the latter taking precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Training records (JSON array), labels included
    pub training_path: Option<PathBuf>,

    /// Records to transform and score (JSON array); defaults to the training file
    pub input_path: Option<PathBuf>,

    /// Output file; stdout when unset
    pub output_path: Option<PathBuf>,

    /// Name of the binary label field in training records
    pub label_column: String,

    /// Pipeline YAML; built-in defaults when unset
    pub pipeline_config: Option<PathBuf>,

    /// Linear classifier YAML; predictions are skipped when unset
    pub model_path: Option<PathBuf>,

    /// Emit logs as JSON lines
    pub json_logs: bool,

    /// Log level
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            training_path: None,
            input_path: None,
            output_path: None,
            label_column: "IsCanceled".to_string(),
            pipeline_config: None,
            model_path: None,
            json_logs: false,
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from the given config file base name plus the environment
    pub fn load_from(file: impl AsRef<Path>) -> anyhow::Result<Self> {
        let name = file.as_ref().to_string_lossy().into_owned();
        let config_result = config::Config::builder()
            .add_source(config::File::with_name(&name).required(false))
            .add_source(config::Environment::with_prefix("STAYSENSE"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                tracing::info!("Could not read config ({}), using default configuration", e);
                Ok(Self::default())
            }
        }
    }

    /// The file to score, falling back to the training file
    pub fn scoring_path(&self) -> Option<&Path> {
        self.input_path
            .as_deref()
            .or(self.training_path.as_deref())
    }
}
