use crate::error::FilterValidationError;
use crate::filter::SalesFilter;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data_source: DataSourceConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the raw CSV feeds live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceConfig {
    /// Directory containing `orders_dataset.csv` and its sibling feeds.
    pub path: PathBuf,
}

/// The period under analysis and the optional comparison period.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub target_year: i32,
    /// When set, revenue growth is computed against this year.
    #[serde(default)]
    pub comparison_year: Option<i32>,
    /// 1-12. Restricts both periods to the same month.
    #[serde(default)]
    pub target_month: Option<u32>,
    /// Matched case-insensitively against the order status enum.
    #[serde(default)]
    pub order_status: Option<String>,
}

impl AnalysisConfig {
    pub fn current_filter(&self) -> Result<SalesFilter, FilterValidationError> {
        SalesFilter::new(
            self.target_year,
            self.target_month,
            self.order_status.as_deref(),
        )
    }

    pub fn comparison_filter(&self) -> Result<Option<SalesFilter>, FilterValidationError> {
        let current = self.current_filter()?;
        Ok(self.comparison_year.map(|year| current.with_year(year)))
    }
}

/// How the CLI renders the computed metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs also go to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file_prefix() -> String {
    "ecom-insights.log".to_string()
}

// --- Default Implementations ---
// These allow a user to omit whole sections from their toml and still get
// the conventional analysis: delivered orders of 2023 compared with 2022.

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ecommerce_data"),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_year: 2023,
            comparison_year: Some(2022),
            target_month: None,
            order_status: Some("delivered".to_string()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            file_prefix: default_log_file_prefix(),
        }
    }
}
