use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod filter;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use error::{ConfigError, FilterValidationError};
pub use filter::SalesFilter;
pub use settings::{
    AnalysisConfig, Config, DataSourceConfig, LoggingConfig, OutputFormat, ReportConfig,
};
pub use telemetry::init_tracing;

/// Loads configuration from `path` (a missing file is not an error: every
/// section has defaults), then applies `ECOM__SECTION__KEY`
/// environment overrides (e.g. `ECOM__ANALYSIS__TARGET_YEAR=2018`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("ECOM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data_source.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "data_source.path must not be empty".to_string(),
        ));
    }
    config.analysis.comparison_filter()?;
    Ok(())
}
