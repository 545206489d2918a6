use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Environment, Settings};

/// Loads the application configuration from the process environment.
///
/// This function is the primary entry point for this crate. A local `.env`
/// file is read first (if present), then every setting is sourced from
/// environment variables, falling back to the documented defaults.
pub fn load_settings() -> Result<Settings, ConfigError> {
    // Populate the environment from .env before the builder snapshots it.
    // A missing file is fine; any already-set variable wins.
    dotenvy::dotenv().ok();

    let builder = config::Config::builder()
        .add_source(config::Environment::default().try_parsing(true))
        .build()?;

    // Attempt to deserialize the environment snapshot into our `Settings`
    // struct; unset variables take their serde defaults.
    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}
