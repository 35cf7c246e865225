use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{BridgeConfig, Config, ScannerConfig};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, layers `SENTINEL_`-prefixed environment variables on
/// top (e.g. `SENTINEL_BRIDGE__URL`), deserializes the result into our
/// strongly-typed `Config` struct, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        // Environment overrides, mainly so the bridge URL can be swapped
        // per deployment without editing the file.
        .add_source(config::Environment::with_prefix("SENTINEL").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    if config.bridge.url.is_empty() {
        return Err(ConfigError::Invalid(
            "bridge.url must not be empty".to_string(),
        ));
    }

    Ok(config)
}
