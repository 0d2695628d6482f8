use thiserror::Error;

/// Errors that can occur during configuration loading
///
/// All other operations in the crate are total functions over in-memory
/// lists; configuration is the only fallible surface.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}
