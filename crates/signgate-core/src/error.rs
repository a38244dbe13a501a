//! Error types for Signgate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SigngateError
pub type Result<T> = std::result::Result<T, SigngateError>;

/// Main error type for Signgate operations
#[derive(Debug, Error)]
pub enum SigngateError {
    /// Signing resolution errors
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// Descriptor file errors
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Signing resolution errors
#[derive(Debug, Error)]
pub enum SigningError {
    /// A keystore was declared but one of its fields is absent
    #[error("Missing required signing field '{0}' in keystore descriptor")]
    MissingField(String),

    /// Release build requested without any signing configuration
    #[error("{}", crate::resolver::UNCONFIGURED_MESSAGE)]
    ReleaseSigningUnconfigured,
}

/// Descriptor file errors
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Failed to parse the properties file
    #[error("Failed to parse {path} at line {line}: {message}")]
    ParseError {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Failed to read the descriptor file
    #[error("Failed to read keystore descriptor {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

impl SigngateError {
    /// Whether this error comes from the signing policy itself
    pub fn is_signing(&self) -> bool {
        matches!(self, Self::Signing(_))
    }

    /// Whether this error comes from configuration or descriptor input
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Descriptor(_))
    }
}
