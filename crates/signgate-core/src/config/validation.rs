//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_android(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_android(config: &Config) -> Result<()> {
    let android = &config.android;

    for (field, value) in [
        ("android.root", &android.root),
        ("android.descriptor", &android.descriptor),
        ("android.module", &android.module),
    ] {
        if value.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "cannot be empty".to_string(),
            }
            .into());
        }
    }

    if android.descriptor.is_absolute() {
        return Err(ConfigError::InvalidValue {
            field: "android.descriptor".to_string(),
            message: "must be relative to android.root".to_string(),
        }
        .into());
    }

    Ok(())
}
