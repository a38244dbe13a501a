//! Exit codes for the CLI

use signgate_core::{SigngateError, SigningError};
use thiserror::Error;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration or descriptor error
pub const CONFIG_ERROR: i32 = 2;

/// Validation error
pub const VALIDATION_ERROR: i32 = 5;

/// Release signing error (missing field or unconfigured release build)
pub const SIGNING_ERROR: i32 = 6;

/// `check` found problems; details were already printed
#[derive(Debug, Error)]
#[error("Keystore descriptor check failed with {errors} error(s)")]
pub struct ValidationFailed {
    pub errors: usize,
}

/// Map a command error to the process exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ValidationFailed>().is_some() {
        return VALIDATION_ERROR;
    }
    if err.downcast_ref::<SigningError>().is_some() {
        return SIGNING_ERROR;
    }
    match err.downcast_ref::<SigngateError>() {
        Some(e) if e.is_signing() => SIGNING_ERROR,
        Some(e) if e.is_config() => CONFIG_ERROR,
        _ => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signgate_core::ConfigError;

    #[test]
    fn test_signing_errors() {
        let err = anyhow::Error::new(SigningError::ReleaseSigningUnconfigured);
        assert_eq!(for_error(&err), SIGNING_ERROR);

        let err = anyhow::Error::new(SigngateError::from(SigningError::MissingField(
            "keyAlias".to_string(),
        )));
        assert_eq!(for_error(&err), SIGNING_ERROR);
    }

    #[test]
    fn test_config_error() {
        let err = anyhow::Error::new(SigngateError::from(ConfigError::InvalidValue {
            field: "android.root".to_string(),
            message: "cannot be empty".to_string(),
        }));
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_validation_and_other_errors() {
        let err = anyhow::Error::new(ValidationFailed { errors: 2 });
        assert_eq!(for_error(&err), VALIDATION_ERROR);

        let err = anyhow::anyhow!("something else");
        assert_eq!(for_error(&err), ERROR);
    }
}
