//! Signgate Core - release signing resolution for Android build pipelines
//!
//! This crate decides, before any packaging work starts, whether a release
//! signing configuration is available and whether the build must stop:
//! - `properties`: reader for the `key=value` keystore descriptor file
//! - `descriptor`: the keystore descriptor and its one-shot loader
//! - `intent`: what the requested build tasks ask for
//! - `resolver`: the pure signing resolution policy
//! - `config`: optional `signgate.toml` project layout

pub mod config;
pub mod descriptor;
pub mod error;
pub mod intent;
pub mod properties;
pub mod resolver;

pub use descriptor::{load_descriptor, KeystoreDescriptor};
pub use error::{ConfigError, DescriptorError, Result, SigngateError, SigningError};
pub use intent::{BuildType, InvocationIntent};
pub use properties::Properties;
pub use resolver::{resolve, ReleaseSigning, SigningResolution, UNCONFIGURED_MESSAGE};
