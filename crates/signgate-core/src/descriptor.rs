//! Keystore descriptor (`key.properties`) and its loader

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{DescriptorError, Result};
use crate::properties::{escape_value, Properties};

/// Descriptor key holding the keystore path
pub const STORE_FILE: &str = "storeFile";

/// Descriptor key holding the keystore password
pub const STORE_PASSWORD: &str = "storePassword";

/// Descriptor key holding the key alias
pub const KEY_ALIAS: &str = "keyAlias";

/// Descriptor key holding the key password
pub const KEY_PASSWORD: &str = "keyPassword";

/// Keys a complete descriptor must define, in the order they are checked
pub const REQUIRED_KEYS: [&str; 4] = [KEY_ALIAS, KEY_PASSWORD, STORE_FILE, STORE_PASSWORD];

const REDACTED: &str = "********";

/// Release signing credentials read from the descriptor file
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeystoreDescriptor {
    /// Path to the keystore, as written in the descriptor
    pub store_file: String,
    #[serde(serialize_with = "redact")]
    pub store_password: String,
    pub key_alias: String,
    #[serde(serialize_with = "redact")]
    pub key_password: String,
}

impl KeystoreDescriptor {
    /// Resolve `storeFile` the way the app module's build script would:
    /// relative paths are taken from the module directory.
    pub fn store_file_path(&self, module_dir: &Path) -> PathBuf {
        let path = Path::new(&self.store_file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            module_dir.join(path)
        }
    }
}

impl fmt::Debug for KeystoreDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeystoreDescriptor")
            .field("store_file", &self.store_file)
            .field("store_password", &REDACTED)
            .field("key_alias", &self.key_alias)
            .field("key_password", &REDACTED)
            .finish()
    }
}

fn redact<T, S: serde::Serializer>(_: &T, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

/// Read the descriptor file once.
///
/// Returns `Ok(None)` when the file does not exist; an existing but empty
/// file yields empty properties, not `None`.
pub fn load_descriptor(path: &Path) -> Result<Option<Properties>> {
    if !path.exists() {
        debug!(path = %path.display(), "no keystore descriptor");
        return Ok(None);
    }

    info!(path = %path.display(), "loading keystore descriptor");
    let content = std::fs::read(path).map_err(|source| DescriptorError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let properties = Properties::parse_latin1(&content).map_err(|e| DescriptorError::ParseError {
        path: path.to_path_buf(),
        line: e.line,
        message: e.message,
    })?;

    debug!(path = %path.display(), keys = properties.len(), "keystore descriptor loaded");
    Ok(Some(properties))
}

/// Commented descriptor template for `signgate init`.
///
/// Passwords are left blank for the operator to fill in.
pub fn descriptor_template(key_alias: &str, store_file: &str) -> String {
    let key_alias = escape_value(key_alias);
    let store_file = escape_value(store_file);
    format!(
        "# Release signing for the Android app.\n\
         # Keep this file out of version control.\n\
         #\n\
         # storeFile is resolved relative to the app module unless absolute.\n\
         {STORE_PASSWORD}=\n\
         {KEY_PASSWORD}=\n\
         {KEY_ALIAS}={key_alias}\n\
         {STORE_FILE}={store_file}\n"
    )
}
