//! Release signing resolution
//!
//! [`resolve`] is pure: the descriptor contents are read by the caller and
//! passed in, so the policy can be exercised without touching the disk.
//! It never aborts a build on its own. A missing configuration for a
//! release build is only flagged through [`SigningResolution::must_fail`];
//! the caller turns that into an error with
//! [`SigningResolution::require_signing`].

use serde::Serialize;
use tracing::{debug, warn};

use crate::descriptor::{KeystoreDescriptor, KEY_ALIAS, KEY_PASSWORD, STORE_FILE, STORE_PASSWORD};
use crate::error::{Result, SigningError};
use crate::intent::InvocationIntent;
use crate::properties::Properties;

/// Diagnostic shown when a release build has no signing configuration
pub const UNCONFIGURED_MESSAGE: &str = "Release signing isn't configured. Create android/key.properties and point it at your upload keystore (.jks). Then rebuild with: flutter build appbundle --release";

/// Signing configuration available to the release build type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "keystore", rename_all = "lowercase")]
pub enum ReleaseSigning {
    Configured(KeystoreDescriptor),
    Unconfigured,
}

/// Outcome of resolving release signing for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningResolution {
    pub signing: ReleaseSigning,
    /// True iff signing is unconfigured and a release build was requested
    pub must_fail: bool,
}

impl SigningResolution {
    pub fn is_configured(&self) -> bool {
        matches!(self.signing, ReleaseSigning::Configured(_))
    }

    pub fn keystore(&self) -> Option<&KeystoreDescriptor> {
        match &self.signing {
            ReleaseSigning::Configured(descriptor) => Some(descriptor),
            ReleaseSigning::Unconfigured => None,
        }
    }

    /// Convert a fatal resolution into `ReleaseSigningUnconfigured`.
    ///
    /// Returns the keystore when one is configured, `None` for a build that
    /// can proceed without release signing.
    pub fn require_signing(&self) -> std::result::Result<Option<&KeystoreDescriptor>, SigningError> {
        if self.must_fail {
            return Err(SigningError::ReleaseSigningUnconfigured);
        }
        Ok(self.keystore())
    }
}

/// Resolve release signing from the descriptor contents (absent when the
/// file does not exist) and the requested task names.
pub fn resolve<I, S>(descriptor: Option<&Properties>, tasks: I) -> Result<SigningResolution>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let intent = InvocationIntent::from_tasks(tasks);
    resolve_intent(descriptor, &intent)
}

/// Same as [`resolve`] for an already derived intent
pub fn resolve_intent(
    descriptor: Option<&Properties>,
    intent: &InvocationIntent,
) -> Result<SigningResolution> {
    let keystore_props = descriptor.filter(|props| has_release_keystore(props));

    if let Some(props) = keystore_props {
        let keystore = KeystoreDescriptor {
            key_alias: required(props, KEY_ALIAS)?,
            key_password: required(props, KEY_PASSWORD)?,
            store_file: required(props, STORE_FILE)?,
            store_password: required(props, STORE_PASSWORD)?,
        };
        debug!(
            store_file = %keystore.store_file,
            key_alias = %keystore.key_alias,
            "release signing configured"
        );
        return Ok(SigningResolution {
            signing: ReleaseSigning::Configured(keystore),
            must_fail: false,
        });
    }

    let must_fail = intent.is_release_build;
    if must_fail {
        warn!(tasks = ?intent.tasks, "release build requested without signing configuration");
    } else {
        debug!(
            build_type = %intent.build_type(),
            descriptor_present = descriptor.is_some(),
            "release signing not configured"
        );
    }

    Ok(SigningResolution {
        signing: ReleaseSigning::Unconfigured,
        must_fail,
    })
}

fn has_release_keystore(props: &Properties) -> bool {
    props
        .get(STORE_FILE)
        .is_some_and(|store_file| !store_file.trim().is_empty())
}

fn required(props: &Properties, key: &str) -> std::result::Result<String, SigningError> {
    props
        .get(key)
        .map(str::to_string)
        .ok_or_else(|| SigningError::MissingField(key.to_string()))
}
