//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults::{DEFAULT_ANDROID_ROOT, DEFAULT_APP_MODULE, DEFAULT_DESCRIPTOR};

/// Main configuration for Signgate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Android project layout
    pub android: AndroidConfig,
}

/// Android project layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidConfig {
    /// Android project root, relative to the repository root
    pub root: PathBuf,

    /// Keystore descriptor file, relative to the Android root
    pub descriptor: PathBuf,

    /// App module directory, relative to the Android root
    pub module: PathBuf,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ANDROID_ROOT),
            descriptor: PathBuf::from(DEFAULT_DESCRIPTOR),
            module: PathBuf::from(DEFAULT_APP_MODULE),
        }
    }
}

impl AndroidConfig {
    /// Absolute descriptor path for a project rooted at `project_dir`
    pub fn descriptor_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.root).join(&self.descriptor)
    }

    /// App module directory; relative `storeFile` entries resolve against it
    pub fn module_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.root).join(&self.module)
    }
}
