//! Default configuration values

/// Default configuration file name
pub const DEFAULT_CONFIG_TOML: &str = "signgate.toml";

/// Alternative (hidden) configuration file name
pub const ALT_CONFIG_TOML: &str = ".signgate.toml";

/// Android project root, relative to the repository
pub const DEFAULT_ANDROID_ROOT: &str = "android";

/// Keystore descriptor, relative to the Android project root
pub const DEFAULT_DESCRIPTOR: &str = "key.properties";

/// Application module whose build script signs the release
pub const DEFAULT_APP_MODULE: &str = "app";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![DEFAULT_CONFIG_TOML, ALT_CONFIG_TOML]
}

