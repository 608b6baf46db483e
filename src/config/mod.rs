//! Configuration system for coffeeconnection.
//!
//! A single YAML file holds the period definition, the history location, the
//! days off and the Slack settings.

use eyre::Result;
use std::path::PathBuf;

pub use self::global::GlobalConfig;

mod global;

/// Config is the global configuration.
pub type Config = GlobalConfig;

/// Default environment variable holding the Slack token.
pub const DEFAULT_TOKEN_ENV: &str = "SLACK_TOKEN";

/// Default history file name.
pub const DEFAULT_HISTORY_FILE: &str = "hadcoffee.txt";

/// Directory for data that lives between runs.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(env!("CARGO_PKG_NAME"))
}

/// Load configuration from the standard search paths.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. coffeeconnection.yml in current directory
/// 3. ~/.config/coffeeconnection/coffeeconnection.yml
/// 4. Default values
pub fn load_config(explicit_path: Option<&PathBuf>) -> Result<GlobalConfig> {
    GlobalConfig::load(explicit_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_ends_with_package() {
        assert!(data_dir().ends_with("coffeeconnection"));
    }
}
