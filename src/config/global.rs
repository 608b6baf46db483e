//! Global configuration.
//!
//! Loaded from ./coffeeconnection.yml or ~/.config/coffeeconnection/coffeeconnection.yml

use chrono::NaiveDate;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use coffeeconnection::RunSettings;
use coffeeconnection::chat::{Niceties, SlackConfig};

/// Global configuration for coffeeconnection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Day zero of the first period (YYYY-MM-DD, a Monday).
    pub epoch: Option<NaiveDate>,

    /// Period length in weeks.
    #[serde(rename = "week-period")]
    pub week_period: u32,

    /// File listing who already had a coffee this period.
    #[serde(rename = "history-file")]
    pub history_file: PathBuf,

    /// Dates without matching, besides weekends.
    #[serde(rename = "days-off")]
    pub days_off: Vec<NaiveDate>,

    /// Announcement templates, one per line. Built-in templates when unset.
    #[serde(rename = "templates-file")]
    pub templates_file: Option<PathBuf>,

    /// Slack settings.
    pub slack: SlackSettings,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            epoch: None,
            week_period: 1,
            history_file: crate::config::data_dir().join(crate::config::DEFAULT_HISTORY_FILE),
            days_off: Vec::new(),
            templates_file: None,
            slack: SlackSettings::default(),
        }
    }
}

impl GlobalConfig {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. coffeeconnection.yml in current directory
    /// 3. ~/.config/coffeeconnection/coffeeconnection.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let project_name = env!("CARGO_PKG_NAME");

        // Explicit path takes precedence
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project config
        let project_config = PathBuf::from(format!("{}.yml", project_name));
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from {}", project_config.display());
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load {}: {}", project_config.display(), e);
                }
            }
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // Use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the period settings. Runs before anything touches the history.
    pub fn validate(&self) -> Result<()> {
        if self.epoch.is_none() {
            eyre::bail!("epoch is required (YYYY-MM-DD)");
        }
        if self.week_period == 0 {
            eyre::bail!("week-period must be > 0");
        }
        Ok(())
    }

    /// Validate the Slack settings needed to read the roster and, unless
    /// `dry_run`, to post announcements.
    pub fn validate_slack(&self, dry_run: bool) -> Result<()> {
        if self.slack.channel.is_empty() {
            eyre::bail!("slack.channel is required");
        }
        if !dry_run && self.slack.hook.is_empty() {
            eyre::bail!("slack.hook is required");
        }
        Ok(())
    }

    /// Build the settings for one orchestrator run.
    pub fn run_settings(&self) -> Result<RunSettings> {
        self.validate()?;
        let epoch = self.epoch.ok_or_else(|| eyre::eyre!("epoch is required (YYYY-MM-DD)"))?;

        let niceties = match &self.templates_file {
            Some(path) => Niceties::from_file(path).context("Failed to load message templates")?,
            None => Niceties::default(),
        };

        Ok(RunSettings {
            epoch,
            week_period: self.week_period,
            days_off: self.days_off.iter().copied().collect(),
            history_file: self.history_file.clone(),
            niceties,
        })
    }

    /// Build the Slack client configuration.
    pub fn slack_config(&self, dry_run: bool) -> Result<SlackConfig> {
        self.validate_slack(dry_run)?;
        let token = self.slack.token()?;
        Ok(SlackConfig::new(token, &self.slack.hook, &self.slack.channel)
            .with_skip_emoji(self.slack.skip_emoji.clone()))
    }
}

/// Slack settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlackSettings {
    /// Environment variable holding the bot token.
    #[serde(rename = "token-env")]
    pub token_env: String,

    /// Inline token, used when the environment variable is unset.
    pub token: Option<String>,

    /// URL announcements are posted to.
    pub hook: String,

    /// Channel whose members are matched.
    pub channel: String,

    /// Status emoji marking a member as unavailable.
    #[serde(rename = "skip-emoji")]
    pub skip_emoji: Vec<String>,
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            token_env: crate::config::DEFAULT_TOKEN_ENV.to_string(),
            token: None,
            hook: String::new(),
            channel: String::new(),
            skip_emoji: Vec::new(),
        }
    }
}

impl SlackSettings {
    /// Resolve the token, preferring the environment.
    pub fn token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(&self.token_env)
            && !token.is_empty()
        {
            return Ok(token);
        }
        match &self.token {
            Some(token) if !token.is_empty() => Ok(token.clone()),
            _ => eyre::bail!("no Slack token: set {} or slack.token", self.token_env),
        }
    }
}

impl std::fmt::Debug for SlackSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackSettings")
            .field("token_env", &self.token_env)
            .field("hook", &self.hook)
            .field("channel", &self.channel)
            .field("skip_emoji", &self.skip_emoji)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert!(config.epoch.is_none());
        assert_eq!(config.week_period, 1);
        assert!(config.history_file.ends_with("hadcoffee.txt"));
        assert_eq!(config.slack.token_env, "SLACK_TOKEN");
    }

    #[test]
    fn test_missing_epoch_is_invalid() {
        let config = GlobalConfig::default();
        assert!(config.validate().is_err());
        assert!(config.run_settings().is_err());
    }

    #[test]
    fn test_zero_week_period_is_invalid() {
        let config = GlobalConfig {
            epoch: Some(date("2024-01-01")),
            week_period: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
epoch: "2024-01-01"
week-period: 2
history-file: /tmp/coffee/hadcoffee.txt
days-off:
  - "2024-12-25"
  - "2024-12-26"
slack:
  channel: C123
  hook: https://hooks.slack.com/services/T/B/X
  skip-emoji:
    - ":palm_tree:"
"#;
        let config: GlobalConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.epoch, Some(date("2024-01-01")));
        assert_eq!(config.week_period, 2);
        assert_eq!(config.history_file, PathBuf::from("/tmp/coffee/hadcoffee.txt"));
        assert_eq!(config.days_off, vec![date("2024-12-25"), date("2024-12-26")]);
        assert_eq!(config.slack.channel, "C123");
        assert_eq!(config.slack.skip_emoji, vec![":palm_tree:".to_string()]);
        // Other fields should have defaults
        assert_eq!(config.slack.token_env, "SLACK_TOKEN");
        assert!(config.validate().is_ok());
        assert!(config.validate_slack(false).is_ok());
    }

    #[test]
    fn test_malformed_epoch_fails_to_parse() {
        let yaml = "epoch: \"not-a-date\"\n";
        assert!(serde_yaml::from_str::<GlobalConfig>(yaml).is_err());
    }

    #[test]
    fn test_non_integer_week_period_fails_to_parse() {
        let yaml = "epoch: \"2024-01-01\"\nweek-period: two\n";
        assert!(serde_yaml::from_str::<GlobalConfig>(yaml).is_err());
    }

    #[test]
    fn test_run_settings() {
        let config = GlobalConfig {
            epoch: Some(date("2024-01-01")),
            week_period: 2,
            days_off: vec![date("2024-12-25")],
            ..Default::default()
        };
        let settings = config.run_settings().unwrap();
        assert_eq!(settings.epoch, date("2024-01-01"));
        assert_eq!(settings.week_period, 2);
        assert!(settings.days_off.contains(&date("2024-12-25")));
        assert!(!settings.niceties.is_empty());
    }

    #[test]
    fn test_run_settings_with_templates_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let templates = temp_dir.path().join("niceties.txt");
        fs::write(&templates, "{} and {}, coffee?\n\n").unwrap();

        let config = GlobalConfig {
            epoch: Some(date("2024-01-01")),
            templates_file: Some(templates),
            ..Default::default()
        };
        let settings = config.run_settings().unwrap();
        assert_eq!(settings.niceties.len(), 1);
    }

    #[test]
    fn test_validate_slack() {
        let mut config = GlobalConfig::default();
        assert!(config.validate_slack(true).is_err());

        config.slack.channel = "C123".to_string();
        assert!(config.validate_slack(true).is_ok());
        assert!(config.validate_slack(false).is_err());

        config.slack.hook = "https://hooks.slack.com/services/T/B/X".to_string();
        assert!(config.validate_slack(false).is_ok());
    }

    #[test]
    fn test_inline_token() {
        let settings = SlackSettings {
            token_env: "COFFEECONNECTION_TEST_UNSET_TOKEN".to_string(),
            token: Some("xoxb-inline".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.token().unwrap(), "xoxb-inline");
        assert!(!format!("{:?}", settings).contains("xoxb-inline"));
    }

    #[test]
    fn test_missing_token() {
        let settings = SlackSettings {
            token_env: "COFFEECONNECTION_TEST_UNSET_TOKEN".to_string(),
            ..Default::default()
        };
        assert!(settings.token().is_err());
    }
}
