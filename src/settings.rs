use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::passkey::PasskeySettings;

/// Environment variable naming a directory whose `Settings.toml` overrides the local one
pub const CONFIG_DIR_ENV: &str = "PASSKEY_BRIDGE_CONFIG_DIR";

const SETTINGS_FILE: &str = "Settings.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BridgeSettings {
    pub passkeys: PasskeySettings,
    pub channel: ChannelSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    /// Prefix joined to event names when invoking the host, e.g. `passkey.onGetPasskeySuccess`
    pub event_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            event_prefix: "passkey".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl BridgeSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read or parsed
    /// - TOML parsing fails
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::load_base_settings(Path::new("."))?;
        Self::apply_env_overrides(&mut settings);
        Ok(settings)
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `PASSKEY_BRIDGE_CONFIG_DIR` (if specified and exists)
    /// 3. Settings.toml in `base_dir` (if exists)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read
    /// - TOML parsing fails
    pub fn load_base_settings(base_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::default();

        let default_config_path = base_dir.join(SETTINGS_FILE);
        if default_config_path.exists() {
            settings = Self::from_file(&default_config_path)?;
            log::info!(
                "Loaded base settings from {}",
                default_config_path.display()
            );
        }

        if let Ok(config_dir) = std::env::var(CONFIG_DIR_ENV) {
            let override_path = Path::new(&config_dir).join(SETTINGS_FILE);
            if override_path.exists() {
                settings = Self::from_file(&override_path)?;
                log::info!("Overriding settings from {}", override_path.display());
            } else {
                log::info!(
                    "{CONFIG_DIR_ENV} set but no {SETTINGS_FILE} found at: {}",
                    override_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Parse settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let toml_content = fs::read_to_string(path)?;
        Ok(basic_toml::from_str(&toml_content)?)
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_passkey_env_overrides(&mut settings.passkeys);
        Self::apply_channel_env_overrides(&mut settings.channel);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    fn apply_passkey_env_overrides(passkey_settings: &mut PasskeySettings) {
        Self::apply_bool_env_override(
            "PASSKEY_DEFAULT_PREFER_IMMEDIATE",
            &mut passkey_settings.default_prefer_immediate,
        );
        Self::apply_bool_env_override(
            "PASSKEY_OFFER_PASSWORD_OPTION",
            &mut passkey_settings.offer_password_option,
        );
        Self::apply_bool_env_override(
            "PASSKEY_ACCEPT_PASSWORD_CREDENTIALS",
            &mut passkey_settings.accept_password_credentials,
        );
    }

    fn apply_channel_env_overrides(channel_settings: &mut ChannelSettings) {
        if let Ok(prefix) = std::env::var("PASSKEY_EVENT_PREFIX") {
            channel_settings.event_prefix = prefix;
        }
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    /// Helper function to apply boolean environment variable overrides
    fn apply_bool_env_override(env_var: &str, target: &mut bool) {
        if let Ok(value_str) = std::env::var(env_var) {
            if let Ok(value) = value_str.trim().parse::<bool>() {
                *target = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clean_env_vars() {
        std::env::remove_var(CONFIG_DIR_ENV);
        std::env::remove_var("PASSKEY_DEFAULT_PREFER_IMMEDIATE");
        std::env::remove_var("PASSKEY_OFFER_PASSWORD_OPTION");
        std::env::remove_var("PASSKEY_ACCEPT_PASSWORD_CREDENTIALS");
        std::env::remove_var("PASSKEY_EVENT_PREFIX");
        std::env::remove_var("RUST_LOG");
    }

    #[test]
    fn test_defaults() {
        let settings = BridgeSettings::default();
        assert!(settings.passkeys.default_prefer_immediate);
        assert!(settings.passkeys.offer_password_option);
        assert!(!settings.passkeys.accept_password_credentials);
        assert_eq!(settings.channel.event_prefix, "passkey");
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: BridgeSettings =
            basic_toml::from_str("[passkeys]\naccept_password_credentials = true\n").unwrap();
        assert!(settings.passkeys.accept_password_credentials);
        assert!(settings.passkeys.default_prefer_immediate);
        assert_eq!(settings.channel.event_prefix, "passkey");
    }

    #[test]
    #[serial]
    fn test_settings_dir_precedence() {
        clean_env_vars();
        let base_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            base_dir.path().join("Settings.toml"),
            "[channel]\nevent_prefix = \"local\"\n",
        )
        .unwrap();

        let settings = BridgeSettings::load_base_settings(base_dir.path()).unwrap();
        assert_eq!(settings.channel.event_prefix, "local");

        let override_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            override_dir.path().join("Settings.toml"),
            "[channel]\nevent_prefix = \"override\"\n",
        )
        .unwrap();
        std::env::set_var(CONFIG_DIR_ENV, override_dir.path());

        let settings = BridgeSettings::load_base_settings(base_dir.path()).unwrap();
        assert_eq!(settings.channel.event_prefix, "override");

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_missing_config_dir_file_keeps_base() {
        clean_env_vars();
        let base_dir = tempfile::tempdir().unwrap();
        let empty_dir = tempfile::tempdir().unwrap();
        std::env::set_var(CONFIG_DIR_ENV, empty_dir.path());

        let settings = BridgeSettings::load_base_settings(base_dir.path()).unwrap();
        assert_eq!(settings, BridgeSettings::default());

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_invalid_toml_is_an_error() {
        clean_env_vars();
        let base_dir = tempfile::tempdir().unwrap();
        std::fs::write(base_dir.path().join("Settings.toml"), "[passkeys\n").unwrap();

        assert!(BridgeSettings::load_base_settings(base_dir.path()).is_err());

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clean_env_vars();
        std::env::set_var("PASSKEY_DEFAULT_PREFER_IMMEDIATE", "false");
        std::env::set_var("PASSKEY_ACCEPT_PASSWORD_CREDENTIALS", " true ");
        std::env::set_var("PASSKEY_OFFER_PASSWORD_OPTION", "not-a-bool");
        std::env::set_var("PASSKEY_EVENT_PREFIX", "auth");
        std::env::set_var("RUST_LOG", "debug");

        let mut settings = BridgeSettings::default();
        BridgeSettings::apply_env_overrides(&mut settings);

        assert!(!settings.passkeys.default_prefer_immediate);
        assert!(settings.passkeys.accept_password_credentials);
        // Unparseable values are ignored
        assert!(settings.passkeys.offer_password_option);
        assert_eq!(settings.channel.event_prefix, "auth");
        assert_eq!(settings.logging.level, "debug");

        clean_env_vars();
    }
}
