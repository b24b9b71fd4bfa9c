use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub wizard: WizardConfig,
    pub data: DataConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Leave the application once the vote has been cast.
    pub exit_on_complete: bool,
}

/// Which media device the face step talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraKind {
    Simulated,
    Unavailable,
}

/// Timing of the simulated verification steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Seconds before an OTP may be resent.
    pub otp_resend_secs: u32,
    /// Period of the fingerprint progress timer.
    pub scan_interval_ms: u64,
    /// Upper bound of one fingerprint progress step, in percent.
    pub scan_max_increment: f64,
    /// Pause between finalizing the vote and signalling completion.
    pub completion_delay_ms: u64,
    pub camera: CameraKind,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory (logs live under it).
    pub data_dir: Option<PathBuf>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            exit_on_complete: false,
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            otp_resend_secs: 60,
            scan_interval_ms: 300,
            scan_max_increment: 15.0,
            completion_delay_ms: 3000,
            camera: CameraKind::Simulated,
        }
    }
}

impl TuiConfig {
    /// Render tick period. Zero is bumped to 1ms since `tokio::time::interval` panics on it.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

impl WizardConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms.max(1))
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/evote/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &std::path::Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("evote"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("evote").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tui.tick_rate_ms, 50);
        assert!(!config.tui.exit_on_complete);
        assert_eq!(config.wizard.otp_resend_secs, 60);
        assert_eq!(config.wizard.scan_interval(), Duration::from_millis(300));
        assert_eq!(config.wizard.completion_delay(), Duration::from_secs(3));
        assert_eq!(config.wizard.camera, CameraKind::Simulated);
        assert!(config.data.data_dir.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml"));
        assert_eq!(config.tui.tick_rate_ms, 50);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[wizard]\notp_resend_secs = 5\ncamera = \"unavailable\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.wizard.otp_resend_secs, 5);
        assert_eq!(config.wizard.camera, CameraKind::Unavailable);
        assert_eq!(config.wizard.scan_interval_ms, 300);
    }

    #[test]
    fn test_unknown_tui_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tui]\nmouse_enabled = true\nexit_on_complete = true\n").unwrap();

        let config = AppConfig::load_from(&path);
        assert!(config.tui.exit_on_complete);
        assert_eq!(config.tui.tick_rate_ms, 50);
    }

    #[test]
    fn test_load_garbage_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tui = [").unwrap();
        let config = AppConfig::load_from(&path);
        assert_eq!(config.wizard.completion_delay_ms, 3000);
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.data.data_dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/custom"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/custom/logs"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.wizard.otp_resend_secs, config.wizard.otp_resend_secs);
    }
}
