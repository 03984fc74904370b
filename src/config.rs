use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub directory: DirectorySettings,
    #[serde(default)]
    pub form: FormSettings,
    #[serde(default)]
    pub toast: ToastSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// People-directory API
#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_nationality")]
    pub nationality: String,
    #[serde(default = "default_results")]
    pub results: usize,
    /// No timeout unless set
    pub timeout_secs: Option<u64>,
}

impl DirectorySettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            nationality: default_nationality(),
            results: default_results(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String { crate::services::directory::DEFAULT_BASE_URL.to_string() }
fn default_nationality() -> String { crate::services::directory::DEFAULT_NATIONALITY.to_string() }
fn default_results() -> usize { crate::services::directory::DEFAULT_RESULT_COUNT }

#[derive(Debug, Clone, Deserialize)]
pub struct FormSettings {
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

impl FormSettings {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

fn default_submit_delay_ms() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct ToastSettings {
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,
}

impl ToastSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration_ms(),
        }
    }
}

fn default_toast_duration_ms() -> u64 { 3000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    /// Seed for the target-gender tie-break; random when unset
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LUME__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LUME__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("LUME")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.directory.base_url, "https://randomuser.me/api");
        assert_eq!(settings.directory.nationality, "fr");
        assert_eq!(settings.directory.results, 6);
        assert_eq!(settings.directory.timeout(), None);
        assert_eq!(settings.form.submit_delay(), Duration::from_millis(1000));
        assert_eq!(settings.toast.duration(), Duration::from_millis(3000));
        assert_eq!(settings.matching.seed, None);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "[directory]\ntimeout_secs = 5\n\n[toast]\nduration_ms = 1500\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.directory.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.directory.results, 6);
        assert_eq!(settings.toast.duration(), Duration::from_millis(1500));
        assert_eq!(settings.form.submit_delay_ms, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("lume-discover-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[directory]\nnationality = \"gb\"\nresults = 3\n\n[matching]\nseed = 7\n",
        )
        .unwrap();

        let loaded = Settings::load_from(&path);
        std::fs::remove_file(&path).unwrap();
        let settings = loaded.unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.directory.nationality, "gb");
        assert_eq!(settings.directory.results, 3);
        assert_eq!(settings.matching.seed, Some(7));
        assert_eq!(settings.toast.duration(), Duration::from_millis(3000));
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(Settings::load_from("config/does-not-exist.toml").is_err());
    }
}
