use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const ENV_API_URL: &str = "RATEBOOK_API_URL";
pub const ENV_API_KEY: &str = "RATEBOOK_API_KEY";
pub const ENV_API_HOST: &str = "RATEBOOK_API_HOST";
pub const ENV_DATA_PATH: &str = "RATEBOOK_DATA_PATH";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub host: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: "https://exchangerate-api.p.rapidapi.com/rapid/latest/USD".to_string(),
            api_key: String::new(),
            host: "exchangerate-api.p.rapidapi.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when it
    /// does not exist. Environment overrides are applied either way.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        let config = if config_path.exists() {
            Self::read_file(&config_path)?
        } else {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };
        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "ratebook", "ratebook")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("io", "ratebook", "ratebook")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path.as_ref())?;
        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    fn read_file(path: &std::path::Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Replaces provider settings and the data path with any values `lookup`
    /// returns. Empty values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.provider.base_url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.provider.api_key = key;
        }
        if let Some(host) = get(ENV_API_HOST) {
            self.provider.host = host;
        }
        if let Some(path) = get(ENV_DATA_PATH) {
            self.data_path = Some(path);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
provider:
  base_url: "http://example.com/latest/USD"
  api_key: "secret"
  host: "example.com"
data_path: "/tmp/ratebook"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "http://example.com/latest/USD");
        assert_eq!(config.provider.api_key, "secret");
        assert_eq!(config.provider.host, "example.com");
        assert_eq!(config.data_path.as_deref(), Some("/tmp/ratebook"));
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/ratebook")
        );
    }

    #[test]
    fn test_config_defaults_when_sections_missing() {
        let config: AppConfig = serde_yaml::from_str("data_path: null").unwrap();
        assert_eq!(config.provider, ProviderConfig::default());
        assert!(config.data_path.is_none());

        // Only the url given
        let config: AppConfig =
            serde_yaml::from_str("provider:\n  base_url: \"http://localhost\"\n").unwrap();
        assert_eq!(config.provider.base_url, "http://localhost");
        assert!(config.provider.api_key.is_empty());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_KEY, "from-env"),
            (ENV_API_HOST, "  "),
            (ENV_DATA_PATH, "/data"),
        ]);

        let config = AppConfig::default()
            .with_env_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.provider.api_key, "from-env");
        // Blank values do not override
        assert_eq!(config.provider.host, ProviderConfig::default().host);
        assert_eq!(config.provider.base_url, ProviderConfig::default().base_url);
        assert_eq!(config.data_path.as_deref(), Some("/data"));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("nope.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
