use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the content-management REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// OAuth2 bearer token; `SHAREPOST_TOKEN` overrides this at runtime
    pub oauth2_token: Option<String>,
    /// Id of the site last published to (pre-selected on the next run)
    #[serde(default)]
    pub last_used_site_id: Option<u64>,
    /// Display name of the site last published to
    #[serde(default)]
    pub last_used_site_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            oauth2_token: None,
            last_used_site_id: None,
            last_used_site_name: None,
        }
    }
}

impl Config {
    /// Load config from path, creating a default one if it doesn't exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Save config to path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// The credential used for API calls. The environment variable takes
    /// precedence so tokens can stay out of the config file.
    pub fn token(&self) -> Option<String> {
        if let Ok(token) = std::env::var("SHAREPOST_TOKEN") {
            if !token.trim().is_empty() {
                return Some(token);
            }
        }
        self.oauth2_token.clone()
    }

    /// Record the chosen destination as the last-used site.
    pub fn remember_site(&mut self, site_id: u64, site_name: Option<String>) {
        self.last_used_site_id = Some(site_id);
        self.last_used_site_name = site_name;
    }
}

fn default_api_base() -> String {
    "https://public-api.wordpress.com/rest/v1.1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_or_create_writes_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.api_base, default_api_base());
        assert!(config.last_used_site_id.is_none());
    }

    #[test]
    fn remember_site_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::load_or_create(&path).unwrap();

        config.remember_site(42, Some("My Blog".to_string()));
        config.save(&path).unwrap();

        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded.last_used_site_id, Some(42));
        assert_eq!(loaded.last_used_site_name.as_deref(), Some("My Blog"));
    }

    #[test]
    fn token_prefers_config_when_env_unset() {
        let config = Config {
            oauth2_token: Some("abc".to_string()),
            ..Config::default()
        };
        if std::env::var("SHAREPOST_TOKEN").is_err() {
            assert_eq!(config.token().as_deref(), Some("abc"));
        }
    }
}
