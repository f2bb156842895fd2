//! Configuration file support for remotely.
//!
//! Two configuration file locations are read:
//! - Global: `~/.remotely/config.toml` - User-wide applications
//! - Project: `.remotely/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Applications are
//! merged by name; a project entry replaces the global entry entirely.
//!
//! ```toml
//! [http]
//! timeout = 30
//! user_agent = "remotely"
//!
//! [apps.adventure_app]
//! url = "localhost:1234"
//! timeout = 5
//! headers = { "X-Api-Key" = "abc" }
//! auth = { type = "token", token = "secret" }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sources::{Application, Auth, DefaultHeaders, Timeout};

/// remotely configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for every application
    pub http: HttpConfig,

    /// Applications keyed by name
    pub apps: BTreeMap<String, AppConfig>,
}

/// HTTP defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,
}

/// One `[apps.NAME]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL (`http://` is assumed without a scheme)
    pub url: Option<String>,

    /// Request timeout in seconds, overriding `[http]`
    pub timeout: Option<u64>,

    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,

    /// Authentication
    pub auth: Option<AuthConfig>,
}

/// Authentication table, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthConfig {
    Basic { user: String, password: String },
    Bearer { token: String },
    Token { token: String },
    Custom { scheme: String, credentials: String },
}

impl From<AuthConfig> for Auth {
    fn from(config: AuthConfig) -> Self {
        match config {
            AuthConfig::Basic { user, password } => Auth::Basic { user, password },
            AuthConfig::Bearer { token } => Auth::Bearer(token),
            AuthConfig::Token { token } => Auth::Token(token),
            AuthConfig::Custom {
                scheme,
                credentials,
            } => Auth::Custom {
                scheme,
                credentials,
            },
        }
    }
}

impl AppConfig {
    /// Configure an application from this entry and the HTTP defaults.
    pub fn apply(&self, app: &mut Application, http: &HttpConfig) -> crate::errors::Result<()> {
        if let Some(url) = &self.url {
            app.set_url(url)?;
        }
        if let Some(auth) = &self.auth {
            app.authorization(auth.clone().into());
        }

        let mut headers: DefaultHeaders = self
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(agent) = &http.user_agent {
            headers = headers.header("User-Agent", agent.clone());
        }
        app.use_middleware(headers);

        if let Some(secs) = self.timeout.or(http.timeout) {
            app.use_middleware(Timeout(Duration::from_secs(secs)));
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.http.timeout.is_some() {
            self.http.timeout = other.http.timeout;
        }
        if other.http.user_agent.is_some() {
            self.http.user_agent = other.http.user_agent;
        }

        for (name, app) in other.apps {
            self.apps.insert(name, app);
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.remotely/config.toml)
/// 2. Global config (~/.remotely/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global remotely config directory (~/.remotely).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".remotely"))
}

/// Get the global config path (~/.remotely/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.remotely/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".remotely").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.http.timeout.is_none());
        assert!(config.apps.is_empty());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[http]
timeout = 30

[apps.adventure_app]
url = "localhost:1234"
headers = { "X-Api-Key" = "abc" }
auth = { type = "basic", user = "finn", password = "jake" }

[apps.other_app]
url = "https://other.example.com"
auth = { type = "custom", scheme = "OAuth", credentials = "xyz" }
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.http.timeout, Some(30));
        assert_eq!(config.apps.len(), 2);

        let adventure = &config.apps["adventure_app"];
        assert_eq!(adventure.url.as_deref(), Some("localhost:1234"));
        assert_eq!(adventure.headers["X-Api-Key"], "abc");
        assert_eq!(
            adventure.auth,
            Some(AuthConfig::Basic {
                user: "finn".to_string(),
                password: "jake".to_string()
            })
        );
    }

    #[test]
    fn test_config_rejects_unknown_auth_type() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[apps.a]\nurl = \"localhost\"\nauth = { type = \"kerberos\" }\n",
        )
        .unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.http.timeout = Some(30);
        base.apps.insert(
            "adventure_app".to_string(),
            AppConfig {
                url: Some("localhost:1".to_string()),
                ..Default::default()
            },
        );

        let mut project = Config::default();
        project.apps.insert(
            "adventure_app".to_string(),
            AppConfig {
                url: Some("localhost:2".to_string()),
                ..Default::default()
            },
        );

        base.merge(project);

        assert_eq!(base.http.timeout, Some(30));
        assert_eq!(base.apps["adventure_app"].url.as_deref(), Some("localhost:2"));
    }

    #[test]
    fn test_load_config_layers() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("project.toml");

        std::fs::write(&global, "[http]\nuser_agent = \"global\"\n[apps.a]\nurl = \"localhost:1\"\n").unwrap();
        std::fs::write(&project, "[apps.b]\nurl = \"localhost:2\"\n").unwrap();

        let config = load_config(&global, &project);
        assert_eq!(config.http.user_agent.as_deref(), Some("global"));
        assert_eq!(config.apps.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_apply_to_application() {
        let entry = AppConfig {
            url: Some("localhost:1234".to_string()),
            timeout: Some(5),
            auth: Some(AuthConfig::Token {
                token: "secret".to_string(),
            }),
            ..Default::default()
        };

        let mut app = Application::new("adventure_app");
        entry.apply(&mut app, &HttpConfig::default()).unwrap();

        assert_eq!(app.url(), Some("http://localhost:1234"));
        assert_eq!(app.auth(), Some(&Auth::Token("secret".to_string())));
        assert_eq!(app.middleware().len(), 2);
    }
}
