use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    // Site
    pub site_id: String,

    // API endpoints
    pub api_url: String,
    pub console_api_url: String,
    pub console_api_token: Option<String>,

    // Localization
    pub default_locale: String,
    pub messages_dir: Option<PathBuf>,

    // Transport
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("site_id", &self.site_id)
            .field("api_url", &self.api_url)
            .field("console_api_url", &self.console_api_url)
            .field(
                "console_api_token",
                &self.console_api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("default_locale", &self.default_locale)
            .field("messages_dir", &self.messages_dir)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("API_URL").context("API_URL not set")?;

        Ok(Self {
            site_id: std::env::var("SITE_ID").context("SITE_ID not set")?,

            // Console falls back to the user-facing base URL
            console_api_url: std::env::var("CONSOLE_API_URL")
                .unwrap_or_else(|_| api_url.clone()),
            console_api_token: std::env::var("CONSOLE_API_TOKEN")
                .ok()
                .filter(|v| !v.is_empty()),
            api_url,

            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "ko".to_string()),
            messages_dir: std::env::var("MESSAGES_DIR").ok().map(PathBuf::from),

            request_timeout: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        })
    }

    /// Config pointing both audiences at one base URL, with defaults elsewhere.
    pub fn for_base_url(site_id: &str, base_url: &str) -> Self {
        Self {
            site_id: site_id.to_string(),
            api_url: base_url.to_string(),
            console_api_url: base_url.to_string(),
            console_api_token: None,
            default_locale: "ko".to_string(),
            messages_dir: None,
            request_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "SITE_ID",
        "API_URL",
        "CONSOLE_API_URL",
        "CONSOLE_API_TOKEN",
        "DEFAULT_LOCALE",
        "MESSAGES_DIR",
        "REQUEST_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_minimal() {
        clear_env();
        std::env::set_var("SITE_ID", "site-1");
        std::env::set_var("API_URL", "https://api.example.com");

        let config = Config::from_env().expect("Should load");

        assert_eq!(config.site_id, "site-1");
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.console_api_url, "https://api.example.com");
        assert!(config.console_api_token.is_none());
        assert_eq!(config.default_locale, "ko");
        assert!(config.messages_dir.is_none());
        assert!(config.request_timeout.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_full() {
        clear_env();
        std::env::set_var("SITE_ID", "site-2");
        std::env::set_var("API_URL", "https://api.example.com");
        std::env::set_var("CONSOLE_API_URL", "https://console.example.com");
        std::env::set_var("CONSOLE_API_TOKEN", "secret");
        std::env::set_var("DEFAULT_LOCALE", "en");
        std::env::set_var("MESSAGES_DIR", "/srv/messages");
        std::env::set_var("REQUEST_TIMEOUT_SECS", "15");

        let config = Config::from_env().expect("Should load");

        assert_eq!(config.console_api_url, "https://console.example.com");
        assert_eq!(config.console_api_token.as_deref(), Some("secret"));
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.messages_dir, Some(PathBuf::from("/srv/messages")));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_site_id() {
        clear_env();
        std::env::set_var("API_URL", "https://api.example.com");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("SITE_ID"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_api_url() {
        clear_env();
        std::env::set_var("SITE_ID", "site-1");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("API_URL"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_is_ignored() {
        clear_env();
        std::env::set_var("SITE_ID", "site-1");
        std::env::set_var("API_URL", "https://api.example.com");
        std::env::set_var("REQUEST_TIMEOUT_SECS", "soon");

        let config = Config::from_env().expect("Should load");
        assert!(config.request_timeout.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_empty_console_token_is_none() {
        clear_env();
        std::env::set_var("SITE_ID", "site-1");
        std::env::set_var("API_URL", "https://api.example.com");
        std::env::set_var("CONSOLE_API_TOKEN", "");

        let config = Config::from_env().expect("Should load");
        assert!(config.console_api_token.is_none());

        clear_env();
    }

    #[test]
    fn test_for_base_url() {
        let config = Config::for_base_url("s", "http://localhost:1234");
        assert_eq!(config.api_url, config.console_api_url);
        assert_eq!(config.site_id, "s");
    }
}
