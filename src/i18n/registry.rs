//! Locale registry: Single source of truth for all supported locales.
//!
//! Each locale maps to the language code the remote API expects in `:c_lang`
//! and `lang` parameters. The registry is built once behind a `OnceLock`.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale code used by the front-end and message bundles (e.g., "ko", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Korean", "Japanese")
    pub name: &'static str,

    /// Native name of the language (e.g., "한국어", "日本語")
    pub native_name: &'static str,

    /// Language code sent to the API (e.g., "KR", "JP")
    pub api_code: &'static str,

    /// Whether this is the default locale (only one should be true)
    pub is_canonical: bool,

    /// Whether this locale is enabled for use
    pub enabled: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the locale is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the canonical (default) locale configuration.
    ///
    /// # Panics
    /// Panics if no canonical locale is found or if several are defined
    /// (this indicates a configuration error).
    pub fn canonical(&self) -> &LocaleConfig {
        let canonical: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_canonical)
            .collect();

        match canonical.len() {
            0 => panic!("No canonical locale found in registry"),
            1 => canonical[0],
            _ => panic!("Multiple canonical locales found in registry"),
        }
    }

    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| locale.enabled)
            .unwrap_or(false)
    }
}

/// Korean is the default; English, Japanese and Chinese are translations.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "ko",
            name: "Korean",
            native_name: "한국어",
            api_code: "KR",
            is_canonical: true,
            enabled: true,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            api_code: "EN",
            is_canonical: false,
            enabled: true,
        },
        LocaleConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
            api_code: "JP",
            is_canonical: false,
            enabled: true,
        },
        LocaleConfig {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
            api_code: "CH",
            is_canonical: false,
            enabled: true,
        },
    ]
}
