//! Locale and API language code types.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A locale validated against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const KOREAN: Locale = Locale { code: "ko" };
    pub const ENGLISH: Locale = Locale { code: "en" };
    pub const JAPANESE: Locale = Locale { code: "ja" };
    pub const CHINESE: Locale = Locale { code: "zh" };

    /// Create a Locale from a locale code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is known and enabled
    /// * `Err` if the code is not found or the locale is disabled
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Locale { code: config.code }),
            Some(_) => bail!("Locale '{}' is not enabled", code),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// The default locale.
    pub fn canonical() -> Locale {
        Locale {
            code: LocaleRegistry::get().canonical().code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a Locale built through `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn language_code(&self) -> LanguageCode {
        LanguageCode::from_locale(self.code)
    }

    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// Language code the remote API expects (`:c_lang`, `lang`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageCode {
    #[default]
    KR,
    EN,
    JP,
    CH,
}

impl LanguageCode {
    /// Derive the API code from a locale string; unknown locales map to `KR`.
    pub fn from_locale(locale: &str) -> LanguageCode {
        match locale {
            "ko" => LanguageCode::KR,
            "en" => LanguageCode::EN,
            "ja" => LanguageCode::JP,
            "zh" => LanguageCode::CH,
            _ => LanguageCode::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::KR => "KR",
            LanguageCode::EN => "EN",
            LanguageCode::JP => "JP",
            LanguageCode::CH => "CH",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
