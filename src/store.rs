//! Single-field UI state containers.
//!
//! Both stores are owned by the application context and shared by
//! reference. Writes replace the whole value.

use crate::i18n::LanguageCode;
use std::sync::RwLock;
use tracing::debug;

/// Something that can move the UI to a path.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Current navigation path; `None` until the first navigation.
#[derive(Debug, Default)]
pub struct NavigationStore {
    current: RwLock<Option<String>>,
}

impl NavigationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set(&self, path: impl Into<String>) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(path.into());
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl Navigator for NavigationStore {
    fn navigate(&self, path: &str) {
        debug!("Navigating to {}", path);
        self.set(path);
    }
}

/// Active locale; the API language code is derived on every read.
#[derive(Debug)]
pub struct LanguageStore {
    locale: RwLock<String>,
}

impl LanguageStore {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: RwLock::new(locale.into()),
        }
    }

    pub fn locale(&self) -> String {
        self.locale
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_locale(&self, locale: impl Into<String>) {
        *self.locale.write().unwrap_or_else(|e| e.into_inner()) = locale.into();
    }

    pub fn code(&self) -> LanguageCode {
        LanguageCode::from_locale(&self.locale.read().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Default for LanguageStore {
    fn default() -> Self {
        Self::new("ko")
    }
}
