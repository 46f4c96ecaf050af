//! Message bundles loaded from `<dir>/<locale>.json`.
//!
//! Bundles are flattened so nested objects are addressed with dotted keys:
//! `{"menu": {"home": "Home"}}` is looked up as `"menu.home"`.

use crate::i18n::{Locale, LocaleRegistry};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    bundles: HashMap<&'static str, HashMap<String, String>>,
}

impl MessageCatalog {
    /// Load one bundle per enabled locale. Missing files are skipped.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut catalog = MessageCatalog::default();

        for config in LocaleRegistry::get().list_enabled() {
            let path = dir.join(format!("{}.json", config.code));
            if !path.exists() {
                warn!("No message bundle for '{}' at {}", config.code, path.display());
                continue;
            }

            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let value: Value = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?;

            catalog.insert_bundle(config.code, &value);
        }

        info!("Loaded message bundles for {} locales", catalog.bundles.len());
        Ok(catalog)
    }

    fn insert_bundle(&mut self, code: &'static str, value: &Value) {
        let mut flat = HashMap::new();
        flatten("", value, &mut flat);
        self.bundles.insert(code, flat);
    }

    pub fn has_locale(&self, locale: Locale) -> bool {
        self.bundles.contains_key(locale.code())
    }

    /// Message for `key`, else the default locale's, else `key` itself.
    pub fn get<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.lookup(locale, key)
            .or_else(|| self.lookup(Locale::canonical(), key))
            .unwrap_or(key)
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.bundles
            .get(locale.code())
            .and_then(|bundle| bundle.get(key))
            .map(String::as_str)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", prefix, k)
                };
                flatten(&key, v, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
