//! Application context
//!
//! Created once at startup and passed by reference to whatever needs the
//! API clients or the UI stores.

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::i18n::{LanguageCode, Locale, MessageCatalog};
use crate::not_found;
use crate::store::{LanguageStore, NavigationStore, Navigator};
use anyhow::{Context, Result};
use tracing::{info, warn};

#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub client: ApiClient,
    pub navigation: NavigationStore,
    pub language: LanguageStore,
    pub messages: MessageCatalog,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(&config).context("Failed to build API clients")?;

        let messages = match &config.messages_dir {
            Some(dir) => MessageCatalog::load_dir(dir)?,
            None => MessageCatalog::default(),
        };

        if Locale::from_code(&config.default_locale).is_err() {
            warn!(
                "DEFAULT_LOCALE '{}' is not supported, API calls will use {}",
                config.default_locale,
                LanguageCode::default()
            );
        }

        info!("Application context ready for site {}", config.site_id);

        Ok(Self {
            language: LanguageStore::new(config.default_locale.clone()),
            navigation: NavigationStore::new(),
            client,
            messages,
            config,
        })
    }

    pub fn navigate(&self, path: &str) {
        self.navigation.navigate(path);
    }

    pub fn language_code(&self) -> LanguageCode {
        self.language.code()
    }

    /// Active locale, or the default one if the store holds an unknown code.
    pub fn locale(&self) -> Locale {
        Locale::from_code(&self.language.locale()).unwrap_or_else(|_| Locale::canonical())
    }

    pub fn message<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(self.locale(), key)
    }

    pub fn redirect_on_error<'a, I>(&self, watched: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a ApiError>>,
    {
        not_found::redirect_on_error(&self.navigation, watched)
    }
}
