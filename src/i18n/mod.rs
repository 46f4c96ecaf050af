//! Internationalization (i18n) support.
//!
//! - `registry`: the four supported locales and their API language codes
//! - `language`: validated `Locale` and the derived `LanguageCode`
//! - `messages`: locale message bundles loaded from JSON files
//!
//! # Example
//!
//! ```rust,ignore
//! use cms_client::i18n::{LanguageCode, Locale};
//!
//! let locale = Locale::from_code("ja")?;
//! assert_eq!(locale.language_code(), LanguageCode::JP);
//! assert_eq!(LanguageCode::from_locale("fr"), LanguageCode::KR);
//! ```

mod language;
mod messages;
mod registry;

pub use language::{LanguageCode, Locale};
pub use messages::MessageCatalog;
pub use registry::{LocaleConfig, LocaleRegistry};
