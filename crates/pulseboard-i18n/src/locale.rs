//! Locale management and utilities

use pulseboard_common::{DashError, Result};
use unic_langid::LanguageIdentifier;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    English,
    German,
}

impl Locale {
    /// Get the language code for this locale
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::German => "de-DE",
        }
    }

    /// Parse a locale from a language code, accepting the bare language too
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "en" | "en-US" => Some(Self::English),
            "de" | "de-DE" => Some(Self::German),
            _ => None,
        }
    }

    /// Convert to Fluent LanguageIdentifier
    pub fn to_language_identifier(&self) -> Result<LanguageIdentifier> {
        self.code()
            .parse()
            .map_err(|_| DashError::localization_with_locale("invalid language identifier", self.code()))
    }

    /// Get all supported locales
    pub fn all() -> [Self; 2] {
        [Self::English, Self::German]
    }

    /// The embedded Fluent source for this locale
    pub(crate) fn source(&self) -> &'static str {
        match self {
            Self::English => include_str!("../locales/en-US/main.ftl"),
            Self::German => include_str!("../locales/de-DE/main.ftl"),
        }
    }
}
