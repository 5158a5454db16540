//! Fluent bundle construction and message formatting.

use crate::locale::Locale;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use pulseboard_common::{DashError, Result};
use tracing::{debug, warn};

/// Formats localized messages for one locale.
pub struct Localizer {
    locale: Locale,
    bundle: FluentBundle<FluentResource>,
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl Localizer {
    /// Builds a localizer for a supported locale.
    pub fn new(locale: Locale) -> Result<Self> {
        let lang_id = locale.to_language_identifier()?;
        let resource = FluentResource::try_new(locale.source().to_string()).map_err(|(_, errors)| {
            DashError::localization_with_locale(
                format!("failed to parse messages: {errors:?}"),
                locale.code(),
            )
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            DashError::localization_with_locale(
                format!("failed to add messages: {errors:?}"),
                locale.code(),
            )
        })?;

        debug!("Loaded messages for locale {}", locale.code());
        Ok(Self { locale, bundle })
    }

    /// Builds a localizer from a language code, falling back to English for
    /// codes that are not supported.
    pub fn for_code(code: &str) -> Result<Self> {
        let locale = Locale::from_code(code).unwrap_or_else(|| {
            warn!("Unsupported locale '{}', falling back to {}", code, Locale::English.code());
            Locale::English
        });
        Self::new(locale)
    }

    /// The locale messages are formatted in.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Whether `id` resolves in this locale.
    pub fn has_message(&self, id: &str) -> bool {
        self.bundle.has_message(id)
    }

    /// Formats a message without arguments.
    pub fn text(&self, id: &str) -> Result<String> {
        self.format(id, None)
    }

    /// Formats a message that takes a single `$count` argument.
    pub fn text_with_count(&self, id: &str, count: usize) -> Result<String> {
        let mut args = FluentArgs::new();
        args.set("count", FluentValue::from(count));
        self.format(id, Some(&args))
    }

    /// Formats a message that takes a `$from` and `$to` year.
    ///
    /// Years are passed as text so they never pick up digit grouping.
    pub fn text_with_years(&self, id: &str, from: i32, to: i32) -> Result<String> {
        let mut args = FluentArgs::new();
        args.set("from", FluentValue::from(from.to_string()));
        args.set("to", FluentValue::from(to.to_string()));
        self.format(id, Some(&args))
    }

    /// Formats a message with arbitrary arguments.
    pub fn format(&self, id: &str, args: Option<&FluentArgs>) -> Result<String> {
        let message = self.bundle.get_message(id).ok_or_else(|| {
            DashError::localization_with_locale(format!("message '{id}' not found"), self.locale.code())
        })?;
        let pattern = message.value().ok_or_else(|| {
            DashError::localization_with_locale(format!("message '{id}' has no value"), self.locale.code())
        })?;

        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            return Err(DashError::localization_with_locale(
                format!("formatting '{id}' failed: {errors:?}"),
                self.locale.code(),
            ));
        }

        Ok(formatted.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages;

    #[test]
    fn test_plain_message() {
        let l10n = Localizer::new(Locale::English).unwrap();
        assert_eq!(l10n.text(messages::SALES_BY_REGION).unwrap(), "Total Sales by Region");
    }

    #[test]
    fn test_count_argument() {
        let l10n = Localizer::new(Locale::English).unwrap();
        assert_eq!(
            l10n.text_with_count(messages::LISTENING_TOP_ARTISTS, 15).unwrap(),
            "Top 15 Artists"
        );
    }

    #[test]
    fn test_year_range_arguments() {
        let l10n = Localizer::new(Locale::English).unwrap();
        assert_eq!(
            l10n.text_with_years(messages::LISTENING_DATA_COVERS, 2019, 2023).unwrap(),
            "Data covers 2019–2023"
        );
        assert!(l10n.text(messages::LISTENING_DATA_COVERS).is_err());
    }

    #[test]
    fn test_unknown_message_is_error() {
        let l10n = Localizer::new(Locale::English).unwrap();
        assert!(l10n.text("no-such-message").is_err());
    }

    #[test]
    fn test_unsupported_code_falls_back() {
        let l10n = Localizer::for_code("xx-YY").unwrap();
        assert_eq!(l10n.locale(), Locale::English);
    }
}
