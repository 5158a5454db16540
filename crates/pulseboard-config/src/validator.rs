//! Runtime validation of a loaded configuration.

use crate::schema::{Config, ThemeConfig};
use pulseboard_common::{DashError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #1db954)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.locale.trim().is_empty() {
            return Err(DashError::config("locale cannot be empty"));
        }

        let data = &config.data;
        if data.listening_top_n == 0 {
            return Err(DashError::config("data.listening_top_n must be at least 1"));
        }
        if data.sales_top_n == 0 {
            return Err(DashError::config("data.sales_top_n must be at least 1"));
        }
        if data.label_max_chars == 0 {
            return Err(DashError::config("data.label_max_chars must be at least 1"));
        }
        if data.discovery_window_years < 0 {
            return Err(DashError::config("data.discovery_window_years cannot be negative"));
        }

        if config.cache.max_sessions == 0 {
            return Err(DashError::config("cache.max_sessions must be at least 1"));
        }
        if config.cache.session_idle_secs == 0 {
            return Err(DashError::config("cache.session_idle_secs must be at least 1"));
        }

        Self::validate_theme(&config.theme)
    }

    fn validate_theme(theme: &ThemeConfig) -> Result<()> {
        let named = [
            ("theme.primary", &theme.primary),
            ("theme.primary_dark", &theme.primary_dark),
            ("theme.background", &theme.background),
            ("theme.card_background", &theme.card_background),
            ("theme.card_border", &theme.card_border),
            ("theme.text_primary", &theme.text_primary),
            ("theme.text_secondary", &theme.text_secondary),
            ("theme.text_muted", &theme.text_muted),
            ("theme.muted_bar", &theme.muted_bar),
        ];
        for (field, color) in named {
            if !HEX_COLOR_REGEX.is_match(color) {
                return Err(DashError::config(format!("{field} is not a hex color: '{color}'")));
            }
        }

        if theme.palette.is_empty() {
            return Err(DashError::config("theme.palette cannot be empty"));
        }
        if let Some(bad) = theme.palette.iter().find(|c| !HEX_COLOR_REGEX.is_match(c)) {
            return Err(DashError::config(format!("theme.palette contains a non-hex color: '{bad}'")));
        }

        Ok(())
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate(self)
    }
}
