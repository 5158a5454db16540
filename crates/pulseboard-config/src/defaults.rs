//! Default values for every configuration section.

use crate::schema::*;
use pulseboard_common::LoggingConfig;

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            data: DataConfig::default(),
            cache: CacheConfig::default(),
            theme: ThemeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            invalid_rows: RowPolicy::Fail,
            listening_top_n: 15,
            sales_top_n: 10,
            label_max_chars: 28,
            discovery_window_years: 1,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_sessions: 64,
            session_idle_secs: 1800,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "#1DB954".to_string(),
            primary_dark: "#158a3e".to_string(),
            background: "#0f0f0f".to_string(),
            card_background: "#1a1a1a".to_string(),
            card_border: "#2a2a2a".to_string(),
            text_primary: "#ffffff".to_string(),
            text_secondary: "#a8a8a8".to_string(),
            text_muted: "#6b6b6b".to_string(),
            muted_bar: "#2a4a2a".to_string(),
            palette: vec![
                "#1DB954".to_string(),
                "#158a3e".to_string(),
                "#0e6b2f".to_string(),
                "#a8a8a8".to_string(),
                "#6b6b6b".to_string(),
            ],
        }
    }
}
