//! Configuration schema definitions using serde.

use pulseboard_common::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Main configuration structure for Pulseboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale used for panel titles and axis labels.
    pub locale: String,
    /// Data preparation configuration.
    pub data: DataConfig,
    /// Session cache configuration.
    pub cache: CacheConfig,
    /// Presentation theme handed to the renderer.
    pub theme: ThemeConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// What the cleaner does with a row whose value cannot be coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Abort the whole ingestion on the first bad row.
    Fail,
    /// Skip bad rows and log how many were skipped.
    Drop,
}

impl std::str::FromStr for RowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "drop" => Ok(Self::Drop),
            other => Err(format!("unknown row policy '{other}', expected 'fail' or 'drop'")),
        }
    }
}

/// Data preparation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Treatment of rows with unparsable timestamps or measures.
    pub invalid_rows: RowPolicy,
    /// Number of artists, albums and tracks shown in the listening rankings.
    pub listening_top_n: usize,
    /// Number of sales reps shown in the sales ranking.
    pub sales_top_n: usize,
    /// Maximum label length before truncation with an ellipsis.
    pub label_max_chars: usize,
    /// Plays from the last `discovery_window_years` years before the newest
    /// observed year (inclusive) count as new.
    pub discovery_window_years: i32,
}

/// Session cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of live sessions; the least recently used is evicted.
    pub max_sessions: u64,
    /// Seconds without activity after which a session and its cached tables expire.
    pub session_idle_secs: u64,
}

/// Immutable presentation theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Accent color for highlighted bars and values.
    pub primary: String,
    /// Darker accent for outlines.
    pub primary_dark: String,
    /// Page background.
    pub background: String,
    /// Card background.
    pub card_background: String,
    /// Card border.
    pub card_border: String,
    /// Main text color.
    pub text_primary: String,
    /// Secondary text color.
    pub text_secondary: String,
    /// Muted text color.
    pub text_muted: String,
    /// Fill for non-peak bars.
    pub muted_bar: String,
    /// Slice colors for pie and donut charts, in order.
    pub palette: Vec<String>,
}
