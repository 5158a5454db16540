//! Streaming history loaded from a JSON export.

use crate::clean::{
    optional_text, require_number, require_timestamp, text_or_unknown, Cleaner, ColumnRules,
    FromRawRecord,
};
use crate::ingest::{ingest, InputFormat};
use crate::raw::RawRecord;
use crate::table::{CellValue, CleanedTable, Record};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use pulseboard_common::Result;
use pulseboard_config::RowPolicy;
use serde::Serialize;
use tracing::{info, instrument};

/// Canonical listening column names.
pub mod columns {
    #![allow(missing_docs)]

    pub const TS: &str = "ts";
    pub const PLATFORM: &str = "platform";
    pub const MS_PLAYED: &str = "ms_played";
    pub const MINUTES_PLAYED: &str = "minutes_played";
    pub const COUNTRY: &str = "Country";
    pub const ARTIST: &str = "Artist";
    pub const TRACK: &str = "Track";
    pub const ALBUM: &str = "Album";
    pub const YEAR: &str = "Year";
    pub const HOUR: &str = "Hour";
    pub const DAY: &str = "Day";
    pub const DATE: &str = "Date";
}

/// Keys every listening record must carry.
pub const REQUIRED_FIELDS: [&str; 2] = [columns::TS, columns::MS_PLAYED];

/// Source fields removed during cleaning.
pub const DENYLIST: [&str; 16] = [
    "reason_start",
    "reason_end",
    "ip_addr",
    "shuffle",
    "skipped",
    "offline",
    "offline_timestamp",
    "incognito_mode",
    "episode_name",
    "audiobook_uri",
    "audiobook_chapter_uri",
    "spotify_track_uri",
    "episode_show_name",
    "spotify_episode_uri",
    "audiobook_title",
    "audiobook_chapter_title",
];

/// Source field names mapped to canonical columns.
pub const RENAMES: [(&str, &str); 4] = [
    ("conn_country", columns::COUNTRY),
    ("master_metadata_album_artist_name", columns::ARTIST),
    ("master_metadata_track_name", columns::TRACK),
    ("master_metadata_album_album_name", columns::ALBUM),
];

const COLUMNS: [&str; 11] = [
    columns::TS,
    columns::PLATFORM,
    columns::MINUTES_PLAYED,
    columns::COUNTRY,
    columns::ARTIST,
    columns::TRACK,
    columns::ALBUM,
    columns::YEAR,
    columns::HOUR,
    columns::DAY,
    columns::DATE,
];

const MS_PER_MINUTE: f64 = 60_000.0;

/// One playback event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListeningEvent {
    /// When playback ended, in UTC
    pub ts: NaiveDateTime,
    /// Playback device family
    pub platform: String,
    /// Listening time in minutes
    pub minutes_played: f64,
    /// Connection country code
    pub country: Option<String>,
    /// Album artist; absent for podcasts and audiobooks
    pub artist: Option<String>,
    /// Track name
    pub track: Option<String>,
    /// Album name
    pub album: Option<String>,
}

impl ListeningEvent {
    /// Calendar year of the play.
    pub fn year(&self) -> i32 {
        self.ts.year()
    }

    /// Hour of day, 0 to 23.
    pub fn hour(&self) -> u32 {
        self.ts.hour()
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        self.ts.weekday()
    }

    /// Calendar date.
    pub fn date(&self) -> NaiveDate {
        self.ts.date()
    }
}

impl FromRawRecord for ListeningEvent {
    const RULES: ColumnRules = ColumnRules {
        denylist: &DENYLIST,
        renames: &RENAMES,
    };

    fn from_raw(record: &RawRecord, row: usize) -> Result<Self> {
        Ok(Self {
            ts: require_timestamp(record, columns::TS, row)?,
            platform: text_or_unknown(record, columns::PLATFORM),
            minutes_played: require_number(record, columns::MS_PLAYED, row)? / MS_PER_MINUTE,
            country: optional_text(record, columns::COUNTRY),
            artist: optional_text(record, columns::ARTIST),
            track: optional_text(record, columns::TRACK),
            album: optional_text(record, columns::ALBUM),
        })
    }
}

impl Record for ListeningEvent {
    fn columns() -> &'static [&'static str] {
        &COLUMNS
    }

    fn value(&self, column: &str) -> Option<CellValue<'_>> {
        Some(match column {
            columns::TS => CellValue::Timestamp(self.ts),
            columns::PLATFORM => CellValue::Text(&self.platform),
            columns::MINUTES_PLAYED => CellValue::Number(self.minutes_played),
            columns::COUNTRY => CellValue::text(self.country.as_deref()),
            columns::ARTIST => CellValue::text(self.artist.as_deref()),
            columns::TRACK => CellValue::text(self.track.as_deref()),
            columns::ALBUM => CellValue::text(self.album.as_deref()),
            columns::YEAR => CellValue::Integer(i64::from(self.year())),
            columns::HOUR => CellValue::Integer(i64::from(self.hour())),
            columns::DAY => CellValue::Weekday(self.weekday()),
            columns::DATE => CellValue::Date(self.date()),
            _ => return None,
        })
    }
}

/// Ingests and cleans a streaming-history JSON upload.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn load(bytes: &[u8], policy: RowPolicy) -> Result<CleanedTable<ListeningEvent>> {
    let raw = ingest(bytes, InputFormat::Json, &REQUIRED_FIELDS)?;
    let table = Cleaner::new(policy).clean(raw)?;
    info!(rows = table.len(), dropped = table.dropped_rows(), "Loaded listening dataset");
    Ok(table)
}
