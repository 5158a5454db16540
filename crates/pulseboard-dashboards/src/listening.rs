//! Listening insights dashboard.

use crate::panel::{ChartKind, MetricValue, Panel, Unit};
use crate::traits::DashboardBuilder;
use pulseboard_common::{DatasetKind, Result};
use pulseboard_config::DataConfig;
use pulseboard_data::datasets::listening::columns as lc;
use pulseboard_data::{
    group_by, top_n, weekday_counts, AggregateRow, AggregateTable, CleanedTable, DiscoverySplit,
    GroupKey, ListeningEvent, ListeningSummary, Reducer,
};
use pulseboard_i18n::{messages as msg, Localizer};
use tracing::debug;

/// Builds the listening insights dashboard from a cleaned streaming history.
#[derive(Debug)]
pub struct ListeningDashboard<'a> {
    localizer: &'a Localizer,
    config: &'a DataConfig,
}

impl<'a> ListeningDashboard<'a> {
    /// Creates a builder with the given localizer and data settings.
    pub const fn new(localizer: &'a Localizer, config: &'a DataConfig) -> Self {
        Self { localizer, config }
    }

    fn summary_panels(&self, table: &CleanedTable<ListeningEvent>) -> Result<Vec<Panel>> {
        let summary = ListeningSummary::from_table(table)?;
        Ok(vec![
            Panel::metric(
                "total_hours",
                self.localizer.text(msg::LISTENING_TOTAL_HOURS)?,
                Unit::Hours,
                MetricValue::rounded(summary.total_hours),
            ),
            Panel::metric(
                "tracks_played",
                self.localizer.text(msg::LISTENING_TRACKS_PLAYED)?,
                Unit::Count,
                MetricValue::count(summary.tracks_played),
            ),
            Panel::metric(
                "active_days",
                self.localizer.text(msg::LISTENING_ACTIVE_DAYS)?,
                Unit::Days,
                MetricValue::count(summary.active_days),
            ),
            Panel::metric(
                "daily_average",
                self.localizer.text(msg::LISTENING_DAILY_AVERAGE)?,
                Unit::Minutes,
                MetricValue::rounded(summary.daily_average_minutes),
            ),
        ])
    }

    fn distribution_panels(&self, table: &CleanedTable<ListeningEvent>) -> Result<Vec<Panel>> {
        let by_year = group_by(table, lc::YEAR, lc::TS, Reducer::Count)?;
        let platforms = group_by(table, lc::PLATFORM, lc::TS, Reducer::Count)?;

        Ok(vec![
            Panel::table(
                "tracks_by_year",
                ChartKind::Bar,
                self.localizer.text(msg::LISTENING_TRACKS_BY_YEAR)?,
                Unit::Plays,
                by_year,
            )
            .with_axes(
                self.localizer.text(msg::AXIS_YEAR)?,
                self.localizer.text(msg::AXIS_TRACKS)?,
            ),
            Panel::table(
                "platforms",
                ChartKind::Donut,
                self.localizer.text(msg::LISTENING_PLATFORMS)?,
                Unit::Plays,
                platforms,
            ),
        ])
    }

    fn ranking_panels(&self, table: &CleanedTable<ListeningEvent>) -> Result<Vec<Panel>> {
        let n = self.config.listening_top_n;
        let rankings = [
            ("top_artists", lc::ARTIST, msg::LISTENING_TOP_ARTISTS),
            ("top_albums", lc::ALBUM, msg::LISTENING_TOP_ALBUMS),
            ("top_tracks", lc::TRACK, msg::LISTENING_TOP_TRACKS),
        ];
        let plays_axis = self.localizer.text(msg::AXIS_PLAYS)?;

        rankings
            .into_iter()
            .map(|(id, column, title_id)| {
                let ranking = top_n(table, column, lc::TS, Reducer::Count, n)?
                    .with_truncated_labels(self.config.label_max_chars);
                Ok(Panel::table(
                    id,
                    ChartKind::HorizontalBar,
                    self.localizer.text_with_count(title_id, n)?,
                    Unit::Plays,
                    ranking,
                )
                .with_x_label(plays_axis.clone()))
            })
            .collect()
    }

    fn rhythm_panels(&self, table: &CleanedTable<ListeningEvent>) -> Result<Vec<Panel>> {
        let plays_axis = self.localizer.text(msg::AXIS_PLAYS)?;
        let day_names = msg::WEEKDAY_NAMES
            .iter()
            .map(|id| self.localizer.text(id))
            .collect::<Result<Vec<_>>>()?;

        let hourly = group_by(table, lc::HOUR, lc::TS, Reducer::Count)?.with_labels(|key| match key {
            GroupKey::Integer(hour) => format!("{hour:02}:00"),
            other => other.label(),
        });
        let weekly = weekday_counts(table, lc::DAY, lc::TS)?.with_labels(|key| match key {
            GroupKey::Weekday(day) => day_names[day.num_days_from_monday() as usize].clone(),
            other => other.label(),
        });

        Ok(vec![
            Panel::table(
                "hourly",
                ChartKind::Bar,
                self.localizer.text(msg::LISTENING_HOURLY)?,
                Unit::Plays,
                hourly,
            )
            .with_axes(self.localizer.text(msg::AXIS_HOUR)?, plays_axis.clone())
            .with_peak_highlight(),
            Panel::table(
                "weekly",
                ChartKind::Bar,
                self.localizer.text(msg::LISTENING_WEEKLY)?,
                Unit::Plays,
                weekly,
            )
            .with_axes(self.localizer.text(msg::AXIS_DAY)?, plays_axis)
            .with_peak_highlight(),
        ])
    }

    fn discovery_panels(&self, table: &CleanedTable<ListeningEvent>) -> Result<Vec<Panel>> {
        let split = DiscoverySplit::from_table(table, self.config.discovery_window_years);
        let new_label = self.localizer.text(msg::LISTENING_NEW_RELEASES)?;
        let old_label = self.localizer.text(msg::LISTENING_OLDER_TRACKS)?;

        #[allow(clippy::cast_precision_loss)]
        let split_table = AggregateTable {
            dimension: "Discovery".to_string(),
            measure: lc::TS.to_string(),
            reducer: Reducer::Count,
            rows: vec![
                AggregateRow {
                    key: GroupKey::Text(new_label.clone()),
                    value: split.new_plays as f64,
                    label: None,
                },
                AggregateRow {
                    key: GroupKey::Text(old_label.clone()),
                    value: split.old_plays as f64,
                    label: None,
                },
            ],
        };

        Ok(vec![
            Panel::table(
                "discovery",
                ChartKind::Donut,
                self.localizer.text(msg::LISTENING_DISCOVERY)?,
                Unit::Plays,
                split_table,
            ),
            Panel::metric(
                "new_releases",
                new_label,
                Unit::Percent,
                MetricValue::percent(split.new_percent),
            ),
            Panel::metric(
                "older_tracks",
                old_label,
                Unit::Percent,
                MetricValue::percent(split.old_percent),
            ),
        ])
    }
}

impl DashboardBuilder for ListeningDashboard<'_> {
    type Record = ListeningEvent;
    type Selection = ();

    fn kind(&self) -> DatasetKind {
        DatasetKind::Listening
    }

    fn localizer(&self) -> &Localizer {
        self.localizer
    }

    fn title_id(&self) -> &'static str {
        msg::LISTENING_DASHBOARD_TITLE
    }

    fn footer(&self, table: &CleanedTable<ListeningEvent>) -> Result<Option<String>> {
        let summary = ListeningSummary::from_table(table)?;
        match (summary.first_year, summary.last_year) {
            (Some(from), Some(to)) => self
                .localizer
                .text_with_years(msg::LISTENING_DATA_COVERS, from, to)
                .map(Some),
            _ => Ok(None),
        }
    }

    fn panels(&self, table: &CleanedTable<ListeningEvent>, _selection: &()) -> Result<Vec<Panel>> {
        debug!(top_n = self.config.listening_top_n, "Building listening panels");

        let mut panels = self.summary_panels(table)?;
        panels.extend(self.distribution_panels(table)?);
        panels.extend(self.ranking_panels(table)?);
        panels.extend(self.rhythm_panels(table)?);
        panels.extend(self.discovery_panels(table)?);
        Ok(panels)
    }
}
