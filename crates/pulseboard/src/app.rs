//! The application facade driving sessions through the pipeline.

use arc_swap::ArcSwap;
use pulseboard_common::{Result, SessionId};
use pulseboard_config::{Config, ConfigCache};
use pulseboard_dashboards::{
    DashboardBuilder, DashboardDocument, ListeningDashboard, SalesDashboard,
};
use pulseboard_data::datasets::{listening, sales};
use pulseboard_data::{CleanedTable, ListeningEvent, SalesFilters, SalesRecord, SessionStore};
use pulseboard_i18n::Localizer;
use std::sync::Arc;
use tracing::{info, instrument};

/// Shared application state: configuration, localizer and live sessions.
///
/// Every upload or filter change recomputes the affected dashboard from the
/// session's cached table.
pub struct Pulseboard {
    config: ConfigCache,
    localizer: ArcSwap<Localizer>,
    sessions: SessionStore,
}

impl std::fmt::Debug for Pulseboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pulseboard")
            .field("locale", &self.localizer.load().locale())
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

impl Pulseboard {
    /// Validates `config` and builds the application around it.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let localizer = Localizer::for_code(&config.locale)?;
        let sessions = SessionStore::new(&config.cache);

        info!(locale = localizer.locale().code(), "Pulseboard initialized");
        Ok(Self {
            config: ConfigCache::new(config),
            localizer: ArcSwap::from_pointee(localizer),
            sessions,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> Arc<Config> {
        self.config.get()
    }

    /// Swaps in a new configuration and its localizer.
    ///
    /// Session capacity and idle timeout keep their startup values.
    pub fn reload_config(&self, config: Config) -> Result<()> {
        let localizer = Localizer::for_code(&config.locale)?;
        self.config.update(config)?;
        self.localizer.store(Arc::new(localizer));
        Ok(())
    }

    /// Opens a new isolated session.
    pub fn open_session(&self) -> SessionId {
        self.sessions.open()
    }

    /// Closes a session and drops its cached uploads.
    pub fn close_session(&self, id: SessionId) {
        self.sessions.close(id);
    }

    /// Ingests a sales CSV upload and builds the sales report.
    ///
    /// Re-uploading identical bytes under the same row policy reuses the
    /// cached table. A different file resets the filter selection to
    /// everything in the new upload.
    #[instrument(skip(self, bytes), fields(session = %id, bytes = bytes.len()))]
    pub fn upload_sales(&self, id: SessionId, bytes: &[u8]) -> Result<DashboardDocument> {
        let config = self.config.get();
        self.sessions.with_session(id, |session| {
            let previous = session.sales.current_hash();
            let table = session
                .sales
                .get_or_load(bytes, config.data.invalid_rows, sales::load)?;
            if previous != session.sales.current_hash() {
                session.sales_filters = None;
            }
            self.render_sales(&config, &table, session.sales_filters.as_ref())
        })
    }

    /// Effective sales selection of a session.
    ///
    /// Without an explicit selection this is every category and region of the
    /// current upload, or nothing when no sales data was uploaded yet.
    pub fn sales_filters(&self, id: SessionId) -> Result<SalesFilters> {
        self.sessions.with_session(id, |session| {
            Ok(match (&session.sales_filters, session.sales.current()) {
                (Some(filters), _) => filters.clone(),
                (None, Some(table)) => SalesFilters::all_of(&table),
                (None, None) => SalesFilters::default(),
            })
        })
    }

    /// Stores a filter selection and rebuilds the sales report, if any.
    #[instrument(skip(self, filters), fields(session = %id))]
    pub fn set_sales_filters(
        &self,
        id: SessionId,
        filters: SalesFilters,
    ) -> Result<Option<DashboardDocument>> {
        let config = self.config.get();
        self.sessions.with_session(id, |session| {
            session.sales_filters = Some(filters);
            session
                .sales
                .current()
                .map(|table| self.render_sales(&config, &table, session.sales_filters.as_ref()))
                .transpose()
        })
    }

    /// Rebuilds the sales report from the cached upload.
    pub fn sales_dashboard(&self, id: SessionId) -> Result<Option<DashboardDocument>> {
        let config = self.config.get();
        self.sessions.with_session(id, |session| {
            session
                .sales
                .current()
                .map(|table| self.render_sales(&config, &table, session.sales_filters.as_ref()))
                .transpose()
        })
    }

    /// Ingests a streaming history JSON upload and builds listening insights.
    #[instrument(skip(self, bytes), fields(session = %id, bytes = bytes.len()))]
    pub fn upload_listening(&self, id: SessionId, bytes: &[u8]) -> Result<DashboardDocument> {
        let config = self.config.get();
        self.sessions.with_session(id, |session| {
            let table = session
                .listening
                .get_or_load(bytes, config.data.invalid_rows, listening::load)?;
            self.render_listening(&config, &table)
        })
    }

    /// Rebuilds listening insights from the cached upload.
    pub fn listening_dashboard(&self, id: SessionId) -> Result<Option<DashboardDocument>> {
        let config = self.config.get();
        self.sessions.with_session(id, |session| {
            session
                .listening
                .current()
                .map(|table| self.render_listening(&config, &table))
                .transpose()
        })
    }

    fn render_sales(
        &self,
        config: &Config,
        table: &CleanedTable<SalesRecord>,
        filters: Option<&SalesFilters>,
    ) -> Result<DashboardDocument> {
        let everything;
        let filters = if let Some(filters) = filters {
            filters
        } else {
            everything = SalesFilters::all_of(table);
            &everything
        };

        let localizer = self.localizer.load_full();
        SalesDashboard::new(&localizer, &config.data).build(table, filters, &config.theme)
    }

    fn render_listening(
        &self,
        config: &Config,
        table: &CleanedTable<ListeningEvent>,
    ) -> Result<DashboardDocument> {
        let localizer = self.localizer.load_full();
        ListeningDashboard::new(&localizer, &config.data).build(table, &(), &config.theme)
    }
}
