//! Dashboard builder trait shared by both datasets.

use crate::document::DashboardDocument;
use crate::panel::Panel;
use pulseboard_common::{DatasetKind, Result};
use pulseboard_config::ThemeConfig;
use pulseboard_data::{CleanedTable, Record};
use pulseboard_i18n::Localizer;
use tracing::{info, instrument};

/// Turns a cleaned table into a dashboard document.
pub trait DashboardBuilder {
    /// Row type of the dataset.
    type Record: Record;

    /// User selection applied while building, e.g. sales filters.
    type Selection;

    /// Dataset this builder handles.
    fn kind(&self) -> DatasetKind;

    /// Localizer for titles and axis labels.
    fn localizer(&self) -> &Localizer;

    /// Message id of the dashboard title.
    fn title_id(&self) -> &'static str;

    /// Computes every panel from the cleaned table.
    fn panels(
        &self,
        table: &CleanedTable<Self::Record>,
        selection: &Self::Selection,
    ) -> Result<Vec<Panel>>;

    /// Note drawn below the panels. Defaults to none.
    fn footer(&self, _table: &CleanedTable<Self::Record>) -> Result<Option<String>> {
        Ok(None)
    }

    /// Builds the full document.
    #[instrument(skip_all, fields(dataset = %self.kind(), rows = table.len()))]
    fn build(
        &self,
        table: &CleanedTable<Self::Record>,
        selection: &Self::Selection,
        theme: &ThemeConfig,
    ) -> Result<DashboardDocument> {
        let panels = self.panels(table, selection)?;
        info!(panels = panels.len(), "Built dashboard");

        Ok(DashboardDocument {
            dataset: self.kind(),
            title: self.localizer().text(self.title_id())?,
            locale: self.localizer().locale().code().to_string(),
            theme: theme.clone(),
            panels,
            footer: self.footer(table)?,
        })
    }
}
