//! The document handed to the renderer.

use crate::panel::Panel;
use pulseboard_common::DatasetKind;
use pulseboard_config::ThemeConfig;
use serde::Serialize;

/// Everything a renderer needs to draw one dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardDocument {
    /// Dataset the panels were computed from
    pub dataset: DatasetKind,
    /// Localized dashboard title
    pub title: String,
    /// Locale of every text in the document
    pub locale: String,
    /// Theme copied from the configuration
    pub theme: ThemeConfig,
    /// Panels in display order
    pub panels: Vec<Panel>,
    /// Localized note drawn below the panels, e.g. the covered years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl DashboardDocument {
    /// Panel by id.
    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|panel| panel.id == id)
    }

    /// Panel ids in display order.
    pub fn panel_ids(&self) -> Vec<&'static str> {
        self.panels.iter().map(|panel| panel.id).collect()
    }
}
