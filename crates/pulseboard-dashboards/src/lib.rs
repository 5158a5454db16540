//! # Pulseboard Dashboards
//!
//! Turns cleaned tables into dashboard documents: an ordered list of panels,
//! each tagged with the chart kind and unit a renderer needs, plus localized
//! titles and the configured theme.
//!
//! Drawing is left to the renderer. Every panel here is plain data and
//! serializes to JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod listening;
pub mod panel;
pub mod sales;
pub mod traits;

pub use document::DashboardDocument;
pub use listening::ListeningDashboard;
pub use panel::{ChartKind, MetricValue, Panel, PanelData, Unit};
pub use sales::SalesDashboard;
pub use traits::DashboardBuilder;
