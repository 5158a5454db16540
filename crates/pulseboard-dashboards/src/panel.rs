//! Panels: one chart or metric card each, tagged for the renderer.

use pulseboard_common::format_thousands;
use pulseboard_data::{AggregateTable, GroupKey, PivotTable, RowPreview};
use serde::Serialize;

/// Chart kind the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Headline number card
    Metric,
    /// Vertical bars
    Bar,
    /// Horizontal bars, used for rankings
    HorizontalBar,
    /// Line over an ordered x axis
    Line,
    /// Pie
    Pie,
    /// Pie with a hole
    Donut,
    /// Plain rows and columns
    Table,
}

/// Unit of a panel's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Money
    Currency,
    /// Plain count of rows or distinct values
    Count,
    /// Number of plays
    Plays,
    /// Minutes
    Minutes,
    /// Hours
    Hours,
    /// Days
    Days,
    /// Percent, 0 to 100
    Percent,
    /// Columns carry their own units
    Mixed,
}

/// A single headline number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValue {
    /// Raw value
    pub value: f64,
    /// Formatted value, e.g. `$12,345.68`
    pub display: String,
}

impl MetricValue {
    /// Amount of money with two decimals and a dollar sign.
    pub fn currency(value: f64) -> Self {
        Self {
            value,
            display: format!("${}", format_thousands(value, 2)),
        }
    }

    /// Whole number with thousands separators.
    #[allow(clippy::cast_precision_loss)]
    pub fn count(value: usize) -> Self {
        let value = value as f64;
        Self {
            value,
            display: format_thousands(value, 0),
        }
    }

    /// Rounded quantity with thousands separators.
    pub fn rounded(value: f64) -> Self {
        Self {
            value,
            display: format_thousands(value, 0),
        }
    }

    /// Percentage with one decimal.
    pub fn percent(value: f64) -> Self {
        Self {
            value,
            display: format!("{value:.1}%"),
        }
    }
}

/// Data carried by a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum PanelData {
    /// Single-dimension aggregate
    Table(AggregateTable),
    /// Time by category matrix
    Pivot(PivotTable),
    /// Headline number
    Metric(MetricValue),
    /// Leading rows of the cleaned table
    Rows(RowPreview),
}

/// One chart or metric card of a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// Stable identifier, unique within a dashboard
    pub id: &'static str,
    /// How to draw the panel
    pub chart: ChartKind,
    /// Localized title
    pub title: String,
    /// Localized x axis label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    /// Localized y axis label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    /// Unit of the values
    pub unit: Unit,
    /// Group drawn in the accent color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<GroupKey>,
    /// Panel content
    pub data: PanelData,
}

impl Panel {
    fn new(id: &'static str, chart: ChartKind, title: String, unit: Unit, data: PanelData) -> Self {
        Self {
            id,
            chart,
            title,
            x_label: None,
            y_label: None,
            unit,
            highlight: None,
            data,
        }
    }

    /// Metric card.
    pub fn metric(id: &'static str, title: String, unit: Unit, value: MetricValue) -> Self {
        Self::new(id, ChartKind::Metric, title, unit, PanelData::Metric(value))
    }

    /// Chart over a single-dimension aggregate.
    pub fn table(
        id: &'static str,
        chart: ChartKind,
        title: String,
        unit: Unit,
        table: AggregateTable,
    ) -> Self {
        Self::new(id, chart, title, unit, PanelData::Table(table))
    }

    /// Multi-series chart over a pivot table.
    pub fn pivot(id: &'static str, chart: ChartKind, title: String, unit: Unit, pivot: PivotTable) -> Self {
        Self::new(id, chart, title, unit, PanelData::Pivot(pivot))
    }

    /// Row listing of a cleaned table.
    pub fn rows(id: &'static str, title: String, preview: RowPreview) -> Self {
        Self::new(id, ChartKind::Table, title, Unit::Mixed, PanelData::Rows(preview))
    }

    /// Sets both axis labels.
    #[must_use]
    pub fn with_axes(mut self, x_label: String, y_label: String) -> Self {
        self.x_label = Some(x_label);
        self.y_label = Some(y_label);
        self
    }

    /// Sets the x axis label only.
    #[must_use]
    pub fn with_x_label(mut self, x_label: String) -> Self {
        self.x_label = Some(x_label);
        self
    }

    /// Marks the peak group of a table panel for highlighting.
    #[must_use]
    pub fn with_peak_highlight(mut self) -> Self {
        if let PanelData::Table(table) = &self.data {
            self.highlight = table.peak().map(|row| row.key.clone());
        }
        self
    }

    /// The aggregate table, for table panels.
    pub fn as_table(&self) -> Option<&AggregateTable> {
        match &self.data {
            PanelData::Table(table) => Some(table),
            _ => None,
        }
    }

    /// The pivot table, for pivot panels.
    pub fn as_pivot(&self) -> Option<&PivotTable> {
        match &self.data {
            PanelData::Pivot(pivot) => Some(pivot),
            _ => None,
        }
    }

    /// The metric, for metric cards.
    pub fn as_metric(&self) -> Option<&MetricValue> {
        match &self.data {
            PanelData::Metric(metric) => Some(metric),
            _ => None,
        }
    }

    /// The row listing, for table panels over raw rows.
    pub fn as_rows(&self) -> Option<&RowPreview> {
        match &self.data {
            PanelData::Rows(preview) => Some(preview),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_formatting() {
        assert_eq!(MetricValue::currency(12_345.678).display, "$12,345.68");
        assert_eq!(MetricValue::count(1_234).display, "1,234");
        assert_eq!(MetricValue::rounded(2_345.4).display, "2,345");
        assert_eq!(MetricValue::percent(80.0).display, "80.0%");
        assert_eq!(MetricValue::percent(33.333).display, "33.3%");
    }

    #[test]
    fn test_panel_serialization_tags_data_kind() {
        let panel = Panel::metric(
            "total_sales",
            "Total Sales".to_string(),
            Unit::Currency,
            MetricValue::currency(500.0),
        );
        let json = serde_json::to_value(&panel).unwrap();

        assert_eq!(json["chart"], "metric");
        assert_eq!(json["unit"], "currency");
        assert_eq!(json["data"]["kind"], "metric");
        assert_eq!(json["data"]["data"]["display"], "$500.00");
        assert!(json.get("x_label").is_none());
    }

    #[test]
    fn test_row_panel_serialization() {
        let preview = RowPreview {
            columns: vec!["Product_ID".to_string(), "Sales_Amount".to_string()],
            rows: vec![vec![Some(GroupKey::from("1001")), None]],
        };
        let panel = Panel::rows("data_preview", "Data Preview".to_string(), preview);
        let json = serde_json::to_value(&panel).unwrap();

        assert_eq!(json["chart"], "table");
        assert_eq!(json["unit"], "mixed");
        assert_eq!(json["data"]["kind"], "rows");
        assert_eq!(json["data"]["data"]["columns"][1], "Sales_Amount");
        assert!(json["data"]["data"]["rows"][0][1].is_null());
        assert_eq!(panel.as_rows().map(|p| p.rows.len()), Some(1));
    }
}
