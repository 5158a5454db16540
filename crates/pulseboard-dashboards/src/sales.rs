//! Sales report dashboard.

use crate::panel::{ChartKind, MetricValue, Panel, Unit};
use crate::traits::DashboardBuilder;
use pulseboard_common::{DatasetKind, Result};
use pulseboard_config::DataConfig;
use pulseboard_data::datasets::sales::columns as sc;
use pulseboard_data::{
    filtered, group_by, pivot, top_n, CleanedTable, ColumnOrder, Reducer, SalesFilters,
    SalesRecord, SalesSummary,
};
use pulseboard_i18n::{messages as msg, Localizer};
use tracing::debug;

/// Rows shown in the data preview.
const PREVIEW_ROWS: usize = 5;

/// Builds the sales report from a cleaned sales table and the user's filters.
#[derive(Debug)]
pub struct SalesDashboard<'a> {
    localizer: &'a Localizer,
    config: &'a DataConfig,
}

impl<'a> SalesDashboard<'a> {
    /// Creates a builder with the given localizer and data settings.
    pub const fn new(localizer: &'a Localizer, config: &'a DataConfig) -> Self {
        Self { localizer, config }
    }

    fn summary_panels(&self, table: &CleanedTable<SalesRecord>) -> Result<Vec<Panel>> {
        let summary = SalesSummary::from_table(table)?;
        Ok(vec![
            Panel::metric(
                "total_sales",
                self.localizer.text(msg::SALES_TOTAL_SALES)?,
                Unit::Currency,
                MetricValue::currency(summary.total_sales),
            ),
            Panel::metric(
                "total_products",
                self.localizer.text(msg::SALES_TOTAL_PRODUCTS)?,
                Unit::Count,
                MetricValue::count(summary.product_count),
            ),
            Panel::metric(
                "total_regions",
                self.localizer.text(msg::SALES_TOTAL_REGIONS)?,
                Unit::Count,
                MetricValue::count(summary.region_count),
            ),
        ])
    }

    fn product_and_region_panels(
        &self,
        table: &CleanedTable<SalesRecord>,
        filters: &SalesFilters,
    ) -> Result<Vec<Panel>> {
        let amount_axis = self.localizer.text(msg::AXIS_SALES_AMOUNT)?;

        let by_product = filtered(
            table,
            sc::PRODUCT_CATEGORY,
            sc::SALES_AMOUNT,
            Reducer::Sum,
            &filters.categories,
        )?;
        let by_region = filtered(table, sc::REGION, sc::SALES_AMOUNT, Reducer::Sum, &filters.regions)?;

        Ok(vec![
            Panel::table(
                "sales_by_product",
                ChartKind::HorizontalBar,
                self.localizer.text(msg::SALES_BY_PRODUCT)?,
                Unit::Currency,
                by_product,
            )
            .with_axes(amount_axis.clone(), self.localizer.text(msg::AXIS_PRODUCT_CATEGORY)?),
            Panel::table(
                "sales_by_region",
                ChartKind::HorizontalBar,
                self.localizer.text(msg::SALES_BY_REGION)?,
                Unit::Currency,
                by_region,
            )
            .with_axes(amount_axis, self.localizer.text(msg::AXIS_REGION)?),
        ])
    }

    fn trend_panels(&self, table: &CleanedTable<SalesRecord>) -> Result<Vec<Panel>> {
        let month_axis = self.localizer.text(msg::AXIS_MONTH)?;
        let amount_axis = self.localizer.text(msg::AXIS_SALES_AMOUNT)?;

        let monthly = group_by(table, sc::MONTH, sc::SALES_AMOUNT, Reducer::Sum)?;
        let by_product = pivot(
            table,
            sc::MONTH,
            sc::PRODUCT_CATEGORY,
            sc::SALES_AMOUNT,
            ColumnOrder::FirstSeen,
        )?;
        let by_region = pivot(table, sc::MONTH, sc::REGION, sc::SALES_AMOUNT, ColumnOrder::FirstSeen)?;

        Ok(vec![
            Panel::table(
                "sales_trend",
                ChartKind::Line,
                self.localizer.text(msg::SALES_TREND)?,
                Unit::Currency,
                monthly,
            )
            .with_axes(month_axis.clone(), amount_axis.clone()),
            Panel::pivot(
                "product_trend",
                ChartKind::Line,
                self.localizer.text(msg::SALES_TREND_BY_PRODUCT)?,
                Unit::Currency,
                by_product,
            )
            .with_axes(month_axis.clone(), amount_axis.clone()),
            Panel::pivot(
                "region_trend",
                ChartKind::Line,
                self.localizer.text(msg::SALES_TREND_BY_REGION)?,
                Unit::Currency,
                by_region,
            )
            .with_axes(month_axis, amount_axis),
        ])
    }

    fn customer_panels(&self, table: &CleanedTable<SalesRecord>) -> Result<Vec<Panel>> {
        let top_reps = top_n(
            table,
            sc::SALES_REP,
            sc::SALES_AMOUNT,
            Reducer::Sum,
            self.config.sales_top_n,
        )?;
        let customer_types = group_by(table, sc::CUSTOMER_TYPE, sc::CUSTOMER_TYPE, Reducer::Count)?;
        let payment_methods = group_by(table, sc::PAYMENT_METHOD, sc::PAYMENT_METHOD, Reducer::Count)?;

        Ok(vec![
            Panel::table(
                "top_sales_reps",
                ChartKind::Bar,
                self.localizer
                    .text_with_count(msg::SALES_TOP_REPS, self.config.sales_top_n)?,
                Unit::Currency,
                top_reps,
            )
            .with_axes(
                self.localizer.text(msg::AXIS_SALES_REP)?,
                self.localizer.text(msg::AXIS_SALES_AMOUNT)?,
            ),
            Panel::table(
                "customer_types",
                ChartKind::Pie,
                self.localizer.text(msg::SALES_CUSTOMER_TYPES)?,
                Unit::Count,
                customer_types,
            ),
            Panel::table(
                "payment_methods",
                ChartKind::Pie,
                self.localizer.text(msg::SALES_PAYMENT_METHODS)?,
                Unit::Count,
                payment_methods,
            ),
        ])
    }
}

impl DashboardBuilder for SalesDashboard<'_> {
    type Record = SalesRecord;
    type Selection = SalesFilters;

    fn kind(&self) -> DatasetKind {
        DatasetKind::Sales
    }

    fn localizer(&self) -> &Localizer {
        self.localizer
    }

    fn title_id(&self) -> &'static str {
        msg::SALES_DASHBOARD_TITLE
    }

    fn panels(&self, table: &CleanedTable<SalesRecord>, filters: &SalesFilters) -> Result<Vec<Panel>> {
        debug!(
            categories = filters.categories.len(),
            regions = filters.regions.len(),
            "Building sales panels"
        );

        let mut panels = vec![Panel::rows(
            "data_preview",
            self.localizer.text(msg::SALES_DATA_PREVIEW)?,
            table.preview(PREVIEW_ROWS),
        )];
        panels.extend(self.summary_panels(table)?);
        panels.extend(self.product_and_region_panels(table, filters)?);
        panels.extend(self.trend_panels(table)?);
        panels.extend(self.customer_panels(table)?);
        Ok(panels)
    }
}
