//! Integration tests for pulseboard-dashboards.
//!
//! These tests build full documents from fixture uploads and check the JSON a
//! renderer would receive.

use pulseboard_common::test_utils::{assert_approx_eq, listening_fixtures, sales_fixtures};
use pulseboard_config::{Config, RowPolicy};
use pulseboard_dashboards::{
    ChartKind, DashboardBuilder, DashboardDocument, ListeningDashboard, Panel, SalesDashboard,
};
use pulseboard_data::datasets::{listening, sales};
use pulseboard_data::SalesFilters;
use pulseboard_i18n::{Locale, Localizer};
use std::collections::{BTreeSet, HashSet};

fn sales_document(locale: Locale, filters: Option<SalesFilters>) -> DashboardDocument {
    let config = Config::default();
    let localizer = Localizer::new(locale).unwrap();
    let table = sales::load(sales_fixtures::small_csv().as_bytes(), RowPolicy::Fail).unwrap();
    let filters = filters.unwrap_or_else(|| SalesFilters::all_of(&table));

    SalesDashboard::new(&localizer, &config.data)
        .build(&table, &filters, &config.theme)
        .unwrap()
}

fn listening_document(locale: Locale) -> DashboardDocument {
    let config = Config::default();
    let localizer = Localizer::new(locale).unwrap();
    let table = listening::load(listening_fixtures::small_json().as_bytes(), RowPolicy::Fail)
        .unwrap();

    ListeningDashboard::new(&localizer, &config.data)
        .build(&table, &(), &config.theme)
        .unwrap()
}

#[test]
fn test_sales_document_json_shape() {
    let document = sales_document(Locale::English, None);
    let json = serde_json::to_value(&document).unwrap();

    assert_eq!(json["dataset"], "sales");
    assert_eq!(json["title"], "Sales Report");
    assert_eq!(json["locale"], "en-US");

    assert_eq!(json["panels"][0]["id"], "data_preview");
    assert_eq!(json["panels"][0]["data"]["kind"], "rows");
    assert!(json.get("footer").is_none());

    let trend = &json["panels"][6];
    assert_eq!(trend["id"], "sales_trend");
    assert_eq!(trend["chart"], "line");
    assert_eq!(trend["data"]["kind"], "table");
    assert_eq!(trend["data"]["data"]["rows"][0]["key"], "2023-01");
    assert_eq!(trend["data"]["data"]["rows"][1]["key"], "2023-02");
}

#[test]
fn test_product_trend_keeps_first_seen_series_order() {
    let document = sales_document(Locale::English, None);
    let pivot = document.panel("product_trend").and_then(Panel::as_pivot).unwrap();

    let columns: Vec<String> = pivot.columns.iter().map(|key| key.label()).collect();
    assert_eq!(columns, vec!["Electronics", "Home", "Clothing"]);
    assert_approx_eq(pivot.total(), 500.0, 1e-9);
}

#[test]
fn test_category_filter_narrows_product_chart() {
    let filters = SalesFilters {
        categories: BTreeSet::from(["Electronics".to_string()]),
        regions: BTreeSet::from(["North".to_string(), "South".to_string()]),
    };
    let document = sales_document(Locale::English, Some(filters));

    let by_product = document.panel("sales_by_product").and_then(Panel::as_table).unwrap();
    assert_eq!(by_product.len(), 1);
    assert_approx_eq(by_product.total(), 350.0, 1e-9);

    let by_region = document.panel("sales_by_region").and_then(Panel::as_table).unwrap();
    assert_approx_eq(by_region.total(), 380.0, 1e-9);
}

#[test]
fn test_german_titles() {
    let document = sales_document(Locale::German, None);
    assert_eq!(document.title, "Verkaufsbericht");
    assert_eq!(document.locale, "de-DE");
    assert_eq!(
        document.panel("top_sales_reps").unwrap().title,
        "Top 10 Vertriebsmitarbeiter"
    );

    let listening = listening_document(Locale::German);
    assert_eq!(listening.title, "Hörstatistik");
    assert_eq!(listening.panel("top_artists").unwrap().title, "Top 15 Künstler");
}

#[test]
fn test_weekly_chart_has_every_weekday_and_peak() {
    let document = listening_document(Locale::English);
    let json = serde_json::to_value(document.panel("weekly").unwrap()).unwrap();

    let days: Vec<&str> = json["data"]["data"]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        days,
        vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
    );
    assert_eq!(json["highlight"], "Monday");
}

#[test]
fn test_german_rhythm_labels_and_footer() {
    let document = listening_document(Locale::German);

    let weekly = document.panel("weekly").and_then(Panel::as_table).unwrap();
    let labels: Vec<String> = weekly.rows.iter().map(|row| row.display_label()).collect();
    assert_eq!(labels[0], "Montag");
    assert_eq!(labels[6], "Sonntag");

    let hourly = document.panel("hourly").and_then(Panel::as_table).unwrap();
    assert_eq!(hourly.rows[0].display_label(), "08:00");

    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(json["footer"], "Daten von 2021 bis 2023");
}

#[test]
fn test_panel_ids_are_unique_and_theme_is_copied() {
    let config = Config::default();
    for document in [
        sales_document(Locale::English, None),
        listening_document(Locale::English),
    ] {
        let ids: HashSet<&str> = document.panel_ids().into_iter().collect();
        assert_eq!(ids.len(), document.panels.len());
        assert_eq!(document.theme, config.theme);
    }
}

#[test]
fn test_metric_panels_are_metric_charts() {
    let document = listening_document(Locale::English);
    for panel in &document.panels {
        assert_eq!(panel.as_metric().is_some(), panel.chart == ChartKind::Metric, "{}", panel.id);
    }

    let hours = document.panel("total_hours").and_then(Panel::as_metric).unwrap();
    assert_approx_eq(hours.value, 10.0 / 60.0, 1e-9);
}
