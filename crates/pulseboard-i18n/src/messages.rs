//! Message identifiers shared by the dashboard builders.

#![allow(missing_docs)]

pub const SALES_DASHBOARD_TITLE: &str = "sales-dashboard-title";
pub const SALES_DATA_PREVIEW: &str = "sales-data-preview";
pub const SALES_TOTAL_SALES: &str = "sales-total-sales";
pub const SALES_TOTAL_PRODUCTS: &str = "sales-total-products";
pub const SALES_TOTAL_REGIONS: &str = "sales-total-regions";
pub const SALES_BY_PRODUCT: &str = "sales-by-product";
pub const SALES_BY_REGION: &str = "sales-by-region";
pub const SALES_TREND: &str = "sales-trend";
pub const SALES_TREND_BY_PRODUCT: &str = "sales-trend-by-product";
pub const SALES_TREND_BY_REGION: &str = "sales-trend-by-region";
/// Takes `$count`.
pub const SALES_TOP_REPS: &str = "sales-top-reps";
pub const SALES_CUSTOMER_TYPES: &str = "sales-customer-types";
pub const SALES_PAYMENT_METHODS: &str = "sales-payment-methods";

pub const LISTENING_DASHBOARD_TITLE: &str = "listening-dashboard-title";
pub const LISTENING_TOTAL_HOURS: &str = "listening-total-hours";
pub const LISTENING_TRACKS_PLAYED: &str = "listening-tracks-played";
pub const LISTENING_ACTIVE_DAYS: &str = "listening-active-days";
pub const LISTENING_DAILY_AVERAGE: &str = "listening-daily-average";
pub const LISTENING_TRACKS_BY_YEAR: &str = "listening-tracks-by-year";
pub const LISTENING_PLATFORMS: &str = "listening-platforms";
/// Takes `$count`.
pub const LISTENING_TOP_ARTISTS: &str = "listening-top-artists";
/// Takes `$count`.
pub const LISTENING_TOP_ALBUMS: &str = "listening-top-albums";
/// Takes `$count`.
pub const LISTENING_TOP_TRACKS: &str = "listening-top-tracks";
pub const LISTENING_HOURLY: &str = "listening-hourly";
pub const LISTENING_WEEKLY: &str = "listening-weekly";
pub const LISTENING_DISCOVERY: &str = "listening-discovery";
pub const LISTENING_NEW_RELEASES: &str = "listening-new-releases";
pub const LISTENING_OLDER_TRACKS: &str = "listening-older-tracks";
/// Takes `$from` and `$to`.
pub const LISTENING_DATA_COVERS: &str = "listening-data-covers";

pub const AXIS_MONTH: &str = "axis-month";
pub const AXIS_YEAR: &str = "axis-year";
pub const AXIS_HOUR: &str = "axis-hour";
pub const AXIS_DAY: &str = "axis-day";
pub const AXIS_SALES_AMOUNT: &str = "axis-sales-amount";
pub const AXIS_PRODUCT_CATEGORY: &str = "axis-product-category";
pub const AXIS_REGION: &str = "axis-region";
pub const AXIS_SALES_REP: &str = "axis-sales-rep";
pub const AXIS_TRACKS: &str = "axis-tracks";
pub const AXIS_PLAYS: &str = "axis-plays";

pub const WEEKDAY_MONDAY: &str = "weekday-monday";
pub const WEEKDAY_TUESDAY: &str = "weekday-tuesday";
pub const WEEKDAY_WEDNESDAY: &str = "weekday-wednesday";
pub const WEEKDAY_THURSDAY: &str = "weekday-thursday";
pub const WEEKDAY_FRIDAY: &str = "weekday-friday";
pub const WEEKDAY_SATURDAY: &str = "weekday-saturday";
pub const WEEKDAY_SUNDAY: &str = "weekday-sunday";

/// Day names Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    WEEKDAY_MONDAY,
    WEEKDAY_TUESDAY,
    WEEKDAY_WEDNESDAY,
    WEEKDAY_THURSDAY,
    WEEKDAY_FRIDAY,
    WEEKDAY_SATURDAY,
    WEEKDAY_SUNDAY,
];

/// Every message id, for completeness checks.
pub const ALL: &[&str] = &[
    SALES_DASHBOARD_TITLE,
    SALES_DATA_PREVIEW,
    SALES_TOTAL_SALES,
    SALES_TOTAL_PRODUCTS,
    SALES_TOTAL_REGIONS,
    SALES_BY_PRODUCT,
    SALES_BY_REGION,
    SALES_TREND,
    SALES_TREND_BY_PRODUCT,
    SALES_TREND_BY_REGION,
    SALES_TOP_REPS,
    SALES_CUSTOMER_TYPES,
    SALES_PAYMENT_METHODS,
    LISTENING_DASHBOARD_TITLE,
    LISTENING_TOTAL_HOURS,
    LISTENING_TRACKS_PLAYED,
    LISTENING_ACTIVE_DAYS,
    LISTENING_DAILY_AVERAGE,
    LISTENING_TRACKS_BY_YEAR,
    LISTENING_PLATFORMS,
    LISTENING_TOP_ARTISTS,
    LISTENING_TOP_ALBUMS,
    LISTENING_TOP_TRACKS,
    LISTENING_HOURLY,
    LISTENING_WEEKLY,
    LISTENING_DISCOVERY,
    LISTENING_NEW_RELEASES,
    LISTENING_OLDER_TRACKS,
    LISTENING_DATA_COVERS,
    AXIS_MONTH,
    AXIS_YEAR,
    AXIS_HOUR,
    AXIS_DAY,
    AXIS_SALES_AMOUNT,
    AXIS_PRODUCT_CATEGORY,
    AXIS_REGION,
    AXIS_SALES_REP,
    AXIS_TRACKS,
    AXIS_PLAYS,
    WEEKDAY_MONDAY,
    WEEKDAY_TUESDAY,
    WEEKDAY_WEDNESDAY,
    WEEKDAY_THURSDAY,
    WEEKDAY_FRIDAY,
    WEEKDAY_SATURDAY,
    WEEKDAY_SUNDAY,
];
