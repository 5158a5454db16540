//! Sales transactions loaded from delimited text.

use crate::clean::{
    optional_number, optional_text, require_number, require_timestamp, text_or_unknown,
    Cleaner, ColumnRules, FromRawRecord,
};
use crate::ingest::{ingest, InputFormat};
use crate::raw::RawRecord;
use crate::table::{CellValue, CleanedTable, Record};
use chrono::{Datelike, NaiveDateTime};
use pulseboard_common::{Result, YearMonth};
use pulseboard_config::RowPolicy;
use serde::Serialize;
use tracing::{info, instrument};

/// Canonical sales column names.
pub mod columns {
    #![allow(missing_docs)]

    pub const PRODUCT_ID: &str = "Product_ID";
    pub const SALE_DATE: &str = "Sale_Date";
    pub const SALES_REP: &str = "Sales_Rep";
    pub const REGION: &str = "Region";
    pub const SALES_AMOUNT: &str = "Sales_Amount";
    pub const QUANTITY_SOLD: &str = "Quantity_Sold";
    pub const PRODUCT_CATEGORY: &str = "Product_Category";
    pub const CUSTOMER_TYPE: &str = "Customer_Type";
    pub const PAYMENT_METHOD: &str = "Payment_Method";
    pub const MONTH: &str = "Month";
    pub const YEAR: &str = "Year";
}

/// Header columns a sales upload must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    columns::SALE_DATE,
    columns::SALES_AMOUNT,
    columns::PRODUCT_CATEGORY,
    columns::REGION,
    columns::SALES_REP,
    columns::CUSTOMER_TYPE,
    columns::PAYMENT_METHOD,
];

const COLUMNS: [&str; 11] = [
    columns::PRODUCT_ID,
    columns::SALE_DATE,
    columns::SALES_REP,
    columns::REGION,
    columns::SALES_AMOUNT,
    columns::QUANTITY_SOLD,
    columns::PRODUCT_CATEGORY,
    columns::CUSTOMER_TYPE,
    columns::PAYMENT_METHOD,
    columns::MONTH,
    columns::YEAR,
];

/// One sales transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    /// Product identifier, when the export has one
    pub product_id: Option<String>,
    /// Date of the sale
    pub sale_date: NaiveDateTime,
    /// Sales representative
    pub sales_rep: String,
    /// Sales region
    pub region: String,
    /// Transaction amount
    pub amount: f64,
    /// Units sold, when the export has them
    pub quantity: Option<f64>,
    /// Product category
    pub product_category: String,
    /// New or returning customer
    pub customer_type: String,
    /// Payment method
    pub payment_method: String,
}

impl SalesRecord {
    /// Calendar month of the sale.
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.sale_date)
    }

    /// Calendar year of the sale.
    pub fn year(&self) -> i32 {
        self.sale_date.year()
    }
}

impl FromRawRecord for SalesRecord {
    const RULES: ColumnRules = ColumnRules::NONE;

    fn from_raw(record: &RawRecord, row: usize) -> Result<Self> {
        Ok(Self {
            product_id: optional_text(record, columns::PRODUCT_ID),
            sale_date: require_timestamp(record, columns::SALE_DATE, row)?,
            sales_rep: text_or_unknown(record, columns::SALES_REP),
            region: text_or_unknown(record, columns::REGION),
            amount: require_number(record, columns::SALES_AMOUNT, row)?,
            quantity: optional_number(record, columns::QUANTITY_SOLD, row)?,
            product_category: text_or_unknown(record, columns::PRODUCT_CATEGORY),
            customer_type: text_or_unknown(record, columns::CUSTOMER_TYPE),
            payment_method: text_or_unknown(record, columns::PAYMENT_METHOD),
        })
    }
}

impl Record for SalesRecord {
    fn columns() -> &'static [&'static str] {
        &COLUMNS
    }

    fn value(&self, column: &str) -> Option<CellValue<'_>> {
        Some(match column {
            columns::PRODUCT_ID => CellValue::text(self.product_id.as_deref()),
            columns::SALE_DATE => CellValue::Timestamp(self.sale_date),
            columns::SALES_REP => CellValue::Text(&self.sales_rep),
            columns::REGION => CellValue::Text(&self.region),
            columns::SALES_AMOUNT => CellValue::Number(self.amount),
            columns::QUANTITY_SOLD => self.quantity.map_or(CellValue::Null, CellValue::Number),
            columns::PRODUCT_CATEGORY => CellValue::Text(&self.product_category),
            columns::CUSTOMER_TYPE => CellValue::Text(&self.customer_type),
            columns::PAYMENT_METHOD => CellValue::Text(&self.payment_method),
            columns::MONTH => CellValue::Month(self.month()),
            columns::YEAR => CellValue::Integer(i64::from(self.year())),
            _ => return None,
        })
    }
}

/// Ingests and cleans a sales CSV upload.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn load(bytes: &[u8], policy: RowPolicy) -> Result<CleanedTable<SalesRecord>> {
    let raw = ingest(bytes, InputFormat::Csv, &REQUIRED_FIELDS)?;
    let table = Cleaner::new(policy).clean(raw)?;
    info!(rows = table.len(), dropped = table.dropped_rows(), "Loaded sales dataset");
    Ok(table)
}
