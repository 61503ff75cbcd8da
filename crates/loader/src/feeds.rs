use crate::error::DataSourceError;
use core_types::{
    CategoryTranslation, CoreError, Customer, Order, OrderItem, Payment, Product, Review,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The raw feeds the loader knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Orders,
    OrderItems,
    Products,
    Customers,
    Reviews,
    Payments,
    CategoryTranslations,
}

impl DatasetKind {
    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Orders => "orders",
            DatasetKind::OrderItems => "order_items",
            DatasetKind::Products => "products",
            DatasetKind::Customers => "customers",
            DatasetKind::Reviews => "reviews",
            DatasetKind::Payments => "payments",
            DatasetKind::CategoryTranslations => "category_translations",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            DatasetKind::Orders => "orders_dataset.csv",
            DatasetKind::OrderItems => "order_items_dataset.csv",
            DatasetKind::Products => "products_dataset.csv",
            DatasetKind::Customers => "customers_dataset.csv",
            DatasetKind::Reviews => "order_reviews_dataset.csv",
            DatasetKind::Payments => "order_payments_dataset.csv",
            DatasetKind::CategoryTranslations => "product_category_name_translation.csv",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape summary of one feed as read from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: usize,
    /// Number of empty cells across all rows.
    pub missing_values: usize,
}

/// A row type that can be read from one of the feeds.
pub trait Feed: DeserializeOwned {
    const KIND: DatasetKind;
    /// Columns whose absence makes the feed structurally malformed.
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// Row-level invariants checked right after deserialization.
    fn validate(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

impl Feed for Order {
    const KIND: DatasetKind = DatasetKind::Orders;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "order_id",
        "customer_id",
        "order_status",
        "order_purchase_timestamp",
        "order_delivered_customer_date",
    ];

    fn validate(&self) -> Result<(), CoreError> {
        Order::validate(self)
    }
}

impl Feed for OrderItem {
    const KIND: DatasetKind = DatasetKind::OrderItems;
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["order_id", "order_item_id", "product_id", "price"];

    fn validate(&self) -> Result<(), CoreError> {
        OrderItem::validate(self)
    }
}

impl Feed for Product {
    const KIND: DatasetKind = DatasetKind::Products;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["product_id", "product_category_name"];
}

impl Feed for Customer {
    const KIND: DatasetKind = DatasetKind::Customers;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["customer_id", "customer_state"];
}

impl Feed for Review {
    const KIND: DatasetKind = DatasetKind::Reviews;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["review_id", "order_id", "review_score"];

    fn validate(&self) -> Result<(), CoreError> {
        Review::validate(self)
    }
}

impl Feed for Payment {
    const KIND: DatasetKind = DatasetKind::Payments;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["order_id", "payment_value"];
}

impl Feed for CategoryTranslation {
    const KIND: DatasetKind = DatasetKind::CategoryTranslations;
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["product_category_name", "product_category_name_english"];
}

/// Reads a required feed from `dir`. A missing file is an error.
pub fn read_feed<T: Feed>(dir: &Path) -> Result<(Vec<T>, DatasetInfo), DataSourceError> {
    let path = dir.join(T::KIND.file_name());
    if !path.is_file() {
        return Err(DataSourceError::MissingFeed {
            dataset: T::KIND,
            path,
        });
    }
    let file = File::open(&path).map_err(|source| DataSourceError::Io {
        dataset: T::KIND,
        path: path.clone(),
        source,
    })?;
    parse_feed(file)
}

/// Reads an optional feed from `dir`. A missing file yields `None`.
pub fn read_optional_feed<T: Feed>(
    dir: &Path,
) -> Result<Option<(Vec<T>, DatasetInfo)>, DataSourceError> {
    if !dir.join(T::KIND.file_name()).is_file() {
        tracing::debug!(dataset = %T::KIND, "Optional feed not present, skipping.");
        return Ok(None);
    }
    read_feed(dir).map(Some)
}

/// Parses CSV text with a header row into validated rows of `T`.
pub fn parse_feed<T: Feed, R: Read>(reader: R) -> Result<(Vec<T>, DatasetInfo), DataSourceError> {
    let csv_error = |source: csv::Error| DataSourceError::Csv {
        dataset: T::KIND,
        source,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?.clone();

    let missing: Vec<String> = T::REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataSourceError::MissingColumns {
            dataset: T::KIND,
            columns: missing,
        });
    }

    let mut info = DatasetInfo {
        columns: headers.len(),
        ..DatasetInfo::default()
    };
    let mut rows = Vec::new();

    for result in csv_reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let malformed = |reason: String| DataSourceError::MalformedRecord {
            dataset: T::KIND,
            line,
            reason,
        };

        info.missing_values += record.iter().filter(|cell| cell.is_empty()).count();

        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|e| malformed(e.to_string()))?;
        row.validate().map_err(|e| malformed(e.to_string()))?;
        rows.push(row);
    }

    info.rows = rows.len();
    Ok((rows, info))
}
