use crate::error::DataSourceError;
use crate::feeds::{DatasetInfo, DatasetKind, read_feed, read_optional_feed};
use crate::sales;
use configuration::{DataSourceConfig, SalesFilter};
use core_types::{
    CategoryTranslation, Customer, Order, OrderItem, Payment, Product, Review, SalesRecord,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Immutable snapshot of every raw feed, loaded once per analysis session.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub reviews: Vec<Review>,
    pub payments: Vec<Payment>,
    pub category_translations: Vec<CategoryTranslation>,
    info: BTreeMap<DatasetKind, DatasetInfo>,
}

impl Datasets {
    /// Shape summary of every feed that was read from disk.
    pub fn get_dataset_info(&self) -> &BTreeMap<DatasetKind, DatasetInfo> {
        &self.info
    }

    /// Builds a fresh, filtered and enriched sales table.
    ///
    /// An empty result is valid. Rows are ordered by (order id, item id), so
    /// identical filters over the same snapshot always give identical output.
    pub fn create_sales_dataset(&self, filter: &SalesFilter) -> Vec<SalesRecord> {
        let records = sales::build_sales_records(self, filter);
        tracing::info!(
            year = filter.target_year(),
            month = ?filter.target_month(),
            status = ?filter.order_status(),
            rows = records.len(),
            "Created sales dataset."
        );
        records
    }
}

/// Reads the raw feeds from a source directory.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    data_dir: PathBuf,
}

impl DatasetLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_config(config: &DataSourceConfig) -> Self {
        Self::new(config.path.clone())
    }

    /// Loads every required feed plus the optional category translations.
    ///
    /// Fails on the first missing or malformed required feed; nothing partial
    /// is returned.
    pub fn load_all_datasets(&self) -> Result<Datasets, DataSourceError> {
        let dir = self.data_dir.as_path();
        let mut datasets = Datasets::default();

        let (orders, info) = read_feed::<Order>(dir)?;
        datasets.orders = orders;
        record_info(&mut datasets, DatasetKind::Orders, info);

        let (order_items, info) = read_feed::<OrderItem>(dir)?;
        datasets.order_items = order_items;
        record_info(&mut datasets, DatasetKind::OrderItems, info);

        let (products, info) = read_feed::<Product>(dir)?;
        datasets.products = products;
        record_info(&mut datasets, DatasetKind::Products, info);

        let (customers, info) = read_feed::<Customer>(dir)?;
        datasets.customers = customers;
        record_info(&mut datasets, DatasetKind::Customers, info);

        let (reviews, info) = read_feed::<Review>(dir)?;
        datasets.reviews = reviews;
        record_info(&mut datasets, DatasetKind::Reviews, info);

        let (payments, info) = read_feed::<Payment>(dir)?;
        datasets.payments = payments;
        record_info(&mut datasets, DatasetKind::Payments, info);

        if let Some((translations, info)) = read_optional_feed::<CategoryTranslation>(dir)? {
            datasets.category_translations = translations;
            record_info(&mut datasets, DatasetKind::CategoryTranslations, info);
        }

        Ok(datasets)
    }
}

fn record_info(datasets: &mut Datasets, kind: DatasetKind, info: DatasetInfo) {
    tracing::info!(
        dataset = %kind,
        rows = info.rows,
        columns = info.columns,
        "Loaded feed."
    );
    datasets.info.insert(kind, info);
}

/// Convenience: creates a loader for `data_dir` and loads everything.
pub fn load_ecommerce_data(data_dir: impl Into<PathBuf>) -> Result<Datasets, DataSourceError> {
    DatasetLoader::new(data_dir).load_all_datasets()
}
