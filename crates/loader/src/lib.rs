//! # Dataset Loader
//!
//! Reads the raw e-commerce feeds into typed tables and turns them into the
//! denormalized sales view the metrics engine consumes.
//!
//! ## Public API
//!
//! - `DatasetLoader`: reads every feed from a source directory.
//! - `Datasets`: the immutable loaded snapshot; `create_sales_dataset` joins,
//!   enriches and filters it into `SalesRecord`s.
//! - `DataSourceError`: missing, unreadable or malformed feeds.

pub mod datasets;
pub mod error;
pub mod feeds;
mod sales;

pub use datasets::{DatasetLoader, Datasets, load_ecommerce_data};
pub use error::DataSourceError;
pub use feeds::{DatasetInfo, DatasetKind};
