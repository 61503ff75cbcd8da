//! # Core Types
//!
//! The shared vocabulary of the toolkit: typed rows for every raw feed, the
//! denormalized `SalesRecord` produced by the loader, and the small enums both
//! the loader and the metrics engine agree on.
//!
//! This crate performs no I/O. It only knows how a row is shaped and which
//! invariants a single row must satisfy on its own.

pub mod entities;
pub mod enums;
pub mod error;
pub mod sales;
pub mod timestamp;

// Re-export the core types to provide a clean public API.
pub use entities::{CategoryTranslation, Customer, Order, OrderItem, Payment, Product, Review};
pub use enums::{DeliveryBucket, OrderStatus};
pub use error::CoreError;
pub use sales::{PaymentSummary, SalesRecord};
