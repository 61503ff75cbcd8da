//! # Metrics Engine
//!
//! This crate computes the business KPIs of an e-commerce sales table. It is
//! the reporting side of the toolkit and knows nothing about where the rows
//! came from.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** depends only on `core-types`. No I/O, no hidden state.
//! - **Stateless Calculation:** `MetricsEngine` takes `SalesRecord`s and returns
//!   one plain struct per KPI group. Degenerate input (no orders, no reviews,
//!   nothing delivered) yields explicit zeros or `None`s, never an error.
//!
//! ## Public API
//!
//! - `MetricsEngine`: revenue, satisfaction, delivery, product, geographic and
//!   monthly calculations.
//! - `MetricGroup` / `SummaryReport`: flattening and merging of groups for reporting.
//! - `ReportMergeError`: two groups produced the same key.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod metrics;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::MetricsEngine;
pub use error::ReportMergeError;
pub use metrics::{
    CategoryPerformance, DeliveryMetrics, DeliverySatisfaction, GeographicMetrics, MonthlyTrend,
    MonthlyTrends, ProductMetrics, RevenueComparison, RevenueMetrics, SatisfactionByDelivery,
    SatisfactionMetrics, StatePerformance,
};
pub use report::{MetricGroup, SummaryReport, format_fixed};
