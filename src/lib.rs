//! # ecom-insights
//!
//! The application layer: runs every metric calculation over a loaded
//! snapshot and hands the results to a renderer.

pub mod render;

use analytics::{
    DeliveryMetrics, GeographicMetrics, MetricGroup, MetricsEngine, MonthlyTrends, ProductMetrics,
    ReportMergeError, RevenueMetrics, SatisfactionByDelivery, SatisfactionMetrics, SummaryReport,
};
use configuration::SalesFilter;
use loader::Datasets;
use serde::Serialize;

/// Every metric group computed for one analysis period.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    pub filter: SalesFilter,
    pub comparison: Option<SalesFilter>,
    pub revenue: RevenueMetrics,
    pub satisfaction: SatisfactionMetrics,
    pub delivery: DeliveryMetrics,
    pub products: ProductMetrics,
    pub geography: GeographicMetrics,
    pub monthly: MonthlyTrends,
    pub satisfaction_by_delivery: SatisfactionByDelivery,
}

impl AnalysisOutput {
    /// The groups in report order.
    pub fn groups(&self) -> [&dyn MetricGroup; 7] {
        [
            &self.revenue,
            &self.satisfaction,
            &self.delivery,
            &self.products,
            &self.geography,
            &self.monthly,
            &self.satisfaction_by_delivery,
        ]
    }

    pub fn summary(&self, engine: &MetricsEngine) -> Result<SummaryReport, ReportMergeError> {
        engine.generate_summary_report(&self.groups())
    }
}

/// Builds the current (and optional comparison) sales tables from the snapshot
/// and computes every metric group over them.
pub fn run_analysis(
    engine: &MetricsEngine,
    datasets: &Datasets,
    filter: &SalesFilter,
    comparison: Option<&SalesFilter>,
) -> AnalysisOutput {
    let current = datasets.create_sales_dataset(filter);
    let previous = comparison.map(|f| datasets.create_sales_dataset(f));

    tracing::info!(
        current_rows = current.len(),
        previous_rows = previous.as_ref().map(Vec::len),
        "Computing metric groups."
    );

    AnalysisOutput {
        filter: filter.clone(),
        comparison: comparison.cloned(),
        revenue: engine.calculate_revenue_metrics(&current, previous.as_deref()),
        satisfaction: engine.calculate_satisfaction_metrics(&current),
        delivery: engine.calculate_delivery_metrics(&current),
        products: engine.calculate_product_metrics(&current),
        geography: engine.calculate_geographic_metrics(&current),
        monthly: engine.calculate_monthly_trends(&current),
        satisfaction_by_delivery: engine.analyze_satisfaction_vs_delivery(&current),
    }
}
