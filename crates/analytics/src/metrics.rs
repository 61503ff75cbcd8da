use crate::report::MetricGroup;
use core_types::DeliveryBucket;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

fn count(n: usize) -> Option<Decimal> {
    Some(Decimal::from(n))
}

/// Revenue of the current period and, optionally, its growth over a previous one.
///
/// Revenue is the sum of item prices. Freight is reported on its own and never
/// included in `total_revenue`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueMetrics {
    pub total_revenue: Decimal,
    pub total_freight: Decimal,
    pub total_orders: usize,
    pub total_items: usize,
    /// Zero when there are no orders.
    pub average_order_value: Decimal,
    /// Zero when there are no items.
    pub average_item_price: Decimal,
    /// Aggregated payments of the distinct orders. Orders without payments count as zero.
    pub total_payment_value: Decimal,
    pub comparison: Option<RevenueComparison>,
}

/// Growth against a previous period. A growth rate is `None` when its base is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueComparison {
    pub previous_revenue: Decimal,
    pub previous_orders: usize,
    pub previous_aov: Decimal,
    pub revenue_growth_rate: Option<Decimal>,
    pub order_growth_rate: Option<Decimal>,
    pub aov_growth_rate: Option<Decimal>,
}

impl MetricGroup for RevenueMetrics {
    fn group_name(&self) -> &'static str {
        "revenue"
    }

    fn entries(&self) -> Vec<(String, Option<Decimal>)> {
        let mut entries = vec![
            ("total_revenue".to_string(), Some(self.total_revenue)),
            ("total_freight".to_string(), Some(self.total_freight)),
            ("total_orders".to_string(), count(self.total_orders)),
            ("total_items".to_string(), count(self.total_items)),
            ("average_order_value".to_string(), Some(self.average_order_value)),
            ("average_item_price".to_string(), Some(self.average_item_price)),
            ("total_payment_value".to_string(), Some(self.total_payment_value)),
        ];
        if let Some(c) = &self.comparison {
            entries.extend([
                ("previous_revenue".to_string(), Some(c.previous_revenue)),
                ("previous_orders".to_string(), count(c.previous_orders)),
                ("previous_aov".to_string(), Some(c.previous_aov)),
                ("revenue_growth_rate".to_string(), c.revenue_growth_rate),
                ("order_growth_rate".to_string(), c.order_growth_rate),
                ("aov_growth_rate".to_string(), c.aov_growth_rate),
            ]);
        }
        entries
    }
}

/// Review-based satisfaction, one review per order.
///
/// With no reviews the three rates are `None`: zero would read as measured
/// dissatisfaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatisfactionMetrics {
    pub average_rating: Option<Decimal>,
    /// Percentage of scores >= 4.
    pub satisfaction_rate: Option<Decimal>,
    /// Percentage of 5s minus percentage of scores <= 3.
    pub nps_score: Option<Decimal>,
    pub total_reviews: usize,
    /// Count per score 1..=5, every score present.
    pub rating_distribution: BTreeMap<u8, usize>,
}

impl MetricGroup for SatisfactionMetrics {
    fn group_name(&self) -> &'static str {
        "satisfaction"
    }

    fn entries(&self) -> Vec<(String, Option<Decimal>)> {
        let mut entries = vec![
            ("average_rating".to_string(), self.average_rating),
            ("satisfaction_rate".to_string(), self.satisfaction_rate),
            ("nps_score".to_string(), self.nps_score),
            ("total_reviews".to_string(), count(self.total_reviews)),
        ];
        entries.extend(
            self.rating_distribution
                .iter()
                .map(|(score, n)| (format!("rating_{score}_count"), count(*n))),
        );
        entries
    }
}

/// Delivery performance over distinct orders.
///
/// Undelivered orders are excluded from every duration statistic (never
/// treated as zero days) and only show up in the `Unknown` bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryMetrics {
    pub total_orders: usize,
    pub delivered_orders: usize,
    pub average_delivery_days: Option<Decimal>,
    pub median_delivery_days: Option<Decimal>,
    /// Percentage of delivered orders that took at most 3 days.
    pub fast_delivery_rate: Option<Decimal>,
    /// Percentage of delivered orders that took more than 7 days.
    pub slow_delivery_rate: Option<Decimal>,
    /// Percentage delivered on or before the estimate, among orders with both dates.
    pub on_time_rate: Option<Decimal>,
    /// Every bucket is present, including `Unknown`.
    pub distribution: BTreeMap<DeliveryBucket, usize>,
}

impl MetricGroup for DeliveryMetrics {
    fn group_name(&self) -> &'static str {
        "delivery"
    }

    fn entries(&self) -> Vec<(String, Option<Decimal>)> {
        let mut entries = vec![
            ("delivered_orders".to_string(), count(self.delivered_orders)),
            ("average_delivery_days".to_string(), self.average_delivery_days),
            ("median_delivery_days".to_string(), self.median_delivery_days),
            ("fast_delivery_rate".to_string(), self.fast_delivery_rate),
            ("slow_delivery_rate".to_string(), self.slow_delivery_rate),
            ("on_time_rate".to_string(), self.on_time_rate),
        ];
        entries.extend(
            self.distribution
                .iter()
                .map(|(bucket, n)| (format!("delivery_{}_count", bucket.slug()), count(*n))),
        );
        entries
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPerformance {
    pub category: String,
    pub total_revenue: Decimal,
    pub average_price: Decimal,
    pub total_items: usize,
    pub unique_orders: usize,
    pub items_per_order: Decimal,
    /// `None` when the table's total revenue is zero.
    pub market_share: Option<Decimal>,
}

/// Revenue mix per product category, highest revenue first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductMetrics {
    pub total_revenue: Decimal,
    pub categories: Vec<CategoryPerformance>,
}

impl MetricGroup for ProductMetrics {
    fn group_name(&self) -> &'static str {
        "product"
    }

    fn entries(&self) -> Vec<(String, Option<Decimal>)> {
        self.categories
            .iter()
            .flat_map(|c| {
                let key = |field: &str| format!("category.{}.{field}", c.category);
                [
                    (key("revenue"), Some(c.total_revenue)),
                    (key("items"), count(c.total_items)),
                    (key("orders"), count(c.unique_orders)),
                    (key("market_share"), c.market_share),
                ]
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatePerformance {
    pub state: String,
    pub total_revenue: Decimal,
    pub total_orders: usize,
    pub unique_customers: usize,
    pub revenue_per_customer: Decimal,
    pub orders_per_customer: Decimal,
    /// `None` when the table's total revenue is zero.
    pub market_share: Option<Decimal>,
}

/// Revenue per customer state, highest revenue first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeographicMetrics {
    pub total_revenue: Decimal,
    pub states: Vec<StatePerformance>,
}

impl MetricGroup for GeographicMetrics {
    fn group_name(&self) -> &'static str {
        "geographic"
    }

    fn entries(&self) -> Vec<(String, Option<Decimal>)> {
        self.states
            .iter()
            .flat_map(|s| {
                let key = |field: &str| format!("state.{}.{field}", s.state);
                [
                    (key("revenue"), Some(s.total_revenue)),
                    (key("orders"), count(s.total_orders)),
                    (key("customers"), count(s.unique_customers)),
                    (key("market_share"), s.market_share),
                ]
            })
            .collect()
    }
}

/// One calendar month. Growth is relative to the preceding row and `None`
/// for the first row or a zero base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub year: i32,
    pub month: u32,
    pub revenue: Decimal,
    pub orders: usize,
    pub average_order_value: Decimal,
    pub revenue_growth: Option<Decimal>,
    pub order_growth: Option<Decimal>,
    pub aov_growth: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrends {
    pub months: Vec<MonthlyTrend>,
}

impl MetricGroup for MonthlyTrends {
    fn group_name(&self) -> &'static str {
        "monthly_trends"
    }

    fn entries(&self) -> Vec<(String, Option<Decimal>)> {
        self.months
            .iter()
            .flat_map(|m| {
                let key = |field: &str| format!("month.{}-{:02}.{field}", m.year, m.month);
                [
                    (key("revenue"), Some(m.revenue)),
                    (key("orders"), count(m.orders)),
                    (key("aov"), Some(m.average_order_value)),
                    (key("revenue_growth"), m.revenue_growth),
                ]
            })
            .collect()
    }
}

/// Ratings of the orders that fell into one delivery bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliverySatisfaction {
    pub bucket: DeliveryBucket,
    pub average_rating: Decimal,
    pub review_count: usize,
    /// Sample standard deviation; `None` with fewer than two reviews.
    pub rating_std: Option<Decimal>,
    pub satisfaction_rate: Decimal,
}

/// Only buckets that received at least one review are listed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatisfactionByDelivery {
    pub buckets: Vec<DeliverySatisfaction>,
}

impl MetricGroup for SatisfactionByDelivery {
    fn group_name(&self) -> &'static str {
        "satisfaction_by_delivery"
    }

    fn entries(&self) -> Vec<(String, Option<Decimal>)> {
        self.buckets
            .iter()
            .flat_map(|b| {
                let key = |field: &str| format!("delivery_satisfaction.{}.{field}", b.bucket.slug());
                [
                    (key("average_rating"), Some(b.average_rating)),
                    (key("review_count"), count(b.review_count)),
                    (key("rating_std"), b.rating_std),
                    (key("satisfaction_rate"), Some(b.satisfaction_rate)),
                ]
            })
            .collect()
    }
}
