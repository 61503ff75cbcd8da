use crate::error::ReportMergeError;
use crate::metrics::{
    CategoryPerformance, DeliveryMetrics, DeliverySatisfaction, GeographicMetrics, MonthlyTrend,
    MonthlyTrends, ProductMetrics, RevenueComparison, RevenueMetrics, SatisfactionByDelivery,
    SatisfactionMetrics, StatePerformance,
};
use crate::report::{MetricGroup, SummaryReport, merge_groups};
use core_types::{DeliveryBucket, SalesRecord};
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use std::collections::{BTreeMap, BTreeSet};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A stateless calculator for deriving business KPIs from a sales table.
///
/// Every method is pure: the same rows always give the same metrics, and row
/// order never matters.
#[derive(Debug, Default)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revenue, order and item totals of `current`; growth rates when `previous` is given.
    pub fn calculate_revenue_metrics(
        &self,
        current: &[SalesRecord],
        previous: Option<&[SalesRecord]>,
    ) -> RevenueMetrics {
        let totals = RevenueTotals::from_records(current);

        let comparison = previous.map(|previous| {
            let base = RevenueTotals::from_records(previous);
            RevenueComparison {
                previous_revenue: base.revenue,
                previous_orders: base.orders,
                previous_aov: base.average_order_value(),
                revenue_growth_rate: growth_rate(totals.revenue, base.revenue),
                order_growth_rate: growth_rate(
                    Decimal::from(totals.orders),
                    Decimal::from(base.orders),
                ),
                aov_growth_rate: growth_rate(
                    totals.average_order_value(),
                    base.average_order_value(),
                ),
            }
        });

        let total_payment_value: Decimal = distinct_orders(current)
            .iter()
            .filter_map(|r| r.payment.map(|p| p.total_value))
            .sum();

        RevenueMetrics {
            total_revenue: totals.revenue,
            total_freight: totals.freight,
            total_orders: totals.orders,
            total_items: totals.items,
            average_order_value: totals.average_order_value(),
            average_item_price: ratio_or_zero(totals.revenue, totals.items),
            total_payment_value,
            comparison,
        }
    }

    /// Rating statistics over the orders that have a review.
    pub fn calculate_satisfaction_metrics(&self, data: &[SalesRecord]) -> SatisfactionMetrics {
        let scores: Vec<u8> = distinct_orders(data)
            .iter()
            .filter_map(|r| r.review_score)
            .collect();

        let mut rating_distribution: BTreeMap<u8, usize> = (1..=5).map(|s| (s, 0)).collect();
        for score in &scores {
            *rating_distribution.entry(*score).or_insert(0) += 1;
        }

        let total = scores.len();
        let satisfied = scores.iter().filter(|s| **s >= 4).count();
        let promoters = scores.iter().filter(|s| **s >= 5).count();
        let detractors = scores.iter().filter(|s| **s <= 3).count();

        let nps_score = match (percentage(promoters, total), percentage(detractors, total)) {
            (Some(p), Some(d)) => Some(p - d),
            _ => None,
        };

        SatisfactionMetrics {
            average_rating: mean(scores.iter().map(|s| Decimal::from(*s))),
            satisfaction_rate: percentage(satisfied, total),
            nps_score,
            total_reviews: total,
            rating_distribution,
        }
    }

    /// Delivery duration statistics over distinct orders.
    pub fn calculate_delivery_metrics(&self, data: &[SalesRecord]) -> DeliveryMetrics {
        let orders = distinct_orders(data);

        let mut days: Vec<i64> = orders.iter().filter_map(|r| r.delivery_days).collect();
        days.sort_unstable();

        let mut distribution: BTreeMap<DeliveryBucket, usize> =
            DeliveryBucket::ALL.into_iter().map(|b| (b, 0)).collect();
        for order in &orders {
            *distribution.entry(order.delivery_bucket).or_insert(0) += 1;
        }

        let on_time: Vec<bool> = orders.iter().filter_map(|r| r.delivered_on_time).collect();

        let delivered = days.len();
        DeliveryMetrics {
            total_orders: orders.len(),
            delivered_orders: delivered,
            average_delivery_days: mean(days.iter().map(|d| Decimal::from(*d))),
            median_delivery_days: median(&days),
            fast_delivery_rate: percentage(days.iter().filter(|d| **d <= 3).count(), delivered),
            slow_delivery_rate: percentage(days.iter().filter(|d| **d > 7).count(), delivered),
            on_time_rate: percentage(on_time.iter().filter(|t| **t).count(), on_time.len()),
            distribution,
        }
    }

    /// Revenue and volume per product category with each category's share of revenue.
    pub fn calculate_product_metrics(&self, data: &[SalesRecord]) -> ProductMetrics {
        let groups = group_by(data, |r| r.category.as_str());
        let total_revenue = total_revenue(data);

        let mut categories: Vec<CategoryPerformance> = groups
            .into_iter()
            .map(|(category, group)| CategoryPerformance {
                category: category.to_string(),
                total_revenue: group.revenue,
                average_price: ratio_or_zero(group.revenue, group.items),
                total_items: group.items,
                unique_orders: group.orders.len(),
                items_per_order: ratio_or_zero(Decimal::from(group.items), group.orders.len()),
                market_share: percentage_of(group.revenue, total_revenue),
            })
            .collect();
        categories.sort_by(|a, b| {
            b.total_revenue
                .cmp(&a.total_revenue)
                .then_with(|| a.category.cmp(&b.category))
        });

        ProductMetrics {
            total_revenue,
            categories,
        }
    }

    /// Revenue, orders and customers per customer state.
    pub fn calculate_geographic_metrics(&self, data: &[SalesRecord]) -> GeographicMetrics {
        let groups = group_by(data, |r| r.customer_state.as_str());
        let total_revenue = total_revenue(data);

        let mut states: Vec<StatePerformance> = groups
            .into_iter()
            .map(|(state, group)| {
                let customers = group.customers.len();
                StatePerformance {
                    state: state.to_string(),
                    total_revenue: group.revenue,
                    total_orders: group.orders.len(),
                    unique_customers: customers,
                    revenue_per_customer: ratio_or_zero(group.revenue, customers),
                    orders_per_customer: ratio_or_zero(Decimal::from(group.orders.len()), customers),
                    market_share: percentage_of(group.revenue, total_revenue),
                }
            })
            .collect();
        states.sort_by(|a, b| {
            b.total_revenue
                .cmp(&a.total_revenue)
                .then_with(|| a.state.cmp(&b.state))
        });

        GeographicMetrics {
            total_revenue,
            states,
        }
    }

    /// Revenue, orders and AOV per calendar month with growth over the previous listed month.
    pub fn calculate_monthly_trends(&self, data: &[SalesRecord]) -> MonthlyTrends {
        let groups = group_by(data, |r| (r.year, r.month));

        let mut months: Vec<MonthlyTrend> = Vec::with_capacity(groups.len());
        for ((year, month), group) in groups {
            let orders = group.orders.len();
            let aov = ratio_or_zero(group.revenue, orders);
            let (revenue_growth, order_growth, aov_growth) = match months.last() {
                Some(prev) => (
                    growth_rate(group.revenue, prev.revenue),
                    growth_rate(Decimal::from(orders), Decimal::from(prev.orders)),
                    growth_rate(aov, prev.average_order_value),
                ),
                None => (None, None, None),
            };
            months.push(MonthlyTrend {
                year,
                month,
                revenue: group.revenue,
                orders,
                average_order_value: aov,
                revenue_growth,
                order_growth,
                aov_growth,
            });
        }

        MonthlyTrends { months }
    }

    /// How ratings vary with delivery speed.
    pub fn analyze_satisfaction_vs_delivery(&self, data: &[SalesRecord]) -> SatisfactionByDelivery {
        let mut by_bucket: BTreeMap<DeliveryBucket, Vec<u8>> = BTreeMap::new();
        for order in distinct_orders(data) {
            if let Some(score) = order.review_score {
                by_bucket.entry(order.delivery_bucket).or_default().push(score);
            }
        }

        let buckets = by_bucket
            .into_iter()
            .filter_map(|(bucket, scores)| {
                let ratings: Vec<Decimal> = scores.iter().map(|s| Decimal::from(*s)).collect();
                let average_rating = mean(ratings.iter().copied())?;
                let satisfied = scores.iter().filter(|s| **s >= 4).count();
                Some(DeliverySatisfaction {
                    bucket,
                    average_rating,
                    review_count: scores.len(),
                    rating_std: sample_std_dev(&ratings, average_rating),
                    satisfaction_rate: percentage(satisfied, scores.len())?,
                })
            })
            .collect();

        SatisfactionByDelivery { buckets }
    }

    /// Merges metric groups into one flat report. See [`crate::report::merge_groups`].
    pub fn generate_summary_report(
        &self,
        groups: &[&dyn MetricGroup],
    ) -> Result<SummaryReport, ReportMergeError> {
        let report = merge_groups(groups)?;
        tracing::debug!(
            groups = groups.len(),
            metrics = report.metrics().len(),
            "Generated summary report."
        );
        Ok(report)
    }
}

/// Period totals shared by the current and comparison sides of revenue metrics.
struct RevenueTotals {
    revenue: Decimal,
    freight: Decimal,
    orders: usize,
    items: usize,
}

impl RevenueTotals {
    fn from_records(data: &[SalesRecord]) -> Self {
        Self {
            revenue: total_revenue(data),
            freight: data.iter().map(|r| r.freight_value).sum(),
            orders: data
                .iter()
                .map(|r| r.order_id.as_str())
                .collect::<BTreeSet<_>>()
                .len(),
            items: data.len(),
        }
    }

    fn average_order_value(&self) -> Decimal {
        ratio_or_zero(self.revenue, self.orders)
    }
}

/// Accumulator for one group of rows.
#[derive(Default)]
struct GroupTotals<'a> {
    revenue: Decimal,
    items: usize,
    orders: BTreeSet<&'a str>,
    customers: BTreeSet<&'a str>,
}

fn group_by<'a, K, F>(data: &'a [SalesRecord], key: F) -> BTreeMap<K, GroupTotals<'a>>
where
    K: Ord,
    F: Fn(&'a SalesRecord) -> K,
{
    let mut groups: BTreeMap<K, GroupTotals<'a>> = BTreeMap::new();
    for record in data {
        let group = groups.entry(key(record)).or_default();
        group.revenue += record.price;
        group.items += 1;
        group.orders.insert(record.order_id.as_str());
        group.customers.insert(record.customer_id.as_str());
    }
    groups
}

/// One row per order id. All rows of an order share its order-level fields,
/// so the first one stands for the order.
fn distinct_orders(data: &[SalesRecord]) -> Vec<&SalesRecord> {
    let mut seen = BTreeMap::new();
    for record in data {
        seen.entry(record.order_id.as_str()).or_insert(record);
    }
    seen.into_values().collect()
}

fn total_revenue(data: &[SalesRecord]) -> Decimal {
    data.iter().map(|r| r.price).sum()
}

fn ratio_or_zero(numerator: Decimal, denominator: usize) -> Decimal {
    if denominator == 0 {
        return Decimal::ZERO;
    }
    numerator / Decimal::from(denominator)
}

fn percentage(part: usize, whole: usize) -> Option<Decimal> {
    if whole == 0 {
        return None;
    }
    Some(Decimal::from(part) * ONE_HUNDRED / Decimal::from(whole))
}

fn percentage_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    Some(part * ONE_HUNDRED / whole)
}

fn growth_rate(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    Some((current - previous) * ONE_HUNDRED / previous)
}

fn mean(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let (sum, n) = values.fold((Decimal::ZERO, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return None;
    }
    Some(sum / Decimal::from(n))
}

/// `sorted` must be ascending.
fn median(sorted: &[i64]) -> Option<Decimal> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Some(Decimal::from(sorted[mid]))
    } else {
        Some(Decimal::from(sorted[mid - 1] + sorted[mid]) / Decimal::TWO)
    }
}

fn sample_std_dev(values: &[Decimal], mean: Decimal) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }
    let variance = values
        .iter()
        .map(|v| (*v - mean) * (*v - mean))
        .sum::<Decimal>()
        / Decimal::from(values.len() - 1);
    variance.sqrt()
}
