//! Denormalization of the raw feeds into `SalesRecord`s.

use crate::datasets::Datasets;
use chrono::Datelike;
use configuration::SalesFilter;
use core_types::{
    CategoryTranslation, Customer, DeliveryBucket, Order, Payment, PaymentSummary, Product,
    Review, SalesRecord,
};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;

pub(crate) fn build_sales_records(datasets: &Datasets, filter: &SalesFilter) -> Vec<SalesRecord> {
    let orders = index_orders(&datasets.orders);
    let products: HashMap<&str, &Product> = datasets
        .products
        .iter()
        .map(|p| (p.product_id.as_str(), p))
        .collect();
    let customers: HashMap<&str, &Customer> = datasets
        .customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c))
        .collect();
    let translations = index_translations(&datasets.category_translations);
    let reviews = latest_review_per_order(&datasets.reviews);
    let payments = summarize_payments(&datasets.payments);

    let mut records: Vec<SalesRecord> = datasets
        .order_items
        .iter()
        .filter_map(|item| {
            // Without its order an item has no purchase date and can never pass the year filter.
            let Some(order) = orders.get(item.order_id.as_str()) else {
                tracing::debug!(order_id = %item.order_id, "Dropping item with unknown order.");
                return None;
            };

            let purchased_at = order.order_purchase_timestamp;
            let year = purchased_at.year();
            let month = purchased_at.month();
            let delivery_days = order.delivery_days();

            let product = products.get(item.product_id.as_str());
            let raw_category = product.and_then(|p| p.product_category_name.clone());
            let category = normalize_category(raw_category.as_deref(), &translations);

            let customer = customers.get(order.customer_id.as_str());

            Some(SalesRecord {
                order_id: item.order_id.clone(),
                order_item_id: item.order_item_id,
                product_id: item.product_id.clone(),
                seller_id: item.seller_id.clone(),
                price: item.price,
                freight_value: item.freight_value.unwrap_or(Decimal::ZERO),
                order_status: order.order_status,
                customer_id: order.customer_id.clone(),
                purchased_at,
                delivered_at: order.order_delivered_customer_date,
                estimated_delivery_at: order.order_estimated_delivery_date,
                year,
                month,
                raw_category,
                category,
                customer_unique_id: customer.and_then(|c| c.customer_unique_id.clone()),
                customer_city: customer.and_then(|c| c.customer_city.clone()),
                customer_state: customer
                    .and_then(|c| c.customer_state.clone())
                    .unwrap_or_else(|| SalesRecord::UNKNOWN_STATE.to_string()),
                review_score: reviews.get(item.order_id.as_str()).map(|r| r.review_score),
                payment: payments.get(item.order_id.as_str()).copied(),
                delivery_days,
                delivery_bucket: DeliveryBucket::from_days(delivery_days),
                delivered_on_time: order.delivered_on_time(),
            })
        })
        .filter(|record| filter.matches(record))
        .collect();

    records.sort_by(|a, b| {
        a.order_id
            .cmp(&b.order_id)
            .then(a.order_item_id.cmp(&b.order_item_id))
    });
    records
}

/// First occurrence wins when an order id is repeated.
fn index_orders(orders: &[Order]) -> HashMap<&str, &Order> {
    let mut index = HashMap::with_capacity(orders.len());
    for order in orders {
        if index.contains_key(order.order_id.as_str()) {
            tracing::warn!(order_id = %order.order_id, "Duplicate order id in orders feed, keeping the first.");
            continue;
        }
        index.insert(order.order_id.as_str(), order);
    }
    index
}

fn index_translations(translations: &[CategoryTranslation]) -> HashMap<&str, &str> {
    translations
        .iter()
        .map(|t| {
            (
                t.product_category_name.as_str(),
                t.product_category_name_english.as_str(),
            )
        })
        .collect()
}

/// Translated label when known, otherwise the raw label trimmed, lower-cased
/// and with spaces replaced by underscores.
pub(crate) fn normalize_category(raw: Option<&str>, translations: &HashMap<&str, &str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return SalesRecord::UNCATEGORIZED.to_string();
    };
    let label = translations.get(raw).copied().unwrap_or(raw);
    label.trim().to_lowercase().replace(' ', "_")
}

/// Picks one review per order: latest answer, then latest creation, then
/// greatest review id. Independent of the feed's row order.
pub(crate) fn latest_review_per_order(reviews: &[Review]) -> HashMap<&str, &Review> {
    let mut chosen: HashMap<&str, &Review> = HashMap::new();
    for review in reviews {
        chosen
            .entry(review.order_id.as_str())
            .and_modify(|current| {
                if review_precedence(review, *current) == Ordering::Greater {
                    *current = review;
                }
            })
            .or_insert(review);
    }
    chosen
}

fn review_precedence(a: &Review, b: &Review) -> Ordering {
    a.review_answer_timestamp
        .cmp(&b.review_answer_timestamp)
        .then(a.review_creation_date.cmp(&b.review_creation_date))
        .then(a.review_id.cmp(&b.review_id))
}

/// Sums payment values, keeps the largest installment count.
pub(crate) fn summarize_payments(payments: &[Payment]) -> HashMap<&str, PaymentSummary> {
    let mut summaries: HashMap<&str, PaymentSummary> = HashMap::new();
    for payment in payments {
        let summary = summaries
            .entry(payment.order_id.as_str())
            .or_insert(PaymentSummary {
                total_value: Decimal::ZERO,
                max_installments: 0,
                payment_count: 0,
            });
        summary.total_value += payment.payment_value;
        summary.max_installments = summary
            .max_installments
            .max(payment.payment_installments.unwrap_or(0));
        summary.payment_count += 1;
    }
    summaries
}
