use crate::enums::{DeliveryBucket, OrderStatus};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payments of one order, collapsed across installments and payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub total_value: Decimal,
    pub max_installments: u32,
    pub payment_count: u32,
}

/// One row per order item, joined with its order and left-joined with the
/// product, customer, chosen review and aggregated payment of that order.
///
/// Fields that come from a left join are `Option`s: a missing product,
/// customer, review or payment never drops the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    // I. Item
    pub order_id: String,
    pub order_item_id: u32,
    pub product_id: String,
    pub seller_id: Option<String>,
    pub price: Decimal,
    pub freight_value: Decimal,

    // II. Order
    pub order_status: OrderStatus,
    pub customer_id: String,
    pub purchased_at: NaiveDateTime,
    pub delivered_at: Option<NaiveDateTime>,
    pub estimated_delivery_at: Option<NaiveDateTime>,
    pub year: i32,
    pub month: u32,

    // III. Product
    pub raw_category: Option<String>,
    pub category: String,

    // IV. Customer
    pub customer_unique_id: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: String,

    // V. Review and payment
    pub review_score: Option<u8>,
    pub payment: Option<PaymentSummary>,

    // VI. Delivery enrichment
    pub delivery_days: Option<i64>,
    pub delivery_bucket: DeliveryBucket,
    pub delivered_on_time: Option<bool>,
}

impl SalesRecord {
    /// Label used for items whose product has no category.
    pub const UNCATEGORIZED: &'static str = "uncategorized";
    /// Label used for items whose customer (or customer state) is unknown.
    pub const UNKNOWN_STATE: &'static str = "unknown";
}
