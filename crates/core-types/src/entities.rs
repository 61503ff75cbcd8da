//! Typed rows of the raw feeds.
//!
//! Column names follow the CSV headers exactly so rows deserialize by name.
//! Columns the toolkit never reads are simply ignored.

use crate::enums::OrderStatus;
use crate::error::CoreError;
use crate::timestamp;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub order_status: OrderStatus,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub order_purchase_timestamp: NaiveDateTime,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub order_approved_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub order_delivered_carrier_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub order_estimated_delivery_date: Option<NaiveDateTime>,
}

impl Order {
    /// A delivery can never precede the purchase it fulfils.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(delivered) = self.order_delivered_customer_date {
            if delivered < self.order_purchase_timestamp {
                return Err(CoreError::InvariantViolation(format!(
                    "order {} delivered at {} before its purchase at {}",
                    self.order_id, delivered, self.order_purchase_timestamp
                )));
            }
        }
        Ok(())
    }

    /// Whole days between purchase and customer delivery, if delivered.
    pub fn delivery_days(&self) -> Option<i64> {
        self.order_delivered_customer_date
            .map(|delivered| (delivered - self.order_purchase_timestamp).num_days())
    }

    /// Whether the customer received the order on or before the estimated date.
    /// The estimate is a calendar date, so the comparison is by day.
    pub fn delivered_on_time(&self) -> Option<bool> {
        match (self.order_delivered_customer_date, self.order_estimated_delivery_date) {
            (Some(delivered), Some(estimated)) => Some(delivered.date() <= estimated.date()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: String,
    pub order_item_id: u32,
    pub product_id: String,
    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub freight_value: Option<Decimal>,
}

impl OrderItem {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.price.is_sign_negative() {
            return Err(CoreError::InvalidInput("price".to_string(), self.price.to_string()));
        }
        if let Some(freight) = self.freight_value {
            if freight.is_sign_negative() {
                return Err(CoreError::InvalidInput("freight_value".to_string(), freight.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    #[serde(default)]
    pub product_category_name: Option<String>,
    #[serde(default)]
    pub product_photos_qty: Option<u32>,
    #[serde(default)]
    pub product_weight_g: Option<f64>,
    #[serde(default)]
    pub product_length_cm: Option<f64>,
    #[serde(default)]
    pub product_height_cm: Option<f64>,
    #[serde(default)]
    pub product_width_cm: Option<f64>,
}

/// Maps a raw (Portuguese) category label to its English name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTranslation {
    pub product_category_name: String,
    pub product_category_name_english: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    #[serde(default)]
    pub customer_unique_id: Option<String>,
    #[serde(default)]
    pub customer_zip_code_prefix: Option<String>,
    #[serde(default)]
    pub customer_city: Option<String>,
    #[serde(default)]
    pub customer_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: String,
    pub order_id: String,
    pub review_score: u8,
    #[serde(default)]
    pub review_comment_title: Option<String>,
    #[serde(default)]
    pub review_comment_message: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub review_creation_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub review_answer_timestamp: Option<NaiveDateTime>,
}

impl Review {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(1..=5).contains(&self.review_score) {
            return Err(CoreError::InvalidInput(
                "review_score".to_string(),
                self.review_score.to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub order_id: String,
    #[serde(default)]
    pub payment_sequential: Option<u32>,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub payment_installments: Option<u32>,
    #[serde(with = "rust_decimal::serde::str")]
    pub payment_value: Decimal,
}
