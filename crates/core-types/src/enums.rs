use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an order as recorded in the orders feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OrderStatus {
    Created,
    Approved,
    Invoiced,
    Processing,
    Shipped,
    Delivered,
    Canceled,
    Unavailable,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Created,
        OrderStatus::Approved,
        OrderStatus::Invoiced,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
        OrderStatus::Unavailable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Approved => "approved",
            OrderStatus::Invoiced => "invoiced",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, exact match against the known statuses.
impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::InvalidInput("order_status".to_string(), s.to_string()))
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Categorical grouping of a delivery duration into fixed day ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeliveryBucket {
    #[serde(rename = "1-3 days")]
    UpToThreeDays,
    #[serde(rename = "4-7 days")]
    FourToSevenDays,
    #[serde(rename = "8+ days")]
    EightOrMoreDays,
    Unknown,
}

impl DeliveryBucket {
    /// Every bucket in reporting order. `Unknown` is always last.
    pub const ALL: [DeliveryBucket; 4] = [
        DeliveryBucket::UpToThreeDays,
        DeliveryBucket::FourToSevenDays,
        DeliveryBucket::EightOrMoreDays,
        DeliveryBucket::Unknown,
    ];

    /// Buckets a duration in whole days. Same-day deliveries (0) land in the fastest bucket.
    pub fn from_days(days: Option<i64>) -> Self {
        match days {
            None => DeliveryBucket::Unknown,
            Some(d) if d <= 3 => DeliveryBucket::UpToThreeDays,
            Some(d) if d <= 7 => DeliveryBucket::FourToSevenDays,
            Some(_) => DeliveryBucket::EightOrMoreDays,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryBucket::UpToThreeDays => "1-3 days",
            DeliveryBucket::FourToSevenDays => "4-7 days",
            DeliveryBucket::EightOrMoreDays => "8+ days",
            DeliveryBucket::Unknown => "Unknown",
        }
    }

    /// A key-safe form of the label, used when flattening metrics into a report.
    pub fn slug(&self) -> &'static str {
        match self {
            DeliveryBucket::UpToThreeDays => "1_3_days",
            DeliveryBucket::FourToSevenDays => "4_7_days",
            DeliveryBucket::EightOrMoreDays => "8_plus_days",
            DeliveryBucket::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeliveryBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_parses_case_insensitively() {
        assert_eq!("Delivered".parse::<OrderStatus>(), Ok(OrderStatus::Delivered));
        assert_eq!(" CANCELED ".parse::<OrderStatus>(), Ok(OrderStatus::Canceled));
        assert!("deliver".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn delivery_bucket_boundaries() {
        assert_eq!(DeliveryBucket::from_days(Some(0)), DeliveryBucket::UpToThreeDays);
        assert_eq!(DeliveryBucket::from_days(Some(3)), DeliveryBucket::UpToThreeDays);
        assert_eq!(DeliveryBucket::from_days(Some(4)), DeliveryBucket::FourToSevenDays);
        assert_eq!(DeliveryBucket::from_days(Some(7)), DeliveryBucket::FourToSevenDays);
        assert_eq!(DeliveryBucket::from_days(Some(8)), DeliveryBucket::EightOrMoreDays);
        assert_eq!(DeliveryBucket::from_days(None), DeliveryBucket::Unknown);
    }
}
