use crate::error::FilterValidationError;
use core_types::{OrderStatus, SalesRecord};
use serde::Serialize;

/// Validated filter parameters for building a sales table.
///
/// Construction is the only place validation happens, so a `SalesFilter` in
/// hand is always applicable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesFilter {
    target_year: i32,
    target_month: Option<u32>,
    order_status: Option<OrderStatus>,
}

impl SalesFilter {
    /// Validates the month (1-12) and matches the status case-insensitively
    /// against the known order statuses.
    pub fn new(
        target_year: i32,
        target_month: Option<u32>,
        order_status: Option<&str>,
    ) -> Result<Self, FilterValidationError> {
        if let Some(month) = target_month {
            if !(1..=12).contains(&month) {
                return Err(FilterValidationError::MonthOutOfRange(month));
            }
        }

        let order_status = order_status
            .map(|raw| {
                raw.parse::<OrderStatus>()
                    .map_err(|_| FilterValidationError::UnknownOrderStatus(raw.to_string()))
            })
            .transpose()?;

        Ok(Self {
            target_year,
            target_month,
            order_status,
        })
    }

    /// A whole-year filter with no status restriction.
    pub fn for_year(target_year: i32) -> Self {
        Self {
            target_year,
            target_month: None,
            order_status: None,
        }
    }

    pub fn target_year(&self) -> i32 {
        self.target_year
    }

    pub fn target_month(&self) -> Option<u32> {
        self.target_month
    }

    pub fn order_status(&self) -> Option<OrderStatus> {
        self.order_status
    }

    /// The same month/status restriction applied to another year.
    pub fn with_year(&self, target_year: i32) -> Self {
        Self {
            target_year,
            ..self.clone()
        }
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        record.year == self.target_year
            && self.target_month.is_none_or(|m| record.month == m)
            && self.order_status.is_none_or(|s| record.order_status == s)
    }
}
