//! Cart and order models.
//!
//! The cart is a list of [`OrderLine`]s; checkout turns it into an [`Order`]
//! that the shop then moves through the [`OrderStatus`] lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::OrderLine;
use super::money::Money;

/// Lifecycle of a placed order. Variants are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Printing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Printing, Self::Shipped, Self::Delivered];

    /// Whether an order may move from `self` to `next`.
    ///
    /// Orders only move forward; staying put is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        next >= self
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Printing => write!(f, "Printing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "printing" | "processing" => Ok(Self::Printing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!(
                "Unknown order status: {s}. Use: pending, printing, shipped, delivered"
            )),
        }
    }
}

/// Who receives the order and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub customer_name: String,
    pub mobile: String,
    pub location: String,
}

/// Totals shown for the current cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub line_count: usize,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl CartSummary {
    #[must_use]
    pub const fn free_delivery(&self) -> bool {
        self.line_count > 0 && self.delivery_fee.is_zero()
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// `PL` followed by six digits.
    pub order_id: String,
    pub customer: DeliveryDetails,
    pub lines: Vec<OrderLine>,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Selected pages across all lines (one copy each).
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.lines.iter().map(|l| l.selection.page_count()).sum()
    }

    /// Case-insensitive substring match on the order id or customer name.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.order_id.to_lowercase().contains(&term)
            || self.customer.customer_name.to_lowercase().contains(&term)
    }
}

/// Aggregates for the shop dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub pending: usize,
    pub printing: usize,
    pub revenue: Money,
}
