//! Checkout and order management.
//!
//! Turns the cart into a placed order and moves orders through their
//! status lifecycle for the shop dashboard.

use chrono::Utc;
use rand::Rng;

use crate::domain::{
    AppConfig, AppError, DeliveryDetails, Order, OrderStats, OrderStatus, Result,
};
use crate::infrastructure::LocalStorage;

use super::cart_service::summarize_cart;

/// Attempts at drawing an unused order id before giving up.
const ORDER_ID_ATTEMPTS: usize = 16;

/// Service for placing and tracking orders.
pub struct OrderService {
    config: AppConfig,
    storage: LocalStorage,
}

impl OrderService {
    /// Create a new order service with the given configuration.
    ///
    /// # Errors
    /// Returns error if local storage cannot be opened.
    pub fn new(config: AppConfig) -> Result<Self> {
        let storage = LocalStorage::open(&config.storage_db_path())?;
        Ok(Self { config, storage })
    }

    /// Create with an existing storage instance.
    #[must_use]
    pub const fn with_storage(config: AppConfig, storage: LocalStorage) -> Self {
        Self { config, storage }
    }

    /// Build delivery details, falling back to the configured location.
    ///
    /// # Errors
    /// Returns a validation error if name or mobile number is blank.
    pub fn delivery_details(
        &self,
        name: &str,
        mobile: &str,
        location: Option<&str>,
    ) -> Result<DeliveryDetails> {
        let name = name.trim();
        let mobile = mobile.trim();
        if name.is_empty() || mobile.is_empty() {
            return Err(AppError::validation(
                "Please fill in name and mobile number",
            ));
        }

        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.config.delivery.default_location);

        Ok(DeliveryDetails {
            customer_name: name.to_string(),
            mobile: mobile.to_string(),
            location: location.to_string(),
        })
    }

    /// Place an order for everything in the cart and empty it.
    ///
    /// # Errors
    /// Returns error if the cart is empty, no free order id can be found,
    /// or the store write fails.
    pub fn checkout(&self, customer: DeliveryDetails) -> Result<Order> {
        self.storage.place_order(|lines| {
            if lines.is_empty() {
                return Err(AppError::validation("Your cart is empty"));
            }

            let summary = summarize_cart(&lines, &self.config.delivery);
            Ok(Order {
                order_id: self.unused_order_id()?,
                customer,
                lines,
                subtotal: summary.subtotal,
                delivery_fee: summary.delivery_fee,
                total: summary.total,
                status: OrderStatus::Pending,
                created_at: Utc::now(),
            })
        })
    }

    /// Look up an order by id.
    ///
    /// # Errors
    /// Returns `InvalidData` if there is no such order.
    pub fn track(&self, order_id: &str) -> Result<Order> {
        self.storage
            .find_order(order_id.trim())?
            .ok_or_else(|| AppError::InvalidData {
                message: format!("Order not found: {order_id}"),
            })
    }

    /// Orders, newest first, filtered by status and by a search term
    /// matched against order id and customer name.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn orders(&self, status: Option<OrderStatus>, search: Option<&str>) -> Result<Vec<Order>> {
        let orders = self.storage.list_orders(status)?;

        match search.map(str::trim).filter(|t| !t.is_empty()) {
            Some(term) => Ok(orders.into_iter().filter(|o| o.matches_search(term)).collect()),
            None => Ok(orders),
        }
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    /// Returns error if the order does not exist or the move goes backwards.
    pub fn set_status(&self, order_id: &str, status: OrderStatus) -> Result<Order> {
        let mut order = self.track(order_id)?;

        if !order.status.can_transition_to(status) {
            return Err(AppError::validation(format!(
                "Order {} is already {}; it cannot go back to {}",
                order.order_id, order.status, status
            )));
        }
        if order.status == status {
            return Ok(order);
        }

        let previous = order.status;
        order.status = status;
        self.storage.update_order(&order)?;

        tracing::info!(
            order_id = %order.order_id,
            from = %previous,
            to = %status,
            "Order status updated"
        );

        Ok(order)
    }

    /// Dashboard totals over all orders.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn stats(&self) -> Result<OrderStats> {
        let orders = self.storage.list_orders(None)?;
        Ok(OrderStats {
            total_orders: orders.len(),
            pending: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            printing: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Printing)
                .count(),
            revenue: orders.iter().map(|o| o.total).sum(),
        })
    }

    fn unused_order_id(&self) -> Result<String> {
        for _ in 0..ORDER_ID_ATTEMPTS {
            let id = generate_order_id();
            if !self.storage.order_exists(&id)? {
                return Ok(id);
            }
            tracing::debug!(id = %id, "Order id taken, drawing again");
        }

        Err(AppError::InvalidData {
            message: "Could not allocate a free order id".to_string(),
        })
    }
}

/// `PL` followed by a random six-digit number.
#[must_use]
pub fn generate_order_id() -> String {
    let n: u32 = rand::rng().random_range(100_000..=999_999);
    format!("PL{n}")
}
