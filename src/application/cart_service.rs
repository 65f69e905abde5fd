//! Cart use cases.
//!
//! Adds priced print jobs to the cart, lists and removes them, and computes
//! the cart totals including the delivery fee.

use crate::domain::{AppConfig, CartSummary, DeliveryConfig, Money, OrderLine, Result};
use crate::infrastructure::LocalStorage;

use super::order_line::OrderLineBuilder;
use super::print_job::PrintRequest;
use super::pricing::PriceCalculator;

/// Service for managing the customer's cart.
pub struct CartService {
    config: AppConfig,
    storage: LocalStorage,
}

impl CartService {
    /// Create a new cart service with the given configuration.
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

    /// Price a request and append it to the cart.
    ///
    /// # Errors
    /// Returns error if the request is invalid, the selection is empty or
    /// out of bounds, or the write fails.
    pub fn add(&self, request: &PrintRequest) -> Result<OrderLine> {
        request.validate()?;

        let builder = OrderLineBuilder::new(PriceCalculator::new(self.config.pricing));
        let line = builder.build(
            request.config,
            request.selection(),
            request.file_count(),
            request.total_pages(),
        )?;

        self.storage.add_line(&line)?;
        Ok(line)
    }

    /// Current lines and totals.
    ///
    /// # Errors
    /// Returns error if the cart cannot be read.
    pub fn contents(&self) -> Result<(Vec<OrderLine>, CartSummary)> {
        let lines = self.storage.cart_lines()?;
        let summary = summarize_cart(&lines, &self.config.delivery);
        Ok((lines, summary))
    }

    /// Remove a line by id. Returns whether it was in the cart.
    ///
    /// # Errors
    /// Returns error if the delete fails.
    pub fn remove(&self, id: &str) -> Result<bool> {
        self.storage.remove_line(id)
    }

    /// Empty the cart. Returns the number of lines removed.
    ///
    /// # Errors
    /// Returns error if the delete fails.
    pub fn clear(&self) -> Result<usize> {
        self.storage.clear_cart()
    }
}

/// Fee for delivering an order with this subtotal.
#[must_use]
pub fn delivery_fee(subtotal: Money, delivery: &DeliveryConfig) -> Money {
    if subtotal >= delivery.free_threshold {
        Money::ZERO
    } else {
        delivery.fee
    }
}

/// Totals for a set of cart lines. An empty cart owes nothing.
#[must_use]
pub fn summarize_cart(lines: &[OrderLine], delivery: &DeliveryConfig) -> CartSummary {
    if lines.is_empty() {
        return CartSummary::default();
    }

    let subtotal: Money = lines.iter().map(|l| l.price.amount).sum();
    let fee = delivery_fee(subtotal, delivery);

    CartSummary {
        line_count: lines.len(),
        subtotal,
        delivery_fee: fee,
        total: subtotal + fee,
    }
}
