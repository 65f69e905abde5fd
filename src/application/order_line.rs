//! Order line assembly.
//!
//! Packages a resolved page selection and print options into an immutable,
//! priced [`OrderLine`] ready for the cart.

use chrono::Utc;
use rand::Rng;

use super::pricing::{PriceCalculator, Pricing};
use crate::domain::{BuildError, OrderLine, PageSelectionResult, PrintConfig};

const LINE_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const LINE_ID_LEN: usize = 9;

/// Builds order lines, pricing them with `P`.
#[derive(Debug, Clone)]
pub struct OrderLineBuilder<P = PriceCalculator> {
    pricing: P,
}

impl<P: Pricing> OrderLineBuilder<P> {
    #[must_use]
    pub const fn new(pricing: P) -> Self {
        Self { pricing }
    }

    /// Builds a priced order line.
    ///
    /// # Errors
    /// - [`BuildError::UnresolvedRangeError`] if the selection carries a range error.
    /// - [`BuildError::EmptySelection`] if no pages are selected.
    ///
    /// Neither case reaches the pricer.
    pub fn build(
        &self,
        config: PrintConfig,
        selection: PageSelectionResult,
        file_count: u32,
        total_pages: u32,
    ) -> Result<OrderLine, BuildError> {
        if let Some(err) = selection.error() {
            return Err(BuildError::UnresolvedRangeError(err));
        }
        if selection.is_empty() {
            return Err(BuildError::EmptySelection);
        }

        let price = self.pricing.quote(selection.page_count(), &config);
        let line = OrderLine {
            id: generate_line_id(),
            config,
            selection,
            file_count,
            total_pages,
            price,
            created_at: Utc::now(),
        };

        tracing::debug!(id = %line.id, amount = %line.price.amount, "Built order line");

        Ok(line)
    }
}

/// Random 9-character base-36 token.
#[must_use]
pub fn generate_line_id() -> String {
    let mut rng = rand::rng();
    (0..LINE_ID_LEN)
        .map(|_| char::from(LINE_ID_ALPHABET[rng.random_range(0..LINE_ID_ALPHABET.len())]))
        .collect()
}
