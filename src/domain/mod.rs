//! Domain layer - core print-job types and errors.
//!
//! This layer contains pure value objects and error types
//! without any I/O (DB, filesystem, terminal).

pub mod error;
pub mod models;
pub mod money;
pub mod order;
pub mod settings;

pub use error::{AppError, BuildError, RangeError, Result};
pub use models::{
    ColorMode, OrderLine, PageRangeToken, PageSelectionMode, PageSelectionResult, PaperType,
    PriceQuote, PrintConfig, Sidedness,
};
pub use money::Money;
pub use order::{CartSummary, DeliveryDetails, Order, OrderStats, OrderStatus};
pub use settings::{AppConfig, DeliveryConfig, PathConfig, RateCard};
