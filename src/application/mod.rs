//! Application layer - use cases and orchestration.
//!
//! This layer holds the print-job logic (page selection, pricing, order
//! lines) and the cart and order services built on top of it.

pub mod cart_service;
pub mod formatter;
pub mod order_line;
pub mod order_service;
pub mod page_range;
pub mod pricing;
pub mod print_job;

pub use cart_service::{delivery_fee, summarize_cart, CartService};
pub use formatter::{
    format_cart, format_json, format_order, format_orders_table, format_quote, format_stats,
    OutputFormat,
};
pub use order_line::{generate_line_id, OrderLineBuilder};
pub use order_service::{generate_order_id, OrderService};
pub use page_range::{resolve, tokenize};
pub use pricing::{price, sheets_needed, PriceCalculator, Pricing};
pub use print_job::{quote_job, JobQuote, PrintRequest};
