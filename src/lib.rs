//! Print Shop - a print-on-demand storefront core.
//!
//! Customers pick pages from their uploaded documents and print options;
//! the shop resolves the page selection, prices the job, keeps a cart and
//! turns it into campus-delivery orders.
//!
//! ```text
//! PrintRequest ──resolve──▶ PageSelectionResult ──price──▶ PriceQuote
//!                                    └──────── OrderLineBuilder ──▶ OrderLine ──▶ cart
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
