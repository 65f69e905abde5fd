//! Output formatting for quotes, the cart and orders.
//!
//! Supports a human-readable table view and JSON for scripting.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;

use crate::domain::{CartSummary, Order, OrderLine, OrderStats, OrderStatus, PrintConfig, Sidedness};

use super::print_job::JobQuote;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tables and summaries for people.
    #[default]
    Table,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: table, json")),
        }
    }
}

/// Serializes any output value as pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// One-line description of print options.
fn describe_config(config: &PrintConfig) -> String {
    let color = match config.color_mode {
        crate::domain::ColorMode::BlackWhite => "Black & White",
        crate::domain::ColorMode::Color => "Color",
    };
    let sides = match config.sidedness {
        Sidedness::Single => "single-sided",
        Sidedness::Double => "double-sided",
    };
    format!(
        "{}, {color}, {sides}, {} cop{}",
        config.paper_type.label(),
        config.copies,
        if config.copies.get() == 1 { "y" } else { "ies" }
    )
}

/// Formats a job quote as a short summary.
pub fn format_quote(job: &JobQuote) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "🖨  Print Quote".bold()));
    out.push_str(&format!(
        "  Files: {} ({} pages)\n",
        job.file_count, job.total_pages
    ));
    out.push_str(&format!("  Options: {}\n", describe_config(&job.config)));

    if let Some(err) = job.selection.error() {
        out.push_str(&format!("  {} {}\n", "✗".red().bold(), err.to_string().red()));
        return out;
    }

    let pages = job.selection.page_count();
    out.push_str(&format!(
        "  Selected: {} page{}",
        pages,
        if pages == 1 { "" } else { "s" }
    ));
    if pages > 0 && pages < job.total_pages as usize {
        out.push_str(&format!(" ({})", job.selection.range_label()));
    }
    out.push('\n');

    if job.config.sidedness == Sidedness::Double && pages > 0 {
        out.push_str(&format!(
            "  Sheets: {} physical sheet{}{}\n",
            job.quote.sheets,
            if job.quote.sheets == 1 { "" } else { "s" },
            if pages % 2 == 1 { " (1 page single-sided)" } else { "" }
        ));
    }

    out.push_str(&format!(
        "  Estimated price: {}\n",
        job.quote.amount.to_string().green().bold()
    ));

    out
}

/// Formats the cart as a table followed by its totals.
pub fn format_cart(lines: &[OrderLine], summary: &CartSummary) -> String {
    if lines.is_empty() {
        return "🛒 Your cart is empty".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Pages", "Options", "Files", "Price"]);

    for line in lines {
        table.add_row(vec![
            line.id.clone(),
            format!("{} ({})", line.selection.page_count(), line.selection_label()),
            describe_config(&line.config),
            line.file_count.to_string(),
            line.price.amount.to_string(),
        ]);
    }

    let delivery = if summary.free_delivery() {
        "FREE".green().to_string()
    } else {
        summary.delivery_fee.to_string()
    };

    format!(
        "{table}\n  Subtotal: {}\n  Delivery: {}\n  {} {}",
        summary.subtotal,
        delivery,
        "Total:".bold(),
        summary.total.to_string().bold()
    )
}

fn status_colored(status: OrderStatus) -> String {
    let label = status.to_string();
    match status {
        OrderStatus::Pending => label.yellow().to_string(),
        OrderStatus::Printing => label.blue().to_string(),
        OrderStatus::Shipped => label.cyan().to_string(),
        OrderStatus::Delivered => label.green().to_string(),
    }
}

/// Formats one order with its progress through the status steps.
pub fn format_order(order: &Order) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}  [{}]\n",
        "📦 Order".bold(),
        order.order_id.bold(),
        status_colored(order.status)
    ));
    out.push_str(&format!(
        "  Placed: {}\n",
        order.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!(
        "  Customer: {} ({})\n  Deliver to: {}\n",
        order.customer.customer_name, order.customer.mobile, order.customer.location
    ));

    let progress: Vec<String> = OrderStatus::ALL
        .iter()
        .map(|&step| {
            if step <= order.status {
                format!("✓ {step}").green().to_string()
            } else {
                format!("· {step}").dimmed().to_string()
            }
        })
        .collect();
    out.push_str(&format!("  Progress: {}\n", progress.join(" → ")));

    for line in &order.lines {
        out.push_str(&format!(
            "  - {} pages ({}), {}: {}\n",
            line.selection.page_count(),
            line.selection_label(),
            describe_config(&line.config),
            line.price.amount
        ));
    }

    out.push_str(&format!(
        "  Subtotal: {}  Delivery: {}  Total: {}",
        order.subtotal,
        order.delivery_fee,
        order.total.to_string().bold()
    ));

    out
}

/// Formats a table listing of orders.
pub fn format_orders_table(orders: &[Order]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Order", "Placed", "Customer", "Pages", "Status", "Total"]);

    for order in orders {
        table.add_row(vec![
            order.order_id.clone(),
            order.created_at.format("%Y-%m-%d %H:%M").to_string(),
            truncate(&order.customer.customer_name, 24),
            order.page_count().to_string(),
            order.status.to_string(),
            order.total.to_string(),
        ]);
    }

    table.to_string()
}

/// Formats dashboard statistics for display.
pub fn format_stats(stats: &OrderStats) -> String {
    format!(
        "{}\n  Orders: {}\n  Pending: {}\n  Printing: {}\n  Revenue: {}",
        "📊 Statistics".bold(),
        stats.total_orders.to_string().cyan(),
        stats.pending.to_string().yellow(),
        stats.printing.to_string().blue(),
        stats.revenue.to_string().green()
    )
}

/// Truncates a string to max length with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use crate::application::{quote_job, PriceCalculator, PrintRequest};
    use crate::domain::{PageSelectionMode, PaperType};

    fn job(range: &str, sides: Sidedness) -> JobQuote {
        colored::control::set_override(false);
        let request = PrintRequest {
            page_counts: vec![10],
            mode: PageSelectionMode::Custom,
            range: range.to_string(),
            config: PrintConfig {
                paper_type: PaperType::Premium,
                sidedness: sides,
                copies: NonZeroU32::new(2).unwrap(),
                ..PrintConfig::default()
            },
        };
        quote_job(&request, &PriceCalculator::default()).unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world!", 8), "hello...");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("table".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_describe_config() {
        let config = PrintConfig {
            paper_type: PaperType::Glossy,
            ..PrintConfig::default()
        };
        assert_eq!(
            describe_config(&config),
            "Glossy (120 GSM), Black & White, single-sided, 1 copy"
        );
    }

    #[test]
    fn test_quote_mentions_sheets_for_odd_double_sided_jobs() {
        let out = format_quote(&job("1-3", Sidedness::Double));
        assert!(out.contains("Selected: 3 pages (1-3)"));
        assert!(out.contains("2 physical sheets (1 page single-sided)"));
    }

    #[test]
    fn test_quote_shows_range_error() {
        let out = format_quote(&job("4-12", Sidedness::Single));
        assert!(out.contains("Page 12 exceeds the total page count (10)"));
        assert!(!out.contains("Estimated price"));
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(
            format_cart(&[], &CartSummary::default()),
            "🛒 Your cart is empty"
        );
    }
}
