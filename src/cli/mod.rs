//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::{OutputFormat, PrintRequest};
use crate::domain::{ColorMode, OrderStatus, PageSelectionMode, PaperType, PrintConfig, Sidedness};

/// Print Shop - price print jobs, manage the cart and track campus-delivery orders.
///
/// Example: print-shop quote --pages 12 --range 1-5,8 --color color --sides double
#[derive(Parser, Debug)]
#[command(name = "print-shop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format: table or json.
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Configuration file (defaults to ~/.print-shop/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Print options shared by `quote` and `add`.
#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    /// Page count of an uploaded file (repeat once per file).
    #[arg(short, long = "pages", required = true)]
    pub pages: Vec<u32>,

    /// Custom page range, e.g. "1-5,8,11-13" (all pages if omitted).
    #[arg(short, long)]
    pub range: Option<String>,

    /// Paper type: standard, premium, glossy.
    #[arg(long, default_value = "standard")]
    pub paper: PaperType,

    /// Print type: bw, color.
    #[arg(long, default_value = "bw")]
    pub color: ColorMode,

    /// Printing side: single, double.
    #[arg(long, default_value = "single")]
    pub sides: Sidedness,

    /// Number of copies.
    #[arg(short, long, default_value = "1")]
    pub copies: NonZeroU32,
}

impl JobArgs {
    /// Convert the parsed flags into a print request.
    #[must_use]
    pub fn to_request(&self) -> PrintRequest {
        let (mode, range) = match &self.range {
            Some(range) => (PageSelectionMode::Custom, range.clone()),
            None => (PageSelectionMode::All, String::new()),
        };

        PrintRequest {
            page_counts: self.pages.clone(),
            mode,
            range,
            config: PrintConfig {
                paper_type: self.paper,
                color_mode: self.color,
                sidedness: self.sides,
                copies: self.copies,
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a print job without adding it to the cart.
    Quote(JobArgs),

    /// Price a print job and add it to the cart.
    Add(JobArgs),

    /// Show the cart with subtotal, delivery fee and total.
    Cart,

    /// Remove a line from the cart.
    Remove {
        /// Cart line ID.
        id: String,
    },

    /// Empty the cart.
    Clear,

    /// Place an order for everything in the cart.
    Checkout {
        /// Full name of the recipient.
        #[arg(short, long)]
        name: String,

        /// Mobile number.
        #[arg(short, long)]
        mobile: String,

        /// Delivery location (configured default if omitted).
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Show one order and its progress.
    Track {
        /// Order ID, e.g. PL123456.
        order_id: String,
    },

    /// List placed orders.
    Orders {
        /// Only orders with this status.
        #[arg(short, long)]
        status: Option<OrderStatus>,

        /// Only orders whose ID or customer name contains this text.
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Move an order to a new status (pending, printing, shipped, delivered).
    SetStatus {
        /// Order ID.
        order_id: String,

        /// New status.
        status: OrderStatus,
    },

    /// Show order statistics.
    Stats,

    /// Show the effective configuration.
    Config {
        /// Write the default configuration file if it does not exist.
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_args_parse() {
        let cli = Cli::try_parse_from([
            "print-shop", "quote", "-p", "10", "-p", "4", "--range", "1-5,8", "--paper",
            "glossy", "--color", "color", "--sides", "double", "-c", "3",
        ])
        .unwrap();

        let Commands::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        let request = args.to_request();
        assert_eq!(request.page_counts, vec![10, 4]);
        assert_eq!(request.mode, PageSelectionMode::Custom);
        assert_eq!(request.range, "1-5,8");
        assert_eq!(request.config.paper_type, PaperType::Glossy);
        assert_eq!(request.config.copies.get(), 3);
    }

    #[test]
    fn test_no_range_means_all_pages() {
        let cli = Cli::try_parse_from(["print-shop", "add", "--pages", "6"]).unwrap();
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.to_request().mode, PageSelectionMode::All);
    }

    #[test]
    fn test_zero_copies_rejected_at_boundary() {
        assert!(Cli::try_parse_from(["print-shop", "quote", "-p", "3", "-c", "0"]).is_err());
        assert!(Cli::try_parse_from(["print-shop", "quote", "-p", "3", "--paper", "matte"]).is_err());
    }

    #[test]
    fn test_orders_filters() {
        let cli = Cli::try_parse_from(["print-shop", "orders", "-s", "printing", "-q", "asha"])
            .unwrap();
        let Commands::Orders { status, search } = cli.command else {
            panic!("expected orders");
        };
        assert_eq!(status, Some(OrderStatus::Printing));
        assert_eq!(search.as_deref(), Some("asha"));
    }

    #[test]
    fn test_status_arguments() {
        let cli = Cli::try_parse_from(["print-shop", "set-status", "PL123456", "shipped"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::SetStatus {
                status: OrderStatus::Shipped,
                ..
            }
        ));
    }
}
