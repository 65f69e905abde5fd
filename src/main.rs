//! Print Shop - price print jobs and manage campus-delivery orders.
//!
//! Quick start:
//!   print-shop quote --pages 12 --range 1-5,8       # Price a job
//!   print-shop add --pages 12 --sides double -c 2   # Add it to the cart
//!   print-shop cart                                 # Review the cart
//!   print-shop checkout -n "Asha" -m 9876543210     # Place the order
//!   print-shop track PL123456                       # Follow its progress

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use print_shop::application::{
    format_cart, format_json, format_order, format_orders_table, format_quote, format_stats,
    quote_job, CartService, OrderService, OutputFormat, PriceCalculator,
};
use print_shop::cli::{Cli, Commands, JobArgs};
use print_shop::domain::{self, AppConfig, AppError, OrderStatus};
use print_shop::infrastructure::{config_file_path, ensure_config_exists, load_config, render_config};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let format = cli
        .output_format()
        .map_err(|e| AppError::Config { message: e })?;

    let config_path = cli.config.clone().unwrap_or_else(config_file_path);
    let config = load_config(Some(config_path.as_path()))?;

    match cli.command {
        Commands::Quote(args) => cmd_quote(&config, &args, format)?,
        Commands::Add(args) => cmd_add(config, &args, format)?,
        Commands::Cart => cmd_cart(config, format)?,
        Commands::Remove { id } => cmd_remove(config, &id)?,
        Commands::Clear => cmd_clear(config)?,
        Commands::Checkout {
            name,
            mobile,
            location,
        } => cmd_checkout(config, &name, &mobile, location.as_deref(), format)?,
        Commands::Track { order_id } => cmd_track(config, &order_id, format)?,
        Commands::Orders { status, search } => {
            cmd_orders(config, status, search.as_deref(), format)?;
        }
        Commands::SetStatus { order_id, status } => {
            cmd_set_status(config, &order_id, status, format)?;
        }
        Commands::Stats => cmd_stats(config, format)?,
        Commands::Config { init } => cmd_config(&config, &config_path, init)?,
    }

    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> domain::Result<()> {
    println!("{}", format_json(value).map_err(AppError::json_parse)?);
    Ok(())
}

/// Quote a job without touching the cart.
fn cmd_quote(config: &AppConfig, args: &JobArgs, format: OutputFormat) -> domain::Result<()> {
    let job = quote_job(&args.to_request(), &PriceCalculator::new(config.pricing))?;

    match format {
        OutputFormat::Json => print_json(&job),
        OutputFormat::Table => {
            println!("{}", format_quote(&job));
            Ok(())
        }
    }
}

/// Add a job to the cart.
fn cmd_add(config: AppConfig, args: &JobArgs, format: OutputFormat) -> domain::Result<()> {
    let cart = CartService::new(config)?;
    let line = cart.add(&args.to_request())?;

    if format == OutputFormat::Json {
        return print_json(&line);
    }

    let (lines, _) = cart.contents()?;
    println!(
        "{} Added {} pages for {} to the cart ({} item{})",
        "✓".green().bold(),
        line.selection.page_count(),
        line.price.amount.to_string().cyan(),
        lines.len(),
        if lines.len() == 1 { "" } else { "s" }
    );
    println!("  Line ID: {}", line.id);

    Ok(())
}

/// Show cart contents and totals.
fn cmd_cart(config: AppConfig, format: OutputFormat) -> domain::Result<()> {
    let cart = CartService::new(config)?;
    let (lines, summary) = cart.contents()?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "lines": lines,
            "summary": summary,
        })),
        OutputFormat::Table => {
            println!("{}", format_cart(&lines, &summary));
            Ok(())
        }
    }
}

fn cmd_remove(config: AppConfig, id: &str) -> domain::Result<()> {
    let cart = CartService::new(config)?;

    if !cart.remove(id)? {
        return Err(AppError::InvalidData {
            message: format!("Cart line not found: {id}"),
        });
    }

    println!("{} Removed {} from the cart", "✓".green().bold(), id);
    Ok(())
}

fn cmd_clear(config: AppConfig) -> domain::Result<()> {
    let removed = CartService::new(config)?.clear()?;
    println!("{} Removed {} item(s) from the cart", "✓".green().bold(), removed);
    Ok(())
}

/// Place an order for the whole cart.
fn cmd_checkout(
    config: AppConfig,
    name: &str,
    mobile: &str,
    location: Option<&str>,
    format: OutputFormat,
) -> domain::Result<()> {
    let orders = OrderService::new(config)?;
    let customer = orders.delivery_details(name, mobile, location)?;
    let order = orders.checkout(customer)?;

    match format {
        OutputFormat::Json => print_json(&order),
        OutputFormat::Table => {
            println!("{} Order placed!\n", "✓".green().bold());
            println!("{}", format_order(&order));
            println!();
            println!("💡 Track it with: print-shop track {}", order.order_id);
            Ok(())
        }
    }
}

fn cmd_track(config: AppConfig, order_id: &str, format: OutputFormat) -> domain::Result<()> {
    let order = OrderService::new(config)?.track(order_id)?;

    match format {
        OutputFormat::Json => print_json(&order),
        OutputFormat::Table => {
            println!("{}", format_order(&order));
            Ok(())
        }
    }
}

fn cmd_orders(
    config: AppConfig,
    status: Option<OrderStatus>,
    search: Option<&str>,
    format: OutputFormat,
) -> domain::Result<()> {
    let orders = OrderService::new(config)?.orders(status, search)?;

    match format {
        OutputFormat::Json => print_json(&orders),
        OutputFormat::Table => {
            println!("{}", format_orders_table(&orders));
            println!("Total: {} order(s)", orders.len());
            Ok(())
        }
    }
}

fn cmd_set_status(
    config: AppConfig,
    order_id: &str,
    status: OrderStatus,
    format: OutputFormat,
) -> domain::Result<()> {
    let order = OrderService::new(config)?.set_status(order_id, status)?;

    match format {
        OutputFormat::Json => print_json(&order),
        OutputFormat::Table => {
            println!(
                "{} Order {} is now {}",
                "✓".green().bold(),
                order.order_id,
                order.status
            );
            Ok(())
        }
    }
}

fn cmd_stats(config: AppConfig, format: OutputFormat) -> domain::Result<()> {
    let stats = OrderService::new(config)?.stats()?;

    match format {
        OutputFormat::Json => print_json(&stats),
        OutputFormat::Table => {
            println!("{}", format_stats(&stats));
            Ok(())
        }
    }
}

/// Show (and optionally create) the configuration file.
fn cmd_config(config: &AppConfig, path: &std::path::Path, init: bool) -> domain::Result<()> {
    if init && ensure_config_exists(path)? {
        println!("{} Wrote default configuration", "✓".green().bold());
    }

    println!("{} {}", "📄 Config file:".bold(), path.display());
    println!("{} {}", "📂 Data dir:".bold(), config.data_dir().display());
    println!();
    println!("{}", render_config(config)?);

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
