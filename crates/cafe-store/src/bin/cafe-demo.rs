//! # Café Demo
//!
//! Runs one table through a full service against the seed data: seat it,
//! order, print the bill, clear it, then show the dashboard.
//!
//! ## Usage
//! ```bash
//! # Table 3 with the default config
//! cargo run -p cafe-store --bin cafe-demo
//!
//! # Another table, custom config, report as JSON
//! cargo run -p cafe-store --bin cafe-demo -- --table 7 --config ./cafe.toml --json
//! ```

use std::env;
use std::path::PathBuf;

use cafe_core::bill::BillOutcome;
use cafe_store::bill_service::with_store_context;
use cafe_store::{generate_bill, init_tracing, CafeConfig, LocalBillService, Store};
use chrono::Utc;
use tracing::info;

/// `(item_id, quantity)` ordered at the demo table.
const DEMO_ORDER: &[(&str, i64)] = &[("coffee-beans-1", 2), ("pastry-1", 1), ("tea-1", 1)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut table_id: u32 = 3;
    let mut config_path: Option<PathBuf> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--table" | "-t" => {
                if i + 1 < args.len() {
                    table_id = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Café POS Demo");
                println!();
                println!("Usage: cafe-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -t, --table <N>      Table to serve (default: 3)");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("      --json           Print the sales report as JSON");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = CafeConfig::load_or_default(config_path);
    let store = Store::from_config(&config);
    let bills = LocalBillService::from_config(&config);

    if !store.create_order(table_id).is_applied() {
        return Err(format!("Table {} cannot be seated", table_id).into());
    }

    let order_id = store
        .snapshot()
        .order_for_table(table_id)
        .map(|order| order.id.clone())
        .ok_or("order was not opened")?;
    info!(table_id, %order_id, "Table seated");

    for &(item_id, quantity) in DEMO_ORDER {
        store.add_item_to_order(&order_id, item_id);
        store.update_item_quantity(&order_id, item_id, quantity);
        store.mark_item_as_served(&order_id, item_id);
    }

    let request = with_store_context(
        store.bill_request_for_table(table_id, config.sales_tax_rate())?,
        &config,
    );
    match generate_bill(&bills, request).await {
        BillOutcome::BillDetails { bill_details } => println!("{}\n", bill_details),
        BillOutcome::Error { error } => eprintln!("Bill failed: {}", error),
    }

    store.clear_table(table_id);

    let report = store.report(Utc::now().date_naive());
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Orders:  {}", report.total_orders);
    println!("Revenue: {}", report.total_revenue.format_with(&config.store.currency_symbol));
    println!("Profit:  {}", report.total_profit.format_with(&config.store.currency_symbol));
    println!();
    println!("Top items:");
    for item in &report.top_items {
        println!("  {:<18} {:>4}", item.name, item.quantity);
    }

    let state = store.snapshot();
    let low: Vec<&str> = state.low_stock_items().map(|i| i.name.as_str()).collect();
    if !low.is_empty() {
        println!();
        println!("Low stock: {}", low.join(", "));
    }

    Ok(())
}
