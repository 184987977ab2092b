//! CLI command implementations

pub mod auth;
pub mod browse;
pub mod config;
pub mod lead;
pub mod leads;
pub mod product;
pub mod products;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use query::{HttpTransport, Transport};
use sc_core::Product;
use std::sync::Arc;

/// HTTP transport shared by the catalog commands
pub(crate) fn http_transport() -> Result<Arc<dyn Transport>> {
    let transport = HttpTransport::new().context("Failed to create HTTP client")?;
    Ok(Arc::new(transport))
}

/// One listing line: id, title, price, rating, discount, stock
pub(crate) fn print_product_row(product: &Product) {
    let discount = if product.is_discounted() {
        format!("-{:.0}%", product.discount_percentage)
    } else {
        String::new()
    };
    let stock = format!("{} in stock", product.stock);
    println!(
        "  {:>4}  {:<32} {:>10}  {} {:<5} {:>5}  {}",
        format!("#{}", product.id).dimmed(),
        cli_lib::util::truncate(&product.title, 32),
        cli_lib::util::format_price(product.price).green(),
        "★".yellow(),
        format!("{:.2}", product.rating),
        discount.red(),
        if product.is_low_stock() {
            stock.red().to_string()
        } else {
            stock.dimmed().to_string()
        }
    );
}
