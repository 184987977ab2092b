//! Product detail view

use anyhow::{Context, Result};
use cli_lib::{system_config, util};
use owo_colors::OwoColorize;
use query::{settled, ProductDetail};
use sc_core::Product;

pub async fn run(id: u64) -> Result<()> {
    let config = system_config::load()?;
    let catalog = config.catalog_config();

    let mut detail = ProductDetail::new(super::http_transport()?, catalog.base_url);
    let mut state_rx = detail.subscribe();

    let pb = util::spinner("Loading product...");
    detail.show(Some(id));
    let state = settled(&mut state_rx)
        .await
        .context("Product request was abandoned")?;
    pb.finish_and_clear();

    if let Some(err) = state.error {
        return Err(err).with_context(|| format!("Failed to load product #{}", id));
    }
    let product = state.data.context("Product not found")?;
    print_product(&product);
    Ok(())
}

fn print_product(product: &Product) {
    println!("{}", product.title.bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if !product.description.is_empty() {
        println!("{}", product.description);
        println!();
    }

    println!("Price:      {}", util::format_price(product.price).green().bold());
    if product.is_discounted() {
        println!(
            "Discount:   {}",
            format!("{}% OFF", product.discount_percentage).red()
        );
    }
    if let Some(brand) = &product.brand {
        println!("Brand:      {}", brand);
    }
    println!("Category:   {}", product.category.cyan());
    println!("Rating:     {} {} / 5", "★".yellow(), product.rating);

    let stock = format!("{} in stock", product.stock);
    if product.is_low_stock() {
        println!("Stock:      {}", stock.red());
    } else {
        println!("Stock:      {}", stock.green());
    }

    if !product.thumbnail.is_empty() {
        println!();
        println!("{} {}", "Thumbnail:".dimmed(), product.thumbnail.dimmed());
    }
    for (index, image) in product.images.iter().take(4).enumerate() {
        println!("{} {}", format!("Image {}:", index + 1).dimmed(), image.dimmed());
    }
}
