//! One page of the product listing

use anyhow::{Context, Result};
use cli_lib::{system_config, util};
use owo_colors::OwoColorize;
use query::catalog::listing_locator;
use query::{settled, FetchHandle};
use sc_core::{CatalogQuery, Pagination, ProductPage};

pub async fn run(search: Option<String>, page: u32) -> Result<()> {
    let config = system_config::load()?;
    let catalog = config.catalog_config();

    let query = CatalogQuery::new(catalog.per_page)
        .with_search(search.unwrap_or_default())
        .with_page(page);
    let locator = listing_locator(&catalog.base_url, &query);

    let mut handle: FetchHandle<ProductPage> = FetchHandle::new(super::http_transport()?);
    let mut state_rx = handle.subscribe();

    let pb = util::spinner("Loading products...");
    handle.update(locator, ());
    let state = settled(&mut state_rx)
        .await
        .context("Product listing request was abandoned")?;
    pb.finish_and_clear();

    if let Some(err) = state.error {
        return Err(err).context("Failed to load products");
    }
    let listing = state.data.context("Product listing returned no data")?;

    let total_pages = Pagination::new(catalog.per_page).page_count(Some(listing.total));
    print_listing(&query, &listing, total_pages);

    if query.pagination.page > total_pages {
        println!(
            "{}",
            format!("Page {} is past the last page ({}).", query.pagination.page, total_pages).yellow()
        );
    }
    Ok(())
}

pub(crate) fn print_listing(query: &CatalogQuery, listing: &ProductPage, total_pages: u32) {
    print!("{}", "Products".bold());
    if let Some(term) = query.term() {
        print!("  {} \"{}\"", "search".dimmed(), term.cyan());
    }
    println!(
        "  {}",
        format!(
            "page {} of {} ({} total)",
            query.pagination.page, total_pages, listing.total
        )
        .dimmed()
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if listing.products.is_empty() {
        println!("  {}", "No products found.".dimmed());
        return;
    }
    for product in &listing.products {
        super::print_product_row(product);
    }
}
