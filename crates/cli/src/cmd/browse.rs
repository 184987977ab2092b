//! Interactive product browser
//!
//! Each stdin line replaces the search term (debounced like a search box);
//! `:n` / `:p` move between pages, `:<N>` jumps, `:q` quits.

use anyhow::Result;
use cli_lib::{system_config, util};
use owo_colors::OwoColorize;
use query::CatalogBrowser;
use sc_core::{CatalogQuery, FetchState, ProductPage};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// One line of browser input
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Search(String),
    Next,
    Prev,
    Page(u32),
    Help,
    Quit,
}

pub(crate) fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed {
        ":q" | ":quit" => Input::Quit,
        ":n" | ":next" => Input::Next,
        ":p" | ":prev" => Input::Prev,
        ":h" | ":help" | "?" => Input::Help,
        _ => match trimmed.strip_prefix(':').and_then(|n| n.parse().ok()) {
            Some(page) => Input::Page(page),
            None => Input::Search(trimmed.to_string()),
        },
    }
}

pub async fn run() -> Result<()> {
    let config = system_config::load()?;
    let catalog = config.catalog_config();
    let per_page = catalog.per_page;

    let browser = CatalogBrowser::new(super::http_transport()?, catalog);
    let mut state_rx = browser.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();

    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                if !state.loading {
                    render(&browser, per_page, &state);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // End of input: show where the last keystrokes lead
                    let state = browser.settled().await;
                    if state_rx.has_changed().unwrap_or(false) {
                        render(&browser, per_page, &state);
                    }
                    break;
                };
                match parse_input(&line) {
                    Input::Quit => break,
                    Input::Help => print_help(),
                    Input::Next => {
                        if !browser.next_page() {
                            println!("{}", "Already on the last page.".yellow());
                        }
                    }
                    Input::Prev => {
                        if !browser.prev_page() {
                            println!("{}", "Already on the first page.".yellow());
                        }
                    }
                    Input::Page(page) => {
                        if !browser.go_to_page(page) {
                            println!(
                                "{}",
                                format!("No page {} (1-{}).", page, browser.total_pages()).yellow()
                            );
                        }
                    }
                    Input::Search(term) => {
                        debug!("search input: {:?}", term);
                        browser.set_search(term);
                    }
                }
            }
        }
    }

    Ok(())
}

fn render(browser: &CatalogBrowser, per_page: u32, state: &FetchState<ProductPage>) {
    if let Some(err) = &state.error {
        eprintln!("{}", util::error_panel(&err.message()));
        return;
    }
    let Some(listing) = &state.data else {
        return;
    };
    let query = CatalogQuery::new(per_page)
        .with_search(browser.active_search())
        .with_page(browser.page());
    println!();
    super::products::print_listing(&query, listing, browser.total_pages());
}

fn print_help() {
    println!(
        "{} {}",
        "Type to search;".dimmed(),
        ":n next, :p previous, :<N> jump to page, :q quit".dimmed()
    );
}
