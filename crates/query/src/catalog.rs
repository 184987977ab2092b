//! Catalog views composed from the debounce and fetch primitives

use crate::debounce::Debounced;
use crate::fetch::{FetchHandle, TeardownHandle};
use crate::transport::Transport;
use reqwest::Url;
use sc_core::catalog::DEFAULT_PER_PAGE;
use sc_core::{CatalogQuery, FetchState, Locator, Pagination, Product, ProductPage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Public product API
pub const PRODUCTS_URL: &str = "https://dummyjson.com/products";

/// Quiet period before a typed search term is sent
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Where and how the catalog is browsed
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Listing endpoint; search lives at `{base_url}/search`
    pub base_url: String,
    pub per_page: u32,
    /// Search debounce quiet period
    pub debounce: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: PRODUCTS_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            debounce: SEARCH_DEBOUNCE,
        }
    }
}

/// Locator for one listing page
///
/// `{base}/search?q=..&limit=..&skip=..` with a search term,
/// `{base}?limit=..&skip=..` without.
pub fn listing_locator(base_url: &str, query: &CatalogQuery) -> Locator {
    let base = base_url.trim_end_matches('/');
    let limit = query.limit().to_string();
    let skip = query.skip().to_string();

    let parsed = match query.term() {
        Some(term) => Url::parse_with_params(
            &format!("{base}/search"),
            &[("q", term), ("limit", limit.as_str()), ("skip", skip.as_str())],
        ),
        None => Url::parse_with_params(base, &[("limit", limit.as_str()), ("skip", skip.as_str())]),
    };

    match parsed {
        Ok(url) => Locator::new(String::from(url)),
        Err(err) => {
            // Let the transport report the bad URL through FetchState
            warn!("invalid catalog base url {}: {}", base_url, err);
            Locator::new(format!("{base}?limit={limit}&skip={skip}"))
        }
    }
}

/// Locator for a single product, or "no query" without an id
pub fn detail_locator(base_url: &str, id: Option<u64>) -> Locator {
    match id {
        Some(id) => Locator::new(format!("{}/{}", base_url.trim_end_matches('/'), id)),
        None => Locator::none(),
    }
}

/// Dependency set of a listing fetch: debounced term and offset
type ListingDeps = (String, u64);

/// Paginated, searchable product listing
///
/// Search input is debounced; page changes apply immediately. Changing
/// the search term sends the listing back to page 1.
pub struct CatalogBrowser {
    per_page: u32,
    search: Debounced<String>,
    page: watch::Sender<u32>,
    state: watch::Receiver<FetchState<ProductPage>>,
    /// (term, page) of the last listing request the driver issued
    requested: watch::Receiver<(String, u32)>,
    teardown: TeardownHandle<ProductPage>,
    driver: JoinHandle<()>,
}

impl CatalogBrowser {
    /// Mount the listing. Issues the first-page fetch right away.
    pub fn new(transport: Arc<dyn Transport>, config: CatalogConfig) -> Self {
        let search = Debounced::new(String::new(), config.debounce);
        let (page, page_rx) = watch::channel(1u32);

        let handle: FetchHandle<ProductPage, ListingDeps> = FetchHandle::new(transport);
        let state = handle.subscribe();
        let teardown = handle.teardown_handle();
        let per_page = config.per_page;
        let (requested_tx, requested) = watch::channel((String::new(), 0));
        let driver = tokio::spawn(drive_listing(
            handle,
            search.subscribe(),
            page_rx,
            requested_tx,
            config,
        ));

        Self {
            per_page,
            search,
            page,
            state,
            requested,
            teardown,
            driver,
        }
    }

    /// Replace the raw search input
    pub fn set_search(&self, term: impl Into<String>) {
        if self.search.set(term.into()) {
            self.page.send_if_modified(|page| {
                let moved = *page != 1;
                *page = 1;
                moved
            });
        }
    }

    /// Raw search input as typed
    pub fn search_input(&self) -> String {
        self.search.pending()
    }

    /// Search term the current listing was requested with
    pub fn active_search(&self) -> String {
        self.search.get()
    }

    /// Current page (1-based)
    pub fn page(&self) -> u32 {
        *self.page.borrow()
    }

    /// Pages available according to the last response, 1 before any
    pub fn total_pages(&self) -> u32 {
        let total = self.state.borrow().data.as_ref().map(|page| page.total);
        Pagination::new(self.per_page).page_count(total)
    }

    /// Jump to `page` if it lies within `1..=total_pages`
    pub fn go_to_page(&self, page: u32) -> bool {
        let mut pagination = Pagination {
            page: self.page(),
            per_page: self.per_page,
        };
        if !pagination.go_to(page, self.total_pages()) {
            debug!("page {} out of range (1..={})", page, self.total_pages());
            return false;
        }
        self.page.send_if_modified(|current| {
            let moved = *current != pagination.page;
            *current = pagination.page;
            moved
        });
        true
    }

    /// Next page, if there is one
    pub fn next_page(&self) -> bool {
        self.go_to_page(self.page().saturating_add(1))
    }

    /// Previous page, if there is one
    pub fn prev_page(&self) -> bool {
        self.go_to_page(self.page().saturating_sub(1))
    }

    /// Copy of the listing state
    pub fn state(&self) -> FetchState<ProductPage> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every listing state change
    pub fn subscribe(&self) -> watch::Receiver<FetchState<ProductPage>> {
        self.state.clone()
    }

    /// Wait until the listing reflects the current search input and page
    /// (debounce elapsed, response landed) and return that state
    pub async fn settled(&self) -> FetchState<ProductPage> {
        let mut requested = self.requested.clone();
        loop {
            let target = (self.search.pending(), self.page());
            let current = requested.borrow_and_update().clone();
            if current == target {
                let mut state = self.state.clone();
                return crate::fetch::settled(&mut state)
                    .await
                    .unwrap_or_else(|| self.state());
            }
            if requested.changed().await.is_err() {
                return self.state();
            }
        }
    }
}

impl Drop for CatalogBrowser {
    fn drop(&mut self) {
        // Retire first: the driver only drops its handle once the abort is processed
        self.teardown.retire();
        self.driver.abort();
    }
}

async fn drive_listing(
    mut handle: FetchHandle<ProductPage, ListingDeps>,
    mut term: watch::Receiver<String>,
    mut page: watch::Receiver<u32>,
    requested: watch::Sender<(String, u32)>,
    config: CatalogConfig,
) {
    loop {
        let search = term.borrow_and_update().clone();
        let current_page = *page.borrow_and_update();
        let query = CatalogQuery::new(config.per_page)
            .with_search(search.clone())
            .with_page(current_page);

        let locator = listing_locator(&config.base_url, &query);
        handle.update(locator, (search.clone(), query.skip()));
        requested.send_replace((search, current_page));

        tokio::select! {
            changed = term.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = page.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
}

/// Single-product view
pub struct ProductDetail {
    base_url: String,
    handle: FetchHandle<Product, Option<u64>>,
}

impl ProductDetail {
    /// Mount without a product selected
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            handle: FetchHandle::new(transport),
        }
    }

    /// Show product `id`, or nothing for `None`
    pub fn show(&mut self, id: Option<u64>) {
        let locator = detail_locator(&self.base_url, id);
        self.handle.update(locator, id);
    }

    /// Copy of the detail state
    pub fn state(&self) -> FetchState<Product> {
        self.handle.snapshot()
    }

    /// Receiver notified on every detail state change
    pub fn subscribe(&self) -> watch::Receiver<FetchState<Product>> {
        self.handle.subscribe()
    }
}
