//! Product catalog records and listing queries

use crate::Pagination;
use serde::{Deserialize, Serialize};

/// Items shown per catalog page
pub const DEFAULT_PER_PAGE: u32 = 9;

/// Stock level at or below which a product is flagged as low
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A single catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Whether the product carries a discount worth showing
    pub fn is_discounted(&self) -> bool {
        self.discount_percentage > 0.0
    }

    /// Whether stock is low enough to warn about
    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }
}

/// One page of a product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Total matching products across all pages
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Search term plus position in the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Raw search term; empty lists everything
    pub search: String,
    pub pagination: Pagination,
}

impl CatalogQuery {
    /// First page, no search
    pub fn new(per_page: u32) -> Self {
        Self {
            search: String::new(),
            pagination: Pagination::new(per_page),
        }
    }

    /// Builder: set the search term
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Builder: set the page (1-based, clamped to at least 1)
    pub fn with_page(mut self, page: u32) -> Self {
        self.pagination.page = page.max(1);
        self
    }

    /// Trimmed search term, `None` when blank
    pub fn term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Items per page
    pub fn limit(&self) -> u32 {
        self.pagination.per_page
    }

    /// Offset of the first item requested
    pub fn skip(&self) -> u64 {
        self.pagination.skip()
    }
}
