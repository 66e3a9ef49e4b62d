use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;
use scrapeplan_core::types::{MARKETPLACE_CATEGORY_CAP, MARKETPLACE_PRODUCT_CAP};
use scrapeplan_core::{CategoryMappingStore, PlatformTarget, TargetKind};

use super::tables::{
    entries, GENERAL_MARKETPLACE_CATEGORIES, MARKETPLACE_CATEGORIES_BY_CATEGORY,
    MARKETPLACE_CATEGORIES_BY_SUBCATEGORY, MARKETPLACE_SEARCH_URL, PRODUCT_URLS_BY_SUBCATEGORY,
};
use super::{curated, dedup_capped, owned};

/// Most curated marketplace categories taken from the store before merging.
pub const CATEGORY_LOOKUP_CAP: usize = 10;
/// Most curated popular products taken from the store before merging.
pub const PRODUCT_LOOKUP_CAP: usize = 5;

/// Below this many products the subcategory URL table is consulted.
const MIN_PRODUCTS_BEFORE_TABLE: usize = 3;

const MARKETPLACE_DOMAIN: &str = "amazon.";

static DP_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/dp/([A-Z0-9]{10})(?:[/?#&]|$)").expect("valid dp regex"));

static GP_PRODUCT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/gp/product/([A-Z0-9]{10})(?:[/?#&]|$)").expect("valid gp/product regex")
});

static GP_MOBILE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/gp/aw/d/([A-Z0-9]{10})(?:[/?#&]|$)").expect("valid gp/aw/d regex")
});

static ASIN_QUERY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]asin=([A-Z0-9]{10})(?:[&#]|$)").expect("valid asin query regex")
});

/// Extracts the 10-character product identifier from a marketplace URL.
///
/// Only URLs on the marketplace domain are considered. The path forms are
/// tried before the `asin` query parameter and the first match wins.
#[must_use]
pub fn extract_product_id(url: &str) -> Option<String> {
    let url = url.trim();
    if !url.to_lowercase().contains(MARKETPLACE_DOMAIN) {
        return None;
    }

    [&*DP_PATH, &*GP_PRODUCT_PATH, &*GP_MOBILE_PATH, &*ASIN_QUERY]
        .into_iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Search page for `term` on the marketplace.
#[must_use]
pub fn search_url(term: &str) -> String {
    format!(
        "{MARKETPLACE_SEARCH_URL}{}",
        utf8_percent_encode(term.trim(), NON_ALPHANUMERIC)
    )
}

/// Caller-supplied product pages for the marketplace target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitProducts<'a> {
    pub product_url: Option<&'a str>,
    pub competitor_urls: &'a [String],
}

/// Resolves marketplace categories and product pages.
///
/// Explicit URLs always lead the product list. Categories and products fall
/// back to the static tables independently of each other.
pub async fn resolve<S: CategoryMappingStore>(
    store: &S,
    category: &str,
    subcategory: &str,
    explicit: ExplicitProducts<'_>,
) -> PlatformTarget {
    let product_url = explicit
        .product_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string);
    let product_id = product_url.as_deref().and_then(extract_product_id);

    let mut categories = curated(
        store,
        TargetKind::MarketplaceCategory,
        category,
        subcategory,
        CATEGORY_LOOKUP_CAP,
    )
    .await;
    if categories.is_empty() {
        categories.extend(owned(entries(MARKETPLACE_CATEGORIES_BY_CATEGORY, category)));
        categories.extend(owned(entries(
            MARKETPLACE_CATEGORIES_BY_SUBCATEGORY,
            subcategory,
        )));
    }
    categories.extend(owned(GENERAL_MARKETPLACE_CATEGORIES));

    let mut products: Vec<String> = product_url.iter().cloned().collect();
    products.extend(explicit.competitor_urls.iter().cloned());

    let popular = curated(
        store,
        TargetKind::PopularProduct,
        category,
        subcategory,
        PRODUCT_LOOKUP_CAP,
    )
    .await;
    if popular.is_empty() {
        if products.len() < MIN_PRODUCTS_BEFORE_TABLE {
            products.extend(owned(entries(PRODUCT_URLS_BY_SUBCATEGORY, subcategory)));
        }
    } else {
        products.extend(popular);
    }
    if !category.is_empty() {
        products.push(search_url(category));
    }

    PlatformTarget::Marketplace {
        products: dedup_capped(products, MARKETPLACE_PRODUCT_CAP),
        categories: dedup_capped(categories, MARKETPLACE_CATEGORY_CAP),
        product_url,
        product_id,
    }
}
