//! End-to-end list pipeline: tab parameters feed the cache key, the
//! fetched page flows through the tab's processor.

#![allow(clippy::unwrap_used)]

use serde_json::json;

use orchard_admin::tabs::{self, FilterState};
use orchard_core::{ListParams, ProductStatus};
use orchard_integration_tests::{product, product_with};
use orchard_storefront::api::ProductPage;
use orchard_storefront::cache::ListCache;
use orchard_storefront::store::StateStore;

fn ids(page: &[orchard_core::Product]) -> Vec<&str> {
    page.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn test_tab_params_yield_stable_cache_keys() {
    let state = FilterState {
        search: Some("tote".to_string()),
        status: None,
    };

    let mut first = ListParams::new();
    tabs::tab("trending").apply_params(&mut first, &state);
    let mut second = ListParams::new();
    tabs::tab("trending").apply_params(&mut second, &state);

    assert_eq!(ListCache::build_key(&first), ListCache::build_key(&second));
    assert_eq!(ListCache::build_key(&first), "search=tote&status=Published");

    // A different tab produces a different key, so pages never collide.
    let mut draft = ListParams::new();
    tabs::tab("draft").apply_params(&mut draft, &state);
    assert_ne!(ListCache::build_key(&first), ListCache::build_key(&draft));
}

#[test]
fn test_cached_page_flows_through_tab_processor() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = ListCache::new(StateStore::open(dir.path()));

    let state = FilterState::default();
    let config = tabs::tab("trending");
    let mut params = ListParams::new();
    config.apply_params(&mut params, &state);
    let key = ListCache::build_key(&params);

    let fetched = ProductPage {
        products: vec![
            product_with(json!({"id": "p1", "title": "t", "trendingSort": 2})),
            product_with(json!({"id": "p2", "title": "t", "trendingSort": 1})),
            product_with(json!({"id": "p3", "title": "t", "status": "Draft"})),
        ],
        total: Some(3),
    };
    cache.set(key.clone(), fetched);

    // Second render: hit the cache, then post-process for display.
    let page = cache.get(&key).unwrap();
    let processed = config.process(page.products);

    assert_eq!(ids(&processed.list), ["p2", "p1"]);
    assert_eq!(processed.total, Some(2));
}

#[test]
fn test_pass_through_tab_keeps_server_total() {
    let config = tabs::tab("all");
    let page = ProductPage {
        products: vec![product("p1"), product("p2")],
        total: Some(40),
    };

    let processed = config.process(page.products.clone());

    assert_eq!(processed.list, page.products);
    // The view falls back to the server count of 40.
    assert_eq!(processed.total, None);
}

#[test]
fn test_filter_status_survives_fallback_tab() {
    let state = FilterState {
        search: None,
        status: Some(ProductStatus::Archived),
    };
    let mut params = ListParams::new();
    tabs::tab("no-such-tab").apply_params(&mut params, &state);

    assert_eq!(params.get("status"), Some("Archived"));
}
