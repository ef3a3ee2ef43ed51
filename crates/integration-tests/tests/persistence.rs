//! Persistence round-trips across manager restarts.
//!
//! Every manager here is constructed twice against the same state
//! directory to prove that what one process writes, the next reads back.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::Decimal;
use serde_json::json;

use orchard_core::ProductId;
use orchard_integration_tests::{product, product_with};
use orchard_storefront::cache::{ListCache, TimeSource};
use orchard_storefront::cart::CartManager;
use orchard_storefront::search::RecentSearches;
use orchard_storefront::store::{StateStore, keys};

#[derive(Debug, Default)]
struct ManualClock(AtomicU64);

impl ManualClock {
    fn advance(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[test]
fn test_cart_round_trips_lines_and_totals() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut cart = CartManager::new(StateStore::open(dir.path()));
        cart.add_item(&product("prod_1"), 2);
        cart.add_item(&product("prod_2"), 1);
    }

    let cart = CartManager::new(StateStore::open(dir.path()));
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.totals().quantity, 3);
    assert_eq!(cart.totals().subtotal, Decimal::new(3000, 2));
}

#[test]
fn test_cart_tolerates_hand_edited_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::open(dir.path());
    store.set(
        keys::CART_LINES,
        &json!([
            { "id": "prod_1", "title": "Linen Tote", "price": { "amount": "19.99", "currency_code": "USD" } },
            { "title": "No Id", "quantity": 2 }
        ]),
    );

    let cart = CartManager::new(store);
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.line(&ProductId::new("prod_1")).unwrap().quantity, 1);
    assert!(cart.lines().iter().all(|line| !line.id.is_empty()));
}

#[test]
fn test_cache_entry_survives_restart_until_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::default());
    let page = orchard_storefront::api::ProductPage {
        products: vec![product("prod_1")],
        total: Some(1),
    };
    {
        let mut cache = ListCache::with_clock(StateStore::open(dir.path()), clock.clone());
        cache.set("status=Published", page.clone());
    }

    let mut rehydrated = ListCache::with_clock(StateStore::open(dir.path()), clock.clone());
    assert_eq!(rehydrated.get("status=Published"), Some(page));

    // Hydrated timestamps still count against the TTL.
    clock.advance(300_001);
    assert!(rehydrated.get("status=Published").is_none());
}

#[test]
fn test_recent_searches_survive_restart_in_order() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut recent = RecentSearches::new(StateStore::open(dir.path()));
        recent.record("tote");
        recent.record("linen");
        recent.record("tote");
    }

    let recent = RecentSearches::new(StateStore::open(dir.path()));
    assert_eq!(recent.terms(), ["tote", "linen"]);
}

#[test]
fn test_state_domains_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut cart = CartManager::new(StateStore::open(dir.path()));
        cart.add_item(&product("prod_1"), 1);
        let mut recent = RecentSearches::new(StateStore::open(dir.path()));
        recent.record("tote");
    }

    // Clearing one domain leaves the others untouched.
    let mut recent = RecentSearches::new(StateStore::open(dir.path()));
    recent.clear();

    let cart = CartManager::new(StateStore::open(dir.path()));
    assert_eq!(cart.lines().len(), 1);
    assert!(RecentSearches::new(StateStore::open(dir.path()))
        .terms()
        .is_empty());
}

#[test]
fn test_fixture_accepts_overrides() {
    let draft = product_with(json!({
        "id": "prod_9",
        "title": "Draft Item",
        "status": "Draft",
    }));
    assert_eq!(draft.id, ProductId::new("prod_9"));
}
