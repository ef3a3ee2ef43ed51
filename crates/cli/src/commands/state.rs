//! Commands over the persisted client state directory.
//!
//! These operate directly on the same store files the storefront managers
//! use; running them while a storefront process is live is safe (writes are
//! atomic renames) but last-writer-wins.

#![allow(clippy::print_stdout)]

use orchard_storefront::cache::ListCache;
use orchard_storefront::cart::CartManager;
use orchard_storefront::config::StorefrontConfig;
use orchard_storefront::search::RecentSearches;
use orchard_storefront::store::StateStore;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn open_store() -> Result<(StorefrontConfig, StateStore), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = StateStore::open(&config.state_dir);
    Ok((config, store))
}

/// Print the resolved state directory.
pub fn path() -> CommandResult {
    let (config, _) = open_store()?;
    println!("{}", config.state_dir.display());
    Ok(())
}

/// Show persisted cart lines and totals.
pub fn cart_show() -> CommandResult {
    let (_, store) = open_store()?;
    let cart = CartManager::new(store);

    if cart.lines().is_empty() {
        println!("Cart is empty");
        return Ok(());
    }
    for line in cart.lines() {
        println!("{:>4} x {} ({})", line.quantity, line.title, line.id);
    }
    let totals = cart.totals();
    println!("Total: {} items, subtotal {}", totals.quantity, totals.subtotal);
    Ok(())
}

/// Empty the persisted cart.
pub fn cart_clear() -> CommandResult {
    let (_, store) = open_store()?;
    let mut cart = CartManager::new(store);
    cart.clear();
    println!("Cart cleared");
    Ok(())
}

/// Drop all cached list pages.
pub fn cache_clear() -> CommandResult {
    let (_, store) = open_store()?;
    let mut cache = ListCache::new(store);
    cache.clear();
    println!("List cache cleared");
    Ok(())
}

/// Show recent search terms, most recent first.
pub fn searches_show() -> CommandResult {
    let (_, store) = open_store()?;
    let recent = RecentSearches::new(store);

    if recent.terms().is_empty() {
        println!("No recent searches");
        return Ok(());
    }
    for term in recent.terms() {
        println!("{term}");
    }
    Ok(())
}

/// Forget all recent search terms.
pub fn searches_clear() -> CommandResult {
    let (_, store) = open_store()?;
    let mut recent = RecentSearches::new(store);
    recent.clear();
    println!("Recent searches cleared");
    Ok(())
}
