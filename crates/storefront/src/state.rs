//! Client state shared across views.

use std::sync::{Arc, Mutex};

use orchard_core::ListParams;

use crate::api::{ProductPage, RestClient};
use crate::cache::ListCache;
use crate::cart::CartManager;
use crate::config::StorefrontConfig;
use crate::error::ApiError;
use crate::search::RecentSearches;
use crate::store::StateStore;
use crate::wishlist::WishlistManager;

/// Client state shared across all views.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// state managers, the REST client, and configuration. Managers that
/// mutate through `&mut self` sit behind a `Mutex`; locks are never held
/// across an await.
#[derive(Clone)]
pub struct ClientState {
    inner: Arc<ClientStateInner>,
}

struct ClientStateInner {
    config: StorefrontConfig,
    store: StateStore,
    client: RestClient,
    cache: Mutex<ListCache>,
    cart: Mutex<CartManager>,
    wishlist: WishlistManager<RestClient>,
    recent_searches: Mutex<RecentSearches>,
}

impl ClientState {
    /// Create the client state, rehydrating persisted cart, cache, and
    /// search history from the configured state directory.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store = StateStore::open(&config.state_dir);
        let client = RestClient::new(&config);
        let cache = Mutex::new(ListCache::new(store.clone()));
        let cart = Mutex::new(CartManager::new(store.clone()));
        let wishlist = WishlistManager::new(
            client.clone(),
            config
                .customer
                .as_ref()
                .map(|auth| auth.customer_id.clone()),
        );
        let recent_searches = Mutex::new(RecentSearches::new(store.clone()));

        Self {
            inner: Arc::new(ClientStateInner {
                config,
                store,
                client,
                cache,
                cart,
                wishlist,
                recent_searches,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the persistent store.
    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.inner.store
    }

    /// Get a reference to the REST client.
    #[must_use]
    pub fn client(&self) -> &RestClient {
        &self.inner.client
    }

    /// Get the cart manager.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartManager> {
        &self.inner.cart
    }

    /// Get the wishlist manager.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistManager<RestClient> {
        &self.inner.wishlist
    }

    /// Get the recent-search history.
    #[must_use]
    pub fn recent_searches(&self) -> &Mutex<RecentSearches> {
        &self.inner.recent_searches
    }

    /// Fetch one page of the product list, consulting the TTL cache first.
    ///
    /// The cache key is the canonical serialization of `params`; a fresh
    /// response is cached before being returned.
    ///
    /// # Errors
    ///
    /// Returns an error only for an actual backend failure; cache misses
    /// and storage problems are invisible to the caller.
    pub async fn list_products(&self, params: &ListParams) -> Result<ProductPage, ApiError> {
        let key = ListCache::build_key(params);

        if let Ok(mut cache) = self.inner.cache.lock()
            && let Some(page) = cache.get(&key)
        {
            return Ok(page);
        }

        let page = self.inner.client.list_products(params).await?;

        if let Ok(mut cache) = self.inner.cache.lock() {
            cache.set(key, page.clone());
        }
        Ok(page)
    }

    /// Drop all cached list pages.
    pub fn invalidate_lists(&self) {
        if let Ok(mut cache) = self.inner.cache.lock() {
            cache.clear();
        }
    }

    /// Sign the customer out.
    ///
    /// Resets the wishlist to its signed-out (empty) state and empties the
    /// cart, including its persisted lines. Recent searches and the list
    /// cache are not customer-scoped and survive.
    pub fn sign_out(&self) {
        self.inner.wishlist.set_customer(None);
        if let Ok(mut cart) = self.inner.cart.lock() {
            cart.clear();
        }
    }
}
