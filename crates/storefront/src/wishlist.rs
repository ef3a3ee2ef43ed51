//! Wishlist state manager.
//!
//! The remote collection is the source of truth; the manager holds an
//! eventually-consistent read-through copy. There are no optimistic
//! updates: an add or remove issues the request and, on success, refetches
//! the full collection - the local list only ever changes on a successful
//! refetch (or on sign-out, which resets it).
//!
//! Concurrent add/remove calls for the same product before a refetch
//! completes are not deduplicated; the last write observed by the backend
//! wins and the trailing refetch reconciles the client.

use std::sync::RwLock;

use tokio::sync::watch;
use tracing::{debug, instrument};

use orchard_core::{CategoryId, CustomerId, Price, Product, ProductId};

use crate::api::CustomerApi;

/// A saved product with denormalized display fields.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItem {
    /// Stable product reference; unique within the list.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Current unit price.
    pub price: Price,
    /// Pre-discount price, when on sale.
    pub original_price: Option<Price>,
    /// Owning category, when assigned.
    pub category: Option<CategoryId>,
    /// Primary image URL.
    pub image: Option<String>,
    /// Promotional badge text.
    pub badge: Option<String>,
}

impl From<Product> for WishlistItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            original_price: product.original_price,
            category: product.category,
            image: product.image,
            badge: product.badge,
        }
    }
}

/// Observable wishlist state.
///
/// `error` carries the last sync failure; the items are whatever the last
/// successful refetch produced (a failure never partially overwrites them).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistSnapshot {
    /// Saved items, as of the last successful refetch.
    pub items: Vec<WishlistItem>,
    /// Last sync error, if any.
    pub error: Option<String>,
}

/// Keeps a local projection of the server-owned saved-items collection.
pub struct WishlistManager<A: CustomerApi> {
    api: A,
    customer: RwLock<Option<CustomerId>>,
    state_tx: watch::Sender<WishlistSnapshot>,
}

impl<A: CustomerApi> WishlistManager<A> {
    /// Create a manager for the given (possibly absent) customer.
    #[must_use]
    pub fn new(api: A, customer: Option<CustomerId>) -> Self {
        let (state_tx, _) = watch::channel(WishlistSnapshot::default());
        Self {
            api,
            customer: RwLock::new(customer),
            state_tx,
        }
    }

    /// Change the signed-in customer.
    ///
    /// Signing out (or switching customers) resets the local list; the new
    /// customer's list appears on the next [`Self::fetch`].
    pub fn set_customer(&self, customer: Option<CustomerId>) {
        if let Ok(mut guard) = self.customer.write() {
            *guard = customer;
        }
        self.state_tx.send_replace(WishlistSnapshot::default());
    }

    fn signed_in(&self) -> bool {
        self.customer.read().is_ok_and(|guard| guard.is_some())
    }

    /// Refetch the full collection and replace the local list wholesale.
    ///
    /// With no signed-in customer this resets to an empty list without
    /// issuing a request. On failure the previous list stays intact and the
    /// error becomes observable on the snapshot.
    #[instrument(skip(self))]
    pub async fn fetch(&self) {
        if !self.signed_in() {
            self.state_tx.send_replace(WishlistSnapshot::default());
            return;
        }
        match self.api.fetch_wishlist().await {
            Ok(entries) => {
                let items: Vec<WishlistItem> = entries
                    .into_iter()
                    // Entries whose product reference cannot be resolved are
                    // dropped rather than surfaced as placeholder rows.
                    .filter_map(|entry| entry.product)
                    .map(WishlistItem::from)
                    .collect();
                debug!(count = items.len(), "Wishlist refetched");
                self.state_tx.send_replace(WishlistSnapshot {
                    items,
                    error: None,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Wishlist fetch failed; keeping previous list");
                self.state_tx
                    .send_modify(|snapshot| snapshot.error = Some(e.to_string()));
            }
        }
    }

    /// Request addition of a product, then resynchronize.
    ///
    /// No-op when signed out. No local mutation is applied before the
    /// backend confirms and the trailing refetch lands.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_item(&self, product_id: &ProductId) {
        if !self.signed_in() {
            return;
        }
        match self.api.add_wishlist_item(product_id).await {
            Ok(()) => self.fetch().await,
            Err(e) => {
                tracing::warn!(error = %e, "Wishlist add failed");
                self.state_tx
                    .send_modify(|snapshot| snapshot.error = Some(e.to_string()));
            }
        }
    }

    /// Request removal of a product, then resynchronize.
    ///
    /// No-op when signed out.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_item(&self, product_id: &ProductId) {
        if !self.signed_in() {
            return;
        }
        match self.api.remove_wishlist_item(product_id).await {
            Ok(()) => self.fetch().await,
            Err(e) => {
                tracing::warn!(error = %e, "Wishlist remove failed");
                self.state_tx
                    .send_modify(|snapshot| snapshot.error = Some(e.to_string()));
            }
        }
    }

    /// Request deletion of the entire remote collection, then refetch.
    ///
    /// When signed out this just resets the (already empty) local list.
    #[instrument(skip(self))]
    pub async fn clear(&self) {
        if !self.signed_in() {
            self.state_tx.send_replace(WishlistSnapshot::default());
            return;
        }
        match self.api.clear_wishlist().await {
            Ok(()) => self.fetch().await,
            Err(e) => {
                tracing::warn!(error = %e, "Wishlist clear failed");
                self.state_tx
                    .send_modify(|snapshot| snapshot.error = Some(e.to_string()));
            }
        }
    }

    /// Whether the product is currently in the local list.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.state_tx
            .borrow()
            .items
            .iter()
            .any(|item| &item.id == product_id)
    }

    /// Current observable state.
    #[must_use]
    pub fn snapshot(&self) -> WishlistSnapshot {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WishlistSnapshot> {
        self.state_tx.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::api::WishlistEntry;
    use crate::error::ApiError;

    /// Recording fake backend: tracks calls and serves a mutable item set.
    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<String>>,
        items: Mutex<Vec<ProductId>>,
        fail_fetch: Mutex<bool>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn seed(&self, ids: &[&str]) {
            *self.items.lock().unwrap() = ids.iter().map(|id| ProductId::new(*id)).collect();
        }

        fn entry(id: &ProductId) -> WishlistEntry {
            serde_json::from_value(serde_json::json!({
                "product": { "id": id.as_str(), "title": format!("Product {id}") }
            }))
            .unwrap()
        }
    }

    impl CustomerApi for &FakeApi {
        async fn fetch_wishlist(&self) -> Result<Vec<WishlistEntry>, ApiError> {
            self.calls.lock().unwrap().push("fetch".to_string());
            if *self.fail_fetch.lock().unwrap() {
                return Err(ApiError::Status {
                    status: 502,
                    message: "bad gateway".to_string(),
                });
            }
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .map(FakeApi::entry)
                .collect())
        }

        async fn add_wishlist_item(&self, product_id: &ProductId) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(format!("add:{product_id}"));
            self.items.lock().unwrap().push(product_id.clone());
            Ok(())
        }

        async fn remove_wishlist_item(&self, product_id: &ProductId) -> Result<(), ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("remove:{product_id}"));
            self.items.lock().unwrap().retain(|id| id != product_id);
            Ok(())
        }

        async fn clear_wishlist(&self) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push("clear".to_string());
            self.items.lock().unwrap().clear();
            Ok(())
        }
    }

    fn signed_in(api: &FakeApi) -> WishlistManager<&FakeApi> {
        WishlistManager::new(api, Some(CustomerId::new("cust_1")))
    }

    #[tokio::test]
    async fn test_signed_out_is_noop_without_network() {
        let api = FakeApi::default();
        let manager = WishlistManager::new(&api, None);

        manager.fetch().await;
        manager.add_item(&ProductId::new("prod_1")).await;
        manager.remove_item(&ProductId::new("prod_1")).await;

        assert!(api.calls().is_empty());
        assert_eq!(manager.snapshot(), WishlistSnapshot::default());
    }

    #[tokio::test]
    async fn test_add_refetches_after_confirmation() {
        let api = FakeApi::default();
        let manager = signed_in(&api);

        manager.add_item(&ProductId::new("prod_1")).await;

        assert_eq!(api.calls(), vec!["add:prod_1", "fetch"]);
        assert!(manager.contains(&ProductId::new("prod_1")));
        assert!(manager.snapshot().error.is_none());
    }

    #[tokio::test]
    async fn test_remove_then_refetch() {
        let api = FakeApi::default();
        api.seed(&["prod_1", "prod_2"]);
        let manager = signed_in(&api);
        manager.fetch().await;

        manager.remove_item(&ProductId::new("prod_1")).await;

        assert!(!manager.contains(&ProductId::new("prod_1")));
        assert!(manager.contains(&ProductId::new("prod_2")));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let api = FakeApi::default();
        api.seed(&["prod_1"]);
        let manager = signed_in(&api);
        manager.fetch().await;
        assert_eq!(manager.snapshot().items.len(), 1);

        *api.fail_fetch.lock().unwrap() = true;
        manager.fetch().await;

        let snapshot = manager.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert!(snapshot.error.is_some());
    }

    #[tokio::test]
    async fn test_unresolvable_entries_are_discarded() {
        struct StaleApi;
        impl CustomerApi for StaleApi {
            async fn fetch_wishlist(&self) -> Result<Vec<WishlistEntry>, ApiError> {
                Ok(vec![
                    serde_json::from_value(serde_json::json!({
                        "product": { "id": "prod_1", "title": "Linen Tote" }
                    }))
                    .unwrap(),
                    serde_json::from_value(serde_json::json!({ "product": null })).unwrap(),
                ])
            }
            async fn add_wishlist_item(&self, _: &ProductId) -> Result<(), ApiError> {
                Ok(())
            }
            async fn remove_wishlist_item(&self, _: &ProductId) -> Result<(), ApiError> {
                Ok(())
            }
            async fn clear_wishlist(&self) -> Result<(), ApiError> {
                Ok(())
            }
        }

        let manager = WishlistManager::new(StaleApi, Some(CustomerId::new("cust_1")));
        manager.fetch().await;
        assert_eq!(manager.snapshot().items.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_deletes_remote_then_refetches() {
        let api = FakeApi::default();
        api.seed(&["prod_1"]);
        let manager = signed_in(&api);
        manager.fetch().await;

        manager.clear().await;

        assert_eq!(api.calls(), vec!["fetch", "clear", "fetch"]);
        assert!(manager.snapshot().items.is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_resets_list() {
        let api = FakeApi::default();
        api.seed(&["prod_1"]);
        let manager = signed_in(&api);
        manager.fetch().await;
        assert!(!manager.snapshot().items.is_empty());

        manager.set_customer(None);
        assert!(manager.snapshot().items.is_empty());
    }
}
