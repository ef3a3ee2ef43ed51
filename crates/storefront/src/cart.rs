//! Cart state manager.
//!
//! The cart is authoritative locally: mutations apply in memory first and
//! the full line collection is persisted fire-and-forget under one storage
//! key after every change. There is no remote counterpart and nothing to
//! await; a failed write never rolls back in-memory state.
//!
//! Derived totals are recomputed on every mutation and published through a
//! `watch` channel so views observe them reactively instead of summing
//! lines themselves.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;

use orchard_core::{Price, Product, ProductId};

use crate::store::{StateStore, keys};

/// One product-quantity pair in the cart, with denormalized display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Stable product reference; unique within the cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Primary image URL.
    pub image: Option<String>,
    /// Unit price at the time the line was added.
    pub price: Price,
    /// Pre-discount unit price, when on sale.
    pub original_price: Option<Price>,
    /// Units of this product; always >= 1 (a zero quantity removes the line).
    pub quantity: u32,
}

/// Persisted line shape with tolerance for malformed historical data.
///
/// Entries lacking an id or quantity are defaulted rather than dropped:
/// quantity falls back to 1, a missing or blank id gets a freshly generated
/// token so the line stays addressable.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLine {
    #[serde(default)]
    id: Option<ProductId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    price: Price,
    #[serde(default)]
    original_price: Option<Price>,
    #[serde(default)]
    quantity: Option<u32>,
}

impl From<StoredLine> for CartLine {
    fn from(stored: StoredLine) -> Self {
        let id = match stored.id {
            Some(id) if !id.is_empty() => id,
            _ => {
                let generated = ProductId::new(uuid::Uuid::new_v4().to_string());
                warn!(id = %generated, "Persisted cart line had no id; assigned a generated token");
                generated
            }
        };
        Self {
            id,
            title: stored.title,
            image: stored.image,
            price: stored.price,
            original_price: stored.original_price,
            quantity: stored.quantity.unwrap_or(1),
        }
    }
}

/// Aggregate cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of all line quantities.
    pub quantity: u32,
    /// Sum of `price * quantity` over all lines.
    pub subtotal: Decimal,
}

/// Owns the shopping cart and its derived totals.
pub struct CartManager {
    lines: Vec<CartLine>,
    store: StateStore,
    totals_tx: watch::Sender<CartTotals>,
}

impl CartManager {
    /// Create a manager, rehydrating any persisted lines from the store.
    #[must_use]
    pub fn new(store: StateStore) -> Self {
        let lines: Vec<CartLine> = store
            .get::<Vec<StoredLine>>(keys::CART_LINES)
            .unwrap_or_default()
            .into_iter()
            .map(CartLine::from)
            .collect();
        let (totals_tx, _) = watch::channel(compute_totals(&lines));
        Self {
            lines,
            store,
            totals_tx,
        }
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// Merges into an existing line for the same product id, otherwise
    /// inserts a new line. A zero quantity is rejected as a no-op; callers
    /// wanting removal use [`Self::set_quantity`] or [`Self::remove_item`].
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            warn!(id = %product.id, "Ignoring add_item with zero quantity");
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                id: product.id.clone(),
                title: product.title.clone(),
                image: product.image.clone(),
                price: product.price,
                original_price: product.original_price,
                quantity,
            });
        }
        self.after_mutation();
    }

    /// Set the quantity of the line with the given id.
    ///
    /// A quantity of 0 removes the line entirely: a subsequent lookup of
    /// the id reports absence. No-op if the id is not in the cart.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }
        let Some(line) = self.lines.iter_mut().find(|line| &line.id == id) else {
            return;
        };
        line.quantity = quantity;
        self.after_mutation();
    }

    /// Remove the line with the given id; no-op if absent.
    pub fn remove_item(&mut self, id: &ProductId) {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        if self.lines.len() != before {
            self.after_mutation();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.after_mutation();
        }
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Current aggregate totals.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        *self.totals_tx.borrow()
    }

    /// Subscribe to totals changes.
    #[must_use]
    pub fn subscribe_totals(&self) -> watch::Receiver<CartTotals> {
        self.totals_tx.subscribe()
    }

    /// Recompute totals, notify subscribers, and persist the collection.
    fn after_mutation(&mut self) {
        let totals = compute_totals(&self.lines);
        // send_replace never fails, even with no subscribers.
        self.totals_tx.send_replace(totals);
        self.store.set(keys::CART_LINES, &self.lines);
    }
}

fn compute_totals(lines: &[CartLine]) -> CartTotals {
    CartTotals {
        quantity: lines.iter().map(|line| line.quantity).sum(),
        subtotal: lines
            .iter()
            .map(|line| line.price.times(line.quantity))
            .sum(),
    }
}
