//! Shared fixtures for Orchard integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use orchard_core::Product;

/// A published, in-stock product fixture.
#[must_use]
pub fn product(id: &str) -> Product {
    product_with(serde_json::json!({
        "id": id,
        "title": format!("Product {id}"),
        "price": { "amount": "10.00", "currency_code": "USD" },
        "stock": 5,
    }))
}

/// Build a product fixture from a JSON value.
///
/// # Panics
///
/// Panics if the value does not describe a valid product; fixtures are
/// test inputs, so failing loudly is the point.
#[must_use]
pub fn product_with(value: serde_json::Value) -> Product {
    serde_json::from_value(value).unwrap()
}
