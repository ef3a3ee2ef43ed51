//! Orchard Storefront library.
//!
//! Client-side state management for the customer-facing panel: the shopping
//! cart, the remote-synced wishlist, catalog search with debounce, the
//! TTL-bounded product list cache, and the persistent store backing them.
//!
//! State managers absorb their own failures: network errors surface as
//! observable error fields, storage errors degrade to in-memory behavior.
//! Nothing in this crate panics on bad input or a missing backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cache;
pub mod cart;
pub mod config;
pub mod error;
pub mod search;
pub mod state;
pub mod store;
pub mod wishlist;
