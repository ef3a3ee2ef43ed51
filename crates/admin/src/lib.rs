//! Orchard Admin library.
//!
//! Console-side helpers for the product management views: the tab/filter
//! pipeline that turns a selected tab into request parameters and a
//! client-side post-processing step for the fetched list.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod tabs;
