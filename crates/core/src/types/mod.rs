//! Shared type definitions.

pub mod id;
pub mod params;
pub mod price;
pub mod product;
pub mod status;

pub use id::{CategoryId, CustomerId, ProductId};
pub use params::ListParams;
pub use price::{CurrencyCode, Price};
pub use product::{Category, Product};
pub use status::{CategoryStatus, ProductStatus};
