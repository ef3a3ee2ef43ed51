//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Publication status of a catalog product.
///
/// Matches the status values the catalog backend accepts in list filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    /// Visible to customers.
    #[default]
    Published,
    /// Work in progress; console-only.
    Draft,
    /// Retired from the catalog; console-only.
    Archived,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Published => write!(f, "Published"),
            Self::Draft => write!(f, "Draft"),
            Self::Archived => write!(f, "Archived"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Published" => Ok(Self::Published),
            "Draft" => Ok(Self::Draft),
            "Archived" => Ok(Self::Archived),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Status of a catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryStatus {
    /// Browsable by customers.
    #[default]
    Active,
    /// Hidden from customers.
    Inactive,
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}
