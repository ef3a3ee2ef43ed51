//! Tab/filter pipeline for the console product list.
//!
//! Each tab carries two pure functions: one contributes query parameters
//! before the list request goes out, the other reorders or filters the
//! fetched page. A tab that filters client-side reports its own total
//! (the server count no longer matches what is shown); pass-through tabs
//! report `None` so the view keeps the server-provided total.
//!
//! Tab lookup by key never fails: unknown keys fall back to the first
//! configured tab.

use tracing::debug;

use orchard_core::{ListParams, Product, ProductStatus};

/// Sentinel ordering rank for products with no manual priority.
pub const PRIORITY_SENTINEL: i64 = 9999;

/// Current filter controls on the product list view.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text search, if any.
    pub search: Option<String>,
    /// Explicit status filter, if any.
    pub status: Option<ProductStatus>,
}

/// A post-processed product list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedList {
    /// Products to display, in display order.
    pub list: Vec<Product>,
    /// Count to display: `Some` when client-side filtering changed which
    /// items are shown, `None` to defer to the server-provided total.
    pub total: Option<usize>,
}

/// One tab of the console product list.
pub struct TabConfig {
    /// Stable key referenced by the view.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Whether manual priority ordering is editable on this tab.
    pub priority_editable: bool,
    apply_params: fn(&mut ListParams, &FilterState),
    process: fn(Vec<Product>) -> ProcessedList,
}

impl TabConfig {
    /// Contribute this tab's query parameters.
    pub fn apply_params(&self, params: &mut ListParams, state: &FilterState) {
        (self.apply_params)(params, state);
    }

    /// Post-process a fetched product list.
    #[must_use]
    pub fn process(&self, list: Vec<Product>) -> ProcessedList {
        (self.process)(list)
    }
}

/// All configured tabs; the first is the default.
pub static TABS: &[TabConfig] = &[
    TabConfig {
        key: "all",
        label: "All",
        priority_editable: false,
        apply_params: apply_common,
        process: pass_through,
    },
    TabConfig {
        key: "customer-view",
        label: "Customer View",
        priority_editable: true,
        apply_params: apply_published,
        process: process_customer_view,
    },
    TabConfig {
        key: "featured",
        label: "Featured",
        priority_editable: false,
        apply_params: apply_featured,
        process: pass_through,
    },
    TabConfig {
        key: "exclusive",
        label: "Exclusive",
        priority_editable: false,
        apply_params: apply_common,
        process: process_exclusive,
    },
    TabConfig {
        key: "draft",
        label: "Draft",
        priority_editable: false,
        apply_params: apply_draft,
        process: pass_through,
    },
    TabConfig {
        key: "archived",
        label: "Archived",
        priority_editable: false,
        apply_params: apply_archived,
        process: pass_through,
    },
    TabConfig {
        key: "out-of-stock",
        label: "Out of Stock",
        priority_editable: false,
        apply_params: apply_common,
        process: process_out_of_stock,
    },
    TabConfig {
        key: "trending",
        label: "Trending",
        priority_editable: true,
        apply_params: apply_published,
        process: process_trending,
    },
];

/// Look up a tab by key, falling back to the default (first) tab.
#[must_use]
pub fn tab(key: &str) -> &'static TabConfig {
    TABS.iter().find(|tab| tab.key == key).unwrap_or_else(|| {
        debug!(key, "Unknown tab key; using default tab");
        // TABS is a non-empty static table.
        #[allow(clippy::indexing_slicing)]
        &TABS[0]
    })
}

// =============================================================================
// Parameter Builders
// =============================================================================

/// Filters every tab honors: free-text search and an explicit status.
fn apply_common(params: &mut ListParams, state: &FilterState) {
    if let Some(search) = &state.search
        && !search.trim().is_empty()
    {
        params.set("search", search.trim());
    }
    if let Some(status) = state.status {
        params.set("status", status.to_string());
    }
}

fn apply_published(params: &mut ListParams, state: &FilterState) {
    apply_common(params, state);
    params.set("status", ProductStatus::Published.to_string());
}

fn apply_draft(params: &mut ListParams, state: &FilterState) {
    apply_common(params, state);
    params.set("status", ProductStatus::Draft.to_string());
}

fn apply_archived(params: &mut ListParams, state: &FilterState) {
    apply_common(params, state);
    params.set("status", ProductStatus::Archived.to_string());
}

fn apply_featured(params: &mut ListParams, state: &FilterState) {
    apply_published(params, state);
    params.set("featured", "true");
}

// =============================================================================
// List Processors
// =============================================================================

/// No client-side change; the server total stands.
fn pass_through(list: Vec<Product>) -> ProcessedList {
    ProcessedList { list, total: None }
}

/// Exclusive items first, then non-exclusive featured, then the rest.
/// Each partition preserves its incoming order. Cardinality is unchanged,
/// so the server total stands.
fn process_customer_view(list: Vec<Product>) -> ProcessedList {
    let mut exclusive = Vec::new();
    let mut featured = Vec::new();
    let mut rest = Vec::new();

    for product in list {
        if product.exclusive {
            exclusive.push(product);
        } else if product.featured {
            featured.push(product);
        } else {
            rest.push(product);
        }
    }

    exclusive.extend(featured);
    exclusive.extend(rest);
    ProcessedList {
        list: exclusive,
        total: None,
    }
}

/// Published items only, stable-sorted ascending by trending rank.
///
/// The rank is `trending_sort`, falling back to `display_priority`, falling
/// back to [`PRIORITY_SENTINEL`]. The sort must be stable: equal ranks keep
/// their relative input order.
fn process_trending(list: Vec<Product>) -> ProcessedList {
    let mut published: Vec<Product> = list
        .into_iter()
        .filter(|product| product.status == ProductStatus::Published)
        .collect();
    published.sort_by_key(|product| {
        product
            .trending_sort
            .or(product.display_priority)
            .unwrap_or(PRIORITY_SENTINEL)
    });
    let total = Some(published.len());
    ProcessedList {
        list: published,
        total,
    }
}

/// Items with no stock on hand; missing stock counts as zero.
fn process_out_of_stock(list: Vec<Product>) -> ProcessedList {
    let filtered: Vec<Product> = list
        .into_iter()
        .filter(|product| product.stock_or_zero() <= 0)
        .collect();
    let total = Some(filtered.len());
    ProcessedList {
        list: filtered,
        total,
    }
}

/// Items flagged exclusive.
fn process_exclusive(list: Vec<Product>) -> ProcessedList {
    let filtered: Vec<Product> = list.into_iter().filter(|product| product.exclusive).collect();
    let total = Some(filtered.len());
    ProcessedList {
        list: filtered,
        total,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use orchard_core::ProductId;
    use serde_json::json;

    use super::*;

    fn product(value: serde_json::Value) -> Product {
        serde_json::from_value(value).unwrap()
    }

    fn ids(list: &[Product]) -> Vec<&str> {
        list.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_unknown_key_falls_back_to_default() {
        let fallback = tab("no-such-tab");
        assert_eq!(fallback.key, "all");
        // And processing through the fallback never panics.
        let processed = fallback.process(vec![]);
        assert_eq!(processed.total, None);
    }

    #[test]
    fn test_status_tabs_override_filter_status() {
        let config = tab("draft");
        let mut params = ListParams::new();
        let state = FilterState {
            search: Some("tote".to_string()),
            status: Some(ProductStatus::Published),
        };
        config.apply_params(&mut params, &state);

        assert_eq!(params.get("search"), Some("tote"));
        assert_eq!(params.get("status"), Some("Draft"));
    }

    #[test]
    fn test_featured_tab_params() {
        let config = tab("featured");
        let mut params = ListParams::new();
        config.apply_params(&mut params, &FilterState::default());

        assert_eq!(params.get("status"), Some("Published"));
        assert_eq!(params.get("featured"), Some("true"));
    }

    #[test]
    fn test_customer_view_partitions_preserve_order() {
        let list = vec![
            product(json!({"id": "p1", "title": "t", "featured": true})),
            product(json!({"id": "p2", "title": "t", "exclusive": true})),
            product(json!({"id": "p3", "title": "t"})),
            product(json!({"id": "p4", "title": "t", "exclusive": true, "featured": true})),
            product(json!({"id": "p5", "title": "t", "featured": true})),
        ];

        let processed = tab("customer-view").process(list);

        // Exclusive (p2, p4), then non-exclusive featured (p1, p5), then rest.
        assert_eq!(ids(&processed.list), ["p2", "p4", "p1", "p5", "p3"]);
        assert_eq!(processed.total, None);
    }

    #[test]
    fn test_trending_stable_sort() {
        let list = vec![
            product(json!({"id": "p1", "title": "t", "trendingSort": 5})),
            product(json!({"id": "p2", "title": "t", "trendingSort": 3})),
            product(json!({"id": "p3", "title": "t", "displayPriority": 3})),
            product(json!({"id": "p4", "title": "t"})),
        ];

        let processed = tab("trending").process(list);

        // p2 and p3 tie at rank 3 and keep input order; p4 takes the
        // sentinel rank and sorts last.
        assert_eq!(ids(&processed.list), ["p2", "p3", "p1", "p4"]);
        assert_eq!(processed.total, Some(4));
    }

    #[test]
    fn test_trending_drops_unpublished() {
        let list = vec![
            product(json!({"id": "p1", "title": "t", "status": "Draft", "trendingSort": 1})),
            product(json!({"id": "p2", "title": "t", "trendingSort": 2})),
        ];

        let processed = tab("trending").process(list);

        assert_eq!(ids(&processed.list), ["p2"]);
        assert_eq!(processed.total, Some(1));
    }

    #[test]
    fn test_out_of_stock_counts_missing_stock_as_zero() {
        let list = vec![
            product(json!({"id": "p1", "title": "t", "stock": 0})),
            product(json!({"id": "p2", "title": "t", "stock": 5})),
            product(json!({"id": "p3", "title": "t", "stock": null})),
        ];

        let processed = tab("out-of-stock").process(list);

        assert_eq!(ids(&processed.list), ["p1", "p3"]);
        assert_eq!(processed.total, Some(2));
    }

    #[test]
    fn test_exclusive_filters_and_counts() {
        let list = vec![
            product(json!({"id": "p1", "title": "t", "exclusive": true})),
            product(json!({"id": "p2", "title": "t"})),
        ];

        let processed = tab("exclusive").process(list);

        assert_eq!(
            processed.list.first().unwrap().id,
            ProductId::new("p1")
        );
        assert_eq!(processed.total, Some(1));
    }

    #[test]
    fn test_all_tab_passes_through() {
        let list = vec![
            product(json!({"id": "p1", "title": "t", "stock": 0})),
            product(json!({"id": "p2", "title": "t", "status": "Draft"})),
        ];

        let processed = tab("all").process(list.clone());

        assert_eq!(processed.list, list);
        assert_eq!(processed.total, None);
    }
}
