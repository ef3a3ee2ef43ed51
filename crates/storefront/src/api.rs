//! REST client for the catalog and customer backend.
//!
//! All endpoints are JSON over HTTP. Customer endpoints carry a bearer
//! token; the client itself does not gate on authentication - that is the
//! wishlist manager's job (see [`crate::wishlist`]).
//!
//! The wishlist surface is a trait ([`CustomerApi`]) so state managers can
//! be exercised in tests against a recording fake.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use orchard_core::{Category, ListParams, Product, ProductId};

use crate::config::StorefrontConfig;
use crate::error::ApiError;

// =============================================================================
// Wire Types
// =============================================================================

/// One page of a product list response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products on this page.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Server-reported total across all pages, when known.
    #[serde(default)]
    pub total: Option<u64>,
}

/// One entry of the remote wishlist collection.
///
/// `product` is `None` when the backend could not resolve the product
/// reference (deleted product, stale entry); such entries are discarded by
/// the wishlist manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    /// The referenced product, embedded by the backend.
    #[serde(default)]
    pub product: Option<Product>,
}

#[derive(Debug, Default, Deserialize)]
struct WishlistEnvelope {
    #[serde(default)]
    wishlist: WishlistBody,
}

#[derive(Debug, Default, Deserialize)]
struct WishlistBody {
    #[serde(default)]
    items: Vec<WishlistEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct ProductsEnvelope {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Default, Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Vec<Category>,
}

/// Combined catalog search hits (products and categories).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    /// Matching published products.
    pub products: Vec<Product>,
    /// Matching active categories.
    pub categories: Vec<Category>,
}

// =============================================================================
// API Seams
// =============================================================================

/// Remote wishlist collection operations.
#[allow(async_fn_in_trait)]
pub trait CustomerApi {
    /// Fetch the full wishlist collection.
    async fn fetch_wishlist(&self) -> Result<Vec<WishlistEntry>, ApiError>;

    /// Request addition of a product to the wishlist.
    async fn add_wishlist_item(&self, product_id: &ProductId) -> Result<(), ApiError>;

    /// Request removal of a product from the wishlist.
    async fn remove_wishlist_item(&self, product_id: &ProductId) -> Result<(), ApiError>;

    /// Request deletion of the entire wishlist.
    async fn clear_wishlist(&self) -> Result<(), ApiError>;
}

/// Catalog search passthrough.
///
/// The returned future must be `Send` because the search debouncer runs
/// requests on spawned tasks.
pub trait CatalogSearch: Clone + Send + Sync + 'static {
    /// Search published products and active categories for `query`.
    fn search(
        &self,
        query: String,
        limit: u32,
    ) -> impl Future<Output = Result<SearchHits, ApiError>> + Send;
}

// =============================================================================
// RestClient
// =============================================================================

/// Client for the Orchard REST backend.
///
/// Cheaply cloneable via `Arc`.
#[derive(Debug, Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

#[derive(Debug)]
struct RestClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl RestClient {
    /// Create a client from the storefront configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::from_parts(
            config.api_base_url.clone(),
            config.customer.as_ref().map(|auth| auth.token.clone()),
        )
    }

    /// Create a client from a base URL and optional bearer token.
    #[must_use]
    pub fn from_parts(base_url: Url, token: Option<SecretString>) -> Self {
        Self {
            inner: Arc::new(RestClientInner {
                http: reqwest::Client::new(),
                base_url,
                token,
            }),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.inner.http.request(method, url);
        match &self.inner.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Check status, then read and parse the body.
    ///
    /// Body text is read before parsing so failures can be logged with the
    /// offending payload.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message: String = body.chars().take(200).collect();
            tracing::error!(
                status = %status,
                body = %message,
                "Backend returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    /// Check status, discarding the body.
    ///
    /// Mutation endpoints confirm with the status alone; the backend may
    /// answer `204 No Content` or an empty body, neither of which is an
    /// error.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        let message: String = body.chars().take(200).collect();
        tracing::error!(
            status = %status,
            body = %message,
            "Backend returned non-success status"
        );
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch one page of the product list for the given parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_products(&self, params: &ListParams) -> Result<ProductPage, ApiError> {
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        let response = self
            .request(reqwest::Method::GET, self.endpoint(&["catalog", "products"]))
            .query(&pairs)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Search published products by text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_products(&self, query: &str, limit: u32) -> Result<Vec<Product>, ApiError> {
        let response = self
            .request(reqwest::Method::GET, self.endpoint(&["catalog", "products"]))
            .query(&[
                ("search", query),
                ("limit", &limit.to_string()),
                ("status", "Published"),
            ])
            .send()
            .await?;
        let envelope: ProductsEnvelope = Self::read_json(response).await?;
        Ok(envelope.products)
    }

    /// Search active categories by text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_categories(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Category>, ApiError> {
        let response = self
            .request(
                reqwest::Method::GET,
                self.endpoint(&["catalog", "categories"]),
            )
            .query(&[
                ("search", query),
                ("limit", &limit.to_string()),
                ("status", "Active"),
            ])
            .send()
            .await?;
        let envelope: CategoriesEnvelope = Self::read_json(response).await?;
        Ok(envelope.categories)
    }
}

impl CustomerApi for RestClient {
    #[instrument(skip(self))]
    async fn fetch_wishlist(&self) -> Result<Vec<WishlistEntry>, ApiError> {
        let response = self
            .request(
                reqwest::Method::GET,
                self.endpoint(&["customer", "wishlist"]),
            )
            .send()
            .await?;
        let envelope: WishlistEnvelope = Self::read_json(response).await?;
        Ok(envelope.wishlist.items)
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn add_wishlist_item(&self, product_id: &ProductId) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::POST,
                self.endpoint(&["customer", "wishlist"]),
            )
            .json(&serde_json::json!({ "productId": product_id }))
            .send()
            .await?;
        Self::check_status(response).await
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn remove_wishlist_item(&self, product_id: &ProductId) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                self.endpoint(&["customer", "wishlist", product_id.as_str()]),
            )
            .send()
            .await?;
        Self::check_status(response).await
    }

    #[instrument(skip(self))]
    async fn clear_wishlist(&self) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                self.endpoint(&["customer", "wishlist"]),
            )
            .send()
            .await?;
        Self::check_status(response).await
    }
}

impl CatalogSearch for RestClient {
    async fn search(&self, query: String, limit: u32) -> Result<SearchHits, ApiError> {
        let (products, categories) = tokio::join!(
            self.search_products(&query, limit),
            self.search_categories(&query, limit),
        );
        Ok(SearchHits {
            products: products?,
            categories: categories?,
        })
    }
}
