//! Ordered request parameters for list endpoints.
//!
//! Parameters keep their insertion order so that serializing the same
//! logical request always produces the same string. Callers that build
//! parameters in a stable order therefore get stable cache keys.

use serde::{Deserialize, Serialize};

/// An ordered mapping of query parameters for a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListParams(Vec<(String, String)>);

impl ListParams {
    /// Create an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Set a parameter, replacing an existing value in place (the original
    /// insertion position is kept) or appending a new pair.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(pair) = self.0.iter_mut().find(|(k, _)| *k == key) {
            pair.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Look up a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a parameter if present.
    pub fn remove(&mut self, key: &str) {
        self.0.retain(|(k, _)| k != key);
    }

    /// Iterate over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether any parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ListParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = ListParams::new();
        params.set("status", "Draft");
        params.set("search", "tote");
        params.set("status", "Published");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("status", "Published"), ("search", "tote")]);
    }

    #[test]
    fn test_get_and_remove() {
        let mut params: ListParams = [("limit", "20")].into_iter().collect();
        assert_eq!(params.get("limit"), Some("20"));
        params.remove("limit");
        assert_eq!(params.get("limit"), None);
        assert!(params.is_empty());
    }
}
