//! Query string parameters.
//!
//! Parsing follows `application/x-www-form-urlencoded` rules: the raw string
//! is split on `&`, each segment on its first `=`, and both halves are
//! percent-decoded. A segment without `=` becomes a key with an empty value,
//! and `=v` becomes an empty key with value `v`. Empty segments are skipped.
//! Duplicate keys stay separate entries.

use url::form_urlencoded;

/// Ordered multimap of query key to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (without the leading `?`).
    ///
    /// `None` and `""` both produce an empty set.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|q| !q.is_empty()) else {
            return Self::new();
        };

        let entries = form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Self { entries }
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// All values for `key`, in the order they appeared.
    pub fn get(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-encode as a form-urlencoded query string.
    pub fn to_encoded_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.entries.iter())
            .finish()
    }
}
