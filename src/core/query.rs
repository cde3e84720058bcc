//! Query-string construction.
//!
//! Absent values never reach the wire: `None` and values that render to an
//! empty string are dropped instead of being sent as `key=`.

use std::fmt::Display;

/// Ordered list of query pairs. Lists are sent as repeated keys.
///
/// # Examples
///
/// ```rust
/// use opendota::core::QueryParams;
///
/// let mut q = QueryParams::new();
/// q.push_opt("limit", Some(5)).push_opt("win", None::<u8>);
/// q.push_list("with_hero_id", &[1, 2]);
///
/// assert_eq!(q.get("limit"), Some("5"));
/// assert!(!q.contains("win"));
/// assert_eq!(q.get_all("with_hero_id"), vec!["1", "2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.0.push((key.to_string(), value));
        }
        self
    }

    pub fn push_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    pub fn push_list<V: Display>(&mut self, key: &str, values: &[V]) -> &mut Self {
        for v in values {
            self.push(key, v);
        }
        self
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Pairs sorted by key then value, so equal queries built in a
    /// different order compare equal.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self
            .0
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort();
        pairs
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut q = QueryParams::new();
        for (k, v) in iter {
            let k: String = k.into();
            q.push(&k, v);
        }
        q
    }
}
