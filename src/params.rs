//! Ordered HTTP query parameter carrier.
//!
//! Encoders build their output by repeated [`QueryParams::set`] calls, each returning the
//! updated carrier, so several producers (filter encoder, pagination) can be chained.

use std::fmt;

use url::Url;
use url::form_urlencoded;

/// Ordered multi-map of string keys to string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `key` with `value`.
    ///
    /// An existing key keeps the position of its first occurrence; a new key is appended.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.entries[first].1 = value;
                let mut index = 0;
                self.entries.retain(|(k, _)| {
                    let keep = index <= first || *k != key;
                    index += 1;
                    keep
                });
            }
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Add another value for `key`, keeping existing ones.
    #[must_use]
    pub fn append(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Remove every value of `key`.
    #[must_use]
    pub fn delete(mut self, key: &str) -> Self {
        self.entries.retain(|(k, _)| k != key);
        self
    }

    /// Set every pair of `other` on top of this carrier, in `other`'s order.
    #[must_use]
    pub fn merge(self, other: QueryParams) -> Self {
        other
            .entries
            .into_iter()
            .fold(self, |params, (key, value)| params.set(key, value))
    }

    /// First value of `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Distinct keys in insertion order
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for (key, _) in &self.entries {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` serialization, ready to put after `?`.
    #[must_use]
    pub fn to_encoded_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Append every pair to the query of `url`.
    pub fn apply_to(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(self.iter());
    }
}

/// Decoded `key=value&key=value` form, as the backend sees it after URL decoding.
impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_serialize_to_empty_string() {
        let params = QueryParams::new();
        assert_eq!(params.to_string(), "");
        assert_eq!(params.to_encoded_string(), "");
        assert!(params.is_empty());
    }

    #[test]
    fn test_set_appends_new_keys_in_order() {
        let params = QueryParams::new().set("include", "user").set("sort", "-id");
        assert_eq!(params.to_string(), "include=user&sort=-id");
        assert_eq!(params.keys(), ["include", "sort"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let params = QueryParams::new()
            .set("a", "1")
            .append("b", "2")
            .append("a", "3")
            .set("a", "4");
        assert_eq!(params.to_string(), "a=4&b=2");
        assert_eq!(params.get_all("a"), ["4"]);
    }

    #[test]
    fn test_append_keeps_existing_values() {
        let params = QueryParams::new().append("a", "1").append("a", "2");
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get_all("a"), ["1", "2"]);
        assert_eq!(params.len(), 2);
        assert_eq!(params.keys(), ["a"]);
    }

    #[test]
    fn test_delete() {
        let params = QueryParams::new().set("a", "1").set("b", "2").delete("a");
        assert!(!params.has("a"));
        assert_eq!(params.to_string(), "b=2");
    }

    #[test]
    fn test_merge_overrides_existing_keys() {
        let base = QueryParams::new().set("sort", "id").set("include", "user");
        let merged = base.merge(QueryParams::new().set("sort", "-id").set("page[limit]", "10"));
        assert_eq!(merged.to_string(), "sort=-id&include=user&page[limit]=10");
    }

    #[test]
    fn test_encoded_string_round_trips() {
        let params = QueryParams::new().set("filter", r#"{"EQ": {"auto": "Mazda"}}"#);
        let encoded = params.to_encoded_string();
        assert!(!encoded.contains('"'));
        let decoded: Vec<(String, String)> = form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(decoded, [("filter".to_string(), r#"{"EQ": {"auto": "Mazda"}}"#.to_string())]);
    }

    #[test]
    fn test_apply_to_url() {
        let mut url = Url::parse("https://api.example.com/cars").unwrap();
        QueryParams::new()
            .set("filter[name][LIKE]", "Maz%")
            .apply_to(&mut url);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, [("filter[name][LIKE]".to_string(), "Maz%".to_string())]);
    }

    #[test]
    fn test_apply_empty_leaves_url_untouched() {
        let mut url = Url::parse("https://api.example.com/cars").unwrap();
        QueryParams::new().apply_to(&mut url);
        assert_eq!(url.as_str(), "https://api.example.com/cars");
    }
}
