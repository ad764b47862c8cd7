//! Request identity and its canonical string form.
//!
//! The host supplies an origin, a path and the ordered query parameters of
//! the run under test. The control key is removed before anything is hashed,
//! so `?id=7&TEST=save` and `?id=7&TEST=assert` share one fingerprint.

use url::form_urlencoded;

/// Ordered query parameters.
///
/// A repeated key keeps the position of its first occurrence and the value
/// of its last one, matching how web hosts expose query strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored; empty segments are skipped and a key with
    /// no `=` gets an empty value.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Copy of these parameters with `key` removed.
    pub fn without(&self, key: &str) -> QueryParams {
        QueryParams {
            pairs: self
                .pairs
                .iter()
                .filter(|(k, _)| k != key)
                .cloned()
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `k1=v1&k2=v2` with keys and values written as parsed (decoded).
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// What the host knows about the current run: where it was served from and
/// with which parameters, control key included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub origin: String,
    pub path: String,
    pub params: QueryParams,
}

impl Request {
    pub fn new(origin: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            path: path.into(),
            params: QueryParams::new(),
        }
    }

    /// Build a request from a raw query string.
    pub fn parse(origin: impl Into<String>, path: impl Into<String>, query: &str) -> Self {
        Self {
            origin: origin.into(),
            path: path.into(),
            params: QueryParams::parse(query),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Value of the control key, if present.
    pub fn command(&self, control_key: &str) -> Option<&str> {
        self.params.get(control_key)
    }

    /// Identity of this request with the control key filtered out.
    pub fn identity(&self, control_key: &str, suffix: &str) -> Identity {
        Identity::new(
            self.origin.clone(),
            self.path.clone(),
            self.params.without(control_key),
            suffix,
        )
    }
}

/// Canonical identity of one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    origin: String,
    path: String,
    params: QueryParams,
    suffix: String,
}

impl Identity {
    /// `params` must already exclude the control key; see [`Request::identity`].
    pub fn new(
        origin: impl Into<String>,
        path: impl Into<String>,
        params: QueryParams,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            path: path.into(),
            params,
            suffix: suffix.into(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// origin + path + (`?` + params, or nothing when there are none)
    pub fn canonical_url(&self) -> String {
        let mut url = format!("{}{}", self.origin, self.path);
        if !self.params.is_empty() {
            url.push('?');
            url.push_str(&self.params.to_query_string());
        }
        url
    }

    /// Canonical URL followed by the disambiguation suffix. This is what
    /// gets hashed.
    pub fn canonical_string(&self) -> String {
        format!("{}{}", self.canonical_url(), self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order_and_decodes() {
        let params = QueryParams::parse("?b=2&a=hello+world&c=%2Fx");
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![("b", "2"), ("a", "hello world"), ("c", "/x")]
        );
    }

    #[test]
    fn test_repeated_key_keeps_first_position_last_value() {
        let params = QueryParams::parse("a=1&b=2&a=3");
        assert_eq!(params.to_query_string(), "a=3&b=2");
    }

    #[test]
    fn test_key_without_value_and_empty_segments() {
        let params = QueryParams::parse("flag&&x=1");
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_canonical_url_without_params_has_no_question_mark() {
        let id = Identity::new("https://x", "/p", QueryParams::new(), "");
        assert_eq!(id.canonical_url(), "https://x/p");
    }

    #[test]
    fn test_identity_filters_control_key() {
        let request = Request::parse("https://x", "/p", "code=123&TEST=save&type=abc");
        let id = request.identity("TEST", "pcsite");

        assert_eq!(id.canonical_url(), "https://x/p?code=123&type=abc");
        assert_eq!(id.canonical_string(), "https://x/p?code=123&type=abcpcsite");
        assert_eq!(request.command("TEST"), Some("save"));
    }

    #[test]
    fn test_only_control_key_yields_bare_url() {
        let request = Request::parse("https://x", "/p", "TEST=assert");
        assert_eq!(request.identity("TEST", "").canonical_url(), "https://x/p");
    }

    #[test]
    fn test_with_param_builder() {
        let request = Request::new("https://x", "/p")
            .with_param("id", "7")
            .with_param("TEST", "save");
        assert_eq!(request.params.to_query_string(), "id=7&TEST=save");
    }
}
