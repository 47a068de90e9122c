//! Ordered query-string parameter map.
//!
//! The find route reads its pattern from raw query parameters rather
//! than a deserialized struct: when a key repeats, the first binding
//! wins, and unknown keys stay visible so they can be rejected.
//! Decoding follows `application/x-www-form-urlencoded` rules
//! (percent-decoding, `+` as space) and caps the number of accepted
//! pairs so an oversized query string cannot balloon the map.

use tracing::warn;

/// Parameter pairs accepted per request unless the server overrides it.
pub const DEFAULT_MAX_PARAMS: usize = 1024;

/// Decoded query parameters in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Decode a raw query string, keeping at most `max_params` pairs.
    ///
    /// Pairs past the cap are dropped with a warning rather than
    /// failing the request.
    pub fn decode(raw: &str, max_params: usize) -> Self {
        let mut pairs = Vec::new();
        let mut dropped = 0usize;
        for (name, value) in form_urlencoded::parse(raw.as_bytes()) {
            if pairs.len() >= max_params {
                dropped += 1;
                continue;
            }
            pairs.push((name.into_owned(), value.into_owned()));
        }
        if dropped > 0 {
            warn!(dropped, max_params, "query string over the parameter cap");
        }
        Self { pairs }
    }

    /// First value bound to `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value bound to `name` parsed as an integer; `None` when the
    /// parameter is absent or not an integer.
    pub fn first_as_i64(&self, name: &str) -> Option<i64> {
        self.first(name).and_then(|value| value.parse().ok())
    }

    /// True when at least one value is bound to `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.first(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_binding_wins() {
        let params = Params::decode("s=%3Ca%3E&o=1&s=%3Cb%3E", DEFAULT_MAX_PARAMS);
        assert_eq!(params.first("s"), Some("<a>"));
        assert_eq!(params.first("o"), Some("1"));
        assert_eq!(params.first("missing"), None);
    }

    #[test]
    fn test_percent_and_plus_decoding() {
        let params = Params::decode("o=%22hello+world%22%40en", DEFAULT_MAX_PARAMS);
        assert_eq!(params.first("o"), Some("\"hello world\"@en"));
    }

    #[test]
    fn test_cap_drops_extra_pairs() {
        let params = Params::decode("a=1&b=2&c=3&d=4&e=5", 3);
        assert!(params.contains("a"));
        assert!(params.contains("c"));
        assert!(!params.contains("d"));
        assert!(!params.contains("e"));
    }

    #[test]
    fn test_integer_parsing() {
        let params = Params::decode("limit=250&bad=abc", DEFAULT_MAX_PARAMS);
        assert_eq!(params.first_as_i64("limit"), Some(250));
        assert_eq!(params.first_as_i64("bad"), None);
        assert_eq!(params.first_as_i64("missing"), None);
    }

    #[test]
    fn test_bare_key_and_empty_query() {
        let params = Params::decode("flag&s=%3Ca%3E", DEFAULT_MAX_PARAMS);
        assert!(params.contains("flag"));
        assert_eq!(params.first("flag"), Some(""));

        let empty = Params::decode("", DEFAULT_MAX_PARAMS);
        assert!(!empty.contains("s"));
    }
}
