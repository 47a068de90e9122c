//! The indexed document shape.

use serde::{Deserialize, Serialize};

/// One triple as stored in the search index.
///
/// `s`, `p`, and `o` always hold canonical N-Triples text. For literal
/// objects, at most one of the typed fields (`o_b`/`o_l`/`o_f`/`o_d`/`o_s`)
/// additionally holds the value in its native shape; for non-literal
/// objects `o_s` repeats the encoded text so object-equality filters have
/// a field to target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub s: String,
    pub p: String,
    pub o: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_b: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_l: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_f: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_s: Option<String>,
}

impl Document {
    /// Create a document with the three mandatory term fields.
    pub fn new(s: impl Into<String>, p: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            s: s.into(),
            p: p.into(),
            o: o.into(),
            c: None,
            o_lang: None,
            o_b: None,
            o_l: None,
            o_f: None,
            o_d: None,
            o_s: None,
        }
    }

    /// Set the named graph field.
    pub fn with_graph(mut self, c: impl Into<String>) -> Self {
        self.c = Some(c.into());
        self
    }

    /// Set the language tag field.
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.o_lang = Some(lang.into());
        self
    }

    /// Set the boolean object field.
    pub fn with_boolean(mut self, value: bool) -> Self {
        self.o_b = Some(value);
        self
    }

    /// Set the integer object field.
    pub fn with_long(mut self, value: i64) -> Self {
        self.o_l = Some(value);
        self
    }

    /// Set the double object field.
    pub fn with_double(mut self, value: f64) -> Self {
        self.o_f = Some(value);
        self
    }

    /// Set the date object field (lexical form; the mapping types it).
    pub fn with_date(mut self, value: impl Into<String>) -> Self {
        self.o_d = Some(value.into());
        self
    }

    /// Set the string object field.
    pub fn with_string_value(mut self, value: impl Into<String>) -> Self {
        self.o_s = Some(value.into());
        self
    }

    /// Number of populated typed object fields. Valid documents have at
    /// most one.
    pub fn typed_field_count(&self) -> usize {
        usize::from(self.o_b.is_some())
            + usize::from(self.o_l.is_some())
            + usize::from(self.o_f.is_some())
            + usize::from(self.o_d.is_some())
            + usize::from(self.o_s.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_omitted_from_json() {
        let doc = Document::new("<http://ex/s>", "<http://ex/p>", "\"7\"").with_long(7);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "s": "<http://ex/s>",
                "p": "<http://ex/p>",
                "o": "\"7\"",
                "o_l": 7
            })
        );
    }

    #[test]
    fn round_trips_through_json() {
        let doc = Document::new("<s>", "<p>", "\"x\"@en")
            .with_graph("<http://ex/g>")
            .with_language("en")
            .with_string_value("x");
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn typed_field_count_counts_each_kind() {
        assert_eq!(Document::new("a", "b", "c").typed_field_count(), 0);
        assert_eq!(
            Document::new("a", "b", "c").with_boolean(true).typed_field_count(),
            1
        );
        assert_eq!(
            Document::new("a", "b", "c")
                .with_date("2014-01-01")
                .typed_field_count(),
            1
        );
    }
}
