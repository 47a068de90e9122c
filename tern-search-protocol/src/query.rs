//! Field-equality filter queries.

use serde::{Deserialize, Serialize};

/// A value matched against a single document field.
///
/// Untagged so clauses serialize as plain JSON scalars. Variant order
/// matters for deserialization: booleans and integers must be tried
/// before doubles so `true` and `7` keep their native shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClauseValue {
    Bool(bool),
    Long(i64),
    Double(f64),
    Text(String),
}

impl From<bool> for ClauseValue {
    fn from(value: bool) -> Self {
        ClauseValue::Bool(value)
    }
}

impl From<i64> for ClauseValue {
    fn from(value: i64) -> Self {
        ClauseValue::Long(value)
    }
}

impl From<f64> for ClauseValue {
    fn from(value: f64) -> Self {
        ClauseValue::Double(value)
    }
}

impl From<String> for ClauseValue {
    fn from(value: String) -> Self {
        ClauseValue::Text(value)
    }
}

impl From<&str> for ClauseValue {
    fn from(value: &str) -> Self {
        ClauseValue::Text(value.to_owned())
    }
}

/// Exact-match condition on one document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermClause {
    pub field: String,
    pub value: ClauseValue,
}

impl TermClause {
    pub fn new(field: impl Into<String>, value: impl Into<ClauseValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Conjunction of term clauses. An empty conjunction matches every
/// document in the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clauses: Vec<TermClause>,
}

impl FilterQuery {
    /// The unconstrained query.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Append an exact-match clause.
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<ClauseValue>) {
        self.clauses.push(TermClause::new(field, value));
    }

    /// True when no clauses constrain the result set.
    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clause_values_serialize_as_scalars() {
        let mut query = FilterQuery::match_all();
        query.push("o_b", true);
        query.push("o_l", 42i64);
        query.push("s", "<http://ex/s>");
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "clauses": [
                    { "field": "o_b", "value": true },
                    { "field": "o_l", "value": 42 },
                    { "field": "s", "value": "<http://ex/s>" }
                ]
            })
        );
    }

    #[test]
    fn integers_deserialize_as_longs_not_doubles() {
        let clause: TermClause =
            serde_json::from_value(serde_json::json!({ "field": "o_l", "value": 7 })).unwrap();
        assert_eq!(clause.value, ClauseValue::Long(7));

        let clause: TermClause =
            serde_json::from_value(serde_json::json!({ "field": "o_f", "value": 7.5 })).unwrap();
        assert_eq!(clause.value, ClauseValue::Double(7.5));
    }

    #[test]
    fn match_all_serializes_without_clauses_key() {
        let json = serde_json::to_value(FilterQuery::match_all()).unwrap();
        assert_eq!(json, serde_json::json!({}));
        let back: FilterQuery = serde_json::from_value(json).unwrap();
        assert!(back.is_match_all());
    }
}
