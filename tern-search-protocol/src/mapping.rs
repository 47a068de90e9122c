//! Index field mapping.

use serde_json::{json, Value};

use crate::fields;

/// The field mapping installed when a triple index is created.
///
/// Term fields hold canonical N-Triples text and are matched exactly,
/// never tokenized. The typed object fields use the native types that
/// make range queries and sorting possible on the search side.
pub fn index_mapping() -> Value {
    json!({
        "properties": {
            fields::S: { "type": "keyword" },
            fields::P: { "type": "keyword" },
            fields::O: { "type": "keyword" },
            fields::C: { "type": "keyword" },
            fields::O_LANG: { "type": "keyword" },
            fields::O_BOOLEAN: { "type": "boolean" },
            fields::O_LONG: { "type": "long" },
            fields::O_DOUBLE: { "type": "double" },
            fields::O_DATE: { "type": "date" },
            fields::O_STRING: { "type": "keyword" },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_covers_every_document_field() {
        let mapping = index_mapping();
        let properties = mapping["properties"].as_object().unwrap();
        for field in [
            fields::S,
            fields::P,
            fields::O,
            fields::C,
            fields::O_LANG,
            fields::O_BOOLEAN,
            fields::O_LONG,
            fields::O_DOUBLE,
            fields::O_DATE,
            fields::O_STRING,
        ] {
            assert!(properties.contains_key(field), "missing mapping for {field}");
        }
        assert_eq!(properties.len(), 10);
    }

    #[test]
    fn test_typed_fields_use_native_types() {
        let mapping = index_mapping();
        assert_eq!(mapping["properties"][fields::O_BOOLEAN]["type"], "boolean");
        assert_eq!(mapping["properties"][fields::O_LONG]["type"], "long");
        assert_eq!(mapping["properties"][fields::O_DOUBLE]["type"], "double");
        assert_eq!(mapping["properties"][fields::O_DATE]["type"], "date");
        assert_eq!(mapping["properties"][fields::O_STRING]["type"], "keyword");
    }
}
