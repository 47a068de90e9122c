//! Vocabulary constants and datatype classification.
//!
//! The only classification this adapter needs is the mapping from a
//! literal's datatype IRI to the storage category that decides which typed
//! document field holds the value (and which field an equality filter must
//! target). See [`categorize`].

/// XML Schema datatype IRIs.
pub mod xsd {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// Storage category of a literal object.
///
/// Selects the single typed document field a literal occupies and the
/// field an object-equality filter targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    /// `xsd:boolean`.
    Boolean,
    /// `xsd:int`, `xsd:integer`, `xsd:long`.
    Long,
    /// `xsd:decimal`, `xsd:double`.
    Double,
    /// `xsd:date`, `xsd:dateTime`.
    Date,
    /// Everything else, including absent datatypes.
    String,
}

/// Classify a datatype IRI into its storage category.
///
/// Deterministic and total: unknown datatypes and absent datatypes both
/// land in [`ObjectCategory::String`]. Note that `xsd:float` is not in the
/// double family here; only `decimal` and `double` are stored as doubles,
/// so floats fall through to the string category.
pub fn categorize(datatype: Option<&str>) -> ObjectCategory {
    match datatype {
        Some(xsd::BOOLEAN) => ObjectCategory::Boolean,
        Some(xsd::INT) | Some(xsd::INTEGER) | Some(xsd::LONG) => ObjectCategory::Long,
        Some(xsd::DECIMAL) | Some(xsd::DOUBLE) => ObjectCategory::Double,
        Some(xsd::DATE) | Some(xsd::DATE_TIME) => ObjectCategory::Date,
        _ => ObjectCategory::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_datatypes_map_to_their_category() {
        assert_eq!(categorize(Some(xsd::BOOLEAN)), ObjectCategory::Boolean);
        assert_eq!(categorize(Some(xsd::INT)), ObjectCategory::Long);
        assert_eq!(categorize(Some(xsd::INTEGER)), ObjectCategory::Long);
        assert_eq!(categorize(Some(xsd::LONG)), ObjectCategory::Long);
        assert_eq!(categorize(Some(xsd::DECIMAL)), ObjectCategory::Double);
        assert_eq!(categorize(Some(xsd::DOUBLE)), ObjectCategory::Double);
        assert_eq!(categorize(Some(xsd::DATE)), ObjectCategory::Date);
        assert_eq!(categorize(Some(xsd::DATE_TIME)), ObjectCategory::Date);
    }

    #[test]
    fn everything_else_is_string() {
        assert_eq!(categorize(None), ObjectCategory::String);
        assert_eq!(categorize(Some(xsd::STRING)), ObjectCategory::String);
        // float deliberately falls through
        assert_eq!(categorize(Some(xsd::FLOAT)), ObjectCategory::String);
        assert_eq!(
            categorize(Some("http://example/custom-type")),
            ObjectCategory::String
        );
    }
}
