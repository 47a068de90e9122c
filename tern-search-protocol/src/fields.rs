//! Document field names for the triple index.

use tern_vocab::ObjectCategory;

/// Subject, canonical N-Triples text.
pub const S: &str = "s";
/// Predicate, canonical `<uri>` text.
pub const P: &str = "p";
/// Object, full canonical text (kept for display regardless of typed field).
pub const O: &str = "o";
/// Named graph, canonical `<uri>` text.
pub const C: &str = "c";
/// Language tag of a language-tagged literal object.
pub const O_LANG: &str = "o_lang";
/// Boolean object value.
pub const O_BOOLEAN: &str = "o_b";
/// Integer object value.
pub const O_LONG: &str = "o_l";
/// Double object value.
pub const O_DOUBLE: &str = "o_f";
/// Date or dateTime object value.
pub const O_DATE: &str = "o_d";
/// String object value; also holds the encoded text of non-literal objects.
pub const O_STRING: &str = "o_s";

/// The typed object field a storage category occupies.
pub fn object_field(category: ObjectCategory) -> &'static str {
    match category {
        ObjectCategory::Boolean => O_BOOLEAN,
        ObjectCategory::Long => O_LONG,
        ObjectCategory::Double => O_DOUBLE,
        ObjectCategory::Date => O_DATE,
        ObjectCategory::String => O_STRING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_distinct_field() {
        let fields = [
            object_field(ObjectCategory::Boolean),
            object_field(ObjectCategory::Long),
            object_field(ObjectCategory::Double),
            object_field(ObjectCategory::Date),
            object_field(ObjectCategory::String),
        ];
        for (i, a) in fields.iter().enumerate() {
            for b in &fields[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
