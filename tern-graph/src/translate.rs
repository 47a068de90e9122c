//! Pattern-to-query translation and document building.
//!
//! Both directions of the field mapping live here so they cannot drift
//! apart: [`filter_for`] turns a triple pattern into the conjunction of
//! field-equality clauses a search will run, and [`document_for`] turns
//! a concrete triple into the document shape those clauses match.

use tern_core::{Term, Triple, TriplePattern};
use tern_ntriples::encode_term;
use tern_search_protocol::{fields, Document, FilterQuery};
use tern_vocab::{categorize, ObjectCategory};

use crate::error::{GraphError, Result};

/// Translate a triple pattern into a filter query.
///
/// Bound components become equality clauses; unbound components add
/// nothing, so the fully unbound pattern degenerates to match-all.
/// Term fields are matched on canonical encoded text. A bound literal
/// object targets the typed field its datatype classifies into, plus
/// an `o_lang` clause when it carries a language tag.
pub fn filter_for(pattern: &TriplePattern) -> Result<FilterQuery> {
    let mut query = FilterQuery::match_all();

    if let Some(s) = &pattern.s {
        if s.is_literal() {
            return Err(GraphError::Translate {
                message: "subject must be an IRI or blank node".to_string(),
            });
        }
        query.push(fields::S, encode_term(s));
    }

    if let Some(p) = &pattern.p {
        if !p.is_iri() {
            return Err(GraphError::Translate {
                message: "predicate must be an IRI".to_string(),
            });
        }
        query.push(fields::P, encode_term(p));
    }

    if let Some(o) = &pattern.o {
        object_clauses(&mut query, o);
    }

    if let Some(graph) = &pattern.graph {
        if !graph.is_iri() {
            return Err(GraphError::Translate {
                message: "graph term must be an IRI".to_string(),
            });
        }
        query.push(fields::C, encode_term(graph));
    }

    Ok(query)
}

fn object_clauses(query: &mut FilterQuery, term: &Term) {
    let literal = match term.as_literal() {
        Some(literal) => literal,
        None => {
            // IRIs and blank nodes live in the string field in encoded form.
            query.push(fields::O_STRING, encode_term(term));
            return;
        }
    };

    if let Some(lang) = literal.language() {
        query.push(fields::O_LANG, lang);
    }

    let lexical = literal.lexical();
    match categorize(literal.datatype()) {
        ObjectCategory::Boolean => match parse_boolean(lexical) {
            Some(value) => query.push(fields::O_BOOLEAN, value),
            None => query.push(fields::O_STRING, lexical),
        },
        ObjectCategory::Long => match lexical.parse::<i64>() {
            Ok(value) => query.push(fields::O_LONG, value),
            Err(_) => query.push(fields::O_STRING, lexical),
        },
        ObjectCategory::Double => match lexical.parse::<f64>() {
            Ok(value) => query.push(fields::O_DOUBLE, value),
            Err(_) => query.push(fields::O_STRING, lexical),
        },
        ObjectCategory::Date => query.push(fields::O_DATE, lexical),
        ObjectCategory::String => query.push(fields::O_STRING, lexical),
    }
}

/// Build the indexed document for one triple.
///
/// `s`, `p`, and `o` always hold canonical encoded text; a literal
/// object additionally populates the one typed field its datatype
/// classifies into, with the same parse-or-fall-back-to-string rules
/// [`filter_for`] uses, so a stored triple is always findable by the
/// pattern that names it.
pub fn document_for(triple: &Triple, graph: Option<&Term>) -> Document {
    let mut doc = Document::new(
        encode_term(&triple.s),
        encode_term(&triple.p),
        encode_term(&triple.o),
    );

    if let Some(graph) = graph {
        doc = doc.with_graph(encode_term(graph));
    }

    let literal = match triple.o.as_literal() {
        Some(literal) => literal,
        None => return doc.with_string_value(encode_term(&triple.o)),
    };

    if let Some(lang) = literal.language() {
        doc = doc.with_language(lang);
    }

    let lexical = literal.lexical();
    match categorize(literal.datatype()) {
        ObjectCategory::Boolean => match parse_boolean(lexical) {
            Some(value) => doc.with_boolean(value),
            None => doc.with_string_value(lexical),
        },
        ObjectCategory::Long => match lexical.parse::<i64>() {
            Ok(value) => doc.with_long(value),
            Err(_) => doc.with_string_value(lexical),
        },
        ObjectCategory::Double => match lexical.parse::<f64>() {
            Ok(value) => doc.with_double(value),
            Err(_) => doc.with_string_value(lexical),
        },
        ObjectCategory::Date => doc.with_date(lexical),
        ObjectCategory::String => doc.with_string_value(lexical),
    }
}

fn parse_boolean(lexical: &str) -> Option<bool> {
    match lexical {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_core::Literal;
    use tern_search_protocol::ClauseValue;
    use tern_vocab::xsd;

    fn clause<'a>(query: &'a FilterQuery, field: &str) -> &'a ClauseValue {
        &query
            .clauses
            .iter()
            .find(|c| c.field == field)
            .unwrap_or_else(|| panic!("no clause on {field}"))
            .value
    }

    #[test]
    fn test_subject_only_pattern_yields_single_clause() {
        let pattern = TriplePattern::any().with_subject(Term::iri("http://ex/a"));
        let query = filter_for(&pattern).unwrap();

        assert_eq!(query.clauses.len(), 1);
        assert_eq!(query.clauses[0].field, "s");
        assert_eq!(
            query.clauses[0].value,
            ClauseValue::Text("<http://ex/a>".to_string())
        );
    }

    #[test]
    fn test_unbound_pattern_matches_all() {
        let query = filter_for(&TriplePattern::any()).unwrap();
        assert!(query.is_match_all());
    }

    #[test]
    fn test_language_literal_decomposes_into_two_clauses() {
        let pattern = TriplePattern::any().with_object(Literal::lang("bar", "en").into());
        let query = filter_for(&pattern).unwrap();

        assert_eq!(query.clauses.len(), 2);
        assert_eq!(clause(&query, "o_lang"), &ClauseValue::Text("en".to_string()));
        assert_eq!(clause(&query, "o_s"), &ClauseValue::Text("bar".to_string()));
    }

    #[test]
    fn test_integer_literal_targets_long_field() {
        let pattern =
            TriplePattern::any().with_object(Literal::typed("42", xsd::INTEGER).into());
        let query = filter_for(&pattern).unwrap();

        assert_eq!(query.clauses.len(), 1);
        assert_eq!(clause(&query, "o_l"), &ClauseValue::Long(42));
    }

    #[test]
    fn test_boolean_and_double_and_date_fields() {
        let query = filter_for(
            &TriplePattern::any().with_object(Literal::typed("true", xsd::BOOLEAN).into()),
        )
        .unwrap();
        assert_eq!(clause(&query, "o_b"), &ClauseValue::Bool(true));

        let query = filter_for(
            &TriplePattern::any().with_object(Literal::typed("1", xsd::BOOLEAN).into()),
        )
        .unwrap();
        assert_eq!(clause(&query, "o_b"), &ClauseValue::Bool(true));

        let query = filter_for(
            &TriplePattern::any().with_object(Literal::typed("2.5", xsd::DOUBLE).into()),
        )
        .unwrap();
        assert_eq!(clause(&query, "o_f"), &ClauseValue::Double(2.5));

        let query = filter_for(
            &TriplePattern::any()
                .with_object(Literal::typed("2014-01-06", xsd::DATE).into()),
        )
        .unwrap();
        assert_eq!(clause(&query, "o_d"), &ClauseValue::Text("2014-01-06".to_string()));
    }

    #[test]
    fn test_float_datatype_stays_in_string_field() {
        let query = filter_for(
            &TriplePattern::any().with_object(Literal::typed("2.5", xsd::FLOAT).into()),
        )
        .unwrap();
        assert_eq!(clause(&query, "o_s"), &ClauseValue::Text("2.5".to_string()));
    }

    #[test]
    fn test_unparseable_long_falls_back_to_string_field() {
        let query = filter_for(
            &TriplePattern::any().with_object(Literal::typed("abc", xsd::LONG).into()),
        )
        .unwrap();
        assert_eq!(query.clauses.len(), 1);
        assert_eq!(clause(&query, "o_s"), &ClauseValue::Text("abc".to_string()));
    }

    #[test]
    fn test_iri_object_targets_string_field() {
        let pattern = TriplePattern::any().with_object(Term::iri("http://ex/o"));
        let query = filter_for(&pattern).unwrap();
        assert_eq!(clause(&query, "o_s"), &ClauseValue::Text("<http://ex/o>".to_string()));
    }

    #[test]
    fn test_graph_clause_carries_graph_term() {
        let pattern = TriplePattern::any()
            .with_object(Term::iri("http://ex/o"))
            .with_graph(Term::iri("http://ex/g"));
        let query = filter_for(&pattern).unwrap();

        assert_eq!(clause(&query, "c"), &ClauseValue::Text("<http://ex/g>".to_string()));
        // The graph clause must not disturb the object clause.
        assert_eq!(clause(&query, "o_s"), &ClauseValue::Text("<http://ex/o>".to_string()));
    }

    #[test]
    fn test_literal_subject_rejected() {
        let pattern = TriplePattern::any().with_subject(Literal::simple("x").into());
        assert!(matches!(
            filter_for(&pattern),
            Err(GraphError::Translate { .. })
        ));
    }

    #[test]
    fn test_non_iri_predicate_rejected() {
        let pattern = TriplePattern::any().with_predicate(Term::blank("b0"));
        assert!(matches!(
            filter_for(&pattern),
            Err(GraphError::Translate { .. })
        ));

        let pattern = TriplePattern::any().with_graph(Term::blank("g0"));
        assert!(matches!(
            filter_for(&pattern),
            Err(GraphError::Translate { .. })
        ));
    }

    #[test]
    fn test_document_for_typed_literal() {
        let triple = Triple::new(
            Term::iri("http://ex/s"),
            Term::iri("http://ex/p"),
            Literal::typed("42", xsd::LONG).into(),
        );
        let doc = document_for(&triple, None);

        assert_eq!(doc.s, "<http://ex/s>");
        assert_eq!(doc.p, "<http://ex/p>");
        assert_eq!(doc.o, "\"42\"^^<http://www.w3.org/2001/XMLSchema#long>");
        assert_eq!(doc.o_l, Some(42));
        assert_eq!(doc.typed_field_count(), 1);
    }

    #[test]
    fn test_document_for_language_literal() {
        let triple = Triple::new(
            Term::iri("http://ex/s"),
            Term::iri("http://ex/p"),
            Literal::lang("bar", "en").into(),
        );
        let doc = document_for(&triple, None);

        assert_eq!(doc.o, "\"bar\"@en");
        assert_eq!(doc.o_lang.as_deref(), Some("en"));
        assert_eq!(doc.o_s.as_deref(), Some("bar"));
    }

    #[test]
    fn test_document_for_iri_object_and_graph() {
        let triple = Triple::new(
            Term::iri("http://ex/s"),
            Term::iri("http://ex/p"),
            Term::iri("http://ex/o"),
        );
        let graph = Term::iri("http://ex/g");
        let doc = document_for(&triple, Some(&graph));

        assert_eq!(doc.o_s.as_deref(), Some("<http://ex/o>"));
        assert_eq!(doc.c.as_deref(), Some("<http://ex/g>"));
    }

    #[test]
    fn test_document_and_filter_agree_on_fallback() {
        // An unparseable long lands in o_s on both sides, so the
        // pattern naming the literal still finds the stored triple.
        let object: Term = Literal::typed("abc", xsd::LONG).into();
        let triple = Triple::new(
            Term::iri("http://ex/s"),
            Term::iri("http://ex/p"),
            object.clone(),
        );
        let doc = document_for(&triple, None);
        let query = filter_for(&TriplePattern::any().with_object(object)).unwrap();

        assert_eq!(doc.o_s.as_deref(), Some("abc"));
        assert_eq!(clause(&query, "o_s"), &ClauseValue::Text("abc".to_string()));
    }
}
