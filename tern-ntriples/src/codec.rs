//! Term-level encoding and decoding.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::str::CharIndices;

use tern_core::{Literal, Term};

use crate::error::{NtriplesError, Result};

/// Encode a term into its canonical N-Triples text.
///
/// IRIs become `<uri>`, blank nodes `_:label`, literals a quoted escaped
/// lexical form followed by `@lang` or `^^<datatype>` when present.
pub fn encode_term(term: &Term) -> String {
    match term {
        Term::Iri(uri) => {
            let mut out = String::with_capacity(uri.len() + 2);
            out.push('<');
            escape_into(uri, &mut out);
            out.push('>');
            out
        }
        Term::BlankNode(label) => format!("_:{label}"),
        Term::Literal(lit) => {
            let mut out = String::with_capacity(lit.lexical().len() + 2);
            out.push('"');
            escape_into(lit.lexical(), &mut out);
            out.push('"');
            if let Some(language) = lit.language() {
                out.push('@');
                out.push_str(language);
            } else if let Some(datatype) = lit.datatype() {
                out.push_str("^^<");
                escape_into(datatype, &mut out);
                out.push('>');
            }
            out
        }
    }
}

/// Escape a string for embedding in N-Triples text.
///
/// `\` `"` `\n` `\r` `\t` get two-character escapes; other characters in
/// the ranges 0x00..=0x08, 0x0B, 0x0C, 0x0E..=0x1F, and 0x7F..=0xFFFF are
/// rendered `\uHHHH`; characters above 0xFFFF are rendered `\UHHHHHHHH`.
/// Hex digits are uppercase.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => {
                let cp = ch as u32;
                if cp <= 0x08
                    || cp == 0x0B
                    || cp == 0x0C
                    || (0x0E..=0x1F).contains(&cp)
                    || (0x7F..=0xFFFF).contains(&cp)
                {
                    let _ = write!(out, "\\u{cp:04X}");
                } else if cp >= 0x1_0000 {
                    let _ = write!(out, "\\U{cp:08X}");
                } else {
                    out.push(ch);
                }
            }
        }
    }
}

/// Expand every escape sequence in `text`.
///
/// Recognized escapes: `\t \b \n \r \f \" \' \\`, `\uHHHH` (one UTF-16
/// code unit; surrogate pairs combine into one code point, lone surrogates
/// are rejected), and `\UHHHHHHHH` (one code point). Input without a
/// backslash is returned borrowed without allocation.
pub fn unescape(text: &str) -> Result<Cow<'_, str>> {
    if !text.contains('\\') {
        return Ok(Cow::Borrowed(text));
    }
    let mut out = String::with_capacity(text.len());
    let mut iter = text.char_indices();
    while let Some((pos, ch)) = iter.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some((_, esc)) = iter.next() else {
            return Err(NtriplesError::escape(pos, "trailing backslash"));
        };
        match esc {
            't' => out.push('\t'),
            'b' => out.push('\u{0008}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{000C}'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            'u' => {
                let unit = hex_escape(&mut iter, 4, pos)?;
                let ch = match unit {
                    0xD800..=0xDBFF => combine_surrogates(unit, &mut iter, pos)?,
                    0xDC00..=0xDFFF => {
                        return Err(NtriplesError::escape(pos, "unpaired low surrogate"))
                    }
                    _ => char::from_u32(unit).ok_or_else(|| {
                        NtriplesError::escape(pos, format!("invalid code unit U+{unit:04X}"))
                    })?,
                };
                out.push(ch);
            }
            'U' => {
                let cp = hex_escape(&mut iter, 8, pos)?;
                let ch = char::from_u32(cp).ok_or_else(|| {
                    NtriplesError::escape(pos, format!("invalid code point U+{cp:08X}"))
                })?;
                out.push(ch);
            }
            other => {
                return Err(NtriplesError::escape(
                    pos,
                    format!("unknown escape '\\{other}'"),
                ))
            }
        }
    }
    Ok(Cow::Owned(out))
}

fn hex_escape(iter: &mut CharIndices<'_>, digits: u32, start: usize) -> Result<u32> {
    let mut value = 0u32;
    for _ in 0..digits {
        let Some((_, ch)) = iter.next() else {
            return Err(NtriplesError::escape(start, "truncated escape"));
        };
        let digit = ch.to_digit(16).ok_or_else(|| {
            NtriplesError::escape(start, format!("non-hex digit '{ch}' in escape"))
        })?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn combine_surrogates(high: u32, iter: &mut CharIndices<'_>, start: usize) -> Result<char> {
    match (iter.next(), iter.next()) {
        (Some((_, '\\')), Some((_, 'u'))) => {}
        _ => return Err(NtriplesError::escape(start, "unpaired high surrogate")),
    }
    let low = hex_escape(iter, 4, start)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(NtriplesError::escape(start, "unpaired high surrogate"));
    }
    let cp = 0x1_0000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(cp)
        .ok_or_else(|| NtriplesError::escape(start, format!("invalid code point U+{cp:08X}")))
}

/// Decode a term from its N-Triples text.
///
/// `<...>` yields an IRI (contents unescaped), `_:label` a blank node,
/// and `"..."` with an optional `@lang` or `^^<datatype>` suffix a
/// literal. Anything else is an invalid term.
pub fn decode_term(text: &str) -> Result<Term> {
    if let Some(inner) = text.strip_prefix('<') {
        let uri = inner
            .strip_suffix('>')
            .ok_or_else(|| NtriplesError::invalid_term(text.len(), "missing closing '>'"))?;
        return Ok(Term::Iri(unescape(uri)?.into_owned()));
    }
    if let Some(label) = text.strip_prefix("_:") {
        if label.is_empty() {
            return Err(NtriplesError::invalid_term(2, "empty blank node label"));
        }
        return Ok(Term::blank(label));
    }
    if !text.starts_with('"') {
        return Err(NtriplesError::invalid_term(
            0,
            "expected '<...>', '_:label', or a quoted literal",
        ));
    }
    let close = end_of_literal_value(text)?;
    let lexical = unescape(&text[1..close])?.into_owned();
    let rest = &text[close + 1..];
    if rest.is_empty() {
        return Ok(Literal::simple(lexical).into());
    }
    if let Some(language) = rest.strip_prefix('@') {
        if language.is_empty() {
            return Err(NtriplesError::invalid_term(close + 1, "empty language tag"));
        }
        return Ok(Literal::lang(lexical, language).into());
    }
    if let Some(datatype) = rest.strip_prefix("^^") {
        let datatype = datatype
            .strip_prefix('<')
            .and_then(|dt| dt.strip_suffix('>'))
            .ok_or_else(|| {
                NtriplesError::invalid_term(close + 1, "datatype must be '<...>' delimited")
            })?;
        return Ok(Literal::typed(lexical, unescape(datatype)?.into_owned()).into());
    }
    Err(NtriplesError::invalid_term(
        close + 1,
        "unexpected characters after closing quote",
    ))
}

/// Decode a term that must be usable in subject position (IRI or blank
/// node).
pub fn decode_subject(text: &str) -> Result<Term> {
    match decode_term(text)? {
        term @ (Term::Iri(_) | Term::BlankNode(_)) => Ok(term),
        Term::Literal(_) => Err(NtriplesError::invalid_term(
            0,
            "literal in subject position",
        )),
    }
}

/// Decode a term that must be usable in predicate position (IRI only).
pub fn decode_predicate(text: &str) -> Result<Term> {
    match decode_term(text)? {
        term @ Term::Iri(_) => Ok(term),
        _ => Err(NtriplesError::invalid_term(0, "predicate must be an IRI")),
    }
}

/// Byte index of the closing quote of a literal starting at byte 0.
///
/// A quote preceded by an odd number of backslashes is escaped and does not
/// terminate the value; the previous-character-was-backslash flag toggles
/// across `\\` pairs. Byte scanning is safe here because `"` and `\` never
/// occur inside a UTF-8 multi-byte sequence.
pub(crate) fn end_of_literal_value(text: &str) -> Result<usize> {
    let mut backslash = false;
    for (i, b) in text.bytes().enumerate().skip(1) {
        match b {
            b'\\' => backslash = !backslash,
            b'"' if !backslash => return Ok(i),
            _ => backslash = false,
        }
    }
    Err(NtriplesError::invalid_term(
        text.len(),
        "unterminated literal",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_vocab::xsd;

    #[test]
    fn encodes_iri() {
        assert_eq!(
            encode_term(&Term::iri("http://example/1")),
            "<http://example/1>"
        );
    }

    #[test]
    fn encodes_blank_node() {
        assert_eq!(encode_term(&Term::blank("b42")), "_:b42");
    }

    #[test]
    fn encodes_literal_forms() {
        assert_eq!(encode_term(&Literal::simple("foo").into()), "\"foo\"");
        assert_eq!(encode_term(&Literal::lang("bar", "en").into()), "\"bar\"@en");
        assert_eq!(
            encode_term(&Literal::typed("42", xsd::INTEGER).into()),
            format!("\"42\"^^<{}>", xsd::INTEGER)
        );
    }

    #[test]
    fn decodes_language_literal() {
        let term = decode_term("\"bar\"@en").unwrap();
        let lit = term.as_literal().unwrap();
        assert_eq!(lit.lexical(), "bar");
        assert_eq!(lit.language(), Some("en"));
        assert_eq!(lit.datatype(), None);
    }

    #[test]
    fn decodes_typed_literal() {
        let text = format!("\"42\"^^<{}>", xsd::INTEGER);
        let term = decode_term(&text).unwrap();
        let lit = term.as_literal().unwrap();
        assert_eq!(lit.lexical(), "42");
        assert_eq!(lit.datatype(), Some(xsd::INTEGER));
        assert_eq!(lit.language(), None);
    }

    #[test]
    fn unterminated_literal_is_invalid() {
        assert!(matches!(
            decode_term("\"abc"),
            Err(NtriplesError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(decode_term("abc").is_err());
        assert!(decode_term("<http://no-close").is_err());
        assert!(decode_term("_:").is_err());
        assert!(decode_term("\"x\"@").is_err());
        assert!(decode_term("\"x\"^^http://bare").is_err());
        assert!(decode_term("\"x\"junk").is_err());
    }

    #[test]
    fn escaped_quote_does_not_terminate() {
        let term = decode_term(r#""a\"b""#).unwrap();
        assert_eq!(term.as_literal().unwrap().lexical(), "a\"b");
    }

    #[test]
    fn double_backslash_before_quote_terminates() {
        // The value is a single backslash; the quote after it closes the
        // literal.
        let term = decode_term(r#""a\\""#).unwrap();
        assert_eq!(term.as_literal().unwrap().lexical(), "a\\");
    }

    #[test]
    fn unescape_expands_every_escape() {
        assert_eq!(
            unescape(r#"\t\b\n\r\f\"\'\\"#).unwrap(),
            "\t\u{0008}\n\r\u{000C}\"'\\"
        );
        assert_eq!(unescape(r"A").unwrap(), "A");
        assert_eq!(unescape(r"\U0001F600").unwrap(), "\u{1F600}");
    }

    #[test]
    fn unescape_fast_path_borrows() {
        assert!(matches!(
            unescape("no escapes here").unwrap(),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn unescape_combines_surrogate_pairs() {
        // UTF-16 encoding of U+1F600 as two \u escapes.
        assert_eq!(unescape(r"\uD83D\uDE00").unwrap(), "\u{1F600}");
    }

    #[test]
    fn unescape_rejects_bad_input() {
        assert!(matches!(
            unescape("oops\\"),
            Err(NtriplesError::Escape { .. })
        ));
        assert!(unescape(r"\u00").is_err()); // truncated
        assert!(unescape(r"\u00zz").is_err()); // non-hex
        assert!(unescape(r"\q").is_err()); // unknown letter
        assert!(unescape(r"\uD83D").is_err()); // lone high surrogate
        assert!(unescape(r"\uDE00").is_err()); // lone low surrogate
        assert!(unescape(r"\U00110000").is_err()); // beyond Unicode
    }

    #[test]
    fn escape_renders_control_and_supplementary_chars() {
        assert_eq!(escape("a\u{0001}b"), "a\\u0001b");
        assert_eq!(escape("\u{0B}\u{0C}\u{7F}"), "\\u000B\\u000C\\u007F");
        assert_eq!(escape("é"), "\\u00E9");
        assert_eq!(escape("\u{1F600}"), "\\U0001F600");
        assert_eq!(escape("tab\there"), "tab\\there");
    }

    #[test]
    fn escape_output_has_no_raw_specials() {
        let input = "a\"b\\c\nd\u{0007}e\u{1F600}";
        let escaped = escape(input);
        for ch in escaped.chars() {
            assert!(!ch.is_control(), "raw control char in {escaped:?}");
            assert!((ch as u32) < 0x7F, "unescaped non-ASCII in {escaped:?}");
        }
        // Every embedded quote must be escaped: quoting the output yields a
        // literal whose value runs to the final quote, never shorter.
        let quoted = format!("\"{escaped}\"");
        assert_eq!(end_of_literal_value(&quoted).unwrap(), quoted.len() - 1);
    }

    #[test]
    fn round_trips_preserve_terms() {
        let terms: Vec<Term> = vec![
            Term::iri("http://example/1"),
            Term::iri("http://example/ä?q=\u{1F600}"),
            Term::blank("node0"),
            Literal::simple("plain").into(),
            Literal::simple("with \"quotes\" and \\slashes\\").into(),
            Literal::simple("line\nbreak\ttab").into(),
            Literal::simple("\u{0001}\u{001F}\u{007F}\u{FFFD}\u{10FFFF}").into(),
            Literal::lang("hello", "en-GB").into(),
            Literal::typed("2014-01-01", xsd::DATE).into(),
            Literal::typed("-7", xsd::INTEGER).into(),
        ];
        for term in terms {
            let encoded = encode_term(&term);
            let decoded = decode_term(&encoded).unwrap();
            assert_eq!(decoded, term, "round trip failed via {encoded:?}");
        }
    }

    #[test]
    fn decode_canonicalizes_foreign_escapes() {
        // \u0041 is legal on input but canonical encoding leaves 'A' raw.
        let term = decode_term(r#""\u0041""#).unwrap();
        assert_eq!(encode_term(&term), "\"A\"");
    }

    #[test]
    fn subject_position_rejects_literals() {
        assert!(decode_subject("<http://ex/s>").is_ok());
        assert!(decode_subject("_:b").is_ok());
        assert!(decode_subject("\"lit\"").is_err());
    }

    #[test]
    fn predicate_position_requires_iri() {
        assert!(decode_predicate("<http://ex/p>").is_ok());
        assert!(decode_predicate("_:b").is_err());
        assert!(decode_predicate("\"lit\"").is_err());
    }

    #[test]
    fn iri_with_embedded_gt_uses_last_delimiter() {
        let term = decode_term("<http://ex/a>b>").unwrap();
        assert_eq!(term.as_iri(), Some("http://ex/a>b"));
    }
}
