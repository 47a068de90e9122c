//! Statement-level parsing: one N-Triples line into a triple.

use tern_core::Triple;

use crate::codec::{decode_predicate, decode_subject, decode_term, end_of_literal_value};
use crate::error::{NtriplesError, Result};

/// Parse one N-Triples statement.
///
/// A statement is three whitespace-separated terms with an optional
/// terminating `.`, which may be attached directly to the last term.
/// Blank lines and `#` comment lines are not statements; callers skip
/// them before calling this.
pub fn parse_statement(line: &str) -> Result<Triple> {
    let (s_text, after_s) = next_term(line, 0)?;
    let (p_text, after_p) = next_term(line, after_s)?;
    let (o_text, after_o) = next_term(line, after_p)?;
    expect_end(line, after_o)?;
    let s = decode_subject(s_text)?;
    let p = decode_predicate(p_text)?;
    let o = decode_term(o_text)?;
    Ok(Triple::new(s, p, o))
}

fn skip_ws(line: &str, from: usize) -> usize {
    line[from..]
        .find(|c: char| !c.is_ascii_whitespace())
        .map(|i| from + i)
        .unwrap_or(line.len())
}

/// Extract the next term's text starting at or after `from`.
///
/// Term extents respect quoting: an IRI runs to its closing `>`, a literal
/// to its closing unescaped quote plus any `@lang` / `^^<...>` suffix, and
/// anything else (blank nodes) to the next whitespace or `.`.
fn next_term(line: &str, from: usize) -> Result<(&str, usize)> {
    let start = skip_ws(line, from);
    let rest = &line[start..];
    if rest.is_empty() || rest.starts_with('.') {
        return Err(NtriplesError::invalid_statement(start, "expected a term"));
    }
    let len = if rest.starts_with('<') {
        rest.find('>')
            .map(|i| i + 1)
            .ok_or_else(|| NtriplesError::invalid_term(start, "missing closing '>'"))?
    } else if rest.starts_with('"') {
        let close = end_of_literal_value(rest)?;
        let suffix = &rest[close + 1..];
        if let Some(language) = suffix.strip_prefix('@') {
            let lang_len = language
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                .unwrap_or(language.len());
            close + 2 + lang_len
        } else if let Some(datatype) = suffix.strip_prefix("^^") {
            if !datatype.starts_with('<') {
                return Err(NtriplesError::invalid_term(
                    start + close + 1,
                    "datatype must be '<...>' delimited",
                ));
            }
            let gt = datatype.find('>').ok_or_else(|| {
                NtriplesError::invalid_term(start + close + 1, "missing closing '>'")
            })?;
            close + 3 + gt + 1
        } else {
            close + 1
        }
    } else {
        rest.find(|c: char| c.is_ascii_whitespace() || c == '.')
            .unwrap_or(rest.len())
    };
    Ok((&rest[..len], start + len))
}

fn expect_end(line: &str, from: usize) -> Result<()> {
    let mut rest = line[from..].trim_start();
    if let Some(after) = rest.strip_prefix('.') {
        rest = after.trim_start();
    }
    if rest.is_empty() {
        Ok(())
    } else {
        Err(NtriplesError::invalid_statement(
            line.len() - rest.len(),
            "unexpected trailing characters",
        ))
    }
}
