//! Text run normalisation.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Numeric references with a plain ASCII stand-in. Applied before general
/// decoding so these never turn into typographic characters.
const SIMPLIFIED_ENTITIES: &[(&str, &str)] = &[
    ("&#8220;", "'"),
    ("&#8221;", "'"),
    ("&#8212;", "--"),
    ("&#8211;", "-"),
    ("&#8230;", "..."),
    ("&#215;", " x "),
    ("&#8482;", "(TM)"),
    ("&#174;", "(R)"),
    ("&#169;", "(C)"),
    ("&#8217;", "'"),
];

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|([A-Za-z][A-Za-z0-9]{1,31}));")
        .expect("entity pattern is valid")
});

/// Resolve a `&name;` reference against the HTML5 named character table.
///
/// Every HTML5 name expands to one or two code points. A longer result means
/// only a legacy prefix such as `&not` matched, so the reference is unknown.
fn named_entity(reference: &str) -> Option<String> {
    let decoded = html_escape::decode_html_entities(reference);
    if decoded == reference || decoded.chars().count() > 2 {
        None
    } else {
        Some(decoded.into_owned())
    }
}

/// Decode the escapes an upstream parser may have left in a text run.
///
/// Covers every HTML5 named reference plus decimal and hex numeric ones.
/// References must be semicolon-terminated; unknown names and numeric
/// references naming an invalid code point are left as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    ENTITY.replace_all(text, |caps: &Captures| {
        let decoded = if let Some(dec) = caps.get(1) {
            dec.as_str().parse().ok().and_then(char::from_u32).map(String::from)
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
        } else {
            named_entity(&caps[0])
        };

        decoded.unwrap_or_else(|| caps[0].to_string())
    })
}

/// Turn a raw text run into the text appended to the output.
///
/// Newlines inside text are not line breaks, so each becomes a space. A run
/// that ended on a newline loses its trailing whitespace, and a run that
/// follows a newline in the output loses its leading whitespace.
pub fn normalize_text(text: &str, after_newline: bool) -> String {
    let simplified = SIMPLIFIED_ENTITIES
        .iter()
        .fold(Cow::Borrowed(text), |acc, &(from, to)| {
            if acc.contains(from) {
                Cow::Owned(acc.replace(from, to))
            } else {
                acc
            }
        });

    let decoded = decode_entities(&simplified);
    let ended_with_newline = decoded.ends_with('\n');

    let mut content = decoded.replace('\n', " ");
    if ended_with_newline {
        content.truncate(content.trim_end().len());
    }
    if after_newline {
        let leading = content.len() - content.trim_start().len();
        content.drain(..leading);
    }
    content
}
