//! Styling annotations: classes, id, inline CSS and table spans encoded as
//! Textile modifiers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tags::Tag;
use crate::transducer::Attributes;

/// Padding of at most two digits of em converts to glyphs. Larger counts
/// do not match and stay in the leftover CSS.
static PADDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*padding-(left|right)\s*:\s*(\d{1,2})em\s*;?")
        .expect("padding pattern is valid")
});

static TEXT_ALIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*text-align\s*:\s*(\w+)\s*;?").expect("text-align pattern is valid")
});

static VERTICAL_ALIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*vertical-align\s*:\s*(\w+)\s*;?").expect("vertical-align pattern is valid")
});

/// Span attributes and their glyphs, in emission order.
const TABLE_SPANNING: &[(&str, char)] = &[("colspan", '\\'), ("rowspan", '/')];

fn padding_glyph(side: &str) -> Option<char> {
    match side.to_ascii_lowercase().as_str() {
        "left" => Some('('),
        "right" => Some(')'),
        _ => None,
    }
}

fn text_align_glyph(keyword: &str) -> Option<&'static str> {
    match keyword.to_ascii_lowercase().as_str() {
        "left" => Some("<"),
        "right" => Some(">"),
        "center" => Some("="),
        "justify" => Some("<>"),
        _ => None,
    }
}

fn vertical_align_glyph(keyword: &str) -> Option<&'static str> {
    match keyword.to_ascii_lowercase().as_str() {
        "top" => Some("^"),
        "bottom" => Some("~"),
        _ => None,
    }
}

fn non_blank<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

/// Strip every declaration matched by `pattern` from `styles`, pushing the
/// glyph for each one `glyph` recognises.
fn extract<F>(styles: &str, pattern: &Regex, items: &mut Vec<String>, mut glyph: F) -> String
where
    F: FnMut(&regex::Captures) -> Option<String>,
{
    for caps in pattern.captures_iter(styles) {
        if let Some(found) = glyph(&caps) {
            items.push(found);
        }
    }
    pattern.replace_all(styles, "").into_owned()
}

/// Build the styling annotation for an element.
///
/// Fragments come out in a fixed order: padding, text alignment, vertical
/// alignment, leftover CSS as `{...}`, spans, then classes and id as
/// `(...)`. Returns an empty string when the element carries none of these.
pub fn prepare_styles(attributes: &Attributes, tag: Tag) -> String {
    let mut styling: Vec<String> = attributes
        .get("class")
        .map(|class| class.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    if let Some(id) = non_blank(attributes, "id") {
        styling.push(format!("#{id}"));
    }

    let mut items = Vec::new();

    if let Some(style) = non_blank(attributes, "style") {
        let mut styles = style.trim().to_string();
        if tag.converts_styles() {
            styles = extract(&styles, &PADDING, &mut items, |caps| {
                let glyph = padding_glyph(&caps[1])?;
                let count: u8 = caps[2].parse().ok()?;
                Some(glyph.to_string().repeat(usize::from(count)))
            });
            styles = extract(&styles, &TEXT_ALIGN, &mut items, |caps| {
                text_align_glyph(&caps[1]).map(str::to_string)
            });
            styles = extract(&styles, &VERTICAL_ALIGN, &mut items, |caps| {
                vertical_align_glyph(&caps[1]).map(str::to_string)
            });
        }
        let leftover = styles.trim();
        if !leftover.is_empty() {
            items.push(format!("{{{leftover}}}"));
        }
    }

    for (name, glyph) in TABLE_SPANNING {
        if let Some(span) = non_blank(attributes, name).and_then(|v| v.trim().parse::<u32>().ok()) {
            items.push(format!("{glyph}{span}"));
        }
    }

    if !styling.is_empty() {
        items.push(format!("({})", styling.join(" ")));
    }

    items.concat()
}
