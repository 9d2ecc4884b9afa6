//! The streaming transducer: parse events in, Textile out.

use indexmap::IndexMap;

use crate::styles::prepare_styles;
use crate::tags::{Category, Tag};
use crate::text::normalize_text;

/// Attribute name to value, as supplied by the event source.
pub type Attributes = IndexMap<String, String>;

/// An open element: its tag and the attributes it was opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tag: Tag,
    pub attributes: Attributes,
}

impl Frame {
    fn attribute(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Separator emitted around a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Blank line between blocks.
    BlankLine,
    /// Single newline between rows and list items.
    LineBreak,
    /// A space around inline content.
    Space,
}

impl Spacing {
    pub fn as_str(self) -> &'static str {
        match self {
            Spacing::BlankLine => "\n\n",
            Spacing::LineBreak => "\n",
            Spacing::Space => " ",
        }
    }
}

/// Translates parse events into Textile as they arrive.
///
/// One instance handles one document. The element stack decides list
/// markers, spacing and where styling goes; the output buffer only grows,
/// except for [`Transducer::trim_bullet_artifact`].
#[derive(Debug, Default)]
pub struct Transducer {
    stack: Vec<Frame>,
    buffer: String,
}

impl Transducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The open elements, outermost first.
    pub fn stack(&self) -> &[Frame] {
        &self.stack
    }

    /// Everything emitted so far.
    pub fn output(&self) -> &str {
        &self.buffer
    }

    /// Consume the transducer, returning the untrimmed output.
    pub fn into_output(self) -> String {
        self.buffer
    }

    pub fn start_element(&mut self, name: &str, attributes: Attributes) {
        let tag = Tag::from_name(name);
        log::trace!(target: "textile.transducer", "start {name} ({tag:?})");

        let styling = prepare_styles(&attributes, tag);
        let spaces = self.spacing(tag);
        let mut opening = tag.opening_token().to_string();
        self.stack.push(Frame { tag, attributes });

        if tag == Tag::Li {
            self.trim_bullet_artifact();
            opening = self.list_item_marker();
        }

        let content = match tag.category() {
            Category::Block => opening.replacen('.', &format!("{styling}."), 1),
            Category::Row if styling.is_empty() => opening + " ",
            Category::Row => opening + &styling + " ",
            Category::Cell if styling.is_empty() => opening,
            Category::Cell if tag == Tag::Td => opening + &styling + ". ",
            Category::Cell => opening.replacen('.', &format!("{styling}."), 1),
            Category::Inline | Category::Unclassified => opening + &styling,
        };

        self.append_white(spaces);
        self.buffer.push_str(&content);
    }

    /// Close the innermost open element.
    ///
    /// # Panics
    ///
    /// Panics when no element is open: the event source broke nesting.
    pub fn end_element(&mut self, name: &str) {
        let frame = self
            .stack
            .pop()
            .expect("end_element without a matching start_element");
        debug_assert_eq!(
            frame.tag,
            Tag::from_name(name),
            "end_element({name}) does not close the innermost element"
        );
        log::trace!(target: "textile.transducer", "end {name} ({:?})", frame.tag);

        let spaces = self.spacing(frame.tag);
        let closing = frame.tag.closing_token();

        match frame.tag {
            Tag::Img => {
                self.buffer.push_str(frame.attribute("src"));
                self.buffer.push_str(&parenthetical(frame.attribute("alt")));
                self.buffer.push_str(closing);
            }
            Tag::A => {
                self.buffer.push_str(&parenthetical(frame.attribute("title")));
                self.buffer.push_str(closing);
                self.buffer.push_str(frame.attribute("href"));
            }
            _ => self.buffer.push_str(closing),
        }

        self.append_white(spaces);
    }

    pub fn characters(&mut self, text: &str) {
        let content = normalize_text(text, self.buffer.ends_with('\n'));
        self.buffer.push_str(&content);
    }

    /// CDATA is passed through untouched.
    pub fn cdata(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Separator for `tag` given the elements currently open.
    pub fn spacing(&self, tag: Tag) -> Spacing {
        match tag.category() {
            Category::Block if !self.stack.iter().any(|f| f.tag.is_list_context()) => {
                Spacing::BlankLine
            }
            Category::Row => Spacing::LineBreak,
            _ => Spacing::Space,
        }
    }

    /// Remove a last line holding nothing but list markers and a space, left
    /// by an item whose content moved onto a nested item.
    pub fn trim_bullet_artifact(&mut self) {
        let line_start = self.buffer.rfind('\n').map_or(0, |i| i + 1);
        let markers = match self.buffer[line_start..].strip_suffix(' ') {
            Some(markers) => markers,
            None => return,
        };
        if !markers.is_empty() && markers.chars().all(|c| c == '*' || c == '#') {
            self.buffer.truncate(line_start);
        }
    }

    /// Marker for the list item on top of the stack: its list's glyph,
    /// repeated once per open list.
    fn list_item_marker(&self) -> String {
        let parent = self.stack.len().checked_sub(2).map(|i| self.stack[i].tag);
        let marker = parent
            .and_then(Tag::list_marker)
            .or_else(|| self.stack.iter().rev().find_map(|f| f.tag.list_marker()))
            .unwrap_or('*');
        let depth = self.stack.iter().filter(|f| f.tag.is_list()).count();
        marker.to_string().repeat(depth.max(1))
    }

    /// Append `spacing`, skipping each character the buffer already ends
    /// with at the same position, and anything that would follow a newline.
    fn append_white(&mut self, spacing: Spacing) {
        let spacing = spacing.as_str();
        let len = spacing.chars().count();
        for (i, space) in spacing.chars().enumerate() {
            let last = self.buffer.chars().rev().nth(len - 1 - i);
            if last != Some(space) && last != Some('\n') {
                self.buffer.push(space);
            }
        }
    }
}

fn parenthetical(text: &str) -> String {
    if text.trim().is_empty() {
        String::new()
    } else {
        format!("({text})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn element(t: &mut Transducer, name: &str, pairs: &[(&str, &str)], text: &str) {
        t.start_element(name, attrs(pairs));
        t.characters(text);
        t.end_element(name);
    }

    #[test]
    fn test_paragraph() {
        let mut t = Transducer::new();
        element(&mut t, "p", &[], "Hello");
        assert_eq!(t.output().trim(), "p. Hello");
        assert_eq!(t.depth(), 0);
    }

    #[test]
    fn test_inline_tokens() {
        for (tag, expected) in [
            ("strong", "*x*"),
            ("b", "**x**"),
            ("em", "_x_"),
            ("i", "__x__"),
            ("cite", "??x??"),
            ("del", "[-x-]"),
            ("ins", "[+x+]"),
            ("sup", "[^x^]"),
            ("sub", "[~x~]"),
            ("span", "%x%"),
        ] {
            let mut t = Transducer::new();
            element(&mut t, tag, &[], "x");
            assert_eq!(t.output().trim(), expected, "<{tag}>");
        }
    }

    #[test]
    fn test_block_styling_goes_before_period() {
        let mut t = Transducer::new();
        element(&mut t, "h2", &[("class", "title")], "Head");
        assert_eq!(t.output().trim(), "h2(title). Head");
    }

    #[test]
    fn test_block_without_period_drops_styling() {
        let mut t = Transducer::new();
        element(&mut t, "div", &[("class", "wrap")], "x");
        assert_eq!(t.output().trim(), "x");
    }

    #[test]
    fn test_inline_styling_follows_token() {
        let mut t = Transducer::new();
        element(&mut t, "span", &[("class", "note")], "x");
        assert_eq!(t.output().trim(), "%(note)x%");
    }

    #[test]
    fn test_anchor() {
        let mut t = Transducer::new();
        element(&mut t, "a", &[("href", "http://e.com"), ("title", "T")], "x");
        assert_eq!(t.output().trim(), "\"x(T)\":http://e.com");

        let mut t = Transducer::new();
        element(&mut t, "a", &[("href", "http://e.com")], "x");
        assert_eq!(t.output().trim(), "\"x\":http://e.com");
    }

    #[test]
    fn test_anchor_without_href() {
        let mut t = Transducer::new();
        element(&mut t, "a", &[], "x");
        assert_eq!(t.output().trim(), "\"x\":");
    }

    #[test]
    fn test_image() {
        let mut t = Transducer::new();
        t.start_element("img", attrs(&[("src", "i.png"), ("alt", "A")]));
        t.end_element("img");
        assert_eq!(t.output().trim(), "!i.png(A)!");

        let mut t = Transducer::new();
        t.start_element("img", attrs(&[("src", "i.png"), ("alt", "")]));
        t.end_element("img");
        assert_eq!(t.output().trim(), "!i.png!");
    }

    #[test]
    fn test_consecutive_blocks_collapse_to_blank_line() {
        let mut t = Transducer::new();
        for _ in 0..4 {
            t.start_element("p", Attributes::new());
            t.characters("");
            t.end_element("p");
        }
        element(&mut t, "p", &[], "x");
        let out = t.output().trim();
        assert!(!out.contains("\n\n\n"));
        assert_eq!(out.matches("\n\n").count(), 4);
    }

    #[test]
    fn test_nested_list_markers() {
        let mut t = Transducer::new();
        t.start_element("ul", Attributes::new());
        t.start_element("li", Attributes::new());
        t.characters("a");
        t.start_element("ul", Attributes::new());
        element(&mut t, "li", &[], "b");
        t.end_element("ul");
        t.end_element("li");
        t.end_element("ul");
        assert_eq!(t.output().trim(), "* a \n** b");
    }

    #[test]
    fn test_ordered_list() {
        let mut t = Transducer::new();
        t.start_element("ol", Attributes::new());
        element(&mut t, "li", &[], "one");
        element(&mut t, "li", &[], "two");
        t.end_element("ol");
        assert_eq!(t.output().trim(), "# one\n# two");
    }

    #[test]
    fn test_empty_item_marker_is_replaced_by_nested_marker() {
        let mut t = Transducer::new();
        t.start_element("ul", Attributes::new());
        t.start_element("li", Attributes::new());
        t.start_element("ul", Attributes::new());
        element(&mut t, "li", &[], "deep");
        t.end_element("ul");
        t.end_element("li");
        t.end_element("ul");
        assert_eq!(t.output().trim(), "** deep");
    }

    #[test]
    fn test_list_item_styling() {
        let mut t = Transducer::new();
        t.start_element("ul", Attributes::new());
        element(&mut t, "li", &[("class", "done")], "x");
        t.end_element("ul");
        assert_eq!(t.output().trim(), "*(done) x");
    }

    #[test]
    fn test_item_outside_list() {
        let mut t = Transducer::new();
        element(&mut t, "li", &[], "stray");
        assert_eq!(t.output().trim(), "* stray");
    }

    #[test]
    fn test_blocks_inside_lists_use_spaces() {
        let mut t = Transducer::new();
        t.start_element("ul", Attributes::new());
        t.start_element("li", Attributes::new());
        assert_eq!(t.stack().last().map(|f| f.tag), Some(Tag::Li));
        assert_eq!(t.spacing(Tag::P), Spacing::Space);
        t.end_element("li");
        t.end_element("ul");
        assert_eq!(t.spacing(Tag::P), Spacing::BlankLine);
        assert_eq!(t.spacing(Tag::Li), Spacing::LineBreak);
        assert_eq!(t.spacing(Tag::Em), Spacing::Space);
    }

    #[test]
    fn test_table_cells() {
        let mut t = Transducer::new();
        t.start_element("table", Attributes::new());
        t.start_element("tr", Attributes::new());
        element(&mut t, "th", &[], "H");
        element(&mut t, "td", &[("colspan", "2")], "x");
        t.end_element("tr");
        t.end_element("table");
        assert_eq!(t.output().trim(), "table. \n |_.H |\\2. x |");
    }

    #[test]
    fn test_header_cell_styling() {
        let mut t = Transducer::new();
        element(&mut t, "th", &[("style", "text-align: center")], "H");
        assert_eq!(t.output().trim(), "|_=.H");
    }

    #[test]
    fn test_unknown_tags_are_transparent() {
        let mut wrapped = Transducer::new();
        wrapped.start_element("foo", Attributes::new());
        element(&mut wrapped, "p", &[], "x");
        wrapped.end_element("foo");

        let mut plain = Transducer::new();
        element(&mut plain, "p", &[], "x");

        assert_eq!(wrapped.output().trim(), plain.output().trim());
    }

    #[test]
    fn test_line_break() {
        let mut t = Transducer::new();
        t.start_element("p", Attributes::new());
        t.characters("a");
        t.start_element("br", Attributes::new());
        t.end_element("br");
        t.characters("  b");
        t.end_element("p");
        assert_eq!(t.output().trim(), "p. a \nb");
    }

    #[test]
    fn test_text_after_block_loses_indent() {
        let mut t = Transducer::new();
        element(&mut t, "p", &[], "a");
        t.characters("   tail");
        assert_eq!(t.output().trim(), "p. a\ntail");
    }

    #[test]
    fn test_cdata_is_verbatim() {
        let mut t = Transducer::new();
        t.cdata("a &amp;\nb");
        assert_eq!(t.output(), "a &amp;\nb");
    }

    #[test]
    fn test_trim_bullet_artifact() {
        let mut t = Transducer::new();
        t.cdata("* a\n** ");
        t.trim_bullet_artifact();
        assert_eq!(t.output(), "* a\n");

        let mut t = Transducer::new();
        t.cdata("**bold** ");
        t.trim_bullet_artifact();
        assert_eq!(t.output(), "**bold** ");
    }

    #[test]
    #[should_panic(expected = "without a matching start_element")]
    fn test_unbalanced_end_panics() {
        let mut t = Transducer::new();
        t.end_element("p");
    }
}
