//! Tag identities and the static token tables.
//!
//! Every table is a `match` on [`Tag`], so adding a tag means adding a
//! variant and filling in its rows here.

/// The closed set of elements the transducer knows how to translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    // Text formatting
    B,
    Strong,
    I,
    Em,
    Cite,
    Code,
    Span,
    Del,
    Ins,
    Sup,
    Sub,
    // Links and media
    A,
    Img,
    // Headings
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    // Structures
    P,
    Br,
    Pre,
    Blockquote,
    Div,
    // Lists
    Ol,
    Ul,
    Li,
    Dl,
    Dt,
    Dd,
    // Tables
    Table,
    Tr,
    Th,
    Td,
    /// Anything else. Pushed on the stack, never emits tokens.
    Unknown,
}

/// Placement class of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Paragraph-like units separated by a blank line.
    Block,
    /// Table rows and list items, separated by a single newline.
    Row,
    /// Table cells: spaced like inline content, styled like rows.
    Cell,
    /// Formatting inside running text.
    Inline,
    /// Everything without a category of its own. Placed like inline content.
    Unclassified,
}

impl Tag {
    /// Map an element name to its tag, ignoring ASCII case.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "b" => Tag::B,
            "strong" => Tag::Strong,
            "i" => Tag::I,
            "em" => Tag::Em,
            "cite" => Tag::Cite,
            "code" => Tag::Code,
            "span" => Tag::Span,
            "del" => Tag::Del,
            "ins" => Tag::Ins,
            "sup" => Tag::Sup,
            "sub" => Tag::Sub,
            "a" => Tag::A,
            "img" => Tag::Img,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "h4" => Tag::H4,
            "h5" => Tag::H5,
            "h6" => Tag::H6,
            "p" => Tag::P,
            "br" => Tag::Br,
            "pre" => Tag::Pre,
            "blockquote" => Tag::Blockquote,
            "div" => Tag::Div,
            "ol" => Tag::Ol,
            "ul" => Tag::Ul,
            "li" => Tag::Li,
            "dl" => Tag::Dl,
            "dt" => Tag::Dt,
            "dd" => Tag::Dd,
            "table" => Tag::Table,
            "tr" => Tag::Tr,
            "th" => Tag::Th,
            "td" => Tag::Td,
            _ => Tag::Unknown,
        }
    }

    /// Token emitted when the element opens.
    pub fn opening_token(self) -> &'static str {
        match self {
            Tag::B => "**",
            Tag::Strong => "*",
            Tag::I => "__",
            Tag::Em => "_",
            Tag::Cite => "??",
            Tag::Code => "@",
            Tag::Span => "%",
            Tag::Img => "!",
            Tag::Table => "table. ",
            Tag::H1 => "h1. ",
            Tag::H2 => "h2. ",
            Tag::H3 => "h3. ",
            Tag::H4 => "h4. ",
            Tag::H5 => "h5. ",
            Tag::H6 => "h6. ",
            Tag::Th => "|_.",
            Tag::Td => "|",
            Tag::Del => "[-",
            Tag::Ins => "[+",
            Tag::Sup => "[^",
            Tag::Sub => "[~",
            Tag::A => "\"",
            Tag::Dt => "\n- ",
            Tag::Dd => " := ",
            Tag::P => "p. ",
            Tag::Br => "\n",
            Tag::Pre => "pre. ",
            Tag::Blockquote => "bq. ",
            Tag::Div | Tag::Ol | Tag::Ul | Tag::Li | Tag::Dl | Tag::Tr | Tag::Unknown => "",
        }
    }

    /// Token emitted when the element closes.
    pub fn closing_token(self) -> &'static str {
        match self {
            Tag::B => "**",
            Tag::Strong => "*",
            Tag::I => "__",
            Tag::Em => "_",
            Tag::Cite => "??",
            Tag::Code => "@",
            Tag::Span => "%",
            Tag::Img => "!",
            Tag::Tr => "|",
            Tag::Td | Tag::Th => " ",
            Tag::Del => "-]",
            Tag::Ins => "+]",
            Tag::Sup => "^]",
            Tag::Sub => "~]",
            Tag::A => "\":",
            // Definition lists have no block token to end them
            Tag::Dl => "\n",
            _ => "",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Tag::Code
            | Tag::H1
            | Tag::H2
            | Tag::H3
            | Tag::H4
            | Tag::H5
            | Tag::H6
            | Tag::Dl
            | Tag::Ol
            | Tag::Ul
            | Tag::Pre
            | Tag::P
            | Tag::Div
            | Tag::Table
            | Tag::Blockquote => Category::Block,
            Tag::Tr | Tag::Li => Category::Row,
            Tag::Th | Tag::Td => Category::Cell,
            Tag::B
            | Tag::I
            | Tag::Strong
            | Tag::Em
            | Tag::Del
            | Tag::Ins
            | Tag::Sup
            | Tag::Sub
            | Tag::Cite
            | Tag::Span
            | Tag::A
            | Tag::Img => Category::Inline,
            Tag::Dt | Tag::Dd | Tag::Br | Tag::Unknown => Category::Unclassified,
        }
    }

    /// Bullet or ordinal glyph for list containers.
    pub fn list_marker(self) -> Option<char> {
        match self {
            Tag::Ol => Some('#'),
            Tag::Ul => Some('*'),
            _ => None,
        }
    }

    /// `ul` and `ol`.
    pub fn is_list(self) -> bool {
        self.list_marker().is_some()
    }

    /// Containers that collapse block separation to single lines.
    pub fn is_list_context(self) -> bool {
        self.is_list() || self == Tag::Dl
    }

    /// Whether inline `style` declarations are translated into glyphs.
    pub fn converts_styles(self) -> bool {
        matches!(
            self.category(),
            Category::Block | Category::Row | Category::Cell
        )
    }
}
