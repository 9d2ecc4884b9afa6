//! Configuration options for HTML to Textile conversion

/// Options for a conversion
#[derive(Debug, Clone)]
pub struct Options {
    /// Collapse source indentation before parsing: newline-plus-spaces runs
    /// become a single newline, and whitespace between `>` and a newline
    /// becomes one space.
    pub normalize_source: bool,

    /// Trim leading and trailing whitespace from the result
    pub trim_output: bool,

    /// Elements skipped together with everything inside them
    pub ignored_tags: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            normalize_source: true,
            trim_output: true,
            ignored_tags: Vec::new(),
        }
    }
}

impl Options {
    /// Whether `name` is listed in `ignored_tags`, ignoring ASCII case.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored_tags
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(name))
    }
}
