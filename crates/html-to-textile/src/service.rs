//! TextileService - the main entry point for HTML to Textile conversion.

use textile_core::{Options, Transducer};

use crate::streaming::stream_events;
use crate::utilities::normalize_source;
use crate::Result;

/// The main service for converting HTML to Textile
#[derive(Debug, Clone, Default)]
pub struct TextileService {
    options: Options,
}

impl TextileService {
    /// Create a new TextileService with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a TextileService with custom options
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Skip elements with this name together with their content
    pub fn ignore(&mut self, tag: &str) -> &mut Self {
        self.options.ignored_tags.push(tag.to_lowercase());
        self
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Convert HTML to Textile
    pub fn convert(&self, html: &str) -> Result<String> {
        let source = if self.options.normalize_source {
            normalize_source(html)
        } else {
            html.to_string()
        };

        let transducer = stream_events(&source, Transducer::new(), &self.options)?;
        let output = transducer.into_output();

        if self.options.trim_output {
            Ok(output.trim().to_string())
        } else {
            Ok(output)
        }
    }
}
