//! # html-to-textile
//!
//! Convert HTML to Textile.
//!
//! HTML is read with lol_html's streaming rewriter, and each start tag, end
//! tag and text node is handed to the [`textile_core::Transducer`] the moment it
//! is seen. No DOM is built. Unrecognised tags are dropped while their text
//! is kept.
//!
//! ## Example
//!
//! ```rust
//! let textile = html_to_textile::convert("<h1>Hello <em>World</em></h1>");
//! assert_eq!(textile, "h1. Hello _World_");
//! ```
//!
//! ## Example (service with options)
//!
//! ```rust
//! use html_to_textile::TextileService;
//!
//! let mut service = TextileService::new();
//! service.ignore("script");
//!
//! let textile = service
//!     .convert("<p>Hi<script>track()</script></p>")
//!     .unwrap();
//! assert_eq!(textile, "p. Hi");
//! ```

mod service;
mod streaming;
mod utilities;

pub use service::TextileService;
pub use streaming::stream_events;
pub use textile_core::{
    convert_events, Attributes, Category, Event, EventSink, Options, Tag, Transducer,
};
pub use utilities::{is_void, normalize_source, VOID_ELEMENTS};

/// Error type for textile operations
#[derive(Debug, thiserror::Error)]
pub enum TextileError {
    #[error("HTML rewriting failed: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),

    #[error("Event sink is still shared with the rewriter")]
    SinkInUse,
}

pub type Result<T> = std::result::Result<T, TextileError>;

/// Convert an HTML document to Textile with default options.
///
/// Never fails: if the rewriter gives up, the failure is logged and an empty
/// string is returned.
pub fn convert(html: &str) -> String {
    TextileService::new().convert(html).unwrap_or_else(|e| {
        log::warn!("HTML to Textile conversion failed: {e}");
        String::new()
    })
}
