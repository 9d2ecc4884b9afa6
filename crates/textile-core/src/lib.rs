//! textile-core - streaming HTML event to Textile transducer
//!
//! This crate holds the conversion logic shared by `html-to-textile` (which
//! drives it from an HTML parser) and anything else that can produce parse
//! events. It does not parse HTML itself.
//!
//! # Architecture
//!
//! ```text
//!                    start / end / text / cdata
//! HTML parser ─────────────────────────────────▶ ┌────────────┐
//!                                                │ Transducer │ ──▶ Textile String
//! recorded Events ─────────────────────────────▶ └────────────┘
//! ```
//!
//! Every event is translated as soon as it arrives. The transducer keeps a
//! stack of open elements to decide list markers, spacing and where styling
//! goes, and never looks ahead.
//!
//! # Example
//!
//! ```rust
//! use textile_core::{convert_events, Event, Options};
//!
//! let events = vec![
//!     Event::start("p", &[]),
//!     Event::text("Hello "),
//!     Event::start("strong", &[]),
//!     Event::text("World"),
//!     Event::end("strong"),
//!     Event::end("p"),
//! ];
//!
//! let textile = convert_events(events, &Options::default());
//! assert_eq!(textile, "p. Hello *World*");
//! ```

mod events;
mod options;
mod styles;
mod tags;
mod text;
mod transducer;

pub use events::{convert_events, Event, EventSink};
pub use options::Options;
pub use styles::prepare_styles;
pub use tags::{Category, Tag};
pub use text::{decode_entities, normalize_text};
pub use transducer::{Attributes, Frame, Spacing, Transducer};
