//! Streaming HTML to parse events using lol_html
//!
//! Uses Cloudflare's lol_html for true streaming parsing without building a
//! DOM tree. lol_html reports start tags and text as they are read and calls
//! end-tag handlers when a matching end tag shows up. It does not close
//! elements whose end tag is missing, so this module keeps its own stack and
//! closes those itself, handing the sink a well-nested event stream.

use lol_html::{doc_text, element, rewrite_str, RewriteStrSettings};
use std::cell::RefCell;
use std::rc::Rc;
use textile_core::{Attributes, EventSink, Options};

use crate::utilities::is_void;
use crate::{Result, TextileError};

/// An element the driver has opened
#[derive(Debug)]
struct OpenElement {
    id: u64,
    name: String,
    /// Whether the sink was told about it
    forwarded: bool,
}

/// Shared state for the streaming parser
struct EventDriver<S> {
    sink: S,
    open: Vec<OpenElement>,
    next_id: u64,
    /// Text of the current text node, delivered once the node ends
    pending_text: String,
    options: Options,
}

impl<S: EventSink> EventDriver<S> {
    fn new(sink: S, options: Options) -> Self {
        Self {
            sink,
            open: Vec::new(),
            next_id: 0,
            pending_text: String::new(),
            options,
        }
    }

    fn suppressed(&self) -> bool {
        self.open.iter().any(|el| !el.forwarded)
    }

    fn start(&mut self, name: String, attributes: Attributes) -> u64 {
        self.flush_text();

        let ignored = self.options.is_ignored(&name);
        let forwarded = !ignored && !self.suppressed();
        if ignored {
            log::debug!("skipping <{name}> and its content");
        }
        if forwarded {
            self.sink.start_element(&name, attributes);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.open.push(OpenElement {
            id,
            name,
            forwarded,
        });
        id
    }

    /// Close the element with `id` and everything opened after it.
    fn end(&mut self, id: u64) {
        self.flush_text();

        let Some(position) = self.open.iter().rposition(|el| el.id == id) else {
            return;
        };
        while self.open.len() > position {
            self.pop();
        }
    }

    fn pop(&mut self) {
        if let Some(el) = self.open.pop() {
            if el.forwarded {
                self.sink.end_element(&el.name);
            }
        }
    }

    fn text(&mut self, chunk: &str, last_in_node: bool) {
        if !self.suppressed() {
            self.pending_text.push_str(chunk);
        }
        if last_in_node {
            self.flush_text();
        }
    }

    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            let text = std::mem::take(&mut self.pending_text);
            self.sink.characters(&text);
        }
    }

    /// Deliver pending text and close everything still open.
    fn finish(&mut self) {
        self.flush_text();
        if !self.open.is_empty() {
            log::debug!("closing {} element(s) left open at end of input", self.open.len());
        }
        while !self.open.is_empty() {
            self.pop();
        }
    }
}

fn collect_attributes(el: &lol_html::html_content::Element<'_, '_>) -> Attributes {
    el.attributes()
        .iter()
        .map(|attr| {
            let value = textile_core::decode_entities(&attr.value()).into_owned();
            (attr.name().to_lowercase(), value)
        })
        .collect()
}

/// Parse `html` and deliver its events to `sink`, returning the sink.
pub fn stream_events<S>(html: &str, sink: S, options: &Options) -> Result<S>
where
    S: EventSink + 'static,
{
    let state = Rc::new(RefCell::new(EventDriver::new(sink, options.clone())));

    let state_for_element = Rc::clone(&state);
    let state_for_text = Rc::clone(&state);

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                // Match all elements
                element!("*", move |el| {
                    let tag = el.tag_name().to_lowercase();
                    let attributes = collect_attributes(el);

                    let id = state_for_element.borrow_mut().start(tag.clone(), attributes);

                    // Void elements never see an end tag
                    let handlers = if is_void(&tag) {
                        None
                    } else {
                        el.end_tag_handlers()
                    };

                    match handlers {
                        Some(handlers) => {
                            let state_for_end = Rc::clone(&state_for_element);
                            let handler: lol_html::EndTagHandler<'static> = Box::new(
                                move |_end_tag: &mut lol_html::html_content::EndTag<'_>| {
                                    state_for_end.borrow_mut().end(id);
                                    Ok(())
                                },
                            );
                            handlers.push(handler);
                        }
                        None => state_for_element.borrow_mut().end(id),
                    }

                    Ok(())
                }),
            ],
            document_content_handlers: vec![doc_text!(move |text| {
                state_for_text
                    .borrow_mut()
                    .text(text.as_str(), text.last_in_text_node());
                Ok(())
            })],
            strict: false,
            ..RewriteStrSettings::new()
        },
    )?;

    state.borrow_mut().finish();

    // The rewriter and its handlers are gone, so this is the only reference left
    match Rc::try_unwrap(state) {
        Ok(cell) => Ok(cell.into_inner().sink),
        Err(_) => Err(TextileError::SinkInUse),
    }
}
