//! Parse events and the sink they are delivered to.

use crate::options::Options;
use crate::transducer::{Attributes, Transducer};

/// Receiver of parse events, called in document order.
///
/// Implementors may assume well-nested input: every `end_element` closes the
/// most recent unclosed `start_element`.
pub trait EventSink {
    fn start_element(&mut self, name: &str, attributes: Attributes);
    fn end_element(&mut self, name: &str);
    fn characters(&mut self, text: &str);
    fn cdata(&mut self, text: &str);
}

impl EventSink for Transducer {
    fn start_element(&mut self, name: &str, attributes: Attributes) {
        Transducer::start_element(self, name, attributes);
    }

    fn end_element(&mut self, name: &str) {
        Transducer::end_element(self, name);
    }

    fn characters(&mut self, text: &str) {
        Transducer::characters(self, text);
    }

    fn cdata(&mut self, text: &str) {
        Transducer::cdata(self, text);
    }
}

/// An owned parse event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start { name: String, attributes: Attributes },
    End { name: String },
    Text(String),
    CData(String),
}

impl Event {
    pub fn start(name: &str, attributes: &[(&str, &str)]) -> Self {
        Event::Start {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn end(name: &str) -> Self {
        Event::End {
            name: name.to_string(),
        }
    }

    pub fn text(text: &str) -> Self {
        Event::Text(text.to_string())
    }

    pub fn cdata(text: &str) -> Self {
        Event::CData(text.to_string())
    }

    /// Deliver this event to `sink`.
    pub fn dispatch<S: EventSink + ?Sized>(self, sink: &mut S) {
        match self {
            Event::Start { name, attributes } => sink.start_element(&name, attributes),
            Event::End { name } => sink.end_element(&name),
            Event::Text(text) => sink.characters(&text),
            Event::CData(text) => sink.cdata(&text),
        }
    }
}

/// Run a complete event stream through a fresh transducer.
pub fn convert_events<I>(events: I, options: &Options) -> String
where
    I: IntoIterator<Item = Event>,
{
    let mut transducer = Transducer::new();
    for event in events {
        event.dispatch(&mut transducer);
    }

    let output = transducer.into_output();
    if options.trim_output {
        output.trim().to_string()
    } else {
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records events instead of translating them.
    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl EventSink for Recorder {
        fn start_element(&mut self, name: &str, attributes: Attributes) {
            self.0.push(format!("start {name} {}", attributes.len()));
        }
        fn end_element(&mut self, name: &str) {
            self.0.push(format!("end {name}"));
        }
        fn characters(&mut self, text: &str) {
            self.0.push(format!("text {text}"));
        }
        fn cdata(&mut self, text: &str) {
            self.0.push(format!("cdata {text}"));
        }
    }

    #[test]
    fn test_dispatch_order() {
        let mut recorder = Recorder::default();
        for event in [
            Event::start("a", &[("href", "x")]),
            Event::text("t"),
            Event::cdata("c"),
            Event::end("a"),
        ] {
            event.dispatch(&mut recorder);
        }
        assert_eq!(recorder.0, ["start a 1", "text t", "cdata c", "end a"]);
    }

    #[test]
    fn test_convert_events() {
        let events = vec![
            Event::start("p", &[]),
            Event::text("TEXT"),
            Event::end("p"),
        ];
        assert_eq!(convert_events(events, &Options::default()), "p. TEXT");
    }

    #[test]
    fn test_convert_events_untrimmed() {
        let options = Options {
            trim_output: false,
            ..Default::default()
        };
        let events = vec![Event::start("p", &[]), Event::text("x"), Event::end("p")];
        assert_eq!(convert_events(events, &options), "\np. x\n");
    }

    #[test]
    fn test_attribute_last_value_wins() {
        match Event::start("p", &[("class", "a"), ("class", "b")]) {
            Event::Start { attributes, .. } => {
                assert_eq!(attributes.len(), 1);
                assert_eq!(attributes["class"], "b");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
