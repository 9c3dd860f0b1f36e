//! Event-level markup document.
//!
//! The document is kept as the `quick-xml` event stream it was read from.
//! Each element start tag gets a slot holding its parsed class list; only
//! slots whose classes were edited are rebuilt when writing, every other
//! event is written back exactly as it was read.

use std::path::Path;

use classfold_core::target::{ClassNamespace, ClassTarget};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::class_list::ClassList;
use crate::{Error, Result};

const TARGET: &str = "classfold_markup::document";

/// Handle to an element of a [`Document`], in document pre-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementHandle(usize);

impl ElementHandle {
    /// Position of the element in document pre-order.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct ElementSlot {
    /// Index of the start tag in the event stream.
    event: usize,
    name: String,
    classes: ClassList,
    dirty: bool,
}

/// A parsed document whose element classes can be edited.
#[derive(Debug, Clone)]
pub struct Document {
    events: Vec<Event<'static>>,
    elements: Vec<ElementSlot>,
}

impl Document {
    /// Parse a document from markup text.
    ///
    /// End tag names are not checked against their start tags and stray end
    /// tags are accepted, so unclosed void elements such as `<br>` or
    /// `<meta ...>` do not stop parsing.
    pub fn parse(markup: &str) -> Result<Self> {
        let mut reader = Reader::from_str(markup);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut events = Vec::new();
        let mut elements = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(event) => {
                    if let Event::Start(start) | Event::Empty(start) = &event {
                        elements.push(read_slot(events.len(), start, position)?);
                    }
                    events.push(event.into_owned());
                }
                Err(e) => {
                    return Err(Error::parse(reader.error_position() as u64, e.to_string()));
                }
            }
        }

        tracing::debug!(
            target: TARGET,
            events = events.len(),
            elements = elements.len(),
            "parsed document"
        );
        Ok(Self { events, elements })
    }

    /// Read and parse a document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over all element handles in pre-order.
    pub fn elements(&self) -> impl Iterator<Item = ElementHandle> + '_ {
        (0..self.elements.len()).map(ElementHandle)
    }

    /// Tag name of an element, as written.
    pub fn tag_name(&self, element: ElementHandle) -> &str {
        &self.elements[element.0].name
    }

    /// Class list of an element.
    pub fn classes(&self, element: ElementHandle) -> &ClassList {
        &self.elements[element.0].classes
    }

    /// Handles of the elements whose class list satisfies `predicate`, in
    /// pre-order.
    pub fn relevant_elements(&self, predicate: impl Fn(&ClassList) -> bool) -> Vec<ElementHandle> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, slot)| predicate(&slot.classes))
            .map(|(i, _)| ElementHandle(i))
            .collect()
    }

    /// Handles of the elements carrying a class in `namespace`, in pre-order.
    pub fn elements_in(&self, namespace: &ClassNamespace) -> Vec<ElementHandle> {
        self.relevant_elements(|classes| namespace.any(classes.iter()))
    }

    /// Number of elements whose classes were edited.
    pub fn modified(&self) -> usize {
        self.elements.iter().filter(|slot| slot.dirty).count()
    }

    /// Serialize the document back to markup.
    pub fn to_markup(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        let mut slots = self.elements.iter().peekable();

        for (index, event) in self.events.iter().enumerate() {
            let slot = slots.next_if(|slot| slot.event == index);
            let written = match (slot, event) {
                (Some(slot), Event::Start(start)) if slot.dirty => {
                    writer.write_event(Event::Start(rebuild_start(start, &slot.classes)?))
                }
                (Some(slot), Event::Empty(start)) if slot.dirty => {
                    writer.write_event(Event::Empty(rebuild_start(start, &slot.classes)?))
                }
                _ => writer.write_event(event.borrow()),
            };
            written.map_err(|e| Error::serialize(e.to_string()))?;
        }

        String::from_utf8(writer.into_inner()).map_err(|e| Error::serialize(e.to_string()))
    }

    fn slot_mut(&mut self, element: ElementHandle) -> &mut ElementSlot {
        &mut self.elements[element.0]
    }
}

impl ClassTarget for Document {
    type Handle = ElementHandle;

    fn has_class(&self, element: ElementHandle, class: &str) -> bool {
        self.classes(element).contains(class)
    }

    fn add_class(&mut self, element: ElementHandle, class: &str) {
        let slot = self.slot_mut(element);
        if slot.classes.insert(class) {
            slot.dirty = true;
        }
    }

    fn remove_classes_where(&mut self, element: ElementHandle, predicate: &dyn Fn(&str) -> bool) {
        let slot = self.slot_mut(element);
        if slot.classes.remove_where(predicate) {
            slot.dirty = true;
        }
    }
}

fn is_class_attribute(key: &[u8]) -> bool {
    key.eq_ignore_ascii_case(b"class")
}

fn read_slot(event: usize, start: &BytesStart<'_>, position: u64) -> Result<ElementSlot> {
    let mut classes = ClassList::new();
    for attr in start.html_attributes() {
        let attr = attr.map_err(|e| Error::parse(position, e.to_string()))?;
        if is_class_attribute(attr.key.as_ref()) {
            let value = attr
                .unescape_value()
                .map_err(|e| Error::parse(position, e.to_string()))?;
            classes = ClassList::parse(&value);
        }
    }

    Ok(ElementSlot {
        event,
        name: String::from_utf8_lossy(start.name().as_ref()).to_string(),
        classes,
        dirty: false,
    })
}

/// Copy of `start` with its class attribute replaced by `classes`.
///
/// Other attributes keep their order. The class attribute keeps its position,
/// is appended when it did not exist, and is dropped when `classes` is empty.
fn rebuild_start(start: &BytesStart<'static>, classes: &ClassList) -> Result<BytesStart<'static>> {
    let value = classes.to_string();
    let mut rebuilt = start.clone();
    rebuilt.clear_attributes();

    let mut seen_class = false;
    for attr in start.html_attributes() {
        let attr = attr.map_err(|e| Error::serialize(e.to_string()))?;
        if is_class_attribute(attr.key.as_ref()) {
            if !seen_class && !classes.is_empty() {
                rebuilt.push_attribute(("class", value.as_str()));
            }
            seen_class = true;
        } else {
            rebuilt.push_attribute(attr);
        }
    }
    if !seen_class && !classes.is_empty() {
        rebuilt.push_attribute(("class", value.as_str()));
    }

    Ok(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><meta charset="utf-8"><title>Demo &amp; co</title></head>
<body>
  <!-- header -->
  <h1 id="top" class="x-red x-bold">Title</h1>
  <p class="lead x-red">Text<br/>more</p>
  <span class=x-bold data-k='v'>bare</span>
  <img src="a.png" class="x-bold" />
</body></html>"#;

    #[test]
    fn unmodified_document_round_trips() {
        let doc = Document::parse(PAGE).unwrap();
        assert_eq!(doc.to_markup().unwrap(), PAGE);
        assert_eq!(doc.modified(), 0);
    }

    #[test]
    fn elements_are_in_pre_order() {
        let doc = Document::parse(PAGE).unwrap();
        let names: Vec<&str> = doc.elements().map(|e| doc.tag_name(e)).collect();
        assert_eq!(
            names,
            ["html", "head", "meta", "title", "body", "h1", "p", "br", "span", "img"]
        );

        let relevant = doc.elements_in(&ClassNamespace::default());
        let names: Vec<&str> = relevant.iter().map(|&e| doc.tag_name(e)).collect();
        assert_eq!(names, ["h1", "p", "span", "img"]);
    }

    #[test]
    fn unquoted_class_values_are_read() {
        let doc = Document::parse(PAGE).unwrap();
        let span = doc.elements().find(|&e| doc.tag_name(e) == "span").unwrap();
        assert!(doc.has_class(span, "x-bold"));
    }

    #[test]
    fn edited_start_tags_are_rebuilt() {
        let source = r#"<div><p id="a" class="x-a keep" title="t">x</p></div>"#;
        let mut doc = Document::parse(source).unwrap();
        let p = doc.elements().nth(1).unwrap();

        doc.remove_classes_where(p, &|c| c.starts_with("x-"));
        doc.add_class(p, "q0");

        assert_eq!(doc.modified(), 1);
        assert_eq!(
            doc.to_markup().unwrap(),
            r#"<div><p id="a" class="keep q0" title="t">x</p></div>"#
        );
    }

    #[test]
    fn empty_class_list_drops_the_attribute() {
        let mut doc = Document::parse(r#"<p class="x-a" id="a"/><i class="x-b">y</i>"#).unwrap();
        for element in doc.elements().collect::<Vec<_>>() {
            doc.remove_classes_where(element, &|c| c.starts_with("x-"));
        }
        doc.add_class(ElementHandle(1), "q1");

        assert_eq!(doc.to_markup().unwrap(), r#"<p id="a"/><i class="q1">y</i>"#);
    }

    #[test]
    fn class_attribute_is_appended_when_missing() {
        let mut doc = Document::parse(r#"<a href="/">home</a>"#).unwrap();
        let a = doc.elements().next().unwrap();
        doc.add_class(a, "q0");
        assert_eq!(doc.to_markup().unwrap(), r#"<a href="/" class="q0">home</a>"#);
    }

    #[test]
    fn no_op_edits_keep_the_source() {
        let source = r#"<b   class="q0"   >x</b>"#;
        let mut doc = Document::parse(source).unwrap();
        let b = doc.elements().next().unwrap();
        doc.add_class(b, "q0");
        doc.remove_classes_where(b, &|c| c.starts_with("x-"));

        assert_eq!(doc.modified(), 0);
        assert_eq!(doc.to_markup().unwrap(), source);
    }

    #[test]
    fn unclosed_tag_is_a_parse_error() {
        let err = Document::parse(r#"<div class="x-a"><p"#).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "{err}");
    }
}
