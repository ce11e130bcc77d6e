//! Owned XML tree for Android string resource files.
//!
//! Parsing is built on `quick-xml` events. The tree keeps only what a resource
//! file needs to round-trip: elements, attributes (in source order), text,
//! CDATA sections and comments. The XML declaration, doctype and processing
//! instructions of the input are dropped; [`Document::to_pretty_string`] always
//! writes [`XML_PROLOG`] instead.
//!
//! Whitespace-only text is treated as formatting and removed wherever the
//! parent element also holds elements or comments. An element whose only
//! content is whitespace keeps it. This keeps repeated parse/format cycles from
//! piling up blank text.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use thiserror::Error;

/// First line of every written resource file.
pub const XML_PROLOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

const INDENT: &str = "  ";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("XML syntax error at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("document has no root element")]
    NoRoot,

    #[error("unexpected content outside the root element at byte {0}")]
    OutsideRoot(u64),

    #[error("element <{0}> is not closed")]
    Unclosed(String),

    #[error("invalid UTF-8 in document")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }

    fn is_markup(&self) -> bool {
        matches!(self, Node::Element(_) | Node::Comment(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct element children.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// True when any child is an element or a comment. Text alone does not count.
    pub fn has_markup(&self) -> bool {
        self.children.iter().any(Node::is_markup)
    }

    /// Drop formatting whitespace once all children are known.
    fn strip_blank_text(&mut self) {
        if self.has_markup() {
            self.children.retain(|child| !child.is_blank_text());
        }
    }

    /// Children are laid out one per line only when there is no text among them.
    fn is_structural(&self) -> bool {
        self.children.iter().all(Node::is_markup)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Comments that precede the root element.
    pub prologue: Vec<Node>,
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            prologue: Vec::new(),
            root,
        }
    }

    pub fn parse<R: BufRead>(source: R) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_reader(source);
        let mut buf = Vec::new();

        let mut prologue = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|source| DocumentError::Syntax { position, source })?;
            let syntax = |source: quick_xml::Error| DocumentError::Syntax { position, source };

            match event {
                Event::Start(ref e) => {
                    if root.is_some() {
                        return Err(DocumentError::OutsideRoot(position));
                    }
                    stack.push(start_element(e).map_err(syntax)?);
                }
                Event::Empty(ref e) => {
                    if root.is_some() {
                        return Err(DocumentError::OutsideRoot(position));
                    }
                    let element = start_element(e).map_err(syntax)?;
                    close_element(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    // quick-xml has already matched the end tag against its start
                    if let Some(mut element) = stack.pop() {
                        element.strip_blank_text();
                        close_element(&mut stack, &mut root, element);
                    }
                }
                Event::Text(ref e) => {
                    let text = e.unescape().map_err(syntax)?.into_owned();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Text(text)),
                        None if text.trim().is_empty() => {}
                        None => return Err(DocumentError::OutsideRoot(position)),
                    }
                }
                Event::CData(e) => {
                    let text = String::from_utf8(e.into_inner().into_owned())?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::CData(text)),
                        None => return Err(DocumentError::OutsideRoot(position)),
                    }
                }
                Event::Comment(e) => {
                    let text = String::from_utf8(e.into_inner().into_owned())?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Comment(text)),
                        None if root.is_none() => prologue.push(Node::Comment(text)),
                        // Trailing comments after the root are not kept
                        None => {}
                    }
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
            buf.clear();
        }

        if let Some(open) = stack.pop() {
            return Err(DocumentError::Unclosed(open.name));
        }
        let root = root.ok_or(DocumentError::NoRoot)?;

        Ok(Self { prologue, root })
    }

    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        Self::parse(bytes)
    }

    /// Serialize with [`XML_PROLOG`] and two-space indentation.
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();
        out.push_str(XML_PROLOG);
        out.push('\n');

        for node in &self.prologue {
            write_node(&mut out, node, 0);
            out.push('\n');
        }

        write_element(&mut out, &self.root, 0);
        out.push('\n');
        out
    }
}

fn start_element(e: &BytesStart<'_>) -> Result<Element, quick_xml::Error> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(name);

    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn close_element(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Element(element) => write_element(out, element, depth),
        Node::Text(text) => out.push_str(&partial_escape(text.as_str())),
        Node::CData(text) => {
            out.push_str("<![CDATA[");
            out.push_str(text);
            out.push_str("]]>");
        }
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    if element.is_structural() {
        for child in &element.children {
            out.push('\n');
            push_indent(out, depth + 1);
            write_node(out, child, depth + 1);
        }
        out.push('\n');
        push_indent(out, depth);
    } else {
        // Mixed content is significant, write it as-is
        for child in &element.children {
            write_node(out, child, depth + 1);
        }
    }

    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

/// Attribute values are always double-quoted, so `'` is left alone.
fn escape_attribute(value: &str) -> String {
    partial_escape(value).replace('"', "&quot;")
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
