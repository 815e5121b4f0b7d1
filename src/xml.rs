//! Thin attributed-tree adapter over quick-xml.
//!
//! The normalization pipeline only needs a mutable tree of elements with
//! string-keyed attributes and ordered children. This module round-trips
//! stencil documents through that shape. Comments and processing
//! instructions are dropped; attribute order is preserved via `IndexMap`.

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::errors::NormalizeError;

/// One element of the stencil tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// First direct child with the given tag
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// First direct child with the given tag, mutable
    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.tag == tag)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }
}

/// Parse a stencil document into an element tree.
///
/// Whitespace-only text nodes (indentation) are ignored; stencil documents
/// carry no meaningful text content. Do not enable global text trimming in
/// the reader, per quick-xml guidance.
pub fn parse(source: &str) -> Result<Element, NormalizeError> {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let el = element_from_start(&start)?;
                attach(&mut stack, &mut root, el);
            }
            Event::End(_) => {
                // quick-xml validates nesting, so the stack cannot underflow
                if let Some(el) = stack.pop() {
                    attach(&mut stack, &mut root, el);
                }
            }
            Event::Eof => break,
            // Text, CData, comments, decls, PIs: nothing the pipeline needs
            _ => {}
        }
    }

    root.ok_or(NormalizeError::EmptyDocument)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, NormalizeError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut el = Element::new(tag);
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        el.attrs.insert(key, value);
    }
    Ok(el)
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, el: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => {
            // Keep the first root element; anything after it is ignored
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}

/// Serialize an element tree back to XML with two-space indentation.
pub fn serialize(root: &Element) -> Result<String, NormalizeError> {
    let mut out = Vec::new();
    let mut writer = Writer::new_with_indent(&mut out, b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(quick_xml::Error::from)?;
    write_element(&mut writer, root)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn write_element(writer: &mut Writer<&mut Vec<u8>>, el: &Element) -> Result<(), NormalizeError> {
    let mut start = BytesStart::new(el.tag.as_str());
    for (key, value) in &el.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if el.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(quick_xml::Error::from)?;
    } else {
        writer
            .write_event(Event::Start(start))
            .map_err(quick_xml::Error::from)?;
        for child in &el.children {
            write_element(writer, child)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(el.tag.as_str())))
            .map_err(quick_xml::Error::from)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_elements() {
        let doc = r#"<shapes name="set"><shape name="a"><foreground><path><move x="1" y="2"/></path></foreground></shape></shapes>"#;
        let root = parse(doc).unwrap();
        assert_eq!(root.tag, "shapes");
        assert_eq!(root.attr("name"), Some("set"));
        let shape = root.child("shape").unwrap();
        let path = shape.child("foreground").unwrap().child("path").unwrap();
        assert_eq!(path.children[0].tag, "move");
        assert_eq!(path.children[0].attr("x"), Some("1"));
    }

    #[test]
    fn attribute_order_survives_round_trip() {
        let doc = r#"<shape name="a" w="10" h="20" centered="1"/>"#;
        let root = parse(doc).unwrap();
        let keys: Vec<&str> = root.attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "w", "h", "centered"]);
        let out = serialize(&root).unwrap();
        assert!(out.contains(r#"name="a" w="10" h="20" centered="1""#));
    }

    #[test]
    fn ignores_comments_and_whitespace() {
        let doc = "<shapes>\n  <!-- note -->\n  <shape name=\"a\"/>\n</shapes>";
        let root = parse(doc).unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].tag, "shape");
    }

    #[test]
    fn rejects_mismatched_tags() {
        assert!(parse("<shapes><shape></shapes>").is_err());
    }

    #[test]
    fn empty_input_has_no_root() {
        assert!(matches!(
            parse("<!-- nothing here -->"),
            Err(NormalizeError::EmptyDocument)
        ));
    }
}
