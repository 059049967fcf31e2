//! Small helpers over `xmltree` shared by the envelope codecs.

use xml::attribute::OwnedAttribute;
use xml::name::OwnedName;
use xml::namespace::Namespace;
use xml::reader::{EventReader, ParserConfig, XmlEvent};
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::EnvelopeError;

/// Creates an element holding `text`; empty text yields an empty element.
pub(crate) fn text_element(name: &str, text: &str) -> Element {
    let mut element = Element::new(name);
    if !text.is_empty() {
        element.children.push(XMLNode::Text(text.to_owned()));
    }
    element
}

/// Creates an element whose children are text elements named by `fields`.
pub(crate) fn group(name: &str, fields: &[(&str, &str)]) -> Element {
    let mut element = Element::new(name);
    for (child, text) in fields {
        push(&mut element, text_element(child, text));
    }
    element
}

pub(crate) fn push(parent: &mut Element, child: Element) {
    parent.children.push(XMLNode::Element(child));
}

/// Returns the text at a nested child path, or an empty string when any
/// element on the path is missing.
pub(crate) fn text_at(parent: &Element, path: &[&str]) -> String {
    let mut current = parent;
    for name in path {
        match current.get_child(*name) {
            Some(child) => current = child,
            None => return String::new(),
        }
    }
    own_text(current)
}

pub(crate) fn own_text(element: &Element) -> String {
    element
        .get_text()
        .map(|text| text.into_owned())
        .unwrap_or_default()
}

pub(crate) fn attribute(element: &Element, name: &str) -> String {
    element.attributes.get(name).cloned().unwrap_or_default()
}

pub(crate) fn set_attribute(element: &mut Element, name: &str, value: &str) {
    element.attributes.insert(name.to_owned(), value.to_owned());
}

/// Child elements of `element`, skipping text, comments and instructions.
pub(crate) fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

/// Parses a document into its root element.
///
/// Whitespace-only text is kept in leaf elements, so a field such as
/// `<domain>  </domain>` decodes verbatim. Whitespace between sibling
/// elements is dropped.
pub(crate) fn parse_document(bytes: &[u8]) -> Result<Element, EnvelopeError> {
    let config = ParserConfig::new()
        .whitespace_to_characters(true)
        .cdata_to_characters(true);
    let mut reader = EventReader::new_with_config(bytes, config);
    loop {
        match next_event(&mut reader)? {
            XmlEvent::StartElement {
                name,
                attributes,
                namespace,
            } => {
                let root = open_element(name, attributes, namespace);
                return build_element(&mut reader, root);
            }
            XmlEvent::EndDocument => return Err(EnvelopeError::malformed("no root element")),
            _ => {}
        }
    }
}

fn open_element(name: OwnedName, attributes: Vec<OwnedAttribute>, namespace: Namespace) -> Element {
    let mut element = Element::new(&name.local_name);
    element.prefix = name.prefix;
    element.namespace = name.namespace;
    if !namespace.is_essentially_empty() {
        element.namespaces = Some(namespace);
    }
    for attribute in attributes {
        element
            .attributes
            .insert(attribute.name.local_name, attribute.value);
    }
    element
}

fn build_element(
    reader: &mut EventReader<&[u8]>,
    mut element: Element,
) -> Result<Element, EnvelopeError> {
    loop {
        match next_event(reader)? {
            XmlEvent::StartElement {
                name,
                attributes,
                namespace,
            } => {
                let child = build_element(reader, open_element(name, attributes, namespace))?;
                push(&mut element, child);
            }
            XmlEvent::EndElement { .. } => {
                drop_layout_whitespace(&mut element);
                return Ok(element);
            }
            XmlEvent::Characters(text) | XmlEvent::CData(text) | XmlEvent::Whitespace(text) => {
                element.children.push(XMLNode::Text(text));
            }
            XmlEvent::ProcessingInstruction { name, data } => {
                element
                    .children
                    .push(XMLNode::ProcessingInstruction(name, data));
            }
            XmlEvent::EndDocument => {
                return Err(EnvelopeError::malformed(format!(
                    "document ended inside <{}>",
                    element.name
                )));
            }
            _ => {}
        }
    }
}

/// Removes indentation from elements that contain child elements.
fn drop_layout_whitespace(element: &mut Element) {
    let has_elements = element
        .children
        .iter()
        .any(|node| matches!(node, XMLNode::Element(_)));
    if has_elements {
        element.children.retain(|node| match node {
            XMLNode::Text(text) => !text.chars().all(char::is_whitespace),
            _ => true,
        });
    }
}

fn next_event(reader: &mut EventReader<&[u8]>) -> Result<XmlEvent, EnvelopeError> {
    reader
        .next()
        .map_err(|error| EnvelopeError::malformed(error.to_string()))
}

/// Parses a document and checks the local name of its root element.
pub(crate) fn parse_root(bytes: &[u8], expected: &'static str) -> Result<Element, EnvelopeError> {
    let root = parse_document(bytes)?;
    if root.name != expected {
        return Err(EnvelopeError::unexpected_root(expected, root.name));
    }
    Ok(root)
}

pub(crate) fn write_document(root: &Element) -> Result<Vec<u8>, EnvelopeError> {
    let mut buffer = Vec::new();
    let config = EmitterConfig::new()
        .perform_indent(false)
        .write_document_declaration(true);
    root.write_with_config(&mut buffer, config)
        .map_err(|error| EnvelopeError::write(error.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_reads_as_empty() {
        let root = group("security", &[("domain", "d")]);
        assert_eq!(text_at(&root, &["domain"]), "d");
        assert_eq!(text_at(&root, &["username"]), "");
        assert_eq!(text_at(&root, &["domain", "nested"]), "");
    }

    #[test]
    fn empty_text_produces_childless_element() {
        let element = text_element("application_acknowledgement_type", "");
        assert!(element.children.is_empty());
    }

    #[test]
    fn keeps_whitespace_only_leaf_text() {
        let root = parse_document(
            b"<security>\n  <domain>  </domain>\n  <username>\t</username>\n  <password/>\n</security>",
        )
        .expect("well-formed document");
        assert_eq!(child_elements(&root).count(), 3);
        assert!(
            root.children
                .iter()
                .all(|node| matches!(node, XMLNode::Element(_)))
        );
        assert_eq!(text_at(&root, &["domain"]), "  ");
        assert_eq!(text_at(&root, &["username"]), "\t");
        assert_eq!(text_at(&root, &["password"]), "");
    }

    #[test]
    fn reports_truncated_documents() {
        let error = parse_document(b"<security><domain>d</domain>").expect_err("truncated");
        assert!(matches!(error, EnvelopeError::MalformedXml { .. }));
    }

    #[test]
    fn rejects_unexpected_root() {
        let error = parse_root(b"<reply/>", "response").expect_err("wrong root");
        assert!(matches!(error, EnvelopeError::UnexpectedRoot { .. }));
    }

    #[test]
    fn rejects_malformed_documents() {
        let error = parse_document(b"<response>").expect_err("unterminated");
        assert!(matches!(error, EnvelopeError::MalformedXml { .. }));
    }
}
