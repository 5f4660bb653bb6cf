use std::collections::BTreeMap;

use ff_core::{codes, collapse_whitespace, FormFlowError, SourceLocation, SourceSpan};
use log::debug;
use roxmltree::{Document, Node, NodeType, ParsingOptions};

mod select;

pub use select::{ElementPath, Matcher, Selector};

#[derive(Debug, Clone, PartialEq)]
pub struct DomDocument {
    pub root: DomElement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Element(DomElement),
    Text(DomText),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<DomNode>,
    pub location: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomText {
    pub value: String,
    pub location: SourceSpan,
}

impl DomElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|value| value.split_whitespace().any(|entry| entry == class))
    }

    pub fn element_children(&self) -> impl Iterator<Item = &DomElement> {
        self.children.iter().filter_map(|entry| match entry {
            DomNode::Element(element) => Some(element),
            DomNode::Text(_) => None,
        })
    }

    pub fn element_child(&self, index: usize) -> Option<&DomElement> {
        self.element_children().nth(index)
    }

    /// Rendered-text approximation: every descendant text node joined, with
    /// whitespace runs collapsed.
    pub fn inner_text(&self) -> String {
        let mut raw = String::new();
        collect_text(self, &mut raw);
        collapse_whitespace(&raw)
    }
}

fn collect_text(element: &DomElement, out: &mut String) {
    for child in &element.children {
        match child {
            DomNode::Text(text) => out.push_str(&text.value),
            DomNode::Element(nested) => collect_text(nested, out),
        }
    }
}

pub fn parse_snapshot(source: &str) -> Result<DomDocument, FormFlowError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(source, options)
        .map_err(|error| FormFlowError::new(codes::SNAPSHOT_PARSE_ERROR, error.to_string()))?;

    let Some(root) = document.root().children().find(|node| node.is_element()) else {
        return Err(FormFlowError::new(
            codes::SNAPSHOT_PARSE_ERROR,
            "Snapshot must contain a root element.",
        ));
    };

    let root = parse_element(&document, root);
    debug!(root = root.name.as_str(); "Parsed snapshot");
    Ok(DomDocument { root })
}

fn parse_element(document: &Document<'_>, node: Node<'_, '_>) -> DomElement {
    let mut attributes = BTreeMap::new();
    for attribute in node.attributes() {
        attributes.insert(attribute.name().to_string(), attribute.value().to_string());
    }

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => children.push(DomNode::Element(parse_element(document, child))),
            NodeType::Text => {
                let value = child.text().unwrap_or_default().to_string();
                if value.is_empty() {
                    continue;
                }
                children.push(DomNode::Text(DomText {
                    value,
                    location: node_span(document, child.range().start, child.range().end),
                }));
            }
            _ => {}
        }
    }

    DomElement {
        name: node.tag_name().name().to_string(),
        attributes,
        children,
        location: node_span(document, node.range().start, node.range().end),
    }
}

fn node_span(document: &Document<'_>, start: usize, end: usize) -> SourceSpan {
    let start_pos = document.text_pos_at(start);
    let end_pos = document.text_pos_at(end);
    SourceSpan {
        start: SourceLocation {
            line: start_pos.row as usize,
            column: start_pos.col as usize,
        },
        end: SourceLocation {
            line: end_pos.row as usize,
            column: end_pos.col as usize,
        },
    }
}
