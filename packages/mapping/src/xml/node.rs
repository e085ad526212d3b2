//! Owned snapshots of matched XML nodes.
//!
//! Extracted raw values must outlive the parsed `roxmltree::Document`, so
//! matches are copied into these plain structures before they are handed to
//! processors or written onto a model.

use roxmltree::Node;
use serde::Serialize;

use super::utils::{direct_text, element_children, get_tag_name};

/// Owned copy of an XML element and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlElement {
    /// Local tag name (namespace prefix stripped).
    pub name: String,

    /// Namespace URI, if the element is namespaced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Attributes in document order as (local name, value).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,

    /// Concatenated direct text children.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,

    /// Element children in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Copy an element node and everything below it.
    pub fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            name: get_tag_name(node).to_string(),
            namespace: node.tag_name().namespace().map(str::to_string),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            text: direct_text(node),
            children: element_children(node).map(XmlElement::from_node).collect(),
        }
    }

    /// Get an attribute value by local name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Direct text followed by the text of all descendants, depth first.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }
}

/// A matched XML node: element, attribute or text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum XmlNode {
    /// An element with its subtree.
    Element(XmlElement),
    /// An attribute of some element.
    Attribute { name: String, value: String },
    /// A text node.
    Text { value: String },
}

impl XmlNode {
    /// Snapshot a `roxmltree` node. Anything that is not an element is taken as text.
    pub fn from_node(node: Node<'_, '_>) -> Self {
        if node.is_element() {
            XmlNode::Element(XmlElement::from_node(node))
        } else {
            XmlNode::text_node(node.text().unwrap_or_default())
        }
    }

    /// Build a text node.
    pub fn text_node(value: impl Into<String>) -> Self {
        XmlNode::Text {
            value: value.into(),
        }
    }

    /// Build an attribute node.
    pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        XmlNode::Attribute {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Name of an element or attribute; `None` for text.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            XmlNode::Element(e) => Some(&e.name),
            XmlNode::Attribute { name, .. } => Some(name),
            XmlNode::Text { .. } => None,
        }
    }

    /// Direct text of an element, value of an attribute, or the text itself.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            XmlNode::Element(e) => &e.text,
            XmlNode::Attribute { value, .. } | XmlNode::Text { value } => value,
        }
    }

    /// The element, if this is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }
}
