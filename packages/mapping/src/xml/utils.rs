//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml_mapping::xml::get_tag_name;
///
/// let xml = r#"<root><product>text</product></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let product = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(product), "product");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get all element children of a node.
///
/// # Returns
/// Iterator over element children (excludes text nodes, comments, etc.)
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Check whether a node has at least one element child.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml_mapping::xml::has_element_children;
///
/// let doc = Document::parse("<a>text<b/></a>").unwrap();
/// assert!(has_element_children(doc.root_element()));
///
/// let doc = Document::parse("<a>only text</a>").unwrap();
/// assert!(!has_element_children(doc.root_element()));
/// ```
pub fn has_element_children(node: Node<'_, '_>) -> bool {
    node.children().any(|child| child.is_element())
}

/// Concatenate the direct text children of a node, untrimmed.
///
/// Text inside child elements is not included. For a text node the text
/// itself is returned.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml_mapping::xml::direct_text;
///
/// let doc = Document::parse("<a>one<!-- c -->two<b>skip</b></a>").unwrap();
/// assert_eq!(direct_text(doc.root_element()), "onetwo");
/// ```
pub fn direct_text(node: Node<'_, '_>) -> String {
    if node.is_text() {
        return node.text().unwrap_or_default().to_string();
    }
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}

/// Get the text content of a node and all its descendants.
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Check if a node is an element with the given local name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}
