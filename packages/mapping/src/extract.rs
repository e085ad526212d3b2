//! Node extraction: evaluate a field's node expressions against the XML context.

use roxmltree::Node;

use crate::value::Value;
use crate::xml::{element_children, has_element_children, Hit, NodeExpr, XmlNode};

/// Extract the values a field's node expressions select.
///
/// Expressions are evaluated independently, in order, relative to
/// `context`. An expression without matches contributes nothing.
///
/// In normal mode only the first match of each expression is used: an
/// element with child elements yields those children as a node-set,
/// anything else yields its text. Blank scalar values are dropped.
///
/// In raw mode every match of every expression is kept as a node
/// snapshot, in order, without blank filtering.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml_mapping::extract::extract;
/// use xml_mapping::xml::NodeExpr;
/// use xml_mapping::Value;
///
/// let doc = Document::parse("<p><a> </a><b>x</b></p>").unwrap();
/// let nodes = vec![NodeExpr::parse("a").unwrap(), NodeExpr::parse("b").unwrap()];
/// assert_eq!(extract(doc.root_element(), &nodes, false), vec![Value::from("x")]);
/// assert_eq!(extract(doc.root_element(), &nodes, true).len(), 2);
/// ```
pub fn extract(context: Node<'_, '_>, nodes: &[NodeExpr], raw: bool) -> Vec<Value> {
    let mut values = Vec::new();

    for expr in nodes {
        if raw {
            values.extend(expr.select(context).iter().map(|hit| Value::Node(hit.to_node())));
            continue;
        }

        let Some(hit) = expr.first(context) else {
            continue;
        };
        let value = hit_value(&hit);
        if value.is_blank() {
            tracing::trace!(expression = %expr, "Dropping blank value");
            continue;
        }
        values.push(value);
    }

    values
}

/// Value of a single normal-mode match.
fn hit_value(hit: &Hit<'_, '_>) -> Value {
    match hit.element() {
        Some(element) if has_element_children(element) => Value::List(
            element_children(element)
                .map(|child| Value::Node(XmlNode::from_node(child)))
                .collect(),
        ),
        _ => Value::String(hit.text()),
    }
}
