//! XML boundary: node snapshots, path expressions and DOM helpers.
//!
//! The engine works on already-parsed `roxmltree` trees. Node expressions
//! are compiled once from the mapping configuration and evaluated relative
//! to the element handed to the engine.

mod expr;
mod node;
mod utils;

pub use expr::{Hit, NodeExpr};
pub use node::{XmlElement, XmlNode};
pub use utils::{direct_text, element_children, get_tag_name, has_element_children, has_tag, text_content};
