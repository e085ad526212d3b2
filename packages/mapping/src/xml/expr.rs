//! Node expressions: a small subset of XPath location paths.
//!
//! Supported syntax:
//!
//! ```text
//! expr      := path ('|' path)*
//! path      := ['/' | '//'] step (('/' | '//') step)*
//! step      := name | '*' | '.' | '..' | '@' name | '@*' | 'text()' | 'node()'
//!              followed by zero or more predicates
//! predicate := '[' n ']' | '[last()]' | '[@a]' | '[@a=lit]'
//!            | '[name=lit]' | '[.=lit]' | '[text()=lit]'
//! ```
//!
//! Namespace prefixes in names are ignored; elements match on local name.
//! Results are returned in document order, attributes directly after their
//! element. After `//`, positional predicates count per parent, so `//t[1]`
//! is the first `t` of every parent. Equality predicates compare the
//! untrimmed string-value, and `..` from the root element is the document.

use std::collections::HashSet;

use roxmltree::Node;

use super::node::XmlNode;
use super::utils::{direct_text, element_children, get_tag_name, has_tag, text_content};
use crate::config::{MAX_EXPRESSION_LENGTH, MAX_EXPRESSION_STEPS};
use crate::error::{MappingError, Result};

/// A compiled node expression.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeExpr {
    source: String,
    branches: Vec<LocationPath>,
}

#[derive(Debug, Clone, PartialEq)]
struct LocationPath {
    absolute: bool,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq)]
struct Step {
    /// Step was preceded by `//`.
    descend: bool,
    axis: Axis,
    test: NodeTest,
    predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    SelfNode,
    Parent,
    Attribute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Name(String),
    Any,
    Text,
    Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Position(usize),
    Last,
    HasAttribute(String),
    AttributeEquals(String, String),
    ChildEquals(String, String),
    ValueEquals(String),
    TextNodeEquals(String),
}

/// Position of a hit in document order: the node id, then 0 for the node
/// itself or 1 + the attribute index.
type OrderKey = (usize, usize);

/// One match of a node expression.
#[derive(Debug, Clone, Copy)]
pub enum Hit<'a, 'input> {
    /// An element or text node.
    Node(Node<'a, 'input>),
    /// An attribute, carried with its owning element.
    Attribute {
        owner: Node<'a, 'input>,
        name: &'a str,
        value: &'a str,
    },
}

impl<'a, 'input> Hit<'a, 'input> {
    /// The matched node when it is an element.
    #[must_use]
    pub fn element(&self) -> Option<Node<'a, 'input>> {
        match self {
            Hit::Node(n) if n.is_element() => Some(*n),
            _ => None,
        }
    }

    /// Direct text of an element, the text of a text node, or the attribute value.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Hit::Node(n) => direct_text(*n),
            Hit::Attribute { value, .. } => (*value).to_string(),
        }
    }

    /// Owned snapshot of the match.
    #[must_use]
    pub fn to_node(&self) -> XmlNode {
        match self {
            Hit::Node(n) => XmlNode::from_node(*n),
            Hit::Attribute { name, value, .. } => XmlNode::attribute(*name, *value),
        }
    }

    fn order_key(&self) -> OrderKey {
        match self {
            Hit::Node(n) => (n.id().get_usize(), 0),
            Hit::Attribute { owner, name, value } => {
                let index = owner
                    .attributes()
                    .position(|a| a.name() == *name && std::ptr::eq(a.value(), *value))
                    .unwrap_or_default();
                (owner.id().get_usize(), index + 1)
            }
        }
    }

    /// XPath string-value: all descendant text of an element.
    fn string_value(&self) -> String {
        match self {
            Hit::Node(n) => text_content(*n),
            Hit::Attribute { value, .. } => (*value).to_string(),
        }
    }
}

impl NodeExpr {
    /// Compile an expression.
    ///
    /// # Errors
    /// Returns `InvalidExpression` for empty, oversized or malformed input.
    ///
    /// # Examples
    /// ```
    /// use xml_mapping::xml::NodeExpr;
    ///
    /// assert!(NodeExpr::parse("address/city").is_ok());
    /// assert!(NodeExpr::parse("//item[@type='main'][1]").is_ok());
    /// assert!(NodeExpr::parse("item[").is_err());
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(MappingError::expression(source, "expression is empty"));
        }
        if trimmed.len() > MAX_EXPRESSION_LENGTH {
            return Err(MappingError::expression(
                source,
                format!("expression exceeds {MAX_EXPRESSION_LENGTH} bytes"),
            ));
        }

        let mut branches = Vec::new();
        let mut total_steps = 0;
        for branch in split_top_level(trimmed, '|').map_err(|r| MappingError::expression(source, r))? {
            let path = parse_path(branch.trim()).map_err(|r| MappingError::expression(source, r))?;
            total_steps += path.steps.len();
            branches.push(path);
        }

        if total_steps > MAX_EXPRESSION_STEPS {
            return Err(MappingError::expression(
                source,
                format!("expression exceeds {MAX_EXPRESSION_STEPS} steps"),
            ));
        }

        Ok(Self {
            source: trimmed.to_string(),
            branches,
        })
    }

    /// The expression text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluate the expression relative to `context`.
    ///
    /// Matches come back in document order; a node matched by more than one
    /// branch of a union is returned once. Never fails: no match is an empty list.
    ///
    /// # Examples
    /// ```
    /// use roxmltree::Document;
    /// use xml_mapping::xml::NodeExpr;
    ///
    /// let doc = Document::parse("<p><tag>a</tag><tag>b</tag></p>").unwrap();
    /// let expr = NodeExpr::parse("tag").unwrap();
    /// let texts: Vec<_> = expr.select(doc.root_element()).iter().map(|h| h.text()).collect();
    /// assert_eq!(texts, vec!["a", "b"]);
    /// ```
    pub fn select<'a, 'input>(&self, context: Node<'a, 'input>) -> Vec<Hit<'a, 'input>> {
        let mut seen = HashSet::new();
        let mut out: Vec<Hit<'a, 'input>> = Vec::new();
        for branch in &self.branches {
            for hit in branch.evaluate(context) {
                if seen.insert(hit.order_key()) {
                    out.push(hit);
                }
            }
        }
        out.sort_by_key(Hit::order_key);
        out
    }

    /// First match, if any.
    #[must_use]
    pub fn first<'a, 'input>(&self, context: Node<'a, 'input>) -> Option<Hit<'a, 'input>> {
        self.select(context).into_iter().next()
    }
}

impl std::str::FromStr for NodeExpr {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for NodeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl LocationPath {
    fn evaluate<'a, 'input>(&self, context: Node<'a, 'input>) -> Vec<Hit<'a, 'input>> {
        let start = if self.absolute {
            context.document().root()
        } else {
            context
        };

        let mut current = vec![Hit::Node(start)];
        for step in &self.steps {
            let mut seen = HashSet::new();
            let mut next = Vec::new();
            for hit in &current {
                // Attributes have nothing below them.
                let Hit::Node(node) = hit else { continue };
                for candidate in step.apply(*node) {
                    if seen.insert(candidate.order_key()) {
                        next.push(candidate);
                    }
                }
            }
            if next.is_empty() {
                return next;
            }
            current = next;
        }
        current
    }
}

impl Step {
    fn apply<'a, 'input>(&self, node: Node<'a, 'input>) -> Vec<Hit<'a, 'input>> {
        if !self.descend {
            return self.filter(self.candidates(node));
        }

        // `//` applies the step to the node and each of its descendants,
        // with predicates evaluated per context.
        node.descendants()
            .filter(|n| n.is_element() || n.is_root())
            .flat_map(|ctx| self.filter(self.candidates(ctx)))
            .collect()
    }

    fn filter<'a, 'input>(&self, candidates: Vec<Hit<'a, 'input>>) -> Vec<Hit<'a, 'input>> {
        self.predicates
            .iter()
            .fold(candidates, |hits, predicate| predicate.filter(hits))
    }

    fn candidates<'a, 'input>(&self, ctx: Node<'a, 'input>) -> Vec<Hit<'a, 'input>> {
        match self.axis {
            Axis::Child => ctx
                .children()
                .filter(|c| self.test.matches(*c))
                .map(Hit::Node)
                .collect(),
            Axis::SelfNode => {
                if self.test.matches(ctx) || ctx.is_root() {
                    vec![Hit::Node(ctx)]
                } else {
                    Vec::new()
                }
            }
            Axis::Parent => ctx.parent().map(Hit::Node).into_iter().collect(),
            Axis::Attribute => ctx
                .attributes()
                .filter(|a| match &self.test {
                    NodeTest::Name(name) => a.name() == name,
                    _ => true,
                })
                .map(|a| Hit::Attribute {
                    owner: ctx,
                    name: a.name(),
                    value: a.value(),
                })
                .collect(),
        }
    }
}

impl NodeTest {
    fn matches(&self, node: Node<'_, '_>) -> bool {
        match self {
            NodeTest::Name(name) => has_tag(node, name),
            NodeTest::Any => node.is_element(),
            NodeTest::Text => node.is_text(),
            NodeTest::Node => node.is_element() || node.is_text(),
        }
    }
}

impl Predicate {
    fn filter<'a, 'input>(&self, hits: Vec<Hit<'a, 'input>>) -> Vec<Hit<'a, 'input>> {
        match self {
            Predicate::Position(n) => hits.into_iter().nth(n - 1).into_iter().collect(),
            Predicate::Last => hits.into_iter().last().into_iter().collect(),
            _ => hits.into_iter().filter(|h| self.test(h)).collect(),
        }
    }

    fn test(&self, hit: &Hit<'_, '_>) -> bool {
        match self {
            Predicate::HasAttribute(name) => hit
                .element()
                .is_some_and(|e| e.attributes().any(|a| a.name() == name)),
            Predicate::AttributeEquals(name, value) => hit.element().is_some_and(|e| {
                e.attributes()
                    .any(|a| a.name() == name && a.value() == value)
            }),
            Predicate::ChildEquals(name, value) => hit.element().is_some_and(|e| {
                element_children(e)
                    .any(|c| get_tag_name(c) == name && text_content(c) == *value)
            }),
            Predicate::ValueEquals(value) => hit.string_value() == *value,
            Predicate::TextNodeEquals(value) => hit.element().is_some_and(|e| {
                e.children()
                    .any(|c| c.is_text() && c.text() == Some(value.as_str()))
            }),
            Predicate::Position(_) | Predicate::Last => true,
        }
    }
}

/// Split on `sep` outside brackets and quotes.
fn split_top_level(input: &str, sep: char) -> std::result::Result<Vec<&str>, String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced ']'".to_string())?;
            }
            (None, c) if c == sep && depth == 0 => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if quote.is_some() {
        return Err("unterminated string literal".to_string());
    }
    if depth != 0 {
        return Err("unbalanced '['".to_string());
    }
    parts.push(&input[start..]);
    Ok(parts)
}

fn parse_path(path: &str) -> std::result::Result<LocationPath, String> {
    if path.is_empty() {
        return Err("empty path in union".to_string());
    }

    let absolute = path.starts_with('/');
    let mut steps = Vec::new();
    let mut descend = false;
    let mut rest = path;

    if let Some(stripped) = rest.strip_prefix("//") {
        descend = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('/') {
        rest = stripped;
    }

    // Step boundaries are '/' outside predicates; an empty raw step after a
    // separator means the separator was '//'.
    let raw_steps = split_top_level(rest, '/')?;
    let last = raw_steps.len().saturating_sub(1);
    for (i, raw) in raw_steps.into_iter().enumerate() {
        let raw = raw.trim();
        if raw.is_empty() {
            if descend || i == 0 || i == last {
                return Err(format!("empty step in '{path}'"));
            }
            descend = true;
            continue;
        }
        steps.push(parse_step(raw, descend)?);
        descend = false;
    }

    if steps.is_empty() {
        return Err(format!("'{path}' has no steps"));
    }

    Ok(LocationPath { absolute, steps })
}

fn parse_step(raw: &str, descend: bool) -> std::result::Result<Step, String> {
    let (head, mut tail) = match raw.find('[') {
        Some(i) => (raw[..i].trim(), &raw[i..]),
        None => (raw, ""),
    };

    let (axis, test) = match head {
        "." => (Axis::SelfNode, NodeTest::Node),
        ".." => (Axis::Parent, NodeTest::Any),
        "*" => (Axis::Child, NodeTest::Any),
        "text()" => (Axis::Child, NodeTest::Text),
        "node()" => (Axis::Child, NodeTest::Node),
        "@*" => (Axis::Attribute, NodeTest::Any),
        _ => match head.strip_prefix('@') {
            Some(name) => (Axis::Attribute, NodeTest::Name(parse_name(name)?)),
            None => (Axis::Child, NodeTest::Name(parse_name(head)?)),
        },
    };

    let mut predicates = Vec::new();
    while !tail.is_empty() {
        let inner = tail
            .strip_prefix('[')
            .ok_or_else(|| format!("unexpected '{tail}' after step"))?;
        let end = closing_bracket(inner).ok_or_else(|| format!("unclosed predicate in '{raw}'"))?;
        predicates.push(parse_predicate(inner[..end].trim())?);
        tail = inner[end + 1..].trim_start();
    }

    Ok(Step {
        descend,
        axis,
        test,
        predicates,
    })
}

/// Index of the `]` closing a predicate whose `[` was already consumed.
fn closing_bracket(input: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ']') => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_predicate(inner: &str) -> std::result::Result<Predicate, String> {
    if inner.is_empty() {
        return Err("empty predicate".to_string());
    }
    if inner == "last()" {
        return Ok(Predicate::Last);
    }
    if inner.bytes().all(|b| b.is_ascii_digit()) {
        let n: usize = inner
            .parse()
            .map_err(|_| format!("invalid position '{inner}'"))?;
        if n == 0 {
            return Err("positions start at 1".to_string());
        }
        return Ok(Predicate::Position(n));
    }

    match inner.split_once('=') {
        Some((lhs, rhs)) => {
            let lhs = lhs.trim();
            let literal = parse_literal(rhs.trim())?;
            match lhs {
                "." => Ok(Predicate::ValueEquals(literal)),
                "text()" => Ok(Predicate::TextNodeEquals(literal)),
                _ => match lhs.strip_prefix('@') {
                    Some(name) => Ok(Predicate::AttributeEquals(parse_name(name)?, literal)),
                    None => Ok(Predicate::ChildEquals(parse_name(lhs)?, literal)),
                },
            }
        }
        None => match inner.strip_prefix('@') {
            Some(name) => Ok(Predicate::HasAttribute(parse_name(name)?)),
            None => Err(format!("unsupported predicate '[{inner}]'")),
        },
    }
}

fn parse_literal(raw: &str) -> std::result::Result<String, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('\'' | '"')), Some(close)) if open == close && raw.len() >= 2 => {
            Ok(raw[1..raw.len() - 1].to_string())
        }
        _ => Err(format!("expected quoted literal, got '{raw}'")),
    }
}

/// Validate a (possibly prefixed) name and return its local part.
fn parse_name(raw: &str) -> std::result::Result<String, String> {
    let local = raw.rsplit_once(':').map_or(raw, |(_, local)| local);
    let valid = local
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(local.to_string())
    } else {
        Err(format!("invalid name '{raw}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    const CATALOG: &str = r#"<catalog xmlns:x="urn:x">
        <product id="1" type="main">
            <name>Fiets</name>
            <tags><tag>blauw</tag><tag>stad</tag></tags>
            <x:price currency="EUR">499</x:price>
        </product>
        <product id="2">
            <name>Step</name>
            <tags><tag>rood</tag></tags>
        </product>
    </catalog>"#;

    fn texts(expr: &str, doc: &Document<'_>) -> Vec<String> {
        NodeExpr::parse(expr)
            .unwrap()
            .select(doc.root_element())
            .iter()
            .map(|h| h.text())
            .collect()
    }

    #[test]
    fn test_child_steps() {
        let doc = Document::parse(CATALOG).unwrap();
        assert_eq!(texts("product/name", &doc), vec!["Fiets", "Step"]);
        assert_eq!(texts("product/tags/tag", &doc), vec!["blauw", "stad", "rood"]);
        assert!(texts("product/missing", &doc).is_empty());
    }

    #[test]
    fn test_descendant_steps() {
        let doc = Document::parse(CATALOG).unwrap();
        assert_eq!(texts("//tag", &doc), vec!["blauw", "stad", "rood"]);
        assert_eq!(texts("product[2]//tag", &doc), vec!["rood"]);
    }

    #[test]
    fn test_absolute_path() {
        let doc = Document::parse(CATALOG).unwrap();
        let product = doc.root_element().first_element_child().unwrap();
        let expr = NodeExpr::parse("/catalog/product/name").unwrap();
        let hits: Vec<_> = expr.select(product).iter().map(|h| h.text()).collect();
        assert_eq!(hits, vec!["Fiets", "Step"]);
    }

    #[test]
    fn test_attributes() {
        let doc = Document::parse(CATALOG).unwrap();
        assert_eq!(texts("product/@id", &doc), vec!["1", "2"]);
        assert_eq!(texts("product[1]/@*", &doc), vec!["1", "main"]);
        assert_eq!(texts("//price/@currency", &doc), vec!["EUR"]);
    }

    #[test]
    fn test_namespace_prefix_ignored() {
        let doc = Document::parse(CATALOG).unwrap();
        assert_eq!(texts("product/x:price", &doc), vec!["499"]);
        assert_eq!(texts("product/price", &doc), vec!["499"]);
    }

    #[test]
    fn test_predicates() {
        let doc = Document::parse(CATALOG).unwrap();
        assert_eq!(texts("product[1]/name", &doc), vec!["Fiets"]);
        assert_eq!(texts("product[last()]/name", &doc), vec!["Step"]);
        assert_eq!(texts("product[@type]/name", &doc), vec!["Fiets"]);
        assert_eq!(texts("product[@id='2']/name", &doc), vec!["Step"]);
        assert_eq!(texts("product[name=\"Step\"]/@id", &doc), vec!["2"]);
        assert_eq!(texts("product/tags/tag[.='stad']", &doc), vec!["stad"]);
        assert_eq!(texts("product/tags/tag[2]", &doc), vec!["stad"]);
        assert!(texts("product[3]", &doc).is_empty());
    }

    #[test]
    fn test_self_parent_and_text() {
        let doc = Document::parse(CATALOG).unwrap();
        let name = NodeExpr::parse("product[1]/name")
            .unwrap()
            .first(doc.root_element())
            .and_then(|h| h.element())
            .unwrap();

        let parent = NodeExpr::parse("../@id").unwrap();
        assert_eq!(parent.first(name).map(|h| h.text()), Some("1".to_string()));

        let own = NodeExpr::parse(".").unwrap();
        assert_eq!(own.first(name).map(|h| h.text()), Some("Fiets".to_string()));

        let text = NodeExpr::parse("text()").unwrap();
        assert_eq!(text.select(name).len(), 1);
    }

    #[test]
    fn test_union_deduplicates() {
        let doc = Document::parse(CATALOG).unwrap();
        assert_eq!(
            texts("product[2]/name | product/name", &doc),
            vec!["Fiets", "Step"]
        );
    }

    #[test]
    fn test_union_in_document_order() {
        let doc = Document::parse("<r><a>1</a><b>2</b></r>").unwrap();
        assert_eq!(texts("b | a", &doc), vec!["1", "2"]);

        let first = NodeExpr::parse("b | a").unwrap().first(doc.root_element());
        assert_eq!(first.map(|h| h.text()), Some("1".to_string()));
    }

    #[test]
    fn test_attributes_follow_their_element() {
        let doc = Document::parse(r#"<r><a x="1" y="2">t</a><b z="3"/></r>"#).unwrap();
        assert_eq!(texts("b/@z | a/@y | a | a/@x", &doc), vec!["t", "1", "2", "3"]);
    }

    #[test]
    fn test_descendant_positions_count_per_parent() {
        let doc = Document::parse("<c><p><t>a</t><t>b</t></p><p><t>c</t></p></c>").unwrap();
        assert_eq!(texts("//t[1]", &doc), vec!["a", "c"]);
        assert_eq!(texts("//t[last()]", &doc), vec!["b", "c"]);
        assert_eq!(texts("p//t[2]", &doc), vec!["b"]);
    }

    #[test]
    fn test_descendant_results_in_document_order() {
        let doc = Document::parse("<a><x><b>1</b></x><b>2</b></a>").unwrap();
        assert_eq!(texts("//b", &doc), vec!["1", "2"]);
        assert_eq!(texts(".//b", &doc), vec!["1", "2"]);
    }

    #[test]
    fn test_many_matches() {
        let xml = format!("<r>{}</r>", "<p><n>x</n></p>".repeat(20_000));
        let doc = Document::parse(&xml).unwrap();
        let hits = NodeExpr::parse("p/n").unwrap().select(doc.root_element());
        assert_eq!(hits.len(), 20_000);
    }

    #[test]
    fn test_equality_uses_untrimmed_string_value() {
        let doc = Document::parse("<r><i><k> a </k></i><i><k><b>x</b>y</k></i></r>").unwrap();
        assert!(texts("i[k='a']/k", &doc).is_empty());
        assert_eq!(texts("i[k=' a ']/k", &doc), vec![" a "]);
        assert_eq!(texts("i[k='xy']/k", &doc), vec!["y"]);
        assert_eq!(texts("i/k[.='xy']", &doc), vec!["y"]);
        assert_eq!(texts("i/k[text()='y']", &doc), vec!["y"]);
        assert!(texts("i/k[text()='xy']", &doc).is_empty());
    }

    #[test]
    fn test_parent_of_root_element_is_document() {
        let doc = Document::parse("<r><a>1</a></r>").unwrap();
        let hits = NodeExpr::parse("..").unwrap().select(doc.root_element());
        assert_eq!(hits.len(), 1);
        assert!(matches!(hits[0], Hit::Node(n) if n.is_root()));

        let back = NodeExpr::parse("../r/a").unwrap().select(doc.root_element());
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "", "   ", "a//", "a/", "///a", "a[", "a]", "a[0]", "a[@]", "a[b=c]", "a[@x='y]",
            "1abc", "a|", "a[foo()]",
        ] {
            assert!(NodeExpr::parse(bad).is_err(), "expected error for {bad:?}");
        }
    }

    #[test]
    fn test_parse_limits() {
        let long = "a/".repeat(MAX_EXPRESSION_STEPS) + "a";
        assert!(NodeExpr::parse(&long).is_err());

        let huge = "a".repeat(MAX_EXPRESSION_LENGTH + 1);
        assert!(NodeExpr::parse(&huge).is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let expr: NodeExpr = " tags/tag ".parse().unwrap();
        assert_eq!(expr.to_string(), "tags/tag");
        assert_eq!(expr.as_str(), "tags/tag");
    }
}
