//! Owned, immutable document tree built from `html5ever` output.
//!
//! The parser's reference-counted DOM is converted once into plain values so
//! that later passes (sanitizing, image hoisting) can build new trees instead
//! of mutating shared nodes.

use deck_core::Result;
use html5ever::tendril::TendrilSink;
use html5ever::{namespace_url, ns, parse_document, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::io::Read;
use std::{mem, slice, vec};

/// A name/value attribute pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element with its attributes (in source order) and children.
///
/// Cloning and dropping walk the subtree with an explicit stack, so trees of
/// any depth are safe to copy and release.
#[derive(Debug, PartialEq, Eq)]
pub struct Element {
    /// Lowercase local tag name.
    pub name: String,
    /// Namespace from the parser: HTML, or SVG/MathML for foreign content.
    pub namespace: Namespace,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an HTML element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: ns!(html),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(Attribute::new(name, value));
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    /// Whether the tag name matches `name` (ASCII case-insensitive).
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whether the whitespace-separated `class` list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_ascii_whitespace().any(|token| token == class))
            .unwrap_or(false)
    }

    /// Concatenated text of all descendant text nodes, like DOM `textContent`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Direct children that are elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Qualified name used when serializing.
    pub fn qual_name(&self) -> QualName {
        QualName::new(None, self.namespace.clone(), LocalName::from(self.name.as_str()))
    }

    /// Copy of the tag and attributes, without children.
    pub fn shallow_copy(&self) -> Element {
        Element {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            attrs: self.attrs.clone(),
            children: Vec::new(),
        }
    }

    /// Copy the descendants of `self` into `root`, passing every descendant
    /// element through `map` in document order.
    ///
    /// `map` returns the childless replacement for an element, or `None` to
    /// leave that element and its subtree out. Text and comment nodes are
    /// copied unchanged.
    pub fn rebuild_with<F>(&self, root: Element, mut map: F) -> Element
    where
        F: FnMut(&Element) -> Option<Element>,
    {
        let mut current = root;
        let mut children = self.children.iter();
        let mut open: Vec<(Element, slice::Iter<'_, Node>)> = Vec::new();

        loop {
            match children.next() {
                Some(Node::Element(element)) => {
                    if let Some(copy) = map(element) {
                        let parent = mem::replace(&mut current, copy);
                        let rest = mem::replace(&mut children, element.children.iter());
                        open.push((parent, rest));
                    }
                }
                Some(node) => current.children.push(node.clone()),
                None => match open.pop() {
                    Some((parent, rest)) => {
                        let done = mem::replace(&mut current, parent);
                        current.children.push(Node::Element(done));
                        children = rest;
                    }
                    None => return current,
                },
            }
        }
    }
}

impl Clone for Element {
    fn clone(&self) -> Self {
        self.rebuild_with(self.shallow_copy(), |element| Some(element.shallow_copy()))
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    /// The element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Text content of this node; comments contribute nothing.
    pub fn text_content(&self) -> String {
        match self {
            Node::Element(element) => element.text_content(),
            Node::Text(text) => text.clone(),
            Node::Comment(_) => String::new(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    let mut stack = vec![nodes.iter()];
    while let Some(level) = stack.last_mut() {
        match level.next() {
            Some(Node::Element(element)) => stack.push(element.children.iter()),
            Some(Node::Text(text)) => out.push_str(text),
            Some(Node::Comment(_)) => {}
            None => {
                stack.pop();
            }
        }
    }
}

/// A parsed HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level nodes (normally a single `html` element).
    pub children: Vec<Node>,
}

impl Document {
    /// Parse an HTML document from a string.
    ///
    /// Parsing follows the HTML5 algorithm and never fails: malformed markup
    /// is repaired the way a browser would.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self::from_rcdom(&dom)
    }

    /// Parse an HTML document from a UTF-8 byte stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut reader)?;
        Ok(Self::from_rcdom(&dom))
    }

    /// Build a document directly from nodes.
    pub fn from_nodes(children: Vec<Node>) -> Self {
        Self { children }
    }

    fn from_rcdom(dom: &RcDom) -> Self {
        let children = convert_children(&dom.document);
        log::debug!("Parsed document with {} top-level nodes", children.len());
        Self { children }
    }

    /// Text content of the whole document.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

/// Convert the children of an `RcDom` node, depth first with an explicit
/// stack of open elements.
fn convert_children(root: &Handle) -> Vec<Node> {
    let mut top = Vec::new();
    let mut rest = child_handles(root).into_iter();
    let mut open: Vec<(Element, vec::IntoIter<Handle>)> = Vec::new();

    loop {
        let next = match open.last_mut() {
            Some((_, handles)) => handles.next(),
            None => rest.next(),
        };
        match next {
            Some(handle) => match convert_node(&handle) {
                Some(Node::Element(element)) => {
                    open.push((element, child_handles(&handle).into_iter()));
                }
                Some(node) => attach(&mut open, &mut top, node),
                None => {}
            },
            None => match open.pop() {
                Some((element, _)) => attach(&mut open, &mut top, Node::Element(element)),
                None => return top,
            },
        }
    }
}

fn attach(open: &mut [(Element, vec::IntoIter<Handle>)], top: &mut Vec<Node>, node: Node) {
    match open.last_mut() {
        Some((parent, _)) => parent.children.push(node),
        None => top.push(node),
    }
}

fn child_handles(handle: &Handle) -> Vec<Handle> {
    // Template content lives in a separate fragment.
    if let NodeData::Element {
        ref template_contents,
        ..
    } = handle.data
    {
        if let Some(fragment) = template_contents.borrow().as_ref() {
            return fragment.children.borrow().clone();
        }
    }
    handle.children.borrow().clone()
}

/// Convert one node. Elements come back without children.
fn convert_node(handle: &Handle) -> Option<Node> {
    match handle.data {
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|a| {
                    let name = match &a.name.prefix {
                        Some(prefix) => format!("{}:{}", prefix, a.name.local),
                        None => a.name.local.to_string(),
                    };
                    Attribute::new(name, a.value.to_string())
                })
                .collect();
            Some(Node::Element(Element {
                name: name.local.to_string(),
                namespace: name.ns.clone(),
                attrs,
                children: Vec::new(),
            }))
        }
        NodeData::Text { ref contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { ref contents } => Some(Node::Comment(contents.to_string())),
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}
