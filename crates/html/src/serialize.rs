//! HTML fragment serialization (`outerHTML` / `innerHTML`).
//!
//! The owned tree implements html5ever's [`Serialize`], so void elements,
//! raw-text elements and escaping follow html5ever's HTML serializer.

use crate::dom::{Element, Node};
use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::{namespace_url, ns, LocalName, QualName};
use std::io;

/// Serialize a node including its own tag.
pub fn outer_html(node: &Node) -> String {
    to_html(node, TraversalScope::IncludeNode)
}

/// Serialize an element including its own tag.
pub fn element_outer_html(element: &Element) -> String {
    to_html(element, TraversalScope::IncludeNode)
}

/// Serialize only the children of an element.
pub fn inner_html(element: &Element) -> String {
    to_html(element, TraversalScope::ChildrenOnly(Some(element.qual_name())))
}

fn to_html<T: Serialize>(node: &T, traversal_scope: TraversalScope) -> String {
    let mut bytes = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    if let Err(e) = serialize(&mut bytes, node, opts) {
        log::warn!("Failed to serialize HTML fragment: {}", e);
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

enum Step<'a> {
    Visit(&'a Node),
    Close(&'a Element),
}

impl Serialize for Element {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let mut steps = Vec::new();
        match traversal_scope {
            TraversalScope::IncludeNode => open(serializer, self, &mut steps)?,
            TraversalScope::ChildrenOnly(_) => {
                steps.extend(self.children.iter().rev().map(Step::Visit));
            }
        }
        write_steps(serializer, steps)
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match (self, traversal_scope) {
            (Node::Element(element), scope) => element.serialize(serializer, scope),
            (_, TraversalScope::ChildrenOnly(_)) => Ok(()),
            (node, TraversalScope::IncludeNode) => write_steps(serializer, vec![Step::Visit(node)]),
        }
    }
}

/// Depth-first writer driven by an explicit stack.
fn write_steps<S: Serializer>(serializer: &mut S, mut steps: Vec<Step<'_>>) -> io::Result<()> {
    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(Node::Element(element)) => open(serializer, element, &mut steps)?,
            Step::Visit(Node::Text(text)) => serializer.write_text(text)?,
            Step::Visit(Node::Comment(text)) => serializer.write_comment(text)?,
            Step::Close(element) => serializer.end_elem(element.qual_name())?,
        }
    }
    Ok(())
}

fn open<'a, S: Serializer>(
    serializer: &mut S,
    element: &'a Element,
    steps: &mut Vec<Step<'a>>,
) -> io::Result<()> {
    let names: Vec<QualName> = element
        .attrs
        .iter()
        .map(|a| QualName::new(None, ns!(), LocalName::from(a.name.as_str())))
        .collect();
    let attrs = names.iter().zip(element.attrs.iter().map(|a| a.value.as_str()));
    serializer.start_elem(element.qual_name(), attrs)?;

    steps.push(Step::Close(element));
    steps.extend(element.children.iter().rev().map(Step::Visit));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_simple_element() {
        let el = Element::new("p")
            .with_text("Hi ")
            .with_child(Element::new("b").with_text("there"));
        assert_eq!(element_outer_html(&el), "<p>Hi <b>there</b></p>");
    }

    #[test]
    fn test_attributes_escaped() {
        let el = Element::new("a").with_attr("title", "say \"hi\" & go");
        assert_eq!(
            element_outer_html(&el),
            "<a title=\"say &quot;hi&quot; &amp; go\"></a>"
        );
    }

    #[test]
    fn test_text_escaped() {
        let node = Node::Text("1 < 2 & 3 > 2\u{a0}".to_string());
        assert_eq!(outer_html(&node), "1 &lt; 2 &amp; 3 &gt; 2&nbsp;");
    }

    #[test]
    fn test_void_elements() {
        let el = Element::new("p")
            .with_text("a")
            .with_child(Element::new("br"))
            .with_child(Element::new("img").with_attr("src", "x.png"));
        assert_eq!(element_outer_html(&el), "<p>a<br><img src=\"x.png\"></p>");
    }

    #[test]
    fn test_raw_text_not_escaped() {
        let el = Element::new("script").with_text("if (a < b && c) {}");
        assert_eq!(element_outer_html(&el), "<script>if (a < b && c) {}</script>");
        assert_eq!(inner_html(&el), "if (a < b && c) {}");
    }

    #[test]
    fn test_noscript_content_written_verbatim() {
        let doc = Document::parse("<div><noscript><p>fallback text</p></noscript></div>");
        let html = doc.children.iter().find_map(Node::as_element).unwrap();
        let body = html.child_elements().find(|e| e.is("body")).unwrap();
        let div = body.child_elements().next().unwrap();

        assert_eq!(inner_html(div), "<noscript><p>fallback text</p></noscript>");
    }

    #[test]
    fn test_comment_and_inner_html() {
        let el = Element::new("div")
            .with_child(Node::Comment(" note ".to_string()))
            .with_text("x");
        assert_eq!(inner_html(&el), "<!-- note -->x");
    }

    #[test]
    fn test_deeply_nested_markup() {
        let depth = 20_000;
        let mut el = Element::new("b").with_text("x");
        for _ in 0..depth {
            el = Element::new("span").with_child(el);
        }

        let html = element_outer_html(&el);
        assert!(html.starts_with("<span><span>"));
        assert!(html.ends_with("</b></span></span>"));
        assert_eq!(html.matches("<span>").count(), depth);
    }
}
