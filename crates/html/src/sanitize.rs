//! Removal of presentational attributes before content is re-embedded.

use crate::dom::{Element, Node};

/// Attributes dropped from every element.
pub const STRIPPED_ATTRIBUTES: &[&str] = &["style", "class"];

/// Return a copy of `node` with `style` and `class` removed at every depth.
///
/// Text and comment nodes are copied unchanged. The input is not modified.
pub fn sanitize(node: &Node) -> Node {
    match node {
        Node::Element(element) => Node::Element(sanitize_element(element)),
        Node::Text(_) | Node::Comment(_) => node.clone(),
    }
}

/// Element form of [`sanitize`].
pub fn sanitize_element(element: &Element) -> Element {
    element.rebuild_with(strip(element), |child| Some(strip(child)))
}

fn strip(element: &Element) -> Element {
    let mut copy = element.shallow_copy();
    copy.attrs.retain(|a| {
        !STRIPPED_ATTRIBUTES
            .iter()
            .any(|s| a.name.eq_ignore_ascii_case(s))
    });
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::element_outer_html;

    #[test]
    fn test_strips_at_every_depth() {
        let original = Element::new("ul")
            .with_attr("class", "list")
            .with_child(
                Element::new("li")
                    .with_attr("style", "color: red")
                    .with_child(
                        Element::new("a")
                            .with_attr("href", "/x")
                            .with_attr("class", "deep")
                            .with_text("link"),
                    ),
            );

        let clean = sanitize_element(&original);

        assert_eq!(
            element_outer_html(&clean),
            "<ul><li><a href=\"/x\">link</a></li></ul>"
        );
    }

    #[test]
    fn test_input_untouched() {
        let original = Element::new("p").with_attr("style", "x").with_text("t");
        let before = original.clone();

        let _ = sanitize_element(&original);

        assert_eq!(original, before);
    }

    #[test]
    fn test_text_passes_through() {
        let node = Node::Text("  keep me ".to_string());
        assert_eq!(sanitize(&node), node);
    }

    #[test]
    fn test_other_attributes_kept_in_order() {
        let original = Element::new("img")
            .with_attr("src", "a.png")
            .with_attr("CLASS", "img-fluid")
            .with_attr("alt", "A");
        let clean = sanitize_element(&original);

        let names: Vec<&str> = clean.attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["src", "alt"]);
    }

    #[test]
    fn test_deep_tree_sanitized() {
        let depth = 20_000;
        let mut el = Element::new("em").with_attr("class", "x").with_text("deep");
        for _ in 0..depth {
            el = Element::new("span")
                .with_attr("style", "color: red")
                .with_child(el);
        }

        let clean = sanitize_element(&el);

        assert_eq!(clean.text_content(), "deep");
        assert!(!element_outer_html(&clean).contains("style="));
        assert!(!element_outer_html(&clean).contains("class="));
    }
}
