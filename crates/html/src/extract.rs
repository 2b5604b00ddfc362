//! Classification of a content cell's children into primitive blocks.

use crate::dom::{Element, Node};
use crate::sanitize::sanitize_element;
use crate::serialize::element_outer_html;
use deck_core::{trim_text, PrimitiveBlock};

/// Text-flow tags whose nested images are hoisted into their own blocks.
const FLOW_TAGS: &[&str] = &["h2", "h3", "h4", "p", "ul", "ol"];

/// Turn the direct children of a content container into blocks, in
/// document order.
///
/// Never fails: unknown tags are treated as generic text containers and
/// empty ones are dropped.
pub fn extract_blocks(children: &[Node]) -> Vec<PrimitiveBlock> {
    let mut blocks = Vec::new();

    for node in children {
        match node {
            Node::Element(element) => extract_element(element, &mut blocks),
            Node::Text(raw) => {
                let text = trim_text(raw);
                if !text.is_empty() {
                    // Loose text is embedded as-is, without a wrapper.
                    blocks.push(PrimitiveBlock::text(text, text));
                }
            }
            Node::Comment(_) => {}
        }
    }

    blocks
}

fn extract_element(element: &Element, blocks: &mut Vec<PrimitiveBlock>) {
    let clean = sanitize_element(element);
    let tag = clean.name.to_ascii_lowercase();

    if FLOW_TAGS.contains(&tag.as_str()) {
        let (residual, images) = hoist_images(&clean);
        let count = images.len();
        blocks.extend(images);

        let text = residual.text_content();
        let text = trim_text(&text);
        if !text.is_empty() {
            blocks.push(PrimitiveBlock::text(element_outer_html(&residual), text));
        } else if count > 0 {
            log::debug!("<{}> held only {} image(s), no text kept", tag, count);
        }
    } else if tag == "table" {
        blocks.push(PrimitiveBlock::table(element_outer_html(&clean)));
    } else if tag == "img" {
        blocks.push(image_block(&clean));
    } else {
        let text = clean.text_content();
        let text = trim_text(&text);
        if !text.is_empty() {
            blocks.push(PrimitiveBlock::text(element_outer_html(&clean), text));
        }
    }
}

/// Copy `element` without any `img` at any depth, returning the copy and
/// one image block per removed image, in document order.
pub fn hoist_images(element: &Element) -> (Element, Vec<PrimitiveBlock>) {
    let mut images = Vec::new();
    let residual = element.rebuild_with(element.shallow_copy(), |child| {
        if child.is("img") {
            images.push(image_block(child));
            None
        } else {
            Some(child.shallow_copy())
        }
    });
    (residual, images)
}

fn image_block(img: &Element) -> PrimitiveBlock {
    PrimitiveBlock::image(img.attr("src").unwrap_or(""), img.attr("alt").unwrap_or(""))
}
