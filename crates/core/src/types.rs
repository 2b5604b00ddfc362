//! Domain types for extracted blocks and finished slide pages.

use serde::{Deserialize, Serialize};

/// A run of text-flow markup (heading, paragraph, list, or loose text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Sanitized markup embedded into the slide.
    pub html: String,

    /// Trimmed plain text, used for line estimation.
    pub text: String,
}

impl TextBlock {
    /// Create a new text block.
    pub fn new(html: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            text: text.into(),
        }
    }
}

/// One atomic piece of extracted content, in document order, prior to packing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PrimitiveBlock {
    /// Text-flow content that may share a slide with neighbouring text.
    #[serde(rename = "htmlBlock")]
    Text(TextBlock),

    /// An image reference. Always gets its own slide.
    Image { src: String, alt: String },

    /// A complete table's sanitized markup. Always gets its own slide.
    Table { html: String },
}

impl PrimitiveBlock {
    /// Shorthand for a text block.
    pub fn text(html: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Text(TextBlock::new(html, text))
    }

    /// Shorthand for an image block.
    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self::Image {
            src: src.into(),
            alt: alt.into(),
        }
    }

    /// Shorthand for a table block.
    pub fn table(html: impl Into<String>) -> Self {
        Self::Table { html: html.into() }
    }
}

/// One finished slide, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageDescriptor {
    /// Opening slide of a lecture unit.
    Title { title: String },

    /// One or more packed text blocks, newline-joined.
    HtmlGroup { title: String, content: String },

    /// A single image.
    Image {
        title: String,
        src: String,
        alt: String,
    },

    /// A single table.
    Table { title: String, content: String },
}

impl PageDescriptor {
    /// The title of the lecture unit this page belongs to.
    pub fn title(&self) -> &str {
        match self {
            Self::Title { title }
            | Self::HtmlGroup { title, .. }
            | Self::Image { title, .. }
            | Self::Table { title, .. } => title,
        }
    }

    /// Short name of the page kind, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::HtmlGroup { .. } => "htmlGroup",
            Self::Image { .. } => "image",
            Self::Table { .. } => "table",
        }
    }

    /// Whether this page opens a new lecture unit.
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title { .. })
    }
}
