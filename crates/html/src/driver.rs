//! Document-level driver: lecture tables in, slide pages out.

use crate::dom::Document;
use crate::extract::extract_blocks;
use crate::selector::Selector;
use deck_core::{trim_text, GroupingOptions, PageDescriptor, Result, SlideGrouper};
use serde::{Deserialize, Serialize};

/// Title used when a lecture table has no header cell.
pub const DEFAULT_TITLE: &str = "Без названия";

/// Selectors describing where lectures live in a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureLayout {
    /// Matches each lecture unit, searched across the whole document.
    pub unit: String,

    /// Matches the title cell, searched inside a unit.
    pub header: String,

    /// Matches the content region, searched inside a unit.
    pub content: String,

    /// Title used when the header cell is missing.
    pub placeholder_title: String,
}

impl Default for LectureLayout {
    fn default() -> Self {
        Self {
            unit: ".generaltable".to_string(),
            header: "thead tr th".to_string(),
            content: "tbody tr td .no-overflow".to_string(),
            placeholder_title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl LectureLayout {
    /// The Moodle lecture layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the selectors.
    pub fn compile(&self) -> Result<CompiledLayout> {
        Ok(CompiledLayout {
            unit: Selector::parse(&self.unit)?,
            header: Selector::parse(&self.header)?,
            content: Selector::parse(&self.content)?,
            placeholder_title: self.placeholder_title.clone(),
        })
    }
}

/// A [`LectureLayout`] with its selectors compiled.
#[derive(Debug, Clone)]
pub struct CompiledLayout {
    unit: Selector,
    header: Selector,
    content: Selector,
    placeholder_title: String,
}

/// Builds slide decks from lecture documents.
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    layout: CompiledLayout,
    grouper: SlideGrouper,
}

impl DeckBuilder {
    /// Create a builder for the default layout and line budget.
    pub fn new() -> Self {
        Self::with_config(LectureLayout::default(), GroupingOptions::default())
            .expect("default layout and options are valid")
    }

    /// Create a builder with a custom layout and line budget.
    pub fn with_config(layout: LectureLayout, options: GroupingOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            layout: layout.compile()?,
            grouper: SlideGrouper::with_options(options),
        })
    }

    /// Create a builder for the default layout with a custom line budget.
    pub fn with_options(options: GroupingOptions) -> Result<Self> {
        Self::with_config(LectureLayout::default(), options)
    }

    /// Produce the page sequence for every lecture unit in `document`.
    ///
    /// Each unit contributes a title page followed by its content pages. A
    /// document without lecture units yields no pages.
    pub fn build_pages(&self, document: &Document) -> Vec<PageDescriptor> {
        let units = self.layout.unit.locate_all(&document.children);
        log::debug!("Found {} lecture unit(s)", units.len());

        let mut pages = Vec::new();
        for (idx, unit) in units.iter().enumerate() {
            let title = self
                .layout
                .header
                .select_first_in(unit)
                .map(|th| trim_text(&th.text_content()).to_string())
                .unwrap_or_else(|| self.layout.placeholder_title.clone());

            pages.push(PageDescriptor::Title {
                title: title.clone(),
            });

            let Some(cell) = self.layout.content.select_first_in(unit) else {
                log::warn!("Lecture unit {} ('{}') has no content cell", idx + 1, title);
                continue;
            };

            let blocks = extract_blocks(&cell.children);
            let block_count = blocks.len();
            let unit_pages = self.grouper.group(&title, blocks);
            log::debug!(
                "Unit {} ('{}'): {} block(s) -> {} page(s)",
                idx + 1,
                title,
                block_count,
                unit_pages.len()
            );
            pages.extend(unit_pages);
        }

        pages
    }

    /// Parse `html` and build its pages.
    pub fn build_pages_from_html(&self, html: &str) -> Vec<PageDescriptor> {
        self.build_pages(&Document::parse(html))
    }
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build pages with the default layout and line budget.
pub fn build_pages(document: &Document) -> Vec<PageDescriptor> {
    DeckBuilder::new().build_pages(document)
}
