//! WASM-compatible wrapper for lecture slide deck extraction.
//!
//! This crate exposes page building to JavaScript so the in-page presenter
//! can render slides straight from the lecture HTML.

use deck_core::{GroupingOptions, PageDescriptor};
use deck_html::{is_lecture_page, DeckBuilder, Document};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of building a deck from a lecture page.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    /// Pages in presentation order.
    pub pages: Vec<PageDescriptor>,
    /// Number of lecture units (title pages) found.
    pub lecture_count: usize,
    /// Whether the page carries the Moodle lesson marker.
    pub is_lecture_page: bool,
}

/// Build slide pages from the HTML of a lecture page.
///
/// # Arguments
/// * `html` - The page markup, typically `document.documentElement.outerHTML`
///
/// # Returns
/// A JavaScript object `{ pages, lectureCount, isLecturePage }`.
#[wasm_bindgen]
pub fn build_pages(html: &str) -> Result<JsValue, JsValue> {
    let result =
        build_pages_impl(html, GroupingOptions::default()).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Build slide pages with a custom line budget.
///
/// # Arguments
/// * `html` - The page markup
/// * `min_lines` - Minimum estimated lines per text slide (default: 7)
/// * `max_lines` - Maximum estimated lines per text slide (default: 15)
/// * `chars_per_line` - Characters per slide line (default: 80)
#[wasm_bindgen]
pub fn build_pages_with_options(
    html: &str,
    min_lines: usize,
    max_lines: usize,
    chars_per_line: usize,
) -> Result<JsValue, JsValue> {
    let options = GroupingOptions::new()
        .with_min_lines(min_lines)
        .with_max_lines(max_lines)
        .with_chars_per_line(chars_per_line);
    let result = build_pages_impl(html, options).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Estimate how many slide lines a piece of text occupies.
#[wasm_bindgen]
pub fn estimate_lines(text: &str) -> usize {
    deck_core::estimate_lines(text)
}

fn build_pages_impl(html: &str, options: GroupingOptions) -> Result<BuildResult, String> {
    let builder = DeckBuilder::with_options(options).map_err(|e| e.to_string())?;
    let document = Document::parse(html);
    let pages = builder.build_pages(&document);

    Ok(BuildResult {
        lecture_count: pages.iter().filter(|p| p.is_title()).count(),
        is_lecture_page: is_lecture_page(&document),
        pages,
    })
}
