//! Recognition of Moodle lecture pages.

use crate::dom::Document;
use crate::selector::Selector;
use std::sync::LazyLock;

/// Marker element present on Moodle lesson pages.
pub const LECTURE_PAGE_SELECTOR: &str = "#page-mod-lesson-edit";

static LECTURE_PAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(LECTURE_PAGE_SELECTOR).unwrap());

/// Whether `document` looks like a Moodle lesson page.
///
/// Pages that fail this check can still be processed; they are just not
/// expected to contain lecture tables.
pub fn is_lecture_page(document: &Document) -> bool {
    LECTURE_PAGE.select_first(&document.children).is_some()
}
