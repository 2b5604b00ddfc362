//! HTML backend for lecture slide decks.
//!
//! Parses Moodle lecture pages with html5ever, pulls the content of each
//! lecture table apart into primitive blocks, and hands them to the grouper
//! in `deck-core`.

pub mod detect;
pub mod dom;
pub mod driver;
pub mod extract;
pub mod sanitize;
pub mod selector;
pub mod serialize;

pub use detect::is_lecture_page;
pub use dom::{Attribute, Document, Element, Node};
pub use driver::{build_pages, CompiledLayout, DeckBuilder, LectureLayout, DEFAULT_TITLE};
pub use extract::{extract_blocks, hoist_images};
pub use sanitize::{sanitize, sanitize_element};
pub use selector::{Located, Selector};
pub use serialize::{element_outer_html, inner_html, outer_html};
