//! Core domain types, line estimation, and slide grouping for turning
//! lecture content into a paginated slide deck.

pub mod deck;
pub mod error;
pub mod group;
pub mod lines;
pub mod options;
mod proptests;
pub mod types;

pub use deck::Deck;
pub use error::{Error, Result};
pub use group::{group_into_pages, GroupState, PendingGroup, SlideGrouper};
pub use lines::{estimate_lines, estimate_lines_with, trim_text, CHARS_PER_LINE};
pub use options::{GroupingOptions, MAX_LINES, MIN_LINES};
pub use types::{PageDescriptor, PrimitiveBlock, TextBlock};
