//! Navigation over a finished page sequence.

use crate::types::PageDescriptor;
use serde::{Deserialize, Serialize};

/// A page sequence with a cursor, as a presenter walks through it.
///
/// Moving past either end clamps to the first or last page. An empty deck has
/// no current page; callers show a "nothing to display" state instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDeck")]
pub struct Deck {
    pages: Vec<PageDescriptor>,
    current: usize,
}

/// Serialized form of [`Deck`]; the cursor is clamped on the way in.
#[derive(Deserialize)]
struct RawDeck {
    pages: Vec<PageDescriptor>,
    #[serde(default)]
    current: usize,
}

impl From<RawDeck> for Deck {
    fn from(raw: RawDeck) -> Self {
        let current = raw.current.min(raw.pages.len().saturating_sub(1));
        Self {
            pages: raw.pages,
            current,
        }
    }
}

impl Deck {
    /// Create a deck positioned on its first page.
    pub fn new(pages: Vec<PageDescriptor>) -> Self {
        Self { pages, current: 0 }
    }

    /// All pages in order.
    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Zero-based index of the current page.
    pub fn index(&self) -> usize {
        self.current
    }

    /// The page under the cursor.
    pub fn current(&self) -> Option<&PageDescriptor> {
        self.pages.get(self.current)
    }

    /// Advance one page, stopping at the last.
    pub fn next(&mut self) -> Option<&PageDescriptor> {
        if self.current + 1 < self.pages.len() {
            self.current += 1;
        }
        self.current()
    }

    /// Go back one page, stopping at the first.
    pub fn previous(&mut self) -> Option<&PageDescriptor> {
        self.current = self.current.saturating_sub(1);
        self.current()
    }

    /// Jump to `index`, clamped to the valid range.
    pub fn go_to(&mut self, index: usize) -> Option<&PageDescriptor> {
        self.current = index.min(self.pages.len().saturating_sub(1));
        self.current()
    }

    /// Position indicator such as `3/12`, or `None` for an empty deck.
    pub fn indicator(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(format!("{}/{}", self.current + 1, self.pages.len()))
    }

    /// Fraction of the deck reached, in `(0.0, 1.0]`; `0.0` when empty.
    pub fn progress(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (self.current + 1) as f64 / self.pages.len() as f64
    }

    /// Indices of the title pages, i.e. where each lecture unit starts.
    pub fn unit_starts(&self) -> Vec<usize> {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_title())
            .map(|(i, _)| i)
            .collect()
    }

    /// Consume the deck, returning its pages.
    pub fn into_pages(self) -> Vec<PageDescriptor> {
        self.pages
    }
}

impl From<Vec<PageDescriptor>> for Deck {
    fn from(pages: Vec<PageDescriptor>) -> Self {
        Self::new(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Deck {
        Deck::new(vec![
            PageDescriptor::Title {
                title: "One".to_string(),
            },
            PageDescriptor::HtmlGroup {
                title: "One".to_string(),
                content: "<p>a</p>".to_string(),
            },
            PageDescriptor::Title {
                title: "Two".to_string(),
            },
        ])
    }

    #[test]
    fn test_empty_deck() {
        let mut deck = Deck::default();
        assert!(deck.is_empty());
        assert!(deck.current().is_none());
        assert!(deck.next().is_none());
        assert!(deck.previous().is_none());
        assert_eq!(deck.indicator(), None);
        assert_eq!(deck.progress(), 0.0);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut deck = sample();
        assert_eq!(deck.indicator().as_deref(), Some("1/3"));

        deck.previous();
        assert_eq!(deck.index(), 0);

        deck.next();
        deck.next();
        deck.next();
        assert_eq!(deck.index(), 2);
        assert_eq!(deck.indicator().as_deref(), Some("3/3"));
        assert_eq!(deck.progress(), 1.0);
    }

    #[test]
    fn test_go_to() {
        let mut deck = sample();
        let page = deck.go_to(1).cloned();
        assert_eq!(page.map(|p| p.kind()), Some("htmlGroup"));

        deck.go_to(99);
        assert_eq!(deck.index(), 2);
    }

    #[test]
    fn test_deserialized_cursor_clamped() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json["current"] = serde_json::json!(100);

        let deck: Deck = serde_json::from_value(json).unwrap();
        assert_eq!(deck.index(), 2);
        assert_eq!(deck.indicator().as_deref(), Some("3/3"));

        let empty: Deck = serde_json::from_str(r#"{"pages":[],"current":5}"#).unwrap();
        assert_eq!(empty.index(), 0);
        assert!(empty.current().is_none());
    }

    #[test]
    fn test_unit_starts() {
        assert_eq!(sample().unit_starts(), vec![0, 2]);
    }
}
