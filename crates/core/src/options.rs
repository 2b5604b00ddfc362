//! Slide capacity configuration.

use crate::error::{Error, Result};
use crate::lines::CHARS_PER_LINE;
use serde::{Deserialize, Serialize};

/// Smallest estimated line count a text slide should have.
pub const MIN_LINES: usize = 7;

/// Largest estimated line count a text slide should have.
pub const MAX_LINES: usize = 15;

/// Line budget used when packing text blocks into slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingOptions {
    /// Characters assumed to fit on one slide line.
    pub chars_per_line: usize,

    /// Minimum estimated lines before a group may be flushed early.
    pub min_lines: usize,

    /// Maximum estimated lines a group may grow to by normal packing.
    pub max_lines: usize,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            chars_per_line: CHARS_PER_LINE,
            min_lines: MIN_LINES,
            max_lines: MAX_LINES,
        }
    }
}

impl GroupingOptions {
    /// Create options with the default 80/7/15 budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the characters-per-line width.
    pub fn with_chars_per_line(mut self, chars: usize) -> Self {
        self.chars_per_line = chars.max(1);
        self
    }

    /// Set the minimum slide size in lines.
    pub fn with_min_lines(mut self, lines: usize) -> Self {
        self.min_lines = lines;
        self
    }

    /// Set the maximum slide size in lines.
    pub fn with_max_lines(mut self, lines: usize) -> Self {
        self.max_lines = lines;
        self
    }

    /// Check that the budget is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 {
            return Err(Error::InvalidOptions(
                "max_lines must be at least 1".to_string(),
            ));
        }
        if self.min_lines > self.max_lines {
            return Err(Error::InvalidOptions(format!(
                "min_lines ({}) exceeds max_lines ({})",
                self.min_lines, self.max_lines
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GroupingOptions::new();
        assert_eq!(options.chars_per_line, 80);
        assert_eq!(options.min_lines, 7);
        assert_eq!(options.max_lines, 15);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = GroupingOptions::new()
            .with_chars_per_line(0)
            .with_min_lines(2)
            .with_max_lines(4);
        assert_eq!(options.chars_per_line, 1);
        assert_eq!(options.min_lines, 2);
        assert_eq!(options.max_lines, 4);
    }

    #[test]
    fn test_min_above_max_rejected() {
        let options = GroupingOptions::new().with_min_lines(20);
        assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn test_zero_max_rejected() {
        let options = GroupingOptions::new().with_min_lines(0).with_max_lines(0);
        assert!(options.validate().is_err());
    }
}
