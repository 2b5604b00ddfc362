//! Greedy packing of primitive blocks into slide pages.
//!
//! Text blocks are packed into groups bounded by the line budget in
//! [`GroupingOptions`]; images and tables always get a page of their own.
//! The pass is a fold over the block sequence: [`SlideGrouper::step`] takes a
//! [`GroupState`] and one block and returns the next state, and
//! [`SlideGrouper::finish`] flushes whatever is still pending.

use crate::lines::estimate_lines_with;
use crate::options::GroupingOptions;
use crate::types::{PageDescriptor, PrimitiveBlock, TextBlock};

/// Text blocks accumulated for the slide currently being filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingGroup {
    /// Blocks in document order.
    pub blocks: Vec<TextBlock>,

    /// Sum of the estimated lines of `blocks`.
    pub lines: usize,
}

impl PendingGroup {
    /// Whether no blocks are pending.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn push(&mut self, block: TextBlock, lines: usize) {
        self.blocks.push(block);
        self.lines += lines;
    }

    /// Take the pending blocks as a page, leaving the group empty.
    ///
    /// Returns `None` when nothing is pending.
    fn take_page(&mut self, title: &str) -> Option<PageDescriptor> {
        let group = std::mem::take(self);
        if group.is_empty() {
            return None;
        }

        let content = group
            .blocks
            .iter()
            .map(|b| b.html.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Some(PageDescriptor::HtmlGroup {
            title: title.to_string(),
            content,
        })
    }
}

/// Accumulator carried through one grouping pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupState {
    /// Title stamped onto every page produced by this pass.
    pub title: String,

    /// The group currently being filled.
    pub pending: PendingGroup,

    /// Pages completed so far.
    pub pages: Vec<PageDescriptor>,
}

impl GroupState {
    /// Start a pass for the unit with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pending: PendingGroup::default(),
            pages: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if let Some(page) = self.pending.take_page(&self.title) {
            self.pages.push(page);
        }
    }
}

/// Packs primitive blocks into pages within a line budget.
#[derive(Debug, Clone, Default)]
pub struct SlideGrouper {
    options: GroupingOptions,
}

impl SlideGrouper {
    /// Create a grouper with the default 7..=15 line budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grouper with custom options.
    pub fn with_options(options: GroupingOptions) -> Self {
        Self { options }
    }

    /// The options this grouper packs with.
    pub fn options(&self) -> &GroupingOptions {
        &self.options
    }

    /// Group a unit's blocks into pages.
    ///
    /// The unit's title page is not included; every returned page carries
    /// `title`.
    pub fn group<I>(&self, title: &str, blocks: I) -> Vec<PageDescriptor>
    where
        I: IntoIterator<Item = PrimitiveBlock>,
    {
        let state = blocks
            .into_iter()
            .fold(GroupState::new(title), |state, block| self.step(state, block));
        self.finish(state)
    }

    /// Advance the pass by one block.
    pub fn step(&self, mut state: GroupState, block: PrimitiveBlock) -> GroupState {
        match block {
            PrimitiveBlock::Text(text) => {
                let lines = estimate_lines_with(&text.text, self.options.chars_per_line);
                self.step_text(&mut state, text, lines);
            }
            PrimitiveBlock::Image { src, alt } => {
                state.flush();
                let title = state.title.clone();
                state.pages.push(PageDescriptor::Image { title, src, alt });
            }
            PrimitiveBlock::Table { html } => {
                state.flush();
                let title = state.title.clone();
                state.pages.push(PageDescriptor::Table {
                    title,
                    content: html,
                });
            }
        }
        state
    }

    fn step_text(&self, state: &mut GroupState, block: TextBlock, lines: usize) {
        let GroupingOptions {
            min_lines,
            max_lines,
            ..
        } = self.options;

        if lines > max_lines {
            // Too large for any slide: never combined, never split.
            log::debug!(
                "Oversized text block ({} lines) in '{}' gets its own page",
                lines,
                state.title
            );
            state.flush();
            state.pages.push(PageDescriptor::HtmlGroup {
                title: state.title.clone(),
                content: block.html,
            });
        } else if state.pending.lines + lines <= max_lines {
            state.pending.push(block, lines);
        } else if state.pending.lines >= min_lines {
            state.flush();
            state.pending.push(block, lines);
        } else {
            // The pending group is under the minimum; overshooting the
            // maximum is preferred to emitting an undersized slide.
            log::debug!(
                "Forced merge in '{}': {} + {} lines exceeds {}",
                state.title,
                state.pending.lines,
                lines,
                max_lines
            );
            state.pending.push(block, lines);
            state.flush();
        }
    }

    /// Flush the trailing group and return all pages of the pass.
    pub fn finish(&self, mut state: GroupState) -> Vec<PageDescriptor> {
        state.flush();
        state.pages
    }
}

/// Group blocks with the default budget.
pub fn group_into_pages(title: &str, blocks: Vec<PrimitiveBlock>) -> Vec<PageDescriptor> {
    SlideGrouper::new().group(title, blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A text block whose estimate is exactly `lines` at 80 chars per line.
    fn text_of_lines(id: &str, lines: usize) -> PrimitiveBlock {
        let text = "x".repeat(lines * 80);
        PrimitiveBlock::text(format!("<p>{}</p>", id), text)
    }

    fn contents(pages: &[PageDescriptor]) -> Vec<String> {
        pages
            .iter()
            .map(|p| match p {
                PageDescriptor::HtmlGroup { content, .. } => content.clone(),
                PageDescriptor::Image { src, .. } => format!("img:{}", src),
                PageDescriptor::Table { content, .. } => format!("table:{}", content),
                PageDescriptor::Title { title } => format!("title:{}", title),
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let pages = group_into_pages("T", Vec::new());
        assert!(pages.is_empty());
    }

    #[test]
    fn test_small_blocks_pack_together() {
        let blocks = vec![text_of_lines("a", 2), text_of_lines("b", 3)];
        let pages = group_into_pages("T", blocks);

        assert_eq!(contents(&pages), vec!["<p>a</p>\n<p>b</p>"]);
    }

    #[test]
    fn test_flush_when_minimum_met() {
        // 3 + 4 = 7 fits; adding 10 would make 17 > 15 and 7 >= 7.
        let blocks = vec![
            text_of_lines("a", 3),
            text_of_lines("b", 4),
            text_of_lines("c", 10),
        ];
        let pages = group_into_pages("T", blocks);

        assert_eq!(contents(&pages), vec!["<p>a</p>\n<p>b</p>", "<p>c</p>"]);
    }

    #[test]
    fn test_exactly_max_fits() {
        let blocks = vec![text_of_lines("a", 8), text_of_lines("b", 7)];
        let pages = group_into_pages("T", blocks);

        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_oversized_block_alone() {
        let blocks = vec![text_of_lines("big", 20)];
        let pages = group_into_pages("T", blocks);

        assert_eq!(contents(&pages), vec!["<p>big</p>"]);
    }

    #[test]
    fn test_oversized_block_flushes_pending_first() {
        let blocks = vec![
            text_of_lines("a", 2),
            text_of_lines("big", 16),
            text_of_lines("b", 2),
        ];
        let pages = group_into_pages("T", blocks);

        assert_eq!(contents(&pages), vec!["<p>a</p>", "<p>big</p>", "<p>b</p>"]);
    }

    #[test]
    fn test_forced_merge_exceeds_max() {
        // Known boundary case: 5 pending lines are under the minimum, so the
        // 12-line block is merged in and the 17-line group is flushed as is.
        let blocks = vec![
            text_of_lines("a", 5),
            text_of_lines("b", 12),
            text_of_lines("c", 1),
        ];
        let grouper = SlideGrouper::new();
        let mut state = GroupState::new("T");
        for block in blocks {
            state = grouper.step(state, block);
        }

        assert_eq!(state.pages.len(), 1);
        assert_eq!(contents(&state.pages), vec!["<p>a</p>\n<p>b</p>"]);
        // The pending group restarted empty before "c".
        assert_eq!(state.pending.lines, 1);

        let pages = grouper.finish(state);
        assert_eq!(contents(&pages), vec!["<p>a</p>\n<p>b</p>", "<p>c</p>"]);
    }

    #[test]
    fn test_image_flushes_undersized_group() {
        let blocks = vec![
            text_of_lines("a", 5),
            PrimitiveBlock::image("pic.png", "Pic"),
            text_of_lines("b", 1),
        ];
        let pages = group_into_pages("T", blocks);

        assert_eq!(contents(&pages), vec!["<p>a</p>", "img:pic.png", "<p>b</p>"]);
        match &pages[1] {
            PageDescriptor::Image { title, src, alt } => {
                assert_eq!(title, "T");
                assert_eq!(src, "pic.png");
                assert_eq!(alt, "Pic");
            }
            other => panic!("expected image page, got {:?}", other),
        }
    }

    #[test]
    fn test_consecutive_tables_and_images_never_merge() {
        let blocks = vec![
            PrimitiveBlock::table("<table>1</table>"),
            PrimitiveBlock::table("<table>2</table>"),
            PrimitiveBlock::image("a.png", ""),
        ];
        let pages = group_into_pages("T", blocks);

        assert_eq!(
            contents(&pages),
            vec!["table:<table>1</table>", "table:<table>2</table>", "img:a.png"]
        );
    }

    #[test]
    fn test_zero_line_text_joins_group() {
        // Whitespace text estimates to zero lines but is still carried along.
        let blocks = vec![
            PrimitiveBlock::text("<p> </p>", " "),
            text_of_lines("a", 1),
        ];
        let pages = group_into_pages("T", blocks);

        assert_eq!(contents(&pages), vec!["<p> </p>\n<p>a</p>"]);
    }

    #[test]
    fn test_step_transitions() {
        let grouper = SlideGrouper::new();
        let state = GroupState::new("T");

        let state = grouper.step(state, text_of_lines("a", 3));
        assert_eq!(state.pending.lines, 3);
        assert!(state.pages.is_empty());

        let state = grouper.step(state, text_of_lines("b", 4));
        assert_eq!(state.pending.lines, 7);
        assert_eq!(state.pending.blocks.len(), 2);

        let state = grouper.step(state, text_of_lines("c", 10));
        assert_eq!(state.pages.len(), 1);
        assert_eq!(state.pending.lines, 10);
        assert_eq!(state.pending.blocks.len(), 1);

        let state = grouper.step(state, PrimitiveBlock::image("x", ""));
        assert!(state.pending.is_empty());
        assert_eq!(state.pending.lines, 0);
        assert_eq!(state.pages.len(), 3);
    }

    #[test]
    fn test_custom_budget() {
        let grouper = SlideGrouper::with_options(
            GroupingOptions::new()
                .with_chars_per_line(10)
                .with_min_lines(1)
                .with_max_lines(2),
        );
        let blocks = vec![
            PrimitiveBlock::text("a", "x".repeat(10)),
            PrimitiveBlock::text("b", "x".repeat(10)),
            PrimitiveBlock::text("c", "x".repeat(10)),
        ];
        let pages = grouper.group("T", blocks);

        assert_eq!(contents(&pages), vec!["a\nb", "c"]);
    }

    #[test]
    fn test_all_pages_carry_title() {
        let blocks = vec![
            text_of_lines("a", 1),
            PrimitiveBlock::table("<table></table>"),
        ];
        let pages = group_into_pages("Lecture 3", blocks);

        assert!(pages.iter().all(|p| p.title() == "Lecture 3"));
    }
}
