//! Navigation between changed rows

use crate::line::DiffLine;

/// Cursor over the rows whose left line is not `equal`.
///
/// Movement clamps at both ends; there is no wraparound.
#[derive(Debug, Clone, Default)]
pub struct ChangeNavigator {
    /// Row indices of changed left lines, ascending
    changes: Vec<usize>,
    /// Index into `changes`
    current_diff_index: usize,
}

impl ChangeNavigator {
    pub fn new(left: &[DiffLine]) -> Self {
        let changes = left
            .iter()
            .enumerate()
            .filter(|(_, line)| line.kind.is_change())
            .map(|(idx, _)| idx)
            .collect();
        Self {
            changes,
            current_diff_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn current_diff_index(&self) -> usize {
        self.current_diff_index
    }

    /// Row index of the current change
    pub fn current_row(&self) -> Option<usize> {
        self.changes.get(self.current_diff_index).copied()
    }

    /// 1-based position for display, `None` without changes
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.changes.is_empty() {
            None
        } else {
            Some((self.current_diff_index + 1, self.changes.len()))
        }
    }

    /// Move to the next change. Returns false at the last change.
    pub fn next(&mut self) -> bool {
        if self.current_diff_index + 1 >= self.changes.len() {
            return false;
        }
        self.current_diff_index += 1;
        true
    }

    /// Move to the previous change. Returns false at the first change.
    pub fn prev(&mut self) -> bool {
        if self.current_diff_index == 0 {
            return false;
        }
        self.current_diff_index -= 1;
        true
    }

    pub fn first(&mut self) {
        self.current_diff_index = 0;
    }

    pub fn last(&mut self) {
        self.current_diff_index = self.changes.len().saturating_sub(1);
    }

    /// Jump to the first change at or after `row`, or the last change
    pub fn seek(&mut self, row: usize) {
        let idx = self.changes.partition_point(|&c| c < row);
        self.current_diff_index = idx.min(self.changes.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::compare_texts;

    #[test]
    fn test_navigation_clamps() {
        let (left, _) = compare_texts("a\nb\nc\nd\ne", "a\nB\nc\nd\nE");
        let mut nav = ChangeNavigator::new(&left);
        assert_eq!(nav.len(), 2);
        assert_eq!(nav.current_row(), Some(1));
        assert!(!nav.prev());
        assert_eq!(nav.current_diff_index(), 0);

        assert!(nav.next());
        assert_eq!(nav.current_row(), Some(4));
        assert_eq!(nav.position(), Some((2, 2)));
        assert!(!nav.next());
        assert_eq!(nav.current_diff_index(), 1);

        assert!(nav.prev());
        assert_eq!(nav.current_row(), Some(1));
    }

    #[test]
    fn test_padding_rows_are_changes() {
        let (left, _) = compare_texts("a\nc", "a\nb\nc");
        let nav = ChangeNavigator::new(&left);
        assert_eq!(nav.current_row(), Some(1));
    }

    #[test]
    fn test_no_changes() {
        let (left, _) = compare_texts("a\nb", "a\nb");
        let mut nav = ChangeNavigator::new(&left);
        assert!(nav.is_empty());
        assert_eq!(nav.current_row(), None);
        assert_eq!(nav.position(), None);
        assert!(!nav.next());
        assert!(!nav.prev());
        nav.last();
        assert_eq!(nav.current_diff_index(), 0);
    }

    #[test]
    fn test_seek() {
        let (left, _) = compare_texts("1\n2\n3\n4\n5\n6", "x\n2\n3\ny\n5\nz");
        let mut nav = ChangeNavigator::new(&left);
        nav.seek(2);
        assert_eq!(nav.current_row(), Some(3));
        nav.seek(100);
        assert_eq!(nav.current_row(), Some(5));
        nav.seek(0);
        assert_eq!(nav.current_row(), Some(0));
    }
}
