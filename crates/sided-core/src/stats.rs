//! Change statistics for a comparison

use crate::line::{DiffLine, LineType};
use serde::Serialize;

/// Line counts shown in the status bar and `--stats` output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    /// Inserted lines on the right side
    pub added: usize,
    /// Deleted lines on the left side
    pub removed: usize,
    /// Replaced lines, counted on the left side
    pub modified: usize,
    /// Equal lines, counted on the left side
    pub unchanged: usize,
}

impl DiffStats {
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.modified
    }
}

fn count(lines: Option<&[DiffLine]>, kind: LineType) -> usize {
    lines
        .unwrap_or_default()
        .iter()
        .filter(|line| line.kind == kind)
        .count()
}

/// Count changes on both sides. A missing side counts as empty.
pub fn calculate_stats(left: Option<&[DiffLine]>, right: Option<&[DiffLine]>) -> DiffStats {
    DiffStats {
        added: count(right, LineType::Insert),
        removed: count(left, LineType::Delete),
        modified: count(left, LineType::Replace),
        unchanged: count(left, LineType::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::compare_texts;

    #[test]
    fn test_missing_sides_are_zero() {
        assert_eq!(calculate_stats(None, None), DiffStats::default());
        assert_eq!(calculate_stats(Some(&[][..]), None), DiffStats::default());
    }

    #[test]
    fn test_delete_insert_example() {
        let left = vec![DiffLine::new(LineType::Delete, 1, "A")];
        let right = vec![DiffLine::new(LineType::Insert, 1, "B")];
        let stats = calculate_stats(Some(left.as_slice()), Some(right.as_slice()));
        assert_eq!(
            stats,
            DiffStats {
                added: 1,
                removed: 1,
                modified: 0,
                unchanged: 0
            }
        );
        assert_eq!(stats.total_changes(), 2);
    }

    #[test]
    fn test_counts_consistent_with_lengths() {
        let old = "interface Gi0/1\n shutdown\n description uplink\nntp server a\nend";
        let new = "interface Gi0/1\n no shutdown\nntp server a\nntp server b\nlogging host c\nend";
        let (left, right) = compare_texts(old, new);
        let stats = calculate_stats(Some(left.as_slice()), Some(right.as_slice()));

        let left_padding = left.iter().filter(|l| l.is_empty_padding()).count();
        assert_eq!(
            stats.removed + stats.modified + stats.unchanged + left_padding,
            left.len()
        );

        let right_padding = right.iter().filter(|l| l.is_empty_padding()).count();
        let right_replace = right.iter().filter(|l| l.kind == LineType::Replace).count();
        let right_equal = right.iter().filter(|l| l.kind == LineType::Equal).count();
        assert_eq!(
            stats.added + right_replace + right_equal + right_padding,
            right.len()
        );
        assert_eq!(right_replace, stats.modified);
        assert_eq!(right_equal, stats.unchanged);
    }

    #[test]
    fn test_only_left_given() {
        let left = vec![
            DiffLine::new(LineType::Equal, 1, "a"),
            DiffLine::new(LineType::Replace, 2, "b"),
        ];
        let stats = calculate_stats(Some(left.as_slice()), None);
        assert_eq!(stats.unchanged, 1);
        assert_eq!(stats.modified, 1);
        assert_eq!(stats.added, 0);
    }
}
