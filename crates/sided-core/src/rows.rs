//! Pairing of left/right lines into side-by-side rows

use crate::line::{DiffLine, LineType};

/// Left and right lines sharing one index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPair<'a> {
    /// Index into both line sequences
    pub index: usize,
    pub left: Option<&'a DiffLine>,
    pub right: Option<&'a DiffLine>,
}

impl<'a> RowPair<'a> {
    pub fn left_kind(&self) -> LineType {
        self.left.map_or(LineType::Empty, |l| l.kind)
    }

    pub fn right_kind(&self) -> LineType {
        self.right.map_or(LineType::Empty, |l| l.kind)
    }

    /// False only when both sides exist and are equal
    pub fn is_change(&self) -> bool {
        !(self.left_kind() == LineType::Equal && self.right_kind() == LineType::Equal)
    }
}

/// Zip both sides by index up to the longer one.
///
/// With `hide_unchanged`, rows equal on both sides are dropped; the kept rows
/// keep their original index.
pub fn pair_rows<'a>(
    left: &'a [DiffLine],
    right: &'a [DiffLine],
    hide_unchanged: bool,
) -> Vec<RowPair<'a>> {
    (0..left.len().max(right.len()))
        .map(|index| RowPair {
            index,
            left: left.get(index),
            right: right.get(index),
        })
        .filter(|row| !hide_unchanged || row.is_change())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::compare_texts;

    #[test]
    fn test_pairs_up_to_longer_side() {
        let left = vec![DiffLine::new(LineType::Equal, 1, "a")];
        let right = vec![
            DiffLine::new(LineType::Equal, 1, "a"),
            DiffLine::new(LineType::Insert, 2, "b"),
        ];
        let rows = pair_rows(&left, &right, false);
        assert_eq!(rows.len(), 2);
        assert!(rows[1].left.is_none());
        assert_eq!(rows[1].left_kind(), LineType::Empty);
        assert!(rows[1].is_change());
        assert!(!rows[0].is_change());
    }

    #[test]
    fn test_hide_unchanged_keeps_indices() {
        let (left, right) = compare_texts("a\nb\nc\nd", "a\nB\nc\nd");
        let rows = pair_rows(&left, &right, true);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].right.map(|l| l.content.as_str()), Some("B"));
    }

    #[test]
    fn test_empty_sides() {
        assert!(pair_rows(&[], &[], false).is_empty());
    }
}
