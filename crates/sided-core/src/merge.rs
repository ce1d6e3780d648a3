//! Merged single-sequence export of a comparison

use crate::line::{DiffLine, LineType};

/// Merge both sides into one export sequence.
///
/// Deletions from the left come first, then insertions and replacements from
/// the right, then the left side's equal lines. Padding is dropped. The order
/// groups lines by change type; it does not reconstruct file order.
pub fn merge_lines_to_unified(left: &[DiffLine], right: &[DiffLine]) -> Vec<DiffLine> {
    let deletions = left.iter().filter(|l| l.kind == LineType::Delete);
    let additions = right
        .iter()
        .filter(|l| matches!(l.kind, LineType::Insert | LineType::Replace));
    let unchanged = left.iter().filter(|l| l.kind == LineType::Equal);

    deletions.chain(additions).chain(unchanged).cloned().collect()
}

/// Render merged lines as text, one marker-prefixed line per entry
pub fn render_merged(lines: &[DiffLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push(line.kind.marker());
        out.push_str(&line.content);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::compare_texts;

    #[test]
    fn test_delete_insert_example() {
        let left = vec![DiffLine::new(LineType::Delete, 1, "A")];
        let right = vec![DiffLine::new(LineType::Insert, 1, "B")];
        let merged = merge_lines_to_unified(&left, &right);
        assert_eq!(merged, vec![left[0].clone(), right[0].clone()]);
        assert_eq!(render_merged(&merged), "-A\n+B\n");
    }

    #[test]
    fn test_ordering_and_conservation() {
        let old = "a\nb\nc\nd\ne";
        let new = "a\nB\nc\ne\nf";
        let (left, right) = compare_texts(old, new);
        let merged = merge_lines_to_unified(&left, &right);

        let expected_len = left.iter().filter(|l| l.kind == LineType::Delete).count()
            + right
                .iter()
                .filter(|l| matches!(l.kind, LineType::Insert | LineType::Replace))
                .count()
            + left.iter().filter(|l| l.kind == LineType::Equal).count();
        assert_eq!(merged.len(), expected_len);

        let rank = |kind: LineType| match kind {
            LineType::Delete => 0,
            LineType::Insert | LineType::Replace => 1,
            LineType::Equal => 2,
            LineType::Empty => 3,
        };
        let ranks: Vec<_> = merged.iter().map(|l| rank(l.kind)).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        assert!(!ranks.contains(&3));
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_lines_to_unified(&[], &[]).is_empty());
        assert_eq!(render_merged(&[]), "");
    }
}
