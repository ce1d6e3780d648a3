//! Unified patch export built from side-by-side rows

use crate::line::{DiffLine, LineType};
use crate::merge::{merge_lines_to_unified, render_merged};
use crate::rows::pair_rows;
use serde::Deserialize;

/// Lines of context around each hunk
pub const DEFAULT_CONTEXT: usize = 3;

/// Text format for exported comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Standard unified patch with hunks
    #[default]
    Unified,
    /// Change-grouped listing (deletions, additions, unchanged)
    Merged,
}

impl ExportFormat {
    pub fn render(
        self,
        left_name: &str,
        right_name: &str,
        left: &[DiffLine],
        right: &[DiffLine],
        context: usize,
    ) -> String {
        match self {
            ExportFormat::Unified => unified_patch(left_name, right_name, left, right, context),
            ExportFormat::Merged => render_merged(&merge_lines_to_unified(left, right)),
        }
    }
}

/// A patch line with the 0-based old/new positions preceding it
#[derive(Debug, Clone)]
struct PatchLine<'a> {
    marker: char,
    text: &'a str,
    /// Lines of the old file consumed before this one
    old_pos: usize,
    /// Lines of the new file consumed before this one
    new_pos: usize,
}

impl PatchLine<'_> {
    fn is_change(&self) -> bool {
        self.marker != ' '
    }
}

fn flush_run<'a>(
    out: &mut Vec<PatchLine<'a>>,
    removed: &mut Vec<&'a str>,
    added: &mut Vec<&'a str>,
    old_pos: &mut usize,
    new_pos: &mut usize,
) {
    for text in removed.drain(..) {
        out.push(PatchLine {
            marker: '-',
            text,
            old_pos: *old_pos,
            new_pos: *new_pos,
        });
        *old_pos += 1;
    }
    for text in added.drain(..) {
        out.push(PatchLine {
            marker: '+',
            text,
            old_pos: *old_pos,
            new_pos: *new_pos,
        });
        *new_pos += 1;
    }
}

/// Flatten rows into patch order: removals of a changed run precede its additions
fn patch_lines<'a>(left: &'a [DiffLine], right: &'a [DiffLine]) -> Vec<PatchLine<'a>> {
    let mut out = Vec::new();
    let mut old_pos = 0;
    let mut new_pos = 0;
    let mut removed: Vec<&'a str> = Vec::new();
    let mut added: Vec<&'a str> = Vec::new();

    for row in pair_rows(left, right, false) {
        if row.left_kind() == LineType::Equal && row.right_kind() == LineType::Equal {
            flush_run(&mut out, &mut removed, &mut added, &mut old_pos, &mut new_pos);
            let text = row.left.map_or("", |l| l.content.as_str());
            out.push(PatchLine {
                marker: ' ',
                text,
                old_pos,
                new_pos,
            });
            old_pos += 1;
            new_pos += 1;
            continue;
        }
        // Unpaired equal lines (uneven payload arrays) count as changes
        if let Some(l) = row.left {
            if matches!(l.kind, LineType::Delete | LineType::Replace | LineType::Equal) {
                removed.push(&l.content);
            }
        }
        if let Some(r) = row.right {
            if matches!(r.kind, LineType::Insert | LineType::Replace | LineType::Equal) {
                added.push(&r.content);
            }
        }
    }
    flush_run(&mut out, &mut removed, &mut added, &mut old_pos, &mut new_pos);
    out
}

fn format_range(start: usize, len: usize) -> String {
    let mut beginning = start + 1;
    match len {
        1 => format!("{}", beginning),
        0 => {
            beginning -= 1;
            format!("{},0", beginning)
        }
        _ => format!("{},{}", beginning, len),
    }
}

/// Group change positions into hunk index ranges over `lines`
fn hunk_ranges(lines: &[PatchLine<'_>], context: usize) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if !line.is_change() {
            continue;
        }
        let start = idx.saturating_sub(context);
        let end = (idx + context + 1).min(lines.len());
        match ranges.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => ranges.push((start, end)),
        }
    }
    ranges
}

/// Render a unified patch of the comparison. Empty when nothing changed.
pub fn unified_patch(
    left_name: &str,
    right_name: &str,
    left: &[DiffLine],
    right: &[DiffLine],
    context: usize,
) -> String {
    let lines = patch_lines(left, right);
    let ranges = hunk_ranges(&lines, context);
    if ranges.is_empty() {
        return String::new();
    }

    let mut out = format!("--- {}\n+++ {}\n", left_name, right_name);
    for (start, end) in ranges {
        let hunk = &lines[start..end];
        let old_len = hunk.iter().filter(|l| l.marker != '+').count();
        let new_len = hunk.iter().filter(|l| l.marker != '-').count();
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            format_range(hunk[0].old_pos, old_len),
            format_range(hunk[0].new_pos, new_len)
        ));
        for line in hunk {
            out.push(line.marker);
            out.push_str(line.text);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::compare_texts;

    fn patch(old: &str, new: &str, context: usize) -> String {
        let (left, right) = compare_texts(old, new);
        unified_patch("a.cfg", "b.cfg", &left, &right, context)
    }

    #[test]
    fn test_no_changes_is_empty() {
        assert_eq!(patch("a\nb\n", "a\nb\n", 3), "");
    }

    #[test]
    fn test_single_replacement() {
        let out = patch("a\nb\nc\n", "a\nB\nc\n", 3);
        assert_eq!(out, "--- a.cfg\n+++ b.cfg\n@@ -1,3 +1,3 @@\n a\n-b\n+B\n c\n");
    }

    #[test]
    fn test_uneven_block_groups_removals_first() {
        let out = patch("x\no1\no2\ny\n", "x\nn1\ny\n", 0);
        assert_eq!(out, "--- a.cfg\n+++ b.cfg\n@@ -2,2 +2 @@\n-o1\n-o2\n+n1\n");
    }

    #[test]
    fn test_insert_into_empty_file() {
        let out = patch("", "a\nb\n", 3);
        assert_eq!(out, "--- a.cfg\n+++ b.cfg\n@@ -0,0 +1,2 @@\n+a\n+b\n");
    }

    #[test]
    fn test_distant_changes_split_hunks() {
        let old = "1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n";
        let new = "one\n2\n3\n4\n5\n6\n7\n8\n9\nten\n";
        let out = patch(old, new, 2);
        assert_eq!(out.matches("@@ -").count(), 2);
        assert!(out.contains("@@ -1,3 +1,3 @@\n-1\n+one\n 2\n 3\n"));
        assert!(out.contains("@@ -8,3 +8,3 @@\n 8\n 9\n-10\n+ten\n"));
    }

    #[test]
    fn test_uneven_arrays_keep_tail_lines() {
        let left = vec![
            DiffLine::new(LineType::Equal, 1, "a"),
            DiffLine::new(LineType::Equal, 2, "b"),
        ];
        let right = vec![DiffLine::new(LineType::Equal, 1, "a")];
        let out = unified_patch("l", "r", &left, &right, 3);
        assert_eq!(out, "--- l\n+++ r\n@@ -1,2 +1 @@\n a\n-b\n");

        let out = unified_patch("l", "r", &right, &left, 3);
        assert_eq!(out, "--- l\n+++ r\n@@ -1 +1,2 @@\n a\n+b\n");
    }

    #[test]
    fn test_merged_format() {
        let (left, right) = compare_texts("a\nb\n", "a\nc\n");
        let out = ExportFormat::Merged.render("l", "r", &left, &right, DEFAULT_CONTEXT);
        assert_eq!(out, "+c\n a\n");
    }
}
