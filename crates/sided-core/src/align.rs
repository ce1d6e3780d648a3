//! Line alignment of two texts into side-by-side diff lines

use crate::line::{Comparison, DiffLine, LineType};
use imara_diff::{Algorithm, Diff, InternedInput};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One run of the line diff, in left/right line index ranges
#[derive(Debug, Clone, PartialEq, Eq)]
enum Opcode {
    Equal { left: usize, right: usize, len: usize },
    Delete { left: usize, len: usize },
    Insert { right: usize, len: usize },
    Replace { left: usize, left_len: usize, right: usize, right_len: usize },
}

/// Rebuild a text so every line carries exactly one `\n`.
///
/// The line tokenizer keeps terminators, so a missing final newline or a
/// `\r\n` ending would otherwise make identical lines compare unequal.
fn normalized(lines: &[&str]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn opcodes(old_lines: &[&str], new_lines: &[&str]) -> Vec<Opcode> {
    let old_text = normalized(old_lines);
    let new_text = normalized(new_lines);
    let input = InternedInput::new(old_text.as_str(), new_text.as_str());
    let diff = Diff::compute(Algorithm::Histogram, &input);

    let mut ops = Vec::new();
    let mut left = 0usize;
    let mut right = 0usize;

    for hunk in diff.hunks() {
        let before_start = hunk.before.start as usize;
        let before_end = hunk.before.end as usize;
        let after_start = hunk.after.start as usize;
        let after_end = hunk.after.end as usize;

        if before_start > left {
            ops.push(Opcode::Equal {
                left,
                right,
                len: before_start - left,
            });
        }

        let left_len = before_end - before_start;
        let right_len = after_end - after_start;
        match (left_len, right_len) {
            (0, 0) => {}
            (len, 0) => ops.push(Opcode::Delete {
                left: before_start,
                len,
            }),
            (0, len) => ops.push(Opcode::Insert {
                right: after_start,
                len,
            }),
            (left_len, right_len) => ops.push(Opcode::Replace {
                left: before_start,
                left_len,
                right: after_start,
                right_len,
            }),
        }

        left = before_end;
        right = after_end;
    }

    if left < old_lines.len() {
        ops.push(Opcode::Equal {
            left,
            right,
            len: old_lines.len() - left,
        });
    }

    ops
}

/// Align two texts into equal-length left/right line sequences.
///
/// Paired lines inside a changed block are `replace` on both sides. Surplus
/// lines of an uneven block become `delete`/`insert` opposite `empty` padding.
pub fn compare_texts(old: &str, new: &str) -> (Vec<DiffLine>, Vec<DiffLine>) {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    let mut left_lines = Vec::with_capacity(old_lines.len());
    let mut right_lines = Vec::with_capacity(new_lines.len());
    let mut left_num = 1;
    let mut right_num = 1;

    for op in opcodes(&old_lines, &new_lines) {
        match op {
            Opcode::Equal { left, right, len } => {
                for k in 0..len {
                    left_lines.push(DiffLine::new(LineType::Equal, left_num, old_lines[left + k]));
                    right_lines.push(DiffLine::new(
                        LineType::Equal,
                        right_num,
                        new_lines[right + k],
                    ));
                    left_num += 1;
                    right_num += 1;
                }
            }
            Opcode::Delete { left, len } => {
                for line in &old_lines[left..left + len] {
                    left_lines.push(DiffLine::new(LineType::Delete, left_num, *line));
                    right_lines.push(DiffLine::empty());
                    left_num += 1;
                }
            }
            Opcode::Insert { right, len } => {
                for line in &new_lines[right..right + len] {
                    left_lines.push(DiffLine::empty());
                    right_lines.push(DiffLine::new(LineType::Insert, right_num, *line));
                    right_num += 1;
                }
            }
            Opcode::Replace {
                left,
                left_len,
                right,
                right_len,
            } => {
                for k in 0..left_len.max(right_len) {
                    if k < left_len {
                        let kind = if k >= right_len {
                            LineType::Delete
                        } else {
                            LineType::Replace
                        };
                        left_lines.push(DiffLine::new(kind, left_num, old_lines[left + k]));
                        left_num += 1;
                    } else {
                        left_lines.push(DiffLine::empty());
                    }

                    if k < right_len {
                        let kind = if k >= left_len {
                            LineType::Insert
                        } else {
                            LineType::Replace
                        };
                        right_lines.push(DiffLine::new(kind, right_num, new_lines[right + k]));
                        right_num += 1;
                    } else {
                        right_lines.push(DiffLine::empty());
                    }
                }
            }
        }
    }

    tracing::debug!(
        old = old_lines.len(),
        new = new_lines.len(),
        rows = left_lines.len(),
        "aligned texts"
    );

    (left_lines, right_lines)
}

fn read_or_empty(path: &Path) -> Result<String, CompareError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "file not found, comparing as empty");
            Ok(String::new())
        }
        Err(source) => Err(CompareError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Read and align two files. A missing file compares as empty content.
pub fn compare_files(left: &Path, right: &Path) -> Result<Comparison, CompareError> {
    let old = read_or_empty(left)?;
    let new = read_or_empty(right)?;
    Ok(Comparison::from_texts(
        left.display().to_string(),
        right.display().to_string(),
        &old,
        &new,
    ))
}
