//! View rendering modules

mod merged;
mod split;


pub use merged::render_merged;
pub use split::render_split;

use crate::config::Theme;
use ratatui::style::{Color, Style};
use sided_core::LineType;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Background style for a line of the given type
pub(crate) fn line_style(kind: LineType, theme: &Theme) -> Style {
    match kind {
        LineType::Equal => Style::default(),
        LineType::Delete => Style::default().bg(theme.delete_bg),
        LineType::Insert => Style::default().bg(theme.insert_bg),
        LineType::Replace => Style::default().bg(theme.replace_bg),
        LineType::Empty => Style::default().bg(theme.empty_bg),
    }
}

pub(crate) fn marker_color(kind: LineType) -> Color {
    match kind {
        LineType::Delete => Color::Red,
        LineType::Insert => Color::Green,
        LineType::Replace => Color::Yellow,
        LineType::Equal | LineType::Empty => Color::DarkGray,
    }
}

/// Cut `text` to the display columns `[skip, skip + width)`.
///
/// Tabs expand to four spaces; a wide grapheme straddling either edge is
/// dropped.
pub(crate) fn clip_columns(text: &str, skip: usize, width: usize) -> String {
    let mut out = String::new();
    let mut col = 0usize;
    for grapheme in text.graphemes(true) {
        let (g, w) = if grapheme == "\t" {
            ("    ", 4)
        } else {
            (grapheme, UnicodeWidthStr::width(grapheme))
        };
        let end = col + w;
        if col >= skip && end <= skip + width {
            out.push_str(g);
        }
        col = end;
        if col >= skip + width {
            break;
        }
    }
    out
}

/// Pad `text` with spaces to `width` display columns
pub(crate) fn pad_columns(mut text: String, width: usize) -> String {
    let used = UnicodeWidthStr::width(text.as_str());
    if used < width {
        text.push_str(&" ".repeat(width - used));
    }
    text
}
