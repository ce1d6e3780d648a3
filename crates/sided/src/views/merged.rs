//! Merged view: one listing grouped by change type

use super::{clip_columns, line_style, marker_color, pad_columns};
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_merged(frame: &mut Frame, app: &mut App, area: Rect) {
    app.set_viewport(area.height.saturating_sub(2) as usize);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.line_number))
        .title(Span::styled(
            format!(
                " {} → {} ",
                app.comparison.left_file, app.comparison.right_file
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let gutter = if app.line_numbers { 7 } else { 2 };
    let content_width = (inner.width as usize).saturating_sub(gutter);

    let mut out: Vec<Line> = Vec::with_capacity(app.viewport_height);
    for line in app
        .visible_merged()
        .into_iter()
        .skip(app.scroll_offset)
        .take(app.viewport_height)
    {
        let mut spans = vec![Span::styled(
            format!("{} ", line.kind.marker()),
            Style::default()
                .fg(marker_color(line.kind))
                .add_modifier(Modifier::BOLD),
        )];
        if app.line_numbers {
            let number = line
                .line_number
                .map(|n| format!("{:>4} ", n))
                .unwrap_or_else(|| "     ".to_string());
            spans.push(Span::styled(number, Style::default().fg(app.theme.line_number)));
        }
        let clipped = clip_columns(&line.content, app.horizontal_scroll, content_width);
        spans.push(Span::styled(
            pad_columns(clipped, content_width),
            line_style(line.kind, &app.theme),
        ));
        out.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(out), inner);
}
