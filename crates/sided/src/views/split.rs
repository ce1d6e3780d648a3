//! Split view with synchronized panes

use super::{clip_columns, line_style, marker_color, pad_columns};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sided_core::{DiffLine, LineType};

/// Width of the line number gutter: marker, 4 digits, space
const GUTTER_WIDTH: usize = 6;

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Render the split view
pub fn render_split(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Both panes share one scroll position
    app.set_viewport(area.height.saturating_sub(2) as usize);

    render_pane(frame, app, chunks[0], Side::Left);
    render_pane(frame, app, chunks[1], Side::Right);
}

fn render_pane(frame: &mut Frame, app: &App, area: Rect, side: Side) {
    let (title, lines) = match side {
        Side::Left => (&app.comparison.left_file, &app.comparison.left_lines),
        Side::Right => (&app.comparison.right_file, &app.comparison.right_lines),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.line_number))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let gutter = if app.line_numbers { GUTTER_WIDTH } else { 1 };
    let content_width = (inner.width as usize).saturating_sub(gutter);
    let current = app.current_change_row();

    let rows = app.visible_rows();
    let mut out: Vec<Line> = Vec::with_capacity(app.viewport_height);
    for &row in rows.iter().skip(app.scroll_offset).take(app.viewport_height) {
        let is_current = current == Some(row);
        out.push(render_row(app, lines.get(row), is_current, gutter, content_width));
    }

    frame.render_widget(Paragraph::new(out), inner);
}

fn render_row(
    app: &App,
    line: Option<&DiffLine>,
    is_current: bool,
    gutter: usize,
    content_width: usize,
) -> Line<'static> {
    let kind = line.map_or(LineType::Empty, |l| l.kind);
    let style = line_style(kind, &app.theme);

    let mut spans = Vec::with_capacity(3);
    let marker = if is_current { "▶" } else { " " };
    spans.push(Span::styled(
        marker,
        Style::default()
            .fg(if is_current { app.theme.marker } else { marker_color(kind) })
            .add_modifier(Modifier::BOLD),
    ));
    if gutter > 1 {
        let number = line
            .and_then(|l| l.line_number)
            .map(|n| format!("{:>4} ", n))
            .unwrap_or_else(|| "     ".to_string());
        spans.push(Span::styled(number, Style::default().fg(app.theme.line_number)));
    }

    let text = line.map_or("", |l| l.content.as_str());
    let clipped = clip_columns(text, app.horizontal_scroll, content_width);
    spans.push(Span::styled(pad_columns(clipped, content_width), style));

    Line::from(spans)
}
