//! UI rendering for the TUI

use crate::app::{App, StatusKind, ViewMode};
use crate::views::{render_merged, render_split};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Main drawing function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_content(frame, app, chunks[0]);
    draw_status_bar(frame, app, chunks[1]);

    if app.show_help {
        draw_help_popover(frame);
    }
}

pub fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.view_mode {
        ViewMode::Split => render_split(frame, app, area),
        ViewMode::Merged => render_merged(frame, app, area),
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.view_mode {
        ViewMode::Split => " SPLIT ",
        ViewMode::Merged => " MERGED ",
    };
    let muted = Style::default().fg(Color::DarkGray);

    let mut left = vec![Span::styled(
        mode,
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    left.push(Span::raw(" "));

    if let Some(input) = app.search_input.as_ref() {
        left.push(Span::styled("/", muted));
        left.push(Span::raw(input.clone()));
        left.push(Span::styled("█", muted));
    } else if let Some(status) = app.status.as_ref() {
        let color = match status.kind {
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
            StatusKind::Info => Color::Blue,
        };
        left.push(Span::styled(status.text.clone(), Style::default().fg(color)));
    } else {
        if app.hide_unchanged {
            left.push(Span::styled("changes only ", muted));
        }
        if app.filter.is_active() {
            left.push(Span::styled(format!("/{} ", app.filter.query()), muted));
        }
    }

    let stats = &app.stats;
    let (page, pages) = app.page_info();
    let change_text = match app.navigator.position() {
        Some((current, total)) => format!("change {}/{}", current, total),
        None => "no changes".to_string(),
    };
    let right = vec![
        Span::styled(format!("+{}", stats.added), Style::default().fg(Color::Green)),
        Span::raw(" "),
        Span::styled(format!("-{}", stats.removed), Style::default().fg(Color::Red)),
        Span::raw(" "),
        Span::styled(format!("~{}", stats.modified), Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(format!("={}", stats.unchanged), muted),
        Span::raw("  "),
        Span::styled(change_text, muted),
        Span::raw("  "),
        Span::styled(format!("page {}/{} ", page, pages), muted),
    ];

    let right_width: u16 = right.iter().map(|s| s.width() as u16).sum();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_width)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(left)), chunks[0]);
    frame.render_widget(
        Paragraph::new(Line::from(right)).alignment(Alignment::Right),
        chunks[1],
    );
}

const HELP: &[(&str, &str)] = &[
    ("n / l / →", "next change"),
    ("p / h / ←", "previous change"),
    ("j / k", "scroll down / up"),
    ("PgDn / PgUp", "next / previous page"),
    ("H / L", "scroll left / right"),
    ("g / G", "top / bottom"),
    ("Tab", "toggle split / merged"),
    ("u", "toggle hide unchanged"),
    ("#", "toggle line numbers"),
    ("/", "search (Esc clears)"),
    ("e", "export"),
    ("?", "toggle help"),
    ("q / Esc", "quit"),
];

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_help_popover(frame: &mut Frame) {
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>12}  ", key),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        })
        .collect();

    let area = centered_rect(42, HELP.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Keys ")),
        area,
    );
}
