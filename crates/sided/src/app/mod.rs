//! Application state for the TUI

use crate::config::Theme;
use crate::export;
use sided_core::{
    calculate_stats, merge_lines_to_unified, pair_rows, ChangeNavigator, Comparison, DiffLine,
    DiffStats, ExportFormat, LineType, ListFilter, Pager, DEFAULT_CONTEXT,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[cfg(test)]
mod tests;

/// How long a status message stays in the status bar
const STATUS_TTL: Duration = Duration::from_secs(4);

/// View mode for displaying the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Two synchronized panes, old on the left and new on the right
    #[default]
    Split,
    /// Single merged listing grouped by change type
    Merged,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Split => ViewMode::Merged,
            ViewMode::Merged => ViewMode::Split,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

/// Transient message shown in the status bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub shown_at: Instant,
}

/// Export settings carried from config and CLI
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub format: ExportFormat,
    pub context: usize,
    pub directory: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Unified,
            context: DEFAULT_CONTEXT,
            directory: PathBuf::from("."),
        }
    }
}

pub struct App {
    pub comparison: Comparison,
    pub stats: DiffStats,
    pub navigator: ChangeNavigator,
    /// Merged export order, computed once
    merged: Vec<DiffLine>,
    pub view_mode: ViewMode,
    pub hide_unchanged: bool,
    pub line_numbers: bool,
    /// First visible entry (index into the visible rows/lines)
    pub scroll_offset: usize,
    pub horizontal_scroll: usize,
    /// Content rows available in the last render
    pub viewport_height: usize,
    pub pager: Pager,
    pub filter: ListFilter,
    /// Query being typed after `/`
    pub search_input: Option<String>,
    pub show_help: bool,
    pub status: Option<StatusMessage>,
    pub theme: Theme,
    pub export: ExportSettings,
    pub should_quit: bool,
}

impl App {
    pub fn new(comparison: Comparison, view_mode: ViewMode) -> Self {
        let stats = calculate_stats(
            Some(comparison.left_lines.as_slice()),
            Some(comparison.right_lines.as_slice()),
        );
        let navigator = ChangeNavigator::new(&comparison.left_lines);
        let merged = merge_lines_to_unified(&comparison.left_lines, &comparison.right_lines);
        tracing::debug!(
            rows = comparison.row_count(),
            changes = navigator.len(),
            "app initialised"
        );
        Self {
            comparison,
            stats,
            navigator,
            merged,
            view_mode,
            hide_unchanged: false,
            line_numbers: true,
            scroll_offset: 0,
            horizontal_scroll: 0,
            viewport_height: 20,
            pager: Pager::new(20),
            filter: ListFilter::default(),
            search_input: None,
            show_help: false,
            status: None,
            theme: Theme::default(),
            export: ExportSettings::default(),
            should_quit: false,
        }
    }

    // ==================== Visible content ====================

    /// Row indices shown in the split view, after hide-unchanged and search
    pub fn visible_rows(&self) -> Vec<usize> {
        pair_rows(
            &self.comparison.left_lines,
            &self.comparison.right_lines,
            self.hide_unchanged,
        )
        .into_iter()
        .filter(|row| {
            !self.filter.is_active()
                || row.left.is_some_and(|l| self.filter.matches(&l.content))
                || row.right.is_some_and(|r| self.filter.matches(&r.content))
        })
        .map(|row| row.index)
        .collect()
    }

    /// Lines shown in the merged view
    pub fn visible_merged(&self) -> Vec<&DiffLine> {
        self.merged
            .iter()
            .filter(|line| !(self.hide_unchanged && line.kind == LineType::Equal))
            .filter(|line| self.filter.matches(&line.content))
            .collect()
    }

    pub fn visible_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Split => self.visible_rows().len(),
            ViewMode::Merged => self.visible_merged().len(),
        }
    }

    /// Record the viewport size of the current render and keep scroll in range
    pub fn set_viewport(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        self.pager.page_size = self.viewport_height;
        self.clamp_scroll();
    }

    fn max_scroll(&self) -> usize {
        self.visible_len().saturating_sub(self.viewport_height)
    }

    pub fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    // ==================== Scrolling ====================

    pub fn scroll_down(&mut self) {
        if self.scroll_offset < self.max_scroll() {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_left(&mut self) {
        self.horizontal_scroll = self.horizontal_scroll.saturating_sub(4);
    }

    pub fn scroll_right(&mut self) {
        self.horizontal_scroll += 4;
    }

    pub fn goto_top(&mut self) {
        self.scroll_offset = 0;
        self.navigator.first();
    }

    pub fn goto_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
        self.navigator.last();
    }

    /// Current page and total pages of the visible content
    pub fn page_info(&self) -> (usize, usize) {
        let len = self.visible_len();
        let mut pager = self.pager;
        pager.show_index(self.scroll_offset, len);
        (pager.current_page + 1, pager.total_pages(len))
    }

    pub fn page_down(&mut self) {
        let len = self.visible_len();
        self.pager.show_index(self.scroll_offset, len);
        self.pager.next_page(len);
        self.scroll_offset = self.pager.page_range(len).start;
        self.clamp_scroll();
    }

    pub fn page_up(&mut self) {
        let len = self.visible_len();
        self.pager.show_index(self.scroll_offset, len);
        // mid-page snaps to the page start first
        if self.scroll_offset == self.pager.page_range(len).start {
            self.pager.prev_page();
        }
        self.scroll_offset = self.pager.page_range(len).start;
    }

    // ==================== Change navigation ====================

    pub fn next_change(&mut self) {
        if self.navigator.next() {
            self.scroll_to_current_change();
        } else if self.navigator.is_empty() {
            self.set_status(StatusKind::Info, "No differences");
        }
    }

    pub fn prev_change(&mut self) {
        if self.navigator.prev() {
            self.scroll_to_current_change();
        } else if self.navigator.is_empty() {
            self.set_status(StatusKind::Info, "No differences");
        }
    }

    /// Bring the current change into view, a third of the way down the viewport
    pub fn scroll_to_current_change(&mut self) {
        if self.view_mode != ViewMode::Split {
            return;
        }
        let Some(row) = self.navigator.current_row() else {
            return;
        };
        let rows = self.visible_rows();
        let pos = rows.partition_point(|&r| r < row);
        if pos >= rows.len() {
            return;
        }
        self.scroll_offset = pos.saturating_sub(self.viewport_height / 3);
        self.clamp_scroll();
    }

    /// Row index the change marker points at, if visible
    pub fn current_change_row(&self) -> Option<usize> {
        self.navigator.current_row()
    }

    // ==================== Toggles ====================

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggle();
        self.scroll_offset = 0;
        self.horizontal_scroll = 0;
        if self.view_mode == ViewMode::Split {
            self.scroll_to_current_change();
        }
    }

    pub fn toggle_hide_unchanged(&mut self) {
        self.hide_unchanged = !self.hide_unchanged;
        self.scroll_offset = 0;
        self.scroll_to_current_change();
        self.clamp_scroll();
    }

    pub fn toggle_line_numbers(&mut self) {
        self.line_numbers = !self.line_numbers;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // ==================== Search ====================

    pub fn search_active(&self) -> bool {
        self.search_input.is_some()
    }

    pub fn start_search(&mut self) {
        self.search_input = Some(self.filter.query().to_string());
    }

    pub fn push_search_char(&mut self, c: char) {
        if let Some(input) = self.search_input.as_mut() {
            input.push(c);
        }
    }

    pub fn pop_search_char(&mut self) {
        if let Some(input) = self.search_input.as_mut() {
            input.pop();
        }
    }

    /// Apply the typed query as the row filter
    pub fn commit_search(&mut self) {
        if let Some(query) = self.search_input.take() {
            self.filter.set_query(&query);
            self.scroll_offset = 0;
            if self.filter.is_active() {
                let hits = self.visible_len();
                let kind = if hits == 0 {
                    StatusKind::Error
                } else {
                    StatusKind::Info
                };
                self.set_status(kind, format!("{} matching lines", hits));
            }
        }
    }

    /// Abort typing and clear any active filter
    pub fn cancel_search(&mut self) {
        self.search_input = None;
        self.filter.reset();
        self.scroll_offset = 0;
        self.scroll_to_current_change();
    }

    // ==================== Export / status ====================

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn export(&mut self) {
        match export::export_to_dir(
            &self.comparison,
            self.export.format,
            self.export.context,
            &self.export.directory,
        ) {
            Ok(path) => {
                self.set_status(StatusKind::Success, format!("Exported to {}", path.display()))
            }
            Err(err) => {
                tracing::error!(error = %err, "export failed");
                self.set_status(StatusKind::Error, format!("Export failed: {:#}", err));
            }
        }
    }

    /// Expire stale status messages
    pub fn tick(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|s| s.shown_at.elapsed() >= STATUS_TTL)
        {
            self.status = None;
        }
    }
}
