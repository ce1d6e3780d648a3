use super::*;
use sided_core::Comparison;

fn make_app(old: &str, new: &str) -> App {
    let comparison = Comparison::from_texts("old.cfg", "new.cfg", old, new);
    let mut app = App::new(comparison, ViewMode::Split);
    app.set_viewport(4);
    app
}

fn numbered(count: usize) -> String {
    (1..=count).map(|i| format!("line {}\n", i)).collect()
}

#[test]
fn test_stats_computed_on_load() {
    let app = make_app("A\n", "B\nC\n");
    assert_eq!(app.stats.modified, 1);
    assert_eq!(app.stats.added, 1);
    assert_eq!(app.stats.unchanged, 0);
}

#[test]
fn test_hide_unchanged_filters_rows() {
    let mut app = make_app("a\nb\nc\nd\n", "a\nB\nc\nd\n");
    assert_eq!(app.visible_rows(), vec![0, 1, 2, 3]);
    app.toggle_hide_unchanged();
    assert_eq!(app.visible_rows(), vec![1]);
    app.toggle_hide_unchanged();
    assert_eq!(app.visible_rows().len(), 4);
}

#[test]
fn test_next_change_scrolls_into_view() {
    let old = numbered(30);
    let new = old.replace("line 25\n", "line twenty-five\n");
    let mut app = make_app(&old, &new.replace("line 2\n", "line two\n"));
    assert_eq!(app.navigator.current_row(), Some(1));
    assert_eq!(app.scroll_offset, 0);

    app.next_change();
    assert_eq!(app.navigator.current_row(), Some(24));
    let visible = app.scroll_offset..app.scroll_offset + app.viewport_height;
    assert!(visible.contains(&24));

    // Clamped at the last change
    app.next_change();
    assert_eq!(app.navigator.current_row(), Some(24));
    app.prev_change();
    app.prev_change();
    assert_eq!(app.navigator.current_row(), Some(1));
}

#[test]
fn test_no_changes_reports_info() {
    let mut app = make_app("same\n", "same\n");
    app.next_change();
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Info);
    assert_eq!(status.text, "No differences");
}

#[test]
fn test_paging_clamped() {
    let text = numbered(10);
    let mut app = make_app(&text, &text);
    assert_eq!(app.page_info(), (1, 3));

    app.page_down();
    assert_eq!(app.scroll_offset, 4);
    app.page_down();
    // Last page start is clamped by max scroll (10 rows, 4 visible)
    assert_eq!(app.scroll_offset, 6);
    app.page_down();
    assert_eq!(app.scroll_offset, 6);
    assert_eq!(app.page_info().0, 2);

    app.page_up();
    assert_eq!(app.scroll_offset, 4);
    app.page_up();
    assert_eq!(app.scroll_offset, 0);
    app.page_up();
    assert_eq!(app.scroll_offset, 0);
}

#[test]
fn test_scroll_bounds() {
    let text = numbered(6);
    let mut app = make_app(&text, &text);
    for _ in 0..10 {
        app.scroll_down();
    }
    assert_eq!(app.scroll_offset, 2);
    app.goto_top();
    assert_eq!(app.scroll_offset, 0);
    app.scroll_up();
    assert_eq!(app.scroll_offset, 0);
    app.goto_bottom();
    assert_eq!(app.scroll_offset, 2);
}

#[test]
fn test_search_filters_and_resets() {
    let mut app = make_app(
        "interface Gi0/1\n shutdown\nntp server a\n",
        "interface Gi0/1\n no shutdown\nntp server b\n",
    );
    app.start_search();
    for c in "shut".chars() {
        app.push_search_char(c);
    }
    app.pop_search_char();
    app.push_search_char('t');
    assert!(app.search_active());
    app.commit_search();
    assert!(!app.search_active());
    assert_eq!(app.visible_rows(), vec![1]);
    assert_eq!(app.status.as_ref().unwrap().text, "1 matching lines");

    app.cancel_search();
    assert_eq!(app.visible_rows().len(), 3);
}

#[test]
fn test_search_without_hits_is_error() {
    let mut app = make_app("a\n", "b\n");
    app.start_search();
    app.push_search_char('z');
    app.commit_search();
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
    assert!(app.visible_rows().is_empty());
}

#[test]
fn test_merged_view_lines() {
    let mut app = make_app("keep\nold\n", "keep\nnew\nmore\n");
    app.toggle_view_mode();
    assert_eq!(app.view_mode, ViewMode::Merged);
    let contents: Vec<_> = app
        .visible_merged()
        .iter()
        .map(|l| l.content.as_str())
        .collect();
    assert_eq!(contents, vec!["new", "more", "keep"]);

    app.toggle_hide_unchanged();
    assert_eq!(app.visible_merged().len(), 2);
}

#[test]
fn test_export_sets_status() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = make_app("a\n", "b\n");
    app.export.directory = dir.path().to_path_buf();
    app.export();
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert!(dir.path().join("diff_old.cfg_new.cfg.patch").exists());

    app.export.directory = dir.path().join("missing");
    app.export();
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
}

#[test]
fn test_status_expires() {
    let mut app = make_app("a\n", "b\n");
    app.set_status(StatusKind::Info, "hello");
    app.tick();
    assert!(app.status.is_some());
    if let Some(status) = app.status.as_mut() {
        status.shown_at = Instant::now() - STATUS_TTL;
    }
    app.tick();
    assert!(app.status.is_none());
}
