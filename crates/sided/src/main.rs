//! Sided CLI - side-by-side configuration diff viewer TUI

mod app;
mod config;
mod export;
mod time_format;
mod ui;
mod views;

use anyhow::{Context, Result};
use app::{App, ExportSettings, ViewMode};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use sided_core::git::HistoryEntry;
use sided_core::{list_config_files, Comparison, ExportFormat, Pager};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sided")]
#[command(author, version, about = "A side-by-side configuration diff viewer")]
struct Args {
    /// Files to compare: left_file right_file
    #[arg(num_args = 0..)]
    paths: Vec<PathBuf>,

    /// Load a saved compare payload (JSON with left_lines/right_lines)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["commits", "list"])]
    json: Option<PathBuf>,

    /// Compare one path between two commits: COMMIT1 COMMIT2 PATH
    #[arg(
        long,
        num_args = 3,
        value_names = ["COMMIT1", "COMMIT2", "PATH"],
        conflicts_with_all = ["list", "history"]
    )]
    commits: Option<Vec<String>>,

    /// List the commits that touched PATH, newest first
    #[arg(long, value_name = "PATH", conflicts_with_all = ["json", "list"])]
    history: Option<PathBuf>,

    /// Revision to start the history from (default: HEAD)
    #[arg(long, value_name = "REV", requires = "history")]
    from: Option<String>,

    /// List configuration files under a directory (default: current)
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    list: Option<PathBuf>,

    /// View mode: split or merged
    #[arg(short, long, value_enum)]
    view: Option<CliViewMode>,

    /// Hide rows that are equal on both sides
    #[arg(long)]
    hide_unchanged: bool,

    /// Print change statistics and exit
    #[arg(long)]
    stats: bool,

    /// Write an export to FILE ('-' for stdout, '.gz' to compress) and exit
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Export format
    #[arg(long, value_enum)]
    format: Option<CliExportFormat>,

    /// Context lines for unified exports
    #[arg(long, value_name = "N")]
    context: Option<usize>,

    /// Print the compare payload as JSON and exit
    #[arg(long)]
    emit_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliViewMode {
    /// Two synchronized panes
    #[value(alias = "sbs")]
    Split,
    /// One listing grouped by change type
    #[value(alias = "unified")]
    Merged,
}

impl From<CliViewMode> for ViewMode {
    fn from(mode: CliViewMode) -> Self {
        match mode {
            CliViewMode::Split => ViewMode::Split,
            CliViewMode::Merged => ViewMode::Merged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliExportFormat {
    Unified,
    Merged,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(format: CliExportFormat) -> Self {
        match format {
            CliExportFormat::Unified => ExportFormat::Unified,
            CliExportFormat::Merged => ExportFormat::Merged,
        }
    }
}

/// Represents input mode detected from arguments
enum InputMode {
    TwoFiles { left: PathBuf, right: PathBuf },
    Json(PathBuf),
    Commits { commit1: String, commit2: String, path: PathBuf },
    List(PathBuf),
    History(PathBuf),
    None,
}

fn detect_input_mode(args: &Args) -> InputMode {
    if let Some(dir) = &args.list {
        InputMode::List(dir.clone())
    } else if let Some(path) = &args.history {
        InputMode::History(path.clone())
    } else if let Some(json) = &args.json {
        InputMode::Json(json.clone())
    } else if let Some([commit1, commit2, path]) = args.commits.as_deref() {
        InputMode::Commits {
            commit1: commit1.clone(),
            commit2: commit2.clone(),
            path: PathBuf::from(path),
        }
    } else if args.paths.len() == 2 {
        InputMode::TwoFiles {
            left: args.paths[0].clone(),
            right: args.paths[1].clone(),
        }
    } else {
        InputMode::None
    }
}

const USAGE: &str = "Usage: sided <left_file> <right_file>\n\
                     \n\
                     Or: sided --json <payload.json>\n\
                     Or: sided --commits <commit1> <commit2> <path>\n\
                     Or: sided --list [dir]\n\
                     Or: sided --history <path> [--from <rev>]";

/// Logs go to the file named by `SIDED_LOG`; the TUI owns the terminal
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("SIDED_LOG") else {
        return Ok(());
    };
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to open log file: {}", Path::new(&path).display()))?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn print_listing(dir: &Path, config: &config::Config) -> Result<()> {
    let files = list_config_files(dir, config.files.extensions.as_slice())
        .with_context(|| format!("Failed to list files: {}", dir.display()))?;
    if files.is_empty() {
        println!("No configuration files found.");
        return Ok(());
    }

    let formatter = time_format::TimeFormatter::default();
    let mut pager = Pager::new(config.files.page_size);
    let total_pages = pager.total_pages(files.len());
    loop {
        if total_pages > 1 {
            println!("# page {}/{}", pager.current_page + 1, total_pages);
        }
        for file in &files[pager.page_range(files.len())] {
            println!(
                "{:<48} {:>10}  {}",
                file.path.display(),
                time_format::format_size(file.size),
                formatter.format(file.modified)
            );
        }
        if !pager.next_page(files.len()) {
            break;
        }
    }
    Ok(())
}

/// Repository root plus `path` rewritten relative to it
fn locate_in_repo(cwd: &Path, path: &Path) -> Result<(PathBuf, PathBuf)> {
    if !sided_core::git::is_git_repo(cwd) {
        anyhow::bail!("Not in a git repository.\n\n{}", USAGE);
    }
    let repo_root =
        sided_core::git::get_repo_root(cwd).context("Failed to get git repository root")?;
    let rel = sided_core::git::repo_relative_path(cwd, path)
        .with_context(|| format!("Cannot resolve {} in the repository", path.display()))?;
    Ok((repo_root, rel))
}

fn history_line(entry: &HistoryEntry, formatter: &time_format::TimeFormatter) -> String {
    format!(
        "{} {}  {}  {:<20}  {}",
        entry.short_id,
        entry.change.code(),
        formatter.format(entry.time),
        entry.author,
        entry.summary
    )
}

fn print_history(cwd: &Path, path: &Path, from: &str) -> Result<()> {
    let (repo_root, rel) = locate_in_repo(cwd, path)?;
    let history = sided_core::git::file_history(&repo_root, from, &rel)
        .with_context(|| format!("Failed to read history of {}", rel.display()))?;
    if history.is_empty() {
        anyhow::bail!("No commits found for file: {}", rel.display());
    }

    let formatter = time_format::TimeFormatter::default();
    for entry in &history {
        println!("{}", history_line(entry, &formatter));
    }
    Ok(())
}

fn load_comparison(mode: InputMode, cwd: &Path) -> Result<Comparison> {
    match mode {
        InputMode::TwoFiles { left, right } => sided_core::compare_files(&left, &right)
            .with_context(|| {
                format!("Failed to compare {} and {}", left.display(), right.display())
            }),
        InputMode::Json(path) => Comparison::load_json(&path)
            .with_context(|| format!("Failed to load: {}", path.display())),
        InputMode::Commits {
            commit1,
            commit2,
            path,
        } => {
            let (repo_root, rel) = locate_in_repo(cwd, &path)?;
            sided_core::git::compare_commits(&repo_root, &commit1, &commit2, &rel)
                .with_context(|| format!("Failed to compare {} between commits", rel.display()))
        }
        InputMode::List(_) | InputMode::History(_) | InputMode::None => {
            anyhow::bail!("{}", USAGE)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;
    let config = config::Config::load();

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let mode = detect_input_mode(&args);
    match &mode {
        InputMode::List(dir) => return print_listing(dir, &config),
        InputMode::History(path) => {
            let from = args.from.as_deref().unwrap_or("HEAD");
            return print_history(&cwd, path, from);
        }
        _ => {}
    }
    let comparison = load_comparison(mode, &cwd)?;

    let format: ExportFormat = args.format.map(Into::into).unwrap_or(config.export.format);
    let context = args.context.unwrap_or(config.export.context);

    // Non-interactive output modes
    if args.stats || args.export.is_some() || args.emit_json {
        if let Some(path) = &args.export {
            export::write_export(path, &export::render(&comparison, format, context))?;
        }
        if args.stats {
            let stats = sided_core::calculate_stats(
                Some(comparison.left_lines.as_slice()),
                Some(comparison.right_lines.as_slice()),
            );
            // With --emit-json the stats replace the payload
            if args.emit_json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "added: {}\nremoved: {}\nmodified: {}\nunchanged: {}",
                    stats.added, stats.removed, stats.modified, stats.unchanged
                );
            }
        } else if args.emit_json {
            println!("{}", comparison.to_json_pretty()?);
        }
        return Ok(());
    }

    // CLI overrides config
    let view_mode = args
        .view
        .map(Into::into)
        .or_else(|| config.parse_view_mode())
        .unwrap_or_default();

    let mut app = App::new(comparison, view_mode);
    app.hide_unchanged = args.hide_unchanged || config.ui.hide_unchanged;
    app.line_numbers = config.ui.line_numbers;
    app.theme = config.ui.colors.resolve();
    app.export = ExportSettings {
        format,
        context,
        directory: config.export.resolved_directory(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_search(),
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if app.search_active() {
        handle_search_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            if app.show_help {
                app.show_help = false;
            } else if key.code == KeyCode::Esc && app.filter.is_active() {
                app.cancel_search();
            } else {
                app.should_quit = true;
            }
        }
        // Change navigation
        KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right => app.next_change(),
        KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left => app.prev_change(),
        // Scrolling
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Char('H') => app.scroll_left(),
        KeyCode::Char('L') => app.scroll_right(),
        KeyCode::Home | KeyCode::Char('g') => app.goto_top(),
        KeyCode::End | KeyCode::Char('G') => app.goto_bottom(),
        // Toggles
        KeyCode::Tab => app.toggle_view_mode(),
        KeyCode::Char('u') => app.toggle_hide_unchanged(),
        KeyCode::Char('#') => app.toggle_line_numbers(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('e') => app.export(),
        _ => {}
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        app.tick();

        if app.should_quit {
            return Ok(());
        }
    }
}
