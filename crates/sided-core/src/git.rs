//! Git lookups for comparing a file between two commits

use crate::line::Comparison;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepo,
    #[error("Git command failed: {0}")]
    CommandFailed(String),
    #[error("Path is outside the repository: {0}")]
    OutsideRepo(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check if a directory is a git repository
pub fn is_git_repo(path: &Path) -> bool {
    Command::new("git")
        .arg("-C")
        .arg(path)
        .arg("rev-parse")
        .arg("--git-dir")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Get the root of the git repository
pub fn get_repo_root(path: &Path) -> Result<PathBuf, GitError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(path)
        .arg("rev-parse")
        .arg("--show-toplevel")
        .output()?;

    if !output.status.success() {
        return Err(GitError::NotARepo);
    }

    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(PathBuf::from(root))
}

fn show_prefix(dir: &Path) -> Result<PathBuf, GitError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .arg("rev-parse")
        .arg("--show-prefix")
        .output()?;

    if !output.status.success() {
        return Err(GitError::NotARepo);
    }

    Ok(PathBuf::from(String::from_utf8_lossy(&output.stdout).trim()))
}

/// Drop `.` and fold `..` without touching the filesystem. `None` if the
/// path climbs above its start.
fn normalize_lexically(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

/// Turn a path given relative to `dir` (or absolute) into the
/// repository-relative form git uses in `commit:path` lookups.
pub fn repo_relative_path(dir: &Path, file: &Path) -> Result<PathBuf, GitError> {
    if file.is_absolute() {
        let root = get_repo_root(dir)?;
        let canonical_root = root.canonicalize().unwrap_or_else(|_| root.clone());
        let canonical_file = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
        return file
            .strip_prefix(&root)
            .or_else(|_| canonical_file.strip_prefix(&canonical_root))
            .ok()
            .and_then(normalize_lexically)
            .ok_or_else(|| GitError::OutsideRepo(file.to_path_buf()));
    }

    let joined = show_prefix(dir)?.join(file);
    normalize_lexically(&joined).ok_or_else(|| GitError::OutsideRepo(file.to_path_buf()))
}

/// Resolve a revision (branch, tag, short hash) to a full commit id
pub fn resolve_commit(repo_path: &Path, rev: &str) -> Result<String, GitError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_path)
        .arg("rev-parse")
        .arg("--verify")
        .arg(format!("{}^{{commit}}", rev))
        .output()?;

    if !output.status.success() {
        return Err(GitError::CommandFailed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn exists_at_commit(repo_path: &Path, commit: &str, file: &Path) -> Result<bool, GitError> {
    let status = Command::new("git")
        .arg("-C")
        .arg(repo_path)
        .arg("cat-file")
        .arg("-e")
        .arg(format!("{}:{}", commit, file.display()))
        .output()?
        .status;
    Ok(status.success())
}

/// Get the content of a file at a specific commit.
/// A path absent from the commit's tree reads as empty content.
pub fn get_file_at_commit(repo_path: &Path, commit: &str, file: &Path) -> Result<String, GitError> {
    if !exists_at_commit(repo_path, commit, file)? {
        tracing::warn!(commit, path = %file.display(), "path not in commit, comparing as empty");
        return Ok(String::new());
    }

    let output = Command::new("git")
        .arg("-C")
        .arg(repo_path)
        .arg("show")
        .arg(format!("{}:{}", commit, file.display()))
        .output()?;

    if !output.status.success() {
        return Err(GitError::CommandFailed(
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// How a commit touched a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileChange {
    Added,
    Modified,
    Deleted,
}

impl FileChange {
    fn from_status(status: &str) -> Self {
        match status.chars().next() {
            Some('A') => FileChange::Added,
            Some('D') => FileChange::Deleted,
            _ => FileChange::Modified,
        }
    }

    pub fn code(self) -> char {
        match self {
            FileChange::Added => 'A',
            FileChange::Modified => 'M',
            FileChange::Deleted => 'D',
        }
    }
}

/// A commit in a file's history
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub short_id: String,
    pub author: String,
    pub email: String,
    /// Commit time in unix seconds
    pub time: Option<i64>,
    pub summary: String,
    pub change: FileChange,
}

/// Commits reachable from `from` that touched `file`, newest first
pub fn file_history(
    repo_path: &Path,
    from: &str,
    file: &Path,
) -> Result<Vec<HistoryEntry>, GitError> {
    let format = "%H%x1f%an%x1f%ae%x1f%ct%x1f%s";
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_path)
        .arg("log")
        .arg(format!("--pretty=format:{format}"))
        .arg("--name-status")
        .arg(from)
        .arg("--")
        .arg(file)
        .output()?;

    if !output.status.success() {
        return Err(GitError::CommandFailed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let mut entries: Vec<HistoryEntry> = Vec::new();
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if line.contains('\u{1f}') {
            let parts: Vec<&str> = line.split('\u{1f}').collect();
            if parts.len() < 5 {
                continue;
            }
            entries.push(HistoryEntry {
                id: parts[0].to_string(),
                short_id: short_id(parts[0]).to_string(),
                author: parts[1].to_string(),
                email: parts[2].to_string(),
                time: parts[3].trim().parse::<i64>().ok(),
                summary: parts[4].to_string(),
                change: FileChange::Modified,
            });
            continue;
        }

        // name-status line for the commit above, e.g. "A\tsite/r1.cfg"
        if let (Some(entry), Some((status, _))) = (entries.last_mut(), line.split_once('\t')) {
            entry.change = FileChange::from_status(status);
        }
    }

    tracing::debug!(path = %file.display(), commits = entries.len(), "file history");
    Ok(entries)
}

/// First 8 characters of a commit id
pub fn short_id(commit: &str) -> &str {
    commit.get(..8).unwrap_or(commit)
}

/// Pane title for a file at a commit, e.g. `core/r1.cfg (1a2b3c4d)`
pub fn commit_label(file: &Path, commit: &str) -> String {
    format!("{} ({})", file.display(), short_id(commit))
}

/// Compare one path between two commits of a repository
pub fn compare_commits(
    repo_path: &Path,
    commit1: &str,
    commit2: &str,
    file: &Path,
) -> Result<Comparison, GitError> {
    let from = resolve_commit(repo_path, commit1)?;
    let to = resolve_commit(repo_path, commit2)?;
    let old = get_file_at_commit(repo_path, &from, file)?;
    let new = get_file_at_commit(repo_path, &to, file)?;
    Ok(Comparison::from_texts(
        commit_label(file, &from),
        commit_label(file, &to),
        &old,
        &new,
    ))
}
