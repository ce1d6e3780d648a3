//! Writing exported comparisons to disk or stdout

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use sided_core::{Comparison, ExportFormat};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Render the comparison in the requested format
pub fn render(comparison: &Comparison, format: ExportFormat, context: usize) -> String {
    format.render(
        &comparison.left_file,
        &comparison.right_file,
        &comparison.left_lines,
        &comparison.right_lines,
        context,
    )
}

fn file_stem(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .split(" (")
        .next()
        .unwrap_or(name);
    base.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

/// Default export file name, e.g. `diff_r1.cfg_r2.cfg.patch`
pub fn default_file_name(comparison: &Comparison, format: ExportFormat) -> String {
    let ext = match format {
        ExportFormat::Unified => "patch",
        ExportFormat::Merged => "txt",
    };
    format!(
        "diff_{}_{}.{}",
        file_stem(&comparison.left_file),
        file_stem(&comparison.right_file),
        ext
    )
}

/// Write export text to `path`; `-` writes to stdout and a `.gz` path is compressed
pub fn write_export(path: &Path, text: &str) -> Result<()> {
    if path == Path::new("-") {
        std::io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write export to stdout")?;
        return Ok(());
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create: {}", path.display()))?;

    if path.extension().is_some_and(|e| e == "gz") {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(text.as_bytes())?;
        encoder
            .finish()
            .with_context(|| format!("Failed to compress: {}", path.display()))?;
    } else {
        let mut file = file;
        file.write_all(text.as_bytes())
            .with_context(|| format!("Failed to write: {}", path.display()))?;
    }

    tracing::info!(path = %path.display(), bytes = text.len(), "exported comparison");
    Ok(())
}

/// Export into `directory` under the default name, returning the written path
pub fn export_to_dir(
    comparison: &Comparison,
    format: ExportFormat,
    context: usize,
    directory: &Path,
) -> Result<PathBuf> {
    let path = directory.join(default_file_name(comparison, format));
    write_export(&path, &render(comparison, format, context))?;
    Ok(path)
}
