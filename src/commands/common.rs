use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Resolve `path` against the working directory `dir` unless it is absolute.
///
/// `-` is kept as is so it keeps meaning stdin/stdout.
pub fn resolve_in(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || path.as_os_str() == "-" {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

/// Ensure `dir` exists and is a directory.
pub fn require_dir(dir: &Path) -> Result<()> {
    let meta = std::fs::metadata(dir)
        .with_context(|| format!("Could not find directory {}", dir.display()))?;
    if !meta.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }
    Ok(())
}

/// Print one path per line on stdout.
pub fn print_paths<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for path in paths {
        writeln!(out, "{}", path.as_ref().display())?;
    }
    out.flush()?;
    Ok(())
}
