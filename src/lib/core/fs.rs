use log::debug;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::error::{OcmsError, Result};

/// Create parent directories for a path when missing.
pub fn make_parent_dirs<P: AsRef<Path>>(path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Detect whether a path uses a gzip-compatible extension.
pub fn is_gzipped<P: AsRef<Path>>(path: P) -> bool {
    matches!(
        path.as_ref().extension().unwrap_or_else(|| OsStr::new("")),
        ext if ext == "gz" || ext == "gzip" || ext == "bgzf"
    )
}

/// Final path component as UTF-8, or an empty string.
pub fn file_name_str(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// List the entries of `dir` whose file names match the glob `pattern`,
/// sorted by path.
pub fn list_matching<P: AsRef<Path>>(dir: P, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = if escaped.is_empty() {
        pattern.to_string()
    } else {
        format!("{}/{}", escaped.trim_end_matches('/'), pattern)
    };

    let mut paths = Vec::new();
    for entry in glob::glob(&full)? {
        paths.push(entry?);
    }
    paths.sort();
    debug!("{} entries match {}", paths.len(), full);
    Ok(paths)
}

/// Absolute form of `path` without resolving symbolic links.
///
/// Relative paths are joined onto the working directory and `.` components
/// are dropped.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}

/// Create a symbolic link at `link` pointing at the absolute path of `target`.
///
/// `target` must exist, but is not resolved: when it is itself a link the new
/// link points at it rather than at its destination. An existing symlink at
/// `link` is replaced only when `force` is set; any other existing entry is
/// never touched.
pub fn symlink_absolute(target: &Path, link: &Path, force: bool) -> Result<()> {
    let absolute = absolute_path(target)?;
    fs::metadata(&absolute)?;

    if let Ok(meta) = fs::symlink_metadata(link) {
        if !force || !meta.file_type().is_symlink() {
            return Err(OcmsError::DestinationExists(link.to_path_buf()));
        }
        fs::remove_file(link)?;
    }

    create_symlink(&absolute, link)?;
    Ok(())
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
