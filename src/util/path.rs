use std::io;
use std::path::{Path, PathBuf};

/// Make `path` absolute without requiring it to exist.
///
/// Existing paths are canonicalized; others are joined onto the current directory.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(_) => std::path::absolute(path),
    }
}

/// `path` relative to `base` for display, falling back to the full path.
pub fn relative_display(path: &Path, base: &Path) -> String {
    match pathdiff::diff_paths(path, base) {
        Some(rel) if !rel.as_os_str().is_empty() => {
            normalize_path_separator(&rel.to_string_lossy())
        }
        _ => path.display().to_string(),
    }
}

// Helper function for cross-platform path comparison
pub fn normalize_path_separator(s: &str) -> String {
    s.replace('\\', "/")
}
