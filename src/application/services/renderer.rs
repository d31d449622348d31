//! Tree rendering service
//!
//! Walks a directory and turns it into the lines of a tree diagram:
//!
//! ```text
//! proj/
//! ├── src/
//! │   └── main.py
//! └── README.md
//! ```

use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CharSet, DirectoryEntry, IgnoreSet, TreeChars};
use crate::infrastructure::traits::FileSystem;

pub const DEFAULT_MAX_DEPTH: i32 = 99;

/// What to show and how to draw it.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Levels to descend. `1` lists the root's children only; values `<= 0` behave as `1`.
    pub max_depth: i32,
    /// Show files, not only directories
    pub include_files: bool,
    /// Entries whose name matches are left out at every depth
    pub ignore: IgnoreSet,
    pub charset: CharSet,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            include_files: false,
            ignore: IgnoreSet::empty(),
            charset: CharSet::Unicode,
        }
    }
}

/// Service rendering directories as tree diagrams.
pub struct TreeRenderer {
    fs: Arc<dyn FileSystem>,
}

impl TreeRenderer {
    /// Create a new renderer.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Render `root` into tree lines, starting with the synthetic root line.
    pub fn render(&self, root: &Path, options: &RenderOptions) -> ApplicationResult<Vec<String>> {
        debug!(
            "render: root={}, max_depth={}, files={}, ignore={:?}",
            root.display(),
            options.max_depth,
            options.include_files,
            options.ignore.patterns().collect::<Vec<_>>()
        );
        if !self.fs.is_dir(root) {
            return Err(ApplicationError::RootNotADirectory(root.to_path_buf()));
        }

        let root = self
            .fs
            .canonicalize(root)
            .unwrap_or_else(|_| root.to_path_buf());

        let mut lines = vec![format!("{}/", root_name(&root))];
        self.render_children(
            &root,
            options.max_depth,
            options,
            options.charset.chars(),
            "",
            &mut lines,
        );

        debug!("render: {} lines", lines.len());
        Ok(lines)
    }

    fn render_children(
        &self,
        dir: &Path,
        level: i32,
        options: &RenderOptions,
        chars: &TreeChars,
        prefix: &str,
        lines: &mut Vec<String>,
    ) {
        let entries = self.list_entries(dir, options);
        let count = entries.len();

        for (i, entry) in entries.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { chars.last } else { chars.branch };
            lines.push(format!("{}{}{}", prefix, connector, entry.display_name()));

            if entry.is_dir() && level > 1 {
                let extension = if is_last { chars.space } else { chars.guide };
                self.render_children(
                    &dir.join(&entry.name),
                    level - 1,
                    options,
                    chars,
                    &format!("{prefix}{extension}"),
                    lines,
                );
            }
        }
    }

    /// Filtered and sorted children of `dir`. Unreadable directories have none.
    fn list_entries(&self, dir: &Path, options: &RenderOptions) -> Vec<DirectoryEntry> {
        let entries = match self.fs.list_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("list_entries: cannot read {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter(|e| options.include_files || e.is_dir())
            .filter(|e| !options.ignore.is_ignored(&e.name))
            .sorted_by(|a, b| a.tree_order(b))
            .collect()
    }
}

/// Name shown on the root line: the last path component, or the whole path
/// when there is none (e.g. `/`).
fn root_name(root: &Path) -> String {
    match root.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => root.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;

    use super::*;
    use crate::domain::DirectoryEntry;

    /// In-memory tree; directories missing from `listings` are unreadable.
    #[derive(Default)]
    struct FakeFs {
        listings: HashMap<PathBuf, Vec<DirectoryEntry>>,
    }

    impl FakeFs {
        fn with(mut self, dir: &str, entries: Vec<DirectoryEntry>) -> Self {
            self.listings.insert(PathBuf::from(dir), entries);
            self
        }
    }

    impl FileSystem for FakeFs {
        fn read_to_string(&self, _: &Path) -> io::Result<String> {
            unimplemented!()
        }
        fn write(&self, _: &Path, _: &str) -> io::Result<()> {
            unimplemented!()
        }
        fn exists(&self, path: &Path) -> bool {
            self.listings.contains_key(path)
        }
        fn is_dir(&self, path: &Path) -> bool {
            self.listings.contains_key(path)
        }
        fn create_dir_all(&self, _: &Path) -> io::Result<()> {
            unimplemented!()
        }
        fn create_file_if_absent(&self, _: &Path) -> io::Result<bool> {
            unimplemented!()
        }
        fn list_dir(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
            self.listings
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::PermissionDenied))
        }
        fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
            Ok(path.to_path_buf())
        }
        fn ensure_parent(&self, _: &Path) -> io::Result<()> {
            unimplemented!()
        }
    }

    fn render(fs: FakeFs, root: &str, options: &RenderOptions) -> Vec<String> {
        TreeRenderer::new(Arc::new(fs))
            .render(Path::new(root), options)
            .unwrap()
    }

    fn with_files() -> RenderOptions {
        RenderOptions {
            include_files: true,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn given_unreadable_subdirectory_when_rendering_then_renders_it_empty() {
        let fs = FakeFs::default().with(
            "/p",
            vec![DirectoryEntry::dir("locked"), DirectoryEntry::file("a.txt")],
        );
        let lines = render(fs, "/p", &with_files());
        assert_eq!(lines, vec!["p/", "├── locked/", "└── a.txt"]);
    }

    #[test]
    fn given_unsorted_listing_when_rendering_then_dirs_first_case_insensitive() {
        let fs = FakeFs::default()
            .with(
                "/p",
                vec![
                    DirectoryEntry::file("b.md"),
                    DirectoryEntry::dir("Zed"),
                    DirectoryEntry::file("A.md"),
                    DirectoryEntry::dir("alpha"),
                ],
            )
            .with("/p/Zed", vec![])
            .with("/p/alpha", vec![]);
        let lines = render(fs, "/p", &with_files());
        assert_eq!(
            lines,
            vec!["p/", "├── alpha/", "├── Zed/", "├── A.md", "└── b.md"]
        );
    }

    #[test]
    fn given_files_excluded_when_rendering_then_only_directories_remain() {
        let fs = FakeFs::default()
            .with(
                "/p",
                vec![DirectoryEntry::dir("src"), DirectoryEntry::file("Cargo.toml")],
            )
            .with("/p/src", vec![DirectoryEntry::file("lib.rs")]);
        let lines = render(fs, "/p", &RenderOptions::default());
        assert_eq!(lines, vec!["p/", "└── src/"]);
    }

    #[test]
    fn given_nested_non_last_directory_when_rendering_then_guides_continue() {
        let fs = FakeFs::default()
            .with(
                "/p",
                vec![DirectoryEntry::dir("a"), DirectoryEntry::file("z.txt")],
            )
            .with("/p/a", vec![DirectoryEntry::dir("b")])
            .with("/p/a/b", vec![DirectoryEntry::file("c.txt")]);
        let lines = render(fs, "/p", &with_files());
        assert_eq!(
            lines,
            vec![
                "p/",
                "├── a/",
                "│   └── b/",
                "│       └── c.txt",
                "└── z.txt",
            ]
        );
    }

    #[test]
    fn given_root_without_name_when_rendering_then_uses_full_path() {
        let fs = FakeFs::default().with("/", vec![]);
        let lines = render(fs, "/", &RenderOptions::default());
        assert_eq!(lines, vec!["//"]);
    }

    #[test]
    fn given_missing_root_when_rendering_then_returns_error() {
        let renderer = TreeRenderer::new(Arc::new(FakeFs::default()));
        let result = renderer.render(Path::new("/nowhere"), &RenderOptions::default());
        assert!(matches!(result, Err(ApplicationError::RootNotADirectory(_))));
    }
}
