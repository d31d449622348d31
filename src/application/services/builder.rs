//! Structure building service
//!
//! Replays parsed layout records against a target root, creating directories
//! and empty files. The depth of each record selects its parent from a stack
//! of already-built ancestors.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{parse_layout, EntryKind, Layout, LayoutRecord};
use crate::infrastructure::traits::FileSystem;

/// What happened (or would happen) for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Created,
    AlreadyExists,
    /// Dry run: nothing was touched
    Planned,
    /// Rejected name, occupied path, or inside a skipped directory
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildAction {
    pub kind: EntryKind,
    pub path: PathBuf,
    pub outcome: BuildOutcome,
}

impl BuildAction {
    /// Status wording, e.g. `Would create directory` or `Exists file`.
    pub fn label(&self) -> String {
        let kind = match self.kind {
            EntryKind::Directory => "directory",
            EntryKind::File => "file",
        };
        let verb = match self.outcome {
            BuildOutcome::Created => "Created",
            BuildOutcome::AlreadyExists => "Exists",
            BuildOutcome::Planned => "Would create",
            BuildOutcome::Skipped => "Skipped",
        };
        format!("{verb} {kind}")
    }
}

impl fmt::Display for BuildAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.path.display())
    }
}

/// Action log of one build, in record order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub actions: Vec<BuildAction>,
}

impl BuildReport {
    pub fn count(&self, outcome: BuildOutcome) -> usize {
        self.actions.iter().filter(|a| a.outcome == outcome).count()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// One PathStack slot. A skipped directory keeps its slot so that its
/// descendants resolve to it and get skipped too.
#[derive(Debug)]
struct Frame {
    path: PathBuf,
    skipped: bool,
}

/// Service creating directory skeletons from layouts.
pub struct StructureBuilder {
    fs: Arc<dyn FileSystem>,
}

impl StructureBuilder {
    /// Create a new structure builder.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a layout file.
    pub fn load_layout(&self, layout_file: &Path) -> ApplicationResult<Layout> {
        debug!("load_layout: {}", layout_file.display());
        if !self.fs.exists(layout_file) {
            return Err(ApplicationError::LayoutNotFound(layout_file.to_path_buf()));
        }
        let text = self
            .fs
            .read_to_string(layout_file)
            .with_path_context("read layout file", layout_file)?;
        Ok(parse_layout(&text))
    }

    /// Create the structure described by `records` under `root`.
    ///
    /// Existing entries are left untouched, so running twice is harmless.
    /// With `dry_run` nothing is written and every record is reported as planned.
    pub fn build(
        &self,
        records: &[LayoutRecord],
        root: &Path,
        dry_run: bool,
    ) -> ApplicationResult<BuildReport> {
        debug!(
            "build: root={}, {} records, dry_run={}",
            root.display(),
            records.len(),
            dry_run
        );
        let mut report = BuildReport::default();
        if records.is_empty() {
            return Ok(report);
        }

        if !dry_run {
            self.fs
                .create_dir_all(root)
                .with_path_context("create root directory", root)?;
        }

        let mut stack = vec![Frame {
            path: root.to_path_buf(),
            skipped: false,
        }];

        for record in records {
            while stack.len() > record.indent_level + 1 {
                stack.pop();
            }
            // Non-empty: the root frame is never popped
            let Some(parent) = stack.last() else {
                break;
            };
            let path = parent.path.join(&record.name);

            let skip = if parent.skipped {
                true
            } else if !is_plain_name(&record.name) {
                warn!("skipping entry with unusable name: {:?}", record.name);
                true
            } else {
                false
            };

            let outcome = if skip {
                BuildOutcome::Skipped
            } else if dry_run {
                BuildOutcome::Planned
            } else if record.is_directory {
                self.create_dir(&path)?
            } else {
                self.create_file(&path)?
            };
            if record.is_directory {
                stack.push(Frame {
                    path: path.clone(),
                    skipped: outcome == BuildOutcome::Skipped,
                });
            }
            let action = BuildAction {
                kind: record.kind(),
                path,
                outcome,
            };
            debug!("build: {}", action);
            report.actions.push(action);
        }

        Ok(report)
    }

    fn create_dir(&self, path: &Path) -> ApplicationResult<BuildOutcome> {
        if self.fs.is_dir(path) {
            return Ok(BuildOutcome::AlreadyExists);
        }
        if self.fs.exists(path) {
            warn!("not a directory, skipping subtree: {}", path.display());
            return Ok(BuildOutcome::Skipped);
        }
        self.fs
            .create_dir_all(path)
            .with_path_context("create directory", path)?;
        Ok(BuildOutcome::Created)
    }

    fn create_file(&self, path: &Path) -> ApplicationResult<BuildOutcome> {
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        let created = self
            .fs
            .create_file_if_absent(path)
            .with_path_context("create file", path)?;
        Ok(if created {
            BuildOutcome::Created
        } else {
            BuildOutcome::AlreadyExists
        })
    }
}

/// A name usable as a single child of its parent: one normal path component
/// with no separator of the host platform. A backslash is an ordinary character on Unix.
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.chars().any(std::path::is_separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_plain_names_then_accepted() {
        assert!(is_plain_name("src"));
        assert!(is_plain_name("main.rs"));
        assert!(is_plain_name(".gitignore"));
        assert!(is_plain_name("with space"));
    }

    #[test]
    fn given_path_like_names_then_rejected() {
        assert!(!is_plain_name(""));
        assert!(!is_plain_name("."));
        assert!(!is_plain_name(".."));
        assert!(!is_plain_name("a/b"));
        assert!(!is_plain_name("a/"));
        assert!(!is_plain_name("/etc"));
    }

    #[cfg(unix)]
    #[test]
    fn given_backslash_in_name_on_unix_then_accepted() {
        assert!(is_plain_name("a\\b.txt"));
        assert!(is_plain_name("dir\\x"));
    }

    #[cfg(windows)]
    #[test]
    fn given_backslash_in_name_on_windows_then_rejected() {
        assert!(!is_plain_name("a\\b"));
    }

    #[test]
    fn given_actions_when_displaying_then_reads_as_log_line() {
        let action = BuildAction {
            kind: EntryKind::Directory,
            path: PathBuf::from("/t/src"),
            outcome: BuildOutcome::Planned,
        };
        assert_eq!(action.to_string(), "Would create directory: /t/src");

        let action = BuildAction {
            kind: EntryKind::File,
            path: PathBuf::from("/t/a.txt"),
            outcome: BuildOutcome::Created,
        };
        assert_eq!(action.to_string(), "Created file: /t/a.txt");
    }

    #[test]
    fn given_each_outcome_when_labeling_then_verb_and_kind() {
        let label = |kind, outcome| {
            BuildAction {
                kind,
                path: PathBuf::from("x"),
                outcome,
            }
            .label()
        };
        assert_eq!(label(EntryKind::File, BuildOutcome::AlreadyExists), "Exists file");
        assert_eq!(label(EntryKind::Directory, BuildOutcome::Skipped), "Skipped directory");
        assert_eq!(label(EntryKind::Directory, BuildOutcome::Created), "Created directory");
        assert_eq!(label(EntryKind::File, BuildOutcome::Planned), "Would create file");
    }
}
