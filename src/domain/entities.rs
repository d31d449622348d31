//! Domain entities: core data structures

use std::cmp::Ordering;

/// Kind of a filesystem entry as far as a tree diagram is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    pub fn from_is_dir(is_dir: bool) -> Self {
        if is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }
}

/// Child of a directory, as seen while rendering.
/// Lives only for the duration of one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Directory)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::File)
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Name as it appears in a tree line: directories carry a trailing `/`.
    pub fn display_name(&self) -> String {
        if self.is_dir() {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Sibling order: directories first, then case-insensitive by name.
    ///
    /// Names that only differ in case fall back to a byte-wise comparison so the
    /// order is total.
    pub fn tree_order(&self, other: &Self) -> Ordering {
        other
            .is_dir()
            .cmp(&self.is_dir())
            .then_with(|| self.name.to_lowercase().cmp(&other.name.to_lowercase()))
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// One decoded line of a layout file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRecord {
    /// Number of continuation blocks before the connector (0 = child of the root)
    pub indent_level: usize,
    /// Entry name with connector and trailing separator removed
    pub name: String,
    pub is_directory: bool,
}

impl LayoutRecord {
    pub fn new(indent_level: usize, name: impl Into<String>, is_directory: bool) -> Self {
        Self {
            indent_level,
            name: name.into(),
            is_directory,
        }
    }

    pub fn kind(&self) -> EntryKind {
        EntryKind::from_is_dir(self.is_directory)
    }
}

/// Parsed layout file: the root line plus the buildable records below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Name on the root line, if the text had one. Informational only:
    /// the build target is always supplied by the caller.
    pub root: Option<String>,
    pub records: Vec<LayoutRecord>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LayoutRecord] {
        &self.records
    }
}
