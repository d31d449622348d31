//! Connector and guide glyphs of the tree line grammar
//!
//! A tree line is `prefix + connector + name`, where the prefix is a run of
//! fixed-width continuation blocks (guide or blank), one per depth level.

/// Glyphs used to draw one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeChars {
    /// Continuation below a non-last entry, e.g. `"│   "`
    pub guide: &'static str,
    /// Continuation below a last entry
    pub space: &'static str,
    /// Connector of a non-last entry, e.g. `"├── "`
    pub branch: &'static str,
    /// Connector of the last entry in a sibling group, e.g. `"└── "`
    pub last: &'static str,
}

pub const UNICODE_CHARS: TreeChars = TreeChars {
    guide: "│   ",
    space: "    ",
    branch: "├── ",
    last: "└── ",
};

pub const ASCII_CHARS: TreeChars = TreeChars {
    guide: "|   ",
    space: "    ",
    branch: "|-- ",
    last: "`-- ",
};

/// Built-in glyph sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CharSet {
    #[default]
    Unicode,
    Ascii,
}

impl CharSet {
    pub fn from_ascii_flag(ascii: bool) -> Self {
        if ascii {
            CharSet::Ascii
        } else {
            CharSet::Unicode
        }
    }

    pub fn chars(self) -> &'static TreeChars {
        match self {
            CharSet::Unicode => &UNICODE_CHARS,
            CharSet::Ascii => &ASCII_CHARS,
        }
    }
}

/// Continuation blocks accepted when decoding indentation.
///
/// The last two are spellings left behind by files that went through a lossy
/// re-encoding: U+FFFD replacement, and UTF-8 box drawing read as Windows-1252.
pub const GUIDE_TOKENS: &[&str] = &[
    "│   ",
    "|   ",
    "    ",
    "\u{FFFD}   ",
    "â”‚   ",
];

/// Connectors accepted when decoding a line, stripped before the name.
pub const CONNECTOR_TOKENS: &[&str] = &[
    "├── ",
    "└── ",
    "|-- ",
    "+-- ",
    "`-- ",
    "\\-- ",
    "\u{FFFD}\u{FFFD}\u{FFFD} ",
    "â”œâ”€â”€ ",
    "â””â”€â”€ ",
];

/// Strip one continuation block from the front of `s`.
pub fn strip_guide(s: &str) -> Option<&str> {
    GUIDE_TOKENS.iter().find_map(|token| s.strip_prefix(token))
}

/// Strip one connector from the front of `s`.
pub fn strip_connector(s: &str) -> Option<&str> {
    CONNECTOR_TOKENS.iter().find_map(|token| s.strip_prefix(token))
}
