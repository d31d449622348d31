//! Layout file parsing: tree diagram text → ordered layout records
//!
//! Parsing never fails. Lines that do not follow the grammar are kept as
//! depth-0 records named after their raw text.

use tracing::{debug, trace};

use crate::domain::glyphs::{strip_connector, strip_guide};
use crate::domain::{Layout, LayoutRecord};

const SPDX_PREFIX: &str = "SPDX-";

/// Parse a full layout text.
///
/// The first root-like line (ends with `/`, not an SPDX header) starts the layout;
/// anything above it is ignored. The root line itself only names the tree.
pub fn parse_layout(text: &str) -> Layout {
    let lines: Vec<&str> = text.lines().collect();
    let start = find_layout_start(&lines);

    let mut content = lines[start..]
        .iter()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty());

    let root = content.next().map(|l| {
        let (_, name, _) = parse_line(l);
        name
    });
    let records: Vec<LayoutRecord> = content
        .map(|l| {
            let (indent_level, name, is_directory) = parse_line(l);
            LayoutRecord::new(indent_level, name, is_directory)
        })
        .collect();

    debug!(
        "parse_layout: root={:?}, {} records (skipped {} leading lines)",
        root,
        records.len(),
        start
    );
    Layout { root, records }
}

/// Index of the root line, or 0 when no line looks like one.
fn find_layout_start(lines: &[&str]) -> usize {
    lines
        .iter()
        .position(|raw| {
            let txt = raw.trim();
            txt.ends_with('/') && !is_spdx_header(txt)
        })
        .unwrap_or(0)
}

/// `SPDX-Key: value` lines. A bare `SPDX-name/` is a directory named like that.
fn is_spdx_header(txt: &str) -> bool {
    txt.starts_with(SPDX_PREFIX) && txt.contains(':')
}

/// Decode one line into `(indent_level, name, is_directory)`.
pub fn parse_line(line: &str) -> (usize, String, bool) {
    let mut rest = line;
    let mut indent = 0;
    while let Some(next) = strip_guide(rest) {
        rest = next;
        indent += 1;
    }

    let name = match strip_connector(rest) {
        Some(name) => name,
        None => {
            trace!("parse_line: no connector in {:?}, treating as depth 0", line);
            indent = 0;
            rest
        }
    };

    let name = name.trim_end();
    let is_dir = name.ends_with('/');
    let name = name.trim_end_matches('/');
    (indent, name.to_string(), is_dir)
}
