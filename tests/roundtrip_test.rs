//! Rendering a tree, parsing it back and building it reproduces the structure

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use skeltree::application::services::{RenderOptions, StructureBuilder, TreeRenderer};
use skeltree::domain::{parse_layout, CharSet};
use skeltree::infrastructure::traits::{FileSystem, RealFileSystem};

fn relative_paths(root: &Path) -> Vec<(PathBuf, bool)> {
    let mut paths: Vec<(PathBuf, bool)> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            (
                e.path().strip_prefix(root).unwrap().to_path_buf(),
                e.file_type().is_dir(),
            )
        })
        .collect();
    paths.sort();
    paths
}

fn populate(root: &Path) {
    for dir in ["src/utils", "docs/api/v1", "empty", "tests", "Zed"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    for file in [
        "README.md",
        "Cargo.toml",
        ".gitignore",
        "src/main.rs",
        "src/utils/helper.rs",
        "src/utils/More Spaces.txt",
        "docs/api/v1/index.md",
        "docs/intro.md",
        "tests/a.rs",
        "tests/B.rs",
    ] {
        fs::write(root.join(file), "").unwrap();
    }
    // Backslash is a plain name character on Unix
    #[cfg(unix)]
    {
        fs::create_dir_all(root.join("dir\\x")).unwrap();
        fs::write(root.join("dir\\x").join("inner.txt"), "").unwrap();
        fs::write(root.join("a\\b.txt"), "").unwrap();
    }
}

#[rstest]
#[case::unicode(CharSet::Unicode)]
#[case::ascii(CharSet::Ascii)]
fn given_directory_when_render_parse_build_then_same_relative_paths(#[case] charset: CharSet) {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("source");
    let target = temp.path().join("target");
    populate(&source);

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let options = RenderOptions {
        include_files: true,
        charset,
        ..RenderOptions::default()
    };
    let lines = TreeRenderer::new(fs.clone()).render(&source, &options).unwrap();
    let layout = parse_layout(&lines.join("\n"));
    StructureBuilder::new(fs)
        .build(layout.records(), &target, false)
        .unwrap();

    assert_eq!(layout.root.as_deref(), Some("source"));
    assert_eq!(relative_paths(&target), relative_paths(&source));
}

#[test]
fn given_saved_tree_with_header_when_parsing_then_header_ignored() {
    let text = "SPDX-License-Identifier: MIT\nGenerated listing\n\nproj/\r\n├── src/\r\n│   └── main.py\r\n└── README.md\r\n";

    let layout = parse_layout(text);

    let names: Vec<&str> = layout.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(layout.root.as_deref(), Some("proj"));
    assert_eq!(names, vec!["src", "main.py", "README.md"]);
}
