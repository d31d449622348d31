//! skeltree: render directories as tree diagrams and rebuild directory skeletons from them
//!
//! Layers:
//! - `domain`: glyph sets, ignore patterns, layout parsing
//! - `application`: tree rendering and structure building services
//! - `infrastructure`: filesystem abstraction and service wiring
//! - `cli`: argument parsing, command dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
