//! Domain layer: entities and the tree line grammar
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod glyphs;
pub mod ignore;
pub mod layout;

pub use entities::*;
pub use error::DomainError;
pub use glyphs::{CharSet, TreeChars, ASCII_CHARS, UNICODE_CHARS};
pub use ignore::IgnoreSet;
pub use layout::{parse_layout, parse_line};
