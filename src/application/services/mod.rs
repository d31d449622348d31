//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `FileSystem` boundary trait
//! but are themselves concrete structs, not traits.

mod builder;
mod renderer;

pub use builder::{BuildAction, BuildOutcome, BuildReport, StructureBuilder};
pub use renderer::{RenderOptions, TreeRenderer, DEFAULT_MAX_DEPTH};
