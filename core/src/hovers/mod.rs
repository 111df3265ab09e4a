//! Hover definitions
//!
//! This module provides:
//! - **Definitions**: hover rules parsed from JSON files
//! - **Loader**: directory scanning with per-file error isolation
//! - **Resolver**: target selection (`ids ∪ items ∪ items_regex`) to item ids
//! - **Index**: the id → definitions snapshot and its atomic publication point
//!
//! # Pipeline
//!
//! ```text
//! hover dir ──load──▶ HoverDocument* ──resolve──▶ HoverIndex ──publish──▶ HoverStore
//!                                        ▲
//!                                    NameIndex
//! ```

mod definition;
mod error;
mod index;
mod loader;
mod resolver;

pub use definition::{HOVER_MAP_SENTINEL, HoverDefinition, HoverDocument, LINE_BREAK, TargetSpec};
pub use error::HoverError;
pub use index::{HoverIndex, HoverStore};
pub use loader::{
    HOVER_FILE_EXTENSION, ensure_hover_dir, load_hover_documents, load_hover_file,
    try_load_hover_documents,
};
pub(crate) use loader::is_hover_file;
pub use resolver::resolve_targets;
