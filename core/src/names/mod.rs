//! Item name index
//!
//! This module provides:
//! - **Sources**: strategies that enumerate `(id, name)` pairs (catalog display
//!   names or a versioned symbol table)
//! - **Index**: the immutable name ↔ id mapping used to resolve `items` and
//!   `items_regex` targets

mod error;
mod index;
mod source;

pub use error::NameError;
pub use index::{DuplicateName, NameIndex, NameIndexReport};
pub use source::{CatalogNames, NameSource, SYMBOL_TABLE_VERSION, SymbolTable, SymbolTableFile};
