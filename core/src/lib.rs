pub mod catalog;
pub mod context;
pub mod hovers;
pub mod names;
pub mod template;

// Re-exports for convenience
pub use catalog::{CatalogEntry, ItemCatalog, ItemComposition, ItemId, ItemInstance, StaticCatalog};
pub use context::{
    BackgroundTasks, ChangeFlag, DirectoryWatcher, HoverConfig, HoverConfigExt, HoverContext,
    LoadState, NameSourceKind, ReloadSummary,
};
pub use hovers::{
    HoverDefinition, HoverDocument, HoverError, HoverIndex, HoverStore, TargetSpec,
    ensure_hover_dir, load_hover_documents, resolve_targets,
};
pub use names::{CatalogNames, NameIndex, NameIndexReport, NameSource, SymbolTable};
pub use template::{NumberFormat, TemplateEvaluator};
