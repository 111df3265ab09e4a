//! The owning hover engine object
//!
//! `HoverContext` ties the pieces together:
//! - name index, built on first use from the configured [`NameSource`]
//! - the published [`HoverIndex`] snapshot
//! - hot reload: a [`ChangeFlag`] set by the watcher and a background reloader

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use arc_swap::ArcSwap;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use super::{ChangeFlag, DirectoryWatcher, WatcherError};
use crate::catalog::{ItemCatalog, ItemId, ItemInstance};
use crate::hovers::{HoverError, HoverIndex, HoverStore, try_load_hover_documents};
use crate::names::{NameIndex, NameSource};
use crate::template::TemplateEvaluator;

// ═══════════════════════════════════════════════════════════════════════════
// Load State
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LoadState {
    /// Nothing published yet
    Empty = 0,
    /// Current snapshot matches the directory as last read
    Loaded = 1,
    /// Directory changed since the snapshot was built
    Stale = 2,
    /// A rebuild is in progress; queries still see the previous snapshot
    Reloading = 3,
}

impl LoadState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Loaded,
            2 => Self::Stale,
            3 => Self::Reloading,
            _ => Self::Empty,
        }
    }
}

/// What a successful rebuild published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    pub documents: usize,
    pub definitions: usize,
    pub item_ids: usize,
}

// ═══════════════════════════════════════════════════════════════════════════
// Hover Context
// ═══════════════════════════════════════════════════════════════════════════

pub struct HoverContext {
    catalog: Arc<dyn ItemCatalog>,
    name_source: Box<dyn NameSource>,
    names: OnceLock<NameIndex>,
    store: HoverStore,
    evaluator: TemplateEvaluator,
    hovers_dir: ArcSwap<PathBuf>,
    hot_reload: AtomicBool,
    changes: Arc<ChangeFlag>,
    reload_requested: Notify,
    state: AtomicU8,
    /// Serializes rebuilds so an older build never overwrites a newer one
    reload_lock: Mutex<()>,
    watcher: Mutex<Option<DirectoryWatcher>>,
}

impl HoverContext {
    pub fn new(
        catalog: Arc<dyn ItemCatalog>,
        name_source: Box<dyn NameSource>,
        hovers_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog,
            name_source,
            names: OnceLock::new(),
            store: HoverStore::new(),
            evaluator: TemplateEvaluator::default(),
            hovers_dir: ArcSwap::from_pointee(hovers_dir.into()),
            hot_reload: AtomicBool::new(false),
            changes: Arc::new(ChangeFlag::new()),
            reload_requested: Notify::new(),
            state: AtomicU8::new(LoadState::Empty as u8),
            reload_lock: Mutex::new(()),
            watcher: Mutex::new(None),
        }
    }

    pub fn with_evaluator(mut self, evaluator: TemplateEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &dyn ItemCatalog {
        self.catalog.as_ref()
    }

    /// The name index, built from the name source on first call
    pub fn names(&self) -> &NameIndex {
        self.names.get_or_init(|| {
            tracing::debug!(source = self.name_source.label(), "Building name index");
            NameIndex::build(self.name_source.as_ref(), self.catalog.as_ref())
        })
    }

    pub fn snapshot(&self) -> Arc<HoverIndex> {
        self.store.load()
    }

    pub fn state(&self) -> LoadState {
        LoadState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn hovers_dir(&self) -> PathBuf {
        self.hovers_dir.load().as_ref().clone()
    }

    /// External change signal (the directory watcher writes to this)
    pub fn changes(&self) -> &Arc<ChangeFlag> {
        &self.changes
    }

    pub fn is_hot_reload(&self) -> bool {
        self.hot_reload.load(Ordering::Acquire)
    }

    pub fn is_watching(&self) -> bool {
        lock(&self.watcher).is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Render every hover that applies to `item`, in index order.
    ///
    /// Never blocks on a rebuild: with hot reload on and a pending change,
    /// this requests one and answers from the current snapshot.
    pub fn query_hovers(&self, item: &ItemInstance) -> Vec<String> {
        if self.is_hot_reload() && self.changes.is_dirty() {
            self.mark_stale();
            self.request_reload();
        }

        let index = self.store.load();
        index
            .lookup(item.id)
            .iter()
            .flat_map(|def| def.templates.iter())
            .map(|template| self.evaluator.evaluate(template, item))
            .collect()
    }

    /// Resolve a raw id through the catalog, then query
    pub fn query_item(&self, raw_id: ItemId, quantity: i32) -> Vec<String> {
        let item = ItemInstance::resolve(self.catalog.as_ref(), raw_id, quantity);
        self.query_hovers(&item)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reloading
    // ─────────────────────────────────────────────────────────────────────────

    /// Rebuild the index from the hover directory and publish it.
    ///
    /// On failure the previous snapshot stays published.
    pub fn reload_now(&self) -> Result<ReloadSummary, HoverError> {
        let _guard = lock(&self.reload_lock);
        let previous = self.state();
        self.set_state(LoadState::Reloading);

        let dir = self.hovers_dir();
        let documents = match try_load_hover_documents(&dir) {
            Ok(documents) => documents,
            Err(e) => {
                let restored = if previous == LoadState::Empty {
                    LoadState::Empty
                } else {
                    LoadState::Loaded
                };
                self.set_state(restored);
                tracing::warn!(path = %dir.display(), error = %e, "Hover reload failed, keeping previous hovers");
                return Err(e);
            }
        };

        let index = HoverIndex::build(documents, self.names());
        let summary = ReloadSummary {
            documents: index.document_count(),
            definitions: index.definition_count(),
            item_ids: index.len(),
        };
        self.store.publish(index);
        self.set_state(LoadState::Loaded);

        tracing::info!(
            path = %dir.display(),
            documents = summary.documents,
            definitions = summary.definitions,
            items = summary.item_ids,
            "Hovers loaded"
        );
        Ok(summary)
    }

    /// Wake the background reloader. Requests made while one is pending
    /// collapse into a single rebuild.
    pub fn request_reload(&self) {
        self.reload_requested.notify_one();
    }

    /// Start the background reloader task. Must be called inside a tokio runtime.
    pub fn spawn_reloader(self: &Arc<Self>) -> JoinHandle<()> {
        let ctx = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                ctx.reload_requested.notified().await;
                ctx.changes.take();

                let worker = Arc::clone(&ctx);
                match tokio::task::spawn_blocking(move || worker.reload_now()).await {
                    Ok(Ok(summary)) => {
                        tracing::debug!(definitions = summary.definitions, "Background reload finished")
                    }
                    // Already logged by reload_now
                    Ok(Err(_)) => {}
                    Err(e) => tracing::error!(error = %e, "Background reload task failed"),
                }
            }
        })
    }

    /// Enable or disable hot reload, starting or stopping the directory watcher.
    pub fn set_hot_reload(&self, enabled: bool) -> Result<(), WatcherError> {
        let mut watcher = lock(&self.watcher);
        if enabled {
            if watcher.is_none() {
                *watcher = Some(DirectoryWatcher::new(&self.hovers_dir(), Arc::clone(&self.changes))?);
            }
        } else if watcher.take().is_some() {
            tracing::info!("Stopped watching hover directory");
        }
        self.hot_reload.store(enabled, Ordering::Release);
        Ok(())
    }

    /// Point the context at another hover directory.
    ///
    /// Does not reload; a running watcher is moved to the new directory.
    pub fn set_hovers_dir(&self, dir: &Path) -> Result<(), WatcherError> {
        self.hovers_dir.store(Arc::new(dir.to_path_buf()));
        self.changes.mark();

        let mut watcher = lock(&self.watcher);
        if watcher.is_some() {
            *watcher = None;
            *watcher = Some(DirectoryWatcher::new(dir, Arc::clone(&self.changes))?);
        }
        Ok(())
    }

    fn mark_stale(&self) {
        let _ = self.state.compare_exchange(
            LoadState::Loaded as u8,
            LoadState::Stale as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    fn set_state(&self, state: LoadState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// A panic while holding one of these locks leaves no broken invariant behind
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
