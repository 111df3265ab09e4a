//! Hover directory watcher
//!
//! Filesystem events never trigger work directly. A relevant event only
//! marks the shared [`ChangeFlag`]; the next query notices it and asks the
//! background reloader for a rebuild.

use std::path::Path;
use std::sync::Arc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::{ChangeFlag, WatcherError};
use crate::hovers::is_hover_file;

pub struct DirectoryWatcher {
    _watcher: RecommendedWatcher,
}

impl DirectoryWatcher {
    pub fn new(path: &Path, changes: Arc<ChangeFlag>) -> Result<Self, WatcherError> {
        let dir = path.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_relevant(&event, &dir) {
                        tracing::trace!(kind = ?event.kind, paths = ?event.paths, "Hover directory changed");
                        changes.mark();
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Hover directory watcher error"),
            },
            Config::default(),
        )
        .map_err(WatcherError::InitWatcher)?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| WatcherError::WatchPath {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(path = %path.display(), "Watching hover directory");

        Ok(Self { _watcher: watcher })
    }
}

/// Creates, writes and removals of `.json` files, or of the directory itself
fn is_relevant(event: &Event, dir: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|p| p.as_path() == dir || is_hover_file(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use std::path::PathBuf;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn json_changes_are_relevant() {
        let dir = Path::new("/hovers");
        assert!(is_relevant(&event(EventKind::Create(CreateKind::File), "/hovers/a.json"), dir));
        assert!(is_relevant(&event(EventKind::Modify(ModifyKind::Any), "/hovers/a.json"), dir));
        assert!(is_relevant(&event(EventKind::Remove(RemoveKind::File), "/hovers/a.json"), dir));
        assert!(is_relevant(&event(EventKind::Remove(RemoveKind::Folder), "/hovers"), dir));
    }

    #[test]
    fn other_changes_are_ignored() {
        let dir = Path::new("/hovers");
        assert!(!is_relevant(&event(EventKind::Create(CreateKind::File), "/hovers/notes.txt"), dir));
        assert!(!is_relevant(&event(EventKind::Access(notify::event::AccessKind::Any), "/hovers/a.json"), dir));
    }
}
