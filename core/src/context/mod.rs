//! Engine context: the owning hover object, hot reload and configuration
//!
//! ```text
//!   hover dir ──notify──▶ ChangeFlag ──query sees dirty──▶ Notify
//!                                                           │
//!   query_hovers ◀── HoverStore snapshot ◀── reload_now ◀───┘ (spawn_blocking)
//! ```

mod background_tasks;
mod change_flag;
mod config;
mod error;
mod hover_context;
mod watcher;


pub use background_tasks::BackgroundTasks;
pub use change_flag::ChangeFlag;
pub use config::{Color, DEFAULT_HOVER_COLOR, HoverConfig, HoverConfigExt, NameSourceKind, default_hovers_dir};
pub use error::{ConfigError, WatcherError};
pub use hover_context::{HoverContext, LoadState, ReloadSummary};
pub use watcher::DirectoryWatcher;
