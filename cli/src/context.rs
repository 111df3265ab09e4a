use hovers_core::context::{BackgroundTasks, HoverConfig, HoverConfigExt, HoverContext, NameSourceKind};
use hovers_core::{CatalogNames, NameSource, NumberFormat, StaticCatalog, SymbolTable, TemplateEvaluator};
use hovers_core::hovers::ensure_hover_dir;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Holds all shared state for the CLI application.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<HoverConfig>>,
    pub hovers: Arc<HoverContext>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    /// Load the catalog and name source the config points at.
    pub fn new(config: HoverConfig) -> Result<Self, String> {
        let catalog = match config.catalog_file() {
            Some(path) => StaticCatalog::load(&path).map_err(|e| error_chain(&e))?,
            None => {
                tracing::warn!("No item catalog configured, display names and prices are unavailable");
                StaticCatalog::default()
            }
        };
        let catalog = Arc::new(catalog);

        let name_source: Box<dyn NameSource> = match config.name_source {
            NameSourceKind::DisplayNames => Box::new(CatalogNames::new(catalog.clone())),
            NameSourceKind::SymbolTable => {
                let path = config
                    .symbol_table_file()
                    .ok_or("name_source is symbol_table but symbol_table_path is not set")?;
                Box::new(SymbolTable::load(&path).map_err(|e| error_chain(&e))?)
            }
        };

        let evaluator = TemplateEvaluator::new(NumberFormat::from_system_locale());
        let hovers = HoverContext::new(catalog, name_source, config.hovers_path()).with_evaluator(evaluator);

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            hovers: Arc::new(hovers),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        })
    }

    /// Create the hover directory, load it and start background reloading.
    pub async fn start(&self) {
        let (dir, hot_reload) = {
            let config = self.config.read().await;
            (config.hovers_path(), config.hot_reload)
        };

        if let Err(e) = ensure_hover_dir(&dir) {
            tracing::error!(error = %e, "Could not create hover directory");
        }

        let hovers = Arc::clone(&self.hovers);
        match tokio::task::spawn_blocking(move || hovers.reload_now()).await {
            Ok(Ok(summary)) => println!(
                "Loaded {} hovers from {} files",
                summary.definitions, summary.documents
            ),
            Ok(Err(e)) => println!("No hovers loaded: {e}"),
            Err(e) => tracing::error!(error = %e, "Initial hover load panicked"),
        }

        self.tasks.lock().await.reloader = Some(self.hovers.spawn_reloader());

        if hot_reload {
            if let Err(e) = self.hovers.set_hot_reload(true) {
                tracing::error!(error = %e, "Hot reload unavailable");
            }
        }
    }

    pub async fn shutdown(&self) {
        self.tasks.lock().await.abort_all();
    }
}

/// "outer: cause: root cause"
pub fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
