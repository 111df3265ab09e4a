use hovers_core::context::{Color, HoverConfigExt};
use hovers_core::hovers::{LINE_BREAK, ensure_hover_dir};
use hovers_core::{ItemId, ItemInstance};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::CliContext;
use crate::context::error_chain;

pub async fn query(ctx: &CliContext, id: ItemId, quantity: i32) {
    let item = ItemInstance::resolve(ctx.hovers.catalog(), id, quantity);
    let hovers = ctx.hovers.query_hovers(&item);

    if hovers.is_empty() {
        println!("No hovers for item {}", item.id);
        return;
    }

    let color = ctx.config.read().await.default_color;
    for hover in &hovers {
        for line in render_lines(hover, color) {
            println!("{line}");
        }
        println!();
    }
}

pub async fn reload(ctx: &CliContext) {
    let hovers = Arc::clone(&ctx.hovers);
    match tokio::task::spawn_blocking(move || hovers.reload_now()).await {
        Ok(Ok(summary)) => println!(
            "Reloaded {} hovers for {} items from {} files",
            summary.definitions, summary.item_ids, summary.documents
        ),
        Ok(Err(e)) => println!("Reload failed, keeping previous hovers: {}", error_chain(&e)),
        Err(e) => println!("Reload task failed: {e}"),
    }
}

pub fn names(ctx: &CliContext, pattern: Option<&str>) {
    let index = ctx.hovers.names();

    let Some(pattern) = pattern else {
        let report = index.report();
        println!("{} names indexed", index.len());
        for (id, name) in &report.invalid {
            println!("  skipped invalid name {name:?} (item {id})");
        }
        for dup in &report.duplicates {
            println!(
                "  duplicate {} kept item {}, ignored item {}",
                dup.name, dup.kept, dup.rejected
            );
        }
        return;
    };

    let mut ids: Vec<_> = index.resolve_regex(pattern).into_iter().collect();
    if ids.is_empty() {
        println!("No names match {pattern}");
        return;
    }
    ids.sort_unstable();

    for id in &ids {
        println!("{:>8}  {}", id, index.name_of(*id).unwrap_or("?"));
    }
    println!("\nTotal: {} items", ids.len());
}

pub fn list(ctx: &CliContext) {
    let snapshot = ctx.hovers.snapshot();
    if snapshot.is_empty() {
        println!("No hovers loaded");
        return;
    }

    let names = ctx.hovers.names();
    println!("{:<8} {:<40} Hovers", "Id", "Name");
    println!("{}", "-".repeat(60));
    for id in snapshot.item_ids() {
        println!(
            "{:<8} {:<40} {}",
            id,
            names.name_of(id).unwrap_or("-"),
            snapshot.lookup(id).len()
        );
    }

    println!(
        "\nTotal: {} items, {} definitions in {} files",
        snapshot.len(),
        snapshot.definition_count(),
        snapshot.document_count()
    );
}

pub async fn show_config(ctx: &CliContext) {
    let config = ctx.config.read().await;
    let [r, g, b, a] = config.default_color;

    println!("hovers_dir:        {}", config.hovers_dir);
    println!("hot_reload:        {}", config.hot_reload);
    println!("default_color:     ({r}, {g}, {b}, {a})");
    println!("reload_command:    {}", config.reload_command);
    println!("name_source:       {}", config.name_source.label());
    println!("catalog_path:      {}", config.catalog_path);
    println!("symbol_table_path: {}", config.symbol_table_path);
    println!("state:             {:?}", ctx.hovers.state());
}

pub async fn set_directory(ctx: &CliContext, new_directory: &str) {
    let path = PathBuf::from(new_directory);

    {
        let config = ctx.config.read().await;
        if config.hovers_path() == path {
            println!("Hover directory already configured to {new_directory}");
            return;
        }
    }

    if let Err(e) = ensure_hover_dir(&path) {
        println!("Update failed: {}", error_chain(&e));
        return;
    }

    if let Err(e) = ctx.hovers.set_hovers_dir(&path) {
        println!("Hover directory changed but watching it failed: {}", error_chain(&e));
    }

    save_config(ctx, |config| config.hovers_dir = new_directory.to_string()).await;
    reload(ctx).await;
}

pub async fn hot_reload(ctx: &CliContext, enabled: bool) {
    if let Err(e) = ctx.hovers.set_hot_reload(enabled) {
        println!("Could not enable hot reload: {}", error_chain(&e));
        return;
    }

    save_config(ctx, |config| config.hot_reload = enabled).await;
    println!("Hot reload {}", if enabled { "enabled" } else { "disabled" });
}

pub fn exit() {
    println!("quitting...");
    if let Err(e) = std::io::stdout().flush() {
        tracing::warn!(error = %e, "Failed to flush stdout");
    }
}

async fn save_config(ctx: &CliContext, update: impl FnOnce(&mut hovers_core::HoverConfig)) {
    let mut config = ctx.config.write().await;
    update(&mut config);
    if let Err(e) = config.save() {
        println!("Failed to save configuration: {}", error_chain(&e));
    }
}

/// Split a rendered hover on line breaks and color each line for the terminal
fn render_lines(hover: &str, color: Color) -> Vec<String> {
    let [r, g, b, _] = color;
    hover
        .split(LINE_BREAK)
        .map(|line| format!("\x1b[38;2;{r};{g};{b}m{line}\x1b[0m"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lines_splits_on_line_breaks() {
        let lines = render_lines("Qty: 2</br>Id: 9", [238, 238, 238, 255]);
        assert_eq!(
            lines,
            vec![
                "\x1b[38;2;238;238;238mQty: 2\x1b[0m",
                "\x1b[38;2;238;238;238mId: 9\x1b[0m",
            ]
        );
    }
}
