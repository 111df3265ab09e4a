use clap::{ArgAction, Parser, Subcommand};
use hovers_cli::CliContext;
use hovers_cli::commands;
use hovers_cli::logging;
use hovers_cli::repl::{print_error, readline};
use hovers_core::context::{HoverConfig, HoverConfigExt};

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let config = HoverConfig::load();

    let ctx = CliContext::new(config)?;
    ctx.start().await;

    while let Some(line) = readline()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if ctx.config.read().await.is_reload_command(line) {
            commands::reload(&ctx).await;
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => print_error(&mut std::io::stdout(), &err).map_err(|e| e.to_string())?,
        }
    }

    ctx.shutdown().await;
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Item hover engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the hovers for an item
    Query {
        #[arg(short, long)]
        id: i32,
        #[arg(short, long, default_value_t = 1)]
        qty: i32,
    },
    /// Rebuild the hover index from the hover directory
    Reload,
    /// Show name index health, or the names matching a regex
    Names {
        #[arg(short, long)]
        pattern: Option<String>,
    },
    /// List items that have hovers
    List,
    Config,
    SetDirectory {
        #[arg(short, long)]
        path: String,
    },
    HotReload {
        #[arg(short, long, action = ArgAction::Set)]
        enabled: bool,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "hovers".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Query { id, qty }) => commands::query(ctx, *id, *qty).await,
        Some(Commands::Reload) => commands::reload(ctx).await,
        Some(Commands::Names { pattern }) => commands::names(ctx, pattern.as_deref()),
        Some(Commands::List) => commands::list(ctx),
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::SetDirectory { path }) => commands::set_directory(ctx, path).await,
        Some(Commands::HotReload { enabled }) => commands::hot_reload(ctx, *enabled).await,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
