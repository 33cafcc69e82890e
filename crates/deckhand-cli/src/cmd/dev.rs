use anyhow::Context;
use deckhand_core::{
    config::Config,
    dev::{self, DevInstance},
    runner::ToolCommand,
    slides::SlideCollection,
    DeckError,
};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tokio::task::JoinSet;

/// Grace period before opening browsers, so the dev servers are listening.
const OPEN_DELAY: Duration = Duration::from_secs(3);

pub fn run(root: &Path, port: Option<u16>, open: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let tool = ToolCommand::from_argv(&config.dev.command).context("invalid dev.command")?;
    let base_port = port.unwrap_or(config.dev.base_port);

    let collection = SlideCollection::resolve(root)
        .with_context(|| format!("failed to scan {}", root.display()))?;

    let instances = match dev::plan(&collection, base_port) {
        Err(DeckError::NoSlides) => {
            print_directory(root);
            return Err(DeckError::NoSlides.into());
        }
        other => other?,
    };

    if !tool.is_available() {
        tracing::warn!(program = %tool.program, "dev command not found on PATH");
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(serve_all(root, tool, instances, open))
}

async fn serve_all(
    root: &Path,
    tool: ToolCommand,
    instances: Vec<DevInstance>,
    open: bool,
) -> anyhow::Result<()> {
    let mut running = JoinSet::new();
    let mut started = Vec::new();

    for inst in instances {
        let spawned = Command::new(&tool.program)
            .args(&tool.args)
            .args(inst.args())
            .current_dir(root)
            .kill_on_drop(true)
            .spawn();
        let mut child = match spawned {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(title = %inst.entry.title, error = %e, "failed to start dev server");
                continue;
            }
        };
        tracing::info!(title = %inst.entry.title, file = %inst.entry.file, url = %inst.url, "dev server started");
        let title = inst.entry.title.clone();
        running.spawn(async move { (title, child.wait().await) });
        started.push(inst);
    }

    if started.is_empty() {
        anyhow::bail!("no dev server could be started");
    }

    print_access_list(&started);

    if open {
        tokio::time::sleep(OPEN_DELAY).await;
        for inst in &started {
            if let Err(e) = open::that(&inst.url) {
                tracing::warn!(url = %inst.url, error = %e, "failed to open browser");
            }
        }
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nStopping {} dev server(s)...", running.len());
                // Aborting the tasks drops each Child, which kills it.
                running.shutdown().await;
                break;
            }
            next = running.join_next() => match next {
                None => {
                    tracing::info!("all dev servers exited");
                    break;
                }
                Some(Ok((title, Ok(status)))) => {
                    tracing::warn!(%title, %status, "dev server exited");
                }
                Some(Ok((title, Err(e)))) => {
                    tracing::error!(%title, error = %e, "failed waiting on dev server");
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "dev server task failed");
                }
            },
        }
    }
    Ok(())
}

fn print_access_list(started: &[DevInstance]) {
    let rule = "=".repeat(50);
    println!("\n{rule}");
    for (i, inst) in started.iter().enumerate() {
        println!("{}. {}", i + 1, inst.entry.title);
        println!("   url:  {}", inst.url);
        println!("   file: {}", inst.entry.file);
    }
    println!("{rule}");
    println!("Press Ctrl+C to stop all servers. Each server hot-reloads its own file.");
}

fn print_directory(root: &Path) {
    eprintln!("Files in {}:", root.display());
    match std::fs::read_dir(root) {
        Ok(entries) => {
            let mut names: Vec<String> = entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            for name in names {
                eprintln!("  {name}");
            }
        }
        Err(e) => eprintln!("  (cannot list: {e})"),
    }
}
