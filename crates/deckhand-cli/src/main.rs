mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "deckhand",
    about = "Build and serve every Slidev deck in a directory as one site",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the slide files (default: nearest deckhand.yaml, else cwd)
    #[arg(long, global = true, env = "DECKHAND_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List discovered slide files in build order
    List,

    /// Build every deck and assemble the site with a navigation page
    Build {
        /// Output directory (overrides site.out_dir)
        #[arg(long)]
        out: Option<String>,

        /// Skip writing vercel.json
        #[arg(long)]
        no_vercel: bool,
    },

    /// Start one live-reloading dev server per deck on sequential ports
    Dev {
        /// First port to use (overrides dev.base_port)
        #[arg(long)]
        port: Option<u16>,

        /// Open each deck in the browser once started
        #[arg(long)]
        open: bool,
    },

    /// Inspect and validate deckhand.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Build { .. } | Commands::Dev { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::List => cmd::list::run(&root, cli.json),
        Commands::Build { out, no_vercel } => {
            cmd::build::run(&root, out.as_deref(), no_vercel, cli.json)
        }
        Commands::Dev { port, open } => cmd::dev::run(&root, port, open),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
