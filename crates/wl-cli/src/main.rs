mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wltool",
    about = "White-label onboarding generator and URL reachability checker",
    version,
    propagate_version = true
)]
struct Cli {
    /// Tool directory holding `template/` and `result/` (default: current directory)
    #[arg(long, global = true, env = "WL_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate SQL migrations and Java sources for a new white label
    #[command(name = "A", alias = "a")]
    WhiteLabel {
        /// Path to the white-label JSON config
        config: PathBuf,
    },

    /// Probe every configured domain over HTTP(S)
    #[command(name = "B", alias = "b")]
    UrlCheck {
        /// URL checker config (default: sample-urlChecker.json in the root)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::WhiteLabel { config } => cmd::white_label::run(&root, &config, cli.json),
        Commands::UrlCheck { file } => cmd::url_check::run(&root, file.as_deref(), cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
