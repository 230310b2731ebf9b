use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotdash::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightBlue.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API and print a refresh token
    Auth,

    /// Fetch fresh listening data and write the dashboard file
    Fetch(FetchOptions),

    /// Show your listening statistics for the last 30 days
    Stats(StatsOptions),

    /// Serve the dashboard API
    Serve(ServeOptions),

    /// Trigger the workflow that republishes the dashboard data
    Refresh,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct FetchOptions {
    /// Where to write the dashboard JSON (defaults to the local data directory)
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Also print the written JSON
    #[clap(long)]
    pub print: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// Show the last fetched snapshot instead of calling Spotify
    #[clap(long)]
    pub from_file: bool,

    /// Snapshot to read with --from-file
    #[clap(long, requires = "from_file")]
    pub path: Option<PathBuf>,

    /// Print the raw dashboard JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on, e.g. 127.0.0.1:3001
    #[clap(long)]
    pub addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Fetch(opt) => cli::fetch(opt.output, opt.print).await,
        Command::Stats(opt) => cli::stats(opt.from_file, opt.path, opt.json).await,
        Command::Serve(opt) => cli::serve(opt.addr).await,
        Command::Refresh => cli::refresh().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
