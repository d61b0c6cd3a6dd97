use std::{fmt::Display, path::PathBuf, process, sync::Arc};

use clap::{Parser, Subcommand};
use colored::Colorize;
use linksconnect_lib::{CoreConfig, FileStore, Store, services::Services};
use sysexits::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod lookup;
mod onboard;
mod render;
mod view;

#[derive(Parser, Debug)]
#[command(name = "linksconnect")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Use this profile file instead of the one in the state directory
    #[arg(long, global = true)]
    profile_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Create your golfer profile
    Onboard(onboard::Args),
    /// Browse golfers near you
    Feed(view::FeedArgs),
    /// Show your profile
    Profile,
    /// Show your messages
    Messages,
    /// Show a screen by name (feed, messages, profile)
    Show { screen: String },
    /// Delete your profile
    Logout,
    /// Look up a handicap by GHIN number
    Lookup { ghin: String },
}

/// Everything a command needs.
pub struct Context {
    pub cfg: CoreConfig,
    pub store: Store,
    pub services: Services,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> process::ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::Ok.into(),
        Err(code) => code.into(),
    }
}

async fn run(cli: Cli) -> Result<(), ExitCode> {
    let cfg = CoreConfig::load().map_err(|e| fail(e, ExitCode::Config))?;
    let store: Store = match cli.profile_file {
        Some(path) => Arc::new(FileStore::at(path)),
        None => Arc::new(FileStore::new().map_err(|e| fail(e, ExitCode::CantCreat))?),
    };
    let services = Services::from_config(&cfg).map_err(|e| fail(e, ExitCode::Software))?;

    let ctx = Context {
        cfg,
        store,
        services,
    };

    match &cli.command {
        Command::Onboard(args) => onboard::handle(&ctx, args).await,
        Command::Feed(args) => view::feed(&ctx, args).await,
        Command::Profile => view::profile(&ctx),
        Command::Messages => view::messages(&ctx),
        Command::Show { screen } => view::show(&ctx, screen).await,
        Command::Logout => view::logout(&ctx),
        Command::Lookup { ghin } => lookup::handle(&ctx, ghin).await,
    }
}

/// Report an error and hand back the exit code to use.
pub fn fail(error: impl Display, code: ExitCode) -> ExitCode {
    eprintln!("{} {error}", "error:".red().bold());
    code
}
