use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use am_app::ManageExit;
use am_console::bootstrap::{run, RunArgs};

/// Manage the devices registered on an identity anchor.
#[derive(Parser, Debug)]
#[command(name = "anchor-manager", version, about)]
struct Args {
    /// Configuration file (TOML). Defaults to config.toml in the data directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Anchor number to manage.
    #[arg(short, long)]
    anchor: Option<String>,

    /// Hex encoded public key of the device signing in. Starts a new session.
    #[arg(long)]
    public_key: Option<String>,
}

impl From<Args> for RunArgs {
    fn from(args: Args) -> Self {
        Self {
            config: args.config,
            anchor: args.anchor,
            public_key: args.public_key,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args.into()).await {
        Ok(ManageExit::Closed) => ExitCode::SUCCESS,
        // Session is gone; the caller has to sign in again.
        Ok(ManageExit::SessionRestarted) => ExitCode::from(3),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "anchor-manager failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
