mod config;

use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gritboard_app::{DashboardController, FileSessionStore, View};
use gritlab_client::GritlabClient;
use tracing::{error, info};

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the page for the stored session (default)
    Show,
    /// Sign in and render the profile
    Login {
        #[arg(short, long, env = "GRITBOARD_USERNAME")]
        username: String,
        #[arg(short, long, env = "GRITBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let settings = args.settings;
    let dashboard = settings.dashboard()?;

    let client = GritlabClient::new(&dashboard.signin_url, &dashboard.graphql_url)?;
    let store = FileSessionStore::new(&settings.session_file);
    let mut controller = DashboardController::new(store, client.clone(), client, dashboard);

    let mut outcome = Ok(());
    let view = match args.command.unwrap_or(Command::Show) {
        Command::Show => controller.on_load().await,
        Command::Login { username, password } => {
            if let Err(e) = controller.login(&username, &password).await {
                error!("sign in failed: {e}");
                outcome = Err(e);
            }
            controller.page().view()
        }
        Command::Logout => {
            controller.logout();
            View::Login
        }
    };

    let output = settings.output;
    fs::write(&output, controller.page().to_html())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("wrote {view:?} page to {}", output.display());
    Ok(outcome?)
}
