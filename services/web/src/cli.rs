use crate::infra::connect_users;
use crate::server;
use clap::{Args, Parser, Subcommand};
use dreamjob::config::AppConfig;
use dreamjob::error::AppError;
use dreamjob::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "DreamJob",
    about = "Serve the DreamJob job board or prepare its users database",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Create the users table in the configured database and exit
    Migrate,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Migrate => migrate().await,
    }
}

async fn migrate() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    // `connect` runs the schema migration before handing the pool back.
    connect_users(&config.database).await?;
    info!(database = %config.database.url, "users schema migrated");
    Ok(())
}
