use anyhow::Context;
use clap::{Parser, Subcommand};
use mentorship::{AppState, config::Config, create_router, meeting::TencentMeetingClient};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Mentorship program server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Run the schema migration once and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentorship=debug,tower_http=info".into()),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    config.print_info();

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
        .connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;
    info!("Connected to database");

    let meeting = TencentMeetingClient::new(config.meeting.clone())?;
    let state = Arc::new(AppState::new(
        pool,
        meeting,
        config.jwt_secret.clone(),
        config.integration_auth_token.clone(),
        Duration::from_secs(config.user_cache_ttl_secs),
    ));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            let report = state.migrator.migrate_database().await?;
            info!("Completed steps: {}", report.completed_steps.join(", "));
        }
        Command::Serve => {
            let app = create_router(state)
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive());

            let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
                .parse()
                .context("invalid SERVER_HOST / SERVER_PORT")?;
            let listener = TcpListener::bind(addr).await?;
            info!("Server listening on http://{}", addr);

            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
