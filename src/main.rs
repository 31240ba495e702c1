use clap::Parser;
use tracing_subscriber::EnvFilter;

use dashboard_actions::config::AppConfig;
use dashboard_actions::server::{app, AppState};

#[derive(Parser)]
#[command(name = "dashboard-actions")]
#[command(about = "Form action server for the meeting and room booking dashboard")]
#[command(version)]
struct Cli {
    #[arg(long, env = "DASHBOARD_PORT", help = "Port to listen on (overrides SERVER_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Remote API base URL (overrides API_BASE_URL)")]
    api_base_url: Option<String>,

    #[arg(long, help = "Reject meeting forms with unparsable room or attendee ids")]
    strict_attendee_ids: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up API_BASE_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = dashboard_actions::config::config().clone();
    apply_cli_overrides(&mut config, &cli);

    tracing::info!(
        "Starting dashboard actions in {:?} mode against {}",
        config.environment,
        config.api.base_url
    );
    if config.api.accept_invalid_certs {
        if dashboard_actions::is_development!() {
            tracing::warn!("Accepting invalid TLS certificates from the remote API");
        } else {
            tracing::error!("Accepting invalid TLS certificates outside development; bearer tokens are exposed");
        }
    }

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(config))).await?;
    Ok(())
}

fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(base_url) = &cli.api_base_url {
        config.api.base_url = base_url.clone();
    }
    if cli.strict_attendee_ids {
        config.validation.strict_attendee_ids = true;
    }
}
