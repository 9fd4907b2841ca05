use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::anyhow;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use realtime_caller::{
    ServerConfig,
    core::telephony::{CallPlacer, TwilioClient},
    routes,
    state::AppState,
};

/// Realtime caller - places a phone call and bridges it to OpenAI Realtime
#[derive(Parser, Debug)]
#[command(name = "realtime-caller")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Destination number (overrides PHONE_NUMBER_TO)
    #[arg(long = "to", value_name = "NUMBER")]
    to: Option<String>,

    /// Serve the media-stream endpoint without placing a call
    #[arg(long = "no-call")]
    no_call: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Initialize crypto provider for the outbound wss:// leg and optional TLS
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install default crypto provider"))?;

    let cli = Cli::parse();

    // Load configuration from file or environment
    let mut config = if let Some(config_path) = cli.config {
        info!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(&config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };
    if let Some(to) = cli.to {
        config.phone_number_to = to;
    }

    let address = config.address();
    let tls_config = config.tls.clone();
    let destination = config.phone_number_to.clone();
    let twilio = TwilioClient::new(config.twilio_config()).map_err(|e| anyhow!(e))?;

    let app_state = AppState::new(config).map_err(|e| anyhow!(e))?;
    let app = routes::create_app(app_state);

    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    // The call is placed once, concurrently with the server coming up.
    // Twilio only connects back after the callee answers.
    if cli.no_call {
        info!("Call placement disabled, waiting for an inbound media stream");
    } else {
        tokio::spawn(async move {
            match twilio.place_call(&destination).await {
                Ok(call) => info!(call_sid = %call.call_sid, to = %destination, "Outbound call created"),
                Err(e) => {
                    error!("Failed to place call: {}", e);
                    std::process::exit(1);
                }
            }
        });
    }

    // Start server with or without TLS
    if let Some(tls) = tls_config {
        let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to load TLS certificates from {} and {}: {}",
                    tls.cert_path.display(),
                    tls.key_path.display(),
                    e
                )
            })?;

        info!("Server listening on https://{} (TLS enabled)", socket_addr);

        axum_server::bind_rustls(socket_addr, rustls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| anyhow!("TLS server error: {}", e))?;
    } else {
        info!("Server listening on http://{}", socket_addr);

        let listener = TcpListener::bind(&socket_addr).await?;
        axum::serve(listener, app).await?;
    }

    Ok(())
}
