use crate::client::CalendlyClient;
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::{other_error, Error};
use crate::server::CalendlyServer;
use rmcp::{transport::stdio, ServiceExt};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration.
/// Logs go to stderr; stdout carries the MCP stream.
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,rmcp=warn,reqwest=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the server configuration
pub fn load_config() -> miette::Result<Arc<Config>> {
    match Config::load() {
        Ok(config) => {
            if config.credentials.bearer_token().is_none() {
                warn!("No CALENDLY_ACCESS_TOKEN or CALENDLY_API_KEY configured; API calls will be rejected");
            }
            Ok(Arc::new(config))
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Serve the tools over stdio until the client disconnects
pub async fn start_server(config: Arc<Config>) -> miette::Result<()> {
    let client = CalendlyClient::new(Arc::clone(&config))?;
    let dispatcher = Dispatcher::new(Arc::new(client), config);
    let server = CalendlyServer::new(dispatcher);

    let service = server
        .serve(stdio())
        .await
        .map_err(|e| other_error(&format!("Failed to start MCP server: {}", e)))?;

    info!("Calendly MCP server running on stdio");

    service
        .waiting()
        .await
        .map_err(|e| other_error(&format!("MCP server stopped unexpectedly: {}", e)))?;

    info!("Calendly MCP server shut down");
    Ok(())
}
