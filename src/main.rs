use calendly_mcp::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting Calendly MCP server");

    // Load configuration
    let config = startup::load_config()?;

    // Serve tools over stdio
    startup::start_server(config).await
}
