use calendly_mcp::client::{CalendlyApi, CalendlyClient};
use calendly_mcp::config::Config;
use calendly_mcp::error::{other_error, Result};
use std::sync::Arc;

const REDIRECT_URI: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Arc::new(Config::load()?);
    let client = CalendlyClient::new(config)?;

    // Generate random state for security
    let state = uuid::Uuid::new_v4().to_string();
    let auth_url = client.authorization_url(REDIRECT_URI, Some(&state))?;

    // Open browser for authorization
    println!("Opening browser for Calendly authorization...");
    if webbrowser::open(&auth_url).is_err() {
        println!("Could not open a browser. Visit this URL manually:\n{}", auth_url);
    }

    // Start local server to receive the callback
    let server = tiny_http::Server::http("127.0.0.1:8080")
        .map_err(|e| other_error(&format!("Failed to bind callback listener: {}", e)))?;
    println!("Waiting for authorization callback...");

    let request = server.recv()?;
    let callback = url::Url::parse(&format!("{}{}", REDIRECT_URI, request.url()))?;

    let param = |name: &str| {
        callback
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if param("state").as_deref() != Some(state.as_str()) {
        request.respond(tiny_http::Response::from_string("State mismatch.").with_status_code(400))?;
        return Err(other_error("OAuth state mismatch in callback"));
    }

    let code = param("code").ok_or_else(|| other_error("No authorization code found in callback"))?;

    // Exchange code for tokens
    let tokens = client.exchange_code_for_tokens(&code, REDIRECT_URI).await?;

    let response =
        tiny_http::Response::from_string("Authorization successful! You can close this window.");
    request.respond(response)?;

    println!("Add these lines to your .env file:");
    println!("CALENDLY_ACCESS_TOKEN={}", tokens.access_token);
    println!("CALENDLY_REFRESH_TOKEN={}", tokens.refresh_token);
    println!("CALENDLY_USER_URI={}", tokens.owner);
    println!("CALENDLY_ORGANIZATION_URI={}", tokens.organization);

    Ok(())
}
