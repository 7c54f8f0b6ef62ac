use super::ToolResponse;
use crate::client::CalendlyApi;
use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthUrlArgs {
    pub redirect_uri: String,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeCodeArgs {
    pub code: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenArgs {
    pub refresh_token: String,
}

pub fn get_oauth_url(client: &dyn CalendlyApi, args: OAuthUrlArgs) -> Result<ToolResponse> {
    let url = client.oauth_url(&args.redirect_uri, args.state.as_deref())?;
    Ok(ToolResponse::text(format!("OAuth Authorization URL:\n{}", url)))
}

pub async fn exchange_code_for_tokens(
    client: &dyn CalendlyApi,
    args: ExchangeCodeArgs,
) -> Result<ToolResponse> {
    let tokens = client
        .exchange_code_for_tokens(&args.code, &args.redirect_uri)
        .await?;
    ToolResponse::json("OAuth Tokens", &serde_json::to_value(tokens)?)
}

pub async fn refresh_access_token(
    client: &dyn CalendlyApi,
    args: RefreshTokenArgs,
) -> Result<ToolResponse> {
    let tokens = client.refresh_access_token(&args.refresh_token).await?;
    ToolResponse::json("Refreshed OAuth Tokens", &serde_json::to_value(tokens)?)
}
