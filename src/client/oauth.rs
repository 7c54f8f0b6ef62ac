use super::models::OAuthTokenResponse;
use super::{parse_response, CalendlyClient};
use crate::error::{config_error, Result};
use tracing::debug;
use url::Url;

impl CalendlyClient {
    /// Authorization URL for the OAuth code flow
    pub fn authorization_url(&self, redirect_uri: &str, state: Option<&str>) -> Result<String> {
        let client_id = self
            .config
            .credentials
            .client_id
            .as_deref()
            .ok_or_else(|| config_error("CALENDLY_CLIENT_ID is not configured"))?;
        let base = self.config.auth_base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/oauth/authorize", base))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("client_id", client_id)
                .append_pair("response_type", "code")
                .append_pair("redirect_uri", redirect_uri);
            if let Some(state) = state {
                pairs.append_pair("state", state);
            }
        }

        Ok(url.into())
    }

    /// POST a grant to the token endpoint with the client credentials appended
    pub(super) async fn token_grant(&self, grant: &[(&str, &str)]) -> Result<OAuthTokenResponse> {
        let (client_id, client_secret) = self.config.credentials.client_credentials()?;
        let base = self.config.auth_base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{}/oauth/token", base))?;

        let mut form: Vec<(&str, &str)> = grant.to_vec();
        form.push(("client_id", client_id));
        form.push(("client_secret", client_secret));

        debug!("POST /oauth/token ({})", grant_type(grant));
        let response = self.client.post(url).form(&form).send().await?;
        let token = parse_response(response).await?;
        Ok(serde_json::from_value(token)?)
    }
}

fn grant_type<'a>(grant: &[(&str, &'a str)]) -> &'a str {
    grant
        .iter()
        .find(|(key, _)| *key == "grant_type")
        .map(|(_, value)| *value)
        .unwrap_or("unknown")
}
