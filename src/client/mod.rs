//! Calendly HTTP client adapter.
//!
//! Every outbound call to Calendly goes through [`CalendlyClient`]. Handlers
//! only see the [`CalendlyApi`] trait so they can run against a stub.

pub mod models;
mod oauth;

use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use models::{
    EventTypeAvailabilityParams, ListEventInviteesParams, ListEventTypesParams, ListEventsParams,
    ListOrganizationMembershipsParams, OAuthTokenResponse, Query, ScheduleEventRequest,
};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// One operation per Calendly endpoint used by the tools
#[async_trait]
pub trait CalendlyApi: Send + Sync {
    async fn get_current_user(&self) -> Result<Value>;

    async fn list_events(&self, params: ListEventsParams) -> Result<Value>;

    async fn get_event(&self, event_uuid: &str) -> Result<Value>;

    async fn cancel_event(&self, event_uuid: &str, reason: Option<&str>) -> Result<Value>;

    async fn list_event_invitees(&self, params: ListEventInviteesParams) -> Result<Value>;

    async fn list_organization_memberships(
        &self,
        params: ListOrganizationMembershipsParams,
    ) -> Result<Value>;

    async fn list_event_types(&self, params: ListEventTypesParams) -> Result<Value>;

    async fn get_event_type_availability(&self, params: EventTypeAvailabilityParams)
        -> Result<Value>;

    async fn schedule_event(&self, request: ScheduleEventRequest) -> Result<Value>;

    /// Build the OAuth authorization URL. Performs no network call.
    fn oauth_url(&self, redirect_uri: &str, state: Option<&str>) -> Result<String>;

    async fn exchange_code_for_tokens(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<OAuthTokenResponse>;

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<OAuthTokenResponse>;
}

/// reqwest-backed Calendly client
#[derive(Clone)]
pub struct CalendlyClient {
    config: Arc<Config>,
    client: Client,
}

impl CalendlyClient {
    /// Create a client from an explicit configuration
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve a resource path against the API base URL
    fn endpoint(&self, path: &str, query: &Query) -> Result<Url> {
        let base = self.config.api_base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, path))?;
        if !query.pairs().is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.pairs() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Attach the single authorization header, if any credential is configured
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.config.credentials.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn get_request(&self, path: &str, query: &Query) -> Result<RequestBuilder> {
        let url = self.endpoint(path, query)?;
        Ok(self.authorized(self.client.get(url)))
    }

    fn post_request(&self, path: &str, body: &impl serde::Serialize) -> Result<RequestBuilder> {
        let url = self.endpoint(path, &Query::default())?;
        Ok(self.authorized(self.client.post(url)).json(body))
    }

    async fn get(&self, path: &str, query: Query) -> Result<Value> {
        debug!("GET {} {:?}", path, query.pairs());
        let response = self.get_request(path, &query)?.send().await?;
        parse_response(response).await
    }

    async fn post(&self, path: &str, body: &impl serde::Serialize) -> Result<Value> {
        debug!("POST {}", path);
        let response = self.post_request(path, body)?.send().await?;
        parse_response(response).await
    }
}

/// Map non-success statuses to `Error::Api`, otherwise parse the JSON body
pub(crate) async fn parse_response(response: Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl CalendlyApi for CalendlyClient {
    async fn get_current_user(&self) -> Result<Value> {
        self.get("/users/me", Query::default()).await
    }

    async fn list_events(&self, params: ListEventsParams) -> Result<Value> {
        self.get("/scheduled_events", params.query()).await
    }

    async fn get_event(&self, event_uuid: &str) -> Result<Value> {
        self.get(&format!("/scheduled_events/{}", event_uuid), Query::default())
            .await
    }

    async fn cancel_event(&self, event_uuid: &str, reason: Option<&str>) -> Result<Value> {
        let body = match reason {
            Some(reason) => json!({ "reason": reason }),
            None => json!({}),
        };
        self.post(
            &format!("/scheduled_events/{}/cancellation", event_uuid),
            &body,
        )
        .await
    }

    async fn list_event_invitees(&self, params: ListEventInviteesParams) -> Result<Value> {
        self.get(
            &format!("/scheduled_events/{}/invitees", params.event_uuid),
            params.query(),
        )
        .await
    }

    async fn list_organization_memberships(
        &self,
        params: ListOrganizationMembershipsParams,
    ) -> Result<Value> {
        self.get("/organization_memberships", params.query()).await
    }

    async fn list_event_types(&self, params: ListEventTypesParams) -> Result<Value> {
        self.get("/event_types", params.query()).await
    }

    async fn get_event_type_availability(
        &self,
        params: EventTypeAvailabilityParams,
    ) -> Result<Value> {
        self.get("/event_type_available_times", params.query()).await
    }

    async fn schedule_event(&self, request: ScheduleEventRequest) -> Result<Value> {
        self.post("/invitees", &request).await
    }

    fn oauth_url(&self, redirect_uri: &str, state: Option<&str>) -> Result<String> {
        self.authorization_url(redirect_uri, state)
    }

    async fn exchange_code_for_tokens(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<OAuthTokenResponse> {
        self.token_grant(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ])
        .await
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<OAuthTokenResponse> {
        self.token_grant(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }
}
