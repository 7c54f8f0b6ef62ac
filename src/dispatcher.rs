use crate::client::CalendlyApi;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::tools::{self, api, oauth, scheduling, ToolDefinition, ToolName, ToolResponse};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Routes a tool call to its handler
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn CalendlyApi>,
    config: Arc<Config>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn CalendlyApi>, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    /// Every tool definition, advertised verbatim
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tools::definitions()
    }

    /// Resolve `name`, parse its arguments and run the handler
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<ToolResponse> {
        let tool: ToolName = name
            .parse()
            .map_err(|_| Error::UnknownTool(name.to_string()))?;
        let arguments = Value::Object(arguments.unwrap_or_default());

        debug!("Dispatching tool {}", tool);

        let client = self.client.as_ref();
        let config = self.config.as_ref();

        match tool {
            ToolName::GetOAuthUrl => oauth::get_oauth_url(client, parse(tool, arguments)?),
            ToolName::ExchangeCodeForTokens => {
                oauth::exchange_code_for_tokens(client, parse(tool, arguments)?).await
            }
            ToolName::RefreshAccessToken => {
                oauth::refresh_access_token(client, parse(tool, arguments)?).await
            }
            ToolName::GetCurrentUser => api::get_current_user(client).await,
            ToolName::ListEvents => api::list_events(client, config, parse(tool, arguments)?).await,
            ToolName::GetEvent => api::get_event(client, parse(tool, arguments)?).await,
            ToolName::ListEventInvitees => {
                api::list_event_invitees(client, parse(tool, arguments)?).await
            }
            ToolName::CancelEvent => api::cancel_event(client, parse(tool, arguments)?).await,
            ToolName::ListOrganizationMemberships => {
                api::list_organization_memberships(client, parse(tool, arguments)?).await
            }
            ToolName::ListEventTypes => {
                scheduling::list_event_types(client, config, parse(tool, arguments)?).await
            }
            ToolName::GetEventTypeAvailability => {
                scheduling::get_event_type_availability(client, parse(tool, arguments)?).await
            }
            ToolName::ScheduleEvent => {
                Ok(scheduling::schedule_event(client, parse(tool, arguments)?).await)
            }
        }
    }
}

fn parse<T: DeserializeOwned>(tool: ToolName, arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|source| Error::InvalidArguments {
        tool: tool.as_str(),
        source,
    })
}
