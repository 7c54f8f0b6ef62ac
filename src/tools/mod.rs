use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod api;
pub mod definitions;
pub mod oauth;
pub mod scheduling;

pub use definitions::{definitions, ToolDefinition};

/// The closed set of tools this server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetOAuthUrl,
    ExchangeCodeForTokens,
    RefreshAccessToken,
    GetCurrentUser,
    ListEvents,
    GetEvent,
    ListEventInvitees,
    CancelEvent,
    ListOrganizationMemberships,
    ListEventTypes,
    GetEventTypeAvailability,
    ScheduleEvent,
}

impl ToolName {
    /// Every tool, in the order they are advertised
    pub const ALL: [ToolName; 12] = [
        ToolName::GetOAuthUrl,
        ToolName::ExchangeCodeForTokens,
        ToolName::RefreshAccessToken,
        ToolName::GetCurrentUser,
        ToolName::ListEvents,
        ToolName::GetEvent,
        ToolName::ListEventInvitees,
        ToolName::CancelEvent,
        ToolName::ListOrganizationMemberships,
        ToolName::ListEventTypes,
        ToolName::GetEventTypeAvailability,
        ToolName::ScheduleEvent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetOAuthUrl => "get_oauth_url",
            ToolName::ExchangeCodeForTokens => "exchange_code_for_tokens",
            ToolName::RefreshAccessToken => "refresh_access_token",
            ToolName::GetCurrentUser => "get_current_user",
            ToolName::ListEvents => "list_events",
            ToolName::GetEvent => "get_event",
            ToolName::ListEventInvitees => "list_event_invitees",
            ToolName::CancelEvent => "cancel_event",
            ToolName::ListOrganizationMemberships => "list_organization_memberships",
            ToolName::ListEventTypes => "list_event_types",
            ToolName::GetEventTypeAvailability => "get_event_type_availability",
            ToolName::ScheduleEvent => "schedule_event",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .iter()
            .copied()
            .find(|tool| tool.as_str() == s)
            .ok_or(())
    }
}

/// A single text block of a tool response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "text")]
pub struct TextContent {
    pub text: String,
}

/// Uniform response envelope returned by every handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResponse {
    pub content: Vec<TextContent>,
}

impl ToolResponse {
    /// Envelope with exactly one text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent { text: text.into() }],
        }
    }

    /// Envelope with a title line followed by pretty-printed JSON
    pub fn json(title: &str, data: &serde_json::Value) -> crate::error::Result<Self> {
        let pretty = serde_json::to_string_pretty(data)?;
        Ok(Self::text(format!("{}:\n{}", title, pretty)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_names_round_trip() {
        for tool in ToolName::ALL {
            assert_eq!(tool.as_str().parse::<ToolName>(), Ok(tool));
        }
        assert!("frobnicate".parse::<ToolName>().is_err());
    }

    #[test]
    fn envelope_serializes_as_text_content() {
        let response = ToolResponse::text("hello");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "content": [{ "type": "text", "text": "hello" }] })
        );
    }

    #[test]
    fn json_envelope_is_pretty_printed() {
        let response = ToolResponse::json("Event Details", &json!({ "uri": "x" })).unwrap();
        assert_eq!(response.content.len(), 1);
        assert_eq!(
            response.content[0].text,
            "Event Details:\n{\n  \"uri\": \"x\"\n}"
        );
    }
}
