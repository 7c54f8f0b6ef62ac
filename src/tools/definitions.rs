use super::ToolName;
use serde::Serialize;
use serde_json::{json, Value};

/// Tool metadata advertised to MCP clients
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Definitions for every tool, in `ToolName::ALL` order
pub fn definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.iter().map(|tool| tool.definition()).collect()
}

fn count_property(what: &str) -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "maximum": 100,
        "description": format!("Number of {} to return (default 20, max 100)", what),
    })
}

fn status_property(what: &str) -> Value {
    json!({
        "type": "string",
        "enum": ["active", "canceled"],
        "description": format!("Filter {} by status", what),
    })
}

impl ToolName {
    /// Name, description and input schema of this tool
    pub fn definition(&self) -> ToolDefinition {
        let (description, input_schema) = match self {
            ToolName::GetOAuthUrl => (
                "Generate OAuth authorization URL for user authentication",
                json!({
                    "type": "object",
                    "properties": {
                        "redirect_uri": {
                            "type": "string",
                            "description": "The redirect URI for your OAuth application"
                        },
                        "state": {
                            "type": "string",
                            "description": "Optional state parameter for security"
                        }
                    },
                    "required": ["redirect_uri"]
                }),
            ),
            ToolName::ExchangeCodeForTokens => (
                "Exchange authorization code for access and refresh tokens",
                json!({
                    "type": "object",
                    "properties": {
                        "code": {
                            "type": "string",
                            "description": "The authorization code from OAuth callback"
                        },
                        "redirect_uri": {
                            "type": "string",
                            "description": "The redirect URI used in authorization"
                        }
                    },
                    "required": ["code", "redirect_uri"]
                }),
            ),
            ToolName::RefreshAccessToken => (
                "Refresh access token using refresh token",
                json!({
                    "type": "object",
                    "properties": {
                        "refresh_token": {
                            "type": "string",
                            "description": "The refresh token to use"
                        }
                    },
                    "required": ["refresh_token"]
                }),
            ),
            ToolName::GetCurrentUser => (
                "Get the current authenticated user information",
                json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            ),
            ToolName::ListEvents => (
                "List scheduled events for the authenticated user",
                json!({
                    "type": "object",
                    "properties": {
                        "user_uri": {
                            "type": "string",
                            "description": "URI of the user whose events to list"
                        },
                        "organization_uri": {
                            "type": "string",
                            "description": "URI of the organization to filter events"
                        },
                        "status": status_property("events"),
                        "max_start_time": {
                            "type": "string",
                            "description": "Maximum start time for events (ISO 8601 format)"
                        },
                        "min_start_time": {
                            "type": "string",
                            "description": "Minimum start time for events (ISO 8601 format)"
                        },
                        "count": count_property("events")
                    },
                    "required": []
                }),
            ),
            ToolName::GetEvent => (
                "Get details of a specific event",
                json!({
                    "type": "object",
                    "properties": {
                        "event_uuid": {
                            "type": "string",
                            "description": "UUID of the event to retrieve"
                        }
                    },
                    "required": ["event_uuid"]
                }),
            ),
            ToolName::ListEventInvitees => (
                "List invitees for a specific event",
                json!({
                    "type": "object",
                    "properties": {
                        "event_uuid": {
                            "type": "string",
                            "description": "UUID of the event"
                        },
                        "status": status_property("invitees"),
                        "email": {
                            "type": "string",
                            "description": "Filter invitees by email"
                        },
                        "count": count_property("invitees")
                    },
                    "required": ["event_uuid"]
                }),
            ),
            ToolName::CancelEvent => (
                "Cancel a specific event",
                json!({
                    "type": "object",
                    "properties": {
                        "event_uuid": {
                            "type": "string",
                            "description": "UUID of the event to cancel"
                        },
                        "reason": {
                            "type": "string",
                            "description": "Reason for cancellation"
                        }
                    },
                    "required": ["event_uuid"]
                }),
            ),
            ToolName::ListOrganizationMemberships => (
                "List organization memberships for the authenticated user",
                json!({
                    "type": "object",
                    "properties": {
                        "user_uri": {
                            "type": "string",
                            "description": "URI of the user"
                        },
                        "organization_uri": {
                            "type": "string",
                            "description": "URI of the organization"
                        },
                        "email": {
                            "type": "string",
                            "description": "Filter by email"
                        },
                        "count": count_property("memberships")
                    },
                    "required": []
                }),
            ),
            ToolName::ListEventTypes => (
                "List event types (meeting templates) available for scheduling",
                json!({
                    "type": "object",
                    "properties": {
                        "user": {
                            "type": "string",
                            "description": "URI of the user whose event types to list"
                        },
                        "organization": {
                            "type": "string",
                            "description": "URI of the organization whose event types to list"
                        },
                        "count": count_property("event types")
                    },
                    "required": []
                }),
            ),
            ToolName::GetEventTypeAvailability => (
                "Get available time slots for an event type",
                json!({
                    "type": "object",
                    "properties": {
                        "event_type": {
                            "type": "string",
                            "description": "URI of the event type"
                        },
                        "start_time": {
                            "type": "string",
                            "description": "Start of the availability window (ISO 8601 format)"
                        },
                        "end_time": {
                            "type": "string",
                            "description": "End of the availability window (ISO 8601 format)"
                        }
                    },
                    "required": ["event_type"]
                }),
            ),
            ToolName::ScheduleEvent => (
                "Schedule a meeting by booking an invitee onto an event type slot",
                json!({
                    "type": "object",
                    "properties": {
                        "event_type": {
                            "type": "string",
                            "description": "URI of the event type to book"
                        },
                        "start_time": {
                            "type": "string",
                            "description": "Start time of the slot (ISO 8601 format)"
                        },
                        "invitee_email": {
                            "type": "string",
                            "description": "Email address of the invitee"
                        },
                        "invitee_timezone": {
                            "type": "string",
                            "description": "IANA timezone of the invitee (e.g. 'Europe/London')"
                        },
                        "invitee_name": {
                            "type": "string",
                            "description": "Full name of the invitee"
                        },
                        "invitee_first_name": {
                            "type": "string",
                            "description": "First name of the invitee (ignored when invitee_name is set)"
                        },
                        "invitee_last_name": {
                            "type": "string",
                            "description": "Last name of the invitee (ignored when invitee_name is set)"
                        },
                        "invitee_phone": {
                            "type": "string",
                            "description": "Phone number for SMS reminders"
                        },
                        "location_kind": {
                            "type": "string",
                            "description": "Kind of meeting location (e.g. 'zoom_conference', 'physical')"
                        },
                        "location_details": {
                            "type": "string",
                            "description": "Location details such as an address or phone number"
                        },
                        "event_guests": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Additional guest email addresses"
                        },
                        "questions_and_answers": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "question": { "type": "string" },
                                    "answer": { "type": "string" },
                                    "position": { "type": "integer" }
                                },
                                "required": ["question", "answer", "position"]
                            },
                            "description": "Answers to the event type's custom questions"
                        },
                        "utm_source": {
                            "type": "string",
                            "description": "UTM source for tracking"
                        },
                        "utm_campaign": {
                            "type": "string",
                            "description": "UTM campaign for tracking"
                        },
                        "utm_medium": {
                            "type": "string",
                            "description": "UTM medium for tracking"
                        }
                    },
                    "required": ["event_type", "start_time", "invitee_email", "invitee_timezone"]
                }),
            ),
        };

        ToolDefinition {
            name: self.as_str(),
            description,
            input_schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_is_an_object_with_known_required_fields() {
        for definition in definitions() {
            let schema = &definition.input_schema;
            assert_eq!(schema["type"], "object", "{}", definition.name);
            let properties = schema["properties"].as_object().unwrap();
            for required in schema["required"].as_array().unwrap() {
                let key = required.as_str().unwrap();
                assert!(
                    properties.contains_key(key),
                    "{} requires undeclared property {}",
                    definition.name,
                    key
                );
            }
        }
    }
}
