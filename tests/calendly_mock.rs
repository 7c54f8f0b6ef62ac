use async_trait::async_trait;
use calendly_mcp::client::models::{
    EventStatus, EventTypeAvailabilityParams, ListEventInviteesParams, ListEventTypesParams,
    ListEventsParams, ListOrganizationMembershipsParams, OAuthTokenResponse, ScheduleEventRequest,
};
use calendly_mcp::client::CalendlyApi;
use calendly_mcp::config::Config;
use calendly_mcp::dispatcher::Dispatcher;
use calendly_mcp::error::{Error, Result};
use calendly_mcp::tools::ToolName;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

/// Mock implementation of the Calendly client for testing
#[derive(Default)]
pub struct MockCalendly {
    calls: Mutex<Vec<&'static str>>,
    list_events_params: Mutex<Option<ListEventsParams>>,
    schedule_body: Mutex<Option<Value>>,
    failure: Option<(u16, String)>,
}

impl MockCalendly {
    /// Create a mock that answers every call successfully
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that rejects every call with the given status
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            failure: Some((status, body.to_string())),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str, response: Value) -> Result<Value> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some((status, body)) => Err(Error::Api {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(response),
        }
    }

    fn tokens(&self, call: &'static str) -> Result<OAuthTokenResponse> {
        self.record(call, Value::Null)?;
        Ok(OAuthTokenResponse {
            access_token: "new-access".to_string(),
            refresh_token: "new-refresh".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 7200,
            created_at: 1735689600,
            scope: "default".to_string(),
            owner: "https://api.calendly.com/users/ME".to_string(),
            organization: "https://api.calendly.com/organizations/ORG".to_string(),
        })
    }
}

fn empty_collection() -> Value {
    json!({ "collection": [], "pagination": { "count": 0, "next_page": null } })
}

#[async_trait]
impl CalendlyApi for MockCalendly {
    async fn get_current_user(&self) -> Result<Value> {
        self.record(
            "get_current_user",
            json!({ "resource": { "uri": "https://api.calendly.com/users/ME", "name": "Ada" } }),
        )
    }

    async fn list_events(&self, params: ListEventsParams) -> Result<Value> {
        *self.list_events_params.lock().unwrap() = Some(params);
        self.record("list_events", empty_collection())
    }

    async fn get_event(&self, event_uuid: &str) -> Result<Value> {
        self.record("get_event", json!({ "resource": { "uri": event_uuid } }))
    }

    async fn cancel_event(&self, _event_uuid: &str, reason: Option<&str>) -> Result<Value> {
        self.record(
            "cancel_event",
            json!({ "resource": { "canceler_type": "host", "reason": reason } }),
        )
    }

    async fn list_event_invitees(&self, _params: ListEventInviteesParams) -> Result<Value> {
        self.record("list_event_invitees", empty_collection())
    }

    async fn list_organization_memberships(
        &self,
        _params: ListOrganizationMembershipsParams,
    ) -> Result<Value> {
        self.record("list_organization_memberships", empty_collection())
    }

    async fn list_event_types(&self, _params: ListEventTypesParams) -> Result<Value> {
        self.record("list_event_types", empty_collection())
    }

    async fn get_event_type_availability(
        &self,
        _params: EventTypeAvailabilityParams,
    ) -> Result<Value> {
        self.record(
            "get_event_type_availability",
            json!({
                "collection": [
                    { "status": "available", "start_time": "2025-01-02T09:00:00Z" },
                    { "status": "available", "start_time": "2025-01-01T15:00:00Z" }
                ]
            }),
        )
    }

    async fn schedule_event(&self, request: ScheduleEventRequest) -> Result<Value> {
        *self.schedule_body.lock().unwrap() = Some(serde_json::to_value(&request)?);
        self.record(
            "schedule_event",
            json!({
                "resource": {
                    "name": "Ada Lovelace",
                    "email": "ada@example.com",
                    "status": "active",
                    "cancel_url": "https://calendly.com/cancellations/INV1",
                    "reschedule_url": "https://calendly.com/reschedulings/INV1"
                }
            }),
        )
    }

    fn oauth_url(&self, redirect_uri: &str, state: Option<&str>) -> Result<String> {
        self.calls.lock().unwrap().push("oauth_url");
        Ok(format!(
            "https://auth.calendly.com/oauth/authorize?redirect_uri={}&state={}",
            redirect_uri,
            state.unwrap_or("")
        ))
    }

    async fn exchange_code_for_tokens(
        &self,
        _code: &str,
        _redirect_uri: &str,
    ) -> Result<OAuthTokenResponse> {
        self.tokens("exchange_code_for_tokens")
    }

    async fn refresh_access_token(&self, _refresh_token: &str) -> Result<OAuthTokenResponse> {
        self.tokens("refresh_access_token")
    }
}

fn dispatcher_with(mock: Arc<MockCalendly>) -> Dispatcher {
    Dispatcher::new(mock, Arc::new(Config::default()))
}

fn object(value: Value) -> Option<Map<String, Value>> {
    value.as_object().cloned()
}

/// Minimal valid arguments for each tool
fn sample_arguments(tool: ToolName) -> Option<Map<String, Value>> {
    match tool {
        ToolName::GetOAuthUrl => object(json!({ "redirect_uri": "https://app.test/cb" })),
        ToolName::ExchangeCodeForTokens => object(json!({
            "code": "abc",
            "redirect_uri": "https://app.test/cb"
        })),
        ToolName::RefreshAccessToken => object(json!({ "refresh_token": "old-refresh" })),
        ToolName::GetEvent | ToolName::CancelEvent | ToolName::ListEventInvitees => {
            object(json!({ "event_uuid": "EV1" }))
        }
        ToolName::GetEventTypeAvailability => object(json!({
            "event_type": "https://api.calendly.com/event_types/ET1"
        })),
        ToolName::ScheduleEvent => object(json!({
            "event_type": "https://api.calendly.com/event_types/ET1",
            "start_time": "2025-01-02T09:00:00Z",
            "invitee_email": "ada@example.com",
            "invitee_timezone": "UTC"
        })),
        ToolName::GetCurrentUser
        | ToolName::ListEvents
        | ToolName::ListOrganizationMemberships
        | ToolName::ListEventTypes => None,
    }
}

/// Every tool answers with exactly one non-empty text block
#[tokio::test]
async fn test_every_tool_returns_one_text_block() {
    let mock = Arc::new(MockCalendly::new());
    let dispatcher = dispatcher_with(mock.clone());

    for tool in ToolName::ALL {
        let response = dispatcher
            .call(tool.as_str(), sample_arguments(tool))
            .await
            .unwrap_or_else(|e| panic!("{} failed: {}", tool, e));
        assert_eq!(response.content.len(), 1, "{}", tool);
        assert!(!response.content[0].text.is_empty(), "{}", tool);
    }

    assert_eq!(mock.calls().len(), ToolName::ALL.len());
}

/// Unknown tools fail before any client call
#[tokio::test]
async fn test_unknown_tool_touches_no_client() {
    let mock = Arc::new(MockCalendly::new());
    let dispatcher = dispatcher_with(mock.clone());

    let err = dispatcher.call("frobnicate", None).await.unwrap_err();
    assert!(matches!(err, Error::UnknownTool(ref name) if name == "frobnicate"));
    assert!(mock.calls().is_empty());
}

/// Missing required arguments are rejected before any client call
#[tokio::test]
async fn test_missing_argument_is_invalid() {
    let mock = Arc::new(MockCalendly::new());
    let dispatcher = dispatcher_with(mock.clone());

    let err = dispatcher.call("get_event", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArguments { tool: "get_event", .. }));
    assert!(mock.calls().is_empty());
}

/// Scheduling failures come back as a normal result
#[tokio::test]
async fn test_schedule_failure_is_a_normal_result() {
    let mock = Arc::new(MockCalendly::failing(422, "{\"title\":\"Invalid Argument\"}"));
    let dispatcher = dispatcher_with(mock.clone());

    let response = dispatcher
        .call("schedule_event", sample_arguments(ToolName::ScheduleEvent))
        .await
        .unwrap();

    let text = &response.content[0].text;
    assert!(text.contains("Failed to schedule meeting"));
    assert!(text.contains("422"));
    assert!(text.contains("Invalid Argument"));
}

/// Other handlers propagate upstream failures
#[tokio::test]
async fn test_api_failure_propagates() {
    let mock = Arc::new(MockCalendly::failing(401, "Unauthenticated"));
    let dispatcher = dispatcher_with(mock.clone());

    let err = dispatcher.call("get_current_user", None).await.unwrap_err();
    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthenticated");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// list_events passes only the filters that were given
#[tokio::test]
async fn test_list_events_forwards_filters() {
    let mock = Arc::new(MockCalendly::new());
    let dispatcher = dispatcher_with(mock.clone());

    dispatcher
        .call("list_events", object(json!({ "status": "active", "count": 5 })))
        .await
        .unwrap();

    let params = mock.list_events_params.lock().unwrap().clone().unwrap();
    assert_eq!(params.status, Some(EventStatus::Active));
    assert_eq!(params.count, Some(5));
    assert!(params.user_uri.is_none());
    assert!(params.organization_uri.is_none());
    assert!(params.min_start_time.is_none());
    assert!(params.max_start_time.is_none());

    let pairs: Vec<String> = params
        .query()
        .pairs()
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    assert_eq!(pairs.join("&"), "status=active&count=5");
}

/// The full name is sent alone when both name forms are supplied
#[tokio::test]
async fn test_schedule_sends_single_name_form() {
    let mock = Arc::new(MockCalendly::new());
    let dispatcher = dispatcher_with(mock.clone());

    let mut arguments = sample_arguments(ToolName::ScheduleEvent).unwrap();
    arguments.insert("invitee_name".to_string(), json!("Ada Lovelace"));
    arguments.insert("invitee_first_name".to_string(), json!("Ada"));

    let response = dispatcher
        .call("schedule_event", Some(arguments))
        .await
        .unwrap();
    assert!(response.content[0]
        .text
        .starts_with("Meeting scheduled successfully."));

    let body = mock.schedule_body.lock().unwrap().clone().unwrap();
    let invitee = body["invitee"].as_object().unwrap();
    assert_eq!(invitee["name"], "Ada Lovelace");
    assert!(!invitee.contains_key("first_name"));
    assert!(!invitee.contains_key("last_name"));
}

/// Availability groups are listed in ascending date order
#[tokio::test]
async fn test_availability_is_sorted_by_date() {
    let mock = Arc::new(MockCalendly::new());
    let dispatcher = dispatcher_with(mock);

    let response = dispatcher
        .call(
            "get_event_type_availability",
            sample_arguments(ToolName::GetEventTypeAvailability),
        )
        .await
        .unwrap();

    let text = &response.content[0].text;
    let jan_1 = text.find("January 1, 2025").unwrap();
    let jan_2 = text.find("January 2, 2025").unwrap();
    assert!(jan_1 < jan_2);
}

/// A whole-number float count passes the boundary and is forwarded as an integer
#[tokio::test]
async fn test_whole_float_count_is_forwarded() {
    let mock = Arc::new(MockCalendly::new());
    let dispatcher = dispatcher_with(mock.clone());

    dispatcher
        .call("list_events", object(json!({ "count": 5.0 })))
        .await
        .unwrap();

    let params = mock.list_events_params.lock().unwrap().clone().unwrap();
    assert_eq!(params.count, Some(5));
}

/// A fractional count is an argument error, not an upstream call
#[tokio::test]
async fn test_fractional_count_is_invalid() {
    let mock = Arc::new(MockCalendly::new());
    let dispatcher = dispatcher_with(mock.clone());

    let err = dispatcher
        .call("list_event_types", object(json!({ "count": 2.5 })))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArguments { tool: "list_event_types", .. }));
    assert!(mock.calls().is_empty());
}
