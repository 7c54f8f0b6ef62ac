use serde::{Deserialize, Serialize};

/// Status filter shared by events and invitees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Canceled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Active => "active",
            EventStatus::Canceled => "canceled",
        }
    }
}

/// Query pairs in a fixed order, only for values that are present
#[derive(Debug, Default)]
pub struct Query(Vec<(&'static str, String)>);

impl Query {
    pub fn push(mut self, key: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
        self
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// Filters for `GET /scheduled_events`
#[derive(Debug, Clone, Default)]
pub struct ListEventsParams {
    pub user_uri: Option<String>,
    pub organization_uri: Option<String>,
    pub status: Option<EventStatus>,
    pub min_start_time: Option<String>,
    pub max_start_time: Option<String>,
    pub count: Option<u32>,
}

impl ListEventsParams {
    pub fn query(&self) -> Query {
        Query::default()
            .push("user", self.user_uri.as_ref())
            .push("organization", self.organization_uri.as_ref())
            .push("status", self.status.map(|s| s.as_str()))
            .push("min_start_time", self.min_start_time.as_ref())
            .push("max_start_time", self.max_start_time.as_ref())
            .push("count", self.count)
    }
}

/// Filters for `GET /scheduled_events/{uuid}/invitees`
#[derive(Debug, Clone, Default)]
pub struct ListEventInviteesParams {
    pub event_uuid: String,
    pub status: Option<EventStatus>,
    pub email: Option<String>,
    pub count: Option<u32>,
}

impl ListEventInviteesParams {
    pub fn query(&self) -> Query {
        Query::default()
            .push("status", self.status.map(|s| s.as_str()))
            .push("email", self.email.as_ref())
            .push("count", self.count)
    }
}

/// Filters for `GET /organization_memberships`
#[derive(Debug, Clone, Default)]
pub struct ListOrganizationMembershipsParams {
    pub user_uri: Option<String>,
    pub organization_uri: Option<String>,
    pub email: Option<String>,
    pub count: Option<u32>,
}

impl ListOrganizationMembershipsParams {
    pub fn query(&self) -> Query {
        Query::default()
            .push("user", self.user_uri.as_ref())
            .push("organization", self.organization_uri.as_ref())
            .push("email", self.email.as_ref())
            .push("count", self.count)
    }
}

/// Filters for `GET /event_types`
#[derive(Debug, Clone, Default)]
pub struct ListEventTypesParams {
    pub user_uri: Option<String>,
    pub organization_uri: Option<String>,
    pub count: Option<u32>,
}

impl ListEventTypesParams {
    pub fn query(&self) -> Query {
        Query::default()
            .push("user", self.user_uri.as_ref())
            .push("organization", self.organization_uri.as_ref())
            .push("count", self.count)
    }
}

/// Window for `GET /event_type_available_times`
#[derive(Debug, Clone, Default)]
pub struct EventTypeAvailabilityParams {
    pub event_type: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl EventTypeAvailabilityParams {
    pub fn query(&self) -> Query {
        Query::default()
            .push("event_type", Some(&self.event_type))
            .push("start_time", self.start_time.as_ref())
            .push("end_time", self.end_time.as_ref())
    }
}

/// How the invitee is named. Calendly accepts either form, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteeName {
    Full(String),
    Split {
        first_name: Option<String>,
        last_name: Option<String>,
    },
}

/// Invitee block of a schedule request
#[derive(Debug, Clone, Serialize)]
pub struct Invitee {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    email: String,
    timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_reminder_number: Option<String>,
}

impl Invitee {
    pub fn new(email: String, timezone: String, name: Option<InviteeName>) -> Self {
        let (name, first_name, last_name) = match name {
            Some(InviteeName::Full(name)) => (Some(name), None, None),
            Some(InviteeName::Split {
                first_name,
                last_name,
            }) => (None, first_name, last_name),
            None => (None, None, None),
        };
        Self {
            name,
            first_name,
            last_name,
            email,
            timezone,
            text_reminder_number: None,
        }
    }

    pub fn with_text_reminder_number(mut self, number: Option<String>) -> Self {
        self.text_reminder_number = number;
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }
}

/// Where the meeting takes place
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Answer to an event type's custom question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
    pub position: i64,
}

/// UTM attribution. Absent fields serialize as `null`, never omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tracking {
    pub utm_campaign: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub salesforce_uuid: Option<String>,
}

/// Body of `POST /invitees`
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEventRequest {
    pub event_type: String,
    pub start_time: String,
    pub invitee: Invitee,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_guests: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub questions_and_answers: Vec<QuestionAnswer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<Tracking>,
}

/// Raw token response from the OAuth token endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub created_at: i64,
    pub scope: String,
    pub owner: String,
    pub organization: String,
}
