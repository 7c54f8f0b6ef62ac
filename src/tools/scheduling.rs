//! Scheduling tools: event types, open slots, and booking.
//!
//! These render summaries instead of raw JSON. `schedule_event` is the one
//! handler that never fails the call: booking errors (slot taken, validation)
//! come back as a normal text result.

use super::api::{default_count, deserialize_count, with_default_owner};
use super::ToolResponse;
use crate::client::models::{
    EventTypeAvailabilityParams, Invitee, InviteeName, ListEventTypesParams, Location,
    QuestionAnswer, ScheduleEventRequest, Tracking,
};
use crate::client::CalendlyApi;
use crate::config::Config;
use crate::error::Result;
use crate::utils::time::{format_in_timezone, group_by_date, long_date};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct ListEventTypesArgs {
    pub user: Option<String>,
    pub organization: Option<String>,
    #[serde(default = "default_count", deserialize_with = "deserialize_count")]
    pub count: u32,
}

impl ListEventTypesArgs {
    pub fn into_params(self, config: &Config) -> ListEventTypesParams {
        let (user_uri, organization_uri) = with_default_owner(self.user, self.organization, config);
        ListEventTypesParams {
            user_uri,
            organization_uri,
            count: Some(self.count),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityArgs {
    pub event_type: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl From<AvailabilityArgs> for EventTypeAvailabilityParams {
    fn from(args: AvailabilityArgs) -> Self {
        EventTypeAvailabilityParams {
            event_type: args.event_type,
            start_time: args.start_time,
            end_time: args.end_time,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleEventArgs {
    pub event_type: String,
    pub start_time: String,
    pub invitee_email: String,
    pub invitee_timezone: String,
    pub invitee_name: Option<String>,
    pub invitee_first_name: Option<String>,
    pub invitee_last_name: Option<String>,
    pub invitee_phone: Option<String>,
    pub location_kind: Option<String>,
    pub location_details: Option<String>,
    #[serde(default)]
    pub event_guests: Vec<String>,
    #[serde(default)]
    pub questions_and_answers: Vec<QuestionAnswer>,
    pub utm_source: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_medium: Option<String>,
}

impl ScheduleEventArgs {
    /// The full name wins; first/last are only used without it. Blank strings count as absent.
    fn invitee_name(&self) -> Option<InviteeName> {
        match (
            non_blank(&self.invitee_name),
            non_blank(&self.invitee_first_name),
            non_blank(&self.invitee_last_name),
        ) {
            (Some(name), _, _) => Some(InviteeName::Full(name)),
            (None, None, None) => None,
            (None, first_name, last_name) => Some(InviteeName::Split {
                first_name,
                last_name,
            }),
        }
    }

    fn tracking(&self) -> Option<Tracking> {
        let utm_source = non_blank(&self.utm_source);
        let utm_campaign = non_blank(&self.utm_campaign);
        let utm_medium = non_blank(&self.utm_medium);
        if utm_source.is_none() && utm_campaign.is_none() && utm_medium.is_none() {
            return None;
        }
        Some(Tracking {
            utm_campaign,
            utm_source,
            utm_medium,
            ..Default::default()
        })
    }

    /// Normalize the flat tool arguments into the request body shape
    pub fn to_request(&self) -> ScheduleEventRequest {
        let invitee = Invitee::new(
            self.invitee_email.clone(),
            self.invitee_timezone.clone(),
            self.invitee_name(),
        )
        .with_text_reminder_number(self.invitee_phone.clone());

        let location = self.location_kind.as_ref().map(|kind| Location {
            kind: kind.clone(),
            location: self.location_details.clone(),
        });

        ScheduleEventRequest {
            event_type: self.event_type.clone(),
            start_time: self.start_time.clone(),
            invitee,
            location,
            event_guests: self.event_guests.clone(),
            questions_and_answers: self.questions_and_answers.clone(),
            tracking: self.tracking(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

fn collection(data: &Value) -> &[Value] {
    data.get("collection")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub async fn list_event_types(
    client: &dyn CalendlyApi,
    config: &Config,
    args: ListEventTypesArgs,
) -> Result<ToolResponse> {
    let data = client.list_event_types(args.into_params(config)).await?;
    Ok(ToolResponse::text(format_event_types(collection(&data))))
}

/// Numbered summary of event types
pub fn format_event_types(event_types: &[Value]) -> String {
    if event_types.is_empty() {
        return "Available Event Types (0 found):\n\nNo event types found.".to_string();
    }

    let entries: Vec<String> = event_types
        .iter()
        .enumerate()
        .map(|(index, event_type)| {
            let duration = event_type
                .get("duration")
                .and_then(Value::as_i64)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "?".to_string());
            let active = event_type
                .get("active")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let description = event_type
                .get("description_plain")
                .and_then(Value::as_str)
                .or_else(|| event_type.get("description_html").and_then(Value::as_str))
                .filter(|d| !d.is_empty());

            let mut entry = format!(
                "{}. {} ({} minutes)\n   - URI: {}\n   - Type: {}\n   - Status: {}\n   - Scheduling URL: {}",
                index + 1,
                str_field(event_type, "name"),
                duration,
                str_field(event_type, "uri"),
                str_field(event_type, "kind"),
                if active { "Active" } else { "Inactive" },
                str_field(event_type, "scheduling_url"),
            );
            if let Some(description) = description {
                entry.push_str(&format!("\n   - Description: {}", description));
            }
            entry
        })
        .collect();

    format!(
        "Available Event Types ({} found):\n\n{}",
        event_types.len(),
        entries.join("\n\n")
    )
}

pub async fn get_event_type_availability(
    client: &dyn CalendlyApi,
    args: AvailabilityArgs,
) -> Result<ToolResponse> {
    let data = client.get_event_type_availability(args.into()).await?;
    Ok(ToolResponse::text(format_availability(collection(&data))))
}

/// Slots grouped by date, earliest date first
pub fn format_availability(slots: &[Value]) -> String {
    let groups = group_by_date(slots.iter().map(|slot| str_field(slot, "start_time")));
    let body = if groups.is_empty() {
        "No available time slots found.".to_string()
    } else {
        groups
            .iter()
            .map(|group| {
                let times: Vec<String> = group.times.iter().map(|t| format!("  - {}", t)).collect();
                format!("{}:\n{}", long_date(group.date), times.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    format!(
        "Available Time Slots for Event Type:\n\n{}\n\nTotal slots: {}",
        body,
        slots.len()
    )
}

pub async fn schedule_event(client: &dyn CalendlyApi, args: ScheduleEventArgs) -> ToolResponse {
    match client.schedule_event(args.to_request()).await {
        Ok(result) => ToolResponse::text(format_scheduled(&args, &result)),
        Err(e) => {
            warn!("Failed to schedule meeting for {}: {}", args.invitee_email, e);
            ToolResponse::text(format!("Failed to schedule meeting.\n\nError: {}", e))
        }
    }
}

fn format_scheduled(args: &ScheduleEventArgs, result: &Value) -> String {
    let invitee = result.get("resource").unwrap_or(&Value::Null);
    let time = format_in_timezone(&args.start_time, &args.invitee_timezone)
        .unwrap_or_else(|| args.start_time.clone());

    format!(
        "Meeting scheduled successfully.\n\nInvitee: {} ({})\nTime: {}\nStatus: {}\n\nCancel: {}\nReschedule: {}",
        str_field(invitee, "name"),
        str_field(invitee, "email"),
        time,
        str_field(invitee, "status"),
        str_field(invitee, "cancel_url"),
        str_field(invitee, "reschedule_url"),
    )
}
