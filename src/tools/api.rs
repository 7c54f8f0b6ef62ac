//! Read and cancel tools. Each one forwards to a single client call and
//! returns the raw Calendly document pretty-printed under a title line.

use super::ToolResponse;
use crate::client::models::{
    EventStatus, ListEventInviteesParams, ListEventsParams, ListOrganizationMembershipsParams,
};
use crate::client::CalendlyApi;
use crate::config::Config;
use crate::error::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// Default page size when the caller gives no `count`
pub const DEFAULT_COUNT: u32 = 20;

pub(crate) fn default_count() -> u32 {
    DEFAULT_COUNT
}

/// Accept any JSON number with no fractional part, so `5` and `5.0` both page by five
pub(crate) fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|n| *n >= 0.0 && n.fract() == 0.0)
                .map(|n| n as u64)
        })
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| D::Error::custom(format!("count must be a whole number, got {}", number)))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListEventsArgs {
    pub user_uri: Option<String>,
    pub organization_uri: Option<String>,
    pub status: Option<EventStatus>,
    pub min_start_time: Option<String>,
    pub max_start_time: Option<String>,
    #[serde(default = "default_count", deserialize_with = "deserialize_count")]
    pub count: u32,
}

impl ListEventsArgs {
    /// Client filter, falling back to the configured owner when neither is given
    pub fn into_params(self, config: &Config) -> ListEventsParams {
        let (user_uri, organization_uri) =
            with_default_owner(self.user_uri, self.organization_uri, config);
        ListEventsParams {
            user_uri,
            organization_uri,
            status: self.status,
            min_start_time: self.min_start_time,
            max_start_time: self.max_start_time,
            count: Some(self.count),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventArgs {
    pub event_uuid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelEventArgs {
    pub event_uuid: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListEventInviteesArgs {
    pub event_uuid: String,
    pub status: Option<EventStatus>,
    pub email: Option<String>,
    #[serde(default = "default_count", deserialize_with = "deserialize_count")]
    pub count: u32,
}

impl From<ListEventInviteesArgs> for ListEventInviteesParams {
    fn from(args: ListEventInviteesArgs) -> Self {
        ListEventInviteesParams {
            event_uuid: args.event_uuid,
            status: args.status,
            email: args.email,
            count: Some(args.count),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListOrganizationMembershipsArgs {
    pub user_uri: Option<String>,
    pub organization_uri: Option<String>,
    pub email: Option<String>,
    #[serde(default = "default_count", deserialize_with = "deserialize_count")]
    pub count: u32,
}

impl From<ListOrganizationMembershipsArgs> for ListOrganizationMembershipsParams {
    fn from(args: ListOrganizationMembershipsArgs) -> Self {
        ListOrganizationMembershipsParams {
            user_uri: args.user_uri,
            organization_uri: args.organization_uri,
            email: args.email,
            count: Some(args.count),
        }
    }
}

/// Use the configured user/organization URIs only when the caller named neither
pub(crate) fn with_default_owner(
    user_uri: Option<String>,
    organization_uri: Option<String>,
    config: &Config,
) -> (Option<String>, Option<String>) {
    if user_uri.is_none() && organization_uri.is_none() {
        (config.user_uri.clone(), config.organization_uri.clone())
    } else {
        (user_uri, organization_uri)
    }
}

pub async fn get_current_user(client: &dyn CalendlyApi) -> Result<ToolResponse> {
    let data = client.get_current_user().await?;
    ToolResponse::json("Current User Information", &data)
}

pub async fn list_events(
    client: &dyn CalendlyApi,
    config: &Config,
    args: ListEventsArgs,
) -> Result<ToolResponse> {
    let data = client.list_events(args.into_params(config)).await?;
    ToolResponse::json("Scheduled Events", &data)
}

pub async fn get_event(client: &dyn CalendlyApi, args: EventArgs) -> Result<ToolResponse> {
    let data = client.get_event(&args.event_uuid).await?;
    ToolResponse::json("Event Details", &data)
}

pub async fn list_event_invitees(
    client: &dyn CalendlyApi,
    args: ListEventInviteesArgs,
) -> Result<ToolResponse> {
    let data = client.list_event_invitees(args.into()).await?;
    ToolResponse::json("Event Invitees", &data)
}

pub async fn cancel_event(
    client: &dyn CalendlyApi,
    args: CancelEventArgs,
) -> Result<ToolResponse> {
    let data = client
        .cancel_event(&args.event_uuid, args.reason.as_deref())
        .await?;
    ToolResponse::json("Event Canceled", &data)
}

pub async fn list_organization_memberships(
    client: &dyn CalendlyApi,
    args: ListOrganizationMembershipsArgs,
) -> Result<ToolResponse> {
    let data = client.list_organization_memberships(args.into()).await?;
    ToolResponse::json("Organization Memberships", &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_events_args_default_count() {
        let args: ListEventsArgs = serde_json::from_value(json!({ "status": "active" })).unwrap();
        assert_eq!(args.count, DEFAULT_COUNT);
        assert_eq!(args.status, Some(EventStatus::Active));
    }

    #[test]
    fn whole_float_count_is_accepted() {
        let args: ListEventInviteesArgs =
            serde_json::from_value(json!({ "event_uuid": "EV1", "count": 5.0 })).unwrap();
        assert_eq!(args.count, 5);
    }

    #[test]
    fn fractional_or_negative_count_is_rejected() {
        for count in [json!(2.5), json!(-1)] {
            let result = serde_json::from_value::<ListEventsArgs>(json!({ "count": count }));
            assert!(result.is_err(), "{} should be rejected", count);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_value::<ListEventsArgs>(json!({ "status": "pending" }));
        assert!(result.is_err());
    }

    #[test]
    fn configured_owner_fills_in_missing_filter() {
        let config = Config {
            user_uri: Some("https://api.calendly.com/users/ME".to_string()),
            ..Default::default()
        };
        let args: ListEventsArgs = serde_json::from_value(json!({})).unwrap();
        let params = args.into_params(&config);
        assert_eq!(
            params.user_uri.as_deref(),
            Some("https://api.calendly.com/users/ME")
        );
    }

    #[test]
    fn explicit_organization_suppresses_configured_user() {
        let config = Config {
            user_uri: Some("https://api.calendly.com/users/ME".to_string()),
            ..Default::default()
        };
        let args: ListEventsArgs = serde_json::from_value(json!({
            "organization_uri": "https://api.calendly.com/organizations/ORG"
        }))
        .unwrap();
        let params = args.into_params(&config);
        assert!(params.user_uri.is_none());
        assert!(params.organization_uri.is_some());
    }
}
