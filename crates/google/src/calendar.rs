//! Google Calendar: create an event on the user's calendar.
//!
//! Calls are made with the end user's OAuth access token, not a server key.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::GoogleApiError;
use crate::parse_response;

/// Calendar used when the caller does not name one.
pub const PRIMARY_CALENDAR: &str = "primary";

pub struct CalendarClient {
    client: reqwest::Client,
    base_url: String,
}

/// Start or end of an event: an all-day date or a local date-time in a
/// named time zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventTime {
    Date {
        date: NaiveDate,
    },
    DateTime {
        #[serde(rename = "dateTime")]
        date_time: NaiveDateTime,
        #[serde(rename = "timeZone")]
        time_zone: String,
    },
}

/// Request body for `POST /calendars/{id}/events`.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CreatedEvent {
    pub id: String,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
}

impl CalendarClient {
    /// * `base_url` - e.g. `https://www.googleapis.com/calendar/v3`.
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Insert `event` into `calendar_id` (defaults to the primary calendar).
    pub async fn create_event(
        &self,
        access_token: &str,
        calendar_id: Option<&str>,
        event: &CalendarEvent,
    ) -> Result<CreatedEvent, GoogleApiError> {
        let calendar_id = calendar_id.unwrap_or(PRIMARY_CALENDAR);
        let response = self
            .client
            .post(self.events_url(calendar_id)?)
            .bearer_auth(access_token)
            .json(event)
            .send()
            .await?;

        let created: CreatedEvent = parse_response(response).await?;
        tracing::debug!(event_id = %created.id, calendar_id, "Calendar event created");
        Ok(created)
    }

    /// `{base}/calendars/{calendar_id}/events` with the id as one
    /// percent-encoded path segment. Ids such as holiday calendars contain `#`.
    fn events_url(&self, calendar_id: &str) -> Result<reqwest::Url, GoogleApiError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| GoogleApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| GoogleApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["calendars", calendar_id, "events"]);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveTime;
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn may_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
    }

    #[test]
    fn event_times_serialize_like_the_api() {
        let all_day = serde_json::to_value(EventTime::Date { date: may_day() }).unwrap();
        assert_eq!(all_day, json!({ "date": "2026-05-01" }));

        let timed = serde_json::to_value(EventTime::DateTime {
            date_time: may_day().and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
            time_zone: "Asia/Tokyo".into(),
        })
        .unwrap();
        assert_eq!(
            timed,
            json!({ "dateTime": "2026-05-01T09:30:00", "timeZone": "Asia/Tokyo" })
        );
    }

    #[tokio::test]
    async fn create_event_posts_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/calendars/primary/events")
            .match_header("authorization", "Bearer user-token")
            .match_body(Matcher::PartialJson(json!({
                "summary": "Beach shoot",
                "start": { "date": "2026-05-01" }
            })))
            .with_status(200)
            .with_body(r#"{"id":"evt_1","htmlLink":"https://calendar.example/evt_1"}"#)
            .create_async()
            .await;

        let client = CalendarClient::with_client(reqwest::Client::new(), server.url());
        let event = CalendarEvent {
            summary: "Beach shoot".into(),
            description: None,
            location: Some("Shonan".into()),
            start: EventTime::Date { date: may_day() },
            end: EventTime::Date { date: may_day().succ_opt().unwrap() },
        };

        let created = client.create_event("user-token", None, &event).await.unwrap();
        mock.assert_async().await;
        assert_eq!(created.id, "evt_1");
        assert_eq!(created.html_link.as_deref(), Some("https://calendar.example/evt_1"));
    }

    #[tokio::test]
    async fn expired_token_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                Matcher::Regex(r"^/calendars/team(@|%40)example\.com/events$".into()),
            )
            .with_status(401)
            .with_body("invalid credentials")
            .create_async()
            .await;

        let client = CalendarClient::with_client(reqwest::Client::new(), server.url());
        let event = CalendarEvent {
            summary: "x".into(),
            description: None,
            location: None,
            start: EventTime::Date { date: may_day() },
            end: EventTime::Date { date: may_day() },
        };
        assert_matches!(
            client.create_event("stale", Some("team@example.com"), &event).await,
            Err(GoogleApiError::Api { status: 401, .. })
        );
    }

    #[tokio::test]
    async fn calendar_id_is_one_encoded_segment() {
        let mut server = mockito::Server::new_async().await;
        let holiday = server
            .mock(
                "POST",
                Matcher::Regex(
                    r"^/calendars/en\.usa%23holiday(@|%40)group\.v\.calendar\.google\.com/events$"
                        .into(),
                ),
            )
            .with_status(200)
            .with_body(r#"{"id":"evt_h"}"#)
            .create_async()
            .await;
        let slashed = server
            .mock("POST", "/calendars/team%2Fshoots/events")
            .with_status(200)
            .with_body(r#"{"id":"evt_s"}"#)
            .create_async()
            .await;

        let client = CalendarClient::with_client(reqwest::Client::new(), server.url());
        let event = CalendarEvent {
            summary: "Holiday shoot".into(),
            description: None,
            location: None,
            start: EventTime::Date { date: may_day() },
            end: EventTime::Date { date: may_day() },
        };

        let created = client
            .create_event(
                "user-token",
                Some("en.usa#holiday@group.v.calendar.google.com"),
                &event,
            )
            .await
            .unwrap();
        assert_eq!(created.id, "evt_h");
        holiday.assert_async().await;

        let created = client
            .create_event("user-token", Some("team/shoots"), &event)
            .await
            .unwrap();
        assert_eq!(created.id, "evt_s");
        slashed.assert_async().await;
    }

    #[test]
    fn base_url_with_a_path_prefix_is_kept() {
        let client = CalendarClient::with_client(
            reqwest::Client::new(),
            "https://www.googleapis.com/calendar/v3/".into(),
        );
        assert_eq!(
            client.events_url("a#b").unwrap().as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/a%23b/events"
        );
    }

    #[test]
    fn unparseable_base_url_is_an_error() {
        let client = CalendarClient::with_client(reqwest::Client::new(), "not a url".into());
        assert_matches!(client.events_url("primary"), Err(GoogleApiError::InvalidUrl(_)));
    }
}
