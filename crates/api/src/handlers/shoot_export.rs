//! Push a shoot to Google: a calendar event or a planning document.
//!
//! Both calls act on the user's own Google account, so the client sends
//! its OAuth access token in the request body. The resulting event id/link
//! or document URL is stored on the shoot.

use std::fmt::Write as _;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Deserialize;
use shootboard_core::error::CoreError;
use shootboard_core::types::DbId;
use shootboard_db::models::location::Location;
use shootboard_db::models::shoot::{Shoot, ShootDetail};
use shootboard_db::repositories::ShootRepo;
use shootboard_google::calendar::{CalendarEvent, EventTime};
use validator::Validate;

use super::shoots::{load_detail, load_shoot, not_found};
use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::team::TeamContext;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_TIME_ZONE: &str = "UTC";

/// Request body for `POST /shoots/{id}/create-calendar-event`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCalendarEvent {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub access_token: String,
    /// Defaults to the user's primary calendar.
    pub calendar_id: Option<String>,
    /// IANA zone for timed events; defaults to UTC.
    pub time_zone: Option<String>,
}

/// Request body for `POST /shoots/{id}/create-doc`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDoc {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub access_token: String,
    /// Defaults to the shoot title.
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: Option<String>,
}

/// POST /api/shoots/{id}/create-calendar-event
///
/// The shoot needs a date. With a start time the event is timed (ending at
/// `end_time`, or an hour later); otherwise it is all-day.
pub async fn create_calendar_event(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<CreateCalendarEvent>,
) -> AppResult<Json<DataResponse<Shoot>>> {
    let shoot = load_shoot(&state.pool, ctx.team_id, id).await?;
    let detail = load_detail(&state.pool, ctx.team_id, shoot).await?;

    let time_zone = input
        .time_zone
        .as_deref()
        .map(str::trim)
        .filter(|tz| !tz.is_empty())
        .unwrap_or(DEFAULT_TIME_ZONE);
    let event = calendar_event(&detail, time_zone)?;

    let created = state
        .calendar
        .create_event(&input.access_token, input.calendar_id.as_deref(), &event)
        .await?;

    let shoot = ShootRepo::set_calendar_event(
        &state.pool,
        ctx.team_id,
        id,
        &created.id,
        created.html_link.as_deref(),
    )
    .await?
    .ok_or(not_found(id))?;

    tracing::info!(
        team_id = ctx.team_id,
        shoot_id = id,
        event_id = %created.id,
        "Calendar event created for shoot"
    );
    Ok(Json(DataResponse { data: shoot }))
}

/// POST /api/shoots/{id}/create-doc
pub async fn create_doc(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<CreateDoc>,
) -> AppResult<Json<DataResponse<Shoot>>> {
    let shoot = load_shoot(&state.pool, ctx.team_id, id).await?;
    let detail = load_detail(&state.pool, ctx.team_id, shoot).await?;

    let title = input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .unwrap_or_else(|| format!("{} - shoot plan", detail.shoot.title));
    let body = planning_document(&detail);

    let doc = state
        .docs
        .create_document(&input.access_token, &title, &body)
        .await?;

    let shoot = ShootRepo::set_docs_url(&state.pool, ctx.team_id, id, &doc.url)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(team_id = ctx.team_id, shoot_id = id, doc_id = %doc.id, "Planning doc created");
    Ok(Json(DataResponse { data: shoot }))
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Calendar event for a shoot.
fn calendar_event(detail: &ShootDetail, time_zone: &str) -> AppResult<CalendarEvent> {
    let shoot = &detail.shoot;
    let date = shoot.shoot_date.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Shoot needs a date before it can be added to a calendar".into(),
        ))
    })?;

    let (start, end) = event_window(date, shoot.start_time, shoot.end_time, time_zone)?;

    Ok(CalendarEvent {
        summary: shoot.title.clone(),
        description: shoot.description.clone(),
        location: location_text(detail.location.as_ref(), shoot.location_note.as_deref()),
        start,
        end,
    })
}

fn event_window(
    date: NaiveDate,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    time_zone: &str,
) -> AppResult<(EventTime, EventTime)> {
    let Some(start_time) = start_time else {
        let next = date
            .succ_opt()
            .ok_or_else(|| AppError::BadRequest("Shoot date is out of range".into()))?;
        return Ok((EventTime::Date { date }, EventTime::Date { date: next }));
    };

    let start = date.and_time(start_time);
    let end = match end_time {
        Some(end_time) => date.and_time(end_time),
        None => start + Duration::hours(1),
    };
    Ok((
        EventTime::DateTime {
            date_time: start,
            time_zone: time_zone.to_string(),
        },
        EventTime::DateTime {
            date_time: end,
            time_zone: time_zone.to_string(),
        },
    ))
}

/// "Name, address" for a saved location, else the free-text note.
fn location_text(location: Option<&Location>, note: Option<&str>) -> Option<String> {
    if let Some(loc) = location {
        return Some(match loc.address.as_deref() {
            Some(address) if !address.trim().is_empty() => format!("{}, {address}", loc.name),
            _ => loc.name.clone(),
        });
    }
    note.map(str::trim).filter(|n| !n.is_empty()).map(String::from)
}

/// Plain-text planning document. Sections with nothing in them are left out.
pub fn planning_document(detail: &ShootDetail) -> String {
    let shoot = &detail.shoot;
    let mut out = String::new();

    let _ = writeln!(out, "{}", shoot.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "Status: {}", shoot.status);
    if let Some(date) = shoot.shoot_date {
        let _ = match (shoot.start_time, shoot.end_time) {
            (Some(s), Some(e)) => writeln!(
                out,
                "When: {date} {} - {}",
                s.format("%H:%M"),
                e.format("%H:%M")
            ),
            (Some(s), None) => writeln!(out, "When: {date} {}", s.format("%H:%M")),
            _ => writeln!(out, "When: {date}"),
        };
    }
    if let Some(where_) = location_text(detail.location.as_ref(), shoot.location_note.as_deref()) {
        let _ = writeln!(out, "Where: {where_}");
    }
    if let Some(description) = shoot.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", description.trim());
    }

    section(
        &mut out,
        "Participants",
        detail.participants.iter().map(|p| {
            let mut line = p.name.clone();
            if let Some(role) = &p.role {
                let _ = write!(line, " ({role})");
            }
            if let Some(character) = &p.character_name {
                let _ = write!(line, " as {character}");
            }
            line
        }),
    );
    section(
        &mut out,
        "Costumes",
        detail.costumes.iter().map(|c| match &c.series {
            Some(series) => format!("{} ({series}) [{}]", c.character_name, c.status),
            None => format!("{} [{}]", c.character_name, c.status),
        }),
    );
    section(
        &mut out,
        "Props",
        detail.props.iter().map(|p| format!("{} [{}]", p.name, p.status)),
    );
    section(
        &mut out,
        "Equipment",
        detail.equipment.iter().map(|e| {
            if e.quantity > 1 {
                format!("{} x{}", e.name, e.quantity)
            } else {
                e.name.clone()
            }
        }),
    );
    section(
        &mut out,
        "Locations",
        detail
            .locations
            .iter()
            .filter_map(|l| location_text(Some(l), None)),
    );
    section(
        &mut out,
        "References",
        detail.references.iter().map(|r| match &r.caption {
            Some(caption) => format!("{caption}: {}", r.url),
            None => r.url.clone(),
        }),
    );

    out
}

fn section(out: &mut String, heading: &str, lines: impl Iterator<Item = String>) {
    let mut lines = lines.peekable();
    if lines.peek().is_none() {
        return;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{heading}");
    for line in lines {
        let _ = writeln!(out, "- {line}");
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use shootboard_db::models::participant::Participant;
    use shootboard_db::models::reference::Reference;

    use super::*;

    fn detail() -> ShootDetail {
        let now = Utc::now();
        ShootDetail {
            shoot: Shoot {
                id: 5,
                team_id: 1,
                title: "Hyrule Castle".into(),
                description: Some("Golden hour set".into()),
                status: "planning".into(),
                position: 0,
                shoot_date: NaiveDate::from_ymd_opt(2026, 11, 14),
                start_time: NaiveTime::from_hms_opt(16, 30, 0),
                end_time: None,
                location_id: None,
                location_note: Some("North gate".into()),
                color: None,
                image_url: None,
                calendar_event_id: None,
                calendar_event_url: None,
                docs_url: None,
                created_by: None,
                created_at: now,
                updated_at: now,
            },
            location: None,
            participants: vec![Participant {
                id: 1,
                shoot_id: 5,
                personnel_id: None,
                name: "Aki".into(),
                role: Some("model".into()),
                character_name: Some("Zelda".into()),
                notes: None,
                created_at: now,
                updated_at: now,
            }],
            equipment: vec![],
            costumes: vec![],
            props: vec![],
            locations: vec![],
            references: vec![Reference {
                id: 1,
                shoot_id: 5,
                url: "https://example.com/ref.png".into(),
                caption: Some("Pose".into()),
                sort_order: 0,
                created_at: now,
                updated_at: now,
            }],
        }
    }

    #[test]
    fn timed_event_defaults_to_one_hour() {
        let event = calendar_event(&detail(), "Europe/Berlin").unwrap();
        assert_eq!(event.summary, "Hyrule Castle");
        assert_eq!(event.location.as_deref(), Some("North gate"));
        match (event.start, event.end) {
            (
                EventTime::DateTime { date_time: start, time_zone },
                EventTime::DateTime { date_time: end, .. },
            ) => {
                assert_eq!(time_zone, "Europe/Berlin");
                assert_eq!(end - start, Duration::hours(1));
            }
            other => panic!("expected timed event, got {other:?}"),
        }
    }

    #[test]
    fn event_without_start_time_is_all_day() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let (start, end) = event_window(date, None, None, "UTC").unwrap();
        assert_eq!(start, EventTime::Date { date });
        assert_eq!(
            end,
            EventTime::Date {
                date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()
            }
        );
    }

    #[test]
    fn event_requires_a_date() {
        let mut d = detail();
        d.shoot.shoot_date = None;
        assert!(matches!(
            calendar_event(&d, "UTC"),
            Err(AppError::Core(CoreError::Validation(_)))
        ));
    }

    #[test]
    fn document_lists_only_non_empty_sections() {
        let doc = planning_document(&detail());
        assert!(doc.starts_with("Hyrule Castle\n"));
        assert!(doc.contains("When: 2026-11-14 16:30\n"));
        assert!(doc.contains("Where: North gate\n"));
        assert!(doc.contains("Participants\n- Aki (model) as Zelda\n"));
        assert!(doc.contains("References\n- Pose: https://example.com/ref.png\n"));
        assert!(!doc.contains("Costumes"));
        assert!(!doc.contains("Equipment"));
    }
}
