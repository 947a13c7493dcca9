use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Form, Json, Router};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::reminder::Reminder;
use crate::service::{CreateReminderError, ReminderService};

#[derive(Clone)]
pub struct AppState {
    service: Arc<ReminderService>,
}

pub fn router(service: Arc<ReminderService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/reminders", get(list_reminders).post(create_reminder))
        .with_state(AppState { service })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Deserialize)]
struct CreateReminderForm {
    text: String,
    day: u32,
    month: u32,
    year: i32,
    hour: u32,
    minute: u32,
}

#[derive(Debug, Serialize)]
struct CreatedReminder {
    id: i64,
}

async fn create_reminder(
    State(state): State<AppState>,
    Form(form): Form<CreateReminderForm>,
) -> Result<(StatusCode, Json<CreatedReminder>), (StatusCode, String)> {
    log::info!(
        "request for new reminder: {}.{}.{}, {}:{:02}, text: {:?}",
        form.day,
        form.month,
        form.year,
        form.hour,
        form.minute,
        form.text
    );

    match state
        .service
        .create_reminder(
            form.day,
            form.month,
            form.year,
            form.hour,
            form.minute,
            &form.text,
        )
        .await
    {
        Ok(id) => Ok((StatusCode::CREATED, Json(CreatedReminder { id }))),
        Err(CreateReminderError::Storage(err)) => {
            log::error!("could not persist reminder: {err}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "could not persist reminder".to_owned(),
            ))
        }
        Err(err) => Err((StatusCode::UNPROCESSABLE_ENTITY, err.to_string())),
    }
}

#[derive(Serialize)]
struct ReminderDto {
    id: i64,
    text: String,
    created_at: NaiveDateTime,
    due_at: NaiveDateTime,
    due_at_formatted: String,
    sent: bool,
}

impl From<Reminder> for ReminderDto {
    fn from(reminder: Reminder) -> Self {
        let due_at_formatted = reminder.due_at_formatted();
        Self {
            id: reminder.id,
            text: reminder.text,
            created_at: reminder.created_at,
            due_at: reminder.due_at,
            due_at_formatted,
            sent: reminder.sent,
        }
    }
}

async fn list_reminders(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReminderDto>>, (StatusCode, String)> {
    let reminders = state.service.list_all().await.map_err(|err| {
        log::error!("could not list reminders: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "could not list reminders".to_owned(),
        )
    })?;

    Ok(Json(reminders.into_iter().map(Into::into).collect()))
}
