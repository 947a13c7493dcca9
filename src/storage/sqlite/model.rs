use chrono::NaiveDateTime;

use crate::reminder::Reminder;

#[derive(sqlx::FromRow)]
pub struct ReminderStorageModel {
    pub id: i64,
    pub text: String,
    pub created_at: NaiveDateTime,
    pub due_at: NaiveDateTime,
    pub sent: bool,
}

impl From<Reminder> for ReminderStorageModel {
    fn from(value: Reminder) -> Self {
        Self {
            id: value.id,
            text: value.text,
            created_at: value.created_at,
            due_at: value.due_at,
            sent: value.sent,
        }
    }
}

impl From<ReminderStorageModel> for Reminder {
    fn from(value: ReminderStorageModel) -> Self {
        Self {
            id: value.id,
            text: value.text,
            created_at: value.created_at,
            due_at: value.due_at,
            sent: value.sent,
        }
    }
}
