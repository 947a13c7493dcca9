mod memory;
pub mod sqlite;

pub use memory::InMemoryReminderStorage;
pub use sqlite::SqliteReminderStorage;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::reminder::{Reminder, ReminderId};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("no reminder with id {0}")]
    NotFound(ReminderId),
}

pub struct NewReminder {
    pub text: String,
    pub created_at: NaiveDateTime,
    pub due_at: NaiveDateTime,
}

#[async_trait]
pub trait ReminderStorage: Send + Sync {
    /// Persists a new reminder with `sent = false` and assigns its id.
    async fn insert(&self, reminder: NewReminder) -> Result<Reminder, StorageError>;

    async fn update(&self, reminder: Reminder) -> Result<Reminder, StorageError>;

    /// Unsent reminders due strictly before `now`, earliest due first.
    async fn find_due(&self, now: NaiveDateTime) -> Result<Vec<Reminder>, StorageError>;

    /// Every reminder, sent or not, ordered by due timestamp ascending.
    async fn find_all_ordered(&self) -> Result<Vec<Reminder>, StorageError>;

    async fn count_by_sent(&self, sent: bool) -> Result<u64, StorageError>;
}
