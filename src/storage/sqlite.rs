mod model;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use model::ReminderStorageModel;

use super::{NewReminder, ReminderStorage, StorageError};
use crate::reminder::Reminder;

const ALL_COLUMNS: &str = "id, text, created_at, due_at, sent";

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS reminders (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             text TEXT NOT NULL,
             created_at DATETIME NOT NULL,
             due_at DATETIME NOT NULL,
             sent BOOLEAN NOT NULL DEFAULT FALSE
         )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub struct SqliteReminderStorage {
    pool: SqlitePool,
}

impl SqliteReminderStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderStorage for SqliteReminderStorage {
    async fn insert(&self, reminder: NewReminder) -> Result<Reminder, StorageError> {
        let created = sqlx::query_as::<_, ReminderStorageModel>(&format!(
            "INSERT INTO reminders (text, created_at, due_at, sent)
             VALUES (?, ?, ?, FALSE)
             RETURNING {ALL_COLUMNS}"
        ))
        .bind(&reminder.text)
        .bind(reminder.created_at)
        .bind(reminder.due_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created.into())
    }

    async fn update(&self, reminder: Reminder) -> Result<Reminder, StorageError> {
        let model = ReminderStorageModel::from(reminder);
        let updated = sqlx::query_as::<_, ReminderStorageModel>(&format!(
            "UPDATE reminders
             SET text = ?, created_at = ?, due_at = ?, sent = ?
             WHERE id = ?
             RETURNING {ALL_COLUMNS}"
        ))
        .bind(&model.text)
        .bind(model.created_at)
        .bind(model.due_at)
        .bind(model.sent)
        .bind(model.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(model.id))?;

        Ok(updated.into())
    }

    async fn find_due(&self, now: NaiveDateTime) -> Result<Vec<Reminder>, StorageError> {
        let due = sqlx::query_as::<_, ReminderStorageModel>(&format!(
            "SELECT {ALL_COLUMNS} FROM reminders
             WHERE sent = FALSE AND due_at < ?
             ORDER BY due_at ASC, id ASC"
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(due.into_iter().map(Into::into).collect())
    }

    async fn find_all_ordered(&self) -> Result<Vec<Reminder>, StorageError> {
        let all = sqlx::query_as::<_, ReminderStorageModel>(&format!(
            "SELECT {ALL_COLUMNS} FROM reminders ORDER BY due_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(all.into_iter().map(Into::into).collect())
    }

    async fn count_by_sent(&self, sent: bool) -> Result<u64, StorageError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reminders WHERE sent = ?")
            .bind(sent)
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use sqlx::SqlitePool;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn new_reminder(text: &str, due_at: NaiveDateTime) -> NewReminder {
        NewReminder {
            text: text.to_owned(),
            created_at: at(0, 0),
            due_at,
        }
    }

    #[sqlx::test]
    async fn find_due_filters_and_orders_by_due_time(pool: SqlitePool) {
        migrate(&pool).await.unwrap();
        let storage = SqliteReminderStorage::new(pool);

        let later = storage.insert(new_reminder("later", at(12, 0))).await.unwrap();
        let earlier = storage
            .insert(new_reminder("earlier", at(9, 0)))
            .await
            .unwrap();

        let due = storage.find_due(at(13, 0)).await.unwrap();
        let ids: Vec<_> = due.iter().map(|reminder| reminder.id).collect();
        assert_eq!(ids, vec![earlier.id, later.id]);

        assert!(storage.find_due(at(8, 0)).await.unwrap().is_empty());
    }

    #[sqlx::test]
    async fn marking_sent_moves_counts_and_hides_from_due_set(pool: SqlitePool) {
        migrate(&pool).await.unwrap();
        let storage = SqliteReminderStorage::new(pool);

        let reminder = storage
            .insert(new_reminder("water the plants", at(9, 0)))
            .await
            .unwrap();
        assert_eq!(storage.count_by_sent(false).await.unwrap(), 1);

        let updated = storage
            .update(Reminder { sent: true, ..reminder })
            .await
            .unwrap();
        assert!(updated.sent);

        assert_eq!(storage.count_by_sent(true).await.unwrap(), 1);
        assert_eq!(storage.count_by_sent(false).await.unwrap(), 0);
        assert!(storage.find_due(at(10, 0)).await.unwrap().is_empty());
    }

    #[sqlx::test]
    async fn migrate_is_idempotent(pool: SqlitePool) {
        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();

        let storage = SqliteReminderStorage::new(pool);
        assert!(storage.find_all_ordered().await.unwrap().is_empty());
    }
}
