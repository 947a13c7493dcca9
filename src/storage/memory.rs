use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use super::{NewReminder, ReminderStorage, StorageError};
use crate::reminder::{Reminder, ReminderId};

struct InMemoryStore {
    next_id: ReminderId,
    reminders: HashMap<ReminderId, Reminder>,
}

pub struct InMemoryReminderStorage {
    store: RwLock<InMemoryStore>,
}

impl InMemoryReminderStorage {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(InMemoryStore {
                next_id: 1,
                reminders: HashMap::new(),
            }),
        }
    }
}

fn sort_by_due(reminders: &mut [Reminder]) {
    reminders.sort_by(|a, b| a.due_at.cmp(&b.due_at).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl ReminderStorage for InMemoryReminderStorage {
    async fn insert(&self, reminder: NewReminder) -> Result<Reminder, StorageError> {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;

        let reminder = Reminder {
            id,
            text: reminder.text,
            created_at: reminder.created_at,
            due_at: reminder.due_at,
            sent: false,
        };
        store.reminders.insert(id, reminder.clone());

        Ok(reminder)
    }

    async fn update(&self, reminder: Reminder) -> Result<Reminder, StorageError> {
        let mut store = self.store.write().await;
        match store.reminders.get_mut(&reminder.id) {
            Some(stored) => {
                *stored = reminder.clone();
                Ok(reminder)
            }
            None => Err(StorageError::NotFound(reminder.id)),
        }
    }

    async fn find_due(&self, now: NaiveDateTime) -> Result<Vec<Reminder>, StorageError> {
        let store = self.store.read().await;
        let mut due: Vec<_> = store
            .reminders
            .values()
            .filter(|reminder| !reminder.sent && reminder.due_at < now)
            .cloned()
            .collect();
        sort_by_due(&mut due);

        Ok(due)
    }

    async fn find_all_ordered(&self) -> Result<Vec<Reminder>, StorageError> {
        let store = self.store.read().await;
        let mut all: Vec<_> = store.reminders.values().cloned().collect();
        sort_by_due(&mut all);

        Ok(all)
    }

    async fn count_by_sent(&self, sent: bool) -> Result<u64, StorageError> {
        let store = self.store.read().await;
        let count = store
            .reminders
            .values()
            .filter(|reminder| reminder.sent == sent)
            .count();

        Ok(count as u64)
    }
}
