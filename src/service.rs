use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

use crate::delivery::ReminderSender;
use crate::metrics::MetricsRecorder;
use crate::reminder::{Reminder, ReminderId};
use crate::storage::{NewReminder, ReminderStorage, StorageError};

pub const MEASUREMENT_REMINDER_COUNTS: &str = "reminder_counts";
pub const MEASUREMENT_REMINDERS_DISPATCHED: &str = "reminders_dispatched";

#[derive(Debug, Error)]
pub enum CreateReminderError {
    #[error("reminder text is empty")]
    EmptyText,

    #[error("not a valid calendar date-time: {day}.{month}.{year}, {hour}:{minute:02}")]
    InvalidDateTime {
        day: u32,
        month: u32,
        year: i32,
        hour: u32,
        minute: u32,
    },

    #[error("due timestamp {0} is already in the past")]
    DueInPast(NaiveDateTime),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct ReminderService {
    storage: Arc<dyn ReminderStorage>,
    sender: Arc<dyn ReminderSender>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl ReminderService {
    pub fn new(
        storage: Arc<dyn ReminderStorage>,
        sender: Arc<dyn ReminderSender>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        Self {
            storage,
            sender,
            metrics,
        }
    }

    /// Validates and persists a new reminder, returning its assigned id.
    ///
    /// A due timestamp equal to the current time is still accepted; only
    /// strictly-past timestamps are rejected.
    pub async fn create_reminder(
        &self,
        day: u32,
        month: u32,
        year: i32,
        hour: u32,
        minute: u32,
        text: &str,
    ) -> Result<ReminderId, CreateReminderError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CreateReminderError::EmptyText);
        }

        let due_at = compose_due_at(day, month, year, hour, minute).ok_or(
            CreateReminderError::InvalidDateTime {
                day,
                month,
                year,
                hour,
                minute,
            },
        )?;

        let now = Utc::now().naive_utc();
        if due_at < now {
            return Err(CreateReminderError::DueInPast(due_at));
        }

        let reminder = self
            .storage
            .insert(NewReminder {
                text: text.to_owned(),
                created_at: now,
                due_at,
            })
            .await?;
        log::info!(
            "created reminder {} due at {}",
            reminder.id,
            reminder.due_at_formatted()
        );

        self.record_current_totals().await;

        Ok(reminder.id)
    }

    pub async fn list_all(&self) -> Result<Vec<Reminder>, StorageError> {
        self.storage.find_all_ordered().await
    }

    /// One dispatch cycle: send every due reminder, earliest due first, and
    /// mark each one sent as soon as its delivery succeeds.
    ///
    /// A failed delivery leaves the reminder unsent so the next cycle picks it
    /// up again; it never blocks the rest of the batch. Storage failures end
    /// the cycle early but never escape to the scheduler.
    pub async fn dispatch_due_reminders(&self) {
        let now = Utc::now().naive_utc();
        let due = match self.storage.find_due(now).await {
            Ok(due) => due,
            Err(err) => {
                log::error!("could not query due reminders, skipping this cycle: {err}");
                return;
            }
        };
        log::info!("found {} due reminders", due.len());

        let mut sent_count: i64 = 0;
        for reminder in due {
            let id = reminder.id;
            let subject = format!("[Reminder] {}", reminder.text);
            let body = format!("see subject\n\nDue: {}", reminder.due_at_formatted());

            if let Err(err) = self.sender.send(&subject, &body).await {
                log::warn!("delivery of reminder {id} failed, will retry next cycle: {err:#}");
                continue;
            }

            let sent = Reminder {
                sent: true,
                ..reminder
            };
            match self.storage.update(sent).await {
                Ok(_) => {
                    sent_count += 1;
                    log::info!("reminder {id} delivered and marked sent");
                }
                Err(err) => {
                    log::error!("could not mark reminder {id} sent, ending this cycle: {err}");
                    break;
                }
            }
        }

        if let Err(err) = self
            .metrics
            .record_counts(
                MEASUREMENT_REMINDERS_DISPATCHED,
                &[("count", sent_count)],
                Utc::now(),
            )
            .await
        {
            log::warn!("could not record dispatched count: {err:#}");
        }

        if sent_count > 0 {
            self.record_current_totals().await;
        }
    }

    /// Reports the store-wide sent/pending totals as one observation.
    /// Never fails; problems are logged and dropped.
    pub async fn record_current_totals(&self) {
        let sent = match self.storage.count_by_sent(true).await {
            Ok(count) => count,
            Err(err) => {
                log::warn!("could not count sent reminders for metrics: {err}");
                return;
            }
        };
        let pending = match self.storage.count_by_sent(false).await {
            Ok(count) => count,
            Err(err) => {
                log::warn!("could not count pending reminders for metrics: {err}");
                return;
            }
        };

        if let Err(err) = self
            .metrics
            .record_counts(
                MEASUREMENT_REMINDER_COUNTS,
                &[("sent", sent as i64), ("pending", pending as i64)],
                Utc::now(),
            )
            .await
        {
            log::warn!("could not record reminder totals: {err:#}");
        }
    }
}

fn compose_due_at(day: u32, month: u32, year: i32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;

    Some(date.and_time(time))
}
