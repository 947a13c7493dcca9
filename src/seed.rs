use chrono::{Datelike, Utc};

use crate::service::ReminderService;
use crate::storage::StorageError;

const DEMO_REMINDERS: [(u32, u32, u32, u32, &str); 5] = [
    (1, 1, 8, 30, "Eat sauerkraut today"),
    (23, 12, 12, 0, "Bought all presents for tomorrow?"),
    (30, 4, 10, 15, "Get drinks for the May Day picnic"),
    (31, 10, 15, 0, "Prepare the Halloween treats!"),
    (5, 12, 7, 30, "Put the boots out for St. Nicholas!"),
];

/// Seeds a handful of demo reminders on first start so the list page is not
/// empty. Does nothing once real data exists.
pub async fn import_demo_reminders(service: &ReminderService) -> Result<(), StorageError> {
    let existing = service.list_all().await?;
    if !existing.is_empty() {
        log::info!(
            "{} reminders already stored, skipping demo data",
            existing.len()
        );
        return Ok(());
    }

    let next_year = Utc::now().year() + 1;
    for (day, month, hour, minute, text) in DEMO_REMINDERS {
        if let Err(err) = service
            .create_reminder(day, month, next_year, hour, minute, text)
            .await
        {
            log::warn!("could not create demo reminder {text:?}: {err}");
        }
    }

    Ok(())
}
