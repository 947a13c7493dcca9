use chrono::NaiveDateTime;

pub type ReminderId = i64;

const DUE_FORMAT: &str = "%d.%m.%Y (%a), %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: ReminderId,
    pub text: String,
    pub created_at: NaiveDateTime,
    pub due_at: NaiveDateTime,
    /// Set once by dispatch after a successful delivery, never cleared.
    pub sent: bool,
}

impl Reminder {
    /// Due timestamp in the form shown to users, e.g. `23.12.2026 (Wed), 07:10`.
    pub fn due_at_formatted(&self) -> String {
        self.due_at.format(DUE_FORMAT).to_string()
    }
}
