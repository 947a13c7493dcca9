mod email;

pub use email::SmtpReminderSender;

use async_trait::async_trait;

#[async_trait]
pub trait ReminderSender: Send + Sync {
    async fn send(&self, subject: &str, body: &str) -> anyhow::Result<()>;
}
