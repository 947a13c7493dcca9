use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::ReminderSender;
use crate::appsettings::EmailSettings;

pub struct SmtpReminderSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpReminderSender {
    /// The account address doubles as the sender address.
    pub fn new(settings: &EmailSettings) -> anyhow::Result<Self> {
        let from = settings.username.parse::<Mailbox>()?;
        let to = settings.recipient.parse::<Mailbox>()?;

        let credentials = Credentials::new(settings.username.clone(), settings.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)?
            .port(settings.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self { mailer, from, to })
    }
}

#[async_trait]
impl ReminderSender for SmtpReminderSender {
    async fn send(&self, subject: &str, body: &str) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .body(body.to_owned())?;

        self.mailer.send(message).await?;
        log::info!("email sent with subject {subject:?}");

        Ok(())
    }
}
