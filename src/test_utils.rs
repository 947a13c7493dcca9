use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::delivery::ReminderSender;
use crate::metrics::MetricsRecorder;

pub type SentMessages = Arc<Mutex<Vec<(String, String)>>>;

pub struct RecordingSender {
    pub sent: SentMessages,
    fail_matching: Option<String>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_matching: None,
        }
    }

    /// Rejects any message whose subject contains `pattern`.
    pub fn failing_on(pattern: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_matching: Some(pattern.to_owned()),
        }
    }

    pub fn subjects(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(subject, _)| subject.clone())
            .collect()
    }
}

#[async_trait]
impl ReminderSender for RecordingSender {
    async fn send(&self, subject: &str, body: &str) -> anyhow::Result<()> {
        if let Some(pattern) = &self.fail_matching {
            if subject.contains(pattern) {
                anyhow::bail!("smtp relay rejected the message");
            }
        }
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_owned(), body.to_owned()));

        Ok(())
    }
}

pub type RecordedPoints = Arc<Mutex<Vec<(String, Vec<(String, i64)>)>>>;

pub struct RecordingMetrics {
    pub points: RecordedPoints,
}

impl RecordingMetrics {
    pub fn new() -> Self {
        Self {
            points: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl MetricsRecorder for RecordingMetrics {
    async fn record_counts(
        &self,
        measurement: &str,
        fields: &[(&str, i64)],
        _at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let fields = fields
            .iter()
            .map(|(name, value)| ((*name).to_owned(), *value))
            .collect();
        self.points
            .lock()
            .unwrap()
            .push((measurement.to_owned(), fields));

        Ok(())
    }
}

pub struct FailingMetrics;

#[async_trait]
impl MetricsRecorder for FailingMetrics {
    async fn record_counts(
        &self,
        _measurement: &str,
        _fields: &[(&str, i64)],
        _at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        anyhow::bail!("metrics backend unreachable")
    }
}

pub fn minutes_ago(minutes: i64) -> NaiveDateTime {
    Utc::now().naive_utc() - Duration::minutes(minutes)
}

pub fn minutes_from_now(minutes: i64) -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::minutes(minutes)
}
