use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::MetricsRecorder;
use crate::appsettings::InfluxSettings;

pub struct InfluxMetricsRecorder {
    client: reqwest::Client,
    write_url: String,
    token: String,
}

impl InfluxMetricsRecorder {
    pub fn new(settings: &InfluxSettings) -> Self {
        let write_url = format!(
            "{}/api/v2/write?org={}&bucket={}&precision=s",
            settings.url.trim_end_matches('/'),
            settings.org,
            settings.bucket
        );

        Self {
            client: reqwest::Client::new(),
            write_url,
            token: settings.token.clone(),
        }
    }
}

#[async_trait]
impl MetricsRecorder for InfluxMetricsRecorder {
    async fn record_counts(
        &self,
        measurement: &str,
        fields: &[(&str, i64)],
        at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let line = encode_line(measurement, fields, at.timestamp());

        let response = self
            .client
            .post(&self.write_url)
            .header("Authorization", format!("Token {}", self.token))
            .body(line)
            .send()
            .await?;
        response.error_for_status()?;

        Ok(())
    }
}

fn encode_line(measurement: &str, fields: &[(&str, i64)], timestamp: i64) -> String {
    let fields = fields
        .iter()
        .map(|(name, value)| format!("{name}={value}i"))
        .collect::<Vec<_>>()
        .join(",");

    format!("{measurement} {fields} {timestamp}")
}
