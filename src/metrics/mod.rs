mod influx;

pub use influx::InfluxMetricsRecorder;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Best-effort counter sink. Callers log and swallow failures.
#[async_trait]
pub trait MetricsRecorder: Send + Sync {
    async fn record_counts(
        &self,
        measurement: &str,
        fields: &[(&str, i64)],
        at: DateTime<Utc>,
    ) -> anyhow::Result<()>;
}
