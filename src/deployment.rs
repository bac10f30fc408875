use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Version and start time of this deployment, fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub version: String,
    /// ISO-8601 UTC with millisecond precision, e.g. `2026-10-19T08:00:00.000Z`
    pub deployment_time: String,
}

impl DeploymentInfo {
    /// Stamps `version` with the current wall-clock time.
    pub fn capture(version: impl Into<String>) -> Self {
        Self::at(version, Utc::now())
    }

    pub fn at(version: impl Into<String>, started: DateTime<Utc>) -> Self {
        Self {
            version: version.into(),
            deployment_time: started.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
