//! Per-target outcomes and their reduction into a scan result.
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

/// Why a probe could not produce a response to classify.
///
/// These never escape a probe as errors. They are recorded on the outcome,
/// which is reported as "not found".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeError {
    /// Connection refused, DNS or TLS failure.
    #[error("network failure")]
    Network,
    /// The probe did not finish within its timeout.
    #[error("timed out")]
    Timeout,
    /// The response could not be read.
    #[error("malformed response")]
    Malformed,
    /// The scan was cancelled or hit its deadline before the probe finished.
    #[error("cancelled")]
    Cancelled,
}

/// The classified result for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// Platform the probe was run against.
    #[serde(rename = "platform")]
    pub platform_name: String,
    /// Whether the profile was judged to exist.
    #[serde(rename = "found")]
    pub exists: bool,
    /// Profile URL, present only when `exists` is true.
    pub url: Option<String>,
    /// Set when the probe failed instead of being classified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProbeError>,
}

impl ProbeOutcome {
    /// Outcome of a probe whose response was classified.
    pub fn classified(platform_name: impl Into<String>, exists: bool, url: String) -> Self {
        Self {
            platform_name: platform_name.into(),
            exists,
            url: exists.then_some(url),
            error: None,
        }
    }

    /// Outcome of a probe that failed. Always "not found".
    pub fn failed(platform_name: impl Into<String>, error: ProbeError) -> Self {
        Self {
            platform_name: platform_name.into(),
            exists: false,
            url: None,
            error: Some(error),
        }
    }
}

/// Everything one scan found, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// The username that was searched.
    #[serde(rename = "searched_username")]
    pub subject: String,
    /// Number of outcomes with `exists == true`.
    pub total_found: usize,
    /// One outcome per target, in registry order.
    #[serde(rename = "profiles")]
    pub outcomes: Vec<ProbeOutcome>,
}

impl ScanResult {
    /// Outcomes whose profile was found.
    pub fn found(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.exists)
    }

    /// Outcomes that failed rather than being classified.
    pub fn failed(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.error.is_some())
    }
}

/// Packages ordered outcomes into a [`ScanResult`].
pub fn aggregate(subject: &str, outcomes: Vec<ProbeOutcome>) -> ScanResult {
    let total_found = outcomes.iter().filter(|outcome| outcome.exists).count();

    ScanResult {
        subject: subject.to_owned(),
        total_found,
        outcomes,
    }
}
