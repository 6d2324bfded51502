//! One probe: a single GET against a single target that never fails.
use crate::aggregate::{ProbeError, ProbeOutcome};
use crate::classifier::classify;
use crate::registry::Target;
use async_trait::async_trait;
use log::debug;
use rand::seq::IndexedRandom;
use std::{fmt::Debug, num::NonZero, sync::Arc, time::Duration};
use tokio::time;

/// Per-probe timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// User agents rotated between probes.
pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
    "Mozilla/5.0 (Linux; Android 12; SM-N986B)",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X)",
];

const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const ACCEPT: &str = "*/*";
const REFERER: &str = "https://www.google.com/";

/// Headers that make a probe look like an ordinary browser request.
///
/// Only the user agent varies. This is cosmetic, not an evasion mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHeaders {
    user_agent: &'static str,
}

impl IdentityHeaders {
    /// Picks a user agent at random from [`USER_AGENTS`].
    pub fn random() -> Self {
        let user_agent = USER_AGENTS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);
        Self { user_agent }
    }

    /// The selected `User-Agent` value.
    pub const fn user_agent(&self) -> &'static str {
        self.user_agent
    }

    /// Every header as `(name, value)` pairs.
    pub const fn pairs(&self) -> [(&'static str, &'static str); 4] {
        [
            ("User-Agent", self.user_agent),
            ("Accept-Language", ACCEPT_LANGUAGE),
            ("Accept", ACCEPT),
            ("Referer", REFERER),
        ]
    }
}

/// A target resolved for one subject. Lives for a single scan.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    /// The target being probed.
    pub target: Target,
    /// The target's template with the subject substituted in.
    pub resolved_url: String,
    /// Headers sent with the request.
    pub identity_headers: IdentityHeaders,
}

impl ProbeRequest {
    /// Resolves `target` for `subject` with a fresh random identity.
    pub fn new(target: &Target, subject: &str) -> Self {
        Self {
            resolved_url: target.resolve(subject),
            target: target.clone(),
            identity_headers: IdentityHeaders::random(),
        }
    }
}

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Builds a response from a status code and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Capability to issue a GET request.
///
/// Implementations report failures as a [`ProbeError`] kind and never panic
/// on network errors.
#[async_trait]
pub trait HttpTransport: Debug + Send + Sync {
    /// Fetches `url`, giving up after roughly `timeout`.
    async fn get(
        &self,
        url: &str,
        headers: &IdentityHeaders,
        timeout: Duration,
    ) -> Result<RawResponse, ProbeError>;
}

/// [`HttpTransport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds the underlying client. Fails only if the TLS backend cannot
    /// be initialised.
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: &IdentityHeaders,
        timeout: Duration,
    ) -> Result<RawResponse, ProbeError> {
        let mut request = self.client.get(url).timeout(timeout);
        for (name, value) in headers.pairs() {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(probe_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(probe_error)?;

        Ok(RawResponse { status, body })
    }
}

fn probe_error(err: reqwest::Error) -> ProbeError {
    debug!("Request error {err}");
    if err.is_timeout() {
        ProbeError::Timeout
    } else if err.is_body() || err.is_decode() {
        ProbeError::Malformed
    } else {
        ProbeError::Network
    }
}

/// Runs probes through a transport and classifies what comes back.
#[derive(Debug)]
pub struct ProbeExecutor {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
    tries: NonZero<u8>,
}

impl ProbeExecutor {
    /// `tries` of 0 is corrected to 1.
    pub fn new(transport: Arc<dyn HttpTransport>, timeout: Duration, tries: u8) -> Self {
        Self {
            transport,
            timeout,
            tries: NonZero::new(tries).unwrap_or(NonZero::<u8>::MIN),
        }
    }

    /// Probes one target and classifies the response.
    ///
    /// Timeouts are retried up to `tries` attempts in total, other failures
    /// are not. Every failure ends as a "not found" outcome carrying its
    /// [`ProbeError`].
    pub async fn probe(&self, request: &ProbeRequest) -> ProbeOutcome {
        let platform = &request.target.platform_name;
        let tries = self.tries.get();
        let mut last_err = ProbeError::Timeout;

        for nr_try in 1..=tries {
            match self.fetch(request).await {
                Ok(response) => {
                    let exists = classify(platform, response.status, &response.body);
                    debug!(
                        "{platform} answered {} after {nr_try} tries, exists: {exists}",
                        response.status
                    );
                    return ProbeOutcome::classified(
                        platform.clone(),
                        exists,
                        request.resolved_url.clone(),
                    );
                }
                Err(ProbeError::Timeout) => {
                    debug!("{platform} timed out on try {nr_try} of {tries}");
                    last_err = ProbeError::Timeout;
                }
                Err(err) => {
                    debug!("{platform} failed: {err}");
                    last_err = err;
                    break;
                }
            }
        }

        ProbeOutcome::failed(platform.clone(), last_err)
    }

    async fn fetch(&self, request: &ProbeRequest) -> Result<RawResponse, ProbeError> {
        time::timeout(
            self.timeout,
            self.transport.get(
                &request.resolved_url,
                &request.identity_headers,
                self.timeout,
            ),
        )
        .await
        .map_err(|_| ProbeError::Timeout)?
    }
}
