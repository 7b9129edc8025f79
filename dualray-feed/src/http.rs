//! Snapshot over HTTP
//!
//! Fetches the snapshot document with a plain GET. `ureq` is a blocking
//! client, so each attempt runs on tokio's blocking pool.
//!
//! Server errors (5xx), rate limiting (429) and transport failures are
//! retried with exponential backoff; other statuses fail immediately.
//!
//! ```rust,no_run
//! use dualray_feed::{HttpSource, SnapshotSource};
//!
//! # async fn example() -> Result<(), dualray_feed::FeedError> {
//! let source = HttpSource::new("https://fleet.example.org/snapshot.csv")?
//!     .timeout_secs(10)
//!     .max_retries(2);
//! let text = source.fetch().await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::warn;

use crate::errors::FeedError;
use crate::source::SnapshotSource;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: u32 = 3;
const BACKOFF_BASE_MS: u64 = 100;

/// Snapshot fetched from a URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
    max_retries: u32,
    user_agent: String,
}

impl HttpSource {
    /// Source for `url`; it must be http:// or https://
    pub fn new(url: impl Into<String>) -> Result<Self, FeedError> {
        let url = url.into();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(FeedError::Config("URL must start with http:// or https://".into()));
        }
        Ok(Self {
            url,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: format!("dualray/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Per-attempt timeout
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Retries after the first attempt
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    fn agent(&self) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
    }
}

enum Attempt {
    Done(String),
    Retry(FeedError),
    Fail(FeedError),
}

fn attempt(agent: &ureq::Agent, url: &str) -> Attempt {
    match agent.get(url).call() {
        Ok(resp) => match resp.into_string() {
            Ok(text) => Attempt::Done(text),
            Err(e) => Attempt::Fail(FeedError::Io(e)),
        },
        Err(ureq::Error::Status(code, resp)) => {
            let err = FeedError::Http(format!(
                "status {}: {}",
                code,
                resp.into_string().unwrap_or_default()
            ));
            if code >= 500 || code == 429 {
                Attempt::Retry(err)
            } else {
                Attempt::Fail(err)
            }
        }
        Err(ureq::Error::Transport(e)) => Attempt::Retry(FeedError::Http(e.to_string())),
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch(&self) -> Result<String, FeedError> {
        let agent = self.agent();
        let mut last_error = None;

        for n in 0..=self.max_retries {
            if n > 0 {
                tokio::time::sleep(Duration::from_millis(BACKOFF_BASE_MS << n.min(10))).await;
            }

            let agent = agent.clone();
            let url = self.url.clone();
            let outcome = tokio::task::spawn_blocking(move || attempt(&agent, &url))
                .await
                .map_err(|e| FeedError::Task(e.to_string()))?;

            match outcome {
                Attempt::Done(text) => return Ok(text),
                Attempt::Fail(err) => return Err(err),
                Attempt::Retry(err) => {
                    warn!("snapshot fetch attempt {} from {} failed: {}", n + 1, self.url, err);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FeedError::Http("no attempt made".into())))
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}
