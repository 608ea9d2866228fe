// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asynchronous wrapper around the selector used by both transports.

use std::time::Duration;

use parley_config::ParleyConfig;
use parley_core::ParleyError;
use parley_responder::SharedSelector;
use tracing::error;

/// A selected reply, owned so it can leave the spawned task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub category: Option<String>,
}

/// Runs selections off the request task, with optional simulated latency.
///
/// The selection itself cannot fail. A panic inside the task becomes
/// [`ParleyError::Internal`] and exceeding the timeout becomes
/// [`ParleyError::Timeout`].
#[derive(Debug, Clone)]
pub struct ReplyService {
    selector: SharedSelector,
    delay: Duration,
    timeout: Duration,
}

impl ReplyService {
    pub fn new(selector: SharedSelector) -> Self {
        Self {
            selector,
            delay: Duration::ZERO,
            timeout: Duration::from_secs(30),
        }
    }

    /// Delay and timeout taken from `responder.reply_delay_ms` and
    /// `server.request_timeout_secs`.
    pub fn from_config(selector: SharedSelector, config: &ParleyConfig) -> Self {
        Self::new(selector)
            .with_delay(Duration::from_millis(config.responder.reply_delay_ms))
            .with_timeout(Duration::from_secs(config.server.request_timeout_secs))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn selector(&self) -> &SharedSelector {
        &self.selector
    }

    /// Produce a reply for `message`.
    pub async fn reply(&self, message: String) -> Result<Reply, ParleyError> {
        let selector = self.selector.load();
        let delay = self.delay;

        let mut task = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let selection = selector.select(&message);
            Reply {
                text: selection.reply.to_string(),
                category: selection.category.map(str::to_string),
            }
        });

        match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(join_err)) => {
                error!(error = %join_err, "reply task failed");
                Err(ParleyError::Internal(format!("reply task failed: {join_err}")))
            }
            Err(_) => {
                task.abort();
                Err(ParleyError::Timeout {
                    duration: self.timeout,
                })
            }
        }
    }
}
