//! Timeout-driven polling for elements that are not on screen yet.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::errors::AutomationError;
use crate::matcher::TextQuery;
use crate::node::NodeHandle;
use crate::session::AccessibilitySession;
use crate::walker::TreeWalker;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct WaitConfig {
    pub poll_interval: Duration,
    pub default_timeout: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            default_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

/// Polls the tree until a query matches, the timeout lapses, or the caller
/// cancels. Timeout and cancellation are expected outcomes (`Ok(None)`), not
/// errors; each tick is one full bounded traversal, and the sleeps between
/// ticks are cooperative, so no thread is held hostage for a long wait.
pub struct WaitCoordinator {
    session: Arc<dyn AccessibilitySession>,
    walker: TreeWalker,
    config: WaitConfig,
}

impl WaitCoordinator {
    pub fn new(session: Arc<dyn AccessibilitySession>) -> Self {
        Self::with_config(session, WaitConfig::default())
    }

    pub fn with_config(session: Arc<dyn AccessibilitySession>, config: WaitConfig) -> Self {
        Self {
            session,
            walker: TreeWalker::default(),
            config,
        }
    }

    /// Wait without an external cancel signal; only the timeout ends it.
    pub async fn wait_for_match(
        &self,
        query: &TextQuery,
        timeout: Duration,
    ) -> Result<Option<NodeHandle>, AutomationError> {
        self.wait_for_match_with_cancel(query, timeout, &CancellationToken::new())
            .await
    }

    /// Ownership of a returned handle transfers to the caller.
    #[instrument(skip(self, query, cancel), fields(query = %query.text))]
    pub async fn wait_for_match_with_cancel(
        &self,
        query: &TextQuery,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Option<NodeHandle>, AutomationError> {
        let started = tokio::time::Instant::now();
        loop {
            if let Some(hit) = self.poll_once(query)? {
                debug!(elapsed = ?started.elapsed(), "element appeared");
                return Ok(Some(hit));
            }
            if started.elapsed() >= timeout {
                debug!(?timeout, "wait timed out");
                return Ok(None);
            }
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(elapsed = ?started.elapsed(), "wait cancelled");
                    return Ok(None);
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }

    fn poll_once(&self, query: &TextQuery) -> Result<Option<NodeHandle>, AutomationError> {
        let Some(root) = self.session.active_root()? else {
            return Ok(None);
        };
        self.walker.find_first(root, |attrs| query.matches(attrs))
    }
}
