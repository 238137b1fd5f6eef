//! The screen-reading session seam and its registry.
//!
//! The engine is only usable while the host holds an externally granted
//! screen-reading session. `SessionRegistry` tracks that lifecycle; every
//! command resolves the current session through it instead of reaching for
//! process-wide state, so tests can connect a fake session and callers get a
//! distinct "not connected" signal rather than a silent no-op.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::actions::GlobalAction;
use crate::errors::AutomationError;
use crate::gesture::Gesture;
use crate::node::NodeHandle;

/// The common trait a connected platform session must implement.
#[async_trait::async_trait]
pub trait AccessibilitySession: Send + Sync {
    /// Acquire the root of the foreground application's element tree.
    /// `None` when no window is currently exposed.
    fn active_root(&self) -> Result<Option<NodeHandle>, AutomationError>;

    /// Acquire the node that currently holds input focus, if any.
    fn focused_node(&self) -> Result<Option<NodeHandle>, AutomationError>;

    /// Package identifier of the foreground application, when known.
    fn foreground_package(&self) -> Option<String>;

    /// Ask the platform to play back a synthesized gesture. Resolves once the
    /// platform has accepted or refused the dispatch request; `Ok(false)`
    /// covers refusal, including hosts below the minimum gesture capability.
    async fn dispatch_gesture(&self, gesture: &Gesture) -> Result<bool, AutomationError>;

    /// System-level navigation that needs no node handle.
    fn perform_global_action(&self, action: GlobalAction) -> Result<bool, AutomationError>;
}

/// Tracks the currently connected session.
#[derive(Default)]
pub struct SessionRegistry {
    current: RwLock<Option<Arc<dyn AccessibilitySession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when the host's screen-reading session connects.
    pub async fn connect(&self, session: Arc<dyn AccessibilitySession>) {
        info!("screen-reading session connected");
        *self.current.write().await = Some(session);
    }

    /// Called when the session is revoked or the host disconnects.
    pub async fn disconnect(&self) {
        info!("screen-reading session disconnected");
        *self.current.write().await = None;
    }

    pub async fn current(&self) -> Option<Arc<dyn AccessibilitySession>> {
        self.current.read().await.clone()
    }

    pub async fn is_available(&self) -> bool {
        self.current.read().await.is_some()
    }
}
