//! The borrowed-node seam between the engine and the platform tree.
//!
//! Platform nodes are owned by the host's accessibility layer and must be
//! given back after each traversal step. `NodeHandle` makes that discipline
//! structural: release happens in `Drop`, so every exit path — normal return,
//! early return, error — gives the node back exactly once, and a released
//! node is unreachable by construction.

use std::fmt::Debug;

use crate::actions::NodeAction;
use crate::element::{ElementDescriptor, NodeAttributes};
use crate::errors::AutomationError;

/// Interface for platform-specific node implementations.
///
/// Implementations are expected to be cheap borrows into the live tree.
/// `child` acquires a new handle the caller now owns; `release` is invoked
/// exactly once, from `NodeHandle::drop`.
pub trait PlatformNode: Send + Sync + Debug {
    /// Snapshot of the node's state at the time of the call.
    fn attributes(&self) -> NodeAttributes;

    fn child_count(&self) -> usize;

    /// Acquire the child at `index`. `None` when the platform reports the
    /// slot as empty, which live trees do while views are being recycled.
    fn child(&self, index: usize) -> Result<Option<NodeHandle>, AutomationError>;

    /// Ask the platform to perform a node-scoped action. `Ok(false)` means
    /// the platform refused the request, not that something broke.
    fn perform(&self, action: &NodeAction) -> Result<bool, AutomationError>;

    /// Give the node back to the platform tree.
    fn release(&self);
}

/// Scoped guard over one borrowed tree node.
#[derive(Debug)]
pub struct NodeHandle {
    inner: Box<dyn PlatformNode>,
}

impl NodeHandle {
    pub fn new(inner: Box<dyn PlatformNode>) -> Self {
        Self { inner }
    }

    pub fn attributes(&self) -> NodeAttributes {
        self.inner.attributes()
    }

    pub fn child_count(&self) -> usize {
        self.inner.child_count()
    }

    pub fn child(&self, index: usize) -> Result<Option<NodeHandle>, AutomationError> {
        self.inner.child(index)
    }

    pub fn perform(&self, action: &NodeAction) -> Result<bool, AutomationError> {
        self.inner.perform(action)
    }

    /// Owned copy of the node's attributes, safe to keep after the handle
    /// drops.
    pub fn descriptor(&self) -> ElementDescriptor {
        ElementDescriptor::from(&self.attributes())
    }
}

impl Drop for NodeHandle {
    fn drop(&mut self) {
        self.inner.release();
    }
}
