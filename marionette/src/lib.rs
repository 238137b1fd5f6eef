//! On-device UI automation through a platform accessibility session.
//!
//! This crate reads another application's live element tree and synthesizes
//! input against it: bounded depth-first traversal, text/description
//! matching, tap/swipe gesture synthesis, discrete node actions, and
//! timeout-driven waits. Platform specifics live behind the
//! [`session::AccessibilitySession`] and [`node::PlatformNode`] seams; tree
//! handles are borrowed from the platform and released on every exit path by
//! the [`node::NodeHandle`] guard.

pub mod actions;
pub mod element;
pub mod errors;
pub mod gesture;
pub mod matcher;
pub mod node;
pub mod session;
pub mod wait;
pub mod walker;

#[cfg(any(test, feature = "testing"))]
pub mod fake;

#[cfg(test)]
mod tests;

pub use actions::{ActionDispatcher, GlobalAction, NodeAction, ScrollDirection};
pub use element::{BoundingBox, ElementDescriptor, NodeAttributes};
pub use errors::AutomationError;
pub use gesture::{Gesture, GesturePoint, GestureStroke, GestureSynthesizer};
pub use matcher::TextQuery;
pub use node::{NodeHandle, PlatformNode};
pub use session::{AccessibilitySession, SessionRegistry};
pub use wait::{WaitConfig, WaitCoordinator};
pub use walker::{TreeWalker, WalkerConfig, MAX_TRAVERSAL_DEPTH};
