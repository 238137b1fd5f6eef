//! The RPC-style command surface over the marionette automation engine.
//!
//! External callers (the chat UI, the workflow engine) submit a [`Command`],
//! the bridge validates that a screen-reading session is connected,
//! dispatches to the engine primitives, and returns a [`CommandReply`] or a
//! typed [`marionette::AutomationError`]. "Nothing found" and "platform
//! refused" are successful replies carrying `false`; only unavailability,
//! malformed commands, and platform faults are errors.

pub mod bridge;
pub mod command;
pub mod reply;

pub use bridge::CommandBridge;
pub use command::Command;
pub use reply::{CommandReply, ElementQueryReply, ScreenContent};
