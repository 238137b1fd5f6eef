//! Discrete node actions and system-level navigation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::AutomationError;
use crate::node::NodeHandle;
use crate::session::AccessibilitySession;
use crate::walker::TreeWalker;

/// Actions performed against one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeAction {
    Click,
    SetText(String),
    ScrollForward,
    ScrollBackward,
}

/// System navigation that needs no node handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlobalAction {
    Back,
    Home,
    Recents,
    Notifications,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Down the content, i.e. the platform's forward scroll.
    pub fn is_forward(self) -> bool {
        matches!(self, Self::Down | Self::Forward)
    }
}

/// Performs node-scoped and global actions through the connected session.
pub struct ActionDispatcher {
    session: Arc<dyn AccessibilitySession>,
    walker: TreeWalker,
}

impl ActionDispatcher {
    pub fn new(session: Arc<dyn AccessibilitySession>) -> Self {
        Self {
            session,
            walker: TreeWalker::default(),
        }
    }

    pub fn click(&self, node: &NodeHandle) -> Result<bool, AutomationError> {
        node.perform(&NodeAction::Click)
    }

    /// Set the node's text. Rejected before any platform call when the node
    /// does not report itself editable.
    pub fn set_text(&self, node: &NodeHandle, text: &str) -> Result<bool, AutomationError> {
        if !node.attributes().editable {
            debug!("set-text rejected: node is not editable");
            return Ok(false);
        }
        node.perform(&NodeAction::SetText(text.to_string()))
    }

    /// Type into whichever field currently holds input focus. No focused
    /// editable field is a normal `false`, not an error.
    #[instrument(skip(self, text))]
    pub fn type_into_focused(&self, text: &str) -> Result<bool, AutomationError> {
        match self.session.focused_node()? {
            Some(node) => self.set_text(&node, text),
            None => {
                debug!("no focused node to type into");
                Ok(false)
            }
        }
    }

    /// Scroll the first scrollable node on screen. `false` when nothing on
    /// screen scrolls.
    #[instrument(skip(self))]
    pub fn scroll(&self, direction: ScrollDirection) -> Result<bool, AutomationError> {
        let Some(root) = self.session.active_root()? else {
            return Ok(false);
        };
        let Some(node) = self.walker.find_scrollable(root)? else {
            debug!("no scrollable node on screen");
            return Ok(false);
        };
        let action = if direction.is_forward() {
            NodeAction::ScrollForward
        } else {
            NodeAction::ScrollBackward
        };
        node.perform(&action)
    }

    #[instrument(skip(self))]
    pub fn global(&self, action: GlobalAction) -> Result<bool, AutomationError> {
        self.session.perform_global_action(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeNode, FakeSession};

    #[test]
    fn set_text_requires_editable() {
        let session = Arc::new(FakeSession::new());
        session.set_root(FakeNode::label("read only"));
        let dispatcher = ActionDispatcher::new(session.clone());

        let root = session.active_root().unwrap().unwrap();
        assert!(!dispatcher.set_text(&root, "nope").unwrap());
        drop(root);
        // Rejection happens before the platform is asked to do anything.
        assert!(session.node_actions().is_empty());
    }

    #[test]
    fn type_into_focused_without_focus_is_false() {
        let session = Arc::new(FakeSession::new());
        let dispatcher = ActionDispatcher::new(session.clone());
        assert!(!dispatcher.type_into_focused("hi").unwrap());
        assert!(session.node_actions().is_empty());
    }

    #[test]
    fn type_into_focused_sets_text_on_editable_field() {
        let session = Arc::new(FakeSession::new());
        session.set_focused(Some(FakeNode::input("")));
        let dispatcher = ActionDispatcher::new(session.clone());
        assert!(dispatcher.type_into_focused("hi").unwrap());
        assert_eq!(
            session.node_actions(),
            vec![NodeAction::SetText("hi".into())]
        );
    }

    #[test]
    fn scroll_direction_maps_to_platform_action() {
        let session = Arc::new(FakeSession::new());
        let list = FakeNode::scrollable_list();
        session.set_root(FakeNode::container().with_child(list));
        let dispatcher = ActionDispatcher::new(session.clone());

        assert!(dispatcher.scroll(ScrollDirection::Down).unwrap());
        assert!(dispatcher.scroll(ScrollDirection::Up).unwrap());
        assert!(dispatcher.scroll(ScrollDirection::Forward).unwrap());
        assert!(dispatcher.scroll(ScrollDirection::Backward).unwrap());
        assert_eq!(
            session.node_actions(),
            vec![
                NodeAction::ScrollForward,
                NodeAction::ScrollBackward,
                NodeAction::ScrollForward,
                NodeAction::ScrollBackward,
            ]
        );
    }

    #[test]
    fn scroll_without_scrollable_node_is_false() {
        let session = Arc::new(FakeSession::new());
        session.set_root(FakeNode::label("static screen"));
        let dispatcher = ActionDispatcher::new(session.clone());
        assert!(!dispatcher.scroll(ScrollDirection::Down).unwrap());
    }

    #[test]
    fn global_actions_reach_the_session() {
        let session = Arc::new(FakeSession::new());
        let dispatcher = ActionDispatcher::new(session.clone());
        assert!(dispatcher.global(GlobalAction::Back).unwrap());
        assert!(dispatcher.global(GlobalAction::Notifications).unwrap());
        assert_eq!(
            session.global_actions(),
            vec![GlobalAction::Back, GlobalAction::Notifications]
        );
    }
}
