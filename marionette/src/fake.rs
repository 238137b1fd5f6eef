//! Instrumented in-memory session for tests.
//!
//! The fake keeps a declarative tree spec, hands out counted handles over
//! it, and records every effect (node actions, gestures, global actions) so
//! tests can assert both outcomes and resource discipline. The root and
//! focused node can be swapped mid-test to simulate a changing screen.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::actions::{GlobalAction, NodeAction};
use crate::element::NodeAttributes;
use crate::errors::AutomationError;
use crate::gesture::Gesture;
use crate::node::{NodeHandle, PlatformNode};
use crate::session::AccessibilitySession;

/// Declarative spec for one fake tree node.
#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    pub attrs: NodeAttributes,
    pub children: Vec<FakeNode>,
    /// When set, `child(0)` yields a copy of this node itself, simulating a
    /// cyclic tree that only the depth cap can stop.
    pub cyclic: bool,
    /// When set, acquiring any child fails, simulating a tree torn down
    /// mid-traversal.
    pub broken: bool,
}

impl FakeNode {
    pub fn new(attrs: NodeAttributes) -> Self {
        Self {
            attrs,
            children: Vec::new(),
            cyclic: false,
            broken: false,
        }
    }

    /// Non-interactive text node.
    pub fn label(text: &str) -> Self {
        Self::new(NodeAttributes {
            class_name: "android.widget.TextView".into(),
            text: text.into(),
            enabled: true,
            ..Default::default()
        })
    }

    /// Clickable, enabled button.
    pub fn button(text: &str) -> Self {
        Self::new(NodeAttributes {
            class_name: "android.widget.Button".into(),
            text: text.into(),
            clickable: true,
            enabled: true,
            focusable: true,
            ..Default::default()
        })
    }

    /// Editable, focusable input field.
    pub fn input(text: &str) -> Self {
        Self::new(NodeAttributes {
            class_name: "android.widget.EditText".into(),
            text: text.into(),
            editable: true,
            enabled: true,
            focusable: true,
            focused: true,
            ..Default::default()
        })
    }

    /// Purely structural container: no text, no interactivity.
    pub fn container() -> Self {
        Self::new(NodeAttributes {
            class_name: "android.widget.FrameLayout".into(),
            enabled: true,
            ..Default::default()
        })
    }

    /// Empty scrollable container.
    pub fn scrollable_list() -> Self {
        Self::new(NodeAttributes {
            class_name: "androidx.recyclerview.widget.RecyclerView".into(),
            scrollable: true,
            enabled: true,
            ..Default::default()
        })
    }

    pub fn with_child(mut self, child: FakeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<FakeNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn cyclic(mut self) -> Self {
        self.cyclic = true;
        self
    }

    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }
}

/// Acquire/release bookkeeping for the resource-balance invariant.
#[derive(Debug, Default)]
pub struct HandleCounters {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl HandleCounters {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn balanced(&self) -> bool {
        self.acquired() == self.released()
    }

    /// Handles acquired but not yet released.
    pub fn outstanding(&self) -> usize {
        self.acquired() - self.released()
    }
}

#[derive(Debug, Default)]
struct FakeState {
    counters: HandleCounters,
    node_actions: Mutex<Vec<NodeAction>>,
    gestures: Mutex<Vec<Gesture>>,
    global_actions: Mutex<Vec<GlobalAction>>,
}

impl FakeState {
    fn acquire(state: &Arc<Self>, spec: FakeNode) -> NodeHandle {
        state.counters.acquired.fetch_add(1, Ordering::SeqCst);
        NodeHandle::new(Box::new(FakePlatformNode {
            spec,
            state: state.clone(),
        }))
    }
}

#[derive(Debug)]
struct FakePlatformNode {
    spec: FakeNode,
    state: Arc<FakeState>,
}

impl PlatformNode for FakePlatformNode {
    fn attributes(&self) -> NodeAttributes {
        self.spec.attrs.clone()
    }

    fn child_count(&self) -> usize {
        if self.spec.cyclic || self.spec.broken {
            1
        } else {
            self.spec.children.len()
        }
    }

    fn child(&self, index: usize) -> Result<Option<NodeHandle>, AutomationError> {
        if self.spec.broken {
            return Err(AutomationError::internal_with_detail(
                "node vanished from the tree",
                "fake node marked broken",
            ));
        }
        if self.spec.cyclic {
            return Ok(Some(FakeState::acquire(&self.state, self.spec.clone())));
        }
        Ok(self
            .spec
            .children
            .get(index)
            .cloned()
            .map(|spec| FakeState::acquire(&self.state, spec)))
    }

    fn perform(&self, action: &NodeAction) -> Result<bool, AutomationError> {
        self.state
            .node_actions
            .lock()
            .expect("node action log poisoned")
            .push(action.clone());
        Ok(true)
    }

    fn release(&self) {
        self.state.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fake screen-reading session.
pub struct FakeSession {
    state: Arc<FakeState>,
    root: RwLock<Option<FakeNode>>,
    focused: RwLock<Option<FakeNode>>,
    package: RwLock<String>,
    gestures_enabled: AtomicBool,
}

impl FakeSession {
    pub fn new() -> Self {
        Self {
            state: Arc::new(FakeState::default()),
            root: RwLock::new(None),
            focused: RwLock::new(None),
            package: RwLock::new(String::new()),
            gestures_enabled: AtomicBool::new(true),
        }
    }

    pub fn set_root(&self, root: FakeNode) {
        *self.root.write().expect("root poisoned") = Some(root);
    }

    pub fn clear_root(&self) {
        *self.root.write().expect("root poisoned") = None;
    }

    pub fn set_focused(&self, node: Option<FakeNode>) {
        *self.focused.write().expect("focused poisoned") = node;
    }

    pub fn set_package(&self, package: &str) {
        *self.package.write().expect("package poisoned") = package.to_string();
    }

    /// Simulates a host below the minimum gesture capability.
    pub fn set_gestures_enabled(&self, enabled: bool) {
        self.gestures_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn counters(&self) -> &HandleCounters {
        &self.state.counters
    }

    pub fn node_actions(&self) -> Vec<NodeAction> {
        self.state
            .node_actions
            .lock()
            .expect("node action log poisoned")
            .clone()
    }

    pub fn dispatched_gestures(&self) -> Vec<Gesture> {
        self.state
            .gestures
            .lock()
            .expect("gesture log poisoned")
            .clone()
    }

    pub fn global_actions(&self) -> Vec<GlobalAction> {
        self.state
            .global_actions
            .lock()
            .expect("global action log poisoned")
            .clone()
    }
}

impl Default for FakeSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AccessibilitySession for FakeSession {
    fn active_root(&self) -> Result<Option<NodeHandle>, AutomationError> {
        Ok(self
            .root
            .read()
            .expect("root poisoned")
            .clone()
            .map(|spec| FakeState::acquire(&self.state, spec)))
    }

    fn focused_node(&self) -> Result<Option<NodeHandle>, AutomationError> {
        Ok(self
            .focused
            .read()
            .expect("focused poisoned")
            .clone()
            .map(|spec| FakeState::acquire(&self.state, spec)))
    }

    fn foreground_package(&self) -> Option<String> {
        let package = self.package.read().expect("package poisoned").clone();
        if package.is_empty() {
            None
        } else {
            Some(package)
        }
    }

    async fn dispatch_gesture(&self, gesture: &Gesture) -> Result<bool, AutomationError> {
        if !self.gestures_enabled.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.state
            .gestures
            .lock()
            .expect("gesture log poisoned")
            .push(gesture.clone());
        Ok(true)
    }

    fn perform_global_action(&self, action: GlobalAction) -> Result<bool, AutomationError> {
        self.state
            .global_actions
            .lock()
            .expect("global action log poisoned")
            .push(action);
        Ok(true)
    }
}
