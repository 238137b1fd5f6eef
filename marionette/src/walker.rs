//! Bounded depth-first traversal over the live element tree.

use tracing::{debug, instrument};

use crate::element::{ElementDescriptor, NodeAttributes};
use crate::errors::AutomationError;
use crate::node::NodeHandle;

/// Hard safety cap on traversal depth. Live trees can contain recycled or
/// self-referencing views; past this depth the walker returns what it has.
pub const MAX_TRAVERSAL_DEPTH: usize = 30;

#[derive(Debug, Clone)]
pub struct WalkerConfig {
    pub max_depth: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_TRAVERSAL_DEPTH,
        }
    }
}

/// Pre-order, left-to-right walker. Every child handle acquired to test or
/// descend is released when its scope ends; only a handle returned to the
/// caller survives the walk.
#[derive(Debug, Clone, Default)]
pub struct TreeWalker {
    config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Flattened snapshot of all meaningful nodes under `root`.
    ///
    /// Structural nodes are dropped from the output but their children are
    /// still visited.
    #[instrument(skip(self, root))]
    pub fn collect(&self, root: NodeHandle) -> Result<Vec<ElementDescriptor>, AutomationError> {
        let mut out = Vec::new();
        self.collect_into(&root, 0, &mut out)?;
        debug!(elements = out.len(), "screen snapshot collected");
        Ok(out)
    }

    fn collect_into(
        &self,
        node: &NodeHandle,
        depth: usize,
        out: &mut Vec<ElementDescriptor>,
    ) -> Result<(), AutomationError> {
        if depth >= self.config.max_depth {
            debug!(depth, "depth cap reached, pruning subtree");
            return Ok(());
        }
        let attrs = node.attributes();
        if attrs.is_meaningful() {
            out.push(ElementDescriptor::from(&attrs));
        }
        for index in 0..node.child_count() {
            if let Some(child) = node.child(index)? {
                self.collect_into(&child, depth + 1, out)?;
            }
        }
        Ok(())
    }

    /// First node in pre-order satisfying `predicate`. Ownership of the
    /// returned handle transfers to the caller; everything else acquired
    /// along the way is released before siblings are descended.
    pub fn find_first<P>(
        &self,
        root: NodeHandle,
        predicate: P,
    ) -> Result<Option<NodeHandle>, AutomationError>
    where
        P: Fn(&NodeAttributes) -> bool,
    {
        self.search(root, 0, &predicate)
    }

    fn search<P>(
        &self,
        node: NodeHandle,
        depth: usize,
        predicate: &P,
    ) -> Result<Option<NodeHandle>, AutomationError>
    where
        P: Fn(&NodeAttributes) -> bool,
    {
        if depth >= self.config.max_depth {
            return Ok(None);
        }
        if predicate(&node.attributes()) {
            return Ok(Some(node));
        }
        for index in 0..node.child_count() {
            if let Some(child) = node.child(index)? {
                if let Some(hit) = self.search(child, depth + 1, predicate)? {
                    return Ok(Some(hit));
                }
            }
        }
        Ok(None)
    }

    /// First node reporting `scrollable`, the target for scroll actions.
    pub fn find_scrollable(&self, root: NodeHandle) -> Result<Option<NodeHandle>, AutomationError> {
        self.find_first(root, |attrs| attrs.scrollable)
    }

    /// Pre-order list of every node's label (text, or description when the
    /// text is empty). Nodes with neither contribute nothing.
    #[instrument(skip(self, root))]
    pub fn collect_text(&self, root: NodeHandle) -> Result<Vec<String>, AutomationError> {
        let mut out = Vec::new();
        self.collect_text_into(&root, 0, &mut out)?;
        Ok(out)
    }

    fn collect_text_into(
        &self,
        node: &NodeHandle,
        depth: usize,
        out: &mut Vec<String>,
    ) -> Result<(), AutomationError> {
        if depth >= self.config.max_depth {
            return Ok(());
        }
        let attrs = node.attributes();
        let label = attrs.label();
        if !label.is_empty() {
            out.push(label.to_string());
        }
        for index in 0..node.child_count() {
            if let Some(child) = node.child(index)? {
                self.collect_text_into(&child, depth + 1, out)?;
            }
        }
        Ok(())
    }
}
