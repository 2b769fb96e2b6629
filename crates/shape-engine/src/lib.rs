pub mod config;
pub mod rebuild;
pub mod scheduler;
pub mod subscriptions;
pub mod tree;
pub mod types;

use kernel_bridge::Shape;
use modeling_ops::{KernelBundle, OpError, OpOutcome};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

pub use config::EngineConfig;
pub use scheduler::DebounceScheduler;
pub use subscriptions::{DependencyEdge, Subscriptions};
pub use types::*;

/// The incremental recompute engine.
///
/// Owns the node tree, the dependency edges between nodes and the debounce
/// scheduler. Mutating entry points only record the change and notify the
/// scheduler; the kernel is called from `tick` and `flush` alone.
pub struct Engine {
    tree: ShapeTree,
    edges: Subscriptions,
    scheduler: DebounceScheduler,
    /// Superseded shapes, released on the next turn.
    retired: Vec<Shape>,
    config: EngineConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            tree: ShapeTree::new(),
            edges: Subscriptions::new(),
            scheduler: DebounceScheduler::new(),
            retired: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Declaration ────────────────────────────────────────────────────────

    /// Add a detached node. Operation nodes are scheduled for a first build.
    pub fn add_node(&mut self, name: impl Into<String>, operation: Operation) -> NodeId {
        self.add_node_with_uid(Uuid::new_v4(), name, operation)
    }

    /// Add a node under a known uid, as when restoring a saved document.
    pub fn add_node_with_uid(
        &mut self,
        uid: Uuid,
        name: impl Into<String>,
        operation: Operation,
    ) -> NodeId {
        let is_leaf = operation.kind() == NodeKind::Leaf;
        let id = self.tree.insert_with_uid(uid, name.into(), operation);
        if !is_leaf {
            self.scheduler.schedule(id);
        }
        id
    }

    /// Insert `child` under `parent` at `index` (clamped to the child count).
    ///
    /// A child that already has a parent is moved, and its old parent is
    /// notified as well.
    pub fn attach_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), EngineError> {
        if self.tree.node(parent)?.operation.kind() == NodeKind::Leaf {
            return Err(EngineError::LeafParent { id: parent });
        }
        self.tree.node(child)?;

        let cycle = self.tree.is_ancestor(child, parent)
            || (self.config.reject_cycles && self.tree.depends_on(child, parent));
        if cycle {
            return Err(EngineError::DependencyCycle {
                consumer: parent,
                producer: child,
            });
        }

        let previous = self.tree.link_child(parent, child, index)?;
        if let Some(previous) = previous.filter(|p| *p != parent) {
            self.scheduler.notify(previous);
        }
        debug!(?parent, ?child, index, "child attached");
        self.scheduler.notify(parent);
        Ok(())
    }

    /// Move `child` to `index` among its siblings. Order is significant, so the
    /// parent is rebuilt.
    pub fn move_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), EngineError> {
        self.tree.reorder_child(parent, child, index)?;
        debug!(?parent, ?child, index, "child moved");
        self.scheduler.notify(parent);
        Ok(())
    }

    /// Remove a node and its whole subtree.
    ///
    /// Pending rebuilds of removed nodes are cancelled and every edge they
    /// hold or feed is torn down. Consumers that referenced a removed node
    /// lose that reference and are rebuilt.
    pub fn detach(&mut self, node: NodeId) -> Result<(), EngineError> {
        self.tree.node(node)?;
        let parent = self.tree.unlink(node)?;
        let removed = self.tree.subtree(node);

        for id in &removed {
            self.scheduler.cancel(*id);
            if let Some(n) = self.tree.remove(*id) {
                for binding in n.refs.values() {
                    self.edges.unsubscribe(binding.handle);
                }
                self.retired.extend(n.state.into_shape());
            }
        }

        for id in &removed {
            for handle in self.edges.edges_from(*id) {
                let Some(edge) = self.edges.unsubscribe(handle) else {
                    continue;
                };
                if let Some(consumer) = self.tree.get_mut(edge.consumer) {
                    consumer.refs.remove(&edge.field);
                    self.scheduler.notify(edge.consumer);
                }
            }
        }

        if let Some(parent) = parent {
            self.scheduler.notify(parent);
        }
        debug!(?node, removed = removed.len(), "node detached");
        Ok(())
    }

    /// Write one parameter field and schedule a rebuild.
    pub fn set_parameter(&mut self, node: NodeId, param: Param) -> Result<(), EngineError> {
        self.tree.node_mut(node)?.operation.apply(param)?;
        self.scheduler.notify(node);
        Ok(())
    }

    /// Replace every parameter of a node at once. The kind must not change.
    pub fn edit_operation(&mut self, node: NodeId, operation: Operation) -> Result<(), EngineError> {
        let n = self.tree.node_mut(node)?;
        let current = n.operation.kind();
        let requested = operation.kind();
        if current != requested {
            return Err(EngineError::KindMismatch { current, requested });
        }
        n.operation = operation;

        // A leaf's kind is read by its consumers, not by the leaf itself
        if current == NodeKind::Leaf {
            self.notify_dependents(node);
        } else {
            self.scheduler.notify(node);
        }
        Ok(())
    }

    /// Bind, rebind or clear an explicit reference.
    ///
    /// The old edge is torn down before the new one is installed. Binding
    /// the current target again changes nothing.
    pub fn set_explicit_ref(
        &mut self,
        node: NodeId,
        field: RefField,
        target: Option<NodeId>,
    ) -> Result<(), EngineError> {
        let operation = &self.tree.node(node)?.operation;
        if !operation.accepts_ref(field) {
            return Err(EngineError::ReferenceMismatch {
                kind: operation.kind(),
                field,
            });
        }
        if let Some(target) = target {
            self.tree.node(target)?;
            if self.config.reject_cycles && self.tree.depends_on(target, node) {
                return Err(EngineError::DependencyCycle {
                    consumer: node,
                    producer: target,
                });
            }
        }

        let current = self.tree.node(node)?.refs.get(&field).copied();
        if current.map(|b| b.target) == target {
            return Ok(());
        }

        if let Some(old) = current {
            self.edges.unsubscribe(old.handle);
            self.tree.node_mut(node)?.refs.remove(&field);
        }
        if let Some(target) = target {
            let handle = self.edges.subscribe(target, node, field);
            self.tree
                .node_mut(node)?
                .refs
                .insert(field, RefBinding { target, handle });
        }

        self.scheduler.notify(node);
        Ok(())
    }

    /// Hand a leaf its new shape and notify everything that reads it.
    ///
    /// On error the shape is still taken and released on the next turn.
    pub fn publish_leaf(&mut self, node: NodeId, shape: Shape) -> Result<(), EngineError> {
        let Some(n) = self.tree.get_mut(node) else {
            self.retired.push(shape);
            return Err(EngineError::NodeNotFound { id: node });
        };
        if n.operation.kind() != NodeKind::Leaf {
            self.retired.push(shape);
            return Err(EngineError::NotALeaf { id: node });
        }

        let old = std::mem::replace(&mut n.state, ShapeState::Ready(shape));
        self.retired.extend(old.into_shape());
        debug!(?node, "leaf published");
        self.notify_dependents(node);
        Ok(())
    }

    // ── Scheduling ─────────────────────────────────────────────────────────

    /// Run one scheduler turn. Returns the number of rebuilds performed.
    pub fn tick(&mut self, kb: &mut dyn KernelBundle) -> usize {
        self.release_retired(kb);

        let queued = self.scheduler.begin_turn();
        let due = self.order_by_inputs(queued);
        let mut rebuilt = 0;
        for id in due {
            // Cancelled, or already served earlier in this turn
            let Some(coalesced) = self.scheduler.fire(id) else {
                continue;
            };
            if !self.tree.contains(id) {
                continue;
            }
            debug!(?id, coalesced, "debounced rebuild");
            self.rebuild(id, kb);
            rebuilt += 1;
        }

        self.release_retired(kb);
        rebuilt
    }

    /// Run turns until nothing is pending. Returns the total number of rebuilds.
    pub fn flush(&mut self, kb: &mut dyn KernelBundle) -> Result<usize, EngineError> {
        let turns = self.config.max_settle_turns;
        let mut total = 0;
        for _ in 0..turns {
            if self.scheduler.is_idle() {
                break;
            }
            total += self.tick(kb);
        }
        self.release_retired(kb);

        if self.scheduler.is_idle() {
            Ok(total)
        } else {
            warn!(turns, "scheduler did not settle");
            Err(EngineError::SettleLimitExceeded { turns })
        }
    }

    /// Order a turn's tasks so that no node fires before a due node it reads.
    ///
    /// A producer that rebuilds earlier in the turn only bumps its consumer's
    /// pending count, so the consumer still fires once, after its inputs.
    /// Nodes caught in a reference cycle keep their queue order.
    fn order_by_inputs(&self, queued: Vec<NodeId>) -> Vec<NodeId> {
        let mut due: Vec<NodeId> = Vec::with_capacity(queued.len());
        for id in queued {
            if !due.contains(&id) {
                due.push(id);
            }
        }

        let mut ordered = Vec::with_capacity(due.len());
        while !due.is_empty() {
            let ready = due
                .iter()
                .position(|&id| {
                    !due.iter()
                        .any(|&input| input != id && self.tree.depends_on(id, input))
                })
                .unwrap_or(0);
            ordered.push(due.remove(ready));
        }
        ordered
    }

    #[instrument(skip(self, kb))]
    fn rebuild(&mut self, id: NodeId, kb: &mut dyn KernelBundle) {
        let options = self.config.op_options();
        let Some(node) = self.tree.get(id) else {
            return;
        };
        let result = rebuild::run_operation(&self.tree, node, kb, &options);
        self.apply_outcome(id, result);
    }

    /// Publish a rebuild result. Only a successful build replaces the shape.
    fn apply_outcome(&mut self, id: NodeId, result: Result<OpOutcome, OpError>) {
        let Some(node) = self.tree.get_mut(id) else {
            if let Ok(OpOutcome::Built(shape)) = result {
                self.retired.push(shape);
            }
            return;
        };

        let changed = match result {
            Ok(OpOutcome::Built(shape)) => {
                let old = std::mem::replace(&mut node.state, ShapeState::Ready(shape));
                self.retired.extend(old.into_shape());
                true
            }
            Ok(OpOutcome::Cleared) => {
                let old = std::mem::replace(&mut node.state, ShapeState::Empty);
                match old.into_shape() {
                    Some(shape) => {
                        self.retired.push(shape);
                        true
                    }
                    None => false,
                }
            }
            Ok(OpOutcome::Skipped) => false,
            Err(error) => {
                warn!(node = %node.name, %error, "rebuild failed");
                let last_good = std::mem::replace(&mut node.state, ShapeState::Empty).into_shape();
                node.state = ShapeState::Failed { error, last_good };
                false
            }
        };

        if changed {
            self.notify_dependents(id);
        }
    }

    /// Notify the tree parent and every explicit subscriber of `id`.
    fn notify_dependents(&mut self, id: NodeId) {
        if let Some(parent) = self.tree.get(id).and_then(|n| n.parent) {
            self.scheduler.notify(parent);
        }
        for consumer in self.edges.consumers_of(id) {
            self.scheduler.notify(consumer);
        }
    }

    fn release_retired(&mut self, kb: &mut dyn KernelBundle) {
        for shape in self.retired.drain(..) {
            kb.release(shape);
        }
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn tree(&self) -> &ShapeTree {
        &self.tree
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    pub fn shape(&self, id: NodeId) -> Option<&Shape> {
        self.tree.get(id).and_then(|n| n.state.shape())
    }

    pub fn state(&self, id: NodeId) -> Option<&ShapeState> {
        self.tree.get(id).map(|n| &n.state)
    }

    /// The node's shape if its last rebuild succeeded, else why not.
    pub fn require_shape(&self, id: NodeId) -> Result<&Shape, EngineError> {
        match &self.tree.node(id)?.state {
            ShapeState::Ready(shape) => Ok(shape),
            ShapeState::Failed { error, .. } => Err(error.clone().into()),
            ShapeState::Empty => Err(EngineError::NotBuilt { id }),
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn reference(&self, id: NodeId, field: RefField) -> Option<NodeId> {
        self.tree
            .get(id)
            .and_then(|n| n.refs.get(&field))
            .map(|b| b.target)
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.tree.find_by_name(name)
    }

    /// One entry per node whose last rebuild failed.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.tree
            .iter()
            .filter_map(|(id, n)| {
                n.state.error().map(|error| Diagnostic {
                    node: id,
                    name: n.name.clone(),
                    message: error.to_string(),
                })
            })
            .collect()
    }

    pub fn is_pending(&self, id: NodeId) -> bool {
        self.scheduler.is_pending(id)
    }

    /// True when no rebuild is owed.
    pub fn is_settled(&self) -> bool {
        self.scheduler.is_idle()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
