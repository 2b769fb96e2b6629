use std::collections::BTreeMap;

use uuid::Uuid;

use crate::types::{EngineError, Node, NodeId, Operation, ShapeState, ShapeTree};

impl ShapeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_with_uid(&mut self, uid: Uuid, name: String, operation: Operation) -> NodeId {
        self.nodes.insert(Node {
            uid,
            name,
            operation,
            children: Vec::new(),
            parent: None,
            refs: BTreeMap::new(),
            state: ShapeState::Empty,
        })
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, EngineError> {
        self.nodes.get(id).ok_or(EngineError::NodeNotFound { id })
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, EngineError> {
        self.nodes.get_mut(id).ok_or(EngineError::NodeNotFound { id })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.name == name)
            .map(|(id, _)| id)
    }

    pub fn find_by_uid(&self, uid: Uuid) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.uid == uid)
            .map(|(id, _)| id)
    }

    /// True when `ancestor` is `node` or lies on its parent chain.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// True when `from` reads `to`'s shape, directly or transitively,
    /// through children or explicit references.
    pub fn depends_on(&self, from: NodeId, to: NodeId) -> bool {
        let mut stack = vec![from];
        let mut seen = Vec::new();
        while let Some(id) = stack.pop() {
            if id == to {
                return true;
            }
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children.iter().copied());
                stack.extend(node.refs.values().map(|b| b.target));
            }
        }
        false
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(current) {
                out.push(current);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Insert `child` under `parent` at `index` (clamped), unlinking it from
    /// any previous parent. Returns the previous parent.
    pub(crate) fn link_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<Option<NodeId>, EngineError> {
        let previous = self.unlink(child)?;
        let siblings = &mut self.node_mut(parent)?.children;
        let pos = index.min(siblings.len());
        siblings.insert(pos, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(previous)
    }

    /// Remove `child` from its parent's child list. Returns the parent.
    pub(crate) fn unlink(&mut self, child: NodeId) -> Result<Option<NodeId>, EngineError> {
        let parent = self.node_mut(child)?.parent.take();
        if let Some(parent) = parent {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|c| *c != child);
            }
        }
        Ok(parent)
    }

    /// Move an existing child to a new position (clamped) among its siblings.
    pub(crate) fn reorder_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), EngineError> {
        let siblings = &mut self.node_mut(parent)?.children;
        let old_pos = siblings
            .iter()
            .position(|c| *c == child)
            .ok_or(EngineError::NotAChild { parent, child })?;
        siblings.remove(old_pos);
        let pos = index.min(siblings.len());
        siblings.insert(pos, child);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(id)
    }
}
