use std::collections::VecDeque;

use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::types::NodeId;

/// Coalesces change notifications into one deferred rebuild per node.
///
/// `notify` bumps a node's pending count and queues a single task on the
/// first notification. Tasks queued before a turn starts fire during that
/// turn; notifications raised while it runs go to the next one. Firing a
/// task drains the whole pending count, so every notification that arrived
/// before the fire is served by exactly one rebuild.
#[derive(Debug, Default)]
pub struct DebounceScheduler {
    pending: SecondaryMap<NodeId, u32>,
    queue: VecDeque<NodeId>,
}

impl DebounceScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change. Returns true when this scheduled a new task.
    pub fn notify(&mut self, node: NodeId) -> bool {
        match self.pending.get_mut(node) {
            Some(count) => {
                *count += 1;
                trace!(?node, pending = *count, "coalesced notification");
                false
            }
            None => {
                self.pending.insert(node, 1);
                self.queue.push_back(node);
                trace!(?node, "rebuild scheduled");
                true
            }
        }
    }

    /// Queue a first build for a node that has never been notified.
    /// Behaves as `notify`.
    pub fn schedule(&mut self, node: NodeId) -> bool {
        self.notify(node)
    }

    /// Drop a node's pending count. Its queued task, if any, becomes a no-op.
    pub fn cancel(&mut self, node: NodeId) {
        if let Some(count) = self.pending.remove(node) {
            debug!(?node, pending = count, "scheduled rebuild cancelled");
        }
    }

    /// Take the tasks due this turn.
    pub fn begin_turn(&mut self) -> Vec<NodeId> {
        self.queue.drain(..).collect()
    }

    /// Fire a task: drain its pending count.
    ///
    /// Returns the number of coalesced notifications, or `None` when the
    /// task was cancelled or already served this turn.
    pub fn fire(&mut self, node: NodeId) -> Option<u32> {
        self.pending.remove(node)
    }

    pub fn is_pending(&self, node: NodeId) -> bool {
        self.pending.contains_key(node)
    }

    pub fn pending_count(&self, node: NodeId) -> u32 {
        self.pending.get(node).copied().unwrap_or(0)
    }

    /// True when nothing is waiting to fire.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}
