use slotmap::SlotMap;
use tracing::debug;

use crate::types::{NodeId, RefField, SubscriptionHandle};

/// A consumer observing a producer's shape changes through an explicit reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyEdge {
    pub producer: NodeId,
    pub consumer: NodeId,
    pub field: RefField,
}

/// Registry of live dependency edges.
///
/// `subscribe` hands out a handle and `unsubscribe` consumes it; edges are
/// never looked up by comparing producer/consumer pairs.
#[derive(Debug, Default)]
pub struct Subscriptions {
    edges: SlotMap<SubscriptionHandle, DependencyEdge>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        producer: NodeId,
        consumer: NodeId,
        field: RefField,
    ) -> SubscriptionHandle {
        let handle = self.edges.insert(DependencyEdge {
            producer,
            consumer,
            field,
        });
        debug!(?producer, ?consumer, ?field, ?handle, "dependency edge installed");
        handle
    }

    /// Tear down an edge. Returns it, or `None` if it was already gone.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> Option<DependencyEdge> {
        let edge = self.edges.remove(handle);
        if let Some(edge) = &edge {
            debug!(producer = ?edge.producer, consumer = ?edge.consumer, field = ?edge.field, ?handle, "dependency edge removed");
        }
        edge
    }

    pub fn get(&self, handle: SubscriptionHandle) -> Option<&DependencyEdge> {
        self.edges.get(handle)
    }

    /// Consumers to notify when `producer`'s shape changes.
    pub fn consumers_of(&self, producer: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges
            .values()
            .filter(move |e| e.producer == producer)
            .map(|e| e.consumer)
    }

    /// Handles of every edge observing `producer`.
    pub fn edges_from(&self, producer: NodeId) -> Vec<SubscriptionHandle> {
        self.edges
            .iter()
            .filter(|(_, e)| e.producer == producer)
            .map(|(h, _)| h)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut arena: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn test_subscribe_then_unsubscribe() {
        let n = ids(2);
        let mut subs = Subscriptions::new();
        let h = subs.subscribe(n[0], n[1], RefField::Spline);
        assert_eq!(subs.consumers_of(n[0]).collect::<Vec<_>>(), vec![n[1]]);

        let edge = subs.unsubscribe(h).unwrap();
        assert_eq!(edge.field, RefField::Spline);
        assert!(subs.is_empty());
        assert_eq!(subs.consumers_of(n[0]).count(), 0);
    }

    #[test]
    fn test_stale_handle_is_noop() {
        let n = ids(2);
        let mut subs = Subscriptions::new();
        let h = subs.subscribe(n[0], n[1], RefField::Target);
        subs.unsubscribe(h);
        let h2 = subs.subscribe(n[0], n[1], RefField::Target);

        // The old handle must not tear down the new edge
        assert!(subs.unsubscribe(h).is_none());
        assert!(subs.get(h2).is_some());
    }

    #[test]
    fn test_same_pair_two_fields() {
        let n = ids(2);
        let mut subs = Subscriptions::new();
        let h1 = subs.subscribe(n[0], n[1], RefField::Shape1);
        let _h2 = subs.subscribe(n[0], n[1], RefField::Shape2);
        subs.unsubscribe(h1);
        assert_eq!(subs.edges_from(n[0]).len(), 1);
    }
}
