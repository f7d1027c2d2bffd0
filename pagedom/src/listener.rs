//! Listener registry.
//!
//! Every registration gets its own [`ListenerId`]. Removal goes through that
//! token only, so two owners listening for the same event type on the same
//! target can never remove each other's handlers.

use std::rc::Rc;

use crate::document::Document;
use crate::element::NodeId;
use crate::event::{Event, EventKind};

/// Event handler. Receives the document mutably so it can react in place.
pub type Listener = Rc<dyn Fn(&mut Document, &Event)>;

/// Token identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Element(NodeId),
    /// Fires after every element on the bubble path.
    Document,
}

struct Registration {
    id: ListenerId,
    target: ListenerTarget,
    kind: EventKind,
    handler: Listener,
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<Registration>,
    next_id: u64,
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("count", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl ListenerRegistry {
    pub(crate) fn add(
        &mut self,
        target: ListenerTarget,
        kind: EventKind,
        handler: Listener,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Registration {
            id,
            target,
            kind,
            handler,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.id != id);
        before != self.entries.len()
    }

    /// Drop every listener attached to one of `nodes`.
    pub(crate) fn remove_targets(&mut self, nodes: &[NodeId]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|r| match r.target {
            ListenerTarget::Element(node) => !nodes.contains(&node),
            ListenerTarget::Document => true,
        });
        before - self.entries.len()
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|r| r.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Handlers for `target`/`kind`, in registration order.
    pub(crate) fn matching(
        &self,
        target: ListenerTarget,
        kind: EventKind,
    ) -> impl Iterator<Item = (ListenerId, Listener)> + '_ {
        self.entries
            .iter()
            .filter(move |r| r.target == target && r.kind == kind)
            .map(|r| (r.id, Rc::clone(&r.handler)))
    }
}
