use crate::document::Document;
use crate::element::NodeId;
use crate::event::{Event, Key};
use crate::listener::{Listener, ListenerId, ListenerTarget};

impl Document {
    /// Deliver `event` and return how many handlers ran.
    ///
    /// Handlers on the target run first, then those on each ancestor, then
    /// document-level handlers. A handler removed by an earlier handler of
    /// the same dispatch is skipped. Events aimed at detached or removed
    /// elements are dropped.
    pub fn dispatch(&mut self, event: &Event) -> usize {
        let target = event.target();
        if !self.is_connected(target) {
            log::debug!("dispatch dropped {:?}: {} is not connected", event.kind(), target);
            return 0;
        }

        let kind = event.kind();
        let mut queue: Vec<(ListenerId, Listener)> = Vec::new();
        for node in self.ancestors_inclusive(target) {
            queue.extend(self.listeners.matching(ListenerTarget::Element(node), kind));
        }
        queue.extend(self.listeners.matching(ListenerTarget::Document, kind));

        let mut invoked = 0;
        for (id, handler) in queue {
            if !self.listeners.contains(id) {
                continue;
            }
            handler(self, event);
            invoked += 1;
        }

        log::debug!("dispatch {kind:?} target={target} invoked={invoked}");
        invoked
    }

    /// Left-click `node`.
    pub fn click(&mut self, node: NodeId) -> usize {
        self.dispatch(&Event::click(node))
    }

    /// Press `key` on the focused element, or on the root if nothing has
    /// focus.
    pub fn key_down(&mut self, key: Key) -> usize {
        let target = self.focused().unwrap_or(self.root());
        self.dispatch(&Event::key_down(target, key))
    }
}
