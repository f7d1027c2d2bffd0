//! The document: an element arena with a root, focus and listeners.

use crate::element::{Element, ElementSpec, NodeId};
use crate::event::EventKind;
use crate::focus::{collect_tabbable, FocusState};
use crate::listener::{Listener, ListenerId, ListenerRegistry, ListenerTarget};
use crate::selector::{Selector, SelectorError};

#[derive(Debug)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    root: NodeId,
    body: NodeId,
    pub(crate) focus: FocusState,
    pub(crate) listeners: ListenerRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding `<html><body></body></html>`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            focus: FocusState::new(),
            listeners: ListenerRegistry::default(),
        };
        doc.root = doc.create_element("html");
        doc.body = doc.create_element("body");
        doc.attach(doc.root, doc.body);
        doc
    }

    /// The document element (`<html>`).
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    /// Whether `node` still exists (it may be detached).
    pub fn exists(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    /// Whether `node` is reachable from the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.element(id).and_then(Element::parent);
        }
        false
    }

    // -------------------------------------------------------------------------
    // Tree construction
    // -------------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Element::new(tag)));
        id
    }

    /// Materialise a spec as a detached subtree and return its root.
    pub fn build(&mut self, spec: &ElementSpec) -> NodeId {
        let node = self.create_element(&spec.tag);
        if let Some(el) = self.element_mut(node) {
            for class in &spec.classes {
                el.add_class(class);
            }
            for (name, value) in &spec.attributes {
                el.attributes.insert(name.clone(), value.clone());
            }
            el.text = spec.text.clone();
        }
        for child in &spec.children {
            let child_id = self.build(child);
            self.attach(node, child_id);
        }
        node
    }

    /// Append `child` under `parent`, detaching it from any previous parent.
    /// Returns false when either node is gone or `child` is an ancestor of
    /// `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.exists(parent) || !self.exists(child) || self.contains(child, parent) {
            log::warn!("append_child rejected parent={parent} child={child}");
            return false;
        }
        self.detach(child);
        self.attach(parent, child);
        true
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(el) = self.element_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.element_mut(parent) {
            el.children.push(child);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.element(node).and_then(Element::parent) else {
            return;
        };
        if let Some(el) = self.element_mut(parent) {
            el.children.retain(|c| *c != node);
        }
        if let Some(el) = self.element_mut(node) {
            el.parent = None;
        }
    }

    /// Remove `node` and its subtree.
    ///
    /// Every handle into the subtree becomes invalid, listeners attached to
    /// those elements are dropped, and focus is cleared if it was inside.
    /// The root and body cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root || node == self.body || !self.exists(node) {
            return false;
        }

        self.detach(node);

        let mut subtree = vec![node];
        subtree.extend(self.descendants(node));

        if let Some(focused) = self.focus.focused() {
            if subtree.contains(&focused) {
                self.focus.blur();
            }
        }

        let dropped = self.listeners.remove_targets(&subtree);
        for id in &subtree {
            if let Some(slot) = self.nodes.get_mut(id.0) {
                *slot = None;
            }
        }

        log::debug!(
            "remove node={} subtree={} listeners_dropped={}",
            node,
            subtree.len(),
            dropped
        );
        true
    }

    // -------------------------------------------------------------------------
    // Classes, attributes, text
    // -------------------------------------------------------------------------

    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        self.element_mut(node)
            .map(|el| el.add_class(class))
            .unwrap_or(false)
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        self.element_mut(node)
            .map(|el| el.remove_class(class))
            .unwrap_or(false)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .map(|el| el.has_class(class))
            .unwrap_or(false)
    }

    /// Class list in insertion order. Empty for removed nodes.
    pub fn classes(&self, node: NodeId) -> &[String] {
        self.element(node).map(|el| el.classes()).unwrap_or(&[])
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(node) {
            el.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Option<String> {
        self.element_mut(node)
            .and_then(|el| el.attributes.remove(name))
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|el| el.attribute(name))
    }

    /// Read a `data-<key>` attribute.
    pub fn dataset(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attribute(node, &format!("data-{key}"))
    }

    /// Replace the element's content with `text`, removing its children.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        let children = self
            .element(node)
            .map(|el| el.children.clone())
            .unwrap_or_default();
        for child in children {
            self.remove(child);
        }
        if let Some(el) = self.element_mut(node) {
            el.text = Some(text.into());
        }
    }

    /// Own text followed by the text of every descendant, in document order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(el) = self.element(node) else {
            return;
        };
        if let Some(text) = el.text() {
            out.push_str(text);
        }
        for child in el.children() {
            self.collect_text(*child, out);
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).and_then(Element::parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node).map(Element::children).unwrap_or(&[])
    }

    /// Inclusive: a node contains itself.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// `node` followed by its ancestors up to the topmost one.
    pub fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = if self.exists(node) { Some(node) } else { None };
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }
        path
    }

    /// Descendants of `node` in document order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(node, &mut out);
        out
    }

    fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(node) {
            out.push(*child);
            self.collect_descendants(*child, out);
        }
    }

    fn search_space(&self, scope: Option<NodeId>) -> Vec<NodeId> {
        match scope {
            Some(node) => self.descendants(node),
            None => {
                let mut all = vec![self.root];
                all.extend(self.descendants(self.root));
                all
            }
        }
    }

    pub fn matches_selector(&self, node: NodeId, selector: &Selector) -> bool {
        selector.matches(self, node)
    }

    pub fn matches(&self, node: NodeId, selector: &str) -> Result<bool, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.matches_selector(node, &selector))
    }

    /// First match in document order. `scope: None` searches the whole
    /// document, `Some(node)` only the descendants of `node`.
    pub fn query(&self, selector: &Selector, scope: Option<NodeId>) -> Option<NodeId> {
        self.search_space(scope)
            .into_iter()
            .find(|id| self.matches_selector(*id, selector))
    }

    pub fn query_all(&self, selector: &Selector, scope: Option<NodeId>) -> Vec<NodeId> {
        self.search_space(scope)
            .into_iter()
            .filter(|id| self.matches_selector(*id, selector))
            .collect()
    }

    pub fn query_selector(
        &self,
        selector: &str,
        scope: Option<NodeId>,
    ) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.query(&selector, scope))
    }

    pub fn query_selector_all(
        &self,
        selector: &str,
        scope: Option<NodeId>,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.query_all(&selector, scope))
    }

    /// Nearest inclusive ancestor matching `selector`.
    pub fn closest_match(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        self.ancestors_inclusive(node)
            .into_iter()
            .find(|id| self.matches_selector(*id, selector))
    }

    pub fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.closest_match(node, &selector))
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// Focus a connected element. Returns true if focus changed.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_connected(node) {
            log::warn!("focus ignored for detached {node}");
            return false;
        }
        self.focus.focus(node)
    }

    /// Blur `node` if it holds focus. Returns true if focus was cleared.
    pub fn blur(&mut self, node: NodeId) -> bool {
        if self.focus.focused() == Some(node) {
            self.focus.blur()
        } else {
            false
        }
    }

    pub fn tab_order(&self) -> Vec<NodeId> {
        collect_tabbable(self)
    }

    pub fn focus_next(&mut self) -> Option<NodeId> {
        let order = self.tab_order();
        self.focus.focus_next(&order)
    }

    pub fn focus_prev(&mut self) -> Option<NodeId> {
        let order = self.tab_order();
        self.focus.focus_prev(&order)
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    pub fn add_event_listener(
        &mut self,
        target: ListenerTarget,
        kind: EventKind,
        handler: Listener,
    ) -> ListenerId {
        let id = self.listeners.add(target, kind, handler);
        log::debug!("add_event_listener id={id:?} target={target:?} kind={kind:?}");
        id
    }

    /// Remove exactly the registration behind `id`.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(id);
        log::debug!("remove_event_listener id={id:?} removed={removed}");
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
