//! Select state and the operations that mutate it.
//!
//! Every operation updates the state and the select's elements together, so
//! the document and the state never disagree once a call returns.

use pagedom::{Document, ListenerId, NodeId, Selector};

use crate::error::OptionError;
use crate::item::{self, SelectItem};
use crate::markup::{self, ACTIVE_CLASS, OPEN_CLASS};
use crate::tag::InstanceTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visibility {
    Shown,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FocusStep {
    Prev,
    Next,
}

/// Elements of a mounted select.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SelectParts {
    pub(crate) root: NodeId,
    pub(crate) header: NodeId,
    pub(crate) title: NodeId,
    pub(crate) body: NodeId,
}

/// An option and the element showing it.
#[derive(Debug, Clone)]
struct Entry {
    item: SelectItem,
    node: NodeId,
}

#[derive(Debug)]
pub(crate) struct SelectState {
    pub(crate) tag: InstanceTag,
    pub(crate) parts: SelectParts,
    /// Matches the root of any select, used to tell instances apart.
    pub(crate) root_selector: Selector,
    entries: Vec<Entry>,
    /// Header first, then one element per entry.
    focus_order: Vec<NodeId>,
    focus_cursor: usize,
    is_open: bool,
    active: Option<SelectItem>,
    /// Header title shown while nothing is active.
    idle_title: String,
    pub(crate) listeners: Vec<ListenerId>,
    pub(crate) destroyed: bool,
}

impl SelectState {
    pub(crate) fn new(
        tag: InstanceTag,
        parts: SelectParts,
        items: Vec<SelectItem>,
        item_nodes: Vec<NodeId>,
        idle_title: String,
    ) -> Self {
        let entries: Vec<Entry> = items
            .into_iter()
            .zip(item_nodes)
            .map(|(item, node)| Entry { item, node })
            .collect();

        let mut focus_order = Vec::with_capacity(entries.len() + 1);
        focus_order.push(parts.header);
        focus_order.extend(entries.iter().map(|e| e.node));

        Self {
            tag,
            parts,
            root_selector: Selector::class(markup::ROOT_CLASS),
            entries,
            focus_order,
            focus_cursor: 0,
            is_open: false,
            active: None,
            idle_title,
            listeners: Vec::new(),
            destroyed: false,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub(crate) fn is_open(&self) -> bool {
        self.is_open
    }

    pub(crate) fn active(&self) -> Option<&SelectItem> {
        self.active.as_ref()
    }

    pub(crate) fn items(&self) -> Vec<SelectItem> {
        self.entries.iter().map(|e| e.item.clone()).collect()
    }

    pub(crate) fn focus_order_len(&self) -> usize {
        self.focus_order.len()
    }

    pub(crate) fn focus_cursor(&self) -> usize {
        self.focus_cursor
    }

    fn position(&self, id: i64) -> Option<usize> {
        item::position_of(self.entries.iter().map(|e| &e.item), id)
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub(crate) fn set_visibility(&mut self, doc: &mut Document, visibility: Visibility) {
        match visibility {
            Visibility::Shown => {
                self.is_open = true;
                doc.add_class(self.parts.root, OPEN_CLASS);
            }
            Visibility::Hidden => {
                self.is_open = false;
                self.focus_cursor = 0;
                doc.remove_class(self.parts.root, OPEN_CLASS);
            }
        }
        log::debug!("select {} visibility={:?}", self.tag, visibility);
    }

    pub(crate) fn toggle(&mut self, doc: &mut Document) {
        let next = if self.is_open {
            Visibility::Hidden
        } else {
            Visibility::Shown
        };
        self.set_visibility(doc, next);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Make the option with `id` active and close the list.
    ///
    /// Returns the selected item so the caller can notify listeners once the
    /// state is no longer borrowed. Unknown ids are ignored and return None.
    pub(crate) fn select_item(&mut self, doc: &mut Document, id: i64) -> Option<SelectItem> {
        let Some(index) = self.position(id) else {
            log::debug!("select {} ignoring unknown option id {}", self.tag, id);
            return None;
        };

        for (i, entry) in self.entries.iter().enumerate() {
            if i == index {
                doc.add_class(entry.node, ACTIVE_CLASS);
            } else {
                doc.remove_class(entry.node, ACTIVE_CLASS);
            }
        }

        let selected = self.entries[index].item.clone();
        doc.set_text(self.parts.title, selected.text.clone());
        self.active = Some(selected.clone());

        self.set_visibility(doc, Visibility::Hidden);
        for entry in &self.entries {
            doc.blur(entry.node);
        }
        doc.focus(self.parts.header);

        log::debug!("select {} active option id={}", self.tag, selected.id);
        Some(selected)
    }

    // -------------------------------------------------------------------------
    // Option list
    // -------------------------------------------------------------------------

    pub(crate) fn add_item(
        &mut self,
        doc: &mut Document,
        item: SelectItem,
    ) -> Result<(), OptionError> {
        if self.position(item.id).is_some() {
            return Err(OptionError::DuplicateId(item.id));
        }

        let node = doc.build(&markup::item_spec(&item));
        doc.append_child(self.parts.body, node);

        log::debug!("select {} added option id={}", self.tag, item.id);
        self.entries.push(Entry { item, node });
        self.focus_order.push(node);
        Ok(())
    }

    pub(crate) fn delete_item(&mut self, doc: &mut Document, id: i64) -> Result<(), OptionError> {
        if self.entries.len() == 1 {
            return Err(OptionError::EmptyList);
        }
        let index = self.position(id).ok_or(OptionError::NotFound(id))?;

        let entry = self.entries.remove(index);
        if let Some(slot) = self.focus_order.iter().position(|node| *node == entry.node) {
            self.focus_order.remove(slot);
            // Keep the cursor on the same element when an earlier one goes
            if slot < self.focus_cursor {
                self.focus_cursor -= 1;
            }
        }
        doc.remove(entry.node);

        if self.active.as_ref().is_some_and(|a| a.id == id) {
            self.active = None;
            doc.set_text(self.parts.title, self.idle_title.clone());
        }

        let last = self.focus_order.len() - 1;
        if self.focus_cursor > last {
            self.focus_cursor = last;
        }

        log::debug!("select {} deleted option id={}", self.tag, id);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Keyboard focus
    // -------------------------------------------------------------------------

    /// Move the focus cursor one step, wrapping at both ends, and focus the
    /// element under it.
    pub(crate) fn step_focus(&mut self, doc: &mut Document, step: FocusStep) {
        let last = self.focus_order.len() - 1;
        self.focus_cursor = match step {
            FocusStep::Prev if self.focus_cursor == 0 => last,
            FocusStep::Prev => self.focus_cursor - 1,
            FocusStep::Next if self.focus_cursor >= last => 0,
            FocusStep::Next => self.focus_cursor + 1,
        };
        doc.focus(self.focus_order[self.focus_cursor]);
    }
}
