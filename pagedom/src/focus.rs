use crate::document::Document;
use crate::element::NodeId;

/// Tracks which element is currently focused.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Focus an element.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.focused == Some(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Focus the next element of `order` (Tab navigation).
    /// Returns the newly focused element if focus changed.
    pub fn focus_next(&mut self, order: &[NodeId]) -> Option<NodeId> {
        if order.is_empty() {
            return None;
        }

        let new_focus = match self.focused {
            None => order[0],
            Some(current) => match order.iter().position(|id| *id == current) {
                Some(i) => order[(i + 1) % order.len()],
                None => order[0],
            },
        };

        if self.focus(new_focus) {
            Some(new_focus)
        } else {
            None
        }
    }

    /// Focus the previous element of `order` (Shift+Tab navigation).
    /// Returns the newly focused element if focus changed.
    pub fn focus_prev(&mut self, order: &[NodeId]) -> Option<NodeId> {
        if order.is_empty() {
            return None;
        }

        let last = order.len() - 1;
        let new_focus = match self.focused {
            None => order[last],
            Some(current) => match order.iter().position(|id| *id == current) {
                Some(0) | None => order[last],
                Some(i) => order[i - 1],
            },
        };

        if self.focus(new_focus) {
            Some(new_focus)
        } else {
            None
        }
    }
}

/// Collect the document's tab sequence in document order.
///
/// Natively focusable elements take part unless they opt out with a negative
/// `tabindex`; any other element needs an explicit `tabindex >= 0`.
pub fn collect_tabbable(doc: &Document) -> Vec<NodeId> {
    let mut result = Vec::new();
    collect_tabbable_recursive(doc, doc.root(), &mut result);
    result
}

fn collect_tabbable_recursive(doc: &Document, node: NodeId, result: &mut Vec<NodeId>) {
    let Some(el) = doc.element(node) else {
        return;
    };

    let tabbable = match el.tab_index() {
        Some(index) => index >= 0,
        None => el.is_natively_focusable(),
    };
    if tabbable {
        result.push(node);
    }

    for child in el.children() {
        collect_tabbable_recursive(doc, *child, result);
    }
}
