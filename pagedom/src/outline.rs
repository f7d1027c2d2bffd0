//! Flat text view of a subtree, one row per labelled element.
//!
//! Used by line-based front ends (the terminal demo) to draw a document and
//! map a clicked row back to the element it shows.

use crate::document::Document;
use crate::element::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub node: NodeId,
    pub depth: usize,
    pub label: String,
}

/// Flatten the subtree under `scope` (inclusive).
///
/// An element gets a row when it has its own text, or an `alt` attribute
/// for images. Elements rejected by `visible` are skipped together with
/// their descendants.
pub fn outline<F>(doc: &Document, scope: NodeId, visible: F) -> Vec<OutlineRow>
where
    F: Fn(&Document, NodeId) -> bool,
{
    let mut rows = Vec::new();
    outline_recursive(doc, scope, 0, &visible, &mut rows);
    rows
}

fn outline_recursive<F>(
    doc: &Document,
    node: NodeId,
    depth: usize,
    visible: &F,
    rows: &mut Vec<OutlineRow>,
) where
    F: Fn(&Document, NodeId) -> bool,
{
    let Some(el) = doc.element(node) else {
        return;
    };
    if !visible(doc, node) {
        return;
    }

    let label = el
        .text()
        .or_else(|| el.attribute("alt"))
        .map(str::to_string);
    if let Some(label) = label {
        rows.push(OutlineRow { node, depth, label });
    }

    for child in el.children() {
        outline_recursive(doc, *child, depth + 1, visible, rows);
    }
}

/// Find the element drawn on screen row `y`, given rows drawn from `top`.
pub fn hit_test(rows: &[OutlineRow], top: u16, y: u16) -> Option<NodeId> {
    let index = y.checked_sub(top)? as usize;
    rows.get(index).map(|row| row.node)
}
