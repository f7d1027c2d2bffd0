//! Listeners of a mounted select.
//!
//! Three registrations per instance: clicks on the select root, clicks
//! anywhere in the document, and key presses anywhere in the document.
//! Element listeners run before document listeners, so a click inside the
//! select is fully handled by the time the document listener sees it.

use std::rc::Rc;

use pagedom::{Document, Event, EventKind, Key, Listener, ListenerTarget};

use super::Shared;
use super::state::{FocusStep, Visibility};
use crate::markup::{ITEM_CLASS, TAG_ATTR};

type Handler = fn(&Shared, &mut Document, &Event);

fn listener(shared: &Rc<Shared>, handler: Handler) -> Listener {
    let shared = Rc::clone(shared);
    Rc::new(move |doc: &mut Document, event: &Event| handler(&shared, doc, event))
}

/// Attach the three listeners and remember their tokens for teardown.
pub(super) fn register(shared: &Rc<Shared>, doc: &mut Document) {
    let root = shared.state.borrow().parts.root;

    let ids = vec![
        doc.add_event_listener(
            ListenerTarget::Element(root),
            EventKind::Click,
            listener(shared, on_click_inside),
        ),
        doc.add_event_listener(
            ListenerTarget::Document,
            EventKind::Click,
            listener(shared, on_document_click),
        ),
        doc.add_event_listener(
            ListenerTarget::Document,
            EventKind::KeyDown,
            listener(shared, on_document_key),
        ),
    ];

    shared.state.borrow_mut().listeners = ids;
}

/// Header clicks toggle the list; item clicks select that item.
fn on_click_inside(shared: &Shared, doc: &mut Document, event: &Event) {
    let target = event.target();
    let mut state = shared.state.borrow_mut();

    if doc.contains(state.parts.header, target) {
        state.toggle(doc);
        return;
    }

    if !doc.has_class(target, ITEM_CLASS) {
        return;
    }

    let Some(id) = doc.dataset(target, "id").and_then(|v| v.parse::<i64>().ok()) else {
        log::warn!("select {} item {} has no usable data-id", state.tag, target);
        return;
    };

    drop(state);
    shared.select(doc, id);
}

/// Close when the click lands outside this select (including inside another
/// select).
fn on_document_click(shared: &Shared, doc: &mut Document, event: &Event) {
    let mut state = shared.state.borrow_mut();
    if !state.is_open() {
        return;
    }

    let inside_self = doc
        .closest_match(event.target(), &state.root_selector)
        .is_some_and(|root| doc.attribute(root, TAG_ATTR) == Some(state.tag.as_str()));

    if !inside_self {
        state.set_visibility(doc, Visibility::Hidden);
    }
}

/// Arrow keys cycle focus through the header and items while open.
fn on_document_key(shared: &Shared, doc: &mut Document, event: &Event) {
    let step = match event.key() {
        Some(Key::Up) => FocusStep::Prev,
        Some(Key::Down) => FocusStep::Next,
        _ => return,
    };

    let mut state = shared.state.borrow_mut();
    if state.is_open() {
        state.step_focus(doc, step);
    }
}
