use std::cell::RefCell;
use std::rc::Rc;

use pagedom::{Document, ElementSpec, Event, EventKind, Key, ListenerTarget, NodeId};

fn setup() -> (Document, NodeId, NodeId) {
    let mut doc = Document::new();
    let outer = doc.build(
        &ElementSpec::new("div")
            .class("outer")
            .child(ElementSpec::new("button").class("inner").text("Go")),
    );
    let body = doc.body();
    doc.append_child(body, outer);
    let inner = doc.children(outer)[0];
    (doc, outer, inner)
}

fn recorder(log: &Rc<RefCell<Vec<String>>>, name: &str) -> pagedom::Listener {
    let log = Rc::clone(log);
    let name = name.to_string();
    Rc::new(move |_doc: &mut Document, _ev: &Event| log.borrow_mut().push(name.clone()))
}

// ============================================================================
// Bubble order
// ============================================================================

#[test]
fn test_click_bubbles_target_then_ancestors_then_document() {
    let (mut doc, outer, inner) = setup();
    let log = Rc::new(RefCell::new(Vec::new()));

    doc.add_event_listener(ListenerTarget::Document, EventKind::Click, recorder(&log, "document"));
    doc.add_event_listener(
        ListenerTarget::Element(outer),
        EventKind::Click,
        recorder(&log, "outer"),
    );
    doc.add_event_listener(
        ListenerTarget::Element(inner),
        EventKind::Click,
        recorder(&log, "inner"),
    );

    assert_eq!(doc.click(inner), 3);
    assert_eq!(*log.borrow(), vec!["inner", "outer", "document"]);
}

#[test]
fn test_listeners_filter_by_kind() {
    let (mut doc, outer, _inner) = setup();
    let log = Rc::new(RefCell::new(Vec::new()));
    doc.add_event_listener(
        ListenerTarget::Element(outer),
        EventKind::KeyDown,
        recorder(&log, "key"),
    );

    assert_eq!(doc.click(outer), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_same_node_listeners_run_in_registration_order() {
    let (mut doc, outer, _inner) = setup();
    let log = Rc::new(RefCell::new(Vec::new()));
    doc.add_event_listener(
        ListenerTarget::Element(outer),
        EventKind::Click,
        recorder(&log, "first"),
    );
    doc.add_event_listener(
        ListenerTarget::Element(outer),
        EventKind::Click,
        recorder(&log, "second"),
    );

    doc.click(outer);
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_remove_event_listener_by_token_only() {
    let (mut doc, outer, _inner) = setup();
    let log = Rc::new(RefCell::new(Vec::new()));
    let a = doc.add_event_listener(ListenerTarget::Document, EventKind::Click, recorder(&log, "a"));
    doc.add_event_listener(ListenerTarget::Document, EventKind::Click, recorder(&log, "b"));

    assert!(doc.remove_event_listener(a));
    assert!(!doc.remove_event_listener(a));
    assert_eq!(doc.listener_count(), 1);

    doc.click(outer);
    assert_eq!(*log.borrow(), vec!["b"]);
}

#[test]
fn test_listener_removed_mid_dispatch_is_skipped() {
    let (mut doc, outer, inner) = setup();
    let log = Rc::new(RefCell::new(Vec::new()));

    let victim = doc.add_event_listener(

        ListenerTarget::Document,

        EventKind::Click,

        recorder(&log, "victim"),

    );
    let killer_log = Rc::clone(&log);
    doc.add_event_listener(
        ListenerTarget::Element(outer),
        EventKind::Click,
        Rc::new(move |doc: &mut Document, _ev: &Event| {
            killer_log.borrow_mut().push("killer".to_string());
            doc.remove_event_listener(victim);
        }),
    );

    assert_eq!(doc.click(inner), 1);
    assert_eq!(*log.borrow(), vec!["killer"]);
}

#[test]
fn test_removing_element_drops_its_listeners() {
    let (mut doc, outer, inner) = setup();
    let log = Rc::new(RefCell::new(Vec::new()));
    doc.add_event_listener(
        ListenerTarget::Element(inner),
        EventKind::Click,
        recorder(&log, "inner"),
    );
    doc.add_event_listener(ListenerTarget::Document, EventKind::Click, recorder(&log, "document"));

    doc.remove(outer);
    assert_eq!(doc.listener_count(), 1);
    // Events aimed at removed elements go nowhere
    assert_eq!(doc.click(inner), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_detached_target_receives_nothing() {
    let mut doc = Document::new();
    let loose = doc.create_element("button");
    let log = Rc::new(RefCell::new(Vec::new()));
    doc.add_event_listener(
        ListenerTarget::Element(loose),
        EventKind::Click,
        recorder(&log, "loose"),
    );

    assert_eq!(doc.click(loose), 0);
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn test_key_down_targets_focused_element() {
    let (mut doc, _outer, inner) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    doc.add_event_listener(
        ListenerTarget::Document,
        EventKind::KeyDown,
        Rc::new(move |_doc: &mut Document, ev: &Event| {
            sink.borrow_mut().push((ev.target(), ev.key()));
        }),
    );

    doc.key_down(Key::Down);
    doc.focus(inner);
    doc.key_down(Key::Up);

    let root = doc.root();
    assert_eq!(
        *seen.borrow(),
        vec![(root, Some(Key::Down)), (inner, Some(Key::Up))]
    );
}

#[test]
fn test_handler_can_mutate_document() {
    let (mut doc, outer, inner) = setup();
    doc.add_event_listener(
        ListenerTarget::Element(outer),
        EventKind::Click,
        Rc::new(move |doc: &mut Document, _ev: &Event| {
            doc.add_class(outer, "show");
        }),
    );

    doc.click(inner);
    assert!(doc.has_class(outer, "show"));
}

#[test]
fn test_crossterm_key_conversion() {
    use crossterm::event::KeyCode;
    assert_eq!(Key::try_from(KeyCode::Up), Ok(Key::Up));
    assert_eq!(Key::try_from(KeyCode::Esc), Ok(Key::Escape));
    assert_eq!(Key::try_from(KeyCode::Char('q')), Ok(Key::Char('q')));
    assert_eq!(Key::try_from(KeyCode::F(5)), Ok(Key::F(5)));
}

#[test]
fn test_unsupported_crossterm_keys_are_rejected() {
    use crossterm::event::KeyCode;
    assert_eq!(Key::try_from(KeyCode::CapsLock), Err(KeyCode::CapsLock));
    assert_eq!(Key::try_from(KeyCode::Null), Err(KeyCode::Null));
}
