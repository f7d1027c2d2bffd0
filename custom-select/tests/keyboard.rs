use custom_select::{CustomSelect, SelectItem, SelectOptions};
use pagedom::{Document, ElementSpec, Key, NodeId};

fn mounted(count: i64) -> (Document, CustomSelect) {
    let mut doc = Document::new();
    let mount = doc.build(&ElementSpec::new("div").attr("id", "app"));
    let body = doc.body();
    doc.append_child(body, mount);

    let items = (1..=count)
        .map(|i| SelectItem::new(i, format!("v{i}"), format!("Item {i}")))
        .collect();
    let select = CustomSelect::mount(&mut doc, SelectOptions::new("#app", items, "a.svg")).unwrap();
    (doc, select)
}

fn item_node(doc: &Document, select: &CustomSelect, id: i64) -> NodeId {
    doc.query_selector(&format!(r#"[data-id="{id}"]"#), Some(select.root()))
        .unwrap()
        .unwrap()
}

// ============================================================================
// Cycling
// ============================================================================

#[test]
fn test_arrow_down_walks_items_then_wraps_to_header() {
    let (mut doc, select) = mounted(3);
    select.show_select(&mut doc);
    let n = select.focus_order_len();
    assert_eq!(n, 4);

    for expected in 1..n {
        doc.key_down(Key::Down);
        assert_eq!(select.focus_cursor(), expected);
        assert_eq!(doc.focused(), Some(item_node(&doc, &select, expected as i64)));
    }

    doc.key_down(Key::Down);
    assert_eq!(select.focus_cursor(), 0);
    assert_eq!(doc.focused(), Some(select.header()));
}

#[test]
fn test_arrow_up_from_header_wraps_to_last_item() {
    let (mut doc, select) = mounted(3);
    select.show_select(&mut doc);

    doc.key_down(Key::Up);
    assert_eq!(select.focus_cursor(), 3);
    assert_eq!(doc.focused(), Some(item_node(&doc, &select, 3)));

    doc.key_down(Key::Up);
    assert_eq!(select.focus_cursor(), 2);
}

#[test]
fn test_keys_ignored_while_closed() {
    let (mut doc, select) = mounted(3);
    doc.key_down(Key::Down);
    assert_eq!(select.focus_cursor(), 0);
    assert_eq!(doc.focused(), None);
}

#[test]
fn test_other_keys_ignored() {
    let (mut doc, select) = mounted(3);
    select.show_select(&mut doc);
    doc.key_down(Key::Char('j'));
    doc.key_down(Key::Enter);
    assert_eq!(select.focus_cursor(), 0);
    assert!(select.is_open());
}

#[test]
fn test_closing_resets_cursor() {
    let (mut doc, select) = mounted(3);
    select.show_select(&mut doc);
    doc.key_down(Key::Down);
    doc.key_down(Key::Down);
    assert_eq!(select.focus_cursor(), 2);

    select.hide_select(&mut doc);
    assert_eq!(select.focus_cursor(), 0);

    select.show_select(&mut doc);
    doc.key_down(Key::Down);
    assert_eq!(select.focus_cursor(), 1);
}

#[test]
fn test_single_item_cycles_between_header_and_item() {
    let (mut doc, select) = mounted(1);
    select.show_select(&mut doc);
    doc.key_down(Key::Down);
    assert_eq!(select.focus_cursor(), 1);
    doc.key_down(Key::Down);
    assert_eq!(select.focus_cursor(), 0);
    doc.key_down(Key::Up);
    assert_eq!(select.focus_cursor(), 1);
}

// ============================================================================
// Cycling after list changes
// ============================================================================

#[test]
fn test_added_item_joins_the_cycle() {
    let (mut doc, select) = mounted(2);
    select
        .add_select_option(&mut doc, SelectItem::new(9, "new", "New"))
        .unwrap();
    select.show_select(&mut doc);

    doc.key_down(Key::Up);
    assert_eq!(select.focus_cursor(), 3);
    assert_eq!(doc.focused(), Some(item_node(&doc, &select, 9)));
}

#[test]
fn test_deleted_item_leaves_the_cycle() {
    let (mut doc, select) = mounted(3);
    select.delete_select_option(&mut doc, 2).unwrap();
    select.show_select(&mut doc);

    doc.key_down(Key::Down);
    doc.key_down(Key::Down);
    assert_eq!(doc.focused(), Some(item_node(&doc, &select, 3)));
    doc.key_down(Key::Down);
    assert_eq!(doc.focused(), Some(select.header()));
}

#[test]
fn test_cursor_clamped_when_last_item_deleted_while_open() {
    let (mut doc, select) = mounted(3);
    select.show_select(&mut doc);
    doc.key_down(Key::Up);
    assert_eq!(select.focus_cursor(), 3);

    select.delete_select_option(&mut doc, 3).unwrap();
    assert_eq!(select.focus_cursor(), 2);

    doc.key_down(Key::Down);
    assert_eq!(select.focus_cursor(), 0);
}

#[test]
fn test_cursor_follows_focus_when_earlier_item_deleted_while_open() {
    let (mut doc, select) = mounted(4);
    select.show_select(&mut doc);
    doc.key_down(Key::Down);
    doc.key_down(Key::Down);
    doc.key_down(Key::Down);
    assert_eq!(select.focus_cursor(), 3);
    assert_eq!(doc.focused(), Some(item_node(&doc, &select, 3)));

    select.delete_select_option(&mut doc, 1).unwrap();
    assert_eq!(select.focus_cursor(), 2);
    assert_eq!(doc.focused(), Some(item_node(&doc, &select, 3)));

    doc.key_down(Key::Down);
    assert_eq!(doc.focused(), Some(item_node(&doc, &select, 4)));
    doc.key_down(Key::Up);
    assert_eq!(doc.focused(), Some(item_node(&doc, &select, 3)));
}

#[test]
fn test_cursor_kept_when_later_item_deleted_while_open() {
    let (mut doc, select) = mounted(4);
    select.show_select(&mut doc);
    doc.key_down(Key::Down);
    assert_eq!(select.focus_cursor(), 1);

    select.delete_select_option(&mut doc, 3).unwrap();
    assert_eq!(select.focus_cursor(), 1);

    doc.key_down(Key::Down);
    assert_eq!(doc.focused(), Some(item_node(&doc, &select, 2)));
    doc.key_down(Key::Down);
    assert_eq!(doc.focused(), Some(item_node(&doc, &select, 4)));
}

// ============================================================================
// Keyboard + selection
// ============================================================================

#[test]
fn test_selection_returns_focus_to_header() {
    let (mut doc, select) = mounted(3);
    select.show_select(&mut doc);
    doc.key_down(Key::Down);
    doc.key_down(Key::Down);

    let focused = doc.focused().unwrap();
    doc.click(focused);

    assert_eq!(select.get_active_option().map(|i| i.id), Some(2));
    assert_eq!(doc.focused(), Some(select.header()));
    assert_eq!(select.focus_cursor(), 0);
}

#[test]
fn test_only_open_select_reacts_to_keys() {
    let mut doc = Document::new();
    let body = doc.body();
    for id in ["a", "b"] {
        let mount = doc.build(&ElementSpec::new("div").attr("id", id));
        doc.append_child(body, mount);
    }
    let items = || vec![SelectItem::new(1, "x", "X"), SelectItem::new(2, "y", "Y")];
    let first = CustomSelect::mount(&mut doc, SelectOptions::new("#a", items(), "a.svg")).unwrap();
    let second = CustomSelect::mount(&mut doc, SelectOptions::new("#b", items(), "a.svg")).unwrap();

    second.show_select(&mut doc);
    doc.key_down(Key::Down);

    assert_eq!(first.focus_cursor(), 0);
    assert_eq!(second.focus_cursor(), 1);
}
