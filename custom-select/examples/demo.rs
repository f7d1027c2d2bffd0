use std::cell::RefCell;
use std::fs::File;
use std::rc::Rc;

use crossterm::event::{Event as CtEvent, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use custom_select::markup::{ACTIVE_CLASS, BODY_CLASS, OPEN_CLASS};
use custom_select::{CustomSelect, SelectItem, SelectOptions, Theme};
use pagedom::terminal::StyledLine;
use pagedom::{hit_test, outline, Document, ElementSpec, Key, NodeId, OutlineRow, Terminal};
use simplelog::{Config, LevelFilter, WriteLogger};

const TOP: u16 = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("custom-select-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut doc = Document::new();
    let body = doc.body();
    for id in ["fruit", "size"] {
        let mount = doc.build(&ElementSpec::new("div").attr("id", id));
        doc.append_child(body, mount);
    }

    let status = Rc::new(RefCell::new(String::from("nothing selected yet")));

    let sink = Rc::clone(&status);
    let fruit = CustomSelect::mount(
        &mut doc,
        SelectOptions::from_toml_str(include_str!("demo.toml"))?
            .on_select(move |item| *sink.borrow_mut() = format!("fruit = {}", item.value)),
    )?;

    let sink = Rc::clone(&status);
    let size = CustomSelect::mount(
        &mut doc,
        SelectOptions::new(
            "#size",
            vec![
                SelectItem::new(1, "s", "Small"),
                SelectItem::new(2, "m", "Medium"),
                SelectItem::new(3, "l", "Large"),
            ],
            "img/arrow.svg",
        )
        .theme(Theme::Light)
        .selected_id(2)
        .on_select(move |item| *sink.borrow_mut() = format!("size = {}", item.value)),
    )?;

    let mut term = Terminal::new()?;
    let mut next_id = 100;

    loop {
        let rows = visible_rows(&doc, &[&fruit, &size]);
        term.draw(&screen(&doc, &rows, &status.borrow()))?;

        for event in term.poll(None)? {
            match event {
                CtEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    match key_event.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Enter => {
                            if let Some(focused) = doc.focused() {
                                doc.click(focused);
                            }
                        }
                        KeyCode::Tab => {
                            doc.focus_next();
                        }
                        KeyCode::Char('a') => {
                            let item = SelectItem::new(
                                next_id,
                                format!("extra-{next_id}"),
                                format!("Extra {next_id}"),
                            );
                            if let Err(e) = fruit.add_select_option(&mut doc, item) {
                                *status.borrow_mut() = e.to_string();
                            }
                            next_id += 1;
                        }
                        KeyCode::Char('d') => {
                            if let Some(last) = fruit.items().last() {
                                if let Err(e) = fruit.delete_select_option(&mut doc, last.id) {
                                    *status.borrow_mut() = e.to_string();
                                }
                            }
                        }
                        code => {
                            if let Ok(key) = Key::try_from(code) {
                                doc.key_down(key);
                            }
                        }
                    }
                }
                CtEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let target = hit_test(&rows, TOP, mouse.row).unwrap_or(body);
                    doc.click(target);
                }
                _ => {}
            }
        }
    }
}

/// Rows of every select, hiding option lists of closed selects.
fn visible_rows(doc: &Document, selects: &[&CustomSelect]) -> Vec<OutlineRow> {
    selects
        .iter()
        .flat_map(|select| {
            outline(doc, select.root(), |doc, node: NodeId| {
                let closed_body = doc.has_class(node, BODY_CLASS)
                    && !doc
                        .parent(node)
                        .is_some_and(|root| doc.has_class(root, OPEN_CLASS));
                !closed_body
            })
        })
        .collect()
}

fn screen(doc: &Document, rows: &[OutlineRow], status: &str) -> Vec<StyledLine> {
    let mut lines = vec![
        StyledLine::plain("custom-select demo").bold(true),
        StyledLine::plain(
            "click or Enter to choose, Up/Down to move, Tab to focus, a/d to add/delete, q to quit",
        ),
        StyledLine::plain(""),
    ];

    for row in rows {
        let marker = if doc.has_class(row.node, ACTIVE_CLASS) { "* " } else { "  " };
        let text = format!("{}{}{}", "  ".repeat(row.depth), marker, row.label);
        lines.push(StyledLine::plain(text).reverse(doc.focused() == Some(row.node)));
    }

    lines.push(StyledLine::plain(""));
    lines.push(StyledLine::plain(format!("status: {status}")));
    lines
}
