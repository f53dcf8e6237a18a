//! Interactive example - a crossterm host fulfilling the render contract.
//!
//! The engine never touches the terminal; this host does. Panel
//! behaviors draw themselves at the geometry the layout engine assigned,
//! key input is fed through `handle_event` on the root, and resize
//! events re-size the root so layout flows back down.
//!
//! Keys: 1/2/3 select a panel, h hides/shows the middle panel, q quits.
//!
//! Run with: cargo run --example interactive

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use serde_json::{Value, json};

use arbor_tui::{Behavior, Component, ComponentId, ComponentTree, names};

/// A panel that draws one status line and reacts to its hotkey.
struct Panel {
    label: &'static str,
    hotkey: char,
}

impl Behavior for Panel {
    fn on_event(
        &mut self,
        tree: &mut ComponentTree,
        id: ComponentId,
        event: &str,
        payload: &Value,
    ) -> bool {
        if event != names::KEY_PRESS {
            return false;
        }
        if payload["key"].as_str() != Some(self.hotkey.to_string().as_str()) {
            return false;
        }
        let selected = tree
            .state_get(id, "selected")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        tree.set_state(id, "selected", !selected);
        true
    }

    fn render(&mut self, tree: &ComponentTree, id: ComponentId) {
        let pos = tree.position(id);
        let size = tree.size(id);
        if size.height == 0 || size.width == 0 {
            return;
        }
        let selected = tree
            .state_get(id, "selected")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let marker = if selected { '>' } else { ' ' };
        let line = format!(
            "{marker} {} [{}]  {}x{} at ({}, {})",
            self.label, self.hotkey, size.height, size.width, pos.row, pos.col
        );
        let mut out = io::stdout();
        let _ = queue!(out, MoveTo(pos.col, pos.row), Print(line));
    }
}

/// Help line pinned to the bottom slot of the stack.
struct HelpLine;

impl Behavior for HelpLine {
    fn render(&mut self, tree: &ComponentTree, id: ComponentId) {
        let pos = tree.position(id);
        let mut out = io::stdout();
        let _ = queue!(
            out,
            MoveTo(pos.col, pos.row),
            Print("1/2/3 select panel · h toggle middle panel · q quit")
        );
    }
}

fn draw(tree: &mut ComponentTree, root: ComponentId) -> io::Result<()> {
    execute!(io::stdout(), Clear(ClearType::All))?;
    tree.render(root);
    io::stdout().flush()
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut tree = ComponentTree::new();
    let root = tree.insert(Component::vstack().with_id("root").spacing(1));
    let top = tree.insert(
        Component::new()
            .with_id("top")
            .behavior(Panel { label: "Top panel", hotkey: '1' }),
    );
    let middle = tree.insert(
        Component::new()
            .with_id("middle")
            .behavior(Panel { label: "Middle panel", hotkey: '2' }),
    );
    let bottom = tree.insert(
        Component::new()
            .with_id("bottom")
            .behavior(Panel { label: "Bottom panel", hotkey: '3' }),
    );
    let help = tree.insert(Component::new().with_id("help").behavior(HelpLine));
    tree.add_child(root, top).expect("fresh tree");
    tree.add_child(root, middle).expect("fresh tree");
    tree.add_child(root, bottom).expect("fresh tree");
    tree.add_child(root, help).expect("fresh tree");

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;

    let (width, height) = crossterm::terminal::size()?;
    tree.mount(root);
    tree.set_size(root, height, width);
    draw(&mut tree, root)?;

    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Char('h') => {
                    let shown = tree.is_visible(middle);
                    tree.set_visible(middle, !shown);
                }
                KeyCode::Char(c) => {
                    tree.handle_event(root, names::KEY_PRESS, &json!({ "key": c.to_string() }));
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                tree.set_size(root, height, width);
            }
            _ => {}
        }
        draw(&mut tree, root)?;
    }

    tree.unmount(root);
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}
