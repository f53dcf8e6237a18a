//! Counter example - a button driving observable state.
//!
//! The smallest useful app: a stack holding a button, a click handler
//! mutating state, and re-renders driven by the update cycle. Output is
//! plain stdout; no terminal backend is involved.
//!
//! Run with: cargo run --example counter

use arbor_tui::{Behavior, Component, ComponentId, ComponentTree};
use serde_json::{Value, json};

/// A button that consumes "click" events and bumps the app counter.
struct Button;

impl Behavior for Button {
    fn on_event(
        &mut self,
        tree: &mut ComponentTree,
        id: ComponentId,
        event: &str,
        _payload: &Value,
    ) -> bool {
        if event != "click" {
            return false;
        }
        let label = button_label(tree, id);
        println!("Button '{label}' clicked!");

        let app = tree.root(id);
        let count = tree.state_get(app, "counter").and_then(|v| v.as_i64()).unwrap_or(0);
        tree.set_state(app, "counter", count + 1);
        true
    }

    fn render(&mut self, tree: &ComponentTree, id: ComponentId) {
        println!("[Button] {}", button_label(tree, id));
    }
}

fn button_label(tree: &ComponentTree, id: ComponentId) -> String {
    tree.props(id)
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or("Button")
        .to_string()
}

/// Draws the frame around the app's children.
struct AppFrame;

impl Behavior for AppFrame {
    fn render(&mut self, tree: &ComponentTree, id: ComponentId) {
        let count = tree.state_get(id, "counter").and_then(|v| v.as_i64()).unwrap_or(0);
        println!("\n--- Counter App ---");
        println!("Counter: {count}");
    }
}

fn main() {
    let mut tree = ComponentTree::new();

    let app = tree.insert(
        Component::vstack()
            .with_id("counter_app")
            .state("counter", 0)
            .behavior(AppFrame),
    );
    let button = tree.insert(
        Component::new()
            .with_id("increment_button")
            .prop("label", "Increment Counter")
            .behavior(Button),
    );
    tree.add_child(app, button).expect("fresh tree has no collisions");

    tree.mount(app);
    tree.render(app);

    // Simulate three clicks. Each one re-renders through the update
    // cycle; rendering again afterwards shows the settled frame.
    for _ in 0..3 {
        tree.handle_event(app, "click", &json!({}));
        tree.render(app);
    }

    tree.unmount(app);
    println!("\nApp unmounted");
}
