//! Dashboard example - nested stacks, spacing, and visibility.
//!
//! Walks through the layout engine without a terminal backend: a
//! vertical main layout holding a horizontal header and a form, a
//! notification row that toggles in and out of the flow, and a shared
//! named state + event bus wiring the pieces together.
//!
//! Run with: cargo run --example dashboard

use arbor_tui::{Component, ComponentId, ComponentTree, EventBus, StateRegistry, names};
use serde_json::json;

fn describe(tree: &ComponentTree, label: &str, id: ComponentId) {
    let pos = tree.position(id);
    let size = tree.size(id);
    let shown = if tree.is_visible(id) { "" } else { "  [hidden]" };
    println!(
        "  {label:<14} {}x{} at ({}, {}){shown}",
        size.height, size.width, pos.row, pos.col
    );
}

fn print_frame(tree: &ComponentTree, ids: &[(&str, ComponentId)]) {
    for &(label, id) in ids {
        describe(tree, label, id);
    }
    println!();
}

fn main() {
    let registry = StateRegistry::new();
    let bus = EventBus::new();

    // Shared application state, observable from anywhere that holds the
    // registry handle.
    let session = registry
        .create("session", [("user".to_string(), json!("guest"))])
        .expect("fresh registry");
    session.on_change(|change| println!("session changed: {change:?}"));
    bus.on("notify", |payload| {
        println!("notification: {}", payload["message"]);
    });

    let mut tree = ComponentTree::new();
    let app = tree.insert(Component::vstack().with_id("app").spacing(1));
    let header = tree.insert(Component::hstack().with_id("header"));
    let title = tree.insert(Component::new().with_id("title").prop("name", "title"));
    let clock = tree.insert(Component::new().with_id("clock").prop("name", "clock"));
    let notification = tree.insert(Component::new().with_id("notification"));
    let form = tree.insert(Component::vstack().with_id("form").spacing(1));
    let field_a = tree.insert(Component::new().with_id("field_a"));
    let field_b = tree.insert(Component::new().with_id("field_b"));

    tree.add_child(app, header).unwrap();
    tree.add_child(header, title).unwrap();
    tree.add_child(header, clock).unwrap();
    tree.add_child(app, notification).unwrap();
    tree.add_child(app, form).unwrap();
    tree.add_child(form, field_a).unwrap();
    tree.add_child(form, field_b).unwrap();

    // Notifications start hidden and enter the flow on demand.
    tree.set_visible(notification, false);

    tree.mount(app);
    tree.set_size(app, 25, 80);

    let ids = [
        ("app", app),
        ("header", header),
        ("title", title),
        ("clock", clock),
        ("notification", notification),
        ("form", form),
        ("field_a", field_a),
        ("field_b", field_b),
    ];

    println!("=== initial layout (25x80, notification hidden) ===");
    print_frame(&tree, &ids);

    // The bus delivers an application-level event; the host reacts by
    // revealing the notification row, which re-enters the layout flow.
    println!("=== after a \"notify\" event on the bus ===");
    bus.emit("notify", &json!({ "message": "saved" }));
    tree.set_visible(notification, true);
    // The flip re-rendered the notification itself; reflowing the stack
    // around it is the owner's call.
    tree.update(app);
    print_frame(&tree, &ids);

    println!("=== horizontal split of the header ===");
    describe(&tree, "title", title);
    describe(&tree, "clock", clock);
    println!();

    // Window resize: new geometry flows down in one update cycle.
    println!("=== after resize to 40x120 ===");
    tree.handle_event(app, names::RESIZE, &json!({ "height": 40, "width": 120 }));
    tree.set_size(app, 40, 120);
    print_frame(&tree, &ids);

    session.set("user", "admin");

    tree.unmount(app);
    println!("App unmounted");
}
