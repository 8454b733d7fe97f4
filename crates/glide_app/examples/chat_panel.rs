//! Chat Panel Demo
//!
//! A document viewport and an embedded chat panel scrolled headlessly: the
//! panel follows new messages to the end, the document answers wheel and
//! keyboard input, and both scrollbars auto-hide once idle.
//!
//! Run with:
//! `RUST_LOG=glide_scroll=debug cargo run -p glide_app --example chat_panel`

use glide_app::prelude::*;
use glide_core::view::ViewTree;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
[defaults]
easing = 0.15
auto_hide_delay_ms = 1200

[regions.document]
viewport = "doc-viewport"
content = "doc-content"
bar = "doc-bar"
track = "doc-track"
thumb = "doc-thumb"

[regions.chat]
viewport = "chat-viewport"
content = "chat-log"
bar = "chat-bar"
track = "chat-track"
thumb = "chat-thumb"
scroll = { pin_to_end = true, stop_propagation = true, key_scope = "when-open" }
"#;

const MESSAGE_HEIGHT: f32 = 48.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = GlideConfig::from_toml_str(CONFIG)?;

    let mut view = HeadlessView::new();
    let mut locator = IdLocator::new();
    for (id, origin, extent) in [
        ("doc-viewport", 0.0, 720.0),
        ("doc-content", 0.0, 4200.0),
        ("doc-bar", 0.0, 720.0),
        ("doc-track", 0.0, 720.0),
        ("doc-thumb", 0.0, 0.0),
        ("chat-viewport", 400.0, 300.0),
        ("chat-log", 400.0, MESSAGE_HEIGHT * 4.0),
        ("chat-bar", 400.0, 300.0),
        ("chat-track", 400.0, 300.0),
        ("chat-thumb", 400.0, 0.0),
    ] {
        locator.insert(id, view.insert(origin, extent));
    }
    let chat_log = locator
        .locate("chat-log")
        .ok_or_else(|| anyhow::anyhow!("chat-log element missing"))?;

    let mut runtime = HeadlessRuntime::bootstrap(&config, &locator, view, HeadlessHost::new());
    let run = HeadlessRunConfig::default();

    // Wheel the document a few notches, then jump to the end with the keyboard
    for _ in 0..3 {
        let mut wheel = InputEvent::wheel(100.0, Modifiers::NONE);
        if let Some(document) = runtime.registry_mut().get_mut("document") {
            document.on_pointer_enter();
            document.on_wheel(&mut wheel);
        }
    }
    runtime.run_until_idle(run)?;
    report(&runtime, "document", "after wheel");

    let mut end = InputEvent::key(KeyCode::END, Modifiers::NONE);
    runtime.registry_mut().dispatch_key(&mut end);
    runtime.run_until_idle(run)?;
    report(&runtime, "document", "after End");

    // Messages arrive; the pinned panel follows each one
    if let Some(chat) = runtime.registry_mut().get_mut("chat") {
        chat.set_open(true);
    }
    for message in 1..=12 {
        let height = runtime.view().extent(chat_log) + MESSAGE_HEIGHT;
        runtime.view_mut().resize(chat_log, height);
        runtime.registry_mut().content_changed("chat")?;

        for _ in 0..10 {
            runtime.step(run.tick_ms);
        }
        tracing::info!(message, height, "message appended");
    }
    runtime.run_until_idle(run)?;
    report(&runtime, "chat", "after messages");

    runtime.registry_mut().teardown_all()?;
    tracing::info!(idle = runtime.is_idle(), "torn down");
    Ok(())
}

fn report(runtime: &HeadlessRuntime, name: &str, label: &str) {
    if let Some(engine) = runtime.registry().get(name) {
        tracing::info!(
            region = name,
            scroll_y = engine.scroll_y(),
            max_scroll = engine.max_scroll(),
            at_end = engine.is_at_end(),
            visibility = ?engine.visibility_state(),
            "{label}"
        );
    }
}
