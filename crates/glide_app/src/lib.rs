//! Glide Application Glue
//!
//! Everything between a page and the scroll engine that isn't scrolling:
//!
//! - **Config**: `glide.toml` with shared defaults and per-region element ids
//! - **Bootstrap**: Locates each region's handles and registers its engine
//! - **Headless runtime**: Drives a registry against a virtual clock
//!
//! # Example
//!
//! ```rust
//! use glide_app::prelude::*;
//!
//! let config = GlideConfig::from_toml_str(r#"
//!     [regions.main]
//!     viewport = "vp"
//!     content = "content"
//!     bar = "bar"
//!     track = "track"
//!     thumb = "thumb"
//! "#).unwrap();
//!
//! let mut view = HeadlessView::new();
//! let locator = IdLocator::new()
//!     .with("vp", view.insert(0.0, 300.0))
//!     .with("content", view.insert(0.0, 1200.0))
//!     .with("bar", view.insert(0.0, 300.0))
//!     .with("track", view.insert(0.0, 300.0))
//!     .with("thumb", view.insert(0.0, 0.0));
//!
//! let mut runtime = HeadlessRuntime::bootstrap(&config, &locator, view, HeadlessHost::new());
//! runtime.registry_mut().scroll_to_end("main").unwrap();
//! runtime.run_until_idle(HeadlessRunConfig::default()).unwrap();
//! assert_eq!(runtime.registry().get("main").unwrap().scroll_y(), 900.0);
//! ```

pub mod bootstrap;
pub mod config;
pub mod headless_runtime;

pub use bootstrap::{bootstrap, HandleLocator, IdLocator};
pub use config::{GlideConfig, RegionConfig, RegionElements};
pub use headless_runtime::{HeadlessContext, HeadlessRunConfig, HeadlessRuntime};

/// Common imports for hosts and demos
pub mod prelude {
    pub use anyhow::Result;

    pub use crate::bootstrap::{bootstrap, HandleLocator, IdLocator};
    pub use crate::config::GlideConfig;
    pub use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
    pub use glide_core::events::{event_types, InputEvent, KeyCode, Modifiers};
    pub use glide_core::headless::{HeadlessHost, HeadlessView};
    pub use glide_scroll::{ScrollConfig, ScrollRegistry};
}
