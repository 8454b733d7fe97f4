//! Glide Scroll
//!
//! A virtual scroll engine: it replaces the host's native scrolling for a
//! region, keeps its own offset state, and renders the content translation
//! and a custom thumb/track indicator on every display refresh.
//!
//! # Features
//!
//! - **Geometry**: Thumb length and scroll range derived from measured sizes
//! - **Eased positioning**: Every input sets a clamped target; frames ease toward it
//! - **Input adapters**: Wheel, keyboard, thumb drag, track click and touch drag
//! - **Auto-hide**: Debounced scrollbar visibility with re-validating timers
//! - **Registry**: Named regions sharing one view tree, frame host and key listener
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use glide_core::headless::{HeadlessHost, HeadlessView, FRAME_INTERVAL_MS};
//! use glide_scroll::{RegionHandles, ScrollConfig, ScrollRegistry};
//!
//! let mut view = HeadlessView::new();
//! let handles = RegionHandles::new(
//!     view.insert(0.0, 300.0),  // viewport
//!     view.insert(0.0, 1200.0), // content
//!     view.insert(0.0, 300.0),  // bar
//!     view.insert(0.0, 300.0),  // track
//!     view.insert(0.0, 0.0),    // thumb
//! );
//!
//! let host = Rc::new(RefCell::new(HeadlessHost::new()));
//! let mut registry = ScrollRegistry::new(Rc::new(RefCell::new(view)), host.clone());
//! registry.register("main", handles, ScrollConfig::default()).unwrap();
//! registry.scroll_to("main", 5000.0).unwrap();
//!
//! while !host.borrow().is_idle() {
//!     let wakes = host.borrow_mut().advance(FRAME_INTERVAL_MS);
//!     for wake in wakes {
//!         registry.dispatch(wake);
//!     }
//! }
//! assert_eq!(registry.get("main").unwrap().scroll_y(), 900.0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod keyboard;
pub mod registry;
pub mod visibility;

pub use config::{KeyScope, ScrollConfig, ScrollbarVisibility, TrackClickPolicy};
pub use engine::{RegionHandles, ResolvedHandles, ScrollEngine, SharedHost, SharedView};
pub use error::{HandleKind, Result, ScrollError};
pub use geometry::Geometry;
pub use input::ScrollIntent;
pub use keyboard::KeyRouter;
pub use registry::ScrollRegistry;
pub use visibility::{Visibility, VisibilityState};
