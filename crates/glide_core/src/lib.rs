//! Glide Core
//!
//! Foundational primitives shared by the Glide scroll engine and its hosts:
//!
//! - **Input Events**: Platform-neutral wheel, key, pointer and touch events
//! - **View Tree**: The seam through which the engine measures and positions nodes
//! - **Frame Host**: Display-refresh frames, delayed timers and the host clock
//! - **Headless**: A deterministic in-memory host for tests and diagnostics
//!
//! # Example
//!
//! ```rust
//! use glide_core::headless::{HeadlessHost, HeadlessView};
//! use glide_core::host::{FrameHost, RegionId};
//! use glide_core::view::ViewTree;
//!
//! let mut view = HeadlessView::new();
//! let viewport = view.insert(0.0, 300.0);
//! assert_eq!(view.extent(viewport), 300.0);
//!
//! let mut host = HeadlessHost::new();
//! host.request_frame(RegionId::default());
//! assert_eq!(host.advance(16.0).len(), 1);
//! ```

pub mod events;
pub mod headless;
pub mod host;
pub mod state;
pub mod view;

pub use events::{EventData, EventType, InputEvent, KeyCode, Modifiers};
pub use host::{FrameHost, FrameToken, RegionId, TimerToken, Wake};
pub use state::StateTransitions;
pub use view::{NodeId, ViewFlag, ViewTree};
