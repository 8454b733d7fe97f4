//! Glide Animation System
//!
//! Frame-synchronized interpolation for scroll offsets.
//!
//! # Features
//!
//! - **Lerp easing**: Each frame covers a fixed fraction of the remaining distance,
//!   approaching the target monotonically without overshoot
//! - **Retargetable**: Moving the target mid-flight continues from the current value
//! - **Frame loop**: Idempotent start, one outstanding frame at a time, cancellable

pub mod lerp;
pub mod scheduler;

pub use lerp::{Lerp, LerpConfig};
pub use scheduler::FrameLoop;
