//! Frame host seam
//!
//! Hosts own the display-refresh loop, delayed timers and the clock. Engines
//! ask for a frame or a timer on behalf of their region and get back a token;
//! the host later hands the matching [`Wake`] to whoever owns the region.
//! Requests are never delivered synchronously from inside a request call.

use slotmap::new_key_type;

new_key_type! {
    /// Identifies one scroll region (engine instance)
    pub struct RegionId;
    /// A pending display-refresh callback
    pub struct FrameToken;
    /// A pending delayed callback
    pub struct TimerToken;
}

/// A callback the host delivers back to a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Frame(RegionId, FrameToken),
    Timer(RegionId, TimerToken),
}

impl Wake {
    pub fn region(&self) -> RegionId {
        match *self {
            Wake::Frame(region, _) | Wake::Timer(region, _) => region,
        }
    }
}

/// Display-refresh frames, timers and time
pub trait FrameHost {
    /// Monotonic host time in milliseconds
    fn now_ms(&self) -> f64;

    /// Suspend until the next display refresh
    fn request_frame(&mut self, region: RegionId) -> FrameToken;

    fn cancel_frame(&mut self, token: FrameToken);

    /// Wake the region once `delay_ms` has elapsed
    fn set_timer(&mut self, region: RegionId, delay_ms: f64) -> TimerToken;

    fn clear_timer(&mut self, token: TimerToken);

    /// Host-level reduced-motion preference
    fn prefers_reduced_motion(&self) -> bool {
        false
    }
}
