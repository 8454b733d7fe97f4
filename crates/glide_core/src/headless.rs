//! Headless host primitives
//!
//! A deterministic, in-memory [`FrameHost`] and [`ViewTree`] for tests and
//! diagnostics. Time only moves when [`HeadlessHost::advance`] is called, and
//! every frame/timer request is recorded so callers can assert on scheduling.

use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::host::{FrameHost, FrameToken, RegionId, TimerToken, Wake};
use crate::view::{NodeId, ViewFlag, ViewTree};

/// Logical milliseconds between display refreshes
pub const FRAME_INTERVAL_MS: f64 = 16.0;

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    region: RegionId,
    due_ms: f64,
}

/// Deterministic frame host with a virtual clock
#[derive(Debug, Default)]
pub struct HeadlessHost {
    now_ms: f64,
    frames: SlotMap<FrameToken, RegionId>,
    timers: SlotMap<TimerToken, PendingTimer>,
    reduced_motion: bool,
    frames_requested: u64,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Move the clock forward and collect every callback that became due.
    ///
    /// All frames requested before this call are delivered once (one display
    /// refresh), followed by expired timers in due order.
    pub fn advance(&mut self, ms: f64) -> Vec<Wake> {
        self.now_ms += ms.max(0.0);

        let mut wakes: Vec<Wake> = self
            .frames
            .drain()
            .map(|(token, region)| Wake::Frame(region, token))
            .collect();

        let mut due: Vec<(f64, TimerToken)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due_ms <= self.now_ms)
            .map(|(token, timer)| (timer.due_ms, token))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, token) in due {
            if let Some(timer) = self.timers.remove(token) {
                wakes.push(Wake::Timer(timer.region, token));
            }
        }

        tracing::trace!(now_ms = self.now_ms, wakes = wakes.len(), "headless advance");
        wakes
    }

    /// Frames requested but not yet delivered
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Timers armed but not yet fired
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Total frame requests since creation
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    /// Whether anything is still scheduled
    pub fn is_idle(&self) -> bool {
        self.frames.is_empty() && self.timers.is_empty()
    }
}

impl FrameHost for HeadlessHost {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self, region: RegionId) -> FrameToken {
        self.frames_requested += 1;
        self.frames.insert(region)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.frames.remove(token);
    }

    fn set_timer(&mut self, region: RegionId, delay_ms: f64) -> TimerToken {
        self.timers.insert(PendingTimer {
            region,
            due_ms: self.now_ms + delay_ms.max(0.0),
        })
    }

    fn clear_timer(&mut self, token: TimerToken) {
        self.timers.remove(token);
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

#[derive(Debug, Clone, Default)]
struct HeadlessNode {
    origin: f32,
    extent: f32,
    translate: f32,
    extent_override: Option<f32>,
    flags: SmallVec<[ViewFlag; 3]>,
}

/// In-memory view tree with explicit sizes
#[derive(Debug, Default)]
pub struct HeadlessView {
    nodes: SlotMap<NodeId, HeadlessNode>,
}

impl HeadlessView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at `origin` with a measured length of `extent`
    pub fn insert(&mut self, origin: f32, extent: f32) -> NodeId {
        self.nodes.insert(HeadlessNode {
            origin,
            extent,
            ..Default::default()
        })
    }

    pub fn remove(&mut self, node: NodeId) -> bool {
        self.nodes.remove(node).is_some()
    }

    /// Change the measured length (simulates layout after a content change)
    pub fn resize(&mut self, node: NodeId, extent: f32) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.extent = extent;
            n.extent_override = None;
        }
    }

    /// Current translation written by the engine
    pub fn translate(&self, node: NodeId) -> f32 {
        self.nodes.get(node).map_or(0.0, |n| n.translate)
    }

    pub fn has_flag(&self, node: NodeId, flag: ViewFlag) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|n| n.flags.contains(&flag))
    }
}

impl ViewTree for HeadlessView {
    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn extent(&self, node: NodeId) -> f32 {
        self.nodes
            .get(node)
            .map_or(0.0, |n| n.extent_override.unwrap_or(n.extent))
    }

    fn origin(&self, node: NodeId) -> f32 {
        self.nodes.get(node).map_or(0.0, |n| n.origin)
    }

    fn set_translate(&mut self, node: NodeId, offset: f32) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.translate = offset;
        }
    }

    fn set_extent(&mut self, node: NodeId, length: f32) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.extent_override = Some(length);
        }
    }

    fn set_flag(&mut self, node: NodeId, flag: ViewFlag, on: bool) {
        let Some(n) = self.nodes.get_mut(node) else {
            return;
        };
        let present = n.flags.contains(&flag);
        if on && !present {
            n.flags.push(flag);
        } else if !on && present {
            n.flags.retain(|f| *f != flag);
        }
    }
}
