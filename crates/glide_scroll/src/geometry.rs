//! Scroll geometry
//!
//! Sizes measured from the view tree and the linear mapping between scroll
//! offset (`0..=max_scroll`) and thumb travel (`0..=track - thumb`).

/// Scroll ranges at or below this many pixels count as "nothing overflows"
pub const OVERFLOW_EPSILON: f32 = 1.0;

/// Fraction of the viewport one page step covers
pub const PAGE_FRACTION: f32 = 0.9;

/// Measured sizes of one region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub viewport: f32,
    pub content: f32,
    pub track: f32,
    pub thumb: f32,
    pub max_scroll: f32,
}

impl Geometry {
    /// Derive scroll range and thumb length from measured sizes
    pub fn compute(viewport: f32, content: f32, track: f32, min_thumb: f32) -> Self {
        let viewport = sanitize(viewport);
        let content = sanitize(content);
        let track = sanitize(track);

        let ratio = if content > 0.0 { viewport / content } else { 0.0 };
        // Track length wins over the minimum when the track is shorter
        let thumb = (track * ratio).round().max(min_thumb).min(track);

        Self {
            viewport,
            content,
            track,
            thumb,
            max_scroll: (content - viewport).max(0.0),
        }
    }

    /// Whether content overflows the viewport enough to scroll
    pub fn overflows(&self) -> bool {
        self.max_scroll > OVERFLOW_EPSILON
    }

    /// Clamp an offset into `0..=max_scroll` (non-finite input maps to 0)
    pub fn clamp_offset(&self, offset: f32) -> f32 {
        if !offset.is_finite() {
            return if offset == f32::INFINITY {
                self.max_scroll
            } else {
                0.0
            };
        }
        offset.max(0.0).min(self.max_scroll)
    }

    /// Distance the thumb can travel along the track
    pub fn thumb_travel(&self) -> f32 {
        (self.track - self.thumb).max(0.0)
    }

    /// Thumb position for a scroll offset
    pub fn thumb_offset(&self, offset: f32) -> f32 {
        if self.max_scroll <= 0.0 {
            return 0.0;
        }
        self.clamp_offset(offset) / self.max_scroll * self.thumb_travel()
    }

    /// Scroll offset for a thumb position (inverse of [`thumb_offset`](Self::thumb_offset))
    pub fn offset_for_thumb(&self, thumb_pos: f32) -> f32 {
        let travel = self.thumb_travel();
        if travel <= 0.0 {
            return 0.0;
        }
        let progress = (thumb_pos / travel).max(0.0).min(1.0);
        progress * self.max_scroll
    }

    /// Scroll distance equivalent to dragging the thumb by `pointer_dy`
    pub fn drag_delta(&self, pointer_dy: f32) -> f32 {
        let travel = self.thumb_travel();
        if travel <= 0.0 {
            return 0.0;
        }
        pointer_dy / travel * self.max_scroll
    }

    /// One page step
    pub fn page(&self) -> f32 {
        self.viewport * PAGE_FRACTION
    }
}

fn sanitize(size: f32) -> f32 {
    if size.is_finite() {
        size.max(0.0)
    } else {
        0.0
    }
}
