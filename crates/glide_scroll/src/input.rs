//! Input adapters
//!
//! Pure translations from raw input to scroll intents. The engine owns all
//! state; adapters only see the numbers they need, which keeps every mapping
//! testable without a host.

use glide_core::events::{KeyCode, Modifiers};

use crate::config::TrackClickPolicy;
use crate::geometry::Geometry;

/// Wheel step multiplier while the accelerate modifier (Shift) is held
pub const ACCELERATE_FACTOR: f32 = 3.0;

/// Raw wheel deltas are normalised against this many pixels per notch
const WHEEL_NOTCH: f32 = 100.0;

/// Upper bound of the per-event device-granularity scale
const MAX_WHEEL_SCALE: f32 = 3.0;

/// A requested change of the target offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollIntent {
    /// Relative to the current target
    By(f32),
    /// Absolute offset
    To(f32),
}

impl ScrollIntent {
    /// Resolve against the current target (unclamped)
    pub fn resolve(self, target: f32) -> f32 {
        match self {
            ScrollIntent::By(delta) => target + delta,
            ScrollIntent::To(offset) => offset,
        }
    }
}

/// Map a wheel delta to a step.
///
/// The base step is tripled while Shift is held, then scaled by
/// `clamp(|delta| / 100, 1, 3)` so coarse and fine-grained devices both move
/// a sensible distance. The sign of `delta_y` picks the direction.
pub fn wheel_intent(delta_y: f32, modifiers: Modifiers, wheel_step: f32) -> Option<ScrollIntent> {
    if delta_y == 0.0 || !delta_y.is_finite() {
        return None;
    }
    let accelerate = if modifiers.shift() {
        ACCELERATE_FACTOR
    } else {
        1.0
    };
    let scale = (delta_y.abs() / WHEEL_NOTCH).max(1.0).min(MAX_WHEEL_SCALE);
    let step = wheel_step * accelerate * scale;
    Some(ScrollIntent::By(step.copysign(delta_y)))
}

/// Map a navigation key to an intent, or None for keys the engine ignores
pub fn key_intent(
    key: KeyCode,
    modifiers: Modifiers,
    geometry: &Geometry,
    wheel_step: f32,
) -> Option<ScrollIntent> {
    let page = geometry.page();
    let intent = match key {
        KeyCode::UP => ScrollIntent::By(-wheel_step),
        KeyCode::DOWN => ScrollIntent::By(wheel_step),
        KeyCode::PAGE_UP => ScrollIntent::By(-page),
        KeyCode::PAGE_DOWN => ScrollIntent::By(page),
        KeyCode::SPACE if modifiers.shift() => ScrollIntent::By(-page),
        KeyCode::SPACE => ScrollIntent::By(page),
        KeyCode::HOME => ScrollIntent::To(0.0),
        KeyCode::END => ScrollIntent::To(geometry.max_scroll),
        _ => return None,
    };
    Some(intent)
}

/// Map a click on the track (outside the thumb).
///
/// `click` and `thumb_top` are both measured from the track's leading edge.
pub fn track_click_intent(
    policy: TrackClickPolicy,
    click: f32,
    thumb_top: f32,
    geometry: &Geometry,
) -> ScrollIntent {
    match policy {
        TrackClickPolicy::Page if click < thumb_top => ScrollIntent::By(-geometry.page()),
        TrackClickPolicy::Page => ScrollIntent::By(geometry.page()),
        TrackClickPolicy::Center => {
            let thumb_pos = click - geometry.thumb / 2.0;
            ScrollIntent::To(geometry.offset_for_thumb(thumb_pos))
        }
    }
}

/// Anchors recorded when a thumb drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub pointer_y: f32,
    pub offset: f32,
}

impl DragAnchor {
    pub fn new(pointer_y: f32, offset: f32) -> Self {
        Self { pointer_y, offset }
    }

    /// Offset for the pointer's current position (clamped)
    pub fn offset_at(&self, pointer_y: f32, geometry: &Geometry) -> f32 {
        let delta = geometry.drag_delta(pointer_y - self.pointer_y);
        geometry.clamp_offset(self.offset + delta)
    }
}

/// Anchors recorded when a touch drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchAnchor {
    pub finger_y: f32,
    /// Target offset (not the eased current offset) at touch start
    pub target: f32,
}

impl TouchAnchor {
    pub fn new(finger_y: f32, target: f32) -> Self {
        Self { finger_y, target }
    }

    /// Target for the finger's current position; dragging up scrolls down
    pub fn target_at(&self, finger_y: f32) -> f32 {
        self.target + (self.finger_y - finger_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        Geometry::compute(300.0, 1200.0, 300.0, 32.0)
    }

    #[test]
    fn test_wheel_base_step() {
        assert_eq!(
            wheel_intent(50.0, Modifiers::NONE, 60.0),
            Some(ScrollIntent::By(60.0))
        );
        assert_eq!(
            wheel_intent(-3.0, Modifiers::NONE, 60.0),
            Some(ScrollIntent::By(-60.0))
        );
        assert_eq!(wheel_intent(0.0, Modifiers::NONE, 60.0), None);
    }

    #[test]
    fn test_wheel_granularity_scale_is_clamped() {
        assert_eq!(
            wheel_intent(200.0, Modifiers::NONE, 60.0),
            Some(ScrollIntent::By(120.0))
        );
        assert_eq!(
            wheel_intent(-1000.0, Modifiers::NONE, 60.0),
            Some(ScrollIntent::By(-180.0))
        );
    }

    #[test]
    fn test_wheel_accelerate_modifier() {
        let shift = Modifiers::new(true, false, false, false);
        assert_eq!(
            wheel_intent(100.0, shift, 60.0),
            Some(ScrollIntent::By(180.0))
        );
        assert_eq!(
            wheel_intent(300.0, shift, 60.0),
            Some(ScrollIntent::By(540.0))
        );
    }

    #[test]
    fn test_key_mapping() {
        let g = geometry();
        let none = Modifiers::NONE;
        assert_eq!(
            key_intent(KeyCode::DOWN, none, &g, 60.0),
            Some(ScrollIntent::By(60.0))
        );
        assert_eq!(
            key_intent(KeyCode::UP, none, &g, 60.0),
            Some(ScrollIntent::By(-60.0))
        );
        assert_eq!(
            key_intent(KeyCode::PAGE_DOWN, none, &g, 60.0),
            Some(ScrollIntent::By(270.0))
        );
        assert_eq!(
            key_intent(KeyCode::PAGE_UP, none, &g, 60.0),
            Some(ScrollIntent::By(-270.0))
        );
        assert_eq!(
            key_intent(KeyCode::HOME, none, &g, 60.0),
            Some(ScrollIntent::To(0.0))
        );
        assert_eq!(
            key_intent(KeyCode::END, none, &g, 60.0),
            Some(ScrollIntent::To(900.0))
        );
        assert_eq!(key_intent(KeyCode::ENTER, none, &g, 60.0), None);
    }

    #[test]
    fn test_space_pages_and_shift_space_reverses() {
        let g = geometry();
        let shift = Modifiers::new(true, false, false, false);
        assert_eq!(
            key_intent(KeyCode::SPACE, Modifiers::NONE, &g, 60.0),
            Some(ScrollIntent::By(270.0))
        );
        assert_eq!(
            key_intent(KeyCode::SPACE, shift, &g, 60.0),
            Some(ScrollIntent::By(-270.0))
        );
    }

    #[test]
    fn test_track_click_page_policy() {
        let g = geometry();
        assert_eq!(
            track_click_intent(TrackClickPolicy::Page, 10.0, 100.0, &g),
            ScrollIntent::By(-270.0)
        );
        assert_eq!(
            track_click_intent(TrackClickPolicy::Page, 250.0, 100.0, &g),
            ScrollIntent::By(270.0)
        );
    }

    #[test]
    fn test_track_click_center_policy() {
        let g = geometry();
        // Thumb 75 centred on 150 starts at 112.5: half of the 225 travel
        assert_eq!(
            track_click_intent(TrackClickPolicy::Center, 150.0, 0.0, &g),
            ScrollIntent::To(450.0)
        );
        // Clicks near the ends clamp to the extremes
        assert_eq!(
            track_click_intent(TrackClickPolicy::Center, 5.0, 200.0, &g),
            ScrollIntent::To(0.0)
        );
        assert_eq!(
            track_click_intent(TrackClickPolicy::Center, 299.0, 0.0, &g),
            ScrollIntent::To(900.0)
        );
    }

    #[test]
    fn test_drag_anchor_maps_pointer_delta() {
        let g = geometry();
        let anchor = DragAnchor::new(100.0, 200.0);
        assert_eq!(anchor.offset_at(145.0, &g), 380.0);
        assert_eq!(anchor.offset_at(100.0, &g), 200.0);
        // Dragging far past the track clamps
        assert_eq!(anchor.offset_at(10_000.0, &g), 900.0);
        assert_eq!(anchor.offset_at(-10_000.0, &g), 0.0);
    }

    #[test]
    fn test_touch_anchor_inverts_direction() {
        let anchor = TouchAnchor::new(400.0, 120.0);
        assert_eq!(anchor.target_at(350.0), 170.0);
        assert_eq!(anchor.target_at(450.0), 70.0);
    }

    #[test]
    fn test_intent_resolve() {
        assert_eq!(ScrollIntent::By(30.0).resolve(100.0), 130.0);
        assert_eq!(ScrollIntent::To(30.0).resolve(100.0), 30.0);
    }
}
