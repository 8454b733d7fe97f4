//! Scrollbar visibility
//!
//! State machine for the indicator's auto-hide behaviour:
//!
//! ```text
//!              ACTIVITY
//!     Hidden ───────────► Visible ◄─┐
//!       ▲                   │       │ ACTIVITY (re-arms deadline)
//!       │     HIDE_DUE      │───────┘
//!       └───────────────────┘
//! ```
//!
//! Hiding is a debounce: every activity pushes the deadline to
//! `last_activity + delay`, and a check that fires early re-arms for the
//! remainder instead of hiding.

use glide_core::state::StateTransitions;

use crate::config::ScrollbarVisibility;

/// Indicator visibility states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisibilityState {
    #[default]
    Hidden,
    Visible,
}

/// Visibility events
pub mod visibility_events {
    /// Scroll input, target change or drag start
    pub const ACTIVITY: u32 = 1;
    /// Auto-hide deadline passed with no newer activity
    pub const HIDE_DUE: u32 = 2;
}

impl StateTransitions for VisibilityState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use visibility_events::*;

        match (self, event) {
            (VisibilityState::Hidden, ACTIVITY) => Some(VisibilityState::Visible),
            (VisibilityState::Visible, ACTIVITY) => None,
            (VisibilityState::Visible, HIDE_DUE) => Some(VisibilityState::Hidden),
            _ => None,
        }
    }
}

/// Result of an auto-hide check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HideCheck {
    /// Deadline passed; the indicator is now hidden
    Hidden,
    /// Newer activity moved the deadline; check again after this many ms
    Rearm(f64),
    /// Nothing to do (dragging, already hidden, or mode never hides)
    Keep,
}

/// Debounced show/hide tracker
#[derive(Debug, Clone)]
pub struct Visibility {
    state: VisibilityState,
    mode: ScrollbarVisibility,
    delay_ms: f64,
    last_activity_ms: f64,
}

impl Visibility {
    pub fn new(mode: ScrollbarVisibility, delay_ms: f64) -> Self {
        let state = match mode {
            ScrollbarVisibility::Always => VisibilityState::Visible,
            _ => VisibilityState::Hidden,
        };
        Self {
            state,
            mode,
            delay_ms: delay_ms.max(0.0),
            last_activity_ms: 0.0,
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == VisibilityState::Visible
    }

    pub fn last_activity_ms(&self) -> f64 {
        self.last_activity_ms
    }

    /// Record activity at `now_ms`. Returns true if the indicator became visible.
    pub fn on_activity(&mut self, now_ms: f64) -> bool {
        self.last_activity_ms = self.last_activity_ms.max(now_ms);
        if self.mode == ScrollbarVisibility::Never {
            return false;
        }
        self.state.apply(visibility_events::ACTIVITY)
    }

    /// Time left until the hide deadline
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.last_activity_ms + self.delay_ms - now_ms).max(0.0)
    }

    /// Whether an auto-hide check should be scheduled at all
    pub fn wants_hide_check(&self) -> bool {
        self.mode == ScrollbarVisibility::Auto && self.is_visible()
    }

    /// Run a (possibly stale) auto-hide check
    pub fn check(&mut self, now_ms: f64, dragging: bool) -> HideCheck {
        if dragging || !self.wants_hide_check() {
            return HideCheck::Keep;
        }
        let remaining = self.remaining_ms(now_ms);
        if remaining > 0.0 {
            return HideCheck::Rearm(remaining);
        }
        if self.state.apply(visibility_events::HIDE_DUE) {
            HideCheck::Hidden
        } else {
            HideCheck::Keep
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_shows() {
        let mut vis = Visibility::new(ScrollbarVisibility::Auto, 1600.0);
        assert!(!vis.is_visible());
        assert!(vis.on_activity(0.0));
        assert!(vis.is_visible());
        // Already visible: no transition
        assert!(!vis.on_activity(10.0));
    }

    #[test]
    fn test_debounce_rearms_for_remaining_time() {
        let mut vis = Visibility::new(ScrollbarVisibility::Auto, 1600.0);
        vis.on_activity(0.0);
        vis.on_activity(500.0);

        // Check armed by the first activity fires at 1600: too early
        assert_eq!(vis.check(1600.0, false), HideCheck::Rearm(500.0));
        assert!(vis.is_visible());

        assert_eq!(vis.check(2000.0, false), HideCheck::Rearm(100.0));
        assert_eq!(vis.check(2100.0, false), HideCheck::Hidden);
        assert!(!vis.is_visible());
    }

    #[test]
    fn test_never_hides_while_dragging() {
        let mut vis = Visibility::new(ScrollbarVisibility::Auto, 100.0);
        vis.on_activity(0.0);
        assert_eq!(vis.check(10_000.0, true), HideCheck::Keep);
        assert!(vis.is_visible());
        assert_eq!(vis.check(10_000.0, false), HideCheck::Hidden);
    }

    #[test]
    fn test_always_and_never_modes() {
        let mut always = Visibility::new(ScrollbarVisibility::Always, 100.0);
        assert!(always.is_visible());
        assert_eq!(always.check(10_000.0, false), HideCheck::Keep);
        assert!(always.is_visible());

        let mut never = Visibility::new(ScrollbarVisibility::Never, 100.0);
        assert!(!never.on_activity(0.0));
        assert!(!never.is_visible());
        assert!(!never.wants_hide_check());
    }

    #[test]
    fn test_stale_activity_timestamp_ignored() {
        let mut vis = Visibility::new(ScrollbarVisibility::Auto, 1000.0);
        vis.on_activity(800.0);
        vis.on_activity(200.0);
        assert_eq!(vis.last_activity_ms(), 800.0);
    }
}
