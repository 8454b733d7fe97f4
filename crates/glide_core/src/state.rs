//! State transitions
//!
//! Small enum-based state machines implement [`StateTransitions`]: a pure
//! `(state, event) -> Option<new state>` table, with `None` meaning the event
//! does not apply in the current state.

use std::hash::Hash;

/// Trait for enum states with an event transition table
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply `event` in place, returning whether the state changed
    fn apply(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                *self = next;
                true
            }
            _ => false,
        }
    }
}
