//! Input events
//!
//! Platform-neutral representation of every scroll-causing input the engine
//! consumes. Hosts translate their native events into [`InputEvent`] and read
//! back `default_prevented` / `propagation_stopped` after dispatch.

use crate::view::NodeId;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const KEY_DOWN: EventType = 20;
    /// Mouse wheel or trackpad scroll
    pub const WHEEL: EventType = 30;
    pub const TOUCH_START: EventType = 35;
    pub const TOUCH_MOVE: EventType = 36;
    pub const TOUCH_END: EventType = 37;
}

/// An input event with associated data
#[derive(Clone, Debug)]
pub struct InputEvent {
    pub event_type: EventType,
    /// Node the event was delivered to, if the host resolved one
    pub target: Option<NodeId>,
    pub data: EventData,
    /// Host timestamp in milliseconds
    pub timestamp: f64,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    /// Pointer position in page coordinates
    Pointer { x: f32, y: f32, button: u8 },
    Key {
        /// Virtual key code (use KeyCode constants)
        key: KeyCode,
        /// Keyboard modifier flags
        modifiers: Modifiers,
        /// Whether this is a repeat event
        repeat: bool,
        /// Focus is inside a text-input control
        in_text_input: bool,
    },
    Wheel {
        delta_x: f32,
        delta_y: f32,
        modifiers: Modifiers,
    },
    /// Single-finger touch position in page coordinates
    Touch { x: f32, y: f32 },
    None,
}

impl InputEvent {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            target: None,
            data,
            timestamp: 0.0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Wheel event with a vertical delta
    pub fn wheel(delta_y: f32, modifiers: Modifiers) -> Self {
        Self::new(
            event_types::WHEEL,
            EventData::Wheel {
                delta_x: 0.0,
                delta_y,
                modifiers,
            },
        )
    }

    /// Key-down event
    pub fn key(key: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(
            event_types::KEY_DOWN,
            EventData::Key {
                key,
                modifiers,
                repeat: false,
                in_text_input: false,
            },
        )
    }

    /// Pointer event of the given type at page coordinates
    pub fn pointer(event_type: EventType, x: f32, y: f32) -> Self {
        Self::new(event_type, EventData::Pointer { x, y, button: 0 })
    }

    /// Touch event of the given type at page coordinates
    pub fn touch(event_type: EventType, x: f32, y: f32) -> Self {
        Self::new(event_type, EventData::Touch { x, y })
    }

    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// Mark the key event as originating inside a text-input control
    pub fn in_text_input(mut self) -> Self {
        if let EventData::Key { in_text_input, .. } = &mut self.data {
            *in_text_input = true;
        }
        self
    }

    /// Suppress the host's default action (native scroll, text selection)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Vertical position for pointer and touch events
    pub fn y(&self) -> Option<f32> {
        match self.data {
            EventData::Pointer { y, .. } | EventData::Touch { y, .. } => Some(y),
            _ => None,
        }
    }
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Vertical arrows
    pub const UP: KeyCode = KeyCode(0x26);
    pub const DOWN: KeyCode = KeyCode(0x28);

    // Navigation keys
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const END: KeyCode = KeyCode(0x23);
    pub const PAGE_UP: KeyCode = KeyCode(0x21);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x22);
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000; // Cmd on macOS, Win on Windows

    /// Create new modifiers from flags
    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    /// Create from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    pub const fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    pub const fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub const fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    pub const fn meta(&self) -> bool {
        self.bits & Self::META != 0
    }

    /// Check if any modifier is pressed
    pub const fn any(&self) -> bool {
        self.bits != 0
    }
}
