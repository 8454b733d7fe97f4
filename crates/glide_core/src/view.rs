//! View tree seam
//!
//! The engine never owns the nodes it scrolls. It reads measured sizes and
//! writes translations, lengths and state flags through [`ViewTree`], which a
//! host implements over its own element tree.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a node in the host's view tree
    pub struct NodeId;
}

/// Boolean presentation state toggled on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewFlag {
    /// Node is not displayed at all (indicator bar when nothing overflows)
    Hidden,
    /// Indicator is currently shown (auto-hide state)
    Active,
    /// Thumb is being dragged
    Dragging,
}

/// Access to the host's view tree
///
/// All lengths are along the scroll axis, in logical pixels.
pub trait ViewTree {
    /// Whether the node handle is live
    fn contains(&self, node: NodeId) -> bool;

    /// Measured length of the node
    fn extent(&self, node: NodeId) -> f32;

    /// Page-space position of the node's leading edge
    fn origin(&self, node: NodeId) -> f32;

    /// Translate the node along the scroll axis
    fn set_translate(&mut self, node: NodeId, offset: f32);

    /// Override the node's length
    fn set_extent(&mut self, node: NodeId, length: f32);

    fn set_flag(&mut self, node: NodeId, flag: ViewFlag, on: bool);
}
