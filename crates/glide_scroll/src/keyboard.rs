//! Page-wide key routing
//!
//! A page has one keyboard listener but many regions. Regions are tried in
//! registration order and the first one whose predicate accepts the event
//! handles it alone.

use glide_core::host::RegionId;
use smallvec::SmallVec;

/// Registration-ordered dispatch table
#[derive(Debug, Default, Clone)]
pub struct KeyRouter {
    order: SmallVec<[RegionId; 4]>,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region; registering twice keeps the original position
    pub fn register(&mut self, region: RegionId) {
        if !self.order.contains(&region) {
            self.order.push(region);
        }
    }

    pub fn unregister(&mut self, region: RegionId) {
        self.order.retain(|r| *r != region);
    }

    /// First region for which `applies` returns true
    pub fn route(&self, mut applies: impl FnMut(RegionId) -> bool) -> Option<RegionId> {
        self.order.iter().copied().find(|&region| applies(region))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
