//! Region bootstrap
//!
//! Turns a [`GlideConfig`] into a live [`ScrollRegistry`] by resolving each
//! region's element identifiers through a [`HandleLocator`].

use glide_core::view::NodeId;
use glide_scroll::{RegionHandles, ScrollRegistry, SharedHost, SharedView};
use rustc_hash::FxHashMap;

use crate::config::{GlideConfig, RegionElements};

/// Resolves element identifiers to view-tree nodes
pub trait HandleLocator {
    fn locate(&self, element_id: &str) -> Option<NodeId>;
}

impl<F> HandleLocator for F
where
    F: Fn(&str) -> Option<NodeId>,
{
    fn locate(&self, element_id: &str) -> Option<NodeId> {
        self(element_id)
    }
}

/// Locator backed by an id → node table
#[derive(Debug, Default, Clone)]
pub struct IdLocator {
    nodes: FxHashMap<String, NodeId>,
}

impl IdLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element_id: impl Into<String>, node: NodeId) {
        self.nodes.insert(element_id.into(), node);
    }

    pub fn with(mut self, element_id: impl Into<String>, node: NodeId) -> Self {
        self.insert(element_id, node);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl HandleLocator for IdLocator {
    fn locate(&self, element_id: &str) -> Option<NodeId> {
        self.nodes.get(element_id).copied()
    }
}

impl RegionElements {
    /// Look up every handle; unresolved ones stay `None`
    pub fn locate(&self, locator: &dyn HandleLocator) -> RegionHandles {
        RegionHandles {
            viewport: locator.locate(&self.viewport),
            content: locator.locate(&self.content),
            bar: locator.locate(&self.bar),
            track: locator.locate(&self.track),
            thumb: locator.locate(&self.thumb),
        }
    }
}

/// Build one engine per configured region.
///
/// Regions that cannot be created (usually a handle missing from the page)
/// are logged and skipped; the rest of the page still scrolls.
pub fn bootstrap(
    config: &GlideConfig,
    locator: &dyn HandleLocator,
    view: SharedView,
    host: SharedHost,
) -> ScrollRegistry {
    let mut registry = ScrollRegistry::new(view, host);

    for (name, region) in &config.regions {
        let handles = region.elements.locate(locator);
        match registry.register(name.as_str(), handles, region.scroll) {
            Ok(id) => tracing::debug!(region = %name, ?id, "region bootstrapped"),
            Err(err) => tracing::warn!(region = %name, error = %err, "region skipped"),
        }
    }

    tracing::debug!(
        configured = config.regions.len(),
        registered = registry.len(),
        "bootstrap complete"
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::headless::{HeadlessHost, HeadlessView};
    use std::cell::RefCell;
    use std::rc::Rc;

    const CONFIG: &str = r#"
        [regions.main]
        viewport = "vp"
        content = "content"
        bar = "bar"
        track = "track"
        thumb = "thumb"

        [regions.orphan]
        viewport = "vp"
        content = "content"
        bar = "bar"
        track = "track"
        thumb = "no-such-thumb"
    "#;

    #[test]
    fn test_unresolved_region_is_absent() {
        let mut view = HeadlessView::new();
        let locator = IdLocator::new()
            .with("vp", view.insert(0.0, 300.0))
            .with("content", view.insert(0.0, 1200.0))
            .with("bar", view.insert(0.0, 300.0))
            .with("track", view.insert(0.0, 300.0))
            .with("thumb", view.insert(0.0, 0.0));

        let config = GlideConfig::from_toml_str(CONFIG).unwrap();
        let registry = bootstrap(
            &config,
            &locator,
            Rc::new(RefCell::new(view)),
            Rc::new(RefCell::new(HeadlessHost::new())),
        );

        assert!(registry.contains("main"));
        assert!(!registry.contains("orphan"));
        assert_eq!(registry.get("main").unwrap().max_scroll(), 900.0);
    }

    #[test]
    fn test_closure_locator() {
        let mut view = HeadlessView::new();
        let node = view.insert(0.0, 10.0);
        let locator = move |id: &str| (id == "x").then_some(node);

        let elements = RegionElements {
            viewport: "x".into(),
            content: "x".into(),
            bar: "y".into(),
            track: "x".into(),
            thumb: "x".into(),
        };
        let handles = elements.locate(&locator);
        assert_eq!(handles.viewport, Some(node));
        assert_eq!(handles.bar, None);
    }
}
