//! Scroll region registry
//!
//! Owns one [`ScrollEngine`] per named region and is the single place a host
//! talks to: it routes frame/timer wakes by [`RegionId`], sends page-wide key
//! events to the one applicable region, and forwards global pointer moves to
//! whichever regions are mid-drag.

use glide_core::events::{EventData, InputEvent};
use glide_core::host::{RegionId, Wake};
use indexmap::IndexMap;
use slotmap::SlotMap;

use crate::config::ScrollConfig;
use crate::engine::{RegionHandles, ScrollEngine, SharedHost, SharedView};
use crate::error::{Result, ScrollError};
use crate::keyboard::KeyRouter;

/// Named collection of scroll engines sharing one view tree and frame host
pub struct ScrollRegistry {
    view: SharedView,
    host: SharedHost,
    engines: SlotMap<RegionId, ScrollEngine>,
    names: IndexMap<String, RegionId>,
    keys: KeyRouter,
}

impl std::fmt::Debug for ScrollRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollRegistry")
            .field("regions", &self.names)
            .finish_non_exhaustive()
    }
}

impl ScrollRegistry {
    pub fn new(view: SharedView, host: SharedHost) -> Self {
        Self {
            view,
            host,
            engines: SlotMap::with_key(),
            names: IndexMap::new(),
            keys: KeyRouter::new(),
        }
    }

    /// Create the engine for `name`.
    ///
    /// On error nothing is registered and the name stays free.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handles: RegionHandles,
        config: ScrollConfig,
    ) -> Result<RegionId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(ScrollError::DuplicateRegion(name));
        }

        let view = self.view.clone();
        let host = self.host.clone();
        let id = self
            .engines
            .try_insert_with_key(|id| ScrollEngine::new(id, handles, config, view, host))?;

        tracing::debug!(region = %name, ?id, "scroll region registered");
        self.names.insert(name, id);
        self.keys.register(id);
        Ok(id)
    }

    /// Tear down and forget `name`; later wakes for it are ignored.
    ///
    /// With the frame host borrowed elsewhere this fails and the region stays
    /// registered.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let id = self
            .id_of(name)
            .ok_or_else(|| ScrollError::UnknownRegion(name.to_string()))?;
        let mut host = self
            .host
            .try_borrow_mut()
            .map_err(|_| ScrollError::HostBusy)?;

        self.names.shift_remove(name);
        self.keys.unregister(id);
        if let Some(mut engine) = self.engines.remove(id) {
            engine.teardown_with(&mut *host);
        }
        tracing::debug!(region = %name, "scroll region removed");
        Ok(())
    }

    /// Tear down every region; fails without touching any while the host is borrowed
    pub fn teardown_all(&mut self) -> Result<()> {
        let mut host = self
            .host
            .try_borrow_mut()
            .map_err(|_| ScrollError::HostBusy)?;

        for (_, mut engine) in self.engines.drain() {
            engine.teardown_with(&mut *host);
        }
        self.names.clear();
        self.keys = KeyRouter::new();
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ScrollEngine> {
        self.names.get(name).and_then(|id| self.engines.get(*id))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ScrollEngine> {
        let id = *self.names.get(name)?;
        self.engines.get_mut(id)
    }

    pub fn by_id(&self, id: RegionId) -> Option<&ScrollEngine> {
        self.engines.get(id)
    }

    pub fn by_id_mut(&mut self, id: RegionId) -> Option<&mut ScrollEngine> {
        self.engines.get_mut(id)
    }

    pub fn id_of(&self, name: &str) -> Option<RegionId> {
        self.names.get(name).copied()
    }

    /// Region names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn engine_mut(&mut self, name: &str) -> Result<&mut ScrollEngine> {
        self.get_mut(name)
            .ok_or_else(|| ScrollError::UnknownRegion(name.to_string()))
    }

    // =========================================================================
    // Re-entry points
    // =========================================================================

    pub fn force_measure(&mut self, name: &str) -> Result<()> {
        self.engine_mut(name)?.force_measure();
        Ok(())
    }

    pub fn scroll_to_end(&mut self, name: &str) -> Result<()> {
        self.engine_mut(name)?.scroll_to_end();
        Ok(())
    }

    pub fn scroll_to(&mut self, name: &str, offset: f32) -> Result<()> {
        self.engine_mut(name)?.scroll_to(offset);
        Ok(())
    }

    /// The collaborator replaced or appended content in `name`
    pub fn content_changed(&mut self, name: &str) -> Result<()> {
        self.engine_mut(name)?.content_changed();
        Ok(())
    }

    /// The host window resized; every region re-measures
    pub fn viewport_resized(&mut self) {
        for engine in self.engines.values_mut() {
            engine.measure();
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Deliver a host wake. Returns false when no live region accepted it.
    pub fn dispatch(&mut self, wake: Wake) -> bool {
        let Some(engine) = self.engines.get_mut(wake.region()) else {
            tracing::trace!(?wake, "wake for removed region ignored");
            return false;
        };
        match wake {
            Wake::Frame(_, token) => engine.on_frame(token),
            Wake::Timer(_, token) => engine.on_timer(token),
        }
    }

    /// Route a page-wide key event to the first applicable region
    pub fn dispatch_key(&mut self, event: &mut InputEvent) -> Option<RegionId> {
        if matches!(
            event.data,
            EventData::Key {
                in_text_input: true,
                ..
            }
        ) {
            return None;
        }

        let engines = &self.engines;
        let id = self
            .keys
            .route(|id| engines.get(id).is_some_and(ScrollEngine::accepts_keys))?;
        let engine = self.engines.get_mut(id)?;
        engine.on_key(event).then_some(id)
    }

    /// Global pointer move, delivered to regions mid-drag
    pub fn dispatch_pointer_move(&mut self, event: &mut InputEvent) -> bool {
        let mut handled = false;
        for engine in self.engines.values_mut().filter(|e| e.is_dragging()) {
            handled |= engine.on_pointer_move(event);
        }
        handled
    }

    /// Global pointer release, delivered to regions mid-drag
    pub fn dispatch_pointer_up(&mut self, event: &mut InputEvent) -> bool {
        let mut handled = false;
        for engine in self.engines.values_mut().filter(|e| e.is_dragging()) {
            handled |= engine.on_pointer_up(event);
        }
        handled
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }

    pub fn host(&self) -> &SharedHost {
        &self.host
    }
}

impl Drop for ScrollRegistry {
    fn drop(&mut self) {
        if let Err(err) = self.teardown_all() {
            tracing::warn!(
                %err,
                regions = self.names.len(),
                "scroll registry dropped with requests pending"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::events::{event_types, KeyCode, Modifiers};
    use glide_core::headless::{HeadlessHost, HeadlessView, FRAME_INTERVAL_MS};
    use glide_core::view::NodeId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn region(view: &mut HeadlessView, viewport: f32, content: f32) -> RegionHandles {
        RegionHandles::new(
            view.insert(0.0, viewport),
            view.insert(0.0, content),
            view.insert(0.0, viewport),
            view.insert(0.0, viewport),
            view.insert(0.0, 0.0),
        )
    }

    fn setup() -> (
        ScrollRegistry,
        Rc<RefCell<HeadlessHost>>,
        RegionHandles,
        RegionHandles,
    ) {
        let mut view = HeadlessView::new();
        let main = region(&mut view, 300.0, 1200.0);
        let chat = region(&mut view, 200.0, 800.0);
        let host = Rc::new(RefCell::new(HeadlessHost::new()));
        let registry = ScrollRegistry::new(Rc::new(RefCell::new(view)), host.clone());
        (registry, host, main, chat)
    }

    fn pump(registry: &mut ScrollRegistry, host: &Rc<RefCell<HeadlessHost>>, ms: f64) {
        let wakes = host.borrow_mut().advance(ms);
        for wake in wakes {
            registry.dispatch(wake);
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let (mut registry, _host, main, chat) = setup();
        let main_id = registry
            .register("main", main, ScrollConfig::default())
            .unwrap();
        registry.register("chat", chat, ScrollConfig::chat()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.id_of("main"), Some(main_id));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["main", "chat"]);
        assert_eq!(registry.get("chat").unwrap().max_scroll(), 600.0);
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_failed_registration_leaves_no_entry() {
        let (mut registry, _host, main, _chat) = setup();
        let broken = RegionHandles {
            thumb: None,
            ..main
        };
        let err = registry
            .register("main", broken, ScrollConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScrollError::MissingHandle(_)));
        assert!(!registry.contains("main"));
        assert!(registry.is_empty());

        // Name is still free afterwards
        registry
            .register("main", main, ScrollConfig::default())
            .unwrap();
        let dup = registry.register("main", main, ScrollConfig::default());
        assert!(matches!(dup, Err(ScrollError::DuplicateRegion(_))));
    }

    #[test]
    fn test_instances_are_isolated() {
        let (mut registry, host, main, chat) = setup();
        registry
            .register("main", main, ScrollConfig::default())
            .unwrap();
        registry.register("chat", chat, ScrollConfig::chat()).unwrap();

        registry.scroll_to("main", 500.0).unwrap();
        registry.scroll_to_end("chat").unwrap();
        for _ in 0..200 {
            pump(&mut registry, &host, FRAME_INTERVAL_MS);
        }

        assert_eq!(registry.get("main").unwrap().scroll_y(), 500.0);
        assert_eq!(registry.get("chat").unwrap().scroll_y(), 600.0);
    }

    #[test]
    fn test_unknown_region_errors() {
        let (mut registry, _host, _main, _chat) = setup();
        assert!(matches!(
            registry.scroll_to_end("nope"),
            Err(ScrollError::UnknownRegion(name)) if name == "nope"
        ));
        assert!(registry.force_measure("nope").is_err());
        assert!(registry.remove("nope").is_err());
    }

    #[test]
    fn test_removed_region_ignores_wakes() {
        let (mut registry, host, main, _chat) = setup();
        registry
            .register("main", main, ScrollConfig::default())
            .unwrap();
        registry.scroll_to("main", 500.0).unwrap();

        // Wake captured before removal arrives afterwards
        let wakes = host.borrow_mut().advance(FRAME_INTERVAL_MS);
        registry.remove("main").unwrap();
        for wake in wakes {
            assert!(!registry.dispatch(wake));
        }
        assert!(host.borrow().is_idle());
    }

    #[test]
    fn test_key_routes_to_hovered_region_only() {
        let (mut registry, _host, main, chat) = setup();
        registry
            .register("main", main, ScrollConfig::default())
            .unwrap();
        let chat_id = registry.register("chat", chat, ScrollConfig::chat()).unwrap();

        let mut event = InputEvent::key(KeyCode::END, Modifiers::NONE);
        assert_eq!(registry.dispatch_key(&mut event), None);

        registry.get_mut("chat").unwrap().on_pointer_enter();
        let mut event = InputEvent::key(KeyCode::END, Modifiers::NONE);
        assert_eq!(registry.dispatch_key(&mut event), Some(chat_id));
        assert_eq!(registry.get("chat").unwrap().target_y(), 600.0);
        assert_eq!(registry.get("main").unwrap().target_y(), 0.0);
    }

    #[test]
    fn test_text_input_keys_never_routed() {
        let (mut registry, _host, main, _chat) = setup();
        registry
            .register("main", main, ScrollConfig::default())
            .unwrap();
        registry.get_mut("main").unwrap().on_pointer_enter();

        let mut event = InputEvent::key(KeyCode::DOWN, Modifiers::NONE).in_text_input();
        assert_eq!(registry.dispatch_key(&mut event), None);
        assert_eq!(registry.get("main").unwrap().target_y(), 0.0);
    }

    #[test]
    fn test_global_pointer_events_reach_dragging_region() {
        let (mut registry, _host, main, chat) = setup();
        registry
            .register("main", main, ScrollConfig::default())
            .unwrap();
        registry.register("chat", chat, ScrollConfig::chat()).unwrap();

        let thumb: NodeId = main.thumb.unwrap();
        let mut down =
            InputEvent::pointer(event_types::POINTER_DOWN, 0.0, 10.0).with_target(thumb);
        assert!(registry.get_mut("main").unwrap().on_pointer_down(&mut down));

        let mut moved = InputEvent::pointer(event_types::POINTER_MOVE, 0.0, 55.0);
        assert!(registry.dispatch_pointer_move(&mut moved));
        assert_eq!(registry.get("main").unwrap().scroll_y(), 180.0);
        assert_eq!(registry.get("chat").unwrap().scroll_y(), 0.0);

        let mut up = InputEvent::pointer(event_types::POINTER_UP, 0.0, 55.0);
        assert!(registry.dispatch_pointer_up(&mut up));
        assert!(!registry.dispatch_pointer_up(&mut up));
    }

    #[test]
    fn test_viewport_resized_remeasures_all() {
        let mut view = HeadlessView::new();
        let main = region(&mut view, 300.0, 1200.0);
        let view = Rc::new(RefCell::new(view));
        let host = Rc::new(RefCell::new(HeadlessHost::new()));
        let mut registry = ScrollRegistry::new(view.clone(), host);
        registry
            .register("main", main, ScrollConfig::default())
            .unwrap();

        view.borrow_mut().resize(main.viewport.unwrap(), 600.0);
        registry.viewport_resized();
        assert_eq!(registry.get("main").unwrap().max_scroll(), 600.0);
    }

    #[test]
    fn test_teardown_all_cancels_pending_work() {
        let (mut registry, host, main, chat) = setup();
        registry
            .register("main", main, ScrollConfig::default())
            .unwrap();
        registry.register("chat", chat, ScrollConfig::chat()).unwrap();
        registry.scroll_to("main", 300.0).unwrap();
        registry.scroll_to("chat", 300.0).unwrap();
        assert_eq!(host.borrow().pending_frames(), 2);

        registry.teardown_all().unwrap();
        assert!(registry.is_empty());
        assert!(host.borrow().is_idle());
    }

    #[test]
    fn test_remove_with_busy_host_keeps_region() {
        let (mut registry, host, main, _chat) = setup();
        registry
            .register("main", main, ScrollConfig::default())
            .unwrap();
        registry.scroll_to("main", 300.0).unwrap();

        {
            let _held = host.borrow_mut();
            assert!(matches!(registry.remove("main"), Err(ScrollError::HostBusy)));
            assert!(matches!(registry.teardown_all(), Err(ScrollError::HostBusy)));
        }
        assert!(registry.contains("main"));
        assert!(!registry.get("main").unwrap().is_torn_down());
        assert_eq!(host.borrow().pending_frames(), 1);

        registry.remove("main").unwrap();
        assert!(!registry.contains("main"));
        assert!(host.borrow().is_idle());
    }
}
