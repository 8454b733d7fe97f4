//! Scroll engine
//!
//! One [`ScrollEngine`] drives one scroll region: it owns the measured
//! geometry, the current/target offsets, the frame loop and the auto-hide
//! tracker, and writes every visual change through the shared [`ViewTree`].
//!
//! Every path that changes the target goes through one entry point, which
//! clamps the offset, marks the indicator active and either starts the frame
//! loop or, under reduced motion, applies the offset at once:
//!
//! ```text
//! input / API ──► set_target ──► FrameLoop ──► on_frame ──► apply_immediate
//!                     │                           │ settled
//!                     └─► Visibility (activity)   └─► hide check timer
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glide_animation::{FrameLoop, Lerp};
use glide_core::events::{EventData, InputEvent};
use glide_core::host::{FrameHost, FrameToken, RegionId, TimerToken};
use glide_core::view::{NodeId, ViewFlag, ViewTree};

use crate::config::{KeyScope, ScrollConfig, ScrollbarVisibility};
use crate::error::{HandleKind, Result, ScrollError};
use crate::geometry::{Geometry, OVERFLOW_EPSILON};
use crate::input::{
    key_intent, track_click_intent, wheel_intent, DragAnchor, ScrollIntent, TouchAnchor,
};
use crate::visibility::{HideCheck, Visibility, VisibilityState};

/// View tree shared by every engine of a page
pub type SharedView = Rc<RefCell<dyn ViewTree>>;

/// Frame host shared by every engine of a page
pub type SharedHost = Rc<RefCell<dyn FrameHost>>;

/// View-tree handles supplied by the collaborator, any of which may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionHandles {
    pub viewport: Option<NodeId>,
    pub content: Option<NodeId>,
    pub bar: Option<NodeId>,
    pub track: Option<NodeId>,
    pub thumb: Option<NodeId>,
}

impl RegionHandles {
    pub fn new(
        viewport: NodeId,
        content: NodeId,
        bar: NodeId,
        track: NodeId,
        thumb: NodeId,
    ) -> Self {
        Self {
            viewport: Some(viewport),
            content: Some(content),
            bar: Some(bar),
            track: Some(track),
            thumb: Some(thumb),
        }
    }

    /// Check every handle against the view tree, failing on the first missing one
    pub fn resolve(&self, view: &dyn ViewTree) -> Result<ResolvedHandles> {
        let get = |node: Option<NodeId>, kind: HandleKind| match node {
            Some(node) if view.contains(node) => Ok(node),
            _ => Err(ScrollError::MissingHandle(kind)),
        };

        Ok(ResolvedHandles {
            viewport: get(self.viewport, HandleKind::Viewport)?,
            content: get(self.content, HandleKind::Content)?,
            bar: get(self.bar, HandleKind::Bar)?,
            track: get(self.track, HandleKind::Track)?,
            thumb: get(self.thumb, HandleKind::Thumb)?,
        })
    }
}

/// Handles known to exist at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedHandles {
    pub viewport: NodeId,
    pub content: NodeId,
    pub bar: NodeId,
    pub track: NodeId,
    pub thumb: NodeId,
}

/// Virtual scroll state machine for one region
pub struct ScrollEngine {
    id: RegionId,
    handles: ResolvedHandles,
    config: ScrollConfig,
    geometry: Geometry,
    position: Lerp,
    frames: FrameLoop,
    visibility: Visibility,
    drag: Option<DragAnchor>,
    touch: Option<TouchAnchor>,
    hovered: bool,
    open: bool,
    hide_timer: Option<TimerToken>,
    torn_down: bool,
    view: SharedView,
    host: SharedHost,
}

impl std::fmt::Debug for ScrollEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollEngine")
            .field("id", &self.id)
            .field("geometry", &self.geometry)
            .field("scroll_y", &self.position.value())
            .field("target_y", &self.position.target())
            .field("visibility", &self.visibility.state())
            .field("dragging", &self.drag.is_some())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl ScrollEngine {
    /// Create an engine and take the initial measurement.
    ///
    /// Fails fast on an invalid config or a handle the view tree doesn't know.
    pub fn new(
        id: RegionId,
        handles: RegionHandles,
        config: ScrollConfig,
        view: SharedView,
        host: SharedHost,
    ) -> Result<Self> {
        config.validate()?;
        let handles = handles.resolve(&*view.borrow())?;

        let mut engine = Self {
            id,
            handles,
            config,
            geometry: Geometry::default(),
            position: Lerp::new(config.lerp_config(), 0.0),
            frames: FrameLoop::new(),
            visibility: Visibility::new(config.scrollbar, config.auto_hide_delay()),
            drag: None,
            touch: None,
            hovered: false,
            open: false,
            hide_timer: None,
            torn_down: false,
            view,
            host,
        };
        engine.force_measure();

        tracing::debug!(
            region = ?id,
            max_scroll = engine.geometry.max_scroll,
            thumb = engine.geometry.thumb,
            "scroll engine created"
        );
        Ok(engine)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    fn read_geometry(&self) -> Geometry {
        let view = self.view.borrow();
        Geometry::compute(
            view.extent(self.handles.viewport),
            view.extent(self.handles.content),
            view.extent(self.handles.track),
            self.config.min_thumb_size,
        )
    }

    /// Re-read sizes from the view tree.
    ///
    /// Returns false (and touches nothing) when the geometry is unchanged.
    pub fn measure(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let geometry = self.read_geometry();
        if geometry == self.geometry {
            return false;
        }
        tracing::debug!(
            region = ?self.id,
            viewport = geometry.viewport,
            content = geometry.content,
            max_scroll = geometry.max_scroll,
            thumb = geometry.thumb,
            "geometry changed"
        );
        self.geometry = geometry;
        self.refresh();
        true
    }

    /// Re-read sizes and re-render even if nothing changed
    pub fn force_measure(&mut self) {
        if self.torn_down {
            return;
        }
        self.geometry = self.read_geometry();
        self.refresh();
    }

    fn refresh(&mut self) {
        let target = self.geometry.clamp_offset(self.position.target());
        self.position.set_target(target);
        self.sync_bar();
        self.apply_immediate(self.position.value());
    }

    /// Bar flags: hidden without overflow, active while visible
    fn sync_bar(&self) {
        let hidden =
            !self.geometry.overflows() || self.config.scrollbar == ScrollbarVisibility::Never;
        let mut view = self.view.borrow_mut();
        view.set_flag(self.handles.bar, ViewFlag::Hidden, hidden);
        view.set_flag(
            self.handles.bar,
            ViewFlag::Active,
            self.visibility.is_visible(),
        );
    }

    // =========================================================================
    // Position
    // =========================================================================

    /// Clamp `offset`, make it the current offset and render it
    pub fn apply_immediate(&mut self, offset: f32) {
        let offset = self.geometry.clamp_offset(offset);
        self.position.set_value(offset);

        let thumb_pos = self.geometry.thumb_offset(offset);
        let mut view = self.view.borrow_mut();
        view.set_translate(self.handles.content, -offset);
        view.set_extent(self.handles.thumb, self.geometry.thumb);
        view.set_translate(self.handles.thumb, thumb_pos);

        tracing::trace!(region = ?self.id, offset, thumb_pos, "offset applied");
    }

    fn set_target(&mut self, target: f32) {
        if self.torn_down {
            return;
        }
        let target = self.geometry.clamp_offset(target);
        self.position.set_target(target);
        self.mark_active();

        let reduced_motion = self.host.borrow().prefers_reduced_motion();
        if reduced_motion {
            self.frames.cancel(&mut *self.host.borrow_mut());
            self.position.snap_to(target);
            self.apply_immediate(target);
            self.schedule_hide_check();
            return;
        }

        self.frames.start(&mut *self.host.borrow_mut(), self.id);
    }

    fn apply_intent(&mut self, intent: ScrollIntent) {
        self.set_target(intent.resolve(self.position.target()));
    }

    /// Ease toward `offset` (clamped)
    pub fn scroll_to(&mut self, offset: f32) {
        self.set_target(offset);
    }

    /// Ease by `delta` relative to the current target
    pub fn scroll_by(&mut self, delta: f32) {
        self.apply_intent(ScrollIntent::By(delta));
    }

    /// Re-measure, then ease toward the new maximum
    pub fn scroll_to_end(&mut self) {
        self.measure();
        self.set_target(self.geometry.max_scroll);
    }

    /// Content mutated: re-measure, following to the end when pinned
    pub fn content_changed(&mut self) {
        if self.config.pin_to_end {
            self.scroll_to_end();
        } else {
            self.measure();
        }
    }

    pub fn max_scroll(&self) -> f32 {
        self.geometry.max_scroll
    }

    /// Current (rendered) offset
    pub fn scroll_y(&self) -> f32 {
        self.position.value()
    }

    pub fn target_y(&self) -> f32 {
        self.position.target()
    }

    pub fn is_at_end(&self) -> bool {
        self.geometry.max_scroll - self.position.value() <= OVERFLOW_EPSILON
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.frames.is_running()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn visibility_state(&self) -> VisibilityState {
        self.visibility.state()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn handles(&self) -> &ResolvedHandles {
        &self.handles
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    // =========================================================================
    // Frames & timers
    // =========================================================================

    /// Advance one display refresh. Returns false for stale tokens.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        if self.torn_down || !self.frames.accept(token) {
            return false;
        }

        let moving = self.position.step();
        self.apply_immediate(self.position.value());

        if moving {
            self.frames.request_next(&mut *self.host.borrow_mut(), self.id);
        } else {
            tracing::debug!(
                region = ?self.id,
                offset = self.position.value(),
                frames = self.frames.frames_run(),
                "scroll settled"
            );
            self.schedule_hide_check();
        }
        true
    }

    /// Run the auto-hide check. Returns false for stale tokens.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        if self.torn_down || self.hide_timer != Some(token) {
            return false;
        }
        self.hide_timer = None;

        let now = self.host.borrow().now_ms();
        match self.visibility.check(now, self.drag.is_some()) {
            HideCheck::Hidden => {
                tracing::debug!(region = ?self.id, now, "scrollbar hidden");
                self.view
                    .borrow_mut()
                    .set_flag(self.handles.bar, ViewFlag::Active, false);
            }
            HideCheck::Rearm(remaining) => {
                tracing::trace!(region = ?self.id, remaining, "hide check re-armed");
                let token = self.host.borrow_mut().set_timer(self.id, remaining);
                self.hide_timer = Some(token);
            }
            HideCheck::Keep => {}
        }
        true
    }

    fn mark_active(&mut self) {
        let now = self.host.borrow().now_ms();
        if self.visibility.on_activity(now) {
            tracing::debug!(region = ?self.id, now, "scrollbar shown");
            self.view
                .borrow_mut()
                .set_flag(self.handles.bar, ViewFlag::Active, true);
        }
        if let Some(token) = self.hide_timer.take() {
            self.host.borrow_mut().clear_timer(token);
        }
    }

    fn schedule_hide_check(&mut self) {
        if self.torn_down || self.drag.is_some() || !self.visibility.wants_hide_check() {
            return;
        }
        let mut host = self.host.borrow_mut();
        if let Some(token) = self.hide_timer.take() {
            host.clear_timer(token);
        }
        let delay = self.visibility.remaining_ms(host.now_ms());
        self.hide_timer = Some(host.set_timer(self.id, delay));
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Wheel over the region. Always suppresses the host's native scroll.
    pub fn on_wheel(&mut self, event: &mut InputEvent) -> bool {
        let EventData::Wheel {
            delta_y, modifiers, ..
        } = event.data
        else {
            return false;
        };
        if self.torn_down {
            return false;
        }

        event.prevent_default();
        if self.config.stop_propagation {
            event.stop_propagation();
        }
        if let Some(intent) = wheel_intent(delta_y, modifiers, self.config.wheel_step) {
            tracing::trace!(region = ?self.id, delta_y, ?intent, "wheel");
            self.apply_intent(intent);
        }
        true
    }

    /// Whether page-wide key events currently belong to this region
    pub fn accepts_keys(&self) -> bool {
        if self.torn_down {
            return false;
        }
        match self.config.key_scope {
            KeyScope::Hover => self.hovered,
            KeyScope::WhenOpen => self.open,
        }
    }

    /// Navigation key. Ignored inside text inputs or when the region is not applicable.
    pub fn on_key(&mut self, event: &mut InputEvent) -> bool {
        let EventData::Key {
            key,
            modifiers,
            in_text_input,
            ..
        } = event.data
        else {
            return false;
        };
        if in_text_input || !self.accepts_keys() {
            return false;
        }
        let Some(intent) = key_intent(key, modifiers, &self.geometry, self.config.wheel_step)
        else {
            return false;
        };

        event.prevent_default();
        self.apply_intent(intent);
        true
    }

    pub fn on_pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn on_pointer_leave(&mut self) {
        self.hovered = false;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Open state for regions that listen for keys while open
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Press on the thumb (starts a drag) or the track (track click)
    pub fn on_pointer_down(&mut self, event: &mut InputEvent) -> bool {
        if self.torn_down {
            return false;
        }
        let (Some(target), Some(y)) = (event.target, event.y()) else {
            return false;
        };

        if target == self.handles.thumb {
            event.prevent_default();
            self.begin_drag(y);
            return true;
        }

        if target == self.handles.track {
            event.prevent_default();
            let track_top = self.view.borrow().origin(self.handles.track);
            let thumb_top = self.geometry.thumb_offset(self.position.value());
            let intent = track_click_intent(
                self.config.track_click,
                y - track_top,
                thumb_top,
                &self.geometry,
            );
            tracing::trace!(region = ?self.id, ?intent, "track click");
            self.apply_intent(intent);
            return true;
        }

        false
    }

    fn begin_drag(&mut self, pointer_y: f32) {
        self.frames.cancel(&mut *self.host.borrow_mut());
        let offset = self.position.value();
        self.position.snap_to(offset);
        self.drag = Some(DragAnchor::new(pointer_y, offset));
        self.mark_active();
        self.view
            .borrow_mut()
            .set_flag(self.handles.thumb, ViewFlag::Dragging, true);
        tracing::debug!(region = ?self.id, pointer_y, offset, "thumb drag started");
    }

    /// Global pointer move; only meaningful while dragging the thumb
    pub fn on_pointer_move(&mut self, event: &mut InputEvent) -> bool {
        let (Some(anchor), Some(y)) = (self.drag, event.y()) else {
            return false;
        };

        let offset = anchor.offset_at(y, &self.geometry);
        self.position.snap_to(offset);
        self.apply_immediate(offset);
        self.mark_active();
        event.prevent_default();
        true
    }

    /// Global pointer release; ends a drag
    pub fn on_pointer_up(&mut self, _event: &mut InputEvent) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        self.view
            .borrow_mut()
            .set_flag(self.handles.thumb, ViewFlag::Dragging, false);
        tracing::debug!(region = ?self.id, offset = self.position.value(), "thumb drag ended");
        self.schedule_hide_check();
        true
    }

    pub fn on_touch_start(&mut self, event: &mut InputEvent) -> bool {
        let Some(y) = event.y() else {
            return false;
        };
        if self.torn_down {
            return false;
        }
        self.touch = Some(TouchAnchor::new(y, self.position.target()));
        true
    }

    pub fn on_touch_move(&mut self, event: &mut InputEvent) -> bool {
        let (Some(anchor), Some(y)) = (self.touch, event.y()) else {
            return false;
        };

        event.prevent_default();
        if self.config.stop_propagation {
            event.stop_propagation();
        }
        self.set_target(anchor.target_at(y));
        true
    }

    pub fn on_touch_end(&mut self, _event: &mut InputEvent) -> bool {
        self.touch.take().is_some()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Cancel the pending frame and hide timer; the engine ignores all later input.
    ///
    /// Fails with [`ScrollError::HostBusy`] and changes nothing while the
    /// frame host is borrowed elsewhere.
    pub fn teardown(&mut self) -> Result<()> {
        if self.torn_down {
            return Ok(());
        }
        let host = Rc::clone(&self.host);
        let mut host = host.try_borrow_mut().map_err(|_| ScrollError::HostBusy)?;
        self.teardown_with(&mut *host);
        Ok(())
    }

    /// Teardown against a host the caller already holds
    pub fn teardown_with(&mut self, host: &mut dyn FrameHost) {
        if self.torn_down {
            return;
        }
        self.frames.cancel(host);
        if let Some(token) = self.hide_timer.take() {
            host.clear_timer(token);
        }
        self.torn_down = true;
        self.drag = None;
        self.touch = None;
        tracing::debug!(region = ?self.id, "scroll engine torn down");
    }
}

impl Drop for ScrollEngine {
    fn drop(&mut self) {
        if let Err(err) = self.teardown() {
            tracing::warn!(
                region = ?self.id,
                %err,
                "scroll engine dropped with requests pending"
            );
        }
    }
}
