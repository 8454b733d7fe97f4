//! Headless runtime primitives for deterministic scroll runs.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use anyhow::{bail, Result};
use glide_core::headless::{HeadlessHost, HeadlessView};
use glide_scroll::ScrollRegistry;

use crate::bootstrap::{bootstrap, HandleLocator};
use crate::config::GlideConfig;

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Number of frames to execute (upper bound for idle runs).
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            max_frames: 600,
            tick_ms: 16,
        }
    }
}

impl HeadlessRunConfig {
    fn check(&self) -> Result<()> {
        if self.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if self.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        Ok(())
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    pub elapsed_ms: u64,
    /// Frame and timer wakes dispatched during this frame
    pub wakes: usize,
}

/// Registry driven by an in-memory view tree and virtual clock.
pub struct HeadlessRuntime {
    view: Rc<RefCell<HeadlessView>>,
    host: Rc<RefCell<HeadlessHost>>,
    registry: ScrollRegistry,
}

impl HeadlessRuntime {
    /// Runtime with an empty registry
    pub fn new(view: HeadlessView, host: HeadlessHost) -> Self {
        let view = Rc::new(RefCell::new(view));
        let host = Rc::new(RefCell::new(host));
        let registry = ScrollRegistry::new(view.clone(), host.clone());
        Self {
            view,
            host,
            registry,
        }
    }

    /// Runtime whose registry is bootstrapped from `config`
    pub fn bootstrap(
        config: &GlideConfig,
        locator: &dyn HandleLocator,
        view: HeadlessView,
        host: HeadlessHost,
    ) -> Self {
        let view = Rc::new(RefCell::new(view));
        let host = Rc::new(RefCell::new(host));
        let registry = bootstrap(config, locator, view.clone(), host.clone());
        Self {
            view,
            host,
            registry,
        }
    }

    pub fn registry(&self) -> &ScrollRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ScrollRegistry {
        &mut self.registry
    }

    pub fn view(&self) -> Ref<'_, HeadlessView> {
        self.view.borrow()
    }

    pub fn view_mut(&self) -> RefMut<'_, HeadlessView> {
        self.view.borrow_mut()
    }

    pub fn host(&self) -> Ref<'_, HeadlessHost> {
        self.host.borrow()
    }

    pub fn host_mut(&self) -> RefMut<'_, HeadlessHost> {
        self.host.borrow_mut()
    }

    pub fn is_idle(&self) -> bool {
        self.host.borrow().is_idle()
    }

    /// Advance the clock by `tick_ms` and dispatch whatever became due.
    ///
    /// Returns the number of wakes dispatched.
    pub fn step(&mut self, tick_ms: u64) -> usize {
        let wakes = self.host.borrow_mut().advance(tick_ms as f64);
        let count = wakes.len();
        for wake in wakes {
            self.registry.dispatch(wake);
        }
        count
    }

    /// Run a fixed frame budget, calling `on_frame` after every frame.
    pub fn run<F>(&mut self, cfg: HeadlessRunConfig, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext, &mut ScrollRegistry),
    {
        cfg.check()?;

        for frame in 0..cfg.max_frames {
            let wakes = self.step(cfg.tick_ms);
            let elapsed_ms = cfg.tick_ms.saturating_mul(frame as u64 + 1);
            on_frame(
                &HeadlessContext {
                    frame_index: frame,
                    elapsed_ms,
                    wakes,
                },
                &mut self.registry,
            );
        }

        Ok(())
    }

    /// Step until nothing is scheduled; returns the frames it took.
    pub fn run_until_idle(&mut self, cfg: HeadlessRunConfig) -> Result<u32> {
        cfg.check()?;

        for frame in 0..cfg.max_frames {
            if self.is_idle() {
                return Ok(frame);
            }
            self.step(cfg.tick_ms);
        }
        if !self.is_idle() {
            bail!(
                "headless run still busy after {} frames of {}ms",
                cfg.max_frames,
                cfg.tick_ms
            );
        }
        Ok(cfg.max_frames)
    }
}
