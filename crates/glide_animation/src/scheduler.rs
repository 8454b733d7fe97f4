//! Frame loop
//!
//! Tracks the single outstanding display-refresh request of one animated
//! region. Starting an already running loop is a no-op, so any number of
//! input events per frame collapse into one frame callback.

use glide_core::host::{FrameHost, FrameToken, RegionId};

/// Frame scheduling state for one region
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<FrameToken>,
    frames_run: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the first frame unless one is already pending.
    ///
    /// Returns true if a new frame was requested.
    pub fn start(&mut self, host: &mut dyn FrameHost, region: RegionId) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(host.request_frame(region));
        tracing::debug!(?region, "frame loop started");
        true
    }

    /// Accept a delivered frame.
    ///
    /// Returns false for tokens this loop is not waiting on (cancelled or
    /// superseded requests), which callers must ignore.
    pub fn accept(&mut self, token: FrameToken) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        self.frames_run += 1;
        true
    }

    /// Ask for the frame after the one just accepted
    pub fn request_next(&mut self, host: &mut dyn FrameHost, region: RegionId) {
        if self.pending.is_none() {
            self.pending = Some(host.request_frame(region));
        }
    }

    /// Drop the outstanding request, if any
    pub fn cancel(&mut self, host: &mut dyn FrameHost) {
        if let Some(token) = self.pending.take() {
            host.cancel_frame(token);
            tracing::debug!("frame loop cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames accepted over the loop's lifetime
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::headless::{HeadlessHost, FRAME_INTERVAL_MS};
    use glide_core::host::Wake;

    #[test]
    fn test_start_is_idempotent() {
        let mut host = HeadlessHost::new();
        let mut frames = FrameLoop::new();
        let region = RegionId::default();

        assert!(frames.start(&mut host, region));
        assert!(!frames.start(&mut host, region));
        assert!(frames.is_running());
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn test_accept_and_request_next() {
        let mut host = HeadlessHost::new();
        let mut frames = FrameLoop::new();
        let region = RegionId::default();
        frames.start(&mut host, region);

        let wakes = host.advance(FRAME_INTERVAL_MS);
        let Some(Wake::Frame(_, token)) = wakes.first().copied() else {
            panic!("expected a frame wake");
        };

        assert!(frames.accept(token));
        assert!(!frames.is_running());
        // Same token twice is stale
        assert!(!frames.accept(token));

        frames.request_next(&mut host, region);
        assert!(frames.is_running());
        assert_eq!(frames.frames_run(), 1);
    }

    #[test]
    fn test_cancel_drops_pending_frame() {
        let mut host = HeadlessHost::new();
        let mut frames = FrameLoop::new();
        frames.start(&mut host, RegionId::default());

        frames.cancel(&mut host);
        assert!(!frames.is_running());
        assert!(host.advance(FRAME_INTERVAL_MS).is_empty());
    }
}
