// Frame coalescing.
//
// Deferred renders queue at most one request: within a frame only the most
// recent request survives and earlier ones are dropped. Callers whose
// arguments feed downstream readback (palette mutations) must use the
// immediate entry point instead and never pass through here.

use super::RenderRequest;

#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<RenderRequest>,
    dropped: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    // Queue a request for the next frame, replacing whatever was pending.
    pub fn defer(&mut self, request: RenderRequest) {
        if self.pending.replace(request).is_some() {
            self.dropped += 1;
        }
    }

    // Hand out the surviving request, leaving the queue empty.
    pub fn take(&mut self) -> Option<RenderRequest> {
        self.pending.take()
    }

    // An immediate render supersedes anything still queued.
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            self.dropped += 1;
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}
