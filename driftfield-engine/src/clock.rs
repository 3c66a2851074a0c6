// Frame pacing and cancellation
//
// The animator is an explicit loop: advance, paint, tick. The clock sleeps
// out the remainder of each frame budget; the shutdown flag is the
// injectable cancellation the loop polls between frames, so nothing ever
// blocks inside a frame and tests can single-step without real timing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Cloneable cancellation flag shared between the frame loop and whoever
/// asks it to stop (signal watcher, tests).
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Paces a loop to a fixed frames-per-second cadence.
pub struct FrameClock {
    frame_budget: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(fps)),
            last_tick: Instant::now(),
        }
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Sleep out whatever remains of the current frame budget. A frame that
    /// already overran its budget is not penalized further.
    pub fn tick(&mut self) {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.frame_budget {
            thread::sleep(self.frame_budget - elapsed);
        }
        self.last_tick = Instant::now();
    }
}
