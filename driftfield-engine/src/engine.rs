// Driftfield animation interface

use std::time::Duration;

/// Frame-based animation interface.
///
/// Implementors produce one frame per call; what a frame *is* depends on the
/// animation (the particle field yields a [`crate::Scene`], the counter
/// overlay yields text), so the output is an associated type rather than a
/// fixed struct.
pub trait Animation {
    /// What one frame of this animation produces.
    type Frame;

    /// Generate the next frame of animation.
    /// Returns None if animation is complete (for finite animations).
    fn next_frame(&mut self) -> Option<Self::Frame>;

    /// Get the target FPS for this animation.
    fn target_fps(&self) -> u32;

    /// Get the frame duration based on target FPS.
    fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps() as f64)
    }

    /// Reset animation to initial state.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockAnimation;
    impl Animation for MockAnimation {
        type Frame = ();
        fn next_frame(&mut self) -> Option<()> {
            None
        }
        fn target_fps(&self) -> u32 {
            60
        }
        fn reset(&mut self) {}
    }

    #[test]
    fn test_frame_duration_60fps() {
        let anim = MockAnimation;
        let duration = anim.frame_duration();
        // 60fps = ~16.67ms per frame
        assert!(duration.as_millis() >= 16 && duration.as_millis() <= 17);
    }

    #[test]
    fn test_finished_animation_yields_nothing() {
        let mut anim = MockAnimation;
        assert!(anim.next_frame().is_none());
    }
}
