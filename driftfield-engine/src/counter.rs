// Count-up readout animation
//
// Eases a numeric readout from zero to its target: ease-out cubic over a
// fixed duration, thousands separators, exact target on the final frame.
// Unlike the particle field this animation is finite.

use std::time::Duration;

use crate::engine::Animation;

const DEFAULT_DURATION: Duration = Duration::from_secs(2);
const DEFAULT_FPS: u32 = 60;

/// Finite count-up from zero to a target value.
pub struct CounterAnimation {
    target: u64,
    suffix: String,
    duration: Duration,
    fps: u32,
    total_frames: u32,
    frames_emitted: u32,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        let mut counter = Self {
            target,
            suffix: String::new(),
            duration: DEFAULT_DURATION,
            fps: DEFAULT_FPS,
            total_frames: 0,
            frames_emitted: 0,
            done: false,
        };
        counter.recompute_frames();
        counter
    }

    /// Text appended after the number, e.g. " particles" or "+".
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set how long the count-up takes.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self.recompute_frames();
        self
    }

    /// Set custom FPS (for testing or to match the driving loop)
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self.recompute_frames();
        self
    }

    fn recompute_frames(&mut self) {
        let frames = self.duration.as_secs_f64() * f64::from(self.fps);
        self.total_frames = (frames.ceil() as u32).max(1);
    }
}

impl Animation for CounterAnimation {
    type Frame = String;

    fn next_frame(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        self.frames_emitted += 1;
        let progress = f64::from(self.frames_emitted) / f64::from(self.total_frames);
        let value = if progress >= 1.0 {
            // Land exactly on the target, never on a rounded neighbor.
            self.done = true;
            self.target
        } else {
            (ease_out_cubic(progress) * self.target as f64).floor() as u64
        };
        Some(format!("{}{}", group_thousands(value), self.suffix))
    }

    fn target_fps(&self) -> u32 {
        self.fps
    }

    fn reset(&mut self) {
        self.frames_emitted = 0;
        self.done = false;
    }
}

fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_counter_runs_for_duration_frames() {
        let mut counter = CounterAnimation::new(5000)
            .with_duration(Duration::from_millis(500))
            .with_fps(60);
        // 0.5s at 60fps = 30 frames
        let frames: Vec<String> = std::iter::from_fn(|| counter.next_frame()).collect();
        assert_eq!(frames.len(), 30);
    }

    #[test]
    fn test_counter_lands_exactly_on_target() {
        let mut counter = CounterAnimation::new(1_248)
            .with_duration(Duration::from_millis(100))
            .with_fps(30);
        let frames: Vec<String> = std::iter::from_fn(|| counter.next_frame()).collect();
        assert_eq!(frames.last().unwrap(), "1,248");
        assert!(counter.next_frame().is_none());
    }

    #[test]
    fn test_counter_values_never_decrease() {
        let mut counter = CounterAnimation::new(10_000);
        let mut previous = 0u64;
        while let Some(frame) = counter.next_frame() {
            let value: u64 = frame.replace(',', "").parse().unwrap();
            assert!(value >= previous);
            previous = value;
        }
        assert_eq!(previous, 10_000);
    }

    #[test]
    fn test_counter_appends_suffix() {
        let mut counter = CounterAnimation::new(60)
            .with_suffix(" particles")
            .with_duration(Duration::from_millis(100))
            .with_fps(10);
        let first = counter.next_frame().unwrap();
        assert!(first.ends_with(" particles"), "frame = {}", first);
    }

    #[test]
    fn test_reset_restarts_the_count() {
        let mut counter = CounterAnimation::new(100)
            .with_duration(Duration::from_millis(100))
            .with_fps(10);
        while counter.next_frame().is_some() {}
        counter.reset();
        assert!(counter.next_frame().is_some());
    }

    #[test]
    fn test_zero_target_still_emits_final_frame() {
        let mut counter = CounterAnimation::new(0)
            .with_duration(Duration::from_millis(100))
            .with_fps(10);
        let frames: Vec<String> = std::iter::from_fn(|| counter.next_frame()).collect();
        assert!(!frames.is_empty());
        assert_eq!(frames.last().unwrap(), "0");
    }
}
