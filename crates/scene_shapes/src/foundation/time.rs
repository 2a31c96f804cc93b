//! Time management utilities

use std::time::{Duration, Instant};

use crate::config::TimelineConfig;

/// Frame timeline with optional frame rate limiting
///
/// Keeps track of the time between frames so it can drive animation speed.
/// Call [`Timeline::start`] once everything is initialized and
/// [`Timeline::next_frame`] after each presented frame. The first frame
/// usually measures much longer than the following ones.
///
/// ```
/// use scene_shapes::foundation::time::Timeline;
///
/// let mut timeline = Timeline::new();
/// timeline.set_minimal_frame_time(1.0 / 120.0).start();
///
/// let distance = 15.0 * timeline.previous_frame_duration();
/// assert_eq!(distance, 0.0);
/// timeline.next_frame();
/// ```
#[derive(Debug, Clone)]
pub struct Timeline {
    start_time: Option<Instant>,
    previous_frame_time: Option<Instant>,
    minimal_frame_time: f32,
    previous_frame_duration: f32,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Create a stopped timeline without frame limiting
    pub const fn new() -> Self {
        Self {
            start_time: None,
            previous_frame_time: None,
            minimal_frame_time: 0.0,
            previous_frame_duration: 0.0,
        }
    }

    /// Create a stopped timeline from configuration
    pub fn from_config(config: &TimelineConfig) -> Self {
        let mut timeline = Self::new();
        timeline.set_minimal_frame_time(config.minimal_frame_time);
        timeline
    }

    /// Minimal frame time in seconds
    pub const fn minimal_frame_time(&self) -> f32 {
        self.minimal_frame_time
    }

    /// Set minimal frame time in seconds (`0` disables limiting)
    pub fn set_minimal_frame_time(&mut self, seconds: f32) -> &mut Self {
        self.minimal_frame_time = seconds.max(0.0);
        self
    }

    /// Start the timeline, resetting frame time and duration to zero
    pub fn start(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.previous_frame_time = Some(now);
        self.previous_frame_duration = 0.0;
    }

    /// Stop the timeline
    pub fn stop(&mut self) {
        self.start_time = None;
        self.previous_frame_time = None;
        self.previous_frame_duration = 0.0;
    }

    /// Check if the timeline is currently running
    pub const fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Advance to the next frame
    ///
    /// If the current frame took less than the minimal frame time, sleeps
    /// for the remainder. Does nothing while stopped.
    pub fn next_frame(&mut self) {
        let Some(previous) = self.previous_frame_time else {
            return;
        };

        let minimal = Duration::try_from_secs_f32(self.minimal_frame_time).unwrap_or(Duration::ZERO);
        let elapsed = previous.elapsed();
        if elapsed < minimal {
            std::thread::sleep(minimal - elapsed);
        }

        let now = Instant::now();
        self.previous_frame_duration = now.duration_since(previous).as_secs_f32();
        self.previous_frame_time = Some(now);
    }

    /// Time of the previous frame in seconds since [`Timeline::start`]
    ///
    /// Returns `0.0` while stopped.
    pub fn previous_frame_time(&self) -> f32 {
        match (self.start_time, self.previous_frame_time) {
            (Some(start), Some(previous)) => previous.duration_since(start).as_secs_f32(),
            _ => 0.0,
        }
    }

    /// Duration of the previous frame in seconds
    ///
    /// Returns `0.0` while stopped.
    pub const fn previous_frame_duration(&self) -> f32 {
        self.previous_frame_duration
    }
}
