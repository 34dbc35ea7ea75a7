//! Frame timing for the animation loop.
//!
//! The host owns the display-refresh callback and hands each frame's
//! timestamp (in milliseconds, like `requestAnimationFrame`) to the
//! container. [`FrameClock`] turns those timestamps into a [`Delta`],
//! applies the fps limit and keeps a running fps estimate.
//!
//! # Example
//!
//! ```ignore
//! use flurry::time::FrameClock;
//!
//! let mut clock = FrameClock::new(60.0);
//! clock.update(0.0);                       // first frame: zero delta
//! let delta = clock.update(16.7).unwrap(); // ~one 60 Hz frame
//! assert!((delta.factor - 1.0).abs() < 0.01);
//! ```

/// Longest frame gap fed into the simulation, in milliseconds.
pub const MAX_DELTA_MS: f32 = 100.0;

const FPS_WINDOW_MS: f64 = 500.0;

/// Time elapsed since the previous rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Delta {
    /// Milliseconds since the previous frame.
    pub value: f32,
    /// `value` expressed in 60 Hz frames (1.0 at exactly 60 fps).
    pub factor: f32,
}

impl Delta {
    pub const ZERO: Delta = Delta { value: 0.0, factor: 0.0 };

    pub fn from_millis(value: f32) -> Self {
        Self {
            value,
            factor: value * 60.0 / 1000.0,
        }
    }

    /// Delta in seconds.
    #[inline]
    pub fn seconds(&self) -> f32 {
        self.value / 1000.0
    }
}

/// Converts host frame timestamps into simulation deltas.
#[derive(Debug)]
pub struct FrameClock {
    /// Timestamp of the last frame that was let through.
    last_timestamp: Option<f64>,
    /// Frames per second cap, `0.0` for none.
    fps_limit: f32,
    /// Frames let through since creation.
    frame_count: u64,
    /// Measured frames per second.
    fps: f32,
    fps_frame_count: u64,
    fps_window_start: Option<f64>,
    paused: bool,
}

impl FrameClock {
    /// Create a clock capped at `fps_limit` frames per second (`0.0` = uncapped).
    pub fn new(fps_limit: f32) -> Self {
        Self {
            last_timestamp: None,
            fps_limit: fps_limit.max(0.0),
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window_start: None,
            paused: false,
        }
    }

    /// Advance to `timestamp` (ms).
    ///
    /// Returns `None` when the frame must be skipped, either because the
    /// clock is paused or because the fps limit has not elapsed yet.
    pub fn update(&mut self, timestamp: f64) -> Option<Delta> {
        if self.paused {
            return None;
        }

        let last = *self.last_timestamp.get_or_insert(timestamp);
        let elapsed = (timestamp - last).max(0.0);

        if self.fps_limit > 0.0 && self.frame_count > 0 {
            let min_interval = 1000.0 / self.fps_limit as f64;
            // Half a millisecond of slack for display-refresh jitter
            if elapsed + 0.5 < min_interval {
                return None;
            }
        }

        self.last_timestamp = Some(timestamp);
        self.frame_count += 1;

        let window_start = *self.fps_window_start.get_or_insert(timestamp);
        let window = timestamp - window_start;
        if window >= FPS_WINDOW_MS {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = (frames as f64 * 1000.0 / window) as f32;
            self.fps_frame_count = self.frame_count;
            self.fps_window_start = Some(timestamp);
        }

        Some(Delta::from_millis((elapsed as f32).min(MAX_DELTA_MS)))
    }

    /// Frames let through since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn fps_limit(&self) -> f32 {
        self.fps_limit
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop producing deltas.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause.
    ///
    /// The paused interval is dropped: the next frame after resuming
    /// starts from a zero delta instead of one spanning the pause.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_timestamp = None;
            self.fps_window_start = None;
            self.fps_frame_count = self.frame_count;
        }
    }

    /// Forget all timing history.
    pub fn reset(&mut self) {
        *self = Self::new(self.fps_limit);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}
