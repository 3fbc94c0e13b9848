//! Frame rate meter

use std::time::{Duration, Instant};

use tracing::info;

/// Counts frames and reports the measured rate once per period
#[derive(Debug, Clone)]
pub struct FpsMeter {
    period: Duration,
    window_start: Instant,
    window_frames: u64,
    total_frames: u64,
    last_fps: Option<f64>,
    /// Rate the source claims to deliver, 0 when unknown
    nominal: u32,
}

impl FpsMeter {
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    pub fn starting_at(period: Duration, start: Instant) -> Self {
        FpsMeter {
            period,
            window_start: start,
            window_frames: 0,
            total_frames: 0,
            last_fps: None,
            nominal: 0,
        }
    }

    pub fn with_nominal(mut self, fps: u32) -> Self {
        self.nominal = fps;
        self
    }

    /// Record one frame now
    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    /// Record one frame at `now`; returns the rate when a period closes
    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        self.window_frames += 1;
        self.total_frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.period || elapsed.is_zero() {
            return None;
        }

        let fps = self.window_frames as f64 / elapsed.as_secs_f64();
        info!(
            fps = format_args!("{:.1}", fps),
            nominal = self.nominal,
            frames = self.total_frames,
            "fps"
        );

        self.last_fps = Some(fps);
        self.window_start = now;
        self.window_frames = 0;
        Some(fps)
    }

    pub fn last_fps(&self) -> Option<f64> {
        self.last_fps
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn nominal(&self) -> u32 {
        self.nominal
    }
}
