//! Presentation and persistence collaborators
//!
//! A sink sees every buffer after each successful step. Windowing, encoding
//! and display scaling all live on this side of the boundary.

use dvs_core::{DvsResult, Plane};
use dvs_sensor::{SessionView, StepReport};

/// Receives the session buffers after every step
pub trait FrameSink {
    fn present(&mut self, view: &SessionView<'_>) -> DvsResult<()>;

    /// Receives the naive difference between the last two input frames
    fn present_diff(&mut self, _diff: &[u8]) -> DvsResult<()> {
        Ok(())
    }

    /// Called once when the source is exhausted
    fn finish(&mut self) -> DvsResult<()> {
        Ok(())
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn present(&mut self, view: &SessionView<'_>) -> DvsResult<()> {
        (**self).present(view)
    }

    fn present_diff(&mut self, diff: &[u8]) -> DvsResult<()> {
        (**self).present_diff(diff)
    }

    fn finish(&mut self) -> DvsResult<()> {
        (**self).finish()
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _view: &SessionView<'_>) -> DvsResult<()> {
        Ok(())
    }
}

/// Keeps step reports and, optionally, rendered event frames
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub reports: Vec<StepReport>,
    pub event_frames: Vec<Vec<u8>>,
    pub diff_frames: Vec<Vec<u8>>,
    keep_events: bool,
    finished: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also store every event frame as RGB bytes
    pub fn with_event_frames() -> Self {
        RecordingSink {
            keep_events: true,
            ..Default::default()
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Total firings across all recorded steps
    pub fn total_fired(&self) -> usize {
        self.reports.iter().map(|r| r.fired).sum()
    }
}

impl FrameSink for RecordingSink {
    fn present(&mut self, view: &SessionView<'_>) -> DvsResult<()> {
        self.reports.push(view.report);
        if self.keep_events {
            self.event_frames.push(view.event_rgb());
        }
        Ok(())
    }

    fn present_diff(&mut self, diff: &[u8]) -> DvsResult<()> {
        self.diff_frames.push(diff.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> DvsResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Map `[lo, hi]` linearly onto `[0, 255]`, clamping outside values
///
/// A degenerate range maps everything to 0.
pub fn scale_to_u8(plane: &Plane<f32>, lo: f32, hi: f32) -> Vec<u8> {
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() {
        return vec![0; plane.as_slice().len()];
    }

    plane
        .as_slice()
        .iter()
        .map(|&v| (((v - lo) / span) * 255.0).round().clamp(0.0, 255.0) as u8)
        .collect()
}

/// Scale using the plane's own minimum and maximum
pub fn scale_to_u8_auto(plane: &Plane<f32>) -> Vec<u8> {
    let (lo, hi) = plane
        .as_slice()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    scale_to_u8(plane, lo, hi)
}
