//! Synthetic frame sources
//!
//! Deterministic stand-ins for a camera:
//! - Constant scenes
//! - Step changes in brightness
//! - A bar sweeping across the frame
//! - Seeded sensor noise

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use dvs_core::{DvsResult, FrameSource, IntensityFrame, Resolution};

/// The same intensity on every pixel, for a fixed number of frames
#[derive(Debug, Clone)]
pub struct ConstantSource {
    resolution: Resolution,
    value: f32,
    remaining: usize,
}

impl ConstantSource {
    pub fn new(resolution: Resolution, value: f32, frames: usize) -> Self {
        ConstantSource {
            resolution,
            value,
            remaining: frames,
        }
    }
}

impl FrameSource for ConstantSource {
    fn next_frame(&mut self) -> DvsResult<Option<IntensityFrame>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(IntensityFrame::filled(self.resolution, self.value)))
    }
}

/// `before` for the first `switch_at` frames, `after` from then on
#[derive(Debug, Clone)]
pub struct StepSource {
    resolution: Resolution,
    before: f32,
    after: f32,
    switch_at: usize,
    frames: usize,
    index: usize,
}

impl StepSource {
    pub fn new(
        resolution: Resolution,
        before: f32,
        after: f32,
        switch_at: usize,
        frames: usize,
    ) -> Self {
        StepSource {
            resolution,
            before,
            after,
            switch_at,
            frames,
            index: 0,
        }
    }
}

impl FrameSource for StepSource {
    fn next_frame(&mut self) -> DvsResult<Option<IntensityFrame>> {
        if self.index >= self.frames {
            return Ok(None);
        }
        let value = if self.index < self.switch_at {
            self.before
        } else {
            self.after
        };
        self.index += 1;
        Ok(Some(IntensityFrame::filled(self.resolution, value)))
    }
}

/// A bright vertical bar moving right over a dark background, wrapping at
/// the edge
#[derive(Debug, Clone)]
pub struct MovingBarSource {
    resolution: Resolution,
    bar_width: usize,
    speed: usize,
    background: f32,
    foreground: f32,
    frames: usize,
    index: usize,
}

impl MovingBarSource {
    pub fn new(resolution: Resolution, bar_width: usize, speed: usize, frames: usize) -> Self {
        MovingBarSource {
            resolution,
            bar_width,
            speed,
            background: 20.0,
            foreground: 220.0,
            frames,
            index: 0,
        }
    }

    pub fn with_levels(mut self, background: f32, foreground: f32) -> Self {
        self.background = background;
        self.foreground = foreground;
        self
    }

    /// Column where the bar starts on frame `index`
    pub fn bar_start(&self, index: usize) -> usize {
        (index * self.speed) % self.resolution.width
    }

    fn covers(&self, start: usize, col: usize) -> bool {
        let offset = (col + self.resolution.width - start) % self.resolution.width;
        offset < self.bar_width
    }
}

impl FrameSource for MovingBarSource {
    fn next_frame(&mut self) -> DvsResult<Option<IntensityFrame>> {
        if self.index >= self.frames {
            return Ok(None);
        }

        let start = self.bar_start(self.index);
        let row: Vec<f32> = (0..self.resolution.width)
            .map(|col| {
                if self.covers(start, col) {
                    self.foreground
                } else {
                    self.background
                }
            })
            .collect();
        let data = row
            .iter()
            .copied()
            .cycle()
            .take(self.resolution.pixel_count())
            .collect();

        self.index += 1;
        IntensityFrame::from_vec(self.resolution, data).map(Some)
    }
}

/// Uniform noise around a base level, reproducible from a seed
#[derive(Debug, Clone)]
pub struct NoiseSource {
    resolution: Resolution,
    base: f32,
    dist: Uniform<f32>,
    rng: StdRng,
    remaining: usize,
}

impl NoiseSource {
    pub fn with_seed(
        resolution: Resolution,
        base: f32,
        amplitude: f32,
        frames: usize,
        seed: u64,
    ) -> Self {
        NoiseSource {
            resolution,
            base,
            dist: Uniform::new_inclusive(-amplitude, amplitude),
            rng: StdRng::seed_from_u64(seed),
            remaining: frames,
        }
    }
}

impl FrameSource for NoiseSource {
    fn next_frame(&mut self) -> DvsResult<Option<IntensityFrame>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let data = (0..self.resolution.pixel_count())
            .map(|_| (self.base + self.dist.sample(&mut self.rng)).clamp(0.0, 255.0))
            .collect();
        IntensityFrame::from_vec(self.resolution, data).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_source_length() {
        let mut src = ConstantSource::new(Resolution::new(2, 2).unwrap(), 7.0, 2);
        assert!(src.next_frame().unwrap().is_some());
        assert!(src.next_frame().unwrap().is_some());
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_step_source_switches() {
        let mut src = StepSource::new(Resolution::new(1, 1).unwrap(), 0.0, 50.0, 1, 3);
        let values: Vec<f32> = std::iter::from_fn(|| src.next_frame().unwrap())
            .map(|f| f.as_slice()[0])
            .collect();
        assert_eq!(values, vec![0.0, 50.0, 50.0]);
    }

    #[test]
    fn test_moving_bar_wraps() {
        let res = Resolution::new(6, 2).unwrap();
        let mut src = MovingBarSource::new(res, 2, 5, 2).with_levels(0.0, 1.0);

        let first = src.next_frame().unwrap().unwrap();
        assert_eq!(first.plane().row(0), Some(&[1.0, 1.0, 0.0, 0.0, 0.0, 0.0][..]));
        assert_eq!(first.plane().row(1), first.plane().row(0));

        let second = src.next_frame().unwrap().unwrap();
        assert_eq!(second.plane().row(0), Some(&[1.0, 0.0, 0.0, 0.0, 0.0, 1.0][..]));
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_noise_is_seeded() {
        let res = Resolution::new(8, 8).unwrap();
        let mut a = NoiseSource::with_seed(res, 128.0, 30.0, 1, 42);
        let mut b = NoiseSource::with_seed(res, 128.0, 30.0, 1, 42);
        let fa = a.next_frame().unwrap().unwrap();
        let fb = b.next_frame().unwrap().unwrap();

        assert_eq!(fa, fb);
        assert!(fa.as_slice().iter().all(|&v| (98.0..=158.0).contains(&v)));
    }
}
