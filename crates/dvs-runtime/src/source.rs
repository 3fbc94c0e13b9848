//! In-memory frame sources

use std::collections::VecDeque;

use dvs_core::{DvsResult, FrameSource, IntensityFrame};

/// A queue of prepared frames, drained front to back
#[derive(Debug, Default, Clone)]
pub struct VecSource {
    frames: VecDeque<IntensityFrame>,
}

impl VecSource {
    pub fn new(frames: Vec<IntensityFrame>) -> Self {
        VecSource {
            frames: frames.into(),
        }
    }

    /// Append a frame to the end of the queue
    pub fn push(&mut self, frame: IntensityFrame) {
        self.frames.push_back(frame);
    }

    /// Frames still waiting
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for VecSource {
    fn next_frame(&mut self) -> DvsResult<Option<IntensityFrame>> {
        Ok(self.frames.pop_front())
    }
}

/// Adapts any iterator of frames; the stream ends with the iterator
#[derive(Debug)]
pub struct IterSource<I> {
    iter: I,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = DvsResult<IntensityFrame>>,
{
    pub fn new(iter: I) -> Self {
        IterSource { iter }
    }
}

impl<I> FrameSource for IterSource<I>
where
    I: Iterator<Item = DvsResult<IntensityFrame>>,
{
    fn next_frame(&mut self) -> DvsResult<Option<IntensityFrame>> {
        self.iter.next().transpose()
    }
}
