//! Frame source collaborator

use crate::{DvsResult, IntensityFrame};

/// Supplies grayscale frames on demand
///
/// `Ok(None)` signals end of stream. Color conversion happens before a frame
/// is handed out.
pub trait FrameSource {
    fn next_frame(&mut self) -> DvsResult<Option<IntensityFrame>>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> DvsResult<Option<IntensityFrame>> {
        (**self).next_frame()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn next_frame(&mut self) -> DvsResult<Option<IntensityFrame>> {
        (**self).next_frame()
    }
}
