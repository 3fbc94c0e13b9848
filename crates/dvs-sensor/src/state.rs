//! Per-pixel state buffers

use dvs_core::{EventClass, Plane, Resolution};

/// The co-indexed buffers of one emulated sensor
///
/// `reference` and `threshold` persist across steps; `input`, `difference`
/// and `events` describe only the most recent step.
#[derive(Debug, Clone)]
pub struct PixelState {
    pub(crate) input: Plane<f32>,
    pub(crate) reference: Plane<f32>,
    pub(crate) threshold: Plane<f32>,
    pub(crate) difference: Plane<f32>,
    pub(crate) events: Plane<EventClass>,
}

impl PixelState {
    /// Allocate buffers in their reset state
    pub fn new(resolution: Resolution, base_threshold: f32) -> Self {
        PixelState {
            input: Plane::filled(resolution, 0.0),
            reference: Plane::filled(resolution, 0.0),
            threshold: Plane::filled(resolution, base_threshold),
            difference: Plane::filled(resolution, 0.0),
            events: Plane::filled(resolution, EventClass::None),
        }
    }

    /// Reset every buffer in place
    pub fn reset(&mut self, base_threshold: f32) {
        self.input.fill(0.0);
        self.reference.fill(0.0);
        self.threshold.fill(base_threshold);
        self.difference.fill(0.0);
        self.events.fill(EventClass::None);
    }

    pub fn resolution(&self) -> Resolution {
        self.input.resolution()
    }

    pub fn input(&self) -> &Plane<f32> {
        &self.input
    }

    pub fn reference(&self) -> &Plane<f32> {
        &self.reference
    }

    pub fn threshold(&self) -> &Plane<f32> {
        &self.threshold
    }

    pub fn difference(&self) -> &Plane<f32> {
        &self.difference
    }

    pub fn events(&self) -> &Plane<EventClass> {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_state() {
        let res = Resolution::new(4, 3).unwrap();
        let mut state = PixelState::new(res, 7.0);

        state.reference.fill(3.0);
        state.threshold.fill(1.0);
        state.events.fill(EventClass::Positive);
        state.reset(9.0);

        assert!(state.reference().as_slice().iter().all(|&v| v == 0.0));
        assert!(state.threshold().as_slice().iter().all(|&v| v == 9.0));
        assert!(state.events().as_slice().iter().all(|&e| e == EventClass::None));
        assert_eq!(state.resolution(), res);
    }
}
