//! Pixel update kernel - the per-pixel state transition
//!
//! Each pixel keeps a reference intensity and an adaptive threshold. On
//! every step:
//!
//! ```text
//! diff       = input - reference
//! fired      = diff < -threshold || diff > threshold
//! diff       = fired ? diff : 0
//! reference' = relax_rate * reference + diff
//! threshold' = fired ? threshold * adapt_up : threshold * adapt_down
//! event      = classify(diff, threshold')
//! ```
//!
//! The kernel reads nothing but its own pixel, so any partition of the frame
//! can be updated in any order with identical results.

use std::ops::{Add, AddAssign};

use dvs_core::{AdaptConfig, EventClass};

/// Session-wide scalars used by every pixel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelParams {
    pub relax_rate: f32,
    pub adapt_up: f32,
    pub adapt_down: f32,
}

impl From<&AdaptConfig> for KernelParams {
    fn from(cfg: &AdaptConfig) -> Self {
        KernelParams {
            relax_rate: cfg.relax_rate,
            adapt_up: cfg.adapt_up,
            adapt_down: cfg.adapt_down,
        }
    }
}

/// New state of a single pixel after one step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelUpdate {
    pub reference: f32,
    pub threshold: f32,
    pub difference: f32,
    pub fired: bool,
    pub event: EventClass,
}

/// Advance one pixel by one step
#[inline]
pub fn update_pixel(
    input: f32,
    reference: f32,
    threshold: f32,
    params: &KernelParams,
) -> PixelUpdate {
    let diff = input - reference;
    let fired = diff < -threshold || diff > threshold;
    let difference = if fired { diff } else { 0.0 };

    let reference = params.relax_rate * reference + difference;
    let threshold = if fired {
        threshold * params.adapt_up
    } else {
        threshold * params.adapt_down
    };

    PixelUpdate {
        reference,
        threshold,
        difference,
        fired,
        event: EventClass::classify(difference, threshold),
    }
}

/// Event counts for a span of pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpanTally {
    pub fired: usize,
    pub positive: usize,
    pub negative: usize,
}

impl Add for SpanTally {
    type Output = SpanTally;

    fn add(self, rhs: SpanTally) -> SpanTally {
        SpanTally {
            fired: self.fired + rhs.fired,
            positive: self.positive + rhs.positive,
            negative: self.negative + rhs.negative,
        }
    }
}

impl AddAssign for SpanTally {
    fn add_assign(&mut self, rhs: SpanTally) {
        *self = *self + rhs;
    }
}

/// Update a contiguous span of pixels (one or more whole rows)
///
/// All slices are co-indexed and must have the same length.
pub fn update_span(
    params: &KernelParams,
    input: &[f32],
    reference: &mut [f32],
    threshold: &mut [f32],
    difference: &mut [f32],
    events: &mut [EventClass],
) -> SpanTally {
    debug_assert_eq!(input.len(), reference.len());
    debug_assert_eq!(input.len(), threshold.len());
    debug_assert_eq!(input.len(), difference.len());
    debug_assert_eq!(input.len(), events.len());

    let mut tally = SpanTally::default();
    let pixels = input
        .iter()
        .zip(reference.iter_mut())
        .zip(threshold.iter_mut())
        .zip(difference.iter_mut())
        .zip(events.iter_mut());

    for ((((&i, r), t), d), e) in pixels {
        let up = update_pixel(i, *r, *t, params);
        *r = up.reference;
        *t = up.threshold;
        *d = up.difference;
        *e = up.event;

        if up.fired {
            tally.fired += 1;
        }
        match up.event {
            EventClass::Positive => tally.positive += 1,
            EventClass::Negative => tally.negative += 1,
            EventClass::None => {}
        }
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(relax_rate: f32, adapt_up: f32, adapt_down: f32) -> KernelParams {
        KernelParams {
            relax_rate,
            adapt_up,
            adapt_down,
        }
    }

    #[test]
    fn test_quiet_pixel() {
        let p = params(1.0, 2.0, 0.5);
        let up = update_pixel(10.0, 0.0, 100.0, &p);

        assert!(!up.fired);
        assert_eq!(up.difference, 0.0);
        assert_eq!(up.reference, 0.0);
        assert_eq!(up.threshold, 50.0);
        assert_eq!(up.event, EventClass::None);
    }

    #[test]
    fn test_firing_pixel() {
        let p = params(1.0, 1.1, 0.9);
        let up = update_pixel(50.0, 0.0, 1.0, &p);

        assert!(up.fired);
        assert_eq!(up.difference, 50.0);
        assert_eq!(up.reference, 50.0);
        assert_eq!(up.threshold, 1.1);
        // Rising intensity above the adapted threshold
        assert_eq!(up.event, EventClass::Negative);
    }

    #[test]
    fn test_falling_intensity() {
        let p = params(1.0, 1.0, 1.0);
        let up = update_pixel(20.0, 100.0, 10.0, &p);

        assert!(up.fired);
        assert_eq!(up.difference, -80.0);
        assert_eq!(up.reference, 20.0);
        assert_eq!(up.event, EventClass::Positive);
    }

    #[test]
    fn test_boundary_does_not_fire() {
        let p = params(1.0, 2.0, 0.5);
        let up = update_pixel(10.0, 0.0, 10.0, &p);
        assert!(!up.fired);

        let up = update_pixel(-10.0, 0.0, 10.0, &p);
        assert!(!up.fired);
    }

    #[test]
    fn test_fired_but_under_adapted_threshold() {
        // Fires against 10, but 15 is not above 10 * 2
        let p = params(1.0, 2.0, 0.5);
        let up = update_pixel(15.0, 0.0, 10.0, &p);

        assert!(up.fired);
        assert_eq!(up.difference, 15.0);
        assert_eq!(up.threshold, 20.0);
        assert_eq!(up.event, EventClass::None);
    }

    #[test]
    fn test_relax_rate_decays_reference() {
        let p = params(0.5, 1.0, 1.0);
        let up = update_pixel(40.0, 40.0, 5.0, &p);

        assert!(!up.fired);
        assert_eq!(up.reference, 20.0);
    }

    #[test]
    fn test_update_span_tally() {
        let p = params(1.0, 1.0, 1.0);
        let input = [0.0, 50.0, -50.0, 5.0];
        let mut reference = [0.0; 4];
        let mut threshold = [10.0; 4];
        let mut difference = [7.0; 4];
        let mut events = [EventClass::Negative; 4];

        let tally = update_span(
            &p,
            &input,
            &mut reference,
            &mut threshold,
            &mut difference,
            &mut events,
        );

        assert_eq!(
            tally,
            SpanTally {
                fired: 2,
                positive: 1,
                negative: 1
            }
        );
        assert_eq!(difference, [0.0, 50.0, -50.0, 0.0]);
        assert_eq!(
            events,
            [
                EventClass::None,
                EventClass::Negative,
                EventClass::Positive,
                EventClass::None
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_difference_zero_unless_fired(
            input in 0.0f32..255.0,
            reference in -255.0f32..255.0,
            threshold in 0.01f32..100.0,
            relax in 0.0f32..1.0,
        ) {
            let up = update_pixel(input, reference, threshold, &params(relax, 1.5, 0.8));
            if up.fired {
                prop_assert!((input - reference).abs() > threshold);
                prop_assert_eq!(up.difference, input - reference);
            } else {
                prop_assert_eq!(up.difference, 0.0);
                prop_assert_eq!(up.event, EventClass::None);
            }
        }

        #[test]
        fn prop_threshold_multiplicative(
            inputs in proptest::collection::vec(0.0f32..255.0, 1..40),
            base in 0.5f32..50.0,
        ) {
            let p = params(0.9, 1.25, 0.75);
            let (mut reference, mut threshold) = (0.0f32, base);
            let mut fired = 0i32;

            for &i in &inputs {
                let up = update_pixel(i, reference, threshold, &p);
                reference = up.reference;
                threshold = up.threshold;
                if up.fired {
                    fired += 1;
                }
                prop_assert!(threshold > 0.0);
            }

            let quiet = inputs.len() as i32 - fired;
            let expected = f64::from(base)
                * 1.25f64.powi(fired)
                * 0.75f64.powi(quiet);
            let rel = (f64::from(threshold) - expected).abs() / expected;
            prop_assert!(rel < 1e-4, "threshold {} expected {}", threshold, expected);
        }
    }
}
