//! Per-pixel event classification

/// Outcome of one pixel on one step
///
/// Polarity is decided against the threshold after adaptation: a difference
/// above it is `Negative`, below its negation is `Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum EventClass {
    #[default]
    None = 0,
    Positive = 1,
    Negative = 2,
}

impl EventClass {
    /// Classify a gated difference against the updated threshold
    #[inline]
    pub fn classify(difference: f32, threshold: f32) -> Self {
        if difference > threshold {
            EventClass::Negative
        } else if difference < -threshold {
            EventClass::Positive
        } else {
            EventClass::None
        }
    }

    pub fn is_event(self) -> bool {
        self != EventClass::None
    }

    /// Display color as RGB
    pub fn rgb(self) -> [u8; 3] {
        match self {
            EventClass::None => [0, 0, 0],
            EventClass::Positive => [0, 255, 0],
            EventClass::Negative => [255, 0, 0],
        }
    }
}

/// Render classes as interleaved 3-channel RGB bytes
pub fn render_rgb(events: &[EventClass]) -> Vec<u8> {
    let mut out = Vec::with_capacity(events.len() * 3);
    for ev in events {
        out.extend_from_slice(&ev.rgb());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_polarity() {
        assert_eq!(EventClass::classify(5.0, 2.0), EventClass::Negative);
        assert_eq!(EventClass::classify(-5.0, 2.0), EventClass::Positive);
        assert_eq!(EventClass::classify(2.0, 2.0), EventClass::None);
        assert_eq!(EventClass::classify(0.0, 2.0), EventClass::None);
    }

    #[test]
    fn test_render_rgb() {
        let rgb = render_rgb(&[EventClass::None, EventClass::Positive, EventClass::Negative]);
        assert_eq!(rgb, vec![0, 0, 0, 0, 255, 0, 255, 0, 0]);
    }
}
