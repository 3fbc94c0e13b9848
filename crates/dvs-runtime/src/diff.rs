//! Naive frame differencing
//!
//! A stateless preview of scene motion: each output is the per-byte change
//! between two consecutive frames. Works on gray or interleaved color bytes
//! alike, since every channel is differenced independently.

use serde::{Deserialize, Serialize};

use dvs_core::{DvsError, DvsResult};

/// How two consecutive frames are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffMethod {
    /// `|current - previous|`
    #[default]
    AbsDiff,
    /// `current - previous`, saturating at zero
    Subtract,
}

impl DiffMethod {
    #[inline]
    pub fn apply(self, current: u8, previous: u8) -> u8 {
        match self {
            DiffMethod::AbsDiff => current.abs_diff(previous),
            DiffMethod::Subtract => current.saturating_sub(previous),
        }
    }
}

/// Remembers the previous frame and differences each new one against it
#[derive(Debug, Clone, Default)]
pub struct FrameDiffer {
    method: DiffMethod,
    previous: Option<Vec<u8>>,
}

impl FrameDiffer {
    pub fn new(method: DiffMethod) -> Self {
        FrameDiffer {
            method,
            previous: None,
        }
    }

    pub fn method(&self) -> DiffMethod {
        self.method
    }

    /// Feed the next frame
    ///
    /// The first frame only primes the differ and yields `None`.
    pub fn push(&mut self, frame: &[u8]) -> DvsResult<Option<Vec<u8>>> {
        let out = match &self.previous {
            None => None,
            Some(prev) if prev.len() != frame.len() => {
                return Err(DvsError::BufferLength {
                    expected: prev.len(),
                    actual: frame.len(),
                });
            }
            Some(prev) => Some(
                frame
                    .iter()
                    .zip(prev)
                    .map(|(&cur, &old)| self.method.apply(cur, old))
                    .collect(),
            ),
        };

        match &mut self.previous {
            Some(prev) => prev.copy_from_slice(frame),
            None => self.previous = Some(frame.to_vec()),
        }

        Ok(out)
    }

    /// Length of the frame the differ is primed with
    pub fn primed_len(&self) -> Option<usize> {
        self.previous.as_ref().map(Vec::len)
    }

    /// Forget the previous frame
    pub fn clear(&mut self) {
        self.previous = None;
    }
}
