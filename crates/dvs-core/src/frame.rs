//! Pixel geometry and flat per-pixel buffers
//!
//! Every buffer in the emulator is a [`Plane`]: one contiguous row-major
//! `Vec<T>` indexed by `row * width + col`. Rows are the unit of parallel
//! work, so planes hand out whole rows as slices.

use crate::{DvsError, DvsResult};

/// Sensor resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    /// Create a resolution, rejecting zero-sized frames
    pub fn new(width: usize, height: usize) -> DvsResult<Self> {
        if width == 0 || height == 0 {
            return Err(DvsError::EmptyResolution { width, height });
        }
        Ok(Resolution { width, height })
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Flat index of a pixel
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Fail unless `other` has exactly this resolution
    pub fn check(&self, other: Resolution) -> DvsResult<()> {
        if *self != other {
            return Err(DvsError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                width: other.width,
                height: other.height,
            });
        }
        Ok(())
    }
}

/// A flat, row-major buffer holding one value per pixel
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<T> {
    resolution: Resolution,
    data: Vec<T>,
}

impl<T: Copy> Plane<T> {
    /// Create a plane with every pixel set to `value`
    pub fn filled(resolution: Resolution, value: T) -> Self {
        Plane {
            resolution,
            data: vec![value; resolution.pixel_count()],
        }
    }

    /// Wrap an existing buffer; its length must match the resolution
    pub fn from_vec(resolution: Resolution, data: Vec<T>) -> DvsResult<Self> {
        if data.len() != resolution.pixel_count() {
            return Err(DvsError::BufferLength {
                expected: resolution.pixel_count(),
                actual: data.len(),
            });
        }
        Ok(Plane { resolution, data })
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn width(&self) -> usize {
        self.resolution.width
    }

    pub fn height(&self) -> usize {
        self.resolution.height
    }

    /// Value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.resolution.height || col >= self.resolution.width {
            return None;
        }
        Some(self.data[self.resolution.index(row, col)])
    }

    /// One row as a slice, `None` past the last row
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.resolution.height {
            return None;
        }
        let start = row * self.resolution.width;
        Some(&self.data[start..start + self.resolution.width])
    }

    /// Iterate over rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.resolution.width)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Overwrite every pixel with `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Overwrite the contents from a plane of the same resolution
    pub fn copy_from(&mut self, other: &Plane<T>) -> DvsResult<()> {
        self.resolution.check(other.resolution)?;
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

/// One grayscale frame, intensities on the 0-255 scale
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityFrame {
    plane: Plane<f32>,
}

impl IntensityFrame {
    /// A frame with every pixel at the same intensity
    pub fn filled(resolution: Resolution, intensity: f32) -> Self {
        IntensityFrame {
            plane: Plane::filled(resolution, intensity),
        }
    }

    /// Build from row-major float intensities
    pub fn from_vec(resolution: Resolution, data: Vec<f32>) -> DvsResult<Self> {
        Ok(IntensityFrame {
            plane: Plane::from_vec(resolution, data)?,
        })
    }

    /// Build from 8-bit luma; byte values are copied without rescaling
    pub fn from_luma8(resolution: Resolution, luma: &[u8]) -> DvsResult<Self> {
        let data = luma.iter().map(|&v| f32::from(v)).collect();
        Self::from_vec(resolution, data)
    }

    pub fn resolution(&self) -> Resolution {
        self.plane.resolution()
    }

    pub fn plane(&self) -> &Plane<f32> {
        &self.plane
    }

    pub fn as_slice(&self) -> &[f32] {
        self.plane.as_slice()
    }

    pub fn into_plane(self) -> Plane<f32> {
        self.plane
    }
}

impl From<Plane<f32>> for IntensityFrame {
    fn from(plane: Plane<f32>) -> Self {
        IntensityFrame { plane }
    }
}
