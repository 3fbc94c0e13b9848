//! DVS Core - Fundamental types for the event camera emulator
//!
//! This crate defines the types shared by every layer:
//! - Geometry and flat per-pixel buffers (Resolution, Plane)
//! - Grayscale input frames (IntensityFrame)
//! - Event classification (EventClass)
//! - Adaptation parameters (AdaptConfig)
//! - The frame source collaborator (FrameSource)

pub mod config;
pub mod error;
pub mod event;
pub mod frame;
pub mod source;

pub use config::*;
pub use error::*;
pub use event::*;
pub use frame::*;
pub use source::*;
