//! DVS Runtime - The I/O shell around the emulation kernel
//!
//! This crate supplies the collaborators a session talks to:
//! - Color conversion into grayscale intensity frames
//! - In-memory frame sources
//! - Sinks and display scaling
//! - Naive frame differencing previews
//! - FPS metering
//! - JSON configuration
//! - Tracing setup
//! - The pipeline loop tying them together

pub mod color;
pub mod config;
pub mod diff;
pub mod fps;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod telemetry;

pub use color::*;
pub use config::*;
pub use diff::*;
pub use fps::*;
pub use pipeline::*;
pub use sink::*;
pub use source::*;
pub use telemetry::*;
