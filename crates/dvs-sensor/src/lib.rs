//! DVS Sensor - Event camera emulation kernel
//!
//! Each pixel tracks a decaying reference intensity and fires when its
//! change since the last firing exceeds an adaptive threshold:
//! - Pixel update kernel (pure per-pixel transition)
//! - Row scheduler (disjoint row partitions, sequential or rayon)
//! - Emulator session (buffer lifecycle, configuration, ingest/update)
//!
//! ```rust
//! use dvs_core::{AdaptConfig, IntensityFrame, Resolution};
//! use dvs_sensor::EmulatorSession;
//!
//! let res = Resolution::new(4, 4).unwrap();
//! let mut session = EmulatorSession::new(res, AdaptConfig::new(1.0, 1.0, 1.1, 0.9)).unwrap();
//!
//! let frame = IntensityFrame::filled(res, 50.0);
//! assert!(session.ingest_and_update(Some(&frame)).unwrap());
//! assert_eq!(session.last_report().fired, 16);
//! ```

pub mod kernel;
pub mod scheduler;
pub mod session;
pub mod state;

pub use kernel::{update_pixel, update_span, KernelParams, PixelUpdate, SpanTally};
pub use scheduler::RowScheduler;
pub use session::{EmulatorSession, SessionView, StepReport};
pub use state::PixelState;
