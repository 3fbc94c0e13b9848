//! Scenario harness - drives a session and records every step
//!
//! Traces keep raw bit patterns so two runs can be compared for exact
//! equality, not closeness.

use dvs_core::{AdaptConfig, DvsResult, EventClass, FrameSource, Resolution};
use dvs_sensor::{EmulatorSession, RowScheduler, StepReport};

/// Buffers after one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub report: StepReport,
    pub reference: Vec<u32>,
    pub threshold: Vec<u32>,
    pub difference: Vec<u32>,
    pub events: Vec<EventClass>,
}

impl Snapshot {
    fn capture(session: &EmulatorSession) -> Self {
        let bits = |v: &[f32]| -> Vec<u32> { v.iter().map(|x| x.to_bits()).collect() };
        Snapshot {
            report: session.last_report(),
            reference: bits(session.reference().as_slice()),
            threshold: bits(session.threshold().as_slice()),
            difference: bits(session.difference().as_slice()),
            events: session.events().as_slice().to_vec(),
        }
    }

    pub fn threshold_values(&self) -> Vec<f32> {
        self.threshold.iter().map(|&b| f32::from_bits(b)).collect()
    }

    pub fn reference_values(&self) -> Vec<f32> {
        self.reference.iter().map(|&b| f32::from_bits(b)).collect()
    }

    pub fn difference_values(&self) -> Vec<f32> {
        self.difference.iter().map(|&b| f32::from_bits(b)).collect()
    }
}

/// Run `source` to exhaustion and record a snapshot per step
pub fn trace<S: FrameSource>(
    resolution: Resolution,
    config: AdaptConfig,
    scheduler: RowScheduler,
    mut source: S,
) -> DvsResult<Vec<Snapshot>> {
    let mut session = EmulatorSession::new(resolution, config)?.with_scheduler(scheduler);
    let mut out = Vec::new();
    while session.update_from(&mut source)? {
        out.push(Snapshot::capture(&session));
    }
    Ok(out)
}
