//! Emulator pipeline - the ingest / update / present loop
//!
//! One step:
//! 1. Pull a frame from the source
//! 2. Run the session update over every row
//! 3. Hand the buffers to the sink
//! 4. Difference the input against the previous one, when enabled
//! 5. Record stats and the frame rate

use std::time::{Duration, Instant};

use tracing::{debug, info};

use dvs_core::{DvsResult, FrameSource};
use dvs_sensor::{EmulatorSession, SessionView};

use crate::{scale_to_u8, DiffMethod, EmulatorConfig, FpsMeter, FrameDiffer, FrameSink, NullSink};

/// Counters for a pipeline run
#[derive(Clone, Debug, Default)]
pub struct PipelineStats {
    pub frames: u64,
    pub fired: u64,
    pub positive: u64,
    pub negative: u64,
    pub last_step_duration: Duration,
    pub busy: Duration,
}

impl PipelineStats {
    /// Mean firings per frame
    pub fn mean_fired(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.fired as f64 / self.frames as f64
    }
}

/// Drives a session from a source into a sink
#[derive(Debug)]
pub struct Emulator<S, K = NullSink> {
    session: EmulatorSession,
    source: S,
    sink: K,
    fps: Option<FpsMeter>,
    differ: Option<FrameDiffer>,
    stats: PipelineStats,
    finished: bool,
}

impl<S: FrameSource> Emulator<S, NullSink> {
    /// Pipeline without a sink
    pub fn new(session: EmulatorSession, source: S) -> Self {
        Self::with_sink(session, source, NullSink)
    }
}

impl<S: FrameSource, K: FrameSink> Emulator<S, K> {
    pub fn with_sink(session: EmulatorSession, source: S, sink: K) -> Self {
        Emulator {
            session,
            source,
            sink,
            fps: None,
            differ: None,
            stats: PipelineStats::default(),
            finished: false,
        }
    }

    /// Build the session, scheduler and FPS meter from a configuration
    pub fn from_config(config: &EmulatorConfig, source: S, sink: K) -> DvsResult<Self> {
        config.validate()?;
        let session = EmulatorSession::new(config.resolution()?, config.adapt())?
            .with_scheduler(config.scheduler()?);

        let mut emulator =
            Self::with_sink(session, source, sink).with_diff(config.diff_method);
        emulator.fps = config
            .fps_report_period()
            .map(|period| FpsMeter::new(period).with_nominal(config.fps));
        Ok(emulator)
    }

    /// Report the frame rate every `period`
    pub fn with_fps_report(mut self, period: Duration) -> Self {
        self.fps = Some(FpsMeter::new(period));
        self
    }

    /// Also difference consecutive input frames and pass the result to the
    /// sink
    pub fn with_diff(mut self, method: DiffMethod) -> Self {
        self.differ = Some(FrameDiffer::new(method));
        self
    }

    /// Run one step; `Ok(false)` once the source is exhausted
    pub fn step(&mut self) -> DvsResult<bool> {
        if self.finished {
            return Ok(false);
        }

        let start = Instant::now();
        if !self.session.update_from(&mut self.source)? {
            self.finished = true;
            self.sink.finish()?;
            info!(
                frames = self.stats.frames,
                fired = self.stats.fired,
                "dvs stream ended"
            );
            return Ok(false);
        }
        let took = start.elapsed();

        let report = self.session.last_report();
        self.stats.frames += 1;
        self.stats.fired += report.fired as u64;
        self.stats.positive += report.positive as u64;
        self.stats.negative += report.negative as u64;
        self.stats.last_step_duration = took;
        self.stats.busy += took;

        self.sink.present(&self.session.view())?;

        if let Some(differ) = &mut self.differ {
            let luma = scale_to_u8(self.session.input(), 0.0, 255.0);
            if differ.primed_len().is_some_and(|len| len != luma.len()) {
                differ.clear();
            }
            if let Some(diff) = differ.push(&luma)? {
                self.sink.present_diff(&diff)?;
            }
        }

        if let Some(meter) = &mut self.fps {
            meter.tick();
        }

        debug!(step = report.step, micros = took.as_micros() as u64, "dvs pipeline step");
        Ok(true)
    }

    /// Step until the source ends or `max_frames` steps have run
    ///
    /// Returns the number of frames processed by this call.
    pub fn run(&mut self, max_frames: Option<u64>) -> DvsResult<u64> {
        let mut processed = 0;
        while max_frames.map_or(true, |max| processed < max) {
            if !self.step()? {
                break;
            }
            processed += 1;
        }
        Ok(processed)
    }

    pub fn session(&self) -> &EmulatorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EmulatorSession {
        &mut self.session
    }

    pub fn view(&self) -> SessionView<'_> {
        self.session.view()
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    pub fn fps(&self) -> Option<&FpsMeter> {
        self.fps.as_ref()
    }

    pub fn differ(&self) -> Option<&FrameDiffer> {
        self.differ.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_parts(self) -> (EmulatorSession, S, K) {
        (self.session, self.source, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordingSink, VecSource};
    use dvs_core::{AdaptConfig, DvsError, IntensityFrame, Resolution};

    fn frames(res: Resolution, values: &[f32]) -> VecSource {
        VecSource::new(values.iter().map(|&v| IntensityFrame::filled(res, v)).collect())
    }

    #[test]
    fn test_run_to_end() {
        let res = Resolution::new(4, 2).unwrap();
        let session = EmulatorSession::new(res, AdaptConfig::fixed(5.0)).unwrap();
        let mut emu = Emulator::with_sink(
            session,
            frames(res, &[0.0, 20.0, 20.0, 0.0]),
            RecordingSink::with_event_frames(),
        );

        assert_eq!(emu.run(None).unwrap(), 4);
        assert!(emu.is_finished());
        assert!(!emu.step().unwrap());

        let sink = emu.sink();
        assert!(sink.is_finished());
        let fired: Vec<usize> = sink.reports.iter().map(|r| r.fired).collect();
        assert_eq!(fired, vec![0, 8, 0, 8]);
        assert_eq!(sink.event_frames.len(), 4);
        assert_eq!(&sink.event_frames[1][..3], &[255, 0, 0]);
        assert_eq!(&sink.event_frames[3][..3], &[0, 255, 0]);

        assert_eq!(emu.stats().frames, 4);
        assert_eq!(emu.stats().fired, 16);
        assert_eq!(emu.stats().negative, 8);
        assert_eq!(emu.stats().positive, 8);
        assert_eq!(emu.stats().mean_fired(), 4.0);
    }

    #[test]
    fn test_run_bounded() {
        let res = Resolution::new(2, 2).unwrap();
        let session = EmulatorSession::new(res, AdaptConfig::default()).unwrap();
        let mut emu = Emulator::new(session, frames(res, &[1.0, 2.0, 3.0]));

        assert_eq!(emu.run(Some(2)).unwrap(), 2);
        assert!(!emu.is_finished());
        assert_eq!(emu.run(Some(5)).unwrap(), 1);
        assert!(emu.is_finished());
    }

    #[test]
    fn test_mismatched_frame_stops_run() {
        let res = Resolution::new(2, 2).unwrap();
        let other = Resolution::new(3, 2).unwrap();
        let session = EmulatorSession::new(res, AdaptConfig::fixed(1.0)).unwrap();
        let source = VecSource::new(vec![
            IntensityFrame::filled(res, 10.0),
            IntensityFrame::filled(other, 10.0),
        ]);
        let mut emu = Emulator::new(session, source);

        assert!(matches!(
            emu.run(None),
            Err(DvsError::DimensionMismatch { .. })
        ));
        assert_eq!(emu.stats().frames, 1);
        assert_eq!(emu.session().steps(), 1);
    }

    #[test]
    fn test_from_config() {
        let cfg = EmulatorConfig {
            width: 8,
            height: 4,
            threshold: 3.0,
            threads: 2,
            rows_per_task: 2,
            fps: 25,
            diff_method: DiffMethod::Subtract,
            ..Default::default()
        };
        let res = cfg.resolution().unwrap();
        let emu = Emulator::from_config(&cfg, frames(res, &[]), NullSink).unwrap();

        assert_eq!(emu.session().resolution(), res);
        assert_eq!(emu.session().base_threshold(), 3.0);
        assert_eq!(emu.session().scheduler().threads(), 2);
        assert_eq!(emu.fps().map(FpsMeter::nominal), Some(25));
        assert_eq!(emu.differ().map(FrameDiffer::method), Some(DiffMethod::Subtract));
    }

    #[test]
    fn test_diff_frames_follow_input() {
        let res = Resolution::new(2, 1).unwrap();
        let session = EmulatorSession::new(res, AdaptConfig::fixed(5.0)).unwrap();
        let source = VecSource::new(vec![
            IntensityFrame::from_vec(res, vec![10.0, 200.0]).unwrap(),
            IntensityFrame::from_vec(res, vec![30.0, 150.0]).unwrap(),
            IntensityFrame::from_vec(res, vec![30.0, 160.0]).unwrap(),
        ]);
        let mut emu = Emulator::with_sink(session, source, RecordingSink::new())
            .with_diff(DiffMethod::AbsDiff);

        assert_eq!(emu.run(None).unwrap(), 3);
        assert_eq!(emu.sink().diff_frames, vec![vec![20, 50], vec![0, 10]]);
    }

    #[test]
    fn test_diff_subtract_from_config() {
        let cfg = EmulatorConfig::from_json_str(
            r#"{ "width": 2, "height": 1, "diff_method": "subtract", "fps_report_ms": 0 }"#,
        )
        .unwrap();
        let res = cfg.resolution().unwrap();
        let mut emu =
            Emulator::from_config(&cfg, frames(res, &[100.0, 40.0, 90.0]), RecordingSink::new())
                .unwrap();

        emu.run(None).unwrap();
        assert_eq!(emu.sink().diff_frames, vec![vec![0, 0], vec![50, 50]]);
    }

    #[test]
    fn test_no_diff_without_differ() {
        let res = Resolution::new(2, 2).unwrap();
        let session = EmulatorSession::new(res, AdaptConfig::default()).unwrap();
        let mut emu = Emulator::with_sink(session, frames(res, &[1.0, 9.0]), RecordingSink::new());

        emu.run(None).unwrap();
        assert!(emu.differ().is_none());
        assert!(emu.sink().diff_frames.is_empty());
    }
}
