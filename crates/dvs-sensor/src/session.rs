//! Emulator session - buffer lifecycle, configuration and the update cycle

use tracing::{debug, info, warn};

use dvs_core::{
    render_rgb, AdaptConfig, DvsResult, EventClass, FrameSource, IntensityFrame, Plane, Resolution,
};

use crate::kernel::KernelParams;
use crate::{PixelState, RowScheduler};

/// Summary of one completed step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// 1-based step number within the current buffer lifetime
    pub step: u64,
    /// Pixels whose change exceeded their threshold
    pub fired: usize,
    pub positive: usize,
    pub negative: usize,
}

/// Borrowed view of every buffer after the latest step
#[derive(Clone, Copy, Debug)]
pub struct SessionView<'a> {
    pub input: &'a Plane<f32>,
    pub reference: &'a Plane<f32>,
    pub threshold: &'a Plane<f32>,
    pub difference: &'a Plane<f32>,
    pub events: &'a Plane<EventClass>,
    pub report: StepReport,
}

impl SessionView<'_> {
    pub fn resolution(&self) -> Resolution {
        self.input.resolution()
    }

    /// Event buffer as interleaved RGB bytes
    pub fn event_rgb(&self) -> Vec<u8> {
        render_rgb(self.events.as_slice())
    }
}

/// One emulated sensor at a fixed resolution
///
/// The session exclusively owns its buffers. Readers get shared views that
/// stay valid until the next call to [`EmulatorSession::ingest_and_update`].
#[derive(Debug)]
pub struct EmulatorSession {
    state: PixelState,
    params: KernelParams,
    /// Monotonic floor for the initial threshold
    base_threshold: f32,
    scheduler: RowScheduler,
    last_report: StepReport,
}

impl EmulatorSession {
    /// Create a session with buffers in their reset state
    pub fn new(resolution: Resolution, config: AdaptConfig) -> DvsResult<Self> {
        config.validate()?;

        info!(
            width = resolution.width,
            height = resolution.height,
            threshold = config.base_threshold,
            relax_rate = config.relax_rate,
            adapt_up = config.adapt_up,
            adapt_down = config.adapt_down,
            "dvs session created"
        );

        Ok(EmulatorSession {
            state: PixelState::new(resolution, config.base_threshold),
            params: KernelParams::from(&config),
            base_threshold: config.base_threshold,
            scheduler: RowScheduler::default(),
            last_report: StepReport::default(),
        })
    }

    /// Replace the row scheduler
    pub fn with_scheduler(mut self, scheduler: RowScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Set the resolution and reset all buffers
    ///
    /// Buffers are reallocated only when the resolution changes.
    pub fn configure(&mut self, width: usize, height: usize) -> DvsResult<()> {
        let resolution = Resolution::new(width, height)?;

        if resolution != self.state.resolution() {
            info!(width, height, "dvs session resized");
            self.state = PixelState::new(resolution, self.base_threshold);
        } else {
            self.state.reset(self.base_threshold);
        }
        self.last_report = StepReport::default();

        Ok(())
    }

    /// Reset reference and threshold without touching the resolution
    pub fn reset(&mut self) {
        self.state.reset(self.base_threshold);
        self.last_report = StepReport::default();
    }

    /// Update the kernel scalars
    ///
    /// `base_threshold` only raises the floor and only reaches the buffers on
    /// the next [`configure`](Self::configure) or [`reset`](Self::reset).
    pub fn set_adapt(
        &mut self,
        relax_rate: f32,
        adapt_up: f32,
        adapt_down: f32,
        base_threshold: f32,
    ) {
        self.params = KernelParams {
            relax_rate,
            adapt_up,
            adapt_down,
        };
        if base_threshold > self.base_threshold {
            self.base_threshold = base_threshold;
        }

        debug!(
            relax_rate,
            adapt_up,
            adapt_down,
            floor = self.base_threshold,
            "dvs adaptation updated"
        );
    }

    pub fn set_relax_rate(&mut self, relax_rate: f32) {
        self.params.relax_rate = relax_rate;
    }

    pub fn set_adapt_up(&mut self, adapt_up: f32) {
        self.params.adapt_up = adapt_up;
    }

    pub fn set_adapt_down(&mut self, adapt_down: f32) {
        self.params.adapt_down = adapt_down;
    }

    /// Store a frame as input and update every pixel
    ///
    /// `None` is end of input: returns `Ok(false)` and leaves every buffer at
    /// its last value. A frame of the wrong size is rejected before any
    /// buffer is touched.
    pub fn ingest_and_update(&mut self, frame: Option<&IntensityFrame>) -> DvsResult<bool> {
        let Some(frame) = frame else {
            debug!(step = self.last_report.step, "dvs end of input");
            return Ok(false);
        };

        if let Err(e) = self.state.input.copy_from(frame.plane()) {
            warn!(error = %e, "dvs frame rejected");
            return Err(e);
        }

        let tally = self.scheduler.run(&self.params, &mut self.state);
        self.last_report = StepReport {
            step: self.last_report.step + 1,
            fired: tally.fired,
            positive: tally.positive,
            negative: tally.negative,
        };

        debug!(
            step = self.last_report.step,
            fired = tally.fired,
            positive = tally.positive,
            negative = tally.negative,
            "dvs step"
        );

        Ok(true)
    }

    /// Pull one frame from `source` and update
    pub fn update_from<S: FrameSource + ?Sized>(&mut self, source: &mut S) -> DvsResult<bool> {
        let frame = source.next_frame()?;
        self.ingest_and_update(frame.as_ref())
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn resolution(&self) -> Resolution {
        self.state.resolution()
    }

    pub fn width(&self) -> usize {
        self.state.resolution().width
    }

    pub fn height(&self) -> usize {
        self.state.resolution().height
    }

    pub fn relax_rate(&self) -> f32 {
        self.params.relax_rate
    }

    pub fn adapt_up(&self) -> f32 {
        self.params.adapt_up
    }

    pub fn adapt_down(&self) -> f32 {
        self.params.adapt_down
    }

    /// Current threshold floor used on reset
    pub fn base_threshold(&self) -> f32 {
        self.base_threshold
    }

    pub fn scheduler(&self) -> &RowScheduler {
        &self.scheduler
    }

    /// Steps completed since the last reset
    pub fn steps(&self) -> u64 {
        self.last_report.step
    }

    pub fn last_report(&self) -> StepReport {
        self.last_report
    }

    pub fn input(&self) -> &Plane<f32> {
        self.state.input()
    }

    pub fn reference(&self) -> &Plane<f32> {
        self.state.reference()
    }

    pub fn threshold(&self) -> &Plane<f32> {
        self.state.threshold()
    }

    pub fn difference(&self) -> &Plane<f32> {
        self.state.difference()
    }

    pub fn events(&self) -> &Plane<EventClass> {
        self.state.events()
    }

    /// Event buffer rendered as interleaved RGB bytes
    pub fn event_rgb(&self) -> Vec<u8> {
        render_rgb(self.state.events().as_slice())
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            input: self.state.input(),
            reference: self.state.reference(),
            threshold: self.state.threshold(),
            difference: self.state.difference(),
            events: self.state.events(),
            report: self.last_report,
        }
    }
}
