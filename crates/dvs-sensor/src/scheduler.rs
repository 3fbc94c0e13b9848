//! Row scheduler - partitions a frame into row ranges and runs the kernel
//!
//! Partitions are disjoint runs of whole rows. Because the kernel has no
//! cross-pixel dependency, every strategy yields bit-identical buffers; the
//! tallies are integer sums and reduce the same way in any order.

use std::fmt;

use rayon::prelude::*;

use dvs_core::{DvsError, DvsResult};

use crate::kernel::{update_span, KernelParams, SpanTally};
use crate::PixelState;

enum Strategy {
    /// Current thread, top to bottom
    Sequential,
    /// Rayon's global pool
    Global,
    /// A dedicated pool
    Pool(rayon::ThreadPool),
}

/// Dispatches the pixel kernel over row partitions
pub struct RowScheduler {
    strategy: Strategy,
    rows_per_task: usize,
}

impl RowScheduler {
    /// Run every row on the calling thread
    pub fn sequential() -> Self {
        RowScheduler {
            strategy: Strategy::Sequential,
            rows_per_task: 1,
        }
    }

    /// Spread rows over rayon's global pool
    pub fn parallel() -> Self {
        RowScheduler {
            strategy: Strategy::Global,
            rows_per_task: 1,
        }
    }

    /// Spread rows over a dedicated pool of `threads` workers
    pub fn with_threads(threads: usize) -> DvsResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("dvs-row-{}", i))
            .build()
            .map_err(|e| DvsError::ThreadPool(e.to_string()))?;

        Ok(RowScheduler {
            strategy: Strategy::Pool(pool),
            rows_per_task: 1,
        })
    }

    /// Set how many consecutive rows form one partition
    pub fn rows_per_task(mut self, rows: usize) -> Self {
        self.rows_per_task = rows.max(1);
        self
    }

    pub fn grain(&self) -> usize {
        self.rows_per_task
    }

    /// Number of worker threads this scheduler may use
    pub fn threads(&self) -> usize {
        match &self.strategy {
            Strategy::Sequential => 1,
            Strategy::Global => rayon::current_num_threads(),
            Strategy::Pool(pool) => pool.current_num_threads(),
        }
    }

    /// Apply the kernel to every pixel exactly once
    ///
    /// Returns only after all partitions have completed. A grain taller than
    /// the frame runs the whole frame as one partition.
    pub fn run(&self, params: &KernelParams, state: &mut PixelState) -> SpanTally {
        let resolution = state.resolution();
        let span = resolution.width * self.rows_per_task.min(resolution.height);

        match &self.strategy {
            Strategy::Sequential => run_sequential(params, span, state),
            Strategy::Global => run_parallel(params, span, state),
            Strategy::Pool(pool) => pool.install(|| run_parallel(params, span, state)),
        }
    }
}

impl Default for RowScheduler {
    fn default() -> Self {
        Self::parallel()
    }
}

impl fmt::Debug for RowScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self.strategy {
            Strategy::Sequential => "sequential",
            Strategy::Global => "global",
            Strategy::Pool(_) => "pool",
        };
        f.debug_struct("RowScheduler")
            .field("strategy", &strategy)
            .field("threads", &self.threads())
            .field("rows_per_task", &self.rows_per_task)
            .finish()
    }
}

fn run_sequential(params: &KernelParams, span: usize, state: &mut PixelState) -> SpanTally {
    let PixelState {
        input,
        reference,
        threshold,
        difference,
        events,
    } = state;

    input
        .as_slice()
        .chunks(span)
        .zip(reference.as_mut_slice().chunks_mut(span))
        .zip(threshold.as_mut_slice().chunks_mut(span))
        .zip(difference.as_mut_slice().chunks_mut(span))
        .zip(events.as_mut_slice().chunks_mut(span))
        .map(|((((i, r), t), d), e)| update_span(params, i, r, t, d, e))
        .fold(SpanTally::default(), |acc, t| acc + t)
}

fn run_parallel(params: &KernelParams, span: usize, state: &mut PixelState) -> SpanTally {
    let PixelState {
        input,
        reference,
        threshold,
        difference,
        events,
    } = state;

    input
        .as_slice()
        .par_chunks(span)
        .zip(reference.as_mut_slice().par_chunks_mut(span))
        .zip(threshold.as_mut_slice().par_chunks_mut(span))
        .zip(difference.as_mut_slice().par_chunks_mut(span))
        .zip(events.as_mut_slice().par_chunks_mut(span))
        .map(|((((i, r), t), d), e)| update_span(params, i, r, t, d, e))
        .reduce(SpanTally::default, |a, b| a + b)
}
