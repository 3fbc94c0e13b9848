//! DVS Test Harness - Synthetic input and scenario validation
//!
//! This crate provides:
//! - Deterministic synthetic frame sources
//! - Step-by-step session tracing with bit-exact snapshots
//! - Scenario tests for the kernel laws and session lifecycle
//! - Benchmarks for the kernel and the scheduler

pub mod scenarios;
pub mod synthetic;

pub use scenarios::*;
pub use synthetic::*;
