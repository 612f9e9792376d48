//! pic-sim: workers and the lockstep step loop.
//!
//! Provides:
//! - `Worker`: one patch with fields, boundary set, species, offsets and window
//! - `ParticleSpecies`: uniformly loaded particles that follow the window
//! - `run_lockstep`: parallel boundary phase plus collectively agreed window moves

pub mod error;
pub mod lockstep;
pub mod species;
pub mod worker;

pub use error::{SimError, SimResult};
pub use lockstep::{RunOptions, RunRecord, StepShift, build_workers, run, run_lockstep};
pub use species::ParticleSpecies;
pub use worker::Worker;
