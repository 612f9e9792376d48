//! Lockstep driver for a set of workers sharing one moving window.

use pic_params::SimParams;
use pic_window::{AgreedWidth, WindowShift};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use crate::worker::Worker;

/// Driver options.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Worker count; defaults to the parameters' `number_of_patches`.
    pub workers: Option<usize>,
    /// Stop after this many steps even if `sim_time` is not reached.
    pub max_steps: Option<usize>,
}

/// One window move, as seen by every worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepShift {
    pub step: usize,
    pub time: f64,
    pub shift: WindowShift,
}

/// Summary of a lockstep run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub name: String,
    pub geometry: String,
    pub workers: usize,
    pub steps: usize,
    pub shifts: Vec<StepShift>,
    pub moved_distance: f64,
    pub particles: usize,
    /// Particles that left through the trailing face of the domain.
    pub particles_lost: usize,
    pub field_energy: f64,
}

/// Build every worker of a run.
pub fn build_workers(params: &SimParams, n_workers: usize) -> SimResult<Vec<Worker>> {
    if n_workers == 0 {
        return Err(SimError::InvalidArg {
            what: "at least one worker is required",
        });
    }
    (0..n_workers)
        .map(|id| Worker::new(params, id, n_workers))
        .collect()
}

/// Build workers from `params` and run them to `sim_time`.
pub fn run(params: &SimParams, opts: &RunOptions) -> SimResult<RunRecord> {
    let n_workers = opts.workers.unwrap_or(params.number_of_patches);
    let mut workers = build_workers(params, n_workers)?;
    run_lockstep(params, &mut workers, opts)
}

/// Advance `workers` together, one step at a time.
///
/// Each step applies boundaries on all workers in parallel, then, if the
/// window is behind, gathers every worker's shift width. All widths must be
/// equal; otherwise the run stops with [`SimError::Desynchronized`] before
/// any worker has moved. Particles leaving a patch are handed to the patch
/// before it; field data leaving a patch is not, each patch shifts its own
/// fields and zeroes the exposed cells.
pub fn run_lockstep(
    params: &SimParams,
    workers: &mut [Worker],
    opts: &RunOptions,
) -> SimResult<RunRecord> {
    let Some(first) = workers.first() else {
        return Err(SimError::InvalidArg {
            what: "at least one worker is required",
        });
    };
    let geometry = first.geometry();
    let steps = opts
        .max_steps
        .map_or(params.n_steps(), |max| max.min(params.n_steps()));

    let mut shifts = Vec::new();
    let mut particles_lost = 0;
    for step in 0..steps {
        let time = (step + 1) as f64 * params.timestep;

        workers
            .par_iter_mut()
            .try_for_each(|w| w.apply_boundaries())?;

        if !workers[0].window().is_moving(time) {
            continue;
        }

        let widths: Vec<usize> = workers.iter().map(Worker::local_shift_width).collect();
        if widths.iter().any(|&w| w != widths[0]) {
            return Err(SimError::Desynchronized { step, widths });
        }
        let agreed = AgreedWidth(widths[0]);
        let moved: Vec<WindowShift> = workers
            .par_iter_mut()
            .map(|w| w.shift(&agreed))
            .collect();

        let outgoing: Vec<Vec<Vec<f64>>> = workers.iter_mut().map(Worker::take_outgoing).collect();
        for (k, handed) in outgoing.into_iter().enumerate() {
            if k == 0 {
                particles_lost += handed.iter().map(Vec::len).sum::<usize>();
            } else {
                workers[k - 1].receive(&handed);
            }
        }

        debug!(step, time, clrw = agreed.0, "workers shifted");
        shifts.push(StepShift {
            step,
            time,
            shift: moved[0].clone(),
        });
    }

    let record = RunRecord {
        name: params.name.clone(),
        geometry: geometry.to_string(),
        workers: workers.len(),
        steps,
        moved_distance: workers[0].window().moved_distance(),
        particles: workers.iter().map(Worker::particle_count).sum(),
        particles_lost,
        field_energy: workers.iter().map(|w| w.fields().energy()).sum(),
        shifts,
    };
    info!(
        name = %record.name,
        steps = record.steps,
        moves = record.shifts.len(),
        moved_distance = record.moved_distance,
        "run finished"
    );
    Ok(record)
}
