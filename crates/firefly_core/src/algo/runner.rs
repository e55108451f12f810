use std::thread;

use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::{
    Error, Result, SolverInput,
    algo::optimizer::{FireflyConfig, FireflyOutcome, LogProgress, Optimizer},
    options::{SolverMode, SolverOptions},
};

const THREAD_FALLBACK_PARALLELISM: usize = 2;
const THREAD_MIN_PARALLELISM: usize = 2;
const THREAD_RESERVED_CORES: usize = 1;

const ERR_NO_RESULTS: &str = "No results";

pub(crate) fn threads() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(THREAD_FALLBACK_PARALLELISM)
        .max(THREAD_MIN_PARALLELISM)
        - THREAD_RESERVED_CORES
}

fn generate_seeds(base_seed: u64, count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(base_seed);
    (0..count).map(|_| rng.random::<u64>()).collect()
}

fn run_once(input: &SolverInput, config: &FireflyConfig, run: usize, seed: u64) -> Result<FireflyOutcome> {
    log::debug!("solver.run: start idx={run} seed={seed}");

    let mut rng = StdRng::seed_from_u64(seed);
    let optimizer = Optimizer::new(&input.points, config, &mut rng)?;
    let outcome = optimizer.run(&mut rng, &mut LogProgress { run });

    log::debug!(
        "solver.run: done idx={run} seed={seed} best={:.4} diversity={}",
        outcome.distance,
        outcome.diversity
    );
    Ok(outcome)
}

/// Solve with the firefly algorithm according to `options.solver_mode`.
/// Returns the best outcome over all runs.
pub fn solve_tsp_with_firefly(input: &SolverInput, options: &SolverOptions) -> Result<FireflyOutcome> {
    let config = options.firefly_config();
    config.validate()?;

    let base_seed = options.seed.unwrap_or_else(rand::random);
    let runs = match options.solver_mode {
        SolverMode::Single => 1,
        SolverMode::MultiSeed | SolverMode::MultiParallel => options.runs.max(1),
    };

    log::info!(
        "solver: start n={} mode={} runs={runs} population={} generations={} p={} seed={base_seed}",
        input.n(),
        options.solver_mode,
        config.population_size,
        config.generations,
        config.attraction_probability
    );

    let results: Vec<FireflyOutcome> = match options.solver_mode {
        SolverMode::Single => vec![run_once(input, &config, 0, base_seed)?],
        SolverMode::MultiSeed => generate_seeds(base_seed, runs)
            .into_iter()
            .enumerate()
            .map(|(idx, seed)| run_once(input, &config, idx, seed))
            .collect::<Result<Vec<_>>>()?,
        SolverMode::MultiParallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads().min(runs))
                .build()
                .map_err(|e| Error::other(format!("rayon pool: {e}")))?;

            pool.install(|| {
                generate_seeds(base_seed, runs)
                    .into_par_iter()
                    .enumerate()
                    .map(|(idx, seed)| run_once(input, &config, idx, seed))
                    .collect::<Result<Vec<_>>>()
            })?
        }
    };

    let run_count = results.len();
    let best = results
        .into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
        .ok_or_else(|| Error::other(ERR_NO_RESULTS))?;

    log::info!(
        "solver: complete runs={run_count} best={:.4}",
        best.distance
    );

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::{generate_seeds, solve_tsp_with_firefly, threads};
    use crate::{
        Error, SolverInput,
        options::{SolverMode, SolverOptions},
        point::Point,
    };

    fn input() -> SolverInput {
        SolverInput::new(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 12.0),
            Point::new(-2.0, 5.0),
        ])
    }

    fn options(mode: SolverMode) -> SolverOptions {
        SolverOptions {
            population_size: 10,
            generations: 15,
            seed: Some(17),
            runs: 3,
            solver_mode: mode,
            ..SolverOptions::default()
        }
    }

    #[test]
    fn threads_is_at_least_one() {
        assert!(threads() >= 1);
    }

    #[test]
    fn seeds_are_deterministic_per_base_seed() {
        assert_eq!(generate_seeds(5, 4), generate_seeds(5, 4));
        assert_ne!(generate_seeds(5, 4), generate_seeds(6, 4));
        assert_eq!(generate_seeds(5, 4).len(), 4);
    }

    #[test]
    fn seeded_single_runs_are_reproducible() {
        let a = solve_tsp_with_firefly(&input(), &options(SolverMode::Single)).expect("solve");
        let b = solve_tsp_with_firefly(&input(), &options(SolverMode::Single)).expect("solve");
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.distance, b.distance);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn parallel_and_sequential_multi_runs_agree() {
        let sequential =
            solve_tsp_with_firefly(&input(), &options(SolverMode::MultiSeed)).expect("solve");
        let parallel =
            solve_tsp_with_firefly(&input(), &options(SolverMode::MultiParallel)).expect("solve");
        assert_eq!(sequential.distance, parallel.distance);
        assert!(sequential.tour.is_permutation());
    }

    #[test]
    fn invalid_config_aborts_before_running() {
        let options = SolverOptions {
            attraction_probability: -0.5,
            ..options(SolverMode::Single)
        };
        let err = solve_tsp_with_firefly(&input(), &options).expect_err("invalid p");
        assert!(matches!(err, Error::InvalidProbability(_)));
    }
}
