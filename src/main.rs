use std::time::Instant;

use log::info;

use firefly_core::{
    DistanceModel, Result, SolverInput, SolverOptions, logging, solve_tsp_with_firefly,
    write_route,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let mut options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;

    let seed = *options.seed.get_or_insert_with(rand::random);
    let input = SolverInput::from_options(&options, seed)?;

    info!("input: {input}");
    info!("options: {options}");

    let outcome = solve_tsp_with_firefly(&input, &options)?;

    write_route(&input, &outcome.tour, &options)?;

    info!(
        "output: n={} best={:.4} diversity={} time={:.2}s",
        outcome.tour.len(),
        outcome.distance,
        outcome.diversity,
        now.elapsed().as_secs_f32()
    );

    outcome.tour.metrics(&DistanceModel::new(input.points()));

    Ok(())
}
