use std::time::Instant;

use log::{info, warn};

use ga_tsp_core::{
    ProblemInput, Result, SolverOptions, logging, solve_tsp_with_ga, utils, write_tour,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    options.validate()?;

    let (mut rng, seed) = utils::seeded_rng(options.seed);
    let input = ProblemInput::from_options(&options, &mut rng)?;

    info!("seed: {seed}");
    info!("input: {input}");
    info!("options: {options}");

    let outcome = solve_tsp_with_ga(&input, &options, rng)?;
    if outcome.interrupted {
        warn!(
            "output: interrupted after {} generations, writing best tour so far",
            outcome.generations
        );
    }

    write_tour(options.output_path(), input.cities(), &outcome.best_tour)?;

    info!(
        "output: n={} best={:.3} generations={} time={:.2}s",
        outcome.best_tour.len(),
        outcome.best_length,
        outcome.generations,
        now.elapsed().as_secs_f32()
    );

    utils::tour_metrics(input.cities(), &outcome.best_tour);

    Ok(())
}
