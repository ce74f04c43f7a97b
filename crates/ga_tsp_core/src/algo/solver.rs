use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use rand::Rng;

use crate::{
    ProblemInput, Result, SolverOptions,
    evolution::{Evolution, RunOutcome},
    logging::ProgressLogger,
    utils,
};

/// Runs the GA over `input` with the settings in `options`, logging progress
/// every `--report-every` generations. Ctrl-C ends the run at the next
/// generation boundary with the best tour found so far. The interrupt flag is
/// lowered when a run starts, so a Ctrl-C that ended an earlier run in the
/// same process does not end this one.
pub fn solve_tsp_with_ga<R: Rng>(
    input: &ProblemInput,
    options: &SolverOptions,
    rng: R,
) -> Result<RunOutcome> {
    solve_with_cancel_flag(input, options, rng, utils::interrupt_flag())
}

fn solve_with_cancel_flag<R: Rng>(
    input: &ProblemInput,
    options: &SolverOptions,
    rng: R,
    cancel: Arc<AtomicBool>,
) -> Result<RunOutcome> {
    options.validate()?;
    cancel.store(false, Ordering::Relaxed);
    let mut progress = ProgressLogger::new(options.report_every);
    Evolution::new(input.cities().to_vec(), options.evolution_config(), rng)?
        .with_cancel_flag(cancel)
        .run(&mut progress)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use rand::{SeedableRng, rngs::StdRng};

    use super::{solve_tsp_with_ga, solve_with_cancel_flag};
    use crate::{City, Error, ProblemInput, SolverOptions};

    fn options() -> SolverOptions {
        SolverOptions {
            pop_size: 30,
            num_generations: 60,
            report_every: 0,
            ..SolverOptions::default()
        }
    }

    #[test]
    fn solves_generated_instance_with_a_valid_tour() {
        let mut rng = StdRng::seed_from_u64(9);
        let input = ProblemInput::random(12, 100.0, 100.0, &mut rng);

        let outcome = solve_tsp_with_ga(&input, &options(), rng).expect("solve");

        assert!(outcome.best_tour.is_permutation(12));
        assert_eq!(outcome.generations, 60);
        assert!(!outcome.interrupted);
        assert!((outcome.best_tour.length(input.cities()) - outcome.best_length).abs() < 1e-9);
    }

    #[test]
    fn finds_rectangle_perimeter() {
        let input = ProblemInput::new(vec![
            City::new(0.0, 0.0),
            City::new(20.0, 0.0),
            City::new(20.0, 10.0),
            City::new(0.0, 10.0),
        ]);

        let outcome =
            solve_tsp_with_ga(&input, &options(), StdRng::seed_from_u64(4)).expect("solve");
        assert!((outcome.best_length - 60.0).abs() < 1e-9);
    }

    #[test]
    fn interrupt_left_over_from_an_earlier_run_is_cleared() {
        let mut rng = StdRng::seed_from_u64(21);
        let input = ProblemInput::random(6, 50.0, 50.0, &mut rng);
        let cancel = Arc::new(AtomicBool::new(true));

        let flag = Arc::clone(&cancel);
        let outcome = solve_with_cancel_flag(&input, &options(), rng, flag).expect("solve");

        assert!(!outcome.interrupted);
        assert_eq!(outcome.generations, 60);
        assert!(!cancel.load(Ordering::Relaxed));
    }

    #[test]
    fn invalid_options_surface_as_configuration_errors() {
        let input = ProblemInput::new(vec![City::new(0.0, 0.0), City::new(1.0, 1.0)]);
        let bad = SolverOptions {
            mutation_rate: 2.0,
            ..options()
        };

        let err = solve_tsp_with_ga(&input, &bad, StdRng::seed_from_u64(1))
            .expect_err("rate above one should fail");
        assert!(matches!(err, Error::Configuration(_)));
    }
}
