//! Genetic-algorithm solver for the Euclidean travelling salesman problem.
//! Tours evolve through tournament selection, order crossover and swap
//! mutation, with elitism carrying the best tours between generations.

mod algo;
mod error;
mod fitness;
mod geo;
mod io;
pub mod logging;
mod population;
mod tour;
pub mod utils;

pub(crate) use algo::{config, crossover, evolution, mutation, selection};
pub(crate) use geo::geometry;
pub(crate) use io::options;

pub use algo::config::EvolutionConfig;
pub use algo::crossover::{order_crossover, order_crossover_with_cuts, random_cut_points};
pub use algo::evolution::{Evolution, GenerationObserver, GenerationReport, RunOutcome};
pub use algo::mutation::swap_mutation;
pub use algo::selection::{tournament_sample, tournament_select};
pub use algo::solver::solve_tsp_with_ga;
pub use error::{Error, Result};
pub use fitness::{Fitness, TourLength};
pub use geo::city::City;
pub use io::input::{CitySource, ProblemInput};
pub use io::options::{LogFormat, LogLevel, SolverOptions};
pub use io::output::{write_tour, write_tour_to};
pub use population::{EvaluatedPopulation, Population, PopulationStats, Scored};
pub use tour::Tour;
