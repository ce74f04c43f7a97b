use std::{
    mem,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use log::{debug, info, warn};
use rand::Rng;

use crate::{
    City, Error, EvolutionConfig, Result, Tour,
    crossover::order_crossover,
    fitness::{Fitness, TourLength},
    mutation::swap_mutation,
    population::{EvaluatedPopulation, Population, Scored},
    selection::tournament_select,
};

/// What the driver publishes after every generation.
#[derive(Clone, Debug)]
pub struct GenerationReport {
    pub generation: usize,
    pub best_tour: Tour,
    pub best_length: f64,
    pub mean_length: f64,
    pub worst_length: f64,
    /// Best score seen so far, this generation included.
    pub best_overall_length: f64,
    pub improved: bool,
}

/// Receives a report after each generation. Rendering or logging happens
/// here; the driver only waits for the call to return.
pub trait GenerationObserver {
    fn on_generation(&mut self, report: &GenerationReport);
}

impl<F: FnMut(&GenerationReport)> GenerationObserver for F {
    fn on_generation(&mut self, report: &GenerationReport) {
        self(report)
    }
}

#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub best_tour: Tour,
    /// Fitness score of `best_tour`; the tour length unless a custom
    /// [`Fitness`] is installed.
    pub best_length: f64,
    pub generations: usize,
    pub interrupted: bool,
}

/// Generational GA over a fixed city set. Owns the population and the random
/// source, so a seeded `R` makes the whole run reproducible.
pub struct Evolution<R: Rng, F: Fitness = TourLength> {
    cities: Vec<City>,
    config: EvolutionConfig,
    fitness: F,
    rng: R,
    population: Population,
    generation: usize,
    best: Option<Scored>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<R: Rng> Evolution<R, TourLength> {
    pub fn new(cities: Vec<City>, config: EvolutionConfig, rng: R) -> Result<Self> {
        Self::with_fitness(cities, config, TourLength, rng)
    }
}

impl<R: Rng, F: Fitness> Evolution<R, F> {
    /// Validates everything up front and draws generation 0.
    pub fn with_fitness(
        cities: Vec<City>,
        config: EvolutionConfig,
        fitness: F,
        mut rng: R,
    ) -> Result<Self> {
        config.validate(cities.len())?;
        if let Some(idx) = cities.iter().position(|c| !c.is_valid()) {
            return Err(Error::invalid_input(format!(
                "city {idx} has non-finite coordinates"
            )));
        }

        let population = Population::random(config.pop_size, cities.len(), &mut rng);
        debug!(
            "ga: initial population pop_size={} cities={}",
            population.len(),
            cities.len()
        );

        Ok(Self {
            cities,
            config,
            fitness,
            rng,
            population,
            generation: 0,
            best: None,
            cancel: None,
        })
    }

    /// Checked once per generation boundary; a set flag ends the run early.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn best(&self) -> Option<(&Tour, f64)> {
        self.best.as_ref().map(|s| (&s.tour, s.length))
    }

    /// Runs the remaining generation budget, reporting each generation.
    pub fn run<O: GenerationObserver + ?Sized>(mut self, observer: &mut O) -> Result<RunOutcome> {
        info!(
            "ga: start cities={} pop={} generations={} mutation_rate={} tournament={} elite={}",
            self.cities.len(),
            self.config.pop_size,
            self.config.num_generations,
            self.config.mutation_rate,
            self.config.tournament_size,
            self.config.elite_size,
        );

        let mut interrupted = false;
        while self.generation < self.config.num_generations {
            if self.is_cancelled() {
                warn!(
                    "ga: interrupted at generation={} of {}",
                    self.generation, self.config.num_generations
                );
                interrupted = true;
                break;
            }
            let report = self.advance()?;
            observer.on_generation(&report);
        }

        if self.best.is_none() {
            // Nothing was evaluated yet: score the current population once.
            let evaluated = self.evaluate_current();
            self.record_best(&evaluated);
        }
        let best = self
            .best
            .take()
            .ok_or_else(|| Error::other("evolution finished without a best tour"))?;

        info!(
            "ga: done generations={} best={:.3} interrupted={interrupted}",
            self.generation, best.length
        );

        Ok(RunOutcome {
            best_tour: best.tour,
            best_length: best.length,
            generations: self.generation,
            interrupted,
        })
    }

    /// One transition: evaluate, record the best, then breed the next
    /// population from elites plus mutated crossover children.
    pub fn advance(&mut self) -> Result<GenerationReport> {
        let evaluated = self.evaluate_current();
        let (Some(stats), Some(best)) = (evaluated.stats(), evaluated.best()) else {
            return Err(Error::other("cannot evolve an empty population"));
        };
        let best_tour = best.tour.clone();
        let improved = self.record_best(&evaluated);
        let best_overall_length = self.best.as_ref().map_or(stats.best, |s| s.length);

        let report = GenerationReport {
            generation: self.generation,
            best_tour,
            best_length: stats.best,
            mean_length: stats.mean,
            worst_length: stats.worst,
            best_overall_length,
            improved,
        };
        debug!(
            "ga: generation={} best={:.3} mean={:.3} worst={:.3} best_overall={:.3}",
            report.generation,
            report.best_length,
            report.mean_length,
            report.worst_length,
            report.best_overall_length
        );

        self.population = self.breed(&evaluated)?;
        self.generation += 1;
        Ok(report)
    }

    fn breed(&mut self, evaluated: &EvaluatedPopulation) -> Result<Population> {
        let EvolutionConfig {
            pop_size,
            tournament_size: k,
            mutation_rate: rate,
            elite_size,
            ..
        } = self.config;
        let mut next: Vec<Tour> = Vec::with_capacity(pop_size);
        next.extend(evaluated.elites(elite_size));

        while next.len() < pop_size {
            let parent1 = tournament_select(evaluated, k, &mut self.rng)?;
            let parent2 = tournament_select(evaluated, k, &mut self.rng)?;
            let child = order_crossover(parent1, parent2, &mut self.rng);
            next.push(swap_mutation(&child, rate, &mut self.rng));
        }

        Ok(Population::from_tours(next))
    }

    fn evaluate_current(&mut self) -> EvaluatedPopulation {
        let population = mem::take(&mut self.population);
        population.evaluate(&self.cities, &self.fitness)
    }

    /// Replaces the best-ever tour only on a strictly shorter score.
    fn record_best(&mut self, evaluated: &EvaluatedPopulation) -> bool {
        let Some(candidate) = evaluated.best() else {
            return false;
        };
        let improved = self
            .best
            .as_ref()
            .is_none_or(|best| candidate.length < best.length);
        if improved {
            debug!(
                "ga: new best generation={} length={:.3}",
                self.generation, candidate.length
            );
            self.best = Some(candidate.clone());
        }
        improved
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::{Evolution, GenerationReport};
    use crate::{City, Error, EvolutionConfig, Tour, fitness::TourLength};

    fn square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(0.0, 10.0),
            City::new(10.0, 10.0),
            City::new(10.0, 0.0),
        ]
    }

    fn scattered(n: usize, seed: u64) -> Vec<City> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| City::new(rng.random::<f64>() * 100.0, rng.random::<f64>() * 100.0))
            .collect()
    }

    #[test]
    fn square_converges_to_perimeter() {
        let config = EvolutionConfig::new(20, 50, 0.01);
        let evolution = Evolution::new(square(), config, StdRng::seed_from_u64(2024))
            .expect("valid configuration");

        let outcome = evolution
            .run(&mut |_: &GenerationReport| {})
            .expect("run completes");

        assert!(outcome.best_length <= 40.01, "best={}", outcome.best_length);
        assert!(outcome.best_tour.is_permutation(4));
        assert_eq!(outcome.generations, 50);
        assert!(!outcome.interrupted);
    }

    #[test]
    fn every_member_of_every_generation_is_a_permutation() {
        let cities = scattered(15, 1);
        let config = EvolutionConfig::new(30, 25, 0.05);
        let mut evolution =
            Evolution::new(cities, config, StdRng::seed_from_u64(3)).expect("valid configuration");

        for _ in 0..25 {
            assert!(
                evolution
                    .population()
                    .tours()
                    .iter()
                    .all(|t| t.is_permutation(15))
            );
            assert_eq!(evolution.population().len(), 30);
            evolution.advance().expect("generation succeeds");
        }
    }

    #[test]
    fn two_best_tours_survive_into_the_next_generation() {
        let cities = scattered(12, 5);
        let config = EvolutionConfig::new(25, 10, 0.2);
        let mut evolution = Evolution::new(cities.clone(), config, StdRng::seed_from_u64(6))
            .expect("valid configuration");

        for _ in 0..10 {
            let ranked = evolution
                .population()
                .clone()
                .evaluate(&cities, &TourLength);
            let elites: Vec<Tour> = ranked.elites(2).collect();

            evolution.advance().expect("generation succeeds");

            let next = evolution.population().tours();
            assert_eq!(&next[..2], &elites[..]);
            assert!((next[0].length(&cities) - ranked.ranked()[0].length).abs() < 1e-12);
        }
    }

    #[test]
    fn best_overall_is_monotonic_and_reports_are_ordered() {
        let cities = scattered(20, 7);
        let config = EvolutionConfig::new(40, 60, 0.02);
        let evolution =
            Evolution::new(cities, config, StdRng::seed_from_u64(8)).expect("valid configuration");

        let mut reports: Vec<GenerationReport> = Vec::new();
        let outcome = evolution
            .run(&mut |r: &GenerationReport| reports.push(r.clone()))
            .expect("run completes");

        assert_eq!(reports.len(), 60);
        for (idx, report) in reports.iter().enumerate() {
            assert_eq!(report.generation, idx);
            assert!(report.best_overall_length <= report.best_length);
            assert!(report.best_length <= report.mean_length + 1e-9);
            assert!(report.mean_length <= report.worst_length + 1e-9);
        }
        assert!(
            reports
                .windows(2)
                .all(|w| w[1].best_overall_length <= w[0].best_overall_length)
        );
        let last = reports.last().expect("at least one report");
        assert_eq!(outcome.best_length, last.best_overall_length);
    }

    #[test]
    fn elitism_keeps_generation_best_non_increasing() {
        let cities = scattered(10, 9);
        let config = EvolutionConfig::new(20, 30, 0.1);
        let evolution =
            Evolution::new(cities, config, StdRng::seed_from_u64(10)).expect("valid configuration");

        let mut bests = Vec::new();
        evolution
            .run(&mut |r: &GenerationReport| bests.push(r.best_length))
            .expect("run completes");

        assert!(bests.windows(2).all(|w| w[1] <= w[0] + 1e-12));
    }

    #[test]
    fn same_seed_gives_same_outcome() {
        let cities = scattered(18, 11);
        let config = EvolutionConfig::new(30, 40, 0.05);
        let run = |seed| {
            Evolution::new(cities.clone(), config, StdRng::seed_from_u64(seed))
                .expect("valid configuration")
                .run(&mut |_: &GenerationReport| {})
                .expect("run completes")
        };

        let a = run(99);
        let b = run(99);
        assert_eq!(a.best_tour, b.best_tour);
        assert_eq!(a.best_length, b.best_length);
    }

    #[test]
    fn zero_generations_scores_the_initial_population() {
        let config = EvolutionConfig::new(10, 0, 0.01);
        let mut calls = 0;
        let outcome = Evolution::new(square(), config, StdRng::seed_from_u64(12))
            .expect("valid configuration")
            .run(&mut |_: &GenerationReport| calls += 1)
            .expect("run completes");

        assert_eq!(calls, 0);
        assert_eq!(outcome.generations, 0);
        assert!(outcome.best_tour.is_permutation(4));
        assert!(outcome.best_length >= 40.0 - 1e-9);
    }

    #[test]
    fn cancel_flag_stops_at_generation_boundary() {
        let flag = Arc::new(AtomicBool::new(false));
        let config = EvolutionConfig::new(10, 100, 0.01);
        let evolution = Evolution::new(scattered(8, 13), config, StdRng::seed_from_u64(14))
            .expect("valid configuration")
            .with_cancel_flag(Arc::clone(&flag));

        let outcome = evolution
            .run(&mut |r: &GenerationReport| {
                if r.generation == 4 {
                    flag.store(true, Ordering::Relaxed);
                }
            })
            .expect("run completes");

        assert!(outcome.interrupted);
        assert_eq!(outcome.generations, 5);
        assert!(outcome.best_tour.is_permutation(8));
    }

    #[test]
    fn single_city_runs_without_error() {
        let config = EvolutionConfig::new(3, 5, 0.5).with_tournament_size(1);
        let outcome = Evolution::new(vec![City::new(1.0, 1.0)], config, StdRng::seed_from_u64(15))
            .expect("valid configuration")
            .run(&mut |_: &GenerationReport| {})
            .expect("run completes");

        assert_eq!(outcome.best_length, 0.0);
        assert_eq!(outcome.best_tour.as_slice(), &[0]);
    }

    #[test]
    fn custom_fitness_drives_selection() {
        let cities = scattered(9, 16);
        let config = EvolutionConfig::new(20, 40, 0.05);
        // Maximise length by minimising its negation.
        let longest = |cities: &[City], tour: &Tour| -tour.length(cities);
        let rng = StdRng::seed_from_u64(17);
        let outcome = Evolution::with_fitness(cities.clone(), config, longest, rng)
            .expect("valid configuration")
            .run(&mut |_: &GenerationReport| {})
            .expect("run completes");

        assert!(outcome.best_length < 0.0);
        assert!((outcome.best_length + outcome.best_tour.length(&cities)).abs() < 1e-9);
    }

    #[test]
    fn invalid_configuration_fails_before_any_generation() {
        let config = EvolutionConfig::default();
        let err = Evolution::new(Vec::new(), config, StdRng::seed_from_u64(1))
            .err()
            .expect("zero cities must fail");
        assert!(matches!(err, Error::Configuration(_)));

        let config = EvolutionConfig::new(2, 10, 0.01);
        let err = Evolution::new(square(), config, StdRng::seed_from_u64(1))
            .err()
            .expect("tournament larger than population must fail");
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn non_finite_city_is_rejected() {
        let cities = vec![City::new(0.0, 0.0), City::new(f64::NAN, 1.0)];
        let config = EvolutionConfig::default();
        let err = Evolution::new(cities, config, StdRng::seed_from_u64(1))
            .err()
            .expect("NaN coordinate must fail");
        assert!(err.to_string().contains("city 1"));
    }
}
