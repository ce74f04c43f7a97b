use crate::{Error, Result, selection};

pub const DEFAULT_POP_SIZE: usize = 100;
pub const DEFAULT_NUM_GENERATIONS: usize = 500;
pub const DEFAULT_MUTATION_RATE: f64 = 0.01;
pub const DEFAULT_ELITE_SIZE: usize = 2;

/// Parameters of one evolution run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvolutionConfig {
    pub pop_size: usize,
    pub num_generations: usize,
    pub mutation_rate: f64,
    pub tournament_size: usize,
    pub elite_size: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            pop_size: DEFAULT_POP_SIZE,
            num_generations: DEFAULT_NUM_GENERATIONS,
            mutation_rate: DEFAULT_MUTATION_RATE,
            tournament_size: selection::DEFAULT_TOURNAMENT_SIZE,
            elite_size: DEFAULT_ELITE_SIZE,
        }
    }
}

impl EvolutionConfig {
    pub fn new(pop_size: usize, num_generations: usize, mutation_rate: f64) -> Self {
        Self {
            pop_size,
            num_generations,
            mutation_rate,
            ..Self::default()
        }
    }

    pub fn with_tournament_size(mut self, tournament_size: usize) -> Self {
        self.tournament_size = tournament_size;
        self
    }

    pub fn with_elite_size(mut self, elite_size: usize) -> Self {
        self.elite_size = elite_size;
        self
    }

    /// Rejects any setting that would make a run meaningless, before a
    /// single generation executes.
    pub fn validate(&self, num_cities: usize) -> Result<()> {
        if num_cities == 0 {
            return Err(Error::configuration("number of cities must be > 0"));
        }
        if self.pop_size == 0 {
            return Err(Error::configuration("pop_size must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::configuration(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        selection::validate_tournament_size(self.tournament_size, self.pop_size)?;
        if self.elite_size > self.pop_size {
            return Err(Error::configuration(format!(
                "elite_size ({}) must not exceed population size ({})",
                self.elite_size, self.pop_size
            )));
        }
        Ok(())
    }
}
