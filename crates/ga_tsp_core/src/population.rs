use rand::Rng;

use crate::{City, Tour, fitness::Fitness};

/// Fixed-size collection of tours over the same city set. Duplicates are allowed.
#[derive(Clone, Debug, Default)]
pub struct Population {
    tours: Vec<Tour>,
}

impl Population {
    pub fn random<R: Rng + ?Sized>(pop_size: usize, num_cities: usize, rng: &mut R) -> Self {
        Self {
            tours: (0..pop_size)
                .map(|_| Tour::random(num_cities, rng))
                .collect(),
        }
    }

    pub fn from_tours(tours: Vec<Tour>) -> Self {
        Self { tours }
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Scores every member and ranks them ascending. The sort is stable, so
    /// equal scores keep their population order.
    pub fn evaluate<F: Fitness + ?Sized>(
        self,
        cities: &[City],
        fitness: &F,
    ) -> EvaluatedPopulation {
        let mut ranked: Vec<Scored> = self
            .tours
            .into_iter()
            .map(|tour| Scored {
                length: fitness.score(cities, &tour),
                tour,
            })
            .collect();
        ranked.sort_by(|a, b| a.length.total_cmp(&b.length));
        EvaluatedPopulation { ranked }
    }
}

#[derive(Clone, Debug)]
pub struct Scored {
    pub tour: Tour,
    pub length: f64,
}

/// A population ranked best-first. Built fresh every generation.
#[derive(Clone, Debug)]
pub struct EvaluatedPopulation {
    ranked: Vec<Scored>,
}

impl EvaluatedPopulation {
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn ranked(&self) -> &[Scored] {
        &self.ranked
    }

    pub fn get(&self, rank: usize) -> Option<&Scored> {
        self.ranked.get(rank)
    }

    pub fn best(&self) -> Option<&Scored> {
        self.ranked.first()
    }

    /// Clones of the `count` best tours, best first.
    pub fn elites(&self, count: usize) -> impl Iterator<Item = Tour> + '_ {
        self.ranked.iter().take(count).map(|s| s.tour.clone())
    }

    pub fn stats(&self) -> Option<PopulationStats> {
        let best = self.ranked.first()?.length;
        let worst = self.ranked.last()?.length;
        let sum: f64 = self.ranked.iter().map(|s| s.length).sum();
        Some(PopulationStats {
            best,
            worst,
            mean: sum / self.ranked.len() as f64,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopulationStats {
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
}
