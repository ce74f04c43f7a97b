use crate::{City, Tour};

/// Scores a tour; lower is better. The operators only see the scores an
/// implementation produces, so a penalised or otherwise adjusted objective can
/// be swapped in without touching selection or crossover.
pub trait Fitness {
    fn score(&self, cities: &[City], tour: &Tour) -> f64;
}

/// Closed-loop Euclidean length.
#[derive(Clone, Copy, Debug, Default)]
pub struct TourLength;

impl Fitness for TourLength {
    fn score(&self, cities: &[City], tour: &Tour) -> f64 {
        tour.length(cities)
    }
}

impl<F: Fn(&[City], &Tour) -> f64> Fitness for F {
    fn score(&self, cities: &[City], tour: &Tour) -> f64 {
        self(cities, tour)
    }
}

#[cfg(test)]
mod tests {
    use super::{Fitness, TourLength};
    use crate::{City, Tour};

    #[test]
    fn tour_length_scores_closed_loop() {
        let cities = vec![
            City::new(0.0, 0.0),
            City::new(0.0, 3.0),
            City::new(4.0, 0.0),
        ];
        let score = TourLength.score(&cities, &Tour::sequential(3));
        assert!((score - 12.0).abs() < 1e-12);
    }

    #[test]
    fn closures_act_as_fitness() {
        let cities = vec![City::new(0.0, 0.0), City::new(1.0, 0.0)];
        let penalised = |cities: &[City], tour: &Tour| tour.length(cities) + 100.0;
        assert!((penalised.score(&cities, &Tour::sequential(2)) - 102.0).abs() < 1e-12);
    }
}
