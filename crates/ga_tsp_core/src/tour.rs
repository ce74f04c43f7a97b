use std::ops::Index;

use rand::{Rng, seq::SliceRandom};

use crate::{City, geometry::TourGeometry};

/// A candidate solution: every city id in `0..n` exactly once, visited in
/// order and closed back to the first stop.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Uniformly random permutation of `0..n`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self(order)
    }

    /// Identity order `0, 1, .., n - 1`.
    pub fn sequential(n: usize) -> Self {
        Self((0..n).collect())
    }

    pub(crate) fn from_order(order: Vec<usize>) -> Self {
        Self(order)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn length(&self, cities: &[City]) -> f64 {
        TourGeometry::tour_length(cities, &self.0)
    }

    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }

    /// True when the tour visits each id in `0..n` exactly once.
    pub fn is_permutation(&self, n: usize) -> bool {
        if self.0.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &id in &self.0 {
            if id >= n || seen[id] {
                return false;
            }
            seen[id] = true;
        }
        true
    }

    pub fn cities<'a>(&'a self, cities: &'a [City]) -> impl Iterator<Item = &'a City> + 'a {
        self.0.iter().map(move |&id| &cities[id])
    }

    /// Same loop, rotated so that `start` is visited first.
    pub fn rotated_to(&self, start: usize) -> Self {
        Self(TourGeometry::rotate_cycle(&self.0, start))
    }
}

impl Index<usize> for Tour {
    type Output = usize;

    fn index(&self, idx: usize) -> &usize {
        &self.0[idx]
    }
}
