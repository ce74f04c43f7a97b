use rand::{Rng, seq::index};

use crate::Tour;

/// Order crossover (OX) with random cut points.
///
/// Tours shorter than two cities have no cut points to choose from, so the
/// child is a copy of `parent1`.
pub fn order_crossover<R: Rng + ?Sized>(parent1: &Tour, parent2: &Tour, rng: &mut R) -> Tour {
    let n = parent1.len();
    if n < 2 {
        return parent1.clone();
    }
    let (start, end) = random_cut_points(n, rng);
    order_crossover_with_cuts(parent1, parent2, start, end)
}

/// Two distinct cut points with `0 <= start < end <= n`.
pub fn random_cut_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let picks = index::sample(rng, n + 1, 2);
    let (a, b) = (picks.index(0), picks.index(1));
    (a.min(b), a.max(b))
}

/// Order crossover with explicit cut points.
///
/// `parent1[start..end]` is copied into the same child positions. The other
/// cities are taken from `parent2` left to right, skipping any already in the
/// child, and each goes into the next empty slot of a circular scan that
/// starts at `end`. Both parents must be permutations of the same ids.
pub fn order_crossover_with_cuts(parent1: &Tour, parent2: &Tour, start: usize, end: usize) -> Tour {
    let n = parent1.len();
    debug_assert_eq!(n, parent2.len(), "parents must have the same length");
    debug_assert!(start < end && end <= n, "cut points out of range");

    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut placed = vec![false; n];
    for pos in start..end {
        let city = parent1[pos];
        child[pos] = Some(city);
        placed[city] = true;
    }

    let mut empty = n - (end - start);
    let mut pos = end % n;
    for &city in parent2.as_slice() {
        if empty == 0 {
            break;
        }
        if placed[city] {
            continue;
        }
        while child[pos].is_some() {
            pos = (pos + 1) % n;
        }
        child[pos] = Some(city);
        placed[city] = true;
        empty -= 1;
        pos = (pos + 1) % n;
    }

    let child = Tour::from_order(child.into_iter().flatten().collect());
    debug_assert!(
        child.is_permutation(n),
        "crossover produced an invalid tour"
    );
    child
}
