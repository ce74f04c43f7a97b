use rand::Rng;

use crate::Tour;

/// Swap mutation. Each position is, with probability `rate`, exchanged with a
/// uniformly random position (possibly itself). Returns a new tour and leaves
/// `tour` untouched, so elites referenced elsewhere never change underneath.
pub fn swap_mutation<R: Rng + ?Sized>(tour: &Tour, rate: f64, rng: &mut R) -> Tour {
    let mut order = tour.as_slice().to_vec();
    let n = order.len();
    for i in 0..n {
        if rng.random::<f64>() < rate {
            let j = rng.random_range(0..n);
            order.swap(i, j);
        }
    }
    Tour::from_order(order)
}
