use crate::City;

pub struct TourGeometry;

impl TourGeometry {
    /// Closed-loop length of `order`, where each entry indexes `cities`.
    /// Fewer than two stops is a zero-length loop.
    pub fn tour_length(cities: &[City], order: &[usize]) -> f64 {
        Self::edge_lengths(cities, order).sum()
    }

    /// Lengths of every edge of the closed loop, including the closing edge.
    pub fn edge_lengths<'a>(
        cities: &'a [City],
        order: &'a [usize],
    ) -> impl Iterator<Item = f64> + 'a {
        let n = if order.len() < 2 { 0 } else { order.len() };
        (0..n).map(move |i| Self::edge(cities, order, i))
    }

    /// Edge from stop `i` to the stop after it, wrapping at the end.
    fn edge(cities: &[City], order: &[usize], i: usize) -> f64 {
        let next = order[(i + 1) % order.len()];
        cities[order[i]].dist(&cities[next])
    }

    pub fn rotate_cycle(order: &[usize], start: usize) -> Vec<usize> {
        let Some(pos) = order.iter().position(|&x| x == start) else {
            return order.to_vec();
        };
        let mut out = Vec::with_capacity(order.len());
        out.extend_from_slice(&order[pos..]);
        out.extend_from_slice(&order[..pos]);
        out
    }
}
