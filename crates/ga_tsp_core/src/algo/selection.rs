use rand::{Rng, seq::index};

use crate::{Error, Result, Tour, population::EvaluatedPopulation};

pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// Ranks of `k` distinct members drawn uniformly without replacement.
pub fn tournament_sample<R: Rng + ?Sized>(
    evaluated: &EvaluatedPopulation,
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    validate_tournament_size(k, evaluated.len())?;
    Ok(index::sample(rng, evaluated.len(), k).into_vec())
}

/// Best of `k` distinct members. Because `evaluated` is ranked best-first,
/// the lowest sampled rank is the shortest tour of the sample.
pub fn tournament_select<'a, R: Rng + ?Sized>(
    evaluated: &'a EvaluatedPopulation,
    k: usize,
    rng: &mut R,
) -> Result<&'a Tour> {
    let rank = tournament_sample(evaluated, k, rng)?
        .into_iter()
        .fold(usize::MAX, usize::min);
    Ok(&evaluated.ranked()[rank].tour)
}

pub(crate) fn validate_tournament_size(k: usize, pop_size: usize) -> Result<()> {
    if k == 0 {
        return Err(Error::configuration("tournament_size must be > 0"));
    }
    if k > pop_size {
        return Err(Error::configuration(format!(
            "tournament_size ({k}) must not exceed population size ({pop_size})"
        )));
    }
    Ok(())
}
