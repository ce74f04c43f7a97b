use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicBool, Ordering},
};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{City, Tour, geometry::TourGeometry};

static INTERRUPT_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Seeds a [`StdRng`] from `seed`, or from fresh entropy when unset. The seed
/// actually used is returned so a run can be replayed.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    (StdRng::seed_from_u64(seed), seed)
}

/// Process-wide flag raised by Ctrl-C. The handler is installed on first use.
pub fn interrupt_flag() -> Arc<AtomicBool> {
    INTERRUPT_FLAG
        .get_or_init(|| {
            let flag = Arc::new(AtomicBool::new(false));
            let handler_flag = Arc::clone(&flag);
            if let Err(err) = ctrlc::set_handler(move || {
                handler_flag.store(true, Ordering::Relaxed);
            }) {
                log::warn!("interrupt: failed to install ctrl-c handler err={err}");
            }
            flag
        })
        .clone()
}

/// Total length, longest edge and mean edge of the closed tour.
pub fn tour_metrics(cities: &[City], tour: &Tour) -> (f64, f64, f64) {
    if tour.len() < 2 {
        log::info!("metrics: n={} total=0 longest=0 mean_edge=0", tour.len());
        return (0.0, 0.0, 0.0);
    }

    let mut total = 0.0;
    let mut longest: f64 = 0.0;
    for d in TourGeometry::edge_lengths(cities, tour.as_slice()) {
        total += d;
        longest = longest.max(d);
    }
    let mean_edge = total / tour.len() as f64;

    log::info!(
        "metrics: n={} total={total:.3} longest={longest:.3} mean_edge={mean_edge:.3}",
        tour.len()
    );

    (total, longest, mean_edge)
}
