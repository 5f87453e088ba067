//! Rate-based random events
//!
//! Every probabilistic event is described by a rate per simulated hour. The
//! chance that it fires during a step of `elapsed_hours` follows a Poisson
//! process, so it stays a valid probability for arbitrarily long steps and
//! matches `rate * elapsed_hours` when that product is small.

use rand::Rng;

/// Probability that an event with `rate_per_hour` fires within `elapsed_hours`
pub fn chance(rate_per_hour: f64, elapsed_hours: f64) -> f64 {
    if rate_per_hour <= 0.0 || elapsed_hours <= 0.0 {
        return 0.0;
    }
    (1.0 - (-rate_per_hour * elapsed_hours).exp()).clamp(0.0, 1.0)
}

/// Draw whether an event with `rate_per_hour` fires within `elapsed_hours`
///
/// A zero probability consumes no randomness.
pub fn roll(rng: &mut impl Rng, rate_per_hour: f64, elapsed_hours: f64) -> bool {
    let p = chance(rate_per_hour, elapsed_hours);
    p > 0.0 && rng.gen_bool(p)
}
