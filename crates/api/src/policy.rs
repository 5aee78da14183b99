//! Failure injection for simulated network calls.

use giftwise_core::random::RandomSource;

/// Default probability of a transient failure on a batch product fetch.
pub const DEFAULT_FAILURE_RATE: f64 = 0.02;

pub trait FailurePolicy: Send + Sync {
    fn should_fail(&self, operation: &'static str, random: &dyn RandomSource) -> bool;
}

/// Fails each call independently with a fixed probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbabilisticFailure {
    rate: f64,
}

impl ProbabilisticFailure {
    pub fn new(rate: f64) -> Self {
        let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for ProbabilisticFailure {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_RATE)
    }
}

impl FailurePolicy for ProbabilisticFailure {
    fn should_fail(&self, _operation: &'static str, random: &dyn RandomSource) -> bool {
        random.next_unit() < self.rate
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NeverFail;

impl FailurePolicy for NeverFail {
    fn should_fail(&self, _operation: &'static str, _random: &dyn RandomSource) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysFail;

impl FailurePolicy for AlwaysFail {
    fn should_fail(&self, _operation: &'static str, _random: &dyn RandomSource) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use giftwise_core::random::{FixedRandom, SeededRandom};

    use super::{AlwaysFail, FailurePolicy, NeverFail, ProbabilisticFailure, DEFAULT_FAILURE_RATE};

    #[test]
    fn probabilistic_failure_compares_against_the_roll() {
        let policy = ProbabilisticFailure::default();
        assert_eq!(policy.rate(), DEFAULT_FAILURE_RATE);

        assert!(policy.should_fail("batch", &FixedRandom::new(0.01)));
        assert!(!policy.should_fail("batch", &FixedRandom::new(0.02)));
        assert!(!policy.should_fail("batch", &FixedRandom::new(0.5)));
    }

    #[test]
    fn rate_is_clamped() {
        assert_eq!(ProbabilisticFailure::new(-1.0).rate(), 0.0);
        assert_eq!(ProbabilisticFailure::new(3.0).rate(), 1.0);
        assert_eq!(ProbabilisticFailure::new(f64::NAN).rate(), 0.0);
    }

    #[test]
    fn seeded_rolls_fail_roughly_at_the_configured_rate() {
        let policy = ProbabilisticFailure::new(0.25);
        let random = SeededRandom::new(42);

        let failures = (0..4_000).filter(|_| policy.should_fail("batch", &random)).count();
        assert!((800..1_200).contains(&failures), "got {failures} failures out of 4000");
    }

    #[test]
    fn fixed_policies() {
        let random = FixedRandom::default();
        assert!(!NeverFail.should_fail("batch", &random));
        assert!(AlwaysFail.should_fail("batch", &random));
    }
}
