use crate::browser_record::BrowserRecord;
use crate::selector_config::SamplingPolicy;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

/// Draws one record from a candidate list, never failing.
#[derive(Debug, Clone)]
pub struct Selector {
    policy: SamplingPolicy,
    fallback: BrowserRecord,
}

impl Selector {
    pub fn new(policy: SamplingPolicy, fallback_user_agent: &str) -> Selector {
        Selector {
            policy,
            fallback: BrowserRecord::fallback(fallback_user_agent),
        }
    }

    pub fn policy(&self) -> SamplingPolicy {
        self.policy
    }

    pub fn fallback(&self) -> &BrowserRecord {
        &self.fallback
    }

    pub fn is_fallback(&self, record: &BrowserRecord) -> bool {
        std::ptr::eq(record, &self.fallback)
    }

    /// A fresh draw on every call; the fallback is returned for an empty list.
    pub fn select<'a, R: Rng + ?Sized>(&'a self, candidates: &[&'a BrowserRecord], rng: &mut R) -> &'a BrowserRecord {
        if candidates.is_empty() {
            return &self.fallback;
        }
        match self.policy {
            SamplingPolicy::Uniform => self.uniform(candidates, rng),
            SamplingPolicy::Weighted => {
                // WeightedIndex panics instead of failing when the total overflows
                let total: f64 = candidates.iter().map(|r| r.usage_percent).sum();
                if !total.is_finite() {
                    warn!("Usage weights sum to {}, suppressed with fallback.", total);
                    return &self.fallback;
                }
                match WeightedIndex::new(candidates.iter().map(|r| r.usage_percent)) {
                    Ok(dist) => candidates[dist.sample(rng)],
                    Err(WeightedError::AllWeightsZero) => self.uniform(candidates, rng),
                    Err(e) => {
                        warn!("Invalid usage weights ({}), suppressed with fallback.", e);
                        &self.fallback
                    }
                }
            }
        }
    }

    fn uniform<'a, R: Rng + ?Sized>(&'a self, candidates: &[&'a BrowserRecord], rng: &mut R) -> &'a BrowserRecord {
        candidates.choose(rng).copied().unwrap_or(&self.fallback)
    }
}
