use crate::types::result::MetricMap;
use crate::types::status::Status;
use chrono::Utc;

/// Resolves one metric to a status. Implementations stand in for a real probe.
pub trait MetricEvaluator {
    fn evaluate(&mut self, metric: &str, url: &str) -> Status;
}

/// Deterministic PRNG (xorshift64) so simulated runs can be replayed from a seed.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn from_clock() -> Self {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::new(nanos as u64)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform-ish value in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// Weighted random choice over the status enumeration.
#[derive(Debug, Clone)]
pub struct RandomSimulator {
    rng: SimpleRng,
    weights: Vec<(Status, u32)>,
    total: u64,
}

impl RandomSimulator {
    pub fn new(rng: SimpleRng, weights: &[(Status, u32)]) -> Self {
        let weights: Vec<_> = weights
            .iter()
            .copied()
            .filter(|(_, weight)| *weight > 0)
            .collect();
        let total = weights.iter().map(|(_, weight)| u64::from(*weight)).sum();
        Self {
            rng,
            weights,
            total,
        }
    }

    pub fn seeded(seed: u64, weights: &[(Status, u32)]) -> Self {
        Self::new(SimpleRng::new(seed), weights)
    }

    fn pick(&mut self) -> Status {
        if self.total == 0 {
            return Status::NotApplicable;
        }
        let mut roll = self.rng.below(self.total);
        for (status, weight) in &self.weights {
            let weight = u64::from(*weight);
            if roll < weight {
                return *status;
            }
            roll -= weight;
        }
        Status::NotApplicable
    }
}

impl MetricEvaluator for RandomSimulator {
    fn evaluate(&mut self, _metric: &str, _url: &str) -> Status {
        self.pick()
    }
}

/// Replays statuses from a previously recorded flat map; unknown metrics are N/A.
#[derive(Debug, Clone)]
pub struct StoredStatuses<'a> {
    metrics: &'a MetricMap,
}

impl<'a> StoredStatuses<'a> {
    pub fn new(metrics: &'a MetricMap) -> Self {
        Self { metrics }
    }
}

impl MetricEvaluator for StoredStatuses<'_> {
    fn evaluate(&mut self, metric: &str, _url: &str) -> Status {
        self.metrics
            .get(metric)
            .copied()
            .unwrap_or(Status::NotApplicable)
    }
}
