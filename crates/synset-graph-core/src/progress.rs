//! Progress and completion-time estimation for the O(N^2) scoring loop.
//!
//! The outer loop over sample indices is divided into checkpoints (every 5%
//! by default). Because each new index is scored against all previous ones,
//! checkpoint `k` covers an amount of work proportional to `2k - 1`; the
//! projection extrapolates total time with those weights instead of
//! assuming uniform per-index cost. Purely informational: estimates never
//! influence the computation.

use std::time::{Duration, Instant};

use tracing::info;

/// One emitted progress checkpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    /// Fraction of outer iterations completed, in `(0, 1]`.
    pub fraction_done: f64,
    /// Wall time since the previous checkpoint.
    pub step: Duration,
    /// Wall time since the loop started.
    pub cumulative: Duration,
    /// Projected total wall time for the loop.
    pub projected_total: Duration,
}

/// Tracks elapsed time across a loop of known length and projects the total.
#[derive(Debug)]
pub struct ProgressEstimator {
    total_items: usize,
    items_per_checkpoint: usize,
    checkpoints_total: usize,
    started: Instant,
    last_checkpoint: Instant,
    checkpoints_seen: usize,
    history: Vec<Checkpoint>,
}

impl ProgressEstimator {
    /// Create an estimator for `total_items` outer iterations with a
    /// checkpoint every `fraction` of the loop (e.g. `0.05` for 5%).
    ///
    /// Fractions too fine for the loop length collapse to a checkpoint per
    /// iteration.
    pub fn new(total_items: usize, fraction: f64) -> Self {
        let fraction = fraction.clamp(f64::EPSILON, 1.0);
        let items_per_checkpoint = ((total_items as f64 * fraction).round() as usize).max(1);
        let checkpoints_total = total_items.div_ceil(items_per_checkpoint).max(1);
        let now = Instant::now();
        Self {
            total_items,
            items_per_checkpoint,
            checkpoints_total,
            started: now,
            last_checkpoint: now,
            checkpoints_seen: 0,
            history: Vec::with_capacity(checkpoints_total),
        }
    }

    /// Record that `done` outer iterations have completed.
    ///
    /// Call once per outer iteration; emits a checkpoint (and a `tracing`
    /// report) whenever a checkpoint boundary is crossed. Returns the
    /// checkpoint when one was emitted.
    pub fn tick(&mut self, done: usize) -> Option<Checkpoint> {
        if done == 0 || done % self.items_per_checkpoint != 0 {
            return None;
        }
        let now = Instant::now();
        let step = now.duration_since(self.last_checkpoint);
        let cumulative = now.duration_since(self.started);
        self.last_checkpoint = now;
        self.checkpoints_seen += 1;

        let projected_total = project_total(
            cumulative,
            self.checkpoints_seen,
            self.checkpoints_total,
        );
        let checkpoint = Checkpoint {
            fraction_done: done as f64 / self.total_items as f64,
            step,
            cumulative,
            projected_total,
        };
        info!(
            percent = checkpoint.fraction_done * 100.0,
            step_secs = step.as_secs_f64(),
            cumulative_secs = cumulative.as_secs_f64(),
            projected_secs = projected_total.as_secs_f64(),
            "progress"
        );
        self.history.push(checkpoint);
        Some(checkpoint)
    }

    /// Checkpoints emitted so far, in order.
    pub fn history(&self) -> &[Checkpoint] {
        &self.history
    }

    /// Total wall time since the estimator was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Extrapolate total loop time from the checkpoints observed so far.
///
/// Checkpoint `k` carries weight `2k - 1`, the amount of pairwise work its
/// slice of a lower-triangular scan contains. The projection scales the
/// cumulative time by total weight over observed weight.
pub fn project_total(cumulative: Duration, seen: usize, total: usize) -> Duration {
    if seen == 0 {
        return Duration::ZERO;
    }
    let weight = |count: usize| -> f64 { (1..=count).map(|k| (2 * k - 1) as f64).sum() };
    let ratio = weight(total.max(seen)) / weight(seen);
    cumulative.mul_f64(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_scales_by_triangular_weights() {
        // 5 of 20 checkpoints seen: observed weight 25, total weight 400.
        let projected = project_total(Duration::from_secs(25), 5, 20);
        assert_eq!(projected, Duration::from_secs(400));
    }

    #[test]
    fn projection_at_completion_is_identity() {
        let cumulative = Duration::from_secs(123);
        assert_eq!(project_total(cumulative, 20, 20), cumulative);
    }

    #[test]
    fn projection_with_no_observations_is_zero() {
        assert_eq!(project_total(Duration::from_secs(5), 0, 20), Duration::ZERO);
    }

    #[test]
    fn ticks_emit_checkpoints_at_boundaries() {
        let mut estimator = ProgressEstimator::new(100, 0.05);
        assert!(estimator.tick(0).is_none());
        assert!(estimator.tick(1).is_none());
        assert!(estimator.tick(5).is_some());
        assert!(estimator.tick(6).is_none());
        assert!(estimator.tick(10).is_some());
        assert_eq!(estimator.history().len(), 2);
    }

    #[test]
    fn tiny_loops_checkpoint_every_iteration() {
        let mut estimator = ProgressEstimator::new(3, 0.05);
        assert!(estimator.tick(1).is_some());
        assert!(estimator.tick(2).is_some());
        assert!(estimator.tick(3).is_some());
    }

    #[test]
    fn cumulative_time_is_monotonic() {
        let mut estimator = ProgressEstimator::new(50, 0.1);
        for done in 1..=50 {
            estimator.tick(done);
        }
        let history = estimator.history();
        assert!(!history.is_empty());
        for pair in history.windows(2) {
            assert!(pair[1].cumulative >= pair[0].cumulative);
        }
    }
}
