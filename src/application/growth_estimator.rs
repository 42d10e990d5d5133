// Approximate historical growth from a single current total
//
// True audience history is not available from the platforms, so the series
// is synthesised: an average monthly gain scaled by a bounded random factor.
// It is a stand-in for display, not a fit to observed data.
use crate::domain::analytics::{AccountSnapshot, GrowthPoint};
use crate::domain::calendar::MonthKey;
use chrono::NaiveDate;
use rand::Rng;

/// Range of the multiplicative factor applied to the average monthly gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterBounds {
    min: f64,
    max: f64,
}

impl Default for JitterBounds {
    fn default() -> Self {
        Self { min: 0.7, max: 1.3 }
    }
}

impl JitterBounds {
    pub fn new(min: f64, max: f64) -> anyhow::Result<Self> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            anyhow::bail!("invalid jitter bounds [{}, {}]: need 0 <= min <= max", min, max);
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GrowthEstimator {
    jitter: JitterBounds,
}

impl GrowthEstimator {
    pub fn new(jitter: JitterBounds) -> Self {
        Self { jitter }
    }

    /// One point per month from `created_at` through `now`, inclusive.
    ///
    /// Cumulative totals never decrease and never overshoot the snapshot
    /// total; the final point is pinned to it exactly and its delta absorbs
    /// whatever the jitter left over.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        snapshot: &AccountSnapshot,
        now: NaiveDate,
        rng: &mut R,
    ) -> Vec<GrowthPoint> {
        let start = MonthKey::of(&snapshot.created_at);
        let span = start.months_until(MonthKey::of(&now)).max(0);
        let target = snapshot.current_total;
        let average = target as f64 / span.max(1) as f64;

        let mut cumulative = 0u64;
        let mut points: Vec<GrowthPoint> = (0..=span)
            .map(|i| {
                let gain = (average * self.jitter.sample(&mut *rng)).floor().max(0.0) as u64;
                let next = cumulative.saturating_add(gain).min(target);
                let point = GrowthPoint {
                    month: start.offset(i),
                    cumulative_total: next,
                    monthly_delta: next - cumulative,
                };
                cumulative = next;
                point
            })
            .collect();

        if let Some(last) = points.last_mut() {
            let previous = last.cumulative_total - last.monthly_delta;
            last.cumulative_total = target;
            last.monthly_delta = target - previous;
        }

        tracing::debug!(
            "Estimated {} growth points from {} to total {}",
            points.len(),
            snapshot.created_at,
            target
        );
        points
    }
}
