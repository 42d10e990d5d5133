// Fallback generator - Demo dataset substituted when a live run fails
use crate::application::series_composer::SeriesComposer;
use crate::domain::analytics::{AccountSummary, GrowthPoint, MonthBucket};
use crate::domain::calendar::MonthKey;
use crate::domain::series::Series;
use chrono::NaiveDate;
use rand::Rng;

pub const DEMO_ACCOUNT_NAME: &str = "Demo Channel";

const ITEMS_PER_MONTH: std::ops::Range<u64> = 2..10;
const ENGAGEMENT_PER_MONTH: std::ops::Range<u64> = 0..500;
const GROWTH_PER_MONTH: std::ops::Range<u64> = 200..700;

#[derive(Debug, Clone)]
pub struct FallbackDashboard {
    pub summary: AccountSummary,
    pub publications: Series,
    pub growth: Series,
}

/// Longest trailing window the generator will produce
pub const MAX_WINDOW_MONTHS: u32 = 120;

#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    window_months: u32,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self { window_months: 12 }
    }
}

impl FallbackGenerator {
    pub fn new(window_months: u32) -> Self {
        Self {
            window_months: window_months.clamp(1, MAX_WINDOW_MONTHS),
        }
    }

    pub fn window_months(&self) -> u32 {
        self.window_months
    }

    /// Trailing window ending at the month of `now`. Makes no external calls
    /// and cannot fail.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        composer: &SeriesComposer,
        now: NaiveDate,
        rng: &mut R,
    ) -> FallbackDashboard {
        let last = MonthKey::of(&now);
        let first = last.offset(-(self.window_months as i64 - 1));
        let months: Vec<MonthKey> = MonthKey::range_inclusive(first, last).collect();

        let buckets: Vec<MonthBucket> = months
            .iter()
            .map(|&month| MonthBucket {
                item_count: rng.gen_range(ITEMS_PER_MONTH),
                engagement_sum: rng.gen_range(ENGAGEMENT_PER_MONTH),
                ..MonthBucket::empty(month)
            })
            .collect();

        let mut cumulative = 0u64;
        let growth: Vec<GrowthPoint> = months
            .iter()
            .map(|&month| {
                let monthly_delta = rng.gen_range(GROWTH_PER_MONTH);
                cumulative += monthly_delta;
                GrowthPoint {
                    month,
                    cumulative_total: cumulative,
                    monthly_delta,
                }
            })
            .collect();

        let summary = AccountSummary {
            display_name: DEMO_ACCOUNT_NAME.to_string(),
            current_total: cumulative,
            created_at: Some(first.first_day()),
            view_count: Some(cumulative * 20),
            content_count: Some(buckets.iter().map(|b| b.item_count).sum()),
        };

        FallbackDashboard {
            summary,
            publications: composer.compose_publications(&buckets),
            growth: composer.compose_growth(&growth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::Platform;
    use crate::application::series_composer::MONTHLY_GROWTH_DATASET;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
    }

    #[test]
    fn test_trailing_twelve_months() {
        let composer = SeriesComposer::for_platform(Platform::YouTube);
        let demo = FallbackGenerator::default().generate(
            &composer,
            now(),
            &mut StdRng::seed_from_u64(11),
        );

        assert_eq!(demo.publications.labels.len(), 12);
        assert_eq!(demo.publications.labels.first().unwrap(), "Apr 2023");
        assert_eq!(demo.publications.labels.last().unwrap(), "Mar 2024");
        assert_eq!(demo.growth.labels, demo.publications.labels);
        assert!(demo.publications.is_aligned());
        assert!(demo.growth.is_aligned());
        assert_eq!(demo.summary.display_name, DEMO_ACCOUNT_NAME);
        assert_eq!(
            demo.summary.created_at,
            NaiveDate::from_ymd_opt(2023, 4, 1)
        );
    }

    #[test]
    fn test_values_are_bounded_and_monotonic() {
        let composer = SeriesComposer::for_platform(Platform::Instagram);
        let generator = FallbackGenerator::new(24);
        for seed in 0..50 {
            let demo = generator.generate(&composer, now(), &mut StdRng::seed_from_u64(seed));

            let counts = demo.publications.dataset("Post Publications").unwrap();
            assert!(counts.values.iter().all(|v| (2.0..10.0).contains(v)));

            let totals = &demo.growth.dataset("Total Followers").unwrap().values;
            assert!(totals.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(*totals.last().unwrap() as u64, demo.summary.current_total);

            let deltas = &demo.growth.dataset(MONTHLY_GROWTH_DATASET).unwrap().values;
            assert!(deltas.iter().all(|v| (200.0..700.0).contains(v)));
        }
    }

    #[test]
    fn test_window_is_at_least_one_month() {
        let generator = FallbackGenerator::new(0);
        assert_eq!(generator.window_months(), 1);

        let composer = SeriesComposer::for_platform(Platform::YouTube);
        let demo = generator.generate(&composer, now(), &mut StdRng::seed_from_u64(0));
        assert_eq!(demo.growth.labels, vec!["Mar 2024"]);
    }

    #[test]
    fn test_window_is_capped() {
        let generator = FallbackGenerator::new(4_000_000_000);
        assert_eq!(generator.window_months(), MAX_WINDOW_MONTHS);

        let composer = SeriesComposer::for_platform(Platform::YouTube);
        let demo = generator.generate(&composer, now(), &mut StdRng::seed_from_u64(0));
        assert_eq!(demo.growth.labels.len(), MAX_WINDOW_MONTHS as usize);
        assert!(demo.growth.is_aligned());
    }
}
