// Series composer - Turns buckets and growth points into chart series
use crate::domain::analytics::{GrowthPoint, MonthBucket};
use crate::domain::dashboard::Platform;
use crate::domain::series::{Axis, Dataset, Series};

const PUBLICATIONS_COLOR: &str = "rgb(255, 0, 0)";
const ENGAGEMENT_COLOR: &str = "rgb(255, 159, 64)";
const TOTAL_COLOR: &str = "rgb(75, 192, 192)";
const DELTA_COLOR: &str = "rgb(153, 102, 255)";

pub const ENGAGEMENT_DATASET: &str = "Engagement";
pub const MONTHLY_GROWTH_DATASET: &str = "Monthly Growth";

/// Pure and deterministic; only dataset names vary per platform
#[derive(Debug, Clone)]
pub struct SeriesComposer {
    publications_name: String,
    total_name: String,
}

impl SeriesComposer {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            publications_name: format!("{} Publications", platform.content_noun()),
            total_name: format!("Total {}", platform.audience_noun()),
        }
    }

    /// Item counts on the primary axis, engagement sums on the secondary axis
    pub fn compose_publications(&self, buckets: &[MonthBucket]) -> Series {
        let labels = buckets.iter().map(|b| b.label.clone()).collect();
        let counts = buckets.iter().map(|b| b.item_count as f64).collect();
        let engagement = buckets.iter().map(|b| b.engagement_sum as f64).collect();

        Series::new(labels)
            .with_dataset(
                Dataset::new(self.publications_name.clone(), counts, Axis::Primary)
                    .with_color(PUBLICATIONS_COLOR),
            )
            .with_dataset(
                Dataset::new(ENGAGEMENT_DATASET, engagement, Axis::Secondary)
                    .with_color(ENGAGEMENT_COLOR),
            )
    }

    /// Cumulative totals on the primary axis, monthly deltas on the secondary axis
    pub fn compose_growth(&self, points: &[GrowthPoint]) -> Series {
        let labels = points.iter().map(|p| p.month.label()).collect();
        let totals = points.iter().map(|p| p.cumulative_total as f64).collect();
        let deltas = points.iter().map(|p| p.monthly_delta as f64).collect();

        Series::new(labels)
            .with_dataset(
                Dataset::new(self.total_name.clone(), totals, Axis::Primary)
                    .with_color(TOTAL_COLOR),
            )
            .with_dataset(
                Dataset::new(MONTHLY_GROWTH_DATASET, deltas, Axis::Secondary)
                    .with_color(DELTA_COLOR),
            )
    }
}
