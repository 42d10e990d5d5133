// Monthly bucketing of content items
use crate::domain::analytics::{ContentItem, MonthBucket};
use crate::domain::calendar::MonthKey;
use chrono::NaiveDate;

/// Count items per calendar month over `[range_start, range_end]`.
///
/// Emits one bucket per month in the range, zero-count months included,
/// in ascending order. Items dated outside the range are dropped.
/// An inverted range yields no buckets.
pub fn bucketize(
    items: &[ContentItem],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<MonthBucket> {
    let first = MonthKey::of(&range_start);
    let mut buckets: Vec<MonthBucket> = MonthKey::range_inclusive(first, MonthKey::of(&range_end))
        .map(MonthBucket::empty)
        .collect();

    let mut dropped = 0usize;
    for item in items {
        let date = item.published_at.date_naive();
        if date < range_start || date > range_end {
            dropped += 1;
            continue;
        }

        let index = first.months_until(MonthKey::of(&date)) as usize;
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.item_count += 1;
            bucket.engagement_sum = bucket.engagement_sum.saturating_add(item.engagement);
        }
    }

    if dropped > 0 {
        tracing::debug!("Dropped {} items outside {}..={}", dropped, range_start, range_end);
    }

    buckets
}
