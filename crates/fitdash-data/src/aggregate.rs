use std::collections::HashSet;

use chrono::Datelike;
use fitdash_common::{
    ActivityCategory, ActivityRecord, AggregatedBucket, CategoryShare, SummaryStats,
    WeekdayBucket, WEEKDAYS,
};

/// Mean of `value_fn` per weekday, always seven buckets in Sunday-first
/// order. A weekday with no records yields `0`.
pub fn weekday_means<F>(records: &[ActivityRecord], value_fn: F) -> Vec<WeekdayBucket>
where
    F: Fn(&ActivityRecord) -> f64,
{
    let mut sums = [0.0_f64; 7];
    let mut counts = [0_usize; 7];

    for record in records {
        let slot = record.date.weekday().num_days_from_sunday() as usize;
        sums[slot] += value_fn(record);
        counts[slot] += 1;
    }

    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(slot, day)| AggregatedBucket {
            key: *day,
            value: if counts[slot] == 0 { 0.0 } else { sums[slot] / counts[slot] as f64 },
        })
        .collect()
}

pub fn steps_by_weekday(records: &[ActivityRecord]) -> Vec<WeekdayBucket> {
    weekday_means(records, |r| f64::from(r.total_steps))
}

pub fn active_minutes_by_weekday(records: &[ActivityRecord]) -> Vec<WeekdayBucket> {
    weekday_means(records, |r| f64::from(r.active_minutes()))
}

/// Summed minutes per category and each category's share of the grand
/// total, in the order given.
///
/// Shares are in hundredths of a percent. They are apportioned by largest
/// remainder, so whenever the grand total is positive they add up to
/// exactly 100.00%. A zero grand total gives every category 0.00%.
pub fn category_shares(
    records: &[ActivityRecord],
    categories: &[ActivityCategory],
) -> Vec<CategoryShare> {
    let totals: Vec<u64> = categories
        .iter()
        .map(|category| records.iter().map(|r| u64::from(category.minutes(r))).sum())
        .collect();
    let grand_total: u64 = totals.iter().sum();

    let mut hundredths = vec![0_u32; categories.len()];
    if grand_total > 0 {
        let grand = u128::from(grand_total);
        let mut remainders: Vec<(usize, u128)> = Vec::with_capacity(totals.len());
        for (i, total) in totals.iter().enumerate() {
            let scaled = u128::from(*total) * 10_000;
            hundredths[i] = (scaled / grand) as u32;
            remainders.push((i, scaled % grand));
        }

        let assigned: u32 = hundredths.iter().sum();
        let leftover = 10_000_u32.saturating_sub(assigned) as usize;
        remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (i, _) in remainders.into_iter().take(leftover) {
            hundredths[i] += 1;
        }
    }

    categories
        .iter()
        .zip(totals)
        .zip(hundredths)
        .map(|((category, total_minutes), percentage_hundredths)| CategoryShare {
            category: *category,
            total_minutes,
            percentage_hundredths,
        })
        .collect()
}

/// Arithmetic mean over all records; `0` for an empty slice.
pub fn mean<F>(records: &[ActivityRecord], value_fn: F) -> f64
where
    F: Fn(&ActivityRecord) -> f64,
{
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(value_fn).sum::<f64>() / records.len() as f64
}

pub fn distinct_users(records: &[ActivityRecord]) -> usize {
    records.iter().map(|r| r.id).collect::<HashSet<_>>().len()
}

pub fn summarize(records: &[ActivityRecord]) -> SummaryStats {
    SummaryStats {
        users: distinct_users(records),
        days: records.len(),
        avg_steps: mean(records, |r| f64::from(r.total_steps)),
        avg_distance: mean(records, |r| r.total_distance),
        avg_active_minutes: mean(records, |r| f64::from(r.active_minutes())),
        avg_sedentary_minutes: mean(records, |r| f64::from(r.sedentary_minutes)),
        avg_calories: mean(records, |r| r.calories),
    }
}
