use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use fitdash_charts::axis::format_number;
use fitdash_common::{weekday_label, ParsingConfig};
use fitdash_data::{active_minutes_by_weekday, steps_by_weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    /// Mean total steps
    Steps,
    /// Mean very + fairly + lightly active minutes
    Active,
}

pub async fn show(data_path: &Path, parsing: &ParsingConfig, metric: Metric) -> Result<()> {
    let dataset = super::load(data_path, parsing).await;

    let (title, buckets, precision) = match metric {
        Metric::Steps => ("Average Steps by Weekday", steps_by_weekday(dataset.records()), 0),
        Metric::Active => {
            ("Average Active Minutes by Weekday", active_minutes_by_weekday(dataset.records()), 1)
        }
    };

    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!();
    for bucket in buckets {
        println!("{:<10} {:>10}", weekday_label(bucket.key), format_number(bucket.value, precision));
    }

    Ok(())
}
