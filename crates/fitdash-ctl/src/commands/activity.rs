use std::path::Path;

use anyhow::Result;
use fitdash_common::{ActivityCategory, ParsingConfig};
use fitdash_data::category_shares;

pub async fn show(data_path: &Path, parsing: &ParsingConfig) -> Result<()> {
    let dataset = super::load(data_path, parsing).await;
    let shares = category_shares(dataset.records(), &ActivityCategory::ALL);

    println!("Activity Status");
    println!("===============");
    println!();
    println!("{:<16} {:>12} {:>8}", "Category", "Minutes", "Share");
    for share in &shares {
        println!(
            "{:<16} {:>12} {:>8}",
            share.category.label(),
            share.total_minutes,
            share.percentage_label()
        );
    }

    Ok(())
}
