use std::path::Path;

use anyhow::Result;
use fitdash_common::ParsingConfig;
use fitdash_data::summarize;

pub async fn show(data_path: &Path, parsing: &ParsingConfig) -> Result<()> {
    let dataset = super::load(data_path, parsing).await;
    let stats = summarize(dataset.records());

    println!("Activity Summary");
    println!("================");
    println!();
    for card in stats.cards() {
        println!("{:<24} {:>10}", format!("{}:", card.label), card.value);
    }
    println!();
    println!("{} user-days across {} users", stats.days, stats.users);

    Ok(())
}
