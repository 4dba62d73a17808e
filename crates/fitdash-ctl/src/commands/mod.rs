pub mod activity;
pub mod config;
pub mod render;
pub mod summary;
pub mod weekdays;

use std::path::Path;

use fitdash_common::ParsingConfig;
use fitdash_data::{load_or_empty, Dataset};

/// The one dataset load behind every data command. A failed load has
/// already been logged and yields an empty dataset.
pub async fn load(data_path: &Path, parsing: &ParsingConfig) -> Dataset {
    let dataset = load_or_empty(data_path, parsing).await;
    if dataset.is_empty() {
        println!("No activity records loaded from {}", data_path.display());
    }
    dataset
}
