use crate::output::{print_json, print_table};
use anyhow::Context;
use deckhand_core::slides::SlideCollection;
use std::path::Path;

pub const SUPPORTED_NAMES: &str =
    "slides.md, 01-slides.md, slides-topic.md, 01-slides-topic.md";

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let collection = SlideCollection::resolve(root)
        .with_context(|| format!("failed to scan {}", root.display()))?;

    if json {
        return print_json(&collection);
    }

    if collection.is_empty() {
        println!("No slide files found in {}.", root.display());
        println!("Supported names: {SUPPORTED_NAMES}");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = collection
        .iter()
        .enumerate()
        .map(|(i, e)| {
            vec![
                (i + 1).to_string(),
                e.file.clone(),
                e.slug.clone(),
                e.title.clone(),
            ]
        })
        .collect();
    print_table(&["#", "FILE", "SLUG", "TITLE"], rows);
    Ok(())
}
