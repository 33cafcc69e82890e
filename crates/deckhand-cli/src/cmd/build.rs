use crate::cmd::list::SUPPORTED_NAMES;
use crate::output::{print_json, print_table_indented};
use anyhow::Context;
use deckhand_core::{
    build,
    config::{Config, WarnLevel},
    paths,
    slides::SlideCollection,
};
use std::path::Path;

pub fn run(root: &Path, out: Option<&str>, no_vercel: bool, json: bool) -> anyhow::Result<()> {
    let mut config = Config::load(root).context("failed to load config")?;
    if let Some(out) = out {
        config.site.out_dir = out.to_string();
    }
    if no_vercel {
        config.site.vercel = false;
    }
    check_config(&config)?;

    let collection = SlideCollection::resolve(root)
        .with_context(|| format!("failed to scan {}", root.display()))?;

    if collection.is_empty() {
        tracing::warn!(dir = %root.display(), "no slide files found; nothing to build");
        if json {
            // Same keys as a BuildReport; nothing was written.
            return print_json(&serde_json::json!({
                "out_dir": config.out_dir(root),
                "built": [],
                "failed": [],
                "nav_page": null,
                "routing_config": null,
            }));
        }
        println!("No slide files found. Supported names: {SUPPORTED_NAMES}");
        return Ok(());
    }

    tracing::info!(count = collection.len(), "found slide files");
    let report = build::run(root, &config, &collection).context("build failed")?;

    if json {
        print_json(&report)?;
    } else {
        print_summary(root, &report);
    }

    if report.built.is_empty() {
        anyhow::bail!("all {} deck builds failed", report.failed.len());
    }
    Ok(())
}

fn check_config(config: &Config) -> anyhow::Result<()> {
    let warnings = config.validate();
    for w in &warnings {
        match w.level {
            WarnLevel::Warning => tracing::warn!("{}", w.message),
            WarnLevel::Error => tracing::error!("{}", w.message),
        }
    }
    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("invalid configuration; run 'deckhand config validate'");
    }
    Ok(())
}

fn print_summary(root: &Path, report: &build::BuildReport) {
    let out = report
        .out_dir
        .strip_prefix(root)
        .unwrap_or(&report.out_dir);
    let total = report.built.len() + report.failed.len();
    println!(
        "\nBuilt {} of {} decks into {}/",
        report.built.len(),
        total,
        out.display()
    );

    let nav = report
        .nav_page
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("  navigation page: /{nav}");
    if report.routing_config.is_some() {
        println!("  routing config:  /{}", paths::VERCEL_CONFIG);
    }

    if !report.built.is_empty() {
        println!();
        let rows: Vec<Vec<String>> = report
            .built
            .iter()
            .map(|e| vec![paths::route_label(&e.slug), e.title.clone(), e.file.clone()])
            .collect();
        print_table_indented(&["PATH", "TITLE", "FILE"], rows, "  ");
    }

    if !report.failed.is_empty() {
        println!("\nFailed:");
        for f in &report.failed {
            println!("  {}: {}", f.entry.file, f.error);
        }
    }

    println!("\nPreview locally: cd {} && npx serve", out.display());
}
