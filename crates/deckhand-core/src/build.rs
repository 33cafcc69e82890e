//! Build orchestration: one external build per deck, then site assembly.
//!
//! A failed deck never stops the others. It is reported in
//! [`BuildReport::failed`] and left off the navigation page.

use crate::config::Config;
use crate::error::{DeckError, Result};
use crate::paths;
use crate::runner::{self, ToolCommand};
use crate::site::{self, SiteFiles};
use crate::slides::{SlideCollection, SlideEntry};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub entry: SlideEntry,
    pub out_dir: PathBuf,
    pub base: String,
}

impl BuildTarget {
    /// Arguments appended to the configured build command.
    pub fn args(&self) -> Vec<String> {
        vec![
            "build".to_string(),
            self.entry.file.clone(),
            "--out".to_string(),
            self.out_dir.display().to_string(),
            "--base".to_string(),
            self.base.clone(),
        ]
    }
}

/// One target per deck. The main deck comes first: it builds into the site
/// root, and the slidev build may empty its out dir before writing.
pub fn plan(collection: &SlideCollection, out_dir: &Path) -> Vec<BuildTarget> {
    let (main, topics): (Vec<&SlideEntry>, Vec<&SlideEntry>) =
        collection.iter().partition(|e| e.is_main());
    main.into_iter()
        .chain(topics)
        .map(|entry| BuildTarget {
            entry: entry.clone(),
            out_dir: paths::deck_out_dir(out_dir, &entry.slug),
            base: paths::base_path(&entry.slug),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FailedBuild {
    pub entry: SlideEntry,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub out_dir: PathBuf,
    pub built: Vec<SlideEntry>,
    pub failed: Vec<FailedBuild>,
    pub nav_page: PathBuf,
    pub routing_config: Option<PathBuf>,
}

/// Build every deck in `collection` from `root` into the configured output
/// directory, which is wiped first.
pub fn run(root: &Path, config: &Config, collection: &SlideCollection) -> Result<BuildReport> {
    let primary = ToolCommand::from_argv(&config.build.command)?;
    let fallback = match &config.build.fallback {
        Some(argv) if !argv.is_empty() => Some(ToolCommand::from_argv(argv)?),
        _ => None,
    };

    let out_dir = config.out_dir(root);
    check_out_dir(root, &out_dir)?;
    crate::io::reset_dir(&out_dir)?;

    let mut built = Vec::new();
    let mut failed = Vec::new();

    for target in plan(collection, &out_dir) {
        tracing::info!(
            file = %target.entry.file,
            title = %target.entry.title,
            out = %target.out_dir.display(),
            "building deck"
        );
        match build_one(&primary, fallback.as_ref(), &target, root) {
            Ok(()) => {
                tracing::info!(title = %target.entry.title, "deck built");
                built.push(target.entry);
            }
            Err(e) => {
                tracing::error!(title = %target.entry.title, error = %e, "deck build failed");
                failed.push(FailedBuild {
                    entry: target.entry,
                    error: e.to_string(),
                });
            }
        }
    }

    let SiteFiles {
        nav_page,
        routing_config,
    } = site::write_site(
        &out_dir,
        &config.site.title,
        &built,
        config.site.vercel,
        chrono::Utc::now(),
    )?;

    Ok(BuildReport {
        out_dir,
        built,
        failed,
        nav_page,
        routing_config,
    })
}

/// Lexically resolve `.` and `..` so `dist/..` compares equal to its parent.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for c in path.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// The out dir is wiped before building, so it must not be the project root
/// or one of its ancestors.
fn check_out_dir(root: &Path, out_dir: &Path) -> Result<()> {
    let root_abs = std::fs::canonicalize(root)?;
    let out_abs = if out_dir.is_absolute() {
        normalize(out_dir)
    } else {
        normalize(&std::env::current_dir()?.join(out_dir))
    };
    // Resolve symlinks on whatever prefix of the out dir already exists.
    let out_abs = std::fs::canonicalize(&out_abs).unwrap_or(out_abs);
    if root_abs.starts_with(&out_abs) {
        return Err(DeckError::UnsafeOutDir {
            out: out_dir.to_path_buf(),
            root: root.to_path_buf(),
        });
    }
    Ok(())
}

fn build_one(
    primary: &ToolCommand,
    fallback: Option<&ToolCommand>,
    target: &BuildTarget,
    root: &Path,
) -> Result<()> {
    let args = target.args();
    let err = match runner::run_inherited(primary, &args, root) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    let Some(fallback) = fallback else {
        return Err(err);
    };
    tracing::warn!(
        error = %err,
        fallback = %fallback.display_with(&[]),
        "build failed; retrying once with fallback command"
    );
    runner::run_inherited(fallback, &args, root)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
