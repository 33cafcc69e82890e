//! Slide collection resolver.
//!
//! A directory is scanned (non-recursively) for files named
//! `[NN-]slides[-topic].md`. Each match becomes a [`SlideEntry`] with an order
//! key, a slug and a display title. The resulting [`SlideCollection`] is sorted
//! by order key and holds at most one entry per slug.

use crate::error::{DeckError, Result};
use crate::paths::MAIN_SLUG;
use crate::title;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Order key for files without a numeric prefix; they sort last.
pub const UNORDERED: u32 = 999;

static SLIDE_FILE_RE: OnceLock<Regex> = OnceLock::new();

fn slide_file_re() -> &'static Regex {
    SLIDE_FILE_RE.get_or_init(|| Regex::new(r"^(?:(\d{2})-)?slides(?:-([^.]+))?\.md$").unwrap())
}

// ---------------------------------------------------------------------------
// SlideMatch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideMatch {
    Matched {
        order: u32,
        slug: String,
        topic: Option<String>,
    },
    Unmatched,
}

/// Classify a bare filename against the slide naming convention.
pub fn classify(filename: &str) -> SlideMatch {
    let Some(caps) = slide_file_re().captures(filename) else {
        return SlideMatch::Unmatched;
    };
    let order = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(UNORDERED);
    let topic = caps.get(2).map(|m| m.as_str().to_string());
    let slug = topic.clone().unwrap_or_else(|| MAIN_SLUG.to_string());
    SlideMatch::Matched { order, slug, topic }
}

// ---------------------------------------------------------------------------
// SlideEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideEntry {
    pub file: String,
    pub slug: String,
    pub title: String,
    pub order: u32,
}

impl SlideEntry {
    pub fn is_main(&self) -> bool {
        self.slug == MAIN_SLUG
    }
}

// ---------------------------------------------------------------------------
// SlideCollection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlideCollection {
    entries: Vec<SlideEntry>,
}

impl SlideCollection {
    /// Scan `dir` and build the collection. Fails only if the directory
    /// itself cannot be listed; an empty result is `Ok` and `is_empty()`.
    pub fn resolve(dir: &Path) -> Result<Self> {
        let read_dir_err = |source| DeckError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            // Follows symlinks, so a linked slide file still counts.
            if !entry.path().is_file() {
                continue;
            }
            // Non-UTF-8 names can never match the convention.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(Self::from_listing(dir, names))
    }

    /// Build the collection from filenames in their enumeration order.
    /// Titles are read from `dir/<name>`.
    pub fn from_listing<I, S>(dir: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<SlideEntry> = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let SlideMatch::Matched { order, slug, topic } = classify(name) else {
                    return None;
                };
                let title = title::read_title(&dir.join(name))
                    .unwrap_or_else(|| title::fallback_title(topic.as_deref()));
                tracing::debug!(file = name, %slug, %title, "found slide file");
                Some(SlideEntry {
                    file: name.to_string(),
                    slug,
                    title,
                    order,
                })
            })
            .collect();

        // Vec::sort_by_key is stable: equal keys keep enumeration order.
        entries.sort_by_key(|e| e.order);

        let mut seen: HashMap<String, String> = HashMap::new();
        entries.retain(|e| match seen.get(&e.slug) {
            Some(kept) => {
                tracing::warn!(
                    slug = %e.slug,
                    kept = %kept,
                    dropped = %e.file,
                    "duplicate slug; keeping the first file"
                );
                false
            }
            None => {
                seen.insert(e.slug.clone(), e.file.clone());
                true
            }
        });

        Self { entries }
    }

    pub fn entries(&self) -> &[SlideEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SlideEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&SlideEntry> {
        self.entries.iter().find(|e| e.slug == slug)
    }
}

impl<'a> IntoIterator for &'a SlideCollection {
    type Item = &'a SlideEntry;
    type IntoIter = std::slice::Iter<'a, SlideEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
