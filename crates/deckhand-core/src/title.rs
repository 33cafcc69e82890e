//! Display titles for slide decks.
//!
//! A title comes from the first of:
//! 1. a `title:` key in the leading `---` front-matter block,
//! 2. the first level-1 heading outside code fences,
//! 3. the topic suffix of the filename, title-cased (see [`fallback_title`]).

use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

/// Title used for `slides.md` when neither front matter nor a heading names it.
pub const DEFAULT_TITLE: &str = "Main Presentation";

static H1_RE: OnceLock<Regex> = OnceLock::new();

fn h1_re() -> &'static Regex {
    H1_RE.get_or_init(|| Regex::new(r"^#[ \t]+(.+)$").unwrap())
}

// ---------------------------------------------------------------------------
// Front matter
// ---------------------------------------------------------------------------

/// Split `content` into `(frontmatter, body)` if it opens with a `---` line
/// and a later `---` line closes the block. Unterminated blocks yield `None`.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let first_end = content.find('\n')?;
    if content[..first_end].trim_end() != "---" {
        return None;
    }
    let rest = &content[first_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// The part of a deck's headmatter this crate reads. Other keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct Headmatter {
    #[serde(default, alias = "Title")]
    title: Option<serde_yaml::Value>,
}

fn frontmatter_title(frontmatter: &str) -> Option<String> {
    let fm: Headmatter = if frontmatter.trim().is_empty() {
        Headmatter::default()
    } else {
        serde_yaml::from_str(frontmatter).unwrap_or_default()
    };
    let title = match fm.title? {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

// ---------------------------------------------------------------------------
// Headings
// ---------------------------------------------------------------------------

fn first_heading(body: &str) -> Option<String> {
    let mut in_fence = false;
    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = h1_re().captures(line) {
            let text = caps[1].trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Extract a title from slide source text. `None` means the caller should
/// fall back to [`fallback_title`].
pub fn extract_title(content: &str) -> Option<String> {
    match split_frontmatter(content) {
        Some((fm, body)) => frontmatter_title(fm).or_else(|| first_heading(body)),
        None => first_heading(content),
    }
}

/// Read `path` and extract its title. Read failures are logged and treated
/// as "no title found".
pub fn read_title(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => extract_title(&content),
        Err(e) => {
            tracing::warn!(
                file = %path.display(),
                error = %e,
                "cannot read slide file; using fallback title"
            );
            None
        }
    }
}

/// Title-case each hyphen-separated word of `topic`, e.g. `my-topic` -> `My Topic`.
pub fn fallback_title(topic: Option<&str>) -> String {
    let Some(topic) = topic else {
        return DEFAULT_TITLE.to_string();
    };
    let title = topic
        .split('-')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
