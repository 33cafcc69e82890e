use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "deckhand.yaml";
pub const DEFAULT_OUT_DIR: &str = "dist";

pub const NAV_PAGE: &str = "index.html";
/// Used instead of `NAV_PAGE` when the main deck already owns the site root.
pub const NAV_PAGE_ALT: &str = "decks.html";
pub const VERCEL_CONFIG: &str = "vercel.json";

/// Slug given to `slides.md` / `NN-slides.md`, which have no topic suffix.
pub const MAIN_SLUG: &str = "main";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Output directory for one deck: the site root for `main`, `<out>/<slug>` otherwise.
pub fn deck_out_dir(out_dir: &Path, slug: &str) -> PathBuf {
    if slug == MAIN_SLUG {
        out_dir.to_path_buf()
    } else {
        out_dir.join(slug)
    }
}

/// The `--base` a deck is built with, e.g. `/` or `/intro/`.
pub fn base_path(slug: &str) -> String {
    if slug == MAIN_SLUG {
        "/".to_string()
    } else {
        format!("/{slug}/")
    }
}

/// Relative link from the navigation page to a deck.
pub fn nav_href(slug: &str) -> String {
    if slug == MAIN_SLUG {
        "./".to_string()
    } else {
        format!("./{slug}/")
    }
}

/// Human-facing route shown on cards and in the build summary.
pub fn route_label(slug: &str) -> String {
    if slug == MAIN_SLUG {
        "/".to_string()
    } else {
        format!("/{slug}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
