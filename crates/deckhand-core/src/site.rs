//! Static site assembly: the navigation page linking every built deck and
//! the Vercel routing config.

use crate::error::Result;
use crate::paths::{self, MAIN_SLUG};
use crate::slides::SlideEntry;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Files written by [`write_site`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFiles {
    pub nav_page: PathBuf,
    pub routing_config: Option<PathBuf>,
}

/// `index.html`, unless a main deck already occupies the site root.
pub fn nav_page_name(built: &[SlideEntry]) -> &'static str {
    if built.iter().any(SlideEntry::is_main) {
        paths::NAV_PAGE_ALT
    } else {
        paths::NAV_PAGE
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Navigation page
// ---------------------------------------------------------------------------

const NAV_STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 1000px; margin: 0 auto; padding: 40px 20px; line-height: 1.6; color: #333; background: #f8f9fa; }
    .header { text-align: center; margin-bottom: 50px; padding: 30px; background: #fff; border-radius: 12px; box-shadow: 0 2px 8px rgba(0,0,0,0.05); }
    .header h1 { font-size: 2.5rem; margin-bottom: 10px; color: #2c3e50; }
    .header p { color: #666; font-size: 1.1rem; }
    .cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 25px; }
    .card { display: block; background: #fff; border-radius: 12px; padding: 25px; box-shadow: 0 4px 12px rgba(0,0,0,0.08); border: 1px solid #e9ecef; text-decoration: none; color: inherit; transition: all 0.2s ease; }
    .card:hover { transform: translateY(-3px); box-shadow: 0 8px 20px rgba(0,0,0,0.12); border-color: #3ab9d5; }
    .card-title { font-size: 1.3rem; margin: 0 0 10px 0; color: #2c3e50; font-weight: 600; }
    .card-description { color: #666; margin: 0 0 15px 0; font-size: 0.95rem; }
    .card-path { font-size: 0.85rem; color: #3ab9d5; font-family: 'SF Mono', 'Fira Code', monospace; background: #f1faff; padding: 4px 8px; border-radius: 4px; display: inline-block; }
    .footer { text-align: center; margin-top: 50px; padding-top: 20px; border-top: 1px solid #e9ecef; color: #888; font-size: 0.9rem; }
    .footer a { color: #3ab9d5; text-decoration: none; }
    @media (max-width: 768px) { .cards { grid-template-columns: 1fr; } .header h1 { font-size: 2rem; } body { padding: 20px 15px; } }
"#;

pub fn render_nav_page(site_title: &str, built: &[SlideEntry], generated_at: DateTime<Utc>) -> String {
    let site_title = escape_html(site_title);
    let count = built.len();
    let noun = if count == 1 { "deck" } else { "decks" };

    let mut cards = String::new();
    for deck in built {
        let title = if deck.title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            escape_html(&deck.title)
        };
        // Writing to a String cannot fail.
        let _ = write!(
            cards,
            r#"
    <a href="{href}" class="card">
      <h3 class="card-title">{title}</h3>
      <p class="card-description">Open the {title} slides</p>
      <span class="card-path">{route}</span>
    </a>"#,
            href = escape_html(&paths::nav_href(&deck.slug)),
            route = escape_html(&paths::route_label(&deck.slug)),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{site_title}</title>
  <style>{NAV_STYLE}  </style>
</head>
<body>
  <div class="header">
    <h1>{site_title}</h1>
    <p>{count} {noun} to check out</p>
  </div>

  <div class="cards">{cards}
  </div>

  <div class="footer">
    <p>Built with <a href="https://sli.dev" target="_blank">Slidev</a></p>
    <p>Generated {generated}</p>
  </div>
</body>
</html>
"#,
        generated = generated_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

// ---------------------------------------------------------------------------
// Routing config
// ---------------------------------------------------------------------------

/// `vercel.json` content: each deck is a single-page app under its base path,
/// so deep links rewrite to that deck's `index.html`.
pub fn routing_config(built: &[SlideEntry]) -> Value {
    let mut rewrites: Vec<Value> = built
        .iter()
        .filter(|d| !d.is_main())
        .map(|d| {
            json!({
                "source": format!("/{}/(.*)", d.slug),
                "destination": format!("/{}/index.html", d.slug),
            })
        })
        .collect();

    if built.iter().any(|d| d.slug == MAIN_SLUG) {
        rewrites.push(json!({
            "source": "/(.*)",
            "destination": "/index.html",
        }));
    }

    json!({
        "cleanUrls": false,
        "trailingSlash": true,
        "rewrites": rewrites,
    })
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

pub fn write_site(
    out_dir: &Path,
    site_title: &str,
    built: &[SlideEntry],
    vercel: bool,
    generated_at: DateTime<Utc>,
) -> Result<SiteFiles> {
    let nav_page = out_dir.join(nav_page_name(built));
    let html = render_nav_page(site_title, built, generated_at);
    crate::io::atomic_write(&nav_page, html.as_bytes())?;

    let routing_config = if vercel {
        let path = out_dir.join(paths::VERCEL_CONFIG);
        let data = serde_json::to_string_pretty(&routing_config(built))?;
        crate::io::atomic_write(&path, data.as_bytes())?;
        Some(path)
    } else {
        None
    };

    Ok(SiteFiles {
        nav_page,
        routing_config,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
