use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Heading of the generated navigation page.
    #[serde(default = "default_site_title")]
    pub title: String,
    /// Output directory, relative to the project root.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    /// Emit `vercel.json` next to the navigation page.
    #[serde(default = "default_true")]
    pub vercel: bool,
}

fn default_site_title() -> String {
    "Slide Decks".to_string()
}

fn default_out_dir() -> String {
    paths::DEFAULT_OUT_DIR.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            out_dir: default_out_dir(),
            vercel: true,
        }
    }
}

// ---------------------------------------------------------------------------
// BuildConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Program and leading args; `build <file> --out <dir> --base <base>` is appended.
    #[serde(default = "default_slidev_command")]
    pub command: Vec<String>,
    /// Tried once for a deck whose primary build failed. `null` disables it.
    #[serde(default = "default_fallback_command")]
    pub fallback: Option<Vec<String>>,
}

fn default_slidev_command() -> Vec<String> {
    vec!["npx".to_string(), "slidev".to_string()]
}

fn default_fallback_command() -> Option<Vec<String>> {
    Some(vec![
        "npx".to_string(),
        "--yes".to_string(),
        "@slidev/cli".to_string(),
    ])
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: default_slidev_command(),
            fallback: default_fallback_command(),
        }
    }
}

// ---------------------------------------------------------------------------
// DevConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// Program and leading args; `<file> --port <port>` is appended.
    #[serde(default = "default_slidev_command")]
    pub command: Vec<String>,
    #[serde(default = "default_base_port")]
    pub base_port: u16,
}

fn default_base_port() -> u16 {
    3030
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            command: default_slidev_command(),
            base_port: default_base_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub dev: DevConfig,
}

impl Config {
    /// Load `deckhand.yaml` from `root`, or defaults when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        // An empty file parses as YAML null.
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn out_dir(&self, root: &Path) -> std::path::PathBuf {
        root.join(&self.site.out_dir)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.build.command.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "build.command is empty".to_string(),
            });
        }
        if matches!(&self.build.fallback, Some(f) if f.is_empty()) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "build.fallback is an empty list; use null to disable it".to_string(),
            });
        }
        if self.dev.command.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "dev.command is empty".to_string(),
            });
        }
        if self.dev.base_port == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "dev.base_port must be greater than 0".to_string(),
            });
        } else if self.dev.base_port < 1024 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "dev.base_port={} is a privileged port",
                    self.dev.base_port
                ),
            });
        }

        // The output directory is wiped on every build.
        let out = Path::new(&self.site.out_dir);
        let escapes = out.is_absolute()
            || out
                .components()
                .any(|c| matches!(c, Component::ParentDir));
        let is_root = out
            .components()
            .all(|c| matches!(c, Component::CurDir));
        if self.site.out_dir.trim().is_empty() || is_root {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "site.out_dir must name a subdirectory of the project root".to_string(),
            });
        } else if escapes {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "site.out_dir '{}' must be a relative path inside the project root (it is deleted on build)",
                    self.site.out_dir
                ),
            });
        }

        warnings
    }

    pub fn has_errors(&self) -> bool {
        self.validate()
            .iter()
            .any(|w| w.level == WarnLevel::Error)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
