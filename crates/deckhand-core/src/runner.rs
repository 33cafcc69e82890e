//! Invocation of the external slide-building tool.
//!
//! Commands come from config as argv lists (`["npx", "slidev"]`); callers
//! append per-deck arguments. Output is inherited so the tool's own progress
//! output reaches the terminal unchanged.

use crate::error::{DeckError, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Build from a config argv list. The first element is the program.
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| DeckError::EmptyCommand(format!("{argv:?}")))?;
        if program.trim().is_empty() {
            return Err(DeckError::EmptyCommand(format!("{argv:?}")));
        }
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Whether the program can be found on `PATH`.
    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    /// A `std::process::Command` with the leading args plus `extra`, run in `cwd`.
    pub fn command<I, S>(&self, extra: I, cwd: &Path) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).args(extra).current_dir(cwd);
        cmd
    }

    /// Render for logs: `npx slidev build slides.md`.
    pub fn display_with(&self, extra: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(extra.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Run `cmd` with `extra` args to completion, stdio inherited.
///
/// Spawn failure maps to [`DeckError::ToolSpawn`], a non-zero exit to
/// [`DeckError::ToolFailed`].
pub fn run_inherited(cmd: &ToolCommand, extra: &[String], cwd: &Path) -> Result<()> {
    let rendered = cmd.display_with(extra);
    tracing::debug!(command = %rendered, cwd = %cwd.display(), "running");

    let status = cmd
        .command(extra, cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| DeckError::ToolSpawn {
            program: cmd.program.clone(),
            source,
        })?;

    if !status.success() {
        return Err(DeckError::ToolFailed {
            command: rendered,
            status: status.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_argv_splits_program() {
        let cmd = ToolCommand::from_argv(&argv(&["npx", "slidev"])).unwrap();
        assert_eq!(cmd.program, "npx");
        assert_eq!(cmd.args, ["slidev"]);
    }

    #[test]
    fn from_argv_rejects_empty() {
        assert!(matches!(
            ToolCommand::from_argv(&[]),
            Err(DeckError::EmptyCommand(_))
        ));
        assert!(matches!(
            ToolCommand::from_argv(&argv(&["  "])),
            Err(DeckError::EmptyCommand(_))
        ));
    }

    #[test]
    fn display_joins_all_parts() {
        let cmd = ToolCommand::from_argv(&argv(&["npx", "slidev"])).unwrap();
        assert_eq!(
            cmd.display_with(&argv(&["build", "slides.md"])),
            "npx slidev build slides.md"
        );
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let cmd = ToolCommand::from_argv(&argv(&["deckhand-no-such-program-xyz"])).unwrap();
        assert!(!cmd.is_available());
        let err = run_inherited(&cmd, &[], dir.path()).unwrap_err();
        assert!(matches!(err, DeckError::ToolSpawn { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_checked() {
        let dir = TempDir::new().unwrap();
        let ok = ToolCommand::from_argv(&argv(&["true"])).unwrap();
        run_inherited(&ok, &argv(&["ignored"]), dir.path()).unwrap();

        let bad = ToolCommand::from_argv(&argv(&["false"])).unwrap();
        let err = run_inherited(&bad, &[], dir.path()).unwrap_err();
        assert!(matches!(err, DeckError::ToolFailed { .. }), "{err:?}");
    }
}
