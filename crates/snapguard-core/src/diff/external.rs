use super::DiffRenderer;
use crate::config::DiffConfig;
use crate::errors::{Result, SnapguardError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

/// Runs `<program> -u <expected> <saved>` over two scratch files.
///
/// Scratch files live in the system temp dir unless a scratch directory is
/// configured, never in the baseline store, and are removed when rendering
/// returns on any path.
#[derive(Debug, Clone)]
pub struct ExternalDiffRenderer {
    program: String,
    scratch_dir: Option<PathBuf>,
}

impl ExternalDiffRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            scratch_dir: None,
        }
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn from_config(config: &DiffConfig) -> Self {
        Self {
            program: config.program.clone(),
            scratch_dir: config.scratch_dir.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn scratch_file(&self, prefix: &str, contents: &str) -> Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix).suffix(".txt");
        let created = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        let mut file = created.map_err(|e| SnapguardError::ScratchFile {
            message: format!("create {}: {}", prefix, e),
        })?;
        file.write_all(contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| SnapguardError::ScratchFile {
                message: format!("write {}: {}", display(file.path()), e),
            })?;
        Ok(file)
    }
}

impl Default for ExternalDiffRenderer {
    fn default() -> Self {
        Self::new("diff")
    }
}

impl DiffRenderer for ExternalDiffRenderer {
    fn render(&self, expected: &str, stored: &str) -> Result<String> {
        let expected_file = self.scratch_file("EXPECTED_", expected)?;
        let saved_file = self.scratch_file("SAVED_", stored)?;

        let output = Command::new(&self.program)
            .arg("-u")
            .arg(expected_file.path())
            .arg(saved_file.path())
            .output()
            .map_err(|e| SnapguardError::DiffProgramFailed {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        // diff exits 0 (same) or 1 (different); anything else is trouble
        match output.status.code() {
            Some(0) | Some(1) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            code => Err(SnapguardError::DiffProgramFailed {
                program: self.program.clone(),
                reason: match code {
                    Some(code) => format!(
                        "exit status {}: {}",
                        code,
                        String::from_utf8_lossy(&output.stderr).trim()
                    ),
                    None => "terminated by signal".to_string(),
                },
            }),
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn diff_available() -> bool {
        Command::new("diff").arg("--version").output().is_ok()
    }

    #[test]
    fn test_renders_unified_diff() {
        if !diff_available() {
            return;
        }
        let rendered = ExternalDiffRenderer::default().render("2\n", "1\n").unwrap();
        assert!(rendered.contains("EXPECTED_"));
        assert!(rendered.contains("SAVED_"));
        assert!(rendered.contains("-2"));
        assert!(rendered.contains("+1"));
    }

    #[test]
    fn test_scratch_files_are_removed() {
        if !diff_available() {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let renderer = ExternalDiffRenderer::default().with_scratch_dir(scratch.path());

        renderer.render("a\n", "b\n").unwrap();

        assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let scratch = TempDir::new().unwrap();
        let renderer = ExternalDiffRenderer::new("snapguard-no-such-diff-program")
            .with_scratch_dir(scratch.path());

        let err = renderer.render("a", "b").unwrap_err();

        assert!(matches!(err, SnapguardError::DiffProgramFailed { .. }));
        assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_scratch_dir_is_an_error() {
        let renderer =
            ExternalDiffRenderer::default().with_scratch_dir("/nonexistent/snapguard/scratch");
        let err = renderer.render("a", "b").unwrap_err();
        assert!(matches!(err, SnapguardError::ScratchFile { .. }));
    }
}
