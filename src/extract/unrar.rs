//! External RAR tool capability
//!
//! Narrow interface over the system `unrar` binary so the extraction
//! path can be exercised in tests without a real executable.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Capability interface for the external RAR extraction tool
pub trait RarTool: Send + Sync {
    /// Tool name or path, used in error messages
    fn name(&self) -> &str;

    /// Resolve the tool to an executable path, if present
    fn locate(&self) -> Option<PathBuf>;

    /// Extract the whole archive into `out_dir`, blocking until the
    /// tool exits
    fn extract(&self, archive: &Path, out_dir: &Path) -> io::Result<()>;
}

/// RAR tool resolved from PATH, or from an explicit path override
pub struct SystemRarTool {
    program: String,
}

impl SystemRarTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemRarTool {
    fn default() -> Self {
        Self::new("unrar")
    }
}

impl RarTool for SystemRarTool {
    fn name(&self) -> &str {
        &self.program
    }

    fn locate(&self) -> Option<PathBuf> {
        let program = Path::new(&self.program);

        // An override containing a path separator is checked directly
        if program.components().count() > 1 {
            return is_executable(program).then(|| program.to_path_buf());
        }

        let paths = std::env::var_os("PATH")?;
        std::env::split_paths(&paths)
            .map(|dir| dir.join(&self.program))
            .find(|candidate| is_executable(candidate))
    }

    fn extract(&self, archive: &Path, out_dir: &Path) -> io::Result<()> {
        // unrar x <archive> <outdir> keeps the archive's directory layout
        let status = Command::new(&self.program)
            .arg("x")
            .arg(archive)
            .arg(out_dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        if !status.success() {
            return Err(io::Error::other(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// A regular file counts as the tool only if it can actually be run
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}
