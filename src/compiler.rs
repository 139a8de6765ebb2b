//! External Java compiler
//!
//! Runs `javac` as a black box with a bounded wait. Whatever happens to the
//! subprocess is reported as a [`CompileOutcome`]; only failures to set up
//! the attempt itself (runtime, scratch directory) are errors.

use std::io;
use std::path::Path;
use std::time::Duration;

use tokio::process::Command;

pub const DEFAULT_COMPILER: &str = "javac";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What happened when we tried to compile a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Success,
    /// The compiler ran and rejected the file; carries its stderr
    Failed(String),
    /// The compiler did not finish within the timeout and was killed
    TimedOut(Duration),
    /// The compiler could not be started
    Unavailable(String),
}

/// A compiler binary plus the limits it runs under
#[derive(Debug, Clone)]
pub struct JavaCompiler {
    program: String,
    timeout: Duration,
}

impl Default for JavaCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER, DEFAULT_TIMEOUT)
    }
}

impl JavaCompiler {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Compile `file` for `java_version`, discarding class files
    pub fn compile(&self, file: &Path, java_version: u32) -> io::Result<CompileOutcome> {
        let out_dir = tempfile::tempdir()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let version = java_version.to_string();
        let mut command = Command::new(&self.program);
        command
            .arg("-source")
            .arg(&version)
            .arg("-target")
            .arg(&version)
            .arg("-d")
            .arg(out_dir.path())
            .arg(file)
            .kill_on_drop(true);

        log::debug!(
            "Running {} on {} (timeout {:?})",
            self.program,
            file.display(),
            self.timeout
        );

        let outcome = runtime.block_on(async {
            match tokio::time::timeout(self.timeout, command.output()).await {
                Err(_) => CompileOutcome::TimedOut(self.timeout),
                Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
                    CompileOutcome::Unavailable(format!("{} not found in PATH", self.program))
                }
                Ok(Err(e)) => CompileOutcome::Unavailable(format!(
                    "Failed to run {}: {}",
                    self.program, e
                )),
                Ok(Ok(output)) if output.status.success() => CompileOutcome::Success,
                Ok(Ok(output)) => CompileOutcome::Failed(
                    String::from_utf8_lossy(&output.stderr).trim().to_string(),
                ),
            }
        });

        Ok(outcome)
    }
}

/// Write an executable shell script named `name` standing in for `javac`
#[cfg(all(test, unix))]
pub(crate) fn fake_compiler(dir: &Path, name: &str, script: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path.display().to_string()
}
