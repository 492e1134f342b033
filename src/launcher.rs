use crate::error::{Result, RevealError};
use crate::process::ProcessRunner;
use crate::target::ExplorerTarget;
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::debug;

const SELECT_FLAG: &str = "/select,";

/// Starts the Windows file manager for a decided target.
pub struct Launcher {
    program: String,
    runner: Arc<dyn ProcessRunner>,
}

impl Launcher {
    pub fn new(program: impl Into<String>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    pub fn args_for(target: &ExplorerTarget) -> Vec<String> {
        if target.select {
            vec![SELECT_FLAG.to_string(), target.path.clone()]
        } else {
            vec![target.path.clone()]
        }
    }

    /// explorer.exe exits non-zero even when the window opens, so only a failure
    /// to start counts. Start failures other than missing/not-executable are dropped.
    pub async fn open(&self, target: &ExplorerTarget) -> Result<()> {
        let args = Self::args_for(target);
        match self.runner.run(&self.program, &args).await {
            Ok(output) => {
                debug!(program = %self.program, code = ?output.code, "launcher exited");
                Ok(())
            }
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Err(RevealError::LauncherNotFound(self.program.clone())),
                ErrorKind::PermissionDenied => {
                    Err(RevealError::LauncherNotExecutable(self.program.clone()))
                }
                _ => {
                    debug!(program = %self.program, error = %err, "ignoring launcher start error");
                    Ok(())
                }
            },
        }
    }
}
