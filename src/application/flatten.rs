//! Flattening tool invocation

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::infrastructure::traits::CommandRunner;

/// Invokes the external flattening tool against a staged document.
pub struct FlattenService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl FlattenService {
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self { cmd, settings }
    }

    /// Flatten `input` into `output`.
    ///
    /// Blocks until the tool exits; there is no timeout. Returns the
    /// captured stdout on success. A missing or unexecutable tool and a
    /// tool that ran but exited non-zero are distinct failures; the latter
    /// carries the tool's stderr verbatim.
    pub fn flatten(&self, input: &Path, output: &Path) -> ApplicationResult<String> {
        let tool = self.settings.flatten_tool.as_str();
        let input_arg = input.to_string_lossy();
        let output_arg = output.to_string_lossy();
        let args = [
            input_arg.as_ref(),
            "--remove-root-link",
            self.settings.remove_root_link.as_str(),
            "--tree",
            "-o",
            output_arg.as_ref(),
        ];
        debug!("flatten: {} {}", tool, args.join(" "));

        let result = self.cmd.run(tool, &args).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                ApplicationError::ToolNotFound {
                    tool: tool.to_string(),
                }
            }
            _ => ApplicationError::ToolExecutionFailed {
                tool: tool.to_string(),
                exit_code: None,
                stderr: e.to_string(),
            },
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
            return Err(ApplicationError::ToolExecutionFailed {
                tool: tool.to_string(),
                exit_code: result.status.code(),
                stderr,
            });
        }

        debug!("flatten: {} succeeded", tool);
        Ok(String::from_utf8_lossy(&result.stdout).into_owned())
    }
}
