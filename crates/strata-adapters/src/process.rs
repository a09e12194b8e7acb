//! Running external tools to completion.

use std::process::{Command, Output, Stdio};

use tracing::{debug, error, instrument};

use strata_core::{application::ApplicationError, error::StrataResult};

/// Bytes of tool output kept for error reports.
const DIAGNOSTICS_LIMIT: usize = 4 * 1024;

/// Run `cmd` and wait for it. A non-zero exit or a spawn failure becomes
/// [`ApplicationError::ExternalToolFailure`] carrying the tool's output.
#[instrument(skip(cmd), fields(program = ?cmd.get_program()))]
pub fn run_tool(label: &str, mut cmd: Command) -> StrataResult<Output> {
    cmd.stdin(Stdio::null());

    debug!(args = ?cmd.get_args().collect::<Vec<_>>(), "spawning");
    let output = cmd.output().map_err(|e| {
        error!(err = %e, "failed to spawn");
        ApplicationError::ExternalToolFailure {
            tool: label.to_string(),
            status: None,
            diagnostics: e.to_string(),
        }
    })?;

    debug!(exit_code = ?output.status.code(), "finished");
    if !output.status.success() {
        return Err(ApplicationError::ExternalToolFailure {
            tool: label.to_string(),
            status: output.status.code(),
            diagnostics: diagnostics(&output),
        }
        .into());
    }

    Ok(output)
}

/// Trimmed stderr, or stdout when stderr is empty, cut to the last
/// [`DIAGNOSTICS_LIMIT`] bytes.
fn diagnostics(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout)
    } else {
        stderr
    };
    let text = text.trim();

    if text.len() <= DIAGNOSTICS_LIMIT {
        return text.to_string();
    }
    let mut start = text.len() - DIAGNOSTICS_LIMIT;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &text[start..])
}
