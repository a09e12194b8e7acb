use std::path::Path;

use tracing::{debug, warn};

use crate::{
    application::ports::Filesystem,
    domain::{LiteralRewrite, RewriteOutcome, RewriteResult},
    error::StrataResult,
};

/// Apply `rewrite` to the file at `path` in place.
///
/// A missing file or literal is an outcome, not an error. I/O failures
/// while reading or writing an existing file still propagate.
pub(crate) fn rewrite_file(
    filesystem: &dyn Filesystem,
    path: &Path,
    rewrite: &LiteralRewrite,
) -> StrataResult<RewriteOutcome> {
    if !filesystem.exists(path) {
        warn!(path = %path.display(), "rewrite target missing");
        return Ok(RewriteOutcome::MissingTargetFile);
    }

    let content = filesystem.read_to_string(path)?;
    let result = rewrite.apply(&content);
    let outcome = result.outcome();

    match result {
        RewriteResult::Rewritten(updated) => {
            filesystem.write_file(path, &updated)?;
            debug!(path = %path.display(), "rewrote literal");
        }
        RewriteResult::AlreadyApplied => debug!(path = %path.display(), "already rewritten"),
        RewriteResult::LiteralNotFound => {
            warn!(path = %path.display(), "expected literal not found");
        }
    }

    Ok(outcome)
}
