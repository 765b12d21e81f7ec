//! Staged document lifecycle: temp-file creation and guaranteed cleanup

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::application::writer::write_document;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Document;

/// Document path handed to the flattening tool.
///
/// Owns the temporary file when edits were staged; [`cleanup`](Self::cleanup)
/// (or drop, as a backstop) removes it. The caller's original input is
/// never owned here and never deleted.
#[derive(Debug)]
pub enum StagedDocument {
    /// No edits: the original input passes through untouched.
    Original(PathBuf),
    /// Edited tree serialized to a temporary file.
    Staged(NamedTempFile),
}

impl StagedDocument {
    pub fn path(&self) -> &Path {
        match self {
            Self::Original(p) => p,
            Self::Staged(f) => f.path(),
        }
    }

    pub fn is_staged(&self) -> bool {
        matches!(self, Self::Staged(_))
    }

    /// Remove the temporary artifact, if one was created.
    ///
    /// Deletion failures are logged and swallowed; cleanup must not mask
    /// the pipeline result.
    pub fn cleanup(self) {
        match self {
            Self::Original(_) => {}
            Self::Staged(file) => {
                let path = file.path().to_path_buf();
                if let Err(e) = file.close() {
                    warn!(
                        "cleanup: failed to remove staged file {}: {}",
                        path.display(),
                        e
                    );
                } else {
                    debug!("cleanup: removed staged file {}", path.display());
                }
            }
        }
    }
}

/// Stage the document for flattening.
///
/// With `removed == 0` the original `input` path is reused and no file is
/// created. Otherwise the edited tree is serialized to a fresh
/// `handgen-*.xacro` temp file owned by the returned value.
pub fn stage_document(
    doc: &Document,
    input: &Path,
    removed: usize,
) -> ApplicationResult<StagedDocument> {
    if removed == 0 {
        debug!(
            "stage_document: no edits, passing through {}",
            input.display()
        );
        return Ok(StagedDocument::Original(input.to_path_buf()));
    }

    let bytes = write_document(doc).map_err(|e| ApplicationError::Staging {
        context: "serialize edited document".into(),
        source: e,
    })?;

    let mut file = tempfile::Builder::new()
        .prefix("handgen-")
        .suffix(".xacro")
        .tempfile()
        .map_err(|e| ApplicationError::Staging {
            context: "create temp file".into(),
            source: e,
        })?;
    file.write_all(&bytes).map_err(|e| ApplicationError::Staging {
        context: format!("write staged document {}", file.path().display()),
        source: e,
    })?;

    debug!("stage_document: staged edited document at {}", file.path().display());
    Ok(StagedDocument::Staged(file))
}
