//! End-to-end generation pipeline

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::application::flatten::FlattenService;
use crate::application::loader::load_document;
use crate::application::prune::{detach_nodes, select_excluded};
use crate::application::staging::stage_document;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::Finger;
use crate::infrastructure::traits::CommandRunner;

/// Outcome of a successful run, for reporting.
#[derive(Debug)]
pub struct GenerateReport {
    /// Number of subtrees detached from the source document
    pub removed: usize,
    /// Whether a temporary staged document was used
    pub staged: bool,
    /// Captured stdout of the flattening tool
    pub tool_stdout: String,
}

/// Orchestrates load, prune, staging, flattening and cleanup.
pub struct GenerateService {
    flatten: FlattenService,
}

impl GenerateService {
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self {
            flatten: FlattenService::new(cmd, settings),
        }
    }

    /// Generate `output` from `input`, excluding the given finger modules.
    ///
    /// The input file on disk is never modified. The staged artifact, if
    /// one was created, is removed on every exit path, including when the
    /// flattening tool fails.
    pub fn generate(
        &self,
        input: &Path,
        output: &Path,
        exclude: &BTreeSet<Finger>,
    ) -> ApplicationResult<GenerateReport> {
        info!("generate: {} -> {}", input.display(), output.display());

        let mut doc = load_document(input)?;

        let selected = select_excluded(&doc, exclude);
        let removed = detach_nodes(&mut doc, &selected);
        if removed > 0 {
            info!("generate: removed {} excluded module subtrees", removed);
        }

        let staged = stage_document(&doc, input, removed)?;
        let used_staging = staged.is_staged();

        // Cleanup runs whether or not the tool succeeded.
        let result = self.flatten.flatten(staged.path(), output);
        staged.cleanup();
        let tool_stdout = result?;

        Ok(GenerateReport {
            removed,
            staged: used_staging,
            tool_stdout,
        })
    }
}
