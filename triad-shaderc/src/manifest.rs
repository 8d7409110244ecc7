//! Batch job manifests.
//!
//! A manifest is a JSON list of jobs, each naming one shader file and the
//! variant to produce for it:
//!
//! ```json
//! [
//!   { "input": "blit.vert", "stage": "vertex", "backend": "gles3" },
//!   { "input": "blit.frag", "output": "out/blit.frag", "stage": "fragment",
//!     "backend": "vulkan", "defines": ["MULTIVIEW"] }
//! ]
//! ```

use crate::errors::ShadercError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use triad_shader::{Backend, DefineSet, ShadingStage};

/// One shader variant to translate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub input: PathBuf,
    /// Printed to stdout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub stage: ShadingStage,
    pub backend: Backend,
    #[serde(default)]
    pub defines: DefineSet,
}

impl Job {
    /// Resolve relative paths against the manifest's directory.
    fn rebase(mut self, base: &Path) -> Self {
        if self.input.is_relative() {
            self.input = base.join(&self.input);
        }
        if let Some(output) = self.output.take() {
            self.output = Some(if output.is_relative() { base.join(output) } else { output });
        }
        self
    }
}

pub fn parse(text: &str) -> Result<Vec<Job>, ShadercError> {
    Ok(serde_json::from_str(text)?)
}

/// Load a manifest file. Relative job paths are taken relative to it.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<Vec<Job>, ShadercError> {
    let text = std::fs::read_to_string(path).map_err(|e| ShadercError::io(path, e))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let jobs: Vec<Job> = parse(&text)?.into_iter().map(|job| job.rebase(base)).collect();
    tracing::debug!("Loaded {} jobs", jobs.len());
    Ok(jobs)
}
