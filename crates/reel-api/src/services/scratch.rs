//! Per-request scratch directory.
//!
//! The directory and everything in it is removed when the [`ScratchArea`] is
//! released or dropped, which covers early returns, propagated faults, panics
//! and cancellation of the request future.

use reel_core::AppError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DIR_PREFIX: &str = "reel-";
const INPUT_FILE_NAME: &str = "input_video";
const OUTPUT_FILE_NAME: &str = "output_video.mp4";

pub struct ScratchArea {
    dir: TempDir,
    input_path: PathBuf,
    output_path: PathBuf,
}

impl ScratchArea {
    /// Create a uniquely named directory under `root` (or the system temp dir).
    pub fn acquire(root: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(DIR_PREFIX);

        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| AppError::Scratch(format!("Failed to create scratch directory: {}", e)))?;

        let input_path = dir.path().join(INPUT_FILE_NAME);
        let output_path = dir.path().join(OUTPUT_FILE_NAME);

        tracing::debug!(path = %dir.path().display(), "Scratch area acquired");

        Ok(Self {
            dir,
            input_path,
            output_path,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Remove the directory now, logging (not failing on) removal errors.
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "Scratch area released"),
            Err(e) => tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to remove scratch area"
            ),
        }
    }
}
