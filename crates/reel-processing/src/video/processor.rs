//! FFmpeg processor - remuxes the input into an MP4 container

use crate::traits::{ProcessOutcome, VideoProcessor};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Validate that a path doesn't contain shell metacharacters or dangerous sequences
fn validate_path(path: &str) -> Result<()> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(anyhow!("Path contains dangerous characters: {}", path));
    }

    if path.contains("..") {
        return Err(anyhow!("Path contains directory traversal: {}", path));
    }

    Ok(())
}

/// Sibling path ffmpeg writes to before the result is moved into place.
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".partial.mp4");
    output.with_file_name(name)
}

pub struct FfmpegProcessor {
    ffmpeg_path: String,
}

impl FfmpegProcessor {
    pub fn new(ffmpeg_path: String) -> Result<Self> {
        validate_path(&ffmpeg_path)
            .context("Invalid ffmpeg_path: contains dangerous characters")?;

        if !ffmpeg_path.chars().all(|c| {
            c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
        }) {
            return Err(anyhow!("Invalid ffmpeg_path: contains unsafe characters"));
        }

        Ok(Self { ffmpeg_path })
    }

    fn remux_args(input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "error", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(input.as_os_str().to_os_string());
        args.extend(
            ["-map", "0", "-c", "copy", "-movflags", "+faststart", "-f", "mp4"]
                .iter()
                .map(OsString::from),
        );
        args.push(output.as_os_str().to_os_string());
        args
    }

    async fn discard(path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(error = %e, path = %path.display(), "Failed to remove partial output");
            }
        }
    }
}

#[async_trait]
impl VideoProcessor for FfmpegProcessor {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "remux"
    ))]
    async fn process(&self, input: &Path, output: &Path) -> Result<ProcessOutcome> {
        let start = std::time::Instant::now();
        let partial = partial_path(output);

        let result = Command::new(&self.ffmpeg_path)
            .args(Self::remux_args(input, &partial))
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", self.ffmpeg_path))?;

        if !result.status.success() {
            Self::discard(&partial).await;
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            tracing::error!(
                status = ?result.status.code(),
                stderr = %stderr,
                "ffmpeg remux failed"
            );
            return Ok(ProcessOutcome::failed(format!("ffmpeg failed: {}", stderr)));
        }

        if let Err(e) = tokio::fs::rename(&partial, output).await {
            Self::discard(&partial).await;
            return Err(e).context("Failed to move ffmpeg output into place");
        }

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            "Video remux completed"
        );
        Ok(ProcessOutcome::Succeeded)
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}
