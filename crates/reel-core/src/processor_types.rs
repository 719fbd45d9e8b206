use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Which video processor implementation the service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorBackend {
    /// Byte-for-byte copy of the input.
    #[default]
    Passthrough,
    /// Remux into an MP4 container with ffmpeg.
    Ffmpeg,
}

impl FromStr for ProcessorBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passthrough" | "copy" => Ok(ProcessorBackend::Passthrough),
            "ffmpeg" => Ok(ProcessorBackend::Ffmpeg),
            _ => Err(anyhow::anyhow!("Invalid processor: {}", s)),
        }
    }
}

impl Display for ProcessorBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ProcessorBackend::Passthrough => write!(f, "passthrough"),
            ProcessorBackend::Ffmpeg => write!(f, "ffmpeg"),
        }
    }
}
