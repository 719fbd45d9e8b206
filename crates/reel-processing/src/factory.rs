use crate::{PassthroughProcessor, VideoProcessor};
use anyhow::Result;
use reel_core::{Config, ProcessorBackend};
use std::sync::Arc;

/// Create the configured video processor
pub fn create_processor(config: &Config) -> Result<Arc<dyn VideoProcessor>> {
    match config.processor() {
        ProcessorBackend::Passthrough => Ok(Arc::new(PassthroughProcessor::new())),

        #[cfg(feature = "video")]
        ProcessorBackend::Ffmpeg => Ok(Arc::new(crate::FfmpegProcessor::new(
            config.ffmpeg_path().to_string(),
        )?)),

        #[cfg(not(feature = "video"))]
        ProcessorBackend::Ffmpeg => Err(anyhow::anyhow!(
            "ffmpeg processor not available (video feature not enabled)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_default_processor_is_passthrough() {
        let processor = create_processor(&config_from(&[])).unwrap();
        assert_eq!(processor.name(), "passthrough");
    }

    #[cfg(feature = "video")]
    #[test]
    fn test_ffmpeg_processor_validates_path() {
        let processor = create_processor(&config_from(&[("PROCESSOR", "ffmpeg")])).unwrap();
        assert_eq!(processor.name(), "ffmpeg");

        let result = create_processor(&config_from(&[
            ("PROCESSOR", "ffmpeg"),
            ("FFMPEG_PATH", "ffmpeg|sh"),
        ]));
        assert!(result.is_err());
    }
}
