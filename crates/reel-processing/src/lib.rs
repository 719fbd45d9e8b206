//! Reel Media Processing Library
//!
//! This crate provides the processing step applied between download and
//! upload. Processors are trait objects so the service can swap the
//! transformation without touching the transfer flow.

pub mod factory;
pub mod passthrough;
pub mod traits;

#[cfg(feature = "video")]
pub mod video;

// Re-export commonly used types
pub use factory::create_processor;
pub use passthrough::PassthroughProcessor;
pub use traits::{ProcessOutcome, VideoProcessor};

#[cfg(feature = "video")]
pub use video::FfmpegProcessor;
