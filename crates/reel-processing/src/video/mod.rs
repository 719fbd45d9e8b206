//! Video processing module

pub mod processor;

pub use processor::FfmpegProcessor;
