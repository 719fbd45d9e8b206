//! Scripted processor doubles

use async_trait::async_trait;
use reel_processing::{ProcessOutcome, VideoProcessor};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Copy input to output and succeed
    Copy,
    /// Report an expected processing failure
    Fail,
    /// Return an unexpected fault
    Fault,
    /// Panic mid-processing
    Panic,
}

pub struct ScriptedProcessor {
    behavior: Behavior,
    inputs: Mutex<Vec<PathBuf>>,
}

impl ScriptedProcessor {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    /// Input paths seen so far, in call order
    pub fn inputs(&self) -> Vec<PathBuf> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoProcessor for ScriptedProcessor {
    async fn process(&self, input: &Path, output: &Path) -> Result<ProcessOutcome, anyhow::Error> {
        self.inputs.lock().unwrap().push(input.to_path_buf());

        match self.behavior {
            Behavior::Copy => {
                tokio::fs::copy(input, output).await?;
                Ok(ProcessOutcome::Succeeded)
            }
            Behavior::Fail => Ok(ProcessOutcome::failed("unsupported codec")),
            Behavior::Fault => Err(anyhow::anyhow!("encoder crashed")),
            Behavior::Panic => panic!("processor exploded"),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
