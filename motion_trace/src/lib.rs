use std::{fs, path::Path};

use anyhow::Context;
use motion_schema::{LandmarkTrace, Millis};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TraceError {
    #[error("trace has no frames")]
    Empty,

    #[error("frame {index} at {host_ms}ms precedes the previous frame at {previous_ms}ms")]
    Unsorted {
        index: usize,
        host_ms: Millis,
        previous_ms: Millis,
    },
}

/// Frames must be replayable in order: at least one, host time non-decreasing.
pub fn check_trace(trace: &LandmarkTrace) -> Result<(), TraceError> {
    if trace.frames.is_empty() {
        return Err(TraceError::Empty);
    }
    for (index, pair) in trace.frames.windows(2).enumerate() {
        if pair[1].host_ms < pair[0].host_ms {
            return Err(TraceError::Unsorted {
                index: index + 1,
                host_ms: pair[1].host_ms,
                previous_ms: pair[0].host_ms,
            });
        }
    }
    Ok(())
}

pub fn load_trace_json_from_path(path: impl AsRef<Path>) -> anyhow::Result<LandmarkTrace> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("failed to read trace: {}", path.display()))?;
    let trace: LandmarkTrace = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse trace json: {}", path.display()))?;
    check_trace(&trace).with_context(|| format!("invalid trace: {}", path.display()))?;
    Ok(trace)
}

pub fn load_trace_json_from_str(json: &str) -> anyhow::Result<LandmarkTrace> {
    let trace: LandmarkTrace = serde_json::from_str(json).context("failed to parse trace json")?;
    check_trace(&trace).context("invalid trace")?;
    Ok(trace)
}

pub fn save_trace_json_to_path(trace: &LandmarkTrace, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(trace).context("failed to serialize trace")?;
    fs::write(path, json).with_context(|| format!("failed to write trace: {}", path.display()))?;
    Ok(())
}
