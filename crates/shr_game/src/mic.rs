//! Microphone collaborator contract.
//!
//! The simulation consumes one loudness sample per fixed step through
//! [`VolumeSource`]; how that sample is captured is not the core's concern.
//! Acquisition happens once before the loop starts, and failure is fatal to
//! startup -- there is deliberately no silent fallback to a constant signal,
//! because a game whose only input channel is dead should say so.
//!
//! The headless driver plays back a recorded volume trace: a JSON file of
//! `{ value, repeat }` frames, one expanded sample per fixed step.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One loudness sample in [0, 1] per call, in fixed-step cadence.
pub trait VolumeSource {
    fn sample(&mut self) -> f32;
}

/// Always-silent source; useful for menus and tests.
#[allow(dead_code)]
pub struct SilentVolume;

impl VolumeSource for SilentVolume {
    fn sample(&mut self) -> f32 {
        0.0
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct VolumeTrace {
    pub frames: Vec<TraceFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TraceFrame {
    pub value: f32,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

const fn default_repeat() -> u32 {
    1
}

impl VolumeTrace {
    pub fn expanded_samples(&self) -> Vec<f32> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(frame.value.clamp(0.0, 1.0));
            }
        }
        out
    }
}

pub fn load_trace_from_path(path: &Path) -> Result<VolumeTrace, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let trace: VolumeTrace = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse trace JSON {}: {e}", path.display()))?;
    validate_trace(&trace)?;
    Ok(trace)
}

fn validate_trace(trace: &VolumeTrace) -> Result<(), String> {
    if trace.frames.is_empty() {
        return Err("Trace validation failed: frames list is empty".to_string());
    }
    for (index, frame) in trace.frames.iter().enumerate() {
        if !frame.value.is_finite() {
            return Err(format!(
                "Trace validation failed: frame {index} has a non-finite value"
            ));
        }
    }
    Ok(())
}

/// A [`VolumeSource`] that replays an expanded trace, then goes silent.
pub struct TraceVolume {
    samples: Vec<f32>,
    cursor: usize,
}

impl TraceVolume {
    pub fn from_trace(trace: &VolumeTrace) -> Self {
        Self {
            samples: trace.expanded_samples(),
            cursor: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.samples.len()
    }
}

impl VolumeSource for TraceVolume {
    fn sample(&mut self) -> f32 {
        let sample = self.samples.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor += 1;
        sample
    }
}
