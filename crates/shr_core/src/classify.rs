//! Maps the smoothed loudness signal onto a small ordered set of named
//! bands. Classification is pure and monotonic; all decision thresholds are
//! configuration, fixed for the lifetime of a scene.

use serde::Deserialize;

/// Ordered loudness bands. Ordering follows loudness: `Quiet < Talking <
/// Shouting < Screaming`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VolumeLevel {
    #[default]
    Quiet,
    Talking,
    Shouting,
    Screaming,
}

impl VolumeLevel {
    /// All bands in ascending loudness order.
    pub const ALL: &'static [VolumeLevel] = &[
        VolumeLevel::Quiet,
        VolumeLevel::Talking,
        VolumeLevel::Shouting,
        VolumeLevel::Screaming,
    ];

    /// Short human-readable label for meter display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Talking => "talking",
            Self::Shouting => "shouting",
            Self::Screaming => "screaming",
        }
    }
}

impl std::fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ascending band boundaries. A value must be strictly greater than a
/// boundary to enter the band above it; a value exactly at a boundary stays
/// in the band below.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct VolumeThresholds {
    pub talking: f32,
    pub shouting: f32,
    pub screaming: f32,
}

impl Default for VolumeThresholds {
    fn default() -> Self {
        Self {
            talking: 0.15,
            shouting: 0.4,
            screaming: 0.75,
        }
    }
}

/// Pure classification of a smoothed volume value into its band.
pub fn classify(volume: f32, thresholds: &VolumeThresholds) -> VolumeLevel {
    if volume > thresholds.screaming {
        VolumeLevel::Screaming
    } else if volume > thresholds.shouting {
        VolumeLevel::Shouting
    } else if volume > thresholds.talking {
        VolumeLevel::Talking
    } else {
        VolumeLevel::Quiet
    }
}
