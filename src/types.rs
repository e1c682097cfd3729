// src/types.rs
use std::fmt;
use serde::{Deserialize, Serialize};

// Which fluorescence trace to read from a session
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// Raw fluorescence.
    Raw,
    /// Baseline-normalized dF/F.
    #[default]
    Dff,
}

// Coordinate system for pupil location
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum PupilCoordinates {
    #[default]
    Planar,
    Spherical,
}

// Keep the full window or collapse it to a mean
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    #[default]
    Segments,
    Binned,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulusKind {
    #[default]
    StaticGratings,
    NaturalScenes,
    Spontaneous,
    /// Natural scenes, normalized fluorescence only.
    NaturalScenesDff,
}

impl StimulusKind {
    /// Name the session uses for the stimulus table.
    pub fn table_name(&self) -> &'static str {
        match self {
            StimulusKind::StaticGratings => "static_gratings",
            StimulusKind::NaturalScenes | StimulusKind::NaturalScenesDff => "natural_scenes",
            StimulusKind::Spontaneous => "spontaneous",
        }
    }
}

impl fmt::Display for StimulusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

// The seven per-trial signals
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum SignalKind {
    Fluorescence,
    PupilSize,
    PupilLocation,
    Time,
    RunningSpeed,
    PupilRate,
    SaccadeRate,
}

impl SignalKind {
    pub const ALL: [SignalKind; 7] = [
        SignalKind::Fluorescence,
        SignalKind::PupilSize,
        SignalKind::PupilLocation,
        SignalKind::Time,
        SignalKind::RunningSpeed,
        SignalKind::PupilRate,
        SignalKind::SaccadeRate,
    ];
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::Fluorescence => "fluorescence",
            SignalKind::PupilSize => "pupil size",
            SignalKind::PupilLocation => "pupil location",
            SignalKind::Time => "time",
            SignalKind::RunningSpeed => "running speed",
            SignalKind::PupilRate => "pupil rate",
            SignalKind::SaccadeRate => "saccade rate",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn both_scene_variants_read_the_same_table() {
        assert_eq!(StimulusKind::NaturalScenes.table_name(), "natural_scenes");
        assert_eq!(StimulusKind::NaturalScenesDff.table_name(), "natural_scenes");
    }
    #[test]
    fn modes_deserialize_from_snake_case() {
        let mode: ExtractionMode = serde_json::from_str("\"binned\"").unwrap();
        assert_eq!(mode, ExtractionMode::Binned);
        let trace: TraceKind = serde_json::from_str("\"raw\"").unwrap();
        assert_eq!(trace, TraceKind::Raw);
    }
}
