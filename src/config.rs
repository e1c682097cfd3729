use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::synthetic::SyntheticSession;
use crate::types::{ExtractionMode, StimulusKind, TraceKind};
/// Run configuration for the `stimslice` binary. Every field has a default, so
/// a config file only needs the fields it changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub stimulus: StimulusKind,
    pub trace: TraceKind,
    pub mode: ExtractionMode,
    /// Restricts the fluorescence-only scene extraction to these cells.
    pub cells: Option<Vec<u64>>,
    /// Render condition responses next to non-binned fluorescence output.
    pub plot: bool,
    pub plot_width: u32,
    pub plot_height: u32,
    pub output_dir: PathBuf,
    /// Used when no session file is given.
    pub synthetic: SyntheticSession,
}
impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            stimulus: StimulusKind::default(),
            trace: TraceKind::default(),
            mode: ExtractionMode::default(),
            cells: None,
            plot: true,
            plot_width: 900,
            plot_height: 400,
            output_dir: PathBuf::from("stimslice-out"),
            synthetic: SyntheticSession::default(),
        }
    }
}
impl ExtractionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn partial_config_keeps_defaults() {
        let config: ExtractionConfig =
            serde_json::from_str(r#"{"stimulus": "natural_scenes", "mode": "binned"}"#).unwrap();
        assert_eq!(config.stimulus, StimulusKind::NaturalScenes);
        assert_eq!(config.mode, ExtractionMode::Binned);
        assert_eq!(config.trace, TraceKind::Dff);
        assert!(config.plot);
        assert_eq!(config.synthetic.seed, 42);
    }
    #[test]
    fn nested_synthetic_settings_parse() {
        let config: ExtractionConfig =
            serde_json::from_str(r#"{"synthetic": {"cells": 3, "grating_repeats": 2}}"#).unwrap();
        assert_eq!(config.synthetic.cells, 3);
        assert_eq!(config.synthetic.grating_repeats, 2);
        assert_eq!(config.synthetic.scene_frames, 4);
    }
}
