use std::fmt;
use serde::{Deserialize, Serialize};
/// Samples per natural-scene presentation. Windows are always
/// `[start, start + SCENE_WINDOW_SAMPLES)`, whatever the table's `end` says.
pub const SCENE_WINDOW_SAMPLES: usize = 7;
/// One row of the static-grating stimulus table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GratingTrial {
    pub orientation: f64,
    pub spatial_frequency: f64,
    pub phase: f64,
    pub start: usize,
    pub end: usize,
}
impl GratingTrial {
    pub fn key(&self) -> GratingKey {
        GratingKey {
            orientation: self.orientation,
            spatial_frequency: self.spatial_frequency,
            phase: self.phase,
        }
    }
}
/// One row of the natural-scenes stimulus table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneTrial {
    pub frame: i64,
    pub start: usize,
    pub end: usize,
}
/// Spontaneous-activity epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}
/// Orientation / spatial frequency / phase triple identifying a grating condition.
///
/// Blank sweeps carry NaN in every field, so NaN compares equal to NaN here and
/// all blank sweeps land in one condition.
#[derive(Clone, Copy, Debug)]
pub struct GratingKey {
    pub orientation: f64,
    pub spatial_frequency: f64,
    pub phase: f64,
}
fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
impl PartialEq for GratingKey {
    fn eq(&self, other: &Self) -> bool {
        same_value(self.orientation, other.orientation)
            && same_value(self.spatial_frequency, other.spatial_frequency)
            && same_value(self.phase, other.phase)
    }
}
impl Eq for GratingKey {}
impl fmt::Display for GratingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.orientation, self.spatial_frequency, self.phase
        )
    }
}
/// The single condition of spontaneous activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Spontaneous;
impl fmt::Display for Spontaneous {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("spont")
    }
}
/// Distinct frame indices of a natural-scenes table, ascending.
pub fn sorted_frames(table: &[SceneTrial]) -> Vec<i64> {
    let mut frames: Vec<i64> = table.iter().map(|t| t.frame).collect();
    frames.sort_unstable();
    frames.dedup();
    frames
}
/// Distinct grating keys in order of first appearance.
pub fn distinct_gratings(table: &[GratingTrial]) -> Vec<GratingKey> {
    let mut keys: Vec<GratingKey> = Vec::new();
    for key in table.iter().map(GratingTrial::key) {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}
#[cfg(test)]
mod tests {
    use super::*;
    fn grating(orientation: f64, start: usize) -> GratingTrial {
        GratingTrial {
            orientation,
            spatial_frequency: 0.04,
            phase: 0.25,
            start,
            end: start + 7,
        }
    }
    #[test]
    fn blank_sweeps_share_one_key() {
        let table = [grating(f64::NAN, 0), grating(90.0, 10), grating(f64::NAN, 20)];
        let keys = distinct_gratings(&table);
        assert_eq!(keys.len(), 2);
        assert!(keys[0].orientation.is_nan());
        assert_eq!(keys[1].orientation, 90.0);
    }
    #[test]
    fn grating_key_displays_as_comma_triple() {
        assert_eq!(grating(30.0, 0).key().to_string(), "30,0.04,0.25");
    }
    #[test]
    fn frames_are_sorted_and_unique() {
        let table: Vec<SceneTrial> = [5, -1, 5, 3]
            .iter()
            .map(|&frame| SceneTrial { frame, start: 0, end: 1 })
            .collect();
        assert_eq!(sorted_frames(&table), vec![-1, 3, 5]);
    }
}
