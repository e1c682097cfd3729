// src/synthetic.rs
//! Seeded synthetic sessions for demos and tests.
//!
//! Stimuli are laid out back to back: grating trials first, then scene
//! trials, then spontaneous epochs. Each cell responds to a trial with a bump
//! whose height depends on the condition, on top of Gaussian noise.
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use crate::extract::{GratingTrial, InMemorySession, Interval, SceneTrial, SCENE_WINDOW_SAMPLES};
const GRATING_SAMPLES: usize = 8;
const GAP_SAMPLES: usize = 3;
const SPONT_SAMPLES: usize = 30;
const SAMPLE_RATE_HZ: f64 = 30.0;
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticSession {
    pub seed: u64,
    pub cells: usize,
    pub orientations: Vec<f64>,
    pub spatial_frequencies: Vec<f64>,
    pub phases: Vec<f64>,
    pub grating_repeats: usize,
    pub scene_frames: usize,
    pub scene_repeats: usize,
    pub spont_epochs: usize,
    /// Fraction of behavioral samples replaced by NaN (eye-tracking dropouts).
    pub dropout: f64,
}
impl Default for SyntheticSession {
    fn default() -> Self {
        Self {
            seed: 42,
            cells: 8,
            orientations: vec![0.0, 90.0],
            spatial_frequencies: vec![0.04],
            phases: vec![0.0, 0.5],
            grating_repeats: 5,
            scene_frames: 4,
            scene_repeats: 5,
            spont_epochs: 2,
            dropout: 0.02,
        }
    }
}
struct Layout {
    gratings: Vec<GratingTrial>,
    scenes: Vec<SceneTrial>,
    spontaneous: Vec<Interval>,
    samples: usize,
}
impl SyntheticSession {
    fn layout(&self, rng: &mut StdRng) -> Layout {
        let mut cursor = GAP_SAMPLES;
        let mut gratings = Vec::new();
        for _ in 0..self.grating_repeats {
            for &orientation in &self.orientations {
                for &spatial_frequency in &self.spatial_frequencies {
                    for &phase in &self.phases {
                        gratings.push(GratingTrial {
                            orientation,
                            spatial_frequency,
                            phase,
                            start: cursor,
                            end: cursor + GRATING_SAMPLES,
                        });
                        cursor += GRATING_SAMPLES + GAP_SAMPLES;
                    }
                }
            }
        }
        let mut scenes = Vec::new();
        for _ in 0..self.scene_repeats {
            for _ in 0..self.scene_frames {
                let frame = rng.gen_range(0..self.scene_frames.max(1)) as i64;
                // Table ends are ragged on purpose; scene windows ignore them.
                let jitter = rng.gen_range(0..3);
                scenes.push(SceneTrial {
                    frame,
                    start: cursor,
                    end: cursor + SCENE_WINDOW_SAMPLES + jitter,
                });
                cursor += SCENE_WINDOW_SAMPLES + GAP_SAMPLES;
            }
        }
        let mut spontaneous = Vec::new();
        for _ in 0..self.spont_epochs {
            spontaneous.push(Interval {
                start: cursor,
                end: cursor + SPONT_SAMPLES,
            });
            cursor += SPONT_SAMPLES + GAP_SAMPLES;
        }
        Layout {
            gratings,
            scenes,
            spontaneous,
            samples: cursor + GAP_SAMPLES,
        }
    }
    fn noise(rng: &mut StdRng, scale: f64) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        z * scale
    }
    fn behavior(&self, rng: &mut StdRng, samples: usize, base: f64, scale: f64) -> Array1<f64> {
        Array1::from_shape_fn(samples, |t| {
            if rng.gen_bool(self.dropout.clamp(0.0, 1.0)) {
                f64::NAN
            } else {
                base + (t as f64 * 0.05).sin() * scale + Self::noise(rng, scale * 0.1)
            }
        })
    }
    pub fn build(&self) -> InMemorySession {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let layout = self.layout(&mut rng);
        let samples = layout.samples;
        let preferred: Vec<f64> = (0..self.cells).map(|_| rng.gen_range(0.0..180.0)).collect();
        let mut dff = Array2::from_shape_fn((self.cells, samples), |_| Self::noise(&mut rng, 0.05));
        for trial in &layout.gratings {
            for (cell, &pref) in preferred.iter().enumerate() {
                let delta = (trial.orientation - pref).to_radians();
                let gain = delta.cos().powi(2);
                for t in trial.start..trial.end {
                    dff[[cell, t]] += gain;
                }
            }
        }
        for trial in &layout.scenes {
            for cell in 0..self.cells {
                let gain = ((cell as i64 + trial.frame) % 3) as f64 * 0.3;
                for t in trial.start..trial.start + SCENE_WINDOW_SAMPLES {
                    dff[[cell, t]] += gain;
                }
            }
        }
        let raw = dff.mapv(|v| 100.0 * (1.0 + v));
        let time = Array1::from_shape_fn(samples, |t| t as f64 / SAMPLE_RATE_HZ);
        let pupil_size = self.behavior(&mut rng, samples, 40.0, 5.0);
        let pupil_x = self.behavior(&mut rng, samples, 0.0, 2.0);
        let pupil_y = self.behavior(&mut rng, samples, 0.0, 1.0);
        let mut location = Array2::<f64>::zeros((samples, 2));
        location.column_mut(0).assign(&pupil_x);
        location.column_mut(1).assign(&pupil_y);
        let spherical = location.mapv(|v: f64| v.atan().to_degrees());
        InMemorySession {
            cell_ids: (0..self.cells as u64).map(|c| 500_000 + c).collect(),
            time,
            raw: Some(raw),
            dff: Some(dff),
            pupil_size: Some(pupil_size),
            pupil_location_planar: Some(location),
            pupil_location_spherical: Some(spherical),
            running_speed: Some(self.behavior(&mut rng, samples, 10.0, 10.0)),
            pupil_rate: Some(self.behavior(&mut rng, samples, 0.0, 0.5)),
            saccade_rate: Some(self.behavior(&mut rng, samples, 0.5, 0.2)),
            static_gratings: Some(layout.gratings),
            natural_scenes: Some(layout.scenes),
            spontaneous: Some(layout.spontaneous),
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_static_gratings, Session, Segments};
    use crate::types::TraceKind;
    #[test]
    fn same_seed_same_session() {
        let a = SyntheticSession::default().build();
        let b = SyntheticSession::default().build();
        assert_eq!(a.dff, b.dff);
        assert_eq!(a.natural_scenes, b.natural_scenes);
    }
    #[test]
    fn noise_is_centred_with_requested_spread() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws: Vec<f64> = (0..20_000).map(|_| SyntheticSession::noise(&mut rng, 0.5)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let var = draws.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / draws.len() as f64;
        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((var.sqrt() - 0.5).abs() < 0.02, "std {}", var.sqrt());
    }
    #[test]
    fn stimulus_windows_fit_in_the_session() {
        let session = SyntheticSession::default().build();
        let samples = session.time.len();
        assert!(session.static_grating_table().unwrap().iter().all(|t| t.end <= samples));
        assert!(session
            .natural_scene_table()
            .unwrap()
            .iter()
            .all(|t| t.start + SCENE_WINDOW_SAMPLES <= samples));
        assert!(session.spontaneous_table().unwrap().iter().all(|t| t.end <= samples));
    }
    #[test]
    fn gratings_extract_every_combination() {
        let config = SyntheticSession {
            grating_repeats: 3,
            ..SyntheticSession::default()
        };
        let session = config.build();
        let out = extract_static_gratings::<Segments, _>(&session, TraceKind::Dff).unwrap();
        assert_eq!(out.tables.fluorescence.len(), 4);
        assert_eq!(out.tables.fluorescence.trial_counts(), vec![3, 3, 3, 3]);
        assert!(out.tables.is_aligned());
    }
}
