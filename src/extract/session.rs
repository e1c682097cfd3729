use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use crate::extract::stimulus::{GratingTrial, Interval, SceneTrial};
use crate::extract::ExtractError;
use crate::types::{PupilCoordinates, SignalKind, StimulusKind, TraceKind};
/// Read-only view of one imaging session.
///
/// Every signal comes with the time vector it is sampled on; stimulus tables
/// index into that shared time base by sample.
pub trait Session {
    fn cell_specimen_ids(&self) -> Result<Vec<u64>, ExtractError>;
    /// `(time, [cells x time])`, restricted to `cells` when given, in that order.
    fn fluorescence_traces(
        &self,
        kind: TraceKind,
        cells: Option<&[u64]>,
    ) -> Result<(Array1<f64>, Array2<f64>), ExtractError>;
    fn pupil_size(&self) -> Result<(Array1<f64>, Array1<f64>), ExtractError>;
    /// `(time, [time x 2])`.
    fn pupil_location(
        &self,
        coordinates: PupilCoordinates,
    ) -> Result<(Array1<f64>, Array2<f64>), ExtractError>;
    fn running_speed(&self) -> Result<(Array1<f64>, Array1<f64>), ExtractError>;
    /// Smoothed pupil rate, aligned to the session time base.
    fn pupil_rate(&self) -> Result<Array1<f64>, ExtractError>;
    /// Smoothed saccade rate, aligned to the session time base.
    fn saccade_rate(&self) -> Result<Array1<f64>, ExtractError>;
    fn static_grating_table(&self) -> Result<Vec<GratingTrial>, ExtractError>;
    fn natural_scene_table(&self) -> Result<Vec<SceneTrial>, ExtractError>;
    fn spontaneous_table(&self) -> Result<Vec<Interval>, ExtractError>;
}
/// Session held entirely in memory. Absent signals or tables surface as
/// `MissingSignal` / `MissingStimulus`.
#[derive(Clone, Debug, Default)]
pub struct InMemorySession {
    pub cell_ids: Vec<u64>,
    pub time: Array1<f64>,
    pub raw: Option<Array2<f64>>,
    pub dff: Option<Array2<f64>>,
    pub pupil_size: Option<Array1<f64>>,
    pub pupil_location_planar: Option<Array2<f64>>,
    pub pupil_location_spherical: Option<Array2<f64>>,
    pub running_speed: Option<Array1<f64>>,
    pub pupil_rate: Option<Array1<f64>>,
    pub saccade_rate: Option<Array1<f64>>,
    pub static_gratings: Option<Vec<GratingTrial>>,
    pub natural_scenes: Option<Vec<SceneTrial>>,
    pub spontaneous: Option<Vec<Interval>>,
}
fn present<T: Clone>(value: &Option<T>, signal: SignalKind) -> Result<T, ExtractError> {
    value.clone().ok_or(ExtractError::MissingSignal(signal))
}
fn table<T: Clone>(value: &Option<Vec<T>>, stimulus: StimulusKind) -> Result<Vec<T>, ExtractError> {
    value.clone().ok_or(ExtractError::MissingStimulus(stimulus))
}
impl InMemorySession {
    fn cell_rows(&self, cells: &[u64]) -> Result<Vec<usize>, ExtractError> {
        cells
            .iter()
            .map(|id| {
                self.cell_ids
                    .iter()
                    .position(|known| known == id)
                    .ok_or(ExtractError::UnknownCell(*id))
            })
            .collect()
    }
}
impl Session for InMemorySession {
    fn cell_specimen_ids(&self) -> Result<Vec<u64>, ExtractError> {
        Ok(self.cell_ids.clone())
    }
    fn fluorescence_traces(
        &self,
        kind: TraceKind,
        cells: Option<&[u64]>,
    ) -> Result<(Array1<f64>, Array2<f64>), ExtractError> {
        let traces = match kind {
            TraceKind::Raw => self.raw.as_ref(),
            TraceKind::Dff => self.dff.as_ref(),
        }
        .ok_or(ExtractError::MissingSignal(SignalKind::Fluorescence))?;
        if traces.nrows() != self.cell_ids.len() {
            return Err(ExtractError::InconsistentLength {
                signal: SignalKind::Fluorescence,
                expected: self.cell_ids.len(),
                actual: traces.nrows(),
            });
        }
        let traces = match cells {
            Some(cells) => traces.select(Axis(0), &self.cell_rows(cells)?),
            None => traces.clone(),
        };
        Ok((self.time.clone(), traces))
    }
    fn pupil_size(&self) -> Result<(Array1<f64>, Array1<f64>), ExtractError> {
        Ok((self.time.clone(), present(&self.pupil_size, SignalKind::PupilSize)?))
    }
    fn pupil_location(
        &self,
        coordinates: PupilCoordinates,
    ) -> Result<(Array1<f64>, Array2<f64>), ExtractError> {
        let location = match coordinates {
            PupilCoordinates::Planar => &self.pupil_location_planar,
            PupilCoordinates::Spherical => &self.pupil_location_spherical,
        };
        Ok((self.time.clone(), present(location, SignalKind::PupilLocation)?))
    }
    fn running_speed(&self) -> Result<(Array1<f64>, Array1<f64>), ExtractError> {
        Ok((
            self.time.clone(),
            present(&self.running_speed, SignalKind::RunningSpeed)?,
        ))
    }
    fn pupil_rate(&self) -> Result<Array1<f64>, ExtractError> {
        present(&self.pupil_rate, SignalKind::PupilRate)
    }
    fn saccade_rate(&self) -> Result<Array1<f64>, ExtractError> {
        present(&self.saccade_rate, SignalKind::SaccadeRate)
    }
    fn static_grating_table(&self) -> Result<Vec<GratingTrial>, ExtractError> {
        table(&self.static_gratings, StimulusKind::StaticGratings)
    }
    fn natural_scene_table(&self) -> Result<Vec<SceneTrial>, ExtractError> {
        table(&self.natural_scenes, StimulusKind::NaturalScenes)
    }
    fn spontaneous_table(&self) -> Result<Vec<Interval>, ExtractError> {
        table(&self.spontaneous, StimulusKind::Spontaneous)
    }
}
/// On-disk JSON form of a session. Matrices are row-major nested lists:
/// fluorescence as cells x time, pupil location as time x 2.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFile {
    pub cell_ids: Vec<u64>,
    pub time: Vec<f64>,
    pub raw: Option<Vec<Vec<f64>>>,
    pub dff: Option<Vec<Vec<f64>>>,
    pub pupil_size: Option<Vec<f64>>,
    pub pupil_location_planar: Option<Vec<Vec<f64>>>,
    pub pupil_location_spherical: Option<Vec<Vec<f64>>>,
    pub running_speed: Option<Vec<f64>>,
    pub pupil_rate: Option<Vec<f64>>,
    pub saccade_rate: Option<Vec<f64>>,
    pub static_gratings: Option<Vec<GratingTrial>>,
    pub natural_scenes: Option<Vec<SceneTrial>>,
    pub spontaneous: Option<Vec<Interval>>,
}
fn matrix(rows: Option<Vec<Vec<f64>>>, name: &str) -> Result<Option<Array2<f64>>, ExtractError> {
    let Some(rows) = rows else {
        return Ok(None);
    };
    let width = rows.first().map_or(0, Vec::len);
    if let Some(bad) = rows.iter().position(|row| row.len() != width) {
        return Err(ExtractError::MalformedSession(format!(
            "{name} row {bad} has {} samples, expected {width}",
            rows[bad].len()
        )));
    }
    let height = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Ok(Some(Array2::from_shape_vec((height, width), flat)?))
}
impl SessionFile {
    pub fn into_session(self) -> Result<InMemorySession, ExtractError> {
        Ok(InMemorySession {
            cell_ids: self.cell_ids,
            time: Array1::from(self.time),
            raw: matrix(self.raw, "raw")?,
            dff: matrix(self.dff, "dff")?,
            pupil_size: self.pupil_size.map(Array1::from),
            pupil_location_planar: matrix(self.pupil_location_planar, "pupil_location_planar")?,
            pupil_location_spherical: matrix(
                self.pupil_location_spherical,
                "pupil_location_spherical",
            )?,
            running_speed: self.running_speed.map(Array1::from),
            pupil_rate: self.pupil_rate.map(Array1::from),
            saccade_rate: self.saccade_rate.map(Array1::from),
            static_gratings: self.static_gratings,
            natural_scenes: self.natural_scenes,
            spontaneous: self.spontaneous,
        })
    }
}
