use log::debug;
use ndarray::{Array1, Array2};
use crate::extract::reduce::TrialShape;
use crate::extract::session::Session;
use crate::extract::table::SignalTables;
use crate::extract::window::TrialWindow;
use crate::extract::ExtractError;
use crate::types::{PupilCoordinates, SignalKind, TraceKind};
/// Every signal an extraction slices, fetched once and checked against a
/// common sample count.
#[derive(Clone, Debug)]
pub struct SessionSignals {
    pub cell_ids: Vec<u64>,
    pub time: Array1<f64>,
    pub fluorescence: Array2<f64>, // cells x time
    pub pupil_size: Array1<f64>,
    pub pupil_location: Array2<f64>, // time x 2
    pub running_speed: Array1<f64>,
    pub pupil_rate: Array1<f64>,
    pub saccade_rate: Array1<f64>,
}
fn expect_len(signal: SignalKind, expected: usize, actual: usize) -> Result<(), ExtractError> {
    if expected != actual {
        return Err(ExtractError::InconsistentLength {
            signal,
            expected,
            actual,
        });
    }
    Ok(())
}
impl SessionSignals {
    /// Fetches all seven signals. The fluorescence time vector is the shared
    /// time base; every other time vector and signal must match its length.
    pub fn fetch<S: Session + ?Sized>(session: &S, trace: TraceKind) -> Result<Self, ExtractError> {
        let cell_ids = session.cell_specimen_ids()?;
        let (time, fluorescence) = session.fluorescence_traces(trace, None)?;
        let (pupil_time, pupil_size) = session.pupil_size()?;
        let (location_time, pupil_location) = session.pupil_location(PupilCoordinates::Planar)?;
        let (running_time, running_speed) = session.running_speed()?;
        let pupil_rate = session.pupil_rate()?;
        let saccade_rate = session.saccade_rate()?;
        let samples = time.len();
        expect_len(SignalKind::Fluorescence, samples, fluorescence.ncols())?;
        expect_len(SignalKind::Fluorescence, cell_ids.len(), fluorescence.nrows())?;
        expect_len(SignalKind::PupilSize, samples, pupil_time.len())?;
        expect_len(SignalKind::PupilSize, samples, pupil_size.len())?;
        expect_len(SignalKind::PupilLocation, samples, location_time.len())?;
        expect_len(SignalKind::PupilLocation, samples, pupil_location.nrows())?;
        expect_len(SignalKind::PupilLocation, 2, pupil_location.ncols())?;
        expect_len(SignalKind::RunningSpeed, samples, running_time.len())?;
        expect_len(SignalKind::RunningSpeed, samples, running_speed.len())?;
        expect_len(SignalKind::PupilRate, samples, pupil_rate.len())?;
        expect_len(SignalKind::SaccadeRate, samples, saccade_rate.len())?;
        debug!(
            "fetched {:?} traces for {} cells over {} samples",
            trace,
            cell_ids.len(),
            samples
        );
        Ok(Self {
            cell_ids,
            time,
            fluorescence,
            pupil_size,
            pupil_location,
            running_speed,
            pupil_rate,
            saccade_rate,
        })
    }
    /// Slices one trial out of every signal and appends it under `key`.
    /// Nothing is appended unless all seven slices succeed, so the tables stay
    /// aligned on error.
    pub fn append_trial<K: PartialEq + Clone, S: TrialShape>(
        &self,
        tables: &mut SignalTables<K, S>,
        key: &K,
        window: TrialWindow,
    ) -> Result<(), ExtractError> {
        let fluorescence = window.columns(SignalKind::Fluorescence, self.fluorescence.view())?;
        let pupil_size = window.series(SignalKind::PupilSize, self.pupil_size.view())?;
        let pupil_location = window.rows(SignalKind::PupilLocation, self.pupil_location.view())?;
        let time = window.series(SignalKind::Time, self.time.view())?;
        let running_speed = window.series(SignalKind::RunningSpeed, self.running_speed.view())?;
        let pupil_rate = window.series(SignalKind::PupilRate, self.pupil_rate.view())?;
        let saccade_rate = window.series(SignalKind::SaccadeRate, self.saccade_rate.view())?;
        tables.fluorescence.push(key, S::trace(fluorescence));
        tables.pupil_size.push(key, S::series(pupil_size));
        tables.pupil_location.push(key, S::points(pupil_location));
        tables.time.push(key, S::series(time));
        tables.running_speed.push(key, S::series(running_speed));
        tables.pupil_rate.push(key, S::series(pupil_rate));
        tables.saccade_rate.push(key, S::series(saccade_rate));
        Ok(())
    }
}
