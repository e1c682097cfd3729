use log::{debug, info, warn};
use ndarray::Array2;
use crate::extract::reduce::TrialShape;
use crate::extract::session::Session;
use crate::extract::signals::SessionSignals;
use crate::extract::stimulus::{distinct_gratings, sorted_frames, GratingKey, Spontaneous};
use crate::extract::table::{ConditionTable, Extraction, SignalTables};
use crate::extract::window::TrialWindow;
use crate::extract::ExtractError;
use crate::types::{SignalKind, StimulusKind, TraceKind};
/// Static-grating trials keyed by orientation / spatial frequency / phase.
/// Columns follow first appearance in the stimulus table; trials follow row order.
pub fn extract_static_gratings<S: TrialShape, P: Session + ?Sized>(
    session: &P,
    trace: TraceKind,
) -> Result<Extraction<GratingKey, S>, ExtractError> {
    let signals = SessionSignals::fetch(session, trace)?;
    let table = session.static_grating_table()?;
    if table.is_empty() {
        warn!("static grating table is empty");
    }
    let keys = distinct_gratings(&table);
    let mut tables = SignalTables::<GratingKey, S>::with_columns(&keys);
    for row in &table {
        let window = TrialWindow::new(row.start, row.end)?;
        signals.append_trial(&mut tables, &row.key(), window)?;
    }
    finish(StimulusKind::StaticGratings, trace, signals, tables)
}
/// Spontaneous epochs, all under the single `spont` condition.
pub fn extract_spontaneous<S: TrialShape, P: Session + ?Sized>(
    session: &P,
    trace: TraceKind,
) -> Result<Extraction<Spontaneous, S>, ExtractError> {
    let signals = SessionSignals::fetch(session, trace)?;
    let intervals = session.spontaneous_table()?;
    if intervals.is_empty() {
        warn!("spontaneous activity table is empty");
    }
    let mut tables = SignalTables::<Spontaneous, S>::with_columns(&[Spontaneous]);
    for interval in &intervals {
        let window = TrialWindow::new(interval.start, interval.end)?;
        signals.append_trial(&mut tables, &Spontaneous, window)?;
    }
    finish(StimulusKind::Spontaneous, trace, signals, tables)
}
/// Natural-scene trials keyed by frame index, ascending. Each trial covers
/// exactly seven samples from its start.
pub fn extract_natural_scenes<S: TrialShape, P: Session + ?Sized>(
    session: &P,
    trace: TraceKind,
) -> Result<Extraction<i64, S>, ExtractError> {
    let signals = SessionSignals::fetch(session, trace)?;
    let table = session.natural_scene_table()?;
    if table.is_empty() {
        warn!("natural scenes table is empty");
    }
    let frames = sorted_frames(&table);
    let mut tables = SignalTables::<i64, S>::with_columns(&frames);
    for row in &table {
        signals.append_trial(&mut tables, &row.frame, TrialWindow::scene(row.start))?;
    }
    finish(StimulusKind::NaturalScenes, trace, signals, tables)
}
fn finish<K: PartialEq + Clone, S: TrialShape>(
    stimulus: StimulusKind,
    trace: TraceKind,
    signals: SessionSignals,
    tables: SignalTables<K, S>,
) -> Result<Extraction<K, S>, ExtractError> {
    info!(
        "{stimulus}: {} conditions, {} trials, {:?} mode",
        tables.fluorescence.len(),
        tables.fluorescence.total_trials(),
        S::MODE
    );
    Ok(Extraction {
        stimulus,
        trace,
        cell_ids: signals.cell_ids,
        tables,
    })
}
/// Normalized fluorescence per natural-scene trial, without behavior.
#[derive(Clone, Debug)]
pub struct SceneResponses {
    pub cell_ids: Vec<u64>,
    pub fluorescence: ConditionTable<i64, Array2<f64>>,
}
/// Fluorescence-only natural-scenes extraction for `cells`, or every cell of
/// the session when `None`. Rows of each segment follow `cell_ids`.
pub fn extract_natural_scenes_dff<P: Session + ?Sized>(
    session: &P,
    cells: Option<&[u64]>,
) -> Result<SceneResponses, ExtractError> {
    let cell_ids = match cells {
        Some(cells) => cells.to_vec(),
        None => session.cell_specimen_ids()?,
    };
    let (time, dff) = session.fluorescence_traces(TraceKind::Dff, Some(cell_ids.as_slice()))?;
    if dff.ncols() != time.len() {
        return Err(ExtractError::InconsistentLength {
            signal: SignalKind::Fluorescence,
            expected: time.len(),
            actual: dff.ncols(),
        });
    }
    let table = session.natural_scene_table()?;
    let mut fluorescence = ConditionTable::with_columns(sorted_frames(&table));
    for row in &table {
        let segment = TrialWindow::scene(row.start).columns(SignalKind::Fluorescence, dff.view())?;
        fluorescence.push(&row.frame, segment.to_owned());
    }
    debug!(
        "natural scenes dF/F: {} cells, {} frames, {} trials",
        cell_ids.len(),
        fluorescence.len(),
        fluorescence.total_trials()
    );
    Ok(SceneResponses {
        cell_ids,
        fluorescence,
    })
}
