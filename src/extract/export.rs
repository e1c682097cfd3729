use std::fmt::Display;
use std::io::Write;
use serde::Serialize;
use crate::extract::pipeline::SceneResponses;
use crate::extract::reduce::{Binned, TrialShape};
use crate::extract::table::{ConditionTable, Extraction};
use crate::extract::ExtractError;
use crate::types::{ExtractionMode, StimulusKind, TraceKind};
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConditionSummary {
    pub label: String,
    pub trials: usize,
}
/// What an extraction produced, without the data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExtractionSummary {
    pub stimulus: StimulusKind,
    pub trace: TraceKind,
    pub mode: ExtractionMode,
    pub cells: usize,
    pub total_trials: usize,
    pub conditions: Vec<ConditionSummary>,
}
fn conditions<K: PartialEq + Clone + Display, T>(table: &ConditionTable<K, T>) -> Vec<ConditionSummary> {
    table
        .iter()
        .map(|(key, trials)| ConditionSummary {
            label: key.to_string(),
            trials: trials.len(),
        })
        .collect()
}
impl ExtractionSummary {
    pub fn from_extraction<K: PartialEq + Clone + Display, S: TrialShape>(
        extraction: &Extraction<K, S>,
    ) -> Self {
        let table = &extraction.tables.fluorescence;
        Self {
            stimulus: extraction.stimulus,
            trace: extraction.trace,
            mode: S::MODE,
            cells: extraction.cell_ids.len(),
            total_trials: table.total_trials(),
            conditions: conditions(table),
        }
    }
    pub fn from_scene_responses(responses: &SceneResponses) -> Self {
        Self {
            stimulus: StimulusKind::NaturalScenesDff,
            trace: TraceKind::Dff,
            mode: ExtractionMode::Segments,
            cells: responses.cell_ids.len(),
            total_trials: responses.fluorescence.total_trials(),
            conditions: conditions(&responses.fluorescence),
        }
    }
}
fn quoted(label: &str) -> String {
    format!("\"{}\"", label.replace('"', "\"\""))
}
/// Writes one CSV row per trial of a binned extraction:
/// condition, trial index, the six behavioral means, then one column per cell.
pub fn write_binned_csv<K: PartialEq + Clone + Display, W: Write>(
    extraction: &Extraction<K, Binned>,
    mut out: W,
) -> Result<(), ExtractError> {
    let tables = &extraction.tables;
    if !tables.is_aligned() {
        return Err(ExtractError::MalformedSession(
            "signal tables disagree on conditions or trial counts".into(),
        ));
    }
    write!(
        out,
        "condition,trial,time,pupil_size,pupil_x,pupil_y,running_speed,pupil_rate,saccade_rate"
    )?;
    for id in &extraction.cell_ids {
        write!(out, ",cell_{id}")?;
    }
    writeln!(out)?;
    let scalar = |table: &ConditionTable<K, f64>, key: &K, idx: usize| {
        table.trial(key, idx).copied().unwrap_or(f64::NAN)
    };
    for (key, trials) in tables.fluorescence.iter() {
        let label = quoted(&key.to_string());
        for (idx, cells) in trials.iter().enumerate() {
            let location = tables.pupil_location.trial(key, idx);
            let pupil = |axis: usize| location.and_then(|l| l.get(axis)).copied().unwrap_or(f64::NAN);
            write!(
                out,
                "{label},{idx},{},{},{},{},{},{},{}",
                scalar(&tables.time, key, idx),
                scalar(&tables.pupil_size, key, idx),
                pupil(0),
                pupil(1),
                scalar(&tables.running_speed, key, idx),
                scalar(&tables.pupil_rate, key, idx),
                scalar(&tables.saccade_rate, key, idx),
            )?;
            for value in cells {
                write!(out, ",{value}")?;
            }
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
