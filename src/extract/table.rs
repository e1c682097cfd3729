use std::fmt::Display;
use crate::extract::reduce::{mean_over_time, nanmean, nanmean_over_rows, Binned, Segments, TrialShape};
use crate::extract::ExtractError;
use crate::types::{SignalKind, StimulusKind, TraceKind};
/// Condition-keyed columns of trials.
///
/// Columns keep the order in which they were created and grow as trials are
/// pushed, so there is no ceiling on repeats per condition.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionTable<K, T> {
    keys: Vec<K>,
    columns: Vec<Vec<T>>, // key -> trials
}
impl<K, T> Default for ConditionTable<K, T> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            columns: Vec::new(),
        }
    }
}
impl<K: PartialEq + Clone, T> ConditionTable<K, T> {
    pub fn new() -> Self {
        Self::default()
    }
    /// Table with one empty column per key.
    pub fn with_columns(keys: impl IntoIterator<Item = K>) -> Self {
        let mut table = Self::new();
        for key in keys {
            if table.position(&key).is_none() {
                table.keys.push(key);
                table.columns.push(Vec::new());
            }
        }
        table
    }
    fn position(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }
    /// Appends a trial, opening a column for a new key.
    pub fn push(&mut self, key: &K, trial: T) {
        match self.position(key) {
            Some(idx) => self.columns[idx].push(trial),
            None => {
                self.keys.push(key.clone());
                self.columns.push(vec![trial]);
            }
        }
    }
    pub fn keys(&self) -> &[K] {
        &self.keys
    }
    pub fn get(&self, key: &K) -> Option<&[T]> {
        self.position(key).map(|idx| self.columns[idx].as_slice())
    }
    pub fn trial(&self, key: &K, index: usize) -> Option<&T> {
        self.get(key).and_then(|trials| trials.get(index))
    }
    pub fn trial_count(&self, key: &K) -> usize {
        self.get(key).map_or(0, <[T]>::len)
    }
    /// Trials per column, in column order.
    pub fn trial_counts(&self) -> Vec<usize> {
        self.columns.iter().map(Vec::len).collect()
    }
    pub fn total_trials(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
    /// Longest column; what a rectangular layout would need as row count.
    pub fn max_trials(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }
    pub fn len(&self) -> usize {
        self.keys.len()
    }
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> {
        self.keys
            .iter()
            .zip(self.columns.iter().map(Vec::as_slice))
    }
    /// Same columns, every trial transformed by `f`.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ConditionTable<K, U> {
        ConditionTable {
            keys: self.keys.clone(),
            columns: self
                .columns
                .iter()
                .map(|trials| trials.iter().map(&mut f).collect())
                .collect(),
        }
    }
}
impl<K: PartialEq + Clone + Display, T> ConditionTable<K, T> {
    /// Trials of `key`; unknown keys and empty columns are an error.
    pub fn trials(&self, key: &K) -> Result<&[T], ExtractError> {
        match self.get(key) {
            Some(trials) if !trials.is_empty() => Ok(trials),
            _ => Err(ExtractError::EmptyCondition(key.to_string())),
        }
    }
}
/// The seven per-signal tables of one extraction.
#[derive(Clone, Debug)]
pub struct SignalTables<K, S: TrialShape> {
    pub fluorescence: ConditionTable<K, S::Trace>,
    pub pupil_size: ConditionTable<K, S::Series>,
    pub pupil_location: ConditionTable<K, S::Points>,
    pub time: ConditionTable<K, S::Series>,
    pub running_speed: ConditionTable<K, S::Series>,
    pub pupil_rate: ConditionTable<K, S::Series>,
    pub saccade_rate: ConditionTable<K, S::Series>,
}
impl<K: PartialEq + Clone, S: TrialShape> SignalTables<K, S> {
    pub fn with_columns(keys: &[K]) -> Self {
        Self {
            fluorescence: ConditionTable::with_columns(keys.iter().cloned()),
            pupil_size: ConditionTable::with_columns(keys.iter().cloned()),
            pupil_location: ConditionTable::with_columns(keys.iter().cloned()),
            time: ConditionTable::with_columns(keys.iter().cloned()),
            running_speed: ConditionTable::with_columns(keys.iter().cloned()),
            pupil_rate: ConditionTable::with_columns(keys.iter().cloned()),
            saccade_rate: ConditionTable::with_columns(keys.iter().cloned()),
        }
    }
    pub fn keys(&self, kind: SignalKind) -> &[K] {
        match kind {
            SignalKind::Fluorescence => self.fluorescence.keys(),
            SignalKind::PupilSize => self.pupil_size.keys(),
            SignalKind::PupilLocation => self.pupil_location.keys(),
            SignalKind::Time => self.time.keys(),
            SignalKind::RunningSpeed => self.running_speed.keys(),
            SignalKind::PupilRate => self.pupil_rate.keys(),
            SignalKind::SaccadeRate => self.saccade_rate.keys(),
        }
    }
    pub fn trial_counts(&self, kind: SignalKind) -> Vec<usize> {
        match kind {
            SignalKind::Fluorescence => self.fluorescence.trial_counts(),
            SignalKind::PupilSize => self.pupil_size.trial_counts(),
            SignalKind::PupilLocation => self.pupil_location.trial_counts(),
            SignalKind::Time => self.time.trial_counts(),
            SignalKind::RunningSpeed => self.running_speed.trial_counts(),
            SignalKind::PupilRate => self.pupil_rate.trial_counts(),
            SignalKind::SaccadeRate => self.saccade_rate.trial_counts(),
        }
    }
    /// True when every table has the same keys and per-key trial counts.
    pub fn is_aligned(&self) -> bool {
        let keys = self.keys(SignalKind::Fluorescence);
        let counts = self.trial_counts(SignalKind::Fluorescence);
        SignalKind::ALL
            .iter()
            .all(|&kind| self.keys(kind) == keys && self.trial_counts(kind) == counts)
    }
}
/// Result of one extraction call: the tables plus the cell ids indexing the
/// fluorescence rows.
#[derive(Clone, Debug)]
pub struct Extraction<K, S: TrialShape> {
    pub stimulus: StimulusKind,
    pub trace: TraceKind,
    pub cell_ids: Vec<u64>,
    pub tables: SignalTables<K, S>,
}
impl<K: PartialEq + Clone> Extraction<K, Segments> {
    /// Collapses every stored window to its mean, as a binned extraction would.
    pub fn binned(&self) -> Extraction<K, Binned> {
        let t = &self.tables;
        Extraction {
            stimulus: self.stimulus,
            trace: self.trace,
            cell_ids: self.cell_ids.clone(),
            tables: SignalTables {
                fluorescence: t.fluorescence.map(|w| mean_over_time(w.view())),
                pupil_size: t.pupil_size.map(|w| nanmean(w.view())),
                pupil_location: t.pupil_location.map(|w| nanmean_over_rows(w.view())),
                time: t.time.map(|w| nanmean(w.view())),
                running_speed: t.running_speed.map(|w| nanmean(w.view())),
                pupil_rate: t.pupil_rate.map(|w| nanmean(w.view())),
                saccade_rate: t.saccade_rate.map(|w| nanmean(w.view())),
            },
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn columns_are_independent() {
        let mut table: ConditionTable<&str, u32> = ConditionTable::with_columns(["a", "b"]);
        table.push(&"a", 1);
        table.push(&"a", 2);
        assert_eq!(table.get(&"a"), Some(&[1, 2][..]));
        assert_eq!(table.get(&"b"), Some(&[][..]));
        assert_eq!(table.trial_counts(), vec![2, 0]);
    }
    #[test]
    fn push_opens_new_columns_in_order() {
        let mut table = ConditionTable::new();
        table.push(&3_i64, "x");
        table.push(&1_i64, "y");
        table.push(&3_i64, "z");
        assert_eq!(table.keys(), &[3, 1]);
        assert_eq!(table.trial(&3, 1), Some(&"z"));
        assert_eq!(table.total_trials(), 3);
        assert_eq!(table.max_trials(), 2);
    }
    #[test]
    fn repeats_are_not_capped() {
        let mut table = ConditionTable::new();
        for trial in 0..120 {
            table.push(&0_i64, trial);
        }
        assert_eq!(table.trial_count(&0), 120);
    }
    #[test]
    fn empty_condition_lookup_is_typed() {
        let table: ConditionTable<i64, f64> = ConditionTable::with_columns([7]);
        assert!(matches!(
            table.trials(&7),
            Err(ExtractError::EmptyCondition(key)) if key == "7"
        ));
        assert!(matches!(table.trials(&8), Err(ExtractError::EmptyCondition(_))));
    }
    #[test]
    fn map_keeps_layout() {
        let mut table = ConditionTable::new();
        table.push(&"k", 2.0);
        table.push(&"k", 4.0);
        let doubled = table.map(|v| v * 2.0);
        assert_eq!(doubled.keys(), table.keys());
        assert_eq!(doubled.get(&"k"), Some(&[4.0, 8.0][..]));
    }
}
