use std::fmt::Display;
use log::debug;
use ndarray::{s, Array2};
use serde::Serialize;
use crate::extract::table::ConditionTable;
use crate::extract::ExtractError;
/// Trial- and cell-averaged fluorescence of one condition.
#[derive(Clone, Debug, Serialize)]
pub struct ConditionResponse {
    pub label: String,
    pub trials: usize,
    pub mean: Vec<f64>, // one value per sample offset
}
fn shortest(trials: &[Array2<f64>]) -> usize {
    trials.iter().map(|t| t.ncols()).min().unwrap_or(0)
}
/// Mean trace per condition, over trials and cells, truncated to the shortest
/// trial of that condition. Conditions without trials are skipped.
pub fn condition_responses<K: PartialEq + Clone + Display>(
    table: &ConditionTable<K, Array2<f64>>,
) -> Vec<ConditionResponse> {
    let mut responses = Vec::with_capacity(table.len());
    for (key, trials) in table.iter() {
        if trials.is_empty() {
            debug!("condition {key} has no trials, no response");
            continue;
        }
        let width = shortest(trials);
        let mut mean = vec![0.0; width];
        let mut count = 0usize;
        for trial in trials {
            for cell in trial.rows() {
                for (acc, v) in mean.iter_mut().zip(cell.iter()) {
                    *acc += v;
                }
                count += 1;
            }
        }
        if count > 0 {
            mean.iter_mut().for_each(|v| *v /= count as f64);
        }
        responses.push(ConditionResponse {
            label: key.to_string(),
            trials: trials.len(),
            mean,
        });
    }
    responses
}
/// Trial-averaged `[cells x samples]` response of one condition.
pub fn per_cell_response<K: PartialEq + Clone + Display>(
    table: &ConditionTable<K, Array2<f64>>,
    key: &K,
) -> Result<Array2<f64>, ExtractError> {
    let trials = table.trials(key)?;
    let width = shortest(trials);
    let mut sum = Array2::<f64>::zeros((trials[0].nrows(), width));
    for trial in trials {
        sum += &trial.slice(s![.., ..width]);
    }
    Ok(sum / trials.len() as f64)
}
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    fn table() -> ConditionTable<i64, Array2<f64>> {
        let mut table = ConditionTable::with_columns([1, 2]);
        table.push(&1, array![[1.0, 2.0, 3.0], [3.0, 4.0, 5.0]]);
        table.push(&1, array![[5.0, 6.0], [7.0, 8.0]]);
        table
    }
    #[test]
    fn averages_over_trials_and_cells() {
        let responses = condition_responses(&table());
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].label, "1");
        assert_eq!(responses[0].trials, 2);
        assert_eq!(responses[0].mean.len(), 2);
        assert_abs_diff_eq!(responses[0].mean[0], 4.0);
        assert_abs_diff_eq!(responses[0].mean[1], 5.0);
    }
    #[test]
    fn per_cell_response_keeps_cells() {
        let response = per_cell_response(&table(), &1).unwrap();
        assert_eq!(response, array![[3.0, 4.0], [5.0, 6.0]]);
    }
    #[test]
    fn per_cell_response_of_empty_condition_fails() {
        assert!(matches!(
            per_cell_response(&table(), &2),
            Err(ExtractError::EmptyCondition(_))
        ));
    }
}
