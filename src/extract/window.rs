use ndarray::{s, ArrayView1, ArrayView2};
use crate::extract::stimulus::SCENE_WINDOW_SAMPLES;
use crate::extract::ExtractError;
use crate::types::SignalKind;
/// Half-open sample range `[start, end)` of one trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialWindow {
    pub start: usize,
    pub end: usize,
}
impl TrialWindow {
    pub fn new(start: usize, end: usize) -> Result<Self, ExtractError> {
        if start > end {
            return Err(ExtractError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }
    /// Natural-scene window, fixed at [`SCENE_WINDOW_SAMPLES`]. The end
    /// saturates, so a start near `usize::MAX` fails `check` instead of wrapping.
    pub fn scene(start: usize) -> Self {
        Self {
            start,
            end: start.saturating_add(SCENE_WINDOW_SAMPLES),
        }
    }
    pub fn len(&self) -> usize {
        self.end - self.start
    }
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
    /// Fails when the window reaches past `len` samples of `signal`.
    pub fn check(&self, signal: SignalKind, len: usize) -> Result<(), ExtractError> {
        if self.end > len {
            return Err(ExtractError::IndexOutOfRange {
                signal,
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(())
    }
    /// Time columns of a `[rows x time]` matrix.
    pub fn columns<'a>(
        &self,
        signal: SignalKind,
        data: ArrayView2<'a, f64>,
    ) -> Result<ArrayView2<'a, f64>, ExtractError> {
        self.check(signal, data.ncols())?;
        Ok(data.slice_move(s![.., self.start..self.end]))
    }
    /// Time rows of a `[time x dims]` matrix.
    pub fn rows<'a>(
        &self,
        signal: SignalKind,
        data: ArrayView2<'a, f64>,
    ) -> Result<ArrayView2<'a, f64>, ExtractError> {
        self.check(signal, data.nrows())?;
        Ok(data.slice_move(s![self.start..self.end, ..]))
    }
    pub fn series<'a>(
        &self,
        signal: SignalKind,
        data: ArrayView1<'a, f64>,
    ) -> Result<ArrayView1<'a, f64>, ExtractError> {
        self.check(signal, data.len())?;
        Ok(data.slice_move(s![self.start..self.end]))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};
    #[test]
    fn scene_window_ignores_table_end() {
        let window = TrialWindow::scene(100);
        assert_eq!(window, TrialWindow { start: 100, end: 107 });
        assert_eq!(window.len(), 7);
    }
    #[test]
    fn scene_window_near_usize_max_is_out_of_range() {
        let series = Array1::<f64>::zeros(10);
        let err = TrialWindow::scene(usize::MAX - 2)
            .series(SignalKind::Time, series.view())
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::IndexOutOfRange { end: usize::MAX, len: 10, .. }
        ));
    }
    #[test]
    fn reversed_window_is_rejected() {
        let err = TrialWindow::new(20, 10).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidWindow { start: 20, end: 10 }));
    }
    #[test]
    fn slices_columns_and_rows() {
        let trace = Array2::from_shape_fn((3, 50), |(c, t)| (c * 100 + t) as f64);
        let window = TrialWindow::new(10, 14).unwrap();
        let cols = window.columns(SignalKind::Fluorescence, trace.view()).unwrap();
        assert_eq!(cols.dim(), (3, 4));
        assert_eq!(cols[[2, 0]], 210.0);
        let location = Array2::from_shape_fn((50, 2), |(t, d)| (t * 2 + d) as f64);
        let rows = window.rows(SignalKind::PupilLocation, location.view()).unwrap();
        assert_eq!(rows.dim(), (4, 2));
        assert_eq!(rows[[0, 1]], 21.0);
    }
    #[test]
    fn window_past_the_end_is_out_of_range() {
        let series = Array1::<f64>::zeros(105);
        let err = TrialWindow::scene(100)
            .series(SignalKind::RunningSpeed, series.view())
            .unwrap_err();
        match err {
            ExtractError::IndexOutOfRange { signal, start, end, len } => {
                assert_eq!(signal, SignalKind::RunningSpeed);
                assert_eq!((start, end, len), (100, 107, 105));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
