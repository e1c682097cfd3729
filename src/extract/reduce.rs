//! Per-trial shapes: keep the time-resolved window, or collapse it to a mean.
//!
//! Fluorescence uses a plain mean, so a NaN sample poisons its cell for that
//! trial. Every behavioral signal uses a NaN-skipping mean. An empty window
//! reduces to NaN in both cases.
use std::fmt::Debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use crate::types::ExtractionMode;
/// How a sliced trial window is stored.
pub trait TrialShape {
    /// Fluorescence, from a `[cells x window]` slice.
    type Trace: Clone + Debug;
    /// One-dimensional signals, from a `[window]` slice.
    type Series: Clone + Debug;
    /// Pupil location, from a `[window x 2]` slice.
    type Points: Clone + Debug;
    const MODE: ExtractionMode;
    fn trace(window: ArrayView2<f64>) -> Self::Trace;
    fn series(window: ArrayView1<f64>) -> Self::Series;
    fn points(window: ArrayView2<f64>) -> Self::Points;
}
/// Keeps every sample of the window.
#[derive(Clone, Copy, Debug, Default)]
pub struct Segments;
/// One mean per trial.
#[derive(Clone, Copy, Debug, Default)]
pub struct Binned;
impl TrialShape for Segments {
    type Trace = Array2<f64>;
    type Series = Array1<f64>;
    type Points = Array2<f64>;
    const MODE: ExtractionMode = ExtractionMode::Segments;
    fn trace(window: ArrayView2<f64>) -> Self::Trace {
        window.to_owned()
    }
    fn series(window: ArrayView1<f64>) -> Self::Series {
        window.to_owned()
    }
    fn points(window: ArrayView2<f64>) -> Self::Points {
        window.to_owned()
    }
}
impl TrialShape for Binned {
    type Trace = Array1<f64>;
    type Series = f64;
    type Points = Array1<f64>;
    const MODE: ExtractionMode = ExtractionMode::Binned;
    fn trace(window: ArrayView2<f64>) -> Self::Trace {
        mean_over_time(window)
    }
    fn series(window: ArrayView1<f64>) -> Self::Series {
        nanmean(window)
    }
    fn points(window: ArrayView2<f64>) -> Self::Points {
        nanmean_over_rows(window)
    }
}
/// Per-row mean of a `[rows x time]` matrix. NaN propagates.
pub fn mean_over_time(trace: ArrayView2<f64>) -> Array1<f64> {
    trace
        .mean_axis(Axis(1))
        .unwrap_or_else(|| Array1::from_elem(trace.nrows(), f64::NAN))
}
/// Mean of the non-NaN samples; NaN when none are left.
pub fn nanmean(series: ArrayView1<f64>) -> f64 {
    let (sum, count) = series
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0_f64, 0usize), |(sum, count), v| (sum + *v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}
/// Per-column NaN-skipping mean of a `[time x dims]` matrix.
pub fn nanmean_over_rows(points: ArrayView2<f64>) -> Array1<f64> {
    points.axis_iter(Axis(1)).map(nanmean).collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    #[test]
    fn nanmean_skips_missing_samples() {
        let series = array![1.0, f64::NAN, 3.0];
        assert_abs_diff_eq!(nanmean(series.view()), 2.0);
        let gaps = array![f64::NAN, f64::NAN];
        assert!(nanmean(gaps.view()).is_nan());
    }
    #[test]
    fn fluorescence_mean_propagates_nan() {
        let trace = array![[1.0, 2.0, 3.0], [4.0, f64::NAN, 6.0]];
        let means = Binned::trace(trace.view());
        assert_abs_diff_eq!(means[0], 2.0);
        assert!(means[1].is_nan());
    }
    #[test]
    fn empty_window_reduces_to_nan() {
        let trace = Array2::<f64>::zeros((4, 0));
        let means = mean_over_time(trace.view());
        assert_eq!(means.len(), 4);
        assert!(means.iter().all(|v| v.is_nan()));
        let points = Array2::<f64>::zeros((0, 2));
        assert!(Binned::points(points.view()).iter().all(|v| v.is_nan()));
    }
    #[test]
    fn pupil_location_is_averaged_per_axis() {
        let points = array![[1.0, 10.0], [3.0, f64::NAN], [f64::NAN, 30.0]];
        let mean = nanmean_over_rows(points.view());
        assert_abs_diff_eq!(mean[0], 2.0);
        assert_abs_diff_eq!(mean[1], 20.0);
    }
    #[test]
    fn segments_keep_the_window() {
        let series = array![1.0, 2.0, 3.0];
        assert_eq!(Segments::series(series.view()), series);
    }
}
