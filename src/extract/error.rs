use thiserror::Error;
use crate::types::{SignalKind, StimulusKind};
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("session does not provide the {0} signal")]
    MissingSignal(SignalKind),
    #[error("session does not provide a {0} stimulus table")]
    MissingStimulus(StimulusKind),
    #[error("trial window [{start}, {end}) exceeds the {signal} signal of length {len}")]
    IndexOutOfRange {
        signal: SignalKind,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("trial window starts after it ends: [{start}, {end})")]
    InvalidWindow { start: usize, end: usize },
    #[error("condition {0} has no trials")]
    EmptyCondition(String),
    #[error("{signal} length mismatch: expected {expected}, got {actual}")]
    InconsistentLength {
        signal: SignalKind,
        expected: usize,
        actual: usize,
    },
    #[error("cell specimen id {0} is not part of this session")]
    UnknownCell(u64),
    #[error("malformed session data: {0}")]
    MalformedSession(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ExtractError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ExtractError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for ExtractError {
    fn from(value: image::ImageError) -> Self {
        ExtractError::Plot(value.to_string())
    }
}
impl From<ndarray::ShapeError> for ExtractError {
    fn from(value: ndarray::ShapeError) -> Self {
        ExtractError::MalformedSession(value.to_string())
    }
}
