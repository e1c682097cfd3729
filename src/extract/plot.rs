use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::extract::error::ExtractError;
use crate::extract::response::ConditionResponse;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
            palette: vec![BLUE, RED, GREEN, CYAN, MAGENTA, YELLOW, WHITE],
        }
    }
}
impl PlotStyle {
    /// Line colour of the `idx`-th condition, cycling through the palette.
    /// `None` when the palette is empty.
    pub fn color(&self, idx: usize) -> Option<RGBColor> {
        let len = self.palette.len();
        (len > 0).then(|| self.palette[idx % len])
    }
}
fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}
fn value_bounds(responses: &[ConditionResponse]) -> (f64, f64) {
    let finite = || {
        responses
            .iter()
            .flat_map(|r| r.mean.iter().copied())
            .filter(|v| v.is_finite())
    };
    let y_min = finite().fold(f64::INFINITY, f64::min);
    let y_max = finite().fold(f64::NEG_INFINITY, f64::max);
    if !y_min.is_finite() || (y_max - y_min).abs() < f64::EPSILON {
        let centre = if y_min.is_finite() { y_min } else { 0.0 };
        (centre - 1.0, centre + 1.0)
    } else {
        (y_min, y_max)
    }
}
/// One line per condition: mean fluorescence against sample offset in the
/// trial. Line colours follow `style.palette` in response order; no text is
/// drawn, so no font backend is needed.
pub fn render_condition_responses_png(
    responses: &[ConditionResponse],
    style: &PlotStyle,
) -> Result<Vec<u8>, ExtractError> {
    let longest = responses.iter().map(|r| r.mean.len()).max().unwrap_or(0);
    if longest == 0 {
        return Err(ExtractError::Plot("no condition responses to draw".into()));
    }
    if style.palette.is_empty() {
        return Err(ExtractError::Plot("plot palette is empty".into()));
    }
    let mut buffer = vec![0u8; buffer_len(style.width, style.height)];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let (y_min, y_max) = value_bounds(responses);
        let x_max = (longest.max(2) - 1) as f64;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)?;
        for (idx, response) in responses.iter().enumerate() {
            let series = response
                .mean
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, v)| (i as f64, *v));
            let color = style
                .color(idx)
                .ok_or_else(|| ExtractError::Plot("plot palette is empty".into()))?;
            chart.draw_series(LineSeries::new(series, &color))?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExtractError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ExtractError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    fn response(label: &str, mean: Vec<f64>) -> ConditionResponse {
        ConditionResponse {
            label: label.into(),
            trials: 3,
            mean,
        }
    }
    #[test]
    fn renders_png() {
        let responses = vec![
            response("0", vec![0.0, 0.5, 1.0, 0.5]),
            response("5", vec![0.2, f64::NAN, 0.4, 0.1]),
        ];
        let style = PlotStyle {
            width: 120,
            height: 80,
            ..PlotStyle::default()
        };
        let png = render_condition_responses_png(&responses, &style).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
    #[test]
    fn empty_responses_are_rejected() {
        let err = render_condition_responses_png(&[], &PlotStyle::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Plot(_)));
    }
    #[test]
    fn empty_palette_has_no_colour() {
        let style = PlotStyle {
            palette: Vec::new(),
            ..PlotStyle::default()
        };
        assert_eq!(style.color(3), None);
        assert_eq!(PlotStyle::default().color(8), Some(RED));
        let err = render_condition_responses_png(&[response("1", vec![0.0, 1.0])], &style).unwrap_err();
        assert!(matches!(err, ExtractError::Plot(_)));
    }
    #[test]
    fn buffer_size_does_not_wrap_in_u32() {
        assert_eq!(buffer_len(70_000, 70_000), 14_700_000_000);
        assert_eq!(buffer_len(900, 400), 1_080_000);
    }
    #[test]
    fn flat_responses_get_a_nonzero_range() {
        let (lo, hi) = value_bounds(&[response("1", vec![2.0, 2.0])]);
        assert!(hi > lo);
    }
}
