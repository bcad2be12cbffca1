//! Line chart of the minimum pixel value per frame.

use crate::error::{ProbeError, ProbeResult};
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

/// Axis ranges covering `series` with a little headroom; `None` when empty.
pub fn axis_ranges(series: &[(u32, u8)]) -> Option<(Range<u32>, Range<u32>)> {
    let first = series.first()?.0;
    let last = series.last()?.0;
    let y_max = series.iter().map(|&(_, min)| min as u32).max()?;
    Some((first..last.max(first.saturating_add(1)), 0..y_max + 1))
}

/// Render `(frame_num, min_pixel)` pairs, ascending by frame, to a PNG.
pub fn plot_min_pixels(
    series: &[(u32, u8)],
    output_path: &Path,
    size: (u32, u32),
) -> ProbeResult<()> {
    let (x_range, y_range) = axis_ranges(series).ok_or(ProbeError::NoFrames)?;
    draw_chart(series, output_path, size, x_range, y_range)
        .map_err(|e| ProbeError::Plot(e.to_string()))
}

fn draw_chart(
    series: &[(u32, u8)],
    output_path: &Path,
    size: (u32, u32),
    x_range: Range<u32>,
    y_range: Range<u32>,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Minimum Pixel Value per Frame", ("sans-serif", 28))
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Frame Number")
        .y_desc("Minimum Pixel Value")
        .draw()?;

    chart.draw_series(LineSeries::new(
        series.iter().map(|&(frame, min)| (frame, min as u32)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}
