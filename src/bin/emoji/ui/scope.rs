//! Scope widget: min/max envelope of the recent output, one pair per
//! braille column, with the playing effect in the title.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use super::state::UiStateUpdate;

pub fn render_scope(frame: &mut Frame, area: Rect, samples: &[f32], state: &UiStateUpdate) {
    let peak = samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
    let title = if state.is_active {
        format!(
            " Scope  #{} {:.0} Hz  peak {peak:.2} ",
            state.effect_index, state.frequency
        )
    } else {
        " Scope  idle ".to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    // Braille packs two dots per cell horizontally.
    let columns = block.inner(area).width as usize * 2;
    let (upper, lower) = envelope(samples, columns);
    let color = if state.is_active { Color::Cyan } else { Color::DarkGray };

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&upper),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&lower),
    ];

    let axis = Style::default().fg(Color::DarkGray);
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(Axis::default().bounds([0.0, 1.0]).style(axis))
        .y_axis(Axis::default().bounds([-1.0, 1.0]).style(axis));

    frame.render_widget(chart, area);
}

/// Split `samples` into `columns` buckets and return the max and min trace.
///
/// With fewer samples than columns every sample gets its own bucket.
fn envelope(samples: &[f32], columns: usize) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    if samples.is_empty() || columns == 0 {
        return (Vec::new(), Vec::new());
    }

    let chunk = samples.len().div_ceil(columns);
    let buckets = samples.len().div_ceil(chunk);
    let width = buckets.saturating_sub(1).max(1) as f64;

    samples
        .chunks(chunk)
        .enumerate()
        .map(|(i, bucket)| {
            let (lo, hi) = bucket
                .iter()
                .fold((f32::MAX, f32::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
            let x = i as f64 / width;
            ((x, hi as f64), (x, lo as f64))
        })
        .unzip()
}
