//! Preset list - one row per sound emoji with a progress bar on the active one

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::state::{UiStateInit, UiStateUpdate};

const LABEL_WIDTH: u16 = 16;

pub fn render_presets(
    frame: &mut Frame,
    area: Rect,
    init: &UiStateInit,
    state: &UiStateUpdate,
    selected: Option<usize>,
) {
    if area.height < 1 || area.width < LABEL_WIDTH + 4 {
        return;
    }

    let bar_width = area.width.saturating_sub(LABEL_WIDTH + 2) as usize;

    let lines: Vec<Line> = init
        .presets
        .iter()
        .enumerate()
        .map(|(i, &(name, len))| {
            let playing = state.is_active && selected == Some(i);
            let label = format!("[{}] {:10.10} ", i + 1, name);

            let mut spans = vec![Span::styled(
                label,
                Style::default().fg(if playing { Color::White } else { Color::DarkGray }),
            )];

            if playing {
                // One cell per sound effect, the active one filled by progress.
                let cell = (bar_width / len.max(1)).max(1);
                let mut bar = String::with_capacity(bar_width);
                for effect in 0..len {
                    let filled = match effect.cmp(&state.effect_index) {
                        std::cmp::Ordering::Less => cell,
                        std::cmp::Ordering::Equal => (state.progress() * cell as f64) as usize,
                        std::cmp::Ordering::Greater => 0,
                    };
                    bar.push_str(&"▓".repeat(filled.min(cell)));
                    bar.push_str(&"░".repeat(cell - filled.min(cell)));
                }
                spans.push(Span::styled(bar, Style::default().fg(Color::Cyan)));
            } else {
                spans.push(Span::styled(
                    format!("{len} effects"),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
