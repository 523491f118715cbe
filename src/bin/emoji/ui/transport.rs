//! Status bar - device format, play state and the instantaneous tone

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{UiStateInit, UiStateUpdate};

pub fn render_transport(frame: &mut Frame, area: Rect, init: &UiStateInit, state: &UiStateUpdate) {
    let block = Block::default().title(" emoji-synth ").borders(Borders::ALL);

    let (symbol, label, color) = if state.is_active {
        ("▶", "Playing", Color::Green)
    } else {
        ("■", "Idle", Color::Yellow)
    };

    let mut spans = vec![
        Span::styled(
            format!(" {:.1}kHz x{}  ", init.sample_rate as f32 / 1000.0, init.channels),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{symbol} {label}  "), Style::default().fg(color)),
    ];

    if state.is_active {
        spans.push(Span::styled(
            format!(
                "effect {}  step {}  {:7.1} Hz  vol {:.2}  ",
                state.effect_index, state.step, state.frequency, state.volume
            ),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::styled(
            format!("{}/{}", state.samples_written, state.samples_required),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
