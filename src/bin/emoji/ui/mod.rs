//! TUI for the soundboard
//!
//! Number keys queue presets, the scope shows what the callback rendered.

mod presets;
mod scope;
pub mod state;
mod transport;

use std::{sync::Arc, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use tracing::warn;

use emoji_synth::{synth::message::SynthMessage, SoundEffect};

use presets::render_presets;
use scope::render_scope;
use state::{UiStateInit, UiStateUpdate};
use transport::render_transport;

/// Scope history, in samples
const VIS_BUFFER_SIZE: usize = 1024;

pub struct UiApp {
    commands: Producer<SynthMessage>,
    scope_rx: Consumer<f32>,
    state_rx: Consumer<UiStateUpdate>,
    init: UiStateInit,
    current_state: UiStateUpdate,
    presets: Vec<(&'static str, Arc<[SoundEffect]>)>,
    /// Preset most recently queued
    selected: Option<usize>,
    audio_buffer: Vec<f32>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        commands: Producer<SynthMessage>,
        scope_rx: Consumer<f32>,
        state_rx: Consumer<UiStateUpdate>,
        init: UiStateInit,
        presets: Vec<(&'static str, Arc<[SoundEffect]>)>,
    ) -> Self {
        Self {
            commands,
            scope_rx,
            state_rx,
            init,
            current_state: UiStateUpdate::default(),
            presets,
            selected: None,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_state();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Append new scope samples, keeping the last VIS_BUFFER_SIZE
    fn poll_audio(&mut self) {
        while let Ok(sample) = self.scope_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    /// Keep only the latest snapshot
    fn poll_state(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.current_state = state;
        }
    }

    fn send(&mut self, msg: SynthMessage) {
        if self.commands.push(msg).is_err() {
            warn!("command queue full, dropping command");
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('s') | KeyCode::Char(' ') => {
                self.selected = None;
                self.send(SynthMessage::Stop);
            }
            KeyCode::Char(c) => {
                let Some(index) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)) else {
                    return;
                };
                if let Some((_, effects)) = self.presets.get(index) {
                    let msg = SynthMessage::Play(effects.clone());
                    self.selected = Some(index);
                    self.send(msg);
                }
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Status bar
                Constraint::Min(6),     // Presets
                Constraint::Length(10), // Scope
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        render_transport(frame, chunks[0], &self.init, &self.current_state);

        let presets_block = Block::default().title(" Sound emojis ").borders(Borders::ALL);
        let presets_inner = presets_block.inner(chunks[1]);
        frame.render_widget(presets_block, chunks[1]);
        render_presets(frame, presets_inner, &self.init, &self.current_state, self.selected);

        render_scope(frame, chunks[2], &self.audio_buffer, &self.current_state);

        let help = Paragraph::new(" [1-9] Play  [S/Space] Stop  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
