//! Soundboard - audio stream setup and the realtime render callback

use std::sync::Arc;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use tracing::{error, info};

use emoji_synth::{
    io::converter::samples_to_f32, synth::message::SynthMessage, EngineConfig, SoundEffect,
    Synthesizer,
};

use super::ui::{
    state::{UiStateInit, UiStateUpdate},
    UiApp,
};

/// Commands queued between two audio callbacks
const COMMAND_QUEUE_SIZE: usize = 64;
/// Samples kept in flight for the scope
const SCOPE_QUEUE_SIZE: usize = 8192;
const STATE_QUEUE_SIZE: usize = 64;

/// Builder for the soundboard application
pub struct Soundboard {
    presets: Vec<(&'static str, Arc<[SoundEffect]>)>,
}

impl Soundboard {
    pub fn new() -> Self {
        Self { presets: Vec::new() }
    }

    /// Add a preset; the n-th preset is bound to key `n`.
    pub fn preset(mut self, name: &'static str, effects: Vec<SoundEffect>) -> Self {
        self.presets.push((name, Arc::from(effects)));
        self
    }

    /// Open the default output device and run the UI until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        info!(sample_rate, channels, "opened output device");

        let mut synth = Synthesizer::new(EngineConfig::default().with_sample_rate(sample_rate))
            .wrap_err("device sample rate is unusable")?;

        let (command_tx, mut command_rx) = RingBuffer::<SynthMessage>::new(COMMAND_QUEUE_SIZE);
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE_SIZE);
        let (mut state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(STATE_QUEUE_SIZE);

        // Render scratch space, allocated once outside the callback.
        let mut block = vec![0u16; synth.buffer_size()];
        let mut mono = vec![0.0f32; synth.buffer_size()];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                // Commands land between buffers, never inside one.
                synth.apply_messages(&mut command_rx);

                let total_frames = data.len() / channels;
                let range = synth.sample_range();
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(block.len());
                    let produced = synth.render_into(&mut block[..frames]);
                    samples_to_f32(&block[..produced], range, &mut mono[..produced]);
                    mono[produced..frames].fill(0.0);

                    let out_off = frames_written * channels;
                    for (i, &s) in mono[..frames].iter().enumerate() {
                        let frame = out_off + i * channels;
                        data[frame..frame + channels].fill(s);
                        // Scope is best-effort; drop samples when the UI lags.
                        let _ = scope_tx.push(s);
                    }

                    frames_written += frames;
                }

                let _ = state_tx.push(UiStateUpdate::capture(&synth));
            },
            |err| error!(%err, "audio stream error"),
            None,
        )?;

        stream.play()?;

        let init = UiStateInit::new(
            sample_rate,
            channels,
            self.presets.iter().map(|(name, effects)| (*name, effects.len())).collect(),
        );
        let mut app = UiApp::new(command_tx, scope_rx, state_rx, init, self.presets);

        let mut terminal = ratatui::init();
        let result = app.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        result
    }
}

impl Default for Soundboard {
    fn default() -> Self {
        Self::new()
    }
}
