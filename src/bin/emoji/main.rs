//! emoji-synth - terminal soundboard for the sound emoji synthesizer
//!
//! Run with: cargo run --bin emoji-synth
//! Logs go to stderr; set RUST_LOG (e.g. `RUST_LOG=emoji_synth=debug`) and
//! redirect stderr to a file to keep the TUI clean.

mod app;
mod ui;

use app::Soundboard;
use emoji_synth::voices;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut soundboard = Soundboard::new();
    for (name, effects) in voices::all() {
        soundboard = soundboard.preset(name, effects);
    }
    soundboard.run()
}
