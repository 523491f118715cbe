//! Issuing and rendering from different threads through the shared gate.

use std::{
    panic,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc, Mutex,
    },
    thread,
    time::Duration,
};

use emoji_synth::{
    DataSink, DataSource, SampleFormat, SoundEffect, SoundEmojiSynth, TonePrint, TonePrintKind,
    Waveform,
};

/// Forwards every pull request over a channel.
struct ChannelSink(Mutex<mpsc::Sender<()>>);

impl DataSink for ChannelSink {
    fn pull_request(&self) {
        let _ = self.0.lock().unwrap().send(());
    }
}

fn tone(duration_ms: f32) -> Vec<SoundEffect> {
    vec![SoundEffect::builder()
        .tone(Waveform::Triangle)
        .duration_ms(duration_ms)
        .build()
        .unwrap()]
}

#[test]
fn play_on_one_thread_wakes_a_sink_on_another() {
    let (tx, rx) = mpsc::channel();
    let mut synth = SoundEmojiSynth::default();
    DataSource::connect(&mut synth, Arc::new(ChannelSink(Mutex::new(tx))));
    assert_eq!(DataSource::format(&synth), SampleFormat::Unsigned16);

    let issuer = {
        let synth = synth.clone();
        thread::spawn(move || synth.play(tone(50.0)))
    };

    rx.recv_timeout(Duration::from_secs(5)).unwrap();
    issuer.join().unwrap().unwrap();

    let mut total = 0;
    loop {
        let buffer = DataSource::pull(&mut synth);
        if buffer.is_empty() {
            break;
        }
        total += buffer.len();
    }
    assert_eq!(total, 2205);
}

#[test]
fn stop_from_another_thread_ends_playback() {
    let synth = SoundEmojiSynth::default();
    synth.play(tone(60_000.0)).unwrap();
    assert_eq!(synth.pull().len(), 512);

    let stopper = synth.clone();
    thread::spawn(move || stopper.stop()).join().unwrap();

    assert!(!synth.is_active());
    assert!(synth.pull().is_empty());
}

#[test]
fn renderer_keeps_pulling_while_requests_arrive() {
    let synth = SoundEmojiSynth::default();
    let running = Arc::new(AtomicBool::new(true));

    let renderer = {
        let synth = synth.clone();
        let running = running.clone();
        thread::spawn(move || {
            let mut buffers = 0usize;
            while running.load(Ordering::SeqCst) {
                let buffer = synth.pull();
                assert!(buffer.len() <= 512);
                buffers += 1;
            }
            buffers
        })
    };

    for i in 0..100 {
        let duration = 5.0 + (i % 7) as f32;
        synth.play(tone(duration)).unwrap();
        if i % 10 == 0 {
            synth.set_or_mask(0);
        }
    }
    running.store(false, Ordering::SeqCst);
    assert!(renderer.join().unwrap() > 0);
}

/// Panics on the first sample it is asked for.
struct Faulty(AtomicBool);

impl TonePrint for Faulty {
    fn sample(&self, _parameter: f32, _position: usize) -> u16 {
        if !self.0.swap(true, Ordering::SeqCst) {
            panic!("faulty tone print");
        }
        0
    }
}

#[test]
fn gate_survives_a_panicking_renderer() {
    let synth = SoundEmojiSynth::default();
    synth
        .play(vec![SoundEffect::builder()
            .tone(TonePrintKind::custom(Faulty(AtomicBool::new(false))))
            .build()
            .unwrap()])
        .unwrap();

    let renderer = synth.clone();
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = thread::spawn(move || renderer.pull()).join();
    panic::set_hook(previous_hook);
    assert!(result.is_err());

    synth.play(tone(10.0)).unwrap();
    assert_eq!(synth.pull().len(), 441);
}
