/// Number of samples needed to play `duration_ms` milliseconds at `sample_rate`.
///
/// Rounds to the nearest sample. Negative, zero and non-finite durations
/// need no samples at all.
///
/// # Example
/// ```
/// use emoji_synth::sequencing::duration::samples_for_duration;
/// assert_eq!(samples_for_duration(100.0, 44_100), 4410);
/// ```
#[inline]
pub fn samples_for_duration(duration_ms: f32, sample_rate: u32) -> usize {
    let samples = (duration_ms as f64 * sample_rate as f64 / 1000.0).round();
    if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    }
}

/// Playout time in milliseconds of `samples` samples at `sample_rate`.
#[inline]
pub fn duration_for_samples(samples: usize, sample_rate: u32) -> f32 {
    if sample_rate == 0 {
        return 0.0;
    }
    (samples as f64 * 1000.0 / sample_rate as f64) as f32
}
