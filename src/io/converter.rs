/// Map an unsigned sample in `[0, sample_range]` onto `[-1.0, 1.0]`.
///
/// Bits above the range (an OR-mask carrying control data) are stripped
/// by clamping; a zero range maps everything to silence.
#[inline]
pub fn sample_to_f32(sample: u16, sample_range: u16) -> f32 {
    if sample_range == 0 {
        return 0.0;
    }
    let normalized = sample.min(sample_range) as f32 / sample_range as f32;
    normalized * 2.0 - 1.0
}

/// Convert a block of unsigned samples into float audio.
///
/// Converts `min(input.len(), out.len())` samples and returns that count.
pub fn samples_to_f32(input: &[u16], sample_range: u16, out: &mut [f32]) -> usize {
    let count = input.len().min(out.len());
    for (o, &s) in out.iter_mut().zip(input) {
        *o = sample_to_f32(s, sample_range);
    }
    count
}
