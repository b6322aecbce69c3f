use rustfft::FftPlanner;
use rustfft::num_complex::Complex;

// @module: Spectral-flux onset detection

// Peak-picking windows in seconds, converted to frames at the analysis rate
const PRE_MAX_SECS: f64 = 0.03;
const POST_MAX_SECS: f64 = 0.03;
const PRE_AVG_SECS: f64 = 0.10;
const POST_AVG_SECS: f64 = 0.10;

/// Minimum rise above the local average for a frame to count as a peak,
/// on the max-normalized envelope
const PEAK_DELTA: f32 = 0.07;

/// Compute a spectral-flux onset strength envelope, one value per analysis
/// frame, max-normalized to [0, 1].
///
/// Flux is the half-wave rectified frame-to-frame increase in magnitude
/// spectrum under a Hann window.
pub fn onset_strength(samples: &[f32], fft_size: usize, hop_size: usize) -> Vec<f32> {
    if samples.len() < fft_size || fft_size == 0 || hop_size == 0 {
        return Vec::new();
    }

    let window: Vec<f32> = (0..fft_size)
        .map(|n| {
            let phase = 2.0 * std::f32::consts::PI * n as f32 / (fft_size - 1) as f32;
            0.5 * (1.0 - phase.cos())
        })
        .collect();

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(fft_size);

    let bins = fft_size / 2 + 1;
    let frame_count = 1 + (samples.len() - fft_size) / hop_size;

    let mut buffer = vec![Complex::new(0.0f32, 0.0f32); fft_size];
    let mut previous = vec![0.0f32; bins];
    let mut magnitudes = vec![0.0f32; bins];
    let mut envelope = Vec::with_capacity(frame_count);

    for frame in 0..frame_count {
        let offset = frame * hop_size;
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = Complex::new(samples[offset + i] * window[i], 0.0);
        }
        fft.process(&mut buffer);

        for (bin, value) in magnitudes.iter_mut().enumerate() {
            *value = buffer[bin].norm();
        }

        // First frame has no predecessor to flux against
        let flux = if frame == 0 {
            0.0
        } else {
            magnitudes
                .iter()
                .zip(previous.iter())
                .map(|(mag, prev)| (mag - prev).max(0.0))
                .sum()
        };
        envelope.push(flux);

        previous.copy_from_slice(&magnitudes);
    }

    let peak = envelope.iter().cloned().fold(0.0f32, f32::max);
    if peak > 0.0 {
        for value in envelope.iter_mut() {
            *value /= peak;
        }
    }

    envelope
}

/// Detect onset times in seconds from a mono PCM signal.
///
/// Peaks of the onset strength envelope are selected where the frame is a
/// local maximum, rises `PEAK_DELTA` above the local average, and lies at
/// least `min_gap_secs` after the previously accepted onset. Returned times
/// are strictly increasing.
pub fn detect_onsets(
    samples: &[f32],
    sample_rate: u32,
    fft_size: usize,
    hop_size: usize,
    min_gap_secs: f64,
) -> Vec<f64> {
    let envelope = onset_strength(samples, fft_size, hop_size);
    if envelope.is_empty() || sample_rate == 0 {
        return Vec::new();
    }

    let frames_per_sec = sample_rate as f64 / hop_size as f64;
    let to_frames = |secs: f64| ((secs * frames_per_sec).round() as usize).max(1);

    let pre_max = to_frames(PRE_MAX_SECS);
    let post_max = to_frames(POST_MAX_SECS);
    let pre_avg = to_frames(PRE_AVG_SECS);
    let post_avg = to_frames(POST_AVG_SECS);
    let wait = to_frames(min_gap_secs.max(0.0));

    let mut onsets = Vec::new();
    let mut last_accepted: Option<usize> = None;

    for n in 0..envelope.len() {
        let value = envelope[n];
        if value <= 0.0 {
            continue;
        }

        let max_lo = n.saturating_sub(pre_max);
        let max_hi = (n + post_max + 1).min(envelope.len());
        let local_max = envelope[max_lo..max_hi].iter().cloned().fold(0.0f32, f32::max);
        if value < local_max {
            continue;
        }

        let avg_lo = n.saturating_sub(pre_avg);
        let avg_hi = (n + post_avg + 1).min(envelope.len());
        let local_avg =
            envelope[avg_lo..avg_hi].iter().sum::<f32>() / (avg_hi - avg_lo) as f32;
        if value < local_avg + PEAK_DELTA {
            continue;
        }

        if let Some(last) = last_accepted {
            if n < last + wait {
                continue;
            }
        }

        last_accepted = Some(n);
        onsets.push(n as f64 * hop_size as f64 / sample_rate as f64);
    }

    onsets
}
