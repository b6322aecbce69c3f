/*!
 * Syllable timing: maps a syllable sequence onto the audio timeline.
 *
 * This module assigns each syllable a `[start, end)` window covering the
 * track, honoring the ordering invariants the renderer depends on. It is
 * split into two submodules:
 *
 * - `onset`: spectral-flux onset detection over the decoded PCM signal
 * - `aligner`: mapping of syllables onto detected onsets
 */

// Re-export main entry points for easier usage
pub use self::aligner::align_to_onsets;
pub use self::onset::{detect_onsets, onset_strength};

// Submodules
pub mod aligner;
pub mod onset;

use anyhow::{Result, anyhow};
use log::{debug, warn};

use crate::app_config::{TimingConfig, TimingMode};
use crate::audio_decoder::AudioTrack;
use crate::lyrics_processor::{Syllable, SyllableSequence};

/// A syllable with its assigned time window
#[derive(Debug, Clone)]
pub struct TimedSyllable {
    /// The syllable unit
    pub syllable: Syllable,

    /// Window start in seconds from track start
    pub start_secs: f64,

    /// Window end in seconds, always greater than `start_secs`
    pub end_secs: f64,
}

impl TimedSyllable {
    pub fn new(syllable: Syllable, start_secs: f64, end_secs: f64) -> Self {
        TimedSyllable {
            syllable,
            start_secs,
            end_secs,
        }
    }

    /// Window length in seconds
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Assign a time window to every syllable of the sequence.
///
/// Dispatches on the configured policy; the onset policy falls back to
/// uniform distribution when the signal yields nothing usable.
pub fn assign_timings(
    track: &AudioTrack,
    sequence: &SyllableSequence,
    config: &TimingConfig,
) -> Result<Vec<TimedSyllable>> {
    if sequence.is_empty() {
        return Err(anyhow!("Cannot time an empty syllable sequence"));
    }
    if !(track.duration_secs > 0.0) {
        return Err(anyhow!(
            "Cannot time syllables over a zero-length track: {:?}",
            track.source_file
        ));
    }

    let timed = match config.mode {
        TimingMode::Uniform => uniform_timings(&sequence.syllables, track.duration_secs),
        TimingMode::Onset => {
            let onsets = detect_onsets(
                &track.samples,
                track.sample_rate,
                config.fft_size,
                config.hop_size,
                config.min_onset_gap_secs,
            );
            debug!(
                "Detected {} onsets for {} syllables",
                onsets.len(),
                sequence.len()
            );

            match align_to_onsets(&onsets, &sequence.syllables, track.duration_secs) {
                Some(timed) => timed,
                None => {
                    warn!(
                        "Onset detection yielded no usable windows for {:?}, falling back to uniform timing",
                        track.source_file
                    );
                    uniform_timings(&sequence.syllables, track.duration_secs)
                }
            }
        }
    };

    debug_assert!(windows_are_ordered(&timed, track.duration_secs));
    Ok(timed)
}

/// Distribute the track duration equally across syllables.
///
/// A sequence of length 1 receives the entire duration as its single window.
pub fn uniform_timings(syllables: &[Syllable], duration_secs: f64) -> Vec<TimedSyllable> {
    let count = syllables.len();
    syllables
        .iter()
        .enumerate()
        .map(|(i, syllable)| {
            let start = duration_secs * i as f64 / count as f64;
            let end = duration_secs * (i + 1) as f64 / count as f64;
            TimedSyllable::new(syllable.clone(), start, end)
        })
        .collect()
}

/// Check that windows lie inside the track, are strictly positive, and are
/// non-overlapping and ordered
pub fn windows_are_ordered(timed: &[TimedSyllable], duration_secs: f64) -> bool {
    const EPSILON: f64 = 1e-9;

    for (i, window) in timed.iter().enumerate() {
        if window.start_secs < -EPSILON
            || window.end_secs <= window.start_secs
            || window.end_secs > duration_secs + EPSILON
        {
            return false;
        }
        if i > 0 && window.start_secs < timed[i - 1].end_secs - EPSILON {
            return false;
        }
    }
    true
}
