use crate::lyrics_processor::Syllable;

use super::{TimedSyllable, windows_are_ordered};

// @module: Onset-to-syllable alignment

/// Minimum distance between two usable onsets, and between the last start
/// and the track end
const MIN_WINDOW_SECS: f64 = 1e-3;

/// Map syllables onto detected onsets.
///
/// Syllable `i` starts at onset `i` and ends at onset `i + 1`; the last
/// syllable ends at the track end. When fewer onsets than syllables were
/// detected, the remaining starts are spaced linearly between the last
/// onset and the track end; surplus onsets are ignored.
///
/// Returns `None` when the onsets cannot produce windows satisfying the
/// ordering invariants (the caller falls back to uniform timing).
pub fn align_to_onsets(
    onsets: &[f64],
    syllables: &[Syllable],
    duration_secs: f64,
) -> Option<Vec<TimedSyllable>> {
    if syllables.is_empty() || !(duration_secs > 0.0) {
        return None;
    }

    let starts = syllable_starts(onsets, syllables.len(), duration_secs)?;

    let timed: Vec<TimedSyllable> = syllables
        .iter()
        .enumerate()
        .map(|(i, syllable)| {
            let start = starts[i];
            let end = if i + 1 < starts.len() {
                starts[i + 1]
            } else {
                duration_secs
            };
            TimedSyllable::new(syllable.clone(), start, end)
        })
        .collect();

    if windows_are_ordered(&timed, duration_secs) {
        Some(timed)
    } else {
        None
    }
}

/// Produce one strictly increasing start time per syllable
fn syllable_starts(onsets: &[f64], count: usize, duration_secs: f64) -> Option<Vec<f64>> {
    let usable = sanitize_onsets(onsets, duration_secs);
    if usable.is_empty() {
        return None;
    }

    let mut starts: Vec<f64> = usable.into_iter().take(count).collect();

    if starts.len() < count {
        let last = *starts.last()?;
        let missing = count - starts.len();
        // Space the remaining starts strictly inside (last, duration) so the
        // final syllable keeps a non-empty window
        for i in 1..=missing {
            starts.push(last + (duration_secs - last) * i as f64 / (missing + 1) as f64);
        }
    }

    Some(starts)
}

/// Keep onsets inside [0, duration), strictly increasing with a minimum gap
fn sanitize_onsets(onsets: &[f64], duration_secs: f64) -> Vec<f64> {
    let mut usable = Vec::with_capacity(onsets.len());

    for &onset in onsets {
        if !onset.is_finite() || onset < 0.0 || onset >= duration_secs - MIN_WINDOW_SECS {
            continue;
        }
        if let Some(&previous) = usable.last() {
            if onset < previous + MIN_WINDOW_SECS {
                continue;
            }
        }
        usable.push(onset);
    }

    usable
}
