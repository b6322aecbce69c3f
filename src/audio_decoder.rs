use std::path::{Path, PathBuf};

use anyhow::anyhow;
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::process::Command;

use crate::errors::PipelineError;

// @module: Audio probing and PCM decoding through the ffmpeg toolchain

// @const: Leading float in ffprobe's format=duration output
static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*$").unwrap()
});

/// Timeout for one probe/decode subprocess
const DECODE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

/// Decoded audio signal for one pipeline run
#[derive(Debug, Clone)]
pub struct AudioTrack {
    /// Source filename
    pub source_file: PathBuf,

    /// Total duration in seconds
    pub duration_secs: f64,

    /// Sample rate of the decoded mono signal
    pub sample_rate: u32,

    /// Mono PCM samples, normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
}

impl AudioTrack {
    /// Probe and decode an audio file to a mono signal at `sample_rate`
    pub async fn load<P: AsRef<Path>>(path: P, sample_rate: u32) -> Result<Self, PipelineError> {
        let path = path.as_ref();

        let duration_secs = probe_duration(path).await?;
        if !(duration_secs > 0.0) {
            return Err(PipelineError::UnsupportedFormat(format!(
                "{}: zero-length audio stream",
                path.display()
            )));
        }

        let samples = decode_mono_f32(path, sample_rate).await?;
        debug!(
            "Decoded {:?}: {:.3}s, {} samples at {} Hz",
            path,
            duration_secs,
            samples.len(),
            sample_rate
        );

        Ok(AudioTrack {
            source_file: path.to_path_buf(),
            duration_secs,
            sample_rate,
            samples,
        })
    }
}

/// Probe the container duration with ffprobe
pub async fn probe_duration(path: &Path) -> Result<f64, PipelineError> {
    let output = run_with_timeout(
        Command::new("ffprobe").args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path),
        "ffprobe",
    )
    .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("Audio probe failed for {:?}: {}", path, filtered);
        return Err(PipelineError::UnsupportedFormat(format!(
            "{}: {}",
            path.display(),
            filtered
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_probe_duration(&stdout).ok_or_else(|| {
        PipelineError::UnsupportedFormat(format!(
            "{}: ffprobe reported no duration",
            path.display()
        ))
    })
}

/// Decode to mono f32 PCM at the requested rate via ffmpeg
async fn decode_mono_f32(path: &Path, sample_rate: u32) -> Result<Vec<f32>, PipelineError> {
    let output = run_with_timeout(
        Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(path)
            .args([
                "-f",
                "f32le",
                "-acodec",
                "pcm_f32le",
                "-ac",
                "1",
                "-ar",
                &sample_rate.to_string(),
                "pipe:1",
            ]),
        "ffmpeg",
    )
    .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("Audio decode failed for {:?}: {}", path, filtered);
        return Err(PipelineError::UnsupportedFormat(format!(
            "{}: {}",
            path.display(),
            filtered
        )));
    }

    let samples = samples_from_le_bytes(&output.stdout);
    if samples.is_empty() {
        return Err(PipelineError::UnsupportedFormat(format!(
            "{}: decoder produced no samples",
            path.display()
        )));
    }

    Ok(samples)
}

/// Run a toolchain subprocess with a timeout guard
async fn run_with_timeout(
    command: &mut Command,
    tool: &str,
) -> Result<std::process::Output, PipelineError> {
    let future = command.output();

    let result = tokio::select! {
        result = future => {
            result.map_err(|e| anyhow!("Failed to execute {} command: {}", tool, e))
        },
        _ = tokio::time::sleep(DECODE_TIMEOUT) => {
            Err(anyhow!("{} command timed out after {}s", tool, DECODE_TIMEOUT.as_secs()))
        }
    };

    result.map_err(|e| PipelineError::UnsupportedFormat(e.to_string()))
}

/// Parse the first duration line of ffprobe output
pub fn parse_probe_duration(stdout: &str) -> Option<f64> {
    for line in stdout.lines() {
        if let Some(caps) = DURATION_REGEX.captures(line) {
            if let Ok(value) = caps[1].parse::<f64>() {
                return Some(value);
            }
        }
    }
    None
}

/// Reinterpret little-endian f32 bytes as samples, dropping any trailing partial frame
pub fn samples_from_le_bytes(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Strip ffmpeg banner/metadata noise from stderr, keeping the useful lines
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "ffprobe version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
