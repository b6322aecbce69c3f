use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory scanned for input audio files
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// Directory scanned for syllable lyrics files
    #[serde(default = "default_lyrics_dir")]
    pub lyrics_dir: PathBuf,

    /// Directory the rendered videos are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Syllable timing config
    #[serde(default)]
    pub timing: TimingConfig,

    /// Video rendering config
    #[serde(default)]
    pub video: VideoConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Syllable timing policy
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimingMode {
    // @mode: Snap syllable starts to detected note onsets
    #[default]
    Onset,
    // @mode: Divide the track duration equally across syllables
    Uniform,
}

impl TimingMode {
    // @returns: Capitalized mode name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Onset => "Onset",
            Self::Uniform => "Uniform",
        }
    }

    // @returns: Lowercase mode identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Onset => "onset".to_string(),
            Self::Uniform => "uniform".to_string(),
        }
    }
}

// Implement Display trait for TimingMode
impl std::fmt::Display for TimingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TimingMode
impl std::str::FromStr for TimingMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "onset" => Ok(Self::Onset),
            "uniform" => Ok(Self::Uniform),
            _ => Err(anyhow!("Invalid timing mode: {}", s)),
        }
    }
}

/// Configuration for the syllable timer
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimingConfig {
    /// Timing policy to use
    #[serde(default)]
    pub mode: TimingMode,

    /// Sample rate the audio is decoded to for onset analysis
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// FFT window size in samples
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,

    /// Hop between analysis frames in samples
    #[serde(default = "default_hop_size")]
    pub hop_size: usize,

    /// Minimum time between two detected onsets in seconds
    #[serde(default = "default_min_onset_gap_secs")]
    pub min_onset_gap_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            mode: TimingMode::default(),
            sample_rate: default_sample_rate(),
            fft_size: default_fft_size(),
            hop_size: default_hop_size(),
            min_onset_gap_secs: default_min_onset_gap_secs(),
        }
    }
}

/// Configuration for the video renderer
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VideoConfig {
    /// Output frame width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output frame height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Output frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Caption font family
    #[serde(default = "default_font")]
    pub font: String,

    /// Caption font size in script pixels
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Number of words shown per caption page
    #[serde(default = "default_words_per_page")]
    pub words_per_page: usize,

    /// Encode timeout in seconds
    #[serde(default = "default_encode_timeout_secs")]
    pub encode_timeout_secs: u64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            font: default_font(),
            font_size: default_font_size(),
            words_per_page: default_words_per_page(),
            encode_timeout_secs: default_encode_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("m4a")
}

fn default_lyrics_dir() -> PathBuf {
    PathBuf::from("lyrics")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("videos")
}

fn default_sample_rate() -> u32 {
    22_050
}

fn default_fft_size() -> usize {
    2048
}

fn default_hop_size() -> usize {
    512
}

fn default_min_onset_gap_secs() -> f64 {
    0.05
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_fps() -> u32 {
    24
}

fn default_font() -> String {
    "Arial".to_string()
}

fn default_font_size() -> u32 {
    70
}

fn default_words_per_page() -> usize {
    10
}

fn default_encode_timeout_secs() -> u64 {
    600
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.audio_dir.as_os_str().is_empty() {
            return Err(anyhow!("Audio directory must not be empty"));
        }
        if self.lyrics_dir.as_os_str().is_empty() {
            return Err(anyhow!("Lyrics directory must not be empty"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow!("Output directory must not be empty"));
        }

        if self.timing.sample_rate == 0 {
            return Err(anyhow!("Sample rate must be positive"));
        }
        if self.timing.fft_size == 0 || !self.timing.fft_size.is_power_of_two() {
            return Err(anyhow!(
                "FFT size must be a positive power of two, got {}",
                self.timing.fft_size
            ));
        }
        if self.timing.hop_size == 0 || self.timing.hop_size > self.timing.fft_size {
            return Err(anyhow!(
                "Hop size must be in 1..={}, got {}",
                self.timing.fft_size,
                self.timing.hop_size
            ));
        }
        if !(self.timing.min_onset_gap_secs > 0.0) {
            return Err(anyhow!("Minimum onset gap must be positive"));
        }

        if self.video.width == 0 || self.video.height == 0 {
            return Err(anyhow!("Video dimensions must be positive"));
        }
        if self.video.fps == 0 {
            return Err(anyhow!("Frame rate must be positive"));
        }
        if self.video.words_per_page == 0 {
            return Err(anyhow!("Words per page must be positive"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            audio_dir: default_audio_dir(),
            lyrics_dir: default_lyrics_dir(),
            output_dir: default_output_dir(),
            timing: TimingConfig::default(),
            video: VideoConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
