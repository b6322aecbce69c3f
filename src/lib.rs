/*!
 * # lyrivid - karaoke lyric-video generator
 *
 * A Rust library for rendering karaoke-style videos from audio tracks and
 * syllable-separated lyric files.
 *
 * ## Features
 *
 * - Batch processing of matched audio/lyrics pairs from input directories
 * - Syllable timing by note-onset detection (spectral flux) or uniform
 *   distribution across the track
 * - Hyphen-continuation lyric parsing (syllables joining into words)
 * - Progressive karaoke highlight rendering, burned in over the original
 *   audio via the ffmpeg toolchain
 * - Configurable directories, timing policy and video geometry
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `audio_decoder`: Audio probing and PCM decoding (ffprobe/ffmpeg)
 * - `lyrics_processor`: Syllable lyrics parsing and word/page grouping
 * - `timing`: Syllable-to-timeline alignment:
 *   - `timing::onset`: spectral-flux onset detection
 *   - `timing::aligner`: onset-to-syllable mapping
 * - `video_renderer`: ASS karaoke script generation and video encoding
 * - `file_utils`: File system operations and pair discovery
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod audio_decoder;
pub mod errors;
pub mod file_utils;
pub mod lyrics_processor;
pub mod timing;
pub mod video_renderer;

// Re-export main types for easier usage
pub use app_config::{Config, TimingMode};
pub use app_controller::{BatchSummary, Controller, PairEntry};
pub use audio_decoder::AudioTrack;
pub use errors::{AppError, PipelineError};
pub use lyrics_processor::{Syllable, SyllableSequence};
pub use timing::TimedSyllable;
pub use video_renderer::VideoRenderer;
