use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::audio_decoder::AudioTrack;
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::lyrics_processor::SyllableSequence;
use crate::timing;
use crate::video_renderer::VideoRenderer;

// @module: Application controller for the karaoke render pipeline

/// One discovered audio file with its lyrics counterpart, if any
#[derive(Debug, Clone)]
pub struct PairEntry {
    /// Audio file path
    pub audio_file: PathBuf,

    /// Matched lyrics file, None when the pair is incomplete
    pub lyrics_file: Option<PathBuf>,
}

/// Outcome counters for one batch run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for the karaoke video pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.audio_dir.as_os_str().is_empty()
            && !self.config.lyrics_dir.as_os_str().is_empty()
            && !self.config.output_dir.as_os_str().is_empty()
    }

    /// Scan the audio directory and pair each file with its lyrics counterpart
    pub fn discover_pairs(&self) -> Result<Vec<PairEntry>> {
        let audio_files = FileManager::find_audio_files(&self.config.audio_dir)?;

        Ok(audio_files
            .into_iter()
            .map(|audio_file| {
                let lyrics_file = FileManager::find_lyrics_for(&audio_file, &self.config.lyrics_dir);
                PairEntry {
                    audio_file,
                    lyrics_file,
                }
            })
            .collect())
    }

    /// Run the batch workflow over every matched pair in the input directories.
    ///
    /// A failed pair is logged and counted; it never aborts the batch.
    pub async fn run_batch(&self, force_overwrite: bool) -> Result<BatchSummary> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&self.config.audio_dir) {
            return Err(anyhow::anyhow!(
                "Audio directory does not exist: {:?}",
                self.config.audio_dir
            ));
        }
        if !FileManager::dir_exists(&self.config.lyrics_dir) {
            return Err(anyhow::anyhow!(
                "Lyrics directory does not exist: {:?}",
                self.config.lyrics_dir
            ));
        }

        let pairs = self.discover_pairs()?;
        if pairs.is_empty() {
            return Err(anyhow::anyhow!(
                "No audio files found in directory: {:?}",
                self.config.audio_dir
            ));
        }

        FileManager::ensure_dir(&self.config.output_dir)?;

        // Create multi-progress instance for multiple file processing
        let multi_progress = MultiProgress::new();
        let batch_pb = multi_progress.add(ProgressBar::new(pairs.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pairs ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        batch_pb.set_style(template_result.progress_chars("█▓▒░"));
        batch_pb.set_message("Processing pairs");

        let mut summary = BatchSummary::default();

        for pair in &pairs {
            let file_name = pair
                .audio_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            batch_pb.set_message(format!("Processing: {}", file_name));

            let output_path =
                FileManager::generate_output_path(&pair.audio_file, &self.config.output_dir, "mp4");
            if output_path.exists() && !force_overwrite {
                warn!("Skipping {}, output already exists (use -f to force overwrite)", file_name);
                summary.skipped += 1;
                batch_pb.inc(1);
                continue;
            }

            let result = match &pair.lyrics_file {
                Some(lyrics_file) => {
                    self.process_pair(&pair.audio_file, lyrics_file, &output_path)
                        .await
                }
                None => Err(PipelineError::MissingPair(format!(
                    "no lyrics file found for {} in {:?}",
                    file_name, self.config.lyrics_dir
                ))
                .into()),
            };

            match result {
                Ok(_) => {
                    info!("Rendered {:?}", output_path);
                    summary.processed += 1;
                }
                Err(e) => {
                    error!("Error processing pair {}: {}", file_name, e);
                    summary.failed += 1;
                }
            }

            batch_pb.inc(1);
        }

        batch_pb.finish_with_message("Batch processing complete");

        let duration = start_time.elapsed();
        info!(
            "Batch completed: {} processed, {} skipped, {} errors - Duration: {}",
            summary.processed,
            summary.skipped,
            summary.failed,
            Self::format_duration(duration)
        );

        Ok(summary)
    }

    /// Run the full pipeline for one audio/lyrics pair
    pub async fn process_pair(
        &self,
        audio_file: &Path,
        lyrics_file: &Path,
        output_file: &Path,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !audio_file.exists() {
            return Err(anyhow::anyhow!("Audio file does not exist: {:?}", audio_file));
        }
        if !lyrics_file.exists() {
            return Err(anyhow::anyhow!("Lyrics file does not exist: {:?}", lyrics_file));
        }

        // Input Loader
        let track = AudioTrack::load(audio_file, self.config.timing.sample_rate).await?;
        let sequence = SyllableSequence::from_file(lyrics_file)?;
        debug!(
            "Loaded {:?}: {:.3}s audio, {} syllables",
            audio_file,
            track.duration_secs,
            sequence.len()
        );

        // Syllable Timer
        let timed = timing::assign_timings(&track, &sequence, &self.config.timing)
            .context("Failed to assign syllable timings")?;

        // Video Renderer
        let renderer = VideoRenderer::new(self.config.video.clone());
        renderer
            .render(audio_file, &timed, track.duration_secs, output_file)
            .await?;

        info!(
            "Rendered {} syllables over {:.3}s in {}",
            timed.len(),
            track.duration_secs,
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Format a duration for summary logging
    fn format_duration(duration: std::time::Duration) -> String {
        let seconds = duration.as_secs();
        if seconds >= 60 {
            let minutes = seconds / 60;
            let seconds = seconds % 60;
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
