use std::fmt::Write as _;
use std::path::Path;

use anyhow::anyhow;
use log::{debug, error};
use tokio::process::Command;

use crate::app_config::VideoConfig;
use crate::audio_decoder::filter_ffmpeg_stderr;
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::lyrics_processor::group_page_spans;
use crate::timing::TimedSyllable;

// @module: Karaoke caption rendering and muxing

/// Name of the subtitle script inside the encode scratch directory
const SCRIPT_FILENAME: &str = "karaoke.ass";

// ASS colours are &HAABBGGRR; the karaoke fill sweeps from the secondary
// colour (white) to the primary colour (yellow)
const FILL_COLOUR: &str = "&H0000FFFF";
const BASE_COLOUR: &str = "&H00FFFFFF";
const OUTLINE_COLOUR: &str = "&H00000000";
const BACK_COLOUR: &str = "&H99000000";

/// Renders timed syllables into a karaoke video muxed with the source audio
pub struct VideoRenderer {
    // @field: Output geometry and caption styling
    config: VideoConfig,
}

impl VideoRenderer {
    pub fn new(config: VideoConfig) -> Self {
        VideoRenderer { config }
    }

    /// Build the ASS karaoke script for the whole track.
    ///
    /// Syllables are grouped into caption pages of `words_per_page` words;
    /// each page becomes one Dialogue event whose `\kf` tags sweep the
    /// highlight across syllables as their windows elapse.
    pub fn build_ass_script(&self, timed: &[TimedSyllable]) -> String {
        let mut script = String::with_capacity(timed.len() * 48 + 1024);

        writeln!(script, "[Script Info]").unwrap();
        writeln!(script, "ScriptType: v4.00+").unwrap();
        writeln!(script, "PlayResX: {}", self.config.width).unwrap();
        writeln!(script, "PlayResY: {}", self.config.height).unwrap();
        writeln!(script).unwrap();

        writeln!(script, "[V4+ Styles]").unwrap();
        writeln!(
            script,
            "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding"
        )
        .unwrap();
        writeln!(
            script,
            "Style: Karaoke,{},{},{},{},{},{},0,0,0,0,100,100,0,0,1,3.5,1,5,10,10,10,1",
            self.config.font, self.config.font_size, FILL_COLOUR, BASE_COLOUR, OUTLINE_COLOUR, BACK_COLOUR
        )
        .unwrap();
        writeln!(script).unwrap();

        writeln!(script, "[Events]").unwrap();
        writeln!(
            script,
            "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"
        )
        .unwrap();

        let syllables: Vec<_> = timed.iter().map(|t| t.syllable.clone()).collect();
        for span in group_page_spans(&syllables, self.config.words_per_page) {
            let page = &timed[span];
            let start = page.first().map(|t| t.start_secs).unwrap_or(0.0);
            let end = page.last().map(|t| t.end_secs).unwrap_or(0.0);

            writeln!(
                script,
                "Dialogue: 0,{},{},Karaoke,,0,0,0,,{}",
                format_ass_time(start),
                format_ass_time(end),
                build_karaoke_text(page)
            )
            .unwrap();
        }

        script
    }

    /// Render the karaoke video: burn the script onto a generated background
    /// and mux with the original audio, cut to exactly `duration_secs`.
    pub async fn render(
        &self,
        audio_file: &Path,
        timed: &[TimedSyllable],
        duration_secs: f64,
        output_file: &Path,
    ) -> Result<(), PipelineError> {
        if timed.is_empty() {
            return Err(PipelineError::EncodingError(
                "nothing to render: no timed syllables".to_string(),
            ));
        }

        let audio_file = FileManager::absolute_path(audio_file)
            .map_err(|e| PipelineError::EncodingError(e.to_string()))?;
        let output_file = FileManager::absolute_path(output_file)
            .map_err(|e| PipelineError::EncodingError(e.to_string()))?;

        let scratch = tempfile::tempdir()
            .map_err(|e| PipelineError::EncodingError(format!("scratch dir: {}", e)))?;
        let script_path = scratch.path().join(SCRIPT_FILENAME);
        std::fs::write(&script_path, self.build_ass_script(timed))
            .map_err(|e| PipelineError::EncodingError(format!("write script: {}", e)))?;

        debug!(
            "Encoding {:?} -> {:?} ({:.3}s, script {:?})",
            audio_file, output_file, duration_secs, script_path
        );

        // The ass filter parses ':' and '\' inside its argument, so run
        // ffmpeg from the scratch directory and hand it a bare filename
        let encode_future = Command::new("ffmpeg")
            .current_dir(scratch.path())
            .args(self.build_encode_args(&audio_file, duration_secs, &output_file))
            .output();

        let timeout = std::time::Duration::from_secs(self.config.encode_timeout_secs);
        let result = tokio::select! {
            result = encode_future => {
                result.map_err(|e| anyhow!("Failed to execute ffmpeg command for encoding: {}", e))
            },
            _ = tokio::time::sleep(timeout) => {
                Err(anyhow!("ffmpeg encode timed out after {}s", timeout.as_secs()))
            }
        };

        let output = result.map_err(|e| PipelineError::EncodingError(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = filter_ffmpeg_stderr(&stderr);
            error!("Encode failed for {:?}: {}", output_file, filtered);
            return Err(PipelineError::EncodingError(format!(
                "{}: {}",
                output_file.display(),
                filtered
            )));
        }

        Ok(())
    }

    /// Assemble the ffmpeg invocation: captions burned onto a generated
    /// black background, audio copied in as AAC, output cut to exactly the
    /// track duration so video and audio lengths always match.
    pub fn build_encode_args(
        &self,
        audio_file: &Path,
        duration_secs: f64,
        output_file: &Path,
    ) -> Vec<String> {
        let background = format!(
            "color=c=black:s={}x{}:r={}",
            self.config.width, self.config.height, self.config.fps
        );

        let mut args: Vec<String> = Vec::new();
        args.extend(["-y", "-v", "error"].map(String::from));
        args.extend(["-f", "lavfi", "-i"].map(String::from));
        args.push(background);
        args.push("-i".to_string());
        args.push(audio_file.to_string_lossy().into_owned());
        args.push("-vf".to_string());
        args.push(format!("ass={}", SCRIPT_FILENAME));
        args.extend(["-map", "0:v", "-map", "1:a"].map(String::from));
        args.extend(["-c:v", "libx264", "-preset", "medium", "-pix_fmt", "yuv420p"].map(String::from));
        args.extend(["-c:a", "aac"].map(String::from));
        args.push("-t".to_string());
        args.push(format!("{:.3}", duration_secs));
        args.push(output_file.to_string_lossy().into_owned());
        args
    }
}

/// Build the `\kf`-tagged text for one caption page.
///
/// Gaps between syllable windows become untagged `\k` holds so the fill
/// stays in sync with the timeline; word-final syllables get a trailing
/// space except at the end of the page.
pub fn build_karaoke_text(page: &[TimedSyllable]) -> String {
    let mut text = String::new();
    let mut cursor = page.first().map(|t| t.start_secs).unwrap_or(0.0);

    for (i, timed) in page.iter().enumerate() {
        // Hold the highlight through silent gaps between windows
        if timed.start_secs > cursor {
            let gap_cs = round_secs_to_cs(timed.start_secs - cursor);
            if gap_cs > 0 {
                write!(text, "{{\\k{}}}", gap_cs).unwrap();
            }
        }

        let mut duration_cs = round_secs_to_cs(timed.duration_secs());
        if duration_cs == 0 && timed.duration_secs() > 0.0 {
            duration_cs = 1;
        }

        write!(text, "{{\\kf{}}}{}", duration_cs, timed.syllable.text).unwrap();
        if !timed.syllable.continues_word && i + 1 < page.len() {
            text.push(' ');
        }

        cursor = timed.end_secs;
    }

    text
}

/// Format seconds as an ASS timestamp `H:MM:SS.CS`
pub fn format_ass_time(secs: f64) -> String {
    let total_cs = round_secs_to_cs(secs.max(0.0));
    let cs = total_cs % 100;
    let total_seconds = total_cs / 100;
    let seconds = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let minutes = total_minutes % 60;
    let hours = total_minutes / 60;
    format!("{hours}:{minutes:02}:{seconds:02}.{cs:02}")
}

/// Round a duration in seconds to whole centiseconds
fn round_secs_to_cs(secs: f64) -> u64 {
    (secs * 100.0).round().max(0.0) as u64
}
