use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Audio container extensions the pipeline accepts
pub const AUDIO_EXTENSIONS: [&str; 8] = ["m4a", "mp3", "wav", "flac", "ogg", "aac", "opus", "wma"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for a rendered video
    // @params: audio_file, output_dir, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        audio_file: P1,
        output_dir: P2,
        extension: &str,
    ) -> PathBuf {
        let audio_file = audio_file.as_ref();
        let output_dir = output_dir.as_ref();

        // Get the file stem (filename without extension)
        let stem = audio_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(extension);

        // Join with the output directory
        output_dir.join(output_filename)
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(&normalized_ext[1..]) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Find all supported audio files in a directory, sorted by path
    pub fn find_audio_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut audio_files = Vec::new();
        for ext in &AUDIO_EXTENSIONS {
            let mut files = Self::find_files(dir.as_ref(), ext)?;
            audio_files.append(&mut files);
        }
        audio_files.sort();
        Ok(audio_files)
    }

    /// Locate the lyrics counterpart for an audio file.
    ///
    /// `song.m4a` pairs with `song.txt`, falling back to `song_syllables.txt`.
    pub fn find_lyrics_for<P1: AsRef<Path>, P2: AsRef<Path>>(
        audio_file: P1,
        lyrics_dir: P2,
    ) -> Option<PathBuf> {
        let stem = audio_file.as_ref().file_stem()?.to_string_lossy().to_string();
        let lyrics_dir = lyrics_dir.as_ref();

        let exact = lyrics_dir.join(format!("{}.txt", stem));
        if Self::file_exists(&exact) {
            return Some(exact);
        }

        let suffixed = lyrics_dir.join(format!("{}_syllables.txt", stem));
        if Self::file_exists(&suffixed) {
            return Some(suffixed);
        }

        None
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Resolve a path to an absolute one against the current working directory
    pub fn absolute_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
        let path = path.as_ref();
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(cwd.join(path))
        }
    }
}
