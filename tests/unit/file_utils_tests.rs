/*!
 * Tests for file and pair discovery utilities
 */

use std::path::PathBuf;

use lyrivid::file_utils::{AUDIO_EXTENSIONS, FileManager};

use crate::common;

/// Test directory creation is idempotent
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAndAcceptExisting() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested).unwrap();
    assert!(FileManager::dir_exists(&nested));

    // Second call is a no-op
    FileManager::ensure_dir(&nested).unwrap();
    assert!(FileManager::dir_exists(&nested));
}

/// Test extension scan is case-insensitive
#[test]
fn test_find_files_withMixedCaseExtensions_shouldMatch() {
    let temp_dir = common::create_temp_dir().unwrap();
    common::create_test_file(temp_dir.path(), "one.m4a", "x").unwrap();
    common::create_test_file(temp_dir.path(), "two.M4A", "x").unwrap();
    common::create_test_file(temp_dir.path(), "three.txt", "x").unwrap();

    let files = FileManager::find_files(temp_dir.path(), "m4a").unwrap();
    assert_eq!(files.len(), 2);

    let files = FileManager::find_files(temp_dir.path(), ".m4a").unwrap();
    assert_eq!(files.len(), 2);
}

/// Test audio discovery covers the supported extensions and sorts output
#[test]
fn test_find_audio_files_withMixedContent_shouldFilterAndSort() {
    let temp_dir = common::create_temp_dir().unwrap();
    common::create_test_file(temp_dir.path(), "b_song.mp3", "x").unwrap();
    common::create_test_file(temp_dir.path(), "a_song.m4a", "x").unwrap();
    common::create_test_file(temp_dir.path(), "notes.txt", "x").unwrap();
    common::create_test_file(temp_dir.path(), "cover.jpg", "x").unwrap();

    let files = FileManager::find_audio_files(temp_dir.path()).unwrap();

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("a_song.m4a"));
    assert!(files[1].ends_with("b_song.mp3"));
}

/// Test the supported extension list includes the original tool's container
#[test]
fn test_audio_extensions_shouldIncludeM4a() {
    assert!(AUDIO_EXTENSIONS.contains(&"m4a"));
}

/// Test lyrics pairing prefers the exact stem
#[test]
fn test_find_lyrics_for_withExactStem_shouldMatch() {
    let temp_dir = common::create_temp_dir().unwrap();
    let audio = common::create_test_file(temp_dir.path(), "bon_voyage.m4a", "x").unwrap();
    let lyrics = common::create_test_lyrics(temp_dir.path(), "bon_voyage.txt").unwrap();

    let found = FileManager::find_lyrics_for(&audio, temp_dir.path());
    assert_eq!(found, Some(lyrics));
}

/// Test lyrics pairing falls back to the _syllables suffix
#[test]
fn test_find_lyrics_for_withSyllablesSuffix_shouldFallBack() {
    let temp_dir = common::create_temp_dir().unwrap();
    let audio = common::create_test_file(temp_dir.path(), "bon_voyage.m4a", "x").unwrap();
    let lyrics =
        common::create_test_lyrics(temp_dir.path(), "bon_voyage_syllables.txt").unwrap();

    let found = FileManager::find_lyrics_for(&audio, temp_dir.path());
    assert_eq!(found, Some(lyrics));
}

/// Test lyrics pairing reports a missing counterpart
#[test]
fn test_find_lyrics_for_withNoCounterpart_shouldReturnNone() {
    let temp_dir = common::create_temp_dir().unwrap();
    let audio = common::create_test_file(temp_dir.path(), "bon_voyage.m4a", "x").unwrap();

    let found = FileManager::find_lyrics_for(&audio, temp_dir.path());
    assert_eq!(found, None);
}

/// Test output path generation swaps directory and extension
#[test]
fn test_generate_output_path_shouldUseStemAndExtension() {
    let output =
        FileManager::generate_output_path("m4a/bon_voyage.m4a", "videos", "mp4");
    assert_eq!(output, PathBuf::from("videos/bon_voyage.mp4"));
}

/// Test write creates parent directories and read round-trips
#[test]
fn test_write_and_read_roundTrip_shouldPreserveContent() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("deep").join("lyrics.txt");

    FileManager::write_to_file(&path, "wel-\ncome\n").unwrap();
    let content = FileManager::read_to_string(&path).unwrap();

    assert_eq!(content, "wel-\ncome\n");
    assert!(FileManager::file_exists(&path));
}

/// Test absolute path resolution leaves absolute paths alone
#[test]
fn test_absolute_path_withAbsoluteInput_shouldBeUnchanged() {
    let temp_dir = common::create_temp_dir().unwrap();
    let absolute = temp_dir.path().join("song.m4a");

    let resolved = FileManager::absolute_path(&absolute).unwrap();
    assert_eq!(resolved, absolute);

    let resolved = FileManager::absolute_path("relative.m4a").unwrap();
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("relative.m4a"));
}
