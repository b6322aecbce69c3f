/*!
 * Tests for syllable lyrics parsing and word/page grouping
 */

use lyrivid::errors::PipelineError;
use lyrivid::lyrics_processor::{Syllable, SyllableSequence, group_page_spans, join_words};

use crate::common;

/// Test basic syllable parsing
#[test]
fn test_parse_withPlainSyllables_shouldKeepOrder() {
    let syllables = SyllableSequence::parse("wel-\ncome\nto\nthe\nshow\n").unwrap();

    assert_eq!(syllables.len(), 5);
    assert_eq!(syllables[0], Syllable::new("wel", true));
    assert_eq!(syllables[1], Syllable::new("come", false));
    assert_eq!(syllables[4], Syllable::new("show", false));
}

/// Test that a trailing hyphen becomes a continuation flag, not text
#[test]
fn test_parse_withContinuationHyphen_shouldStripAndFlag() {
    let syllables = SyllableSequence::parse("ka-\nra-\no-\nke\n").unwrap();

    assert!(syllables[0].continues_word);
    assert!(syllables[1].continues_word);
    assert!(syllables[2].continues_word);
    assert!(!syllables[3].continues_word);
    assert_eq!(syllables[0].text, "ka");
    assert_eq!(syllables[2].text, "o");
}

/// Test that empty input is rejected
#[test]
fn test_parse_withEmptyContent_shouldReturnMalformedLyrics() {
    let result = SyllableSequence::parse("");
    assert!(matches!(result, Err(PipelineError::MalformedLyrics(_))));

    let result = SyllableSequence::parse("\n\n   \n");
    assert!(matches!(result, Err(PipelineError::MalformedLyrics(_))));
}

/// Test that a bare hyphen line is rejected
#[test]
fn test_parse_withBareHyphenLine_shouldReturnMalformedLyrics() {
    let result = SyllableSequence::parse("wel-\n-\ncome\n");
    assert!(matches!(result, Err(PipelineError::MalformedLyrics(_))));
}

/// Test blank lines and surrounding whitespace are ignored
#[test]
fn test_parse_withBlankLinesAndWhitespace_shouldSkipThem() {
    let syllables = SyllableSequence::parse("  wel-  \n\n  come\n\n").unwrap();

    assert_eq!(syllables.len(), 2);
    assert_eq!(syllables[0], Syllable::new("wel", true));
    assert_eq!(syllables[1], Syllable::new("come", false));
}

/// Test CRLF input parses like LF input
#[test]
fn test_parse_withCrlfLineEndings_shouldParse() {
    let syllables = SyllableSequence::parse("wel-\r\ncome\r\n").unwrap();

    assert_eq!(syllables.len(), 2);
    assert_eq!(syllables[0], Syllable::new("wel", true));
    assert_eq!(syllables[1], Syllable::new("come", false));
}

/// Test loading a lyrics file from disk
#[test]
fn test_from_file_withValidFile_shouldParse() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_lyrics(temp_dir.path(), "song.txt").unwrap();

    let sequence = SyllableSequence::from_file(&path).unwrap();

    assert_eq!(sequence.source_file, path);
    assert_eq!(sequence.len(), 5);
    assert!(!sequence.is_empty());
}

/// Test loading a missing file surfaces a lyrics error
#[test]
fn test_from_file_withMissingFile_shouldReturnMalformedLyrics() {
    let temp_dir = common::create_temp_dir().unwrap();
    let result = SyllableSequence::from_file(temp_dir.path().join("nope.txt"));

    assert!(matches!(result, Err(PipelineError::MalformedLyrics(_))));
}

/// Test syllables joining into complete words
#[test]
fn test_words_withContinuations_shouldJoin() {
    let sequence = SyllableSequence {
        source_file: "song.txt".into(),
        syllables: SyllableSequence::parse("wel-\ncome\nto\nthe\nshow\n").unwrap(),
    };

    assert_eq!(sequence.words(), vec!["welcome", "to", "the", "show"]);
}

/// Test a trailing continuation syllable still terminates its word
#[test]
fn test_words_withTrailingContinuation_shouldTerminateWord() {
    let syllables = SyllableSequence::parse("fal-\nling\nendles-\n").unwrap();

    assert_eq!(join_words(&syllables), vec!["falling", "endles"]);
}

/// Test syllable display keeps the continuation hyphen
#[test]
fn test_syllable_display_shouldRestoreHyphen() {
    assert_eq!(Syllable::new("wel", true).to_string(), "wel-");
    assert_eq!(Syllable::new("show", false).to_string(), "show");
}

/// Test page grouping by completed word count
#[test]
fn test_page_spans_withTwoWordsPerPage_shouldSplitOnWordBoundaries() {
    // welcome | to | the | show -> two pages of two words
    let syllables = SyllableSequence::parse("wel-\ncome\nto\nthe\nshow\n").unwrap();
    let spans = group_page_spans(&syllables, 2);

    assert_eq!(spans, vec![0..3, 3..5]);
}

/// Test page grouping keeps the remainder on a final page
#[test]
fn test_page_spans_withRemainder_shouldKeepFinalPage() {
    let syllables = SyllableSequence::parse("one\ntwo\nthree\n").unwrap();
    let spans = group_page_spans(&syllables, 2);

    assert_eq!(spans, vec![0..2, 2..3]);
}

/// Test one big page when the limit exceeds the word count
#[test]
fn test_page_spans_withLargeLimit_shouldProduceSinglePage() {
    let syllables = SyllableSequence::parse("wel-\ncome\nto\nthe\nshow\n").unwrap();
    let spans = group_page_spans(&syllables, 10);

    assert_eq!(spans, vec![0..5]);
}

/// Test a zero page limit is clamped instead of looping
#[test]
fn test_page_spans_withZeroLimit_shouldClampToOneWord() {
    let syllables = SyllableSequence::parse("one\ntwo\n").unwrap();
    let spans = group_page_spans(&syllables, 0);

    assert_eq!(spans, vec![0..1, 1..2]);
}
