/*!
 * Tests for karaoke script generation
 */

use lyrivid::app_config::VideoConfig;
use lyrivid::lyrics_processor::Syllable;
use lyrivid::timing::TimedSyllable;
use lyrivid::video_renderer::{VideoRenderer, build_karaoke_text, format_ass_time};

fn timed(text: &str, continues_word: bool, start: f64, end: f64) -> TimedSyllable {
    TimedSyllable::new(Syllable::new(text, continues_word), start, end)
}

/// Test ASS timestamp formatting
#[test]
fn test_format_ass_time_withVariousValues_shouldFormatCentiseconds() {
    assert_eq!(format_ass_time(0.0), "0:00:00.00");
    assert_eq!(format_ass_time(5.0), "0:00:05.00");
    assert_eq!(format_ass_time(61.234), "0:01:01.23");
    assert_eq!(format_ass_time(3661.5), "1:01:01.50");
    // Negative input clamps to zero instead of underflowing
    assert_eq!(format_ass_time(-1.0), "0:00:00.00");
}

/// Test karaoke text for contiguous windows joins continuation syllables
#[test]
fn test_build_karaoke_text_withContinuation_shouldJoinWithoutSpace() {
    let page = [
        timed("wel", true, 0.0, 0.8),
        timed("come", false, 0.8, 1.6),
        timed("to", false, 1.6, 2.4),
    ];

    let text = build_karaoke_text(&page);
    assert_eq!(text, "{\\kf80}wel{\\kf80}come {\\kf80}to");
}

/// Test word-final syllables get a trailing space except at page end
#[test]
fn test_build_karaoke_text_withWordBoundaries_shouldSpaceBetweenWords() {
    let page = [timed("to", false, 0.0, 1.0), timed("the", false, 1.0, 2.0)];

    let text = build_karaoke_text(&page);
    assert_eq!(text, "{\\kf100}to {\\kf100}the");
}

/// Test a silent gap between windows becomes an untagged hold
#[test]
fn test_build_karaoke_text_withGap_shouldInsertHoldTag() {
    let page = [timed("a", false, 0.0, 1.0), timed("b", false, 2.0, 3.0)];

    let text = build_karaoke_text(&page);
    assert_eq!(text, "{\\kf100}a {\\k100}{\\kf100}b");
}

/// Test very short windows keep at least one centisecond of fill
#[test]
fn test_build_karaoke_text_withTinyWindow_shouldKeepOneCentisecond() {
    let page = [timed("a", false, 1.0, 1.004)];

    let text = build_karaoke_text(&page);
    assert_eq!(text, "{\\kf1}a");
}

/// Test full script structure: header, style and one event per page
#[test]
fn test_build_ass_script_withTwoPages_shouldEmitHeaderStyleAndEvents() {
    let mut config = VideoConfig::default();
    config.words_per_page = 2;
    let renderer = VideoRenderer::new(config);

    // welcome | to | the | show: two pages of two words
    let timed_syllables = [
        timed("wel", true, 0.0, 0.8),
        timed("come", false, 0.8, 1.6),
        timed("to", false, 1.6, 2.4),
        timed("the", false, 2.4, 3.2),
        timed("show", false, 3.2, 4.0),
    ];

    let script = renderer.build_ass_script(&timed_syllables);

    assert!(script.contains("[Script Info]"));
    assert!(script.contains("PlayResX: 1280"));
    assert!(script.contains("PlayResY: 720"));
    assert!(script.contains("[V4+ Styles]"));
    assert!(script.contains("Style: Karaoke,Arial,70,"));
    assert!(script.contains("[Events]"));

    let dialogues: Vec<&str> = script
        .lines()
        .filter(|line| line.starts_with("Dialogue:"))
        .collect();
    assert_eq!(dialogues.len(), 2);

    // First page covers welcome + to, second page the + show
    assert!(dialogues[0].starts_with("Dialogue: 0,0:00:00.00,0:00:02.40,Karaoke,"));
    assert!(dialogues[0].ends_with("{\\kf80}wel{\\kf80}come {\\kf80}to"));
    assert!(dialogues[1].starts_with("Dialogue: 0,0:00:02.40,0:00:04.00,Karaoke,"));
    assert!(dialogues[1].ends_with("{\\kf80}the {\\kf80}show"));
}

/// Test the encode invocation pins the output to the track duration
#[test]
fn test_build_encode_args_shouldCutOutputToTrackDuration() {
    let renderer = VideoRenderer::new(VideoConfig::default());
    let args = renderer.build_encode_args(
        std::path::Path::new("/music/song.m4a"),
        4.0,
        std::path::Path::new("/videos/song.mp4"),
    );

    // Output duration equals the probed audio duration
    let t_position = args.iter().position(|a| a == "-t").unwrap();
    assert_eq!(args[t_position + 1], "4.000");

    // Background geometry, codecs and mapping from the configuration
    assert!(args.contains(&"color=c=black:s=1280x720:r=24".to_string()));
    assert!(args.contains(&"libx264".to_string()));
    assert!(args.contains(&"aac".to_string()));
    assert!(args.contains(&"ass=karaoke.ass".to_string()));
    assert!(args.contains(&"/music/song.m4a".to_string()));
    assert_eq!(args.last().unwrap(), "/videos/song.mp4");
}

/// Test the configured font and geometry flow into the script
#[test]
fn test_build_ass_script_withCustomConfig_shouldUseIt() {
    let config = VideoConfig {
        width: 1920,
        height: 1080,
        font: "DejaVu Sans".to_string(),
        font_size: 90,
        ..VideoConfig::default()
    };
    let renderer = VideoRenderer::new(config);

    let script = renderer.build_ass_script(&[timed("show", false, 0.0, 2.0)]);

    assert!(script.contains("PlayResX: 1920"));
    assert!(script.contains("PlayResY: 1080"));
    assert!(script.contains("Style: Karaoke,DejaVu Sans,90,"));
}
