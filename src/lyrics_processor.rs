use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::errors::PipelineError;
use crate::file_utils::FileManager;

// @module: Syllable lyrics parsing and word/page grouping

// @struct: Single syllable unit
#[derive(Debug, Clone, PartialEq)]
pub struct Syllable {
    // @field: Syllable text with the continuation hyphen stripped
    pub text: String,

    // @field: True when the syllable glues to the next one with no word break
    pub continues_word: bool,
}

impl Syllable {
    pub fn new(text: impl Into<String>, continues_word: bool) -> Self {
        Syllable {
            text: text.into(),
            continues_word,
        }
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.continues_word {
            write!(f, "{}-", self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// Ordered sequence of syllables parsed from one lyrics file
#[derive(Debug, Clone)]
pub struct SyllableSequence {
    /// Source filename
    pub source_file: PathBuf,

    /// Syllables in playback order, never empty
    pub syllables: Vec<Syllable>,
}

impl SyllableSequence {
    /// Read and parse a lyrics file, one syllable per line
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)
            .map_err(|e| PipelineError::MalformedLyrics(e.to_string()))?;
        let syllables = Self::parse(&content)
            .map_err(|e| match e {
                PipelineError::MalformedLyrics(msg) => {
                    PipelineError::MalformedLyrics(format!("{}: {}", path.display(), msg))
                }
                other => other,
            })?;

        Ok(SyllableSequence {
            source_file: path.to_path_buf(),
            syllables,
        })
    }

    /// Parse lyrics content into syllables.
    ///
    /// Each non-blank line is one syllable; a trailing `-` marks a word
    /// continuation into the next line. Blank lines and surrounding
    /// whitespace (including CR from CRLF input) are ignored.
    pub fn parse(content: &str) -> Result<Vec<Syllable>, PipelineError> {
        let mut syllables = Vec::new();

        for (line_no, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let (text, continues_word) = match line.strip_suffix('-') {
                Some(stripped) => (stripped.trim_end(), true),
                None => (line, false),
            };

            if text.is_empty() {
                return Err(PipelineError::MalformedLyrics(format!(
                    "syllable on line {} is empty",
                    line_no + 1
                )));
            }

            syllables.push(Syllable::new(text, continues_word));
        }

        if syllables.is_empty() {
            return Err(PipelineError::MalformedLyrics(
                "no syllables found".to_string(),
            ));
        }

        Ok(syllables)
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }

    /// Join syllables into complete words.
    ///
    /// A trailing continuation syllable at the end of the sequence still
    /// terminates its word.
    pub fn words(&self) -> Vec<String> {
        join_words(&self.syllables)
    }

    /// Group syllables into display pages of at most `words_per_page` words.
    ///
    /// Returns syllable index ranges; each range starts and ends on word
    /// boundaries except when the sequence itself ends mid-word.
    pub fn page_spans(&self, words_per_page: usize) -> Vec<Range<usize>> {
        group_page_spans(&self.syllables, words_per_page)
    }
}

/// Join a syllable slice into complete words
pub fn join_words(syllables: &[Syllable]) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for syllable in syllables {
        current.push_str(&syllable.text);
        if !syllable.continues_word {
            words.push(std::mem::take(&mut current));
        }
    }

    // Sequence ended on a continuation syllable
    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Group syllables into page-sized index ranges by completed word count
pub fn group_page_spans(syllables: &[Syllable], words_per_page: usize) -> Vec<Range<usize>> {
    let words_per_page = words_per_page.max(1);
    let mut spans = Vec::new();
    let mut page_start = 0;
    let mut words_on_page = 0;

    for (idx, syllable) in syllables.iter().enumerate() {
        if !syllable.continues_word {
            words_on_page += 1;
            if words_on_page >= words_per_page {
                spans.push(page_start..idx + 1);
                page_start = idx + 1;
                words_on_page = 0;
            }
        }
    }

    if page_start < syllables.len() {
        spans.push(page_start..syllables.len());
    }

    spans
}
