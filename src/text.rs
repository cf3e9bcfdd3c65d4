use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static SAMPLES_DIR: Dir = include_dir!("src/samples");

/// Shortest passage (in chars, after trimming) accepted for a game
pub const MIN_TEXT_CHARS: usize = 10;

pub const SAMPLE_TEXT: &str = "Memory is the faculty of the brain by which data or information is encoded, stored, and retrieved when needed. It is the retention of information over time for the purpose of influencing future action. If past events could not be remembered, it would be impossible for language, relationships, or personal identity to develop.";

#[derive(Debug, Error)]
pub enum TextError {
    #[error("please enter at least {} characters of text", MIN_TEXT_CHARS)]
    TooShort { len: usize },
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whitespace for passage cleanup: Unicode White_Space plus the zero-width
/// no-break space (U+FEFF) left behind by concatenated files.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Trim, check the minimum length, then collapse every whitespace run into one space.
///
/// The length check runs on the trimmed text before collapsing, so a passage that
/// is only long because of inner padding still passes.
pub fn normalize(raw: &str) -> Result<String, TextError> {
    let trimmed = raw.trim_matches(is_blank);
    let len = trimmed.chars().count();
    if len < MIN_TEXT_CHARS {
        return Err(TextError::TooShort { len });
    }

    Ok(trimmed
        .split(is_blank)
        .filter(|word| !word.is_empty())
        .collect::<Vec<&str>>()
        .join(" "))
}

/// Read a local text file as lossy UTF-8 with a leading BOM stripped.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<String, TextError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| TextError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8_lossy(&bytes);
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// All passages bundled with the binary, the built-in sample first
pub fn samples() -> Vec<&'static str> {
    let mut bundled: Vec<&'static str> = SAMPLES_DIR
        .files()
        .filter_map(|f| f.contents_utf8())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    bundled.sort_unstable();

    let mut all = vec![SAMPLE_TEXT];
    all.extend(bundled);
    all
}

pub fn random_sample() -> &'static str {
    let mut rng = rand::thread_rng();
    samples().choose(&mut rng).copied().unwrap_or(SAMPLE_TEXT)
}
