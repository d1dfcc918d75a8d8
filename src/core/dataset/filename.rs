use std::path::Path;

use crate::core::error::{DatasetError, DatasetResult};

/// Identity value marking junk/background images
pub const JUNK_IDENTITY: i64 = -1;

const SEPARATOR: &[u8] = b"_c";

/// Raw metadata encoded in an image filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilenameMetadata {
    pub identity: i64,
    pub camera: i64,
}

impl FilenameMetadata {
    pub fn is_junk(&self) -> bool {
        self.identity == JUNK_IDENTITY
    }
}

fn is_number_char(b: u8) -> bool {
    b.is_ascii_digit() || b == b'-'
}

/// Length of the digit/hyphen run starting at `start`
fn run_len(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|b| is_number_char(**b)).count()
}

/// Locate the first `<run>_c<run>` in `s`, where a run is one or more
/// digits or hyphens. Returns the two runs as string slices.
fn find_metadata(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        // Skip to the next run
        if !is_number_char(bytes[i]) {
            i += 1;
            continue;
        }

        // A match starting inside a run ends where a match from the run
        // start would, so only run starts need checking.
        // Run, then `_c`, then a second non-empty run
        let first_len = run_len(bytes, i);
        let sep = i + first_len;
        let second = sep + SEPARATOR.len();
        if bytes[sep..].starts_with(SEPARATOR) && second < bytes.len() {
            let second_len = run_len(bytes, second);
            if second_len > 0 {
                return Some((&s[i..sep], &s[second..second + second_len]));
            }
        }
        i = sep;
    }

    None
}

/// Parse a captured run as an integer.
///
/// A run of digits with an optional leading `-` is always a number; values
/// past the `i64` range saturate so that bounds validation rejects them.
///
/// # Returns
/// * `Some(value)` for a well-formed integer
/// * `None` for runs such as `1-2` or `--`
fn parse_run(run: &str) -> Option<i64> {
    let (negative, digits) = match run.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, run),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Only overflow can fail past the syntax check above
    match run.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) if negative => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Parse `(identity, camera)` from a string such as `0001_c003_00.jpg`.
pub fn parse_metadata(s: &str) -> Result<FilenameMetadata, String> {
    let (identity, camera) =
        find_metadata(s).ok_or_else(|| "no <identity>_c<camera> pattern".to_string())?;

    let identity =
        parse_run(identity).ok_or_else(|| format!("identity {:?} is not an integer", identity))?;
    let camera =
        parse_run(camera).ok_or_else(|| format!("camera {:?} is not an integer", camera))?;

    Ok(FilenameMetadata { identity, camera })
}

/// Parse the metadata of an image path. The whole path is scanned, so the
/// earliest match wins even if it sits in a directory component.
pub fn parse_image_path(path: &Path) -> DatasetResult<FilenameMetadata> {
    parse_metadata(&path.to_string_lossy()).map_err(|reason| DatasetError::PatternMismatch {
        path: path.to_path_buf(),
        reason,
    })
}
