//! SIMD-accelerated UTF-8 validation and lossy repair.

use std::borrow::Cow;

/// Interprets `input` as `&str` if it only contains well-formed UTF-8.
/// Otherwise, replaces every maximal malformed subsequence with
/// `char::REPLACEMENT_CHARACTER` (`\u{FFFD}`) and returns the repaired string.
///
/// ## Returns
///
/// The function returns a tuple containing:
///
///   - The valid UTF-8 string.
///   - Whether `input` contained malformed sequences.
pub fn from_utf8_lossy_fast(input: &[u8]) -> (Cow<'_, str>, bool) {
    if let Ok(valid) = simdutf8::basic::from_utf8(input) {
        return (Cow::Borrowed(valid), false);
    }

    let mut repaired = String::with_capacity(input.len() + 3);
    let mut rest = input;
    loop {
        match simdutf8::compat::from_utf8(rest) {
            Ok(valid) => {
                repaired.push_str(valid);
                break;
            }
            Err(error) => {
                let (valid, after_valid) = rest.split_at(error.valid_up_to());
                // SAFETY: the validator accepted everything up to `valid_up_to`.
                repaired.push_str(unsafe { std::str::from_utf8_unchecked(valid) });
                repaired.push(char::REPLACEMENT_CHARACTER);
                match error.error_len() {
                    Some(invalid_sequence_length) => {
                        rest = &after_valid[invalid_sequence_length..];
                    }
                    // Truncated sequence at the end of the input.
                    None => break,
                }
            }
        }
    }
    (Cow::Owned(repaired), true)
}
