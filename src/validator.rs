//! Plain number validation
//!
//! When no template is given, a value is checked here before it is handed to the generic
//! decimal parser.

use crate::error::{Result, ToNumberError};
use crate::matcher::leading_space_len;

const INVALID_NUMBER: &str = "invalid number";

/// Check that `value` looks like a plain number
///
/// Leading spaces are ignored. The rest may hold digits, at most one `.`, one sign as the first
/// or the last non-space character, and trailing spaces. At least one digit is required.
///
/// # Examples
/// ```
/// use to_number::validate_plain_number;
///
/// assert!(validate_plain_number("  12.3  ").is_ok());
/// assert!(validate_plain_number("12-").is_ok());
/// assert!(validate_plain_number("1.2.3").is_err());
/// ```
pub fn validate_plain_number(value: &str) -> Result<()> {
    let start = leading_space_len(value);
    let bytes = value.as_bytes();

    let mut found_digit = false;
    let mut found_point = false;
    let mut found_sign = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        let ok = match b {
            b'0'..=b'9' => {
                found_digit = true;
                true
            }
            b'.' => !std::mem::replace(&mut found_point, true),
            b'+' | b'-' => {
                let at_edge = i == start || is_trailing_spaces(&bytes[i + 1..]);
                at_edge && !std::mem::replace(&mut found_sign, true)
            }
            b' ' => is_trailing_spaces(&bytes[i..]),
            _ => false,
        };
        if !ok {
            return Err(ToNumberError::value(i, INVALID_NUMBER));
        }
    }

    if !found_digit {
        return Err(ToNumberError::value(value.len(), INVALID_NUMBER));
    }
    Ok(())
}

fn is_trailing_spaces(rest: &[u8]) -> bool {
    rest.iter().all(|&b| b == b' ')
}
