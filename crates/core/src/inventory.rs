//! Baseline alphabet every poster is assumed to need.

use crate::CharSet;

pub const DIGITS: &str = "0123456789";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Space, period, comma, colon, hyphen and slash.
pub const PUNCTUATION: &str = " .,:-/";

pub const MONTHS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const UNIT_WORDS: &[&str] = &["km", "hours", "mins", "miles", "minutes"];

/// Builds the baseline character set.
pub fn base_chars() -> CharSet {
    let mut chars = CharSet::new();
    chars.add_str(DIGITS);
    chars.add_str(LOWERCASE);
    chars.add_str(UPPERCASE);
    chars.add_str(PUNCTUATION);
    // Covered by the letters already.
    chars.add_words(MONTHS);
    chars.add_words(UNIT_WORDS);
    chars
}
