//! Field extraction from candidate turns.
//!
//! Pure scanners that pull email, phone, and years-of-experience out of
//! free-form candidate text. Malformed input is never an error — unmatched
//! fields simply stay absent.
//!
//! The matchers are written as explicit character-class scans with the
//! boundary rules spelled out below, rather than leaning on a pattern
//! library's defaults.

use super::fields::PartialFields;

/// Minimum digits in a phone number (including country code).
pub const MIN_PHONE_DIGITS: usize = 7;

/// Maximum digits in a phone number (including country code).
pub const MAX_PHONE_DIGITS: usize = 15;

/// Plausible range for years of professional experience.
pub const MAX_EXPERIENCE_YEARS: f32 = 60.0;

/// Words that mark a preceding number as an experience figure.
const EXPERIENCE_KEYWORDS: [&str; 4] = ["years", "year", "yrs", "yr"];

/// How many words may sit between the number and the keyword
/// ("7 long hard years" still counts).
const MAX_INTERVENING_WORDS: usize = 3;

/// Extracts structured candidate fields from one turn of text.
///
/// Stateless; every call scans all three patterns independently, so a single
/// turn may yield zero, one, or several fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Scans a candidate turn for email, phone, and experience.
    pub fn extract(&self, text: &str) -> PartialFields {
        PartialFields {
            email: scan_email(text),
            phone: scan_phone(text),
            years_experience: scan_experience(text),
        }
    }
}

/// Finds the first email in the text, case preserved.
///
/// Shape: local part of `[A-Za-z0-9._%+-]`, an `@`, then dot-separated
/// domain labels with a final label of 2+ ASCII letters. Trailing dots and
/// hyphens after the domain are treated as sentence punctuation.
fn scan_email(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    for at in 0..bytes.len() {
        if bytes[at] != b'@' {
            continue;
        }

        let mut start = at;
        while start > 0 && is_local_byte(bytes[start - 1]) {
            start -= 1;
        }
        if start == at {
            continue;
        }

        let mut end = at + 1;
        while end < bytes.len() && is_domain_byte(bytes[end]) {
            end += 1;
        }
        while end > at + 1 && matches!(bytes[end - 1], b'.' | b'-') {
            end -= 1;
        }
        if end == at + 1 {
            continue;
        }

        if is_valid_domain(&text[at + 1..end]) {
            return Some(text[start..end].to_string());
        }
    }
    None
}

fn is_local_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'%' | b'+' | b'-')
}

fn is_domain_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-')
}

fn is_valid_domain(domain: &str) -> bool {
    let mut labels = domain.split('.');
    let mut count = 0;
    let mut last = "";
    for label in &mut labels {
        if label.is_empty() {
            return false;
        }
        count += 1;
        last = label;
    }
    // at least one label plus a TLD of 2+ letters
    count >= 2 && last.len() >= 2 && last.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Finds the first phone number in the text, normalized to digits only.
///
/// A candidate run is digits grouped by single spaces, hyphens, or
/// parentheses, optionally led by `+`. The whole maximal run must hold 7-15
/// digits; a run flanked by further digits or letters is rejected rather
/// than carved up, and an over-long run never yields a shorter sub-match.
fn scan_phone(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !(bytes[i].is_ascii_digit() || bytes[i] == b'+' || bytes[i] == b'(') {
            i += 1;
            continue;
        }

        let start = i;
        let mut j = i;
        if bytes[j] == b'+' {
            j += 1;
        }

        let mut digits = String::new();
        let mut last_digit_end = j;
        let mut prev_was_gap = false;
        while j < bytes.len() {
            let b = bytes[j];
            if b.is_ascii_digit() {
                digits.push(b as char);
                prev_was_gap = false;
                j += 1;
                last_digit_end = j;
            } else if matches!(b, b'(' | b')') {
                j += 1;
            } else if matches!(b, b' ' | b'-') {
                if prev_was_gap {
                    break;
                }
                prev_was_gap = true;
                j += 1;
            } else {
                break;
            }
        }

        let flanked_left = start > 0 && bytes[start - 1].is_ascii_alphanumeric();
        let flanked_right =
            last_digit_end < bytes.len() && bytes[last_digit_end].is_ascii_alphanumeric();
        if !flanked_left
            && !flanked_right
            && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
        {
            return Some(digits);
        }

        i = j.max(start + 1);
    }
    None
}

/// Finds the first plausible years-of-experience figure in the text.
///
/// A number (integer or one-decimal float) followed by an experience keyword
/// within [`MAX_INTERVENING_WORDS`] words. Values outside [0, 60] are
/// discarded, not clamped. A nearer number between the candidate and the
/// keyword takes precedence.
fn scan_experience(text: &str) -> Option<f32> {
    let words: Vec<&str> = text.split_whitespace().collect();
    for (idx, word) in words.iter().enumerate() {
        let token = trim_punctuation(word);
        let Some((value, rest)) = parse_number_prefix(token) else {
            continue;
        };
        if !(0.0..=MAX_EXPERIENCE_YEARS).contains(&value) {
            continue;
        }

        // keyword glued to the number, as in "5yrs"
        if !rest.is_empty() {
            if is_experience_keyword(rest) {
                return Some(value);
            }
            continue;
        }

        for follow in words.iter().skip(idx + 1).take(MAX_INTERVENING_WORDS + 1) {
            let follow = trim_punctuation(follow);
            if is_experience_keyword(follow) {
                return Some(value);
            }
            if parse_number_prefix(follow).is_some() {
                // a later number sits closer to any upcoming keyword
                break;
            }
        }
    }
    None
}

/// Parses a leading number with at most one decimal place.
///
/// Returns the value and the unparsed remainder of the token. Two or more
/// decimal digits disqualify the whole token.
fn parse_number_prefix(token: &str) -> Option<(f32, &str)> {
    let bytes = token.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 {
        return None;
    }

    let mut end = i;
    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
        if i + 2 < bytes.len() && bytes[i + 2].is_ascii_digit() {
            return None;
        }
        end = i + 2;
    }

    let value: f32 = token[..end].parse().ok()?;
    Some((value, &token[end..]))
}

fn trim_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}

fn is_experience_keyword(word: &str) -> bool {
    EXPERIENCE_KEYWORDS
        .iter()
        .any(|kw| word.eq_ignore_ascii_case(kw))
}
