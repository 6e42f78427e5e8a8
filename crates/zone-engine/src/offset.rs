//! UTC offset codec: `"±HH:MM"`-family strings ⇄ signed minutes.
//!
//! The codec is the only boundary that raises on malformed input. The
//! resolver treats a failed parse as "not an offset hint" and moves on to
//! its next strategy, but a caller handing a bad offset string directly to
//! these functions gets the error back.

use std::collections::HashMap;

use crate::error::{Result, ZoneError};

/// Memo for offset-string parsing, keyed by the raw input string.
///
/// Only successful parses are cached; the cache holds nothing that is not
/// re-derivable from the input, so clearing it never changes results.
#[derive(Debug, Default)]
pub struct OffsetCache {
    parsed: HashMap<String, i32>,
}

impl OffsetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.parsed.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.parsed.len()
    }
}

/// Parse an offset string to signed minutes east of UTC.
///
/// Accepted shapes: `"±H"`, `"±HH"`, `"±HH:MM"`, and the colon-free
/// `"±HHMM"`. A missing sign defaults to positive. Results are memoized in
/// `cache` by the raw input string.
///
/// # Errors
///
/// Returns [`ZoneError::MalformedOffset`] if the string matches none of the
/// accepted shapes or its minutes component is 60 or more.
pub fn parse_offset(cache: &mut OffsetCache, raw: &str) -> Result<i32> {
    if let Some(&minutes) = cache.parsed.get(raw) {
        return Ok(minutes);
    }
    let minutes = parse_offset_uncached(raw)?;
    cache.parsed.insert(raw.to_string(), minutes);
    Ok(minutes)
}

fn parse_offset_uncached(raw: &str) -> Result<i32> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ZoneError::MalformedOffset("empty string".to_string()));
    }

    let (sign, rest) = match s.as_bytes()[0] {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => (1, s),
    };

    let digits: String = match rest.split_once(':') {
        Some((h, m)) => {
            // With an explicit colon both sides must be non-empty digits.
            if h.is_empty() || m.is_empty() {
                return Err(ZoneError::MalformedOffset(format!("'{raw}'")));
            }
            if m.len() != 2 {
                return Err(ZoneError::MalformedOffset(format!(
                    "minutes must be two digits in '{raw}'"
                )));
            }
            format!("{h}{m}")
        }
        None => rest.to_string(),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ZoneError::MalformedOffset(format!("'{raw}'")));
    }

    let (hours, minutes) = match digits.len() {
        // "±H" / "±HH": whole hours
        1 | 2 => (digits.parse::<i32>().unwrap_or(0), 0),
        // "±HMM" / "±HHMM": last two digits are minutes
        3 | 4 => {
            let split = digits.len() - 2;
            (
                digits[..split].parse::<i32>().unwrap_or(0),
                digits[split..].parse::<i32>().unwrap_or(0),
            )
        }
        _ => return Err(ZoneError::MalformedOffset(format!("'{raw}'"))),
    };

    if minutes >= 60 {
        return Err(ZoneError::MalformedOffset(format!(
            "minutes out of range in '{raw}'"
        )));
    }

    Ok(sign * (hours * 60 + minutes))
}

/// Format signed minutes as a canonical `"±HH:MM"` string.
///
/// The sign is always explicit and both components zero-padded, so equal
/// offsets always format identically.
pub fn format_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Normalize any accepted offset string to its canonical `"±HH:MM"` form.
///
/// Numeric offsets already canonicalize through [`format_offset`]; this is
/// the string-side half, used for equality comparisons across
/// representations.
///
/// # Errors
///
/// Returns [`ZoneError::MalformedOffset`] for input [`parse_offset`] rejects.
pub fn normalize_offset(cache: &mut OffsetCache, raw: &str) -> Result<String> {
    parse_offset(cache, raw).map(format_offset)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(s: &str) -> Result<i32> {
        parse_offset(&mut OffsetCache::new(), s)
    }

    #[test]
    fn test_parse_bare_hour() {
        assert_eq!(parse("+5").unwrap(), 300);
        assert_eq!(parse("-7").unwrap(), -420);
        assert_eq!(parse("3").unwrap(), 180);
    }

    #[test]
    fn test_parse_two_digit_hour() {
        assert_eq!(parse("+05").unwrap(), 300);
        assert_eq!(parse("-11").unwrap(), -660);
    }

    #[test]
    fn test_parse_hh_mm() {
        assert_eq!(parse("+05:30").unwrap(), 330);
        assert_eq!(parse("-03:30").unwrap(), -210);
        assert_eq!(parse("+00:00").unwrap(), 0);
    }

    #[test]
    fn test_parse_colon_optional() {
        assert_eq!(parse("+0530").unwrap(), 330);
        assert_eq!(parse("-0845").unwrap(), -525);
        assert_eq!(parse("530").unwrap(), 330);
    }

    #[test]
    fn test_parse_missing_sign_is_positive() {
        assert_eq!(parse("09:30").unwrap(), 570);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("abc").is_err());
        assert!(parse("").is_err());
        assert!(parse("+").is_err());
        assert!(parse("+1:2").is_err());
        assert!(parse("1:23:45").is_err());
        assert!(parse("+12:70").is_err());
        assert!(parse("12345").is_err());
    }

    #[test]
    fn test_format_zero_padded() {
        assert_eq!(format_offset(300), "+05:00");
        assert_eq!(format_offset(-210), "-03:30");
        assert_eq!(format_offset(0), "+00:00");
        assert_eq!(format_offset(765), "+12:45");
    }

    #[test]
    fn test_normalize_canonical_form() {
        let mut cache = OffsetCache::new();
        assert_eq!(normalize_offset(&mut cache, "+5").unwrap(), "+05:00");
        assert_eq!(normalize_offset(&mut cache, "0530").unwrap(), "+05:30");
        assert_eq!(normalize_offset(&mut cache, "-04:00").unwrap(), "-04:00");
    }

    #[test]
    fn test_cache_is_transparent() {
        let mut cache = OffsetCache::new();
        let first = parse_offset(&mut cache, "+09:30").unwrap();
        assert_eq!(cache.len(), 1);
        let second = parse_offset(&mut cache, "+09:30").unwrap();
        assert_eq!(first, second);
        cache.clear();
        assert_eq!(parse_offset(&mut cache, "+09:30").unwrap(), first);
    }

    proptest! {
        // Round-trip law over every offset the table can represent.
        #[test]
        fn prop_offset_round_trip(minutes in -720i32..=840) {
            let mut cache = OffsetCache::new();
            let formatted = format_offset(minutes);
            prop_assert_eq!(parse_offset(&mut cache, &formatted).unwrap(), minutes);
        }
    }
}
