//! The packed DST rule engine.
//!
//! A zone's annual DST schedule is a single 16-bit value:
//!
//! ```text
//! bits 15-12  end week      (0 = last occurrence in the month)
//! bits 11-8   end month
//! bits  6-4   start week    (3 bits; 0 = last)
//! bits  3-0   start month
//! ```
//!
//! All change points are the given week's Sunday at 02:00, evaluated on the
//! UTC calendar. The all-zero value is the sentinel for "never observes
//! DST". Rules where the start month is later in the year than the end
//! month describe southern-hemisphere zones whose DST season spans the year
//! boundary.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};

/// Sentinel rule value: the zone never observes DST.
pub const NO_DST: u16 = 0;

/// Wall-clock hour of the change point.
const CHANGE_HOUR: u32 = 2;

/// A decoded rule. Months are 1-12; week 0 means the last occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstRule {
    pub start_month: u32,
    pub start_week: u32,
    pub end_month: u32,
    pub end_week: u32,
}

impl DstRule {
    /// Decode a packed rule. Returns `None` for the no-DST sentinel and for
    /// values whose month nibbles are outside 1-12 or week fields above 5.
    pub fn decode(raw: u16) -> Option<Self> {
        if raw == NO_DST {
            return None;
        }
        let rule = Self {
            start_month: (raw & 0x000F) as u32,
            start_week: ((raw >> 4) & 0x0007) as u32,
            end_month: ((raw >> 8) & 0x000F) as u32,
            end_week: ((raw >> 12) & 0x000F) as u32,
        };
        let month_ok = (1..=12).contains(&rule.start_month) && (1..=12).contains(&rule.end_month);
        if month_ok && rule.start_week <= 5 && rule.end_week <= 5 {
            Some(rule)
        } else {
            None
        }
    }
}

/// An upcoming DST change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The change instant.
    pub at: DateTime<Utc>,
    /// `true` when the zone enters DST at `at`, `false` when it leaves.
    pub to_dst: bool,
}

/// Memos for the rule engine: nth-weekday dates and per-instant DST
/// membership. Purely derived state; clearing only costs recomputation.
#[derive(Debug, Default)]
pub struct RuleCache {
    nth_weekday: HashMap<(i32, u32, Weekday, u32), u32>,
    dst_active: HashMap<(i64, u16), bool>,
}

impl RuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nth_weekday.clear();
        self.dst_active.clear();
    }
}

/// Day-of-month of the `n`-th `weekday` in `month`/`year`; `n == 0` means
/// the last occurrence. `None` when the month is invalid or the `n`-th
/// occurrence does not exist. Memoized by `(year, month, weekday, n)`.
pub fn nth_weekday_of_month(
    cache: &mut RuleCache,
    year: i32,
    month: u32,
    weekday: Weekday,
    n: u32,
) -> Option<u32> {
    if let Some(&day) = cache.nth_weekday.get(&(year, month, weekday, n)) {
        return Some(day);
    }
    let day = nth_weekday_uncached(year, month, weekday, n)?;
    cache.nth_weekday.insert((year, month, weekday, n), day);
    Some(day)
}

fn nth_weekday_uncached(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<u32> {
    if n == 0 {
        // Backward from the last day of the month.
        let last = last_day_of_month(year, month)?;
        let diff =
            (last.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
        Some(last.day() - diff)
    } else {
        // Forward from the first of the month.
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let diff = (weekday.num_days_from_monday() + 7 - first.weekday().num_days_from_monday()) % 7;
        let day = 1 + diff + (n - 1) * 7;
        // from_ymd_opt rejects days past the month end.
        NaiveDate::from_ymd_opt(year, month, day)?;
        Some(day)
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// The 02:00 change instant for a rule's month/week pair in `year`.
fn change_instant(cache: &mut RuleCache, year: i32, month: u32, week: u32) -> Option<DateTime<Utc>> {
    let day = nth_weekday_of_month(cache, year, month, Weekday::Sun, week)?;
    Utc.with_ymd_and_hms(year, month, day, CHANGE_HOUR, 0, 0).single()
}

/// Whether DST is in effect at `instant` under `rule`.
///
/// Northern shape (`start <= end`): active iff `start <= instant < end`.
/// Southern shape (`start > end`): the season spans the year boundary, so
/// active iff `instant >= start || instant < end`. The no-DST sentinel (and
/// any undecodable rule) is never active. Memoized by `(instant, rule)`.
pub fn is_dst_active(cache: &mut RuleCache, instant: DateTime<Utc>, rule: u16) -> bool {
    let Some(decoded) = DstRule::decode(rule) else {
        return false;
    };
    let key = (instant.timestamp(), rule);
    if let Some(&active) = cache.dst_active.get(&key) {
        return active;
    }

    let year = instant.year();
    let start = change_instant(cache, year, decoded.start_month, decoded.start_week);
    let end = change_instant(cache, year, decoded.end_month, decoded.end_week);
    let active = match (start, end) {
        (Some(start), Some(end)) => {
            if start <= end {
                start <= instant && instant < end
            } else {
                instant >= start || instant < end
            }
        }
        _ => false,
    };
    cache.dst_active.insert(key, active);
    active
}

/// The soonest strictly-future DST change after `now` under `rule`.
///
/// Candidates are this year's start, this year's end, and next year's
/// start. `None` for the no-DST sentinel.
pub fn next_transition(
    cache: &mut RuleCache,
    now: DateTime<Utc>,
    rule: u16,
) -> Option<Transition> {
    let decoded = DstRule::decode(rule)?;
    let year = now.year();

    let candidates = [
        (change_instant(cache, year, decoded.start_month, decoded.start_week), true),
        (change_instant(cache, year, decoded.end_month, decoded.end_week), false),
        (change_instant(cache, year + 1, decoded.start_month, decoded.start_week), true),
    ];

    candidates
        .into_iter()
        .filter_map(|(at, to_dst)| at.map(|at| Transition { at, to_dst }))
        .filter(|t| t.at > now)
        .min_by_key(|t| t.at)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // 2nd Sunday of March → 1st Sunday of November.
    const NORTH: u16 = 0x1B23;
    // 1st Sunday of October → 1st Sunday of April.
    const SOUTH: u16 = 0x141A;
    // Last Sunday of March → last Sunday of October.
    const LAST_WEEK: u16 = 0x0A03;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_decode_fields() {
        let r = DstRule::decode(NORTH).unwrap();
        assert_eq!(r.start_month, 3);
        assert_eq!(r.start_week, 2);
        assert_eq!(r.end_month, 11);
        assert_eq!(r.end_week, 1);
    }

    #[test]
    fn test_decode_sentinel_and_invalid() {
        assert_eq!(DstRule::decode(NO_DST), None);
        // End month nibble 13.
        assert_eq!(DstRule::decode(0x1D23), None);
        // Start month 0 with other fields set.
        assert_eq!(DstRule::decode(0x1B20), None);
    }

    #[test]
    fn test_nth_weekday_forward() {
        let mut cache = RuleCache::new();
        // March 2026 begins on a Sunday.
        assert_eq!(nth_weekday_of_month(&mut cache, 2026, 3, Weekday::Sun, 1), Some(1));
        assert_eq!(nth_weekday_of_month(&mut cache, 2026, 3, Weekday::Sun, 2), Some(8));
        assert_eq!(nth_weekday_of_month(&mut cache, 2026, 11, Weekday::Sun, 1), Some(1));
        assert_eq!(nth_weekday_of_month(&mut cache, 2026, 3, Weekday::Mon, 1), Some(2));
    }

    #[test]
    fn test_nth_weekday_last() {
        let mut cache = RuleCache::new();
        assert_eq!(nth_weekday_of_month(&mut cache, 2026, 3, Weekday::Sun, 0), Some(29));
        assert_eq!(nth_weekday_of_month(&mut cache, 2026, 10, Weekday::Sun, 0), Some(25));
        assert_eq!(nth_weekday_of_month(&mut cache, 2026, 2, Weekday::Sat, 0), Some(28));
    }

    #[test]
    fn test_nth_weekday_out_of_month() {
        let mut cache = RuleCache::new();
        // February 2026 has only four Sundays.
        assert_eq!(nth_weekday_of_month(&mut cache, 2026, 2, Weekday::Sun, 5), None);
        assert_eq!(nth_weekday_of_month(&mut cache, 2026, 13, Weekday::Sun, 1), None);
    }

    #[test]
    fn test_nth_weekday_memoized() {
        let mut cache = RuleCache::new();
        let first = nth_weekday_of_month(&mut cache, 2026, 3, Weekday::Sun, 2);
        let again = nth_weekday_of_month(&mut cache, 2026, 3, Weekday::Sun, 2);
        assert_eq!(first, again);
    }

    #[test]
    fn test_dst_boundary_at_start() {
        // 2026 start: Sunday March 8, 02:00.
        let mut cache = RuleCache::new();
        assert!(!is_dst_active(&mut cache, utc(2026, 3, 8, 1, 59), NORTH));
        assert!(is_dst_active(&mut cache, utc(2026, 3, 8, 2, 0), NORTH));
        assert!(is_dst_active(&mut cache, utc(2026, 3, 8, 2, 1), NORTH));
    }

    #[test]
    fn test_dst_boundary_at_end() {
        // 2026 end: Sunday November 1, 02:00.
        let mut cache = RuleCache::new();
        assert!(is_dst_active(&mut cache, utc(2026, 11, 1, 1, 59), NORTH));
        assert!(!is_dst_active(&mut cache, utc(2026, 11, 1, 2, 0), NORTH));
        assert!(!is_dst_active(&mut cache, utc(2026, 11, 1, 2, 1), NORTH));
    }

    #[test]
    fn test_dst_midseason() {
        let mut cache = RuleCache::new();
        assert!(is_dst_active(&mut cache, utc(2026, 7, 15, 12, 0), NORTH));
        assert!(!is_dst_active(&mut cache, utc(2026, 1, 15, 12, 0), NORTH));
        assert!(!is_dst_active(&mut cache, utc(2026, 12, 15, 12, 0), NORTH));
    }

    #[test]
    fn test_southern_wraparound() {
        // 2026 season: starts October 4, ends April 5.
        let mut cache = RuleCache::new();
        assert!(is_dst_active(&mut cache, utc(2026, 1, 15, 12, 0), SOUTH));
        assert!(is_dst_active(&mut cache, utc(2026, 4, 5, 1, 59), SOUTH));
        assert!(!is_dst_active(&mut cache, utc(2026, 4, 5, 2, 0), SOUTH));
        assert!(!is_dst_active(&mut cache, utc(2026, 7, 1, 12, 0), SOUTH));
        assert!(is_dst_active(&mut cache, utc(2026, 10, 4, 2, 0), SOUTH));
        assert!(is_dst_active(&mut cache, utc(2026, 12, 31, 23, 59), SOUTH));
    }

    #[test]
    fn test_last_week_rule() {
        // 2026: last Sunday of March is the 29th, of October the 25th.
        let mut cache = RuleCache::new();
        assert!(!is_dst_active(&mut cache, utc(2026, 3, 29, 1, 59), LAST_WEEK));
        assert!(is_dst_active(&mut cache, utc(2026, 3, 29, 2, 0), LAST_WEEK));
        assert!(is_dst_active(&mut cache, utc(2026, 10, 25, 1, 59), LAST_WEEK));
        assert!(!is_dst_active(&mut cache, utc(2026, 10, 25, 2, 0), LAST_WEEK));
    }

    #[test]
    fn test_sentinel_never_active() {
        let mut cache = RuleCache::new();
        assert!(!is_dst_active(&mut cache, utc(2026, 7, 15, 12, 0), NO_DST));
    }

    #[test]
    fn test_next_transition_into_dst() {
        let mut cache = RuleCache::new();
        let t = next_transition(&mut cache, utc(2026, 1, 15, 0, 0), NORTH).unwrap();
        assert_eq!(t.at, utc(2026, 3, 8, 2, 0));
        assert!(t.to_dst);
    }

    #[test]
    fn test_next_transition_out_of_dst() {
        let mut cache = RuleCache::new();
        let t = next_transition(&mut cache, utc(2026, 6, 15, 0, 0), NORTH).unwrap();
        assert_eq!(t.at, utc(2026, 11, 1, 2, 0));
        assert!(!t.to_dst);
    }

    #[test]
    fn test_next_transition_rolls_to_next_year() {
        let mut cache = RuleCache::new();
        let t = next_transition(&mut cache, utc(2026, 12, 1, 0, 0), NORTH).unwrap();
        // 2nd Sunday of March 2027.
        assert_eq!(t.at, utc(2027, 3, 14, 2, 0));
        assert!(t.to_dst);
    }

    #[test]
    fn test_next_transition_strictly_future() {
        let mut cache = RuleCache::new();
        // Exactly at the start instant the start itself no longer counts.
        let t = next_transition(&mut cache, utc(2026, 3, 8, 2, 0), NORTH).unwrap();
        assert_eq!(t.at, utc(2026, 11, 1, 2, 0));
    }

    #[test]
    fn test_next_transition_none_for_sentinel() {
        let mut cache = RuleCache::new();
        assert_eq!(next_transition(&mut cache, utc(2026, 6, 1, 0, 0), NO_DST), None);
    }

    #[test]
    fn test_next_transition_southern_candidate_set() {
        // Between a southern start and year-end the candidate set yields
        // next year's start (this year's end already passed in April).
        let mut cache = RuleCache::new();
        let t = next_transition(&mut cache, utc(2026, 11, 15, 0, 0), SOUTH).unwrap();
        assert_eq!(t.at, utc(2027, 10, 3, 2, 0));
        assert!(t.to_dst);
    }
}
