//! Ambiguous-hint → zone-record resolution.
//!
//! A hint can be almost anything a device configuration screen produces: an
//! exact id, a country code, an abbreviation, a numeric offset in several
//! spellings, or a misspelled `"Continent/City"` string. Strategies are
//! tried in a fixed order and the first success wins; a failed strategy is
//! control flow, not an error, so resolution itself never raises. It
//! degrades to [`ResolvedZone::Unknown`] (or to a raw offset) instead.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::clock::TimeSource;
use crate::error::Result;
use crate::offset::{self, OffsetCache};
use crate::rule::{self, RuleCache, Transition};
use crate::table::{self, Continent, ZoneRecord};

/// Zone id reported for hints nothing in the table can be matched to.
pub const UNKNOWN_ZONE_ID: &str = "Unknown";

/// Minimum similarity score for a fuzzy city match to be accepted.
///
/// The threshold and the weighting constants below are tuned against the
/// table's city names; changing any of them changes which misspellings
/// resolve, so they are pinned by tests.
const SIMILARITY_THRESHOLD: f64 = 0.5;
/// Character-ratio weight at maximum length imbalance.
const CHAR_WEIGHT_MAX: f64 = 0.95;
/// How much the character-ratio weight falls as lengths converge.
const CHAR_WEIGHT_SPAN: f64 = 0.15;

/// A construction hint for the resolver.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ZoneHint {
    /// No hint: adopt the host's current UTC offset.
    #[default]
    HostOffset,
    /// Whole hours east of UTC.
    Hours(i32),
    /// Any textual form: id, country code, abbreviation, offset string.
    Named(String),
}

impl From<i32> for ZoneHint {
    fn from(hours: i32) -> Self {
        Self::Hours(hours)
    }
}

impl From<&str> for ZoneHint {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            Self::HostOffset
        } else {
            Self::Named(s.to_string())
        }
    }
}

impl From<String> for ZoneHint {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

/// The outcome of resolution: a table row, a raw offset with no DST
/// behavior, or the unknown sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedZone {
    Record(&'static ZoneRecord),
    Fixed(i32),
    Unknown,
}

impl ResolvedZone {
    /// The id string reported for this resolution.
    pub fn id_string(&self) -> String {
        match self {
            Self::Record(z) => z.zone_id.to_string(),
            Self::Fixed(minutes) => offset::format_offset(*minutes),
            Self::Unknown => UNKNOWN_ZONE_ID.to_string(),
        }
    }
}

/// The resolver and the caches it owns.
///
/// All three caches are purely derived memos; [`Resolver::clear`] drops
/// them without changing any observable result.
#[derive(Debug, Default)]
pub struct Resolver {
    offsets: OffsetCache,
    rules: RuleCache,
    offset_matches: HashMap<i32, Vec<usize>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.offsets.clear();
        self.rules.clear();
        self.offset_matches.clear();
    }

    /// Parse an offset string through the shared cache.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::error::ZoneError::MalformedOffset`] from the
    /// codec.
    pub fn parse_offset(&mut self, s: &str) -> Result<i32> {
        offset::parse_offset(&mut self.offsets, s)
    }

    /// Whether DST is active at `instant` under `rule` (cached).
    pub fn is_dst_active(&mut self, instant: DateTime<Utc>, rule: u16) -> bool {
        rule::is_dst_active(&mut self.rules, instant, rule)
    }

    /// Next DST change after `now` under `rule` (cached).
    pub fn next_transition(&mut self, now: DateTime<Utc>, rule: u16) -> Option<Transition> {
        rule::next_transition(&mut self.rules, now, rule)
    }

    /// Resolve a hint against the table. First success wins:
    /// exact id, then country code / abbreviation, then numeric offset,
    /// then `"Continent/City"` matching.
    pub fn resolve(&mut self, hint: &ZoneHint, source: &dyn TimeSource) -> ResolvedZone {
        match hint {
            ZoneHint::HostOffset => {
                let minutes = source.local_offset_minutes();
                trace!("no hint, adopting host offset {}", offset::format_offset(minutes));
                ResolvedZone::Fixed(minutes)
            }
            ZoneHint::Hours(hours) => self.resolve_offset(hours * 60, None, source),
            ZoneHint::Named(text) => self.resolve_text(text, source),
        }
    }

    fn resolve_text(&mut self, raw: &str, source: &dyn TimeSource) -> ResolvedZone {
        let text = raw.trim();

        if let Some(z) = table::by_zone_id(text) {
            trace!("'{}' resolved by exact id", text);
            return ResolvedZone::Record(z);
        }

        if text.len() == 2 && text.bytes().all(|b| b.is_ascii_alphabetic()) {
            if let Some(z) = table::by_country(text) {
                trace!("'{}' resolved as country code to {}", text, z.zone_id);
                return ResolvedZone::Record(z);
            }
        }
        if (2..=4).contains(&text.len()) && text.bytes().all(|b| b.is_ascii_alphabetic()) {
            if let Some(z) = table::by_abbreviation(text) {
                trace!("'{}' resolved as abbreviation to {}", text, z.zone_id);
                return ResolvedZone::Record(z);
            }
        }

        if let Some(minutes) = self.parse_offset_hint(text) {
            return self.resolve_offset(minutes, None, source);
        }

        if let Some((continent, city)) = text.split_once('/') {
            return self.resolve_continent_city(continent, city, source);
        }

        trace!("'{}' matched no strategy", text);
        ResolvedZone::Unknown
    }

    /// Accept `"±H"`, `"±HH:MM"`, `"±HHMM"`, and `"UTC±N"` / `"GMT±N"`
    /// spellings. `None` means "not an offset hint", and the caller moves
    /// on to the next strategy.
    pub fn parse_offset_hint(&mut self, text: &str) -> Option<i32> {
        let trimmed = text.trim();
        let upper = trimmed.to_ascii_uppercase();
        let stripped = upper
            .strip_prefix("UTC")
            .or_else(|| upper.strip_prefix("GMT"))
            .unwrap_or(&upper);
        if stripped.len() < upper.len() && stripped.is_empty() {
            // Bare "UTC" / "GMT".
            return Some(0);
        }
        self.parse_offset(stripped).ok()
    }

    /// Find the best record for a numeric offset. `context` carries the
    /// continent/city tokens when the original construction hint had
    /// `"Continent/City"` shape, which biases tie-breaking toward that
    /// continent and city.
    fn resolve_offset(
        &mut self,
        minutes: i32,
        context: Option<(&str, &str)>,
        source: &dyn TimeSource,
    ) -> ResolvedZone {
        let now = source.now();
        let matches = self.offset_match_indices(minutes, now);
        if matches.is_empty() {
            trace!(
                "no zone at {}, keeping raw offset",
                offset::format_offset(minutes)
            );
            return ResolvedZone::Fixed(minutes);
        }

        let zones = table::zones();
        // Deprecated alias ids lose ties to canonical rows.
        let preferred: Vec<usize> = matches
            .iter()
            .copied()
            .filter(|&i| !zones[i].is_deprecated_alias())
            .collect();
        let pool = if preferred.is_empty() { &matches } else { &preferred };

        if let Some((continent_token, city_token)) = context {
            if let Some(continent) = Continent::parse(continent_token) {
                let in_continent: Vec<usize> = pool
                    .iter()
                    .copied()
                    .filter(|&i| zones[i].continent == continent)
                    .collect();
                if !in_continent.is_empty() {
                    let city = normalize_city(city_token);
                    if let Some(&i) = in_continent
                        .iter()
                        .find(|&&i| zones[i].city().eq_ignore_ascii_case(&city))
                    {
                        return ResolvedZone::Record(&zones[i]);
                    }
                    if let Some(&i) = best_fuzzy(&city, &in_continent, zones) {
                        return ResolvedZone::Record(&zones[i]);
                    }
                    return ResolvedZone::Record(&zones[in_continent[0]]);
                }
            }
        }

        let chosen = &zones[pool[0]];
        trace!(
            "{} resolved by offset to {}",
            offset::format_offset(minutes),
            chosen.zone_id
        );
        ResolvedZone::Record(chosen)
    }

    /// Records whose DST-state-appropriate offset at `now` equals
    /// `minutes`, in table order. Memoized by `minutes`.
    fn offset_match_indices(&mut self, minutes: i32, now: DateTime<Utc>) -> Vec<usize> {
        if let Some(found) = self.offset_matches.get(&minutes) {
            return found.clone();
        }
        let mut found = Vec::new();
        for (i, z) in table::zones().iter().enumerate() {
            let active = rule::is_dst_active(&mut self.rules, now, z.dst_rule);
            let current = if active { z.dst_offset } else { z.std_offset };
            if let Ok(m) = offset::parse_offset(&mut self.offsets, current) {
                if m == minutes {
                    found.push(i);
                }
            }
        }
        self.offset_matches.insert(minutes, found.clone());
        found
    }

    fn resolve_continent_city(
        &mut self,
        continent_token: &str,
        city_token: &str,
        source: &dyn TimeSource,
    ) -> ResolvedZone {
        let zones = table::zones();
        let city = normalize_city(city_token);

        let Some(continent) = Continent::parse(continent_token) else {
            // Unrecognized continent: fall back to a global city-substring
            // search before giving up.
            let needle = city.to_lowercase();
            for z in zones {
                let candidate = z.city().to_lowercase();
                if candidate.contains(&needle) || needle.contains(&candidate) {
                    trace!("'{}/{}' resolved by city substring to {}", continent_token, city_token, z.zone_id);
                    return ResolvedZone::Record(z);
                }
            }
            trace!("'{}/{}' unresolvable", continent_token, city_token);
            return ResolvedZone::Unknown;
        };

        let in_continent: Vec<usize> = zones
            .iter()
            .enumerate()
            .filter(|(_, z)| z.continent == continent)
            .map(|(i, _)| i)
            .collect();

        if in_continent.is_empty() {
            // Continent recognized but unpopulated: try the host's current
            // offset before giving up.
            let minutes = source.local_offset_minutes();
            let matches = self.offset_match_indices(minutes, source.now());
            return match matches.first() {
                Some(&i) => ResolvedZone::Record(&zones[i]),
                None => ResolvedZone::Unknown,
            };
        }

        if let Some(&i) = best_fuzzy(&city, &in_continent, zones) {
            trace!("'{}/{}' fuzzy-resolved to {}", continent_token, city_token, zones[i].zone_id);
            return ResolvedZone::Record(&zones[i]);
        }

        trace!(
            "'{}/{}' below similarity threshold, using first {} row",
            continent_token,
            city_token,
            continent.name()
        );
        ResolvedZone::Record(&zones[in_continent[0]])
    }
}

/// Device hints spell multi-word cities with spaces; the table uses
/// underscores.
fn normalize_city(token: &str) -> String {
    token.trim().replace(' ', "_")
}

/// The index of the best-scoring candidate city, if it clears the
/// acceptance threshold. The strict comparison keeps the earliest row on
/// score ties.
fn best_fuzzy<'a>(city: &str, candidates: &'a [usize], zones: &[ZoneRecord]) -> Option<&'a usize> {
    let mut best: Option<(f64, &usize)> = None;
    for i in candidates {
        let score = similarity(city, zones[*i].city());
        if best.map_or(true, |(b, _)| score > b) {
            best = Some((score, i));
        }
    }
    best.and_then(|(score, i)| (score > SIMILARITY_THRESHOLD).then_some(i))
}

/// Case-insensitive string similarity in [0, 1].
///
/// Equal strings score 1. Otherwise the score combines a character ratio
/// (equal characters at equal positions over the longer length) weighted
/// 0.8-0.95, the weight rising with length imbalance, plus a
/// position-weighted component worth the remaining 0.05-0.2 in which
/// earlier matches count more. Short, mostly-matching, left-anchored
/// strings score high, which is what minor misspellings and truncations
/// look like.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a == b {
        return 1.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let longer = a_chars.len().max(b_chars.len());
    let shorter = a_chars.len().min(b_chars.len());
    if longer == 0 {
        return 0.0;
    }

    let balance = shorter as f64 / longer as f64;
    let char_weight = CHAR_WEIGHT_MAX - CHAR_WEIGHT_SPAN * balance;
    let pos_weight = 1.0 - char_weight;

    let mut matches = 0usize;
    let mut weighted = 0.0;
    for i in 0..shorter {
        if a_chars[i] == b_chars[i] {
            matches += 1;
            weighted += (longer - i) as f64;
        }
    }
    let weight_total = (longer * (longer + 1)) as f64 / 2.0;

    char_weight * (matches as f64 / longer as f64) + pos_weight * (weighted / weight_total)
}

// ── Tests ───────────────────────────────────────────────────────────────────
