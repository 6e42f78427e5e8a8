//! The per-instance local clock: the crate's public query surface.
//!
//! A [`LocalClock`] owns a construction hint, an injected [`TimeSource`],
//! and the resolver with its caches. The hint is resolved once on first
//! use and memoized; [`LocalClock::clear_cache`] is the only invalidation.
//! Any number of instances can coexist: the zone table is shared and
//! read-only, while each instance mutates only its own caches.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use serde::Serialize;
use tracing::trace;

use crate::clock::{SystemTimeSource, TimeSource};
use crate::error::{Result, ZoneError};
use crate::offset::format_offset;
use crate::resolver::{ResolvedZone, Resolver, ZoneHint};
use crate::table::{self, Continent, ZoneRecord};

/// Local calendar fields for one instant in the resolved zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Short weekday name ("Mon" .. "Sun").
    pub weekday: String,
}

/// The combined zone / DST-state answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneStatus {
    pub zone_id: String,
    pub is_dst: bool,
}

/// Zone metadata, one table row's worth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneInfo {
    pub code: String,
    pub zone_id: String,
    pub std_offset: String,
    pub dst_offset: String,
    pub std_abbr: String,
    pub dst_abbr: String,
    pub continent: Continent,
    pub lat: f64,
    pub lon: f64,
    pub dst_rule: u16,
}

impl From<&ZoneRecord> for ZoneInfo {
    fn from(z: &ZoneRecord) -> Self {
        Self {
            code: z.country.to_string(),
            zone_id: z.zone_id.to_string(),
            std_offset: z.std_offset.to_string(),
            dst_offset: z.dst_offset.to_string(),
            std_abbr: z.std_abbr.to_string(),
            dst_abbr: z.dst_abbr.to_string(),
            continent: z.continent,
            lat: z.latitude,
            lon: z.longitude,
            dst_rule: z.dst_rule,
        }
    }
}

/// The next DST change for the instance's zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionInfo {
    /// The change instant.
    pub next_change: DateTime<Utc>,
    /// Milliseconds from "now" to the change.
    pub time_until_change_ms: i64,
    /// `true` when the change enters DST.
    pub changes_to_dst: bool,
}

/// A zone-aware clock for one configured zone or offset.
pub struct LocalClock {
    hint: ZoneHint,
    source: Box<dyn TimeSource>,
    resolver: Resolver,
    resolved: Option<ResolvedZone>,
}

impl LocalClock {
    /// A clock on the real host time source.
    ///
    /// The hint can be an id, country code, abbreviation, offset in any
    /// accepted spelling, whole hours as an integer, or empty (adopt the
    /// host's current offset).
    pub fn new(hint: impl Into<ZoneHint>) -> Self {
        Self::with_source(hint, Box::new(SystemTimeSource))
    }

    /// A clock on an injected time source; tests pass a
    /// [`crate::clock::FixedTimeSource`].
    pub fn with_source(hint: impl Into<ZoneHint>, source: Box<dyn TimeSource>) -> Self {
        Self {
            hint: hint.into(),
            source,
            resolver: Resolver::new(),
            resolved: None,
        }
    }

    /// The memoized resolution of the construction hint.
    fn resolved(&mut self) -> ResolvedZone {
        if let Some(resolved) = self.resolved {
            return resolved;
        }
        let resolved = self.resolver.resolve(&self.hint, self.source.as_ref());
        trace!("hint {:?} resolved to {}", self.hint, resolved.id_string());
        self.resolved = Some(resolved);
        resolved
    }

    /// This zone's UTC offset in minutes at `instant`.
    fn offset_minutes_at(&mut self, instant: DateTime<Utc>) -> i32 {
        match self.resolved() {
            ResolvedZone::Record(z) => self.record_offset_at(z, instant),
            ResolvedZone::Fixed(minutes) => minutes,
            // Unresolvable hints keep the clock usable on the host offset;
            // only the reported id stays "Unknown".
            ResolvedZone::Unknown => self.source.local_offset_minutes(),
        }
    }

    fn record_offset_at(&mut self, z: &ZoneRecord, instant: DateTime<Utc>) -> i32 {
        let active = self.resolver.is_dst_active(instant, z.dst_rule);
        let current = if active { z.dst_offset } else { z.std_offset };
        // Table offsets are validated at load; an unparsable one cannot
        // reach this point.
        self.resolver.parse_offset(current).unwrap_or(0)
    }

    /// The current local date and time, broken into calendar fields.
    pub fn local_time(&mut self) -> LocalTime {
        let now = self.source.now();
        let offset = self.offset_minutes_at(now);
        let local = now + Duration::minutes(i64::from(offset));
        LocalTime {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
            weekday: local.weekday().to_string(),
        }
    }

    /// The current local time as `YYYY-MM-DDTHH:MM:SS±HH:MM`.
    pub fn iso_string(&mut self) -> String {
        let now = self.source.now();
        let offset = self.offset_minutes_at(now);
        format_with_offset(now, offset)
    }

    /// The resolved zone id, a formatted offset for raw-offset clocks, or
    /// `"Unknown"`.
    pub fn zone_id(&mut self) -> String {
        self.resolved().id_string()
    }

    /// Whether DST is currently in effect for this instance's zone.
    pub fn is_dst(&mut self) -> bool {
        let now = self.source.now();
        match self.resolved() {
            ResolvedZone::Record(z) => self.resolver.is_dst_active(now, z.dst_rule),
            _ => false,
        }
    }

    /// Whether DST is currently in effect for an arbitrary hint. Raw
    /// offsets and unresolvable hints have no DST behavior.
    pub fn is_dst_in(&mut self, hint: &str) -> bool {
        let now = self.source.now();
        match self.resolver.resolve(&ZoneHint::from(hint), self.source.as_ref()) {
            ResolvedZone::Record(z) => self.resolver.is_dst_active(now, z.dst_rule),
            _ => false,
        }
    }

    /// The combined zone / DST answer.
    pub fn status(&mut self) -> ZoneStatus {
        ZoneStatus {
            zone_id: self.zone_id(),
            is_dst: self.is_dst(),
        }
    }

    /// Express `instant` in another zone or explicit offset, as an ISO
    /// string.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::UnknownZone`] when `target` is neither a
    /// parsable offset nor resolvable to a table row. Unlike hint
    /// resolution, conversion has no sensible silent fallback.
    pub fn convert(&mut self, instant: DateTime<Utc>, target: &str) -> Result<String> {
        if target.trim().is_empty() {
            return Err(ZoneError::UnknownZone("(empty)".to_string()));
        }
        // An explicit offset target is taken literally, with no DST.
        if let Some(minutes) = self.resolver.parse_offset_hint(target) {
            return Ok(format_with_offset(instant, minutes));
        }
        match self.resolver.resolve(&ZoneHint::from(target), self.source.as_ref()) {
            ResolvedZone::Record(z) => {
                let offset = self.record_offset_at(z, instant);
                Ok(format_with_offset(instant, offset))
            }
            _ => Err(ZoneError::UnknownZone(target.to_string())),
        }
    }

    /// Zone metadata by id, country code, or abbreviation.
    pub fn zone_info(query: &str) -> Option<ZoneInfo> {
        table::by_zone_id(query)
            .or_else(|| table::by_country(query))
            .or_else(|| table::by_abbreviation(query))
            .map(ZoneInfo::from)
    }

    /// The next DST change for this instance's zone, or `None` when the
    /// zone never observes DST (including raw-offset and unknown clocks).
    pub fn next_transition(&mut self) -> Option<TransitionInfo> {
        let now = self.source.now();
        match self.resolved() {
            ResolvedZone::Record(z) => {
                let t = self.resolver.next_transition(now, z.dst_rule)?;
                Some(TransitionInfo {
                    next_change: t.at,
                    time_until_change_ms: (t.at - now).num_milliseconds(),
                    changes_to_dst: t.to_dst,
                })
            }
            _ => None,
        }
    }

    /// Human-readable form of [`LocalClock::next_transition`].
    pub fn next_transition_text(&mut self) -> Option<String> {
        let info = self.next_transition()?;
        let direction = if info.changes_to_dst {
            "DST begins"
        } else {
            "DST ends"
        };
        Some(format!(
            "{} {} (in {})",
            direction,
            info.next_change.format("%Y-%m-%d %H:%M UTC"),
            human_duration(info.time_until_change_ms)
        ))
    }

    /// Drop every memo, including the resolved zone. The next query
    /// recomputes everything; results do not change, only cost.
    pub fn clear_cache(&mut self) {
        trace!("clearing caches for hint {:?}", self.hint);
        self.resolved = None;
        self.resolver.clear();
    }
}

fn format_with_offset(instant: DateTime<Utc>, offset_minutes: i32) -> String {
    let shifted = instant + Duration::minutes(i64::from(offset_minutes));
    format!(
        "{}{}",
        shifted.format("%Y-%m-%dT%H:%M:%S"),
        format_offset(offset_minutes)
    )
}

/// "41 days, 3 hours" style rendering of a millisecond span.
fn human_duration(ms: i64) -> String {
    let total_minutes = ms / 60_000;
    let days = total_minutes / 1_440;
    let hours = (total_minutes % 1_440) / 60;
    let minutes = total_minutes % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{} day{}", days, if days == 1 { "" } else { "s" }));
    }
    if hours > 0 {
        parts.push(format!(
            "{} hour{}",
            hours,
            if hours == 1 { "" } else { "s" }
        ));
    }
    if minutes > 0 || parts.is_empty() {
        parts.push(format!(
            "{} minute{}",
            minutes,
            if minutes == 1 { "" } else { "s" }
        ));
    }
    parts.join(", ")
}

// ── Tests ───────────────────────────────────────────────────────────────────
