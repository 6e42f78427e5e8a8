//! # zone-engine
//!
//! Offline local-time resolution for devices with no network access and no
//! full IANA database.
//!
//! The engine works from a compact embedded table of per-zone rules: it
//! maps an ambiguous hint (numeric UTC offset, partial or misspelled
//! `"Continent/City"` id, country code, abbreviation) to a canonical zone
//! record, decides whether DST is in effect at any instant under a packed
//! 16-bit annual rule, computes the next DST transition, and approximates
//! a zone from geographic coordinates.
//!
//! Everything is single-threaded, synchronous, and in-memory. The table is
//! read-only and shared; each [`LocalClock`] instance owns its caches. The
//! one piece of shared mutable state is the simulated-clock override
//! ([`set_simulated_now`] / [`clear_simulated_now`]), which a
//! multi-threaded embedder must guard itself.
//!
//! ## Modules
//!
//! - [`offset`] — `"±HH:MM"` offset codec
//! - [`table`] — the embedded zone table and its lookups
//! - [`rule`] — packed DST rule decoding, membership, next transition
//! - [`resolver`] — ambiguous hint → zone record
//! - [`geo`] — nearest-zone-by-coordinates approximation
//! - [`clock`] — time sources and the simulated clock
//! - [`local`] — the per-instance local clock facade
//! - [`error`] — error types

pub mod clock;
mod data;
pub mod error;
pub mod geo;
pub mod local;
pub mod offset;
pub mod resolver;
pub mod rule;
pub mod table;

pub use clock::{
    clear_simulated_now, set_simulated_now, FixedTimeSource, SystemTimeSource, TimeSource,
};
pub use error::ZoneError;
pub use geo::nearest_zone;
pub use local::{LocalClock, LocalTime, TransitionInfo, ZoneInfo, ZoneStatus};
pub use offset::{format_offset, normalize_offset, parse_offset, OffsetCache};
pub use resolver::{similarity, ResolvedZone, Resolver, ZoneHint, UNKNOWN_ZONE_ID};
pub use rule::{
    is_dst_active, next_transition, nth_weekday_of_month, DstRule, RuleCache, Transition, NO_DST,
};
pub use table::{Continent, ZoneRecord};
