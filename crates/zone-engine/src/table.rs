//! The embedded zone table: one immutable record per zone.
//!
//! The table itself lives in [`crate::data`] and is read-only for the life
//! of the process; everything here is lookup helpers over it. Lookups that
//! can match several rows resolve to the first in table order, which is the
//! stable tie-break used throughout the crate.

use serde::Serialize;

use crate::data::ZONES;

/// The nine top-level IANA region names a `zone_id` can start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Continent {
    Africa,
    America,
    Antarctica,
    Asia,
    Atlantic,
    Australia,
    Europe,
    Indian,
    Pacific,
}

impl Continent {
    /// Parse a continent token, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "africa" => Some(Self::Africa),
            "america" => Some(Self::America),
            "antarctica" => Some(Self::Antarctica),
            "asia" => Some(Self::Asia),
            "atlantic" => Some(Self::Atlantic),
            "australia" => Some(Self::Australia),
            "europe" => Some(Self::Europe),
            "indian" => Some(Self::Indian),
            "pacific" => Some(Self::Pacific),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Africa => "Africa",
            Self::America => "America",
            Self::Antarctica => "Antarctica",
            Self::Asia => "Asia",
            Self::Atlantic => "Atlantic",
            Self::Australia => "Australia",
            Self::Europe => "Europe",
            Self::Indian => "Indian",
            Self::Pacific => "Pacific",
        }
    }
}

/// One row of the embedded timezone table.
///
/// Offsets are stored as `"±HH:MM"` strings at the table boundary and parsed
/// on demand through the offset codec; `dst_rule` is the packed encoding
/// described in [`crate::rule`], with `0` meaning the zone never observes
/// DST (for those rows `dst_offset` equals `std_offset` and `dst_abbr`
/// equals `std_abbr`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneRecord {
    /// ISO 3166 two-letter country code.
    pub country: &'static str,
    /// IANA-style `"Continent/City"` identifier, unique within the table.
    pub zone_id: &'static str,
    /// Standard-time UTC offset, `"±HH:MM"`.
    pub std_offset: &'static str,
    /// Daylight-time UTC offset, `"±HH:MM"`.
    pub dst_offset: &'static str,
    /// Standard-time abbreviation (2-4 letters).
    pub std_abbr: &'static str,
    /// Daylight-time abbreviation (2-4 letters).
    pub dst_abbr: &'static str,
    pub continent: Continent,
    /// Reference latitude in degrees, table precision 1e-4.
    pub latitude: f64,
    /// Reference longitude in degrees, table precision 1e-4.
    pub longitude: f64,
    /// Packed DST rule; `0` = no DST.
    pub dst_rule: u16,
}

/// City names whose ids survive in the table only as backward-compat
/// aliases. Rows carrying one of these lose offset-match ties to canonical
/// rows.
const DEPRECATED_CITIES: &[&str] = &["Calcutta", "Saigon", "Buenos_Aires", "Rangoon", "Katmandu"];

impl ZoneRecord {
    /// The city token of the id (everything after the first `/`).
    pub fn city(&self) -> &'static str {
        match self.zone_id.split_once('/') {
            Some((_, city)) => city,
            None => self.zone_id,
        }
    }

    pub fn observes_dst(&self) -> bool {
        self.dst_rule != 0
    }

    /// Whether this row's id is a deprecated alias form.
    pub fn is_deprecated_alias(&self) -> bool {
        DEPRECATED_CITIES.contains(&self.city())
    }
}

/// The full table, in stable order (continent, then id).
pub fn zones() -> &'static [ZoneRecord] {
    ZONES
}

/// Exact `zone_id` lookup.
pub fn by_zone_id(id: &str) -> Option<&'static ZoneRecord> {
    ZONES.iter().find(|z| z.zone_id == id)
}

/// First row for a country code (case-insensitive).
pub fn by_country(code: &str) -> Option<&'static ZoneRecord> {
    ZONES.iter().find(|z| z.country.eq_ignore_ascii_case(code))
}

/// First row whose standard or daylight abbreviation matches
/// (case-insensitive).
pub fn by_abbreviation(abbr: &str) -> Option<&'static ZoneRecord> {
    ZONES.iter().find(|z| {
        z.std_abbr.eq_ignore_ascii_case(abbr) || z.dst_abbr.eq_ignore_ascii_case(abbr)
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offset::{parse_offset, OffsetCache};
    use std::collections::HashSet;

    #[test]
    fn test_zone_ids_unique() {
        let mut seen = HashSet::new();
        for z in zones() {
            assert!(seen.insert(z.zone_id), "duplicate zone_id {}", z.zone_id);
        }
    }

    #[test]
    fn test_coordinates_valid_degrees() {
        for z in zones() {
            assert!(
                (-90.0..=90.0).contains(&z.latitude),
                "{} latitude {}",
                z.zone_id,
                z.latitude
            );
            assert!(
                (-180.0..=180.0).contains(&z.longitude),
                "{} longitude {}",
                z.zone_id,
                z.longitude
            );
        }
    }

    #[test]
    fn test_offsets_parse_and_are_canonical() {
        let mut cache = OffsetCache::new();
        for z in zones() {
            let std = parse_offset(&mut cache, z.std_offset).unwrap();
            let dst = parse_offset(&mut cache, z.dst_offset).unwrap();
            assert_eq!(crate::offset::format_offset(std), z.std_offset);
            assert_eq!(crate::offset::format_offset(dst), z.dst_offset);
            if !z.observes_dst() {
                assert_eq!(std, dst, "{} has no DST but offsets differ", z.zone_id);
            }
        }
    }

    #[test]
    fn test_continent_matches_id_prefix() {
        for z in zones() {
            let prefix = z.zone_id.split('/').next().unwrap();
            assert_eq!(
                Continent::parse(prefix),
                Some(z.continent),
                "{} prefix/continent mismatch",
                z.zone_id
            );
        }
    }

    #[test]
    fn test_country_codes_two_letters() {
        for z in zones() {
            assert_eq!(z.country.len(), 2, "{}", z.zone_id);
            assert!(z.country.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_abbreviation_lengths() {
        for z in zones() {
            for abbr in [z.std_abbr, z.dst_abbr] {
                assert!(
                    (2..=4).contains(&abbr.len()),
                    "{} abbreviation {abbr:?}",
                    z.zone_id
                );
            }
        }
    }

    #[test]
    fn test_lookup_by_zone_id() {
        let z = by_zone_id("Europe/Warsaw").unwrap();
        assert_eq!(z.country, "PL");
        assert_eq!(z.std_abbr, "CET");
        assert!(by_zone_id("Europe/Atlantis").is_none());
    }

    #[test]
    fn test_lookup_by_country() {
        assert_eq!(by_country("JP").unwrap().zone_id, "Asia/Tokyo");
        assert_eq!(by_country("jp").unwrap().zone_id, "Asia/Tokyo");
    }

    #[test]
    fn test_lookup_by_abbreviation_first_match_wins() {
        // AST is both Atlantic (America/Halifax) and Arabia (Asia/Riyadh);
        // table order resolves to the Atlantic row.
        assert_eq!(by_abbreviation("AST").unwrap().zone_id, "America/Halifax");
        assert_eq!(by_abbreviation("edt").unwrap().zone_id, "America/New_York");
    }

    #[test]
    fn test_deprecated_alias_detection() {
        assert!(by_zone_id("Asia/Calcutta").unwrap().is_deprecated_alias());
        assert!(!by_zone_id("Asia/Kolkata").unwrap().is_deprecated_alias());
    }

    #[test]
    fn test_city_token() {
        assert_eq!(by_zone_id("America/New_York").unwrap().city(), "New_York");
    }
}
