//! Nearest-zone approximation from geographic coordinates.
//!
//! A flat index of scaled integer coordinates is built once, lazily, from
//! the zone table; lookups are a linear Manhattan-distance scan over it.
//! Manhattan distance stands in for great-circle distance: zone boundaries
//! are coarse relative to the table's sampling density, so the cheaper
//! metric picks the same row in practice.

use std::sync::OnceLock;

use crate::table::zones;

/// Matches the table's 1e-4 degree coordinate precision.
const COORD_SCALE: f64 = 10_000.0;

struct GeoEntry {
    index: usize,
    lat: i64,
    lon: i64,
}

static GEO_INDEX: OnceLock<Vec<GeoEntry>> = OnceLock::new();

fn index() -> &'static [GeoEntry] {
    GEO_INDEX.get_or_init(|| {
        zones()
            .iter()
            .enumerate()
            .map(|(index, z)| GeoEntry {
                index,
                lat: (z.latitude * COORD_SCALE).round() as i64,
                lon: (z.longitude * COORD_SCALE).round() as i64,
            })
            .collect()
    })
}

/// The id of the table row nearest to the given coordinates.
///
/// Ties go to the earlier table row; the scan keeps the first minimum, so
/// the result is deterministic regardless of call order or cache state.
pub fn nearest_zone(latitude: f64, longitude: f64) -> &'static str {
    let lat = (latitude * COORD_SCALE).round() as i64;
    let lon = (longitude * COORD_SCALE).round() as i64;

    let mut best: Option<(i64, usize)> = None;
    for entry in index() {
        let distance = (entry.lat - lat).abs() + (entry.lon - lon).abs();
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, entry.index)),
        }
    }

    match best {
        Some((_, index)) => zones()[index].zone_id,
        // The embedded table is never empty.
        None => "Unknown",
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
