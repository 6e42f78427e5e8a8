//! The embedded zone table.
//!
//! Rows are ordered by continent, then id; that order is the stable
//! tie-break for every first-match lookup in the crate. Coordinates are the
//! reference city at 1e-4 degree precision. A handful of deprecated alias
//! ids (Calcutta, Saigon, Buenos_Aires) are kept for hint compatibility and
//! lose offset-match ties to canonical rows.

use crate::table::{Continent, ZoneRecord};

// Packed rules, `end_week | end_month | start_week | start_month` high to
// low nibble; week 0 = last occurrence. All change points are Sundays.
/// 2nd Sunday of March → 1st Sunday of November (North America).
const RULE_NA: u16 = 0x1B23;
/// Last Sunday of March → last Sunday of October (Europe).
const RULE_EU: u16 = 0x0A03;
/// Last Sunday of April → last Sunday of October (Egypt).
const RULE_EG: u16 = 0x0A04;
/// 1st Sunday of October → 1st Sunday of April (south-east Australia).
const RULE_AU: u16 = 0x141A;
/// Last Sunday of September → 1st Sunday of April (New Zealand).
const RULE_NZ: u16 = 0x1409;
/// 1st Sunday of September → 1st Sunday of April (Chile).
const RULE_CL: u16 = 0x1419;
/// Zone never observes DST.
const NONE: u16 = 0;

#[allow(clippy::too_many_arguments)]
const fn z(
    country: &'static str,
    zone_id: &'static str,
    std_offset: &'static str,
    dst_offset: &'static str,
    std_abbr: &'static str,
    dst_abbr: &'static str,
    continent: Continent,
    latitude: f64,
    longitude: f64,
    dst_rule: u16,
) -> ZoneRecord {
    ZoneRecord {
        country,
        zone_id,
        std_offset,
        dst_offset,
        std_abbr,
        dst_abbr,
        continent,
        latitude,
        longitude,
        dst_rule,
    }
}

use Continent::*;

#[rustfmt::skip]
pub(crate) static ZONES: &[ZoneRecord] = &[
    // Africa
    z("GH", "Africa/Accra",           "+00:00", "+00:00", "GMT",  "GMT",  Africa,       5.6037,   -0.1870, NONE),
    z("EG", "Africa/Cairo",           "+02:00", "+03:00", "EET",  "EEST", Africa,     30.0444,   31.2357, RULE_EG),
    z("MA", "Africa/Casablanca",      "+01:00", "+01:00", "WET",  "WET",  Africa,     33.5731,   -7.5898, NONE),
    z("ZA", "Africa/Johannesburg",    "+02:00", "+02:00", "SAST", "SAST", Africa,    -26.2041,   28.0473, NONE),
    z("NG", "Africa/Lagos",           "+01:00", "+01:00", "WAT",  "WAT",  Africa,      6.5244,    3.3792, NONE),
    z("KE", "Africa/Nairobi",         "+03:00", "+03:00", "EAT",  "EAT",  Africa,     -1.2921,   36.8219, NONE),
    // America
    z("US", "America/Anchorage",      "-09:00", "-08:00", "AKST", "AKDT", America,    61.2181, -149.9003, RULE_NA),
    z("AR", "America/Buenos_Aires",   "-03:00", "-03:00", "ART",  "ART",  America,   -34.6037,  -58.3816, NONE),
    z("US", "America/Chicago",        "-06:00", "-05:00", "CST",  "CDT",  America,    41.8781,  -87.6298, RULE_NA),
    z("US", "America/Denver",         "-07:00", "-06:00", "MST",  "MDT",  America,    39.7392, -104.9903, RULE_NA),
    z("CA", "America/Halifax",        "-04:00", "-03:00", "AST",  "ADT",  America,    44.6488,  -63.5752, RULE_NA),
    z("CU", "America/Havana",         "-05:00", "-04:00", "CST",  "CDT",  America,    23.1136,  -82.3666, RULE_NA),
    z("US", "America/Los_Angeles",    "-08:00", "-07:00", "PST",  "PDT",  America,    34.0522, -118.2437, RULE_NA),
    z("MX", "America/Mexico_City",    "-06:00", "-06:00", "CST",  "CST",  America,    19.4326,  -99.1332, NONE),
    z("US", "America/New_York",       "-05:00", "-04:00", "EST",  "EDT",  America,    40.7128,  -74.0060, RULE_NA),
    z("US", "America/Phoenix",        "-07:00", "-07:00", "MST",  "MST",  America,    33.4484, -112.0740, NONE),
    z("PR", "America/Puerto_Rico",    "-04:00", "-04:00", "AST",  "AST",  America,    18.4655,  -66.1057, NONE),
    z("CL", "America/Santiago",       "-04:00", "-03:00", "CLT",  "CLST", America,   -33.4489,  -70.6693, RULE_CL),
    z("BR", "America/Sao_Paulo",      "-03:00", "-03:00", "BRT",  "BRT",  America,   -23.5505,  -46.6333, NONE),
    z("CA", "America/St_Johns",       "-03:30", "-02:30", "NST",  "NDT",  America,    47.5615,  -52.7126, RULE_NA),
    z("CA", "America/Toronto",        "-05:00", "-04:00", "EST",  "EDT",  America,    43.6532,  -79.3832, RULE_NA),
    z("CA", "America/Vancouver",      "-08:00", "-07:00", "PST",  "PDT",  America,    49.2827, -123.1207, RULE_NA),
    // Antarctica
    z("AQ", "Antarctica/Casey",       "+11:00", "+11:00", "CAST", "CAST", Antarctica, -66.2821, 110.5285, NONE),
    z("AQ", "Antarctica/McMurdo",     "+12:00", "+13:00", "NZST", "NZDT", Antarctica, -77.8419, 166.6863, RULE_NZ),
    z("AQ", "Antarctica/Palmer",      "-03:00", "-03:00", "CLST", "CLST", Antarctica, -64.7742, -64.0545, NONE),
    // Asia
    z("TH", "Asia/Bangkok",           "+07:00", "+07:00", "ICT",  "ICT",  Asia,       13.7563,  100.5018, NONE),
    z("IN", "Asia/Calcutta",          "+05:30", "+05:30", "IST",  "IST",  Asia,       22.5726,   88.3639, NONE),
    z("BD", "Asia/Dhaka",             "+06:00", "+06:00", "BST",  "BST",  Asia,       23.8103,   90.4125, NONE),
    z("AE", "Asia/Dubai",             "+04:00", "+04:00", "GST",  "GST",  Asia,       25.2048,   55.2708, NONE),
    z("VN", "Asia/Ho_Chi_Minh",       "+07:00", "+07:00", "ICT",  "ICT",  Asia,       10.8231,  106.6297, NONE),
    z("HK", "Asia/Hong_Kong",         "+08:00", "+08:00", "HKT",  "HKT",  Asia,       22.3193,  114.1694, NONE),
    z("ID", "Asia/Jakarta",           "+07:00", "+07:00", "WIB",  "WIB",  Asia,       -6.2088,  106.8456, NONE),
    z("IL", "Asia/Jerusalem",         "+02:00", "+03:00", "IST",  "IDT",  Asia,       31.7683,   35.2137, RULE_EU),
    z("PK", "Asia/Karachi",           "+05:00", "+05:00", "PKT",  "PKT",  Asia,       24.8607,   67.0011, NONE),
    z("NP", "Asia/Kathmandu",         "+05:45", "+05:45", "NPT",  "NPT",  Asia,       27.7172,   85.3240, NONE),
    z("IN", "Asia/Kolkata",           "+05:30", "+05:30", "IST",  "IST",  Asia,       22.5726,   88.3639, NONE),
    z("SA", "Asia/Riyadh",            "+03:00", "+03:00", "AST",  "AST",  Asia,       24.7136,   46.6753, NONE),
    z("VN", "Asia/Saigon",            "+07:00", "+07:00", "ICT",  "ICT",  Asia,       10.8231,  106.6297, NONE),
    z("KR", "Asia/Seoul",             "+09:00", "+09:00", "KST",  "KST",  Asia,       37.5665,  126.9780, NONE),
    z("CN", "Asia/Shanghai",          "+08:00", "+08:00", "CST",  "CST",  Asia,       31.2304,  121.4737, NONE),
    z("SG", "Asia/Singapore",         "+08:00", "+08:00", "SGT",  "SGT",  Asia,        1.3521,  103.8198, NONE),
    z("IR", "Asia/Tehran",            "+03:30", "+03:30", "IRST", "IRST", Asia,       35.6892,   51.3890, NONE),
    z("JP", "Asia/Tokyo",             "+09:00", "+09:00", "JST",  "JST",  Asia,       35.6762,  139.6503, NONE),
    z("MM", "Asia/Yangon",            "+06:30", "+06:30", "MMT",  "MMT",  Asia,       16.8661,   96.1951, NONE),
    // Atlantic
    z("PT", "Atlantic/Azores",        "-01:00", "+00:00", "AZOT", "AZST", Atlantic,   37.7412,  -25.6756, RULE_EU),
    z("ES", "Atlantic/Canary",        "+00:00", "+01:00", "WET",  "WEST", Atlantic,   28.1235,  -15.4363, RULE_EU),
    z("CV", "Atlantic/Cape_Verde",    "-01:00", "-01:00", "CVT",  "CVT",  Atlantic,   14.9330,  -23.5133, NONE),
    z("IS", "Atlantic/Reykjavik",     "+00:00", "+00:00", "GMT",  "GMT",  Atlantic,   64.1466,  -21.9426, NONE),
    // Australia
    z("AU", "Australia/Adelaide",     "+09:30", "+10:30", "ACST", "ACDT", Australia, -34.9285,  138.6007, RULE_AU),
    z("AU", "Australia/Brisbane",     "+10:00", "+10:00", "AEST", "AEST", Australia, -27.4698,  153.0251, NONE),
    z("AU", "Australia/Darwin",       "+09:30", "+09:30", "ACST", "ACST", Australia, -12.4634,  130.8456, NONE),
    z("AU", "Australia/Melbourne",    "+10:00", "+11:00", "AEST", "AEDT", Australia, -37.8136,  144.9631, RULE_AU),
    z("AU", "Australia/Perth",        "+08:00", "+08:00", "AWST", "AWST", Australia, -31.9505,  115.8605, NONE),
    z("AU", "Australia/Sydney",       "+10:00", "+11:00", "AEST", "AEDT", Australia, -33.8688,  151.2093, RULE_AU),
    // Europe
    z("NL", "Europe/Amsterdam",       "+01:00", "+02:00", "CET",  "CEST", Europe,     52.3676,    4.9041, RULE_EU),
    z("GR", "Europe/Athens",          "+02:00", "+03:00", "EET",  "EEST", Europe,     37.9838,   23.7275, RULE_EU),
    z("DE", "Europe/Berlin",          "+01:00", "+02:00", "CET",  "CEST", Europe,     52.5200,   13.4050, RULE_EU),
    z("IE", "Europe/Dublin",          "+00:00", "+01:00", "GMT",  "IST",  Europe,     53.3498,   -6.2603, RULE_EU),
    z("FI", "Europe/Helsinki",        "+02:00", "+03:00", "EET",  "EEST", Europe,     60.1699,   24.9384, RULE_EU),
    z("TR", "Europe/Istanbul",        "+03:00", "+03:00", "TRT",  "TRT",  Europe,     41.0082,   28.9784, NONE),
    z("UA", "Europe/Kyiv",            "+02:00", "+03:00", "EET",  "EEST", Europe,     50.4501,   30.5234, RULE_EU),
    z("PT", "Europe/Lisbon",          "+00:00", "+01:00", "WET",  "WEST", Europe,     38.7223,   -9.1393, RULE_EU),
    z("GB", "Europe/London",          "+00:00", "+01:00", "GMT",  "BST",  Europe,     51.5074,   -0.1278, RULE_EU),
    z("ES", "Europe/Madrid",          "+01:00", "+02:00", "CET",  "CEST", Europe,     40.4168,   -3.7038, RULE_EU),
    z("RU", "Europe/Moscow",          "+03:00", "+03:00", "MSK",  "MSK",  Europe,     55.7558,   37.6173, NONE),
    z("FR", "Europe/Paris",           "+01:00", "+02:00", "CET",  "CEST", Europe,     48.8566,    2.3522, RULE_EU),
    z("CZ", "Europe/Prague",          "+01:00", "+02:00", "CET",  "CEST", Europe,     50.0755,   14.4378, RULE_EU),
    z("IT", "Europe/Rome",            "+01:00", "+02:00", "CET",  "CEST", Europe,     41.9028,   12.4964, RULE_EU),
    z("SE", "Europe/Stockholm",       "+01:00", "+02:00", "CET",  "CEST", Europe,     59.3293,   18.0686, RULE_EU),
    z("PL", "Europe/Warsaw",          "+01:00", "+02:00", "CET",  "CEST", Europe,     52.2297,   21.0122, RULE_EU),
    z("CH", "Europe/Zurich",          "+01:00", "+02:00", "CET",  "CEST", Europe,     47.3769,    8.5417, RULE_EU),
    // Indian
    z("MV", "Indian/Maldives",        "+05:00", "+05:00", "MVT",  "MVT",  Indian,      4.1755,   73.5093, NONE),
    z("MU", "Indian/Mauritius",       "+04:00", "+04:00", "MUT",  "MUT",  Indian,    -20.1609,   57.5012, NONE),
    z("RE", "Indian/Reunion",         "+04:00", "+04:00", "RET",  "RET",  Indian,    -20.8789,   55.4481, NONE),
    // Pacific
    z("WS", "Pacific/Apia",           "+13:00", "+13:00", "WSST", "WSST", Pacific,   -13.8506, -171.7513, NONE),
    z("NZ", "Pacific/Auckland",       "+12:00", "+13:00", "NZST", "NZDT", Pacific,   -36.8485,  174.7633, RULE_NZ),
    z("FJ", "Pacific/Fiji",           "+12:00", "+12:00", "FJT",  "FJT",  Pacific,   -18.1248,  178.4501, NONE),
    z("GU", "Pacific/Guam",           "+10:00", "+10:00", "CHST", "CHST", Pacific,    13.4443,  144.7937, NONE),
    z("US", "Pacific/Honolulu",       "-10:00", "-10:00", "HST",  "HST",  Pacific,    21.3069, -157.8583, NONE),
    z("PF", "Pacific/Tahiti",         "-10:00", "-10:00", "TAHT", "TAHT", Pacific,   -17.6509, -149.4260, NONE),
];
