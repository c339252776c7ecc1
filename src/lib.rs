//! Core pace-to-splits conversion logic.
//!
//! Everything in this crate root is a pure function from field text to a
//! table of formatted split times. The Yew layer in `main.rs` owns all I/O
//! and re-invokes [`compute_splits`] whenever the user edits an input.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Kilometers per statute mile. Fixed conversion factor, not configurable.
pub const KM_PER_MILE: f64 = 1.60934;
/// Half marathon distance in kilometers.
pub const HALF_MARATHON_KM: f64 = 21.0975;
/// Marathon distance in kilometers.
pub const MARATHON_KM: f64 = 42.195;

// Compiled regex for pace parsing: unbounded minutes, one or two second digits.
static PACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2})$").unwrap());

/// Unit tag carried by a parsed distance token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Meters,
    Kilometers,
    Miles,
}

/// A parsed distance token.
///
/// `label` keeps the original token text (unit suffix and all) so the result
/// table shows exactly what the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Distance {
    pub label: String,
    pub magnitude: f64,
    pub unit: Unit,
}

impl Distance {
    /// Normalize to kilometers.
    pub fn kilometers(&self) -> f64 {
        match self.unit {
            Unit::Meters => self.magnitude / 1000.0,
            Unit::Kilometers => self.magnitude,
            Unit::Miles => self.magnitude * KM_PER_MILE,
        }
    }
}

/// A running pace: a duration in seconds over a reference distance in
/// kilometers. Both are strictly positive once parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pace {
    pub seconds: f64,
    pub reference_km: f64,
}

/// Ordered `(label, formatted time)` pairs, one entry per valid distance
/// token, in input order.
pub type SplitTable = Vec<(String, String)>;

// Invalid pace and invalid reference distance both surface as the same
// user-facing message; neither is distinguished more finely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitsError {
    InvalidInput,
}

impl fmt::Display for SplitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitsError::InvalidInput => {
                write!(f, "Please enter valid pace time and distance.")
            }
        }
    }
}

impl std::error::Error for SplitsError {}

/// Parse a pace duration in `M:SS` / `MM:SS` form into whole seconds.
///
/// Minutes are unbounded and the seconds field is not range-checked:
/// `"5:75"` is 375 s, stopwatch-style. The total must be positive;
/// anything else is `None`.
pub fn parse_pace_seconds(input: &str) -> Option<u32> {
    let caps = PACE_REGEX.captures(input.trim())?;
    let minutes: u32 = caps[1].parse().ok()?;
    let seconds: u32 = caps[2].parse().ok()?;
    let total = minutes.checked_mul(60)?.checked_add(seconds)?;
    (total > 0).then_some(total)
}

/// Parse the reference distance field: a positive finite decimal in km.
pub fn parse_reference_km(input: &str) -> Option<f64> {
    let km: f64 = input.trim().parse().ok()?;
    (km.is_finite() && km > 0.0).then_some(km)
}

/// Parse one distance token, e.g. `"400m"`, `"5k"`, `"1mi"`, `"marathon"`.
///
/// Returns `None` for anything malformed; bad tokens are dropped by the
/// caller, never reported as errors. Named distances are kilometers.
pub fn parse_distance_token(token: &str) -> Option<Distance> {
    let token = token.trim();
    let named_km = match token {
        "" => return None,
        "half_marathon" => Some(HALF_MARATHON_KM),
        "marathon" => Some(MARATHON_KM),
        _ => None,
    };
    if let Some(km) = named_km {
        return Some(Distance {
            label: token.to_string(),
            magnitude: km,
            unit: Unit::Kilometers,
        });
    }

    // Suffixes are matched longest-first so "1mi" is never read as meters.
    let (prefix, unit) = if let Some(p) = token.strip_suffix("mi") {
        (p, Unit::Miles)
    } else if let Some(p) = token.strip_suffix('m') {
        (p, Unit::Meters)
    } else if let Some(p) = token.strip_suffix('k') {
        (p, Unit::Kilometers)
    } else {
        return None;
    };

    let magnitude: f64 = prefix.parse().ok()?;
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return None;
    }
    Some(Distance {
        label: token.to_string(),
        magnitude,
        unit,
    })
}

/// Split comma-separated free text into parsed distances, trimming
/// whitespace and silently dropping empty or malformed tokens.
pub fn parse_distance_list(input: &str) -> Vec<Distance> {
    input
        .split(',')
        .filter_map(|raw| {
            let parsed = parse_distance_token(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                debug!("Dropping unrecognized distance token '{}'", raw.trim());
            }
            parsed
        })
        .collect()
}

/// Inverse of [`parse_distance_list`]: joins token labels back into the
/// comma-separated text form the parser accepts.
pub fn serialize_distance_list(distances: &[Distance]) -> String {
    distances
        .iter()
        .map(|d| d.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Projected time in seconds to cover `target_km` at the given constant
/// pace. Direct proportional scaling, no fatigue modeling.
pub fn split_seconds(pace: &Pace, target_km: f64) -> f64 {
    pace.seconds * (target_km / pace.reference_km)
}

/// Format a split duration for display.
///
/// Totals of an hour or more render as `H:MM:SS`. Meter-based targets below
/// an hour get `M:SS.D` with a *truncated* tenths digit, since short splits
/// need finer resolution. Everything else is `M:SS` with rounded seconds.
/// Rounding happens before decomposition, so a `:60` second field can never
/// be printed.
pub fn format_split(total_seconds: f64, unit: Unit) -> String {
    let rounded = total_seconds.round() as u64;
    if rounded >= 3600 {
        format!(
            "{}:{:02}:{:02}",
            rounded / 3600,
            (rounded % 3600) / 60,
            rounded % 60
        )
    } else if unit == Unit::Meters {
        let tenths_total = (total_seconds * 10.0).floor() as u64;
        format!(
            "{}:{:02}.{}",
            tenths_total / 600,
            (tenths_total / 10) % 60,
            tenths_total % 10
        )
    } else {
        format!("{}:{:02}", rounded / 60, rounded % 60)
    }
}

/// Project a split for every parsed distance at a constant pace.
///
/// Input order is preserved; duplicate token text keeps the first
/// occurrence only, so table keys stay unique.
pub fn project_splits(pace: &Pace, distances: &[Distance]) -> SplitTable {
    let mut table: SplitTable = Vec::with_capacity(distances.len());
    for distance in distances {
        if table.iter().any(|(label, _)| label == &distance.label) {
            continue;
        }
        let secs = split_seconds(pace, distance.kilometers());
        table.push((distance.label.clone(), format_split(secs, distance.unit)));
    }
    table
}

/// Entry point used by the UI: raw field text in, ordered split table out.
///
/// Invalid pace or reference distance is the only failure; malformed
/// distance tokens just produce fewer rows.
pub fn compute_splits(
    pace_text: &str,
    reference_text: &str,
    distances_text: &str,
) -> Result<SplitTable, SplitsError> {
    let seconds = parse_pace_seconds(pace_text).ok_or(SplitsError::InvalidInput)?;
    let reference_km = parse_reference_km(reference_text).ok_or(SplitsError::InvalidInput)?;
    let pace = Pace {
        seconds: f64::from(seconds),
        reference_km,
    };
    let distances = parse_distance_list(distances_text);
    debug!(
        "Projecting {} splits at {}s per {}km",
        distances.len(),
        pace.seconds,
        pace.reference_km
    );
    Ok(project_splits(&pace, &distances))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splits(pace: &str, reference: &str, list: &str) -> SplitTable {
        compute_splits(pace, reference, list).expect("inputs should be valid")
    }

    #[test]
    fn split_at_reference_distance_returns_the_pace() {
        assert_eq!(splits("5:00", "1", "1k"), vec![("1k".into(), "5:00".into())]);
        assert_eq!(splits("7:30", "2", "2k"), vec![("2k".into(), "7:30".into())]);
    }

    #[test]
    fn splits_scale_linearly_with_distance() {
        let table = splits("5:00", "1", "1k, 2k, 4k");
        assert_eq!(
            table,
            vec![
                ("1k".into(), "5:00".into()),
                ("2k".into(), "10:00".into()),
                ("4k".into(), "20:00".into()),
            ]
        );
    }

    #[test]
    fn mile_token_normalizes_through_the_fixed_factor() {
        let mile = parse_distance_token("1mi").unwrap();
        assert_eq!(mile.unit, Unit::Miles);
        assert!((mile.kilometers() - 1.60934).abs() < 1e-12);

        // Same split as the equivalent km magnitude passed directly.
        let via_token = splits("5:00", "1", "1mi");
        let via_km = splits("5:00", "1", "1.60934k");
        assert_eq!(via_token[0].1, via_km[0].1);
        assert_eq!(via_token[0].1, "8:03");
    }

    #[test]
    fn named_distances_resolve_to_fixed_constants() {
        let marathon = parse_distance_token("marathon").unwrap();
        assert_eq!(marathon.unit, Unit::Kilometers);
        assert_eq!(marathon.kilometers(), 42.195);

        let half = parse_distance_token("half_marathon").unwrap();
        assert_eq!(half.unit, Unit::Kilometers);
        assert_eq!(half.kilometers(), 21.0975);

        // Labels preserve the token text, not the expanded magnitude.
        assert_eq!(marathon.label, "marathon");
        assert_eq!(half.label, "half_marathon");
    }

    #[test]
    fn mi_suffix_wins_over_bare_m() {
        assert_eq!(parse_distance_token("400m").unwrap().unit, Unit::Meters);
        assert_eq!(parse_distance_token("1mi").unwrap().unit, Unit::Miles);
        assert_eq!(parse_distance_token("5k").unwrap().unit, Unit::Kilometers);
    }

    #[test]
    fn malformed_tokens_are_dropped_in_order() {
        let table = splits("5:00", "1", "5k, bogus, 10k");
        assert_eq!(
            table,
            vec![
                ("5k".into(), "25:00".into()),
                ("10k".into(), "50:00".into()),
            ]
        );
        assert!(splits("5:00", "1", "bogus").is_empty());
        // Non-positive and non-numeric prefixes are malformed too.
        assert!(splits("5:00", "1", "-5k, 0m, xk, mi, k").is_empty());
    }

    #[test]
    fn duplicate_tokens_keep_the_first_entry_only() {
        let table = splits("5:00", "1", "5k, 5k, 10k");
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].0, "5k");
        assert_eq!(table[1].0, "10k");
    }

    #[test]
    fn empty_tokens_and_whitespace_are_ignored() {
        let table = splits("5:00", "1", " 5k ,, , 10k ");
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].0, "5k");
        assert_eq!(table[1].0, "10k");
    }

    #[test]
    fn meter_splits_use_the_tenths_format() {
        assert_eq!(
            splits("5:00", "1", "400m"),
            vec![("400m".into(), "2:00.0".into())]
        );
        // Tenths are truncated, not rounded: 415.5 m at 5:00/km is 124.65 s.
        assert_eq!(splits("5:00", "1", "415.5m")[0].1, "2:04.6");
    }

    #[test]
    fn hour_long_splits_use_the_hms_format() {
        // 42.195 km at 300 s/km is 12658.5 s, rounded half away from zero.
        assert_eq!(splits("5:00", "1", "marathon")[0].1, "3:30:59");
        assert_eq!(splits("5:00", "1", "half_marathon")[0].1, "1:45:29");
    }

    #[test]
    fn rounded_seconds_never_print_sixty() {
        // 3599.7 s rounds into the hours branch instead of printing 59:60.
        assert_eq!(format_split(3599.7, Unit::Kilometers), "1:00:00");
        assert_eq!(format_split(119.7, Unit::Kilometers), "2:00");
    }

    #[test]
    fn pace_parsing_accepts_unbounded_minutes_and_rejects_garbage() {
        assert_eq!(parse_pace_seconds("5:00"), Some(300));
        assert_eq!(parse_pace_seconds("5:7"), Some(307));
        assert_eq!(parse_pace_seconds("120:30"), Some(7230));
        assert_eq!(parse_pace_seconds(" 4:45 "), Some(285));
        assert_eq!(parse_pace_seconds("abc"), None);
        assert_eq!(parse_pace_seconds("5"), None);
        assert_eq!(parse_pace_seconds("0:00"), None);
        assert_eq!(parse_pace_seconds("-5:00"), None);
    }

    #[test]
    fn pace_seconds_over_59_carry_like_a_stopwatch() {
        assert_eq!(parse_pace_seconds("5:75"), Some(375));
        assert_eq!(
            splits("5:75", "1", "1k"),
            vec![("1k".into(), "6:15".into())]
        );
    }

    #[test]
    fn invalid_pace_or_reference_yields_the_single_error() {
        for (pace, reference) in [
            ("abc", "1"),
            ("", "1"),
            ("5:00", "0"),
            ("5:00", "-1"),
            ("5:00", "abc"),
            ("5:00", ""),
        ] {
            let err = compute_splits(pace, reference, "5k").unwrap_err();
            assert_eq!(err, SplitsError::InvalidInput);
            assert_eq!(err.to_string(), "Please enter valid pace time and distance.");
        }
    }

    #[test]
    fn serialize_round_trips_the_token_list() {
        let parsed = parse_distance_list("400m, 5k, 1mi, half_marathon");
        assert_eq!(
            serialize_distance_list(&parsed),
            "400m, 5k, 1mi, half_marathon"
        );
        // Malformed tokens disappear from the serialized form.
        let cleaned = parse_distance_list("5k, bogus, 10k");
        assert_eq!(serialize_distance_list(&cleaned), "5k, 10k");
    }
}
