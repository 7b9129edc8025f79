//! Snapshot CSV codec
//!
//! Reads the fleet snapshot format and writes the same format back out so
//! an export can be reloaded.
//!
//! ## Format
//!
//! ```csv
//! timestamp,boat_id,gps_lat,gps_long,particle_size_microns,concentration_ppm,depth_cm,collection_volume_ml,battery_status,power_source
//! 2024-09-15T10:00:00Z,B1,19.0760,72.8777,12.5,1.8,40,250,76,solar
//! ```
//!
//! Fields are positional and split on bare commas; there is no quoting.
//!
//! ## Leniency
//!
//! The loader never fails as a whole. Per row:
//! - fewer than 10 fields, or an unparseable timestamp: row skipped
//! - unparseable float: value becomes NaN, row kept and counted lossy
//! - unparseable integer: leading digits are used (`"50.7"` reads as 50),
//!   otherwise 0; the row is counted lossy
//!
//! Downstream queries guard against the NaN values this lets through.

use core::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use log::warn;
use serde::Serialize;

use crate::constants::buffers::{MAX_CSV_FIELDS, SNAPSHOT_COLUMNS};
use crate::errors::{TelemetryError, TelemetryResult};
use crate::reading::{PowerSource, Reading, Sample};
use crate::time::Timestamp;

/// Header row of the snapshot format
pub const SNAPSHOT_HEADER: &str = "timestamp,boat_id,gps_lat,gps_long,particle_size_microns,\
concentration_ppm,depth_cm,collection_volume_ml,battery_status,power_source";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Counters for one snapshot load
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Data rows turned into samples
    pub rows_read: usize,
    /// Rows dropped because they could not be placed on a timeline
    pub skipped_rows: usize,
    /// Rows kept with at least one unparseable numeric field
    pub lossy_rows: usize,
}

/// Parse a whole snapshot document
///
/// The first line is the header and is ignored. Blank lines are skipped
/// without counting.
pub fn parse_snapshot(text: &str) -> (Vec<Sample>, LoadStats) {
    let mut stats = LoadStats::default();
    let mut samples = Vec::new();

    for (idx, raw) in text.split('\n').enumerate().skip(1) {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line, idx + 1) {
            Ok((sample, lossy)) => {
                if lossy {
                    stats.lossy_rows += 1;
                    warn!("snapshot line {}: unparseable numeric field", idx + 1);
                }
                stats.rows_read += 1;
                samples.push(sample);
            }
            Err(err) => {
                stats.skipped_rows += 1;
                warn!("skipping snapshot row: {}", err);
            }
        }
    }

    (samples, stats)
}

/// Parse one data row
///
/// `line_no` is only used for diagnostics. Returns the sample and whether
/// any numeric field had to be substituted.
pub fn parse_row(line: &str, line_no: usize) -> TelemetryResult<(Sample, bool)> {
    let mut fields: heapless::Vec<&str, MAX_CSV_FIELDS> = heapless::Vec::new();
    for field in line.split(',') {
        if fields.push(field.trim()).is_err() {
            break;
        }
    }

    if fields.len() < SNAPSHOT_COLUMNS {
        return Err(TelemetryError::MalformedRow {
            line: line_no,
            reason: "expected 10 fields",
        });
    }

    let timestamp =
        parse_timestamp(fields[0]).ok_or(TelemetryError::InvalidTimestamp { line: line_no })?;

    let mut lossy = false;
    let mut float = |raw: &str| match raw.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            lossy = true;
            f64::NAN
        }
    };
    let gps_lat = float(fields[2]);
    let gps_long = float(fields[3]);
    let particle_size_microns = float(fields[4]);
    let concentration_ppm = float(fields[5]);

    let mut int = |raw: &str, max: i64| match parse_int_prefix(raw) {
        Some(v) if (0..=max).contains(&v) => v,
        Some(v) => {
            lossy = true;
            v.clamp(0, max)
        }
        None => {
            lossy = true;
            0
        }
    };
    let depth_cm = int(fields[6], i64::from(u32::MAX)) as u32;
    let collection_volume_ml = int(fields[7], i64::from(u32::MAX)) as u32;
    let battery_status = int(fields[8], 100) as u8;

    let sample = Sample {
        timestamp,
        boat_id: fields[1].to_string(),
        gps_lat,
        gps_long,
        particle_size_microns,
        concentration_ppm,
        depth_cm,
        collection_volume_ml,
        battery_status,
        power_source: PowerSource::parse(fields[9]),
    };

    Ok((sample, lossy))
}

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339 with any offset, naive date-times (`T` or space
/// separated, optional fraction) taken as UTC, and bare dates at midnight.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Read the leading integer of a field
///
/// Optional sign followed by at least one digit; anything after the digits
/// is ignored. `"42abc"` is 42, `"abc"` is `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate rather than fail on absurdly long digit runs
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Serialize readings as a snapshot document
///
/// Only base fields are written, in input column order, so the result
/// reloads through [`parse_snapshot`].
pub fn export_csv<'a, I>(readings: I) -> String
where
    I: IntoIterator<Item = &'a Reading>,
{
    let mut out = String::with_capacity(SNAPSHOT_HEADER.len() + 1);
    out.push_str(SNAPSHOT_HEADER);
    out.push('\n');
    for reading in readings {
        let s = &reading.sample;
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{}",
            s.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            s.boat_id,
            s.gps_lat,
            s.gps_long,
            s.particle_size_microns,
            s.concentration_ppm,
            s.depth_cm,
            s.collection_volume_ml,
            s.battery_status,
            s.power_source,
        );
    }
    out
}

/// Download name for an export taken on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("sensor-data-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(rows: &[&str]) -> String {
        let mut text = String::from(SNAPSHOT_HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn parses_well_formed_rows() {
        let text = doc(&[
            "2024-09-15T10:00:00Z,B1,19.076,72.8777,12.5,1.8,40,250,76,solar",
            "2024-09-15T10:00:03Z,B2,19.080,72.8800,8.0,0.9,35,240,55,hydro",
        ]);
        let (samples, stats) = parse_snapshot(&text);

        assert_eq!(stats, LoadStats { rows_read: 2, skipped_rows: 0, lossy_rows: 0 });
        assert_eq!(samples[0].boat_id, "B1");
        assert_eq!(samples[0].battery_status, 76);
        assert_eq!(samples[1].power_source, PowerSource::Hydro);
    }

    #[test]
    fn tolerates_crlf_and_blank_lines() {
        let text = format!(
            "{}\r\n2024-09-15T10:00:00Z,B1,19.0,72.8,12.5,1.8,40,250,76,solar\r\n\r\n",
            SNAPSHOT_HEADER
        );
        let (samples, stats) = parse_snapshot(&text);
        assert_eq!(samples.len(), 1);
        assert_eq!(stats.skipped_rows, 0);
        assert_eq!(samples[0].power_source, PowerSource::Solar);
    }

    #[test]
    fn short_rows_and_bad_timestamps_are_skipped() {
        let text = doc(&[
            "2024-09-15T10:00:00Z,B1,19.0,72.8",
            "yesterday,B1,19.0,72.8,12.5,1.8,40,250,76,solar",
            "2024-09-15T10:00:00Z,B1,19.0,72.8,12.5,1.8,40,250,76,solar",
        ]);
        let (samples, stats) = parse_snapshot(&text);
        assert_eq!(samples.len(), 1);
        assert_eq!(stats.skipped_rows, 2);
    }

    #[test]
    fn bad_numbers_become_nan_or_prefix() {
        let text = doc(&["2024-09-15T10:00:00Z,B1,19.0,72.8,big,1.8,40.9,n/a,150,diesel"]);
        let (samples, stats) = parse_snapshot(&text);
        let s = &samples[0];

        assert_eq!(stats.lossy_rows, 1);
        assert!(s.particle_size_microns.is_nan());
        assert_eq!(s.depth_cm, 40);
        assert_eq!(s.collection_volume_ml, 0);
        assert_eq!(s.battery_status, 100);
        assert_eq!(s.power_source, PowerSource::Other("diesel".into()));
    }

    #[test]
    fn malformed_row_reports_line() {
        let err = parse_row("a,b,c", 7).unwrap_err();
        assert_eq!(err, TelemetryError::MalformedRow { line: 7, reason: "expected 10 fields" });
    }

    #[test]
    fn timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 9, 15, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-09-15T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-09-15T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-09-15T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-09-15 10:00:00.000"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-09-15"),
            Some(Utc.with_ymd_and_hms(2024, 9, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("15/09/2024"), None);
    }

    #[test]
    fn int_prefix_behaves_like_leading_digits() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("50.7"), Some(50));
        assert_eq!(parse_int_prefix("-3x"), Some(-3));
        assert_eq!(parse_int_prefix("x3"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn export_reloads() {
        let text = doc(&[
            "2024-09-15T10:00:00.250Z,B1,19.076,72.8777,12.5,1.8,40,250,76,solar",
            "2024-09-15T10:00:03Z,B2,19.08,72.88,8,0.9,35,240,55,tidal",
        ]);
        let (samples, _) = parse_snapshot(&text);
        let readings: Vec<Reading> = samples
            .iter()
            .cloned()
            .map(|s| crate::synth::MetricSynthesizer::seeded(Default::default(), 1).synthesize(s))
            .collect();

        let exported = export_csv(&readings);
        assert!(exported.starts_with(SNAPSHOT_HEADER));
        let (reloaded, stats) = parse_snapshot(&exported);
        assert_eq!(stats.rows_read, 2);
        assert_eq!(reloaded, samples);
    }

    #[test]
    fn export_name_uses_date() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(export_file_name(date), "sensor-data-2024-09-01.csv");
    }
}
