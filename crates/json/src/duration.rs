//! ISO 8601 durations (`PT1H30M`, `-P1DT0.5S`), the wire form of time spans.
//!
//! Years and months are accepted on input with fixed lengths of 365 and 30
//! days. Output only ever uses days, hours, minutes and seconds.

use time::Duration;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

const DATE_UNITS: [(u8, i64); 4] = [
    (b'Y', 365 * SECONDS_PER_DAY),
    (b'M', 30 * SECONDS_PER_DAY),
    (b'W', 7 * SECONDS_PER_DAY),
    (b'D', SECONDS_PER_DAY),
];

const TIME_UNITS: [(u8, i64); 3] = [
    (b'H', SECONDS_PER_HOUR),
    (b'M', SECONDS_PER_MINUTE),
    (b'S', 1),
];

/// Parse an ISO 8601 duration. Returns `None` for anything malformed.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let (negative, rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let rest = rest.strip_prefix('P')?;
    let (date, time) = match rest.split_once('T') {
        Some((_, "")) => return None,
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };
    if date.is_empty() && time.is_none() {
        return None;
    }

    let mut total = Duration::ZERO;
    for (value, scale) in components(date, &DATE_UNITS)? {
        if value.contains('.') {
            return None;
        }
        let count: i64 = value.parse().ok()?;
        total = total.checked_add(Duration::seconds(count.checked_mul(scale)?))?;
    }
    if let Some(time) = time {
        for (value, scale) in components(time, &TIME_UNITS)? {
            let part = match value.split_once('.') {
                Some((whole, fraction)) if scale == 1 => seconds_with_fraction(whole, fraction)?,
                Some(_) => return None,
                None => Duration::seconds(value.parse::<i64>().ok()?.checked_mul(scale)?),
            };
            total = total.checked_add(part)?;
        }
    }
    Some(if negative { -total } else { total })
}

/// Split `PnDnH…` style text into `(number, seconds-per-unit)` pairs, rejecting
/// units that are unknown, repeated or out of order.
fn components<'a>(text: &'a str, units: &[(u8, i64)]) -> Option<Vec<(&'a str, i64)>> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut next_unit = 0;
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() || b == b'.' {
            continue;
        }
        let position = units[next_unit..].iter().position(|(unit, _)| *unit == b)?;
        let (_, scale) = units[next_unit + position];
        let value = &text[start..i];
        if value.is_empty() {
            return None;
        }
        parts.push((value, scale));
        next_unit += position + 1;
        start = i + 1;
    }
    if start != bytes.len() {
        return None;
    }
    Some(parts)
}

fn seconds_with_fraction(whole: &str, fraction: &str) -> Option<Duration> {
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let seconds: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let digits = &fraction[..fraction.len().min(9)];
    let nanos: i32 = format!("{digits:0<9}").parse().ok()?;
    Some(Duration::new(seconds, nanos))
}

/// Format a duration the way the management API writes time spans.
pub fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return String::from("PT0S");
    }
    let mut out = String::new();
    if duration.is_negative() {
        out.push('-');
    }
    // Magnitudes are taken unsigned: `Duration::abs` saturates at `Duration::MIN`.
    let total = duration.whole_seconds().unsigned_abs();
    let nanos = duration.subsec_nanoseconds().unsigned_abs();
    let days = total / SECONDS_PER_DAY as u64;
    let hours = total % SECONDS_PER_DAY as u64 / SECONDS_PER_HOUR as u64;
    let minutes = total % SECONDS_PER_HOUR as u64 / SECONDS_PER_MINUTE as u64;
    let seconds = total % SECONDS_PER_MINUTE as u64;

    out.push('P');
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours > 0 || minutes > 0 || seconds > 0 || nanos > 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if seconds > 0 || nanos > 0 {
            out.push_str(&seconds.to_string());
            if nanos > 0 {
                let fraction = format!("{nanos:09}");
                out.push('.');
                out.push_str(fraction.trim_end_matches('0'));
            }
            out.push('S');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_time_components() {
        assert_eq!(parse_duration("PT1H30M"), Some(Duration::minutes(90)));
        assert_eq!(parse_duration("PT45S"), Some(Duration::seconds(45)));
        assert_eq!(parse_duration("PT0.25S"), Some(Duration::milliseconds(250)));
    }

    #[test]
    fn parses_date_components() {
        assert_eq!(parse_duration("P2D"), Some(Duration::days(2)));
        assert_eq!(parse_duration("P1W"), Some(Duration::days(7)));
        assert_eq!(
            parse_duration("P1DT2H"),
            Some(Duration::days(1) + Duration::hours(2))
        );
    }

    #[test]
    fn parses_negative_durations() {
        assert_eq!(parse_duration("-PT5S"), Some(Duration::seconds(-5)));
    }

    #[test]
    fn rejects_malformed_durations() {
        for input in ["", "P", "PT", "1H", "PT1X", "PT1S1H", "P1.5D", "PT1.5H", "PTH", "P1DT"] {
            assert_eq!(parse_duration(input), None, "{input}");
        }
    }

    #[test]
    fn formats_canonically() {
        assert_eq!(format_duration(Duration::ZERO), "PT0S");
        assert_eq!(format_duration(Duration::minutes(90)), "PT1H30M");
        assert_eq!(format_duration(Duration::days(1) + Duration::seconds(1)), "P1DT1S");
        assert_eq!(format_duration(Duration::milliseconds(-1500)), "-PT1.5S");
        assert_eq!(format_duration(Duration::days(3)), "P3D");
    }

    #[test]
    fn formats_extreme_values_exactly() {
        assert_eq!(
            format_duration(Duration::MIN),
            "-P106751991167300DT15H30M8.999999999S"
        );
        assert_eq!(
            format_duration(Duration::MAX),
            "P106751991167300DT15H30M7.999999999S"
        );
    }

    #[test]
    fn format_then_parse_preserves_value() {
        let value = Duration::new(93_784, 5_000_000);
        assert_eq!(parse_duration(&format_duration(value)), Some(value));
    }
}
