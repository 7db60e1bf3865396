//! Duration helpers shared by the separator renderer and the config layer.
use std::time::Duration;

use crate::error::TailerError;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Rounds `d` down to a multiple of `unit`. A zero unit leaves `d` untouched.
pub fn truncate_to(d: Duration, unit: Duration) -> Duration {
    let unit = unit.as_nanos();
    if unit == 0 {
        return d;
    }
    let nanos = d.as_nanos() / unit * unit;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Formats a duration compactly: `0s`, `300ms`, `1.3s`, `2m5.1s`, `1h0m0s`.
///
/// Sub-second values use the largest unit below a second that keeps the
/// integer part non-zero; fractional digits are printed without trailing zeros.
pub fn format_elapsed(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!(
            "{}µs",
            with_fraction(nanos / NANOS_PER_MICRO, nanos % NANOS_PER_MICRO, 3)
        );
    }
    if nanos < NANOS_PER_SEC {
        return format!(
            "{}ms",
            with_fraction(nanos / NANOS_PER_MILLI, nanos % NANOS_PER_MILLI, 6)
        );
    }

    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = with_fraction(u128::from(total % 60), u128::from(d.subsec_nanos()), 9);
    if hours > 0 {
        format!("{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{minutes}m{secs}s")
    } else {
        format!("{secs}s")
    }
}

fn with_fraction(whole: u128, frac: u128, width: usize) -> String {
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Parses durations written as a sequence of decimal numbers with unit
/// suffixes, e.g. `1s`, `500ms`, `1.5s`, `1m30s`. Valid units are `ns`,
/// `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `0` is accepted.
pub fn parse_duration(input: &str) -> Result<Duration, TailerError> {
    let invalid = || TailerError::Config(format!("invalid duration {input:?}"));

    let s = input.trim();
    if s.is_empty() {
        return Err(invalid());
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let int_part = &rest[..int_len];
        rest = &rest[int_len..];

        let mut frac_part = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            frac_part = &after_dot[..frac_len];
            rest = &after_dot[frac_len..];
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = unit_multiplier(&rest[..unit_len]).ok_or_else(invalid)?;
        rest = &rest[unit_len..];

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        // 18 fractional digits already exceed nanosecond precision for every unit.
        let frac_part = &frac_part[..frac_part.len().min(18)];
        let frac_value = if frac_part.is_empty() {
            0
        } else {
            let digits: u128 = frac_part.parse().map_err(|_| invalid())?;
            digits * unit / 10u128.pow(frac_part.len() as u32)
        };

        total = whole
            .checked_mul(unit)
            .and_then(|v| v.checked_add(frac_value))
            .and_then(|v| v.checked_add(total))
            .ok_or_else(invalid)?;
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| invalid())
}

fn unit_multiplier(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_like_a_stopwatch() {
        assert_eq!(format_elapsed(Duration::ZERO), "0s");
        assert_eq!(format_elapsed(Duration::from_millis(300)), "300ms");
        assert_eq!(format_elapsed(Duration::from_millis(1300)), "1.3s");
        assert_eq!(format_elapsed(Duration::from_secs(2)), "2s");
        assert_eq!(format_elapsed(Duration::from_millis(125_100)), "2m5.1s");
        assert_eq!(format_elapsed(Duration::from_secs(120)), "2m0s");
        assert_eq!(format_elapsed(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_elapsed(Duration::from_micros(1500)), "1.5ms");
        assert_eq!(format_elapsed(Duration::from_nanos(42)), "42ns");
    }

    #[test]
    fn truncates_to_tenths_of_a_second() {
        let d = truncate_to(Duration::from_millis(1379), Duration::from_millis(100));
        assert_eq!(d, Duration::from_millis(1300));
        assert_eq!(
            truncate_to(Duration::from_millis(99), Duration::from_millis(100)),
            Duration::ZERO
        );
        assert_eq!(
            truncate_to(Duration::from_millis(7), Duration::ZERO),
            Duration::from_millis(7)
        );
    }

    #[test]
    fn parses_compound_durations() {
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("250us").unwrap(), Duration::from_micros(250));
        assert_eq!(parse_duration(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn rejects_malformed_durations() {
        for bad in ["", "s", "10", "1x", "-1s", "1.s.", "ms5"] {
            assert!(
                matches!(parse_duration(bad), Err(TailerError::Config(_))),
                "{bad:?} should not parse"
            );
        }
    }
}
