//! ISO-8601 duration-code parsing for `contentDetails.duration` values.

/// Parses a `PT#H#M#S` duration code into total seconds.
///
/// Only hour/minute/second components are recognized; a code without the
/// `PT` prefix yields 0, and unrecognized characters (day designators,
/// fractional seconds) reset the pending number so only well-formed
/// components contribute. `PT1H5M30S` parses to 3930, `PT45S` to 45.
#[must_use]
pub fn parse_duration_code(code: &str) -> u32 {
    let Some(rest) = code.strip_prefix("PT") else {
        return 0;
    };

    let (mut hours, mut minutes, mut seconds) = (0u32, 0u32, 0u32);
    let mut pending: u32 = 0;
    let mut has_digits = false;

    for c in rest.chars() {
        if let Some(d) = c.to_digit(10) {
            pending = pending.saturating_mul(10).saturating_add(d);
            has_digits = true;
            continue;
        }
        match c {
            'H' if has_digits => hours = pending,
            'M' if has_digits => minutes = pending,
            'S' if has_digits => seconds = pending,
            _ => {}
        }
        pending = 0;
        has_digits = false;
    }

    hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds)
}
