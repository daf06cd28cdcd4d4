//! Duration strings as sent by clients ("100ms", "1s", "1h30m")

use std::time::Duration;

use crate::error::{CoreError, CoreResult, FormatKind};

/// Parse a duration string such as `250ms`, `2s` or `1h30m`.
///
/// A bare `0` is accepted as zero. Fractional values such as `1.5s` are
/// accepted; negative values are rejected.
pub fn parse_duration(text: &str) -> CoreResult<Duration> {
    let trimmed = text.trim();
    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }

    humantime::parse_duration(trimmed)
        .map_err(|e| CoreError::invalid_format(FormatKind::Duration, text, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_durations() {
        assert_eq!(parse_duration("100ms").unwrap(), Duration::from_millis(100));
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "notaduration", "ms", "-1s"] {
            let err = parse_duration(input).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidFormat { kind: FormatKind::Duration, .. }),
                "expected InvalidFormat for {input:?}, got {err:?}"
            );
        }
    }
}
