//! Human readable byte sizes
//!
//! Multipliers are binary: `K`/`KB` = 1024, `M`/`MB` = 1024², up to `E`/`EB`.
//! Units are case-insensitive and may be separated from the number by a single
//! space. There is deliberately no upper bound on the parsed value.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CoreError, CoreResult, FormatKind};

static SIZE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s?([KMGTPE]?B?)$").expect("size pattern is a valid regex")
});

/// Unit suffix of a byte size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteUnit {
    Byte,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
}

impl ByteUnit {
    const DESCENDING: [ByteUnit; 6] = [
        ByteUnit::Exa,
        ByteUnit::Peta,
        ByteUnit::Tera,
        ByteUnit::Giga,
        ByteUnit::Mega,
        ByteUnit::Kilo,
    ];

    /// Resolve a suffix such as `""`, `"B"`, `"k"` or `"GB"`
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_uppercase().as_str() {
            "" | "B" => Some(ByteUnit::Byte),
            "K" | "KB" => Some(ByteUnit::Kilo),
            "M" | "MB" => Some(ByteUnit::Mega),
            "G" | "GB" => Some(ByteUnit::Giga),
            "T" | "TB" => Some(ByteUnit::Tera),
            "P" | "PB" => Some(ByteUnit::Peta),
            "E" | "EB" => Some(ByteUnit::Exa),
            _ => None,
        }
    }

    pub fn multiplier(self) -> u64 {
        match self {
            ByteUnit::Byte => 1,
            ByteUnit::Kilo => 1 << 10,
            ByteUnit::Mega => 1 << 20,
            ByteUnit::Giga => 1 << 30,
            ByteUnit::Tera => 1 << 40,
            ByteUnit::Peta => 1 << 50,
            ByteUnit::Exa => 1 << 60,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            ByteUnit::Byte => "B",
            ByteUnit::Kilo => "KB",
            ByteUnit::Mega => "MB",
            ByteUnit::Giga => "GB",
            ByteUnit::Tera => "TB",
            ByteUnit::Peta => "PB",
            ByteUnit::Exa => "EB",
        }
    }
}

/// Parse a size such as `10`, `512B`, `1.5K` or `6GB` into bytes.
pub fn parse_size(text: &str) -> CoreResult<u64> {
    let invalid = |reason: &str| CoreError::invalid_format(FormatKind::Size, text, reason);

    let captures = SIZE_PATTERN
        .captures(text)
        .ok_or_else(|| invalid("expected a number followed by an optional unit (B, K, KB, M, MB, G, GB, ...)"))?;
    let number = &captures[1];
    let unit = ByteUnit::from_suffix(&captures[2]).ok_or_else(|| invalid("unknown unit"))?;
    let multiplier = unit.multiplier();

    if let Ok(whole) = number.parse::<u64>() {
        return whole
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("value overflows 64 bits"));
    }

    let fractional: f64 = number.parse().map_err(|_| invalid("not a number"))?;
    let bytes = fractional * multiplier as f64;
    if !bytes.is_finite() || bytes >= u64::MAX as f64 {
        return Err(invalid("value overflows 64 bits"));
    }

    Ok(bytes as u64)
}

/// Format a byte count with the largest fitting unit, e.g. `1536` -> `1.50KB`.
///
/// The output always parses back to the same value when `bytes` is a whole
/// multiple of the chosen unit.
pub fn format_size(bytes: u64) -> String {
    for unit in ByteUnit::DESCENDING {
        if bytes >= unit.multiplier() {
            let value = bytes as f64 / unit.multiplier() as f64;
            return format!("{:.2}{}", value, unit.suffix());
        }
    }

    format!("{}{}", bytes, ByteUnit::Byte.suffix())
}
