use crate::error::FillError;
use byte_unit::{Byte, UnitType};
use regex::Regex;
use std::sync::LazyLock;

static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?P<number>\d+)\s*(?:(?P<prefix>[kmg]i?))?b?\s*$").expect("invalid regex")
});

const UNITS: [(&str, u64); 6] = [
    ("k", 1_000),
    ("m", 1_000_000),
    ("g", 1_000_000_000),
    ("ki", 1 << 10),
    ("mi", 1 << 20),
    ("gi", 1 << 30),
];

fn unit_multiplier(prefix: &str) -> u64 {
    UNITS
        .iter()
        .find(|(unit, _)| unit.eq_ignore_ascii_case(prefix))
        .map_or(1, |(_, multiplier)| *multiplier)
}

/// Turns a human size like "500MB" or "4 GiB" into bytes. Decimal prefixes are powers of 1000,
/// binary ("ki", "mi", "gi") are powers of 1024. Case doesn't matter, and the trailing "b" is
/// optional.
///
pub fn parse_size(size_string: &str) -> Result<u64, FillError> {
    let captures = SIZE_PATTERN
        .captures(size_string)
        .ok_or_else(|| FillError::InvalidSize(size_string.to_string()))?;

    let number = captures["number"]
        .parse::<u64>()
        .map_err(|_| FillError::SizeOverflow(size_string.to_string()))?;

    let multiplier = captures
        .name("prefix")
        .map_or(1, |prefix| unit_multiplier(prefix.as_str()));

    number
        .checked_mul(multiplier)
        .ok_or_else(|| FillError::SizeOverflow(size_string.to_string()))
}

/// Binary-unit rendering of a byte count, for log messages.
///
pub fn human_size(bytes: u64) -> String {
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary);
    format!("{:.2}", adjusted)
}
