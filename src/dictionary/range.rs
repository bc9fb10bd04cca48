//! Parsing of DDLm `_enumeration.range` strings: `lo:hi`, `lo:`, `:hi`.

use regex::Regex;
use std::sync::OnceLock;

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<lo>[+-]?\d+(?:\.\d+)?)?:(?P<hi>[+-]?\d+(?:\.\d+)?)?$")
            .expect("range regex is a fixed, valid pattern")
    })
}

/// Parses a DDLm range string into an inclusive `(lo, hi)` pair, either
/// bound absent for an open side. Returns `None` if `text` is not a
/// well-formed range.
pub fn parse(text: &str) -> Option<(Option<f64>, Option<f64>)> {
    let caps = range_re().captures(text.trim())?;
    let lo = caps.name("lo").and_then(|m| m.as_str().parse::<f64>().ok());
    let hi = caps.name("hi").and_then(|m| m.as_str().parse::<f64>().ok());
    Some((lo, hi))
}
