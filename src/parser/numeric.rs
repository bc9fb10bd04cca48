//! Classification of unquoted value tokens into numeric, numeric-with-
//! uncertainty, or plain text. Quoted tokens never reach this module:
//! the parser always classifies them as `Text` before they would.

use crate::value::ValueKind;
use regex::Regex;
use std::sync::OnceLock;

fn uncertainty_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<mantissa>[+-]?\d+(?:\.(?P<frac>\d+))?(?:[eE][+-]?\d+)?)\((?P<unc>\d+)\)$")
            .expect("uncertainty regex is a fixed, valid pattern")
    })
}

fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$")
            .expect("numeric regex is a fixed, valid pattern")
    })
}

/// Classifies the text of an unquoted token: `?` is `Unknown`, `.` is
/// `NotApplicable`, `M(N)` is a numeric value with an uncertainty in
/// the last `N` digits of `M`'s fractional part, a bare number is
/// `Numeric`, and everything else falls back to `Text`.
pub fn classify_unquoted(text: &str) -> ValueKind {
    if text == "?" {
        return ValueKind::Unknown;
    }
    if text == "." {
        return ValueKind::NotApplicable;
    }
    if let Some(caps) = uncertainty_re().captures(text) {
        let mantissa = caps.name("mantissa").unwrap().as_str();
        let frac_len = caps.name("frac").map(|m| m.as_str().len()).unwrap_or(0);
        let unc_digits = caps.name("unc").unwrap().as_str();
        if let (Ok(value), Ok(n)) = (mantissa.parse::<f64>(), unc_digits.parse::<f64>()) {
            let uncertainty = n * 10f64.powi(-(frac_len as i32));
            return ValueKind::NumericWithUncertainty(value, uncertainty);
        }
    }
    if numeric_re().is_match(text) {
        if let Ok(value) = text.parse::<f64>() {
            return ValueKind::Numeric(value);
        }
    }
    ValueKind::Text(text.to_string())
}
