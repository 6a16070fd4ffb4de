//! Free-text helpers for indicação display fields.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Fallback when no location pattern matches a description.
pub const UNSPECIFIED_LOCATION: &str = "Local não especificado";

static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)na (Rua|Avenida|Travessa|Via) ([^,]+)",
        r"(?i)em frente ao ([^,]+)",
        r"(?i)bairro ([^,.]+)",
        r"(?i)próximo ao ([^,.]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid location pattern"))
    .collect()
});

/// Portuguese month names, indexed by month number minus one.
const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Extracts a location hint from a free-text description.
///
/// Tries a fixed set of patterns ("na Rua ...", "em frente ao ...",
/// "bairro ...", "próximo ao ...") and returns the first pattern's first
/// capture group, trimmed. Falls back to [`UNSPECIFIED_LOCATION`] when
/// nothing matches.
#[must_use]
pub fn extract_location(descricao: &str) -> String {
    for pattern in LOCATION_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(descricao) {
            if let Some(m) = captures.get(1) {
                return m.as_str().trim().to_string();
            }
        }
    }
    UNSPECIFIED_LOCATION.to_string()
}

/// Formats a date string in long pt-BR form, e.g. `"15 de janeiro de 2024"`.
///
/// Accepts RFC 3339 timestamps, bare ISO dates, and `dd/mm/yyyy`. Returns
/// the input unchanged when it cannot be parsed.
#[must_use]
pub fn format_date_pt_br(date_string: &str) -> String {
    let Some(date) = parse_date(date_string) else {
        return date_string.to_string();
    };
    let month = MONTHS_PT_BR[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}
