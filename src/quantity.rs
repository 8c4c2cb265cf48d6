//! Quantities inside free text ingredient lines
//!
//! Ingredient lines in the catalog are free text like `200г куриной грудки`
//! or `2 ст.л оливкового масла`. This module finds the **first** amount
//! followed by a known unit so it can be rewritten when a portion is scaled.
//! Anything more structured than that is intentionally not modeled: the text
//! is the contract.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::span::Span;

/// Patterns tried in order, first match wins.
///
/// Every pattern captures the number in group 1 and the unit in group 2.
const PATTERNS: &[&str] = &[
    r"(?i)([0-9]+\.?[0-9]*)\s*(г|кг|мл|л|шт|ч\.л|ст\.л|зубч|пучок|щепотка)",
    r"(?i)([0-9]+\.?[0-9]*)\s*(гр)",
    r"(?i)([0-9]+\.?[0-9]*)\s*(грамм)",
    r"(?i)([0-9]+\.?[0-9]*)\s*(миллилитр)",
];

static QUANTITY_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("invalid builtin quantity pattern"))
        .collect()
});

/// Kind of a recognised unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum UnitKind {
    /// Grams, kilograms
    Mass,
    /// Millilitres, litres
    Volume,
    /// Pieces
    Count,
    /// Spoons, cloves, bunches, pinches
    Culinary,
}

impl UnitKind {
    /// Classify a unit token as it was matched in the text
    pub fn of(unit: &str) -> Option<Self> {
        let kind = match unit.to_lowercase().as_str() {
            "г" | "гр" | "грамм" | "кг" => Self::Mass,
            "мл" | "л" | "миллилитр" => Self::Volume,
            "шт" => Self::Count,
            "ч.л" | "ст.л" | "зубч" | "пучок" | "щепотка" => Self::Culinary,
            _ => return None,
        };
        Some(kind)
    }
}

/// An amount and unit found in an ingredient line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityMatch<'a> {
    /// Numeric amount
    pub amount: f64,
    /// Unit exactly as written in the line
    pub unit: &'a str,
    /// Byte span of the whole match (number, spacing and unit)
    pub span: Span,
}

impl QuantityMatch<'_> {
    /// Kind of the matched unit
    pub fn unit_kind(&self) -> Option<UnitKind> {
        UnitKind::of(self.unit)
    }

    /// Span in characters of `line` instead of bytes
    ///
    /// `line` has to be the same text passed to [`parse_quantity`].
    pub fn char_span(&self, line: &str) -> Span {
        self.span.to_chars_span(line)
    }
}

/// Find the first quantity in an ingredient line
///
/// Returns [`None`] when no pattern matches.
///
/// ```
/// # use meal_planner::quantity::parse_quantity;
/// let q = parse_quantity("200г куриной грудки").unwrap();
/// assert_eq!(q.amount, 200.0);
/// assert_eq!(q.unit, "г");
/// assert_eq!(q.span.range(), 0..5);
///
/// assert!(parse_quantity("соль по вкусу").is_none());
/// ```
pub fn parse_quantity(line: &str) -> Option<QuantityMatch<'_>> {
    for re in QUANTITY_RE.iter() {
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let (Some(whole), Some(number), Some(unit)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        // "12." is a valid match and parses as 12
        let Ok(amount) = number.as_str().parse::<f64>() else {
            continue;
        };
        return Some(QuantityMatch {
            amount,
            unit: unit.as_str(),
            span: whole.into(),
        });
    }
    None
}
