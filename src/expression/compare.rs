//! The numeric fallback rule.
//!
//! A comparison first tries to read both operands as floating-point numbers.
//! Only when either operand fails to parse is it done on text instead. A
//! failed parse is not an error.

use crate::expression::ComparisonOperator;

/// How text operands are prepared when the numeric attempt fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFolding {
    /// Compare the text exactly as stored
    Exact,
    /// Trim whitespace and lowercase both sides first
    Normalized,
}

/// Parse a cell as a number. Surrounding whitespace is ignored; `inf` and
/// `nan` spellings are accepted.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Trimmed, lowercased form used by case-insensitive comparisons
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Compare `left` against `right` with the numeric fallback rule.
pub fn compare_with_fallback(
    op: ComparisonOperator,
    left: &str,
    right: &str,
    folding: TextFolding,
) -> bool {
    match (parse_number(left), parse_number(right)) {
        (Some(l), Some(r)) => op.apply(&l, &r),
        _ => match folding {
            TextFolding::Exact => op.apply(left, right),
            TextFolding::Normalized => op.apply(normalize(left).as_str(), normalize(right).as_str()),
        },
    }
}

/// Parse every value as a number, or give up entirely if any one fails.
pub fn parse_all_numbers<'a, I>(values: I) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().map(parse_number).collect()
}
