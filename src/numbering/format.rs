//! Number formats for list labels.

use serde::{Deserialize, Serialize};

/// Numeric format of a list level.
///
/// The set is closed: anything else found in a numbering part is rejected
/// at definition time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    /// 1, 2, 3, ...
    #[default]
    Decimal,
    /// I, II, III, ...
    UpperRoman,
    /// i, ii, iii, ...
    LowerRoman,
    /// A, B, ..., Z, AA, AB, ...
    UpperLetter,
    /// a, b, ..., z, aa, ab, ...
    LowerLetter,
    /// Literal glyph taken from the level's label template.
    Bullet,
}

impl NumberFormat {
    /// Check if this format ignores counters.
    pub fn is_bullet(&self) -> bool {
        matches!(self, NumberFormat::Bullet)
    }

    /// The `w:numFmt` value for this format.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            NumberFormat::Decimal => "decimal",
            NumberFormat::UpperRoman => "upperRoman",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::UpperLetter => "upperLetter",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::Bullet => "bullet",
        }
    }

    /// Parse a `w:numFmt` value.
    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "decimal" => Some(NumberFormat::Decimal),
            "upperRoman" => Some(NumberFormat::UpperRoman),
            "lowerRoman" => Some(NumberFormat::LowerRoman),
            "upperLetter" => Some(NumberFormat::UpperLetter),
            "lowerLetter" => Some(NumberFormat::LowerLetter),
            "bullet" => Some(NumberFormat::Bullet),
            _ => None,
        }
    }

    /// Format a counter value.
    ///
    /// Zero renders as an empty string in the letter and roman formats.
    /// Roman numerals above 3999 fall back to decimal. Bullets have no
    /// numeric rendering and also fall back to decimal when a descendant
    /// level's template references them.
    pub fn format(&self, value: u32) -> String {
        match self {
            NumberFormat::Decimal | NumberFormat::Bullet => value.to_string(),
            NumberFormat::UpperRoman => format_roman(value, true),
            NumberFormat::LowerRoman => format_roman(value, false),
            NumberFormat::UpperLetter => format_letter(value, true),
            NumberFormat::LowerLetter => format_letter(value, false),
        }
    }
}

/// Format a number as bijective base-26 letters (a..z, aa, ab, ...).
fn format_letter(value: u32, uppercase: bool) -> String {
    if value == 0 {
        return String::new();
    }

    let base = if uppercase { b'A' } else { b'a' };
    let mut letters = Vec::new();
    let mut n = value;

    while n > 0 {
        n -= 1;
        letters.push((base + (n % 26) as u8) as char);
        n /= 26;
    }

    letters.iter().rev().collect()
}

/// Format a number as roman numerals.
fn format_roman(value: u32, uppercase: bool) -> String {
    if value == 0 {
        return String::new();
    }
    if value > 3999 {
        return value.to_string();
    }

    const NUMERALS: [(u32, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];

    let mut result = String::new();
    let mut n = value;

    for (num, roman) in NUMERALS {
        while n >= num {
            result.push_str(roman);
            n -= num;
        }
    }

    if uppercase {
        result.to_uppercase()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roman_fixed_points() {
        assert_eq!(NumberFormat::UpperRoman.format(4), "IV");
        assert_eq!(NumberFormat::LowerRoman.format(4), "iv");
        assert_eq!(NumberFormat::UpperRoman.format(1994), "MCMXCIV");
        assert_eq!(NumberFormat::LowerRoman.format(3999), "mmmcmxcix");
    }

    #[test]
    fn test_letter_fixed_points() {
        assert_eq!(NumberFormat::LowerLetter.format(1), "a");
        assert_eq!(NumberFormat::LowerLetter.format(26), "z");
        assert_eq!(NumberFormat::LowerLetter.format(27), "aa");
        assert_eq!(NumberFormat::LowerLetter.format(28), "ab");
        assert_eq!(NumberFormat::LowerLetter.format(52), "az");
        assert_eq!(NumberFormat::LowerLetter.format(53), "ba");
        assert_eq!(NumberFormat::UpperLetter.format(703), "AAA");
    }

    #[test]
    fn test_out_of_domain_values() {
        assert_eq!(NumberFormat::Decimal.format(0), "0");
        assert_eq!(NumberFormat::LowerLetter.format(0), "");
        assert_eq!(NumberFormat::UpperLetter.format(0), "");
        assert_eq!(NumberFormat::UpperRoman.format(0), "");
        assert_eq!(NumberFormat::LowerRoman.format(0), "");
        assert_eq!(NumberFormat::UpperRoman.format(4000), "4000");
        assert_eq!(NumberFormat::Bullet.format(3), "3");
    }

    #[test]
    fn test_ooxml_names() {
        for format in [
            NumberFormat::Decimal,
            NumberFormat::UpperRoman,
            NumberFormat::LowerRoman,
            NumberFormat::UpperLetter,
            NumberFormat::LowerLetter,
            NumberFormat::Bullet,
        ] {
            assert_eq!(NumberFormat::from_ooxml(format.as_ooxml()), Some(format));
        }
        assert_eq!(NumberFormat::from_ooxml("ordinal"), None);
    }
}
