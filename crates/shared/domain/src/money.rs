//! Money value object and locale-aware currency formatting.
//!
//! Amounts are carried in integer minor units so invoice totals never pass
//! through floating point.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MINOR_DIGITS, NARROW_NO_BREAK_SPACE, NO_BREAK_SPACE};
use crate::error::DomainError;

/// Supported billing currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Inr,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "INR" => Ok(Currency::Inr),
            other => Err(DomainError::validation(format!(
                "Unsupported currency: {}",
                other
            ))),
        }
    }
}

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "en-IN")]
    EnIn,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "fr-FR")]
    FrFr,
}

/// Separator and layout rules for one locale.
struct NumberRules {
    group_separator: char,
    decimal_separator: char,
    /// Size of every group left of the first (thousands) group
    secondary_group: usize,
    symbol_after: bool,
}

impl Locale {
    /// BCP 47 language tag
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::EnIn => "en-IN",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
        }
    }

    fn rules(&self) -> NumberRules {
        match self {
            Locale::EnUs | Locale::EnGb => NumberRules {
                group_separator: ',',
                decimal_separator: '.',
                secondary_group: 3,
                symbol_after: false,
            },
            Locale::EnIn => NumberRules {
                group_separator: ',',
                decimal_separator: '.',
                secondary_group: 2,
                symbol_after: false,
            },
            Locale::DeDe => NumberRules {
                group_separator: '.',
                decimal_separator: ',',
                secondary_group: 3,
                symbol_after: true,
            },
            Locale::FrFr => NumberRules {
                group_separator: NARROW_NO_BREAK_SPACE,
                decimal_separator: ',',
                secondary_group: 3,
                symbol_after: true,
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en-us" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            "en-in" => Ok(Locale::EnIn),
            "de-de" => Ok(Locale::DeDe),
            "fr-fr" => Ok(Locale::FrFr),
            other => Err(DomainError::validation(format!(
                "Unsupported locale: {}",
                other
            ))),
        }
    }
}

/// An amount in minor units of a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub minor: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    /// Build from whole major units, `None` on overflow.
    pub fn from_major(major: i64, currency: Currency) -> Option<Self> {
        major
            .checked_mul(10i64.pow(MINOR_DIGITS))
            .map(|minor| Self::new(minor, currency))
    }

    pub fn format(&self, locale: Locale) -> String {
        format_currency(*self, locale)
    }
}

/// Format an amount for display in the given locale.
pub fn format_currency(money: Money, locale: Locale) -> String {
    let rules = locale.rules();
    // unsigned_abs keeps i64::MIN representable
    let abs = money.minor.unsigned_abs();
    let scale = 10u64.pow(MINOR_DIGITS);

    let number = format!(
        "{}{}{:0width$}",
        group_digits(abs / scale, rules.group_separator, rules.secondary_group),
        rules.decimal_separator,
        abs % scale,
        width = MINOR_DIGITS as usize
    );

    let symbol = money.currency.symbol();
    let body = if rules.symbol_after {
        format!("{}{}{}", number, NO_BREAK_SPACE, symbol)
    } else {
        format!("{}{}", symbol, number)
    };

    if money.minor < 0 {
        format!("-{}", body)
    } else {
        body
    }
}

fn group_digits(value: u64, separator: char, secondary: usize) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(secondary);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = String::with_capacity(digits.len() + groups.len());
    for group in groups {
        out.push_str(group);
        out.push(separator);
    }
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_en_us() {
        let money = Money::new(123_456, Currency::Usd);
        assert_eq!(format_currency(money, Locale::EnUs), "$1,234.56");
        assert_eq!(Money::new(5, Currency::Usd).format(Locale::EnUs), "$0.05");
        assert_eq!(Money::new(0, Currency::Usd).format(Locale::EnUs), "$0.00");
    }

    #[test]
    fn test_negative_amount() {
        let money = Money::new(-123_456, Currency::Gbp);
        assert_eq!(money.format(Locale::EnGb), "-£1,234.56");
        assert_eq!(
            Money::new(-123_456, Currency::Eur).format(Locale::DeDe),
            "-1.234,56\u{a0}€"
        );
    }

    #[test]
    fn test_indian_grouping() {
        let money = Money::new(123_456_789, Currency::Inr);
        assert_eq!(money.format(Locale::EnIn), "₹12,34,567.89");
        assert_eq!(Money::new(99_999_900, Currency::Inr).format(Locale::EnIn), "₹9,99,999.00");
    }

    #[test]
    fn test_european_layouts() {
        let money = Money::new(123_456_789, Currency::Eur);
        assert_eq!(money.format(Locale::DeDe), "1.234.567,89\u{a0}€");
        assert_eq!(money.format(Locale::FrFr), "1\u{202f}234\u{202f}567,89\u{a0}€");
    }

    #[test]
    fn test_small_amounts_not_grouped() {
        assert_eq!(Money::new(99_999, Currency::Usd).format(Locale::EnUs), "$999.99");
        assert_eq!(Money::new(100_000, Currency::Usd).format(Locale::EnUs), "$1,000.00");
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let min = Money::new(i64::MIN, Currency::Usd).format(Locale::EnUs);
        assert_eq!(min, "-$92,233,720,368,547,758.08");
        let max = Money::new(i64::MAX, Currency::Usd).format(Locale::EnUs);
        assert_eq!(max, "$92,233,720,368,547,758.07");
    }

    #[test]
    fn test_from_major() {
        assert_eq!(
            Money::from_major(12, Currency::Usd),
            Some(Money::new(1200, Currency::Usd))
        );
        assert_eq!(Money::from_major(i64::MAX, Currency::Usd), None);
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("en_in".parse::<Locale>().unwrap(), Locale::EnIn);
        assert_eq!("FR-fr".parse::<Locale>().unwrap(), Locale::FrFr);
        assert!(matches!(
            "XYZ".parse::<Currency>(),
            Err(DomainError::Validation(_))
        ));
        assert!("pt-BR".parse::<Locale>().is_err());
    }

    #[test]
    fn test_serde_representation() {
        let money: Money = serde_json::from_str(r#"{"minor":250,"currency":"EUR"}"#).unwrap();
        assert_eq!(money, Money::new(250, Currency::Eur));

        let locale: Locale = serde_json::from_str(r#""de-DE""#).unwrap();
        assert_eq!(locale, Locale::DeDe);
        assert_eq!(serde_json::to_string(&Locale::EnGb).unwrap(), r#""en-GB""#);
    }
}
