//! Attribute rule set.
//!
//! Rules are pure predicates over a raw field value. Every rule attached to a
//! field is evaluated; failures are reported as [`ValidationError`]s and never
//! short-circuit the remaining checks.
//!
//! Only [`Rule::Required`] and [`Rule::SingleLine`] judge empty values. The format rules skip a value
//! that is blank after trimming, so a missing field is reported once, as
//! `required`, rather than once per format rule.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::error::ValidationError;

/// Bank-State-Branch routing code, `NNN-NNN`.
static BSB_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{3}$").expect("Invalid BSB regex"));

/// Account number: digits with optional hyphens, at least one digit.
static ACCOUNT_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9-]*[0-9][0-9-]*$").expect("Invalid account number regex")
});

/// Six digit `DDMMYY` shape, checked before calendar parsing.
static DATE_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{6}$").expect("Invalid date regex"));

/// Stable identifier reported in [`ValidationError::rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    Required,
    Numeric,
    Date,
    Bsb,
    AccountNumber,
    OneOf,
    Alphanumeric,
    SingleLine,
}

impl RuleId {
    /// Returns the identifier as it appears in error reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Numeric => "numeric",
            Self::Date => "date",
            Self::Bsb => "bsb",
            Self::AccountNumber => "account_number",
            Self::OneOf => "one_of",
            Self::Alphanumeric => "alphanumeric",
            Self::SingleLine => "single_line",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named validation predicate attached to a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must not be blank.
    Required,
    /// Digits only, once the field's pad character is stripped.
    Numeric,
    /// A real calendar date written `DDMMYY`.
    Date,
    /// `NNN-NNN`.
    Bsb,
    /// Digits and hyphens, e.g. `12-345-6`.
    AccountNumber,
    /// Value must be one of a fixed set.
    OneOf(&'static [&'static str]),
    /// Free text; always passes.
    Alphanumeric,
    /// No `\r` or `\n`. Applied to every field by the field itself.
    SingleLine,
}

impl Rule {
    /// Identifier reported when this rule fails.
    pub const fn id(&self) -> RuleId {
        match self {
            Self::Required => RuleId::Required,
            Self::Numeric => RuleId::Numeric,
            Self::Date => RuleId::Date,
            Self::Bsb => RuleId::Bsb,
            Self::AccountNumber => RuleId::AccountNumber,
            Self::OneOf(_) => RuleId::OneOf,
            Self::Alphanumeric => RuleId::Alphanumeric,
            Self::SingleLine => RuleId::SingleLine,
        }
    }

    /// Check `value` of attribute `name`.
    ///
    /// `pad` is the pad character of the field the value belongs to; the
    /// numeric rule strips it before looking at the digits.
    pub fn check(&self, name: &str, value: &str, pad: char) -> Result<(), ValidationError> {
        let blank = value.trim().is_empty();
        let passed = match self {
            Self::Required => !blank,
            Self::SingleLine => is_single_line(value),
            _ if blank => true,
            Self::Numeric => is_numeric(value, pad),
            Self::Date => is_date(value),
            Self::Bsb => is_bsb(value),
            Self::AccountNumber => is_account_number(value.trim_matches(pad)),
            Self::OneOf(allowed) => allowed.contains(&value),
            Self::Alphanumeric => true,
        };

        if passed {
            Ok(())
        } else {
            Err(ValidationError::new(name, value, self.id()))
        }
    }
}

/// Digits only after stripping `pad` from both ends.
pub fn is_numeric(value: &str, pad: char) -> bool {
    value.trim_matches(pad).chars().all(|c| c.is_ascii_digit())
}

/// `DDMMYY` naming a date that exists.
pub fn is_date(value: &str) -> bool {
    DATE_SHAPE_REGEX.is_match(value) && NaiveDate::parse_from_str(value, "%d%m%y").is_ok()
}

/// `NNN-NNN`.
pub fn is_bsb(value: &str) -> bool {
    BSB_REGEX.is_match(value)
}

/// Digits and hyphens with at least one digit.
pub fn is_account_number(value: &str) -> bool {
    ACCOUNT_NUMBER_REGEX.is_match(value)
}

/// No line break characters.
pub fn is_single_line(value: &str) -> bool {
    !value.contains(['\r', '\n'])
}
