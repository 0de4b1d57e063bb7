//! Positional field metadata.
//!
//! A [`FieldTable`] is the fixed layout of one record variant: an ordered list
//! of [`FieldDef`]s that exactly covers columns 1..=[`LINE_WIDTH`]. Tables are
//! checked once when they are registered, never per call.
//!
//! # Padding
//!
//! | Kind         | Pad char | Side  |
//! |--------------|----------|-------|
//! | Numeric      | `0`      | left  |
//! | Alphanumeric | space    | right |
//! | Date         | space    | right |

use serde::Serialize;
use thiserror::Error;

use crate::error::ValidationError;
use crate::rules::Rule;

/// Width of every ABA line in characters.
pub const LINE_WIDTH: usize = 120;

/// Value type of a field; decides padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Numeric,
    Alphanumeric,
    Date,
}

/// Side a short value is padded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSide {
    Left,
    Right,
}

impl FieldKind {
    /// Fill character for short values.
    pub const fn pad_char(self) -> char {
        match self {
            Self::Numeric => '0',
            Self::Alphanumeric | Self::Date => ' ',
        }
    }

    /// Side the fill is applied to.
    pub const fn pad_side(self) -> PadSide {
        match self {
            Self::Numeric => PadSide::Left,
            Self::Alphanumeric | Self::Date => PadSide::Right,
        }
    }
}

/// Static definition of one field within a record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Attribute name, e.g. `bsbNumber`.
    pub name: &'static str,
    /// 1-based start column.
    pub start: usize,
    /// Width in characters.
    pub width: usize,
    pub kind: FieldKind,
    /// Value used when the attribute has not been set.
    pub default: &'static str,
    pub rules: &'static [Rule],
    /// Value is owned by the layout and cannot be set by callers.
    pub fixed: bool,
}

impl FieldDef {
    /// Define a field with no default and no rules.
    pub const fn new(name: &'static str, start: usize, width: usize, kind: FieldKind) -> Self {
        Self {
            name,
            start,
            width,
            kind,
            default: "",
            rules: &[],
            fixed: false,
        }
    }

    /// A space-filled filler field.
    pub const fn blank(name: &'static str, start: usize, width: usize) -> Self {
        Self::new(name, start, width, FieldKind::Alphanumeric)
    }

    /// The one-character record-type marker in column 1.
    pub const fn marker(name: &'static str, value: &'static str) -> Self {
        let mut field = Self::blank(name, 1, 1).with_default(value);
        field.fixed = true;
        field
    }

    /// Set the default value.
    #[must_use]
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }

    /// Attach validation rules.
    #[must_use]
    pub const fn with_rules(mut self, rules: &'static [Rule]) -> Self {
        self.rules = rules;
        self
    }

    /// 1-based inclusive end column.
    pub const fn end(&self) -> usize {
        self.start + self.width - 1
    }

    /// Pad `value` to the field width.
    ///
    /// Values longer than the width are returned whole. Overflow is left for
    /// the caller's length check to report; it is never trimmed here.
    pub fn pad(&self, value: &str) -> String {
        let len = value.chars().count();
        if len >= self.width {
            return value.to_string();
        }
        let fill: String = std::iter::repeat_n(self.kind.pad_char(), self.width - len).collect();
        match self.kind.pad_side() {
            PadSide::Left => fill + value,
            PadSide::Right => format!("{value}{fill}"),
        }
    }

    /// Remove padding from a raw slice read out of a line.
    ///
    /// A numeric field made only of zeros keeps a single `0`, so a decoded
    /// zero amount is still a value rather than a blank.
    pub fn strip<'a>(&self, raw: &'a str) -> &'a str {
        let pad = self.kind.pad_char();
        match self.kind.pad_side() {
            PadSide::Left => {
                let stripped = raw.trim_start_matches(pad);
                if stripped.is_empty() && !raw.is_empty() {
                    &raw[raw.len() - pad.len_utf8()..]
                } else {
                    stripped
                }
            }
            PadSide::Right => raw.trim_end_matches(pad),
        }
    }

    /// Run every attached rule against `value`, appending failures.
    ///
    /// Every field is also checked for line breaks, which would split the
    /// rendered record across lines.
    pub fn validate_into(&self, value: &str, errors: &mut Vec<ValidationError>) {
        if let Err(error) = Rule::SingleLine.check(self.name, value, self.kind.pad_char()) {
            errors.push(error);
        }
        for rule in self.rules {
            if let Err(error) = rule.check(self.name, value, self.kind.pad_char()) {
                errors.push(error);
            }
        }
    }
}

/// Broken layout table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no fields")]
    Empty,

    #[error("field {name} has zero width")]
    ZeroWidth { name: &'static str },

    #[error("field {name} starts at column {actual}, expected {expected}")]
    Misaligned {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate field name: {name}")]
    DuplicateName { name: &'static str },

    #[error("default for {name} is wider than {width} characters")]
    DefaultTooWide { name: &'static str, width: usize },

    #[error("layout covers {actual} columns, expected {expected}")]
    TotalWidth { expected: usize, actual: usize },
}

/// Ordered, validated field layout of a record variant.
#[derive(Debug, Clone, Copy)]
pub struct FieldTable {
    fields: &'static [FieldDef],
}

impl FieldTable {
    /// Validate and wrap a layout.
    ///
    /// Fields must be listed in column order, be contiguous from column 1,
    /// have unique names and end exactly at [`LINE_WIDTH`].
    pub fn new(fields: &'static [FieldDef]) -> Result<Self, LayoutError> {
        if fields.is_empty() {
            return Err(LayoutError::Empty);
        }

        let mut next = 1usize;
        for (idx, field) in fields.iter().enumerate() {
            if field.width == 0 {
                return Err(LayoutError::ZeroWidth { name: field.name });
            }
            if field.start != next {
                return Err(LayoutError::Misaligned {
                    name: field.name,
                    expected: next,
                    actual: field.start,
                });
            }
            if fields[..idx].iter().any(|other| other.name == field.name) {
                return Err(LayoutError::DuplicateName { name: field.name });
            }
            if field.default.chars().count() > field.width {
                return Err(LayoutError::DefaultTooWide {
                    name: field.name,
                    width: field.width,
                });
            }
            next = field.start + field.width;
        }

        let covered = next - 1;
        if covered != LINE_WIDTH {
            return Err(LayoutError::TotalWidth {
                expected: LINE_WIDTH,
                actual: covered,
            });
        }

        Ok(Self { fields })
    }

    /// Fields in column order.
    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    /// Index of the field called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Field called `name`.
    pub fn get(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Number of fields. Never zero once [`FieldTable::new`] has accepted
    /// the layout.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false` for a table built by [`FieldTable::new`].
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static GOOD: [FieldDef; 3] = [
        FieldDef::marker("recordType", "9"),
        FieldDef::new("amount", 2, 10, FieldKind::Numeric),
        FieldDef::blank("filler", 12, 109),
    ];

    static GAP: [FieldDef; 2] = [
        FieldDef::blank("a", 1, 10),
        FieldDef::blank("b", 12, 109),
    ];

    static SHORT: [FieldDef; 1] = [FieldDef::blank("a", 1, 119)];

    static DUPLICATE: [FieldDef; 2] = [
        FieldDef::blank("a", 1, 60),
        FieldDef::blank("a", 61, 60),
    ];

    static WIDE_DEFAULT: [FieldDef; 2] = [
        FieldDef::blank("a", 1, 1).with_default("99"),
        FieldDef::blank("b", 2, 119),
    ];

    static ZERO: [FieldDef; 2] = [
        FieldDef::blank("a", 1, 0),
        FieldDef::blank("b", 1, 120),
    ];

    #[test]
    fn test_valid_table() {
        let table = FieldTable::new(&GOOD).expect("valid layout");
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert!(table.fields()[0].fixed);
        assert!(!table.fields()[1].fixed);
        assert_eq!(table.position("amount"), Some(1));
        assert_eq!(table.get("filler").map(FieldDef::end), Some(120));
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_rejects_broken_tables() {
        assert_eq!(FieldTable::new(&[]).unwrap_err(), LayoutError::Empty);
        assert!(matches!(
            FieldTable::new(&GAP).unwrap_err(),
            LayoutError::Misaligned {
                name: "b",
                expected: 11,
                actual: 12
            }
        ));
        assert_eq!(
            FieldTable::new(&SHORT).unwrap_err(),
            LayoutError::TotalWidth {
                expected: 120,
                actual: 119
            }
        );
        assert_eq!(
            FieldTable::new(&DUPLICATE).unwrap_err(),
            LayoutError::DuplicateName { name: "a" }
        );
        assert_eq!(
            FieldTable::new(&WIDE_DEFAULT).unwrap_err(),
            LayoutError::DefaultTooWide { name: "a", width: 1 }
        );
        assert_eq!(
            FieldTable::new(&ZERO).unwrap_err(),
            LayoutError::ZeroWidth { name: "a" }
        );
    }

    #[test]
    fn test_pad_numeric_left_with_zeros() {
        let field = FieldDef::new("amount", 21, 10, FieldKind::Numeric);
        assert_eq!(field.pad("12555"), "0000012555");
        assert_eq!(field.pad(""), "0000000000");
    }

    #[test]
    fn test_pad_alphanumeric_right_with_spaces() {
        let field = FieldDef::blank("accountName", 31, 8);
        assert_eq!(field.pad("SMITH"), "SMITH   ");
    }

    #[test]
    fn test_pad_never_truncates() {
        let field = FieldDef::new("amount", 21, 10, FieldKind::Numeric);
        assert_eq!(field.pad("00000012555"), "00000012555");
    }

    #[test]
    fn test_pad_counts_characters_not_bytes() {
        let field = FieldDef::blank("accountName", 31, 6);
        assert_eq!(field.pad("Zoë").chars().count(), 6);
    }

    #[test]
    fn test_strip_only_pad_side() {
        let numeric = FieldDef::new("amount", 21, 10, FieldKind::Numeric);
        assert_eq!(numeric.strip("0000012500"), "12500");
        assert_eq!(numeric.strip("0000000000"), "0");
        let text = FieldDef::blank("accountName", 31, 10);
        assert_eq!(text.strip("  JOHN    "), "  JOHN");
    }

    #[test]
    fn test_validate_into_collects_all_rules() {
        let field = FieldDef::new("amount", 21, 10, FieldKind::Numeric)
            .with_rules(&[Rule::Numeric, Rule::OneOf(&["1"])]);
        let mut errors = Vec::new();
        field.validate_into("x", &mut errors);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_into_rejects_line_breaks_on_any_field() {
        use crate::rules::RuleId;

        let field = FieldDef::blank("accountName", 31, 32);
        let mut errors = Vec::new();
        field.validate_into("JOHN\nDOE", &mut errors);
        field.validate_into("JOHN\r", &mut errors);
        field.validate_into("JOHN DOE", &mut errors);
        assert_eq!(
            errors,
            vec![
                ValidationError::new("accountName", "JOHN\nDOE", RuleId::SingleLine),
                ValidationError::new("accountName", "JOHN\r", RuleId::SingleLine),
            ]
        );
    }
}
