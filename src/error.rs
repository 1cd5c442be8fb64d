//! Error types for template compilation and value conversion

use std::fmt;

/// The structural rule a template violated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatRule {
    /// The template is at least as long as the configured maximum
    TemplateTooLong { len: usize, max: usize },
    /// A character outside the template alphabet
    UnsupportedToken { position: usize, found: char },
    /// A group separator in first position, or second after a leading `L`
    LeadingSeparator { position: usize },
    /// A group separator after the decimal separator
    SeparatorAfterDecimal { position: usize },
    /// `,` in a template that already uses `G`
    CommaWithLocaleGroup { position: usize },
    /// `G` in a template that already uses `,`
    LocaleGroupWithComma { position: usize },
    /// A group separator after a mid-template `L`
    SeparatorAfterMidCurrency { position: usize },
    /// A second decimal separator
    RepeatedDecimal { position: usize },
    /// `D` in a template that already uses `,`
    LocaleDecimalWithComma { position: usize },
    /// `.` in a template that already uses `G`
    PointWithLocaleGroup { position: usize },
    /// A decimal separator after a mid-template `L`
    DecimalAfterMidCurrency { position: usize },
    /// A second `L`
    RepeatedCurrency { position: usize },
    /// A mid-template `L` in a template that already uses `,`
    MidCurrencyWithComma { position: usize },
    /// A mid-template `L` after a decimal separator
    MidCurrencyWithDecimal { position: usize },
    /// `X` combined with any other token
    InvalidHex { position: usize },
}

impl fmt::Display for FormatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatRule::TemplateTooLong { len, max } => {
                write!(f, "format of length {len} exceeds the limit of {max}")
            }
            FormatRule::UnsupportedToken { position, found } => {
                write!(f, "unsupported format character '{found}' at {position}")
            }
            FormatRule::LeadingSeparator { position } => write!(
                f,
                "group separator cannot be first, or second after a leading \"L\" (at {position})"
            ),
            FormatRule::SeparatorAfterDecimal { position } => write!(
                f,
                "group separator must be ahead of the decimal point (at {position})"
            ),
            FormatRule::CommaWithLocaleGroup { position } => {
                write!(f, "\",\" should not be used with \"G\" (at {position})")
            }
            FormatRule::LocaleGroupWithComma { position } => {
                write!(f, "\"G\" should not be used with \",\" (at {position})")
            }
            FormatRule::SeparatorAfterMidCurrency { position } => write!(
                f,
                "group separator should not follow a middle \"L\" (at {position})"
            ),
            FormatRule::RepeatedDecimal { position } => {
                write!(f, "repeated decimal character (at {position})")
            }
            FormatRule::LocaleDecimalWithComma { position } => {
                write!(f, "\"D\" should not be used with \",\" (at {position})")
            }
            FormatRule::PointWithLocaleGroup { position } => {
                write!(f, "\".\" should not be used with \"G\" (at {position})")
            }
            FormatRule::DecimalAfterMidCurrency { position } => write!(
                f,
                "decimal character should not be used with a middle \"L\" (at {position})"
            ),
            FormatRule::RepeatedCurrency { position } => {
                write!(f, "repeated currency character (at {position})")
            }
            FormatRule::MidCurrencyWithComma { position } => {
                write!(f, "middle \"L\" can't be used with \",\" (at {position})")
            }
            FormatRule::MidCurrencyWithDecimal { position } => write!(
                f,
                "middle \"L\" can't be used with a decimal character (at {position})"
            ),
            FormatRule::InvalidHex { position } => {
                write!(f, "invalid \"X\" format (at {position})")
            }
        }
    }
}

/// Errors raised while compiling a template or converting a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToNumberError {
    /// The template breaks a structural rule
    FormatInvalid(FormatRule),
    /// The value does not conform to the template (or to a plain number)
    ValueInvalid { position: usize, reason: &'static str },
    /// The converted number exceeds the configured precision or scale
    ValueOutOfRange(String),
    /// The call's arena budget or output buffer is exhausted
    AllocationFailed(String),
}

impl ToNumberError {
    pub(crate) fn value(position: usize, reason: &'static str) -> Self {
        ToNumberError::ValueInvalid { position, reason }
    }
}

impl fmt::Display for ToNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToNumberError::FormatInvalid(rule) => write!(f, "invalid number format: {rule}"),
            ToNumberError::ValueInvalid { position, reason } => {
                write!(f, "invalid number value at {position}: {reason}")
            }
            ToNumberError::ValueOutOfRange(msg) => write!(f, "number out of range: {msg}"),
            ToNumberError::AllocationFailed(msg) => write!(f, "allocation failed: {msg}"),
        }
    }
}

impl std::error::Error for ToNumberError {}

impl From<FormatRule> for ToNumberError {
    fn from(rule: FormatRule) -> Self {
        ToNumberError::FormatInvalid(rule)
    }
}

pub type Result<T> = std::result::Result<T, ToNumberError>;
