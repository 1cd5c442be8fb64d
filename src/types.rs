//! Type definitions for the number template compiler
//!
//! This module defines the data model shared by the tokenizer, the compiler and the matcher:
//! template tokens, the compiled descriptor with its flag set, the instruction list, and the
//! canonical output handed to the decimal parser.

/// A single recognized character of a number template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Literal group separator (,)
    Comma,
    /// Literal decimal point (.)
    Point,
    /// Strict digit placeholder (0)
    Zero,
    /// Lenient digit placeholder (9)
    Nine,
    /// Locale decimal separator (D)
    LocaleDecimal,
    /// Locale group separator (G)
    LocaleGroup,
    /// Local currency symbol (L)
    Currency,
    /// Hexadecimal digit placeholder (X)
    Hex,
}

impl Token {
    /// The canonical (upper-case) spelling of the token
    pub fn symbol(self) -> char {
        match self {
            Token::Comma => ',',
            Token::Point => '.',
            Token::Zero => '0',
            Token::Nine => '9',
            Token::LocaleDecimal => 'D',
            Token::LocaleGroup => 'G',
            Token::Currency => 'L',
            Token::Hex => 'X',
        }
    }
}

/// Named flags collected while compiling a template.
///
/// Each flag is only ever switched on during a compilation; the compiler's rule checks read them
/// to reject incompatible token combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatFlags {
    /// A decimal section has started (`.`, `D` or a mid-template `L`)
    pub has_decimal: bool,
    /// The decimal separator is locale style (`D` or a mid-template `L`)
    pub has_locale_decimal: bool,
    /// At least one `0` placeholder
    pub has_zero_digit: bool,
    /// At least one `9` placeholder
    pub has_nine_digit: bool,
    /// At least one group separator (`,` or `G`)
    pub has_group: bool,
    /// The group separators are locale style (`G`)
    pub has_locale_group: bool,
    /// A currency token is present
    pub has_currency: bool,
    /// The currency token sits strictly inside the template and acts as the decimal separator
    pub has_mid_currency: bool,
    /// Hexadecimal mode
    pub has_hex: bool,
    /// A leading `$` in the value may be skipped before matching.
    /// No token of the template alphabet sets it.
    pub has_dollar: bool,
}

impl FormatFlags {
    /// Group separators are present and all of them are `G`
    pub fn is_locale_group(&self) -> bool {
        self.has_group && self.has_locale_group
    }

    /// Group separators are present and all of them are `,`
    pub fn is_literal_group(&self) -> bool {
        self.has_group && !self.has_locale_group
    }

    /// Whether any flag other than `has_hex` is set
    pub fn conflicts_with_hex(&self) -> bool {
        let FormatFlags {
            has_decimal,
            has_locale_decimal,
            has_zero_digit,
            has_nine_digit,
            has_group,
            has_locale_group,
            has_currency,
            has_mid_currency,
            has_hex: _,
            has_dollar,
        } = *self;
        has_decimal
            || has_locale_decimal
            || has_zero_digit
            || has_nine_digit
            || has_group
            || has_locale_group
            || has_currency
            || has_mid_currency
            || has_dollar
    }
}

/// Counts and flags derived from a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Descriptor {
    /// Digit placeholders before the decimal separator
    pub pre: usize,
    /// Digit placeholders after the decimal separator
    pub post: usize,
    /// Number of `X` placeholders
    pub hex_len: usize,
    /// Number of group separators still to be matched
    pub group_count: usize,
    /// Position of the token being processed
    pub cur_pos: usize,
    /// Length of the template in bytes
    pub template_len: usize,
    pub flags: FormatFlags,
}

impl Descriptor {
    pub(crate) fn new(template_len: usize) -> Self {
        Self {
            template_len,
            ..Self::default()
        }
    }

    /// Whether the compiled template reads hexadecimal input
    pub fn is_hex(&self) -> bool {
        self.flags.has_hex
    }
}

/// One compiled step of the matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// A digit placeholder; `strict` for `0`, lenient for `9`
    Digit { strict: bool },
    /// A decimal separator; `locale` for `D`
    Point { locale: bool },
    /// A group separator; `locale` for `G`
    Group { locale: bool },
    /// A currency symbol; `mid` when it doubles as the decimal separator
    Currency { mid: bool },
    /// A hexadecimal digit placeholder
    Hex,
    /// Terminates the instruction list
    End,
}

/// Radix the value was read in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumBase {
    Decimal,
    Hex,
}

/// The canonical sign-and-digit text produced by matching a value against a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalNumber {
    pub(crate) text: String,
    pub(crate) scale: usize,
    pub(crate) base: NumBase,
}

impl CanonicalNumber {
    /// Full text, including the leading sign slot
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The sign slot. Matching never reads a sign, so this is the blank placeholder.
    pub fn sign(&self) -> char {
        self.text.chars().next().unwrap_or(' ')
    }

    /// Digits and optional decimal point, without the sign slot
    pub fn digits(&self) -> &str {
        self.text.get(1..).unwrap_or("")
    }

    /// Fractional digits actually read from the value
    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn base(&self) -> NumBase {
        self.base
    }
}

impl std::fmt::Display for CanonicalNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.digits())
    }
}
