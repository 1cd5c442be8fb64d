//! Conversion of query arguments to decimals
//!
//! This module is the boundary between the template machinery and a host that evaluates
//! `TO_NUMBER(value)` and `TO_NUMBER(value, format)`. It classifies arguments, routes text through
//! the plain-number validator or the template matcher, and range-checks the decimal it produces.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::config::Limits;
use crate::context::Context;
use crate::error::{Result, ToNumberError};
use crate::matcher::match_value;
use crate::parser::compile_format;
use crate::validator::validate_plain_number;

/// A function argument as seen by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Argument<'a> {
    Null,
    Text(&'a str),
    Number(Decimal),
}

impl<'a> From<&'a str> for Argument<'a> {
    fn from(text: &'a str) -> Self {
        Argument::Text(text)
    }
}

impl From<Decimal> for Argument<'_> {
    fn from(number: Decimal) -> Self {
        Argument::Number(number)
    }
}

/// Evaluates conversions, one statement at a time
#[derive(Debug, Default)]
pub struct Converter {
    ctx: Context,
}

impl Converter {
    pub fn new(limits: Limits) -> Self {
        Self {
            ctx: Context::new(limits),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// One-argument form. `Ok(None)` stands for SQL `NULL`.
    pub fn to_number(&self, value: Argument<'_>) -> Result<Option<Decimal>> {
        let limits = *self.ctx.limits();
        match value {
            Argument::Null => Ok(None),
            Argument::Number(number) => check_range(number, &limits).map(Some),
            Argument::Text("") => Ok(None),
            Argument::Text(text) => {
                validate_plain_number(text)?;
                parse_plain_number(text, &limits).map(Some)
            }
        }
    }

    /// Two-argument form. A `NULL` value or format yields `Ok(None)`.
    pub fn to_number_with_format(
        &self,
        value: Argument<'_>,
        format: Argument<'_>,
    ) -> Result<Option<Decimal>> {
        let template = match format {
            Argument::Null => return Ok(None),
            Argument::Text(text) => text.to_string(),
            Argument::Number(number) => number.to_string(),
        };
        let text = match value {
            Argument::Null | Argument::Text("") => return Ok(None),
            Argument::Text(text) => text.to_string(),
            Argument::Number(number) => number.to_string(),
        };

        let result = self.statement(|ctx| {
            let format = compile_format(&template, ctx)?;
            let number = match_value(&format, &text, ctx)?;
            parse_canonical(false, number.digits(), ctx.limits())
        });
        result.map(Some)
    }

    /// One-argument form that reports failures and substitutes zero
    pub fn to_number_or_zero(&self, value: Argument<'_>) -> Option<Decimal> {
        self.to_number(value).unwrap_or_else(|e| report(&e))
    }

    /// Two-argument form that reports failures and substitutes zero
    pub fn to_number_with_format_or_zero(
        &self,
        value: Argument<'_>,
        format: Argument<'_>,
    ) -> Option<Decimal> {
        self.to_number_with_format(value, format)
            .unwrap_or_else(|e| report(&e))
    }

    /// Run `f` with the statement's context, then release the arena
    fn statement<T>(&self, f: impl FnOnce(&Context) -> Result<T>) -> Result<T> {
        let result = f(&self.ctx);
        self.ctx.reset();
        result
    }
}

fn report(error: &ToNumberError) -> Option<Decimal> {
    tracing::warn!(%error, "to_number failed, returning zero");
    Some(Decimal::ZERO)
}

/// Convert text with the embedded default limits
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use to_number::to_number;
///
/// assert_eq!(to_number(" 12.5").unwrap(), Some(Decimal::new(125, 1)));
/// assert_eq!(to_number("5-").unwrap(), Some(Decimal::from(-5)));
/// ```
pub fn to_number(value: &str) -> Result<Option<Decimal>> {
    Converter::default().to_number(Argument::Text(value))
}

/// Convert text against a template with the embedded default limits
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use to_number::to_number_with_format;
///
/// let value = to_number_with_format("1,234.5", "9,999.99").unwrap();
/// assert_eq!(value, Some(Decimal::new(12345, 1)));
/// ```
pub fn to_number_with_format(value: &str, format: &str) -> Result<Option<Decimal>> {
    Converter::default().to_number_with_format(Argument::Text(value), Argument::Text(format))
}

/// Text accepted by the plain-number validator: a sign may trail, spaces may surround it
fn parse_plain_number(text: &str, limits: &Limits) -> Result<Decimal> {
    let trimmed = text.trim_matches(' ');
    let (negative, body) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (false, rest)
    } else if let Some(rest) = trimmed.strip_suffix('-') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_suffix('+') {
        (false, rest)
    } else {
        (false, trimmed)
    };
    parse_canonical(negative, body, limits)
}

/// Parse digits with an optional point, enforcing precision and scale limits
fn parse_canonical(negative: bool, digits: &str, limits: &Limits) -> Result<Decimal> {
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let int_part = int_part.trim_start_matches('0');
    let significant_frac = frac_part.trim_end_matches('0');

    if int_part.len() + significant_frac.len() > limits.max_precision {
        return Err(ToNumberError::ValueOutOfRange(
            "decimal overflow: bigger precision".to_string(),
        ));
    }
    if significant_frac.len() > limits.max_scale {
        return Err(ToNumberError::ValueOutOfRange(
            "decimal overflow: bigger scale".to_string(),
        ));
    }

    // trailing zeros past the scale limit carry no value
    let kept_frac = &frac_part[..frac_part.len().min(limits.max_scale)];
    let mut text = String::with_capacity(int_part.len() + kept_frac.len() + 3);
    if negative {
        text.push('-');
    }
    text.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !kept_frac.is_empty() {
        text.push('.');
        text.push_str(kept_frac);
    }

    Decimal::from_str(&text).map_err(|e| ToNumberError::ValueOutOfRange(e.to_string()))
}

fn check_range(number: Decimal, limits: &Limits) -> Result<Decimal> {
    let text = number.abs().to_string();
    parse_canonical(number.is_sign_negative(), &text, limits)?;
    Ok(number)
}
