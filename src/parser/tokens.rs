use winnow::ascii::Caseless;
use winnow::combinator::alt;
use winnow::error::ErrMode;
use winnow::token::literal;
use winnow::{ModalResult, Parser};

use crate::types::Token;

// Digit placeholders
pub fn parse_zero(input: &mut &str) -> ModalResult<Token> {
    literal("0")
        .value(Token::Zero)
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

pub fn parse_nine(input: &mut &str) -> ModalResult<Token> {
    literal("9")
        .value(Token::Nine)
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

pub fn parse_hex(input: &mut &str) -> ModalResult<Token> {
    literal(Caseless("X"))
        .value(Token::Hex)
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

// Separators
pub fn parse_comma(input: &mut &str) -> ModalResult<Token> {
    literal(",")
        .value(Token::Comma)
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

pub fn parse_point(input: &mut &str) -> ModalResult<Token> {
    literal(".")
        .value(Token::Point)
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

pub fn parse_locale_decimal(input: &mut &str) -> ModalResult<Token> {
    literal(Caseless("D"))
        .value(Token::LocaleDecimal)
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

pub fn parse_locale_group(input: &mut &str) -> ModalResult<Token> {
    literal(Caseless("G"))
        .value(Token::LocaleGroup)
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

// Currency
pub fn parse_currency(input: &mut &str) -> ModalResult<Token> {
    literal(Caseless("L"))
        .value(Token::Currency)
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

/// Printable range the alphabet lives in; anything else is rejected without parsing
fn is_keyword_candidate(c: u8) -> bool {
    (0x21..=0x7D).contains(&c)
}

/// Classify the token at the front of `input`, advancing past it on success.
///
/// Returns `None` (leaving `input` untouched) when the next character is not part of the
/// template alphabet.
pub fn next_token(input: &mut &str) -> Option<Token> {
    let first = *input.as_bytes().first()?;
    if !is_keyword_candidate(first) {
        return None;
    }

    let mut parser = alt((
        parse_nine,
        parse_zero,
        parse_comma,
        parse_point,
        parse_locale_group,
        parse_locale_decimal,
        parse_currency,
        parse_hex,
    ));

    let checkpoint = *input;
    match parser.parse_next(input) {
        Ok(token) => Some(token),
        Err(_) => {
            *input = checkpoint;
            None
        }
    }
}
