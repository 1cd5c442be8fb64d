//! Value matching module
//!
//! This module walks a compiled instruction list against a value string and produces the
//! canonical sign-and-digit text. The main entry point is the `match_value` function.

mod cursor;
mod hex;

use tracing::trace;

use crate::context::Context;
use crate::error::{Result, ToNumberError};
use crate::parser::CompiledFormat;
use crate::types::{CanonicalNumber, Descriptor, Instruction, NumBase};
use cursor::{OutputBuffer, ValueCursor};
use hex::HexAccumulator;

const DECIMAL_POINT: u8 = b'.';
const GROUP_SEPARATOR: u8 = b',';
const CURRENCY_SYMBOL: u8 = b'$';

const NOT_MATCH: &str = "number not match the format";

/// Section of the template being matched
///
/// There is no end section: leaving the instruction loop at [`Instruction::End`] is the end
/// state, handled by `process_end_of_format` and `finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Integer,
    Fraction,
    Hex,
}

/// Skip leading spaces, always keeping at least one character.
///
/// Returns the byte offset of the first kept character.
pub(crate) fn leading_space_len(value: &str) -> usize {
    let spaces = value.bytes().take_while(|&b| b == b' ').count();
    if spaces == value.len() {
        spaces.saturating_sub(1)
    } else {
        spaces
    }
}

/// Match a value against a compiled template
///
/// # Arguments
/// * `format` - The compiled template
/// * `value` - The value text; leading spaces are ignored
/// * `ctx` - Limits and arena of the current statement
///
/// # Returns
/// * `Result<CanonicalNumber>` - The canonical digits and the fractional digits actually read
///
/// # Examples
/// ```
/// use to_number::{compile_format, match_value, Context};
///
/// let ctx = Context::default();
/// let format = compile_format("9G999", &ctx).unwrap();
/// let number = match_value(&format, "1,234", &ctx).unwrap();
/// assert_eq!(number.digits(), "1234");
/// ```
pub fn match_value(format: &CompiledFormat, value: &str, ctx: &Context) -> Result<CanonicalNumber> {
    let out = OutputBuffer::for_value(ctx.arena(), value.len())?;
    let cursor = ValueCursor::new(value, leading_space_len(value));
    let mut matcher = Matcher::new(*format.descriptor(), cursor, out);

    matcher.preprocess();

    for instruction in format.instructions() {
        trace!(?instruction, position = matcher.cursor.position(), "match step");
        match *instruction {
            Instruction::Digit { strict } => matcher.process_digit(strict)?,
            Instruction::Point { .. } => matcher.process_decimal_point()?,
            Instruction::Group { .. } => matcher.process_group_separator()?,
            Instruction::Currency { mid } => matcher.process_currency(mid)?,
            Instruction::Hex => matcher.process_hex()?,
            Instruction::End => break,
        }
        matcher.num.cur_pos += 1;
    }

    matcher.process_end_of_format()?;
    matcher.finish()
}

/// Call-scoped matching state
struct Matcher<'a> {
    /// Working copy of the descriptor; its counts are consumed while matching
    num: Descriptor,
    cursor: ValueCursor<'a>,
    out: OutputBuffer,
    section: Section,
    /// Integer digits in the value not yet consumed
    read_pre: usize,
    /// Fraction digits in the value not yet consumed
    read_post: usize,
    /// Fraction digits written to the output
    consumed_post: usize,
    /// A digit instruction has begun consuming the value
    started: bool,
    /// Value characters eligible for hex accumulation
    xmatch_len: usize,
    hex: Option<HexAccumulator>,
}

impl<'a> Matcher<'a> {
    fn new(num: Descriptor, cursor: ValueCursor<'a>, out: OutputBuffer) -> Self {
        Self {
            num,
            cursor,
            out,
            section: Section::Integer,
            read_pre: 0,
            read_post: 0,
            consumed_post: 0,
            started: false,
            xmatch_len: 0,
            hex: None,
        }
    }

    fn error(&self, reason: &'static str) -> ToNumberError {
        ToNumberError::value(self.cursor.position(), reason)
    }

    fn preprocess(&mut self) {
        if !self.cursor.at_end() && self.num.flags.has_dollar {
            self.cursor.skip_one(CURRENCY_SYMBOL);
        }

        if self.num.is_hex() {
            self.preprocess_hex();
        } else {
            self.preprocess_digits();
        }
    }

    /// Count integer and fraction digits present in the value
    fn preprocess_digits(&mut self) {
        let mut in_fraction = false;
        for &b in self.cursor.rest() {
            match b {
                b'0'..=b'9' if in_fraction => self.read_post += 1,
                b'0'..=b'9' => self.read_pre += 1,
                DECIMAL_POINT => in_fraction = true,
                // an interior currency symbol stands in for the point
                CURRENCY_SYMBOL if self.num.flags.has_mid_currency => in_fraction = true,
                _ => {}
            }
        }
    }

    /// Separators never take part in hex accumulation
    fn preprocess_hex(&mut self) {
        let whole = self.cursor.whole();
        let commas = whole.iter().filter(|&&b| b == GROUP_SEPARATOR).count();
        self.xmatch_len = whole.len() - commas;
        self.section = Section::Hex;
        self.hex = Some(HexAccumulator::for_digits(self.xmatch_len));
    }

    fn is_last_token(&self) -> bool {
        self.num.cur_pos + 1 == self.num.template_len
    }

    /// Tolerate extra separators once every group instruction is used up, and a stray point
    /// when the template has no decimal section
    fn skip_trailing_separators(&mut self) {
        if self.num.group_count == 0 {
            self.cursor.skip_run(GROUP_SEPARATOR);
        }
        if !self.num.flags.has_decimal {
            self.cursor.skip_one(DECIMAL_POINT);
        }
    }

    /// `0` requires a digit wherever the template has one; `9` lets the value be shorter.
    fn process_digit(&mut self, strict: bool) -> Result<()> {
        if strict {
            self.started = true;
            if self.read_pre < self.num.pre {
                return Err(self.error(NOT_MATCH));
            }
        } else if self.read_pre < self.num.pre {
            self.num.pre -= 1;
            return Ok(());
        }

        if self.cursor.at_end() {
            return Ok(());
        }

        self.started = true;
        if self.section == Section::Fraction {
            self.process_fraction_digit()
        } else {
            self.process_integer_digit()
        }
    }

    fn process_integer_digit(&mut self) -> Result<()> {
        // e.g. "12,,,3.4" against "99G9D9": the extra commas after the last G are skipped
        if self.num.group_count == 0 {
            self.cursor.skip_run(GROUP_SEPARATOR);
        }

        let digit = match self.cursor.peek() {
            Some(b) if b.is_ascii_digit() => b,
            _ => return Err(self.error(NOT_MATCH)),
        };
        self.out.push(digit)?;
        self.cursor.advance();
        self.num.pre = self.num.pre.saturating_sub(1);
        self.read_pre = self.read_pre.saturating_sub(1);

        if self.read_pre == 0 && self.is_last_token() {
            self.skip_trailing_separators();
        }
        Ok(())
    }

    fn process_fraction_digit(&mut self) -> Result<()> {
        if self.read_post > self.num.post {
            return Err(self.error(NOT_MATCH));
        }
        if self.read_post == 0 {
            return Ok(());
        }

        let digit = match self.cursor.peek() {
            Some(b) if b.is_ascii_digit() => b,
            _ => return Err(self.error(NOT_MATCH)),
        };
        self.out.push(digit)?;
        self.cursor.advance();
        self.num.post = self.num.post.saturating_sub(1);
        self.read_post -= 1;
        self.consumed_post += 1;
        Ok(())
    }

    fn process_decimal_point(&mut self) -> Result<()> {
        // "123,,,.4" against "999.9"
        self.cursor.skip_run(GROUP_SEPARATOR);

        if self.read_post == 0 {
            // "1." and "1" both match "9."; the digits after the point copy nothing
            self.cursor.skip_one(DECIMAL_POINT);
            self.section = Section::Fraction;
            return Ok(());
        }

        if self.cursor.peek() != Some(DECIMAL_POINT) {
            return Err(self.error("not match \"D\" or \".\" in the format"));
        }
        self.out.push(DECIMAL_POINT)?;
        self.cursor.advance();
        self.section = Section::Fraction;
        Ok(())
    }

    fn process_group_separator(&mut self) -> Result<()> {
        self.num.group_count = self.num.group_count.saturating_sub(1);
        if !self.started {
            return Ok(());
        }

        if self.cursor.peek() != Some(GROUP_SEPARATOR) {
            // with G and a mid-template L the separator may be absent ("22338" for "9GG0L9")
            if self.num.flags.is_locale_group() && self.num.flags.has_mid_currency {
                return Ok(());
            }
            return Err(self.error("not match \"G\" or \",\" in the format"));
        }
        self.cursor.advance();

        // "1,1,," against "9G9G"
        if self.num.group_count == 0 && self.is_last_token() {
            self.cursor.skip_run(GROUP_SEPARATOR);
        }
        Ok(())
    }

    fn process_currency(&mut self, mid: bool) -> Result<()> {
        self.cursor.skip_run(GROUP_SEPARATOR);

        if !self.cursor.skip_one(CURRENCY_SYMBOL) {
            return Err(self.error("error \"L\" value"));
        }
        if mid {
            self.out.push(DECIMAL_POINT)?;
            self.section = Section::Fraction;
        }
        Ok(())
    }

    fn process_hex(&mut self) -> Result<()> {
        if self.cursor.first() == Some(b'-') {
            return Err(ToNumberError::value(
                self.cursor.position(),
                "error \"X\" negative value",
            ));
        }

        // more X in the template than digits in the value
        if self.xmatch_len < self.num.hex_len {
            self.num.hex_len -= 1;
            return Ok(());
        }

        if self.cursor.at_end() {
            return Ok(());
        }

        self.cursor.skip_run(GROUP_SEPARATOR);
        let nibble = match self.cursor.peek().and_then(|b| char::from(b).to_digit(16)) {
            Some(nibble) => nibble,
            None => return Err(self.error("error \"X\" value")),
        };
        if let Some(acc) = self.hex.as_mut() {
            acc.fold(nibble)?;
        }
        self.cursor.advance();
        Ok(())
    }

    fn process_end_of_format(&mut self) -> Result<()> {
        self.skip_trailing_separators();

        if !self.cursor.at_end() {
            return Err(self.error("error number"));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<CanonicalNumber> {
        if self.section == Section::Hex {
            if let Some(acc) = self.hex.take() {
                acc.write_decimal(&mut self.out)?;
            }
            return Ok(CanonicalNumber {
                text: self.out.into_string(),
                scale: 0,
                base: NumBase::Hex,
            });
        }

        // "$" against "L999" leaves only the sign slot; "1." leaves a bare point
        if matches!(
            self.out.last(),
            Some(DECIMAL_POINT) | Some(OutputBuffer::SIGN_PLACEHOLDER)
        ) {
            self.out.push(b'0')?;
        }

        Ok(CanonicalNumber {
            text: self.out.into_string(),
            scale: self.consumed_post,
            base: NumBase::Decimal,
        })
    }
}
