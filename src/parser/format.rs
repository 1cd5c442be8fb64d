use crate::context::Context;
use crate::error::{FormatRule, Result};
use crate::parser::tokens::next_token;
use crate::types::{Descriptor, Instruction, Token};

/// A validated template: its descriptor and the instruction list the matcher walks.
///
/// Both halves are immutable once compiled, so one template can be matched against any
/// number of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFormat {
    descriptor: Descriptor,
    instructions: Vec<Instruction>,
}

impl CompiledFormat {
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Instructions in template order, ending with [`Instruction::End`]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

/// Compile a number template
///
/// Tokens are consumed left to right and checked against the flags gathered so far. The first
/// rule a token breaks aborts compilation.
///
/// # Arguments
/// * `template` - The template text, e.g. `"9G999D99"`
/// * `ctx` - Limits and arena of the current statement
///
/// # Examples
/// ```
/// use to_number::{compile_format, Context};
///
/// let format = compile_format("9G999.99", &Context::default()).unwrap();
/// assert_eq!(format.descriptor().pre, 4);
/// assert_eq!(format.descriptor().post, 2);
/// ```
pub fn compile_format(template: &str, ctx: &Context) -> Result<CompiledFormat> {
    let max = ctx.limits().max_template_len;
    if template.len() >= max {
        return Err(FormatRule::TemplateTooLong {
            len: template.len(),
            max,
        }
        .into());
    }

    let mut instructions = ctx.arena().allocate::<Instruction>(template.len() + 1)?;
    let mut descriptor = Descriptor::new(template.len());
    let mut input = template;

    while !input.is_empty() {
        let token = match next_token(&mut input) {
            Some(token) => token,
            None => {
                return Err(FormatRule::UnsupportedToken {
                    position: descriptor.cur_pos,
                    found: input.chars().next().unwrap_or_default(),
                }
                .into());
            }
        };
        instructions.push(prepare_token(&mut descriptor, token)?);
        descriptor.cur_pos += 1;
    }

    // The matcher counts positions again from the start
    descriptor.cur_pos = 0;
    instructions.push(Instruction::End);

    tracing::debug!(
        template,
        pre = descriptor.pre,
        post = descriptor.post,
        hex_len = descriptor.hex_len,
        groups = descriptor.group_count,
        "compiled number format"
    );

    Ok(CompiledFormat {
        descriptor,
        instructions,
    })
}

/// Apply one token to the descriptor and return its instruction
fn prepare_token(num: &mut Descriptor, token: Token) -> std::result::Result<Instruction, FormatRule> {
    match token {
        Token::Nine => prepare_digit(num, false),
        Token::Zero => prepare_digit(num, true),
        Token::Comma => prepare_comma(num),
        Token::LocaleGroup => prepare_locale_group(num),
        Token::LocaleDecimal => prepare_locale_decimal(num),
        Token::Point => prepare_point(num),
        Token::Currency => prepare_currency(num),
        Token::Hex => prepare_hex(num),
    }
}

fn prepare_digit(num: &mut Descriptor, strict: bool) -> std::result::Result<Instruction, FormatRule> {
    let position = num.cur_pos;
    if num.flags.has_hex {
        return Err(FormatRule::InvalidHex { position });
    }

    if num.flags.has_decimal {
        num.post += 1;
    } else {
        num.pre += 1;
    }

    if strict {
        num.flags.has_zero_digit = true;
    } else {
        num.flags.has_nine_digit = true;
    }
    Ok(Instruction::Digit { strict })
}

/// A separator may not open the template, nor follow a leading currency symbol
fn is_start_separator(num: &Descriptor) -> bool {
    num.cur_pos == 0 || (num.cur_pos == 1 && num.flags.has_currency)
}

fn prepare_comma(num: &mut Descriptor) -> std::result::Result<Instruction, FormatRule> {
    let position = num.cur_pos;
    if num.flags.has_hex {
        return Err(FormatRule::InvalidHex { position });
    }
    if is_start_separator(num) {
        return Err(FormatRule::LeadingSeparator { position });
    }
    if num.flags.has_decimal {
        return Err(FormatRule::SeparatorAfterDecimal { position });
    }
    if num.flags.has_locale_group {
        return Err(FormatRule::CommaWithLocaleGroup { position });
    }
    if num.flags.has_mid_currency {
        return Err(FormatRule::SeparatorAfterMidCurrency { position });
    }

    num.group_count += 1;
    num.flags.has_group = true;
    Ok(Instruction::Group { locale: false })
}

fn prepare_locale_group(num: &mut Descriptor) -> std::result::Result<Instruction, FormatRule> {
    let position = num.cur_pos;
    if num.flags.has_hex {
        return Err(FormatRule::InvalidHex { position });
    }
    if is_start_separator(num) {
        return Err(FormatRule::LeadingSeparator { position });
    }
    if num.flags.has_decimal {
        return Err(FormatRule::SeparatorAfterDecimal { position });
    }
    if num.flags.is_literal_group() {
        return Err(FormatRule::LocaleGroupWithComma { position });
    }
    if num.flags.has_mid_currency {
        return Err(FormatRule::SeparatorAfterMidCurrency { position });
    }

    num.group_count += 1;
    num.flags.has_group = true;
    num.flags.has_locale_group = true;
    Ok(Instruction::Group { locale: true })
}

fn prepare_locale_decimal(num: &mut Descriptor) -> std::result::Result<Instruction, FormatRule> {
    let position = num.cur_pos;
    if num.flags.has_hex {
        return Err(FormatRule::InvalidHex { position });
    }
    if num.flags.has_decimal {
        return Err(FormatRule::RepeatedDecimal { position });
    }
    if num.flags.is_literal_group() {
        return Err(FormatRule::LocaleDecimalWithComma { position });
    }
    if num.flags.has_mid_currency {
        return Err(FormatRule::DecimalAfterMidCurrency { position });
    }

    num.flags.has_locale_decimal = true;
    num.flags.has_decimal = true;
    Ok(Instruction::Point { locale: true })
}

fn prepare_point(num: &mut Descriptor) -> std::result::Result<Instruction, FormatRule> {
    let position = num.cur_pos;
    if num.flags.has_hex {
        return Err(FormatRule::InvalidHex { position });
    }
    if num.flags.has_decimal {
        return Err(FormatRule::RepeatedDecimal { position });
    }
    if num.flags.has_locale_group {
        return Err(FormatRule::PointWithLocaleGroup { position });
    }
    if num.flags.has_mid_currency {
        return Err(FormatRule::DecimalAfterMidCurrency { position });
    }

    num.flags.has_decimal = true;
    Ok(Instruction::Point { locale: false })
}

/// Neither the first nor the last token of the template
fn is_middle_position(num: &Descriptor) -> bool {
    num.cur_pos != 0 && num.template_len != num.cur_pos + 1
}

fn prepare_currency(num: &mut Descriptor) -> std::result::Result<Instruction, FormatRule> {
    let position = num.cur_pos;
    if num.flags.has_currency {
        return Err(FormatRule::RepeatedCurrency { position });
    }
    if num.flags.has_hex {
        return Err(FormatRule::InvalidHex { position });
    }

    let mid = is_middle_position(num);
    if mid {
        if num.flags.is_literal_group() {
            return Err(FormatRule::MidCurrencyWithComma { position });
        }
        if num.flags.has_decimal {
            return Err(FormatRule::MidCurrencyWithDecimal { position });
        }
        num.flags.has_mid_currency = true;
        num.flags.has_decimal = true;
        num.flags.has_locale_decimal = true;
    }

    num.flags.has_currency = true;
    Ok(Instruction::Currency { mid })
}

fn prepare_hex(num: &mut Descriptor) -> std::result::Result<Instruction, FormatRule> {
    if num.flags.conflicts_with_hex() {
        return Err(FormatRule::InvalidHex {
            position: num.cur_pos,
        });
    }

    num.hex_len += 1;
    num.flags.has_hex = true;
    Ok(Instruction::Hex)
}
