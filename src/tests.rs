use crate::context::Context;
use crate::error::{FormatRule, ToNumberError};
use crate::parser::*;
use crate::types::*;

fn compile(template: &str) -> crate::Result<CompiledFormat> {
    compile_format(template, &Context::default())
}

fn rule(template: &str) -> FormatRule {
    match compile(template) {
        Err(ToNumberError::FormatInvalid(rule)) => rule,
        other => panic!("expected {template:?} to be rejected, got {other:?}"),
    }
}

#[test]
fn test_next_token_alphabet() {
    let mut input = "9,0.DgLx";
    let mut tokens = Vec::new();
    while let Some(token) = next_token(&mut input) {
        tokens.push(token);
    }
    assert!(input.is_empty());
    assert_eq!(
        tokens,
        vec![
            Token::Nine,
            Token::Comma,
            Token::Zero,
            Token::Point,
            Token::LocaleDecimal,
            Token::LocaleGroup,
            Token::Currency,
            Token::Hex,
        ]
    );
}

#[test]
fn test_next_token_rejects_without_consuming() {
    for text in ["A", " 9", "~", "\u{7f}", "é9", "$"] {
        let mut input = text;
        assert_eq!(next_token(&mut input), None, "{text:?}");
        assert_eq!(input, text);
    }
    let mut empty = "";
    assert_eq!(next_token(&mut empty), None);
}

#[test]
fn test_simple_decimal_template() {
    let format = compile("999.99").unwrap();
    assert_eq!(
        format.instructions(),
        &[
            Instruction::Digit { strict: false },
            Instruction::Digit { strict: false },
            Instruction::Digit { strict: false },
            Instruction::Point { locale: false },
            Instruction::Digit { strict: false },
            Instruction::Digit { strict: false },
            Instruction::End,
        ]
    );
    let num = format.descriptor();
    assert_eq!((num.pre, num.post), (3, 2));
    assert_eq!(num.cur_pos, 0);
    assert_eq!(num.template_len, 6);
    assert!(num.flags.has_decimal);
    assert!(num.flags.has_nine_digit);
    assert!(!num.flags.has_zero_digit);
}

#[test]
fn test_locale_template_counts() {
    let format = compile("L9g990d0").unwrap();
    let num = format.descriptor();
    assert_eq!((num.pre, num.post, num.group_count), (4, 1, 1));
    assert!(num.flags.has_currency);
    assert!(!num.flags.has_mid_currency);
    assert!(num.flags.is_locale_group());
    assert!(num.flags.has_locale_decimal);
    assert!(num.flags.has_zero_digit);
    assert_eq!(format.instructions()[0], Instruction::Currency { mid: false });
}

#[test]
fn test_mid_currency_implies_decimal() {
    let format = compile("99L99").unwrap();
    let num = format.descriptor();
    assert_eq!((num.pre, num.post), (2, 2));
    assert!(num.flags.has_mid_currency);
    assert!(num.flags.has_decimal);
    assert!(num.flags.has_locale_decimal);
    assert_eq!(format.instructions()[2], Instruction::Currency { mid: true });

    // first or last position is not "mid"
    assert!(!compile("999L").unwrap().descriptor().flags.has_mid_currency);
    assert!(!compile("L999").unwrap().descriptor().flags.has_mid_currency);
}

#[test]
fn test_hex_template() {
    let format = compile("xxXX").unwrap();
    let num = format.descriptor();
    assert_eq!(num.hex_len, 4);
    assert!(num.is_hex());
    assert!(!num.flags.conflicts_with_hex());
    assert_eq!(format.instructions().len(), 5);
}

#[test]
fn test_empty_template_compiles_to_end() {
    let format = compile("").unwrap();
    assert_eq!(format.instructions(), &[Instruction::End]);
}

#[test]
fn test_unsupported_characters() {
    assert_eq!(
        rule("99S"),
        FormatRule::UnsupportedToken {
            position: 2,
            found: 'S'
        }
    );
    assert_eq!(
        rule(" 9"),
        FormatRule::UnsupportedToken {
            position: 0,
            found: ' '
        }
    );
}

#[test]
fn test_template_length_limit() {
    let long = "9".repeat(64);
    assert_eq!(rule(&long), FormatRule::TemplateTooLong { len: 64, max: 64 });
    assert!(compile(&long[..63]).is_ok());
}

#[test]
fn test_separator_position_rules() {
    assert_eq!(rule(",99"), FormatRule::LeadingSeparator { position: 0 });
    assert_eq!(rule("G99"), FormatRule::LeadingSeparator { position: 0 });
    assert_eq!(rule("L,99"), FormatRule::LeadingSeparator { position: 1 });
    assert_eq!(rule("LG99"), FormatRule::LeadingSeparator { position: 1 });
    assert!(compile("9,99").is_ok());
    assert!(compile("L9G99").is_ok());

    assert_eq!(rule("9.9,9"), FormatRule::SeparatorAfterDecimal { position: 3 });
    assert_eq!(rule("9D9G9"), FormatRule::SeparatorAfterDecimal { position: 3 });
    assert_eq!(rule("9L9G9"), FormatRule::SeparatorAfterDecimal { position: 3 });
}

#[test]
fn test_group_styles_do_not_mix() {
    assert_eq!(rule("9G9,9"), FormatRule::CommaWithLocaleGroup { position: 3 });
    assert_eq!(rule("9,9G9"), FormatRule::LocaleGroupWithComma { position: 3 });
}

#[test]
fn test_decimal_rules() {
    assert_eq!(rule("9.9.9"), FormatRule::RepeatedDecimal { position: 3 });
    assert_eq!(rule("9D9D9"), FormatRule::RepeatedDecimal { position: 3 });
    assert_eq!(rule("9.9D9"), FormatRule::RepeatedDecimal { position: 3 });
    assert_eq!(rule("9,9D9"), FormatRule::LocaleDecimalWithComma { position: 3 });
    assert_eq!(rule("9G9.9"), FormatRule::PointWithLocaleGroup { position: 3 });
    assert!(compile("9G9D9").is_ok());
    assert!(compile("9,9.9").is_ok());
}

#[test]
fn test_currency_rules() {
    assert_eq!(rule("L99L"), FormatRule::RepeatedCurrency { position: 3 });
    assert_eq!(rule("9,9L9"), FormatRule::MidCurrencyWithComma { position: 3 });
    assert_eq!(rule("9.9L9"), FormatRule::MidCurrencyWithDecimal { position: 3 });
    assert_eq!(rule("9L9.9"), FormatRule::RepeatedDecimal { position: 3 });
    assert_eq!(rule("9L9D9"), FormatRule::RepeatedDecimal { position: 3 });
    assert!(compile("9G9L99").is_ok());
    // a trailing L after a decimal point is not mid-template
    assert!(compile("9.99L").is_ok());
}

#[test]
fn test_hex_is_exclusive() {
    assert_eq!(rule("9X"), FormatRule::InvalidHex { position: 1 });
    assert_eq!(rule("X9"), FormatRule::InvalidHex { position: 1 });
    assert_eq!(rule("X0"), FormatRule::InvalidHex { position: 1 });
    assert_eq!(rule("LX"), FormatRule::InvalidHex { position: 1 });
    assert_eq!(rule("XL"), FormatRule::InvalidHex { position: 1 });
    assert_eq!(rule("X.X"), FormatRule::InvalidHex { position: 1 });
    assert_eq!(rule("XX,"), FormatRule::InvalidHex { position: 2 });
    assert_eq!(rule("XGX"), FormatRule::InvalidHex { position: 1 });
    assert_eq!(rule("XD"), FormatRule::InvalidHex { position: 1 });
    assert_eq!(rule(".X"), FormatRule::InvalidHex { position: 1 });
}

#[test]
fn test_compile_charges_arena() {
    let limits = crate::Limits {
        arena_capacity: 1,
        ..crate::Limits::default()
    };
    let ctx = Context::new(limits);
    assert!(matches!(
        compile_format("99", &ctx),
        Err(ToNumberError::AllocationFailed(_))
    ));
}
