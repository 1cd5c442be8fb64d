use to_number::{
    CanonicalNumber, Context, Limits, NumBase, ToNumberError, compile_format, match_value,
};

fn canonical(template: &str, value: &str) -> Result<CanonicalNumber, ToNumberError> {
    let ctx = Context::default();
    let format = compile_format(template, &ctx)?;
    match_value(&format, value, &ctx)
}

fn digits(template: &str, value: &str) -> String {
    canonical(template, value)
        .unwrap_or_else(|e| panic!("{value:?} against {template:?}: {e}"))
        .digits()
        .to_string()
}

fn assert_value_invalid(template: &str, value: &str) {
    match canonical(template, value) {
        Err(ToNumberError::ValueInvalid { .. }) => {}
        other => panic!("{value:?} against {template:?} should be invalid, got {other:?}"),
    }
}

#[test]
fn test_group_separators() {
    let number = canonical("9G999", "1,234").unwrap();
    assert_eq!(number.digits(), "1234");
    assert_eq!(number.scale(), 0);

    assert_eq!(digits("9,999", "1,234"), "1234");
    assert_value_invalid("9,999", "1.234");
}

#[test]
fn test_fraction_scale_reflects_value() {
    let number = canonical("999.99", "12.3").unwrap();
    assert_eq!(number.digits(), "12.3");
    assert_eq!(number.scale(), 1);

    let number = canonical("999D99", "12.30").unwrap();
    assert_eq!(number.digits(), "12.30");
    assert_eq!(number.scale(), 2);
}

#[test]
fn test_bare_currency_yields_zero() {
    let number = canonical("L999", "$").unwrap();
    assert_eq!(number.digits(), "0");
    assert_eq!(number.as_str(), " 0");
}

#[test]
fn test_hex_to_decimal() {
    let number = canonical("XXXX", "1A2B").unwrap();
    assert_eq!(number.digits(), "6699");
    assert_eq!(number.base(), NumBase::Hex);
    assert_eq!(number.scale(), 0);

    assert_eq!(digits("XXXX", "0"), "0");
    assert_eq!(digits("XXXXXXXXXXXXXXXX", "FFFFFFFFFFFFFFFF"), u64::MAX.to_string());
}

#[test]
fn test_trailing_separators_tolerated() {
    assert_eq!(digits("9G9G", "1,1,,"), "11");
    assert_eq!(digits("9G999", "1,234,,"), "1234");
    assert_eq!(digits("999", "123."), "123");
}

#[test]
fn test_leading_separators_skipped_before_first_digit() {
    assert_eq!(digits("9G99G999", "12,345"), "12345");
}

#[test]
fn test_strict_and_lenient_digits() {
    assert_eq!(digits("999", "5"), "5");
    assert_eq!(digits("099", "123"), "123");
    assert_value_invalid("000", "12");
    assert_value_invalid("99", "123");
}

#[test]
fn test_point_without_fraction_digits() {
    assert_eq!(digits("99.99", "12"), "12");
    assert_eq!(digits("99.99", "12."), "12");
    assert_eq!(digits("99.", "12."), "12");
    assert_value_invalid("99.9", "1.23");
}

#[test]
fn test_fraction_slots_do_not_take_integer_digits() {
    assert_value_invalid("9.99", "123");
    assert_value_invalid("0.00", "123");
    assert_value_invalid("9D99", "999");
    assert_value_invalid("99.99", "1234");
    assert_value_invalid("9.9", "123");
    assert_eq!(
        canonical("99.99", "123"),
        Err(ToNumberError::ValueInvalid {
            position: 2,
            reason: "error number"
        })
    );
    assert_eq!(digits("99.99", "12"), "12");
    assert_eq!(digits("0.00", "1"), "1");
}

#[test]
fn test_mid_currency_acts_as_point() {
    let number = canonical("99L99", "12$34").unwrap();
    assert_eq!(number.digits(), "12.34");
    assert_eq!(number.scale(), 2);
    assert_eq!(digits("99L9", "12$"), "12.0");
    assert_value_invalid("99L99", "12.34");
}

// A G template with a mid-template L does not need the separator in the value; a plain
// "," template always does.
#[test]
fn test_missing_locale_group_tolerated_with_mid_currency() {
    assert_eq!(digits("9G9L99", "12$34"), "12.34");
    assert_eq!(digits("9G9L99", "1,2$34"), "12.34");
    assert_value_invalid("9G999", "1234");
    assert_value_invalid("9,999", "1234");
    assert_value_invalid("9G999L", "1234$");
}

#[test]
fn test_hex_extra_placeholders_and_separators() {
    assert_eq!(digits("xxxx", "1a"), "26");
    assert_eq!(digits("XXXXXX", "1,A2B"), "6699");
    assert_value_invalid("XX", "1A2B");
    assert_value_invalid("XXXX", "-1");
    assert_value_invalid("XX", "1G");
}

// With no matchable hex characters every X is skipped, as the decimal path skips every 9
// once the value is exhausted.
#[test]
fn test_empty_matchable_input() {
    assert_eq!(digits("XXX", ""), "0");
    assert_eq!(digits("XXX", ",,"), "0");
    assert_eq!(digits("999", ""), "0");
    assert_value_invalid("XXX", " ");
}

#[test]
fn test_wide_hex_accumulator() {
    let template = "X".repeat(20);
    assert_eq!(digits(&template, "100000000000000000"), "295147905179352825856");
    assert!(matches!(
        canonical(&"X".repeat(32), &"F".repeat(32)),
        Err(ToNumberError::ValueOutOfRange(_))
    ));
}

#[test]
fn test_leftover_input_rejected() {
    assert_value_invalid("999", "12a");
    assert_value_invalid("9.9", "1.5.");
    assert_value_invalid("", "1");
}

#[test]
fn test_compiled_format_is_reusable() {
    let ctx = Context::default();
    let format = compile_format("9G999D99", &ctx).unwrap();
    let before = format.clone();
    assert_eq!(match_value(&format, "1,234.5", &ctx).unwrap().digits(), "1234.5");
    assert_eq!(match_value(&format, "7", &ctx).unwrap().digits(), "7");
    assert_eq!(format, before);
}

#[test]
fn test_arena_exhaustion_is_allocation_failure() {
    let limits = Limits {
        arena_capacity: 40,
        ..Limits::default()
    };
    let ctx = Context::new(limits);
    let format = compile_format("99999", &ctx).unwrap();
    assert!(matches!(
        match_value(&format, "12345678901234567890", &ctx),
        Err(ToNumberError::AllocationFailed(_))
    ));
}
