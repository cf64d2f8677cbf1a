use super::*;
use rstest::rstest;
use rust_decimal_macros::dec;

#[rstest]
#[case("1500", dec!(1500))]
#[case(" 12345.67 ", dec!(12345.67))]
#[case("1,000.50", dec!(1000.50))]
#[case("600,000.00", dec!(600000.00))]
#[case("-20", dec!(-20))]
#[case("0.005", dec!(0.005))]
fn test_parse_amount(#[case] input: &str, #[case] expected: Decimal) {
    assert_eq!(parse_amount(input).unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn test_parse_amount_empty(#[case] input: &str) {
    assert_eq!(parse_amount(input), Err(AmountError::Empty));
}

#[rstest]
#[case("abc")]
#[case("12.3.4")]
#[case("MWK 100")]
fn test_parse_amount_not_a_number(#[case] input: &str) {
    assert!(matches!(
        parse_amount(input),
        Err(AmountError::NotANumber(_))
    ));
}

#[test]
fn test_storage_preserves_scale() {
    let amount = dec!(1000.50);
    let stored = to_storage(amount);
    assert_eq!(stored, "1000.50");
    let back = from_storage(&stored).unwrap();
    assert_eq!(back, amount);
    assert_eq!(back.scale(), 2);
}

#[test]
fn test_from_storage_empty_is_zero() {
    assert_eq!(from_storage("").unwrap(), Decimal::ZERO);
}

#[test]
fn test_from_storage_rejects_garbage() {
    assert!(from_storage("n/a").is_err());
}
