use assert_matches::assert_matches;

use super::{parse, parse_field};
use crate::diagram::layout::{FieldSet, FieldSpec};
use crate::diagram::{Error, Width};

/// Builds a field spec without going through the parser.
fn field(name: Option<&str>, hi: u8, lo: u8, value: Option<u64>) -> FieldSpec {
    FieldSpec {
        name: name.map(str::to_owned),
        hi,
        lo,
        value,
    }
}

/// Parses a token list at the given width.
fn parse_tokens(tokens: &[&str], width: Width) -> Result<FieldSet, Error> {
    let tokens: Vec<String> = tokens.iter().map(|s| (*s).to_owned()).collect();
    parse(&tokens, width)
}

#[test]
fn test_parse_single_bit() {
    assert_eq!(
        parse_field("sf[31]").unwrap(),
        field(Some("sf"), 31, 31, None)
    );
}

#[test]
fn test_parse_ranged_with_value() {
    assert_eq!(
        parse_field("Rn[9:5]=0x5").unwrap(),
        field(Some("Rn"), 9, 5, Some(5))
    );
}

#[test]
fn test_parse_anonymous() {
    assert_eq!(parse_field("[31]").unwrap(), field(None, 31, 31, None));
    assert_eq!(
        parse_field("[31:30]=0x3").unwrap(),
        field(None, 31, 30, Some(3))
    );
}

#[test]
fn test_parse_decimal_value() {
    assert_eq!(
        parse_field("imm[15:0]=42").unwrap(),
        field(Some("imm"), 15, 0, Some(42))
    );
}

#[test]
fn test_parse_malformed() {
    for token in ["", "sf", "sf[", "sf[31", "[a]", "x[3]=", "x[3]junk", "[]", "x[3:]"] {
        assert_matches!(
            parse_field(token),
            Err(Error::MalformedFieldSpec(t)) if t == token,
            "token {token:?}"
        );
    }
}

#[test]
fn test_round_trip_canonical_form() {
    for token in ["Rn[9:5]=0x5", "sf[31]", "[31:30]=0x3", "imm12[21:10]", "x[0]=0x1"] {
        let parsed = parse_field(token).unwrap();
        assert_eq!(parsed.to_string(), token);
        assert_eq!(parse_field(&parsed.to_string()).unwrap(), parsed);
    }
}

#[test]
fn test_decimal_input_serializes_as_hex() {
    let parsed = parse_field("x[3:0]=15").unwrap();
    assert_eq!(parsed.to_string(), "x[3:0]=0xf");
    assert_eq!(parse_field("x[3:0]=0xf").unwrap(), parsed);
}

#[test]
fn test_hi_below_lo() {
    assert_matches!(
        parse_tokens(&["Rn[3:5]"], Width::W32),
        Err(Error::OutOfRangeField { .. })
    );
}

#[test]
fn test_index_beyond_width() {
    assert_matches!(
        parse_tokens(&["x[10]"], Width::W8),
        Err(Error::OutOfRangeField { .. })
    );
    assert!(parse_tokens(&["x[10]"], Width::W16).is_ok());
}

#[test]
fn test_value_does_not_fit_field() {
    assert_matches!(
        parse_tokens(&["x[7:4]=0x10"], Width::W8),
        Err(Error::ValueOutOfRange { value: 16, bits: 4 })
    );
}

#[test]
fn test_overlapping_fields() {
    assert_matches!(
        parse_tokens(&["a[3:0]", "b[2]"], Width::W8),
        Err(Error::FieldOverlap { .. })
    );
}

#[test]
fn test_fields_ordered_most_significant_first() {
    let set = parse_tokens(&["Rd[4:0]", "sf[31]", "Rn[9:5]"], Width::W32).unwrap();
    let names: Vec<_> = set
        .fields()
        .iter()
        .map(|f| f.name.clone().unwrap())
        .collect();
    assert_eq!(names, ["sf", "Rn", "Rd"]);
}
