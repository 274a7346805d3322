//! Field spec mini-language parser.
//!
//! Grammar: `[name] "[" hi [":" lo] "]" ["=" value]`, where `value` is a
//! decimal or 0x-prefixed hexadecimal literal. `[hi]` with no colon is a
//! single-bit field with `lo = hi`.

use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while, take_while1};
use nom::character::complete::{char, digit1, hex_digit1};
use nom::combinator::{opt, recognize};
use nom::error::{ErrorKind, FromExternalError, VerboseError};
use nom::sequence::{pair, preceded};
use nom::IResult;

use super::layout::{FieldSet, FieldSpec};
use super::{Error, Width};

#[cfg(test)]
mod tests;

type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

fn identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn index(input: &str) -> PResult<'_, u8> {
    let (input, digits) = digit1(input)?;
    let idx = digits.parse().map_err(|e| {
        nom::Err::Failure(VerboseError::from_external_error(
            input,
            ErrorKind::TooLarge,
            e,
        ))
    })?;
    Ok((input, idx))
}

fn hex_value(input: &str) -> PResult<'_, u64> {
    let (input, digits) = preceded(tag_no_case("0x"), hex_digit1)(input)?;
    let value = u64::from_str_radix(digits, 16).map_err(|e| {
        nom::Err::Failure(VerboseError::from_external_error(
            input,
            ErrorKind::TooLarge,
            e,
        ))
    })?;
    Ok((input, value))
}

fn dec_value(input: &str) -> PResult<'_, u64> {
    let (input, digits) = digit1(input)?;
    let value = digits.parse().map_err(|e| {
        nom::Err::Failure(VerboseError::from_external_error(
            input,
            ErrorKind::TooLarge,
            e,
        ))
    })?;
    Ok((input, value))
}

fn field_spec(input: &str) -> PResult<'_, FieldSpec> {
    let (input, name) = opt(identifier)(input)?;
    let (input, _) = char('[')(input)?;
    let (input, hi) = index(input)?;
    let (input, lo) = opt(preceded(char(':'), index))(input)?;
    let (input, _) = char(']')(input)?;
    let (input, value) = opt(preceded(char('='), alt((hex_value, dec_value))))(input)?;
    Ok((
        input,
        FieldSpec {
            name: name.map(str::to_owned),
            hi,
            lo: lo.unwrap_or(hi),
            value,
        },
    ))
}

/// Parses a single field-spec token.
pub fn parse_field(token: &str) -> Result<FieldSpec, Error> {
    match field_spec(token) {
        Ok(("", field)) => Ok(field),
        _ => Err(Error::MalformedFieldSpec(token.to_owned())),
    }
}

/// Parses a list of field-spec tokens into a validated [`FieldSet`].
pub fn parse(tokens: &[String], width: Width) -> Result<FieldSet, Error> {
    let fields = tokens
        .iter()
        .map(|token| parse_field(token))
        .collect::<Result<Vec<_>, _>>()?;
    FieldSet::new(width, fields)
}
