//! Low-level nom parser functions for CSS-like style values.
//!
//! These back the serde deserializers used by [`crate::ElementStyle`], so a style document can
//! write `"margin": "10pt 5mm"` as well as the expanded map form.

use crate::dimension::Dimension;
use crate::page::PageSize;
use folio_types::Thickness;
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit0, digit1, space1};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::pair;
use nom::{IResult, Parser};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize((digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        value(1.0, tag_no_case("pt")),
        value(1.0, tag_no_case("px")),
        value(72.0, tag_no_case("in")),
        value(28.35, tag_no_case("cm")),
        value(2.835, tag_no_case("mm")),
    ))
    .parse(input)
}

/// Parses a length value with optional unit (e.g., "12pt", "1in", "10mm"). Bare numbers are points.
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    map(pair(parse_f32, opt(parse_unit)), |(v, unit)| {
        v * unit.unwrap_or(1.0)
    })
    .parse(input)
}

/// Parses a dimension value (length, percentage, or "auto").
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    alt((
        value(Dimension::Auto, tag_no_case("auto")),
        map(pair(parse_f32, char('%')), |(v, _)| Dimension::Percent(v)),
        map(parse_length, Dimension::Pt),
    ))
    .parse(input)
}

/// Parses CSS edge shorthand with 1, 2, 3 or 4 lengths.
pub fn parse_thickness(input: &str) -> Result<Thickness, StyleParseError> {
    let parts = run_parser(
        |i| separated_list1(space1, parse_length).parse(i),
        input,
    )?;
    match parts.as_slice() {
        [all] => Ok(Thickness::uniform(*all)),
        [v, h] => Ok(Thickness::new(*v, *h, *v, *h)),
        [t, h, b] => Ok(Thickness::new(*t, *h, *b, *h)),
        [t, r, b, l] => Ok(Thickness::new(*t, *r, *b, *l)),
        _ => Err(StyleParseError::Parse(format!(
            "expected 1 to 4 lengths in '{}', got {}",
            input,
            parts.len()
        ))),
    }
}

/// Parses a named page size.
pub fn parse_page_size(input: &str) -> Result<PageSize, StyleParseError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "a4" => Ok(PageSize::A4),
        "a5" => Ok(PageSize::A5),
        "letter" => Ok(PageSize::Letter),
        "legal" => Ok(PageSize::Legal),
        other => Err(StyleParseError::InvalidValue {
            property: "page-size".to_string(),
            value: other.to_string(),
        }),
    }
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Fn(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "unexpected trailing input '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthDef {
    Num(f32),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThicknessDef {
    Num(f32),
    Str(String),
    Map(Thickness),
}

/// Deserializes an optional length from a number or a unit string.
pub fn deserialize_length<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LengthDef>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LengthDef::Num(v)) => Ok(Some(v)),
        Some(LengthDef::Str(s)) => run_parser(parse_length, &s)
            .map(Some)
            .map_err(de::Error::custom),
    }
}

/// Deserializes an optional dimension from a number, "auto", a percentage or a unit string.
pub fn deserialize_dimension<'de, D>(deserializer: D) -> Result<Option<Dimension>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LengthDef>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LengthDef::Num(v)) => Ok(Some(Dimension::Pt(v))),
        Some(LengthDef::Str(s)) => run_parser(parse_dimension, &s)
            .map(Some)
            .map_err(de::Error::custom),
    }
}

/// Deserializes an optional edge thickness from a number, a shorthand string or a map.
pub fn deserialize_thickness<'de, D>(deserializer: D) -> Result<Option<Thickness>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<ThicknessDef>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ThicknessDef::Num(v)) => Ok(Some(Thickness::uniform(v))),
        Some(ThicknessDef::Str(s)) => parse_thickness(&s).map(Some).map_err(de::Error::custom),
        Some(ThicknessDef::Map(t)) => Ok(Some(t)),
    }
}
