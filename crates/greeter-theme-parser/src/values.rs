//! Attribute value grammar.
//!
//! Numbers are locale-independent decimals; a trailing `%` selects
//! percentage mode. Every failure is reported as `BadSpec` carrying the
//! attribute name and its original text.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, map, opt, value},
    number::complete::double,
    sequence::pair,
    IResult,
};

use greeter_theme_core::{Extent, Offset, ParseError, Rgba, ShowModes};

/// A decimal number optionally followed by `%`.
fn number_or_percent(input: &str) -> IResult<&str, (f64, bool)> {
    pair(double, map(opt(char('%')), |p| p.is_some()))(input)
}

fn size_keyword(input: &str) -> IResult<&str, Extent> {
    alt((value(Extent::Box, tag("box")), value(Extent::Scale, tag("scale"))))(input)
}

fn finite(attribute: &str, text: &str, v: f64) -> Result<f64, ParseError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseError::bad_spec(attribute, text))
    }
}

/// Parse a plain decimal number.
pub fn number(attribute: &str, text: &str) -> Result<f64, ParseError> {
    let (_, v) = all_consuming(double)(text.trim())
        .map_err(|_: nom::Err<nom::error::Error<&str>>| ParseError::bad_spec(attribute, text))?;
    finite(attribute, text, v)
}

/// Parse a non-negative pixel count (spacing, padding, minimums).
pub fn pixels(attribute: &str, text: &str) -> Result<i32, ParseError> {
    Ok(number(attribute, text)?.max(0.0).round() as i32)
}

/// Parse an `x`/`y` position value.
pub fn offset(attribute: &str, text: &str) -> Result<Offset, ParseError> {
    let (_, (v, percent)) = all_consuming(number_or_percent)(text.trim())
        .map_err(|_: nom::Err<nom::error::Error<&str>>| ParseError::bad_spec(attribute, text))?;
    let v = finite(attribute, text, v)?;
    Ok(if percent { Offset::percent(v) } else { Offset::pixels(v) })
}

/// Parse a `width`/`height` value: pixels, percentage, `box` or `scale`.
pub fn extent(attribute: &str, text: &str) -> Result<Extent, ParseError> {
    let trimmed = text.trim();
    if let Ok((_, keyword)) = all_consuming(size_keyword)(trimmed) {
        return Ok(keyword);
    }
    let (_, (v, percent)) = all_consuming(number_or_percent)(trimmed)
        .map_err(|_: nom::Err<nom::error::Error<&str>>| ParseError::bad_spec(attribute, text))?;
    let v = finite(attribute, text, v)?;
    Ok(if percent { Extent::Percent(v) } else { Extent::Pixels(v) })
}

/// Parse a `#RRGGBB` color.
pub fn color(attribute: &str, text: &str) -> Result<Rgba, ParseError> {
    Rgba::from_hex(text).ok_or_else(|| ParseError::bad_spec(attribute, text))
}

/// Parse an alpha value; out-of-range values are clamped later.
pub fn alpha(attribute: &str, text: &str) -> Result<f64, ParseError> {
    number(attribute, text)
}

pub fn boolean(attribute: &str, text: &str) -> Result<bool, ParseError> {
    match text.trim() {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        _ => Err(ParseError::bad_spec(attribute, text)),
    }
}

/// Parse a comma-separated list of show mode keywords.
pub fn show_modes(attribute: &str, text: &str) -> Result<ShowModes, ParseError> {
    text.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .try_fold(ShowModes::NOWHERE, |acc, name| {
            ShowModes::from_name(name)
                .map(|m| acc.union(m))
                .ok_or_else(|| ParseError::bad_spec(attribute, text))
        })
}
