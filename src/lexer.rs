// Shared nom building blocks

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not},
    character::complete::{char, multispace0},
    combinator::{map, value},
    sequence::delimited,
    IResult,
};

/// Wrap a parser so it skips surrounding whitespace
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse a double- or single-quoted string with backslash escapes
pub fn string_literal(input: &str) -> IResult<&str, String> {
    alt((double_quoted, single_quoted))(input)
}

fn double_quoted(input: &str) -> IResult<&str, String> {
    quoted(input, '"', "\"\\")
}

fn single_quoted(input: &str) -> IResult<&str, String> {
    quoted(input, '\'', "'\\")
}

fn quoted<'a>(input: &'a str, quote: char, stop: &'static str) -> IResult<&'a str, String> {
    let (input, _) = char(quote)(input)?;

    // escaped_transform rejects an empty body
    if let Some(rest) = input.strip_prefix(quote) {
        return Ok((rest, String::new()));
    }

    let (input, body) = escaped_transform(
        is_not(stop),
        '\\',
        alt((
            value("\\", char('\\')),
            value("\"", char('"')),
            value("'", char('\'')),
            value("\n", char('n')),
            value("\t", char('t')),
        )),
    )(input)?;
    let (input, _) = char(quote)(input)?;
    Ok((input, body))
}

/// Parse an unquoted atom: everything up to a list delimiter or quote, trimmed
pub fn bare_atom(input: &str) -> IResult<&str, String> {
    map(is_not(",[]\"'"), |s: &str| s.trim().to_string())(input)
}
