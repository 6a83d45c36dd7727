// List literals for command-line style and column arguments
//
//   --x '[["SOC-Chg","SOC-Dis"], SOC]'
//   --color '[[violet, lightcoral], darkorchid]'

use crate::lexer::{bare_atom, string_literal, ws};
use crate::series::SeriesSpec;
use crate::style::{Slot, StyleArg};
use anyhow::{anyhow, bail, Result};
use nom::{
    branch::alt,
    character::complete::char,
    combinator::{all_consuming, map},
    multi::separated_list0,
    sequence::delimited,
    IResult,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Bare `None` or `null`
    Null,
    Atom(String),
    List(Vec<Literal>),
}

fn list(input: &str) -> IResult<&str, Literal> {
    map(
        delimited(
            ws(char('[')),
            separated_list0(ws(char(',')), literal),
            ws(char(']')),
        ),
        Literal::List,
    )(input)
}

fn atom(input: &str) -> IResult<&str, Literal> {
    alt((
        map(string_literal, Literal::Atom),
        map(bare_atom, |s| match s.as_str() {
            "None" | "null" => Literal::Null,
            _ => Literal::Atom(s),
        }),
    ))(input)
}

fn literal(input: &str) -> IResult<&str, Literal> {
    ws(alt((list, atom)))(input)
}

/// Parse a complete literal; trailing input is an error.
pub fn parse_literal(input: &str) -> Result<Literal> {
    all_consuming(literal)(input)
        .map(|(_, lit)| lit)
        .map_err(|e| anyhow!("Invalid list literal '{}': {:?}", input, e))
}

impl Literal {
    fn into_atom(self, what: &str) -> Result<String> {
        match self {
            Literal::Atom(s) => Ok(s),
            Literal::Null => bail!("{} cannot be None", what),
            Literal::List(_) => bail!("{} is nested too deeply", what),
        }
    }

    /// Per-dataset column specs. A lone atom is one dataset's single column.
    pub fn into_series(self) -> Result<Vec<SeriesSpec>> {
        match self {
            Literal::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Literal::List(cols) => cols
                        .into_iter()
                        .map(|c| c.into_atom("column name"))
                        .collect::<Result<Vec<_>>>()
                        .map(SeriesSpec::Multi),
                    other => other.into_atom("column name").map(SeriesSpec::Single),
                })
                .collect(),
            other => Ok(vec![SeriesSpec::Single(other.into_atom("column name")?)]),
        }
    }

    /// Style argument in any of the accepted shapes.
    pub fn into_style<T>(self) -> Result<StyleArg<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self {
            Literal::Null => Ok(StyleArg::Absent),
            Literal::Atom(s) => Ok(StyleArg::Scalar(parse_value(&s)?)),
            Literal::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Literal::Null => Ok(Slot::Absent),
                    Literal::Atom(s) => Ok(Slot::Scalar(parse_value(&s)?)),
                    Literal::List(values) => values
                        .into_iter()
                        .map(|v| parse_value(&v.into_atom("style value")?))
                        .collect::<Result<Vec<T>>>()
                        .map(Slot::List),
                })
                .collect::<Result<Vec<_>>>()
                .map(StyleArg::PerDataset),
        }
    }
}

fn parse_value<T>(s: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    s.parse::<T>()
        .map_err(|e| anyhow!("Invalid style value '{}': {}", s, e))
}
