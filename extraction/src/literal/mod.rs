//! Parsing of the Python-style literal values that CASA prints as parameter defaults.
//!
//! Only strings, booleans, integers, floats and (possibly nested) lists are accepted as values.
//! `None`, tuples, dicts and sets are recognised so that they can be reported as unsupported
//! types rather than as syntax errors. Nothing is ever evaluated.


use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, not, opt},
    error::{Error, ErrorKind},
    multi::{separated_list0, separated_list1},
    number::complete::recognize_float,
    sequence::{delimited, preceded, separated_pair, terminated},
};
use serde::{Deserialize, Serialize};

use crate::description::DType;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LiteralError {
    #[error("{text:?} is not a literal value")]
    Syntax { text: String },
    #[error("{text:?} is a literal of unsupported type {type_name}")]
    UnsupportedType {
        type_name: &'static str,
        text: String,
    },
}

/// Typed default value of a parameter.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<LiteralValue>),
}

impl LiteralValue {
    /// Type tag inferred from the value.
    pub fn dtype(&self) -> DType {
        use LiteralValue::*;
        match self {
            Bool(_) => DType::Bool,
            Int(_) => DType::Int,
            Float(_) => DType::Float,
            Str(_) => DType::Str,
            List(_) => DType::List,
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

/// Parses `text` as a single literal value, surrounded by optional whitespace.
pub fn parse_literal(text: &str) -> Result<LiteralValue, LiteralError> {
    let parsed = match all_consuming(literal).parse(text) {
        Ok((_, parsed)) => parsed,
        Err(_) => {
            return Err(LiteralError::Syntax {
                text: text.to_owned(),
            });
        }
    };

    parsed
        .into_value()
        .map_err(|type_name| LiteralError::UnsupportedType {
            type_name,
            text: text.to_owned(),
        })
}

/// Syntax tree of anything [literal] recognises, including the unsupported types.
#[derive(Debug)]
enum Parsed {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Parsed>),
    None,
    Tuple,
    Dict,
    Set,
}

impl Parsed {
    /// Converts to a [LiteralValue], or returns the name of the offending unsupported type.
    fn into_value(self) -> Result<LiteralValue, &'static str> {
        Ok(match self {
            Parsed::Bool(v) => LiteralValue::Bool(v),
            Parsed::Int(v) => LiteralValue::Int(v),
            Parsed::Float(v) => LiteralValue::Float(v),
            Parsed::Str(v) => LiteralValue::Str(v),
            Parsed::List(items) => LiteralValue::List(
                items
                    .into_iter()
                    .map(Parsed::into_value)
                    .collect::<Result<_, _>>()?,
            ),
            Parsed::None => return Err("NoneType"),
            Parsed::Tuple => return Err("tuple"),
            Parsed::Dict => return Err("dict"),
            Parsed::Set => return Err("set"),
        })
    }
}

fn nom_error(input: &str, kind: ErrorKind) -> nom::Err<Error<&str>> {
    nom::Err::Error(Error::new(input, kind))
}

/// Any literal, consuming surrounding whitespace.
fn literal(input: &str) -> IResult<&str, Parsed> {
    delimited(
        multispace0,
        alt((
            map(quoted, Parsed::Str),
            number,
            map(keyword("True"), |_| Parsed::Bool(true)),
            map(keyword("False"), |_| Parsed::Bool(false)),
            map(keyword("None"), |_| Parsed::None),
            list,
            parenthesised,
            braced,
        )),
        multispace0,
    )
    .parse(input)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Matches `word` only when it is not the prefix of a longer identifier.
fn keyword<'a>(
    word: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = Error<&'a str>> {
    terminated(tag(word), not(take_while1(is_ident_char)))
}

/// Single or double quoted string with backslash escapes.
fn quoted(input: &str) -> IResult<&str, String> {
    let mut chars = input.char_indices();
    let quote = match chars.next() {
        Some((_, q @ ('\'' | '"'))) => q,
        _ => return Err(nom_error(input, ErrorKind::Char)),
    };

    let mut out = String::new();
    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, '0')) => out.push('\0'),
                Some((_, escaped @ ('\\' | '\'' | '"'))) => out.push(escaped),
                // Unknown escapes are kept verbatim.
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => break,
            },
            c if c == quote => return Ok((&input[idx + c.len_utf8()..], out)),
            '\n' => break,
            c => out.push(c),
        }
    }

    Err(nom_error(input, ErrorKind::Char))
}

/// Integer or float, with optional sign, fraction and exponent. Integers too large for `i64`
/// become floats.
fn number(input: &str) -> IResult<&str, Parsed> {
    let recognized: IResult<&str, &str> = recognize_float(input);
    let (rest, text) = recognized?;

    let parsed = if text.contains(['.', 'e', 'E']) {
        text.parse().ok().map(Parsed::Float)
    } else {
        text.parse()
            .map(Parsed::Int)
            .or_else(|_| text.parse().map(Parsed::Float))
            .ok()
    };

    match parsed {
        Some(parsed) => Ok((rest, parsed)),
        None => Err(nom_error(input, ErrorKind::Float)),
    }
}

/// Comma separated literals, returning whether a trailing comma was present.
fn items(input: &str) -> IResult<&str, (Vec<Parsed>, bool)> {
    let (input, items) = separated_list0(comma, literal).parse(input)?;
    if items.is_empty() {
        return Ok((input.trim_start(), (items, false)));
    }
    let (input, trailing) = opt(comma).parse(input)?;
    Ok((input.trim_start(), (items, trailing.is_some())))
}

fn comma(input: &str) -> IResult<&str, char> {
    char(',').parse(input)
}

fn list(input: &str) -> IResult<&str, Parsed> {
    map(delimited(char('['), items, char(']')), |(items, _)| {
        Parsed::List(items)
    })
    .parse(input)
}

/// A parenthesised value, or a tuple.
fn parenthesised(input: &str) -> IResult<&str, Parsed> {
    map(
        delimited(char('('), items, char(')')),
        |(mut items, trailing)| {
            if items.len() == 1 && !trailing {
                items.remove(0)
            } else {
                Parsed::Tuple
            }
        },
    )
    .parse(input)
}

/// A dict or a set.
fn braced(input: &str) -> IResult<&str, Parsed> {
    delimited(
        char('{'),
        alt((
            map(
                terminated(
                    separated_list1(comma, separated_pair(literal, char(':'), literal)),
                    opt(comma),
                ),
                |_| Parsed::Dict,
            ),
            map(items, |(items, _)| {
                if items.is_empty() {
                    Parsed::Dict
                } else {
                    Parsed::Set
                }
            }),
        )),
        preceded(multispace0, char('}')),
    )
    .parse(input)
}
