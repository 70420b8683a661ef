use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use nom::character::complete::digit1;
use nom::combinator::map_res;
use nom::{Finish, IResult, Parser};

pub fn base10_numeric<N>(input: &str) -> IResult<&str, N>
where
    N: FromStr,
{
    map_res(digit1, |s| N::from_str(s)).parse(input)
}

pub fn nom_error_to_owned<I>(e: nom::error::Error<&I>) -> nom::error::Error<I::Owned>
where
    I: ToOwned + ?Sized,
    I::Owned: 'static,
{
    let nom::error::Error { input, code } = e;
    nom::error::Error {
        input: input.to_owned(),
        code,
    }
}

// Lifetime hacks to make the `?` operator usable with nom results.
//
// This was more work than just pattern matching it.
pub fn nom_parse_to_owned<I, O, P>(
    mut parser: P,
    input: &I,
) -> Result<O, nom::error::Error<I::Owned>>
where
    I: ToOwned + ?Sized,
    I::Owned: 'static,
    P: for<'i> Parser<&'i I, O, nom::error::Error<&'i I>>,
{
    match parser.parse(input).finish() {
        Ok((_i, o)) => Ok(o),
        Err(e) => Err(nom_error_to_owned(e)),
    }
}

#[derive(Debug)]
pub enum InputError {
    Io(std::io::Error),
    Parse(nom::error::Error<String>),
}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> InputError {
        InputError::Io(e)
    }
}

impl From<nom::error::Error<String>> for InputError {
    fn from(e: nom::error::Error<String>) -> InputError {
        InputError::Parse(e)
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InputError::Io(e) => write!(fmt, "reading input: {}", e),
            InputError::Parse(e) => {
                // The remaining input can be the entire file, only show where it went wrong.
                let context = e.input.lines().next().unwrap_or_default();
                write!(fmt, "parse error ({:?}) at {:?}", e.code, context)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(e) => Some(e),
            InputError::Parse(_) => None,
        }
    }
}

/// Reads the whole puzzle input from `path`, or from stdin when there isn't one.
pub fn read_input(path: Option<&Path>) -> Result<String, InputError> {
    let buffer = match path {
        Some(path) => {
            log::debug!("reading input from {}", path.display());
            std::fs::read_to_string(path)?
        }
        None => {
            log::debug!("reading input from stdin");
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    Ok(buffer)
}

pub fn read_and_parse<O, P>(path: Option<&Path>, parser: P) -> Result<O, InputError>
where
    P: for<'i> Parser<&'i str, O, nom::error::Error<&'i str>>,
{
    let input = read_input(path)?;
    Ok(nom_parse_to_owned(parser, input.as_str())?)
}
