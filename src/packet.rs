//! Nested numeric lists as sent by the distress signal, and the ordering between them.
//!
//! Values are read by a bracket scanner with an explicit stack of open lists. Comparing and
//! dropping values still recurse, so `parse` refuses anything nested deeper than [`MAX_DEPTH`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

/// How many lists may be open at once while parsing.
pub const MAX_DEPTH: usize = 256;

/// A packet value.
///
/// `PartialEq` is structural. There's deliberately no `Ord`: [`compare`] treats `5` and `[5]` as
/// equal even though they aren't the same value, so it's only a preorder.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Value {
    Integer(i64),
    List(Vec<Value>),
}

use Value::*;

impl Value {
    pub fn compare(&self, other: &Value) -> Ordering {
        compare(self, other)
    }

    // Lets an integer stand in for a single element list without allocating one.
    fn as_slice(&self) -> &[Value] {
        match self {
            List(items) => items,
            integer @ Integer(_) => std::slice::from_ref(integer),
        }
    }
}

/// Orders two values: integers numerically, lists element by element with the shorter list
/// first, and an integer against a list as if it were a list of just that integer.
pub fn compare(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Integer(left), Integer(right)) => left.cmp(right),
        (left, right) => compare_lists(left.as_slice(), right.as_slice()),
    }
}

fn compare_lists(left: &[Value], right: &[Value]) -> Ordering {
    let mut right_iter = right.iter();

    for l in left {
        match right_iter.next() {
            // Right ran out of values first.
            None => return Ordering::Greater,
            Some(r) => match compare(l, r) {
                Ordering::Equal => {}
                decided => return decided,
            },
        }
    }

    if right_iter.next().is_some() {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

impl fmt::Display for Value {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Integer(n) => write!(fmt, "{}", n),
            List(items) => write!(fmt, "[{}]", items.iter().join(",")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedInput {
    Empty,
    UnexpectedChar { position: usize, found: char },
    UnexpectedEnd { position: usize },
    IntegerOutOfRange { position: usize },
    TooDeep { position: usize },
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MalformedInput::Empty => fmt.write_str("empty input"),
            MalformedInput::UnexpectedChar { position, found } => {
                write!(fmt, "unexpected {:?} at position {}", found, position)
            }
            MalformedInput::UnexpectedEnd { position } => {
                write!(fmt, "input ends early at position {}", position)
            }
            MalformedInput::IntegerOutOfRange { position } => {
                write!(fmt, "integer at position {} is out of range", position)
            }
            MalformedInput::TooDeep { position } => {
                write!(fmt, "lists nested too deeply at position {}", position)
            }
        }
    }
}

impl std::error::Error for MalformedInput {}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Expect {
    // Start of input, or just after a comma.
    Value,
    // Just after an opening bracket.
    ValueOrClose,
    // Just after an element inside a list.
    CommaOrClose,
    // The outermost value is complete.
    End,
}

/// Parses a single value, e.g. `[1,[2,3],4]`, with no surrounding whitespace.
pub fn parse(text: &str) -> Result<Value, MalformedInput> {
    if text.is_empty() {
        return Err(MalformedInput::Empty);
    }

    let bytes = text.as_bytes();
    let mut frames: Vec<Vec<Value>> = Vec::new();
    let mut result = None;
    let mut expect = Expect::Value;
    let mut cursor = 0;

    let unexpected = |position: usize| MalformedInput::UnexpectedChar {
        position,
        // Safe to slice: every cursor position we stop at follows an ASCII byte.
        found: text[position..].chars().next().unwrap_or_default(),
    };

    while cursor < bytes.len() {
        match (bytes[cursor], expect) {
            (b'[', Expect::Value | Expect::ValueOrClose) => {
                if frames.len() == MAX_DEPTH {
                    return Err(MalformedInput::TooDeep { position: cursor });
                }
                frames.push(Vec::new());
                expect = Expect::ValueOrClose;
                cursor += 1;
            }
            (b']', Expect::ValueOrClose | Expect::CommaOrClose) => {
                let items = frames.pop().ok_or_else(|| unexpected(cursor))?;
                expect = complete(&mut frames, &mut result, List(items));
                cursor += 1;
            }
            (b',', Expect::CommaOrClose) => {
                expect = Expect::Value;
                cursor += 1;
            }
            (b'-' | b'0'..=b'9', Expect::Value | Expect::ValueOrClose) => {
                let start = cursor;
                if bytes[cursor] == b'-' {
                    cursor += 1;
                }
                let digits = bytes[cursor..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if digits == 0 {
                    return Err(match bytes.get(cursor) {
                        Some(_) => unexpected(cursor),
                        None => MalformedInput::UnexpectedEnd { position: cursor },
                    });
                }
                cursor += digits;

                let n = text[start..cursor]
                    .parse()
                    .map_err(|_| MalformedInput::IntegerOutOfRange { position: start })?;
                expect = complete(&mut frames, &mut result, Integer(n));
            }
            _ => return Err(unexpected(cursor)),
        }
    }

    match (expect, result) {
        (Expect::End, Some(value)) => Ok(value),
        _ => Err(MalformedInput::UnexpectedEnd { position: cursor }),
    }
}

// Hands a finished value to the enclosing list, or makes it the result at the outermost level.
fn complete(frames: &mut [Vec<Value>], result: &mut Option<Value>, value: Value) -> Expect {
    match frames.last_mut() {
        Some(parent) => {
            parent.push(value);
            Expect::CommaOrClose
        }
        None => {
            *result = Some(value);
            Expect::End
        }
    }
}

impl FromStr for Value {
    type Err = MalformedInput;

    fn from_str(s: &str) -> Result<Value, MalformedInput> {
        parse(s)
    }
}

/// A value that is known to be a list, as every line of the signal is.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Packet {
    data: Value,
}

impl Packet {
    /// Returns `None` for a bare integer.
    pub fn new(data: Value) -> Option<Packet> {
        match data {
            List(_) => Some(Packet { data }),
            Integer(_) => None,
        }
    }

    /// `[[n]]`
    pub fn divider(n: i64) -> Packet {
        Packet {
            data: List(vec![List(vec![Integer(n)])]),
        }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn compare(&self, other: &Packet) -> Ordering {
        compare(&self.data, &other.data)
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.data, fmt)
    }
}
