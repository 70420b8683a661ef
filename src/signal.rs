//! Decoding the distress signal: pairs of packets, which of them are in the right order, and the
//! decoder key.

use itertools::Itertools;

use crate::packet::{self, MalformedInput, Packet};

/// The two extra packets which are sorted in with the received ones, as `[[2]]` and `[[6]]`.
pub const DIVIDERS: [i64; 2] = [2, 6];

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PacketPair {
    /// 1-based, in input order.
    pub index: usize,
    pub left: Packet,
    pub right: Packet,
}

impl PacketPair {
    pub fn is_ordered(&self) -> bool {
        self.left.compare(&self.right).is_lt()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    Empty,
    /// A block with a left packet but no right one.
    IncompleteBlock { pair: usize },
    MissingSeparator { line: usize },
    NotAList { line: usize },
    Malformed { line: usize, source: MalformedInput },
}

impl std::fmt::Display for SignalError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SignalError::Empty => fmt.write_str("no packets in input"),
            SignalError::IncompleteBlock { pair } => {
                write!(fmt, "pair {} is missing its right packet", pair)
            }
            SignalError::MissingSeparator { line } => {
                write!(fmt, "expected a blank line on line {}", line)
            }
            SignalError::NotAList { line } => {
                write!(fmt, "packet on line {} is not a list", line)
            }
            SignalError::Malformed { line, source } => {
                write!(fmt, "malformed packet on line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for SignalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignalError::Malformed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Splits the input into blocks of left packet, right packet and a blank line. The last block
/// doesn't need its blank line.
pub fn parse_pairs(input: &str) -> Result<Vec<PacketPair>, SignalError> {
    let lines = input.lines().collect::<Vec<_>>();
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |i| i + 1);

    if end == 0 {
        return Err(SignalError::Empty);
    }

    let pairs = lines[..end]
        .iter()
        .copied()
        .enumerate()
        // Line numbers for error messages are 1-based.
        .map(|(i, line)| (i + 1, line))
        .chunks(3)
        .into_iter()
        .enumerate()
        .map(|(i, block)| pair_from_block(i + 1, &block.collect::<Vec<_>>()))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("parsed {} packet pairs", pairs.len());

    Ok(pairs)
}

fn pair_from_block(index: usize, block: &[(usize, &str)]) -> Result<PacketPair, SignalError> {
    let (left, right) = match block {
        [left, right] => (left, right),
        [left, right, (_, separator)] if separator.trim().is_empty() => (left, right),
        [_, _, (line, _)] => return Err(SignalError::MissingSeparator { line: *line }),
        _ => return Err(SignalError::IncompleteBlock { pair: index }),
    };

    Ok(PacketPair {
        index,
        left: packet_on_line(*left)?,
        right: packet_on_line(*right)?,
    })
}

fn packet_on_line((line, text): (usize, &str)) -> Result<Packet, SignalError> {
    let value = packet::parse(text).map_err(|source| SignalError::Malformed { line, source })?;
    Packet::new(value).ok_or(SignalError::NotAList { line })
}

/// Sum of the indices of the pairs that are already in the right order.
pub fn ordered_index_sum(pairs: &[PacketPair]) -> usize {
    pairs
        .iter()
        .filter(|pair| {
            let ordered = pair.is_ordered();
            log::trace!(
                "pair {}: {} vs {} ordered: {}",
                pair.index,
                pair.left,
                pair.right,
                ordered
            );
            ordered
        })
        .map(|pair| pair.index)
        .sum()
}

/// Sorts every packet together with the dividers and multiplies the dividers' 1-based positions.
pub fn decoder_key(pairs: &[PacketPair]) -> usize {
    let dividers = DIVIDERS.map(Packet::divider);

    // Dividers are told apart by the flag rather than by value, the input may contain a copy.
    let mut packets = pairs
        .iter()
        .flat_map(|pair| [&pair.left, &pair.right])
        .map(|packet| (false, packet))
        .chain(dividers.iter().map(|divider| (true, divider)))
        .collect::<Vec<_>>();

    // Must be a stable sort, packets which compare equal keep their input order.
    packets.sort_by(|(_, a), (_, b)| a.compare(b));

    packets
        .iter()
        .enumerate()
        .filter(|(_, (is_divider, _))| *is_divider)
        .map(|(i, (_, divider))| {
            log::debug!("divider {} sorted to position {}", divider, i + 1);
            i + 1
        })
        .product()
}
