//! Monkeys playing keep away with our things.
//!
//! Each monkey's worry operation is plain data interpreted by [`Operation::apply`].

use itertools::Itertools;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Item {
    pub worry: u64,
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Monkey {
    pub items: Vec<Item>,
    pub operation: Operation,
    pub action: ThrowAction,
}

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Copy)]
pub struct MonkeyId(pub u64);

impl std::fmt::Display for MonkeyId {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "monkey {}", self.0)
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Operand {
    Old,
    Const(u64),
}

impl Operand {
    fn resolve(self, old: u64) -> u64 {
        match self {
            Operand::Old => old,
            Operand::Const(n) => n,
        }
    }
}

/// How a monkey changes the worry level of an item it inspects. The left hand side is always the
/// old worry level.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Operation {
    Add(Operand),
    Multiply(Operand),
    NoOp,
}

impl Operation {
    /// `None` on overflow.
    pub fn apply(&self, old: u64) -> Option<u64> {
        match *self {
            Operation::Add(operand) => old.checked_add(operand.resolve(old)),
            Operation::Multiply(operand) => old.checked_mul(operand.resolve(old)),
            Operation::NoOp => Some(old),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Test {
    DivisibleBy(u64),
}

impl Test {
    fn divisor(&self) -> u64 {
        match *self {
            Test::DivisibleBy(n) => n,
        }
    }

    fn passes(&self, worry: u64) -> bool {
        match *self {
            Test::DivisibleBy(n) => worry % n == 0,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct ThrowAction {
    pub test: Test,
    pub true_target: MonkeyId,
    pub false_target: MonkeyId,
}

impl ThrowAction {
    fn target(&self, worry: u64) -> MonkeyId {
        if self.test.passes(worry) {
            self.true_target
        } else {
            self.false_target
        }
    }

    fn targets(&self) -> [MonkeyId; 2] {
        [self.true_target, self.false_target]
    }
}

/// What happens to the worry level after the monkey loses interest in an item.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Relief {
    /// Divide and round down, we're relieved the item wasn't damaged.
    Divide(u64),
    /// Keep worry levels manageable without changing the outcome of any divisibility test, given
    /// a common multiple of all of the tests' divisors.
    Modulo(u64),
}

impl Relief {
    pub fn apply(&self, worry: u64) -> Option<u64> {
        match *self {
            Relief::Divide(n) => worry.checked_div(n),
            Relief::Modulo(m) => worry.checked_rem(m),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonkeyError {
    NonContiguousIds { expected: MonkeyId, found: MonkeyId },
    UnknownTarget { monkey: MonkeyId, target: MonkeyId },
    ThrowsToSelf { monkey: MonkeyId },
    ZeroDivisor { monkey: MonkeyId },
    InvalidRelief(Relief),
    ModulusOverflow,
    WorryOverflow { monkey: MonkeyId, round: usize },
    BusinessOverflow,
}

impl std::fmt::Display for MonkeyError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MonkeyError::NonContiguousIds { expected, found } => {
                write!(fmt, "expected {} but found {}", expected, found)
            }
            MonkeyError::UnknownTarget { monkey, target } => {
                write!(fmt, "{} throws to unknown {}", monkey, target)
            }
            MonkeyError::ThrowsToSelf { monkey } => write!(fmt, "{} throws to itself", monkey),
            MonkeyError::ZeroDivisor { monkey } => {
                write!(fmt, "{} tests divisibility by zero", monkey)
            }
            MonkeyError::InvalidRelief(relief) => write!(fmt, "invalid relief {:?}", relief),
            MonkeyError::ModulusOverflow => {
                fmt.write_str("common multiple of the test divisors overflows")
            }
            MonkeyError::WorryOverflow { monkey, round } => {
                write!(fmt, "worry level overflows at {} in round {}", monkey, round)
            }
            MonkeyError::BusinessOverflow => fmt.write_str("monkey business overflows"),
        }
    }
}

impl std::error::Error for MonkeyError {}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct Troop {
    // Indexed by id.
    monkeys: Vec<Monkey>,
}

impl Troop {
    /// Monkeys must be numbered 0, 1, 2... in input order, and only throw to each other.
    pub fn new(monkeys: Vec<(MonkeyId, Monkey)>) -> Result<Troop, MonkeyError> {
        let n = monkeys.len() as u64;

        for (expected, (id, monkey)) in (0..).map(MonkeyId).zip(&monkeys) {
            if *id != expected {
                return Err(MonkeyError::NonContiguousIds {
                    expected,
                    found: *id,
                });
            }
            if monkey.action.test.divisor() == 0 {
                return Err(MonkeyError::ZeroDivisor { monkey: *id });
            }
            for target in monkey.action.targets() {
                if target == *id {
                    return Err(MonkeyError::ThrowsToSelf { monkey: *id });
                }
                if target.0 >= n {
                    return Err(MonkeyError::UnknownTarget {
                        monkey: *id,
                        target,
                    });
                }
            }
        }

        Ok(Troop {
            monkeys: monkeys.into_iter().map(|(_, monkey)| monkey).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.monkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monkeys.is_empty()
    }

    /// Least common multiple of every monkey's divisibility test.
    pub fn shared_modulus(&self) -> Result<u64, MonkeyError> {
        self.monkeys
            .iter()
            .map(|monkey| monkey.action.test.divisor())
            .try_fold(1, |acc: u64, n| (acc / gcd(acc, n)).checked_mul(n))
            .ok_or(MonkeyError::ModulusOverflow)
    }

    /// Plays `rounds` rounds from the starting items and returns how many items each monkey
    /// inspected, by id.
    pub fn simulate(&self, rounds: usize, relief: Relief) -> Result<Vec<u64>, MonkeyError> {
        if let Relief::Divide(0) | Relief::Modulo(0) = relief {
            return Err(MonkeyError::InvalidRelief(relief));
        }

        let mut holding = self
            .monkeys
            .iter()
            .map(|monkey| monkey.items.iter().map(|item| item.worry).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let mut inspections = vec![0; self.monkeys.len()];

        for round in 1..=rounds {
            for (i, monkey) in self.monkeys.iter().enumerate() {
                let items = std::mem::take(&mut holding[i]);
                inspections[i] += items.len() as u64;

                for worry in items {
                    let worry = monkey
                        .operation
                        .apply(worry)
                        .ok_or(MonkeyError::WorryOverflow {
                            monkey: MonkeyId(i as u64),
                            round,
                        })?;
                    let worry = relief
                        .apply(worry)
                        .ok_or(MonkeyError::InvalidRelief(relief))?;

                    // Targets were checked in `Troop::new`.
                    let MonkeyId(target) = monkey.action.target(worry);
                    holding[target as usize].push(worry);
                }
            }

            log::trace!("after round {}: {:?}", round, holding);
        }

        log::debug!(
            "{} rounds with {:?}: inspections {:?}",
            rounds,
            relief,
            inspections
        );

        Ok(inspections)
    }
}

/// The product of the two highest inspection counts.
pub fn monkey_business(inspections: &[u64]) -> Result<u64, MonkeyError> {
    inspections
        .iter()
        .sorted_by(|a, b| b.cmp(a))
        .take(2)
        .try_fold(1, |acc: u64, &n| acc.checked_mul(n))
        .ok_or(MonkeyError::BusinessOverflow)
}

pub mod parser {
    use super::*;

    use crate::parser::base10_numeric;

    use nom::branch::alt;
    use nom::bytes::complete::tag;
    use nom::character::complete::{line_ending, multispace0, space0, space1};
    use nom::combinator::{eof, opt, success, value};
    use nom::multi::{many0, many1, separated_list0, separated_list1};
    use nom::sequence::{delimited, preceded, separated_pair, terminated, tuple};
    use nom::{IResult, Parser};

    fn field_label(caption: &str) -> impl Parser<&str, (), nom::error::Error<&str>> {
        value((), tuple((space0, tag(caption), tag(":"), space0)))
    }

    fn monkey_id(input: &str) -> IResult<&str, MonkeyId> {
        base10_numeric.map(MonkeyId).parse(input)
    }

    fn monkey_header(input: &str) -> IResult<&str, MonkeyId> {
        delimited(tuple((space0, tag("Monkey"), space1)), monkey_id, tag(":")).parse(input)
    }

    fn items(input: &str) -> IResult<&str, Vec<Item>> {
        preceded(
            field_label("Starting items"),
            separated_list0(
                tuple((tag(","), space0)),
                base10_numeric.map(|worry| Item { worry }),
            ),
        )
        .parse(input)
    }

    fn operand(input: &str) -> IResult<&str, Operand> {
        alt((
            tag("old").map(|_| Operand::Old),
            base10_numeric.map(Operand::Const),
        ))
        .parse(input)
    }

    fn operator<'a>(symbol: &'a str) -> impl Parser<&'a str, Operand, nom::error::Error<&'a str>> {
        preceded(tuple((space0, tag(symbol), space0)), operand)
    }

    fn operation(input: &str) -> IResult<&str, Operation> {
        preceded(
            tuple((
                field_label("Operation"),
                terminated(tag("new"), space0),
                terminated(tag("="), space0),
                tag("old"),
            )),
            terminated(
                alt((
                    operator("+").map(Operation::Add),
                    operator("*").map(Operation::Multiply),
                    success(Operation::NoOp),
                )),
                space0,
            ),
        )
        .parse(input)
    }

    fn test(input: &str) -> IResult<&str, Test> {
        preceded(
            tuple((field_label("Test"), tag("divisible by"), space1)),
            base10_numeric,
        )
        .map(Test::DivisibleBy)
        .parse(input)
    }

    fn throw_target(input: &str) -> IResult<&str, MonkeyId> {
        preceded(tuple((tag("throw to monkey"), space1)), monkey_id).parse(input)
    }

    fn true_branch(input: &str) -> IResult<&str, MonkeyId> {
        preceded(field_label("If true"), throw_target).parse(input)
    }

    fn false_branch(input: &str) -> IResult<&str, MonkeyId> {
        preceded(field_label("If false"), throw_target).parse(input)
    }

    fn throw_action(input: &str) -> IResult<&str, ThrowAction> {
        tuple((
            terminated(test, line_ending),
            terminated(true_branch, line_ending),
            false_branch,
        ))
        .map(|(test, true_target, false_target)| ThrowAction {
            test,
            true_target,
            false_target,
        })
        .parse(input)
    }

    fn monkey_detail(input: &str) -> IResult<&str, Monkey> {
        tuple((
            terminated(items, line_ending),
            terminated(operation, line_ending),
            // The last monkey in the file might not have a line ending.
            terminated(throw_action, opt(line_ending)),
        ))
        .map(|(items, operation, action)| Monkey {
            items,
            operation,
            action,
        })
        .parse(input)
    }

    fn monkey(input: &str) -> IResult<&str, (MonkeyId, Monkey)> {
        separated_pair(monkey_header, line_ending, monkey_detail).parse(input)
    }

    /// Monkeys in input order. See [`Troop::new`] for the checks which happen afterwards.
    pub fn parse_input(input: &str) -> IResult<&str, Vec<(MonkeyId, Monkey)>> {
        delimited(
            many0(line_ending),
            separated_list1(many1(line_ending), monkey),
            tuple((multispace0, eof)),
        )
        .parse(input)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_operation() {
            let cases = [
                ("Operation: new = old * 19", Operation::Multiply(Operand::Const(19))),
                ("Operation: new = old + 6", Operation::Add(Operand::Const(6))),
                ("Operation: new = old * old", Operation::Multiply(Operand::Old)),
                ("Operation: new = old+old", Operation::Add(Operand::Old)),
                ("Operation: new = old", Operation::NoOp),
            ];

            for (input, expected) in cases {
                assert_eq!(operation(input), Ok(("", expected)), "{}", input);
            }
        }

        #[test]
        fn test_parse_input() {
            let input = r"
                Monkey 0:
                  Starting items: 79, 98
                  Operation: new = old * 19
                  Test: divisible by 23
                    If true: throw to monkey 2
                    If false: throw to monkey 3

                Monkey 1:
                  Starting items: 54, 65, 75, 74
                  Operation: new = old + 6
                  Test: divisible by 19
                    If true: throw to monkey 2
                    If false: throw to monkey 0
            ";

            let expected = vec![
                (
                    MonkeyId(0),
                    Monkey {
                        items: vec![Item { worry: 79 }, Item { worry: 98 }],
                        operation: Operation::Multiply(Operand::Const(19)),
                        action: ThrowAction {
                            test: Test::DivisibleBy(23),
                            true_target: MonkeyId(2),
                            false_target: MonkeyId(3),
                        },
                    },
                ),
                (
                    MonkeyId(1),
                    Monkey {
                        items: vec![
                            Item { worry: 54 },
                            Item { worry: 65 },
                            Item { worry: 75 },
                            Item { worry: 74 },
                        ],
                        operation: Operation::Add(Operand::Const(6)),
                        action: ThrowAction {
                            test: Test::DivisibleBy(19),
                            true_target: MonkeyId(2),
                            false_target: MonkeyId(0),
                        },
                    },
                ),
            ];

            let (_input, monkeys) = parse_input(input).unwrap();
            assert_eq!(monkeys, expected);
        }

        #[test]
        fn test_parse_input_without_trailing_newline() {
            let input = "\
                Monkey 0:\n\
                Starting items:\n\
                Operation: new = old\n\
                Test: divisible by 2\n\
                If true: throw to monkey 1\n\
                If false: throw to monkey 1";

            let (rest, monkeys) = parse_input(input).unwrap();
            assert_eq!(rest, "");
            assert_eq!(monkeys.len(), 1);
            assert_eq!(monkeys[0].1.items, vec![]);
            assert_eq!(monkeys[0].1.operation, Operation::NoOp);
        }

        #[test]
        fn test_parse_input_rejects_subtraction() {
            let input = "\
                Monkey 0:\n\
                Starting items: 1\n\
                Operation: new = old - 3\n\
                Test: divisible by 2\n\
                If true: throw to monkey 1\n\
                If false: throw to monkey 1\n";

            assert!(parse_input(input).is_err());
        }

        #[test]
        fn test_parse_input_rejects_trailing_garbage() {
            let input = "\
                Monkey 0:\n\
                Starting items: 1\n\
                Operation: new = old + 1\n\
                Test: divisible by 2\n\
                If true: throw to monkey 1\n\
                If false: throw to monkey 1\n\
                Monkey business\n";

            assert!(parse_input(input).is_err());
        }
    }
}
