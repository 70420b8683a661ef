use clap::Parser;

use handheld::cli::{init_logging, InputArgs};
use handheld::monkey::{monkey_business, parser::parse_input, Relief, Troop};
use handheld::parser::read_and_parse;

/// Monkey in the middle: how busy the two most active monkeys get.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    #[command(flatten)]
    input: InputArgs,

    /// Rounds to play while worry levels are divided by 3 after every inspection
    #[arg(long, default_value_t = 20)]
    calm_rounds: usize,

    /// Rounds to play once worry levels are no longer divided
    #[arg(long, default_value_t = 10_000)]
    worried_rounds: usize,
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    let troop = Troop::new(read_and_parse(args.input.path(), parse_input)?)?;
    log::debug!("{} monkeys", troop.len());

    let calm = troop.simulate(args.calm_rounds, Relief::Divide(3))?;
    println!("{}", monkey_business(&calm)?);

    let modulus = troop.shared_modulus()?;
    let worried = troop.simulate(args.worried_rounds, Relief::Modulo(modulus))?;
    println!("{}", monkey_business(&worried)?);

    Ok(())
}
