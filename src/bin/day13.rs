use clap::Parser;

use handheld::cli::{init_logging, InputArgs};
use handheld::parser::read_input;
use handheld::signal::{decoder_key, ordered_index_sum, parse_pairs};

/// Distress signal: pairs of packets in the right order, and the decoder key.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    #[command(flatten)]
    input: InputArgs,
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    let input = read_input(args.input.path())?;
    let pairs = parse_pairs(&input)?;

    println!("{}", ordered_index_sum(&pairs));
    println!("{}", decoder_key(&pairs));

    Ok(())
}
