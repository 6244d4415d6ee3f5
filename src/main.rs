use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::info;

use aoc2018::days;

/// Answers for the 2018 puzzles. Reads `day{DAY}.in` from the working
/// directory unless told otherwise.
#[derive(Parser)]
#[command(name = "aoc2018", version)]
struct Args {
    /// Puzzle day
    #[arg(value_parser = clap::value_parser!(u8).range(1 ..= 25))]
    day: u8,

    /// Puzzle part
    #[arg(value_parser = clap::value_parser!(u8).range(1 ..= 2))]
    part: u8,

    /// Read `day{DAY}test{TEST}.in` instead
    #[arg(long)]
    test: Option<u32>,

    /// Read this file instead
    #[arg(long, conflicts_with = "test")]
    input: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let solve = days::solver(args.day)?;
    let fname = args.input.unwrap_or_else(|| match args.test {
        Some(test) => format!("day{}test{}.in", args.day, test).into(),
        None => format!("day{}.in", args.day).into(),
    });
    info!("day {} part {} reading {}", args.day, args.part, fname.display());
    let input = std::fs::read_to_string(&fname)?;
    let time = Instant::now();
    println!("{}", solve(args.part, &input)?);
    println!("{} seconds elapsed", time.elapsed().as_secs_f32());
    Ok(())
}
