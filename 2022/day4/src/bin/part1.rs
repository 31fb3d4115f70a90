use anyhow::{Context, Result};
use clap::Parser;
use day4::CliArgs;

fn main() -> Result<()> {
    day4::init_logging();
    let args = CliArgs::parse();
    let pairs = day4::read_pairs(&args.input_path).with_context(|| {
        format!(
            "Failed to read assignment pairs from given input file({}).",
            args.input_path.display()
        )
    })?;

    let count = pairs.iter().filter(|pair| pair.one_contains_other()).count();
    tracing::debug!(count, "pairs where one assignment fully contains the other");
    println!("Num containments: {}", count);

    Ok(())
}
