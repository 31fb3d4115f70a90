use anyhow::{Context, Result};
use clap::Parser;
use day2::{CliArgs, Outcome};

fn main() -> Result<()> {
    day2::init_logging();
    let args = CliArgs::parse();
    let total = day2::sum_scores::<Outcome, _>(&args.input_path).with_context(|| {
        format!(
            "Failed to score strategy guide of outcomes from given input file({}).",
            args.input_path.display()
        )
    })?;

    println!("Total Points: {}", total);

    Ok(())
}
