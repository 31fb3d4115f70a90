use anyhow::{Context, Result};
use clap::Parser;
use day2::{CliArgs, Shape};

fn main() -> Result<()> {
    day2::init_logging();
    let args = CliArgs::parse();
    let total = day2::sum_scores::<Shape, _>(&args.input_path).with_context(|| {
        format!(
            "Failed to score strategy guide of shapes from given input file({}).",
            args.input_path.display()
        )
    })?;

    println!("Total Points: {}", total);

    Ok(())
}
