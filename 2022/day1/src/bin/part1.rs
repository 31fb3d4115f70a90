use anyhow::{Context, Result};
use clap::Parser;
use day1::CliArgs;

fn main() -> Result<()> {
    day1::init_logging();
    let args = CliArgs::parse();
    let totals = day1::read_group_totals(&args.input_path).with_context(|| {
        format!(
            "Failed to read calorie groups from given input file({}).",
            args.input_path.display()
        )
    })?;

    println!("Max Calories: {}", day1::top_sum(&totals, 1));

    Ok(())
}
