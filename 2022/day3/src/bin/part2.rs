use anyhow::{Context, Result};
use clap::Parser;
use day3::CliArgs;

fn main() -> Result<()> {
    day3::init_logging();
    let args = CliArgs::parse();
    let total = day3::read_badge_priorities(&args.input_path).with_context(|| {
        format!(
            "Failed to sum badge priorities of rucksacks from given input file({}).",
            args.input_path.display()
        )
    })?;

    println!("total: {}", total);

    Ok(())
}
