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

    let count = pairs.iter().filter(|pair| pair.overlaps()).count();
    tracing::debug!(count, "pairs whose assignments overlap");
    println!("Num overlaps: {}", count);

    Ok(())
}
