use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, trace};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
pub enum Error {
    InvalidCalories(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidCalories(s) => write!(
                f,
                "Invalid calories({}) in input, expect unsigned integer or blank line.",
                s
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CliArgs {
    pub input_path: PathBuf,
}

/// Install the stderr logger, filtered by `RUST_LOG` (defaults to `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

pub fn read_group_totals<P: AsRef<Path>>(path: P) -> Result<Vec<usize>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    group_totals(BufReader::new(file))
        .with_context(|| format!("Failed to read calories from file({}).", path.as_ref().display()))
}

/// Sums each blank-line separated group of calories, in input order.
///
/// Every blank line closes a group, so consecutive blank lines yield groups
/// with a total of zero.
pub fn group_totals<R: BufRead>(reader: R) -> Result<Vec<usize>> {
    let mut totals = Vec::new();
    let mut cur_total: Option<usize> = None;
    for (ind, line) in reader.lines().enumerate() {
        let s = line.with_context(|| format!("Failed to read line #{}.", ind + 1))?;
        let s = s.trim();
        if s.is_empty() {
            let total = cur_total.take().unwrap_or(0);
            debug!(group = totals.len(), total, "group closed");
            totals.push(total);
        } else {
            let calories = s
                .parse::<usize>()
                .map_err(|_| Error::InvalidCalories(s.to_string()))
                .with_context(|| format!("Failed to parse line #{}.", ind + 1))?;
            trace!(line = ind + 1, calories);
            *cur_total.get_or_insert(0) += calories;
        }
    }

    // The last group has no blank line after it.
    if let Some(total) = cur_total.take() {
        debug!(group = totals.len(), total, "group closed");
        totals.push(total);
    }

    Ok(totals)
}

/// Sum of the `n` largest totals, or of all of them if there are fewer.
pub fn top_sum(totals: &[usize], n: usize) -> usize {
    let mut sorted = totals.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.iter().take(n).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_group_totals_zero() {
        let input = "1000\n2000\n\n4000\n\n3000\n8000\n\n\n10000\n";
        let totals = group_totals(input.as_bytes()).unwrap();

        assert_eq!(totals, vec![3000, 4000, 11000, 0, 10000]);
        assert_eq!(top_sum(&totals, 3), 25000);
    }

    #[test]
    fn trailing_group_without_blank_line() {
        let with_blank = group_totals("1\n2\n\n3\n\n".as_bytes()).unwrap();
        let without_blank = group_totals("1\n2\n\n3".as_bytes()).unwrap();

        assert_eq!(with_blank, vec![3, 3]);
        assert_eq!(with_blank, without_blank);
    }

    #[test]
    fn fewer_groups_than_requested() {
        let totals = group_totals("5\n\n7\n".as_bytes()).unwrap();

        assert_eq!(top_sum(&totals, 3), 12);
        assert_eq!(top_sum(&[], 3), 0);
    }

    #[test]
    fn group_order_does_not_matter() {
        let a = group_totals("1\n2\n\n30\n\n4\n\n50\n".as_bytes()).unwrap();
        let b = group_totals("50\n\n4\n\n2\n1\n\n30\n".as_bytes()).unwrap();

        assert_eq!(top_sum(&a, 3), top_sum(&b, 3));
        assert_eq!(top_sum(&a, 1), 50);
    }

    #[test]
    fn rejects_non_numeric_line() {
        let err = group_totals("100\nabc\n".as_bytes()).unwrap_err();

        assert!(format!("{:#}", err).contains("abc"));
        assert!(format!("{:#}", err).contains("line #2"));
    }
}
