use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
pub enum Error {
    InvalidPair(String),
    ReversedRange(usize, usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidPair(s) => write!(
                f,
                "Invalid assignment pair({}), expect text like \"2-4,6-8\".",
                s
            ),
            Error::ReversedRange(start, end) => write!(
                f,
                "Section range starts at {} after its end {}.",
                start, end
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

/// Closed range of section IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    start: usize,
    end: usize,
}

impl Assignment {
    pub fn new(start: usize, end: usize) -> Result<Self, Error> {
        if start > end {
            return Err(Error::ReversedRange(start, end));
        }

        Ok(Self { start, end })
    }

    pub fn contains(&self, other: &Assignment) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    pub fn overlaps(&self, other: &Assignment) -> bool {
        (self.start..=self.end).contains(&other.start)
            || (other.start..=other.end).contains(&self.start)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pair {
    first: Assignment,
    second: Assignment,
}

impl TryFrom<&str> for Pair {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^\s*(\d+)-(\d+),(\d+)-(\d+)\s*$").unwrap());
        let caps = PATTERN
            .captures(value)
            .ok_or(Error::InvalidPair(value.to_string()))?;
        let bound = |ind: usize| {
            caps[ind]
                .parse::<usize>()
                .map_err(|_| Error::InvalidPair(value.to_string()))
        };

        Ok(Pair {
            first: Assignment::new(bound(1)?, bound(2)?)?,
            second: Assignment::new(bound(3)?, bound(4)?)?,
        })
    }
}

impl Pair {
    pub fn one_contains_other(&self) -> bool {
        self.first.contains(&self.second) || self.second.contains(&self.first)
    }

    pub fn overlaps(&self) -> bool {
        self.first.overlaps(&self.second)
    }
}

pub fn read_pairs<P: AsRef<Path>>(path: P) -> Result<Vec<Pair>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    parse_pairs(BufReader::new(file))
        .with_context(|| format!("Failed to read pairs from file({}).", path.as_ref().display()))
}

pub fn parse_pairs<R: BufRead>(reader: R) -> Result<Vec<Pair>> {
    let mut pairs = Vec::new();
    for (ind, line) in reader.lines().enumerate() {
        let s = line.with_context(|| format!("Failed to read line #{}.", ind + 1))?;
        let pair = Pair::try_from(s.as_str())
            .with_context(|| format!("Failed to parse pair on line #{}.", ind + 1))?;
        trace!(line = ind + 1, ?pair);
        pairs.push(pair);
    }
    debug!(pairs = pairs.len(), "read assignment pairs");

    Ok(pairs)
}
