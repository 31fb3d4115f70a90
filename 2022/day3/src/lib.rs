use std::{
    error,
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader, Lines},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, trace};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
pub enum Error {
    InvalidItem(char),
    UnevenCompartments(String),
    TruncatedGroup { expected: usize, found: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidItem(c) => write!(
                f,
                "Invalid item({}) in rucksack, expect ascii letters.",
                c
            ),
            Error::UnevenCompartments(s) => write!(
                f,
                "Rucksack({}) can't be split into two compartments of the same size.",
                s
            ),
            Error::TruncatedGroup { expected, found } => write!(
                f,
                "Last group has only {} rucksacks, expect {}.",
                found, expected
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

pub fn priority(c: char) -> Result<usize, Error> {
    match c {
        'a'..='z' => Ok(c as usize - 'a' as usize + 1),
        'A'..='Z' => Ok(c as usize - 'A' as usize + 27),
        _ => Err(Error::InvalidItem(c)),
    }
}

/// Set of item types, bit `n` standing for the item whose priority is `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemSet(u64);

impl ItemSet {
    /// Every item type from `a` to `Z`.
    pub const ALL: ItemSet = ItemSet(((1u64 << 53) - 1) & !1);

    pub fn intersection(&self, other: &ItemSet) -> ItemSet {
        ItemSet(self.0 & other.0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn priorities(&self) -> impl Iterator<Item = usize> {
        let bits = self.0;
        (1..=52).filter(move |p| bits & (1u64 << p) != 0)
    }

    pub fn priority_sum(&self) -> usize {
        self.priorities().sum()
    }
}

impl TryFrom<&str> for ItemSet {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value
            .chars()
            .try_fold(ItemSet::default(), |set, c| Ok(ItemSet(set.0 | 1u64 << priority(c)?)))
    }
}

/// Splits a rucksack into its two compartments and returns the items found in both.
pub fn shared_in_compartments(rucksack: &str) -> Result<ItemSet, Error> {
    if rucksack.len() % 2 != 0 {
        return Err(Error::UnevenCompartments(rucksack.to_string()));
    }

    let half = rucksack.len() / 2;
    if !rucksack.is_char_boundary(half) {
        return Err(Error::UnevenCompartments(rucksack.to_string()));
    }
    let first = ItemSet::try_from(&rucksack[..half])?;
    let second = ItemSet::try_from(&rucksack[half..])?;

    Ok(first.intersection(&second))
}

/// Returns the items carried by every rucksack of the group.
pub fn shared_in_group<S: AsRef<str>>(group: &[S]) -> Result<ItemSet, Error> {
    group
        .iter()
        .map(|s| ItemSet::try_from(s.as_ref()))
        .try_fold(ItemSet::ALL, |shared, set| Ok(shared.intersection(&set?)))
}

/// Groups consecutive lines into arrays of `N`.
///
/// A final group shorter than `N` is reported as [`Error::TruncatedGroup`],
/// after which the iterator is exhausted.
pub struct Chunks<I, const N: usize> {
    lines: I,
    done: bool,
}

impl<I, const N: usize> Chunks<I, N> {
    pub fn new(lines: I) -> Self {
        Self { lines, done: false }
    }
}

impl<I, const N: usize> Iterator for Chunks<I, N>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<[String; N]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut group = Vec::with_capacity(N);
        while group.len() < N {
            match self.lines.next() {
                Some(Ok(s)) => group.push(s),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.done = true;
                    if group.is_empty() {
                        return None;
                    }
                    return Some(Err(Error::TruncatedGroup {
                        expected: N,
                        found: group.len(),
                    }
                    .into()));
                }
            }
        }

        // The loop only exits with exactly N lines.
        group.try_into().ok().map(Ok)
    }
}

pub fn groups_of<const N: usize, R: BufRead>(reader: R) -> Chunks<Lines<R>, N> {
    Chunks::new(reader.lines())
}

fn open<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    Ok(BufReader::new(file))
}

pub fn read_compartment_priorities<P: AsRef<Path>>(path: P) -> Result<usize> {
    compartment_priorities(open(&path)?)
        .with_context(|| format!("Failed to read rucksacks from file({}).", path.as_ref().display()))
}

pub fn compartment_priorities<R: BufRead>(reader: R) -> Result<usize> {
    let mut total = 0;
    for (ind, line) in reader.lines().enumerate() {
        let s = line.with_context(|| format!("Failed to read line #{}.", ind + 1))?;
        let shared = shared_in_compartments(&s)
            .with_context(|| format!("Failed to check rucksack on line #{}.", ind + 1))?;
        trace!(line = ind + 1, shared = shared.len());
        total += shared.priority_sum();
    }
    debug!(total, "summed compartment priorities");

    Ok(total)
}

pub fn read_badge_priorities<P: AsRef<Path>>(path: P) -> Result<usize> {
    badge_priorities(open(&path)?)
        .with_context(|| format!("Failed to read rucksacks from file({}).", path.as_ref().display()))
}

pub fn badge_priorities<R: BufRead>(reader: R) -> Result<usize> {
    let mut total = 0;
    for (ind, group) in groups_of::<3, _>(reader).enumerate() {
        let group = group.with_context(|| format!("Failed to read group #{}.", ind + 1))?;
        let shared = shared_in_group(&group)
            .with_context(|| format!("Failed to check rucksacks of group #{}.", ind + 1))?;
        trace!(group = ind + 1, shared = shared.len());
        total += shared.priority_sum();
    }
    debug!(total, "summed badge priorities");

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "vJrwpWtwJgWrhcsFMMfFFhFp
jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL
PmmdzqPrVvPwwTWBwg
wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn
ttgJtRGJQctTZtZT
CrZsJsPPZsGzwwsLwLmpwMDw
";

    #[test]
    fn priorities_of_letters() {
        assert_eq!(priority('a').unwrap(), 1);
        assert_eq!(priority('p').unwrap(), 16);
        assert_eq!(priority('z').unwrap(), 26);
        assert_eq!(priority('A').unwrap(), 27);
        assert_eq!(priority('Z').unwrap(), 52);
        assert!(matches!(priority('1'), Err(Error::InvalidItem('1'))));
    }

    #[test]
    fn group_shares_one_badge() {
        let group = [
            "vJrwpWtwJgWrhcsFMMfFFhFp",
            "jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL",
            "PmmdzqPrVvPwwTWBwg",
        ];
        let shared = shared_in_group(&group).unwrap();

        assert_eq!(shared.priorities().collect::<Vec<_>>(), vec![16]);
        assert_eq!(badge_priorities(SAMPLE.as_bytes()).unwrap(), 70);
    }

    #[test]
    fn repeated_items_count_once() {
        let shared = shared_in_group(&["aaBB", "aB", "BaaaB"]).unwrap();

        assert_eq!(shared.len(), 2);
        assert_eq!(shared.priority_sum(), 1 + 28);
    }

    #[test]
    fn compartments_of_sample() {
        let shared = shared_in_compartments("vJrwpWtwJgWrhcsFMMfFFhFp").unwrap();

        assert_eq!(shared.priorities().collect::<Vec<_>>(), vec![16]);
        assert_eq!(compartment_priorities(SAMPLE.as_bytes()).unwrap(), 157);
    }

    #[test]
    fn odd_length_rucksack_is_rejected() {
        assert!(matches!(
            shared_in_compartments("abc"),
            Err(Error::UnevenCompartments(_))
        ));
    }

    #[test]
    fn short_last_group_is_rejected() {
        let mut chunks = groups_of::<3, _>("a\nb\nc\nd\ne\n".as_bytes());

        assert_eq!(chunks.next().unwrap().unwrap(), ["a", "b", "c"]);
        let err = chunks.next().unwrap().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::TruncatedGroup {
                expected: 3,
                found: 2
            })
        ));
        assert!(chunks.next().is_none());
        assert!(badge_priorities("a\nb\nc\nd\n".as_bytes()).is_err());
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(groups_of::<3, _>("".as_bytes()).next().is_none());
        assert_eq!(badge_priorities("".as_bytes()).unwrap(), 0);
    }
}
