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
    InvalidRound(String),
    InvalidCode(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRound(s) => write!(
                f,
                "Invalid round({}), expect two codes separated by whitespace.",
                s
            ),
            Error::InvalidCode(s) => write!(f, "Invalid code({}) in strategy guide.", s),
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rock,
    Paper,
    Scissors,
}

impl Shape {
    pub fn value(&self) -> usize {
        match self {
            Shape::Rock => 1,
            Shape::Paper => 2,
            Shape::Scissors => 3,
        }
    }

    /// The shape this one defeats.
    pub fn beats(&self) -> Shape {
        match self {
            Shape::Rock => Shape::Scissors,
            Shape::Paper => Shape::Rock,
            Shape::Scissors => Shape::Paper,
        }
    }

    /// The shape that defeats this one.
    pub fn loses_to(&self) -> Shape {
        match self {
            Shape::Rock => Shape::Paper,
            Shape::Paper => Shape::Scissors,
            Shape::Scissors => Shape::Rock,
        }
    }

    fn from_opponent_code(code: &str) -> Result<Self, Error> {
        match code {
            "A" => Ok(Shape::Rock),
            "B" => Ok(Shape::Paper),
            "C" => Ok(Shape::Scissors),
            _ => Err(Error::InvalidCode(code.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Lose,
    Draw,
    Win,
}

impl Outcome {
    pub fn score(&self) -> usize {
        match self {
            Outcome::Lose => 0,
            Outcome::Draw => 3,
            Outcome::Win => 6,
        }
    }

    pub fn of(mine: Shape, theirs: Shape) -> Self {
        if mine == theirs {
            Outcome::Draw
        } else if mine.beats() == theirs {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }
}

/// How the second column of a round decides the shape to play.
pub trait Response: for<'a> TryFrom<&'a str, Error = Error> {
    fn shape_against(&self, opponent: Shape) -> Shape;
}

impl TryFrom<&str> for Shape {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "X" => Ok(Shape::Rock),
            "Y" => Ok(Shape::Paper),
            "Z" => Ok(Shape::Scissors),
            _ => Err(Error::InvalidCode(value.to_string())),
        }
    }
}

impl Response for Shape {
    fn shape_against(&self, _opponent: Shape) -> Shape {
        *self
    }
}

impl TryFrom<&str> for Outcome {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "X" => Ok(Outcome::Lose),
            "Y" => Ok(Outcome::Draw),
            "Z" => Ok(Outcome::Win),
            _ => Err(Error::InvalidCode(value.to_string())),
        }
    }
}

impl Response for Outcome {
    fn shape_against(&self, opponent: Shape) -> Shape {
        match self {
            Outcome::Lose => opponent.beats(),
            Outcome::Draw => opponent,
            Outcome::Win => opponent.loses_to(),
        }
    }
}

#[derive(Debug)]
pub struct Round<R: Response> {
    opponent: Shape,
    response: R,
}

impl<R: Response> TryFrom<&str> for Round<R> {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut tokens = value.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(opponent), Some(response), None) => Ok(Round {
                opponent: Shape::from_opponent_code(opponent)?,
                response: R::try_from(response)?,
            }),
            _ => Err(Error::InvalidRound(value.to_string())),
        }
    }
}

impl<R: Response> Round<R> {
    pub fn score(&self) -> usize {
        let mine = self.response.shape_against(self.opponent);
        mine.value() + Outcome::of(mine, self.opponent).score()
    }
}

pub fn sum_scores<R: Response, P: AsRef<Path>>(path: P) -> Result<usize> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    score_rounds::<R, _>(BufReader::new(file))
        .with_context(|| format!("Failed to score rounds in file({}).", path.as_ref().display()))
}

pub fn score_rounds<R: Response, B: BufRead>(reader: B) -> Result<usize> {
    let mut total = 0;
    for (ind, line) in reader.lines().enumerate() {
        let s = line.with_context(|| format!("Failed to read line #{}.", ind + 1))?;
        let round = Round::<R>::try_from(s.as_str())
            .with_context(|| format!("Failed to parse round on line #{}.", ind + 1))?;
        let score = round.score();
        trace!(line = ind + 1, score);
        total += score;
    }
    debug!(total, "scored all rounds");

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "A Y\nB X\nC Z\n";

    #[test]
    fn outcome_column_picks_shape() {
        let draw = Round::<Outcome>::try_from("A Y").unwrap();
        let lose = Round::<Outcome>::try_from("B X").unwrap();
        let win = Round::<Outcome>::try_from("C Z").unwrap();

        assert_eq!(draw.score(), 4);
        assert_eq!(lose.score(), 1);
        assert_eq!(win.score(), 7);
        assert_eq!(score_rounds::<Outcome, _>(SAMPLE.as_bytes()).unwrap(), 12);
    }

    #[test]
    fn shape_column_is_played_directly() {
        assert_eq!(score_rounds::<Shape, _>(SAMPLE.as_bytes()).unwrap(), 15);
    }

    #[test]
    fn beats_and_loses_to_are_inverse() {
        for shape in [Shape::Rock, Shape::Paper, Shape::Scissors] {
            assert_eq!(shape.beats().loses_to(), shape);
            assert_eq!(shape.loses_to().beats(), shape);
            assert_eq!(Outcome::of(shape, shape.beats()), Outcome::Win);
            assert_eq!(Outcome::of(shape, shape.loses_to()), Outcome::Lose);
        }
    }

    #[test]
    fn rejects_unknown_code() {
        let err = Round::<Outcome>::try_from("D Y").unwrap_err();
        assert!(matches!(err, Error::InvalidCode(ref s) if s == "D"));

        let err = Round::<Shape>::try_from("A W").unwrap_err();
        assert!(matches!(err, Error::InvalidCode(ref s) if s == "W"));
    }

    #[test]
    fn rejects_wrong_token_count() {
        assert!(matches!(
            Round::<Outcome>::try_from("A"),
            Err(Error::InvalidRound(_))
        ));
        assert!(matches!(
            Round::<Outcome>::try_from("A Y Z"),
            Err(Error::InvalidRound(_))
        ));
        assert!(score_rounds::<Outcome, _>("A Y\n\nB X\n".as_bytes()).is_err());
    }
}
