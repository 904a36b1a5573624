use std::{path::PathBuf, str::FromStr};
use structopt::StructOpt;

use crate::board::{self, Board, Dim};

#[derive(Debug, StructOpt)]
#[structopt(name = "minesweeper", about = "Terminal minesweeper that can solve itself.")]
pub struct Opts {
    #[structopt(subcommand)]
    pub def: Option<Def>,
    /// Time limit: unlimited, 1h, 30m, 15m, 10m, 5m, 1m, 30s or madman (10s).
    #[structopt(long, default_value = "unlimited")]
    pub max_time: MaxTime,
    /// Seed for mine placement. Random if left out.
    #[structopt(long)]
    pub seed: Option<u64>,
    /// File that scores are appended to.
    #[structopt(long, parse(from_os_str), default_value = "scores.txt")]
    pub scores: PathBuf,
}

impl Opts {
    /// Board dimensions and mine count. Without a subcommand, a small easy board.
    pub fn layout(&self) -> (Dim, usize) {
        match &self.def {
            Some(def) => def.layout(),
            None => Def::default().layout(),
        }
    }

    /// A fresh, unplayed board. Every call with `--seed` lays out the same mines.
    pub fn build_board(&self) -> Result<Board, board::Error> {
        let (dim, mines) = self.layout();
        match self.seed {
            Some(seed) => Board::new_seeded(dim, mines, seed),
            None => Board::new(dim, mines),
        }
    }
}

#[derive(Debug, PartialEq, StructOpt)]
pub enum Def {
    /// Pick a board off the menu.
    Preset {
        /// small, medium, big, bigger or massive
        #[structopt(default_value = "small")]
        size: MapSize,
        /// easiest, easy, medium, hard, harder or impossible
        #[structopt(default_value = "easy")]
        difficulty: Difficulty,
    },
    /// Describe the board yourself. Square if no height is given.
    Descrip {
        width: usize,
        height: Option<usize>,
        #[structopt(short, long)]
        mines: usize,
    },
}

impl Default for Def {
    fn default() -> Self {
        Def::Preset {
            size: MapSize::Small,
            difficulty: Difficulty::Easy,
        }
    }
}

impl Def {
    pub fn layout(&self) -> (Dim, usize) {
        match *self {
            Def::Preset { size, difficulty } => {
                let (w, h) = size.dims();
                let dim = if w == h { Dim::Square(w) } else { Dim::Rect(w, h) };
                (dim, w * h * difficulty.percent() / 100)
            },
            Def::Descrip { width, height: Some(height), mines } => (Dim::Rect(width, height), mines),
            Def::Descrip { width, height: None, mines } => (Dim::Square(width), mines),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum MapSize {
    Small,
    Medium,
    Big,
    Bigger,
    Massive,
}

impl MapSize {
    pub fn dims(self) -> (usize, usize) {
        match self {
            MapSize::Small => (10, 10),
            MapSize::Medium => (20, 20),
            MapSize::Big => (30, 30),
            MapSize::Bigger => (40, 40),
            MapSize::Massive => (50, 40),
        }
    }
}

impl FromStr for MapSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "small" => MapSize::Small,
            "medium" => MapSize::Medium,
            "big" => MapSize::Big,
            "bigger" => MapSize::Bigger,
            "massive" => MapSize::Massive,
            other => return Err(format!(
                "unknown size {:?}, expected small, medium, big, bigger or massive",
                other,
            )),
        })
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Difficulty {
    Easiest,
    Easy,
    Medium,
    Hard,
    Harder,
    Impossible,
}

impl Difficulty {
    /// Share of the board that is mined.
    pub fn percent(self) -> usize {
        match self {
            Difficulty::Easiest => 5,
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
            Difficulty::Harder => 25,
            Difficulty::Impossible => 40,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "easiest" => Difficulty::Easiest,
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            "harder" => Difficulty::Harder,
            "impossible" => Difficulty::Impossible,
            other => return Err(format!(
                "unknown difficulty {:?}, expected easiest, easy, medium, hard, harder or impossible",
                other,
            )),
        })
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum MaxTime {
    Unlimited,
    Hour,
    HalfHour,
    QuarterHour,
    TenMinutes,
    FiveMinutes,
    Minute,
    HalfMinute,
    Madman,
}

impl MaxTime {
    pub fn secs(self) -> Option<u64> {
        match self {
            MaxTime::Unlimited => None,
            MaxTime::Hour => Some(3600),
            MaxTime::HalfHour => Some(1800),
            MaxTime::QuarterHour => Some(900),
            MaxTime::TenMinutes => Some(600),
            MaxTime::FiveMinutes => Some(300),
            MaxTime::Minute => Some(60),
            MaxTime::HalfMinute => Some(30),
            MaxTime::Madman => Some(10),
        }
    }
}

impl FromStr for MaxTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "unlimited" | "none" => MaxTime::Unlimited,
            "1h" => MaxTime::Hour,
            "30m" => MaxTime::HalfHour,
            "15m" => MaxTime::QuarterHour,
            "10m" => MaxTime::TenMinutes,
            "5m" => MaxTime::FiveMinutes,
            "1m" => MaxTime::Minute,
            "30s" => MaxTime::HalfMinute,
            "madman" => MaxTime::Madman,
            other => return Err(format!(
                "unknown time limit {:?}, expected unlimited, 1h, 30m, 15m, 10m, 5m, 1m, 30s or madman",
                other,
            )),
        })
    }
}
