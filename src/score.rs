use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("could not read scores from {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not record score in {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Everything a finished game is scored on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCard {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
    /// Time limit in seconds, if any.
    pub max_time: Option<u64>,
    /// `None` if the clock never started.
    pub elapsed_secs: Option<u64>,
    /// Cells revealed or flagged.
    pub settled: usize,
    pub won: bool,
}

impl ScoreCard {
    pub fn score(&self) -> u64 {
        let elapsed = match self.elapsed_secs {
            Some(elapsed) => elapsed as f64,
            None => return 0,
        };
        let area = (self.width * self.height) as f64;
        if area == 0.0 {
            return 0;
        }
        let density = self.mines as f64 / area;
        let difficulty = area * (1.0 + 3.0 * density);

        let (bonus, factor) = match self.max_time {
            Some(limit) => {
                let limit = limit as f64;
                let bonus = (1.0 + 3600.0 / limit) * (limit - elapsed) * 0.85;
                (bonus, 1.0 / (1.0 + elapsed / area))
            },
            None => (0.0, 1.0 / (1.0 + 1.0 / area)),
        };
        let efficiency = self.settled as f64 / area;
        let won = if self.won { 1.5 } else { 1.0 };

        (difficulty * factor * efficiency * won + bonus).max(0.0).floor() as u64
    }
}

/// Append-only score file, one score per line.
pub struct ScoreBook {
    path: PathBuf,
}

impl ScoreBook {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, score: u64) -> Result<(), ScoreError> {
        let wrap = |source| ScoreError::Write { path: self.path.clone(), source };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(wrap)?;
        writeln!(file, "{}", score).map_err(wrap)
    }

    /// Best score on record. Lines that are not plain numbers are ignored.
    pub fn high_score(&self) -> Result<Option<u64>, ScoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ScoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            },
        };
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|line| line.parse().ok())
            .max())
    }
}
