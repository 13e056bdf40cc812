//! Discovery and sampling of locally cached puzzles.
//!
//! The puzzle tool caches one `<id>.json` descriptor per puzzle. Only the
//! file stems matter here; contents are never read.

use crate::error::{Result, StubcheckError};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension of cached puzzle descriptors.
pub const PUZZLE_EXTENSION: &str = "json";

/// Identifier of one cached puzzle (its "public handle").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PuzzleId(String);

impl PuzzleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PuzzleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Default cache location used by the puzzle tool.
///
/// `$XDG_DATA_HOME/coctus/clashes`, falling back to
/// `$HOME/.local/share/coctus/clashes`.
pub fn default_clash_dir() -> Result<PathBuf> {
    let data_home = std::env::var_os("XDG_DATA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(".local").join("share"))
        })
        .ok_or_else(|| {
            StubcheckError::UserError(
                "cannot locate the puzzle cache: neither XDG_DATA_HOME nor HOME is set.\n\
                 Fix: pass --clash-dir or set clash_dir in the config file."
                    .to_string(),
            )
        })?;

    Ok(data_home.join("coctus").join("clashes"))
}

/// List every cached puzzle in `dir`, sorted by id.
pub fn list_puzzles(dir: &Path) -> Result<Vec<PuzzleId>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        StubcheckError::UserError(format!(
            "failed to read puzzle cache '{}': {}\n\
             Fix: fetch some puzzles with the puzzle tool or pass --clash-dir.",
            dir.display(),
            e
        ))
    })?;

    let mut ids = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            StubcheckError::UserError(format!(
                "failed to read puzzle cache '{}': {}",
                dir.display(),
                e
            ))
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(PUZZLE_EXTENSION) {
            continue;
        }
        match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => ids.push(PuzzleId::new(stem)),
            None => tracing::warn!(
                path = %path.display(),
                "skipping cached puzzle whose name is not valid UTF-8"
            ),
        }
    }

    ids.sort();
    Ok(ids)
}

/// Draw `count` distinct ids uniformly at random without replacement.
///
/// The same `seed` always yields the same sample for the same input.
pub fn sample_puzzles(ids: &[PuzzleId], count: usize, seed: u64) -> Result<Vec<PuzzleId>> {
    if count > ids.len() {
        return Err(StubcheckError::InsufficientCorpus {
            requested: count,
            available: ids.len(),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut sample = ids.to_vec();
    sample.shuffle(&mut rng);
    sample.truncate(count);
    Ok(sample)
}

/// Enumerate the corpus and optionally restrict it to a random sample.
///
/// Without a `seed` a fresh one is drawn and logged so the sample can be
/// reproduced with `--seed`.
pub fn select_puzzles(
    dir: &Path,
    sample_size: Option<usize>,
    seed: Option<u64>,
) -> Result<Vec<PuzzleId>> {
    let ids = list_puzzles(dir)?;
    tracing::debug!(dir = %dir.display(), count = ids.len(), "found cached puzzles");

    let Some(count) = sample_size else {
        return Ok(ids);
    };

    let seed = seed.unwrap_or_else(|| {
        use rand::RngExt;
        rand::rng().random::<u64>()
    });
    tracing::info!(count, seed, "sampling puzzles");

    sample_puzzles(&ids, count, seed)
}
