use std::path::{Path, PathBuf};

const OUTPUT_PREFIX: &str = "output";
const OUTPUT_EXTENSION: &str = "csv";

/// Where a window's CSV goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// First `output_<n>.csv` that does not exist yet, n from 1.
    NextFree,
    /// `output_<index>.csv`, overwriting.
    Indexed(u32),
}

pub fn indexed_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("{}_{}.{}", OUTPUT_PREFIX, index, OUTPUT_EXTENSION))
}

pub fn next_free_path(dir: &Path) -> PathBuf {
    let mut index = 1;
    loop {
        let candidate = indexed_path(dir, index);
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}

impl OutputTarget {
    pub fn resolve(&self, dir: &Path) -> PathBuf {
        match self {
            OutputTarget::NextFree => next_free_path(dir),
            OutputTarget::Indexed(index) => indexed_path(dir, *index),
        }
    }
}
