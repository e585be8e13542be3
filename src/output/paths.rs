// src/output/paths.rs
//! Pure functions naming the artifacts inside the output directory.

use crate::constants::{DETAILS_FILE_PREFIX, PROMPT_FILE_NAME, STANDUPS_FILE_NAME};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// The saved standup digest.
pub fn standups_path(output_dir: &Path) -> PathBuf {
    output_dir.join(STANDUPS_FILE_NAME)
}

/// The rendered summarization prompt.
pub fn prompt_path(output_dir: &Path) -> PathBuf {
    output_dir.join(PROMPT_FILE_NAME)
}

/// `YYYY-mm-dd_HH-MM-SS`, safe for file names on every platform.
pub fn timestamp_suffix<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// The raw extraction report of a run started at `at`.
pub fn details_path<Tz>(output_dir: &Path, at: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    output_dir.join(format!("{}_{}.json", DETAILS_FILE_PREFIX, timestamp_suffix(at)))
}
