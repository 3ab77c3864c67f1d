use crate::domain::Snapshot;
use crate::extensions::date_time_ext::ToDumpTimestamp;
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, instrument};

/// Writes raw device snapshots to timestamped JSON files.
#[derive(Debug)]
pub struct Archiver {
    directory: PathBuf,
}

impl Archiver {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Archiver {
            directory: directory.into(),
        }
    }

    /// Writes the snapshot as 4-space indented JSON and returns the path of the dump. The file is
    /// closed when this returns, whether or not the write succeeded.
    #[instrument(skip(self, snapshot, taken_at))]
    pub async fn archive<Tz: TimeZone>(
        &self,
        device_name: &str,
        snapshot: &Snapshot,
        taken_at: &DateTime<Tz>,
    ) -> Result<PathBuf, ArchiveError>
    where
        Tz::Offset: Display,
    {
        let file_name = dump_file_name(device_name, &taken_at.to_dump_timestamp());
        let path = if self.directory == Path::new(".") {
            PathBuf::from(file_name)
        } else {
            self.directory.join(file_name)
        };
        let json = to_pretty_json(snapshot)?;

        fs::write(&path, json).await.map_err(|source| ArchiveError::Io {
            source,
            path: path.clone(),
        })?;

        debug!(path = %path.display(), fields = snapshot.len(), "Archived snapshot");
        Ok(path)
    }
}

/// `<name>_DUMP_<timestamp>.json`, where only letters, digits and spaces of the name are kept.
pub fn dump_file_name(device_name: &str, timestamp: &str) -> String {
    format!("{}_DUMP_{}.json", sanitize_name(device_name), timestamp)
}

fn sanitize_name(device_name: &str) -> String {
    let kept = device_name
        .chars()
        .filter(|c| is_letter(*c) || c.is_ascii_digit() || *c == ' ')
        .collect::<String>();
    kept.trim_end().to_string()
}

// Letter-like numerals such as `Ⅻ` are alphabetic to Unicode but are not letters in a file name.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

fn to_pretty_json(snapshot: &Snapshot) -> Result<Vec<u8>, serde_json::Error> {
    let mut json = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut json, PrettyFormatter::with_indent(b"    "));
    snapshot.serialize(&mut serializer)?;
    Ok(json)
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("unable to serialize the snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unable to write '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
}
