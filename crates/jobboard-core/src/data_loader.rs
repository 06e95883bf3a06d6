//! Loads job records from JSON files on disk.
//!
//! Each `*.json` file under the data directory holds either one record or an
//! array of records. Files are visited in path order so ids and ties keep a
//! stable relative order between runs.
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::JobRecord;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Many(Vec<JobRecord>),
    One(Box<JobRecord>),
}

#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    limit: Option<usize>,
}

impl DataLoader {
    pub fn new() -> Self { Self::default() }

    /// Stop after `limit` files.
    pub fn with_file_limit(limit: usize) -> Self { Self { limit: Some(limit) } }

    pub fn load_directory(&self, data_dir: &Path) -> Result<Vec<JobRecord>> {
        if !data_dir.is_dir() {
            return Err(Error::NotFound(format!("data directory {}", data_dir.display())));
        }
        let mut files = self.list_json_files(data_dir);
        if files.is_empty() {
            tracing::warn!(dir = %data_dir.display(), "no .json files found");
            return Ok(vec![]);
        }
        if let Some(limit) = self.limit {
            if files.len() > limit { files.truncate(limit); tracing::info!(limit, "limited to first files"); }
        }
        let mut records = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            tracing::debug!(file = %file_path.display(), "loading file {}/{}", file_index + 1, files.len());
            records.extend(Self::load_file(file_path)?);
        }
        tracing::info!(files = files.len(), records = records.len(), "job records loaded");
        Ok(records)
    }

    pub fn load_file(path: &Path) -> Result<Vec<JobRecord>> {
        let content = fs::read_to_string(path)?;
        match serde_json::from_str::<RecordFile>(&content) {
            Ok(RecordFile::Many(records)) => Ok(records),
            Ok(RecordFile::One(record)) => Ok(vec![*record]),
            Err(e) => Err(Error::decode(path.display().to_string(), e)),
        }
    }

    fn list_json_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut json_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path(); if path.extension().and_then(|s| s.to_str()) == Some("json") { json_files.push(path.to_path_buf()); }
        }
        json_files.sort(); json_files
    }
}
