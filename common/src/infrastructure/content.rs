use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};

use crate::domain::posts::RawRecord;
use crate::domain::queries::ContentSource;

/// Content source backed by a flat directory of JSON front-matter
/// records, one file per post. How those files got there (extracted
/// from markdown, exported from a database) is not this crate's
/// concern.
#[derive(Debug)]
pub struct ContentDirAdapter {
    entries: Vec<RawRecord>,
}

impl ContentSource for ContentDirAdapter {
    fn entries(&self) -> Box<dyn Iterator<Item = &RawRecord> + '_> {
        Box::new(self.entries.iter())
    }
}

impl ContentDirAdapter {
    pub fn load(content_path: &str) -> Result<Self, anyhow::Error> {
        let dir_path = Path::new(content_path);

        tracing::debug!("Loading content from {}", dir_path.to_string_lossy());

        let dir_entries = fs::read_dir(dir_path).with_context(|| {
            format!(
                "failed to read content directory: {}",
                dir_path.to_string_lossy()
            )
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry_res in dir_entries {
            let entry =
                entry_res.map_err(|e| anyhow!("failed to read a directory entry: {}", e))?;
            let path = entry.path();
            if path.is_file() && is_json(&path) {
                paths.push(path);
            }
        }
        // read_dir order is platform-dependent; source order should not be
        paths.sort();

        let mut entries = Vec::with_capacity(paths.len());
        for path in &paths {
            entries.push(load_record(path)?);
        }

        Ok(Self { entries })
    }
}

pub fn load(content_path: &str) -> Result<ContentDirAdapter, anyhow::Error> {
    ContentDirAdapter::load(content_path)
}

fn load_record(path: &Path) -> Result<RawRecord, anyhow::Error> {
    let path_str = path.to_string_lossy().into_owned();

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read front-matter file '{}'", path_str))?;

    serde_json::from_str::<RawRecord>(&content)
        .with_context(|| format!("failed to parse JSON front-matter '{}'", path_str))
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}
