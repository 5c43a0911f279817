use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use types::{Fault, InstructionId};

use crate::{check_batch, FaultStore, StoreError};

/// Directory-backed fault store.
///
/// LAYOUT: one JSON file per source instruction, `<root>/<id>.json`,
/// holding the complete fault batch as an array.
///
/// ATOMICITY: the batch is written to a temporary file inside `root` and
/// then renamed over the final path. A rename within one directory is
/// atomic, so a reader sees either the previous file, the complete new
/// file, or no file at all. A worker that dies mid-write leaves at most a
/// stray temporary file, never a truncated batch.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn batch_path(&self, source: InstructionId) -> PathBuf {
        self.root.join(format!("{}.json", source))
    }

    /// Reads back the batch committed for `source`; `Ok(None)` if there is
    /// none.
    pub fn load(&self, source: InstructionId) -> Result<Option<Vec<Fault>>, StoreError> {
        let path = self.batch_path(source);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let batch = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(batch))
    }

    /// Source instructions with a committed batch, ascending.
    pub fn committed(&self) -> Result<Vec<InstructionId>, StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.root.clone(),
            source,
        };
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u32>().ok())
            {
                ids.push(InstructionId(id));
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn write_atomically(&self, path: &Path, batch: &[Fault]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let tmp = NamedTempFile::new_in(&self.root).map_err(io_err)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer(&mut writer, batch)?;
            writer.flush().map_err(io_err)?;
        }
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl FaultStore for DirStore {
    fn commit(&self, source: InstructionId, batch: Vec<Fault>) -> Result<(), StoreError> {
        check_batch(source, &batch)?;
        let path = self.batch_path(source);
        self.write_atomically(&path, &batch)?;
        tracing::trace!(source = %source, faults = batch.len(), path = %path.display(), "committed batch");
        Ok(())
    }
}
