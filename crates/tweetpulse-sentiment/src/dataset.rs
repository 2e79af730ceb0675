//! CSV persistence for the scored dataset.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tweetpulse_core::PostRecord;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("io error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv serialization error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes the dataset to `path` as CSV.
///
/// Columns follow the field order of [`PostRecord`]; optional fields left
/// unset serialize as empty cells. Parent directories are created as
/// needed. The file is written to a `.tmp` sibling first and renamed into
/// place, so a failed run never leaves a partial dataset behind.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] on filesystem failures and
/// [`DatasetError::Csv`] if a record cannot be serialized.
pub fn write_dataset(path: &Path, records: &[PostRecord]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| DatasetError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let tmp_path = tmp_sibling(path);
    let mut writer = csv::Writer::from_path(&tmp_path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| DatasetError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    drop(writer);

    fs::rename(&tmp_path, path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}
