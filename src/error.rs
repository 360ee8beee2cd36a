use std::path::PathBuf;
use thiserror::Error;

use crate::coco::CategoryId;
use crate::split::Split;

/// The main error type for coco2roboflow operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "No split files (train.json, val.json, test.json) found in input directory {}",
        input_dir.display()
    )]
    NoSplitsFound { input_dir: PathBuf },

    #[error("Malformed COCO annotation file {path}: {source}")]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write COCO JSON to {path}: {source}")]
    CocoJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed COCO annotation file: {split} split references category id {id} which is not in its categories list")]
    UnknownCategoryId { split: Split, id: CategoryId },

    #[error("Malformed COCO annotation file: {split} split defines category id {id} as both '{first}' and '{second}'")]
    ConflictingCategoryId {
        split: Split,
        id: CategoryId,
        first: String,
        second: String,
    },

    #[error("Failed to copy image {} to {}: {source}", from.display(), to.display())]
    ImageCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize conversion report: {0}")]
    ReportSerialize(#[source] serde_json::Error),
}

impl ConvertError {
    /// Process exit code for this error: 2 when no split file was found,
    /// 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::NoSplitsFound { .. } => 2,
            _ => 1,
        }
    }
}
