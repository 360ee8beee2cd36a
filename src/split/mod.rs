//! Split discovery.
//!
//! A COCO dataset directory holds up to three annotation files, one per split.
//! They are looked up in a fixed priority order so every later stage sees the
//! splits in the same sequence regardless of filesystem iteration order.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ConvertError;

/// One subset of a dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    /// All splits in discovery order.
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    /// Logical split name as used by the input files.
    pub fn name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }

    /// Annotation file expected in the input directory.
    pub fn annotation_file_name(&self) -> &'static str {
        match self {
            Split::Train => "train.json",
            Split::Val => "val.json",
            Split::Test => "test.json",
        }
    }

    /// Directory name in the Roboflow layout. Roboflow calls the validation
    /// split `valid`.
    pub fn output_dir_name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "valid",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A split whose annotation file was found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitSource {
    pub split: Split,
    pub path: PathBuf,
}

/// Find the split annotation files present in `input_dir`.
///
/// Any subset of `train.json`, `val.json`, `test.json` may be present; the
/// result keeps train → val → test order.
///
/// # Errors
/// Returns [`ConvertError::NoSplitsFound`] when none of them exist.
pub fn discover_splits(input_dir: &Path) -> Result<Vec<SplitSource>, ConvertError> {
    let found: Vec<SplitSource> = Split::ALL
        .iter()
        .map(|split| SplitSource {
            split: *split,
            path: input_dir.join(split.annotation_file_name()),
        })
        .filter(|source| source.path.is_file())
        .collect();

    if found.is_empty() {
        return Err(ConvertError::NoSplitsFound {
            input_dir: input_dir.to_path_buf(),
        });
    }

    Ok(found)
}
