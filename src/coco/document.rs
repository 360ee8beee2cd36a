//! COCO annotation document reader and writer.
//!
//! Only the fields this tool rewrites are typed: image `file_name`,
//! annotation `category_id`, and category `id`/`name`. Everything else is kept
//! in a flattened `extra` map and written back untouched, so records such as
//! `bbox`, `segmentation`, `width`/`height` or `supercategory` pass through by
//! value.
//!
//! # Output
//!
//! Documents are written as pretty-printed JSON with 2-space indentation.
//! Passthrough keys keep their input order; rewritten keys are emitted first.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CategoryId;
use crate::error::ConvertError;

/// One split's COCO annotation file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CocoDocument {
    pub images: Vec<ImageRecord>,

    pub annotations: Vec<AnnotationRecord>,

    pub categories: Vec<CategoryRecord>,

    /// Top-level passthrough keys (`info`, `licenses`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// COCO image entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Path of the image relative to the images base directory.
    pub file_name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageRecord {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            extra: Map::new(),
        }
    }

    /// The record's `id` value, if it has one.
    pub fn image_id(&self) -> Option<&Value> {
        self.extra.get("id")
    }
}

/// COCO annotation entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub category_id: CategoryId,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnnotationRecord {
    pub fn new(category_id: impl Into<CategoryId>) -> Self {
        Self {
            category_id: category_id.into(),
            extra: Map::new(),
        }
    }

    /// The `image_id` this annotation belongs to, if present.
    pub fn image_id(&self) -> Option<&Value> {
        self.extra.get("image_id")
    }
}

/// COCO category entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,

    /// Class name. This, not `id`, identifies a category across splits.
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CategoryRecord {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Just the `categories` array of a document.
#[derive(Debug, Deserialize)]
struct CategoryTable {
    categories: Vec<CategoryRecord>,
}

/// Reads a COCO annotation document from a file.
///
/// # Errors
/// Returns [`ConvertError::MalformedInput`] if the file is not JSON or lacks
/// one of `images`, `annotations`, `categories`.
pub fn read_coco_document(path: &Path) -> Result<CocoDocument, ConvertError> {
    let file = File::open(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| ConvertError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads only the `categories` array of a COCO annotation file.
pub fn read_category_table(path: &Path) -> Result<Vec<CategoryRecord>, ConvertError> {
    let file = File::open(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let table: CategoryTable =
        serde_json::from_reader(reader).map_err(|source| ConvertError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(table.categories)
}

/// Writes a COCO annotation document, replacing any existing file.
pub fn write_coco_document(path: &Path, document: &CocoDocument) -> Result<(), ConvertError> {
    let file = File::create(path).map_err(|source| ConvertError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, document).map_err(|source| {
        ConvertError::CocoJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;

    writer.flush().map_err(|source| ConvertError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a COCO document from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_coco_str(json: &str) -> Result<CocoDocument, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a COCO document from a JSON byte slice.
pub fn from_coco_slice(bytes: &[u8]) -> Result<CocoDocument, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a COCO document to a pretty-printed JSON string.
pub fn to_coco_string(document: &CocoDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}
