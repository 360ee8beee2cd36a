//! The COCO → Roboflow conversion pipeline.
//!
//! A run is a straight line: discover split files, reconcile categories
//! across them, materialize each split, and summarize. Progress is reported
//! through a [`ProgressSink`]; the returned [`ConversionReport`] carries the
//! per-split counts and the class mapping table.
//!
//! Per-image and per-split problems (a missing image, a split file that
//! vanished) are reported and skipped. Structural problems abort the run.
//! Splits written before a fatal error stay on disk.

mod events;
pub mod report;

pub use events::{ConversionEvent, LogSink, ProgressSink, RecordingSink};
pub use report::{ConversionReport, SplitSummary};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::coco::read_category_table;
use crate::error::ConvertError;
use crate::materialize::{materialize_split, MaterializeContext};
use crate::reconcile::CategoryMapping;
use crate::split::discover_splits;

/// How category ids are treated across splits.
///
/// This mirrors the CLI's flag but is decoupled from clap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryMode {
    /// Reconcile by name into one zero-based numbering shared by all splits.
    #[default]
    Global,
    /// Leave every split's category ids as they are.
    PerSplit,
}

/// What happens to an image record whose source file is missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingImagePolicy {
    /// Keep the record with its original `file_name`.
    #[default]
    Keep,
    /// Remove the record and every annotation on that image.
    Drop,
}

/// Options for a conversion run.
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    /// Directory holding `train.json` / `val.json` / `test.json`.
    pub input_dir: PathBuf,
    /// Root of the Roboflow layout; created if absent.
    pub output_dir: PathBuf,
    /// Base directory for image `file_name` values. Defaults to `input_dir`.
    pub images_dir: Option<PathBuf>,
    /// Emit a progress event every 10 processed images.
    pub verbose: bool,
    pub category_mode: CategoryMode,
    pub missing_images: MissingImagePolicy,
}

impl ConvertOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Directory image paths are resolved against.
    pub fn images_dir(&self) -> &Path {
        self.images_dir.as_deref().unwrap_or(&self.input_dir)
    }
}

/// Convert a COCO dataset directory into the Roboflow layout.
///
/// # Errors
/// - [`ConvertError::NoSplitsFound`] before anything is written when the
///   input directory holds no split file.
/// - [`ConvertError::MalformedInput`], [`ConvertError::UnknownCategoryId`] or
///   [`ConvertError::ConflictingCategoryId`] for structurally broken input.
/// - I/O errors while writing the output tree.
pub fn convert_dataset(
    opts: &ConvertOptions,
    sink: &mut dyn ProgressSink,
) -> Result<ConversionReport, ConvertError> {
    let sources = discover_splits(&opts.input_dir)?;
    sink.event(ConversionEvent::SplitsDiscovered {
        splits: sources.iter().map(|s| s.split).collect(),
    });

    let mapping = match opts.category_mode {
        CategoryMode::Global => {
            let tables = sources
                .iter()
                .map(|source| Ok((source.split, read_category_table(&source.path)?)))
                .collect::<Result<Vec<_>, ConvertError>>()?;
            let mapping = CategoryMapping::build(&tables)?;
            sink.event(ConversionEvent::CategoriesReconciled {
                classes: mapping.len(),
            });
            Some(mapping)
        }
        CategoryMode::PerSplit => None,
    };

    fs::create_dir_all(&opts.output_dir).map_err(|source| ConvertError::CreateDir {
        path: opts.output_dir.clone(),
        source,
    })?;

    let ctx = MaterializeContext {
        output_dir: &opts.output_dir,
        images_dir: opts.images_dir(),
        mapping: mapping.as_ref(),
        missing_images: opts.missing_images,
        verbose: opts.verbose,
    };

    let mut splits = Vec::with_capacity(sources.len());
    for source in &sources {
        if let Some(summary) = materialize_split(source, &ctx, sink)? {
            splits.push(summary);
        }
    }

    Ok(ConversionReport {
        input_dir: opts.input_dir.clone(),
        output_dir: opts.output_dir.clone(),
        images_dir: opts.images_dir().to_path_buf(),
        category_mode: opts.category_mode,
        missing_images: opts.missing_images,
        splits,
        class_mapping: mapping.map(|m| m.origins()).unwrap_or_default(),
    })
}
