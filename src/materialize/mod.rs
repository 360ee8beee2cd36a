//! Split materialization: one input split becomes one Roboflow split folder.
//!
//! For a discovered split this loads its annotation file, rewrites category
//! ids (when reconciling globally), copies every referenced image into
//! `<output>/<split>/images/` under its basename, points `file_name` at the
//! copy, and writes `<output>/<split>/_annotations.coco.json`.
//!
//! The document is written only after every image has been copied or
//! recorded as missing.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::coco::{read_coco_document, write_coco_document, CocoDocument};
use crate::conversion::{ConversionEvent, MissingImagePolicy, ProgressSink, SplitSummary};
use crate::error::ConvertError;
use crate::reconcile::CategoryMapping;
use crate::split::SplitSource;

/// Name of the annotation file in each output split folder.
pub const ANNOTATIONS_FILE_NAME: &str = "_annotations.coco.json";

/// Subfolder of each output split that receives the images.
pub const IMAGES_DIR_NAME: &str = "images";

const PROGRESS_EVERY: usize = 10;

/// Everything a split needs that is shared across splits.
#[derive(Clone, Copy, Debug)]
pub struct MaterializeContext<'a> {
    pub output_dir: &'a Path,
    /// Base directory image `file_name` values are resolved against.
    pub images_dir: &'a Path,
    /// Global mapping; `None` leaves category ids as they are.
    pub mapping: Option<&'a CategoryMapping>,
    pub missing_images: MissingImagePolicy,
    pub verbose: bool,
}

/// Write one split in the Roboflow layout.
///
/// Returns `Ok(None)` if the split's annotation file no longer exists.
///
/// # Errors
/// Fails on malformed documents, unknown category ids, and I/O errors while
/// creating directories, copying images, or writing the annotation file.
pub fn materialize_split(
    source: &SplitSource,
    ctx: &MaterializeContext<'_>,
    sink: &mut dyn ProgressSink,
) -> Result<Option<SplitSummary>, ConvertError> {
    let split = source.split;

    if !source.path.is_file() {
        sink.event(ConversionEvent::SplitSkipped {
            split,
            path: source.path.clone(),
        });
        return Ok(None);
    }

    let mut document = read_coco_document(&source.path)?;

    let split_dir = ctx.output_dir.join(split.output_dir_name());
    let images_out = split_dir.join(IMAGES_DIR_NAME);
    sink.event(ConversionEvent::SplitStarted {
        split,
        output_dir: split_dir.clone(),
    });
    fs::create_dir_all(&images_out).map_err(|source| ConvertError::CreateDir {
        path: images_out.clone(),
        source,
    })?;

    if let Some(mapping) = ctx.mapping {
        mapping.apply(split, &mut document)?;
    }

    let total_images = document.images.len();
    let mut processed_images = 0;
    let mut missing = Vec::new();

    for (position, image) in document.images.iter_mut().enumerate() {
        let image_path = ctx.images_dir.join(&image.file_name);
        let basename = match image_path.file_name() {
            Some(name) if image_path.is_file() => Some(name.to_owned()),
            _ => None,
        };
        let Some(basename) = basename else {
            sink.event(ConversionEvent::ImageMissing {
                split,
                path: image_path,
            });
            missing.push(position);
            continue;
        };

        copy_image(&image_path, &images_out.join(&basename))?;
        image.file_name = format!("{}/{}", IMAGES_DIR_NAME, basename.to_string_lossy());

        processed_images += 1;
        if ctx.verbose && processed_images % PROGRESS_EVERY == 0 {
            sink.event(ConversionEvent::ImageProgress {
                split,
                processed: processed_images,
                total: total_images,
            });
        }
    }

    let dropped_annotations = match ctx.missing_images {
        MissingImagePolicy::Keep => 0,
        MissingImagePolicy::Drop => drop_images(&mut document, &missing),
    };

    write_coco_document(&split_dir.join(ANNOTATIONS_FILE_NAME), &document)?;

    let summary = SplitSummary {
        split,
        output_dir_name: split.output_dir_name().to_string(),
        total_images,
        processed_images,
        skipped_images: missing.len(),
        dropped_annotations,
    };
    sink.event(ConversionEvent::SplitFinished(summary.clone()));

    Ok(Some(summary))
}

/// Remove the images at `positions` and every annotation pointing at them.
///
/// Returns the number of annotations removed.
fn drop_images(document: &mut CocoDocument, positions: &[usize]) -> usize {
    if positions.is_empty() {
        return 0;
    }

    let positions: HashSet<usize> = positions.iter().copied().collect();
    // Ids are keyed by their JSON text so any id type can be matched.
    let mut dropped_ids: HashSet<String> = HashSet::new();
    let mut position = 0;
    document.images.retain(|image| {
        let keep = !positions.contains(&position);
        position += 1;
        if !keep {
            if let Some(id) = image.image_id() {
                dropped_ids.insert(id_key(id));
            }
        }
        keep
    });

    let before = document.annotations.len();
    document.annotations.retain(|ann| {
        ann.image_id()
            .map_or(true, |image_id| !dropped_ids.contains(&id_key(image_id)))
    });
    before - document.annotations.len()
}

fn id_key(id: &Value) -> String {
    id.to_string()
}

/// Copy an image byte for byte, carrying over its modification time.
///
/// Nothing is copied when `to` already is `from`, which happens when the
/// output tree overlaps the images directory.
fn copy_image(from: &Path, to: &Path) -> Result<(), ConvertError> {
    if is_same_file(from, to) {
        debug!("{} is already in place", to.display());
        return Ok(());
    }

    fs::copy(from, to).map_err(|source| ConvertError::ImageCopy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;

    if let Err(err) = preserve_modified_time(from, to) {
        debug!(
            "Could not preserve modification time of {}: {}",
            to.display(),
            err
        );
    }

    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn preserve_modified_time(from: &Path, to: &Path) -> std::io::Result<()> {
    let modified = fs::metadata(from)?.modified()?;
    let dest = fs::OpenOptions::new().write(true).open(to)?;
    dest.set_modified(modified)
}
