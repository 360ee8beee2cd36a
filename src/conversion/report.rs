//! Conversion report types.
//!
//! The report is the structured result of a run: what was read, what was
//! written per split, and how original category ids were collapsed into
//! output indices. It renders as text (Display) or serializes as JSON.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::{CategoryMode, MissingImagePolicy};
use crate::reconcile::CategoryOrigin;
use crate::split::Split;

const TABLE_RULE: &str = "---------------------------";

/// A report generated by a dataset conversion.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Directory image `file_name` values were resolved against.
    pub images_dir: PathBuf,
    pub category_mode: CategoryMode,
    pub missing_images: MissingImagePolicy,
    /// One entry per split that was written, in discovery order.
    pub splits: Vec<SplitSummary>,
    /// Original `(id, name)` pairs per output index. Empty unless categories
    /// were reconciled globally.
    pub class_mapping: Vec<CategoryOrigin>,
}

impl ConversionReport {
    /// Total images skipped across all splits.
    pub fn skipped_images(&self) -> usize {
        self.splits.iter().map(|s| s.skipped_images).sum()
    }

    /// Summary for one split, if it was written.
    pub fn split(&self, split: Split) -> Option<&SplitSummary> {
        self.splits.iter().find(|s| s.split == split)
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion complete!")?;
        writeln!(f, "Dataset created at: {}", self.output_dir.display())?;

        for summary in &self.splits {
            writeln!(f)?;
            write!(f, "{}", summary)?;
        }

        if self.class_mapping.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "Final Class Mapping Summary:")?;
        writeln!(f, "{}", TABLE_RULE)?;
        writeln!(f, "Roboflow ID | Original ID | Class Name")?;
        writeln!(f, "{}", TABLE_RULE)?;
        for row in &self.class_mapping {
            if row.duplicate {
                writeln!(
                    f,
                    "{:10} | {:10} | {} (duplicate)",
                    "", row.original_id.as_i64(), row.name
                )?;
            } else {
                writeln!(
                    f,
                    "{:10} | {:10} | {}",
                    row.index.as_u64(),
                    row.original_id.as_i64(),
                    row.name
                )?;
            }
        }
        writeln!(f, "{}", TABLE_RULE)
    }
}

/// Per-split counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub split: Split,
    /// Directory name under the output root (`valid` for the val split).
    pub output_dir_name: String,
    /// Images listed in the split's annotation file.
    pub total_images: usize,
    /// Images copied and rewritten.
    pub processed_images: usize,
    /// Images whose source file was missing.
    pub skipped_images: usize,
    /// Annotations removed along with missing images.
    pub dropped_annotations: usize,
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Split: {}", self.output_dir_name)?;
        writeln!(f, "  Total images in annotations: {}", self.total_images)?;
        writeln!(f, "  Successfully processed: {}", self.processed_images)?;
        if self.skipped_images > 0 {
            writeln!(f, "  Skipped (images not found): {}", self.skipped_images)?;
        }
        if self.dropped_annotations > 0 {
            writeln!(
                f,
                "  Dropped annotations of missing images: {}",
                self.dropped_annotations
            )?;
        }
        Ok(())
    }
}
