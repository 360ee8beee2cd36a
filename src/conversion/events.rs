//! Structured progress events emitted while a conversion runs.
//!
//! The pipeline never prints directly; it hands events to a [`ProgressSink`].
//! The CLI uses [`LogSink`], tests use [`RecordingSink`].

use std::path::PathBuf;

use log::{info, warn};

use super::SplitSummary;
use crate::split::Split;

/// Something that happened during a conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionEvent {
    /// Split files found in the input directory, in processing order.
    SplitsDiscovered { splits: Vec<Split> },
    /// Global reconciliation produced this many output classes.
    CategoriesReconciled { classes: usize },
    /// The split's annotation file disappeared after discovery.
    SplitSkipped { split: Split, path: PathBuf },
    SplitStarted { split: Split, output_dir: PathBuf },
    /// A referenced image was not found under the images directory.
    ImageMissing { split: Split, path: PathBuf },
    /// Emitted every 10 processed images when verbose progress is on.
    ImageProgress {
        split: Split,
        processed: usize,
        total: usize,
    },
    SplitFinished(SplitSummary),
}

/// Receiver for conversion events.
pub trait ProgressSink {
    fn event(&mut self, event: ConversionEvent);
}

/// Forwards events to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn event(&mut self, event: ConversionEvent) {
        match event {
            ConversionEvent::SplitsDiscovered { splits } => {
                let names: Vec<&str> = splits.iter().map(|s| s.name()).collect();
                info!("Found split files: [{}]", names.join(", "));
            }
            ConversionEvent::CategoriesReconciled { classes } => {
                info!("Reconciled categories into {} class(es)", classes);
            }
            ConversionEvent::SplitSkipped { split, path } => {
                warn!(
                    "Skipping {} split - file not found: {}",
                    split,
                    path.display()
                );
            }
            ConversionEvent::SplitStarted { split, output_dir } => {
                info!(
                    "Processing {} split into {}...",
                    split,
                    output_dir.display()
                );
            }
            ConversionEvent::ImageMissing { path, .. } => {
                warn!("Source image not found: {}", path.display());
            }
            ConversionEvent::ImageProgress {
                processed, total, ..
            } => {
                info!("  Processed {}/{} images...", processed, total);
            }
            ConversionEvent::SplitFinished(summary) => {
                info!(
                    "Split {}: {} image(s) listed, {} processed, {} skipped",
                    summary.output_dir_name,
                    summary.total_images,
                    summary.processed_images,
                    summary.skipped_images
                );
            }
        }
    }
}

/// Keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<ConversionEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths of every missing image reported so far.
    pub fn missing_images(&self) -> Vec<&PathBuf> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ConversionEvent::ImageMissing { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn event(&mut self, event: ConversionEvent) {
        self.events.push(event);
    }
}
