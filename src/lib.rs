//! coco2roboflow: convert COCO object detection datasets into the Roboflow
//! export layout.
//!
//! The input is a directory with up to three COCO annotation files
//! (`train.json`, `val.json`, `test.json`). The output has one folder per
//! split (`val` becomes `valid`), each holding an `images/` folder and a
//! `_annotations.coco.json` whose category ids form one contiguous zero-based
//! range shared by every split.
//!
//! # Modules
//!
//! - [`coco`]: COCO annotation documents with passthrough fields
//! - [`split`]: Split discovery
//! - [`reconcile`]: Name-based category reconciliation across splits
//! - [`materialize`]: Writing one split in the Roboflow layout
//! - [`conversion`]: The end-to-end pipeline, progress events and report
//! - [`error`]: Error types for coco2roboflow operations

pub mod coco;
pub mod conversion;
pub mod error;
pub mod materialize;
pub mod reconcile;
pub mod split;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use conversion::{convert_dataset, ConvertOptions};
pub use error::ConvertError;

/// The coco2roboflow CLI application.
#[derive(Parser)]
#[command(name = "coco2roboflow")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a COCO dataset directory into the Roboflow layout.
    Convert(ConvertArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Directory containing train.json / val.json / test.json.
    input_dir: PathBuf,

    /// Output directory for the Roboflow dataset (created if absent).
    output_dir: PathBuf,

    /// Base directory for image paths in the COCO files [default: INPUT_DIR].
    #[arg(long, env = "COCO2ROBOFLOW_IMAGES_DIR")]
    images_dir: Option<PathBuf>,

    /// Report progress every 10 processed images.
    #[arg(long)]
    verbose: bool,

    /// How category ids are reconciled across splits.
    #[arg(long, value_enum, default_value_t = CategoriesArg::Global)]
    categories: CategoriesArg,

    /// What to do with image records whose file is missing.
    #[arg(long, value_enum, default_value_t = MissingImagesArg::Keep)]
    missing_images: MissingImagesArg,

    /// Output format for the final report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CategoriesArg {
    /// Renumber by name into one zero-based range shared by all splits.
    Global,
    /// Keep each split's own category ids.
    PerSplit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MissingImagesArg {
    /// Keep the image record with its original path.
    Keep,
    /// Remove the image record and its annotations.
    Drop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

impl From<CategoriesArg> for conversion::CategoryMode {
    fn from(arg: CategoriesArg) -> Self {
        match arg {
            CategoriesArg::Global => conversion::CategoryMode::Global,
            CategoriesArg::PerSplit => conversion::CategoryMode::PerSplit,
        }
    }
}

impl From<MissingImagesArg> for conversion::MissingImagePolicy {
    fn from(arg: MissingImagesArg) -> Self {
        match arg {
            MissingImagesArg::Keep => conversion::MissingImagePolicy::Keep,
            MissingImagesArg::Drop => conversion::MissingImagePolicy::Drop,
        }
    }
}

/// Run the coco2roboflow CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            println!("coco2roboflow {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert COCO datasets into the Roboflow export layout.");
            println!();
            println!("Run 'coco2roboflow --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), ConvertError> {
    let opts = ConvertOptions {
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        images_dir: args.images_dir,
        verbose: args.verbose,
        category_mode: args.categories.into(),
        missing_images: args.missing_images.into(),
    };

    log::info!("Input directory: {}", opts.input_dir.display());
    log::info!("Output directory: {}", opts.output_dir.display());
    log::info!("Images directory: {}", opts.images_dir().display());

    let report = convert_dataset(&opts, &mut conversion::LogSink)?;

    match args.report {
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).map_err(ConvertError::ReportSerialize)?;
            println!("{}", json);
        }
        ReportFormat::Text => print!("{}", report),
    }

    Ok(())
}
