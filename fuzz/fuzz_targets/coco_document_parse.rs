//! Fuzz target for COCO annotation document parsing.
//!
//! Feeds arbitrary bytes to the document parser and, when they parse, checks
//! that the document can be written back out.
//!
//! Run with:
//!   cargo +nightly fuzz run coco_document_parse

#![no_main]

use coco2roboflow::coco::{from_coco_slice, to_coco_string};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // 10MB is generous for JSON annotation files.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(doc) = from_coco_slice(data) {
        let _ = to_coco_string(&doc);
    }
});
