//! COCO annotation documents as read from and written to disk.
//!
//! The model is deliberately thin: a document is loaded verbatim, a handful
//! of fields are rewritten in place, and the rest is carried through as
//! opaque JSON.
//!
//! # Example
//!
//! ```
//! use coco2roboflow::coco::{from_coco_str, CategoryId};
//!
//! let doc = from_coco_str(
//!     r#"{"images": [], "annotations": [], "categories": [{"id": 2, "name": "dog"}]}"#,
//! )
//! .unwrap();
//! assert_eq!(doc.categories[0].id, CategoryId(2));
//! ```

mod document;
mod ids;

pub use document::{
    from_coco_slice, from_coco_str, read_category_table, read_coco_document, to_coco_string,
    write_coco_document, AnnotationRecord, CategoryRecord, CocoDocument, ImageRecord,
};
pub use ids::{CategoryId, ClassIndex};
