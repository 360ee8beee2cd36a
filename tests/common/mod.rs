#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).expect("write json file");
}

pub fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read json file");
    serde_json::from_str(&text).expect("parse json file")
}

/// A two-split dataset where `dog` has id 2 in train and id 5 in val, and id
/// 1 means `cat` in train but `bird` in val.
///
/// Images live under `<root>/images/<split>/`.
pub fn create_sample_dataset(root: &Path) {
    write_bmp(&root.join("images/train/t1.bmp"), 12, 8);
    write_bmp(&root.join("images/train/t2.bmp"), 20, 10);
    write_bmp(&root.join("images/val/v1.bmp"), 6, 6);

    write_json(
        &root.join("train.json"),
        &json!({
            "info": {"description": "sample dataset", "year": 2024},
            "licenses": [{"id": 1, "name": "CC BY 4.0", "url": "https://example.com"}],
            "images": [
                {"id": 1, "file_name": "images/train/t1.bmp", "width": 12, "height": 8},
                {"id": 2, "file_name": "images/train/t2.bmp", "width": 20, "height": 10, "license": 1}
            ],
            "annotations": [
                {"id": 1, "image_id": 1, "category_id": 1, "bbox": [1.0, 1.0, 4.0, 3.0], "area": 12.0, "iscrowd": 0},
                {"id": 2, "image_id": 2, "category_id": 2, "bbox": [2.5, 0.0, 5.0, 5.0], "area": 25.0, "iscrowd": 0,
                 "segmentation": [[2.5, 0.0, 7.5, 0.0, 7.5, 5.0]]}
            ],
            "categories": [
                {"id": 1, "name": "cat", "supercategory": "animal"},
                {"id": 2, "name": "dog", "supercategory": "animal"}
            ]
        }),
    );

    write_json(
        &root.join("val.json"),
        &json!({
            "images": [
                {"id": 1, "file_name": "images/val/v1.bmp", "width": 6, "height": 6},
                {"id": 2, "file_name": "images/val/missing.bmp", "width": 6, "height": 6}
            ],
            "annotations": [
                {"id": 1, "image_id": 1, "category_id": 5, "bbox": [0.0, 0.0, 2.0, 2.0]},
                {"id": 2, "image_id": 1, "category_id": 1, "bbox": [1.0, 1.0, 2.0, 2.0]},
                {"id": 3, "image_id": 2, "category_id": 1, "bbox": [1.0, 1.0, 1.0, 1.0]}
            ],
            "categories": [
                {"id": 5, "name": "dog", "supercategory": "animal"},
                {"id": 1, "name": "bird", "supercategory": "animal"}
            ]
        }),
    );
}
