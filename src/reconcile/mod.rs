//! Category reconciliation across independently numbered splits.
//!
//! Each split file numbers its categories on its own, so the same class can
//! carry different ids in `train.json` and `val.json`, and the same id can
//! name different classes. Identity is therefore the category *name*:
//!
//! 1. Categories are walked in split order (train, val, test), each split's
//!    array in file order, and every unseen name takes the next index.
//! 2. Each split keeps its own `id → name` table. Rewriting an id always goes
//!    `(split, id) → name → index`; there is no cross-split id table.
//!
//! The resulting indices are contiguous from zero and their count equals the
//! number of distinct names.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::coco::{CategoryId, CategoryRecord, ClassIndex, CocoDocument};
use crate::error::ConvertError;
use crate::split::Split;

/// The global name → index assignment plus the per-split id tables it was
/// derived from.
#[derive(Clone, Debug, Default)]
pub struct CategoryMapping {
    name_to_index: HashMap<String, ClassIndex>,
    unique: Vec<CategoryRecord>,
    local: BTreeMap<Split, HashMap<CategoryId, String>>,
    origins: BTreeMap<ClassIndex, BTreeMap<(CategoryId, String), BTreeSet<Split>>>,
}

/// One original `(id, name)` pair that collapsed into an output index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryOrigin {
    pub index: ClassIndex,
    pub original_id: CategoryId,
    pub name: String,
    /// Splits whose file defines this exact pair.
    pub splits: Vec<Split>,
    /// True for every pair after the first one listed for the same index.
    pub duplicate: bool,
}

impl CategoryMapping {
    /// Build the mapping from each split's original `categories` array.
    ///
    /// `tables` must already be in discovery order.
    ///
    /// # Errors
    /// Returns [`ConvertError::ConflictingCategoryId`] if one split defines the
    /// same id under two different names.
    pub fn build(tables: &[(Split, Vec<CategoryRecord>)]) -> Result<Self, ConvertError> {
        let mut mapping = CategoryMapping::default();

        for (split, categories) in tables {
            let local = mapping.local.entry(*split).or_default();

            for category in categories {
                if let Some(existing) = local.get(&category.id) {
                    if existing != &category.name {
                        return Err(ConvertError::ConflictingCategoryId {
                            split: *split,
                            id: category.id,
                            first: existing.clone(),
                            second: category.name.clone(),
                        });
                    }
                } else {
                    local.insert(category.id, category.name.clone());
                }

                let index = match mapping.name_to_index.get(&category.name) {
                    Some(index) => *index,
                    None => {
                        let index = ClassIndex::new(mapping.unique.len() as u64);
                        mapping.name_to_index.insert(category.name.clone(), index);

                        let mut unique = category.clone();
                        unique.id = index.into();
                        mapping.unique.push(unique);
                        index
                    }
                };

                mapping
                    .origins
                    .entry(index)
                    .or_default()
                    .entry((category.id, category.name.clone()))
                    .or_default()
                    .insert(*split);
            }
        }

        Ok(mapping)
    }

    /// Number of distinct category names.
    pub fn len(&self) -> usize {
        self.unique.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unique.is_empty()
    }

    /// One category per distinct name, ordered by index, `id` set to the index.
    pub fn unique_categories(&self) -> &[CategoryRecord] {
        &self.unique
    }

    /// Output index for a category name.
    pub fn index_for_name(&self, name: &str) -> Option<ClassIndex> {
        self.name_to_index.get(name).copied()
    }

    /// Output index for an id as numbered inside `split`'s own file.
    ///
    /// # Errors
    /// Returns [`ConvertError::UnknownCategoryId`] if that split never defined
    /// the id.
    pub fn index_of(&self, split: Split, id: CategoryId) -> Result<ClassIndex, ConvertError> {
        self.local
            .get(&split)
            .and_then(|table| table.get(&id))
            .and_then(|name| self.index_for_name(name))
            .ok_or(ConvertError::UnknownCategoryId { split, id })
    }

    /// Rewrite every `category_id` and category `id` in `split`'s document to
    /// output indices.
    ///
    /// All lookups are resolved before anything is modified, so on error the
    /// document is left as it was.
    pub fn apply(&self, split: Split, document: &mut CocoDocument) -> Result<(), ConvertError> {
        let annotation_ids = document
            .annotations
            .iter()
            .map(|ann| self.index_of(split, ann.category_id))
            .collect::<Result<Vec<_>, _>>()?;

        let category_ids = document
            .categories
            .iter()
            .map(|cat| {
                self.index_for_name(&cat.name)
                    .ok_or(ConvertError::UnknownCategoryId { split, id: cat.id })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (ann, index) in document.annotations.iter_mut().zip(annotation_ids) {
            ann.category_id = index.into();
        }
        for (cat, index) in document.categories.iter_mut().zip(category_ids) {
            cat.id = index.into();
        }

        Ok(())
    }

    /// Every original `(id, name)` pair grouped under its output index.
    ///
    /// Within an index, pairs are sorted by original id then name; all but the
    /// first are flagged as duplicates.
    pub fn origins(&self) -> Vec<CategoryOrigin> {
        let mut rows = Vec::new();

        for (index, pairs) in &self.origins {
            for (position, ((original_id, name), splits)) in pairs.iter().enumerate() {
                rows.push(CategoryOrigin {
                    index: *index,
                    original_id: *original_id,
                    name: name.clone(),
                    splits: splits.iter().copied().collect(),
                    duplicate: position > 0,
                });
            }
        }

        rows
    }
}
