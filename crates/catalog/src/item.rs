//! Clothing items and their size/stock variants.
//!
//! Form input arrives as an untrusted [`ClothingItemDraft`]; validation
//! collects every problem at once (field-keyed, variant errors indexed) and
//! only a draft that passes becomes a [`ClothingItem`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use clothesphere_core::{Entity, ItemId, ValueObject};

use crate::category::{ClothingCategory, Gender, gender_after_category_change};

/// Largest stock count a variant can carry.
pub const MAX_VARIANT_STOCK: i64 = u32::MAX as i64;

/// Canonical size options presented by the variant form.
pub const SIZE_OPTIONS: [&str; 7] = ["XS", "S", "M", "L", "XL", "XXL", "Free Size"];

/// Canonical color options presented by the item form.
pub const COLOR_OPTIONS: [&str; 13] = [
    "Red", "Blue", "Green", "Black", "White", "Grey", "Yellow", "Pink", "Navy", "Beige", "Brown",
    "Purple", "Orange",
];

/// A size/stock pair: the unit at which inventory is actually counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingVariant {
    pub size: String,
    pub stock: u32,
}

impl ValueObject for ClothingVariant {}

/// A validated catalog item.
///
/// Constructed only through [`ClothingItemDraft::into_item`], so the
/// invariants (non-empty variant list, unique sizes, legal category/gender
/// pair) hold for every live value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItem {
    id: ItemId,
    name: String,
    description: String,
    brand: String,
    category: ClothingCategory,
    gender: Gender,
    color: String,
    /// Price in smallest currency unit (whole yen).
    price: u64,
    variants: Vec<ClothingVariant>,
    /// Opaque image payload (e.g. a data URL), or none.
    image_url: Option<String>,
}

impl ClothingItem {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn category(&self) -> ClothingCategory {
        self.category
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn variants(&self) -> &[ClothingVariant] {
        &self.variants
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Current stock for a size, if the item carries that size at all.
    pub fn variant_stock(&self, size: &str) -> Option<u32> {
        self.variants.iter().find(|v| v.size == size).map(|v| v.stock)
    }
}

impl Entity for ClothingItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

/// A catalog-item validation failure, keyed by field or variant index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    #[error("item name is required")]
    MissingName,

    #[error("brand is required")]
    MissingBrand,

    #[error("color is required")]
    MissingColor,

    #[error("price cannot be negative")]
    NegativePrice,

    #[error(
        "gender \"{gender}\" is not valid for category \"{category}\" (allowed: {})",
        allowed_list(.category)
    )]
    CategoryGenderMismatch {
        category: ClothingCategory,
        gender: Gender,
    },

    #[error("at least one size variant is required")]
    NoVariants,

    #[error("variant #{}: size is required", one_based(.index))]
    MissingVariantSize { index: usize },

    #[error("variant #{} ({size}): stock cannot be negative", one_based(.index))]
    NegativeVariantStock { index: usize, size: String },

    #[error(
        "variant #{} ({size}): stock cannot exceed {MAX_VARIANT_STOCK}",
        one_based(.index)
    )]
    ExcessiveVariantStock { index: usize, size: String },

    #[error("variant #{}: size {size} is duplicated; sizes must be unique", one_based(.index))]
    DuplicateVariantSize { index: usize, size: String },
}

fn one_based(index: &usize) -> usize {
    index + 1
}

fn allowed_list(category: &ClothingCategory) -> String {
    let labels: Vec<&str> = category.allowed_genders().iter().map(Gender::label).collect();
    labels.join(", ")
}

/// An unvalidated size/stock row, as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDraft {
    pub size: String,
    pub stock: i64,
}

/// An unvalidated item payload, as submitted by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItemDraft {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: ClothingCategory,
    pub gender: Gender,
    pub color: String,
    pub price: i64,
    pub variants: Vec<VariantDraft>,
    pub image_url: Option<String>,
}

impl ClothingItemDraft {
    /// A blank draft for a new item in the given category.
    pub fn new(category: ClothingCategory) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            brand: String::new(),
            category,
            gender: category.default_gender(),
            color: COLOR_OPTIONS[0].to_string(),
            price: 0,
            variants: vec![VariantDraft {
                size: SIZE_OPTIONS[0].to_string(),
                stock: 0,
            }],
            image_url: None,
        }
    }

    /// Seed a draft from an existing item for editing.
    pub fn from_item(item: &ClothingItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            brand: item.brand.clone(),
            category: item.category,
            gender: item.gender,
            color: item.color.clone(),
            price: item.price as i64,
            variants: item
                .variants
                .iter()
                .map(|v| VariantDraft {
                    size: v.size.clone(),
                    stock: v.stock as i64,
                })
                .collect(),
            image_url: item.image_url.clone(),
        }
    }

    /// Change the category, adjusting gender when the current one becomes
    /// illegal for the new category.
    pub fn change_category(&mut self, new_category: ClothingCategory) {
        self.gender = gender_after_category_change(new_category, self.gender);
        self.category = new_category;
    }

    /// Append a variant row, picking the first size not already used.
    pub fn add_variant(&mut self) {
        let next = SIZE_OPTIONS
            .iter()
            .find(|s| !self.variants.iter().any(|v| v.size == **s))
            .unwrap_or(&SIZE_OPTIONS[0]);
        self.variants.push(VariantDraft {
            size: next.to_string(),
            stock: 0,
        });
    }

    /// Remove a variant row. At least one row must remain.
    pub fn remove_variant(&mut self, index: usize) -> Result<(), ItemValidationError> {
        if self.variants.len() <= 1 {
            return Err(ItemValidationError::NoVariants);
        }
        if index < self.variants.len() {
            self.variants.remove(index);
        }
        Ok(())
    }

    /// Validate the draft, collecting every failure rather than stopping at
    /// the first.
    pub fn validate(&self) -> Result<(), Vec<ItemValidationError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ItemValidationError::MissingName);
        }
        if self.brand.trim().is_empty() {
            errors.push(ItemValidationError::MissingBrand);
        }
        if self.color.trim().is_empty() {
            errors.push(ItemValidationError::MissingColor);
        }
        if self.price < 0 {
            errors.push(ItemValidationError::NegativePrice);
        }
        if !self.category.allows(self.gender) {
            errors.push(ItemValidationError::CategoryGenderMismatch {
                category: self.category,
                gender: self.gender,
            });
        }

        if self.variants.is_empty() {
            errors.push(ItemValidationError::NoVariants);
        } else {
            for (index, variant) in self.variants.iter().enumerate() {
                if variant.size.trim().is_empty() {
                    errors.push(ItemValidationError::MissingVariantSize { index });
                } else if variant.stock < 0 {
                    errors.push(ItemValidationError::NegativeVariantStock {
                        index,
                        size: variant.size.clone(),
                    });
                } else if variant.stock > MAX_VARIANT_STOCK {
                    errors.push(ItemValidationError::ExcessiveVariantStock {
                        index,
                        size: variant.size.clone(),
                    });
                } else if self
                    .variants
                    .iter()
                    .enumerate()
                    .any(|(other, v)| other != index && v.size == variant.size)
                {
                    // Every index sharing the size gets its own error, so the
                    // form can mark each offending row.
                    errors.push(ItemValidationError::DuplicateVariantSize {
                        index,
                        size: variant.size.clone(),
                    });
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate and convert into a catalog item under the given id.
    pub fn into_item(self, id: ItemId) -> Result<ClothingItem, Vec<ItemValidationError>> {
        self.validate()?;
        Ok(ClothingItem {
            id,
            name: self.name.trim().to_string(),
            description: self.description,
            brand: self.brand.trim().to_string(),
            category: self.category,
            gender: self.gender,
            color: self.color,
            price: u64::try_from(self.price).unwrap_or(0),
            variants: self
                .variants
                .into_iter()
                .map(|v| ClothingVariant {
                    size: v.size,
                    stock: u32::try_from(v.stock).unwrap_or(u32::MAX),
                })
                .collect(),
            image_url: self.image_url,
        })
    }
}

/// Distinct brand names across the catalog, sorted, for form autocomplete.
pub fn unique_brands(items: &[ClothingItem]) -> Vec<String> {
    let mut brands: Vec<String> = items
        .iter()
        .map(|i| i.brand().to_string())
        .filter(|b| !b.is_empty())
        .collect();
    brands.sort();
    brands.dedup();
    brands
}
