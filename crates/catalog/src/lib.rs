//! `clothesphere-catalog` — inventory catalog: clothing items, size/stock
//! variants, and the category/gender compatibility rules.

pub mod category;
pub mod item;

pub use category::{ClothingCategory, Gender, GenderPolicy, gender_after_category_change};
pub use item::{
    COLOR_OPTIONS, ClothingItem, ClothingItemDraft, ClothingVariant, ItemValidationError,
    MAX_VARIANT_STOCK, SIZE_OPTIONS, VariantDraft, unique_brands,
};
