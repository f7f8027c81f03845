//! Product categories and the category/gender compatibility table.
//!
//! Apparel categories require a fit separation (men's / women's / unisex);
//! accessory categories do not track fit and only accept unisex or
//! not-applicable. The table is fixed business policy, not configuration.

use serde::{Deserialize, Serialize};

/// Gender classification of a catalog item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Mens,
    Womens,
    Unisex,
    NotApplicable,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Mens => "Men's",
            Gender::Womens => "Women's",
            Gender::Unisex => "Unisex",
            Gender::NotApplicable => "N/A",
        }
    }
}

impl core::fmt::Display for Gender {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Product category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothingCategory {
    Suits,
    Hoodies,
    LongSleeveTshirts,
    Tshirts,
    Shirts,
    PoloShirts,
    Jackets,
    DownJackets,
    DownVests,
    Pants,
    Shorts,
    Jeans,
    Skirts,
    Dresses,
    TankTops,
    Shoes,
    Bags,
    Wallets,
    KeyCases,
    Watches,
    Bracelets,
    Necklaces,
    Earrings,
    Brooches,
}

/// How a category relates to gender.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GenderPolicy {
    /// Apparel: carried in men's/women's/unisex fits; "not applicable" is illegal.
    SeparateFit,
    /// Accessories: no fit distinction; only unisex or not-applicable.
    FlexibleFit,
}

const SEPARATE_FIT_GENDERS: [Gender; 3] = [Gender::Mens, Gender::Womens, Gender::Unisex];
const FLEXIBLE_FIT_GENDERS: [Gender; 2] = [Gender::Unisex, Gender::NotApplicable];

impl ClothingCategory {
    /// All categories, in the order forms present them.
    pub const ALL: [ClothingCategory; 24] = [
        ClothingCategory::Suits,
        ClothingCategory::Hoodies,
        ClothingCategory::LongSleeveTshirts,
        ClothingCategory::Tshirts,
        ClothingCategory::Shirts,
        ClothingCategory::PoloShirts,
        ClothingCategory::Jackets,
        ClothingCategory::DownJackets,
        ClothingCategory::DownVests,
        ClothingCategory::Pants,
        ClothingCategory::Shorts,
        ClothingCategory::Jeans,
        ClothingCategory::Skirts,
        ClothingCategory::Dresses,
        ClothingCategory::TankTops,
        ClothingCategory::Shoes,
        ClothingCategory::Bags,
        ClothingCategory::Wallets,
        ClothingCategory::KeyCases,
        ClothingCategory::Watches,
        ClothingCategory::Bracelets,
        ClothingCategory::Necklaces,
        ClothingCategory::Earrings,
        ClothingCategory::Brooches,
    ];

    pub fn gender_policy(self) -> GenderPolicy {
        match self {
            ClothingCategory::Bags
            | ClothingCategory::Wallets
            | ClothingCategory::KeyCases
            | ClothingCategory::Watches
            | ClothingCategory::Bracelets
            | ClothingCategory::Necklaces
            | ClothingCategory::Earrings
            | ClothingCategory::Brooches => GenderPolicy::FlexibleFit,
            _ => GenderPolicy::SeparateFit,
        }
    }

    /// Genders legal for this category.
    pub fn allowed_genders(self) -> &'static [Gender] {
        match self.gender_policy() {
            GenderPolicy::SeparateFit => &SEPARATE_FIT_GENDERS,
            GenderPolicy::FlexibleFit => &FLEXIBLE_FIT_GENDERS,
        }
    }

    pub fn allows(self, gender: Gender) -> bool {
        self.allowed_genders().contains(&gender)
    }

    /// Gender a new item in this category defaults to.
    pub fn default_gender(self) -> Gender {
        match self.gender_policy() {
            GenderPolicy::SeparateFit => Gender::Mens,
            GenderPolicy::FlexibleFit => Gender::NotApplicable,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClothingCategory::Suits => "Suits",
            ClothingCategory::Hoodies => "Hoodies",
            ClothingCategory::LongSleeveTshirts => "Long-sleeve T-shirts",
            ClothingCategory::Tshirts => "T-shirts",
            ClothingCategory::Shirts => "Shirts",
            ClothingCategory::PoloShirts => "Polo shirts",
            ClothingCategory::Jackets => "Jackets",
            ClothingCategory::DownJackets => "Down jackets",
            ClothingCategory::DownVests => "Down vests",
            ClothingCategory::Pants => "Pants",
            ClothingCategory::Shorts => "Shorts",
            ClothingCategory::Jeans => "Jeans",
            ClothingCategory::Skirts => "Skirts",
            ClothingCategory::Dresses => "Dresses",
            ClothingCategory::TankTops => "Tank tops",
            ClothingCategory::Shoes => "Shoes",
            ClothingCategory::Bags => "Bags",
            ClothingCategory::Wallets => "Wallets",
            ClothingCategory::KeyCases => "Key cases",
            ClothingCategory::Watches => "Watches",
            ClothingCategory::Bracelets => "Bracelets",
            ClothingCategory::Necklaces => "Necklaces",
            ClothingCategory::Earrings => "Earrings",
            ClothingCategory::Brooches => "Brooches",
        }
    }
}

impl core::fmt::Display for ClothingCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Gender an item ends up with after its category changes.
///
/// A gender that is already legal for the new category survives the change;
/// an illegal one resets to the new category's default (Men's when entering
/// apparel from not-applicable, N/A when entering accessories).
pub fn gender_after_category_change(new_category: ClothingCategory, current: Gender) -> Gender {
    if new_category.allows(current) {
        current
    } else {
        new_category.default_gender()
    }
}
