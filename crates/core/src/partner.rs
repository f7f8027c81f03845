//! Partner stores: the fixed set of external stores the business trades with.
//!
//! The same set serves two roles: the *source store* a purchase order buys
//! from, and the *outsourcing store* a consignment record is placed with.

use serde::{Deserialize, Serialize};

/// A partner store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerStore {
    Kintetsu,
    Third,
    Fourth,
    Orange,
}

impl PartnerStore {
    /// All partner stores, in the order forms present them.
    pub const ALL: [PartnerStore; 4] = [
        PartnerStore::Kintetsu,
        PartnerStore::Third,
        PartnerStore::Fourth,
        PartnerStore::Orange,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PartnerStore::Kintetsu => "Kintetsu",
            PartnerStore::Third => "3rd",
            PartnerStore::Fourth => "4th",
            PartnerStore::Orange => "Orange",
        }
    }
}

impl core::fmt::Display for PartnerStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
