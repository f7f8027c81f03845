//! Outsourcing (consignment) records.
//!
//! These records track goods placed with partner stores. They reference
//! items by free-form name, not catalog id, and never touch inventory
//! stock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use clothesphere_core::{Entity, OutsourcingId, PartnerStore};

/// Where a consigned item currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutsourcingStatus {
    /// Item is currently with the outsourcer.
    Outsourced,
    /// Item has been received back by one of our stores.
    ReceivedByStore,
    /// Item returned from our store to the original supplier.
    ReturnedToSupplier,
    ShippedToSeller,
    /// Agreement cancelled; item potentially back in main inventory.
    Cancelled,
}

impl OutsourcingStatus {
    /// All statuses, in the order forms present them.
    pub const ALL: [OutsourcingStatus; 5] = [
        OutsourcingStatus::Outsourced,
        OutsourcingStatus::ReceivedByStore,
        OutsourcingStatus::ReturnedToSupplier,
        OutsourcingStatus::ShippedToSeller,
        OutsourcingStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OutsourcingStatus::Outsourced => "Outsourced",
            OutsourcingStatus::ReceivedByStore => "Received by store",
            OutsourcingStatus::ReturnedToSupplier => "Returned to supplier",
            OutsourcingStatus::ShippedToSeller => "Shipped to seller",
            OutsourcingStatus::Cancelled => "Cancelled",
        }
    }
}

impl core::fmt::Display for OutsourcingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// An outsourcing-record validation failure, keyed by field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutsourcingValidationError {
    #[error("recipient name is required")]
    MissingRecipientName,

    #[error("item name is required")]
    MissingItemName,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("outsourcing date is required")]
    MissingDate,
}

/// A validated consignment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutsourcingRecord {
    id: OutsourcingId,
    outsourcing_store: PartnerStore,
    recipient_name: String,
    item_name: String,
    item_description: Option<String>,
    quantity: u32,
    date_outsourced: NaiveDate,
    status: OutsourcingStatus,
    notes: Option<String>,
    image_url: Option<String>,
}

impl OutsourcingRecord {
    pub fn outsourcing_store(&self) -> PartnerStore {
        self.outsourcing_store
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn item_description(&self) -> Option<&str> {
        self.item_description.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn date_outsourced(&self) -> NaiveDate {
        self.date_outsourced
    }

    pub fn status(&self) -> OutsourcingStatus {
        self.status
    }

    pub fn set_status(&mut self, status: OutsourcingStatus) {
        self.status = status;
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

impl Entity for OutsourcingRecord {
    type Id = OutsourcingId;

    fn id(&self) -> OutsourcingId {
        self.id
    }
}

/// An unvalidated outsourcing payload, as submitted by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutsourcingDraft {
    pub outsourcing_store: PartnerStore,
    pub recipient_name: String,
    pub item_name: String,
    pub item_description: Option<String>,
    pub quantity: i64,
    pub date_outsourced: Option<NaiveDate>,
    pub status: OutsourcingStatus,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

impl OutsourcingDraft {
    /// A blank draft dated `today` and placed with the first partner store.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            outsourcing_store: PartnerStore::ALL[0],
            recipient_name: String::new(),
            item_name: String::new(),
            item_description: None,
            quantity: 1,
            date_outsourced: Some(today),
            status: OutsourcingStatus::Outsourced,
            notes: None,
            image_url: None,
        }
    }

    /// Seed a draft from an existing record for editing.
    pub fn from_record(record: &OutsourcingRecord) -> Self {
        Self {
            outsourcing_store: record.outsourcing_store,
            recipient_name: record.recipient_name.clone(),
            item_name: record.item_name.clone(),
            item_description: record.item_description.clone(),
            quantity: i64::from(record.quantity),
            date_outsourced: Some(record.date_outsourced),
            status: record.status,
            notes: record.notes.clone(),
            image_url: record.image_url.clone(),
        }
    }

    /// Validate the draft, collecting every failure.
    pub fn validate(&self) -> Result<(), Vec<OutsourcingValidationError>> {
        let mut errors = Vec::new();
        if self.recipient_name.trim().is_empty() {
            errors.push(OutsourcingValidationError::MissingRecipientName);
        }
        if self.item_name.trim().is_empty() {
            errors.push(OutsourcingValidationError::MissingItemName);
        }
        if self.quantity < 1 || self.quantity > i64::from(u32::MAX) {
            errors.push(OutsourcingValidationError::InvalidQuantity);
        }
        if self.date_outsourced.is_none() {
            errors.push(OutsourcingValidationError::MissingDate);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate and convert into a record under the given id.
    pub fn into_record(
        self,
        id: OutsourcingId,
    ) -> Result<OutsourcingRecord, Vec<OutsourcingValidationError>> {
        self.validate()?;
        let date_outsourced = self
            .date_outsourced
            .ok_or_else(|| vec![OutsourcingValidationError::MissingDate])?;
        Ok(OutsourcingRecord {
            id,
            outsourcing_store: self.outsourcing_store,
            recipient_name: self.recipient_name.trim().to_string(),
            item_name: self.item_name.trim().to_string(),
            item_description: self.item_description.filter(|d| !d.trim().is_empty()),
            quantity: u32::try_from(self.quantity).unwrap_or(1),
            date_outsourced,
            status: self.status,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            image_url: self.image_url,
        })
    }
}
