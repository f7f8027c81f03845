//! `clothesphere-outsourcing` — consignment records: items placed with
//! partner stores, tracked independently of inventory stock.

pub mod record;

pub use record::{
    OutsourcingDraft, OutsourcingRecord, OutsourcingStatus, OutsourcingValidationError,
};
