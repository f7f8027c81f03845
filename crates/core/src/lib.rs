//! `clothesphere-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod partner;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, OrderId, OutsourcingId};
pub use partner::PartnerStore;
pub use value_object::ValueObject;
