//! Purchase orders: the persisted record a cart becomes at submission, and
//! the order-level validation that gates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use clothesphere_core::{Entity, ItemId, OrderId, PartnerStore};

use crate::cart::{Cart, EditContext, StockSource, available_quantity};

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in the order forms present them.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One committed order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: ItemId,
    pub size: String,
    pub quantity: u32,
    /// Unit price captured at purchase time, in smallest currency unit.
    pub price_at_purchase: u64,
}

/// An order-level validation failure. All failures for a submission are
/// collected and returned together, never one at a time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("a source store is required")]
    MissingSourceStore,

    #[error("an order needs at least one item")]
    EmptyCart,

    #[error("insufficient stock for {name} - {size} (max: {cap})")]
    InsufficientStock {
        name: String,
        size: String,
        cap: u32,
    },
}

/// Validate a cart for submission against *current* catalog stock.
///
/// Catalog state may have moved since lines were added, so every line's cap
/// is recomputed here; a quantity that was fine at add time can fail now.
/// Returns every problem found so the form can show them all at once.
pub fn validate_order<S: StockSource + ?Sized>(
    cart: &Cart,
    source_store: Option<PartnerStore>,
    catalog: &S,
    edit: Option<EditContext>,
) -> Result<(), Vec<OrderValidationError>> {
    let mut errors = Vec::new();

    if source_store.is_none() {
        errors.push(OrderValidationError::MissingSourceStore);
    }
    if cart.is_empty() {
        errors.push(OrderValidationError::EmptyCart);
    }

    for line in cart.lines() {
        let stock = catalog
            .variant_stock(line.key.item_id, &line.key.size)
            .unwrap_or(0);
        let cap = available_quantity(stock, edit, line.original_quantity);
        if line.quantity > cap {
            errors.push(OrderValidationError::InsufficientStock {
                name: line.display_name.clone(),
                size: line.key.size.clone(),
                cap,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(count = errors.len(), "order validation failed");
        Err(errors)
    }
}

/// A submitted purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    source_store: PartnerStore,
    items: Vec<OrderItem>,
    /// Always `sum(quantity * price_at_purchase)`; recomputed on every
    /// mutation, never trusted from outside.
    total_amount: u64,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Validate and submit a cart as a new order.
    ///
    /// Only here does the order gain an id and a creation timestamp. New
    /// orders start out `Pending`.
    pub fn submit<S: StockSource + ?Sized>(
        cart: &Cart,
        source_store: Option<PartnerStore>,
        catalog: &S,
        now: DateTime<Utc>,
    ) -> Result<Order, Vec<OrderValidationError>> {
        validate_order(cart, source_store, catalog, None)?;
        let source_store =
            source_store.ok_or_else(|| vec![OrderValidationError::MissingSourceStore])?;
        Ok(Order {
            id: OrderId::new(),
            source_store,
            items: items_from(cart),
            total_amount: cart.total(),
            status: OrderStatus::Pending,
            created_at: now,
        })
    }

    /// Validate and apply an edit session to this order.
    ///
    /// The order's own status is the edit context, so revising a shipped
    /// order gets the stock-plus-original headroom. Id, status, and
    /// creation time are preserved; items, source store, and total are
    /// replaced.
    pub fn apply_edit<S: StockSource + ?Sized>(
        &mut self,
        cart: &Cart,
        source_store: Option<PartnerStore>,
        catalog: &S,
    ) -> Result<(), Vec<OrderValidationError>> {
        validate_order(cart, source_store, catalog, Some(self.edit_context()))?;
        let source_store =
            source_store.ok_or_else(|| vec![OrderValidationError::MissingSourceStore])?;
        self.source_store = source_store;
        self.items = items_from(cart);
        self.total_amount = cart.total();
        Ok(())
    }

    /// The edit context a revision of this order runs under.
    pub fn edit_context(&self) -> EditContext {
        EditContext {
            order_status: self.status,
        }
    }

    pub fn source_store(&self) -> PartnerStore {
        self.source_store
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Status changes are free-form; stock is never adjusted here (shipment
    /// decrement is an external process).
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

fn items_from(cart: &Cart) -> Vec<OrderItem> {
    cart.lines()
        .iter()
        .map(|line| OrderItem {
            item_id: line.key.item_id,
            size: line.key.size.clone(),
            quantity: line.quantity,
            price_at_purchase: line.price_at_purchase,
        })
        .collect()
}
