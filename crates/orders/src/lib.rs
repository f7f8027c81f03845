//! `clothesphere-orders` — purchase orders and the cart they are assembled
//! in, including the stock-reconciliation rules that cap line quantities
//! against live catalog stock.

pub mod cart;
pub mod order;

pub use cart::{
    Cart, CartError, CartLine, EditContext, LineKey, StockSource, StockWarning, VariantSelection,
    available_quantity,
};
pub use order::{Order, OrderItem, OrderStatus, OrderValidationError, validate_order};
