//! The order-in-progress: a cart of lines reconciled against catalog stock.
//!
//! The cart is a plain serializable value; every operation runs to
//! completion on the calling thread and either mutates the cart or returns
//! a structured error for the form to display. Stock arithmetic depends on
//! the edit context: non-shipped orders have not been deducted from catalog
//! stock yet, so their cap is the catalog stock itself, while a SHIPPED
//! order already consumed its original quantities, which must be added back
//! when recomputing headroom.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use clothesphere_catalog::ClothingItem;
use clothesphere_core::{Entity, ItemId, ValueObject};

use crate::order::{Order, OrderStatus};

/// Composite key identifying a cart line: which item, which size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub item_id: ItemId,
    pub size: String,
}

impl ValueObject for LineKey {}

/// Marker that an existing order is being revised, and in which status it
/// currently is. Absent when assembling a new order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EditContext {
    pub order_status: OrderStatus,
}

/// Maximum quantity currently purchasable for a line.
///
/// `original_quantity` is the quantity this line already committed before
/// the edit session began (0 for new orders and lines new to the session).
pub fn available_quantity(
    catalog_stock: u32,
    edit: Option<EditContext>,
    original_quantity: u32,
) -> u32 {
    match edit {
        // A shipped order already decremented catalog stock by its original
        // quantity; add it back before re-deducting the new quantity. The
        // sum saturates: stock has no upper bound, so the operands can sit
        // at the type's edge.
        Some(ctx) if ctx.order_status == OrderStatus::Shipped => {
            catalog_stock.saturating_add(original_quantity)
        }
        _ => catalog_stock,
    }
}

/// What the item/size picker hands the cart: a structured key plus the
/// display and pricing data captured at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSelection {
    pub key: LineKey,
    pub display_name: String,
    /// Unit price in smallest currency unit (whole yen).
    pub unit_price: u64,
    /// The variant's stock in the catalog right now.
    pub catalog_stock: u32,
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub key: LineKey,
    pub display_name: String,
    pub quantity: u32,
    /// Captured when the line was added; does not track later price changes.
    pub price_at_purchase: u64,
    /// Quantity committed against stock before this edit session (0 when
    /// building a new order or when the line is new to the session).
    pub original_quantity: u32,
}

/// A per-line stock warning recorded when a requested quantity was clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockWarning {
    pub key: LineKey,
    /// The cap the quantity was clamped to.
    pub cap: u32,
    pub message: String,
}

/// A recoverable cart mutation failure, ready for inline display.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("select an item and size first")]
    SelectionRequired,

    #[error("{name} - {size} is out of stock")]
    OutOfStock { name: String, size: String },

    #[error("insufficient stock for {name} - {size} (max: {cap})")]
    InsufficientStock {
        name: String,
        size: String,
        cap: u32,
    },
}

/// Read access to current catalog stock, as consumed by the cart and by
/// order validation.
pub trait StockSource {
    /// Current stock for `(item, size)`; `None` when the item or size is
    /// gone from the catalog.
    fn variant_stock(&self, item_id: ItemId, size: &str) -> Option<u32>;

    /// Display name of an item, if it still exists.
    fn item_name(&self, item_id: ItemId) -> Option<String>;
}

impl StockSource for [ClothingItem] {
    fn variant_stock(&self, item_id: ItemId, size: &str) -> Option<u32> {
        self.iter()
            .find(|item| item.id() == item_id)
            .and_then(|item| item.variant_stock(size))
    }

    fn item_name(&self, item_id: ItemId) -> Option<String> {
        self.iter()
            .find(|item| item.id() == item_id)
            .map(|item| item.name().to_string())
    }
}

/// The order-in-progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    warnings: Vec<StockWarning>,
}

impl ValueObject for Cart {}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a cart from a stored order for an edit session: each line is
    /// annotated with the quantity it already committed, and display names
    /// are resolved against the current catalog.
    pub fn from_order<S: StockSource + ?Sized>(order: &Order, catalog: &S) -> Self {
        let lines = order
            .items()
            .iter()
            .map(|item| CartLine {
                key: LineKey {
                    item_id: item.item_id,
                    size: item.size.clone(),
                },
                display_name: catalog
                    .item_name(item.item_id)
                    .unwrap_or_else(|| "unknown item".to_string()),
                quantity: item.quantity,
                price_at_purchase: item.price_at_purchase,
                original_quantity: item.quantity,
            })
            .collect();
        Self {
            lines,
            warnings: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn warnings(&self) -> &[StockWarning] {
        &self.warnings
    }

    pub fn warning(&self, key: &LineKey) -> Option<&StockWarning> {
        self.warnings.iter().find(|w| &w.key == key)
    }

    /// Add the selected variant to the cart.
    ///
    /// An existing line for the same key is incremented by 1, capped by
    /// [`available_quantity`]; a fresh line starts at quantity 1 and
    /// captures the unit price. On error the cart is unchanged.
    pub fn add_line(
        &mut self,
        selection: Option<VariantSelection>,
        edit: Option<EditContext>,
    ) -> Result<(), CartError> {
        let sel = selection.ok_or(CartError::SelectionRequired)?;

        if let Some(pos) = self.lines.iter().position(|l| l.key == sel.key) {
            let line = &self.lines[pos];
            let cap = available_quantity(sel.catalog_stock, edit, line.original_quantity);
            if line.quantity >= cap {
                debug!(
                    item = %sel.key.item_id,
                    size = %sel.key.size,
                    cap,
                    "add rejected: line already at stock cap"
                );
                return Err(CartError::InsufficientStock {
                    name: sel.display_name,
                    size: sel.key.size,
                    cap,
                });
            }
            self.lines[pos].quantity += 1;
        } else {
            // A fresh line needs live stock; edit sessions are more
            // permissive because the line may be a previously committed
            // shipped quantity.
            if sel.catalog_stock == 0 && edit.is_none() {
                return Err(CartError::OutOfStock {
                    name: sel.display_name,
                    size: sel.key.size,
                });
            }
            self.lines.push(CartLine {
                key: sel.key,
                display_name: sel.display_name,
                quantity: 1,
                price_at_purchase: sel.unit_price,
                original_quantity: 0,
            });
        }
        Ok(())
    }

    /// Set a line's quantity against current catalog stock.
    ///
    /// Zero is rejected as a no-op. A quantity above the cap is clamped to
    /// the cap and a [`StockWarning`] is recorded for the line; a quantity
    /// within the cap is applied and clears any prior warning.
    pub fn set_quantity(
        &mut self,
        key: &LineKey,
        new_quantity: u32,
        catalog_stock: u32,
        edit: Option<EditContext>,
    ) {
        if new_quantity == 0 {
            return;
        }
        let Some(pos) = self.lines.iter().position(|l| &l.key == key) else {
            return;
        };

        let cap = available_quantity(catalog_stock, edit, self.lines[pos].original_quantity);
        if new_quantity > cap {
            debug!(
                item = %key.item_id,
                size = %key.size,
                requested = new_quantity,
                cap,
                "quantity clamped to stock cap"
            );
            self.lines[pos].quantity = cap;
            let message = CartError::InsufficientStock {
                name: self.lines[pos].display_name.clone(),
                size: key.size.clone(),
                cap,
            }
            .to_string();
            self.set_warning(StockWarning {
                key: key.clone(),
                cap,
                message,
            });
        } else {
            self.lines[pos].quantity = new_quantity;
            self.clear_warning(key);
        }
    }

    /// Delete a line unconditionally, along with any warning attached to it.
    pub fn remove_line(&mut self, key: &LineKey) {
        self.lines.retain(|l| &l.key != key);
        self.clear_warning(key);
    }

    /// Order total: `sum(quantity * price_at_purchase)`. Always recomputed,
    /// never stored independently of its inputs.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .map(|l| u64::from(l.quantity) * l.price_at_purchase)
            .sum()
    }

    fn set_warning(&mut self, warning: StockWarning) {
        self.clear_warning(&warning.key);
        self.warnings.push(warning);
    }

    fn clear_warning(&mut self, key: &LineKey) {
        self.warnings.retain(|w| &w.key != key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(size: &str) -> LineKey {
        LineKey {
            item_id: ItemId::new(),
            size: size.to_string(),
        }
    }

    fn selection(key: &LineKey, price: u64, stock: u32) -> Option<VariantSelection> {
        Some(VariantSelection {
            key: key.clone(),
            display_name: "Denim Jacket".to_string(),
            unit_price: price,
            catalog_stock: stock,
        })
    }

    fn shipped_edit() -> Option<EditContext> {
        Some(EditContext {
            order_status: OrderStatus::Shipped,
        })
    }

    #[test]
    fn cap_equals_stock_when_not_editing() {
        assert_eq!(available_quantity(7, None, 3), 7);
        assert_eq!(available_quantity(0, None, 3), 0);
    }

    #[test]
    fn cap_equals_stock_when_editing_a_non_shipped_order() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Cancelled,
        ] {
            let edit = Some(EditContext {
                order_status: status,
            });
            assert_eq!(available_quantity(7, edit, 3), 7);
        }
    }

    #[test]
    fn cap_adds_original_quantity_for_a_shipped_order() {
        assert_eq!(available_quantity(7, shipped_edit(), 3), 10);
        assert_eq!(available_quantity(0, shipped_edit(), 2), 2);
    }

    #[test]
    fn cap_saturates_instead_of_wrapping_at_the_stock_ceiling() {
        assert_eq!(available_quantity(u32::MAX, shipped_edit(), 1), u32::MAX);
        assert_eq!(available_quantity(1, shipped_edit(), u32::MAX), u32::MAX);
        assert_eq!(
            available_quantity(u32::MAX, shipped_edit(), u32::MAX),
            u32::MAX
        );
    }

    #[test]
    fn adding_without_a_selection_requires_one() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_line(None, None), Err(CartError::SelectionRequired));
        assert!(cart.is_empty());
    }

    #[test]
    fn fresh_add_with_zero_stock_is_out_of_stock() {
        let mut cart = Cart::new();
        let k = key("M");
        let err = cart.add_line(selection(&k, 1000, 0), None).unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn fresh_add_with_zero_stock_is_allowed_in_an_edit_session() {
        let mut cart = Cart::new();
        let k = key("M");
        cart.add_line(selection(&k, 1000, 0), shipped_edit()).unwrap();
        assert_eq!(cart.line(&k).unwrap().quantity, 1);
        assert_eq!(cart.line(&k).unwrap().original_quantity, 0);
    }

    #[test]
    fn second_add_for_the_same_key_increments_until_the_cap() {
        let mut cart = Cart::new();
        let k = key("M");
        cart.add_line(selection(&k, 1000, 1), None).unwrap();
        assert_eq!(cart.line(&k).unwrap().quantity, 1);

        let err = cart.add_line(selection(&k, 1000, 1), None).unwrap_err();
        assert_eq!(
            err,
            CartError::InsufficientStock {
                name: "Denim Jacket".to_string(),
                size: "M".to_string(),
                cap: 1,
            }
        );
        // Failed add leaves the cart untouched.
        assert_eq!(cart.line(&k).unwrap().quantity, 1);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn add_captures_price_at_purchase() {
        let mut cart = Cart::new();
        let k = key("L");
        cart.add_line(selection(&k, 4800, 5), None).unwrap();
        // A later catalog price change does not affect the line.
        cart.add_line(selection(&k, 9999, 5), None).unwrap();
        assert_eq!(cart.line(&k).unwrap().price_at_purchase, 4800);
        assert_eq!(cart.line(&k).unwrap().quantity, 2);
    }

    #[test]
    fn set_quantity_zero_is_a_no_op() {
        let mut cart = Cart::new();
        let k = key("M");
        cart.add_line(selection(&k, 1000, 5), None).unwrap();
        cart.set_quantity(&k, 0, 5, None);
        assert_eq!(cart.line(&k).unwrap().quantity, 1);
        assert!(cart.warnings().is_empty());
    }

    #[test]
    fn set_quantity_above_cap_clamps_and_records_a_warning() {
        let mut cart = Cart::new();
        let k = key("M");
        cart.add_line(selection(&k, 1000, 3), None).unwrap();
        cart.set_quantity(&k, 10, 3, None);
        assert_eq!(cart.line(&k).unwrap().quantity, 3);
        let warning = cart.warning(&k).unwrap();
        assert_eq!(warning.cap, 3);
        assert!(warning.message.contains("max: 3"));
    }

    #[test]
    fn set_quantity_within_cap_clears_the_warning() {
        let mut cart = Cart::new();
        let k = key("M");
        cart.add_line(selection(&k, 1000, 3), None).unwrap();
        cart.set_quantity(&k, 10, 3, None);
        assert!(cart.warning(&k).is_some());
        cart.set_quantity(&k, 2, 3, None);
        assert_eq!(cart.line(&k).unwrap().quantity, 2);
        assert!(cart.warning(&k).is_none());
    }

    #[test]
    fn shipped_edit_session_allows_stock_plus_original() {
        let k = key("M");
        // A line seeded from the stored order carries its original quantity.
        let mut cart = Cart {
            lines: vec![CartLine {
                key: k.clone(),
                display_name: "Denim Jacket".to_string(),
                quantity: 3,
                price_at_purchase: 1000,
                original_quantity: 3,
            }],
            warnings: Vec::new(),
        };
        // Catalog shows 2 left, but the order already holds 3: cap is 5.
        cart.set_quantity(&k, 5, 2, shipped_edit());
        assert_eq!(cart.line(&k).unwrap().quantity, 5);
        assert!(cart.warning(&k).is_none());
        cart.set_quantity(&k, 6, 2, shipped_edit());
        assert_eq!(cart.line(&k).unwrap().quantity, 5);
        assert_eq!(cart.warning(&k).unwrap().cap, 5);
    }

    #[test]
    fn stock_vanishing_mid_edit_clamps_to_zero_with_a_warning() {
        let mut cart = Cart::new();
        let k = key("M");
        cart.add_line(selection(&k, 1000, 3), None).unwrap();
        // Stock ran out under the open cart: the clamp lands on the cap
        // itself (0) and the warning carries it; the line stays visible for
        // the user to remove.
        cart.set_quantity(&k, 2, 0, None);
        assert_eq!(cart.line(&k).unwrap().quantity, 0);
        assert_eq!(cart.warning(&k).unwrap().cap, 0);
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn remove_line_is_unconditional_and_drops_the_warning() {
        let mut cart = Cart::new();
        let k = key("M");
        cart.add_line(selection(&k, 1000, 3), None).unwrap();
        cart.set_quantity(&k, 10, 3, None);
        assert!(cart.warning(&k).is_some());
        cart.remove_line(&k);
        assert!(cart.is_empty());
        assert!(cart.warnings().is_empty());
        // Removing an absent line is fine.
        cart.remove_line(&k);
        assert!(cart.is_empty());
    }

    #[test]
    fn total_tracks_every_mutation() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), 0);

        let a = key("M");
        let b = key("L");
        cart.add_line(selection(&a, 1000, 5), None).unwrap();
        assert_eq!(cart.total(), 1000);
        cart.add_line(selection(&b, 250, 5), None).unwrap();
        assert_eq!(cart.total(), 1250);
        cart.set_quantity(&a, 3, 5, None);
        assert_eq!(cart.total(), 3250);
        cart.remove_line(&b);
        assert_eq!(cart.total(), 3000);
        cart.remove_line(&a);
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn cart_round_trips_through_json() {
        let mut cart = Cart::new();
        let k = key("M");
        cart.add_line(selection(&k, 1000, 3), None).unwrap();
        cart.set_quantity(&k, 10, 3, None);
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(cart, back);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: cap is exactly the stock outside shipped edits and
            /// exactly stock + original inside them.
            #[test]
            fn cap_arithmetic(stock in 0u32..100_000, original in 0u32..100_000) {
                prop_assert_eq!(available_quantity(stock, None, original), stock);
                let edit = Some(EditContext { order_status: OrderStatus::Pending });
                prop_assert_eq!(available_quantity(stock, edit, original), stock);
                prop_assert_eq!(
                    available_quantity(stock, shipped_edit(), original),
                    stock + original
                );
            }

            /// Property: the total always equals the sum over lines, whatever
            /// sequence of adds, quantity changes, and removals ran.
            #[test]
            fn total_matches_lines(ops in proptest::collection::vec((0u8..3, 0u32..4, 1u32..10, 0u32..8), 1..40)) {
                let keys: Vec<LineKey> = (0..4).map(|i| LineKey {
                    item_id: ItemId::new(),
                    size: format!("S{i}"),
                }).collect();
                let mut cart = Cart::new();
                for (op, key_ix, qty, stock) in ops {
                    let k = &keys[key_ix as usize];
                    match op {
                        0 => {
                            let _ = cart.add_line(Some(VariantSelection {
                                key: k.clone(),
                                display_name: "item".to_string(),
                                unit_price: 500,
                                catalog_stock: stock,
                            }), None);
                        }
                        1 => cart.set_quantity(k, qty, stock, None),
                        _ => cart.remove_line(k),
                    }
                    let expected: u64 = cart
                        .lines()
                        .iter()
                        .map(|l| u64::from(l.quantity) * l.price_at_purchase)
                        .sum();
                    prop_assert_eq!(cart.total(), expected);
                }
            }
        }
    }
}
