use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be greater than 0")]
    InvalidQuantity,

    #[error("unit price must not be negative")]
    InvalidUnitPrice,

    #[error("item is not in the cart")]
    ItemNotFound,
}

/// One product-plus-quantity entry in a cart.
///
/// `unit_price` is a snapshot taken when the item is first added; later adds
/// with the same `id` merge quantities against that snapshot. `metadata` is
/// free-form (size, customization text) and never affects pricing math.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Descriptor for an item about to enter the cart, before it has a quantity.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub metadata: Option<serde_json::Value>,
}

/// In-memory cart state with incrementally maintained aggregates.
///
/// Invariants, preserved by every command:
/// - every item present has `quantity >= 1`
/// - `total_quantity` equals the sum of quantities
/// - `subtotal` equals the sum of `unit_price * quantity`
/// - at most one item per `id`; adds with an existing id merge quantities
///
/// Items keep insertion order for display. Commands that fail leave the cart
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    total_quantity: u64,
    subtotal: Decimal,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` of an item, merging into an existing entry with the
    /// same id. On a merge the stored price snapshot wins.
    pub fn add(&mut self, item: NewLineItem, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if item.unit_price < Decimal::ZERO {
            return Err(CartError::InvalidUnitPrice);
        }

        let unit_price = match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                existing.quantity += quantity;
                existing.unit_price
            }
            None => {
                self.items.push(LineItem {
                    id: item.id,
                    name: item.name,
                    unit_price: item.unit_price,
                    quantity,
                    metadata: item.metadata,
                });
                item.unit_price
            }
        };

        self.total_quantity += u64::from(quantity);
        self.subtotal += unit_price * Decimal::from(quantity);
        Ok(())
    }

    /// Removes an item entirely. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &str) {
        let Some(pos) = self.items.iter().position(|i| i.id == id) else {
            return;
        };
        let item = self.items.remove(pos);
        self.subtract(&item);
    }

    /// Replaces an item's quantity, adjusting aggregates by the delta.
    /// A quantity of zero removes the item rather than leaving it behind.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> Result<(), CartError> {
        let Some(pos) = self.items.iter().position(|i| i.id == id) else {
            return Err(CartError::ItemNotFound);
        };

        if quantity == 0 {
            let item = self.items.remove(pos);
            self.subtract(&item);
            return Ok(());
        }

        let item = &mut self.items[pos];
        let old = item.quantity;
        item.quantity = quantity;
        let unit_price = item.unit_price;

        self.total_quantity = self.total_quantity + u64::from(quantity) - u64::from(old);
        self.subtotal += unit_price * (Decimal::from(quantity) - Decimal::from(old));
        Ok(())
    }

    /// Empties the cart. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_quantity = 0;
        self.subtotal = Decimal::ZERO;
    }

    fn subtract(&mut self, item: &LineItem) {
        // aggregates never go negative, even if state were somehow skewed
        self.total_quantity = self.total_quantity.saturating_sub(u64::from(item.quantity));
        self.subtotal =
            (self.subtotal - item.unit_price * Decimal::from(item.quantity)).max(Decimal::ZERO);
    }
}
