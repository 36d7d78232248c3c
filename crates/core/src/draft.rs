//! The order-placement draft.
//!
//! A draft is the in-memory, not-yet-submitted form state: buyer fields plus
//! an ordered sequence of line-item rows. Every edit operation consumes the
//! draft and returns a new one with the row sequence rebuilt, so state
//! transitions stay auditable and testable.
//!
//! Row values are held as raw strings exactly as the form submitted them.
//! Coercion to typed values happens once, at submit time, in [`OrderDraft::validate`];
//! intermediate states (empty quantity, non-numeric input) are legal until then.

use crate::order::{NewLineItem, NewOrder};
use crate::product::Product;

/// One editable row of the order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemDraft {
    /// Selected product identifier, or empty when nothing is selected.
    pub product_id: String,
    /// Display name captured when the product was selected.
    pub product_name: String,
    /// Raw quantity input.
    pub quantity: String,
}

impl LineItemDraft {
    /// A blank row with the default quantity of 1.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            product_id: String::new(),
            product_name: String::new(),
            quantity: "1".to_string(),
        }
    }
}

/// Draft order form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub buyer_name: String,
    pub buyer_contact: String,
    pub delivery_address: String,
    pub items: Vec<LineItemDraft>,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderDraft {
    /// An empty draft with a single blank row.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buyer_name: String::new(),
            buyer_contact: String::new(),
            delivery_address: String::new(),
            items: vec![LineItemDraft::blank()],
        }
    }

    /// Append a blank row.
    #[must_use]
    pub fn with_item_added(mut self) -> Self {
        self.items.push(LineItemDraft::blank());
        self
    }

    /// Remove the row at `index`. Out-of-range indexes are a no-op, so a
    /// stale remove button cannot panic the form.
    #[must_use]
    pub fn with_item_removed(mut self, index: usize) -> Self {
        if index < self.items.len() {
            self.items.remove(index);
        }
        self
    }

    /// Select a product for the row at `index`, resolving its display name
    /// from the current catalog.
    ///
    /// An identifier not present in the catalog clears the stored name; the
    /// row then fails validation rather than submitting a dangling name.
    #[must_use]
    pub fn with_item_product(mut self, index: usize, product_id: &str, catalog: &[Product]) -> Self {
        if let Some(item) = self.items.get_mut(index) {
            item.product_id = product_id.to_string();
            item.product_name = catalog
                .iter()
                .find(|p| p.id.to_string() == product_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
        }
        self
    }

    /// Set the raw quantity input for the row at `index`.
    #[must_use]
    pub fn with_item_quantity(mut self, index: usize, quantity: &str) -> Self {
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity.to_string();
        }
        self
    }

    /// Validate the draft and transform it into the wire shape.
    ///
    /// All checks run locally before any network call. On failure the draft
    /// is left untouched and the caller re-renders it with the per-field
    /// messages; no partial submission ever occurs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when any buyer field is empty, the row
    /// list is empty, or any row lacks a product or an integer quantity >= 1.
    pub fn validate(&self) -> Result<NewOrder, ValidationErrors> {
        let mut errors = ValidationErrors::for_items(self.items.len());

        if self.buyer_name.trim().is_empty() {
            errors.buyer_name = Some("Buyer name is required.");
        }
        if self.buyer_contact.trim().is_empty() {
            errors.buyer_contact = Some("Contact number is required.");
        }
        if self.delivery_address.trim().is_empty() {
            errors.delivery_address = Some("Delivery address is required.");
        }
        if self.items.is_empty() {
            errors.line_items = Some("Add at least one item.");
        }

        let mut items = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            match validate_item(item) {
                Ok(line) => items.push(line),
                Err(message) => {
                    if let Some(slot) = errors.items.get_mut(index) {
                        *slot = Some(message);
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewOrder {
            buyer_name: self.buyer_name.trim().to_string(),
            buyer_contact: self.buyer_contact.trim().to_string(),
            delivery_address: self.delivery_address.trim().to_string(),
            items,
        })
    }
}

/// Coerce one row into its wire shape.
fn validate_item(item: &LineItemDraft) -> Result<NewLineItem, &'static str> {
    let product_id = item
        .product_id
        .trim()
        .parse()
        .map_err(|_| "Select a product.")?;

    let quantity: u32 = item
        .quantity
        .trim()
        .parse()
        .map_err(|_| "Quantity must be a whole number.")?;
    if quantity < 1 {
        return Err("Quantity must be at least 1.");
    }

    Ok(NewLineItem {
        product_id,
        product_name: item.product_name.clone(),
        quantity,
    })
}

/// Per-field validation messages for a rejected draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub buyer_name: Option<&'static str>,
    pub buyer_contact: Option<&'static str>,
    pub delivery_address: Option<&'static str>,
    /// List-level error (the draft must keep at least one row).
    pub line_items: Option<&'static str>,
    /// One slot per draft row, positionally aligned.
    pub items: Vec<Option<&'static str>>,
}

impl ValidationErrors {
    /// An empty error set sized to the draft's row count.
    #[must_use]
    pub fn for_items(count: usize) -> Self {
        Self {
            items: vec![None; count],
            ..Self::default()
        }
    }

    /// True when no field carries a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buyer_name.is_none()
            && self.buyer_contact.is_none()
            && self.delivery_address.is_none()
            && self.line_items.is_none()
            && self.items.iter().all(Option::is_none)
    }

    /// Message slot for the row at `index`, for template rendering.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&'static str> {
        self.items.get(index).copied().flatten()
    }
}
