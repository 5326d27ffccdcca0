use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::order::{CartTotals, ContactInfo, OrderLine, OrderPayload, PayloadLine};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartError {
    #[error("Cart line {0} not found")]
    LineNotFound(Uuid),
}

/// The order in progress: an ordered collection of accepted lines plus
/// totals that are kept consistent with it.
///
/// Lines keep insertion order, also across removals. The delivery fee is
/// constant for the session. Totals are recomputed in full after every
/// mutation; carts are small, so there is no incremental bookkeeping.
pub struct Cart {
    lines: Vec<OrderLine>,
    delivery_fee: f64,
    totals: CartTotals,
}

impl Cart {
    pub fn new(delivery_fee: f64) -> Self {
        let mut cart = Self {
            lines: Vec::new(),
            delivery_fee,
            totals: CartTotals::default(),
        };
        cart.recompute_totals();
        cart
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn totals(&self) -> CartTotals {
        self.totals
    }

    pub fn delivery_fee(&self) -> f64 {
        self.delivery_fee
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Append an accepted line. Always succeeds; there is no capacity
    /// limit.
    pub fn add_line(&mut self, line: OrderLine) -> Uuid {
        let line_id = line.id;
        info!(
            "Adding line {} to cart: {} x {}",
            line_id, line.quantity, line.product_id
        );

        self.lines.push(line);
        self.recompute_totals();
        line_id
    }

    /// Remove exactly the line with the given id, preserving the order of
    /// the remaining lines. An unknown id is a caller contract violation:
    /// the cart is left untouched and the error is surfaced.
    pub fn remove_line(&mut self, line_id: Uuid) -> Result<OrderLine, CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.id == line_id)
            .ok_or_else(|| {
                warn!("Attempted to remove unknown cart line {}", line_id);
                CartError::LineNotFound(line_id)
            })?;

        let removed = self.lines.remove(index);
        self.recompute_totals();

        info!(
            "Removed line {} from cart ({} lines remain)",
            line_id,
            self.lines.len()
        );
        Ok(removed)
    }

    /// Build the submission payload from the current cart state. Pure:
    /// no side effects, callable any number of times, and each call
    /// serializes whatever the cart holds at that moment.
    pub fn build_payload(&self, contact_info: ContactInfo) -> OrderPayload {
        OrderPayload {
            contact_info,
            item_count: self.totals.item_count,
            subtotal: self.totals.subtotal,
            grand_total: self.totals.grand_total,
            delivery_fee: self.delivery_fee,
            lines: self.lines.iter().map(PayloadLine::from).collect(),
        }
    }

    // Private helper methods

    /// Full fold over the lines after every mutation.
    fn recompute_totals(&mut self) {
        let mut item_count = 0;
        let mut subtotal = 0.0;

        for line in &self.lines {
            item_count += line.quantity;
            subtotal += line.line_total;
        }

        self.totals = CartTotals {
            item_count,
            subtotal,
            grand_total: subtotal + self.delivery_fee,
        };
    }
}
