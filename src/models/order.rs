use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The selected options of one param group as they appear on a cart line:
/// group label plus option id -> option label for every chosen option.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChosenGroup {
    pub label: String,
    pub options: BTreeMap<String, String>,
}

/// An immutable snapshot of one fully-priced, quantity-set configuration.
///
/// Minted by `ProductConfigurator::accept_for_cart`. The `id` is the line's
/// identity inside the cart: two lines with identical configuration are
/// still distinct entries. Once accepted, the line is independent of the
/// configurator it came from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderLine {
    pub id: Uuid,
    pub product_id: String,
    pub product_name: String,
    /// Only groups with a non-empty selection are present.
    pub chosen: BTreeMap<String, ChosenGroup>,
    pub unit_price: f64,
    pub quantity: u32,
    pub line_total: f64,
    pub accepted_at: DateTime<Utc>,
}

/// Aggregate cart figures, recomputed in full after every mutation.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct CartTotals {
    pub item_count: u32,
    pub subtotal: f64,
    pub grand_total: f64,
}

/// Address/phone supplied by the order form. Opaque to the core: content
/// is never validated here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ContactInfo {
    pub address: String,
    pub phone: String,
}

// Wire DTOs for order submission.

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayloadLine {
    pub catalog_item_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
    pub chosen_options: BTreeMap<String, ChosenGroup>,
}

impl From<&OrderLine> for PayloadLine {
    fn from(line: &OrderLine) -> Self {
        Self {
            catalog_item_id: line.product_id.clone(),
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total,
            chosen_options: line.chosen.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub contact_info: ContactInfo,
    pub item_count: u32,
    pub subtotal: f64,
    pub grand_total: f64,
    pub delivery_fee: f64,
    pub lines: Vec<PayloadLine>,
}
