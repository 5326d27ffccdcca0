use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    amount::Amount,
    order::{ChosenGroup, OrderLine},
    product::Product,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfiguratorError {
    #[error("Unknown param group '{group_id}' for product '{product_id}'")]
    UnknownGroup {
        product_id: String,
        group_id: String,
    },

    #[error("Unknown option '{option_id}' in group '{group_id}' of product '{product_id}'")]
    UnknownOption {
        product_id: String,
        group_id: String,
        option_id: String,
    },
}

/// Live configuration state for one catalog product.
///
/// Owns the current selection and quantity and always knows the price of
/// the configuration as it stands. Accepting a configuration emits an
/// immutable [`OrderLine`] snapshot and leaves the configurator editable,
/// so one configurator can produce many cart lines over its lifetime.
pub struct ProductConfigurator {
    product: Arc<Product>,
    selection: HashMap<String, BTreeSet<String>>,
    amount: Amount,
    unit_price: f64,
    total_price: f64,
    active_variants: BTreeMap<String, BTreeSet<String>>,
}

impl ProductConfigurator {
    /// Start from the catalog defaults; the initial unit price equals the
    /// product's base price.
    pub fn new(product: Arc<Product>) -> Self {
        let selection = product.default_selection();
        let mut configurator = Self {
            product,
            selection,
            amount: Amount::new(),
            unit_price: 0.0,
            total_price: 0.0,
            active_variants: BTreeMap::new(),
        };
        configurator.recompute_price();
        configurator
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Current authoritative unit price, as of the last recompute.
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Unit price multiplied by the current quantity.
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn quantity(&self) -> u32 {
        self.amount.value()
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn is_selected(&self, group_id: &str, option_id: &str) -> bool {
        self.selection
            .get(group_id)
            .map(|options| options.contains(option_id))
            .unwrap_or(false)
    }

    /// Per-group set of option ids whose visual variant is active. A
    /// variant is active iff its option is selected, independently per
    /// option; the rendering collaborator decides how that is drawn.
    pub fn active_variants(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.active_variants
    }

    /// Select or deselect one option. Ids are checked against the catalog
    /// definition before any state changes: an unknown id fails fast and
    /// leaves selection and price untouched.
    pub fn set_selection(
        &mut self,
        group_id: &str,
        option_id: &str,
        selected: bool,
    ) -> Result<(), ConfiguratorError> {
        let group = self.product.param(group_id).ok_or_else(|| {
            ConfiguratorError::UnknownGroup {
                product_id: self.product.id.clone(),
                group_id: group_id.to_string(),
            }
        })?;

        if group.option(option_id).is_none() {
            return Err(ConfiguratorError::UnknownOption {
                product_id: self.product.id.clone(),
                group_id: group_id.to_string(),
                option_id: option_id.to_string(),
            });
        }

        let chosen = self.selection.entry(group_id.to_string()).or_default();
        if selected {
            chosen.insert(option_id.to_string());
        } else {
            chosen.remove(option_id);
        }

        self.recompute_price();
        Ok(())
    }

    /// Set the quantity, clamped silently into the widget bounds.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.amount.set(quantity);
        self.recompute_price();
    }

    pub fn increment_quantity(&mut self) {
        self.amount.increment();
        self.recompute_price();
    }

    pub fn decrement_quantity(&mut self) {
        self.amount.decrement();
        self.recompute_price();
    }

    /// Full O(groups x options) price recompute from the catalog definition
    /// and the current selection. Catalog option counts are small and
    /// bounded, so a full pass beats incremental bookkeeping.
    pub fn recompute_price(&mut self) {
        let mut price = self.product.base_price;
        let mut active_variants = BTreeMap::new();

        for group in &self.product.params {
            let chosen = self.selection.get(&group.id);
            let mut active = BTreeSet::new();

            for (option_id, option) in &group.options {
                let selected = chosen
                    .map(|options| options.contains(option_id))
                    .unwrap_or(false);

                // The base price already accounts for the defaults, so only
                // deviations from the default state move the price.
                if selected && !option.default {
                    price += option.price;
                } else if !selected && option.default {
                    price -= option.price;
                }

                if selected {
                    active.insert(option_id.clone());
                }
            }

            active_variants.insert(group.id.clone(), active);
        }

        self.unit_price = price;
        self.total_price = price * f64::from(self.amount.value());
        self.active_variants = active_variants;

        debug!(
            "Recomputed price for '{}': unit {} total {} (quantity {})",
            self.product.id, self.unit_price, self.total_price, self.quantity()
        );
    }

    /// Snapshot the current configuration into an immutable cart line.
    ///
    /// Only groups with a non-empty selection appear on the line. The
    /// configurator's own selection and quantity are untouched; later
    /// edits never reach an already-accepted line.
    pub fn accept_for_cart(&self) -> OrderLine {
        let mut chosen = BTreeMap::new();

        for group in &self.product.params {
            let Some(selected_ids) = self.selection.get(&group.id) else {
                continue;
            };
            if selected_ids.is_empty() {
                continue;
            }

            let options = selected_ids
                .iter()
                .filter_map(|option_id| {
                    group
                        .option(option_id)
                        .map(|option| (option_id.clone(), option.label.clone()))
                })
                .collect();

            chosen.insert(
                group.id.clone(),
                ChosenGroup {
                    label: group.label.clone(),
                    options,
                },
            );
        }

        let quantity = self.amount.value();
        let line = OrderLine {
            id: Uuid::new_v4(),
            product_id: self.product.id.clone(),
            product_name: self.product.name.clone(),
            chosen,
            unit_price: self.unit_price,
            quantity,
            line_total: self.unit_price * f64::from(quantity),
            accepted_at: Utc::now(),
        };

        info!(
            "Accepted '{}' for cart: {} x {} = {} (line {})",
            line.product_id, line.quantity, line.unit_price, line.line_total, line.id
        );

        line
    }
}
