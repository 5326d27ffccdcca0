use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use validator::{Validate, ValidationError};

/// One choice inside a param group, carrying a price adjustment and a
/// default-selected flag. The product's base price already accounts for
/// every option with `default: true` being active.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductOption {
    pub label: String,
    pub price: f64,
    #[serde(default)]
    pub default: bool,
}

/// A named set of options the user can choose among for one product.
/// Groups may allow multiple simultaneous selections.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParamGroup {
    pub id: String,
    pub label: String,
    pub options: BTreeMap<String, ProductOption>,
}

impl ParamGroup {
    pub fn option(&self, option_id: &str) -> Option<&ProductOption> {
        self.options.get(option_id)
    }

    /// Option ids flagged as default in the catalog definition.
    pub fn default_option_ids(&self) -> BTreeSet<String> {
        self.options
            .iter()
            .filter(|(_, option)| option.default)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// A catalog entry. Immutable once loaded; the configurator only reads it.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct Product {
    #[validate(length(min = 1, message = "Product id must not be empty"))]
    pub id: String,

    #[validate(length(min = 1, max = 255, message = "Product name must be 1-255 characters"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom = "validate_price")]
    pub base_price: f64,

    #[serde(default)]
    #[validate(custom = "validate_params")]
    pub params: Vec<ParamGroup>,
}

impl Product {
    pub fn param(&self, group_id: &str) -> Option<&ParamGroup> {
        self.params.iter().find(|group| group.id == group_id)
    }

    /// The selection the catalog declares as the starting point: every
    /// group present, populated with its default-flagged options.
    pub fn default_selection(&self) -> HashMap<String, BTreeSet<String>> {
        self.params
            .iter()
            .map(|group| (group.id.clone(), group.default_option_ids()))
            .collect()
    }
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::new("price_negative"));
    }
    Ok(())
}

fn validate_params(params: &Vec<ParamGroup>) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for group in params {
        if group.id.trim().is_empty() {
            return Err(ValidationError::new("group_id_empty"));
        }
        if !seen.insert(group.id.as_str()) {
            return Err(ValidationError::new("group_id_duplicate"));
        }
        for (option_id, option) in &group.options {
            if option_id.trim().is_empty() || option.label.trim().is_empty() {
                return Err(ValidationError::new("option_malformed"));
            }
            if !option.price.is_finite() {
                return Err(ValidationError::new("option_price_invalid"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str, price: f64, default: bool) -> ProductOption {
        ProductOption {
            label: label.to_string(),
            price,
            default,
        }
    }

    fn sample_product() -> Product {
        let mut options = BTreeMap::new();
        options.insert("olives".to_string(), option("Olives", 2.0, true));
        options.insert("mushrooms".to_string(), option("Mushrooms", 2.5, false));

        Product {
            id: "pizza".to_string(),
            name: "Margherita".to_string(),
            description: None,
            base_price: 20.0,
            params: vec![ParamGroup {
                id: "toppings".to_string(),
                label: "Toppings".to_string(),
                options,
            }],
        }
    }

    #[test]
    fn default_selection_contains_only_default_options() {
        let product = sample_product();
        let selection = product.default_selection();

        let toppings = selection.get("toppings").unwrap();
        assert!(toppings.contains("olives"));
        assert!(!toppings.contains("mushrooms"));
    }

    #[test]
    fn validation_rejects_negative_base_price() {
        let mut product = sample_product();
        product.base_price = -1.0;
        assert!(product.validate().is_err());
    }

    #[test]
    fn validation_rejects_duplicate_group_ids() {
        let mut product = sample_product();
        let duplicate = product.params[0].clone();
        product.params.push(duplicate);
        assert!(product.validate().is_err());
    }
}
