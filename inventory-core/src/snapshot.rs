//! Read-only dumps of the catalog as JSON or YAML
//!
//! Dumps are for display only and are never loaded back.

use anyhow::Result;
use serde::Serialize;

use crate::inventory::{AssociatedPart, Inventory};
use crate::models::{Part, Product};

/// A product together with the names of its associated parts
#[derive(Debug, Serialize)]
pub struct ProductEntry<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub associated_part_names: Vec<String>,
}

/// Everything in the inventory at one point in time
#[derive(Debug, Serialize)]
pub struct CatalogSnapshot<'a> {
    pub parts: &'a [Part],
    pub products: Vec<ProductEntry<'a>>,
}

/// Display name of a resolved association
pub fn associated_part_name(part: &AssociatedPart<'_>) -> String {
    match part {
        AssociatedPart::Present(part) => part.name.clone(),
        AssociatedPart::Missing(id) => format!("(deleted part #{})", id),
    }
}

impl<'a> CatalogSnapshot<'a> {
    pub fn new(inventory: &'a Inventory) -> Self {
        let products = inventory
            .all_products()
            .iter()
            .map(|product| ProductEntry {
                product,
                associated_part_names: inventory
                    .associated_parts(product)
                    .iter()
                    .map(associated_part_name)
                    .collect(),
            })
            .collect();

        Self {
            parts: inventory.all_parts(),
            products,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
