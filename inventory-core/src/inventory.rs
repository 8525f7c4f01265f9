use log::debug;

use crate::error::{InventoryError, Result};
use crate::models::{Part, PartId, Product, ProductId};
use crate::validation::parse_integer;

/// A product's association resolved against the inventory
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssociatedPart<'a> {
    Present(&'a Part),
    /// The part was deleted after being associated
    Missing(PartId),
}

impl AssociatedPart<'_> {
    pub fn id(&self) -> PartId {
        match self {
            AssociatedPart::Present(part) => part.id,
            AssociatedPart::Missing(id) => *id,
        }
    }
}

/// In-memory catalog of all parts and products
///
/// Both collections keep insertion order. Nothing is persisted; the catalog
/// lives as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    all_parts: Vec<Part>,
    all_products: Vec<Product>,
}

impl Inventory {
    /// Creates an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a part to the inventory
    pub fn add_part(&mut self, part: Part) {
        debug!("adding part {} ({})", part.id, part.name);
        self.all_parts.push(part);
    }

    /// Adds a product to the inventory
    pub fn add_product(&mut self, product: Product) {
        debug!("adding product {} ({})", product.id, product.name);
        self.all_products.push(product);
    }

    /// Gets the first part with the given ID
    pub fn lookup_part(&self, id: PartId) -> Option<&Part> {
        self.all_parts.iter().find(|p| p.id == id)
    }

    /// Gets the first product with the given ID
    pub fn lookup_product(&self, id: ProductId) -> Option<&Product> {
        self.all_products.iter().find(|p| p.id == id)
    }

    /// Parts whose name contains `text`, ignoring case
    /// An empty string matches every part.
    pub fn lookup_parts_by_name(&self, text: &str) -> Vec<&Part> {
        let needle = text.to_lowercase();
        self.all_parts
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Products whose name contains `text`, ignoring case
    pub fn lookup_products_by_name(&self, text: &str) -> Vec<&Product> {
        let needle = text.to_lowercase();
        self.all_products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Searches parts by name, falling back to an exact ID match when no
    /// name matches and the query is an integer
    pub fn search_parts(&self, query: &str) -> Vec<&Part> {
        let by_name = self.lookup_parts_by_name(query);
        if !by_name.is_empty() {
            return by_name;
        }

        parse_integer(query)
            .and_then(|id| u32::try_from(id).ok())
            .and_then(|id| self.lookup_part(id))
            .into_iter()
            .collect()
    }

    /// Searches products by name, falling back to an exact ID match
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let by_name = self.lookup_products_by_name(query);
        if !by_name.is_empty() {
            return by_name;
        }

        parse_integer(query)
            .and_then(|id| u32::try_from(id).ok())
            .and_then(|id| self.lookup_product(id))
            .into_iter()
            .collect()
    }

    /// Replaces the part that has the same ID, keeping its position
    pub fn update_part(&mut self, part: Part) -> Result<()> {
        let pos = self
            .all_parts
            .iter()
            .position(|p| p.id == part.id)
            .ok_or(InventoryError::PartNotFound(part.id))?;
        debug!("replacing part {} at position {}", part.id, pos);
        self.all_parts[pos] = part;
        Ok(())
    }

    /// Replaces the product that has the same ID, keeping its position
    pub fn update_product(&mut self, product: Product) -> Result<()> {
        let pos = self
            .all_products
            .iter()
            .position(|p| p.id == product.id)
            .ok_or(InventoryError::ProductNotFound(product.id))?;
        debug!("replacing product {} at position {}", product.id, pos);
        self.all_products[pos] = product;
        Ok(())
    }

    /// Removes a part
    /// Returns true if a part was removed. Products that reference the part
    /// keep their association.
    pub fn delete_part(&mut self, id: PartId) -> bool {
        match self.all_parts.iter().position(|p| p.id == id) {
            Some(pos) => {
                let removed = self.all_parts.remove(pos);
                debug!("deleted part {} ({})", removed.id, removed.name);
                true
            }
            None => false,
        }
    }

    /// Removes a product that has no associated parts
    /// Returns Ok(false) if no product has the ID.
    pub fn delete_product(&mut self, id: ProductId) -> Result<bool> {
        let Some(pos) = self.all_products.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        if self.all_products[pos].has_associated_parts() {
            return Err(InventoryError::HasAssociatedParts(id));
        }

        let removed = self.all_products.remove(pos);
        debug!("deleted product {} ({})", removed.id, removed.name);
        Ok(true)
    }

    pub fn all_parts(&self) -> &[Part] {
        &self.all_parts
    }

    pub fn all_products(&self) -> &[Product] {
        &self.all_products
    }

    /// Resolves a product's associated part IDs against the inventory
    pub fn associated_parts(&self, product: &Product) -> Vec<AssociatedPart<'_>> {
        self.resolve_parts(&product.all_associated_parts())
    }

    /// Resolves a list of part IDs, keeping order and unknown IDs
    pub fn resolve_parts(&self, ids: &[PartId]) -> Vec<AssociatedPart<'_>> {
        ids.iter()
            .map(|id| match self.lookup_part(*id) {
                Some(part) => AssociatedPart::Present(part),
                None => AssociatedPart::Missing(*id),
            })
            .collect()
    }

    /// ID the next added part receives: one more than the largest current ID
    pub fn next_part_id(&self) -> PartId {
        self.all_parts.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// ID the next added product receives
    pub fn next_product_id(&self) -> ProductId {
        self.all_products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}
