use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a part by the add-part flow
pub type PartId = u32;

/// Identifier assigned to a product by the add-product flow
pub type ProductId = u32;

/// Where a part comes from, with the data specific to that origin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PartSource {
    /// Produced in-house on a given machine
    InHouse { machine_id: i32 },
    /// Bought in from an outside supplier
    Outsourced { company_name: String },
}

impl PartSource {
    /// Returns the discriminator without the payload
    pub fn kind(&self) -> PartSourceKind {
        match self {
            PartSource::InHouse { .. } => PartSourceKind::InHouse,
            PartSource::Outsourced { .. } => PartSourceKind::Outsourced,
        }
    }

    /// Payload rendered the way the form field shows it
    pub fn field_text(&self) -> String {
        match self {
            PartSource::InHouse { machine_id } => machine_id.to_string(),
            PartSource::Outsourced { company_name } => company_name.clone(),
        }
    }
}

/// Part origin without its payload, used by the form radio buttons
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PartSourceKind {
    #[default]
    InHouse,
    Outsourced,
}

impl PartSourceKind {
    /// Label of the origin-specific form field
    pub fn field_label(&self) -> &'static str {
        match self {
            PartSourceKind::InHouse => "Machine ID",
            PartSourceKind::Outsourced => "Company Name",
        }
    }
}

impl fmt::Display for PartSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartSourceKind::InHouse => write!(f, "In-House"),
            PartSourceKind::Outsourced => write!(f, "Outsourced"),
        }
    }
}

/// A component tracked by the inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub price: f64,
    /// Number currently in stock
    pub stock: i32,
    pub min: i32,
    pub max: i32,
    #[serde(flatten)]
    pub source: PartSource,
}

impl Part {
    /// Creates a part produced in-house
    pub fn in_house(
        id: PartId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        machine_id: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            source: PartSource::InHouse { machine_id },
        }
    }

    /// Creates a part bought from an outside company
    pub fn outsourced(
        id: PartId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            source: PartSource::Outsourced {
                company_name: company_name.into(),
            },
        }
    }

    pub fn machine_id(&self) -> Option<i32> {
        match &self.source {
            PartSource::InHouse { machine_id } => Some(*machine_id),
            PartSource::Outsourced { .. } => None,
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        match &self.source {
            PartSource::InHouse { .. } => None,
            PartSource::Outsourced { company_name } => Some(company_name),
        }
    }
}

/// An assembled item built from associated parts
///
/// The product does not own its parts. It keeps their identifiers and the
/// inventory resolves them when the list is displayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub min: i32,
    pub max: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    associated_parts: Vec<PartId>,
}

impl Product {
    /// Creates a product with no associated parts
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            associated_parts: Vec::new(),
        }
    }

    /// Appends a part to the associated list (duplicates are kept)
    pub fn add_associated_part(&mut self, part_id: PartId) {
        self.associated_parts.push(part_id);
    }

    /// Removes the first association with the given part
    /// Returns true if the list changed
    pub fn delete_associated_part(&mut self, part_id: PartId) -> bool {
        match self.associated_parts.iter().position(|id| *id == part_id) {
            Some(pos) => {
                self.associated_parts.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns a copy of the associated part identifiers
    pub fn all_associated_parts(&self) -> Vec<PartId> {
        self.associated_parts.clone()
    }

    pub fn has_associated_parts(&self) -> bool {
        !self.associated_parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_source_accessors() {
        let wheel = Part::in_house(1, "wheel", 2.5, 15, 0, 15, 1234);
        assert_eq!(wheel.machine_id(), Some(1234));
        assert_eq!(wheel.company_name(), None);
        assert_eq!(wheel.source.kind(), PartSourceKind::InHouse);

        let door = Part::outsourced(3, "Door", 4.2, 1, 0, 4, "Door Co.");
        assert_eq!(door.machine_id(), None);
        assert_eq!(door.company_name(), Some("Door Co."));
        assert_eq!(door.source.field_text(), "Door Co.");
    }

    #[test]
    fn test_field_label() {
        assert_eq!(PartSourceKind::InHouse.field_label(), "Machine ID");
        assert_eq!(PartSourceKind::Outsourced.field_label(), "Company Name");
    }

    #[test]
    fn test_associated_parts_copy_is_detached() {
        let mut car = Product::new(1, "car", 10_000.0, 3, 1, 10);
        car.add_associated_part(1);
        car.add_associated_part(2);

        let mut copy = car.all_associated_parts();
        copy.clear();

        assert_eq!(car.all_associated_parts(), vec![1, 2]);
    }

    #[test]
    fn test_delete_associated_part_removes_first_match() {
        let mut car = Product::new(1, "car", 10_000.0, 3, 1, 10);
        car.add_associated_part(4);
        car.add_associated_part(4);

        assert!(car.delete_associated_part(4));
        assert_eq!(car.all_associated_parts(), vec![4]);
        assert!(!car.delete_associated_part(9));
    }
}
