//! Add/modify forms for parts and products
//!
//! A form holds the raw text of every field, exactly as typed. Submitting
//! validates the whole form first and only touches the inventory when every
//! rule passes.

use log::{info, warn};

use crate::dialogs::{delete_question, Dialogs, EntityKind, Notice};
use crate::error::{InventoryError, Result};
use crate::inventory::{AssociatedPart, Inventory};
use crate::models::{Part, PartId, PartSource, PartSourceKind, Product, ProductId};
use crate::validation::{
    parse_form, validate_company_name, validate_machine_id, FormErrors, FormFields,
};

/// Text fields of the add/modify part screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartForm {
    pub source_kind: PartSourceKind,
    pub name: String,
    pub stock: String,
    pub price: String,
    pub max: String,
    pub min: String,
    /// Machine ID or company name, depending on `source_kind`
    pub source_field: String,
}

impl PartForm {
    /// Creates an empty in-house part form
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills the form from an existing part
    pub fn from_part(part: &Part) -> Self {
        Self {
            source_kind: part.source.kind(),
            name: part.name.clone(),
            stock: part.stock.to_string(),
            price: part.price.to_string(),
            max: part.max.to_string(),
            min: part.min.to_string(),
            source_field: part.source.field_text(),
        }
    }

    /// Label for the origin-specific field
    pub fn source_label(&self) -> &'static str {
        self.source_kind.field_label()
    }

    /// Builds the part described by the form, or every rule it violates
    pub fn validate(&self, id: PartId) -> std::result::Result<Part, FormErrors> {
        let fields = parse_form(&self.name, &self.stock, &self.price, &self.max, &self.min);

        let source = match self.source_kind {
            PartSourceKind::InHouse => validate_machine_id(&self.source_field)
                .map(|machine_id| PartSource::InHouse { machine_id }),
            PartSourceKind::Outsourced => {
                validate_company_name(&self.source_field).map(|company_name| {
                    PartSource::Outsourced {
                        company_name: company_name.to_string(),
                    }
                })
            }
        };

        match (fields, source) {
            (Ok(fields), Ok(source)) => Ok(Part {
                id,
                name: fields.name,
                price: fields.price,
                stock: fields.stock,
                min: fields.min,
                max: fields.max,
                source,
            }),
            (fields, source) => {
                let mut errors = fields.err().unwrap_or_default();
                if let Err(issue) = source {
                    errors.push(issue);
                }
                Err(errors)
            }
        }
    }

    /// Adds a new part with the next free ID
    pub fn submit_add(&self, inventory: &mut Inventory) -> Result<PartId> {
        let id = inventory.next_part_id();
        let part = self.validate(id).inspect_err(|errors| {
            warn!("add part rejected: {} problem(s)", errors.len());
        })?;

        inventory.add_part(part);
        info!("added part {}", id);
        Ok(id)
    }

    /// Replaces the part with the given ID by the form's contents
    pub fn submit_modify(&self, inventory: &mut Inventory, id: PartId) -> Result<()> {
        if inventory.lookup_part(id).is_none() {
            return Err(InventoryError::PartNotFound(id));
        }

        let part = self.validate(id).inspect_err(|errors| {
            warn!("modify part {} rejected: {} problem(s)", id, errors.len());
        })?;

        inventory.update_part(part)?;
        info!("modified part {}", id);
        Ok(())
    }
}

/// Text fields and working association list of the add/modify product screen
///
/// Association changes stay in the form until it is submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub stock: String,
    pub price: String,
    pub max: String,
    pub min: String,
    associated: Vec<PartId>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills the form, including the associated parts, from a product
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            stock: product.stock.to_string(),
            price: product.price.to_string(),
            max: product.max.to_string(),
            min: product.min.to_string(),
            associated: product.all_associated_parts(),
        }
    }

    /// Part IDs currently associated in the form
    pub fn associated(&self) -> &[PartId] {
        &self.associated
    }

    /// The working association list resolved against the inventory
    pub fn associated_parts<'a>(&self, inventory: &'a Inventory) -> Vec<AssociatedPart<'a>> {
        inventory.resolve_parts(&self.associated)
    }

    /// Associates the selected part with the product being edited
    pub fn associate(&mut self, selection: Option<PartId>, dialogs: &mut dyn Dialogs) -> bool {
        match selection {
            Some(part_id) => {
                self.associated.push(part_id);
                true
            }
            None => {
                dialogs.notify(Notice::selection_error(EntityKind::Part));
                false
            }
        }
    }

    /// Removes the association at `index` after the user confirms
    pub fn remove_associated(&mut self, index: Option<usize>, dialogs: &mut dyn Dialogs) -> bool {
        let Some(index) = index.filter(|i| *i < self.associated.len()) else {
            dialogs.notify(Notice::selection_error(EntityKind::Part));
            return false;
        };

        if !dialogs.confirm(&delete_question(EntityKind::Part)) {
            return false;
        }

        self.associated.remove(index);
        true
    }

    /// Builds the product described by the form, or every rule it violates
    pub fn validate(&self, id: ProductId) -> std::result::Result<Product, FormErrors> {
        let FormFields {
            name,
            stock,
            price,
            max,
            min,
        } = parse_form(&self.name, &self.stock, &self.price, &self.max, &self.min)?;

        let mut product = Product::new(id, name, price, stock, min, max);
        for part_id in &self.associated {
            product.add_associated_part(*part_id);
        }
        Ok(product)
    }

    /// Adds a new product with the next free ID
    pub fn submit_add(&self, inventory: &mut Inventory) -> Result<ProductId> {
        let id = inventory.next_product_id();
        let product = self.validate(id).inspect_err(|errors| {
            warn!("add product rejected: {} problem(s)", errors.len());
        })?;

        inventory.add_product(product);
        info!("added product {}", id);
        Ok(id)
    }

    /// Replaces the product with the given ID by the form's contents
    pub fn submit_modify(&self, inventory: &mut Inventory, id: ProductId) -> Result<()> {
        if inventory.lookup_product(id).is_none() {
            return Err(InventoryError::ProductNotFound(id));
        }

        let product = self.validate(id).inspect_err(|errors| {
            warn!("modify product {} rejected: {} problem(s)", id, errors.len());
        })?;

        inventory.update_product(product)?;
        info!("modified product {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::RecordingDialogs;
    use crate::validation::ValidationIssue;

    fn filled_part_form() -> PartForm {
        PartForm {
            source_kind: PartSourceKind::InHouse,
            name: "Sprocket".to_string(),
            stock: "5".to_string(),
            price: "3.75".to_string(),
            max: "10".to_string(),
            min: "1".to_string(),
            source_field: "42".to_string(),
        }
    }

    fn filled_product_form() -> ProductForm {
        ProductForm {
            name: "Scooter".to_string(),
            stock: "2".to_string(),
            price: "49.5".to_string(),
            max: "4".to_string(),
            min: "0".to_string(),
            ..ProductForm::default()
        }
    }

    #[test]
    fn test_part_add_assigns_next_id() {
        let mut inventory = Inventory::new();
        let first = filled_part_form().submit_add(&mut inventory).unwrap();
        assert_eq!(first, 1);

        inventory.add_part(Part::in_house(9, "gear", 1.0, 1, 0, 1, 1));
        let next = filled_part_form().submit_add(&mut inventory).unwrap();
        assert_eq!(next, 10);

        let part = inventory.lookup_part(next).unwrap();
        assert_eq!(part.name, "Sprocket");
        assert_eq!(part.machine_id(), Some(42));
    }

    #[test]
    fn test_part_add_rejected_leaves_inventory_untouched() {
        let mut inventory = Inventory::new();
        let mut form = filled_part_form();
        form.stock = "lots".to_string();
        form.source_field = "M42".to_string();

        let err = form.submit_add(&mut inventory).unwrap_err();
        match err {
            InventoryError::Validation(errors) => assert_eq!(
                errors.issues(),
                &[
                    ValidationIssue::InvalidInventory,
                    ValidationIssue::InvalidMachineId
                ]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(inventory.all_parts().is_empty());
    }

    #[test]
    fn test_outsourced_needs_company_name() {
        let mut form = filled_part_form();
        form.source_kind = PartSourceKind::Outsourced;
        form.source_field = " ".to_string();

        let errors = form.validate(1).unwrap_err();
        assert_eq!(errors.issues(), &[ValidationIssue::CompanyNameMissing]);
        assert_eq!(form.source_label(), "Company Name");
    }

    #[test]
    fn test_part_modify_round_trip() {
        let mut inventory = Inventory::new();
        let id = filled_part_form().submit_add(&mut inventory).unwrap();

        let mut form = PartForm::from_part(inventory.lookup_part(id).unwrap());
        assert_eq!(form, filled_part_form());

        form.source_kind = PartSourceKind::Outsourced;
        form.source_field = "Acme".to_string();
        form.name = "Big Sprocket".to_string();
        form.price = "5".to_string();
        form.submit_modify(&mut inventory, id).unwrap();

        let part = inventory.lookup_part(id).unwrap();
        assert_eq!(part.id, id);
        assert_eq!(part.name, "Big Sprocket");
        assert_eq!(part.price, 5.0);
        assert_eq!(part.company_name(), Some("Acme"));
        assert_eq!(inventory.all_parts().len(), 1);
    }

    #[test]
    fn test_part_modify_invalid_keeps_old_values() {
        let mut inventory = Inventory::new();
        let id = filled_part_form().submit_add(&mut inventory).unwrap();

        let mut form = filled_part_form();
        form.name = String::new();
        assert!(form.submit_modify(&mut inventory, id).is_err());
        assert_eq!(inventory.lookup_part(id).unwrap().name, "Sprocket");
    }

    #[test]
    fn test_part_modify_unknown_id() {
        let mut inventory = Inventory::new();
        let result = filled_part_form().submit_modify(&mut inventory, 3);
        assert_eq!(result, Err(InventoryError::PartNotFound(3)));
    }

    #[test]
    fn test_product_associations_applied_on_submit() {
        let mut inventory = Inventory::new();
        let mut dialogs = RecordingDialogs::agreeing();
        let mut form = filled_product_form();

        assert!(form.associate(Some(2), &mut dialogs));
        assert!(form.associate(Some(5), &mut dialogs));
        assert!(!form.associate(None, &mut dialogs));
        assert_eq!(
            dialogs.notices,
            vec![Notice::selection_error(EntityKind::Part)]
        );

        let id = form.submit_add(&mut inventory).unwrap();
        let product = inventory.lookup_product(id).unwrap();
        assert_eq!(product.all_associated_parts(), vec![2, 5]);
    }

    #[test]
    fn test_remove_associated_requires_confirmation() {
        let mut form = filled_product_form();
        let mut dialogs = RecordingDialogs::declining();
        form.associate(Some(1), &mut dialogs);
        form.associate(Some(2), &mut dialogs);

        assert!(!form.remove_associated(Some(0), &mut dialogs));
        assert_eq!(form.associated(), &[1, 2]);
        assert_eq!(dialogs.questions, vec!["Do you want to delete this part?"]);

        let mut dialogs = RecordingDialogs::agreeing();
        assert!(form.remove_associated(Some(0), &mut dialogs));
        assert_eq!(form.associated(), &[2]);
    }

    #[test]
    fn test_remove_associated_without_selection() {
        let mut form = filled_product_form();
        let mut dialogs = RecordingDialogs::agreeing();

        assert!(!form.remove_associated(None, &mut dialogs));
        assert!(!form.remove_associated(Some(3), &mut dialogs));
        assert!(dialogs.questions.is_empty());
        assert_eq!(dialogs.notices.len(), 2);
    }

    #[test]
    fn test_product_modify_discarded_changes_do_not_leak() {
        let mut inventory = Inventory::new();
        let mut dialogs = RecordingDialogs::agreeing();
        let mut form = filled_product_form();
        form.associate(Some(1), &mut dialogs);
        let id = form.submit_add(&mut inventory).unwrap();

        // Editing a form copy without submitting leaves the stored product alone
        let mut edit = ProductForm::from_product(inventory.lookup_product(id).unwrap());
        edit.remove_associated(Some(0), &mut dialogs);
        assert_eq!(
            inventory.lookup_product(id).unwrap().all_associated_parts(),
            vec![1]
        );

        edit.submit_modify(&mut inventory, id).unwrap();
        assert!(!inventory.lookup_product(id).unwrap().has_associated_parts());
    }

    #[test]
    fn test_product_validation_errors() {
        let mut inventory = Inventory::new();
        let mut form = filled_product_form();
        form.max = "1".to_string();
        form.min = "3".to_string();

        let err = form.submit_add(&mut inventory).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Max cannot be less than Min.\nInventory cannot be less than Min or greater than Max.\n"
        );
        assert!(inventory.all_products().is_empty());
    }
}
