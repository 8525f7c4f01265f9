//! Main screen actions: search, modify and delete on the parts and products
//! tables. Every action that needs a selection reports a selection error when
//! there is none.

use log::{info, warn};

use crate::dialogs::{delete_question, Dialogs, EntityKind, Notice};
use crate::error::InventoryError;
use crate::forms::{PartForm, ProductForm};
use crate::inventory::Inventory;
use crate::models::{Part, PartId, Product, ProductId};

/// Searches parts, notifying the user when nothing matches
/// Returns None when the caller should keep its current listing.
pub fn search_parts<'a>(
    inventory: &'a Inventory,
    query: &str,
    dialogs: &mut dyn Dialogs,
) -> Option<Vec<&'a Part>> {
    let found = inventory.search_parts(query);
    if found.is_empty() {
        dialogs.notify(Notice::search_not_found(EntityKind::Part));
        return None;
    }
    Some(found)
}

/// Searches products, notifying the user when nothing matches
pub fn search_products<'a>(
    inventory: &'a Inventory,
    query: &str,
    dialogs: &mut dyn Dialogs,
) -> Option<Vec<&'a Product>> {
    let found = inventory.search_products(query);
    if found.is_empty() {
        dialogs.notify(Notice::search_not_found(EntityKind::Product));
        return None;
    }
    Some(found)
}

/// Opens the modify form for the selected part
pub fn modify_part(
    inventory: &Inventory,
    selection: Option<PartId>,
    dialogs: &mut dyn Dialogs,
) -> Option<PartForm> {
    match selection.and_then(|id| inventory.lookup_part(id)) {
        Some(part) => Some(PartForm::from_part(part)),
        None => {
            dialogs.notify(Notice::selection_error(EntityKind::Part));
            None
        }
    }
}

/// Opens the modify form for the selected product
pub fn modify_product(
    inventory: &Inventory,
    selection: Option<ProductId>,
    dialogs: &mut dyn Dialogs,
) -> Option<ProductForm> {
    match selection.and_then(|id| inventory.lookup_product(id)) {
        Some(product) => Some(ProductForm::from_product(product)),
        None => {
            dialogs.notify(Notice::selection_error(EntityKind::Product));
            None
        }
    }
}

/// Deletes the selected part after confirmation
pub fn delete_part(
    inventory: &mut Inventory,
    selection: Option<PartId>,
    dialogs: &mut dyn Dialogs,
) -> bool {
    let Some(id) = selection else {
        dialogs.notify(Notice::selection_error(EntityKind::Part));
        return false;
    };

    if !dialogs.confirm(&delete_question(EntityKind::Part)) {
        return false;
    }

    let deleted = inventory.delete_part(id);
    if deleted {
        info!("part {} deleted", id);
    }
    deleted
}

/// Deletes the selected product after confirmation
///
/// Products that still have associated parts are kept and the user is told
/// why.
pub fn delete_product(
    inventory: &mut Inventory,
    selection: Option<ProductId>,
    dialogs: &mut dyn Dialogs,
) -> bool {
    let Some(id) = selection else {
        dialogs.notify(Notice::selection_error(EntityKind::Product));
        return false;
    };

    if !dialogs.confirm(&delete_question(EntityKind::Product)) {
        return false;
    }

    match inventory.delete_product(id) {
        Ok(deleted) => {
            if deleted {
                info!("product {} deleted", id);
            }
            deleted
        }
        Err(InventoryError::HasAssociatedParts(_)) => {
            warn!("product {} still has associated parts", id);
            dialogs.notify(Notice::associated_part_delete_error());
            false
        }
        Err(e) => {
            warn!("deleting product {} failed: {}", id, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::RecordingDialogs;
    use crate::sample::sample_inventory;

    #[test]
    fn test_search_not_found_notifies() {
        let inventory = sample_inventory();
        let mut dialogs = RecordingDialogs::agreeing();

        assert!(search_parts(&inventory, "carburetor", &mut dialogs).is_none());
        assert!(search_products(&inventory, "77", &mut dialogs).is_none());
        assert_eq!(
            dialogs.notices,
            vec![
                Notice::search_not_found(EntityKind::Part),
                Notice::search_not_found(EntityKind::Product),
            ]
        );
    }

    #[test]
    fn test_search_by_id_fallback() {
        let inventory = sample_inventory();
        let mut dialogs = RecordingDialogs::agreeing();

        let found = search_parts(&inventory, "3", &mut dialogs).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Door");
        assert!(dialogs.notices.is_empty());
    }

    #[test]
    fn test_delete_part_needs_selection_and_confirmation() {
        let mut inventory = sample_inventory();

        let mut dialogs = RecordingDialogs::agreeing();
        assert!(!delete_part(&mut inventory, None, &mut dialogs));
        assert_eq!(dialogs.notices, vec![Notice::selection_error(EntityKind::Part)]);
        assert!(dialogs.questions.is_empty());

        let mut dialogs = RecordingDialogs::declining();
        assert!(!delete_part(&mut inventory, Some(4), &mut dialogs));
        assert!(inventory.lookup_part(4).is_some());

        let mut dialogs = RecordingDialogs::agreeing();
        assert!(delete_part(&mut inventory, Some(4), &mut dialogs));
        assert!(inventory.lookup_part(4).is_none());
    }

    #[test]
    fn test_delete_product_with_parts_is_refused() {
        let mut inventory = sample_inventory();
        let parts_before = inventory.all_parts().to_vec();
        let products_before = inventory.all_products().to_vec();
        let mut dialogs = RecordingDialogs::agreeing();

        assert!(!delete_product(&mut inventory, Some(1), &mut dialogs));
        assert_eq!(dialogs.questions, vec!["Do you want to delete this product?"]);
        assert_eq!(dialogs.notices, vec![Notice::associated_part_delete_error()]);
        assert_eq!(inventory.all_parts(), parts_before.as_slice());
        assert_eq!(inventory.all_products(), products_before.as_slice());
    }

    #[test]
    fn test_delete_product_without_parts() {
        let mut inventory = sample_inventory();
        let mut dialogs = RecordingDialogs::agreeing();

        assert!(delete_product(&mut inventory, Some(2), &mut dialogs));
        assert!(inventory.lookup_product(2).is_none());
        assert!(dialogs.notices.is_empty());
    }

    #[test]
    fn test_modify_requires_selection() {
        let inventory = sample_inventory();
        let mut dialogs = RecordingDialogs::agreeing();

        assert!(modify_part(&inventory, None, &mut dialogs).is_none());
        assert!(modify_product(&inventory, Some(99), &mut dialogs).is_none());
        assert_eq!(
            dialogs.notices,
            vec![
                Notice::selection_error(EntityKind::Part),
                Notice::selection_error(EntityKind::Product),
            ]
        );

        let form = modify_part(&inventory, Some(2), &mut dialogs).unwrap();
        assert_eq!(form.name, "Handlebars");
        assert_eq!(form.source_field, "Wheeler's Co.");

        let form = modify_product(&inventory, Some(1), &mut dialogs).unwrap();
        assert_eq!(form.associated(), &[1, 2, 3]);
    }
}
