use anyhow::Result;
use colored::Colorize;
use inquire::{Confirm, InquireError, Select, Text};
use std::fmt;

use inventory_core::{
    associated_part_name, AssociatedPart, Dialogs, Notice, NoticeLevel, Part, PartForm, PartId,
    PartSourceKind, Product, ProductForm, ProductId,
};

/// Dialogs shown as terminal prompts
pub struct TerminalDialogs;

impl Dialogs for TerminalDialogs {
    fn confirm(&mut self, question: &str) -> bool {
        Confirm::new(question)
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }

    fn notify(&mut self, notice: Notice) {
        let header = match notice.level {
            NoticeLevel::Error => notice.header.red().bold(),
            NoticeLevel::Warning => notice.header.yellow().bold(),
            NoticeLevel::Information => notice.header.blue().bold(),
        };
        println!("{}: {}", header, notice.message);
    }
}

/// A row in a selection list that remembers which entity it stands for
struct Choice<T> {
    key: T,
    label: String,
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Label used when picking a part from a list
pub fn part_label(part: &Part) -> String {
    format!("{:>4}  {} ({} in stock)", part.id, part.name, part.stock)
}

/// Label used when picking a product from a list
pub fn product_label(product: &Product) -> String {
    format!("{:>4}  {} ({} in stock)", product.id, product.name, product.stock)
}

/// Lets the user pick a part; Esc or an empty list means no selection
pub fn prompt_select_part(parts: &[&Part]) -> Result<Option<PartId>> {
    if parts.is_empty() {
        return Ok(None);
    }

    let options = parts
        .iter()
        .map(|p| Choice {
            key: p.id,
            label: part_label(p),
        })
        .collect();

    let choice = cancelled_as_none(Select::new("Select a part:", options).prompt())?;
    Ok(choice.map(|c| c.key))
}

/// Lets the user pick a product; Esc or an empty list means no selection
pub fn prompt_select_product(products: &[&Product]) -> Result<Option<ProductId>> {
    if products.is_empty() {
        return Ok(None);
    }

    let options = products
        .iter()
        .map(|p| Choice {
            key: p.id,
            label: product_label(p),
        })
        .collect();

    let choice = cancelled_as_none(Select::new("Select a product:", options).prompt())?;
    Ok(choice.map(|c| c.key))
}

/// Lets the user pick one of a product form's associated parts by position
pub fn prompt_select_associated(parts: &[AssociatedPart<'_>]) -> Result<Option<usize>> {
    if parts.is_empty() {
        return Ok(None);
    }

    let options = parts
        .iter()
        .enumerate()
        .map(|(index, part)| Choice {
            key: index,
            label: format!("{:>4}  {}", part.id(), associated_part_name(part)),
        })
        .collect();

    let choice = cancelled_as_none(Select::new("Select an associated part:", options).prompt())?;
    Ok(choice.map(|c| c.key))
}

/// Treats Esc and Ctrl-C as leaving the current form rather than failing
pub fn cancelled_as_none<T>(
    result: std::result::Result<T, InquireError>,
) -> std::result::Result<Option<T>, InquireError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e),
    }
}

fn text_field(label: &str, current: &str) -> Result<Option<String>> {
    Ok(cancelled_as_none(
        Text::new(label).with_initial_value(current).prompt(),
    )?)
}

/// Fills each field in turn; false when the user backed out
fn edit_fields(fields: [(&str, &mut String); 5]) -> Result<bool> {
    for (label, value) in fields {
        match text_field(label, value)? {
            Some(text) => *value = text,
            None => return Ok(false),
        }
    }
    Ok(true)
}

/// Prompts for every part field, starting from the form's current text
///
/// Returns false, leaving the form untouched, when the user cancels.
pub fn prompt_part_form(form: &mut PartForm) -> Result<bool> {
    let mut draft = form.clone();

    let kinds = vec![PartSourceKind::InHouse, PartSourceKind::Outsourced];
    let cursor = kinds.iter().position(|k| *k == draft.source_kind).unwrap_or(0);
    let kind = cancelled_as_none(
        Select::new("Source:", kinds)
            .with_starting_cursor(cursor)
            .prompt(),
    )?;
    let Some(kind) = kind else {
        return Ok(false);
    };
    draft.source_kind = kind;

    let filled = edit_fields([
        ("Name:", &mut draft.name),
        ("Inv:", &mut draft.stock),
        ("Price/Cost:", &mut draft.price),
        ("Max:", &mut draft.max),
        ("Min:", &mut draft.min),
    ])?;
    if !filled {
        return Ok(false);
    }

    let label = format!("{}:", draft.source_label());
    let Some(source_field) = text_field(&label, &draft.source_field)? else {
        return Ok(false);
    };
    draft.source_field = source_field;

    *form = draft;
    Ok(true)
}

/// Prompts for the product's own fields (associations are edited separately)
///
/// Returns false, leaving the form untouched, when the user cancels.
pub fn prompt_product_fields(form: &mut ProductForm) -> Result<bool> {
    let mut draft = form.clone();

    let filled = edit_fields([
        ("Name:", &mut draft.name),
        ("Inv:", &mut draft.stock),
        ("Price:", &mut draft.price),
        ("Max:", &mut draft.max),
        ("Min:", &mut draft.min),
    ])?;
    if filled {
        *form = draft;
    }
    Ok(filled)
}

/// Prompts for a search query; empty matches everything, None means cancelled
pub fn prompt_search(kind: &str) -> Result<Option<String>> {
    Ok(cancelled_as_none(
        Text::new(&format!("Search by {} ID or name:", kind))
            .with_default("")
            .prompt(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let part = Part::in_house(4, "Screw", 0.5, 100, 10, 500, 3214);
        assert_eq!(part_label(&part), "   4  Screw (100 in stock)");

        let product = Product::new(12, "Bicycle", 99.99, 12, 0, 15);
        assert_eq!(product_label(&product), "  12  Bicycle (12 in stock)");
    }

    #[test]
    fn test_cancel_leaves_form() {
        assert_eq!(cancelled_as_none(Ok::<_, InquireError>(5)).unwrap(), Some(5));
        assert_eq!(
            cancelled_as_none::<String>(Err(InquireError::OperationCanceled)).unwrap(),
            None
        );
        assert_eq!(
            cancelled_as_none::<String>(Err(InquireError::OperationInterrupted)).unwrap(),
            None
        );
    }

    #[test]
    fn test_other_prompt_errors_still_fail() {
        let result = cancelled_as_none::<String>(Err(InquireError::NotTTY));
        assert!(matches!(result, Err(InquireError::NotTTY)));
    }
}
