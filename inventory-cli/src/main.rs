mod cli;
mod prompts;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use inquire::{Confirm, Select};
use log::debug;
use std::fmt;

use inventory_core::{
    actions, associated_part_name, sample_inventory, CatalogSnapshot, Inventory, InventoryError,
    Part, PartForm, PartSource, Product, ProductForm, ProductId, Settings,
};

use crate::cli::{Cli, Command, DumpFormat};
use crate::prompts::{cancelled_as_none, TerminalDialogs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.settings {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    debug!("settings: {:?}", settings);

    let mut inventory = if cli.sample || settings.load_sample_data {
        sample_inventory()
    } else {
        Inventory::new()
    };

    match cli.command.clone().unwrap_or(Command::Shell) {
        Command::Shell => run_shell(&mut inventory)?,
        Command::Dump { format } => dump(&inventory, format)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn dump(inventory: &Inventory, format: DumpFormat) -> Result<()> {
    match format {
        DumpFormat::Table => {
            print_parts(&inventory.all_parts().iter().collect::<Vec<_>>());
            println!();
            print_products(&inventory.all_products().iter().collect::<Vec<_>>());
        }
        DumpFormat::Json => println!("{}", CatalogSnapshot::new(inventory).to_json()?),
        DumpFormat::Yaml => print!("{}", CatalogSnapshot::new(inventory).to_yaml()?),
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    ListParts,
    SearchParts,
    AddPart,
    ModifyPart,
    DeletePart,
    ListProducts,
    SearchProducts,
    AddProduct,
    ModifyProduct,
    DeleteProduct,
    PrintCatalog,
    Exit,
}

impl MenuItem {
    fn all() -> Vec<MenuItem> {
        vec![
            MenuItem::ListParts,
            MenuItem::SearchParts,
            MenuItem::AddPart,
            MenuItem::ModifyPart,
            MenuItem::DeletePart,
            MenuItem::ListProducts,
            MenuItem::SearchProducts,
            MenuItem::AddProduct,
            MenuItem::ModifyProduct,
            MenuItem::DeleteProduct,
            MenuItem::PrintCatalog,
            MenuItem::Exit,
        ]
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::ListParts => "List parts",
            MenuItem::SearchParts => "Search parts",
            MenuItem::AddPart => "Add part",
            MenuItem::ModifyPart => "Modify part",
            MenuItem::DeletePart => "Delete part",
            MenuItem::ListProducts => "List products",
            MenuItem::SearchProducts => "Search products",
            MenuItem::AddProduct => "Add product",
            MenuItem::ModifyProduct => "Modify product",
            MenuItem::DeleteProduct => "Delete product",
            MenuItem::PrintCatalog => "Print catalog (JSON)",
            MenuItem::Exit => "Exit",
        };
        write!(f, "{}", label)
    }
}

fn run_shell(inventory: &mut Inventory) -> Result<()> {
    let mut dialogs = TerminalDialogs;
    println!("{}", "Inventory Management System".bold());

    loop {
        let Some(item) = Select::new("Main menu:", MenuItem::all()).prompt_skippable()? else {
            break;
        };

        match item {
            MenuItem::ListParts => print_parts(&inventory.all_parts().iter().collect::<Vec<_>>()),
            MenuItem::SearchParts => {
                let Some(query) = prompts::prompt_search("part")? else {
                    continue;
                };
                if let Some(found) = actions::search_parts(inventory, &query, &mut dialogs) {
                    print_parts(&found);
                }
            }
            MenuItem::AddPart => add_part(inventory)?,
            MenuItem::ModifyPart => modify_part(inventory, &mut dialogs)?,
            MenuItem::DeletePart => {
                let parts: Vec<&Part> = inventory.all_parts().iter().collect();
                let selection = prompts::prompt_select_part(&parts)?;
                if actions::delete_part(inventory, selection, &mut dialogs) {
                    println!("{}", "Part deleted.".green());
                }
            }
            MenuItem::ListProducts => {
                print_products(&inventory.all_products().iter().collect::<Vec<_>>())
            }
            MenuItem::SearchProducts => {
                let Some(query) = prompts::prompt_search("product")? else {
                    continue;
                };
                if let Some(found) = actions::search_products(inventory, &query, &mut dialogs) {
                    print_products(&found);
                }
            }
            MenuItem::AddProduct => add_product(inventory, &mut dialogs)?,
            MenuItem::ModifyProduct => modify_product(inventory, &mut dialogs)?,
            MenuItem::DeleteProduct => {
                let products: Vec<&Product> = inventory.all_products().iter().collect();
                let selection = prompts::prompt_select_product(&products)?;
                if actions::delete_product(inventory, selection, &mut dialogs) {
                    println!("{}", "Product deleted.".green());
                }
            }
            MenuItem::PrintCatalog => println!("{}", CatalogSnapshot::new(inventory).to_json()?),
            MenuItem::Exit => break,
        }
        println!();
    }

    Ok(())
}

/// Shows the problems with a rejected form and asks whether to keep editing
fn retry_after(err: &InventoryError) -> Result<bool> {
    match err {
        InventoryError::Validation(errors) => {
            println!("{}", "Exception:".red().bold());
            for message in errors.messages() {
                println!("  {}", message.red());
            }
            let again = cancelled_as_none(
                Confirm::new("Edit the form again?")
                    .with_default(true)
                    .prompt(),
            )?;
            Ok(again.unwrap_or(false))
        }
        other => {
            println!("{}", other.to_string().red());
            Ok(false)
        }
    }
}

fn add_part(inventory: &mut Inventory) -> Result<()> {
    let mut form = PartForm::new();
    loop {
        if !prompts::prompt_part_form(&mut form)? {
            return Ok(());
        }
        match form.submit_add(inventory) {
            Ok(id) => {
                println!("{} ID: {}", "Part added.".green(), id);
                return Ok(());
            }
            Err(e) => {
                if !retry_after(&e)? {
                    return Ok(());
                }
            }
        }
    }
}

fn modify_part(inventory: &mut Inventory, dialogs: &mut TerminalDialogs) -> Result<()> {
    let parts: Vec<&Part> = inventory.all_parts().iter().collect();
    let selection = prompts::prompt_select_part(&parts)?;
    let Some(mut form) = actions::modify_part(inventory, selection, dialogs) else {
        return Ok(());
    };
    let Some(id) = selection else {
        return Ok(());
    };

    loop {
        if !prompts::prompt_part_form(&mut form)? {
            return Ok(());
        }
        match form.submit_modify(inventory, id) {
            Ok(()) => {
                println!("{}", "Part modified.".green());
                return Ok(());
            }
            Err(e) => {
                if !retry_after(&e)? {
                    return Ok(());
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProductMenuItem {
    EditFields,
    ShowAssociated,
    AddAssociated,
    RemoveAssociated,
    Save,
    Cancel,
}

impl fmt::Display for ProductMenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProductMenuItem::EditFields => "Edit fields",
            ProductMenuItem::ShowAssociated => "Show associated parts",
            ProductMenuItem::AddAssociated => "Add associated part",
            ProductMenuItem::RemoveAssociated => "Remove associated part",
            ProductMenuItem::Save => "Save",
            ProductMenuItem::Cancel => "Cancel",
        };
        write!(f, "{}", label)
    }
}

/// Runs the product form until it is saved or cancelled
/// `target` is None for a new product.
fn edit_product_form(
    inventory: &mut Inventory,
    mut form: ProductForm,
    target: Option<ProductId>,
    dialogs: &mut TerminalDialogs,
) -> Result<()> {
    if !prompts::prompt_product_fields(&mut form)? {
        return Ok(());
    }

    loop {
        let items = vec![
            ProductMenuItem::EditFields,
            ProductMenuItem::ShowAssociated,
            ProductMenuItem::AddAssociated,
            ProductMenuItem::RemoveAssociated,
            ProductMenuItem::Save,
            ProductMenuItem::Cancel,
        ];
        let Some(item) = Select::new("Product form:", items).prompt_skippable()? else {
            return Ok(());
        };

        match item {
            // Backing out of a field only abandons that edit, not the form
            ProductMenuItem::EditFields => {
                prompts::prompt_product_fields(&mut form)?;
            }
            ProductMenuItem::ShowAssociated => print_associated(inventory, &form),
            ProductMenuItem::AddAssociated => {
                let Some(query) = prompts::prompt_search("part")? else {
                    continue;
                };
                let selection = match actions::search_parts(inventory, &query, dialogs) {
                    Some(found) => prompts::prompt_select_part(&found)?,
                    None => continue,
                };
                form.associate(selection, dialogs);
            }
            ProductMenuItem::RemoveAssociated => {
                let associated = form.associated_parts(inventory);
                let index = prompts::prompt_select_associated(&associated)?;
                form.remove_associated(index, dialogs);
            }
            ProductMenuItem::Save => {
                let result = match target {
                    Some(id) => form.submit_modify(inventory, id).map(|()| id),
                    None => form.submit_add(inventory),
                };
                match result {
                    Ok(id) => {
                        println!("{} ID: {}", "Product saved.".green(), id);
                        return Ok(());
                    }
                    Err(e) => {
                        if !retry_after(&e)? {
                            return Ok(());
                        }
                    }
                }
            }
            ProductMenuItem::Cancel => return Ok(()),
        }
    }
}

fn add_product(inventory: &mut Inventory, dialogs: &mut TerminalDialogs) -> Result<()> {
    edit_product_form(inventory, ProductForm::new(), None, dialogs)
}

fn modify_product(inventory: &mut Inventory, dialogs: &mut TerminalDialogs) -> Result<()> {
    let products: Vec<&Product> = inventory.all_products().iter().collect();
    let selection = prompts::prompt_select_product(&products)?;
    let Some(form) = actions::modify_product(inventory, selection, dialogs) else {
        return Ok(());
    };
    edit_product_form(inventory, form, selection, dialogs)
}

fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

fn source_column(part: &Part) -> String {
    match &part.source {
        PartSource::InHouse { machine_id } => format!("Machine {}", machine_id),
        PartSource::Outsourced { company_name } => company_name.clone(),
    }
}

fn print_parts(parts: &[&Part]) {
    if parts.is_empty() {
        println!("{}", "No parts found.".yellow());
        return;
    }

    println!(
        "{}",
        format!(
            "{:<7} | {:<24} | {:>9} | {:>10} | {:<20}",
            "Part ID", "Part Name", "Inventory", "Price", "Source"
        )
        .bold()
    );
    println!("{}", "-".repeat(82));
    for part in parts {
        println!(
            "{:<7} | {:<24} | {:>9} | {:>10} | {:<20}",
            part.id,
            part.name,
            part.stock,
            format_price(part.price),
            source_column(part)
        );
    }
}

fn print_products(products: &[&Product]) {
    if products.is_empty() {
        println!("{}", "No products found.".yellow());
        return;
    }

    println!(
        "{}",
        format!(
            "{:<10} | {:<24} | {:>9} | {:>10} | {:>5}",
            "Product ID", "Product Name", "Inventory", "Price", "Parts"
        )
        .bold()
    );
    println!("{}", "-".repeat(72));
    for product in products {
        println!(
            "{:<10} | {:<24} | {:>9} | {:>10} | {:>5}",
            product.id,
            product.name,
            product.stock,
            format_price(product.price),
            product.all_associated_parts().len()
        );
    }
}

fn print_associated(inventory: &Inventory, form: &ProductForm) {
    let associated = form.associated_parts(inventory);
    if associated.is_empty() {
        println!("{}", "No associated parts.".yellow());
        return;
    }
    for part in &associated {
        println!("  {:>4}  {}", part.id(), associated_part_name(part));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(2.5), "2.50");
        assert_eq!(format_price(10_000.0), "10000.00");
    }

    #[test]
    fn test_source_column() {
        let wheel = Part::in_house(1, "wheel", 2.5, 15, 0, 15, 1234);
        assert_eq!(source_column(&wheel), "Machine 1234");
        let door = Part::outsourced(3, "Door", 4.2, 1, 0, 4, "Door Co.");
        assert_eq!(source_column(&door), "Door Co.");
    }

    #[test]
    fn test_menu_lists_every_action_once() {
        let items = MenuItem::all();
        assert_eq!(items.len(), 12);
        assert_eq!(items.last(), Some(&MenuItem::Exit));
    }
}
