pub mod actions;
pub mod dialogs;
pub mod error;
pub mod forms;
pub mod inventory;
pub mod models;
pub mod sample;
pub mod settings;
pub mod snapshot;
pub mod validation;

// Re-export commonly used types
pub use dialogs::{delete_question, Dialogs, EntityKind, Notice, NoticeLevel};
pub use error::InventoryError;
pub use forms::{PartForm, ProductForm};
pub use inventory::{AssociatedPart, Inventory};
pub use models::{Part, PartId, PartSource, PartSourceKind, Product, ProductId};
pub use sample::sample_inventory;
pub use settings::{get_settings_path, Settings};
pub use snapshot::{associated_part_name, CatalogSnapshot};
pub use validation::{form_validation, parse_form, FormErrors, FormFields, ValidationIssue};
