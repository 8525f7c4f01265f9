use eframe::egui;
use egui_extras::{Column, TableBuilder};
use inventory_core::{
    actions, associated_part_name, sample_inventory, AssociatedPart, Inventory, InventoryError,
    NoticeLevel, Part, PartForm, PartId, PartSourceKind, Product, ProductForm, ProductId,
    Settings,
};
use log::{info, warn};
use std::path::PathBuf;

use crate::dialogs::GuiDialogs;

const PART_HEADINGS: [&str; 4] = [
    "Part ID",
    "Part Name",
    "Inventory Level",
    "Price/ Cost per Unit",
];
const PRODUCT_HEADINGS: [&str; 4] = [
    "Product ID",
    "Product Name",
    "Inventory Level",
    "Price/ Cost per Unit",
];

#[derive(Default, PartialEq, Clone, Copy)]
enum View {
    #[default]
    Main,
    AddPart,
    ModifyPart(PartId),
    AddProduct,
    ModifyProduct(ProductId),
}

/// Actions that stop and wait for the user to answer a confirmation
#[derive(Debug, Clone, Copy)]
enum Confirmable {
    DeletePart(Option<PartId>),
    DeleteProduct(Option<ProductId>),
    RemoveAssociated(Option<usize>),
}

/// One row of a parts or products table, already formatted
struct TableLine {
    id: u32,
    name: String,
    stock: String,
    price: String,
}

impl TableLine {
    fn from_part(part: &Part) -> Self {
        Self {
            id: part.id,
            name: part.name.clone(),
            stock: part.stock.to_string(),
            price: format!("{:.2}", part.price),
        }
    }

    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            stock: product.stock.to_string(),
            price: format!("{:.2}", product.price),
        }
    }

    fn from_associated(part: &AssociatedPart<'_>) -> Self {
        match part {
            AssociatedPart::Present(part) => Self::from_part(part),
            AssociatedPart::Missing(id) => Self {
                id: *id,
                name: associated_part_name(part),
                stock: String::new(),
                price: String::new(),
            },
        }
    }
}

pub struct InventoryApp {
    inventory: Inventory,
    settings: Settings,
    settings_path: Option<PathBuf>,
    current_view: View,

    // Main screen
    part_query: String,
    product_query: String,
    part_matches: Option<Vec<PartId>>,
    product_matches: Option<Vec<ProductId>>,
    selected_part: Option<PartId>,
    selected_product: Option<ProductId>,

    // Form state
    part_form: PartForm,
    product_form: ProductForm,
    form_part_query: String,
    form_part_matches: Option<Vec<PartId>>,
    form_selected_part: Option<PartId>,
    form_selected_associated: Option<usize>,
    form_errors: Option<String>,

    // Dialogs
    dialogs: GuiDialogs,
    pending_confirm: Option<(String, Confirmable)>,

    // Messages
    message: Option<(String, bool)>, // (message, is_error)

    pending_view_change: Option<View>,
}

impl InventoryApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        settings: Settings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let inventory = if settings.load_sample_data {
            sample_inventory()
        } else {
            Inventory::new()
        };

        Self {
            inventory,
            settings,
            settings_path,
            current_view: View::Main,
            part_query: String::new(),
            product_query: String::new(),
            part_matches: None,
            product_matches: None,
            selected_part: None,
            selected_product: None,
            part_form: PartForm::new(),
            product_form: ProductForm::new(),
            form_part_query: String::new(),
            form_part_matches: None,
            form_selected_part: None,
            form_selected_associated: None,
            form_errors: None,
            dialogs: GuiDialogs::default(),
            pending_confirm: None,
            message: None,
            pending_view_change: None,
        }
    }

    fn save_settings(&mut self, ctx: &egui::Context) {
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.settings.window_width = rect.width();
            self.settings.window_height = rect.height();
        }

        let Some(path) = &self.settings_path else {
            self.message = Some(("No settings location available".to_string(), true));
            return;
        };

        match self.settings.save_to(path) {
            Ok(()) => {
                info!("settings saved to {}", path.display());
                self.message = Some(("Settings saved".to_string(), false));
            }
            Err(e) => {
                warn!("saving settings failed: {:#}", e);
                self.message = Some((format!("Error saving settings: {}", e), true));
            }
        }
    }

    /// Runs an action, parking it if it stopped to ask a question
    fn run_confirmable(&mut self, action: Confirmable) {
        match action {
            Confirmable::DeletePart(selection) => {
                if actions::delete_part(&mut self.inventory, selection, &mut self.dialogs) {
                    self.selected_part = None;
                    self.message = Some(("Part deleted".to_string(), false));
                }
            }
            Confirmable::DeleteProduct(selection) => {
                if actions::delete_product(&mut self.inventory, selection, &mut self.dialogs) {
                    self.selected_product = None;
                    self.message = Some(("Product deleted".to_string(), false));
                }
            }
            Confirmable::RemoveAssociated(index) => {
                if self.product_form.remove_associated(index, &mut self.dialogs) {
                    self.form_selected_associated = None;
                }
            }
        }

        if let Some(question) = self.dialogs.take_question() {
            self.pending_confirm = Some((question, action));
        }
    }

    fn search_main_parts(&mut self) {
        if let Some(found) =
            actions::search_parts(&self.inventory, &self.part_query, &mut self.dialogs)
        {
            self.part_matches = Some(found.iter().map(|p| p.id).collect());
        }
    }

    fn search_main_products(&mut self) {
        if let Some(found) =
            actions::search_products(&self.inventory, &self.product_query, &mut self.dialogs)
        {
            self.product_matches = Some(found.iter().map(|p| p.id).collect());
        }
    }

    fn search_form_parts(&mut self) {
        if let Some(found) =
            actions::search_parts(&self.inventory, &self.form_part_query, &mut self.dialogs)
        {
            self.form_part_matches = Some(found.iter().map(|p| p.id).collect());
        }
    }

    fn open_add_part(&mut self) {
        self.part_form = PartForm::new();
        self.form_errors = None;
        self.pending_view_change = Some(View::AddPart);
    }

    fn open_modify_part(&mut self) {
        let form = actions::modify_part(&self.inventory, self.selected_part, &mut self.dialogs);
        if let (Some(id), Some(form)) = (self.selected_part, form) {
            self.part_form = form;
            self.form_errors = None;
            self.pending_view_change = Some(View::ModifyPart(id));
        }
    }

    fn reset_product_form_state(&mut self) {
        self.form_part_query.clear();
        self.form_part_matches = None;
        self.form_selected_part = None;
        self.form_selected_associated = None;
        self.form_errors = None;
    }

    fn open_add_product(&mut self) {
        self.product_form = ProductForm::new();
        self.reset_product_form_state();
        self.pending_view_change = Some(View::AddProduct);
    }

    fn open_modify_product(&mut self) {
        let form =
            actions::modify_product(&self.inventory, self.selected_product, &mut self.dialogs);
        if let (Some(id), Some(form)) = (self.selected_product, form) {
            self.product_form = form;
            self.reset_product_form_state();
            self.pending_view_change = Some(View::ModifyProduct(id));
        }
    }

    /// Back to the main screen, which lists everything again
    fn return_to_main(&mut self) {
        self.form_errors = None;
        self.part_query.clear();
        self.product_query.clear();
        self.part_matches = None;
        self.product_matches = None;
        self.pending_view_change = Some(View::Main);
    }

    fn finish_form(&mut self, result: Result<(), InventoryError>, saved: &str) {
        match result {
            Ok(()) => {
                self.message = Some((saved.to_string(), false));
                self.return_to_main();
            }
            Err(e) => {
                self.form_errors = Some(format!("Exception:\n{}", e.to_string().trim_end()));
            }
        }
    }

    fn save_part_form(&mut self, id: Option<PartId>) {
        let result = match id {
            Some(id) => self.part_form.submit_modify(&mut self.inventory, id),
            None => self.part_form.submit_add(&mut self.inventory).map(|_| ()),
        };
        self.finish_form(result, "Part saved");
    }

    fn save_product_form(&mut self, id: Option<ProductId>) {
        let result = match id {
            Some(id) => self.product_form.submit_modify(&mut self.inventory, id),
            None => self.product_form.submit_add(&mut self.inventory).map(|_| ()),
        };
        self.finish_form(result, "Product saved");
    }

    fn show_top_panel(&mut self, ctx: &egui::Context, blocked: bool) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                egui::menu::bar(ui, |ui| {
                    ui.menu_button("Settings", |ui| {
                        ui.checkbox(
                            &mut self.settings.load_sample_data,
                            "Load sample data on startup",
                        );
                        if ui.button("Save settings").clicked() {
                            self.save_settings(ui.ctx());
                            ui.close_menu();
                        }
                    });

                    ui.separator();
                    ui.label(format!(
                        "Parts: {}  Products: {}",
                        self.inventory.all_parts().len(),
                        self.inventory.all_products().len()
                    ));

                    if let Some((msg, is_error)) = &self.message {
                        ui.separator();
                        let color = if *is_error {
                            egui::Color32::RED
                        } else {
                            egui::Color32::GREEN
                        };
                        ui.colored_label(color, msg);
                    }
                });
            });
        });
    }

    fn show_main_view(&mut self, ui: &mut egui::Ui) {
        ui.heading("Inventory Management System");
        ui.separator();

        ui.columns(2, |columns| {
            self.show_parts_pane(&mut columns[0]);
            self.show_products_pane(&mut columns[1]);
        });

        ui.separator();
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Exit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn show_parts_pane(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.strong("Parts");
                if search_box(ui, &mut self.part_query, "Search by Part ID or Name") {
                    self.search_main_parts();
                }
            });

            let lines: Vec<TableLine> = listed_parts(&self.inventory, self.part_matches.as_deref())
                .into_iter()
                .map(TableLine::from_part)
                .collect();
            if let Some(index) =
                line_table(ui, "main_parts", PART_HEADINGS, &lines, self.selected_part)
            {
                self.selected_part = Some(lines[index].id);
            }

            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    self.open_add_part();
                }
                if ui.button("Modify").clicked() {
                    self.open_modify_part();
                }
                if ui.button("Delete").clicked() {
                    self.run_confirmable(Confirmable::DeletePart(self.selected_part));
                }
            });
        });
    }

    fn show_products_pane(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.strong("Products");
                if search_box(ui, &mut self.product_query, "Search by Product ID or Name") {
                    self.search_main_products();
                }
            });

            let lines: Vec<TableLine> =
                listed_products(&self.inventory, self.product_matches.as_deref())
                    .into_iter()
                    .map(TableLine::from_product)
                    .collect();
            if let Some(index) = line_table(
                ui,
                "main_products",
                PRODUCT_HEADINGS,
                &lines,
                self.selected_product,
            ) {
                self.selected_product = Some(lines[index].id);
            }

            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    self.open_add_product();
                }
                if ui.button("Modify").clicked() {
                    self.open_modify_product();
                }
                if ui.button("Delete").clicked() {
                    self.run_confirmable(Confirmable::DeleteProduct(self.selected_product));
                }
            });
        });
    }

    fn show_form_errors(&self, ui: &mut egui::Ui) {
        if let Some(errors) = &self.form_errors {
            ui.add_space(8.0);
            ui.colored_label(egui::Color32::RED, errors);
        }
    }

    fn show_part_form(&mut self, ui: &mut egui::Ui, id: Option<PartId>) {
        let title = if id.is_some() { "Modify Part" } else { "Add Part" };
        ui.horizontal(|ui| {
            ui.heading(title);
            ui.add_space(40.0);
            ui.radio_value(
                &mut self.part_form.source_kind,
                PartSourceKind::InHouse,
                "In-House",
            );
            ui.radio_value(
                &mut self.part_form.source_kind,
                PartSourceKind::Outsourced,
                "Outsourced",
            );
        });
        ui.separator();

        egui::Grid::new("part_form_grid")
            .num_columns(2)
            .spacing([40.0, 8.0])
            .show(ui, |ui| {
                ui.label("ID");
                let mut id_text = id_field_text(id);
                ui.add_enabled(false, egui::TextEdit::singleline(&mut id_text));
                ui.end_row();

                ui.label("Name");
                ui.text_edit_singleline(&mut self.part_form.name);
                ui.end_row();

                ui.label("Inv");
                ui.text_edit_singleline(&mut self.part_form.stock);
                ui.end_row();

                ui.label("Price/Cost");
                ui.text_edit_singleline(&mut self.part_form.price);
                ui.end_row();

                ui.label("Max");
                ui.text_edit_singleline(&mut self.part_form.max);
                ui.end_row();

                ui.label("Min");
                ui.text_edit_singleline(&mut self.part_form.min);
                ui.end_row();

                ui.label(self.part_form.source_label());
                ui.text_edit_singleline(&mut self.part_form.source_field);
                ui.end_row();
            });

        self.show_form_errors(ui);

        ui.separator();
        let mut save = false;
        let mut cancel = false;
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                save = true;
            }
            if ui.button("Cancel").clicked() {
                cancel = true;
            }
        });

        if save {
            self.save_part_form(id);
        }
        if cancel {
            self.return_to_main();
        }
    }

    fn show_product_form(&mut self, ui: &mut egui::Ui, id: Option<ProductId>) {
        let title = if id.is_some() { "Modify Product" } else { "Add Product" };
        ui.heading(title);
        ui.separator();

        ui.columns(2, |columns| {
            self.show_product_fields(&mut columns[0], id);
            self.show_product_parts(&mut columns[1], id);
        });
    }

    fn show_product_fields(&mut self, ui: &mut egui::Ui, id: Option<ProductId>) {
        egui::Grid::new("product_form_grid")
            .num_columns(2)
            .spacing([40.0, 8.0])
            .show(ui, |ui| {
                ui.label("ID");
                let mut id_text = id_field_text(id);
                ui.add_enabled(false, egui::TextEdit::singleline(&mut id_text));
                ui.end_row();

                ui.label("Name");
                ui.text_edit_singleline(&mut self.product_form.name);
                ui.end_row();

                ui.label("Inv");
                ui.text_edit_singleline(&mut self.product_form.stock);
                ui.end_row();

                ui.label("Price");
                ui.text_edit_singleline(&mut self.product_form.price);
                ui.end_row();

                ui.label("Max");
                ui.text_edit_singleline(&mut self.product_form.max);
                ui.end_row();

                ui.label("Min");
                ui.text_edit_singleline(&mut self.product_form.min);
                ui.end_row();
            });

        self.show_form_errors(ui);
    }

    fn show_product_parts(&mut self, ui: &mut egui::Ui, id: Option<ProductId>) {
        ui.horizontal(|ui| {
            ui.strong("Parts");
            if search_box(ui, &mut self.form_part_query, "Search by Part ID or Name") {
                self.search_form_parts();
            }
        });

        let available: Vec<TableLine> =
            listed_parts(&self.inventory, self.form_part_matches.as_deref())
                .into_iter()
                .map(TableLine::from_part)
                .collect();
        if let Some(index) = line_table(
            ui,
            "form_parts",
            PART_HEADINGS,
            &available,
            self.form_selected_part,
        ) {
            self.form_selected_part = Some(available[index].id);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Add").clicked() {
                self.product_form.associate(self.form_selected_part, &mut self.dialogs);
            }
        });

        ui.separator();
        ui.strong("Associated Parts");
        let associated: Vec<TableLine> = self
            .product_form
            .associated_parts(&self.inventory)
            .iter()
            .map(TableLine::from_associated)
            .collect();
        // Associations may repeat a part, so rows are selected by position
        if let Some(index) =
            indexed_line_table(ui, "form_associated", &associated, self.form_selected_associated)
        {
            self.form_selected_associated = Some(index);
        }

        let mut save = false;
        let mut cancel = false;
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Remove Associated Part").clicked() {
                self.run_confirmable(Confirmable::RemoveAssociated(
                    self.form_selected_associated,
                ));
            }
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Cancel").clicked() {
                cancel = true;
            }
            if ui.button("Save").clicked() {
                save = true;
            }
        });

        if save {
            self.save_product_form(id);
        }
        if cancel {
            self.return_to_main();
        }
    }

    /// Confirmation and notice windows, one at a time
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some((question, action)) = self.pending_confirm.clone() {
            let mut answer = None;
            egui::Window::new("Confirmation")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(&question);
                    ui.horizontal(|ui| {
                        if ui.button("OK").clicked() {
                            answer = Some(true);
                        }
                        if ui.button("Cancel").clicked() {
                            answer = Some(false);
                        }
                    });
                });

            if let Some(answer) = answer {
                self.pending_confirm = None;
                if answer {
                    self.dialogs.answer_next(true);
                    self.run_confirmable(action);
                }
            }
            return;
        }

        if let Some(notice) = self.dialogs.current_notice().cloned() {
            let mut dismissed = false;
            egui::Window::new(notice.header.as_str())
                .id(egui::Id::new("notice_window"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    let color = match notice.level {
                        NoticeLevel::Error => egui::Color32::RED,
                        NoticeLevel::Warning => egui::Color32::YELLOW,
                        NoticeLevel::Information => ui.visuals().text_color(),
                    };
                    ui.colored_label(color, &notice.message);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });

            if dismissed {
                self.dialogs.dismiss_notice();
            }
        }
    }
}

impl eframe::App for InventoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(view) = self.pending_view_change.take() {
            self.current_view = view;
        }

        let blocked = self.pending_confirm.is_some() || self.dialogs.has_notices();
        self.show_top_panel(ctx, blocked);

        let view = self.current_view;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| match view {
                View::Main => self.show_main_view(ui),
                View::AddPart => self.show_part_form(ui, None),
                View::ModifyPart(id) => self.show_part_form(ui, Some(id)),
                View::AddProduct => self.show_product_form(ui, None),
                View::ModifyProduct(id) => self.show_product_form(ui, Some(id)),
            });
        });

        self.show_dialogs(ctx);
    }
}

fn id_field_text(id: Option<u32>) -> String {
    id.map_or_else(|| "Auto Gen - Disabled".to_string(), |id| id.to_string())
}

/// Parts listed in a table: every part, or the ids of the last search
fn listed_parts<'a>(inventory: &'a Inventory, matches: Option<&[PartId]>) -> Vec<&'a Part> {
    match matches {
        Some(ids) => ids.iter().filter_map(|id| inventory.lookup_part(*id)).collect(),
        None => inventory.all_parts().iter().collect(),
    }
}

fn listed_products<'a>(
    inventory: &'a Inventory,
    matches: Option<&[ProductId]>,
) -> Vec<&'a Product> {
    match matches {
        Some(ids) => ids
            .iter()
            .filter_map(|id| inventory.lookup_product(*id))
            .collect(),
        None => inventory.all_products().iter().collect(),
    }
}

/// Single-line search field; true when the user pressed Enter in it
fn search_box(ui: &mut egui::Ui, query: &mut String, hint: &str) -> bool {
    let response = ui.add(
        egui::TextEdit::singleline(query)
            .hint_text(hint)
            .desired_width(220.0),
    );
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

/// Table keyed by entity id; returns the clicked row
fn line_table(
    ui: &mut egui::Ui,
    id_salt: &str,
    headings: [&str; 4],
    lines: &[TableLine],
    selected: Option<u32>,
) -> Option<usize> {
    let selected = selected.and_then(|id| lines.iter().position(|l| l.id == id));
    table(ui, id_salt, headings, lines, selected)
}

fn indexed_line_table(
    ui: &mut egui::Ui,
    id_salt: &str,
    lines: &[TableLine],
    selected: Option<usize>,
) -> Option<usize> {
    table(ui, id_salt, PART_HEADINGS, lines, selected)
}

fn table(
    ui: &mut egui::Ui,
    id_salt: &str,
    headings: [&str; 4],
    lines: &[TableLine],
    selected: Option<usize>,
) -> Option<usize> {
    let mut clicked = None;

    ui.push_id(id_salt, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(220.0)
            .column(Column::auto().at_least(70.0))
            .column(Column::remainder().at_least(120.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(130.0))
            .header(20.0, |mut header| {
                for heading in headings {
                    header.col(|ui| {
                        ui.strong(heading);
                    });
                }
            })
            .body(|mut body| {
                for (index, line) in lines.iter().enumerate() {
                    let is_selected = selected == Some(index);
                    body.row(20.0, |mut row| {
                        let cells = [
                            line.id.to_string(),
                            line.name.clone(),
                            line.stock.clone(),
                            line.price.clone(),
                        ];
                        for text in cells {
                            row.col(|ui| {
                                if ui.selectable_label(is_selected, text).clicked() {
                                    clicked = Some(index);
                                }
                            });
                        }
                    });
                }
            });
    });

    clicked
}
