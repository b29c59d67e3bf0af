//! Control Panel Widget
//! Left side panel with the year and country filters.

use crate::data::{EnergyTable, LoadWarning};
use egui::{Color32, ComboBox, RichText};
use std::path::Path;

/// Current filter values
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub year: i32,
    pub country: String,
}

/// Left side control panel with filters, export and status.
pub struct ControlPanel {
    pub selection: Option<Selection>,
    pub year_range: (i32, i32),
    pub countries: Vec<String>,
    pub warnings: Vec<String>,
    pub source: String,
    pub row_count: usize,
    pub column_count: usize,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selection: None,
            year_range: (0, 0),
            countries: Vec::new(),
            warnings: Vec::new(),
            source: String::new(),
            row_count: 0,
            column_count: 0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the filters from a freshly loaded table.
    pub fn update_table(
        &mut self,
        table: &EnergyTable,
        warnings: &[LoadWarning],
        preferred_year: i32,
        preferred_country: &str,
    ) {
        self.year_range = table.year_bounds().unwrap_or((preferred_year, preferred_year));
        self.countries = table.entities();
        self.warnings = warnings.iter().map(|w| w.to_string()).collect();
        self.source = file_label(table.source());
        self.row_count = table.len();
        self.column_count = table.columns().len();
        self.selection = table.default_country(preferred_country).map(|country| Selection {
            year: table.default_year(preferred_year),
            country,
        });
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 Renewables")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Capacity Dashboard").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                let text = if self.source.is_empty() {
                    "Loading...".to_string()
                } else {
                    format!(
                        "{}\n{} rows, {} columns",
                        self.source, self.row_count, self.column_count
                    )
                };
                ui.label(RichText::new(text).size(12.0));
            });

        for warning in &self.warnings {
            ui.label(
                RichText::new(format!("⚠ {}", warning))
                    .size(11.0)
                    .color(Color32::from_rgb(255, 193, 7)),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("⚙️ Filter Options").size(14.0).strong());
        ui.add_space(8.0);

        let (min_year, max_year) = self.year_range;
        let countries = &self.countries;
        if let Some(selection) = self.selection.as_mut() {
            ui.label("Select Year");
            let slider = ui.add(egui::Slider::new(&mut selection.year, min_year..=max_year));
            if slider.changed() {
                action = ControlPanelAction::SelectionChanged;
            }

            ui.add_space(8.0);
            ui.label("Select Country");
            ComboBox::from_id_salt("country")
                .width(ui.available_width() - 10.0)
                .height(400.0)
                .selected_text(&selection.country)
                .show_ui(ui, |ui| {
                    for country in countries {
                        if ui
                            .selectable_label(selection.country == *country, country)
                            .clicked()
                        {
                            selection.country = country.clone();
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        } else {
            ui.label(RichText::new("No data loaded").color(Color32::GRAY));
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                    .min_size(egui::vec2(180.0, 32.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });
        });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    ExportCharts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EnergyRecord;
    use std::path::PathBuf;

    #[test]
    fn update_table_applies_defaults() {
        let table = EnergyTable::new(
            vec![
                EnergyRecord::new("World", "OWID_WRL", 2022),
                EnergyRecord::new("Chile", "CHL", 2000),
            ],
            vec!["Entity".to_string(), "Code".to_string(), "Year".to_string()],
            PathBuf::from("data/final_renewables_dataset.csv"),
        );
        let mut panel = ControlPanel::new();
        panel.update_table(&table, &[LoadWarning::MissingNumericColumn("Population")], 2023, "World");

        assert_eq!(
            panel.selection,
            Some(Selection {
                year: 2022,
                country: "World".to_string(),
            })
        );
        assert_eq!(panel.year_range, (2000, 2022));
        assert_eq!(panel.source, "final_renewables_dataset.csv");
        assert_eq!(panel.warnings.len(), 1);
        assert_eq!(panel.row_count, 2);
        assert_eq!(panel.column_count, 3);
    }
}
