//! Page Viewer Widget
//! Central scrollable area that draws a rendered dashboard page.
//! Chart cards are laid out two per row when the window is wide enough.

use crate::charts::ChartPlotter;
use crate::dashboard::{Page, Panel, Section};
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;
const TWO_COLUMN_WIDTH: f32 = 1300.0;

/// Draws the current page, or a placeholder while nothing is loaded.
#[derive(Default)]
pub struct PageViewer {
    page: Option<Page>,
    fatal: Option<String>,
}

impl PageViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_page(&mut self, page: Page) {
        self.fatal = None;
        self.page = Some(page);
    }

    /// Replace the page with a single error card.
    pub fn set_fatal(&mut self, message: String) {
        self.page = None;
        self.fatal = Some(message);
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn fatal(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    pub fn show(&self, ui: &mut egui::Ui, loading: bool) {
        if let Some(message) = self.fatal() {
            Self::draw_fatal(ui, message);
            return;
        }

        let Some(page) = &self.page else {
            ui.centered_and_justified(|ui| {
                if loading {
                    ui.spinner();
                } else {
                    ui.label(RichText::new("No Data").size(20.0));
                }
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_header(ui, page);
                ui.add_space(CARD_SPACING);
                Self::draw_insights(ui, page);
                ui.add_space(CARD_SPACING);

                let wide = ui.available_width() >= TWO_COLUMN_WIDTH;
                Self::draw_pair(
                    ui,
                    wide,
                    |ui| Self::draw_panel(ui, &page.map, ChartPlotter::draw_tile_map),
                    |ui| Self::draw_panel(ui, &page.trend, ChartPlotter::draw_trend_chart),
                );
                Self::draw_pair(
                    ui,
                    wide,
                    |ui| Self::draw_panel(ui, &page.growth, ChartPlotter::draw_growth_chart),
                    |ui| Self::draw_panel(ui, &page.leaderboard, ChartPlotter::draw_leaderboard),
                );
                Self::draw_pair(
                    ui,
                    wide,
                    |ui| Self::draw_panel(ui, &page.scatter, ChartPlotter::draw_scatter),
                    |ui| Self::draw_panel(ui, &page.comparison, ChartPlotter::draw_comparison),
                );

                ui.separator();
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&page.footer).size(11.0).color(Color32::GRAY));
                });
                ui.add_space(CARD_SPACING);
            });
    }

    fn draw_header(ui: &mut egui::Ui, page: &Page) {
        egui::Frame::none()
            .fill(Color32::from_rgb(33, 102, 172))
            .rounding(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(&page.header.title)
                            .size(26.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                    ui.label(
                        RichText::new(&page.header.subtitle)
                            .size(13.0)
                            .color(Color32::from_rgb(209, 229, 240)),
                    );
                });
            });
    }

    fn draw_insights(ui: &mut egui::Ui, page: &Page) {
        Self::card(ui, |ui| {
            ui.label(RichText::new(&page.header.insights_heading).size(18.0).strong());
            ui.add_space(8.0);

            match &page.insights {
                Section::Info(message) => ChartPlotter::draw_info(ui, message),
                Section::Chart(insights) => {
                    ChartPlotter::draw_metric_cards(ui, &insights.metrics);
                    ui.add_space(12.0);
                    ui.label(RichText::new(&page.header.mix_heading).size(15.0).strong());
                    match &insights.mix {
                        Section::Chart(mix) => ChartPlotter::draw_donut(ui, mix),
                        Section::Info(message) => ChartPlotter::draw_info(ui, message),
                    }
                }
            }
        });
    }

    fn draw_pair(
        ui: &mut egui::Ui,
        wide: bool,
        left: impl FnOnce(&mut egui::Ui),
        right: impl FnOnce(&mut egui::Ui),
    ) {
        if wide {
            ui.columns(2, |columns| {
                left(&mut columns[0]);
                right(&mut columns[1]);
            });
        } else {
            left(ui);
            ui.add_space(CARD_SPACING);
            right(ui);
        }
        ui.add_space(CARD_SPACING);
    }

    fn draw_panel<T>(ui: &mut egui::Ui, panel: &Panel<T>, draw: impl FnOnce(&mut egui::Ui, &T)) {
        Self::card(ui, |ui| {
            ui.label(RichText::new(&panel.title).size(16.0).strong());
            ui.add_space(8.0);
            match &panel.section {
                Section::Chart(data) => draw(ui, data),
                Section::Info(message) => ChartPlotter::draw_info(ui, message),
            }
        });
    }

    fn card(ui: &mut egui::Ui, content: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical(content);
            });
    }

    fn draw_fatal(ui: &mut egui::Ui, message: &str) {
        let red = Color32::from_rgb(220, 53, 69);
        ui.add_space(40.0);
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, red))
            .fill(red.gamma_multiply(0.1))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("⚠ Unable to load data").size(18.0).strong().color(red));
                ui.add_space(6.0);
                ui.label(RichText::new(message).size(14.0));
            });
    }
}
