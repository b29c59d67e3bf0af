//! Dashboard Main Application
//! Main window with control panel and page viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::dashboard;
use crate::data::{DataCache, LoadedData};
use crate::gui::{ControlPanel, ControlPanelAction, PageViewer};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// CSV loading result from background thread
enum LoadResult {
    Complete(Arc<LoadedData>),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    cache: Arc<DataCache>,
    data: Option<Arc<LoadedData>>,
    control_panel: ControlPanel,
    page_viewer: PageViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self::with_config(config);
        app.start_loading();
        app
    }

    fn with_config(config: DashboardConfig) -> Self {
        let cache = Arc::new(DataCache::new(config.data_path.clone()));
        Self {
            config,
            cache,
            data: None,
            control_panel: ControlPanel::new(),
            page_viewer: PageViewer::new(),
            load_rx: None,
        }
    }

    fn is_loading(&self) -> bool {
        self.load_rx.is_some()
    }

    /// Load the dataset in a background thread.
    fn start_loading(&mut self) {
        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.control_panel.set_status("Loading dataset...");

        info!(path = %self.cache.path().display(), "starting background load");
        let cache = Arc::clone(&self.cache);
        thread::spawn(move || {
            let result = match cache.get_or_load() {
                Ok(data) => LoadResult::Complete(data),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(data)) => {
                self.control_panel.update_table(
                    &data.table,
                    &data.warnings,
                    self.config.default_year,
                    &self.config.default_country,
                );
                self.control_panel.set_status(&format!("Loaded {} rows", data.table.len()));
                self.data = Some(data);
                self.refresh_page();
            }
            Ok(LoadResult::Error(message)) => {
                error!(error = %message, "dataset load failed");
                self.control_panel.set_status(&format!("Error: {}", message));
                self.page_viewer.set_fatal(message);
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                error!("loader thread exited without a result");
                self.control_panel.set_status("Error: loader thread stopped");
                self.page_viewer
                    .set_fatal("The loader thread stopped unexpectedly.".to_string());
            }
        }
    }

    /// Re-derive the page for the current selection.
    fn refresh_page(&mut self) {
        let Some(data) = &self.data else {
            return;
        };
        match &self.control_panel.selection {
            Some(selection) => {
                let page = dashboard::render(&data.table, selection.year, &selection.country, &self.config);
                self.page_viewer.set_page(page);
                self.control_panel.export_enabled = true;
            }
            None => {
                self.page_viewer.set_fatal("The dataset contains no rows.".to_string());
                self.control_panel.export_enabled = false;
            }
        }
    }

    /// Write every chart of the current page as PNG into a chosen folder.
    fn handle_export(&mut self) {
        let Some(page) = self.page_viewer.page() else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        let results = StaticChartRenderer::export_page(page, &dir);
        let failed: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err().map(|e| e.to_string()))
            .collect();

        if let Some(first) = failed.first() {
            self.control_panel.set_status(&format!(
                "Error: {} of {} charts failed ({})",
                failed.len(),
                results.len(),
                first
            ));
            return;
        }

        self.control_panel
            .set_status(&format!("Exported {} charts", results.len()));
        info!(dir = %dir.display(), "opening export folder");
        if let Err(e) = open::that(&dir) {
            error!(error = %e, "failed to open export folder");
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading() {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::SelectionChanged => self.refresh_page(),
                        ControlPanelAction::ExportCharts => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Page Viewer
        let loading = self.is_loading();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.page_viewer.show(ui, loading);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn wait_for_load(app: &mut DashboardApp) {
        while app.is_loading() {
            app.check_load_results();
            thread::sleep(std::time::Duration::from_millis(5));
        }
    }

    #[test]
    fn dead_loader_thread_shows_error_card() {
        let mut app = DashboardApp::with_config(DashboardConfig::default());
        let (tx, rx) = channel::<LoadResult>();
        app.load_rx = Some(rx);
        drop(tx);

        app.check_load_results();

        assert!(!app.is_loading());
        assert!(app.page_viewer.page().is_none());
        assert_eq!(
            app.page_viewer.fatal(),
            Some("The loader thread stopped unexpectedly.")
        );
        assert!(app.control_panel.status.starts_with("Error"));
    }

    #[test]
    fn missing_dataset_shows_error_card() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig {
            data_path: dir.path().join("absent.csv"),
            ..DashboardConfig::default()
        };
        let mut app = DashboardApp::with_config(config);
        app.start_loading();
        wait_for_load(&mut app);

        assert!(app.page_viewer.fatal().unwrap().contains("absent.csv"));
        assert!(!app.control_panel.export_enabled);
    }

    #[test]
    fn loaded_dataset_renders_default_selection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "Entity,Code,Year,Total_GW\nNorway,NOR,2020,40\n").unwrap();
        let config = DashboardConfig {
            data_path: path,
            ..DashboardConfig::default()
        };
        let mut app = DashboardApp::with_config(config);
        app.start_loading();
        wait_for_load(&mut app);

        let page = app.page_viewer.page().unwrap();
        assert_eq!((page.year, page.country.as_str()), (2020, "Norway"));
        assert!(app.control_panel.export_enabled);
    }
}
