use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::TimeWindow;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series toggles and dataset summary
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!("{} (#{})", state.schema.name, state.schema.number));
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            dataset_summary(ui, state);
            ui.separator();

            // Clone the layout so we can mutate state inside the loop.
            let panels = state.schema.panels.clone();

            for (i, panel) in panels.iter().enumerate() {
                let names = state.schema.panel_columns(panel);
                let n_visible = names.iter().filter(|n| state.is_visible(n)).count();
                let header_text = format!("{}  ({n_visible}/{})", panel.label, names.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(i)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.set_panel_visible(i, true);
                            }
                            if ui.small_button("None").clicked() {
                                state.set_panel_visible(i, false);
                            }
                        });

                        for name in &names {
                            let mut checked = state.is_visible(name);
                            let text = RichText::new(*name).color(state.colors.color_for(name));
                            let present = state
                                .dataset
                                .as_ref()
                                .and_then(|ds| ds.series(name))
                                .map_or(0, |s| s.present_count());
                            if ui
                                .checkbox(&mut checked, text)
                                .on_hover_text(format!("{present} numeric values"))
                                .changed()
                            {
                                state.toggle_series(name);
                            }
                        }
                    });
            }
        });
}

fn dataset_summary(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.label(format!("{} rows from {} files", ds.len(), ds.sources.len()));
    if let (Some(first), Some(last)) = (ds.earliest(), ds.latest()) {
        ui.label(format!("From {}", first.format("%Y-%m-%d %H:%M:%S %Z")));
        ui.label(format!("To   {}", last.format("%Y-%m-%d %H:%M:%S %Z")));
    }

    if !ds.skipped.is_empty() {
        egui::CollapsingHeader::new(
            RichText::new(format!("Skipped files ({})", ds.skipped.len())).color(Color32::RED),
        )
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            for skipped in &ds.skipped {
                let file_name = skipped
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| skipped.path.display().to_string());
                ui.label(RichText::new(file_name).strong())
                    .on_hover_text(skipped.path.display().to_string());
                ui.label(RichText::new(&skipped.reason).small());
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open log folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button("⟳ Reload").clicked() {
            state.reload();
        }

        ui.separator();

        let current = state.window;
        egui::ComboBox::from_id_salt("time_window")
            .selected_text(current.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for window in TimeWindow::PRESETS {
                    if ui.selectable_label(current == window, window.to_string()).clicked() {
                        state.set_window(window);
                    }
                }
            });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows, {} in window",
                ds.len(),
                state.visible_rows.len()
            ));
        }

        ui.separator();
        ui.label(RichText::new(&state.input_pattern).monospace());

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open STRASSE log folder")
        .pick_folder();

    if let Some(dir) = folder {
        let pattern = dir.join("*.txt").to_string_lossy().into_owned();
        log::info!("Loading logs from {pattern}");
        state.set_input_pattern(pattern);
    }
}
