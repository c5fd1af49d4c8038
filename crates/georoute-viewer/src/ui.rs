//! Route panel: city pickers, coordinate fields, route mode and readouts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use georoute::RouteMode;
use georoute::cities::{self, CUSTOM, find_city, selection_label};
use georoute::planner::parse_coordinate;

use crate::route::{RouteState, frame_clock};

/// Plugin for the route panel.
pub struct RouteUiPlugin;

impl Plugin for RouteUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_systems(EguiPrimaryContextPass, route_ui_system);
    }
}

/// Which edits happened this frame.
#[derive(Default)]
struct PanelEdits {
    inputs_changed: bool,
    mode: Option<RouteMode>,
}

/// City selector for one endpoint. Returns the picked city name, if any.
fn city_combo(ui: &mut egui::Ui, id: &str, lat: &str, lon: &str) -> Option<&'static str> {
    let selected = selection_label(parse_coordinate(lat), parse_coordinate(lon));
    let mut choice = selected;

    egui::ComboBox::from_id_salt(id)
        .selected_text(selected)
        .width(170.0)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut choice, CUSTOM, CUSTOM);
            for name in cities::sorted_names() {
                ui.selectable_value(&mut choice, name, name);
            }
        });

    (choice != selected && choice != CUSTOM).then_some(choice)
}

/// Lat/lon fields for one endpoint. Returns true when either was edited.
fn coordinate_row(ui: &mut egui::Ui, lat: &mut String, lon: &mut String) -> bool {
    ui.horizontal(|ui| {
        ui.label("Lat:");
        let lat_changed = ui
            .add(egui::TextEdit::singleline(lat).desired_width(80.0))
            .changed();
        ui.label("Lon:");
        let lon_changed = ui
            .add(egui::TextEdit::singleline(lon).desired_width(80.0))
            .changed();
        lat_changed || lon_changed
    })
    .inner
}

/// Render the route panel and apply edits.
#[allow(clippy::needless_pass_by_value)]
fn route_ui_system(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mut state: ResMut<RouteState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let mut edits = PanelEdits::default();

    egui::Window::new("Route")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            let fields = &mut state.fields;

            ui.strong("Point A");
            if let Some(city) = city_combo(ui, "city_a", &fields.lat_a, &fields.lon_a)
                .and_then(find_city)
            {
                fields.set_a(city);
                edits.inputs_changed = true;
            }
            edits.inputs_changed |= coordinate_row(ui, &mut fields.lat_a, &mut fields.lon_a);

            ui.separator();
            ui.strong("Point B");
            if let Some(city) = city_combo(ui, "city_b", &fields.lat_b, &fields.lon_b)
                .and_then(find_city)
            {
                fields.set_b(city);
                edits.inputs_changed = true;
            }
            edits.inputs_changed |= coordinate_row(ui, &mut fields.lat_b, &mut fields.lon_b);

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Travel by:");
                let mut mode = state.mode;
                egui::ComboBox::from_id_salt("route_mode")
                    .selected_text(mode.label())
                    .show_ui(ui, |ui| {
                        for option in RouteMode::ALL {
                            ui.selectable_value(&mut mode, option, option.label());
                        }
                    });
                if mode != state.mode {
                    edits.mode = Some(mode);
                }
            });

            ui.separator();
            let readout = &state.readout;
            if let Some(status) = &readout.status {
                ui.colored_label(egui::Color32::from_rgb(0xff, 0x88, 0x44), status);
            }
            if let Some(distance) = &readout.distance {
                ui.label(distance);
            }
            if let Some(travel_time) = &readout.travel_time {
                ui.label(travel_time);
            }

            ui.separator();
            ui.label("Controls:");
            ui.label("  Left drag - Orbit");
            ui.label("  Scroll - Zoom");
        });

    if let Some(mode) = edits.mode {
        let RouteState {
            planner,
            readout,
            mode: current,
            ..
        } = &mut *state;
        *current = mode;
        planner.set_route_mode(mode.key(), readout);
        tracing::debug!("Route mode set to {mode}");
    }
    if edits.inputs_changed {
        state.planner.request_update(&frame_clock(&time));
    }

    Ok(())
}
