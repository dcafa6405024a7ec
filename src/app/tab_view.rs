//! Renders a tab's view by walking its grid plan with `egui::Grid`.

use crate::tab::fields::{FieldKey, FieldValue, TabFields};
use crate::tab::layout::Slot;
use crate::tab::view::{Align, ButtonAction, Control, TabTheme, TabView, Widget};

fn color(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

const GRID_SPACING: f32 = 10.0;
const SURFACE_PADDING: f32 = 16.0;

/// Minimum size of each grid track: its share of the space left after spacing
fn track_sizes(shares: Vec<f32>, available: f32, count: usize) -> Vec<f32> {
    let gaps = GRID_SPACING * count.saturating_sub(1) as f32;
    let spare = (available - gaps).max(0.0);
    shares.into_iter().map(|share| spare * share).collect()
}

/// Fill `rect` with the tab's vertical gradient
fn paint_background(ui: &egui::Ui, rect: egui::Rect, theme: &TabTheme) {
    let (top, bottom) = (color(theme.gradient_top), color(theme.gradient_bottom));
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    ui.painter().add(egui::Shape::mesh(mesh));
}

/// Draw the view and apply edits to `fields`. Returns the actions of any
/// buttons clicked this frame.
pub fn render(ui: &mut egui::Ui, view: &TabView, fields: &mut TabFields) -> Vec<ButtonAction> {
    paint_background(ui, ui.max_rect(), &view.theme);

    let mut actions = Vec::new();
    let plan = view.plan();
    let widths = track_sizes(
        view.layout().column_shares(plan.cols()),
        ui.available_width(),
        plan.cols(),
    );
    let surface_height: f32 = view
        .surfaces()
        .iter()
        .filter(|s| !s.is_released())
        .map(|s| s.size()[1] as f32 / 2.0 + SURFACE_PADDING)
        .sum();
    let heights = track_sizes(
        view.layout().row_shares(plan.rows()),
        ui.available_height() - surface_height,
        plan.rows(),
    );

    egui::Grid::new("tab_grid")
        .spacing([GRID_SPACING, GRID_SPACING])
        .show(ui, |ui| {
            for (row, &height) in heights.iter().enumerate() {
                for (col, &width) in widths.iter().enumerate() {
                    let size = egui::vec2(width, height);
                    ui.allocate_ui_with_layout(
                        size,
                        egui::Layout::left_to_right(egui::Align::Center),
                        |ui| {
                            ui.set_min_size(size);
                            match plan.slot(row, col) {
                                Slot::Anchor(cell) => {
                                    if let Some(widget) = view.widget_for_cell(cell) {
                                        render_widget(ui, widget, fields, &mut actions);
                                    }
                                }
                                Slot::Covered(_) | Slot::Empty => {}
                            }
                        },
                    );
                }
                ui.end_row();
            }
        });

    for surface in view.surfaces().iter().filter(|s| !s.is_released()) {
        let [w, h] = surface.size();
        ui.group(|ui| {
            ui.set_min_size(egui::vec2(w as f32 / 2.0, h as f32 / 2.0));
            ui.weak(surface.name());
        });
    }

    actions
}

fn render_widget(
    ui: &mut egui::Ui,
    widget: &Widget,
    fields: &mut TabFields,
    actions: &mut Vec<ButtonAction>,
) {
    let edit = |fields: &mut TabFields, key: FieldKey, value: FieldValue| {
        if let Err(e) = fields.set(key, value) {
            log::debug!("Ignored edit of '{}': {}", widget.key, e);
        }
    };

    match &widget.control {
        Control::Label { text, align } => match align {
            Align::Left => {
                ui.label(text);
            }
            Align::Right => {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(text)
                });
            }
        },
        Control::Button { text, action } => {
            if ui.button(text).clicked() && *action != ButtonAction::Noop {
                actions.push(*action);
            }
        }
        Control::Choice { field, options } => {
            let current = match fields.get(*field) {
                Some(FieldValue::Text(s)) => s,
                _ => String::new(),
            };
            let mut selected = current.clone();
            egui::ComboBox::from_id_salt(widget.key)
                .selected_text(&selected)
                .show_ui(ui, |ui| {
                    for option in options {
                        ui.selectable_value(&mut selected, option.clone(), option);
                    }
                });
            if selected != current {
                edit(fields, *field, FieldValue::Text(selected));
            }
        }
        Control::IntSpin {
            field,
            min,
            max,
            step,
        } => {
            let Some(FieldValue::Int(mut value)) = fields.get(*field) else {
                ui.label("");
                return;
            };
            let response = ui.add(
                egui::DragValue::new(&mut value)
                    .range(*min..=*max)
                    .speed(*step as f64),
            );
            if response.changed() {
                edit(fields, *field, FieldValue::Int(value));
            }
        }
        Control::FloatSpin {
            field,
            min,
            max,
            step,
            decimals,
        } => {
            let Some(FieldValue::Float(mut value)) = fields.get(*field) else {
                ui.label("");
                return;
            };
            let response = ui.add(
                egui::DragValue::new(&mut value)
                    .range(*min..=*max)
                    .speed(*step)
                    .fixed_decimals(*decimals),
            );
            if response.changed() {
                edit(fields, *field, FieldValue::Float(value));
            }
        }
        Control::TextEntry { field } => {
            let Some(FieldValue::Text(mut text)) = fields.get(*field) else {
                ui.label("");
                return;
            };
            if ui.text_edit_singleline(&mut text).changed() {
                edit(fields, *field, FieldValue::Text(text));
            }
        }
        Control::TextArea { field } => {
            let Some(FieldValue::Text(mut text)) = fields.get(*field) else {
                ui.label("");
                return;
            };
            let response = ui.add(
                egui::TextEdit::multiline(&mut text)
                    .desired_rows(20)
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                edit(fields, *field, FieldValue::Text(text));
            }
        }
        Control::Toggle { field, text } => {
            let Some(FieldValue::Bool(mut checked)) = fields.get(*field) else {
                ui.label("");
                return;
            };
            if ui.checkbox(&mut checked, text).changed() {
                edit(fields, *field, FieldValue::Bool(checked));
            }
        }
        Control::Progress { field } => {
            let fraction = match fields.get(*field) {
                Some(FieldValue::Float(f)) => f as f32,
                _ => 0.0,
            };
            ui.add(egui::ProgressBar::new(fraction).show_percentage());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::layout::LayoutDescriptor;

    #[test]
    fn wide_first_column_gets_most_of_the_width() {
        let layout = LayoutDescriptor::new().with_column_stretch([5u32, 1, 1, 1, 1, 1, 1]);
        let widths = track_sizes(layout.column_shares(7), 1160.0, 7);

        // 1160 minus six gaps leaves 1100 to split 5:1:1:1:1:1:1
        assert!((widths[0] - 500.0).abs() < 1e-3);
        assert!(widths[1..].iter().all(|w| (w - 100.0).abs() < 1e-3));
    }

    #[test]
    fn cramped_window_gives_zero_minimums() {
        let widths = track_sizes(vec![0.5, 0.5], 5.0, 2);
        assert_eq!(widths, vec![0.0, 0.0]);
    }
}
