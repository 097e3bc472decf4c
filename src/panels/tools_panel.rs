use egui::{Color32, RichText, Sense, vec2};

use crate::brush::{BrushDescriptor, BrushStyle, MAX_STAMP_SPACING, MIN_STAMP_SPACING, PatternShape, SLOT_COUNT};
use crate::palette::{CRAYON_PALETTE, STAMP_CATEGORIES};
use crate::renderer::{paint_commands, render_brush_preview};
use crate::state::{DrawingState, ToolMode};

const PREVIEW_HEIGHT: f32 = 48.0;

/// Fields of the "new brush" form.
#[derive(Debug, Clone)]
pub struct BrushBuilder {
    pub name: String,
    pub icon: String,
    pub style: BrushStyle,
    pub shape: PatternShape,
    pub spacing: f32,
    pub variation: f32,
}

impl Default for BrushBuilder {
    fn default() -> Self {
        Self {
            name: "My Brush".to_owned(),
            icon: "🎨".to_owned(),
            style: BrushStyle::Crayon,
            shape: PatternShape::Star,
            spacing: 1.0,
            variation: 0.3,
        }
    }
}

impl BrushBuilder {
    pub fn build(&self) -> BrushDescriptor {
        let shape = (self.style == BrushStyle::PatternStamp).then_some(self.shape);
        BrushDescriptor::new_user(
            self.name.trim(),
            self.icon.trim(),
            self.style,
            shape,
            self.spacing,
            self.variation,
        )
    }
}

pub fn tools_panel(ctx: &egui::Context, state: &mut DrawingState, builder: &mut BrushBuilder) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                tool_modes(ui, state);
                ui.separator();
                history_buttons(ui, state);
                ui.separator();
                quick_slots(ui, state);
                brush_list(ui, state);
                ui.separator();
                colors(ui, state);
                ui.separator();
                sliders(ui, state);
                ui.separator();
                stamps(ui, state);
                ui.separator();
                brush_builder(ui, state, builder);
            });
        });
}

fn tool_modes(ui: &mut egui::Ui, state: &mut DrawingState) {
    ui.heading("Tools");
    ui.horizontal(|ui| {
        for (mode, label) in [
            (ToolMode::Brush, "🖍 Brush"),
            (ToolMode::Eraser, "⬜ Eraser"),
            (ToolMode::Stamp, "⭐ Stamp"),
        ] {
            if ui.selectable_label(state.settings().tool == mode, label).clicked() {
                log::info!("Tool selected from UI: {label}");
                state.set_tool(mode);
            }
        }
    });
}

fn history_buttons(ui: &mut egui::Ui, state: &mut DrawingState) {
    ui.horizontal(|ui| {
        if ui.add_enabled(state.can_undo(), egui::Button::new("↩ Undo")).clicked() {
            state.undo();
        }
        if ui.add_enabled(state.can_redo(), egui::Button::new("↪ Redo")).clicked() {
            state.redo();
        }
        if ui.button("🗑 Clear").clicked() {
            state.clear();
        }
    });
}

fn quick_slots(ui: &mut egui::Ui, state: &mut DrawingState) {
    ui.horizontal(|ui| {
        for slot in 0..SLOT_COUNT {
            let brush = state.brush_for_slot(slot).map(|b| (b.id, b.icon.clone()));
            let label = brush.as_ref().map_or("·".to_owned(), |(_, icon)| icon.clone());
            let button = ui
                .add_enabled(brush.is_some(), egui::Button::new(RichText::new(label).size(22.0)))
                .on_hover_text(format!("Quick slot {}", slot + 1));
            if button.clicked() {
                if let Some((id, _)) = brush {
                    state.select_brush(id);
                }
            }
        }
    });
}

fn brush_list(ui: &mut egui::Ui, state: &mut DrawingState) {
    let selected = state.settings().selected_brush.id;
    let brushes: Vec<(uuid::Uuid, String, bool)> = state
        .pool()
        .brushes()
        .iter()
        .map(|b| (b.id, format!("{} {}", b.icon, b.name), b.is_system))
        .collect();

    for (id, label, is_system) in brushes {
        ui.horizontal(|ui| {
            let response = ui.selectable_label(selected == id, label);
            if response.clicked() {
                state.select_brush(id);
            }
            response.context_menu(|ui| {
                for slot in 0..SLOT_COUNT {
                    if ui.button(format!("Put in slot {}", slot + 1)).clicked() {
                        state.assign_brush(id, slot);
                        ui.close_menu();
                    }
                }
            });
            if !is_system && ui.small_button("🗑").clicked() {
                state.delete_brush(id);
            }
        });
    }
}

fn colors(ui: &mut egui::Ui, state: &mut DrawingState) {
    ui.label("Colors");
    egui::Grid::new("crayon_grid").spacing([4.0, 4.0]).show(ui, |ui| {
        for (i, crayon) in CRAYON_PALETTE.iter().enumerate() {
            let selected = state.settings().selected_color == crayon.color;
            let (rect, response) = ui.allocate_exact_size(vec2(24.0, 24.0), Sense::click());
            ui.painter().circle_filled(rect.center(), 11.0, crayon.color);
            if selected {
                ui.painter()
                    .circle_stroke(rect.center(), 12.0, egui::Stroke::new(2.0, Color32::BLACK));
            }
            if response.on_hover_text(crayon.name).clicked() {
                state.set_color(crayon.color);
                state.set_tool(ToolMode::Brush);
            }
            if i % 8 == 7 {
                ui.end_row();
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label("Paper");
        let mut background = state.settings().background_color;
        if ui.color_edit_button_srgba(&mut background).changed() {
            state.set_background_color(background);
        }
    });
}

fn sliders(ui: &mut egui::Ui, state: &mut DrawingState) {
    let mut size = state.settings().brush_size;
    if ui
        .add(egui::Slider::new(&mut size, 6.0..=80.0).text("Size"))
        .changed()
    {
        state.set_brush_size(size);
    }

    let mut opacity = state.settings().brush_opacity;
    if ui
        .add(egui::Slider::new(&mut opacity, 0.1..=1.0).text("Opacity"))
        .changed()
    {
        state.set_opacity(opacity);
    }

    let settings = state.settings();
    let rect_size = vec2(ui.available_width(), PREVIEW_HEIGHT);
    let (rect, _) = ui.allocate_exact_size(rect_size, Sense::hover());
    let preview = render_brush_preview(
        &settings.selected_brush,
        settings.selected_color,
        settings.brush_size.min(PREVIEW_HEIGHT * 0.5),
        settings.brush_opacity,
        egui::Rect::from_min_size(egui::Pos2::ZERO, rect.size()),
    );
    ui.painter().rect_filled(rect, 6.0, settings.background_color);
    paint_commands(&ui.painter().with_clip_rect(rect), &preview, rect.min.to_vec2());
}

fn stamps(ui: &mut egui::Ui, state: &mut DrawingState) {
    let mut on_top = state.settings().stamps_always_on_top;
    if ui.checkbox(&mut on_top, "Stamps on top").changed() {
        state.set_stamps_always_on_top(on_top);
    }
    for category in STAMP_CATEGORIES.iter() {
        egui::CollapsingHeader::new(format!("{} {}", category.icon, category.name))
            .default_open(category.name == "Insects")
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for stamp in category.stamps {
                        let selected = state.settings().tool == ToolMode::Stamp
                            && state.settings().selected_stamp == *stamp;
                        if ui
                            .selectable_label(selected, RichText::new(*stamp).size(22.0))
                            .clicked()
                        {
                            state.set_selected_stamp(*stamp);
                        }
                    }
                });
            });
    }
}

fn brush_builder(ui: &mut egui::Ui, state: &mut DrawingState, builder: &mut BrushBuilder) {
    egui::CollapsingHeader::new("➕ New brush").show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut builder.icon).desired_width(28.0));
            ui.text_edit_singleline(&mut builder.name);
        });
        egui::ComboBox::from_label("Style")
            .selected_text(builder.style.display_name())
            .show_ui(ui, |ui| {
                for style in BrushStyle::ALL {
                    ui.selectable_value(&mut builder.style, style, style.display_name());
                }
            });
        if builder.style == BrushStyle::PatternStamp {
            egui::ComboBox::from_label("Shape")
                .selected_text(format!("{} {}", builder.shape.icon(), builder.shape.display_name()))
                .show_ui(ui, |ui| {
                    for shape in PatternShape::ALL {
                        ui.selectable_value(&mut builder.shape, shape, shape.display_name());
                    }
                });
            ui.add(egui::Slider::new(&mut builder.spacing, MIN_STAMP_SPACING..=MAX_STAMP_SPACING).text("Spacing"));
        }
        ui.add(egui::Slider::new(&mut builder.variation, 0.0..=1.0).text("Wildness"));

        let draft = builder.build();
        let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), PREVIEW_HEIGHT), Sense::hover());
        let preview = render_brush_preview(
            &draft,
            state.settings().selected_color,
            16.0,
            1.0,
            egui::Rect::from_min_size(egui::Pos2::ZERO, rect.size()),
        );
        ui.painter().rect_filled(rect, 6.0, state.settings().background_color);
        paint_commands(&ui.painter().with_clip_rect(rect), &preview, rect.min.to_vec2());

        let valid = !builder.name.trim().is_empty();
        if ui.add_enabled(valid, egui::Button::new("Add brush")).clicked() {
            state.add_brush(draft);
        }
    });
}
