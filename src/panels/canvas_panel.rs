use egui::{Key, KeyboardShortcut, Modifiers, Pos2, Rect, Sense};

use crate::input::{CanvasInput, route_event, route_gesture};
use crate::renderer::paint_commands;
use crate::state::DrawingState;

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);

pub fn canvas_panel(ctx: &egui::Context, state: &mut DrawingState, input: &mut CanvasInput) {
    // Check the longer shortcut first so it isn't consumed as plain undo
    if ctx.input_mut(|i| i.consume_shortcut(&REDO)) {
        state.redo();
    } else if ctx.input_mut(|i| i.consume_shortcut(&UNDO)) {
        state.undo();
    }

    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let rect = response.rect;

            if let Some(gesture) = input.gesture(ctx) {
                route_gesture(gesture, state);
            }
            for event in input.pointer_events(&response, rect.min) {
                route_event(event, state);
            }

            let commands = state.render(Rect::from_min_size(Pos2::ZERO, rect.size()));
            paint_commands(&painter, &commands, rect.min.to_vec2());

            if state.is_drawing() {
                ctx.request_repaint();
            }
        });
}
