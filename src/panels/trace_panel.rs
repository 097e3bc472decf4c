use egui::{Align, Color32, Layout, Pos2, RichText, Sense, Vec2, vec2};

use crate::glyph::GlyphFont;
use crate::palette::tile_color;
use crate::renderer::paint_commands;
use crate::trace::{TraceDifficulty, TracePhase, TraceSession};

const TILE_SIZE: f32 = 56.0;

/// Transient widgets state of the Trace Fun screen.
#[derive(Debug, Default)]
pub struct TracePanelState {
    /// Stand-in for the speech recognizer: what the child "said".
    pub heard: String,
}

pub fn trace_panel(
    ctx: &egui::Context,
    session: &mut TraceSession,
    font: Option<&GlyphFont>,
    panel: &mut TracePanelState,
) {
    session.tick(ctx.input(|i| i.time));
    if session.is_animating() {
        ctx.request_repaint();
    }

    egui::TopBottomPanel::top("trace_top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("✏ Trace Fun");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("⟲ Start over").clicked() {
                    session.reset();
                }
                for difficulty in TraceDifficulty::ALL.iter().rev() {
                    let label = format!("{} {}", difficulty.emoji(), difficulty.label());
                    if ui
                        .selectable_label(session.difficulty() == *difficulty, label)
                        .on_hover_text(difficulty.description())
                        .clicked()
                    {
                        session.set_difficulty(*difficulty);
                    }
                }
            });
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| match session.phase().clone() {
        TracePhase::Idle => idle(ui, session, panel),
        TracePhase::Listening => listening(ui, session, panel),
        TracePhase::Confirm(word) => confirm(ui, session, &word),
        TracePhase::Tracing { .. } => tracing(ui, session, font),
        TracePhase::Celebrate(word) => celebrate(ui, session, &word),
    });
}

fn idle(ui: &mut egui::Ui, session: &mut TraceSession, panel: &mut TracePanelState) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        if ui
            .button(RichText::new("🎤 Tell me a word!").size(32.0))
            .clicked()
        {
            panel.heard.clear();
            session.start_listening();
        }
        ui.add_space(24.0);
        ui.label("or type one:");
        let response = ui.text_edit_singleline(&mut panel.heard);
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            session.choose_word(&panel.heard);
        }
    });
}

fn listening(ui: &mut egui::Ui, session: &mut TraceSession, panel: &mut TracePanelState) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(RichText::new("👂 Listening…").size(32.0));
        if ui.text_edit_singleline(&mut panel.heard).changed() {
            session.update_transcript(&panel.heard);
        }
        if ui.button("Done").clicked() {
            session.submit_transcript(&panel.heard);
        }
    });
}

fn confirm(ui: &mut egui::Ui, session: &mut TraceSession, word: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(RichText::new(word).size(64.0).strong());
        ui.horizontal(|ui| {
            if ui.button(RichText::new("✅ Let's trace it!").size(24.0)).clicked() {
                session.confirm_word();
            }
            if ui.button(RichText::new("🔁 Try again").size(24.0)).clicked() {
                session.reset();
            }
        });
    });
}

fn tile_row(ui: &mut egui::Ui, session: &TraceSession, current: Option<usize>) {
    ui.horizontal(|ui| {
        for (i, tile) in session.tiles().iter().enumerate() {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(TILE_SIZE), Sense::hover());
            if !tile.has_popped {
                continue;
            }
            let mut color = tile_color(tile.color_index);
            if !tile.is_complete && current != Some(i) {
                color = color.gamma_multiply(0.45);
            }
            ui.painter().rect_filled(rect, 12.0, color);
            let text = if tile.is_complete {
                format!("{}✔", tile.letter)
            } else {
                tile.letter.to_string()
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                text,
                egui::FontId::proportional(TILE_SIZE * 0.55),
                Color32::WHITE,
            );
        }
    });
}

fn tracing(ui: &mut egui::Ui, session: &mut TraceSession, font: Option<&GlyphFont>) {
    let current = match session.phase() {
        TracePhase::Tracing { index, .. } => Some(*index),
        _ => None,
    };
    tile_row(ui, session, current);
    ui.separator();

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
    let rect = response.rect;
    let area = rect.size();

    match font {
        Some(font) => session.prepare_letter(font, area),
        None => session.set_letter(None, area, 0.0),
    }

    let local = |p: Pos2| (p - rect.min).to_pos2();
    if response.dragged() || response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            session.drag(local(pos));
        }
    }
    if response.drag_stopped() {
        session.end_drag();
    }

    painter.rect_filled(rect, 24.0, Color32::from_rgb(255, 252, 240));
    paint_commands(&painter, &session.render(), rect.min.to_vec2());
}

fn celebrate(ui: &mut egui::Ui, session: &mut TraceSession, word: &str) {
    tile_row(ui, session, None);
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new(format!("🎉 {word} 🎉")).size(72.0).strong());
        ui.label(RichText::new("You did it!").size(28.0));
        ui.add_space(24.0);
        if ui
            .add_sized(vec2(240.0, 56.0), egui::Button::new(RichText::new("Another word").size(24.0)))
            .clicked()
        {
            session.reset();
        }
    });
}
