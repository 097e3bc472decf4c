use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use egui::RichText;
use serde::{Deserialize, Serialize};

use crate::config::StudioConfig;
use crate::error::PersistenceError;
use crate::event::StudioEvent;
use crate::glyph::GlyphFont;
use crate::input::CanvasInput;
use crate::panels::{BrushBuilder, TracePanelState, canvas_panel, tools_panel, trace_panel};
use crate::state::{DrawingState, DrawingStore};
use crate::trace::{TraceDifficulty, TraceSession};

pub const APP_ID: &str = "kid_studio";
const CONFIG_FILE: &str = "config.json";

/// Which mini-app is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Launcher,
    Coloring,
    TraceFun,
}

/// UI state restored through eframe storage.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct SavedUi {
    screen: Screen,
    difficulty: TraceDifficulty,
}

pub struct StudioApp {
    screen: Screen,
    drawing: DrawingState,
    canvas_input: CanvasInput,
    brush_builder: BrushBuilder,
    trace: TraceSession,
    trace_panel: TracePanelState,
    glyph_font: Option<GlyphFont>,
    /// Latest speech request, shown as a caption in place of audio.
    caption: Rc<RefCell<Option<String>>>,
}

impl StudioApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let saved: SavedUi = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        let data_dir = data_dir();
        let config = data_dir
            .as_deref()
            .map(load_config)
            .unwrap_or_default();

        let drawing = match data_dir {
            Some(dir) => {
                log::info!("Keeping drawings in {}", dir.display());
                DrawingState::with_store(config.canvas.clone(), DrawingStore::new(dir))
            }
            None => {
                log::warn!("{}; the drawing will not be saved", PersistenceError::MissingDirectory);
                DrawingState::new(config.canvas.clone())
            }
        };

        let glyph_font = match GlyphFont::bundled() {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("Letter tracing disabled: {err}");
                None
            }
        };

        let app = Self {
            screen: saved.screen,
            drawing,
            canvas_input: CanvasInput::new(),
            brush_builder: BrushBuilder::default(),
            trace: TraceSession::new(config.trace, saved.difficulty),
            trace_panel: TracePanelState::default(),
            glyph_font,
            caption: Rc::new(RefCell::new(None)),
        };
        app.subscribe_feedback();
        app
    }

    /// Speech requests become captions; everything else is just logged.
    fn subscribe_feedback(&self) {
        let caption = self.caption.clone();
        self.trace.events().subscribe(Box::new(move |event: &StudioEvent| {
            if let StudioEvent::Speak { text } = event {
                log::info!("Speak: {text}");
                *caption.borrow_mut() = Some(text.clone());
            }
        }));
        self.drawing.events().subscribe(Box::new(|event: &StudioEvent| {
            if let StudioEvent::StampPlaced { emoji, .. } = event {
                log::debug!("Stamp sound for {emoji}");
            }
        }));
    }

    fn launcher(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.heading(RichText::new("Kid Studio").size(48.0));
                ui.add_space(40.0);
                for (screen, label) in [
                    (Screen::Coloring, "🖍 Coloring"),
                    (Screen::TraceFun, "✏ Trace Fun"),
                ] {
                    let button = egui::Button::new(RichText::new(label).size(32.0));
                    if ui.add_sized([320.0, 80.0], button).clicked() {
                        log::info!("Opening {label}");
                        self.screen = screen;
                    }
                    ui.add_space(16.0);
                }
            });
        });
    }

    fn home_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("home_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🏠 Home").clicked() {
                    self.drawing.cancel_stroke();
                    self.screen = Screen::Launcher;
                }
                if let Some(text) = self.caption.borrow().as_deref() {
                    ui.label(RichText::new(format!("🔊 {text}")).italics());
                }
            });
        });
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn data_dir() -> Option<std::path::PathBuf> {
    eframe::storage_dir(APP_ID)
}

// no filesystem on the web
#[cfg(target_arch = "wasm32")]
fn data_dir() -> Option<std::path::PathBuf> {
    None
}

/// Reads `config.json` from the data directory; defaults when absent or invalid.
fn load_config(dir: &Path) -> StudioConfig {
    let path = dir.join(CONFIG_FILE);
    match std::fs::read_to_string(&path) {
        Ok(json) => StudioConfig::from_json(&json).unwrap_or_else(|err| {
            log::warn!("Ignoring invalid {}: {err}", path.display());
            StudioConfig::default()
        }),
        Err(_) => StudioConfig::default(),
    }
}

impl eframe::App for StudioApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let saved = SavedUi {
            screen: self.screen,
            difficulty: self.trace.difficulty(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &saved);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.screen != Screen::Launcher {
            self.home_bar(ctx);
        }
        match self.screen {
            Screen::Launcher => self.launcher(ctx),
            Screen::Coloring => {
                tools_panel(ctx, &mut self.drawing, &mut self.brush_builder);
                canvas_panel(ctx, &mut self.drawing, &mut self.canvas_input);
            }
            Screen::TraceFun => trace_panel(
                ctx,
                &mut self.trace,
                self.glyph_font.as_ref(),
                &mut self.trace_panel,
            ),
        }
    }
}
