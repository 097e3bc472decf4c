//! The coloring canvas controller.
//!
//! `DrawingState` is the single owner of everything the canvas shows: the
//! committed strokes and stamps, the stroke being drawn, both undo histories,
//! the brush pool and the current tool settings. Every mutation goes through
//! one of its methods, which also persists the result and emits a
//! [`StudioEvent`] on the bus.
//!
//! # Stroke lifecycle
//!
//! ```text
//!            begin_stroke            end_stroke
//! ┌──────┐ ─────────────► ┌─────────┐ ──────────► committed, back to Idle
//! │ Idle │                │ Drawing │
//! └──────┘ ◄───────────── └─────────┘
//!            cancel_stroke    │  ▲
//!                             └──┘ continue_stroke
//! ```
//!
//! Strokes and stamps have separate snapshot histories, but `undo` and
//! `redo` always step both of them together.

use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brush::{BrushDescriptor, BrushPool};
use crate::config::CanvasConfig;
use crate::event::{EventBus, StudioEvent};
use crate::history::SnapshotHistory;
use crate::palette::{CRAYON_PALETTE, DEFAULT_STAMP};
use crate::renderer::{PaintCommand, Scene, render_scene};
use crate::stroke::{MutableStroke, StampPlacement, Stroke};

use super::persistence::{DrawingSnapshot, DrawingStore, SettingsRecord};

/// What a pointer gesture on the canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Brush,
    Eraser,
    Stamp,
}

/// The user's current selections.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSettings {
    pub selected_color: Color32,
    pub background_color: Color32,
    pub brush_size: f32,
    pub brush_opacity: f32,
    pub selected_brush: BrushDescriptor,
    pub tool: ToolMode,
    pub selected_stamp: String,
    pub stamps_always_on_top: bool,
}

impl CanvasSettings {
    pub fn new(config: &CanvasConfig) -> Self {
        let [r, g, b] = config.default_background;
        Self {
            selected_color: CRAYON_PALETTE[0].color,
            background_color: Color32::from_rgb(r, g, b),
            brush_size: config.default_brush_size,
            brush_opacity: 1.0,
            selected_brush: BrushDescriptor::system_brushes()[0].clone(),
            tool: ToolMode::Brush,
            selected_stamp: DEFAULT_STAMP.to_owned(),
            stamps_always_on_top: false,
        }
    }
}

#[derive(Debug)]
pub struct DrawingState {
    settings: CanvasSettings,
    pool: BrushPool,
    strokes: Vec<Stroke>,
    stamps: Vec<StampPlacement>,
    current_stroke: Option<MutableStroke>,
    stroke_history: SnapshotHistory<Vec<Stroke>>,
    stamp_history: SnapshotHistory<Vec<StampPlacement>>,
    /// Set once the current eraser gesture has snapshotted the stamps.
    erase_recorded: bool,
    next_sequence: u64,
    store: Option<DrawingStore>,
    events: EventBus,
    config: CanvasConfig,
}

impl DrawingState {
    /// An empty canvas that is never written to disk.
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            settings: CanvasSettings::new(&config),
            pool: BrushPool::default(),
            strokes: Vec::new(),
            stamps: Vec::new(),
            current_stroke: None,
            stroke_history: SnapshotHistory::new(),
            stamp_history: SnapshotHistory::new(),
            erase_recorded: false,
            next_sequence: 0,
            store: None,
            events: EventBus::new(),
            config,
        }
    }

    /// Restores the last drawing and brush settings from `store` and keeps
    /// writing to it. Missing or unreadable documents start empty.
    pub fn with_store(config: CanvasConfig, store: DrawingStore) -> Self {
        let mut state = Self::new(config);

        match store.load_settings() {
            Ok(Some(record)) => {
                let (pool, opacity) = record.restore();
                state.pool = pool;
                state.settings.brush_opacity = opacity;
            }
            Ok(None) => {}
            Err(err) => log::warn!("Ignoring unreadable brush settings: {err}"),
        }

        match store.load_drawing() {
            Ok(Some(snapshot)) => {
                let restored = snapshot.restore();
                state.next_sequence = restored
                    .strokes
                    .iter()
                    .map(Stroke::sequence)
                    .chain(restored.stamps.iter().map(|s| s.sequence))
                    .max()
                    .map_or(0, |max| max + 1);
                log::info!(
                    "Restored drawing with {} strokes and {} stamps",
                    restored.strokes.len(),
                    restored.stamps.len()
                );
                state.strokes = restored.strokes;
                state.stamps = restored.stamps;
                state.settings.background_color = restored.background;
            }
            Ok(None) => {}
            Err(err) => log::warn!("Starting with an empty drawing: {err}"),
        }

        state.store = Some(store);
        state
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn pool(&self) -> &BrushPool {
        &self.pool
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stamps(&self) -> &[StampPlacement] {
        &self.stamps
    }

    pub fn current_stroke(&self) -> Option<&MutableStroke> {
        self.current_stroke.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }

    fn take_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    // ---- strokes ----

    /// Starts a stroke with the active tool. Eraser strokes paint the
    /// background colour at full opacity. A stroke still in progress (its
    /// release was never seen) is committed first.
    pub fn begin_stroke(&mut self, point: Pos2) {
        if self.current_stroke.is_some() {
            log::debug!("Begin stroke while drawing; committing the previous one");
            self.end_stroke();
        }
        let settings = &self.settings;
        let stroke = match settings.tool {
            ToolMode::Eraser => MutableStroke::new(
                point,
                settings.background_color,
                settings.brush_size,
                BrushDescriptor::eraser(),
                1.0,
            ),
            ToolMode::Brush | ToolMode::Stamp => MutableStroke::new(
                point,
                settings.selected_color,
                settings.brush_size,
                settings.selected_brush.clone(),
                settings.brush_opacity,
            ),
        };
        log::debug!("Begin stroke with {} at {:?}", stroke.brush().name, point);
        let erasing = stroke.is_eraser();
        self.current_stroke = Some(stroke);
        self.erase_recorded = false;
        if erasing {
            self.erase_stamps_at(point);
        }
    }

    /// Extends the stroke in progress. Ignored while idle.
    pub fn continue_stroke(&mut self, point: Pos2) {
        let Some(stroke) = self.current_stroke.as_mut() else {
            return;
        };
        stroke.add_point(point);
        if stroke.is_eraser() {
            self.erase_stamps_at(point);
        }
    }

    /// Seals the stroke in progress and commits it.
    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.current_stroke.take() else {
            return;
        };
        let sequence = self.take_sequence();
        let stroke = stroke.seal(sequence);
        let point_count = stroke.points().len();

        self.stroke_history.record(&self.strokes);
        self.stamp_history.clear_redo();
        self.strokes.push(stroke);
        self.erase_recorded = false;

        self.persist_drawing();
        self.events.emit(StudioEvent::StrokeCommitted { point_count });
    }

    /// Drops the stroke in progress without committing or persisting it.
    pub fn cancel_stroke(&mut self) {
        if self.current_stroke.take().is_some() {
            log::debug!("Discarded stroke in progress");
            self.events.emit(StudioEvent::StrokeDiscarded);
        }
    }

    // ---- stamps ----

    /// Drops the selected stamp centred at `point`, sized from the brush.
    pub fn place_stamp(&mut self, point: Pos2) {
        let sequence = self.take_sequence();
        let stamp = StampPlacement::new(
            self.settings.selected_stamp.clone(),
            point,
            self.settings.brush_size * self.config.stamp_scale,
            self.settings.brush_opacity,
            sequence,
        );
        self.stamp_history.record(&self.stamps);
        self.stroke_history.clear_redo();
        let emoji = stamp.emoji.clone();
        self.stamps.push(stamp);

        self.persist_drawing();
        self.events.emit(StudioEvent::StampPlaced {
            emoji,
            location: point,
        });
    }

    /// Removes every stamp under the eraser tip at `point`. The first removal
    /// of a gesture snapshots the stamp history.
    pub fn erase_stamps_at(&mut self, point: Pos2) -> usize {
        let radius = self.settings.brush_size / 2.0;
        let hits = self.stamps.iter().filter(|s| s.hit_test(point, radius)).count();
        if hits == 0 {
            return 0;
        }
        if !self.erase_recorded {
            self.stamp_history.record(&self.stamps);
            self.stroke_history.clear_redo();
            self.erase_recorded = true;
        }
        self.stamps.retain(|s| !s.hit_test(point, radius));
        self.persist_drawing();
        self.events.emit(StudioEvent::StampsErased { count: hits });
        hits
    }

    // ---- history ----

    /// Steps back both histories at once, even if only one collection
    /// changed in the last commit.
    pub fn undo(&mut self) {
        let strokes = self.stroke_history.undo(&mut self.strokes);
        let stamps = self.stamp_history.undo(&mut self.stamps);
        if strokes || stamps {
            self.persist_drawing();
            self.events.emit(StudioEvent::Undone);
        }
    }

    pub fn redo(&mut self) {
        let strokes = self.stroke_history.redo(&mut self.strokes);
        let stamps = self.stamp_history.redo(&mut self.stamps);
        if strokes || stamps {
            self.persist_drawing();
            self.events.emit(StudioEvent::Redone);
        }
    }

    pub fn can_undo(&self) -> bool {
        self.stroke_history.can_undo() || self.stamp_history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.stroke_history.can_redo() || self.stamp_history.can_redo()
    }

    /// Empties the canvas. Undoable.
    pub fn clear(&mut self) {
        self.stroke_history.record(&self.strokes);
        self.stamp_history.record(&self.stamps);
        self.strokes.clear();
        self.stamps.clear();
        self.current_stroke = None;

        self.persist_drawing();
        self.events.emit(StudioEvent::Cleared);
    }

    // ---- settings ----

    pub fn set_color(&mut self, color: Color32) {
        self.settings.selected_color = color;
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.settings.background_color = color;
        self.persist_drawing();
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.settings.brush_size = size.clamp(self.config.min_brush_size, self.config.max_brush_size);
    }

    /// Applies a pinch zoom factor to the brush size.
    pub fn scale_brush_size(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.set_brush_size(self.settings.brush_size * factor);
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.settings.brush_opacity = opacity.clamp(0.0, 1.0);
        self.persist_settings();
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.settings.tool = tool;
    }

    pub fn set_selected_stamp(&mut self, emoji: impl Into<String>) {
        self.settings.selected_stamp = emoji.into();
        self.settings.tool = ToolMode::Stamp;
    }

    pub fn set_stamps_always_on_top(&mut self, on_top: bool) {
        self.settings.stamps_always_on_top = on_top;
    }

    /// Selects a brush from the pool and switches to brush mode.
    pub fn select_brush(&mut self, id: Uuid) -> bool {
        match self.pool.get(id) {
            Some(brush) => {
                self.settings.selected_brush = brush.clone();
                self.settings.tool = ToolMode::Brush;
                true
            }
            None => false,
        }
    }

    // ---- brush pool ----

    pub fn add_brush(&mut self, brush: BrushDescriptor) {
        log::info!("Added brush {}", brush.name);
        self.pool.add(brush);
        self.persist_settings();
    }

    /// Deletes a user brush. System brushes are kept.
    pub fn delete_brush(&mut self, id: Uuid) -> bool {
        if !self.pool.remove(id) {
            return false;
        }
        if self.settings.selected_brush.id == id {
            self.settings.selected_brush = BrushDescriptor::system_brushes()[0].clone();
        }
        self.persist_settings();
        true
    }

    /// Out-of-range slots are ignored.
    pub fn assign_brush(&mut self, id: Uuid, slot: usize) {
        if self.pool.assign(id, slot) {
            self.persist_settings();
        }
    }

    pub fn brush_for_slot(&self, slot: usize) -> Option<&BrushDescriptor> {
        self.pool.brush_for_slot(slot)
    }

    // ---- output ----

    /// Draw calls for the whole canvas in canvas-local coordinates.
    pub fn render(&self, canvas: Rect) -> Vec<PaintCommand> {
        let live = self.current_stroke.as_ref().map(MutableStroke::preview);
        render_scene(Scene {
            canvas,
            background: self.settings.background_color,
            strokes: &self.strokes,
            stamps: &self.stamps,
            live_stroke: live.as_ref(),
            stamps_on_top: self.settings.stamps_always_on_top,
        })
    }

    pub fn snapshot(&self) -> DrawingSnapshot {
        DrawingSnapshot::capture(&self.strokes, &self.stamps, self.settings.background_color)
    }

    fn persist_drawing(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(err) = store.save_drawing(&self.snapshot()) {
            log::warn!("Failed to save drawing: {err}");
        }
    }

    fn persist_settings(&self) {
        let Some(store) = &self.store else {
            return;
        };
        let record = SettingsRecord::capture(&self.pool, self.settings.brush_opacity);
        if let Err(err) = store.save_settings(&record) {
            log::warn!("Failed to save brush settings: {err}");
        }
    }
}
