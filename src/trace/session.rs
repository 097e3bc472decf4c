//! The Trace Fun word flow.
//!
//! ```text
//! Idle ──► Listening ──► Confirm(word) ──► Tracing(word, i) ──► Celebrate(word)
//!   ▲          │                              │  ▲
//!   └──────────┘ no usable word               └──┘ next letter
//! ```
//!
//! `reset` returns to `Idle` from anywhere. Delayed steps (tile pop-in,
//! advancing after a letter, the celebration line) run on a [`Timeline`]
//! driven by [`TraceSession::tick`].

use egui::{Color32, Pos2, Vec2, pos2};

use crate::config::TraceConfig;
use crate::event::{EventBus, StudioEvent};
use crate::glyph::{GlyphFont, LetterGlyphPath};
use crate::palette::with_opacity;
use crate::renderer::{LineCap, LineJoin, PaintCommand};
use crate::schedule::Timeline;

use super::layout::LetterLayout;
use super::tile::{DragContext, TraceTile};
use super::transcript::extract_word;
use super::TraceDifficulty;

const GUIDE_WIDTH: f32 = 3.0;
const HINT_WIDTH: f32 = 12.0;
const RING_WIDTH: f32 = 8.0;
const RING_SEGMENTS: usize = 96;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TracePhase {
    Idle,
    Listening,
    Confirm(String),
    Tracing { word: String, index: usize },
    Celebrate(String),
}

#[derive(Debug, Clone, PartialEq)]
enum TraceTimer {
    PopTile(usize),
    Advance { from: usize },
    Speak(String),
}

/// The glyph for the letter being traced, placed in the tracing area.
#[derive(Debug, Clone)]
struct ActiveLetter {
    index: usize,
    layout: LetterLayout,
    glyph: Option<LetterGlyphPath>,
}

#[derive(Debug)]
pub struct TraceSession {
    phase: TracePhase,
    transcript: String,
    tiles: Vec<TraceTile>,
    difficulty: TraceDifficulty,
    config: TraceConfig,
    timeline: Timeline<TraceTimer>,
    events: EventBus,
    active: Option<ActiveLetter>,
    last_point: Option<Pos2>,
}

impl TraceSession {
    pub fn new(config: TraceConfig, difficulty: TraceDifficulty) -> Self {
        Self {
            phase: TracePhase::Idle,
            transcript: String::new(),
            tiles: Vec::new(),
            difficulty,
            config,
            timeline: Timeline::new(),
            events: EventBus::new(),
            active: None,
            last_point: None,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn phase(&self) -> &TracePhase {
        &self.phase
    }

    pub fn tiles(&self) -> &[TraceTile] {
        &self.tiles
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn difficulty(&self) -> TraceDifficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: TraceDifficulty) {
        log::info!("Trace difficulty set to {}", difficulty.label());
        self.difficulty = difficulty;
    }

    /// The glyph of the current letter, once prepared.
    pub fn glyph(&self) -> Option<&LetterGlyphPath> {
        self.active.as_ref().and_then(|active| active.glyph.as_ref())
    }

    pub fn layout(&self) -> Option<&LetterLayout> {
        self.active.as_ref().map(|active| &active.layout)
    }

    fn current_index(&self) -> Option<usize> {
        match &self.phase {
            TracePhase::Tracing { index, .. } => Some(*index),
            _ => None,
        }
    }

    // ---- word selection ----

    pub fn start_listening(&mut self) {
        if matches!(self.phase, TracePhase::Idle | TracePhase::Celebrate(_)) {
            self.reset();
            self.phase = TracePhase::Listening;
        }
    }

    /// Live partial transcript from the recognizer.
    pub fn update_transcript(&mut self, text: &str) {
        if self.phase == TracePhase::Listening {
            self.transcript = text.to_owned();
        }
    }

    /// Final transcript. Without a usable word the session goes back to idle.
    pub fn submit_transcript(&mut self, text: &str) -> Option<String> {
        if self.phase != TracePhase::Listening {
            return None;
        }
        self.transcript = text.to_owned();
        match extract_word(text) {
            Some(word) => {
                self.phase = TracePhase::Confirm(word.clone());
                Some(word)
            }
            None => {
                log::debug!("No word in transcript {text:?}");
                self.phase = TracePhase::Idle;
                None
            }
        }
    }

    /// Proposes a typed word. Non-letters are dropped.
    pub fn choose_word(&mut self, word: &str) -> bool {
        let word: String = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_uppercase)
            .collect();
        if word.is_empty() || matches!(self.phase, TracePhase::Tracing { .. }) {
            return false;
        }
        self.phase = TracePhase::Confirm(word);
        true
    }

    /// Accepts the proposed word and starts tracing its first letter.
    pub fn confirm_word(&mut self) {
        let TracePhase::Confirm(word) = &self.phase else {
            return;
        };
        let word = word.clone();
        self.tiles = word
            .chars()
            .enumerate()
            .map(|(i, letter)| TraceTile::new(letter, i))
            .collect();
        for i in 0..self.tiles.len() {
            self.timeline
                .schedule(i as f64 * self.config.tile_pop_stagger, TraceTimer::PopTile(i));
        }
        log::info!("Tracing {word}");
        self.phase = TracePhase::Tracing { word, index: 0 };
        self.active = None;
        self.last_point = None;
    }

    /// Back to idle from anywhere, dropping pending timers.
    pub fn reset(&mut self) {
        self.timeline.cancel_all();
        self.transcript.clear();
        self.tiles.clear();
        self.active = None;
        self.last_point = None;
        self.phase = TracePhase::Idle;
    }

    // ---- letter geometry ----

    /// Extracts and centres the current letter for a tracing area of `area`.
    /// Cached until the letter or the whole-pixel area changes.
    pub fn prepare_letter(&mut self, font: &GlyphFont, area: Vec2) {
        let Some(index) = self.current_index() else {
            return;
        };
        let area = area.round();
        if self
            .active
            .as_ref()
            .is_some_and(|active| active.index == index && active.layout.area == area)
        {
            return;
        }
        let letter = self.tiles[index].letter;
        let font_size = LetterLayout::font_size_for(area, self.config.letter_scale);
        let glyph = LetterGlyphPath::extract(font, letter, font_size, self.config.sample_spacing);
        self.set_letter(glyph, area, font_size);
    }

    /// Installs the glyph for the current letter. A missing glyph means the
    /// letter cannot be traced; it is skipped.
    ///
    /// Checkpoint indices and paint points belong to one glyph and layout, so
    /// an unfinished letter starts over whenever its glyph is replaced.
    pub fn set_letter(&mut self, glyph: Option<LetterGlyphPath>, area: Vec2, font_size: f32) {
        let Some(index) = self.current_index() else {
            return;
        };
        let tile = &mut self.tiles[index];
        if !tile.is_complete && !tile.covered.is_empty() {
            log::debug!("Letter {} laid out again; tracing starts over", tile.letter);
        }
        if !tile.is_complete {
            tile.clear_progress();
        }
        let bounds = glyph.as_ref().map_or(egui::Rect::ZERO, LetterGlyphPath::bounds);
        let layout = LetterLayout::centred(area, font_size, bounds);
        let skip = glyph.is_none() && !self.tiles[index].is_complete;
        self.active = Some(ActiveLetter {
            index,
            layout,
            glyph,
        });
        self.last_point = None;

        if skip {
            log::warn!("Skipping untraceable letter {:?}", self.tiles[index].letter);
            self.tiles[index].is_complete = true;
            self.timeline.schedule(0.0, TraceTimer::Advance { from: index });
        }
    }

    // ---- dragging ----

    /// One drag sample in tracing-area coordinates.
    pub fn drag(&mut self, point: Pos2) {
        let Some(index) = self.current_index() else {
            return;
        };
        let Some(active) = self.active.as_ref().filter(|active| active.index == index) else {
            return;
        };
        let Some(glyph) = active.glyph.as_ref() else {
            return;
        };
        let ctx = DragContext {
            glyph,
            origin: active.layout.origin,
            font_size: active.layout.font_size,
            difficulty: self.difficulty,
        };
        let total = glyph.samples().len();
        let tile = &mut self.tiles[index];
        if tile.is_complete {
            return;
        }
        tile.record_drag(point, self.last_point, ctx);
        self.last_point = Some(point);

        if tile.meets_coverage(total, self.difficulty, self.config.reference_count) {
            tile.is_complete = true;
            let letter = tile.letter;
            log::info!("Letter {letter} complete");
            self.events.emit(StudioEvent::LetterCompleted { index, letter });
            self.events.emit(StudioEvent::Speak {
                text: letter.to_string(),
            });
            self.timeline
                .schedule(self.config.advance_delay, TraceTimer::Advance { from: index });
        }
    }

    pub fn end_drag(&mut self) {
        self.last_point = None;
    }

    /// Progress of the current letter toward completion, `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let (Some(index), Some(glyph)) = (self.current_index(), self.glyph()) else {
            return 0.0;
        };
        self.tiles[index].progress(glyph.samples().len(), self.difficulty, self.config.reference_count)
    }

    // ---- time ----

    /// Advances the session clock to `now` seconds and runs what became due.
    pub fn tick(&mut self, now: f64) {
        for timer in self.timeline.advance(now) {
            match timer {
                TraceTimer::PopTile(index) => {
                    if let Some(tile) = self.tiles.get_mut(index) {
                        tile.has_popped = true;
                        self.events.emit(StudioEvent::TilePopped { index });
                    }
                }
                TraceTimer::Advance { from } => self.advance_from(from),
                TraceTimer::Speak(text) => self.events.emit(StudioEvent::Speak { text }),
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.timeline.is_idle()
    }

    fn advance_from(&mut self, from: usize) {
        let TracePhase::Tracing { word, index } = &self.phase else {
            return;
        };
        if *index != from {
            return;
        }
        let word = word.clone();
        let next = from + 1;
        self.active = None;
        self.last_point = None;
        if next < self.tiles.len() {
            self.phase = TracePhase::Tracing { word, index: next };
            self.events.emit(StudioEvent::LetterAdvanced { index: next });
        } else {
            log::info!("Word {word} complete");
            self.phase = TracePhase::Celebrate(word.clone());
            self.events.emit(StudioEvent::WordCompleted { word: word.clone() });
            self.timeline.schedule(
                self.config.celebration_delay,
                TraceTimer::Speak(format!("You spelled {word}! Great job!")),
            );
        }
    }

    // ---- output ----

    /// Guide, paint and progress ring for the current letter, in tracing-area
    /// coordinates.
    pub fn render(&self) -> Vec<PaintCommand> {
        let mut commands = Vec::new();
        let (Some(index), Some(active)) = (self.current_index(), self.active.as_ref()) else {
            return commands;
        };
        let Some(glyph) = active.glyph.as_ref() else {
            return commands;
        };
        let layout = &active.layout;

        if self.difficulty == TraceDifficulty::Easy {
            commands.extend(glyph.outline_commands(
                layout.origin,
                HINT_WIDTH,
                with_opacity(Color32::GRAY, 0.06),
            ));
        }
        commands.extend(glyph.outline_commands(
            layout.origin,
            GUIDE_WIDTH,
            with_opacity(Color32::GRAY, 0.35),
        ));

        // paint is only shown where it counts
        let tile = &self.tiles[index];
        for point in &tile.paint_points {
            if self.difficulty.accepts(glyph, *point - layout.origin) {
                commands.push(PaintCommand::Circle {
                    center: *point,
                    radius: layout.paint_radius,
                    color: layout.paint_color(*point),
                });
            }
        }

        let progress = self.progress();
        if progress > 0.0 {
            commands.push(PaintCommand::Layer {
                opacity: 0.6,
                commands: vec![progress_ring(layout, progress)],
            });
        }
        commands
    }
}

/// Clockwise arc from twelve o'clock covering `progress` of the circle.
fn progress_ring(layout: &LetterLayout, progress: f32) -> PaintCommand {
    let center = pos2(layout.area.x / 2.0, layout.area.y / 2.0);
    let radius = layout.ring_radius();
    let segments = ((RING_SEGMENTS as f32 * progress).ceil() as usize).max(1);
    let sweep = std::f32::consts::TAU * progress;
    let points = (0..=segments)
        .map(|i| {
            let angle = -std::f32::consts::FRAC_PI_2 + sweep * i as f32 / segments as f32;
            center + Vec2::angled(angle) * radius
        })
        .collect();
    PaintCommand::Polyline {
        points,
        width: RING_WIDTH,
        color: Color32::from_rgb(155, 80, 220),
        cap: LineCap::Round,
        join: LineJoin::Round,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::OutlineSegment;
    use egui::vec2;

    fn square_glyph() -> LetterGlyphPath {
        let (a, b, c, d) = (pos2(0.0, 0.0), pos2(200.0, 0.0), pos2(200.0, 200.0), pos2(0.0, 200.0));
        let segments = [
            OutlineSegment::Line(a, b),
            OutlineSegment::Line(b, c),
            OutlineSegment::Line(c, d),
            OutlineSegment::Line(d, a),
        ];
        LetterGlyphPath::from_segments(&segments, 20.0).unwrap()
    }

    fn tracing(word: &str) -> TraceSession {
        let mut session = TraceSession::new(TraceConfig::default(), TraceDifficulty::Easy);
        assert!(session.choose_word(word));
        session.confirm_word();
        session
    }

    #[test]
    fn test_listening_without_word_returns_to_idle() {
        let mut session = TraceSession::new(TraceConfig::default(), TraceDifficulty::Easy);
        session.start_listening();
        assert_eq!(*session.phase(), TracePhase::Listening);
        assert_eq!(session.submit_transcript("um uh"), None);
        assert_eq!(*session.phase(), TracePhase::Idle);

        session.start_listening();
        assert_eq!(session.submit_transcript("spell cat").as_deref(), Some("CAT"));
        assert_eq!(*session.phase(), TracePhase::Confirm("CAT".into()));
    }

    #[test]
    fn test_tiles_pop_in_staggered() {
        let mut session = tracing("cat");
        assert_eq!(session.tiles().len(), 3);
        session.tick(0.0);
        assert!(session.tiles()[0].has_popped);
        assert!(!session.tiles()[1].has_popped);
        session.tick(0.5);
        assert!(session.tiles()[1].has_popped);
        assert!(!session.tiles()[2].has_popped);
        session.tick(0.8);
        assert!(session.tiles().iter().all(|t| t.has_popped));
    }

    #[test]
    fn test_untraceable_letter_is_skipped() {
        let mut session = tracing("ab");
        session.set_letter(None, vec2(400.0, 400.0), 340.0);
        session.tick(0.0);
        assert_eq!(
            *session.phase(),
            TracePhase::Tracing {
                word: "AB".into(),
                index: 1
            }
        );
    }

    #[test]
    fn test_letter_advances_after_delay() {
        let mut session = tracing("ab");
        let glyph = square_glyph();
        let samples = glyph.samples().to_vec();
        session.set_letter(Some(glyph), vec2(200.0, 200.0), 200.0);
        let origin = session.layout().unwrap().origin;
        for sample in samples {
            session.drag(sample + origin);
        }
        assert!(session.tiles()[0].is_complete);
        assert!(matches!(session.phase(), TracePhase::Tracing { index: 0, .. }));

        session.tick(0.5);
        assert!(matches!(session.phase(), TracePhase::Tracing { index: 0, .. }));
        session.tick(0.8);
        assert!(matches!(session.phase(), TracePhase::Tracing { index: 1, .. }));
        assert!(session.glyph().is_none());
    }

    #[test]
    fn test_reset_cancels_pending_work() {
        let mut session = tracing("dog");
        session.reset();
        session.tick(10.0);
        assert_eq!(*session.phase(), TracePhase::Idle);
        assert!(session.tiles().is_empty());
        assert!(!session.is_animating());
    }

    #[test]
    fn test_render_masks_paint() {
        let mut session = tracing("o");
        session.set_difficulty(TraceDifficulty::Tricky);
        session.set_letter(Some(square_glyph()), vec2(200.0, 200.0), 200.0);
        session.drag(pos2(100.0, 100.0));
        session.drag(pos2(100.0, 0.0));
        let dots = session
            .render()
            .iter()
            .filter(|c| matches!(c, PaintCommand::Circle { .. }))
            .count();
        assert_eq!(dots, 1);
    }
}
